//! Accounts, Registration and Contact
//!
//! Admin-facing user records plus the drafts behind the registration,
//! admin create-user and contact forms.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::validation::{ValidationError, Validator};

lazy_static! {
    static ref AADHAAR: Regex = Regex::new(r"^[0-9]{12}$").unwrap();
}

const MIN_PASSWORD: usize = 6;

/// A user as listed on the admin dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub aadhaar: Option<String>,
    #[serde(default)]
    pub is_blocked: bool,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Header counters of the admin dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserStats {
    pub total: usize,
    pub blocked: usize,
}

impl UserStats {
    pub fn from_users(users: &[UserAccount]) -> Self {
        Self {
            total: users.len(),
            blocked: users.iter().filter(|u| u.is_blocked).count(),
        }
    }

    pub fn active(&self) -> usize {
        self.total - self.blocked
    }
}

/// Admin "create user" form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUserDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub aadhaar: String,
    pub password: String,
}

impl NewUserDraft {
    /// Returns a copy with trimmed, normalized values
    pub fn validate(&self) -> Result<NewUserDraft, ValidationError> {
        let mut v = Validator::new();
        v.required("name", "Name", &self.name);
        v.email("email", "Email", &self.email);
        v.phone("phone", "Phone", &self.phone);
        let aadhaar = v.pattern("aadhaar", "Aadhaar", &self.aadhaar, &AADHAAR, "12 digits");
        v.min_len("password", "Password", &self.password, MIN_PASSWORD);
        v.finish()?;
        Ok(NewUserDraft {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            aadhaar: aadhaar.unwrap_or_default(),
            password: self.password.clone(),
        })
    }
}

/// Self-service registration; document URLs are filled after upload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub aadhaar_url: String,
    pub signature_url: String,
    pub photo_url: String,
}

impl RegistrationDraft {
    /// Checks the typed fields only, before any upload happens
    pub fn validate_details(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new();
        self.check_details(&mut v);
        v.finish()
    }

    /// Full check, including the uploaded documents
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new();
        self.check_details(&mut v);
        v.required("aadhaarUrl", "Aadhaar document", &self.aadhaar_url);
        v.required("signatureUrl", "Signature", &self.signature_url);
        v.required("photoUrl", "Photo", &self.photo_url);
        v.finish()
    }

    fn check_details(&self, v: &mut Validator) {
        v.required("name", "Name", &self.name);
        v.email("email", "Email", &self.email);
        v.phone("phone", "Phone", &self.phone);
        v.min_len("password", "Password", &self.password, MIN_PASSWORD);
    }
}

/// A pending self-registration, as seen by admins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub aadhaar_url: Option<String>,
    #[serde(default)]
    pub signature_url: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Public contact form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new();
        v.required("name", "Name", &self.name);
        v.email("email", "Email", &self.email);
        v.mobile("phone", "Phone", &self.phone);
        v.required("message", "Message", &self.message);
        v.finish()
    }
}

/// A message left through the contact form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, blocked: bool) -> UserAccount {
        UserAccount {
            id: id.to_string(),
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            aadhaar: None,
            is_blocked: blocked,
            is_admin: false,
            created_at: None,
        }
    }

    #[test]
    fn test_user_stats() {
        let stats = UserStats::from_users(&[user("a", false), user("b", true), user("c", true)]);
        assert_eq!(stats, UserStats { total: 3, blocked: 2 });
        assert_eq!(stats.active(), 1);
    }

    #[test]
    fn test_new_user_rules() {
        let draft = NewUserDraft {
            name: "Ravi".into(),
            email: "ravi@example.com".into(),
            phone: "9876543210".into(),
            aadhaar: "1234 5678 9012".into(),
            password: "secret1".into(),
        };
        assert_eq!(draft.validate().unwrap().aadhaar, "123456789012");

        let short = NewUserDraft { password: "abc".into(), aadhaar: "12".into(), ..draft };
        let err = short.validate().unwrap_err();
        assert_eq!(err.fields(), vec!["aadhaar", "password"]);
    }

    #[test]
    fn test_registration_needs_documents() {
        let draft = RegistrationDraft {
            name: "Meera".into(),
            email: "meera@example.com".into(),
            phone: "9123456780".into(),
            password: "hunter22".into(),
            ..Default::default()
        };
        assert!(draft.validate_details().is_ok());
        let err = draft.validate().unwrap_err();
        assert_eq!(err.fields(), vec!["aadhaarUrl", "signatureUrl", "photoUrl"]);
    }

    #[test]
    fn test_contact_phone_rule() {
        let draft = ContactDraft {
            name: "A".into(),
            email: "a@b.co".into(),
            phone: "5123456789".into(),
            message: "Hello".into(),
        };
        assert!(draft.validate().unwrap_err().has("phone"));
    }

    #[test]
    fn test_user_account_from_admin_listing() {
        let json = r#"{"_id":"u9","name":"N","email":"e@x.io","phone":"1","isBlocked":true}"#;
        let account: UserAccount = serde_json::from_str(json).unwrap();
        assert!(account.is_blocked);
        assert!(!account.is_admin);
    }
}

//! Session
//!
//! The signed-in identity. Created from the login response, persisted by the
//! app, dropped on logout. Tokens are opaque.

use serde::{Deserialize, Serialize};

use super::error::TrackerError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(rename = "id")]
    pub user_id: String,
    #[serde(default)]
    pub is_admin: bool,
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl Session {
    pub fn new(user_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            is_admin: false,
            access_token: access_token.into(),
            refresh_token: None,
        }
    }

    /// A session without an id or token cannot make authenticated calls
    pub fn is_usable(&self) -> bool {
        !self.user_id.trim().is_empty() && !self.access_token.trim().is_empty()
    }

    /// `Authorization` header value
    pub fn bearer(&self) -> Result<String, TrackerError> {
        if self.is_usable() {
            Ok(format!("Bearer {}", self.access_token))
        } else {
            Err(TrackerError::SignInRequired)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_payload_shape() {
        let json = r#"{"id":"u1","isAdmin":true,"accessToken":"abc","refreshToken":"r"}"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.user_id, "u1");
        assert!(session.is_admin);
        assert_eq!(session.bearer().unwrap(), "Bearer abc");
    }

    #[test]
    fn test_empty_token_requires_sign_in() {
        let session = Session::new("u1", " ");
        assert_eq!(session.bearer(), Err(TrackerError::SignInRequired));
    }
}

//! Field Validation
//!
//! Every form in the portal is checked here before anything is serialized.
//! A `Validator` accumulates one issue per offending field so the view can
//! highlight all of them at once.

use std::fmt;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref PHONE: Regex = Regex::new(r"^[0-9]{10}$").unwrap();
    static ref MOBILE_IN: Regex = Regex::new(r"^[6-9][0-9]{9}$").unwrap();
}

/// What is wrong with a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldProblem {
    Missing,
    InvalidEmail,
    InvalidPhone,
    InvalidDate,
    FutureDate,
    InvalidNumber,
    TooShort { min: usize },
    /// Value does not match the expected shape, e.g. "ABCDE1234F"
    Format { expected: &'static str },
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldProblem::Missing => write!(f, "is required"),
            FieldProblem::InvalidEmail => write!(f, "must be a valid email address"),
            FieldProblem::InvalidPhone => write!(f, "must be a 10-digit phone number"),
            FieldProblem::InvalidDate => write!(f, "must be a date (YYYY-MM-DD)"),
            FieldProblem::FutureDate => write!(f, "cannot be in the future"),
            FieldProblem::InvalidNumber => write!(f, "must be a non-negative number"),
            FieldProblem::TooShort { min } => write!(f, "must be at least {} characters", min),
            FieldProblem::Format { expected } => write!(f, "must look like {}", expected),
        }
    }
}

/// One offending field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Wire key of the field, e.g. `phoneNumber`
    pub field: &'static str,
    /// Human label, e.g. `Phone Number`
    pub label: &'static str,
    pub problem: FieldProblem,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label, self.problem)
    }
}

/// Local, pre-network rejection listing every offending field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// Issue for the given wire key, if any
    pub fn issue_for(&self, field: &str) -> Option<&FieldIssue> {
        self.issues.iter().find(|issue| issue.field == field)
    }

    pub fn has(&self, field: &str) -> bool {
        self.issue_for(field).is_some()
    }

    pub fn fields(&self) -> Vec<&'static str> {
        self.issues.iter().map(|issue| issue.field).collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.issues.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Accumulates field issues
#[derive(Debug, Default)]
pub struct Validator {
    issues: Vec<FieldIssue>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, field: &'static str, label: &'static str, problem: FieldProblem) {
        self.issues.push(FieldIssue { field, label, problem });
    }

    /// Records `Missing` and returns the trimmed value when present
    pub fn required<'v>(
        &mut self,
        field: &'static str,
        label: &'static str,
        value: &'v str,
    ) -> Option<&'v str> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.push(field, label, FieldProblem::Missing);
            None
        } else {
            Some(trimmed)
        }
    }

    pub fn email(&mut self, field: &'static str, label: &'static str, value: &str) {
        if let Some(v) = self.required(field, label, value) {
            if !EMAIL.is_match(v) {
                self.push(field, label, FieldProblem::InvalidEmail);
            }
        }
    }

    pub fn phone(&mut self, field: &'static str, label: &'static str, value: &str) {
        if let Some(v) = self.required(field, label, value) {
            if !PHONE.is_match(v) {
                self.push(field, label, FieldProblem::InvalidPhone);
            }
        }
    }

    /// Indian mobile numbers start with 6-9
    pub fn mobile(&mut self, field: &'static str, label: &'static str, value: &str) {
        if let Some(v) = self.required(field, label, value) {
            if !MOBILE_IN.is_match(v) {
                self.push(field, label, FieldProblem::InvalidPhone);
            }
        }
    }

    pub fn min_len(&mut self, field: &'static str, label: &'static str, value: &str, min: usize) {
        if let Some(v) = self.required(field, label, value) {
            if v.chars().count() < min {
                self.push(field, label, FieldProblem::TooShort { min });
            }
        }
    }

    /// Matches `pattern` after stripping spaces and upper-casing
    pub fn pattern(
        &mut self,
        field: &'static str,
        label: &'static str,
        value: &str,
        pattern: &Regex,
        expected: &'static str,
    ) -> Option<String> {
        let v = self.required(field, label, value)?;
        let normalized: String = v.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_uppercase();
        if pattern.is_match(&normalized) {
            Some(normalized)
        } else {
            self.push(field, label, FieldProblem::Format { expected });
            None
        }
    }

    pub fn date(
        &mut self,
        field: &'static str,
        label: &'static str,
        value: &str,
        today: NaiveDate,
    ) -> Option<NaiveDate> {
        let v = self.required(field, label, value)?;
        match NaiveDate::parse_from_str(v, "%Y-%m-%d") {
            Ok(date) if date > today => {
                self.push(field, label, FieldProblem::FutureDate);
                None
            }
            Ok(date) => Some(date),
            Err(_) => {
                self.push(field, label, FieldProblem::InvalidDate);
                None
            }
        }
    }

    pub fn amount(&mut self, field: &'static str, label: &'static str, value: &str) -> Option<f64> {
        let v = self.required(field, label, value)?;
        match v.parse::<f64>() {
            Ok(n) if n.is_finite() && n >= 0.0 => Some(n),
            _ => {
                self.push(field, label, FieldProblem::InvalidNumber);
                None
            }
        }
    }

    pub fn positive_int(&mut self, field: &'static str, label: &'static str, value: &str) -> Option<u32> {
        let v = self.required(field, label, value)?;
        match v.parse::<u32>() {
            Ok(n) if n > 0 => Some(n),
            _ => {
                self.push(field, label, FieldProblem::InvalidNumber);
                None
            }
        }
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues: self.issues })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_collects_every_issue() {
        let mut v = Validator::new();
        v.required("name", "Name", "  ");
        v.email("email", "Email", "not-an-email");
        v.phone("phone", "Phone", "12345");
        let err = v.finish().unwrap_err();
        assert_eq!(err.fields(), vec!["name", "email", "phone"]);
        assert_eq!(err.issue_for("phone").unwrap().problem, FieldProblem::InvalidPhone);
    }

    #[test]
    fn test_missing_reported_once() {
        let mut v = Validator::new();
        v.email("email", "Email", "");
        let err = v.finish().unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].problem, FieldProblem::Missing);
    }

    #[test]
    fn test_dates() {
        let mut v = Validator::new();
        assert_eq!(
            v.date("dob", "Date of Birth", "1990-02-14", today()),
            NaiveDate::from_ymd_opt(1990, 2, 14)
        );
        assert!(v.date("dob", "Date of Birth", "14/02/1990", today()).is_none());
        assert!(v.date("dob", "Date of Birth", "2030-01-01", today()).is_none());
        let err = v.finish().unwrap_err();
        assert_eq!(err.issues[0].problem, FieldProblem::InvalidDate);
        assert_eq!(err.issues[1].problem, FieldProblem::FutureDate);
    }

    #[test]
    fn test_mobile_requires_indian_prefix() {
        let mut v = Validator::new();
        v.mobile("phone", "Phone", "9876543210");
        assert!(v.finish().is_ok());

        let mut v = Validator::new();
        v.mobile("phone", "Phone", "1234567890");
        assert!(v.finish().is_err());
    }

    #[test]
    fn test_phone_rejects_non_ascii_digits() {
        let mut v = Validator::new();
        v.phone("phone", "Phone", "٩٨٧٦٥٤٣٢١٠");
        v.mobile("mobile", "Mobile", "९८७६५४३२१०");
        let err = v.finish().unwrap_err();
        assert_eq!(err.fields(), vec!["phone", "mobile"]);
        assert_eq!(err.issue_for("phone").unwrap().problem, FieldProblem::InvalidPhone);
    }

    #[test]
    fn test_display_lists_labels() {
        let mut v = Validator::new();
        v.min_len("password", "Password", "abc", 6);
        let err = v.finish().unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 6 characters");
    }
}

//! Submission Records
//!
//! Shapes the backend returns for created quota items and their counts.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::quota_item::QuotaDraft;

/// Server-assigned identifier of a created item
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(pub String);

impl SubmissionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubmissionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Acknowledgment of a created item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionAck {
    #[serde(rename = "_id")]
    pub id: SubmissionId,
}

/// Counts as returned by the stats endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressCounts {
    pub submitted: u32,
    pub pending: u32,
}

/// A previously created item as listed on dashboards
///
/// `data` stays a draft: records written by older versions of the form may
/// not pass today's validation, and listing must still show them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    #[serde(rename = "_id")]
    pub id: SubmissionId,
    #[serde(default)]
    pub data: QuotaDraft,
    #[serde(default)]
    pub submitted: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl SubmissionRecord {
    pub fn status_label(&self) -> &'static str {
        if self.submitted {
            "Submitted"
        } else {
            "Pending"
        }
    }

    pub fn created_on(&self) -> String {
        self.created_at
            .map(|at| at.format("%d %b %Y").to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_tolerates_legacy_payload() {
        let json = r#"{
            "_id": "66a1",
            "data": { "fullName": "Old Style", "phoneNumber": "9876543210", "gender": "F" },
            "submitted": false,
            "createdAt": "2024-07-24T10:00:00.000Z"
        }"#;
        let record: SubmissionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id.as_str(), "66a1");
        assert_eq!(record.data.phone_number, "9876543210");
        assert_eq!(record.status_label(), "Pending");
        assert_eq!(record.created_on(), "24 Jul 2024");
    }

    #[test]
    fn test_counts_default_missing_fields() {
        let counts: ProgressCounts = serde_json::from_str(r#"{"submitted": 4}"#).unwrap();
        assert_eq!(counts, ProgressCounts { submitted: 4, pending: 0 });
    }
}

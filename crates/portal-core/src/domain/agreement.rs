//! Agreement

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Statement the user signs
pub const AGREEMENT_TEXT: &str =
    "Please sign to confirm you accept the terms and conditions of Aspire Career Consultancy.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgreementRecord {
    /// URL of the uploaded signature image
    #[serde(default)]
    pub signature: String,
    #[serde(default)]
    pub agreement_text: String,
    #[serde(default)]
    pub signed_at: Option<DateTime<Utc>>,
}

impl AgreementRecord {
    pub fn new(signature_url: impl Into<String>) -> Self {
        Self {
            signature: signature_url.into(),
            agreement_text: AGREEMENT_TEXT.to_string(),
            signed_at: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgreementStatus {
    Unsigned,
    Signed {
        signature: String,
        signed_at: Option<DateTime<Utc>>,
    },
}

impl AgreementStatus {
    /// The first record carrying a signature decides
    pub fn from_records(records: &[AgreementRecord]) -> Self {
        records
            .iter()
            .find(|r| !r.signature.trim().is_empty())
            .map(|r| AgreementStatus::Signed {
                signature: r.signature.clone(),
                signed_at: r.signed_at,
            })
            .unwrap_or(AgreementStatus::Unsigned)
    }

    pub fn is_signed(&self) -> bool {
        matches!(self, AgreementStatus::Signed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_skips_blank_signatures() {
        let records = vec![
            AgreementRecord::new(""),
            AgreementRecord::new("https://img.example/sig.png"),
        ];
        match AgreementStatus::from_records(&records) {
            AgreementStatus::Signed { signature, .. } => {
                assert_eq!(signature, "https://img.example/sig.png")
            }
            AgreementStatus::Unsigned => panic!("expected signed"),
        }
        assert_eq!(AgreementStatus::from_records(&[]), AgreementStatus::Unsigned);
    }

    #[test]
    fn test_payload_keys() {
        let json = serde_json::to_value(AgreementRecord::new("u")).unwrap();
        assert_eq!(json["agreementText"], AGREEMENT_TEXT);
        assert_eq!(json["signature"], "u");
    }
}

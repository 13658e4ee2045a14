//! Wire Models
//!
//! Request and response bodies that only the HTTP layer sees. Domain
//! records live in `portal_core`.

use portal_core::{AgreementRecord, QuotaItem};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct LoginArgs<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub struct EmailArgs<'a> {
    pub email: &'a str,
}

#[derive(Serialize)]
pub struct VerifyOtpArgs<'a> {
    pub email: &'a str,
    pub otp: &'a str,
}

#[derive(Serialize)]
pub struct CreateFormArgs<'a> {
    pub data: &'a QuotaItem,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgreementArgs<'a> {
    pub signature: &'a str,
    pub agreement_text: &'a str,
}

impl<'a> From<&'a AgreementRecord> for AgreementArgs<'a> {
    fn from(record: &'a AgreementRecord) -> Self {
        Self {
            signature: &record.signature,
            agreement_text: &record.agreement_text,
        }
    }
}

/// Image host reply; only the delivery URL matters
#[derive(Debug, Clone, Deserialize)]
pub struct UploadReply {
    pub secure_url: String,
}

/// Message-only reply used by OTP and mutation endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

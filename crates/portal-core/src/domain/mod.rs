//! Domain Layer
//!
//! Records exchanged with the backend, typed form schemas and the error
//! taxonomy. This layer has no I/O.

mod account;
mod agreement;
mod error;
mod progress;
mod quota_item;
mod record;
mod session;
mod upload;
mod validation;

pub use account::{
    ContactDraft, ContactMessage, NewUserDraft, RegisterRequest, RegistrationDraft, UserAccount,
    UserStats,
};
pub use agreement::{AgreementRecord, AgreementStatus, AGREEMENT_TEXT};
pub use error::{ApiError, SubmissionError, TrackerError};
pub use progress::{ProgressSnapshot, ProgressState, Provenance};
pub use quota_item::{QuotaDraft, QuotaField, QuotaItem};
pub use record::{ProgressCounts, SubmissionAck, SubmissionId, SubmissionRecord};
pub use session::Session;
pub use upload::{FileFingerprint, UploadError, UploadPolicy};
pub use validation::{FieldIssue, FieldProblem, ValidationError, Validator};

#[cfg(test)]
pub(crate) use quota_item::sample_draft;

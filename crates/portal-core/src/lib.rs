//! Aspire Portal Core
//!
//! Layered architecture:
//! - domain: records, typed form schemas and their validation
//! - api: async seams to the REST backend and to the clock
//! - tracker: the sequential quota submission tracker
//!
//! Nothing here touches the DOM or the network directly, so the whole crate
//! runs under tokio in tests and under the browser event loop in the app.

pub mod api;
pub mod config;
pub mod domain;
pub mod tracker;

#[cfg(test)]
mod testing;
#[cfg(test)]
mod tests;

pub use api::{ApiResult, QuotaApi, Timer};
pub use config::TrackerConfig;
pub use domain::{
    AgreementRecord, AgreementStatus, ApiError, ContactDraft, ContactMessage, FieldIssue,
    FieldProblem, FileFingerprint, NewUserDraft, ProgressCounts, ProgressSnapshot,
    ProgressState, Provenance, QuotaDraft, QuotaField, QuotaItem, RegisterRequest,
    RegistrationDraft, Session, SubmissionAck, SubmissionError, SubmissionId, SubmissionRecord,
    TrackerError, UploadError, UploadPolicy, UserAccount, UserStats, ValidationError,
    AGREEMENT_TEXT,
};
pub use tracker::{
    CursorPosition, GatePass, PollHandle, PollingRefresher, ProgressStore, QuotaCursor,
    QuotaDataset, QuotaTracker, SubmissionController, SubmissionGate, SubmissionOutcome,
};

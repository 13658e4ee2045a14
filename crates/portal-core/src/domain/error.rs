//! Error Taxonomy
//!
//! `ApiError` classifies what came back from the wire. `TrackerError` is what
//! the tracker hands to the presentation layer.

use std::time::Duration;

use thiserror::Error;

use super::validation::ValidationError;

/// Transport-level failure of one backend call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("sign in required")]
    Unauthorized,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-2xx HTTP status
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => ApiError::Unauthorized,
            404 => ApiError::NotFound(message),
            409 => ApiError::Conflict(message),
            _ => ApiError::Rejected { status, message },
        }
    }

    /// Message suitable for a toast
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { message, .. } if !message.is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}

/// A submission that reached (or tried to reach) the server and failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("server rejected the form ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("no response after {}s", .after.as_secs())]
    TimedOut { after: Duration },
    #[error("network error: {0}")]
    Network(String),
}

/// Everything the tracker can report back to a view
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("network error: {0}")]
    Network(String),
    #[error("another submission is already in progress")]
    ConcurrentSubmission,
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error("all {total} forms have been filled")]
    QuotaComplete { total: u32 },
    #[error("form #{} is out of sequence, next form is #{}", .requested + 1, .expected + 1)]
    OutOfSequence { expected: u32, requested: u32 },
    #[error("submission {0} was not found")]
    NotFound(String),
    #[error("sign in required")]
    SignInRequired,
}

impl TrackerError {
    /// Whether retrying the same action with the same data can succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TrackerError::Network(_)
                | TrackerError::ConcurrentSubmission
                | TrackerError::Submission(_)
        )
    }

    /// Fatal: the view must hand over to the login flow
    pub fn requires_sign_in(&self) -> bool {
        matches!(self, TrackerError::SignInRequired)
    }

    /// Mapping used for reads (refresh, listing)
    pub fn from_read(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized => TrackerError::SignInRequired,
            ApiError::NotFound(what) => TrackerError::NotFound(what),
            other => TrackerError::Network(other.to_string()),
        }
    }

    /// Mapping used for the item POST
    pub fn from_submission(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized => TrackerError::SignInRequired,
            ApiError::Rejected { status, message } => {
                SubmissionError::Rejected { status, message }.into()
            }
            ApiError::NotFound(message) => SubmissionError::Rejected { status: 404, message }.into(),
            ApiError::Conflict(message) => SubmissionError::Rejected { status: 409, message }.into(),
            ApiError::Network(message) | ApiError::Decode(message) => {
                SubmissionError::Network(message).into()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(ApiError::from_status(401, ""), ApiError::Unauthorized);
        assert_eq!(ApiError::from_status(403, "blocked"), ApiError::Unauthorized);
        assert_eq!(ApiError::from_status(409, "dup"), ApiError::Conflict("dup".into()));
        assert!(matches!(
            ApiError::from_status(500, "boom"),
            ApiError::Rejected { status: 500, .. }
        ));
    }

    #[test]
    fn test_submission_mapping_keeps_retry_affordance() {
        let err = TrackerError::from_submission(ApiError::Network("offline".into()));
        assert!(err.is_retryable());
        assert!(!err.requires_sign_in());

        let err = TrackerError::from_submission(ApiError::Unauthorized);
        assert!(err.requires_sign_in());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_out_of_sequence_message_is_one_based() {
        let err = TrackerError::OutOfSequence { expected: 5, requested: 7 };
        assert_eq!(err.to_string(), "form #8 is out of sequence, next form is #6");
    }
}

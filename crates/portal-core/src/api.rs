//! Backend Seams
//!
//! Abstract interfaces the tracker drives. The app implements them over
//! `fetch` and browser timers; tests implement them in memory and on tokio.
//! Futures are `?Send`: everything runs on one thread.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{ApiError, ProgressCounts, QuotaItem, Session, SubmissionAck, SubmissionId};

pub type ApiResult<T> = Result<T, ApiError>;

/// The three quota operations of the REST backend
#[async_trait(?Send)]
pub trait QuotaApi {
    /// Current counts for the signed-in user
    async fn fetch_progress(&self, session: &Session) -> ApiResult<ProgressCounts>;

    /// Create one filled item; it starts out pending
    async fn create_submission(&self, session: &Session, item: &QuotaItem) -> ApiResult<SubmissionAck>;

    /// Move a created item to submitted
    async fn confirm_submission(&self, session: &Session, id: &SubmissionId) -> ApiResult<()>;
}

/// Source of delays
#[async_trait(?Send)]
pub trait Timer {
    async fn sleep(&self, duration: Duration);
}

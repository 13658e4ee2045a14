//! In-memory backend and tokio timer for tests

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;

use crate::api::{ApiResult, QuotaApi, Timer};
use crate::domain::{ApiError, ProgressCounts, QuotaItem, Session, SubmissionAck, SubmissionId};

/// Backend that keeps counts like the real server: a created item is
/// pending until confirmed.
#[derive(Default)]
pub struct FakeApi {
    counts: Cell<ProgressCounts>,
    open: RefCell<HashSet<SubmissionId>>,
    done: RefCell<HashSet<SubmissionId>>,
    posted: RefCell<Vec<QuotaItem>>,
    fetches: Cell<usize>,
    confirms: Cell<usize>,
    read_error: RefCell<Option<ApiError>>,
    post_error: RefCell<Option<ApiError>>,
    confirm_error: RefCell<Option<ApiError>>,
    hang: Cell<bool>,
}

impl FakeApi {
    pub fn new(submitted: u32, pending: u32) -> Self {
        let api = Self::default();
        api.set_counts(ProgressCounts { submitted, pending });
        api
    }

    pub fn set_counts(&self, counts: ProgressCounts) {
        self.counts.set(counts);
    }

    pub fn counts(&self) -> ProgressCounts {
        self.counts.get()
    }

    pub fn fail_reads(&self, err: Option<ApiError>) {
        *self.read_error.borrow_mut() = err;
    }

    pub fn fail_posts(&self, err: Option<ApiError>) {
        *self.post_error.borrow_mut() = err;
    }

    pub fn fail_confirms(&self, err: Option<ApiError>) {
        *self.confirm_error.borrow_mut() = err;
    }

    /// Posts never answer while set
    pub fn hang_posts(&self, hang: bool) {
        self.hang.set(hang);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }

    pub fn post_count(&self) -> usize {
        self.posted.borrow().len()
    }

    pub fn confirm_count(&self) -> usize {
        self.confirms.get()
    }

    pub fn posted(&self) -> Vec<QuotaItem> {
        self.posted.borrow().clone()
    }
}

#[async_trait(?Send)]
impl QuotaApi for FakeApi {
    async fn fetch_progress(&self, _session: &Session) -> ApiResult<ProgressCounts> {
        self.fetches.set(self.fetches.get() + 1);
        tokio::task::yield_now().await;
        if let Some(err) = self.read_error.borrow().clone() {
            return Err(err);
        }
        Ok(self.counts.get())
    }

    async fn create_submission(&self, _session: &Session, item: &QuotaItem) -> ApiResult<SubmissionAck> {
        self.posted.borrow_mut().push(item.clone());
        if self.hang.get() {
            futures::future::pending::<()>().await;
        }
        tokio::task::yield_now().await;
        if let Some(err) = self.post_error.borrow().clone() {
            return Err(err);
        }
        let mut counts = self.counts.get();
        counts.pending += 1;
        self.counts.set(counts);

        let id = SubmissionId(format!("sub-{}", self.post_count()));
        self.open.borrow_mut().insert(id.clone());
        Ok(SubmissionAck { id })
    }

    async fn confirm_submission(&self, _session: &Session, id: &SubmissionId) -> ApiResult<()> {
        self.confirms.set(self.confirms.get() + 1);
        tokio::task::yield_now().await;
        if let Some(err) = self.confirm_error.borrow().clone() {
            return Err(err);
        }
        if self.done.borrow().contains(id) {
            return Err(ApiError::Conflict(format!("{id} already submitted")));
        }
        if !self.open.borrow_mut().remove(id) {
            return Err(ApiError::NotFound(id.to_string()));
        }
        self.done.borrow_mut().insert(id.clone());
        let mut counts = self.counts.get();
        counts.pending = counts.pending.saturating_sub(1);
        counts.submitted += 1;
        self.counts.set(counts);
        Ok(())
    }
}

pub struct TokioTimer;

#[async_trait(?Send)]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

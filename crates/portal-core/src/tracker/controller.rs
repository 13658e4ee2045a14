//! Submission Controller
//!
//! Runs one fill → validate → post → reconcile cycle at a time.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;

use futures::future::{self, Either};
use tracing::{debug, info, warn};

use super::cursor::{CursorPosition, QuotaCursor};
use super::gate::SubmissionGate;
use super::progress_store::ProgressStore;
use crate::api::{QuotaApi, Timer};
use crate::domain::{
    ApiError, ProgressSnapshot, QuotaDraft, QuotaItem, Session, SubmissionAck, SubmissionError,
    SubmissionId, TrackerError,
};

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionOutcome {
    /// Index of the item that was posted
    pub index: u32,
    pub id: SubmissionId,
    /// Snapshot after reconciliation (provisional if the refresh failed)
    pub snapshot: ProgressSnapshot,
    pub next: CursorPosition,
    /// Whether the follow-up refresh succeeded
    pub reconciled: bool,
}

pub struct SubmissionController<A: QuotaApi, T: Timer> {
    api: Rc<A>,
    timer: Rc<T>,
    store: Rc<ProgressStore<A>>,
    cursor: QuotaCursor,
    gate: SubmissionGate,
    session: Session,
    submit_timeout: Duration,
    /// Ids confirmed during this session
    confirmed: RefCell<HashSet<SubmissionId>>,
}

impl<A: QuotaApi, T: Timer> SubmissionController<A, T> {
    pub fn new(
        api: Rc<A>,
        timer: Rc<T>,
        store: Rc<ProgressStore<A>>,
        cursor: QuotaCursor,
        gate: SubmissionGate,
        session: Session,
        submit_timeout: Duration,
    ) -> Self {
        Self {
            api,
            timer,
            store,
            cursor,
            gate,
            session,
            submit_timeout,
            confirmed: RefCell::new(HashSet::new()),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.gate.is_busy()
    }

    /// Where the cursor stands against the current snapshot
    pub fn position(&self) -> CursorPosition {
        self.cursor.next(&self.store.current())
    }

    /// Post the draft for `item_index`
    ///
    /// Fails before the network on a concurrent call, a completed quota, an
    /// index other than the cursor's, a form number that disagrees with the
    /// index, invalid fields or a missing session.
    /// The draft is only borrowed, so on failure the caller still holds the
    /// user's input for a retry.
    pub async fn submit(&self, item_index: u32, draft: &QuotaDraft) -> Result<SubmissionOutcome, TrackerError> {
        let _pass = self.gate.try_acquire().ok_or_else(|| {
            debug!(index = item_index, "submission rejected, another one is in flight");
            TrackerError::ConcurrentSubmission
        })?;

        let expected = match self.position() {
            CursorPosition::Complete => {
                return Err(TrackerError::QuotaComplete { total: self.store.total() })
            }
            CursorPosition::Next(index) => index,
        };
        if item_index != expected {
            return Err(TrackerError::OutOfSequence { expected, requested: item_index });
        }

        let item = draft.validate()?;
        // The form number is the item's identity on the server
        if item.form_number != item_index + 1 {
            debug!(index = item_index, form_number = item.form_number, "form number does not match position");
            return Err(TrackerError::OutOfSequence {
                expected,
                requested: item.form_number.saturating_sub(1),
            });
        }
        self.session.bearer()?;

        info!(index = item_index, form_number = item.form_number, "submitting quota item");
        let ack = self.post_with_timeout(&item).await?;
        info!(index = item_index, id = %ack.id, "quota item created");

        self.store.apply_optimistic();
        let (snapshot, reconciled) = match self.store.refresh().await {
            Ok(snapshot) => (snapshot, true),
            Err(err) => {
                warn!(error = %err, "reconciliation after submit failed, showing provisional progress");
                (self.store.current(), false)
            }
        };

        Ok(SubmissionOutcome {
            index: item_index,
            id: ack.id,
            snapshot,
            next: self.cursor.next(&snapshot),
            reconciled,
        })
    }

    async fn post_with_timeout(&self, item: &QuotaItem) -> Result<SubmissionAck, TrackerError> {
        let post = self.api.create_submission(&self.session, item);
        let deadline = self.timer.sleep(self.submit_timeout);
        match future::select(post, deadline).await {
            Either::Left((result, _)) => result.map_err(|err| {
                warn!(error = %err, "quota item rejected");
                TrackerError::from_submission(err)
            }),
            Either::Right(((), _)) => {
                warn!(timeout_secs = self.submit_timeout.as_secs(), "quota item post timed out");
                Err(SubmissionError::TimedOut { after: self.submit_timeout }.into())
            }
        }
    }

    /// Mark a created item as submitted
    ///
    /// Idempotent: an id already confirmed here, or one the server reports as
    /// already confirmed, is a success.
    pub async fn confirm(&self, id: &SubmissionId) -> Result<ProgressSnapshot, TrackerError> {
        if self.confirmed.borrow().contains(id) {
            debug!(%id, "already confirmed in this session");
            return Ok(self.store.current());
        }
        self.session.bearer()?;

        match self.api.confirm_submission(&self.session, id).await {
            Ok(()) => info!(%id, "submission confirmed"),
            Err(ApiError::Conflict(_)) => debug!(%id, "server reports submission already confirmed"),
            Err(ApiError::Unauthorized) => return Err(TrackerError::SignInRequired),
            Err(ApiError::NotFound(_)) => return Err(TrackerError::NotFound(id.to_string())),
            Err(other) => return Err(TrackerError::Network(other.to_string())),
        }
        self.confirmed.borrow_mut().insert(id.clone());

        match self.store.refresh().await {
            Ok(snapshot) => Ok(snapshot),
            Err(err) => {
                warn!(error = %err, "refresh after confirm failed");
                Ok(self.store.current())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{sample_draft, FieldProblem, ProgressCounts};
    use crate::testing::{FakeApi, TokioTimer};

    fn controller(api: &Rc<FakeApi>, timeout: Duration) -> SubmissionController<FakeApi, TokioTimer> {
        let session = Session::new("u1", "token");
        let store = Rc::new(ProgressStore::new(Rc::clone(api), session.clone(), 700));
        SubmissionController::new(
            Rc::clone(api),
            Rc::new(TokioTimer),
            store,
            QuotaCursor::new(),
            SubmissionGate::new(),
            session,
            timeout,
        )
    }

    async fn loaded(api: &Rc<FakeApi>) -> SubmissionController<FakeApi, TokioTimer> {
        let c = controller(api, Duration::from_secs(20));
        c.store.refresh().await.unwrap();
        c
    }

    #[tokio::test]
    async fn test_empty_field_never_reaches_network() {
        let api = Rc::new(FakeApi::new(0, 0));
        let c = loaded(&api).await;
        let mut draft = sample_draft(0);
        draft.name.clear();

        let err = c.submit(0, &draft).await.unwrap_err();
        match err {
            TrackerError::Validation(v) => {
                assert_eq!(v.issue_for("name").map(|i| i.problem.clone()), Some(FieldProblem::Missing))
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(api.post_count(), 0);
        assert!(!c.is_in_flight());
    }

    #[tokio::test]
    async fn test_out_of_sequence_index_is_rejected() {
        let api = Rc::new(FakeApi::new(3, 2));
        let c = loaded(&api).await;
        let err = c.submit(4, &sample_draft(4)).await.unwrap_err();
        assert_eq!(err, TrackerError::OutOfSequence { expected: 5, requested: 4 });
        assert_eq!(api.post_count(), 0);
    }

    #[tokio::test]
    async fn test_form_number_must_match_position() {
        let api = Rc::new(FakeApi::new(3, 2));
        let c = loaded(&api).await;
        let mut draft = sample_draft(5);
        draft.form_number = "9".to_string();

        let err = c.submit(5, &draft).await.unwrap_err();
        assert_eq!(err, TrackerError::OutOfSequence { expected: 5, requested: 8 });
        assert_eq!(api.post_count(), 0);
        assert!(!c.is_in_flight());
        assert_eq!(c.position(), CursorPosition::Next(5));
    }

    #[tokio::test]
    async fn test_complete_quota_stops_offering_items() {
        let api = Rc::new(FakeApi::new(700, 0));
        let c = loaded(&api).await;
        assert_eq!(c.position(), CursorPosition::Complete);
        let err = c.submit(700, &sample_draft(700)).await.unwrap_err();
        assert_eq!(err, TrackerError::QuotaComplete { total: 700 });
    }

    #[tokio::test]
    async fn test_server_rejection_keeps_cursor() {
        let api = Rc::new(FakeApi::new(3, 2));
        let c = loaded(&api).await;
        api.fail_posts(Some(ApiError::Rejected { status: 500, message: "db down".into() }));

        let draft = sample_draft(5);
        let err = c.submit(5, &draft).await.unwrap_err();
        assert!(matches!(err, TrackerError::Submission(SubmissionError::Rejected { status: 500, .. })));
        assert!(err.is_retryable());
        assert_eq!(c.position(), CursorPosition::Next(5));

        api.fail_posts(None);
        let outcome = c.submit(5, &draft).await.unwrap();
        assert_eq!(outcome.next, CursorPosition::Next(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_releases_the_gate() {
        let api = Rc::new(FakeApi::new(0, 0));
        let c = controller(&api, Duration::from_secs(5));
        c.store.refresh().await.unwrap();
        api.hang_posts(true);

        let err = c.submit(0, &sample_draft(0)).await.unwrap_err();
        assert_eq!(
            err,
            TrackerError::Submission(SubmissionError::TimedOut { after: Duration::from_secs(5) })
        );
        assert!(!c.is_in_flight());
        assert_eq!(c.position(), CursorPosition::Next(0));

        api.hang_posts(false);
        assert!(c.submit(0, &sample_draft(0)).await.is_ok());
    }

    #[tokio::test]
    async fn test_failed_reconciliation_still_succeeds() {
        let api = Rc::new(FakeApi::new(3, 2));
        let c = loaded(&api).await;
        api.fail_reads(Some(ApiError::Network("flaky".into())));

        let outcome = c.submit(5, &sample_draft(5)).await.unwrap();
        assert!(!outcome.reconciled);
        assert_eq!(outcome.snapshot.pending(), 3);
        assert_eq!(outcome.next, CursorPosition::Next(6));
        assert!(c.store.state().is_provisional());
    }

    #[tokio::test]
    async fn test_confirm_is_idempotent() {
        let api = Rc::new(FakeApi::new(0, 0));
        let c = loaded(&api).await;
        let outcome = c.submit(0, &sample_draft(0)).await.unwrap();

        let first = c.confirm(&outcome.id).await.unwrap();
        assert_eq!((first.submitted(), first.pending()), (1, 0));
        let second = c.confirm(&outcome.id).await.unwrap();
        assert_eq!(second, first);
        assert_eq!(api.confirm_count(), 1);
    }

    #[tokio::test]
    async fn test_confirm_treats_conflict_as_success() {
        let api = Rc::new(FakeApi::new(2, 0));
        let c = loaded(&api).await;
        api.fail_confirms(Some(ApiError::Conflict("already submitted".into())));
        assert!(c.confirm(&SubmissionId::from("old")).await.is_ok());

        api.fail_confirms(Some(ApiError::NotFound("gone".into())));
        assert_eq!(
            c.confirm(&SubmissionId::from("gone")).await.unwrap_err(),
            TrackerError::NotFound("gone".into())
        );
    }

    #[tokio::test]
    async fn test_missing_token_defers_to_login() {
        let api = Rc::new(FakeApi::new(0, 0));
        api.set_counts(ProgressCounts::default());
        let store = Rc::new(ProgressStore::new(Rc::clone(&api), Session::new("u1", ""), 700));
        let c = SubmissionController::new(
            Rc::clone(&api),
            Rc::new(TokioTimer),
            store,
            QuotaCursor::new(),
            SubmissionGate::new(),
            Session::new("u1", ""),
            Duration::from_secs(20),
        );
        let err = c.submit(0, &sample_draft(0)).await.unwrap_err();
        assert!(err.requires_sign_in());
        assert_eq!(api.post_count(), 0);
    }
}

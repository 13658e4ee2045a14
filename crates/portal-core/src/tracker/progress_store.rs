//! Progress Store
//!
//! Sole owner of the progress snapshot. Every server fetch replaces the state
//! wholesale; the only local change is the provisional "+1 pending" applied
//! after a successful POST, and the next authoritative refresh overwrites it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, warn};

use crate::api::QuotaApi;
use crate::domain::{ProgressSnapshot, ProgressState, Provenance, Session, TrackerError};

type Listener = Box<dyn Fn(&ProgressState)>;

pub struct ProgressStore<A: QuotaApi> {
    api: Rc<A>,
    session: Session,
    total: u32,
    state: RefCell<ProgressState>,
    /// Bumped by every optimistic update
    epoch: Cell<u64>,
    listeners: RefCell<Vec<Listener>>,
}

impl<A: QuotaApi> ProgressStore<A> {
    pub fn new(api: Rc<A>, session: Session, total: u32) -> Self {
        Self {
            api,
            session,
            total,
            state: RefCell::new(ProgressState::initial(total)),
            epoch: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Last known snapshot
    pub fn current(&self) -> ProgressSnapshot {
        self.state.borrow().snapshot
    }

    pub fn state(&self) -> ProgressState {
        self.state.borrow().clone()
    }

    /// Called after every state change. Listeners must not subscribe further
    /// listeners from inside the callback.
    pub fn subscribe(&self, listener: impl Fn(&ProgressState) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Fetch authoritative counts and replace the snapshot
    ///
    /// On failure the snapshot is left as it was and the error is recorded on
    /// the state. A response that predates the latest optimistic update is
    /// dropped in favour of the current snapshot.
    pub async fn refresh(&self) -> Result<ProgressSnapshot, TrackerError> {
        let started_at = self.epoch.get();
        match self.api.fetch_progress(&self.session).await {
            Ok(counts) => {
                if self.epoch.get() != started_at {
                    debug!("discarding progress response that predates an optimistic update");
                    return Ok(self.current());
                }
                let snapshot = ProgressSnapshot::from_counts(counts, self.total);
                debug!(
                    submitted = snapshot.submitted(),
                    pending = snapshot.pending(),
                    "progress refreshed"
                );
                self.replace(ProgressState {
                    snapshot,
                    provenance: Provenance::Authoritative,
                    loaded: true,
                    last_error: None,
                });
                Ok(snapshot)
            }
            Err(err) => {
                let err = TrackerError::from_read(err);
                warn!(error = %err, "progress refresh failed, keeping previous snapshot");
                let mut next = self.state();
                next.last_error = Some(err.to_string());
                self.replace(next);
                Err(err)
            }
        }
    }

    /// Count one more item as pending until the server says otherwise
    pub fn apply_optimistic(&self) -> Option<ProgressSnapshot> {
        let mut next = self.state();
        let snapshot = next.snapshot.with_one_more_pending()?;
        self.epoch.set(self.epoch.get() + 1);
        next.snapshot = snapshot;
        next.provenance = Provenance::Provisional;
        self.replace(next);
        Some(snapshot)
    }

    fn replace(&self, next: ProgressState) {
        *self.state.borrow_mut() = next.clone();
        for listener in self.listeners.borrow().iter() {
            listener(&next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApiError, ProgressCounts};
    use crate::testing::FakeApi;
    use std::cell::RefCell;

    fn store(api: &Rc<FakeApi>) -> ProgressStore<FakeApi> {
        ProgressStore::new(Rc::clone(api), Session::new("u1", "t"), 700)
    }

    #[test]
    fn test_initial_snapshot_is_zero() {
        let api = Rc::new(FakeApi::new(0, 0));
        let store = store(&api);
        assert_eq!(store.current(), ProgressSnapshot::empty(700));
        assert!(!store.state().loaded);
    }

    #[tokio::test]
    async fn test_refresh_replaces_wholesale() {
        let api = Rc::new(FakeApi::new(3, 2));
        let store = store(&api);
        let snap = store.refresh().await.unwrap();
        assert_eq!((snap.submitted(), snap.pending(), snap.total()), (3, 2, 700));

        api.set_counts(ProgressCounts { submitted: 1, pending: 0 });
        assert_eq!(store.refresh().await.unwrap().filled(), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_snapshot() {
        let api = Rc::new(FakeApi::new(3, 2));
        let store = store(&api);
        store.refresh().await.unwrap();

        api.fail_reads(Some(ApiError::Network("offline".into())));
        let err = store.refresh().await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(store.current().filled(), 5);
        assert!(store.state().is_stale());

        api.fail_reads(None);
        store.refresh().await.unwrap();
        assert!(!store.state().is_stale());
    }

    #[tokio::test]
    async fn test_unauthorized_refresh_requires_sign_in() {
        let api = Rc::new(FakeApi::new(0, 0));
        api.fail_reads(Some(ApiError::Unauthorized));
        let err = store(&api).refresh().await.unwrap_err();
        assert!(err.requires_sign_in());
    }

    #[tokio::test]
    async fn test_optimistic_then_reconcile() {
        let api = Rc::new(FakeApi::new(3, 2));
        let store = store(&api);
        store.refresh().await.unwrap();

        let provisional = store.apply_optimistic().unwrap();
        assert_eq!(provisional.pending(), 3);
        assert!(store.state().is_provisional());

        api.set_counts(ProgressCounts { submitted: 3, pending: 3 });
        store.refresh().await.unwrap();
        assert_eq!(store.state().provenance, Provenance::Authoritative);
    }

    #[tokio::test]
    async fn test_listeners_see_every_change() {
        let api = Rc::new(FakeApi::new(1, 1));
        let store = store(&api);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |state| sink.borrow_mut().push(state.snapshot.filled()));

        store.refresh().await.unwrap();
        store.apply_optimistic();
        assert_eq!(*seen.borrow(), vec![2, 3]);
    }
}

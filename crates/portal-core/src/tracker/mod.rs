//! Sequential Quota Submission Tracker
//!
//! - `ProgressStore`: the authoritative snapshot and its listeners
//! - `QuotaCursor`: which item comes next
//! - `SubmissionController`: one submission at a time, reconciled afterwards
//! - `PollingRefresher`: background refresh while the view is open
//!
//! `QuotaTracker` wires the four together around one shared gate.

mod controller;
mod cursor;
mod gate;
mod poller;
mod progress_store;

use std::future::Future;
use std::rc::Rc;

pub use controller::{SubmissionController, SubmissionOutcome};
pub use cursor::{CursorPosition, QuotaCursor, QuotaDataset};
pub use gate::{GatePass, SubmissionGate};
pub use poller::{PollHandle, PollingRefresher};
pub use progress_store::ProgressStore;

use crate::api::{QuotaApi, Timer};
use crate::config::TrackerConfig;
use crate::domain::{Session, TrackerError};

pub struct QuotaTracker<A: QuotaApi, T: Timer> {
    store: Rc<ProgressStore<A>>,
    controller: Rc<SubmissionController<A, T>>,
    cursor: QuotaCursor,
    gate: SubmissionGate,
    timer: Rc<T>,
    config: TrackerConfig,
}

impl<A: QuotaApi + 'static, T: Timer + 'static> QuotaTracker<A, T> {
    pub fn new(api: Rc<A>, timer: Rc<T>, session: Session, config: TrackerConfig, cursor: QuotaCursor) -> Self {
        let gate = SubmissionGate::new();
        let store = Rc::new(ProgressStore::new(Rc::clone(&api), session.clone(), config.total));
        let controller = Rc::new(SubmissionController::new(
            api,
            Rc::clone(&timer),
            Rc::clone(&store),
            cursor.clone(),
            gate.clone(),
            session,
            config.submit_timeout,
        ));
        Self {
            store,
            controller,
            cursor,
            gate,
            timer,
            config,
        }
    }

    pub fn store(&self) -> Rc<ProgressStore<A>> {
        Rc::clone(&self.store)
    }

    pub fn controller(&self) -> Rc<SubmissionController<A, T>> {
        Rc::clone(&self.controller)
    }

    pub fn cursor(&self) -> &QuotaCursor {
        &self.cursor
    }

    /// Poll loop sharing this tracker's gate, so ticks skip in-flight submits
    pub fn start_polling(
        &self,
        on_error: impl Fn(&TrackerError) + 'static,
    ) -> (PollHandle, impl Future<Output = ()>) {
        PollingRefresher::new(
            Rc::clone(&self.store),
            Rc::clone(&self.timer),
            self.gate.clone(),
            self.config.poll_interval,
        )
        .on_error(on_error)
        .start()
    }
}

//! Polling Refresher
//!
//! Keeps the progress snapshot fresh while the submission view is open.
//! The returned future is driven by whoever owns the event loop; the handle
//! stops it.

use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use futures::future::{AbortHandle, Abortable};
use futures::FutureExt;
use tracing::{debug, info, warn};

use super::gate::SubmissionGate;
use super::progress_store::ProgressStore;
use crate::api::{QuotaApi, Timer};
use crate::domain::TrackerError;

type ErrorCallback = Box<dyn Fn(&TrackerError)>;

pub struct PollingRefresher<A: QuotaApi, T: Timer> {
    store: Rc<ProgressStore<A>>,
    timer: Rc<T>,
    gate: SubmissionGate,
    interval: Duration,
    on_error: Option<ErrorCallback>,
}

impl<A: QuotaApi + 'static, T: Timer + 'static> PollingRefresher<A, T> {
    pub fn new(store: Rc<ProgressStore<A>>, timer: Rc<T>, gate: SubmissionGate, interval: Duration) -> Self {
        Self {
            store,
            timer,
            gate,
            interval,
            on_error: None,
        }
    }

    /// Called with every failed refresh
    pub fn on_error(mut self, callback: impl Fn(&TrackerError) + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    /// Split into a cancel handle and the loop to spawn
    pub fn start(self) -> (PollHandle, impl Future<Output = ()>) {
        let (abort, registration) = AbortHandle::new_pair();
        info!(interval_secs = self.interval.as_secs(), "progress polling started");
        let task = Abortable::new(self.run(), registration).map(|_| ());
        (PollHandle { abort }, task)
    }

    async fn run(self) {
        loop {
            self.timer.sleep(self.interval).await;
            if self.gate.is_busy() {
                debug!("submission in flight, skipping poll tick");
                continue;
            }
            if let Err(err) = self.store.refresh().await {
                if let Some(callback) = &self.on_error {
                    callback(&err);
                }
                if err.requires_sign_in() {
                    warn!("session rejected, progress polling stopped");
                    break;
                }
            }
        }
    }
}

/// Stops the poll loop when cancelled or dropped
#[derive(Debug)]
pub struct PollHandle {
    abort: AbortHandle,
}

impl PollHandle {
    pub fn cancel(&self) {
        if !self.abort.is_aborted() {
            debug!("progress polling cancelled");
            self.abort.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.abort.is_aborted()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

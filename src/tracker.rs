//! Browser wiring for the quota tracker

use std::time::Duration;
use std::rc::Rc;

use async_trait::async_trait;
use portal_core::{QuotaCursor, QuotaTracker, Session, Timer};

use crate::api::{ApiClient, HttpQuotaApi};
use crate::config::AppConfig;

/// `setTimeout`-backed delays
pub struct GlooTimer;

#[async_trait(?Send)]
impl Timer for GlooTimer {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}

pub type PortalTracker = QuotaTracker<HttpQuotaApi, GlooTimer>;

pub fn build_tracker(client: &ApiClient, session: Session, config: &AppConfig) -> Rc<PortalTracker> {
    Rc::new(QuotaTracker::new(
        Rc::new(HttpQuotaApi::new(client.clone())),
        Rc::new(GlooTimer),
        session,
        config.tracker.clone(),
        QuotaCursor::new(),
    ))
}

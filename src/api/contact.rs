//! Contact Form Binding

use portal_core::{ApiResult, ContactDraft};

use super::ApiClient;
use crate::models::Ack;

impl ApiClient {
    /// Public; no session needed
    pub async fn submit_contact(&self, draft: &ContactDraft) -> ApiResult<Ack> {
        self.post_ack("/api/contact/submit", None, draft).await
    }
}

//! Quota Form Bindings
//!
//! `HttpQuotaApi` is the production `QuotaApi` the tracker drives.

use async_trait::async_trait;
use portal_core::{
    ApiResult, ProgressCounts, QuotaApi, QuotaItem, Session, SubmissionAck, SubmissionId,
    SubmissionRecord,
};

use super::{segment, ApiClient};
use crate::models::CreateFormArgs;

#[derive(Debug, Clone)]
pub struct HttpQuotaApi {
    client: ApiClient,
}

impl HttpQuotaApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl QuotaApi for HttpQuotaApi {
    async fn fetch_progress(&self, session: &Session) -> ApiResult<ProgressCounts> {
        let path = format!("/api/user/my-forms/stats/{}", segment(&session.user_id));
        self.client.get(&path, session).await
    }

    async fn create_submission(&self, session: &Session, item: &QuotaItem) -> ApiResult<SubmissionAck> {
        self.client
            .post("/api/user/forms", Some(session), &CreateFormArgs { data: item })
            .await
    }

    async fn confirm_submission(&self, session: &Session, id: &SubmissionId) -> ApiResult<()> {
        let path = format!("/api/user/forms/{}/submit", segment(id.as_str()));
        self.client.patch(&path, session).await
    }
}

impl ApiClient {
    /// Items the signed-in user has created, newest first
    pub async fn my_forms(&self, session: &Session) -> ApiResult<Vec<SubmissionRecord>> {
        let path = format!("/api/user/forms/{}", segment(&session.user_id));
        let mut records: Vec<SubmissionRecord> = self.get(&path, session).await?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}

//! Agreement Bindings

use portal_core::{AgreementRecord, AgreementStatus, ApiResult, Session};

use super::{segment, ApiClient};
use crate::models::{Ack, AgreementArgs};

impl ApiClient {
    pub async fn agreement_status(&self, session: &Session) -> ApiResult<AgreementStatus> {
        let path = format!("/api/agreement/get-agreements/{}", segment(&session.user_id));
        let records: Vec<AgreementRecord> = self.get(&path, session).await?;
        Ok(AgreementStatus::from_records(&records))
    }

    pub async fn sign_agreement(&self, session: &Session, record: &AgreementRecord) -> ApiResult<Ack> {
        self.post_ack(
            "/api/agreement/submit-agreement",
            Some(session),
            &AgreementArgs::from(record),
        )
        .await
    }
}

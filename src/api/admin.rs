//! Admin Bindings

use portal_core::{
    ApiResult, ContactMessage, NewUserDraft, ProgressCounts, RegisterRequest, Session,
    SubmissionId, SubmissionRecord, UserAccount,
};
use tracing::info;

use super::{segment, ApiClient};
use crate::models::Ack;

impl ApiClient {
    // ========================
    // Users
    // ========================

    pub async fn list_users(&self, session: &Session) -> ApiResult<Vec<UserAccount>> {
        self.get("/api/admin/users", session).await
    }

    pub async fn set_user_blocked(&self, session: &Session, user_id: &str, blocked: bool) -> ApiResult<()> {
        let action = if blocked { "block" } else { "unblock" };
        let path = format!("/api/admin/users/{}/{}", segment(user_id), action);
        self.patch(&path, session).await?;
        info!(user_id, blocked, "user access changed");
        Ok(())
    }

    pub async fn delete_user(&self, session: &Session, user_id: &str) -> ApiResult<()> {
        let path = format!("/api/admin/users/{}/delete", segment(user_id));
        self.delete(&path, session).await
    }

    /// `draft` must already be validated
    pub async fn create_user(&self, session: &Session, draft: &NewUserDraft) -> ApiResult<Ack> {
        self.post_ack("/api/auth/register", Some(session), draft).await
    }

    // ========================
    // A user's forms
    // ========================

    pub async fn user_forms(&self, session: &Session, user_id: &str) -> ApiResult<Vec<SubmissionRecord>> {
        let path = format!("/api/admin/forms/{}", segment(user_id));
        self.get(&path, session).await
    }

    pub async fn user_form_stats(&self, session: &Session, user_id: &str) -> ApiResult<ProgressCounts> {
        let path = format!("/api/admin/forms/stats/{}", segment(user_id));
        self.get(&path, session).await
    }

    pub async fn delete_form(&self, session: &Session, id: &SubmissionId) -> ApiResult<()> {
        let path = format!("/api/admin/forms/{}/delete", segment(id.as_str()));
        self.delete(&path, session).await
    }

    /// Mark a user's item submitted on their behalf
    pub async fn force_confirm(&self, session: &Session, id: &SubmissionId) -> ApiResult<()> {
        let path = format!("/api/admin/forms/{}/submit", segment(id.as_str()));
        self.patch(&path, session).await
    }

    // ========================
    // Registration requests
    // ========================

    pub async fn register_requests(&self, session: &Session) -> ApiResult<Vec<RegisterRequest>> {
        self.get("/api/admin/user-register-requests", session).await
    }

    pub async fn delete_register_request(&self, session: &Session, id: &str) -> ApiResult<()> {
        let path = format!("/api/admin/user-register-requests/{}/delete", segment(id));
        self.delete(&path, session).await
    }

    // ========================
    // Contact messages
    // ========================

    pub async fn contact_messages(&self, session: &Session) -> ApiResult<Vec<ContactMessage>> {
        self.get("/api/admin/contact-messages", session).await
    }

    pub async fn delete_contact_message(&self, session: &Session, id: &str) -> ApiResult<()> {
        let path = format!("/api/admin/contact-messages/{}/delete", segment(id));
        self.delete(&path, session).await
    }
}

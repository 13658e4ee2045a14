//! Auth Bindings

use portal_core::{ApiResult, RegistrationDraft, Session};
use tracing::{info, warn};

use super::ApiClient;
use crate::models::{Ack, EmailArgs, LoginArgs, VerifyOtpArgs};

impl ApiClient {
    /// Exchange credentials for a session
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<Session> {
        let session: Session = self
            .post("/api/auth/login", None, &LoginArgs { email: email.trim(), password })
            .await?;
        info!(user_id = %session.user_id, is_admin = session.is_admin, "signed in");
        Ok(session)
    }

    /// Best effort; the caller clears local state regardless
    pub async fn logout(&self, session: &Session) {
        if let Err(e) = self
            .post_ack("/api/auth/logout", Some(session), &serde_json::json!({}))
            .await
        {
            warn!(error = %e, "server logout failed");
        }
    }

    pub async fn send_otp(&self, email: &str) -> ApiResult<Ack> {
        self.post_ack("/api/v1/auth/send-otp", None, &EmailArgs { email: email.trim() })
            .await
    }

    pub async fn verify_otp(&self, email: &str, otp: &str) -> ApiResult<Ack> {
        self.post_ack(
            "/api/v1/auth/verify-otp",
            None,
            &VerifyOtpArgs { email: email.trim(), otp: otp.trim() },
        )
        .await
    }

    /// Submit a self-service registration for admin review
    pub async fn request_registration(&self, draft: &RegistrationDraft) -> ApiResult<Ack> {
        self.post_ack("/api/user/register-request", None, draft).await
    }
}

//! Pages
//!
//! One component per screen; `App` picks the one matching the current page.

mod admin_dashboard;
mod agreement;
mod contact;
mod contact_messages;
mod dashboard;
mod login;
mod register;
mod register_requests;
mod submit_forms;
mod user_forms;

use leptos::prelude::*;
use portal_core::ValidationError;

pub use admin_dashboard::AdminDashboardPage;
pub use agreement::AgreementPage;
pub use contact::ContactPage;
pub use contact_messages::ContactMessagesPage;
pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use register::RegisterPage;
pub use register_requests::RegisterRequestsPage;
pub use submit_forms::SubmitFormsPage;
pub use user_forms::UserFormsPage;

/// Problem text for one field of the last validation
pub(crate) fn issue_text(issues: RwSignal<Option<ValidationError>>, field: &'static str) -> Signal<Option<String>> {
    Signal::derive(move || {
        issues.with(|v| {
            v.as_ref()
                .and_then(|v| v.issue_for(field))
                .map(|issue| issue.problem.to_string())
        })
    })
}

/// `12 Mar 2025`, or a dash for records without a timestamp
pub(crate) fn short_date(at: Option<chrono::DateTime<chrono::Utc>>) -> String {
    at.map(|at| at.format("%d %b %Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

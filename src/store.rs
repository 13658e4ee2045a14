//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Lists are loaded
//! by the page that shows them and patched in place after mutations, so a
//! delete or block does not refetch the whole list.

use leptos::prelude::*;
use portal_core::{ContactMessage, RegisterRequest, SubmissionId, SubmissionRecord, UserAccount};
use reactive_stores::Store;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Accounts on the admin dashboard
    pub users: Vec<UserAccount>,
    /// Quota items on the current dashboard (own or, for admins, a user's)
    pub forms: Vec<SubmissionRecord>,
    /// Pending self-registrations
    pub requests: Vec<RegisterRequest>,
    /// Contact form inbox
    pub messages: Vec<ContactMessage>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_set_user_blocked(store: &AppStore, user_id: &str, blocked: bool) {
    if let Some(user) = store.users().write().iter_mut().find(|u| u.id == user_id) {
        user.is_blocked = blocked;
    }
}

pub fn store_remove_user(store: &AppStore, user_id: &str) {
    store.users().write().retain(|u| u.id != user_id);
}

pub fn store_mark_form_submitted(store: &AppStore, id: &SubmissionId) {
    if let Some(form) = store.forms().write().iter_mut().find(|f| &f.id == id) {
        form.submitted = true;
    }
}

pub fn store_remove_form(store: &AppStore, id: &SubmissionId) {
    store.forms().write().retain(|f| &f.id != id);
}

pub fn store_remove_request(store: &AppStore, id: &str) {
    store.requests().write().retain(|r| r.id != id);
}

pub fn store_remove_message(store: &AppStore, id: &str) {
    store.messages().write().retain(|m| m.id != id);
}

//! Application Context
//!
//! Shared state provided via Leptos Context API: the signed-in session, the
//! current page and the toast queue.

use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;
use portal_core::{ApiError, Session, TrackerError};
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::storage;

const TOAST_TTL: Duration = Duration::from_secs(4);

/// Every screen of the portal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Login,
    Register,
    Contact,
    Dashboard,
    SubmitForms,
    Agreement,
    Admin,
    UserForms { user_id: String, name: String },
    RegisterRequests,
    ContactMessages,
}

impl Page {
    pub fn requires_session(&self) -> bool {
        !matches!(self, Page::Login | Page::Register | Page::Contact)
    }

    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Page::Admin | Page::UserForms { .. } | Page::RegisterRequests | Page::ContactMessages
        )
    }

    /// Landing page after sign-in
    pub fn home_for(session: &Session) -> Page {
        if session.is_admin {
            Page::Admin
        } else {
            Page::Dashboard
        }
    }

    /// Where a request for `self` actually lands
    pub fn resolve(self, session: Option<&Session>) -> Page {
        match session {
            None if self.requires_session() => Page::Login,
            Some(s) if self.requires_admin() && !s.is_admin => Page::Dashboard,
            Some(s) if self == Page::Login => Page::home_for(s),
            _ => self,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub text: String,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Signed-in session - read
    pub session: ReadSignal<Option<Session>>,
    /// Signed-in session - write
    set_session: WriteSignal<Option<Session>>,
    /// Current page - read
    pub page: ReadSignal<Page>,
    /// Current page - write
    set_page: WriteSignal<Page>,
    /// Visible toasts - read
    pub toasts: ReadSignal<Vec<Toast>>,
    /// Visible toasts - write
    set_toasts: WriteSignal<Vec<Toast>>,
    next_toast: StoredValue<u32>,
    config: StoredValue<AppConfig>,
}

impl AppContext {
    /// Restores any stored session and picks the landing page
    pub fn new(config: AppConfig) -> Self {
        let restored = storage::load_session();
        let landing = Page::Login.resolve(restored.as_ref());
        let (session, set_session) = signal(restored);
        let (page, set_page) = signal(landing);
        let (toasts, set_toasts) = signal(Vec::<Toast>::new());
        Self {
            session,
            set_session,
            page,
            set_page,
            toasts,
            set_toasts,
            next_toast: StoredValue::new(0),
            config: StoredValue::new(config),
        }
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.config.with_value(|c| c.api_base.clone()))
    }

    pub fn navigate(&self, page: Page) {
        let target = page.resolve(self.session.get_untracked().as_ref());
        self.set_page.set(target);
    }

    /// Current session; sends the user to the login page when there is none
    pub fn require_session(&self) -> Option<Session> {
        let session = self.session.get_untracked();
        if session.is_none() {
            self.set_page.set(Page::Login);
        }
        session
    }

    pub fn sign_in(&self, session: Session) {
        storage::save_session(&session);
        let home = Page::home_for(&session);
        self.set_session.set(Some(session));
        self.set_page.set(home);
        self.success("Logged in successfully");
    }

    /// Local state is always cleared; the server call is best effort
    pub fn sign_out(&self) {
        let previous = self.session.get_untracked();
        storage::clear_session();
        self.set_session.set(None);
        self.set_page.set(Page::Login);
        if let Some(session) = previous {
            let client = self.client();
            spawn_local(async move {
                client.logout(&session).await;
            });
        }
        self.success("Logged out successfully");
    }

    /// The server rejected our credentials
    pub fn expire_session(&self) {
        info!("session rejected by server, signing out");
        storage::clear_session();
        self.set_session.set(None);
        self.set_page.set(Page::Login);
        self.error("Your session has expired, please log in again");
    }

    pub fn success(&self, text: impl Into<String>) {
        self.notify(ToastKind::Success, text.into());
    }

    pub fn error(&self, text: impl Into<String>) {
        self.notify(ToastKind::Error, text.into());
    }

    fn notify(&self, kind: ToastKind, text: String) {
        let id = self.next_toast.get_value();
        self.next_toast.set_value(id.wrapping_add(1));
        self.set_toasts.update(|toasts| toasts.push(Toast { id, kind, text }));

        let set_toasts = self.set_toasts;
        spawn_local(async move {
            gloo_timers::future::sleep(TOAST_TTL).await;
            set_toasts.update(|toasts| toasts.retain(|t| t.id != id));
        });
    }

    pub fn dismiss(&self, id: u32) {
        self.set_toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }

    /// Surface a failed backend call
    pub fn report(&self, err: &ApiError) {
        if matches!(err, ApiError::Unauthorized) {
            self.expire_session();
        } else {
            warn!(error = %err, "request failed");
            self.error(err.user_message());
        }
    }

    pub fn report_tracker(&self, err: &TrackerError) {
        if err.requires_sign_in() {
            self.expire_session();
        } else {
            self.error(err.to_string());
        }
    }
}

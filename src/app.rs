//! Aspire Portal Frontend App
//!
//! Provides the shared context and store, and switches between pages.

use leptos::prelude::*;
use reactive_stores::Store;
use tracing::debug;

use crate::components::{NavBar, ToastHost};
use crate::config::AppConfig;
use crate::context::{AppContext, Page};
use crate::pages::{
    AdminDashboardPage, AgreementPage, ContactMessagesPage, ContactPage, DashboardPage, LoginPage,
    RegisterPage, RegisterRequestsPage, SubmitFormsPage, UserFormsPage,
};
use crate::store::AppState;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let ctx = AppContext::new(config);
    provide_context(ctx);
    provide_context(Store::new(AppState::default()));

    // Losing the session from anywhere lands on the login page
    Effect::new(move |_| {
        if ctx.session.get().is_none() && ctx.page.get_untracked().requires_session() {
            ctx.navigate(Page::Login);
        }
    });

    let page = move || {
        let current = ctx.page.get();
        debug!(?current, "rendering page");
        match current {
            Page::Login => view! { <LoginPage /> }.into_any(),
            Page::Register => view! { <RegisterPage /> }.into_any(),
            Page::Contact => view! { <ContactPage /> }.into_any(),
            Page::Dashboard => view! { <DashboardPage /> }.into_any(),
            Page::SubmitForms => view! { <SubmitFormsPage /> }.into_any(),
            Page::Agreement => view! { <AgreementPage /> }.into_any(),
            Page::Admin => view! { <AdminDashboardPage /> }.into_any(),
            Page::UserForms { user_id, name } => view! { <UserFormsPage user_id=user_id name=name /> }.into_any(),
            Page::RegisterRequests => view! { <RegisterRequestsPage /> }.into_any(),
            Page::ContactMessages => view! { <ContactMessagesPage /> }.into_any(),
        }
    };

    view! {
        <div class="app-layout">
            <NavBar />
            <main class="main-content">{page}</main>
            <ToastHost />
        </div>
    }
}

//! Login Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::warn;

use crate::components::TextField;
use crate::context::{AppContext, Page};

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let (email, password) = (email.get_untracked(), password.get_untracked());
        if email.trim().is_empty() || password.is_empty() {
            ctx.error("Email and password are required");
            return;
        }

        busy.set(true);
        let client = ctx.client();
        spawn_local(async move {
            match client.login(&email, &password).await {
                Ok(session) => ctx.sign_in(session),
                Err(e) => {
                    warn!(error = %e, "login failed");
                    ctx.error("Invalid credentials. Please try again.");
                }
            }
            busy.set(false);
        });
    };

    view! {
        <section class="auth-card">
            <h1>"Login"</h1>
            <form on:submit=on_submit>
                <TextField label="Email" value=email input_type="email" />
                <TextField label="Password" value=password input_type="password" />
                <button type="submit" class="btn primary" disabled=move || busy.get()>
                    {move || if busy.get() { "Logging in…" } else { "Login" }}
                </button>
            </form>
            <p class="auth-switch">
                "New here? "
                <button class="link" on:click=move |_| ctx.navigate(Page::Register)>"Request an account"</button>
            </p>
        </section>
    }
}

//! Registration Page
//!
//! Three steps: verify the email with an OTP, fill in details, upload the
//! three documents. The result is a request an admin reviews; no account
//! exists until then.

use leptos::prelude::*;
use leptos::task::spawn_local;
use portal_core::{RegistrationDraft, ValidationError};

use super::issue_text;
use crate::components::{FilePicker, TextField};
use crate::context::{AppContext, Page};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Email,
    Otp,
    Details,
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let step = RwSignal::new(Step::Email);
    let busy = RwSignal::new(false);

    let email = RwSignal::new(String::new());
    let otp = RwSignal::new(String::new());
    let name = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let aadhaar_url = RwSignal::new(None::<String>);
    let signature_url = RwSignal::new(None::<String>);
    let photo_url = RwSignal::new(None::<String>);
    let issues = RwSignal::new(None::<ValidationError>);

    let send_otp = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let address = email.get_untracked();
        if address.trim().is_empty() {
            ctx.error("Enter your email first");
            return;
        }
        busy.set(true);
        let client = ctx.client();
        spawn_local(async move {
            match client.send_otp(&address).await {
                Ok(ack) => {
                    ctx.success(ack.message.unwrap_or_else(|| "OTP sent to your email".into()));
                    step.set(Step::Otp);
                }
                Err(e) => ctx.error(e.user_message()),
            }
            busy.set(false);
        });
    };

    let verify_otp = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let (address, code) = (email.get_untracked(), otp.get_untracked());
        busy.set(true);
        let client = ctx.client();
        spawn_local(async move {
            match client.verify_otp(&address, &code).await {
                Ok(ack) => {
                    ctx.success(ack.message.unwrap_or_else(|| "Email verified".into()));
                    step.set(Step::Details);
                }
                Err(e) => ctx.error(e.user_message()),
            }
            busy.set(false);
        });
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = RegistrationDraft {
            name: name.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            phone: phone.get_untracked().trim().to_string(),
            password: password.get_untracked(),
            aadhaar_url: aadhaar_url.get_untracked().unwrap_or_default(),
            signature_url: signature_url.get_untracked().unwrap_or_default(),
            photo_url: photo_url.get_untracked().unwrap_or_default(),
        };
        if let Err(v) = draft.validate() {
            ctx.error(v.to_string());
            issues.set(Some(v));
            return;
        }
        issues.set(None);
        busy.set(true);
        let client = ctx.client();
        spawn_local(async move {
            match client.request_registration(&draft).await {
                Ok(_) => {
                    ctx.success("Registration submitted. You can log in once an admin approves it.");
                    ctx.navigate(Page::Login);
                }
                Err(e) => ctx.error(e.user_message()),
            }
            busy.set(false);
        });
    };

    view! {
        <section class="auth-card">
            <h1>"Request an Account"</h1>
            <ol class="steps">
                <li class=move || if step.get() == Step::Email { "active" } else { "" }>"Email"</li>
                <li class=move || if step.get() == Step::Otp { "active" } else { "" }>"Verify"</li>
                <li class=move || if step.get() == Step::Details { "active" } else { "" }>"Details"</li>
            </ol>

            <Show when=move || step.get() == Step::Email>
                <form on:submit=send_otp>
                    <TextField label="Email" value=email input_type="email" />
                    <button type="submit" class="btn primary" disabled=move || busy.get()>"Send OTP"</button>
                </form>
            </Show>

            <Show when=move || step.get() == Step::Otp>
                <form on:submit=verify_otp>
                    <p>"We sent a code to " {move || email.get()}</p>
                    <TextField label="OTP" value=otp placeholder="6-digit code" />
                    <button type="submit" class="btn primary" disabled=move || busy.get()>"Verify"</button>
                    <button type="button" class="btn" on:click=move |_| step.set(Step::Email)>"Change email"</button>
                </form>
            </Show>

            <Show when=move || step.get() == Step::Details>
                <form on:submit=submit>
                    <TextField label="Full Name" value=name error=issue_text(issues, "name") />
                    <TextField label="Phone" value=phone input_type="tel" error=issue_text(issues, "phone") />
                    <TextField
                        label="Password"
                        value=password
                        input_type="password"
                        error=issue_text(issues, "password")
                    />
                    <FilePicker label="Aadhaar Card" url=aadhaar_url error=issue_text(issues, "aadhaarUrl") />
                    <FilePicker label="Signature" url=signature_url error=issue_text(issues, "signatureUrl") />
                    <FilePicker label="Photo" url=photo_url error=issue_text(issues, "photoUrl") />
                    <button type="submit" class="btn primary" disabled=move || busy.get()>"Submit"</button>
                </form>
            </Show>
        </section>
    }
}

//! Public Contact Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use portal_core::{ContactDraft, ValidationError};

use super::issue_text;
use crate::components::TextField;
use crate::context::AppContext;

#[component]
pub fn ContactPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let message = RwSignal::new(String::new());
    let issues = RwSignal::new(None::<ValidationError>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = ContactDraft {
            name: name.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            phone: phone.get_untracked().trim().to_string(),
            message: message.get_untracked().trim().to_string(),
        };
        if let Err(v) = draft.validate() {
            issues.set(Some(v));
            return;
        }
        issues.set(None);
        busy.set(true);
        let client = ctx.client();
        spawn_local(async move {
            match client.submit_contact(&draft).await {
                Ok(ack) => {
                    ctx.success(ack.message.unwrap_or_else(|| "Message sent. We'll get back to you soon.".into()));
                    for field in [name, email, phone, message] {
                        field.set(String::new());
                    }
                }
                Err(e) => ctx.error(e.user_message()),
            }
            busy.set(false);
        });
    };

    view! {
        <section class="contact">
            <h1>"Contact Us"</h1>
            <p>"Questions about the programme? Leave a message and we will call you back."</p>
            <form on:submit=on_submit>
                <TextField label="Name" value=name error=issue_text(issues, "name") />
                <TextField label="Email" value=email input_type="email" error=issue_text(issues, "email") />
                <TextField label="Phone" value=phone input_type="tel" error=issue_text(issues, "phone") />
                <TextField label="Message" value=message multiline=true error=issue_text(issues, "message") />
                <button type="submit" class="btn primary" disabled=move || busy.get()>"Send"</button>
            </form>
        </section>
    }
}

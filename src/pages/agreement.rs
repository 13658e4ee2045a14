//! Agreement Page
//!
//! Renders the terms and, until the user has signed, takes a signature image.
//! A signed agreement is shown read-only with its signature.

use leptos::prelude::*;
use leptos::task::spawn_local;
use portal_core::{AgreementRecord, AgreementStatus, AGREEMENT_TEXT};

use super::short_date;
use crate::components::FilePicker;
use crate::context::{AppContext, Page};
use crate::markdown::parse_markdown;

const TERMS: &str = include_str!("../../assets/agreement_terms.md");

#[component]
pub fn AgreementPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let status = RwSignal::new(None::<AgreementStatus>);
    let signature = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    if let Some(session) = ctx.require_session() {
        let client = ctx.client();
        spawn_local(async move {
            match client.agreement_status(&session).await {
                Ok(current) => status.set(Some(current)),
                Err(e) => {
                    ctx.report(&e);
                    status.set(Some(AgreementStatus::Unsigned));
                }
            }
        });
    }

    let on_sign = move |_| {
        let Some(url) = signature.get_untracked() else {
            ctx.error("Please upload your signature first");
            return;
        };
        let Some(session) = ctx.require_session() else {
            return;
        };
        busy.set(true);
        let client = ctx.client();
        spawn_local(async move {
            let record = AgreementRecord::new(url.clone());
            match client.sign_agreement(&session, &record).await {
                Ok(ack) => {
                    ctx.success(ack.message.unwrap_or_else(|| "Agreement submitted".into()));
                    status.set(Some(AgreementStatus::Signed {
                        signature: url,
                        signed_at: Some(chrono::Utc::now()),
                    }));
                }
                Err(e) => ctx.report(&e),
            }
            busy.set(false);
        });
    };

    let signed_view = move || {
        status.get().and_then(|s| match s {
            AgreementStatus::Signed { signature: image, signed_at } => Some(view! {
                <div class="agreement-signed">
                    <p>"Already signed on " {short_date(signed_at)}</p>
                    <img class="signature" src=image alt="Submitted signature" />
                </div>
            }),
            AgreementStatus::Unsigned => None,
        })
    };

    view! {
        <section class="agreement">
            <h1>"User Agreement"</h1>
            <article class="terms" inner_html={parse_markdown(TERMS)} />
            <p class="agreement-statement">{AGREEMENT_TEXT}</p>
            <Show
                when=move || status.get().is_some()
                fallback=|| view! { <p class="loading">"Checking agreement…"</p> }
            >
                {signed_view}
                <Show when=move || matches!(status.get(), Some(AgreementStatus::Unsigned))>
                    <FilePicker label="Signature" url=signature />
                    <button
                        class="btn primary"
                        disabled=move || busy.get() || signature.get().is_none()
                        on:click=on_sign
                    >
                        {move || if busy.get() { "Submitting…" } else { "Submit Agreement" }}
                    </button>
                </Show>
            </Show>
            <button class="btn" on:click=move |_| ctx.navigate(Page::Dashboard)>"Go to Dashboard"</button>
        </section>
    }
}

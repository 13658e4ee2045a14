//! Quota Submission Page
//!
//! Shows progress, the next quota item and submits it through the tracker.
//! The tracker lives as long as this page; polling stops when it unmounts,
//! while a submission already sent finishes in the background.

use leptos::prelude::*;
use leptos::task::spawn_local;
use portal_core::{CursorPosition, ProgressState, QuotaDraft, TrackerError, ValidationError};
use tracing::{debug, info};

use crate::components::{ProgressPanel, QuotaForm};
use crate::context::AppContext;
use crate::tracker::build_tracker;

#[component]
pub fn SubmitFormsPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let Some(session) = ctx.require_session() else {
        return ().into_any();
    };
    let config = ctx.config();

    let tracker = build_tracker(&ctx.client(), session, &config);
    let (progress, set_progress) = signal(ProgressState::initial(config.tracker.total));
    tracker.store().subscribe(move |state| set_progress.set(state.clone()));

    let cursor = StoredValue::new_local(tracker.cursor().clone());
    let position = Memo::new(move |_| cursor.with_value(|c| c.next(&progress.get().snapshot)));
    let draft = RwSignal::new(QuotaDraft::default());
    let issues = RwSignal::new(None::<ValidationError>);
    let busy = RwSignal::new(false);

    // A new position means a new item; failed submits keep the user's input
    Effect::new(move |prev: Option<CursorPosition>| {
        let next = position.get();
        if prev != Some(next) {
            if let Some(template) = cursor.with_value(|c| c.template(next)) {
                draft.set(template);
                issues.set(None);
            }
        }
        next
    });

    let store = tracker.store();
    spawn_local(async move {
        if let Err(e) = store.refresh().await {
            ctx.report_tracker(&e);
        }
    });

    let (poll, poll_task) = tracker.start_polling(move |err| {
        if err.requires_sign_in() {
            ctx.expire_session();
        } else {
            debug!(error = %err, "background refresh failed");
        }
    });
    spawn_local(poll_task);
    on_cleanup(move || poll.cancel());

    let tracker = StoredValue::new_local(tracker);

    let on_submit = Callback::new(move |()| {
        let Some(index) = position.get_untracked().index() else {
            return;
        };
        let tracker = tracker.get_value();
        let item = draft.get_untracked();
        busy.set(true);
        spawn_local(async move {
            let result = tracker.controller().submit(index, &item).await;
            busy.set(false);
            match result {
                Ok(outcome) => {
                    info!(index, reconciled = outcome.reconciled, "quota item submitted");
                    ctx.success(format!("Form #{} saved", index + 1));
                }
                Err(TrackerError::Validation(v)) => {
                    ctx.error("Please fix the highlighted fields");
                    issues.set(Some(v));
                }
                Err(e) => ctx.report_tracker(&e),
            }
        });
    });

    let total = config.tracker.total;
    let heading = Signal::derive(move || match position.get() {
        CursorPosition::Next(index) => format!("Form {} of {}", index + 1, total),
        CursorPosition::Complete => String::new(),
    });

    view! {
        <section class="submit-forms">
            <h1>"Submit Forms"</h1>
            <ProgressPanel state=progress />
            <Show
                when=move || progress.get().loaded
                fallback=|| view! { <p class="loading">"Loading progress…"</p> }
            >
                <Show
                    when=move || !position.get().is_complete()
                    fallback=move || view! {
                        <div class="complete-banner">
                            <h2>"All forms filled"</h2>
                            <p>{format!("You have filled all {total} forms. Thank you!")}</p>
                        </div>
                    }
                >
                    <QuotaForm draft=draft issues=issues busy=busy heading=heading on_submit=on_submit />
                </Show>
            </Show>
        </section>
    }
    .into_any()
}

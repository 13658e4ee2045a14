//! User Dashboard
//!
//! Progress counters plus the list of created items. Pending items can be
//! marked submitted from here.

use leptos::prelude::*;
use leptos::task::spawn_local;
use portal_core::{ProgressState, SubmissionRecord};
use tracing::info;

use crate::components::ProgressPanel;
use crate::context::{AppContext, Page};
use crate::store::{store_mark_form_submitted, use_app_store, AppStateStoreFields};
use crate::tracker::build_tracker;

#[component]
fn FormRow(record: SubmissionRecord, on_confirm: Callback<SubmissionRecord>) -> impl IntoView {
    let pending = !record.submitted;
    let status_class = if pending { "badge pending" } else { "badge submitted" };
    let row = record.clone();
    view! {
        <tr>
            <td>{record.data.form_number.clone()}</td>
            <td>{record.data.name.clone()}</td>
            <td>{record.data.account_number.clone()}</td>
            <td>{record.created_on()}</td>
            <td><span class=status_class>{record.status_label()}</span></td>
            <td>
                {pending.then(|| view! {
                    <button class="btn small primary" on:click=move |_| on_confirm.run(row.clone())>
                        "Mark submitted"
                    </button>
                })}
            </td>
        </tr>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let store = use_app_store();
    let Some(session) = ctx.require_session() else {
        return ().into_any();
    };
    let config = ctx.config();

    let tracker = build_tracker(&ctx.client(), session.clone(), &config);
    let (progress, set_progress) = signal(ProgressState::initial(config.tracker.total));
    tracker.store().subscribe(move |state| set_progress.set(state.clone()));
    let loading = RwSignal::new(true);

    let progress_store = tracker.store();
    let client = ctx.client();
    spawn_local(async move {
        if let Err(e) = progress_store.refresh().await {
            ctx.report_tracker(&e);
        }
        match client.my_forms(&session).await {
            Ok(forms) => *store.forms().write() = forms,
            Err(e) => ctx.report(&e),
        }
        loading.set(false);
    });

    let tracker = StoredValue::new_local(tracker);
    let on_confirm = Callback::new(move |record: SubmissionRecord| {
        let controller = tracker.with_value(|t| t.controller());
        spawn_local(async move {
            match controller.confirm(&record.id).await {
                Ok(snapshot) => {
                    info!(id = %record.id, submitted = snapshot.submitted(), "form marked submitted");
                    store_mark_form_submitted(&store, &record.id);
                    ctx.success(format!("Form {} marked submitted", record.data.form_number));
                }
                Err(e) => ctx.report_tracker(&e),
            }
        });
    });

    view! {
        <section class="dashboard">
            <header class="page-header">
                <h1>"Dashboard"</h1>
                <button class="btn primary" on:click=move |_| ctx.navigate(Page::SubmitForms)>
                    "Continue filling forms"
                </button>
            </header>
            <ProgressPanel state=progress />
            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="loading">"Loading forms…"</p> }
            >
                <Show
                    when=move || !store.forms().read().is_empty()
                    fallback=|| view! { <p class="empty">"No forms yet."</p> }
                >
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"Form #"</th>
                                <th>"Name"</th>
                                <th>"Account"</th>
                                <th>"Created"</th>
                                <th>"Status"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || store.forms().get()
                                key=|f| (f.id.clone(), f.submitted)
                                children=move |record| view! { <FormRow record=record on_confirm=on_confirm /> }
                            />
                        </tbody>
                    </table>
                </Show>
            </Show>
        </section>
    }
    .into_any()
}

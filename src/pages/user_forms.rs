//! One User's Forms (admin)

use leptos::prelude::*;
use leptos::task::spawn_local;
use portal_core::{ProgressSnapshot, ProgressState, SubmissionRecord};
use tracing::info;

use crate::components::{DeleteConfirmButton, ProgressPanel};
use crate::context::{AppContext, Page};
use crate::store::{store_mark_form_submitted, store_remove_form, use_app_store, AppStateStoreFields};

#[component]
pub fn UserFormsPage(user_id: String, name: String) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let store = use_app_store();
    let total = ctx.config().tracker.total;
    let progress = RwSignal::new(ProgressState::initial(total));
    let loading = RwSignal::new(true);
    let user_id = StoredValue::new(user_id);

    let load_stats = move || {
        let Some(session) = ctx.require_session() else {
            return;
        };
        let client = ctx.client();
        let id = user_id.get_value();
        spawn_local(async move {
            match client.user_form_stats(&session, &id).await {
                Ok(counts) => progress.set(ProgressState {
                    snapshot: ProgressSnapshot::from_counts(counts, total),
                    loaded: true,
                    ..ProgressState::initial(total)
                }),
                Err(e) => {
                    progress.update(|p| p.last_error = Some(e.user_message()));
                    ctx.report(&e);
                }
            }
        });
    };

    if let Some(session) = ctx.require_session() {
        let client = ctx.client();
        let id = user_id.get_value();
        spawn_local(async move {
            match client.user_forms(&session, &id).await {
                Ok(mut forms) => {
                    forms.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                    *store.forms().write() = forms;
                }
                Err(e) => ctx.report(&e),
            }
            loading.set(false);
        });
        load_stats();
    }

    let on_delete = Callback::new(move |record: SubmissionRecord| {
        let Some(session) = ctx.require_session() else {
            return;
        };
        let client = ctx.client();
        spawn_local(async move {
            match client.delete_form(&session, &record.id).await {
                Ok(()) => {
                    info!(id = %record.id, "form deleted");
                    store_remove_form(&store, &record.id);
                    ctx.success("Form deleted");
                    load_stats();
                }
                Err(e) => ctx.report(&e),
            }
        });
    });

    let on_force_confirm = Callback::new(move |record: SubmissionRecord| {
        let Some(session) = ctx.require_session() else {
            return;
        };
        let client = ctx.client();
        spawn_local(async move {
            match client.force_confirm(&session, &record.id).await {
                Ok(()) => {
                    store_mark_form_submitted(&store, &record.id);
                    ctx.success(format!("Form {} marked submitted", record.data.form_number));
                    load_stats();
                }
                Err(e) => ctx.report(&e),
            }
        });
    });

    view! {
        <section class="user-forms">
            <header class="page-header">
                <button class="btn small" on:click=move |_| ctx.navigate(Page::Admin)>"Back"</button>
                <h1>{format!("Forms of {name}")}</h1>
            </header>
            <ProgressPanel state=progress />
            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="loading">"Loading forms…"</p> }
            >
                <Show
                    when=move || !store.forms().read().is_empty()
                    fallback=|| view! { <p class="empty">"This user has not filled any forms."</p> }
                >
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"Form #"</th>
                                <th>"Name"</th>
                                <th>"Account"</th>
                                <th>"IFSC"</th>
                                <th>"Amount"</th>
                                <th>"Created"</th>
                                <th>"Status"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || store.forms().get()
                                key=|f| (f.id.clone(), f.submitted)
                                children=move |record| {
                                    let pending = !record.submitted;
                                    let confirm_row = record.clone();
                                    let delete_row = record.clone();
                                    view! {
                                        <tr>
                                            <td>{record.data.form_number.clone()}</td>
                                            <td>{record.data.name.clone()}</td>
                                            <td>{record.data.account_number.clone()}</td>
                                            <td>{record.data.ifsc_code.clone()}</td>
                                            <td>{record.data.amount.clone()}</td>
                                            <td>{record.created_on()}</td>
                                            <td>{record.status_label()}</td>
                                            <td class="actions">
                                                {pending.then(|| view! {
                                                    <button
                                                        class="btn small primary"
                                                        on:click=move |_| on_force_confirm.run(confirm_row.clone())
                                                    >
                                                        "Mark submitted"
                                                    </button>
                                                })}
                                                <DeleteConfirmButton
                                                    prompt="Delete this form"
                                                    subject={format!("#{}", record.data.form_number)}
                                                    on_confirm=move |()| on_delete.run(delete_row.clone())
                                                />
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </Show>
            </Show>
        </section>
    }
}

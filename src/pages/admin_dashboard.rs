//! Admin Dashboard
//!
//! Lists every account with block, delete and a link to the user's forms,
//! and lets the admin create accounts directly.

use leptos::prelude::*;
use leptos::task::spawn_local;
use portal_core::{NewUserDraft, UserAccount, UserStats, ValidationError};
use tracing::info;

use super::{issue_text, short_date};
use crate::components::{DeleteConfirmButton, TextField};
use crate::context::{AppContext, Page};
use crate::store::{store_remove_user, store_set_user_blocked, use_app_store, AppStateStoreFields};

#[component]
fn UserRow(user: UserAccount) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let store = use_app_store();
    let busy = RwSignal::new(false);
    let blocked = user.is_blocked;
    let user_id = StoredValue::new(user.id.clone());
    let name = user.name.clone();

    let toggle_block = move |_| {
        let Some(session) = ctx.require_session() else {
            return;
        };
        let id = user_id.get_value();
        busy.set(true);
        let client = ctx.client();
        spawn_local(async move {
            match client.set_user_blocked(&session, &id, !blocked).await {
                Ok(()) => {
                    store_set_user_blocked(&store, &id, !blocked);
                    ctx.success(if blocked { "User unblocked" } else { "User blocked" });
                }
                Err(e) => ctx.report(&e),
            }
            busy.set(false);
        });
    };

    let on_delete = Callback::new(move |()| {
        let Some(session) = ctx.require_session() else {
            return;
        };
        let id = user_id.get_value();
        busy.set(true);
        let client = ctx.client();
        spawn_local(async move {
            match client.delete_user(&session, &id).await {
                Ok(()) => {
                    info!(user_id = %id, "user deleted");
                    store_remove_user(&store, &id);
                    ctx.success("User deleted");
                }
                Err(e) => ctx.report(&e),
            }
            busy.set(false);
        });
    });

    let view_forms = {
        let name = name.clone();
        move |_| {
            ctx.navigate(Page::UserForms {
                user_id: user_id.get_value(),
                name: name.clone(),
            })
        }
    };

    view! {
        <tr class={if blocked { "blocked" } else { "" }}>
            <td>{name.clone()}</td>
            <td>{user.email.clone()}</td>
            <td>{user.phone.clone()}</td>
            <td>{short_date(user.created_at)}</td>
            <td>
                <span class={if blocked { "badge stale" } else { "badge submitted" }}>
                    {if blocked { "Blocked" } else { "Active" }}
                </span>
            </td>
            <td class="actions">
                <button class="btn small" on:click=view_forms>"View forms"</button>
                <button class="btn small" disabled=move || busy.get() on:click=toggle_block>
                    {if blocked { "Unblock" } else { "Block" }}
                </button>
                <DeleteConfirmButton prompt="Delete this user" subject=name.clone() on_confirm=on_delete disabled=busy />
            </td>
        </tr>
    }
}

#[component]
fn CreateUserForm(on_created: Callback<()>) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let aadhaar = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let issues = RwSignal::new(None::<ValidationError>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = NewUserDraft {
            name: name.get_untracked(),
            email: email.get_untracked(),
            phone: phone.get_untracked(),
            aadhaar: aadhaar.get_untracked(),
            password: password.get_untracked(),
        };
        let draft = match draft.validate() {
            Ok(draft) => draft,
            Err(v) => {
                ctx.error(v.to_string());
                issues.set(Some(v));
                return;
            }
        };
        issues.set(None);
        let Some(session) = ctx.require_session() else {
            return;
        };
        busy.set(true);
        let client = ctx.client();
        spawn_local(async move {
            match client.create_user(&session, &draft).await {
                Ok(ack) => {
                    ctx.success(ack.message.unwrap_or_else(|| "User created".into()));
                    for field in [name, email, phone, aadhaar, password] {
                        field.set(String::new());
                    }
                    on_created.run(());
                }
                Err(e) => ctx.report(&e),
            }
            busy.set(false);
        });
    };

    view! {
        <form class="card create-user" on:submit=on_submit>
            <h2>"Create User"</h2>
            <TextField label="Name" value=name error=issue_text(issues, "name") />
            <TextField label="Email" value=email input_type="email" error=issue_text(issues, "email") />
            <TextField label="Phone" value=phone input_type="tel" error=issue_text(issues, "phone") />
            <TextField label="Aadhaar" value=aadhaar error=issue_text(issues, "aadhaar") />
            <TextField
                label="Password"
                value=password
                input_type="password"
                error=issue_text(issues, "password")
            />
            <button type="submit" class="btn primary" disabled=move || busy.get()>"Create"</button>
        </form>
    }
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let store = use_app_store();
    let loading = RwSignal::new(true);
    let show_create = RwSignal::new(false);

    let load = move || {
        let Some(session) = ctx.require_session() else {
            return;
        };
        let client = ctx.client();
        spawn_local(async move {
            match client.list_users(&session).await {
                Ok(users) => *store.users().write() = users,
                Err(e) => ctx.report(&e),
            }
            loading.set(false);
        });
    };
    load();

    let stats = Memo::new(move |_| store.users().with(|users| UserStats::from_users(users)));
    let on_created = Callback::new(move |()| {
        show_create.set(false);
        load();
    });

    view! {
        <section class="admin-dashboard">
            <header class="page-header">
                <h1>"Users"</h1>
                <button class="btn primary" on:click=move |_| show_create.update(|v| *v = !*v)>
                    {move || if show_create.get() { "Close" } else { "New user" }}
                </button>
            </header>
            <div class="stat-row">
                <div class="stat-card">
                    <span class="stat-label">"Total"</span>
                    <span class="stat-value">{move || stats.get().total}</span>
                </div>
                <div class="stat-card submitted">
                    <span class="stat-label">"Active"</span>
                    <span class="stat-value">{move || stats.get().active()}</span>
                </div>
                <div class="stat-card pending">
                    <span class="stat-label">"Blocked"</span>
                    <span class="stat-value">{move || stats.get().blocked}</span>
                </div>
            </div>
            <Show when=move || show_create.get()>
                <CreateUserForm on_created=on_created />
            </Show>
            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="loading">"Loading users…"</p> }
            >
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Email"</th>
                            <th>"Phone"</th>
                            <th>"Joined"</th>
                            <th>"Status"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || store.users().get()
                            key=|u| (u.id.clone(), u.is_blocked)
                            children=|user| view! { <UserRow user=user /> }
                        />
                    </tbody>
                </table>
            </Show>
        </section>
    }
}

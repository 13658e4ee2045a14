//! Contact Inbox (admin)

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::short_date;
use crate::components::DeleteConfirmButton;
use crate::context::AppContext;
use crate::store::{store_remove_message, use_app_store, AppStateStoreFields};

#[component]
pub fn ContactMessagesPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let store = use_app_store();
    let loading = RwSignal::new(true);

    if let Some(session) = ctx.require_session() {
        let client = ctx.client();
        spawn_local(async move {
            match client.contact_messages(&session).await {
                Ok(mut messages) => {
                    messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                    *store.messages().write() = messages;
                }
                Err(e) => ctx.report(&e),
            }
            loading.set(false);
        });
    }

    let delete = move |id: String| {
        let Some(session) = ctx.require_session() else {
            return;
        };
        let client = ctx.client();
        spawn_local(async move {
            match client.delete_contact_message(&session, &id).await {
                Ok(()) => {
                    store_remove_message(&store, &id);
                    ctx.success("Message deleted");
                }
                Err(e) => ctx.report(&e),
            }
        });
    };

    view! {
        <section class="contact-messages">
            <h1>"Contact Messages"</h1>
            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="loading">"Loading messages…"</p> }
            >
                <Show
                    when=move || !store.messages().read().is_empty()
                    fallback=|| view! { <p class="empty">"Inbox is empty."</p> }
                >
                    <ul class="message-list">
                        <For
                            each=move || store.messages().get()
                            key=|m| m.id.clone()
                            children=move |message| {
                                let id = message.id.clone();
                                view! {
                                    <li class="card message">
                                        <header>
                                            <strong>{message.name.clone()}</strong>
                                            <a href={format!("mailto:{}", message.email)}>{message.email.clone()}</a>
                                            <span class="muted">{message.phone.clone()}</span>
                                            <span class="muted">{short_date(message.created_at)}</span>
                                        </header>
                                        <p class="message-body">{message.message.clone()}</p>
                                        <DeleteConfirmButton prompt="Delete this message" on_confirm=move |()| delete(id.clone()) />
                                    </li>
                                }
                            }
                        />
                    </ul>
                </Show>
            </Show>
        </section>
    }
}

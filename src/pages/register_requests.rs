//! Registration Requests (admin)

use leptos::prelude::*;
use leptos::task::spawn_local;
use portal_core::RegisterRequest;

use super::short_date;
use crate::components::DeleteConfirmButton;
use crate::context::AppContext;
use crate::store::{store_remove_request, use_app_store, AppStateStoreFields};

fn document_link(label: &'static str, url: Option<String>) -> impl IntoView {
    match url.filter(|u| !u.is_empty()) {
        Some(href) => view! { <a href=href target="_blank" rel="noopener noreferrer">{label}</a> }.into_any(),
        None => view! { <span class="muted">{label}" missing"</span> }.into_any(),
    }
}

#[component]
fn RequestCard(request: RegisterRequest) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let store = use_app_store();
    let id = StoredValue::new(request.id.clone());

    let on_delete = Callback::new(move |()| {
        let Some(session) = ctx.require_session() else {
            return;
        };
        let client = ctx.client();
        let id = id.get_value();
        spawn_local(async move {
            match client.delete_register_request(&session, &id).await {
                Ok(()) => {
                    store_remove_request(&store, &id);
                    ctx.success("Request deleted");
                }
                Err(e) => ctx.report(&e),
            }
        });
    });

    view! {
        <article class="card request">
            <header>
                <h3>{request.name.clone()}</h3>
                <span class="muted">{short_date(request.created_at)}</span>
            </header>
            <p>{request.email.clone()}" · "{request.phone.clone()}</p>
            <div class="documents">
                {document_link("Aadhaar", request.aadhaar_url.clone())}
                {document_link("Signature", request.signature_url.clone())}
                {document_link("Photo", request.photo_url.clone())}
            </div>
            <footer>
                <DeleteConfirmButton prompt="Discard this request" subject=request.name.clone() on_confirm=on_delete />
            </footer>
        </article>
    }
}

#[component]
pub fn RegisterRequestsPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let store = use_app_store();
    let loading = RwSignal::new(true);

    if let Some(session) = ctx.require_session() {
        let client = ctx.client();
        spawn_local(async move {
            match client.register_requests(&session).await {
                Ok(requests) => *store.requests().write() = requests,
                Err(e) => ctx.report(&e),
            }
            loading.set(false);
        });
    }

    view! {
        <section class="register-requests">
            <h1>"Registration Requests"</h1>
            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="loading">"Loading requests…"</p> }
            >
                <Show
                    when=move || !store.requests().read().is_empty()
                    fallback=|| view! { <p class="empty">"No pending requests."</p> }
                >
                    <div class="card-grid">
                        <For
                            each=move || store.requests().get()
                            key=|r| r.id.clone()
                            children=|request| view! { <RequestCard request=request /> }
                        />
                    </div>
                </Show>
            </Show>
        </section>
    }
}

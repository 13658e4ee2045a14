//! Toast Host Component

use leptos::prelude::*;

use crate::context::{AppContext, ToastKind};

#[component]
pub fn ToastHost() -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    view! {
        <div class="toast-host">
            <For
                each=move || ctx.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let class = match toast.kind {
                        ToastKind::Success => "toast success",
                        ToastKind::Error => "toast error",
                    };
                    let id = toast.id;
                    view! {
                        <div class=class role="status" on:click=move |_| ctx.dismiss(id)>
                            {toast.text}
                        </div>
                    }
                }
            />
        </div>
    }
}

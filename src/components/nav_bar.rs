//! Navigation Bar Component
//!
//! Brand plus the links the current user may follow, and sign in/out.

use leptos::prelude::*;

use crate::context::{AppContext, Page};

#[component]
fn NavLink(target: Page, label: &'static str) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let current = target.clone();
    let class = move || {
        if ctx.page.get() == current {
            "nav-link active"
        } else {
            "nav-link"
        }
    };
    view! {
        <button class=class on:click=move |_| ctx.navigate(target.clone())>
            {label}
        </button>
    }
}

#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let is_admin = move || ctx.session.get().map(|s| s.is_admin).unwrap_or(false);
    let signed_in = move || ctx.session.get().is_some();

    view! {
        <nav class="navbar">
            <span class="navbar-brand">"Aspire Career Consultancy"</span>
            <div class="navbar-links">
                <Show
                    when=signed_in
                    fallback=|| view! {
                        <NavLink target=Page::Login label="Login" />
                        <NavLink target=Page::Register label="Register" />
                        <NavLink target=Page::Contact label="Contact" />
                    }
                >
                    <Show
                        when=is_admin
                        fallback=|| view! {
                            <NavLink target=Page::Dashboard label="Dashboard" />
                            <NavLink target=Page::SubmitForms label="Submit Forms" />
                            <NavLink target=Page::Agreement label="Agreement" />
                        }
                    >
                        <NavLink target=Page::Admin label="Users" />
                        <NavLink target=Page::RegisterRequests label="Requests" />
                        <NavLink target=Page::ContactMessages label="Messages" />
                    </Show>
                    <button class="btn small" on:click=move |_| ctx.sign_out()>"Logout"</button>
                </Show>
            </div>
        </nav>
    }
}

//! Progress Panel Component
//!
//! Counters for the quota: submitted, filled and not yet submitted, each
//! with its share of the total.

use leptos::prelude::*;
use portal_core::ProgressState;

#[component]
fn Counter(label: &'static str, value: Signal<u32>, percent: Signal<f64>, class: &'static str) -> impl IntoView {
    view! {
        <div class=format!("stat-card {class}")>
            <span class="stat-label">{label}</span>
            <span class="stat-value">{move || value.get()}</span>
            <span class="stat-percent">{move || format!("{:.1}%", percent.get())}</span>
        </div>
    }
}

#[component]
pub fn ProgressPanel(#[prop(into)] state: Signal<ProgressState>) -> impl IntoView {
    let snapshot = move || state.get().snapshot;
    let submitted = Signal::derive(move || snapshot().submitted());
    let filled = Signal::derive(move || snapshot().filled());
    let pending = Signal::derive(move || snapshot().pending());

    view! {
        <section class="progress-panel">
            <div class="stat-row">
                <Counter
                    label="Submitted"
                    value=submitted
                    percent=Signal::derive(move || snapshot().submitted_percent())
                    class="submitted"
                />
                <Counter
                    label="Filled"
                    value=filled
                    percent=Signal::derive(move || snapshot().filled_percent())
                    class="filled"
                />
                <Counter
                    label="Not Submitted"
                    value=pending
                    percent=Signal::derive(move || snapshot().pending_percent())
                    class="pending"
                />
            </div>
            <div class="progress-bar" title=move || format!("{} of {}", filled.get(), snapshot().total())>
                <div class="progress-fill" style=move || format!("width: {:.1}%", snapshot().filled_percent()) />
            </div>
            <Show when=move || state.get().is_provisional()>
                <span class="badge syncing">"Syncing…"</span>
            </Show>
            <Show when=move || state.get().is_stale()>
                <span class="badge stale">
                    "Showing last known progress: "
                    {move || state.get().last_error.unwrap_or_default()}
                </span>
            </Show>
        </section>
    }
}

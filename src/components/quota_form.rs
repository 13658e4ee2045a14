//! Quota Form Component
//!
//! One input per quota field, driven by `QuotaField::ALL`. Field errors come
//! from the last local validation and clear as soon as the field is edited.

use leptos::prelude::*;
use portal_core::{QuotaDraft, QuotaField, ValidationError};

#[component]
pub fn QuotaForm(
    draft: RwSignal<QuotaDraft>,
    issues: RwSignal<Option<ValidationError>>,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] heading: Signal<String>,
    #[prop(into)] on_submit: Callback<()>,
) -> impl IntoView {
    let fields = QuotaField::ALL
        .iter()
        .copied()
        .map(|field| {
            let value = move || draft.with(|d| d.get(field).to_string());
            let on_input = move |ev: web_sys::Event| {
                let text = event_target_value(&ev);
                draft.update(|d| d.set(field, text));
                issues.update(|current| {
                    if let Some(v) = current {
                        v.issues.retain(|i| i.field != field.key());
                    }
                });
            };
            let error = move || {
                issues.with(|v| {
                    v.as_ref()
                        .and_then(|v| v.issue_for(field.key()))
                        .map(|issue| issue.problem.to_string())
                })
            };
            let input = if field.is_multiline() {
                view! {
                    <textarea rows="2" name=field.key() prop:value=value disabled=move || busy.get() on:input=on_input />
                }
                .into_any()
            } else {
                view! {
                    <input
                        type=field.input_type()
                        name=field.key()
                        readonly={field == QuotaField::FormNumber}
                        prop:value=value
                        disabled=move || busy.get()
                        on:input=on_input
                    />
                }
                .into_any()
            };
            view! {
                <label class=move || if error().is_some() { "form-field invalid" } else { "form-field" }>
                    <span class="form-label">{field.label()}</span>
                    {input}
                    {move || error().map(|text| view! { <span class="field-error">{text}</span> })}
                </label>
            }
        })
        .collect_view();

    view! {
        <form
            class="quota-form"
            on:submit=move |ev: web_sys::SubmitEvent| {
                ev.prevent_default();
                if !busy.get_untracked() {
                    on_submit.run(());
                }
            }
        >
            <h2>{move || heading.get()}</h2>
            <div class="form-grid">{fields}</div>
            <button type="submit" class="btn primary" disabled=move || busy.get()>
                {move || if busy.get() { "Submitting…" } else { "Submit Form" }}
            </button>
        </form>
    }
}

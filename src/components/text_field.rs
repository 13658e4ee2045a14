//! Labelled text input bound to a signal, with an inline error

use leptos::prelude::*;

#[component]
pub fn TextField(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional, into)] placeholder: Option<String>,
    #[prop(optional)] multiline: bool,
    #[prop(optional, into)] error: MaybeProp<String>,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    let placeholder = placeholder.unwrap_or_default();
    let input = if multiline {
        view! {
            <textarea
                rows="3"
                placeholder=placeholder
                prop:value=move || value.get()
                disabled=move || disabled.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        }
        .into_any()
    } else {
        view! {
            <input
                type=input_type
                placeholder=placeholder
                prop:value=move || value.get()
                disabled=move || disabled.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        }
        .into_any()
    };

    view! {
        <label class=move || if error.get().is_some() { "form-field invalid" } else { "form-field" }>
            <span class="form-label">{label}</span>
            {input}
            {move || error.get().map(|text| view! { <span class="field-error">{text}</span> })}
        </label>
    }
}

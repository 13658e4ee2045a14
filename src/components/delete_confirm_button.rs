//! Delete Confirm Button Component
//!
//! Admin deletes are irreversible, so each one asks in place first. Every
//! list supplies its own question and, where it helps, the record's name.

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Idle,
    Asking,
}

/// `"Delete this user?"` or `"Delete this user (Asha Verma)?"`
fn confirm_prompt(prompt: &str, subject: Option<&str>) -> String {
    let prompt = prompt.trim_end_matches('?');
    match subject.map(str::trim).filter(|s| !s.is_empty()) {
        Some(subject) => format!("{prompt} ({subject})?"),
        None => format!("{prompt}?"),
    }
}

#[component]
pub fn DeleteConfirmButton(
    /// Question shown once the button is clicked
    #[prop(into)]
    prompt: String,
    /// Name of the record, appended to the question
    #[prop(optional, into)]
    subject: Option<String>,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into, optional)] disabled: Signal<bool>,
) -> impl IntoView {
    let stage = RwSignal::new(Stage::Idle);
    let question = confirm_prompt(&prompt, subject.as_deref());

    move || match stage.get() {
        Stage::Idle => view! {
            <button
                class="btn danger small"
                disabled=move || disabled.get()
                on:click=move |_| stage.set(Stage::Asking)
            >
                "Delete"
            </button>
        }
        .into_any(),
        Stage::Asking => view! {
            <span class="confirm-inline" role="alertdialog">
                <span>{question.clone()}</span>
                <button
                    class="btn danger small"
                    on:click=move |_| {
                        stage.set(Stage::Idle);
                        on_confirm.run(());
                    }
                >
                    "Delete"
                </button>
                <button class="btn small" on:click=move |_| stage.set(Stage::Idle)>"Cancel"</button>
            </span>
        }
        .into_any(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_the_record() {
        assert_eq!(confirm_prompt("Delete this user?", Some("Asha Verma")), "Delete this user (Asha Verma)?");
        assert_eq!(confirm_prompt("Delete this message", None), "Delete this message?");
        assert_eq!(confirm_prompt("Delete this form?", Some("  ")), "Delete this form?");
    }
}

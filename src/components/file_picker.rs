//! File Picker Component
//!
//! Picks one image, checks it against the upload policy and uploads it to
//! the image host straight away. The resulting URL lands in `url`.

use leptos::prelude::*;
use leptos::task::spawn_local;
use portal_core::{FileFingerprint, UploadPolicy};
use web_sys::HtmlInputElement;

use crate::api::{fingerprint, upload_image};
use crate::context::AppContext;

#[component]
pub fn FilePicker(
    label: &'static str,
    url: RwSignal<Option<String>>,
    #[prop(optional, into)] error: MaybeProp<String>,
) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let selected = RwSignal::new(None::<FileFingerprint>);
    let uploading = RwSignal::new(false);

    let on_change = move |ev: web_sys::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        let picked = fingerprint(&file);
        let current = selected.get_untracked();
        if let Err(e) = UploadPolicy::default().check_selection(label, &picked, current.as_ref()) {
            ctx.error(e.to_string());
            input.set_value("");
            return;
        }

        selected.set(Some(picked));
        url.set(None);
        uploading.set(true);
        let config = ctx.config();
        spawn_local(async move {
            match upload_image(&config, label, &file).await {
                Ok(uploaded) => {
                    url.set(Some(uploaded));
                    ctx.success(format!("{label} uploaded"));
                }
                Err(e) => {
                    selected.set(None);
                    ctx.error(e.to_string());
                }
            }
            uploading.set(false);
        });
    };

    let status = move || {
        if uploading.get() {
            "Uploading…".to_string()
        } else if url.get().is_some() {
            selected
                .get()
                .map(|f| format!("{} ({} KB)", f.name, f.size.div_ceil(1024)))
                .unwrap_or_else(|| "Uploaded".to_string())
        } else {
            "Max 150 KB".to_string()
        }
    };

    view! {
        <label class=move || if error.get().is_some() { "form-field invalid" } else { "form-field" }>
            <span class="form-label">{label}</span>
            <input type="file" accept="image/*" disabled=move || uploading.get() on:change=on_change />
            <span class="file-status">{status}</span>
            {move || url.get().map(|src| view! { <img class="file-preview" src=src alt=label /> })}
            {move || error.get().map(|text| view! { <span class="field-error">{text}</span> })}
        </label>
    }
}

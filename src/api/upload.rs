//! Image Host Upload
//!
//! Documents go straight from the browser to the image host with an
//! unsigned preset; the backend only ever sees the returned URL.

use portal_core::{FileFingerprint, UploadError, UploadPolicy};
use tracing::info;
use web_sys::{File, FormData};

use super::{send, Payload};
use crate::config::AppConfig;
use crate::models::UploadReply;

pub fn fingerprint(file: &File) -> FileFingerprint {
    FileFingerprint {
        name: file.name(),
        size: file.size() as u64,
        mime: file.type_(),
    }
}

/// Upload one image and return its delivery URL
pub async fn upload_image(config: &AppConfig, label: &str, file: &File) -> Result<String, UploadError> {
    UploadPolicy::default().check(label, &fingerprint(file))?;

    let endpoint = config
        .upload_endpoint()
        .ok_or_else(|| UploadError::Failed("image host is not configured".into()))?;
    let preset = config
        .cloudinary_preset
        .as_deref()
        .ok_or_else(|| UploadError::Failed("upload preset is not configured".into()))?;

    let form = FormData::new().map_err(|_| UploadError::Failed("cannot build form".into()))?;
    form.append_with_blob("file", file)
        .and_then(|_| form.append_with_str("upload_preset", preset))
        .map_err(|_| UploadError::Failed("cannot attach file".into()))?;

    let value = send("POST", &endpoint, None, Some(Payload::Form(form)))
        .await
        .map_err(|e| UploadError::Failed(e.user_message()))?;
    let reply: UploadReply =
        serde_json::from_value(value).map_err(|e| UploadError::Failed(e.to_string()))?;

    info!(label, size = file.size() as u64, "document uploaded");
    Ok(reply.secure_url)
}

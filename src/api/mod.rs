//! HTTP Bindings
//!
//! Frontend bindings to the REST backend, organized by area. Every call goes
//! through `ApiClient::send`, which attaches the bearer token and classifies
//! non-2xx statuses into `ApiError`.

mod admin;
mod agreement;
mod auth;
mod contact;
mod forms;
mod upload;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use portal_core::{ApiError, ApiResult, Session};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, RequestMode, Response};

pub use admin::*;
pub use agreement::*;
pub use auth::*;
pub use contact::*;
pub use forms::*;
pub use upload::*;

use crate::models::Ack;

/// Request body variants
pub(crate) enum Payload {
    Json(String),
    Form(FormData),
}

/// Backend client; cheap to clone into tasks
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base: String,
}

impl ApiClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str, session: &Session) -> ApiResult<T> {
        let value = send("GET", &self.url(path), Some(session), None).await?;
        data(value)
    }

    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        session: Option<&Session>,
        body: &B,
    ) -> ApiResult<T> {
        let value = send("POST", &self.url(path), session, Some(json(body)?)).await?;
        data(value)
    }

    /// POST whose reply carries only a message
    pub(crate) async fn post_ack<B: Serialize>(
        &self,
        path: &str,
        session: Option<&Session>,
        body: &B,
    ) -> ApiResult<Ack> {
        let value = send("POST", &self.url(path), session, Some(json(body)?)).await?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    pub(crate) async fn patch(&self, path: &str, session: &Session) -> ApiResult<()> {
        send("PATCH", &self.url(path), Some(session), None).await.map(|_| ())
    }

    pub(crate) async fn delete(&self, path: &str, session: &Session) -> ApiResult<()> {
        send("DELETE", &self.url(path), Some(session), None).await.map(|_| ())
    }
}

/// Escape an id before it goes into a URL path
pub(crate) fn segment(id: &str) -> String {
    utf8_percent_encode(id, NON_ALPHANUMERIC).to_string()
}

fn json<B: Serialize>(body: &B) -> ApiResult<Payload> {
    serde_json::to_string(body)
        .map(Payload::Json)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Unwrap `data` from the response envelope
fn data<T: DeserializeOwned>(mut value: Value) -> ApiResult<T> {
    let inner = match value.get_mut("data") {
        Some(inner) => inner.take(),
        None => value,
    };
    serde_json::from_value(inner).map_err(|e| ApiError::Decode(e.to_string()))
}

fn js_error(err: JsValue) -> ApiError {
    ApiError::Network(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

pub(crate) async fn send(
    method: &str,
    url: &str,
    session: Option<&Session>,
    payload: Option<Payload>,
) -> ApiResult<Value> {
    let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".into()))?;

    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    let is_json = matches!(payload, Some(Payload::Json(_)));
    match &payload {
        Some(Payload::Json(body)) => opts.set_body(&JsValue::from_str(body)),
        Some(Payload::Form(form)) => opts.set_body(form),
        None => {}
    }

    let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
    if is_json {
        request.headers().set("Content-Type", "application/json").map_err(js_error)?;
    }
    if let Some(session) = session {
        let bearer = session.bearer().map_err(|_| ApiError::Unauthorized)?;
        request.headers().set("Authorization", &bearer).map_err(js_error)?;
    }

    debug!(method, url, "request");
    let response = JsFuture::from(window.fetch_with_request(&request)).await.map_err(js_error)?;
    let response: Response = response.dyn_into().map_err(js_error)?;
    let status = response.status();

    let text = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?
        .as_string()
        .unwrap_or_default();
    let value = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap_or(Value::String(text))
    };

    if !response.ok() {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        warn!(method, url, status, %message, "request failed");
        return Err(ApiError::from_status(status, message));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::ProgressCounts;
    use serde_json::json;

    #[test]
    fn test_data_unwraps_envelope() {
        let counts: ProgressCounts =
            data(json!({ "success": true, "data": { "submitted": 3, "pending": 2 } })).unwrap();
        assert_eq!(counts, ProgressCounts { submitted: 3, pending: 2 });
    }

    #[test]
    fn test_data_accepts_bare_body() {
        let counts: ProgressCounts = data(json!({ "submitted": 1 })).unwrap();
        assert_eq!(counts.pending, 0);
    }

    #[test]
    fn test_decode_failure_is_classified() {
        let err = data::<ProgressCounts>(json!({ "data": "nope" })).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_segment_escapes_path_characters() {
        assert_eq!(segment("64f0c2a1"), "64f0c2a1");
        assert_eq!(segment("a/b"), "a%2Fb");
    }
}

//! Local HTTP call implementation.
//!
//! A call with a body and no `Content-Type` header is sent as
//! `text/plain;charset=UTF-8`, the type a browser gives a string body.

use std::time::Duration;

use reqwest::{Client, Method, header::CONTENT_TYPE};

use super::target::build_target_url;
use crate::{
    error::Result,
    handlers::response::build_envelope,
    protocol::{CallSpec, ReplyEnvelope, js_string},
};

/// Content type applied to a body sent without one
pub const DEFAULT_BODY_TYPE: &str = "text/plain;charset=UTF-8";

/// Perform the call described by `spec` and capture the response verbatim.
///
/// The body is the JSON serialization of `spec.data` whatever the method. An `Err` means
/// no HTTP response was received at all.
pub async fn perform_http_request(
    client: &Client,
    method: Method,
    spec: &CallSpec,
    timeout: Option<Duration>,
    verbose: bool,
) -> Result<ReplyEnvelope> {
    let url = build_target_url(spec);
    diag!(verbose, "Command to local target: {method} ({url})");

    let mut request = client.request(method, &url);

    for (name, value) in &spec.headers {
        request = request.header(name.as_str(), js_string(value));
    }

    if let Some(data) = &spec.data {
        let has_type = spec.headers.keys().any(|name| name.eq_ignore_ascii_case(CONTENT_TYPE.as_str()));
        if !has_type {
            request = request.header(CONTENT_TYPE, DEFAULT_BODY_TYPE);
        }
        request = request.body(serde_json::to_string(data)?);
    }

    if let Some(timeout) = timeout {
        request = request.timeout(timeout);
    }

    let response = request.send().await?;

    let status = response.status();
    let reason = status.canonical_reason().unwrap_or_default();
    let text = response.text().await?;
    diag!(verbose, "Status from local target: {}, reason: {reason}, reply: {text}", status.as_u16());

    Ok(build_envelope(status.as_u16(), reason, text))
}

//! Reply envelope constructors.

use serde_json::json;

use crate::{
    VERSION,
    protocol::{ReplyEnvelope, status},
};

/// JSON key under which the `version` command reports the relay version
pub const VERSION_KEY: &str = "jupyterBridgeVersion";

/// Text sent in place of a reply the server would not take
pub const FALLBACK_TEXT: &str = "Error returning response -- could be too long for the bridge server";

/// Build an envelope from a completed call
pub fn build_envelope(status: u16, reason: impl Into<String>, text: impl Into<String>) -> ReplyEnvelope {
    ReplyEnvelope { status, reason: reason.into(), text: text.into() }
}

/// Build a `200 OK` envelope
pub fn build_ok_envelope(text: impl Into<String>) -> ReplyEnvelope {
    build_envelope(status::OK, "OK", text)
}

/// Build the answer to the `version` command
pub fn build_version_envelope() -> ReplyEnvelope {
    build_ok_envelope(json!({ VERSION_KEY: VERSION }).to_string())
}

/// Build the answer to a `webbrowser` command that could not open a browser
pub fn build_browser_failure_envelope() -> ReplyEnvelope {
    build_envelope(status::SYSTEM_ERROR, "BAD BROWSER OPEN", "")
}

/// Build the answer to a local call that produced no HTTP response.
///
/// An unreachable host and a refused call look the same from here, so both end up as
/// status `0` with no text.
pub fn build_local_failure_envelope() -> ReplyEnvelope {
    build_envelope(status::LOCAL_FAILURE, "", "")
}

/// Build the substitute for a reply that could not be delivered
pub fn build_fallback_envelope() -> ReplyEnvelope {
    build_envelope(status::SYSTEM_ERROR, "", FALLBACK_TEXT)
}

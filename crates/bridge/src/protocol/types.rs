//! Protocol type definitions for the bridge.
//!
//! This module defines the data structures that travel through the bridge server.

use std::fmt;

use reqwest::Method;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{RelayError, Result};

/// Command value asking for the relay's own version
pub const VERSION_COMMAND: &str = "version";

/// Command value asking the relay to open a URL in a browser
pub const WEBBROWSER_COMMAND: &str = "webbrowser";

/// Identifier partitioning the bridge server's queues.
///
/// Channels are opaque: numeric and string ids are both accepted and rendered
/// verbatim into the `channel` query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Channel(String);

impl Channel {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Channel {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Channel {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for Channel {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for Channel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawChannel {
            Number(u64),
            Text(String),
        }

        Ok(match RawChannel::deserialize(deserializer)? {
            RawChannel::Number(id) => Channel::from(id),
            RawChannel::Text(id) => Channel::from(id),
        })
    }
}

/// A call queued by the remote caller, to be executed locally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallSpec {
    /// HTTP method, or one of the synthetic `version` / `webbrowser` commands
    pub command: String,

    /// Target URL, used verbatim
    #[serde(default)]
    pub url: String,

    /// Query parameters appended to `url`
    #[serde(default, deserialize_with = "null_as_empty")]
    pub params: Map<String, Value>,

    /// Request headers applied to the local call
    #[serde(default, deserialize_with = "null_as_empty")]
    pub headers: Map<String, Value>,

    /// Request body; `None` when the field was absent, `Some(Value::Null)` for `null`
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// What a [`CallSpec`] asks the relay to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Version,
    WebBrowser,
    Http(Method),
}

impl CallSpec {
    /// Create a call with no params, headers or body
    pub fn new(command: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            url: url.into(),
            params: Map::new(),
            headers: Map::new(),
            data: None,
        }
    }

    /// Add a query parameter
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Add a request header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the request body
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Classify the command field
    pub fn command_kind(&self) -> Result<Command> {
        match self.command.as_str() {
            VERSION_COMMAND => Ok(Command::Version),
            WEBBROWSER_COMMAND => Ok(Command::WebBrowser),
            method => Method::from_bytes(normalize_method(method).as_bytes())
                .map(Command::Http)
                .map_err(|_| RelayError::invalid_call(format!("not an HTTP method: {method:?}"))),
        }
    }
}

/// Outcome of one call, relayed back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyEnvelope {
    /// HTTP status code, `0` when the local call produced no response
    pub status: u16,

    /// Status text
    pub reason: String,

    /// Raw response body
    pub text: String,
}

/// Result of one `dequeue_request`
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// A call is ready to execute
    Call(CallSpec),
    /// Nothing arrived within the server's wait window
    Timeout,
    /// Another listener owns this channel; stop polling
    RedundantListener,
}

/// Upper-case the standard methods, leave extension methods as given
fn normalize_method(method: &str) -> String {
    const STANDARD: [&str; 6] = ["DELETE", "GET", "HEAD", "OPTIONS", "POST", "PUT"];

    match STANDARD.iter().find(|standard| standard.eq_ignore_ascii_case(method)) {
        Some(standard) => (*standard).to_string(),
        None => method.to_string(),
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

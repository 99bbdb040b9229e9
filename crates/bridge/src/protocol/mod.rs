//! Protocol definitions for the bridge.
//!
//! This module defines the messages exchanged with the bridge server and the
//! encoding rules applied to them.

pub mod codec;
pub mod status;
pub mod types;

pub use codec::{decode_call_spec, encode_reply, encode_uri_component, js_string};
pub use types::{CallSpec, Channel, Command, PollOutcome, ReplyEnvelope};

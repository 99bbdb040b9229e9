//! Bridge - long-poll relay between a bridge server and a local HTTP target
//!
//! A remote caller queues HTTP-shaped calls on a bridge server under a channel id. This
//! library drains that queue, executes each call against the local machine and posts the
//! outcome back on the same channel, one call at a time.

#[macro_use]
mod diag;

pub mod config;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod protocol;
pub mod relay;
pub mod transport;

// Re-export main types
pub use config::{RelayConfig, RelayConfigBuilder};
pub use dispatch::{Delivery, ReplyDispatcher};
pub use error::{RelayError, Result};
pub use handlers::{BrowserLauncher, CallTranslator, SystemBrowser};
pub use protocol::{CallSpec, Channel, PollOutcome, ReplyEnvelope};
pub use relay::{Relay, RelayState, RelayStats, StopReason};
pub use transport::QueueClient;

/// The version reported by the `version` command
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default bridge server used when none is configured
pub const DEFAULT_SERVER_URL: &str = "https://jupyter-bridge.cytoscape.org";

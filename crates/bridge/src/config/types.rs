//! Relay configuration types.

use std::time::Duration;

use crate::{DEFAULT_SERVER_URL, protocol::Channel};

/// Default read timeout for a long-poll `dequeue_request`
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(60);

/// Default pause after the bridge server could not be reached
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Configuration options for one relay instance
#[derive(Debug, Clone,)]
pub struct RelayConfig {
    /// Base URL of the bridge server
    pub server_url: String,

    /// Channel this relay listens on
    pub channel: Channel,

    /// Emit per-call diagnostics
    pub verbose: bool,

    /// Ask the server to drop stale listeners on the first poll
    pub reset_on_start: bool,

    /// Client-side read timeout for `dequeue_request`
    pub poll_timeout: Duration,

    /// Pause before re-polling after a transport failure
    pub retry_delay: Duration,

    /// Upper bound on a local call, unbounded when `None`
    pub call_timeout: Option<Duration,>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            channel: Channel::from(1,),
            verbose: false,
            reset_on_start: true,
            poll_timeout: DEFAULT_POLL_TIMEOUT,
            retry_delay: DEFAULT_RETRY_DELAY,
            call_timeout: None,
        }
    }
}

impl RelayConfig {
    /// Create a new configuration builder
    pub fn builder() -> RelayConfigBuilder {
        RelayConfigBuilder::default()
    }
}

/// Builder for RelayConfig
#[derive(Default,)]
pub struct RelayConfigBuilder {
    pub(crate) config: RelayConfig,
}

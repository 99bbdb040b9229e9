//! Relay configuration methods.

use std::time::Duration;

use url::Url;

use super::types::{RelayConfig, RelayConfigBuilder};
use crate::{
    error::{RelayError, Result},
    protocol::Channel,
};

impl RelayConfig {
    /// Listen on a different channel, keeping every other setting
    pub fn with_channel(mut self, channel: impl Into<Channel,>,) -> Self {
        self.channel = channel.into();
        self
    }

    /// Enable or disable per-call diagnostics
    pub fn with_verbose(mut self, verbose: bool,) -> Self {
        self.verbose = verbose;
        self
    }

    /// Check that the configuration can drive a relay
    pub fn validate(&self,) -> Result<(),> {
        let url = Url::parse(&self.server_url,)?;

        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(RelayError::Config(format!("unsupported server url scheme: {scheme}"),),);
            }
        }

        if self.channel.as_str().is_empty() {
            return Err(RelayError::Config("channel must not be empty".to_string(),),);
        }

        if self.poll_timeout.is_zero() {
            return Err(RelayError::Config("poll timeout must be positive".to_string(),),);
        }

        Ok((),)
    }

    /// Server base URL without a trailing slash
    pub(crate) fn server_base(&self,) -> &str {
        self.server_url.trim_end_matches('/',)
    }
}

impl RelayConfigBuilder {
    /// Build the configuration
    pub fn build(self,) -> RelayConfig {
        self.config
    }

    /// Set the bridge server base URL
    pub fn server_url(mut self, url: impl Into<String,>,) -> Self {
        self.config.server_url = url.into();
        self
    }

    /// Set the channel
    pub fn channel(mut self, channel: impl Into<Channel,>,) -> Self {
        self.config.channel = channel.into();
        self
    }

    /// Enable per-call diagnostics
    pub fn verbose(mut self, verbose: bool,) -> Self {
        self.config.verbose = verbose;
        self
    }

    /// Skip the reset flag on the first poll
    pub fn disable_reset(mut self,) -> Self {
        self.config.reset_on_start = false;
        self
    }

    /// Set the long-poll read timeout
    pub fn poll_timeout(mut self, timeout: Duration,) -> Self {
        self.config.poll_timeout = timeout;
        self
    }

    /// Set the pause after a transport failure
    pub fn retry_delay(mut self, delay: Duration,) -> Self {
        self.config.retry_delay = delay;
        self
    }

    /// Bound the duration of local calls
    pub fn call_timeout(mut self, timeout: Duration,) -> Self {
        self.config.call_timeout = Some(timeout,);
        self
    }
}

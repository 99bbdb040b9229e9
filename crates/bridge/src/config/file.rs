//! TOML configuration file support.
//!
//! ```toml
//! [relay]
//! server_url = "https://jupyter-bridge.cytoscape.org"
//! channels = ["8c1e5f0a-3b4d-4e6f-9a7b-1c2d3e4f5a6b"]
//! verbose = false
//! reset_on_start = true
//! poll_timeout_secs = 60
//! retry_delay_ms = 1000
//! ```

use std::{fs, path::Path, path::PathBuf, time::Duration};

use serde::Deserialize;

use super::types::RelayConfig;
use crate::{error::Result, protocol::Channel};

/// Contents of a relay configuration file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub relay: RelaySection,
}

/// The `[relay]` table; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelaySection {
    pub server_url: Option<String>,
    #[serde(default)]
    pub channels: Vec<Channel>,
    pub verbose: Option<bool>,
    pub reset_on_start: Option<bool>,
    pub poll_timeout_secs: Option<u64>,
    pub retry_delay_ms: Option<u64>,
    pub call_timeout_secs: Option<u64>,
}

/// Used to ensure we are actually reading a toml file
fn normalize_toml_path(path: &Path) -> PathBuf {
    let mut path = path.to_path_buf();
    if path.extension().map(|ext| ext != "toml").unwrap_or(true) {
        path.set_extension("toml");
    }
    path
}

impl FileConfig {
    /// Read and parse a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(normalize_toml_path(path.as_ref()))?;
        Self::parse(&raw)
    }

    /// Parse configuration from TOML text
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Apply the file's settings on top of `base`
    pub fn apply(&self, mut base: RelayConfig) -> RelayConfig {
        let relay = &self.relay;

        if let Some(url) = &relay.server_url {
            base.server_url = url.clone();
        }
        if let Some(channel) = relay.channels.first() {
            base.channel = channel.clone();
        }
        if let Some(verbose) = relay.verbose {
            base.verbose = verbose;
        }
        if let Some(reset) = relay.reset_on_start {
            base.reset_on_start = reset;
        }
        if let Some(secs) = relay.poll_timeout_secs {
            base.poll_timeout = Duration::from_secs(secs);
        }
        if let Some(millis) = relay.retry_delay_ms {
            base.retry_delay = Duration::from_millis(millis);
        }
        if let Some(secs) = relay.call_timeout_secs {
            base.call_timeout = Some(Duration::from_secs(secs));
        }

        base
    }
}

use std::path::PathBuf;

use bridge::{Channel, RelayConfig, Result, config::FileConfig};
use clap::Parser;

/// Relay calls queued on a bridge server to this machine
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Base URL of the bridge server
    #[arg(long, env = "BRIDGE_SERVER_URL")]
    pub server_url: Option<String>,

    /// Channel to listen on; repeat or comma-separate to relay several channels
    #[arg(long = "channel", env = "BRIDGE_CHANNEL", value_delimiter = ',')]
    pub channels: Vec<String>,

    /// Log every dequeue, call and reply
    #[arg(short, long, env = "BRIDGE_VERBOSE")]
    pub verbose: bool,

    /// Do not ask the server to drop stale listeners on the first poll
    #[arg(long)]
    pub no_reset: bool,

    /// TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// One relay configuration per channel.
    ///
    /// Flags and environment override the configuration file, which overrides defaults.
    pub fn relay_configs(&self) -> Result<Vec<RelayConfig>> {
        let file = match &self.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        let mut base = file.apply(RelayConfig::default());
        if let Some(url) = &self.server_url {
            base.server_url = url.clone();
        }
        if self.verbose {
            base.verbose = true;
        }
        if self.no_reset {
            base.reset_on_start = false;
        }

        let mut channels: Vec<Channel> = if !self.channels.is_empty() {
            self.channels.iter().map(|id| Channel::from(id.trim())).collect()
        } else if !file.relay.channels.is_empty() {
            file.relay.channels.clone()
        } else {
            vec![base.channel.clone()]
        };

        // Two relays on one channel would evict each other
        let mut seen = Vec::new();
        channels.retain(|channel| {
            let fresh = !seen.contains(channel);
            seen.push(channel.clone());
            fresh
        });

        channels
            .into_iter()
            .map(|channel| -> Result<RelayConfig> {
                let config = base.clone().with_channel(channel);
                config.validate()?;
                Ok(config)
            })
            .collect()
    }
}

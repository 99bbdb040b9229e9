#![warn(clippy::all, clippy::pedantic)]

use anyhow::{Context, Result};
use bridge::Relay;
use clap::Parser;
use tokio::{signal, sync::watch, task::JoinSet};
use tracing::{error, info, warn};

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // A .env file may provide BRIDGE_* settings
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let configs = cli.relay_configs().context("invalid relay configuration")?;
    logger::init(configs.iter().any(|config| config.verbose));

    let relays = configs
        .into_iter()
        .map(|config| {
            let channel = config.channel.clone();
            Relay::new(config).with_context(|| format!("failed to create relay for channel {channel}"))
        })
        .collect::<Result<Vec<_>>>()?;

    if let Some(first) = relays.first() {
        match first.ping().await {
            Ok(banner) => info!("Bridge server at {} answered: {banner}", first.config().server_url),
            Err(error) => warn!("Bridge server at {} did not answer ping: {error}", first.config().server_url),
        }
    }

    run_relays(relays).await;
    Ok(())
}

/// Run every relay as its own task until all have stopped or Ctrl+C is pressed
async fn run_relays(relays: Vec<Relay>) {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut tasks = JoinSet::new();

    for mut relay in relays {
        let shutdown = shutdown_rx.clone();
        tasks.spawn(async move {
            let reason = relay.run_until(shutdown).await;
            (relay.config().channel.clone(), reason)
        });
    }

    loop {
        tokio::select! {
            joined = tasks.join_next() => match joined {
                Some(Ok((channel, reason))) => info!("Relay on channel {channel} finished: {reason}"),
                Some(Err(join_error)) => error!("Relay task failed: {join_error}"),
                None => break,
            },
            _ = signal::ctrl_c(), if !*shutdown_tx.borrow() => {
                info!("Ctrl+C received, stopping relays.");
                shutdown_tx.send_replace(true);
            }
        }
    }
}

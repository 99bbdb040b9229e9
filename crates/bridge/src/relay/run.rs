//! Relay construction and the poll loop.

use std::{future, sync::Arc};

use reqwest::Response;
use tokio::{sync::watch, time::sleep};
use tracing::{Instrument, info, info_span, warn};

use super::{
    poll::classify,
    state::{RelayState, RelayStats, StopReason},
};
use crate::{
    config::RelayConfig,
    dispatch::{Delivery, ReplyDispatcher},
    error::{RelayError, Result},
    handlers::{BrowserLauncher, CallTranslator},
    protocol::{CallSpec, PollOutcome},
    transport::QueueClient,
};

/// Relays calls for a single channel
pub struct Relay {
    config: RelayConfig,
    queue: QueueClient,
    translator: CallTranslator,
    dispatcher: ReplyDispatcher,
    state: RelayState,
    stats: RelayStats,
    reset_pending: bool,
}

impl Relay {
    /// Create a relay from a validated configuration
    pub fn new(config: RelayConfig) -> Result<Self> {
        config.validate()?;

        let queue = QueueClient::new(&config)?;
        let translator = CallTranslator::new(&config)?;
        let dispatcher = ReplyDispatcher::new(queue.clone());

        Ok(Self {
            reset_pending: config.reset_on_start,
            config,
            queue,
            translator,
            dispatcher,
            state: RelayState::Polling,
            stats: RelayStats::default(),
        })
    }

    /// Replace the launcher used by the `webbrowser` command
    pub fn with_launcher(mut self, launcher: Arc<dyn BrowserLauncher>) -> Self {
        self.translator = self.translator.with_launcher(launcher);
        self
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    pub fn state(&self) -> RelayState {
        self.state
    }

    pub fn stats(&self) -> RelayStats {
        self.stats
    }

    /// Ask the bridge server for its version banner
    pub async fn ping(&self) -> Result<String> {
        self.queue.ping().await
    }

    /// Wait for the next call on the channel.
    ///
    /// The first answered poll carries the reset flag when configured. Answers that are
    /// not usable calls come back as [`PollOutcome::Timeout`]. An `Err` means the server
    /// could not be reached.
    pub async fn poll_once(&mut self) -> Result<PollOutcome> {
        let started = self.queue.start_dequeue(self.reset_pending).await;
        self.finish_poll(started).await
    }

    /// Read and classify a `dequeue_request` answer whose status has arrived
    async fn finish_poll(&mut self, started: Result<Response>) -> Result<PollOutcome> {
        let answered = match started {
            Ok(response) => self.queue.finish_dequeue(response).await,
            Err(error) => Err(error),
        };

        let response = match answered {
            Ok(response) => response,
            Err(RelayError::Http(error)) if error.is_timeout() => {
                diag!(self.config.verbose, "dequeue_request read timed out: {error}");
                self.reset_pending = false;
                return Ok(PollOutcome::Timeout);
            }
            Err(error) => return Err(error),
        };

        self.reset_pending = false;
        self.stats.polls += 1;

        match classify(&response) {
            Ok(outcome) => Ok(outcome),
            Err(error) => {
                // Nothing to call and nobody to answer: drop it
                warn!("Dropping unusable call on channel {}: {error}", self.config.channel);
                self.stats.malformed += 1;
                Ok(PollOutcome::Timeout)
            }
        }
    }

    /// Relay calls until the server reports a redundant listener
    pub async fn run(&mut self) -> StopReason {
        let (_keep_open, shutdown) = watch::channel(false);
        self.run_until(shutdown).await
    }

    /// Relay calls until the server reports a redundant listener or `shutdown` turns true.
    ///
    /// Shutdown is honoured while waiting for the server to answer a poll and between
    /// round trips; once the server has answered, its call is executed and answered first.
    pub async fn run_until(&mut self, mut shutdown: watch::Receiver<bool>) -> StopReason {
        let span = info_span!("relay", channel = %self.config.channel);

        async {
            info!("Relay started on {}", self.config.server_url);
            let reason = self.drive(&mut shutdown).await;
            self.state = RelayState::Stopped;
            info!(%reason, stats = ?self.stats, "Relay stopped");
            reason
        }
        .instrument(span)
        .await
    }

    async fn drive(&mut self, shutdown: &mut watch::Receiver<bool>) -> StopReason {
        loop {
            if *shutdown.borrow() {
                return StopReason::Shutdown;
            }

            self.state = RelayState::Polling;
            let started = tokio::select! {
                _ = shutdown_requested(shutdown) => return StopReason::Shutdown,
                started = self.queue.start_dequeue(self.reset_pending) => started,
            };

            // The server has handed over its call, so it gets executed and answered
            let outcome = self.finish_poll(started).await;

            match outcome {
                Ok(PollOutcome::Call(spec)) => {
                    self.state = RelayState::Executing;
                    self.round_trip(spec).await;
                }
                Ok(PollOutcome::Timeout) => {
                    self.stats.timeouts += 1;
                }
                Ok(PollOutcome::RedundantListener) => {
                    info!("Shutting down because of redundant reader on channel {}", self.config.channel);
                    return StopReason::RedundantListener;
                }
                Err(error) => {
                    self.stats.transport_errors += 1;
                    warn!("Could not reach bridge server: {error}");
                    tokio::select! {
                        _ = shutdown_requested(shutdown) => return StopReason::Shutdown,
                        _ = sleep(self.config.retry_delay) => {}
                    }
                }
            }
        }
    }

    /// Execute one call and deliver its reply
    async fn round_trip(&mut self, spec: CallSpec) {
        let envelope = match self.translator.translate(&spec).await {
            Ok(envelope) => envelope,
            Err(error) => {
                warn!("Dropping call {} {}: {error}", spec.command, spec.url);
                self.stats.malformed += 1;
                return;
            }
        };
        self.stats.calls += 1;

        let delivery = self.dispatcher.deliver(&envelope).await;
        diag!(
            self.config.verbose,
            "Reply {} to {} {}: {delivery:?}",
            envelope.status,
            spec.command,
            spec.url
        );

        match delivery {
            Delivery::Delivered => self.stats.delivered += 1,
            Delivery::FellBack => self.stats.fallbacks += 1,
            Delivery::Lost => self.stats.lost += 1,
        }
    }
}

/// Resolves once shutdown is requested; never, if the sender is gone
async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    if shutdown.wait_for(|stop| *stop).await.is_err() {
        future::pending::<()>().await;
    }
}

//! Reply delivery to the bridge server.
//!
//! A reply that the server will not take is replaced by a short fallback so the caller
//! waiting on the channel is never left without an answer.

use tracing::{error, warn};

use crate::{
    error::{RelayError, Result},
    handlers::build_fallback_envelope,
    protocol::{ReplyEnvelope, encode_reply, status},
    transport::QueueClient,
};

/// How a reply reached the bridge server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The reply itself was accepted
    Delivered,
    /// The reply failed and the fallback was accepted
    FellBack,
    /// Neither the reply nor the fallback went through
    Lost,
}

/// Posts replies on one channel
#[derive(Debug, Clone)]
pub struct ReplyDispatcher {
    queue: QueueClient,
}

impl ReplyDispatcher {
    pub fn new(queue: QueueClient) -> Self {
        Self { queue }
    }

    /// Deliver `envelope`, falling back to a diagnostic reply once on failure.
    ///
    /// Never fails: whatever happens, the relay can poll again afterwards.
    pub async fn deliver(&self, envelope: &ReplyEnvelope) -> Delivery {
        let error = match self.send(envelope).await {
            Ok(()) => return Delivery::Delivered,
            Err(error) => error,
        };

        warn!(
            channel = %self.queue.channel(),
            "Error from queue_reply, could be bridge server reject: {error}"
        );

        match self.send(&build_fallback_envelope()).await {
            Ok(()) => Delivery::FellBack,
            Err(error) => {
                error!(channel = %self.queue.channel(), "Backup queue_reply failed: {error}");
                Delivery::Lost
            }
        }
    }

    async fn send(&self, envelope: &ReplyEnvelope) -> Result<()> {
        let response = self.queue.queue_reply(encode_reply(envelope)?).await?;
        diag!(
            self.queue.verbose(),
            "Status from queue_reply: {}, reply: {}",
            response.status,
            response.body
        );

        if response.status == status::PAYLOAD_TOO_LARGE {
            return Err(RelayError::ReplyRejected(response.status));
        }

        Ok(())
    }
}

//! HTTP transport to the bridge server.
//!
//! Three endpoints are consumed: `dequeue_request` (long poll for the next call),
//! `queue_reply` (post the outcome of a call) and `ping`.

use reqwest::{Client, Response, header::CONTENT_TYPE};

use crate::{
    VERSION,
    config::RelayConfig,
    error::Result,
    protocol::{Channel, encode_uri_component},
};

/// Raw answer of the bridge server, before any interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerResponse {
    pub status: u16,
    pub body: String,
}

/// Client for one channel on the bridge server
#[derive(Debug, Clone)]
pub struct QueueClient {
    poll_client: Client,
    reply_client: Client,
    base_url: String,
    channel: Channel,
    verbose: bool,
}

impl QueueClient {
    /// Build the clients described by `config`
    pub fn new(config: &RelayConfig) -> Result<Self> {
        let user_agent = format!("bridge/{VERSION}");

        let poll_client = Client::builder()
            .timeout(config.poll_timeout)
            .user_agent(user_agent.clone())
            .build()?;
        let reply_client = Client::builder().user_agent(user_agent).build()?;

        Ok(Self {
            poll_client,
            reply_client,
            base_url: config.server_base().to_string(),
            channel: config.channel.clone(),
            verbose: config.verbose,
        })
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    /// Whether per-step diagnostics are logged at INFO
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// URL of `endpoint` scoped to this client's channel
    pub fn channel_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{endpoint}?channel={}",
            self.base_url,
            encode_uri_component(self.channel.as_str())
        )
    }

    /// Wait for the next call on the channel.
    ///
    /// Blocks until the server answers, which for an idle channel is the end of its
    /// wait window.
    pub async fn dequeue_request(&self, reset: bool) -> Result<ServerResponse> {
        let response = self.start_dequeue(reset).await?;
        self.finish_dequeue(response).await
    }

    /// Send `dequeue_request` and wait for the status line.
    ///
    /// Once this returns, the server has handed over whatever call it held.
    pub async fn start_dequeue(&self, reset: bool) -> Result<Response> {
        let mut url = self.channel_url("dequeue_request");
        if reset {
            url.push_str("&reset");
        }

        diag!(self.verbose, "Starting dequeue on bridge: {url}");
        Ok(self.poll_client.get(&url).send().await?)
    }

    /// Read the body of a `dequeue_request` answer
    pub async fn finish_dequeue(&self, response: Response) -> Result<ServerResponse> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        diag!(self.verbose, "Status from dequeue_request: {status}, reply: {}", body.trim_end());

        Ok(ServerResponse { status, body })
    }

    /// Post an encoded reply for the channel
    pub async fn queue_reply(&self, body: String) -> Result<ServerResponse> {
        let url = self.channel_url("queue_reply");

        diag!(self.verbose, "Starting queue to bridge: {url}");
        let response = self
            .reply_client
            .post(&url)
            .header(CONTENT_TYPE, "text/plain")
            .body(body)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(ServerResponse { status, body })
    }

    /// Ask the server for its version banner
    pub async fn ping(&self) -> Result<String> {
        let response = self
            .reply_client
            .get(format!("{}/ping", self.base_url))
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_url_encodes_channel() {
        let config = RelayConfig::builder()
            .server_url("http://127.0.0.1:5000/")
            .channel("a b/c")
            .build();
        let client = QueueClient::new(&config).unwrap();

        assert_eq!(
            client.channel_url("queue_reply"),
            "http://127.0.0.1:5000/queue_reply?channel=a%20b%2Fc"
        );
    }
}

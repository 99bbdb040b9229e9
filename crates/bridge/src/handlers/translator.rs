//! Call translation.
//!
//! A [`CallTranslator`] executes one [`CallSpec`] and always produces a
//! [`ReplyEnvelope`]; failures of the local call become part of the answer.

use std::{sync::Arc, time::Duration};

use reqwest::Client;
use tracing::warn;

use super::{
    browser::{BrowserLauncher, SystemBrowser},
    http::perform_http_request,
    response::{
        build_browser_failure_envelope, build_local_failure_envelope, build_ok_envelope,
        build_version_envelope,
    },
    validation::validate_call_spec,
};
use crate::{
    VERSION,
    config::RelayConfig,
    error::Result,
    protocol::{CallSpec, Command, ReplyEnvelope},
};

/// Executes calls against the local machine
pub struct CallTranslator {
    client: Client,
    launcher: Arc<dyn BrowserLauncher>,
    call_timeout: Option<Duration>,
    verbose: bool,
}

impl CallTranslator {
    /// Create a translator that opens the system browser
    pub fn new(config: &RelayConfig) -> Result<Self> {
        let client = Client::builder().user_agent(format!("bridge/{VERSION}")).build()?;

        Ok(Self {
            client,
            launcher: Arc::new(SystemBrowser),
            call_timeout: config.call_timeout,
            verbose: config.verbose,
        })
    }

    /// Replace the browser launcher
    pub fn with_launcher(mut self, launcher: Arc<dyn BrowserLauncher>) -> Self {
        self.launcher = launcher;
        self
    }

    /// Execute `spec` and build its reply.
    ///
    /// Fails only when the call is malformed; such a call is never executed.
    pub async fn translate(&self, spec: &CallSpec) -> Result<ReplyEnvelope> {
        let command = validate_call_spec(spec)?;

        diag!(self.verbose, command = %spec.command, url = %spec.url, "Translating call");
        if !spec.params.is_empty() {
            diag!(self.verbose, " params: {}", serde_json::Value::Object(spec.params.clone()));
        }
        if !spec.headers.is_empty() {
            diag!(self.verbose, " headers: {}", serde_json::Value::Object(spec.headers.clone()));
        }
        if let Some(data) = &spec.data {
            diag!(self.verbose, " data: {data}");
        }

        Ok(self.execute(command, spec).await)
    }

    async fn execute(&self, command: Command, spec: &CallSpec) -> ReplyEnvelope {
        match command {
            Command::Version => build_version_envelope(),
            Command::WebBrowser => match self.launcher.open(&spec.url).await {
                Ok(()) => build_ok_envelope(""),
                Err(error) => {
                    warn!("Could not open browser on {}: {error}", spec.url);
                    build_browser_failure_envelope()
                }
            },
            Command::Http(method) => {
                match perform_http_request(&self.client, method, spec, self.call_timeout, self.verbose)
                    .await
                {
                    Ok(envelope) => envelope,
                    Err(error) => {
                        // Unreachable hosts and refused calls both land here
                        diag!(self.verbose, "Local call to {} failed: {error}", spec.url);
                        build_local_failure_envelope()
                    }
                }
            }
        }
    }
}

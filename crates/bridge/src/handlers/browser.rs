//! Browser launching for the `webbrowser` command.

use std::io;

use async_trait::async_trait;

/// Opens URLs in a browser on the relay's machine
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    /// Open `url` in a new browser tab or window
    async fn open(&self, url: &str) -> io::Result<()>;
}

/// Launches the user's default browser
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

#[async_trait]
impl BrowserLauncher for SystemBrowser {
    async fn open(&self, url: &str) -> io::Result<()> {
        let url = url.to_string();

        // Launching may wait on the spawned browser process
        tokio::task::spawn_blocking(move || webbrowser::open(&url))
            .await
            .map_err(io::Error::other)?
    }
}

//! Shared helpers for bridge integration tests
#![allow(dead_code)]

use std::{
    io,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use bridge::{BrowserLauncher, CallSpec, RelayConfig, ReplyEnvelope};
use tokio::{io::AsyncReadExt, net::TcpStream};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

pub const CHANNEL: &str = "7";

pub fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Relay configuration pointing at `server`
pub fn relay_config(server: &MockServer) -> RelayConfig {
    RelayConfig::builder()
        .server_url(server.uri())
        .channel(CHANNEL)
        .retry_delay(Duration::from_millis(10))
        .build()
}

/// Serve `spec` once from `dequeue_request`
pub async fn serve_call(server: &MockServer, spec: &CallSpec) {
    Mock::given(method("GET"))
        .and(path("/dequeue_request"))
        .respond_with(ResponseTemplate::new(200).set_body_string(serde_json::to_string(spec).unwrap()))
        .up_to_n_times(1)
        .mount(server)
        .await;
}

/// Serve `status` from `dequeue_request` `times` times
pub async fn serve_status(server: &MockServer, status: u16, times: u64) {
    Mock::given(method("GET"))
        .and(path("/dequeue_request"))
        .respond_with(ResponseTemplate::new(status))
        .up_to_n_times(times)
        .mount(server)
        .await;
}

/// Tell every later poll that another listener owns the channel
pub async fn serve_redundant_listener(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/dequeue_request"))
        .respond_with(ResponseTemplate::new(429))
        .mount(server)
        .await;
}

/// Accept every reply
pub async fn accept_replies(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/queue_reply"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

/// Paths of every request `server` received, in arrival order
pub async fn request_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| request.url.path().to_string())
        .collect()
}

/// Replies posted to `server`, in arrival order
pub async fn posted_replies(server: &MockServer) -> Vec<ReplyEnvelope> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == "/queue_reply")
        .map(|request| serde_json::from_slice(&request.body).unwrap())
        .collect()
}

/// Read one HTTP/1.1 request, head and body, from `stream`
pub async fn read_request(stream: &mut TcpStream) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 8192];

    loop {
        let read = stream.read(&mut chunk).await.unwrap();
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);

        if let Some(end) = buffer.windows(4).position(|window| window == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buffer[..end]).to_ascii_lowercase();
            let length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .map(|value| value.trim().parse::<usize>().unwrap())
                .unwrap_or(0);
            if buffer.len() >= end + 4 + length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buffer).into_owned()
}

/// Body of a raw request read by [`read_request`]
pub fn request_body(request: &str) -> &str {
    request.split_once("\r\n\r\n").map(|(_, body)| body).unwrap_or_default()
}

/// Head of a `Connection: close` response announcing `body_len` bytes
pub fn response_head(status: u16, reason: &str, body_len: usize) -> String {
    format!("HTTP/1.1 {status} {reason}\r\nContent-Length: {body_len}\r\nConnection: close\r\n\r\n")
}

/// Browser launcher that records URLs instead of opening them
#[derive(Default)]
pub struct FakeBrowser {
    pub fail: bool,
    pub opened: Mutex<Vec<String>>,
}

impl FakeBrowser {
    pub fn failing() -> Arc<Self> {
        Arc::new(Self { fail: true, ..Self::default() })
    }

    pub fn working() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl BrowserLauncher for FakeBrowser {
    async fn open(&self, url: &str) -> io::Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        if self.fail {
            Err(io::Error::other("popup blocked"))
        } else {
            Ok(())
        }
    }
}

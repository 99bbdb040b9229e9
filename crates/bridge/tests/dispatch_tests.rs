//! Tests for reply delivery and the fallback path

mod common;

use bridge::{
    Delivery, QueueClient, ReplyDispatcher, RelayConfig, ReplyEnvelope,
    handlers::{build_envelope, build_fallback_envelope},
};
use common::{CHANNEL, init_logging, posted_replies, read_request, relay_config, request_body, response_head};
use tokio::{io::AsyncWriteExt, net::TcpListener};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, header, method, path, query_param},
};

fn dispatcher(config: &RelayConfig) -> ReplyDispatcher {
    ReplyDispatcher::new(QueueClient::new(config).unwrap())
}

fn large_reply() -> ReplyEnvelope {
    build_envelope(200, "OK", "x".repeat(64 * 1024))
}

#[tokio::test]
async fn test_reply_posted_as_text_plain_json() {
    init_logging();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/queue_reply"))
        .and(query_param("channel", CHANNEL))
        .and(header("Content-Type", "text/plain"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let reply = build_envelope(201, "Created", r#"{"SUID":1}"#);
    let delivery = dispatcher(&relay_config(&server)).deliver(&reply).await;

    assert_eq!(delivery, Delivery::Delivered);
    assert_eq!(posted_replies(&server).await, vec![reply]);
}

#[tokio::test]
async fn test_other_error_statuses_are_only_logged() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/queue_reply"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Channel 7:reply contains unprocessed message"))
        .expect(1)
        .mount(&server)
        .await;

    let delivery = dispatcher(&relay_config(&server)).deliver(&build_envelope(200, "OK", "")).await;
    assert_eq!(delivery, Delivery::Delivered);
}

#[tokio::test]
async fn test_rejected_reply_falls_back_once() {
    init_logging();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/queue_reply"))
        .and(body_string_contains("could be too long"))
        .respond_with(ResponseTemplate::new(200))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/queue_reply"))
        .respond_with(ResponseTemplate::new(413))
        .expect(1)
        .mount(&server)
        .await;

    let delivery = dispatcher(&relay_config(&server)).deliver(&large_reply()).await;
    assert_eq!(delivery, Delivery::FellBack);

    let replies = posted_replies(&server).await;
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[1].status, 500);
    assert!(replies[1].reason.is_empty());
    assert!(!replies[1].text.is_empty());
    assert!(!replies[1].text.contains("xxxx"));
}

#[tokio::test]
async fn test_failed_fallback_is_swallowed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/queue_reply"))
        .respond_with(ResponseTemplate::new(413))
        .expect(2)
        .mount(&server)
        .await;

    let delivery = dispatcher(&relay_config(&server)).deliver(&large_reply()).await;
    assert_eq!(delivery, Delivery::Lost);
}

#[tokio::test]
async fn test_unreachable_server_is_lost_not_fatal() {
    let config = RelayConfig::builder().server_url("http://127.0.0.1:1").build();

    let delivery = dispatcher(&config).deliver(&build_envelope(200, "OK", "")).await;
    assert_eq!(delivery, Delivery::Lost);
}

#[tokio::test]
async fn test_connection_closed_mid_reply_falls_back() {
    init_logging();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (mut first, _) = listener.accept().await.unwrap();
        let dropped = read_request(&mut first).await;
        drop(first);

        let (mut second, _) = listener.accept().await.unwrap();
        let fallback = read_request(&mut second).await;
        second.write_all(response_head(200, "OK", 0).as_bytes()).await.unwrap();
        second.shutdown().await.unwrap();

        (dropped, fallback)
    });

    let config = RelayConfig::builder().server_url(format!("http://{address}")).channel(CHANNEL).build();
    let delivery = dispatcher(&config).deliver(&large_reply()).await;
    assert_eq!(delivery, Delivery::FellBack);

    let (dropped, fallback) = server.await.unwrap();
    assert!(dropped.starts_with("POST /queue_reply?channel=7 "));
    let posted: ReplyEnvelope = serde_json::from_str(request_body(&fallback)).unwrap();
    assert_eq!(posted, build_fallback_envelope());
}

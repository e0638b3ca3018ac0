//! Telegram transport against a local mock Bot API.

use std::time::Duration;

use mockito::Matcher;
use verdict_notifier::{TelegramTransport, Transport, TransportError};

#[tokio::test]
async fn test_send_posts_chat_id_and_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/bot123:abc/sendMessage")
        .match_body(Matcher::Json(serde_json::json!({
            "chat_id": "42",
            "text": "Changed review status",
        })))
        .with_status(200)
        .with_body(r#"{"ok":true}"#)
        .create_async()
        .await;

    let transport = TelegramTransport::new(server.url(), "123:abc", Duration::from_secs(5)).unwrap();
    transport.send("42", "Changed review status").await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_send_reports_api_errors() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/bot123:abc/sendMessage")
        .with_status(400)
        .with_body(r#"{"ok":false,"description":"Bad Request: chat not found"}"#)
        .create_async()
        .await;

    let transport = TelegramTransport::new(server.url(), "123:abc", Duration::from_secs(5)).unwrap();
    let err = transport.send("42", "hi").await.unwrap_err();

    match err {
        TransportError::Api { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("chat not found"));
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_send_reports_network_errors_without_token() {
    // Nothing listens on port 1.
    let transport =
        TelegramTransport::new("http://127.0.0.1:1", "123:secret", Duration::from_secs(2)).unwrap();
    let err = transport.send("42", "hi").await.unwrap_err();

    assert!(matches!(err, TransportError::Network(_)));
    assert!(!err.to_string().contains("secret"));
}

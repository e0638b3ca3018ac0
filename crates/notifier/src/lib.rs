//! Notification delivery.
//!
//! The poller only needs one operation from a chat channel: send a text to a
//! chat. [`Transport`] is that seam; [`TelegramTransport`] implements it over
//! the Telegram Bot API, and [`send_message`] is the delivery helper the poll
//! loop uses, which never lets a transport failure escape.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use verdict_common::config::{AppConfig, ValidCredentials};
use verdict_common::error::FatalError;

/// Failure to deliver a message.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Chat API returned {status}: {body}")]
    Api { status: u16, body: String },
}

/// Outbound messaging channel.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), TransportError>;
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Telegram Bot API transport (`POST /bot<token>/sendMessage`).
pub struct TelegramTransport {
    client: reqwest::Client,
    api_url: String,
    bot_token: String,
}

impl TelegramTransport {
    pub fn new(
        api_url: impl Into<String>,
        bot_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FatalError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FatalError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            bot_token: bot_token.into(),
        })
    }

    /// Build a transport from validated credentials and the app config.
    pub fn from_config(
        credentials: &ValidCredentials,
        config: &AppConfig,
    ) -> Result<Self, FatalError> {
        Self::new(
            config.telegram_api_url.clone(),
            credentials.bot_token.clone(),
            config.request_timeout,
        )
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_url, self.bot_token)
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), TransportError> {
        let response = self
            .client
            .post(self.send_message_url())
            .json(&SendMessageRequest { chat_id, text })
            .send()
            .await
            // Strip the URL: it embeds the bot token.
            .map_err(|e| TransportError::Network(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

/// Deliver `text` to `chat_id`, logging instead of propagating failures.
///
/// Returns `true` if the message was accepted by the transport. A failed
/// send is never escalated: the chat is also where errors are reported, so
/// escalating would only produce another failing send.
pub async fn send_message(transport: &dyn Transport, chat_id: &str, text: &str) -> bool {
    match transport.send(chat_id, text).await {
        Ok(()) => {
            tracing::debug!(chat_id, "Message sent");
            true
        }
        Err(e) => {
            tracing::error!(chat_id, error = %e, "Failed to send message");
            false
        }
    }
}

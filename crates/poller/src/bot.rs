use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use verdict_common::config::{AppConfig, ValidCredentials};
use verdict_common::error::{BotError, CycleError};
use verdict_common::types::VerdictTable;
use verdict_notifier::{TelegramTransport, Transport, send_message};

use crate::client::{EndpointClient, HomeworkSource};
use crate::formatter::StatusFormatter;
use crate::validator::ResponseValidator;

/// What a single cycle ended up sending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A status message was rendered and handed to the transport.
    Notified { message: String, delivered: bool },
    /// The cycle failed; a fault report was handed to the transport.
    Faulted { error: CycleError, delivered: bool },
}

/// Polls the review service and relays status changes to one chat.
pub struct StatusBot {
    source: Arc<dyn HomeworkSource>,
    transport: Arc<dyn Transport>,
    chat_id: String,
    validator: ResponseValidator,
    formatter: StatusFormatter,
    retry_period: Duration,
    /// Lower bound of the query window. Set once at startup.
    from_date: i64,
}

impl StatusBot {
    pub fn new(
        source: Arc<dyn HomeworkSource>,
        transport: Arc<dyn Transport>,
        chat_id: String,
        config: &AppConfig,
        from_date: i64,
    ) -> Self {
        Self {
            source,
            transport,
            chat_id,
            validator: ResponseValidator::new(config.inject_placeholder_on_empty),
            formatter: StatusFormatter::new(VerdictTable::new()),
            retry_period: config.retry_period,
            from_date,
        }
    }

    /// Validate credentials and wire up the HTTP endpoint client and the
    /// Telegram transport. The cursor starts at the current time.
    pub fn from_config(config: &AppConfig) -> Result<Self, BotError> {
        let credentials: ValidCredentials = config.credentials.validate()?;

        let source = EndpointClient::new(
            config.endpoint.clone(),
            credentials.service_token.clone(),
            config.request_timeout,
        )?;
        let transport = TelegramTransport::from_config(&credentials, config)?;

        Ok(Self::new(
            Arc::new(source),
            Arc::new(transport),
            credentials.chat_id,
            config,
            Utc::now().timestamp(),
        ))
    }

    pub fn from_date(&self) -> i64 {
        self.from_date
    }

    /// Start the polling loop. Runs until the task is cancelled.
    pub async fn run(&self) {
        tracing::info!(
            from_date = self.from_date,
            retry_period_secs = self.retry_period.as_secs(),
            "Status bot started"
        );

        loop {
            self.run_cycle().await;
            tokio::time::sleep(self.retry_period).await;
        }
    }

    /// One fetch → validate → format → notify pass. Never fails: errors are
    /// logged and reported to the chat.
    pub async fn run_cycle(&self) -> CycleOutcome {
        match self.poll().await {
            Ok(message) => {
                let delivered =
                    send_message(self.transport.as_ref(), &self.chat_id, &message).await;
                CycleOutcome::Notified { message, delivered }
            }
            Err(error) => {
                tracing::error!(error = %error, "Poll cycle failed");
                let report = fault_message(&error);
                let delivered =
                    send_message(self.transport.as_ref(), &self.chat_id, &report).await;
                CycleOutcome::Faulted { error, delivered }
            }
        }
    }

    /// Fetch the latest response and render its most recent record.
    pub async fn poll(&self) -> Result<String, CycleError> {
        // The cursor is deliberately not advanced from `current_date`; every
        // cycle queries the same window.
        let response = self.source.fetch(self.from_date).await?;
        let record = self.validator.validate(&response)?;
        self.formatter.format(&record)
    }
}

/// Text sent to the chat when a cycle fails.
pub fn fault_message(error: &CycleError) -> String {
    format!("Program fault: {error}")
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{Value, json};
    use verdict_common::error::FatalError;
    use verdict_notifier::TransportError;

    use super::*;

    struct StaticSource(Result<Value, CycleError>);

    #[async_trait]
    impl HomeworkSource for StaticSource {
        async fn fetch(&self, _from_date: i64) -> Result<Value, CycleError> {
            self.0.clone()
        }
    }

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send(&self, _chat_id: &str, text: &str) -> Result<(), TransportError> {
            self.sent.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn bot(source: StaticSource, transport: Arc<RecordingTransport>) -> StatusBot {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        StatusBot::new(Arc::new(source), transport, "42".into(), &config, 1000)
    }

    #[test]
    fn test_fault_message() {
        assert_eq!(
            fault_message(&CycleError::MissingName),
            "Program fault: Missing key homework_name"
        );
    }

    #[tokio::test]
    async fn test_cycle_notifies_status() {
        let transport = Arc::new(RecordingTransport::default());
        let bot = bot(
            StaticSource(Ok(json!({
                "homeworks": [{"status": "rejected", "homework_name": "a.zip"}],
                "current_date": 1
            }))),
            transport.clone(),
        );

        let outcome = bot.run_cycle().await;

        assert!(matches!(outcome, CycleOutcome::Notified { delivered: true, .. }));
        assert_eq!(transport.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_cycle_reports_fault() {
        let transport = Arc::new(RecordingTransport::default());
        let bot = bot(
            StaticSource(Err(CycleError::EndpointUnreachable {
                reason: "503 Service Unavailable".into(),
            })),
            transport.clone(),
        );

        let outcome = bot.run_cycle().await;

        assert!(matches!(outcome, CycleOutcome::Faulted { delivered: true, .. }));
        assert_eq!(
            *transport.sent.lock().unwrap(),
            vec!["Program fault: Endpoint unreachable: 503 Service Unavailable".to_string()]
        );
    }

    #[test]
    fn test_from_config_rejects_missing_credentials() {
        let config = AppConfig::from_lookup(|key| match key {
            "TOKEN_PRACTICUM" => Some("service".into()),
            _ => None,
        })
        .unwrap();

        match StatusBot::from_config(&config) {
            Err(err @ BotError::Fatal(FatalError::MissingCredentials { .. })) => {
                assert!(err.is_fatal());
                assert_eq!(
                    err.to_string(),
                    "Missing credentials: TOKEN_TELEGRAM, TELEGRAM_CHAT_ID"
                );
            }
            Err(other) => panic!("Expected MissingCredentials, got {other:?}"),
            Ok(_) => panic!("Expected MissingCredentials, got a bot"),
        }
    }
}

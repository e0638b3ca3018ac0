use std::time::Duration;

use crate::error::FatalError;

/// Default review-service endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Default Telegram Bot API base URL.
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Default sleep between poll cycles, in seconds.
pub const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;

/// Default timeout for outbound HTTP calls, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// The three secrets the bot needs. Any of them may be absent until validated.
#[derive(Clone, Default)]
pub struct Credentials {
    pub service_token: Option<String>,
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
}

// Tokens never reach the logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mask = |value: &Option<String>| if value.is_some() { "<set>" } else { "<missing>" };
        f.debug_struct("Credentials")
            .field("service_token", &mask(&self.service_token))
            .field("bot_token", &mask(&self.bot_token))
            .field("chat_id", &mask(&self.chat_id))
            .finish()
    }
}

/// Credentials that passed validation.
#[derive(Clone)]
pub struct ValidCredentials {
    pub service_token: String,
    pub bot_token: String,
    pub chat_id: String,
}

impl std::fmt::Debug for ValidCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidCredentials")
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    /// Confirm all three credentials are present and non-empty.
    ///
    /// Logs a fatal record naming every missing variable on failure; the
    /// caller is expected to terminate the process.
    pub fn validate(&self) -> Result<ValidCredentials, FatalError> {
        let fields = [
            ("TOKEN_PRACTICUM", &self.service_token),
            ("TOKEN_TELEGRAM", &self.bot_token),
            ("TELEGRAM_CHAT_ID", &self.chat_id),
        ];

        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            tracing::error!(fatal = true, missing = ?missing, "Required credentials are missing");
            return Err(FatalError::MissingCredentials { missing });
        }

        tracing::debug!("All credentials present");

        Ok(ValidCredentials {
            service_token: self.service_token.clone().unwrap_or_default(),
            bot_token: self.bot_token.clone().unwrap_or_default(),
            chat_id: self.chat_id.clone().unwrap_or_default(),
        })
    }
}

/// Application configuration loaded once from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Service token, bot token and chat id
    pub credentials: Credentials,

    /// Review-service URL polled every cycle
    pub endpoint: String,

    /// Telegram Bot API base URL
    pub telegram_api_url: String,

    /// Fixed sleep between cycles (default: 600s)
    pub retry_period: Duration,

    /// Timeout for the endpoint call and notification sends (default: 30s)
    pub request_timeout: Duration,

    /// Substitute a placeholder record when `homeworks` is empty
    pub inject_placeholder_on_empty: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, FatalError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, FatalError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            credentials: Credentials {
                service_token: non_empty("TOKEN_PRACTICUM"),
                bot_token: non_empty("TOKEN_TELEGRAM"),
                chat_id: non_empty("TELEGRAM_CHAT_ID"),
            },
            endpoint: non_empty("PRACTICUM_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            telegram_api_url: non_empty("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            retry_period: Duration::from_secs(parse_u64(
                "RETRY_PERIOD_SECS",
                non_empty("RETRY_PERIOD_SECS"),
                DEFAULT_RETRY_PERIOD_SECS,
            )?),
            request_timeout: Duration::from_secs(parse_u64(
                "REQUEST_TIMEOUT_SECS",
                non_empty("REQUEST_TIMEOUT_SECS"),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
            inject_placeholder_on_empty: parse_bool(
                "INJECT_PLACEHOLDER_ON_EMPTY",
                non_empty("INJECT_PLACEHOLDER_ON_EMPTY"),
            )?,
        })
    }
}

fn parse_u64(key: &str, raw: Option<String>, default: u64) -> Result<u64, FatalError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| FatalError::Config(format!("{key} must be a valid u64, got {value:?}"))),
    }
}

fn parse_bool(key: &str, raw: Option<String>) -> Result<bool, FatalError> {
    let Some(value) = raw else {
        return Ok(false);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(FatalError::Config(format!(
            "{key} must be a boolean, got {value:?}"
        ))),
    }
}

use thiserror::Error;

/// Errors that stop the process before the polling loop starts.
#[derive(Debug, Error)]
pub enum FatalError {
    #[error("Missing credentials: {}", .missing.join(", "))]
    MissingCredentials { missing: Vec<&'static str> },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

/// Which shape check a review-service response failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseFault {
    #[error("response is not a mapping")]
    NotAMapping,

    #[error("missing key homeworks")]
    MissingHomeworks,

    #[error("homeworks is not a list")]
    HomeworksNotAList,

    #[error("missing key current_date")]
    MissingCurrentDate,

    #[error("current_date is not an integer timestamp")]
    CurrentDateNotAnInteger,

    #[error("homeworks list is empty")]
    EmptyHomeworks,

    #[error("body is not valid JSON: {0}")]
    InvalidJson(String),
}

/// Errors raised inside a single poll cycle.
///
/// None of these stop the loop: they are logged, reported to the chat and
/// the bot sleeps until the next cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CycleError {
    #[error("Endpoint unreachable: {reason}")]
    EndpointUnreachable { reason: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(#[from] ResponseFault),

    #[error("Malformed record: homework is not a mapping")]
    MalformedRecord,

    #[error("Unknown status: {}", describe_status(.status))]
    UnknownStatus { status: Option<String> },

    #[error("Missing key homework_name")]
    MissingName,
}

fn describe_status(status: &Option<String>) -> String {
    match status {
        Some(code) => code.clone(),
        None => "key status is missing".to_string(),
    }
}

/// Top-level error, tagged by whether the process can keep running.
#[derive(Debug, Error)]
pub enum BotError {
    #[error(transparent)]
    Fatal(#[from] FatalError),

    #[error(transparent)]
    Recoverable(#[from] CycleError),
}

impl BotError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, BotError::Fatal(_))
    }
}

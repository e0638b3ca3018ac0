use serde_json::Value;

use verdict_common::error::CycleError;
use verdict_common::types::{HomeworkStatus, VerdictTable};

/// Renders a homework record into the user-facing status message.
#[derive(Debug, Clone, Default)]
pub struct StatusFormatter {
    verdicts: VerdictTable,
}

impl StatusFormatter {
    pub fn new(verdicts: VerdictTable) -> Self {
        Self { verdicts }
    }

    /// Render `Changed review status for "<name>". <verdict>`.
    pub fn format(&self, record: &Value) -> Result<String, CycleError> {
        let record = record.as_object().ok_or(CycleError::MalformedRecord)?;

        let code = match record.get("status") {
            Some(Value::String(code)) => code.as_str(),
            None | Some(Value::Null) => {
                tracing::error!("Homework record has no status");
                return Err(CycleError::UnknownStatus { status: None });
            }
            Some(other) => {
                tracing::error!(status = %other, "Unknown homework status");
                return Err(CycleError::UnknownStatus {
                    status: Some(other.to_string()),
                });
            }
        };

        let status = HomeworkStatus::from_code(code).ok_or_else(|| {
            tracing::error!(status = code, "Unknown homework status");
            CycleError::UnknownStatus {
                status: Some(code.to_string()),
            }
        })?;

        let verdict = self.verdicts.verdict(status);
        if !self.verdicts.contains(verdict) {
            tracing::error!(%status, "Verdict missing from table");
            return Err(CycleError::UnknownStatus {
                status: Some(code.to_string()),
            });
        }

        let name = match record.get("homework_name") {
            Some(Value::String(name)) => name.clone(),
            Some(Value::Null) | None => return Err(CycleError::MissingName),
            Some(other) => other.to_string(),
        };

        Ok(format!("Changed review status for \"{name}\". {verdict}"))
    }
}

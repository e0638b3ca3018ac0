//! Response shape checks.
//!
//! A review-service response must be a mapping with a `homeworks` list and an
//! integer `current_date`. Checks run in order and stop at the first failure, so
//! the error names exactly which part of the shape broke.

use serde_json::Value;

use verdict_common::error::ResponseFault;
use verdict_common::types::placeholder_record;

/// Validates responses and extracts the most recent homework record.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseValidator {
    inject_placeholder_on_empty: bool,
}

impl ResponseValidator {
    pub fn new(inject_placeholder_on_empty: bool) -> Self {
        Self {
            inject_placeholder_on_empty,
        }
    }

    /// Return the first (most recent) homework record of a response.
    ///
    /// An empty list either fails with [`ResponseFault::EmptyHomeworks`] or
    /// yields [`placeholder_record`], depending on how the validator was built.
    pub fn validate(&self, response: &Value) -> Result<Value, ResponseFault> {
        let root = response.as_object().ok_or(ResponseFault::NotAMapping)?;

        let homeworks = match root.get("homeworks") {
            None | Some(Value::Null) => return Err(ResponseFault::MissingHomeworks),
            Some(value) => value.as_array().ok_or(ResponseFault::HomeworksNotAList)?,
        };

        match root.get("current_date") {
            None | Some(Value::Null) => return Err(ResponseFault::MissingCurrentDate),
            Some(value) if value.as_i64().is_none() => {
                return Err(ResponseFault::CurrentDateNotAnInteger);
            }
            Some(_) => {}
        }

        match homeworks.first() {
            Some(latest) => {
                tracing::debug!(count = homeworks.len(), "Response validated");
                Ok(latest.clone())
            }
            None if self.inject_placeholder_on_empty => {
                tracing::debug!("No homeworks in response, using placeholder record");
                Ok(placeholder_record())
            }
            None => Err(ResponseFault::EmptyHomeworks),
        }
    }
}

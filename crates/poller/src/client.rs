use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use verdict_common::error::{CycleError, FatalError, ResponseFault};

/// Source of raw homework-status responses.
#[async_trait]
pub trait HomeworkSource: Send + Sync {
    /// Fetch statuses changed since `from_date` (Unix seconds). The body is
    /// returned unvalidated.
    async fn fetch(&self, from_date: i64) -> Result<Value, CycleError>;
}

/// HTTP client for the review service.
pub struct EndpointClient {
    client: reqwest::Client,
    endpoint: String,
    service_token: String,
}

impl EndpointClient {
    pub fn new(
        endpoint: impl Into<String>,
        service_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FatalError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FatalError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            service_token: service_token.into(),
        })
    }
}

#[async_trait]
impl HomeworkSource for EndpointClient {
    async fn fetch(&self, from_date: i64) -> Result<Value, CycleError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.service_token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| {
                let reason = if e.is_timeout() {
                    format!("request timed out: {e}")
                } else {
                    format!("request failed: {e}")
                };
                tracing::error!(endpoint = %self.endpoint, %reason, "Endpoint is not reachable");
                CycleError::EndpointUnreachable { reason }
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let reason = format!(
                "{} returned {} {}",
                self.endpoint,
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            );
            tracing::error!(status = status.as_u16(), %reason, "Endpoint is not reachable");
            return Err(CycleError::EndpointUnreachable { reason });
        }

        let body = response.text().await.map_err(|e| CycleError::EndpointUnreachable {
            reason: format!("failed to read body: {e}"),
        })?;

        serde_json::from_str(&body)
            .map_err(|e| CycleError::MalformedResponse(ResponseFault::InvalidJson(e.to_string())))
    }
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client,
    header::{ACCEPT, CONTENT_TYPE},
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::ticket::SanitizedTicket;
use crate::error::SubmitError;
use crate::services::{IntakeReceipt, IntakeService};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Posts tickets as JSON to a webhook-style intake endpoint.
pub struct WebhookClient {
    http: Client,
    endpoint_url: Option<String>,
}

impl WebhookClient {
    pub fn new(endpoint_url: Option<String>, timeout: Duration) -> Self {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { http, endpoint_url }
    }

    fn endpoint(&self) -> Result<&str, SubmitError> {
        self.endpoint_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| SubmitError::Unexpected("intake endpoint URL not configured".to_string()))
    }
}

#[async_trait]
impl IntakeService for WebhookClient {
    async fn submit_ticket(&self, ticket: &SanitizedTicket) -> Result<IntakeReceipt, SubmitError> {
        let endpoint = self.endpoint()?;
        debug!(endpoint, "posting ticket to intake endpoint");

        let response = self
            .http
            .post(endpoint)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(ticket)
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "intake request failed");
                SubmitError::Transport(err.to_string())
            })?;

        let status = response.status();
        debug!(status = status.as_u16(), "intake endpoint responded");
        if status.is_success() {
            return Ok(IntakeReceipt {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unable to read response>".to_string());
        warn!(status = status.as_u16(), body = %body, "intake endpoint rejected ticket");
        Err(SubmitError::Rejected {
            status: status.as_u16(),
            server_message: server_message(&body),
            body,
        })
    }
}

/// Pulls a non-empty string `message` field out of a JSON error body.
fn server_message(body: &str) -> Option<String> {
    let payload: Value = serde_json::from_str(body).ok()?;
    payload
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

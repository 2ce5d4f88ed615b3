//! Webhook client for the external resume-analysis automations.
//!
//! Both webhooks are opaque: they take JSON, return JSON, and nothing here
//! interprets the analysis itself. Only the structure response is reshaped,
//! by `builder::map_structured_resume`.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

#[cfg(test)]
pub(crate) mod stub;

const MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook responded with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("webhook unavailable after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

/// Body sent to the analysis webhook.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzePayload<'a> {
    pub resume_text: &'a str,
    pub jd_text: &'a str,
}

/// Body sent to the structuring webhook.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructurePayload<'a> {
    pub resume_text: &'a str,
}

#[derive(Clone)]
pub struct WebhookClient {
    client: Client,
    analyze_url: String,
    structure_url: String,
}

impl WebhookClient {
    pub fn new(
        analyze_url: String,
        structure_url: String,
        timeout: Duration,
    ) -> Result<Self, WebhookError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            analyze_url,
            structure_url,
        })
    }

    /// Match score, missing keywords and feedback for a resume against a JD.
    pub async fn analyze(&self, resume_text: &str, jd_text: &str) -> Result<Value, WebhookError> {
        self.post_json(
            &self.analyze_url,
            &AnalyzePayload {
                resume_text,
                jd_text,
            },
        )
        .await
    }

    /// Structured resume (personal info, experience, education, ...) for raw text.
    pub async fn structure(&self, resume_text: &str) -> Result<Value, WebhookError> {
        self.post_json(&self.structure_url, &StructurePayload { resume_text })
            .await
    }

    /// POSTs `body` and parses the JSON reply.
    /// Connection failures, 429 and 5xx are retried with exponential backoff.
    async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Value, WebhookError> {
        let mut last_error: Option<WebhookError> = None;

        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                // 1s, 2s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Webhook attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.post(url).json(body).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(WebhookError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let message = response.text().await.unwrap_or_default();
                warn!("Webhook returned {}", status);
                last_error = Some(WebhookError::Status {
                    status: status.as_u16(),
                    message,
                });
                continue;
            }

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(WebhookError::Status {
                    status: status.as_u16(),
                    message,
                });
            }

            let value: Value = response.json().await?;
            debug!(status = status.as_u16(), "Webhook call succeeded");
            return Ok(value);
        }

        Err(last_error.unwrap_or(WebhookError::Exhausted {
            attempts: MAX_ATTEMPTS,
        }))
    }
}

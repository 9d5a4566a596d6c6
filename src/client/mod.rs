//! HTTP clients used by the lead capture flow.
//!
//! [`ResendClient`] is a synchronous client for the Resend email API that can be
//! used from async contexts through [`AsyncResendClient`]. [`LeadApiClient`]
//! lets a form controller reach the submission endpoints over HTTP.

mod async_wrapper;
mod gateway;

pub use async_wrapper::{AsyncResendClient, EmailSender};
pub use gateway::{LeadApiClient, LeadGateway};

use crate::config::Config;
use crate::error::{EmailApiError, EmailApiResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::email::ProviderErrorBody;
use crate::models::{EmailRequest, SendAcknowledgment};
use std::sync::Arc;
use std::time::Duration;

/// HTTP client for the Resend transactional email API.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct ResendClient {
    /// Base URL for the Resend API
    base_url: String,

    /// API key for authentication
    api_key: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl ResendClient {
    /// Create a new ResendClient from configuration.
    pub fn new(config: &Config, metrics: Metrics) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.resend_api_url.clone(),
            api_key: config.resend_api_key.clone(),
            agent: Arc::new(agent),
            metrics,
        }
    }

    /// Create a ResendClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            api_key,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Execute a POST request with authentication and JSON body.
    fn post(&self, path: &str, body: &serde_json::Value) -> Result<ureq::Response, EmailApiError> {
        let timer = HttpTimer::new(self.metrics.clone());
        let url = self.build_url(path);

        tracing::debug!("POST {}", url);

        let result = self
            .agent
            .post(&url)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(|e| self.map_error(e));

        match &result {
            Ok(response) => {
                tracing::debug!("POST {} - Success (status: {})", url, response.status());
                timer.complete();
            }
            Err(e) => {
                tracing::warn!("POST {} - Error: {}", url, e);
                timer.complete_with_error();
            }
        }

        result
    }

    /// Map a ureq error to an EmailApiError.
    fn map_error(&self, error: ureq::Error) -> EmailApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let body = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                // Resend answers `{ statusCode, name, message }`; fall back to the raw body.
                let message = serde_json::from_str::<ProviderErrorBody>(&body)
                    .ok()
                    .and_then(|parsed| match (parsed.name, parsed.message) {
                        (Some(name), Some(message)) => Some(format!("{}: {}", name, message)),
                        (None, Some(message)) => Some(message),
                        (Some(name), None) => Some(name),
                        (None, None) => None,
                    })
                    .unwrap_or(body);

                match code {
                    401 | 403 => EmailApiError::Unauthorized,
                    400 | 422 => EmailApiError::InvalidRequest(message),
                    429 => EmailApiError::RateLimitExceeded,
                    _ => EmailApiError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    EmailApiError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    EmailApiError::Timeout
                } else {
                    EmailApiError::HttpError(transport.to_string())
                }
            }
        }
    }

    /// Send one email. No retry is attempted.
    pub fn send_email(&self, request: &EmailRequest) -> EmailApiResult<SendAcknowledgment> {
        let body = serde_json::to_value(request).map_err(EmailApiError::JsonError)?;

        let response = self.post("/emails", &body)?;
        let response_body = response
            .into_string()
            .map_err(|e| EmailApiError::HttpError(e.to_string()))?;

        let ack: SendAcknowledgment =
            serde_json::from_str(&response_body).map_err(EmailApiError::JsonError)?;
        Ok(ack)
    }
}

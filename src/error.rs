//! Error types for the lead capture service.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::ValidationError;
use thiserror::Error;

/// User-facing message when the email provider refuses a send.
pub const DISPATCH_FAILED_MESSAGE: &str =
    "Erreur lors de l'envoi de l'email. Veuillez réessayer plus tard.";

/// User-facing message for any other fault.
pub const UNEXPECTED_ERROR_MESSAGE: &str =
    "Une erreur inattendue s'est produite. Veuillez réessayer plus tard.";

/// Errors that can occur when interacting with the Resend email API.
#[derive(Error, Debug)]
pub enum EmailApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// The provider rejected the message payload
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl EmailApiError {
    /// Whether the provider answered and explicitly refused the send.
    ///
    /// Transport faults, timeouts and unparseable responses are not rejections.
    pub fn is_provider_rejection(&self) -> bool {
        matches!(
            self,
            Self::ApiError { .. }
                | Self::Unauthorized
                | Self::RateLimitExceeded
                | Self::InvalidRequest(_)
        )
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Outcome of a rejected or failed submission.
///
/// The handler maps every failure onto one of these variants; nothing else
/// crosses its boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// The payload broke a field constraint
    #[error("{0}")]
    Validation(ValidationError),

    /// The email provider refused the send
    #[error("{}", DISPATCH_FAILED_MESSAGE)]
    Dispatch,

    /// Network, parsing or runtime fault
    #[error("{}", UNEXPECTED_ERROR_MESSAGE)]
    Unexpected,
}

impl From<ValidationError> for SubmissionError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

/// Transport fault between a form controller and the submission endpoint.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Connection or I/O failure
    #[error("Gateway request failed: {0}")]
    Transport(String),

    /// The endpoint answered with something other than a submission result
    #[error("Malformed gateway response: {0}")]
    MalformedResponse(String),
}

/// Convenience type alias for Results with EmailApiError
pub type EmailApiResult<T> = Result<T, EmailApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with GatewayError
pub type GatewayResult<T> = Result<T, GatewayError>;

//! Wire result of a submission.

use crate::error::SubmissionError;
use serde::{Deserialize, Serialize};

/// `{ "success": bool, "error"?: string }`, returned for every submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmissionResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

impl From<Result<(), SubmissionError>> for SubmissionResponse {
    fn from(result: Result<(), SubmissionError>) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(err) => Self::failure(err.to_string()),
        }
    }
}

//! Outbound email request and provider acknowledgment.

use serde::{Deserialize, Serialize};

/// A plain-text email, as accepted by the Resend `/emails` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailRequest {
    /// Sender identity, e.g. `No reply <no-reply@cool2scan.com>`
    pub from: String,

    /// Recipient addresses
    pub to: Vec<String>,

    pub subject: String,

    /// Plain-text body
    pub text: String,
}

/// Provider response for an accepted send.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SendAcknowledgment {
    /// Provider-assigned message id
    pub id: String,
}

/// Error body returned by the provider on a refused send.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ProviderErrorBody {
    pub name: Option<String>,
    pub message: Option<String>,
}

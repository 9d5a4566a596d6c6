//! Data models for lead submissions and their side effects.
//!
//! This module contains the two submission payloads accepted from the website,
//! the wire result returned to it, and the request sent to the email provider.

pub mod contact;
pub mod demo_request;
pub mod email;
pub mod response;

pub use contact::ContactSubmission;
pub use demo_request::DemoRequestSubmission;
pub use email::{EmailRequest, SendAcknowledgment};
pub use response::SubmissionResponse;

use crate::client::LeadGateway;
use crate::error::GatewayResult;
use crate::validation::{Field, FieldSource};
use futures::future::BoxFuture;
use serde::Deserialize;

/// Which of the two website forms a submission came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Contact,
    DemoRequest,
}

impl FormKind {
    /// Short name used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::DemoRequest => "demo_request",
        }
    }

    /// Title of the confirmation shown after a successful submission.
    pub fn success_title(self) -> &'static str {
        match self {
            Self::Contact => "Message envoyé avec succès !",
            Self::DemoRequest => "Demande envoyée avec succès !",
        }
    }

    /// Body of the confirmation shown after a successful submission.
    pub fn success_description(self) -> &'static str {
        match self {
            Self::Contact => "Nous vous répondrons dans les plus brefs délais.",
            Self::DemoRequest => "Nous vous contacterons dans les plus brefs délais.",
        }
    }
}

/// Subject line and plain-text body of an operator notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub body: String,
}

/// A lead form: its values, its constraint table, how it is announced to
/// operators and how it travels through a [`LeadGateway`].
pub trait LeadForm: FieldSource + Clone + Default + Send + Sync + 'static {
    const KIND: FormKind;

    /// Store a value. Returns `false` when the field is not part of this form.
    fn set_value(&mut self, field: Field, value: String) -> bool;

    /// Compose the operator notification. Only meaningful for validated values.
    fn notification(&self) -> Notification;

    /// Submit through the gateway endpoint matching this form.
    fn submit_via<'a>(
        &'a self,
        gateway: &'a dyn LeadGateway,
    ) -> BoxFuture<'a, GatewayResult<SubmissionResponse>>;
}

/// Treat an explicit JSON `null` like a missing key.
fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Normalise an optional text field: blank strings count as absent.
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

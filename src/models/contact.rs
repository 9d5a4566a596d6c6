//! Contact form submission.

use super::{
    deserialize_nullable_string, non_blank, FormKind, LeadForm, Notification, SubmissionResponse,
};
use crate::client::LeadGateway;
use crate::domain::ContactSubject;
use crate::error::GatewayResult;
use crate::validation::{Constraint, Field, FieldRule, FieldSource, Presence};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

/// A message sent through the general contact form.
///
/// Missing keys deserialize to empty values so that an incomplete payload is
/// reported as a validation failure rather than a parse error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSubmission {
    #[serde(rename = "nom", deserialize_with = "deserialize_nullable_string")]
    pub last_name: String,

    #[serde(rename = "prenom", deserialize_with = "deserialize_nullable_string")]
    pub first_name: String,

    #[serde(rename = "telephone", deserialize_with = "deserialize_nullable_string")]
    pub phone: String,

    #[serde(deserialize_with = "deserialize_nullable_string")]
    pub email: String,

    /// Subject code, see [`ContactSubject`]
    #[serde(rename = "sujet", deserialize_with = "deserialize_nullable_string")]
    pub subject: String,

    /// Free-text subject, only read when `subject` is `autre`
    #[serde(rename = "sujetPersonnalise", skip_serializing_if = "Option::is_none")]
    pub custom_subject: Option<String>,

    #[serde(deserialize_with = "deserialize_nullable_string")]
    pub message: String,
}

impl ContactSubmission {
    /// Minimum length of the free-text subject when `autre` is selected.
    pub const CUSTOM_SUBJECT_MIN_CHARS: usize = 3;

    /// Minimum length of the message body.
    pub const MESSAGE_MIN_CHARS: usize = 10;

    /// Label of the selected subject, honouring the custom subject.
    pub fn subject_label(&self) -> String {
        ContactSubject::resolve_label(&self.subject, non_blank(&self.custom_subject))
    }
}

impl FieldSource for ContactSubmission {
    const RULES: &'static [FieldRule] = &[
        FieldRule {
            field: Field::LastName,
            presence: Presence::Required,
            constraints: &[],
        },
        FieldRule {
            field: Field::FirstName,
            presence: Presence::Required,
            constraints: &[],
        },
        FieldRule {
            field: Field::Phone,
            presence: Presence::Required,
            constraints: &[Constraint::Phone],
        },
        FieldRule {
            field: Field::Email,
            presence: Presence::Required,
            constraints: &[Constraint::Email],
        },
        FieldRule {
            field: Field::Subject,
            presence: Presence::Required,
            constraints: &[],
        },
        FieldRule {
            field: Field::CustomSubject,
            presence: Presence::Optional,
            constraints: &[Constraint::RequiredWhen {
                field: Field::Subject,
                equals: "autre",
                min_chars: ContactSubmission::CUSTOM_SUBJECT_MIN_CHARS,
            }],
        },
        FieldRule {
            field: Field::Message,
            presence: Presence::Required,
            constraints: &[Constraint::MinChars(ContactSubmission::MESSAGE_MIN_CHARS)],
        },
    ];

    fn value(&self, field: Field) -> &str {
        match field {
            Field::LastName => &self.last_name,
            Field::FirstName => &self.first_name,
            Field::Phone => &self.phone,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::CustomSubject => self.custom_subject.as_deref().unwrap_or(""),
            Field::Message => &self.message,
            Field::Package => "",
        }
    }
}

impl LeadForm for ContactSubmission {
    const KIND: FormKind = FormKind::Contact;

    fn set_value(&mut self, field: Field, value: String) -> bool {
        match field {
            Field::LastName => self.last_name = value,
            Field::FirstName => self.first_name = value,
            Field::Phone => self.phone = value,
            Field::Email => self.email = value,
            Field::Subject => self.subject = value,
            Field::CustomSubject => self.custom_subject = Some(value),
            Field::Message => self.message = value,
            Field::Package => return false,
        }
        true
    }

    fn notification(&self) -> Notification {
        let label = self.subject_label();

        let body = format!(
            "Nouveau message depuis le formulaire de contact DentoBridge\n\
             \n\
             Informations du contact:\n\
             - Nom: {}\n\
             - Prénom: {}\n\
             - Téléphone: {}\n\
             - Email: {}\n\
             - Sujet: {}\n\
             \n\
             Message:\n\
             {}",
            self.last_name.trim(),
            self.first_name.trim(),
            self.phone.trim(),
            self.email,
            label,
            self.message.trim(),
        );

        Notification {
            subject: format!("Contact DentoBridge - {}", label),
            body,
        }
    }

    fn submit_via<'a>(
        &'a self,
        gateway: &'a dyn LeadGateway,
    ) -> BoxFuture<'a, GatewayResult<SubmissionResponse>> {
        gateway.submit_contact(self)
    }
}

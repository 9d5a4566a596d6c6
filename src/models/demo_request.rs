//! Demo request form submission.

use super::{
    deserialize_nullable_string, non_blank, FormKind, LeadForm, Notification, SubmissionResponse,
};
use crate::client::LeadGateway;
use crate::domain::PackageTier;
use crate::error::GatewayResult;
use crate::validation::{Constraint, Field, FieldRule, FieldSource, Presence};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

/// Shown in place of an email address the prospect left out.
const NO_EMAIL_PLACEHOLDER: &str = "Non renseigné";

/// A demo request sent from the pricing section.
///
/// Keys missing from a payload deserialize as empty, including `forfait`.
/// [`Default`] instead preselects a package for a freshly opened form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default = "DemoRequestSubmission::blank")]
pub struct DemoRequestSubmission {
    #[serde(rename = "nom", deserialize_with = "deserialize_nullable_string")]
    pub last_name: String,

    #[serde(rename = "prenom", deserialize_with = "deserialize_nullable_string")]
    pub first_name: String,

    #[serde(rename = "telephone", deserialize_with = "deserialize_nullable_string")]
    pub phone: String,

    /// Optional; an empty string counts as absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Package code, see [`PackageTier`]
    #[serde(rename = "forfait", deserialize_with = "deserialize_nullable_string")]
    pub package: String,
}

impl Default for DemoRequestSubmission {
    fn default() -> Self {
        Self::for_package(PackageTier::default())
    }
}

impl DemoRequestSubmission {
    fn blank() -> Self {
        Self {
            package: String::new(),
            ..Self::default()
        }
    }

    /// Empty form with a preselected package, as opened from a pricing card.
    pub fn for_package(tier: PackageTier) -> Self {
        Self {
            last_name: String::new(),
            first_name: String::new(),
            phone: String::new(),
            email: None,
            package: tier.code().to_string(),
        }
    }

    pub fn package_label(&self) -> &'static str {
        PackageTier::resolve_label(&self.package)
    }
}

impl FieldSource for DemoRequestSubmission {
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
            presence: Presence::Optional,
            constraints: &[Constraint::Email],
        },
        FieldRule {
            field: Field::Package,
            presence: Presence::Required,
            constraints: &[],
        },
    ];

    fn value(&self, field: Field) -> &str {
        match field {
            Field::LastName => &self.last_name,
            Field::FirstName => &self.first_name,
            Field::Phone => &self.phone,
            Field::Email => self.email.as_deref().unwrap_or(""),
            Field::Package => &self.package,
            Field::Subject | Field::CustomSubject | Field::Message => "",
        }
    }
}

impl LeadForm for DemoRequestSubmission {
    const KIND: FormKind = FormKind::DemoRequest;

    fn set_value(&mut self, field: Field, value: String) -> bool {
        match field {
            Field::LastName => self.last_name = value,
            Field::FirstName => self.first_name = value,
            Field::Phone => self.phone = value,
            Field::Email => self.email = Some(value),
            Field::Package => self.package = value,
            Field::Subject | Field::CustomSubject | Field::Message => return false,
        }
        true
    }

    fn notification(&self) -> Notification {
        let label = self.package_label();

        let body = format!(
            "Nouvelle demande de démonstration depuis le site DentoBridge\n\
             \n\
             Informations du prospect:\n\
             - Nom: {}\n\
             - Prénom: {}\n\
             - Téléphone: {}\n\
             - Email: {}\n\
             - Forfait: {}",
            self.last_name.trim(),
            self.first_name.trim(),
            self.phone.trim(),
            non_blank(&self.email).unwrap_or(NO_EMAIL_PLACEHOLDER),
            label,
        );

        Notification {
            subject: format!("Demande de démo DentoBridge - {}", label),
            body,
        }
    }

    fn submit_via<'a>(
        &'a self,
        gateway: &'a dyn LeadGateway,
    ) -> BoxFuture<'a, GatewayResult<SubmissionResponse>> {
        gateway.submit_demo_request(self)
    }
}

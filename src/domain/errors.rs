//! Domain validation errors.

use crate::validation::Field;
use std::fmt;

/// A field constraint that a submission failed.
///
/// The `Display` output is the French message shown next to the field and
/// returned to the caller by the submission handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is absent or blank.
    Missing(Field),

    /// The phone number is not exactly ten digits.
    InvalidPhone,

    /// The email address is syntactically invalid.
    InvalidEmail,

    /// The value is shorter than the minimum length.
    TooShort { field: Field, min: usize },

    /// A conditionally required detail is missing or too short.
    DetailRequired { field: Field, min: usize },
}

impl ValidationError {
    /// The field this error belongs to.
    ///
    /// Syntax errors carry no field of their own; they are always reported
    /// against the field of the same name.
    pub fn field(&self) -> Field {
        match self {
            Self::Missing(field)
            | Self::TooShort { field, .. }
            | Self::DetailRequired { field, .. } => *field,
            Self::InvalidPhone => Field::Phone,
            Self::InvalidEmail => Field::Email,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(field) => match field {
                Field::Subject => write!(f, "Veuillez sélectionner un sujet"),
                Field::Package => write!(f, "Veuillez sélectionner un forfait"),
                Field::Email => write!(f, "L'adresse email est requise"),
                other => write!(f, "{} est requis", other.label()),
            },
            Self::InvalidPhone => write!(
                f,
                "Le numéro de téléphone doit contenir exactement 10 chiffres"
            ),
            Self::InvalidEmail => write!(f, "Adresse email invalide"),
            Self::TooShort { field, min } => {
                write!(f, "{} doit contenir au moins {} caractères", field.label(), min)
            }
            Self::DetailRequired { field, min } => {
                let label = field.label();
                let mut chars = label.chars();
                let lowered: String = chars
                    .next()
                    .map(|first| first.to_lowercase().chain(chars).collect())
                    .unwrap_or_default();
                write!(f, "Veuillez préciser {} (min {} caractères)", lowered, min)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

//! Declarative field constraints shared by the form controller and the
//! submission handler.
//!
//! Each form publishes one static table of [`FieldRule`]s. The controller
//! evaluates single fields as the user types; the handler evaluates the whole
//! table before dispatching. Both read the same table, so the two layers
//! cannot disagree about what a valid lead is.

use crate::domain::{EmailAddress, PhoneNumber, ValidationError};
use std::fmt;

/// Every field a lead form can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    LastName,
    FirstName,
    Phone,
    Email,
    Subject,
    CustomSubject,
    Message,
    Package,
}

impl Field {
    /// JSON key used by the website.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::LastName => "nom",
            Self::FirstName => "prenom",
            Self::Phone => "telephone",
            Self::Email => "email",
            Self::Subject => "sujet",
            Self::CustomSubject => "sujetPersonnalise",
            Self::Message => "message",
            Self::Package => "forfait",
        }
    }

    /// Noun phrase used in validation messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::LastName => "Le nom",
            Self::FirstName => "Le prénom",
            Self::Phone => "Le numéro de téléphone",
            Self::Email => "L'adresse email",
            Self::Subject | Self::CustomSubject => "Le sujet",
            Self::Message => "Le message",
            Self::Package => "Le forfait",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Whether a blank value is an error on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    /// Blank values skip every constraint except conditional ones.
    Optional,
}

/// A single check applied to a non-blank value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// At least this many characters once trimmed.
    MinChars(usize),
    /// Exactly [`PhoneNumber::DIGITS`] ASCII digits.
    Phone,
    /// Basic email syntax, see [`EmailAddress::is_valid`].
    Email,
    /// When `field` holds `equals`, this value needs `min_chars` characters.
    /// Otherwise the value is ignored.
    RequiredWhen {
        field: Field,
        equals: &'static str,
        min_chars: usize,
    },
}

/// Presence and constraints for one field, evaluated in order.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: Field,
    pub presence: Presence,
    pub constraints: &'static [Constraint],
}

/// Read access to the values of a form, plus its rule table.
pub trait FieldSource {
    /// The form's constraint table, in the order errors are reported.
    const RULES: &'static [FieldRule];

    /// Raw value of a field. Absent fields read as the empty string.
    fn value(&self, field: Field) -> &str;
}

impl FieldRule {
    /// First failure for this rule, if any.
    pub fn check<S: FieldSource + ?Sized>(&self, source: &S) -> Option<ValidationError> {
        let raw = source.value(self.field);
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            if self.presence == Presence::Required {
                return Some(ValidationError::Missing(self.field));
            }
            return self
                .constraints
                .iter()
                .filter(|c| matches!(c, Constraint::RequiredWhen { .. }))
                .find_map(|c| c.check(self.field, raw, source).err());
        }

        self.constraints
            .iter()
            .find_map(|c| c.check(self.field, raw, source).err())
    }

    /// Whether this rule reads `other` through a cross-field constraint.
    pub fn depends_on(&self, other: Field) -> bool {
        self.constraints.iter().any(
            |c| matches!(c, Constraint::RequiredWhen { field, .. } if *field == other),
        )
    }
}

impl Constraint {
    fn check<S: FieldSource + ?Sized>(
        &self,
        field: Field,
        raw: &str,
        source: &S,
    ) -> Result<(), ValidationError> {
        match *self {
            Self::MinChars(min) => {
                if raw.trim().chars().count() < min {
                    return Err(ValidationError::TooShort { field, min });
                }
            }
            Self::Phone => {
                if !PhoneNumber::is_valid(raw) {
                    return Err(ValidationError::InvalidPhone);
                }
            }
            Self::Email => {
                if !EmailAddress::is_valid(raw) {
                    return Err(ValidationError::InvalidEmail);
                }
            }
            Self::RequiredWhen {
                field: trigger,
                equals,
                min_chars,
            } => {
                if source.value(trigger).trim() == equals
                    && raw.trim().chars().count() < min_chars
                {
                    return Err(ValidationError::DetailRequired {
                        field,
                        min: min_chars,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Validate one field of a form. Fields outside the form's table always pass.
pub fn validate_field<S: FieldSource + ?Sized>(source: &S, field: Field) -> Option<ValidationError> {
    S::RULES
        .iter()
        .find(|rule| rule.field == field)
        .and_then(|rule| rule.check(source))
}

/// Validate a whole form, collecting at most one error per field in table order.
pub fn validate<S: FieldSource + ?Sized>(source: &S) -> Result<(), Vec<ValidationError>> {
    let errors: Vec<ValidationError> = S::RULES
        .iter()
        .filter_map(|rule| rule.check(source))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a whole form, stopping at the first failing field.
pub fn validate_first<S: FieldSource + ?Sized>(source: &S) -> Result<(), ValidationError> {
    match S::RULES.iter().find_map(|rule| rule.check(source)) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Fields whose rules must be re-checked when `field` changes.
pub fn dependents(rules: &'static [FieldRule], field: Field) -> impl Iterator<Item = Field> {
    rules
        .iter()
        .filter(move |rule| rule.depends_on(field))
        .map(|rule| rule.field)
}

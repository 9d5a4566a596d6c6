//! Headless form controllers for the contact and demo request sheets.
//!
//! A controller owns the field values and field errors of one form, validates
//! against the same constraint table the server uses, and reports what the UI
//! should show through [`FormEvent`]s.

mod controller;

pub use controller::{FormController, SubmitOutcome, SUCCESS_DISPLAY_DURATION};

use crate::models::{ContactSubmission, DemoRequestSubmission};

/// Fallback description when a failed result carries no message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Une erreur s'est produite. Veuillez réessayer.";

/// Title of every failure toast.
pub const FAILURE_TITLE: &str = "Erreur lors de l'envoi";

/// Lifecycle of a form between open and close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Inputs enabled.
    Editing,
    /// A submission is in flight; inputs disabled, busy indicator shown.
    Submitting,
    /// Confirmation shown until the form resets.
    Succeeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

/// A transient notification for the host UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub title: String,
    pub description: String,
}

/// Something the host UI has to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Toast(Toast),
    /// The sheet hosting the form should close.
    Close,
}

pub type ContactFormController = FormController<ContactSubmission>;
pub type DemoRequestFormController = FormController<DemoRequestSubmission>;

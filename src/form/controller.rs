//! Generic form controller shared by both lead forms.

use super::{FormEvent, FormPhase, Toast, ToastLevel, FAILURE_TITLE, GENERIC_FAILURE_MESSAGE};
use crate::client::LeadGateway;
use crate::domain::ValidationError;
use crate::error::UNEXPECTED_ERROR_MESSAGE;
use crate::models::LeadForm;
use crate::validation::{self, Field};
use futures::FutureExt;
use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::Mutex;

/// How long the confirmation stays up before the form resets and closes.
pub const SUCCESS_DISPLAY_DURATION: Duration = Duration::from_secs(2);

/// Result of [`FormController::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Client-side validation failed; nothing was sent.
    Invalid(Vec<ValidationError>),
    /// A submission is already in flight or being confirmed.
    Busy,
    /// Accepted; the form has been reset and closed.
    Sent,
    /// Rejected or failed; values are kept for another attempt.
    Failed(String),
}

struct FormState<F> {
    values: F,
    errors: BTreeMap<Field, ValidationError>,
    phase: FormPhase,
    /// Bumped on every close so a pending success timer knows it is stale.
    epoch: u64,
}

/// Field state, validation and submission for one lead form.
///
/// Clones share the same state, so the host can call [`close`](Self::close)
/// from another task while [`submit`](Self::submit) is awaiting the gateway.
#[derive(Clone)]
pub struct FormController<F: LeadForm> {
    state: Arc<Mutex<FormState<F>>>,
    defaults: Arc<F>,
    gateway: Arc<dyn LeadGateway>,
    events: UnboundedSender<FormEvent>,
    display_duration: Duration,
}

impl<F: LeadForm> FormController<F> {
    pub fn new(gateway: Arc<dyn LeadGateway>, events: UnboundedSender<FormEvent>) -> Self {
        Self::with_defaults(F::default(), gateway, events)
    }

    /// Start from, and reset to, the given values.
    pub fn with_defaults(
        defaults: F,
        gateway: Arc<dyn LeadGateway>,
        events: UnboundedSender<FormEvent>,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(FormState {
                values: defaults.clone(),
                errors: BTreeMap::new(),
                phase: FormPhase::Editing,
                epoch: 0,
            })),
            defaults: Arc::new(defaults),
            gateway,
            events,
            display_duration: SUCCESS_DISPLAY_DURATION,
        }
    }

    pub fn with_display_duration(mut self, duration: Duration) -> Self {
        self.display_duration = duration;
        self
    }

    pub async fn values(&self) -> F {
        self.state.lock().await.values.clone()
    }

    pub async fn errors(&self) -> BTreeMap<Field, ValidationError> {
        self.state.lock().await.errors.clone()
    }

    pub async fn error(&self, field: Field) -> Option<ValidationError> {
        self.state.lock().await.errors.get(&field).cloned()
    }

    pub async fn phase(&self) -> FormPhase {
        self.state.lock().await.phase
    }

    pub async fn is_submitting(&self) -> bool {
        self.phase().await == FormPhase::Submitting
    }

    /// Update one field and re-validate it along with the fields that depend on it.
    ///
    /// Ignored unless the form is editable. Returns the field's current error.
    pub async fn set_field(&self, field: Field, value: impl Into<String>) -> Option<ValidationError> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;

        if state.phase != FormPhase::Editing || !state.values.set_value(field, value.into()) {
            return state.errors.get(&field).cloned();
        }

        let affected = std::iter::once(field).chain(validation::dependents(F::RULES, field));
        for target in affected {
            match validation::validate_field(&state.values, target) {
                Some(err) => {
                    state.errors.insert(target, err);
                }
                None => {
                    state.errors.remove(&target);
                }
            }
        }

        state.errors.get(&field).cloned()
    }

    /// Validate and submit the form.
    pub async fn submit(&self) -> SubmitOutcome {
        let form = F::KIND.as_str();

        let snapshot = {
            let mut state = self.state.lock().await;
            if state.phase != FormPhase::Editing {
                return SubmitOutcome::Busy;
            }
            if let Err(errors) = validation::validate(&state.values) {
                state.errors = errors.iter().map(|e| (e.field(), e.clone())).collect();
                return SubmitOutcome::Invalid(errors);
            }
            state.errors.clear();
            state.phase = FormPhase::Submitting;
            state.values.clone()
        };

        tracing::debug!(form, "Submitting lead");
        let result = AssertUnwindSafe(snapshot.submit_via(self.gateway.as_ref()))
            .catch_unwind()
            .await;

        match result {
            Ok(Ok(response)) if response.success => self.finish_success().await,
            Ok(Ok(response)) => {
                let message = response
                    .error
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
                self.finish_failure(message).await
            }
            Ok(Err(err)) => {
                tracing::warn!(form, error = %err, "Lead submission did not reach the server");
                self.finish_failure(UNEXPECTED_ERROR_MESSAGE.to_string())
                    .await
            }
            Err(_) => {
                tracing::error!(form, "Lead gateway panicked");
                self.finish_failure(UNEXPECTED_ERROR_MESSAGE.to_string())
                    .await
            }
        }
    }

    /// Close the form. Refused while a submission is in flight.
    pub async fn close(&self) -> bool {
        {
            let mut state = self.state.lock().await;
            if state.phase == FormPhase::Submitting {
                return false;
            }
            state.values = (*self.defaults).clone();
            state.errors.clear();
            state.phase = FormPhase::Editing;
            state.epoch += 1;
        }
        self.emit(FormEvent::Close);
        true
    }

    async fn finish_success(&self) -> SubmitOutcome {
        let epoch = {
            let mut state = self.state.lock().await;
            state.phase = FormPhase::Succeeded;
            state.epoch
        };

        self.emit(FormEvent::Toast(Toast {
            level: ToastLevel::Success,
            title: F::KIND.success_title().to_string(),
            description: F::KIND.success_description().to_string(),
        }));

        tokio::time::sleep(self.display_duration).await;

        let still_open = {
            let mut state = self.state.lock().await;
            if state.epoch == epoch {
                state.values = (*self.defaults).clone();
                state.errors.clear();
                state.phase = FormPhase::Editing;
                true
            } else {
                false
            }
        };
        if still_open {
            self.emit(FormEvent::Close);
        }

        SubmitOutcome::Sent
    }

    async fn finish_failure(&self, message: String) -> SubmitOutcome {
        self.state.lock().await.phase = FormPhase::Editing;

        self.emit(FormEvent::Toast(Toast {
            level: ToastLevel::Error,
            title: FAILURE_TITLE.to_string(),
            description: message.clone(),
        }));

        SubmitOutcome::Failed(message)
    }

    fn emit(&self, event: FormEvent) {
        if self.events.send(event).is_err() {
            tracing::trace!("Form event receiver dropped");
        }
    }
}

//! Lead submission service.
//!
//! Authoritative validation and notification dispatch for both website forms.

use crate::client::{EmailSender, LeadGateway};
use crate::config::MailSettings;
use crate::error::{GatewayResult, SubmissionError};
use crate::metrics::{LeadOutcome, Metrics};
use crate::models::{
    ContactSubmission, DemoRequestSubmission, EmailRequest, LeadForm, SubmissionResponse,
};
use crate::validation;
use async_trait::async_trait;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// Re-validates submissions and sends one operator notification per valid lead.
///
/// Client-side validation is a convenience; this service checks every
/// constraint again before anything is sent.
#[derive(Clone)]
pub struct LeadService {
    sender: Arc<dyn EmailSender>,
    mail: MailSettings,
    metrics: Metrics,
}

impl LeadService {
    pub fn new(sender: Arc<dyn EmailSender>, mail: MailSettings, metrics: Metrics) -> Self {
        Self {
            sender,
            mail,
            metrics,
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub async fn handle_contact(
        &self,
        submission: &ContactSubmission,
    ) -> Result<(), SubmissionError> {
        self.handle(submission).await
    }

    pub async fn handle_demo_request(
        &self,
        submission: &DemoRequestSubmission,
    ) -> Result<(), SubmissionError> {
        self.handle(submission).await
    }

    /// Validate, compose and dispatch. Every path returns a structured result.
    pub async fn handle<F: LeadForm>(&self, submission: &F) -> Result<(), SubmissionError> {
        let form = F::KIND.as_str();
        self.metrics.record_received(F::KIND);

        if let Err(err) = validation::validate_first(submission) {
            self.metrics.record_outcome(F::KIND, LeadOutcome::Rejected);
            tracing::debug!(form, field = %err.field(), reason = %err, "Submission rejected");
            return Err(SubmissionError::Validation(err));
        }

        let notification = submission.notification();
        let request = EmailRequest {
            from: self.mail.from.clone(),
            to: self
                .mail
                .to
                .iter()
                .map(ToString::to_string)
                .collect(),
            subject: notification.subject,
            text: notification.body,
        };

        // A panicking sender must not take the request down with it.
        let outcome = AssertUnwindSafe(self.sender.send(&request))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(ack)) => {
                self.metrics.record_outcome(F::KIND, LeadOutcome::Sent);
                tracing::info!(form, email_id = %ack.id, subject = %request.subject, "Lead notification sent");
                Ok(())
            }
            Ok(Err(err)) if err.is_provider_rejection() => {
                self.metrics.record_outcome(F::KIND, LeadOutcome::DispatchFailed);
                tracing::error!(form, error = %err, "Email provider refused lead notification");
                Err(SubmissionError::Dispatch)
            }
            Ok(Err(err)) => {
                self.metrics.record_outcome(F::KIND, LeadOutcome::Failed);
                tracing::error!(form, error = %err, "Error sending lead notification");
                Err(SubmissionError::Unexpected)
            }
            Err(_) => {
                self.metrics.record_outcome(F::KIND, LeadOutcome::Failed);
                tracing::error!(form, "Email sender panicked");
                Err(SubmissionError::Unexpected)
            }
        }
    }
}

#[async_trait]
impl LeadGateway for LeadService {
    async fn submit_contact(
        &self,
        submission: &ContactSubmission,
    ) -> GatewayResult<SubmissionResponse> {
        Ok(self.handle_contact(submission).await.into())
    }

    async fn submit_demo_request(
        &self,
        submission: &DemoRequestSubmission,
    ) -> GatewayResult<SubmissionResponse> {
        Ok(self.handle_demo_request(submission).await.into())
    }
}

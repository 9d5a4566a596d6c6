//! The seam a form controller submits through.

use crate::error::{GatewayError, GatewayResult};
use crate::models::{ContactSubmission, DemoRequestSubmission, SubmissionResponse};
use crate::server::{CONTACT_PATH, DEMO_REQUEST_PATH};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Where lead submissions go.
///
/// `Ok` carries the handler's structured result, successful or not. `Err` is
/// reserved for faults that kept the result from arriving at all.
#[async_trait]
pub trait LeadGateway: Send + Sync {
    async fn submit_contact(
        &self,
        submission: &ContactSubmission,
    ) -> GatewayResult<SubmissionResponse>;

    async fn submit_demo_request(
        &self,
        submission: &DemoRequestSubmission,
    ) -> GatewayResult<SubmissionResponse>;
}

/// Submits leads to a running lead capture server.
#[derive(Clone)]
pub struct LeadApiClient {
    base_url: String,
    agent: Arc<ureq::Agent>,
}

impl LeadApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            base_url: base_url.into(),
            agent: Arc::new(agent),
        }
    }

    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// POST a payload and decode the submission result.
    ///
    /// Error statuses still carry a `{ success, error }` body, so they are
    /// decoded like successes.
    fn post<T: Serialize>(&self, path: &str, payload: &T) -> GatewayResult<SubmissionResponse> {
        let url = self.build_url(path);

        let response = match self.agent.post(&url).send_json(payload) {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                tracing::debug!("POST {} - status {}", url, code);
                response
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(GatewayError::Transport(transport.to_string()));
            }
        };

        response
            .into_json::<SubmissionResponse>()
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))
    }

    async fn post_blocking<T>(&self, path: &'static str, payload: T) -> GatewayResult<SubmissionResponse>
    where
        T: Serialize + Send + 'static,
    {
        let client = self.clone();
        tokio::task::spawn_blocking(move || client.post(path, &payload))
            .await
            .map_err(|e| GatewayError::Transport(format!("Task join error: {}", e)))?
    }
}

#[async_trait]
impl LeadGateway for LeadApiClient {
    async fn submit_contact(
        &self,
        submission: &ContactSubmission,
    ) -> GatewayResult<SubmissionResponse> {
        self.post_blocking(CONTACT_PATH, submission.clone()).await
    }

    async fn submit_demo_request(
        &self,
        submission: &DemoRequestSubmission,
    ) -> GatewayResult<SubmissionResponse> {
        self.post_blocking(DEMO_REQUEST_PATH, submission.clone()).await
    }
}

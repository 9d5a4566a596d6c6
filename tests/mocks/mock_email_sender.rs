use async_trait::async_trait;
use dentobridge_leads::error::{EmailApiError, EmailApiResult};
use dentobridge_leads::models::{EmailRequest, SendAcknowledgment};
use dentobridge_leads::EmailSender;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the mock does when asked to send.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum SendBehavior {
    Accept,
    /// Provider answered with an error status
    Reject { status: u16, message: String },
    /// Network-level failure
    Timeout,
    Panic,
}

/// Mock email sender for testing.
///
/// Records every request it receives so tests can assert on dispatch counts
/// and content.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockEmailSender {
    behavior: Arc<Mutex<SendBehavior>>,
    sent: Arc<Mutex<Vec<EmailRequest>>>,
    delay: Option<Duration>,
}

#[allow(dead_code)]
impl MockEmailSender {
    pub fn new() -> Self {
        Self::with_behavior(SendBehavior::Accept)
    }

    pub fn with_behavior(behavior: SendBehavior) -> Self {
        Self {
            behavior: Arc::new(Mutex::new(behavior)),
            sent: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    pub fn rejecting(status: u16, message: &str) -> Self {
        Self::with_behavior(SendBehavior::Reject {
            status,
            message: message.to_string(),
        })
    }

    /// Sleep before answering, to observe in-flight state.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_behavior(&self, behavior: SendBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn sent(&self) -> Vec<EmailRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Default for MockEmailSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn send(&self, request: &EmailRequest) -> EmailApiResult<SendAcknowledgment> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let behavior = self.behavior.lock().unwrap().clone();
        self.sent.lock().unwrap().push(request.clone());

        match behavior {
            SendBehavior::Accept => Ok(SendAcknowledgment {
                id: format!("email_{}", self.sent_count()),
            }),
            SendBehavior::Reject { status, message } => {
                Err(EmailApiError::ApiError { status, message })
            }
            SendBehavior::Timeout => Err(EmailApiError::Timeout),
            SendBehavior::Panic => panic!("mock sender exploded"),
        }
    }
}

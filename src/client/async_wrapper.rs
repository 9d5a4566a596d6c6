//! Async wrapper around the synchronous ResendClient.
//!
//! This module provides an async interface to the synchronous ResendClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::client::ResendClient;
use crate::error::{EmailApiError, EmailApiResult};
use crate::models::{EmailRequest, SendAcknowledgment};
use async_trait::async_trait;
use std::sync::Arc;

/// The email collaborator: accepts one message, acknowledges or refuses it.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, request: &EmailRequest) -> EmailApiResult<SendAcknowledgment>;
}

/// Async wrapper around synchronous ResendClient.
#[derive(Clone)]
pub struct AsyncResendClient {
    client: Arc<ResendClient>,
}

impl AsyncResendClient {
    pub fn new(client: ResendClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl EmailSender for AsyncResendClient {
    async fn send(&self, request: &EmailRequest) -> EmailApiResult<SendAcknowledgment> {
        let client = self.client.clone();
        let request = request.clone();

        tokio::task::spawn_blocking(move || client.send_email(&request))
            .await
            .map_err(|e| EmailApiError::HttpError(format!("Task join error: {}", e)))?
    }
}

//! DentoBridge lead capture - server side of the website's contact and demo
//! request forms.
//!
//! Submissions are validated against one declarative constraint table, then a
//! plain-text notification is sent to the operators through the Resend email
//! API. Nothing is persisted.
//!
//! # Architecture
//!
//! - **domain**: Value objects (email, phone, subject, package tier) and validation errors
//! - **validation**: Constraint tables shared by the form controller and the handler
//! - **models**: Submission payloads, wire results and email requests
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **client**: Resend HTTP client and the lead gateway seam
//! - **services**: The submission handler
//! - **form**: Headless form controllers driving the website's forms
//! - **server**: axum routes
//! - **metrics**: In-process counters

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod form;
pub mod metrics;
pub mod models;
pub mod server;
pub mod services;
pub mod validation;

pub use client::{AsyncResendClient, EmailSender, LeadApiClient, LeadGateway, ResendClient};
pub use config::{Config, MailSettings};
pub use error::{ConfigError, EmailApiError, GatewayError, SubmissionError};
pub use form::{FormController, FormEvent, FormPhase, SubmitOutcome};
pub use metrics::{FormMetrics, HttpTimer, LeadOutcome, Metrics, MetricsSummary};
pub use models::{
    ContactSubmission, DemoRequestSubmission, EmailRequest, LeadForm, SendAcknowledgment,
    SubmissionResponse,
};
pub use server::AppState;
pub use services::LeadService;

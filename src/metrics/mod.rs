//! Basic metrics instrumentation for provider calls and lead submissions.
//!
//! Outbound HTTP calls are counted and timed globally. Submissions are counted
//! per form, from receipt to their terminal outcome.

use crate::models::FormKind;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How one handled submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadOutcome {
    /// Failed validation; nothing was sent
    Rejected,
    /// Notification accepted by the provider
    Sent,
    /// Provider refused the notification
    DispatchFailed,
    /// Any other fault while sending
    Failed,
}

#[derive(Debug, Default)]
struct FormCounters {
    received: AtomicU64,
    rejected: AtomicU64,
    sent: AtomicU64,
    dispatch_failures: AtomicU64,
    unexpected_failures: AtomicU64,
}

impl FormCounters {
    fn outcome(&self, outcome: LeadOutcome) -> &AtomicU64 {
        match outcome {
            LeadOutcome::Rejected => &self.rejected,
            LeadOutcome::Sent => &self.sent,
            LeadOutcome::DispatchFailed => &self.dispatch_failures,
            LeadOutcome::Failed => &self.unexpected_failures,
        }
    }

    fn snapshot(&self) -> FormMetrics {
        FormMetrics {
            received: self.received.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            sent: self.sent.load(Ordering::Relaxed),
            dispatch_failures: self.dispatch_failures.load(Ordering::Relaxed),
            unexpected_failures: self.unexpected_failures.load(Ordering::Relaxed),
        }
    }
}

/// Submission counts for one form.
///
/// `received` minus the four outcomes is the number still in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FormMetrics {
    pub received: u64,
    pub rejected: u64,
    pub sent: u64,
    pub dispatch_failures: u64,
    pub unexpected_failures: u64,
}

impl std::ops::Add for FormMetrics {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            received: self.received + other.received,
            rejected: self.rejected + other.rejected,
            sent: self.sent + other.sent,
            dispatch_failures: self.dispatch_failures + other.dispatch_failures,
            unexpected_failures: self.unexpected_failures + other.unexpected_failures,
        }
    }
}

/// Metrics collector shared by the email client and the submission handler.
///
/// Cloning is cheap; clones update the same counters.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    /// Total number of HTTP requests made to the email provider
    http_requests_total: Arc<AtomicU64>,

    /// Total number of HTTP errors
    http_errors_total: Arc<AtomicU64>,

    /// Total duration of all HTTP requests in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,

    contact: Arc<FormCounters>,
    demo_request: Arc<FormCounters>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    fn counters(&self, kind: FormKind) -> &FormCounters {
        match kind {
            FormKind::Contact => &self.contact,
            FormKind::DemoRequest => &self.demo_request,
        }
    }

    /// Record an HTTP request with duration.
    pub fn record_http_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record an HTTP error.
    pub fn record_http_error(&self) {
        self.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_received(&self, kind: FormKind) {
        self.counters(kind).received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_outcome(&self, kind: FormKind, outcome: LeadOutcome) {
        self.counters(kind)
            .outcome(outcome)
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    pub fn http_errors_total(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

    pub fn http_duration_total_ms(&self) -> u64 {
        self.http_duration_total_ms.load(Ordering::Relaxed)
    }

    /// Average HTTP request duration in milliseconds, 0 before the first call.
    pub fn http_duration_avg_ms(&self) -> f64 {
        let total = self.http_duration_total_ms();
        let count = self.http_requests_total();
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Counts for one form.
    pub fn form(&self, kind: FormKind) -> FormMetrics {
        self.counters(kind).snapshot()
    }

    /// Counts across both forms.
    pub fn submissions(&self) -> FormMetrics {
        self.contact.snapshot() + self.demo_request.snapshot()
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            contact: self.form(FormKind::Contact),
            demo_request: self.form(FormKind::DemoRequest),
        }
    }
}

/// Point-in-time view served on `/health`.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_avg_ms: f64,
    pub contact: FormMetrics,
    pub demo_request: FormMetrics,
}

/// Helper for timing HTTP requests.
pub struct HttpTimer {
    start: Instant,
    metrics: Metrics,
}

impl HttpTimer {
    /// Start timing an HTTP request.
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Complete the timing and record the duration.
    pub fn complete(self) {
        self.metrics.record_http_request(self.start.elapsed());
    }

    /// Complete the timing and record as an error.
    pub fn complete_with_error(self) {
        self.metrics.record_http_request(self.start.elapsed());
        self.metrics.record_http_error();
    }
}

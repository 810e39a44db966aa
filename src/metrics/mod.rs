//! Basic metrics instrumentation for the submission flow.
//!
//! Provides counters for each flow outcome plus duration tracking for the
//! outbound HTTP request.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector shared by the form controller and the delivery client.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Submit attempts that passed the busy guard
    submissions_total: Arc<AtomicU64>,

    /// Submit attempts dropped because one was already in flight
    ignored_total: Arc<AtomicU64>,

    /// Submissions stopped by validation
    validation_failures_total: Arc<AtomicU64>,

    /// Submissions accepted by the delivery provider
    deliveries_total: Arc<AtomicU64>,

    /// Failed delivery attempts
    delivery_errors_total: Arc<AtomicU64>,

    /// Successful mailto handoffs
    fallbacks_total: Arc<AtomicU64>,

    /// Handoffs the environment refused
    fallback_failures_total: Arc<AtomicU64>,

    /// Outbound HTTP requests made
    http_requests_total: Arc<AtomicU64>,

    /// Total duration of all HTTP requests in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            submissions_total: Arc::new(AtomicU64::new(0)),
            ignored_total: Arc::new(AtomicU64::new(0)),
            validation_failures_total: Arc::new(AtomicU64::new(0)),
            deliveries_total: Arc::new(AtomicU64::new(0)),
            delivery_errors_total: Arc::new(AtomicU64::new(0)),
            fallbacks_total: Arc::new(AtomicU64::new(0)),
            fallback_failures_total: Arc::new(AtomicU64::new(0)),
            http_requests_total: Arc::new(AtomicU64::new(0)),
            http_duration_total_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn record_submission(&self) {
        self.submissions_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_ignored(&self) {
        self.ignored_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_validation_failure(&self) {
        self.validation_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delivery(&self) {
        self.deliveries_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delivery_error(&self) {
        self.delivery_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback(&self) {
        self.fallbacks_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback_failure(&self) {
        self.fallback_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an HTTP request with duration.
    pub fn record_http_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn submissions_total(&self) -> u64 {
        self.submissions_total.load(Ordering::Relaxed)
    }

    pub fn ignored_total(&self) -> u64 {
        self.ignored_total.load(Ordering::Relaxed)
    }

    pub fn validation_failures_total(&self) -> u64 {
        self.validation_failures_total.load(Ordering::Relaxed)
    }

    pub fn deliveries_total(&self) -> u64 {
        self.deliveries_total.load(Ordering::Relaxed)
    }

    pub fn delivery_errors_total(&self) -> u64 {
        self.delivery_errors_total.load(Ordering::Relaxed)
    }

    pub fn fallbacks_total(&self) -> u64 {
        self.fallbacks_total.load(Ordering::Relaxed)
    }

    pub fn fallback_failures_total(&self) -> u64 {
        self.fallback_failures_total.load(Ordering::Relaxed)
    }

    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    pub fn http_duration_total_ms(&self) -> u64 {
        self.http_duration_total_ms.load(Ordering::Relaxed)
    }

    /// Get average HTTP request duration in milliseconds.
    pub fn http_duration_avg_ms(&self) -> f64 {
        let total = self.http_duration_total_ms.load(Ordering::Relaxed);
        let count = self.http_requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            submissions_total: self.submissions_total(),
            ignored_total: self.ignored_total(),
            validation_failures_total: self.validation_failures_total(),
            deliveries_total: self.deliveries_total(),
            delivery_errors_total: self.delivery_errors_total(),
            fallbacks_total: self.fallbacks_total(),
            fallback_failures_total: self.fallback_failures_total(),
            http_requests_total: self.http_requests_total(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub submissions_total: u64,
    pub ignored_total: u64,
    pub validation_failures_total: u64,
    pub deliveries_total: u64,
    pub delivery_errors_total: u64,
    pub fallbacks_total: u64,
    pub fallback_failures_total: u64,
    pub http_requests_total: u64,
    pub http_duration_avg_ms: f64,
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
}

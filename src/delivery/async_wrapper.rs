//! Async wrapper around synchronous delivery providers.
//!
//! This module provides an async interface to the blocking providers by using
//! `tokio::task::spawn_blocking`, so the single outbound request never stalls
//! the runtime driving the form.

use super::{Ack, DeliveryProvider};
use crate::domain::Submission;
use crate::error::{DeliveryError, DeliveryResult};
use async_trait::async_trait;
use std::sync::Arc;

/// Async delivery capability consumed by the form controller.
///
/// Tests substitute their own implementation to observe calls or hold a
/// submission in flight.
#[async_trait]
pub trait AsyncDeliveryProvider: Send + Sync {
    /// Short provider name used in logs and acknowledgements.
    fn name(&self) -> &'static str;

    /// Send one submission. Exactly one outbound request per call.
    async fn submit(&self, submission: &Submission) -> DeliveryResult<Ack>;
}

/// Runs a blocking [`DeliveryProvider`] on tokio's blocking pool.
#[derive(Clone)]
pub struct BlockingDelivery {
    provider: Arc<dyn DeliveryProvider>,
}

impl BlockingDelivery {
    pub fn new(provider: Arc<dyn DeliveryProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl AsyncDeliveryProvider for BlockingDelivery {
    fn name(&self) -> &'static str {
        self.provider.name()
    }

    async fn submit(&self, submission: &Submission) -> DeliveryResult<Ack> {
        let provider = self.provider.clone();
        let submission = submission.clone();

        tokio::task::spawn_blocking(move || provider.deliver(&submission))
            .await
            .map_err(|e| DeliveryError::HttpError(format!("Task join error: {}", e)))?
    }
}

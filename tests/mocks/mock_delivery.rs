use async_trait::async_trait;
use dve_contact_form::delivery::{Ack, AsyncDeliveryProvider};
use dve_contact_form::error::{DeliveryError, DeliveryResult};
use dve_contact_form::Submission;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Scripted response for the next submit call.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    Accept,
    Fail,
    Panic,
}

/// Mock delivery provider for testing.
///
/// Records every submission it receives and can hold a call in flight until
/// the test releases it.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockDelivery {
    behavior: Behavior,
    gate: Option<Arc<Notify>>,
    calls: Arc<AtomicUsize>,
    received: Arc<Mutex<Vec<Submission>>>,
}

#[allow(dead_code)]
impl MockDelivery {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            gate: None,
            calls: Arc::new(AtomicUsize::new(0)),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn accepting() -> Self {
        Self::new(Behavior::Accept)
    }

    pub fn failing() -> Self {
        Self::new(Behavior::Fail)
    }

    /// A provider that blocks inside `submit` until [`release`](Self::release).
    pub fn gated(behavior: Behavior) -> Self {
        Self {
            gate: Some(Arc::new(Notify::new())),
            ..Self::new(behavior)
        }
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<Submission> {
        self.received.lock().unwrap().clone()
    }

    /// Yield to the runtime until at least one submit call has started.
    pub async fn wait_for_call(&self) {
        while self.call_count() == 0 {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl AsyncDeliveryProvider for MockDelivery {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn submit(&self, submission: &Submission) -> DeliveryResult<Ack> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.received.lock().unwrap().push(submission.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        match self.behavior {
            Behavior::Accept => Ok(Ack::delivered("mock", 200, Some("ok".to_string()))),
            Behavior::Fail => Err(DeliveryError::StatusError {
                status: 500,
                message: "Internal Server Error".to_string(),
            }),
            Behavior::Panic => panic!("mock delivery panicked"),
        }
    }
}

use dve_contact_form::error::{FallbackError, FallbackResult};
use dve_contact_form::MailHandler;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock mail handler that records the links it was asked to open.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockMailHandler {
    refuse: bool,
    delay: Option<Duration>,
    opened: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockMailHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handler that behaves like a host with no mail client.
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::default()
        }
    }

    /// A handler that blocks its thread before accepting, like an opener
    /// waiting on a terminal mail client.
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl MailHandler for MockMailHandler {
    fn open(&self, uri: &str) -> FallbackResult<()> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        self.opened.lock().unwrap().push(uri.to_string());
        if self.refuse {
            return Err(FallbackError::Unsupported);
        }
        Ok(())
    }
}

//! Submit handler for one contact form.

use super::state::{FormState, MessageKind, SharedFormState};
use crate::delivery::{Ack, AsyncDeliveryProvider};
use crate::domain::{validate, ValidationError};
use crate::error::FallbackError;
use crate::fallback::{Fallback, Handoff};
use crate::metrics::Metrics;
use std::sync::{Arc, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

/// Shown after a delivery or a mail-client handoff.
pub const SUCCESS_MESSAGE: &str =
    "Спасибо за ваше сообщение! Мы свяжемся с вами в ближайшее время.";

/// Shown when even the mail-client handoff failed.
pub const ERROR_MESSAGE: &str = "Произошла ошибка при отправке сообщения. Пожалуйста, попробуйте позже или свяжитесь с нами по телефону.";

/// Result of one press of the submit button.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The provider accepted the submission.
    Delivered(Ack),

    /// Delivery failed and the submission went to the mail client instead.
    HandedOff(Handoff),

    /// A field failed validation; nothing was sent.
    Invalid(ValidationError),

    /// Delivery and the mail-client handoff both failed.
    Failed(FallbackError),

    /// A submission was already in flight; this press did nothing.
    Ignored,
}

impl SubmitOutcome {
    /// Whether the user sees the success message.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Delivered(_) | Self::HandedOff(_))
    }

    /// Short label for logs and CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Delivered(_) => "delivered",
            Self::HandedOff(_) => "handed_off",
            Self::Invalid(_) => "invalid",
            Self::Failed(_) => "failed",
            Self::Ignored => "ignored",
        }
    }
}

/// Holds `busy` for the duration of one submission.
///
/// Dropping the guard clears the flag, so every exit path (early return,
/// panic, cancelled future) leaves the form enterable again.
struct BusyGuard {
    state: SharedFormState,
}

impl BusyGuard {
    /// Set `busy`, or return `None` if it was already set.
    fn acquire(state: &SharedFormState) -> Option<Self> {
        let mut guard = lock(state);
        if guard.is_busy() {
            return None;
        }
        guard.set_busy(true);

        Some(Self {
            state: state.clone(),
        })
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        lock(&self.state).set_busy(false);
    }
}

fn lock(state: &SharedFormState) -> MutexGuard<'_, FormState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Drives the `Idle → Submitting → {Delivered | HandedOff | Failed} → Idle`
/// flow for one form instance.
///
/// The controller never owns the form: it reads fields from and writes
/// `busy` and messages to the [`SharedFormState`] the UI layer hands it.
pub struct ContactForm {
    state: SharedFormState,
    delivery: Arc<dyn AsyncDeliveryProvider>,
    fallback: Fallback,
    metrics: Metrics,
}

impl ContactForm {
    pub fn new(
        state: SharedFormState,
        delivery: Arc<dyn AsyncDeliveryProvider>,
        fallback: Fallback,
        metrics: Metrics,
    ) -> Self {
        Self {
            state,
            delivery,
            fallback,
            metrics,
        }
    }

    /// The form state this controller operates on.
    pub fn state(&self) -> &SharedFormState {
        &self.state
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Handle a submit event.
    ///
    /// Validates the current fields, makes exactly one delivery attempt and,
    /// if that fails, one mail-client handoff. A press while a submission is
    /// in flight returns [`SubmitOutcome::Ignored`] without touching the
    /// network. Never returns an error: every path ends in an outcome and a
    /// cleared busy flag.
    pub async fn handle_submit(&self) -> SubmitOutcome {
        let Some(_busy) = BusyGuard::acquire(&self.state) else {
            debug!("Submit ignored: submission already in flight");
            self.metrics.record_ignored();
            return SubmitOutcome::Ignored;
        };
        self.metrics.record_submission();

        let fields = lock(&self.state).fields().clone();
        let submission = match validate(&fields) {
            Ok(submission) => submission,
            Err(e) => {
                debug!(field = e.field(), "Validation failed");
                self.metrics.record_validation_failure();
                lock(&self.state).show_message(MessageKind::Error, e.to_string());
                return SubmitOutcome::Invalid(e);
            }
        };

        let provider = self.delivery.name();
        match self.delivery.submit(&submission).await {
            Ok(ack) => {
                info!(provider, status = ?ack.status, "Submission delivered");
                self.metrics.record_delivery();
                self.finish_successfully();
                SubmitOutcome::Delivered(ack)
            }
            Err(e) => {
                warn!(provider, error = %e, "Delivery failed, handing off to mail client");
                self.metrics.record_delivery_error();

                match self.fallback.invoke_blocking(&submission).await {
                    Ok(handoff) => {
                        info!("Submission handed off to mail client");
                        self.metrics.record_fallback();
                        self.finish_successfully();
                        SubmitOutcome::HandedOff(handoff)
                    }
                    Err(e) => {
                        error!(error = %e, "Mail client handoff failed");
                        self.metrics.record_fallback_failure();
                        lock(&self.state).show_message(MessageKind::Error, ERROR_MESSAGE);
                        SubmitOutcome::Failed(e)
                    }
                }
            }
        }
    }

    fn finish_successfully(&self) {
        let mut state = lock(&self.state);
        state.show_message(MessageKind::Success, SUCCESS_MESSAGE);
        state.reset_fields();
    }
}

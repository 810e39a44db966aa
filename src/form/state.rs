//! Form state owned by the UI layer.

use crate::domain::{format_phone_input, RawFields};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// How long a status message stays visible.
pub const MESSAGE_TTL: Duration = Duration::from_secs(5);

/// Form state shared between the UI layer and the controller.
pub type SharedFormState = Arc<Mutex<FormState>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Success,
    Error,
}

/// Status line shown under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessage {
    pub kind: MessageKind,
    pub text: String,
    shown_at: Instant,
}

impl FormMessage {
    pub fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            shown_at: Instant::now(),
        }
    }

    /// Whether the message has outlived [`MESSAGE_TTL`] at `now`.
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= MESSAGE_TTL
    }
}

/// Field values, busy indicator and status message of one form instance.
///
/// The UI layer writes the fields and reads `busy` and the message; the
/// controller toggles `busy` and posts messages.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    fields: RawFields,
    busy: bool,
    message: Option<FormMessage>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap the state for sharing with a controller.
    pub fn shared(self) -> SharedFormState {
        Arc::new(Mutex::new(self))
    }

    pub fn fields(&self) -> &RawFields {
        &self.fields
    }

    pub fn set_fields(&mut self, fields: RawFields) {
        self.fields = fields;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.fields.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.fields.email = email.into();
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.fields.phone = Some(phone.into());
    }

    /// Store the phone after applying the `+7 (XXX) XXX-XX-XX` input mask.
    pub fn set_phone_formatted(&mut self, raw: &str) {
        self.fields.phone = Some(format_phone_input(raw));
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.fields.message = message.into();
    }

    /// Clear every field, as after a successful submission.
    pub fn reset_fields(&mut self) {
        self.fields = RawFields::default();
    }

    /// True while a submission is in flight; the submit button is disabled.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub(crate) fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// Latest message, regardless of age.
    pub fn message(&self) -> Option<&FormMessage> {
        self.message.as_ref()
    }

    /// Latest message if it is still within [`MESSAGE_TTL`] at `now`.
    pub fn visible_message(&self, now: Instant) -> Option<&FormMessage> {
        self.message.as_ref().filter(|m| !m.is_expired(now))
    }

    pub fn show_message(&mut self, kind: MessageKind, text: impl Into<String>) {
        self.message = Some(FormMessage::new(kind, text));
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }
}

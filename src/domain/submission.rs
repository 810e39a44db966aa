//! Contact-form submission and its validation.

use super::email::EmailAddress;
use super::errors::ValidationError;
use super::phone::Phone;
use serde::{Deserialize, Serialize};

/// Minimum name length, in characters, after trimming.
pub const MIN_NAME_CHARS: usize = 2;

/// Minimum message length, in characters, after trimming.
pub const MIN_MESSAGE_CHARS: usize = 10;

/// Raw field values as captured by the UI layer.
///
/// Nothing here is checked; missing fields deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawFields {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

impl RawFields {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.map(str::to_string),
            message: message.into(),
        }
    }
}

/// A fully validated contact request.
///
/// Only [`validate`] constructs one, so holding a `Submission` proves every
/// field passed its checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    name: String,
    email: EmailAddress,
    phone: Phone,
    message: String,
}

impl Submission {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Validate raw form input.
///
/// Rules are checked in the order name, email, message and the first
/// failure is returned. The phone is never rejected; a blank phone becomes
/// the placeholder. Stored values are trimmed.
pub fn validate(fields: &RawFields) -> Result<Submission, ValidationError> {
    let name = fields.name.trim();
    if name.chars().count() < MIN_NAME_CHARS {
        return Err(ValidationError::NameTooShort);
    }

    let email = EmailAddress::new(fields.email.as_str())?;

    let message = fields.message.trim();
    if message.chars().count() < MIN_MESSAGE_CHARS {
        return Err(ValidationError::MessageTooShort);
    }

    Ok(Submission {
        name: name.to_string(),
        email,
        phone: Phone::from_input(fields.phone.as_deref()),
        message: message.to_string(),
    })
}

//! Form validation errors.

use std::fmt;

/// Errors produced while validating raw contact-form input.
///
/// The `Display` text is the localized message shown next to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The name is missing or shorter than two characters.
    NameTooShort,

    /// The email address does not look like `local@domain.tld`.
    InvalidEmail(String),

    /// The message is missing or shorter than ten characters.
    MessageTooShort,
}

impl ValidationError {
    /// Name of the form field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NameTooShort => "name",
            Self::InvalidEmail(_) => "email",
            Self::MessageTooShort => "message",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameTooShort => write!(f, "Имя должно содержать минимум 2 символа"),
            Self::InvalidEmail(_) => write!(f, "Введите корректный email адрес"),
            Self::MessageTooShort => {
                write!(f, "Сообщение должно содержать минимум 10 символов")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

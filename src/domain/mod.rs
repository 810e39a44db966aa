//! Domain value objects and validation.
//!
//! This module contains the contact-form submission and the type-safe
//! wrappers for its fields. A [`Submission`] can only be obtained through
//! [`validate`], so invalid input never reaches a delivery provider.

pub mod email;
pub mod errors;
pub mod phone;
pub mod submission;

pub use email::EmailAddress;
pub use errors::ValidationError;
pub use phone::{format_phone_input, Phone, PHONE_PLACEHOLDER};
pub use submission::{validate, RawFields, Submission, MIN_MESSAGE_CHARS, MIN_NAME_CHARS};

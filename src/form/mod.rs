//! The contact form: UI-owned state plus the submit controller.

pub mod controller;
pub mod state;

pub use controller::{ContactForm, SubmitOutcome, ERROR_MESSAGE, SUCCESS_MESSAGE};
pub use state::{FormMessage, FormState, MessageKind, SharedFormState, MESSAGE_TTL};

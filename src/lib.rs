//! DVE Estate contact form - submission client for the agency website.
//!
//! The library validates contact-form input, delivers it through one of
//! several interchangeable email backends and, when delivery fails, hands a
//! pre-filled `mailto:` draft to the user's mail client.
//!
//! # Architecture
//!
//! - **domain**: Validated submission and its field value objects
//! - **delivery**: `DeliveryProvider` backends (Web3Forms, site endpoint, Mailgun, SendGrid)
//! - **fallback**: `mailto:` link building and mail-client handoff
//! - **form**: UI-owned form state and the submit controller
//! - **config**: Configuration management from environment variables
//! - **error**: Custom error types for precise error handling
//! - **metrics**: Counters for submissions, deliveries and fallbacks

pub mod config;
pub mod delivery;
pub mod domain;
pub mod error;
pub mod fallback;
pub mod form;
pub mod metrics;

pub use config::{Config, FallbackMode, ProviderConfig};
pub use delivery::{
    build_provider, Ack, AsyncDeliveryProvider, BlockingDelivery, DeliveryProvider,
};
pub use domain::{validate, EmailAddress, Phone, RawFields, Submission, ValidationError};
pub use error::{ConfigError, DeliveryError, FallbackError};
pub use fallback::{Fallback, Handoff, LogMailHandler, MailHandler, MailtoLink, SystemMailHandler};
pub use form::{ContactForm, FormState, MessageKind, SharedFormState, SubmitOutcome};
pub use metrics::{Metrics, MetricsSummary};

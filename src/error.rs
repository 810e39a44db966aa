//! Error types for the contact-form client.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Field validation errors live in [`crate::domain::ValidationError`].

use thiserror::Error;

/// Errors that can occur when handing a submission to a delivery provider.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Provider returned a non-success status code
    #[error("Provider error (status {status}): {message}")]
    StatusError { status: u16, message: String },

    /// Provider answered 2xx but reported the submission as not accepted
    #[error("Submission rejected: {0}")]
    Rejected(String),

    /// Failed to build or parse a JSON payload
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Credentials were refused
    #[error("Authentication failed")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Errors that can occur when handing a mailto link to the environment.
#[derive(Error, Debug)]
pub enum FallbackError {
    /// The opener program could not be started
    #[error("Failed to launch mail handler '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The opener ran but reported failure
    #[error("Mail handler '{program}' exited with status {code:?}")]
    OpenerFailed { program: String, code: Option<i32> },

    /// No mail handler is known for this platform
    #[error("No mail handler available on this platform")]
    Unsupported,

    /// The blocking handoff task panicked or was cancelled
    #[error("Task join error: {0}")]
    TaskJoin(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// FORM_PROVIDER names a backend this crate does not know
    #[error("Unknown delivery provider: {0}")]
    UnknownProvider(String),
}

/// Convenience type alias for Results with DeliveryError
pub type DeliveryResult<T> = Result<T, DeliveryError>;

/// Convenience type alias for Results with FallbackError
pub type FallbackResult<T> = Result<T, FallbackError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

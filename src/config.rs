//! Configuration management for the contact-form client.
//!
//! This module handles loading and validating configuration from environment
//! variables. A `.env` file is loaded first if present. The delivery backend is
//! picked once here; nothing else in the crate switches on provider names.

use crate::error::{ConfigError, ConfigResult};
use std::env;

pub const DEFAULT_WEB3FORMS_URL: &str = "https://api.web3forms.com/submit";
pub const DEFAULT_MAILGUN_BASE_URL: &str = "https://api.mailgun.net";
pub const DEFAULT_SENDGRID_BASE_URL: &str = "https://api.sendgrid.com";

/// Which backend receives submissions, with its connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderConfig {
    /// Third-party forms relay (Web3Forms).
    Web3Forms { url: String, access_key: String },

    /// The site's own mail-submission endpoint (PHP script or Worker).
    Endpoint { url: String },

    /// Mailgun messages API.
    Mailgun {
        base_url: String,
        domain: String,
        api_key: String,
    },

    /// SendGrid v3 mail-send API.
    SendGrid { base_url: String, api_key: String },
}

impl ProviderConfig {
    /// Short provider name as accepted by `FORM_PROVIDER`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Web3Forms { .. } => "web3forms",
            Self::Endpoint { .. } => "endpoint",
            Self::Mailgun { .. } => "mailgun",
            Self::SendGrid { .. } => "sendgrid",
        }
    }
}

/// How the mailto fallback reaches the user's mail client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackMode {
    /// Launch the platform opener, or `opener` when set.
    System { opener: Option<String> },

    /// Only log the link (headless deployments).
    Log,
}

/// Configuration for the contact-form client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Delivery backend
    pub provider: ProviderConfig,

    /// Mailbox that receives submissions and the mailto fallback
    pub recipient: String,

    /// Display name used as sender
    pub from_name: String,

    /// Sender address for providers that need one
    pub from_address: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Fallback handoff mode (default: system)
    pub fallback: FallbackMode,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Provider selection:
    /// - `FORM_PROVIDER`: `web3forms` (default), `endpoint`, `mailgun` or `sendgrid`
    ///
    /// Provider settings (required for the selected provider only):
    /// - `WEB3FORMS_ACCESS_KEY`, optional `WEB3FORMS_URL`
    /// - `FORM_ENDPOINT_URL`
    /// - `MAILGUN_API_KEY`, `MAILGUN_DOMAIN`, optional `MAILGUN_BASE_URL`
    /// - `SENDGRID_API_KEY`, optional `SENDGRID_BASE_URL`
    ///
    /// Optional environment variables:
    /// - `FORM_RECIPIENT`: Receiving mailbox (default: dvegroupp@gmail.com)
    /// - `FORM_FROM_NAME`: Sender name (default: DVE Estate Website)
    /// - `FORM_FROM_ADDRESS`: Sender address (default: noreply@dve-estate.ru)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `FALLBACK_MODE`: `system` or `log` (default: system)
    /// - `MAILTO_OPENER`: Program used to open mailto links
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let defaults = Config::default();

        let provider_name = env::var("FORM_PROVIDER").unwrap_or_else(|_| "web3forms".to_string());
        let provider = Self::load_provider(&provider_name)?;

        let recipient = env::var("FORM_RECIPIENT").unwrap_or(defaults.recipient);
        if !recipient.contains('@') {
            return Err(ConfigError::InvalidValue {
                var: "FORM_RECIPIENT".to_string(),
                reason: "Must be an email address".to_string(),
            });
        }

        let from_name = env::var("FORM_FROM_NAME").unwrap_or(defaults.from_name);
        let from_address = env::var("FORM_FROM_ADDRESS").unwrap_or(defaults.from_address);

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", defaults.request_timeout)?;
        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: "Must be at least 1 second".to_string(),
            });
        }

        let fallback = match env::var("FALLBACK_MODE")
            .unwrap_or_else(|_| "system".to_string())
            .to_lowercase()
            .as_str()
        {
            "system" => FallbackMode::System {
                opener: env::var("MAILTO_OPENER")
                    .ok()
                    .filter(|opener| !opener.trim().is_empty()),
            },
            "log" => FallbackMode::Log,
            other => {
                return Err(ConfigError::InvalidValue {
                    var: "FALLBACK_MODE".to_string(),
                    reason: format!("Must be 'system' or 'log', got: {}", other),
                })
            }
        };

        let log_level = env::var("LOG_LEVEL").unwrap_or(defaults.log_level);

        Ok(Config {
            provider,
            recipient,
            from_name,
            from_address,
            request_timeout,
            fallback,
            log_level,
        })
    }

    fn load_provider(name: &str) -> ConfigResult<ProviderConfig> {
        match name.trim().to_lowercase().as_str() {
            "web3forms" => Ok(ProviderConfig::Web3Forms {
                url: Self::url_var("WEB3FORMS_URL", DEFAULT_WEB3FORMS_URL)?,
                access_key: Self::required_var("WEB3FORMS_ACCESS_KEY")?,
            }),
            "endpoint" => {
                let url = Self::required_var("FORM_ENDPOINT_URL")?;
                Self::check_url("FORM_ENDPOINT_URL", &url)?;
                Ok(ProviderConfig::Endpoint { url })
            }
            "mailgun" => Ok(ProviderConfig::Mailgun {
                base_url: Self::url_var("MAILGUN_BASE_URL", DEFAULT_MAILGUN_BASE_URL)?,
                domain: Self::required_var("MAILGUN_DOMAIN")?,
                api_key: Self::required_var("MAILGUN_API_KEY")?,
            }),
            "sendgrid" => Ok(ProviderConfig::SendGrid {
                base_url: Self::url_var("SENDGRID_BASE_URL", DEFAULT_SENDGRID_BASE_URL)?,
                api_key: Self::required_var("SENDGRID_API_KEY")?,
            }),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }

    /// Read a variable that must be present and non-blank.
    fn required_var(var_name: &str) -> ConfigResult<String> {
        let value =
            env::var(var_name).map_err(|_| ConfigError::MissingVar(var_name.to_string()))?;

        if value.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        Ok(value)
    }

    /// Read an optional URL variable, validating whichever value is used.
    fn url_var(var_name: &str, default: &str) -> ConfigResult<String> {
        let url = env::var(var_name).unwrap_or_else(|_| default.to_string());
        Self::check_url(var_name, &url)?;
        Ok(url)
    }

    fn check_url(var_name: &str, url: &str) -> ConfigResult<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }
        Ok(())
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            provider: ProviderConfig::Web3Forms {
                url: DEFAULT_WEB3FORMS_URL.to_string(),
                access_key: String::new(),
            },
            recipient: "dvegroupp@gmail.com".to_string(),
            from_name: "DVE Estate Website".to_string(),
            from_address: "noreply@dve-estate.ru".to_string(),
            request_timeout: 10,
            fallback: FallbackMode::System { opener: None },
            log_level: "error".to_string(),
        }
    }
}

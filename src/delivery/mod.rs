//! Delivery providers for validated submissions.
//!
//! Each backend the site can post to implements [`DeliveryProvider`]. The
//! providers are synchronous (one blocking `ureq` request each) and are used
//! from async code through [`AsyncDeliveryProvider`], which runs them on
//! tokio's blocking pool. Which provider is live is decided once by
//! [`build_provider`] from the loaded [`Config`].

mod async_wrapper;
pub mod endpoint;
pub mod mailgun;
pub mod sendgrid;
pub mod template;
pub mod web3forms;

pub use async_wrapper::{AsyncDeliveryProvider, BlockingDelivery};
pub use endpoint::EndpointProvider;
pub use mailgun::MailgunProvider;
pub use sendgrid::SendGridProvider;
pub use web3forms::Web3FormsProvider;

use crate::config::{Config, ProviderConfig};
use crate::domain::Submission;
use crate::error::{DeliveryError, DeliveryResult};
use crate::metrics::{HttpTimer, Metrics};
use serde::{Deserialize, Serialize};
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// Acknowledgement of a finished submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ack {
    /// Provider that produced the acknowledgement
    pub provider: &'static str,

    /// HTTP status of the delivery response, if there was one
    pub status: Option<u16>,

    /// Message returned by the provider, if any
    pub message: Option<String>,

    /// True when the submission was handed to a mail client instead of
    /// being delivered
    pub handed_off: bool,
}

impl Ack {
    /// Acknowledgement for a 2xx delivery response.
    pub fn delivered(provider: &'static str, status: u16, message: Option<String>) -> Self {
        Self {
            provider,
            status: Some(status),
            message,
            handed_off: false,
        }
    }
}

/// A backend that can carry one submission to the agency's mailbox.
///
/// Implementations issue exactly one outbound request per call and never
/// retry. Any 2xx status counts as success.
pub trait DeliveryProvider: Send + Sync {
    /// Short provider name used in logs and acknowledgements.
    fn name(&self) -> &'static str;

    /// Send the submission.
    fn deliver(&self, submission: &Submission) -> DeliveryResult<Ack>;
}

/// Body returned by providers that answer with a success flag.
#[derive(Debug, Deserialize)]
pub struct JsonReply {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub message: Option<String>,
}

/// Shared HTTP plumbing for the providers.
///
/// Wraps a `ureq` agent configured with the request timeout, maps transport
/// and status failures into [`DeliveryError`] and records request timings.
#[derive(Clone)]
pub struct HttpClient {
    agent: Arc<ureq::Agent>,
    metrics: Metrics,
}

impl HttpClient {
    pub fn new(timeout: Duration, metrics: Metrics) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            agent: Arc::new(agent),
            metrics,
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// POST a JSON body.
    pub fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &serde_json::Value,
    ) -> DeliveryResult<ureq::Response> {
        tracing::debug!("POST {}", url);

        let mut request = self.agent.post(url).set("Accept", "application/json");
        for (name, value) in headers {
            request = request.set(name, value);
        }

        let timer = HttpTimer::new(self.metrics.clone());
        let result = request.send_json(body);
        timer.complete();

        self.check(url, result)
    }

    /// POST an `application/x-www-form-urlencoded` body.
    pub fn post_form(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        fields: &[(&str, &str)],
    ) -> DeliveryResult<ureq::Response> {
        tracing::debug!("POST {} (form)", url);

        let mut request = self.agent.post(url);
        for (name, value) in headers {
            request = request.set(name, value);
        }

        let timer = HttpTimer::new(self.metrics.clone());
        let result = request.send_form(fields);
        timer.complete();

        self.check(url, result)
    }

    /// Turn a ureq result into a 2xx response or a DeliveryError.
    fn check(
        &self,
        url: &str,
        result: Result<ureq::Response, ureq::Error>,
    ) -> DeliveryResult<ureq::Response> {
        let response = result.map_err(|e| {
            let error = Self::map_error(e);
            tracing::warn!("POST {} - Error: {}", url, error);
            error
        })?;

        let status = response.status();
        if !(200..300).contains(&status) {
            let message = response
                .into_string()
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!("POST {} - Unexpected status {}", url, status);
            return Err(DeliveryError::StatusError { status, message });
        }

        tracing::debug!("POST {} - Success (status: {})", url, status);
        Ok(response)
    }

    /// Map a ureq error to a DeliveryError.
    fn map_error(error: ureq::Error) -> DeliveryError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 | 403 => DeliveryError::Unauthorized,
                    429 => DeliveryError::RateLimitExceeded,
                    _ => DeliveryError::StatusError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if Self::is_timeout(&transport) {
                    return DeliveryError::Timeout;
                }

                let detail = transport.to_string();
                match transport.kind() {
                    ureq::ErrorKind::ConnectionFailed => {
                        DeliveryError::HttpError(format!("Connection failed: {}", detail))
                    }
                    _ => DeliveryError::HttpError(detail),
                }
            }
        }
    }

    /// Whether a transport error was caused by the agent timeout.
    ///
    /// Socket timeouts surface as `TimedOut` or, on some platforms, `WouldBlock`.
    fn is_timeout(transport: &ureq::Transport) -> bool {
        std::error::Error::source(transport)
            .and_then(|source| source.downcast_ref::<io::Error>())
            .is_some_and(|e| {
                matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
            })
    }

    /// Read a `{success, message}` body from a 2xx response.
    ///
    /// A reply without `success: true` is a [`DeliveryError::Rejected`].
    pub fn read_reply(provider: &'static str, response: ureq::Response) -> DeliveryResult<Ack> {
        let status = response.status();
        let body = response
            .into_string()
            .map_err(|e| DeliveryError::HttpError(e.to_string()))?;

        let reply: JsonReply = serde_json::from_str(&body)?;
        if !reply.success {
            return Err(DeliveryError::Rejected(
                reply
                    .message
                    .unwrap_or_else(|| "Provider did not confirm the submission".to_string()),
            ));
        }

        Ok(Ack::delivered(provider, status, reply.message))
    }
}

/// Build the provider selected in the configuration.
pub fn build_provider(config: &Config, metrics: Metrics) -> Arc<dyn DeliveryProvider> {
    let http = HttpClient::new(Duration::from_secs(config.request_timeout), metrics);

    match &config.provider {
        ProviderConfig::Web3Forms { url, access_key } => Arc::new(Web3FormsProvider::new(
            http,
            url.clone(),
            access_key.clone(),
            config.from_name.clone(),
            config.recipient.clone(),
        )),
        ProviderConfig::Endpoint { url } => Arc::new(EndpointProvider::new(http, url.clone())),
        ProviderConfig::Mailgun {
            base_url,
            domain,
            api_key,
        } => Arc::new(MailgunProvider::new(
            http,
            base_url.clone(),
            domain.clone(),
            api_key.clone(),
            format!("{} <{}>", config.from_name, config.from_address),
            config.recipient.clone(),
        )),
        ProviderConfig::SendGrid { base_url, api_key } => Arc::new(SendGridProvider::new(
            http,
            base_url.clone(),
            api_key.clone(),
            config.from_address.clone(),
            config.recipient.clone(),
        )),
    }
}

/// Join a base URL and a path without doubling slashes.
pub(crate) fn build_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

//! Mail-client fallback for failed deliveries.
//!
//! When no provider accepted the submission, the flow builds a pre-filled
//! `mailto:` link and hands it to the environment's mail handler. A handoff
//! is reported as success: there is no way to observe whether the user
//! actually sends the draft, so the acknowledgement is flagged `handed_off`.

use crate::delivery::{template, Ack};
use crate::domain::Submission;
use crate::error::{FallbackError, FallbackResult};
use serde::{Serialize, Serializer};
use std::fmt;
use std::process::{Command, Stdio};
use std::sync::Arc;

/// Message the site shows while the mail client opens.
pub const HANDOFF_MESSAGE: &str = "Открывается почтовый клиент...";

/// A pre-filled `mailto:` compose link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailtoLink {
    recipient: String,
    subject: String,
    body: String,
}

impl MailtoLink {
    /// Build the link for a submission. Same inputs, same link.
    pub fn for_submission(recipient: &str, submission: &Submission) -> Self {
        Self {
            recipient: recipient.to_string(),
            subject: template::short_subject(submission),
            body: template::text_body(submission),
        }
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Subject before percent-encoding.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Body before percent-encoding.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The full URI with percent-encoded `subject` and `body` parameters.
    pub fn uri(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.recipient,
            urlencoding::encode(&self.subject),
            urlencoding::encode(&self.body)
        )
    }
}

impl fmt::Display for MailtoLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri())
    }
}

impl Serialize for MailtoLink {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.uri())
    }
}

/// The environment's way of opening a `mailto:` URI.
pub trait MailHandler: Send + Sync {
    fn open(&self, uri: &str) -> FallbackResult<()>;
}

/// Opens links with the platform's URL opener.
///
/// `xdg-open` on Linux and the BSDs, `open` on macOS and `cmd /C start` on
/// Windows, unless an explicit opener command is configured.
#[derive(Debug, Clone, Default)]
pub struct SystemMailHandler {
    opener: Option<String>,
}

impl SystemMailHandler {
    pub fn new(opener: Option<String>) -> Self {
        Self { opener }
    }

    /// Program and leading arguments used to open a URI.
    fn command(&self) -> FallbackResult<(String, Vec<String>)> {
        if let Some(opener) = &self.opener {
            let mut parts = opener.split_whitespace().map(str::to_string);
            let program = parts.next().ok_or(FallbackError::Unsupported)?;
            return Ok((program, parts.collect()));
        }

        if cfg!(target_os = "macos") {
            Ok(("open".to_string(), Vec::new()))
        } else if cfg!(target_os = "windows") {
            let args = ["/C", "start", ""].iter().map(|s| s.to_string()).collect();
            Ok(("cmd".to_string(), args))
        } else if cfg!(unix) {
            Ok(("xdg-open".to_string(), Vec::new()))
        } else {
            Err(FallbackError::Unsupported)
        }
    }
}

impl MailHandler for SystemMailHandler {
    fn open(&self, uri: &str) -> FallbackResult<()> {
        let (program, args) = self.command()?;
        tracing::debug!("Opening mailto link with {}", program);

        // stdout carries the CLI report; the opener must not write to it.
        let status = Command::new(&program)
            .args(&args)
            .arg(uri)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .map_err(|source| FallbackError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(FallbackError::OpenerFailed {
                program,
                code: status.code(),
            });
        }

        Ok(())
    }
}

/// Logs the link instead of opening it, for hosts without a desktop.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailHandler;

impl MailHandler for LogMailHandler {
    fn open(&self, uri: &str) -> FallbackResult<()> {
        tracing::info!(mailto = %uri, "Mail client handoff");
        Ok(())
    }
}

/// A completed handoff: the acknowledgement and the link that was opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handoff {
    pub ack: Ack,
    pub link: MailtoLink,
}

/// Builds mailto links for one recipient and passes them to a handler.
#[derive(Clone)]
pub struct Fallback {
    recipient: String,
    handler: Arc<dyn MailHandler>,
}

impl Fallback {
    pub fn new(recipient: impl Into<String>, handler: Arc<dyn MailHandler>) -> Self {
        Self {
            recipient: recipient.into(),
            handler,
        }
    }

    /// Hand the submission to the mail client.
    ///
    /// Succeeds as soon as the handler accepted the link. A handler failure is
    /// terminal for the flow.
    pub fn invoke(&self, submission: &Submission) -> FallbackResult<Handoff> {
        let link = MailtoLink::for_submission(&self.recipient, submission);
        self.handler.open(&link.uri())?;

        Ok(Handoff {
            ack: Ack {
                provider: "mailto",
                status: None,
                message: Some(HANDOFF_MESSAGE.to_string()),
                handed_off: true,
            },
            link,
        })
    }

    /// Run [`Fallback::invoke`] on tokio's blocking pool.
    ///
    /// Openers such as `xdg-open` may not exit until the mail client closes.
    pub async fn invoke_blocking(&self, submission: &Submission) -> FallbackResult<Handoff> {
        let fallback = self.clone();
        let submission = submission.clone();

        tokio::task::spawn_blocking(move || fallback.invoke(&submission))
            .await
            .map_err(|e| FallbackError::TaskJoin(e.to_string()))?
    }
}

//! DVE contact form - command-line entry point.
//!
//! Reads one contact form as JSON on stdin, runs it through the submission
//! flow and prints the outcome as JSON on stdout. Logs go to stderr.
//!
//! ```text
//! echo '{"name":"Ivan","email":"ivan@example.com","message":"Hello, I am interested."}' \
//!     | dve-contact-form
//! ```

use anyhow::{Context, Result};
use dve_contact_form::delivery::{build_provider, BlockingDelivery};
use dve_contact_form::fallback::{Fallback, LogMailHandler, MailHandler, SystemMailHandler};
use dve_contact_form::form::{ContactForm, FormState, SubmitOutcome};
use dve_contact_form::{Config, FallbackMode, Metrics, RawFields};
use serde_json::json;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            init_logging("error");
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    init_logging(&config.log_level);
    info!(
        "Configuration loaded: provider {}, recipient {}",
        config.provider.name(),
        config.recipient
    );

    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .context("Failed to read form from stdin")?;
    let fields: RawFields =
        serde_json::from_str(&input).context("Form input is not valid JSON")?;

    let metrics = Metrics::new();
    let provider = build_provider(&config, metrics.clone());
    let handler: Arc<dyn MailHandler> = match &config.fallback {
        FallbackMode::System { opener } => Arc::new(SystemMailHandler::new(opener.clone())),
        FallbackMode::Log => Arc::new(LogMailHandler),
    };

    let mut state = FormState::new();
    state.set_fields(fields);
    let state = state.shared();

    let form = ContactForm::new(
        state.clone(),
        Arc::new(BlockingDelivery::new(provider)),
        Fallback::new(config.recipient.clone(), handler),
        metrics.clone(),
    );

    let outcome = form.handle_submit().await;

    let message = state
        .lock()
        .map(|s| s.message().map(|m| m.text.clone()))
        .unwrap_or_default();

    let mut report = json!({
        "outcome": outcome.label(),
        "message": message,
    });
    match &outcome {
        SubmitOutcome::Delivered(ack) => report["ack"] = json!(ack),
        SubmitOutcome::HandedOff(handoff) => {
            report["ack"] = json!(handoff.ack);
            report["mailto"] = json!(handoff.link);
        }
        SubmitOutcome::Invalid(e) => report["field"] = json!(e.field()),
        SubmitOutcome::Failed(e) => report["error"] = json!(e.to_string()),
        SubmitOutcome::Ignored => {}
    }
    println!("{}", serde_json::to_string_pretty(&report)?);

    info!("Metrics: {:?}", metrics.summary());

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Initialize logging (stderr only so stdout carries just the report).
fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

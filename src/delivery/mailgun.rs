//! Mailgun messages API provider.

use super::{build_url, template, Ack, DeliveryProvider, HttpClient};
use crate::domain::Submission;
use crate::error::DeliveryResult;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Sends the notification through Mailgun's `/v3/{domain}/messages`
/// endpoint using HTTP Basic auth (`api:{key}`).
pub struct MailgunProvider {
    http: HttpClient,
    url: String,
    authorization: String,
    from: String,
    recipient: String,
}

impl MailgunProvider {
    pub fn new(
        http: HttpClient,
        base_url: String,
        domain: String,
        api_key: String,
        from: String,
        recipient: String,
    ) -> Self {
        let url = build_url(&base_url, &format!("v3/{}/messages", domain));
        let authorization = format!("Basic {}", BASE64.encode(format!("api:{}", api_key)));

        Self {
            http,
            url,
            authorization,
            from,
            recipient,
        }
    }
}

impl DeliveryProvider for MailgunProvider {
    fn name(&self) -> &'static str {
        "mailgun"
    }

    fn deliver(&self, submission: &Submission) -> DeliveryResult<Ack> {
        let subject = template::short_subject(submission);
        let text = template::text_body(submission);
        let html = template::html_body(submission, chrono::Local::now());

        let fields = [
            ("from", self.from.as_str()),
            ("to", self.recipient.as_str()),
            ("h:Reply-To", submission.email().as_str()),
            ("subject", subject.as_str()),
            ("text", text.as_str()),
            ("html", html.as_str()),
        ];

        let response = self.http.post_form(
            &self.url,
            &[("Authorization", self.authorization.as_str())],
            &fields,
        )?;

        let status = response.status();
        let message = response
            .into_json::<serde_json::Value>()
            .ok()
            .and_then(|body| body.get("message").and_then(|m| m.as_str()).map(str::to_string));

        Ok(Ack::delivered(self.name(), status, message))
    }
}

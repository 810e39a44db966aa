//! SendGrid v3 mail-send provider.

use super::{build_url, template, Ack, DeliveryProvider, HttpClient};
use crate::domain::Submission;
use crate::error::DeliveryResult;
use serde_json::json;

/// Sends the notification through SendGrid's `/v3/mail/send` endpoint with a
/// bearer key. SendGrid answers `202 Accepted` with an empty body.
pub struct SendGridProvider {
    http: HttpClient,
    url: String,
    authorization: String,
    from_address: String,
    recipient: String,
}

impl SendGridProvider {
    pub fn new(
        http: HttpClient,
        base_url: String,
        api_key: String,
        from_address: String,
        recipient: String,
    ) -> Self {
        Self {
            http,
            url: build_url(&base_url, "v3/mail/send"),
            authorization: format!("Bearer {}", api_key),
            from_address,
            recipient,
        }
    }

    fn payload(&self, submission: &Submission) -> serde_json::Value {
        json!({
            "personalizations": [{
                "to": [{ "email": self.recipient }],
                "subject": template::short_subject(submission),
            }],
            "from": { "email": self.from_address },
            "reply_to": { "email": submission.email() },
            "content": [{
                "type": "text/html",
                "value": template::html_body(submission, chrono::Local::now()),
            }],
        })
    }
}

impl DeliveryProvider for SendGridProvider {
    fn name(&self) -> &'static str {
        "sendgrid"
    }

    fn deliver(&self, submission: &Submission) -> DeliveryResult<Ack> {
        let body = self.payload(submission);
        let response = self.http.post_json(
            &self.url,
            &[("Authorization", self.authorization.as_str())],
            &body,
        )?;

        Ok(Ack::delivered(self.name(), response.status(), None))
    }
}

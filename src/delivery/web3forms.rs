//! Web3Forms forms-relay provider.

use super::{template, Ack, DeliveryProvider, HttpClient};
use crate::domain::Submission;
use crate::error::DeliveryResult;
use serde_json::json;

/// Posts submissions to the Web3Forms relay, which mails them on.
///
/// The access key travels in the JSON body. The relay answers
/// `{"success": bool, "message": ...}`.
pub struct Web3FormsProvider {
    http: HttpClient,
    url: String,
    access_key: String,
    from_name: String,
    recipient: String,
}

impl Web3FormsProvider {
    pub fn new(
        http: HttpClient,
        url: String,
        access_key: String,
        from_name: String,
        recipient: String,
    ) -> Self {
        Self {
            http,
            url,
            access_key,
            from_name,
            recipient,
        }
    }

    fn payload(&self, submission: &Submission) -> serde_json::Value {
        json!({
            "access_key": self.access_key,
            "subject": template::site_subject(submission),
            "from_name": self.from_name,
            "name": submission.name(),
            "email": submission.email(),
            "phone": submission.phone(),
            "message": submission.message(),
            "to": self.recipient,
        })
    }
}

impl DeliveryProvider for Web3FormsProvider {
    fn name(&self) -> &'static str {
        "web3forms"
    }

    fn deliver(&self, submission: &Submission) -> DeliveryResult<Ack> {
        let body = self.payload(submission);
        let response = self.http.post_json(&self.url, &[], &body)?;
        HttpClient::read_reply(self.name(), response)
    }
}

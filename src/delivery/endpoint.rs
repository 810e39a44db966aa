//! Provider for the site's own mail-submission endpoint.

use super::{Ack, DeliveryProvider, HttpClient};
use crate::domain::Submission;
use crate::error::DeliveryResult;
use serde_json::json;

/// Posts the bare form fields to a self-hosted endpoint (the PHP mail
/// script or the Cloudflare Worker). Both answer `{success, message}`.
pub struct EndpointProvider {
    http: HttpClient,
    url: String,
}

impl EndpointProvider {
    pub fn new(http: HttpClient, url: String) -> Self {
        Self { http, url }
    }
}

impl DeliveryProvider for EndpointProvider {
    fn name(&self) -> &'static str {
        "endpoint"
    }

    fn deliver(&self, submission: &Submission) -> DeliveryResult<Ack> {
        let body = json!({
            "name": submission.name(),
            "email": submission.email(),
            "phone": submission.phone(),
            "message": submission.message(),
        });

        let response = self.http.post_json(&self.url, &[], &body)?;
        HttpClient::read_reply(self.name(), response)
    }
}

use std::env;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use phantommail_core::OutgoingEmail;

use super::Transport;
use crate::errors::{DispatchError, Result};

pub const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Transport for the Resend HTTP API.
#[derive(Debug, Clone)]
pub struct ResendTransport {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    cc: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bcc: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<Attachment<'a>>,
}

#[derive(Debug, Serialize)]
struct Attachment<'a> {
    filename: String,
    /// Base64-encoded file content.
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

impl ResendTransport {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: RESEND_ENDPOINT.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Read the API key from the environment variable `var`.
    pub fn from_env(var: &str) -> Result<Self> {
        let api_key = env::var(var)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| DispatchError::MissingApiKey(var.to_string()))?;
        Ok(Self::new(api_key))
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// JSON body sent to the Resend API for `email`. Attachments are named
/// `attachment_<n>.pdf` in order, starting at zero.
pub fn request_body(email: &OutgoingEmail) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(send_request(email))?)
}

fn send_request(email: &OutgoingEmail) -> SendRequest<'_> {
    SendRequest {
        from: &email.sender,
        to: &email.to,
        subject: &email.subject,
        html: &email.body_html,
        cc: email.cc.as_deref(),
        bcc: email.bcc.as_deref(),
        attachments: email
            .attachments
            .iter()
            .enumerate()
            .map(|(idx, content)| Attachment {
                filename: format!("attachment_{idx}.pdf"),
                content,
            })
            .collect(),
    }
}

#[async_trait]
impl Transport for ResendTransport {
    fn name(&self) -> &'static str {
        "resend"
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&send_request(email))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DispatchError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SendResponse = response.json().await?;
        debug!(id = %parsed.id, "resend accepted email");
        Ok(parsed.id)
    }
}

#[cfg(test)]
mod tests {
    use phantommail_core::Email;

    use super::*;

    #[test]
    fn attachments_are_numbered_and_cc_omitted() {
        let email = Email {
            subject: "Transport order".to_string(),
            body_html: "<p>Order</p>".to_string(),
            attachment_html: None,
        };
        let mut outgoing = OutgoingEmail::new(
            "orders@phantommail.test",
            vec!["planning@example.com".to_string()],
            &email,
        );
        outgoing.attachments = vec!["JVBERi0xLjQ=".to_string(), "JVBERi0xLjU=".to_string()];
        outgoing.bcc = Some(vec!["audit@example.com".to_string()]);

        let body = request_body(&outgoing).expect("request body");
        assert_eq!(body["from"], "orders@phantommail.test");
        assert_eq!(body["html"], "<p>Order</p>");
        assert!(body.get("cc").is_none());
        assert_eq!(body["bcc"][0], "audit@example.com");
        assert_eq!(body["attachments"][0]["filename"], "attachment_0.pdf");
        assert_eq!(body["attachments"][1]["filename"], "attachment_1.pdf");
        assert_eq!(body["attachments"][1]["content"], "JVBERi0xLjU=");
    }

    #[test]
    fn missing_key_is_reported_by_name() {
        let result = ResendTransport::from_env("PHANTOMMAIL_TEST_UNSET_RESEND_KEY");
        assert!(matches!(
            result,
            Err(DispatchError::MissingApiKey(name)) if name == "PHANTOMMAIL_TEST_UNSET_RESEND_KEY"
        ));
    }
}

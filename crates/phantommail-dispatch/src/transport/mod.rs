use async_trait::async_trait;
use tracing::{error, info};

use phantommail_core::{OutgoingEmail, redact_recipients};

use crate::errors::Result;

mod log;
mod resend;

pub use log::LogTransport;
pub use resend::{RESEND_ENDPOINT, ResendTransport, request_body};

/// Status prefix of a successful delivery.
pub const SENT_PREFIX: &str = "Email sent successfully!";
/// Status prefix of a failed delivery.
pub const ERROR_PREFIX: &str = "Error sending email:";

/// A mail provider.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Identifier used in logs.
    fn name(&self) -> &'static str;

    /// Send `email`, returning the provider's message id.
    async fn send(&self, email: &OutgoingEmail) -> Result<String>;
}

/// Send `email` and describe the outcome. Never fails: provider errors are
/// reported in the returned status.
pub async fn deliver(transport: &dyn Transport, email: &OutgoingEmail) -> String {
    let recipients = redact_recipients(&email.to).join(", ");
    info!(
        transport = transport.name(),
        recipients = %recipients,
        subject = %email.subject,
        attachments = email.attachments.len(),
        "sending email"
    );

    match transport.send(email).await {
        Ok(id) => {
            info!(transport = transport.name(), id = %id, "email sent");
            format!("{SENT_PREFIX} ID: {id}")
        }
        Err(err) => {
            error!(transport = transport.name(), error = %err, "email delivery failed");
            format!("{ERROR_PREFIX} {err}")
        }
    }
}

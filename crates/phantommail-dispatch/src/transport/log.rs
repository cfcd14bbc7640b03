use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tracing::info;

use phantommail_core::{OutgoingEmail, redact_recipients};

use super::Transport;
use crate::errors::Result;

/// Dry-run transport: logs the email instead of sending it.
#[derive(Debug, Default)]
pub struct LogTransport {
    sent: AtomicU64,
}

impl LogTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of emails "sent" so far.
    pub fn sent(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Transport for LogTransport {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<String> {
        let sequence = self.sent.fetch_add(1, Ordering::Relaxed) + 1;
        info!(
            sender = %email.sender,
            recipients = %redact_recipients(&email.to).join(", "),
            subject = %email.subject,
            body_bytes = email.body_html.len(),
            attachments = email.attachments.len(),
            "dry run, email not sent"
        );
        Ok(format!("dry-run-{sequence}"))
    }
}

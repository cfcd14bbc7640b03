use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use phantommail_core::{EmailKind, OutgoingEmail};
use phantommail_generate::{GeneratedContent, GenerationEngine};

use crate::assembler::{DocumentAssembler, DocumentRequest};
use crate::errors::Result;
use crate::pdf::{PdfRenderer, render_attachment};
use crate::transport::{SENT_PREFIX, Transport, deliver};

/// Envelope settings shared by every email of a pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub sender: String,
    pub recipients: Vec<String>,
    #[serde(default)]
    pub cc: Option<Vec<String>>,
    #[serde(default)]
    pub bcc: Option<Vec<String>>,
}

/// What happened to one email.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryOutcome {
    pub kind: EmailKind,
    pub subject: String,
    pub attachments: usize,
    /// Status string reported by [`deliver`].
    pub status: String,
}

impl DeliveryOutcome {
    pub fn is_sent(&self) -> bool {
        self.status.starts_with(SENT_PREFIX)
    }
}

/// Generate, assemble, render and deliver emails.
pub struct Pipeline {
    config: PipelineConfig,
    assembler: Arc<dyn DocumentAssembler>,
    renderer: Option<Arc<dyn PdfRenderer>>,
    transport: Arc<dyn Transport>,
}

impl Pipeline {
    pub fn new(
        config: PipelineConfig,
        assembler: Arc<dyn DocumentAssembler>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            config,
            assembler,
            renderer: None,
            transport,
        }
    }

    /// Render attachments to PDF with `renderer`. Without one, attachment
    /// HTML is dropped.
    pub fn with_renderer(mut self, renderer: Arc<dyn PdfRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Assemble `content` into an email addressed per the pipeline config.
    pub async fn prepare(&self, content: &GeneratedContent) -> Result<OutgoingEmail> {
        let request = DocumentRequest::for_content(content)?;
        let email = self.assembler.assemble(&request).await?;

        let mut outgoing = OutgoingEmail::new(
            self.config.sender.clone(),
            self.config.recipients.clone(),
            &email,
        );
        outgoing.cc = self.config.cc.clone();
        outgoing.bcc = self.config.bcc.clone();

        if let Some(html) = &email.attachment_html {
            match &self.renderer {
                Some(renderer) => outgoing
                    .attachments
                    .push(render_attachment(renderer.as_ref(), html).await?),
                None => warn!(
                    kind = %request.kind,
                    assembler = self.assembler.name(),
                    "no pdf renderer configured, attachment dropped"
                ),
            }
        }
        Ok(outgoing)
    }

    /// Deliver already generated content.
    pub async fn dispatch(&self, content: &GeneratedContent) -> Result<DeliveryOutcome> {
        let outgoing = self.prepare(content).await?;
        let status = deliver(self.transport.as_ref(), &outgoing).await;
        let outcome = DeliveryOutcome {
            kind: content.kind(),
            subject: outgoing.subject,
            attachments: outgoing.attachments.len(),
            status,
        };
        info!(
            kind = %outcome.kind,
            sent = outcome.is_sent(),
            attachments = outcome.attachments,
            "pipeline finished"
        );
        Ok(outcome)
    }

    /// Generate one email of `kind` (or a random kind) and deliver it.
    pub async fn run(
        &self,
        engine: &mut GenerationEngine,
        kind: Option<EmailKind>,
    ) -> Result<DeliveryOutcome> {
        let content = engine.generate(kind)?;
        self.dispatch(&content).await
    }
}

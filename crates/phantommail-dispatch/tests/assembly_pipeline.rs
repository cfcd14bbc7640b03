use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use phantommail_core::{EmailKind, OutgoingEmail};
use phantommail_dispatch::transport::ERROR_PREFIX;
use phantommail_dispatch::{
    DispatchError, DocumentAssembler, DocumentRequest, PdfRenderer, Pipeline, PipelineConfig,
    Result, TemplateAssembler, Transport, deliver, encode_pdf,
};
use phantommail_generate::{GeneratedContent, GenerationEngine, ReferenceData};

const FAKE_PDF: &[u8] = b"%PDF-1.4 phantommail";

fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 4)
        .and_then(|date| date.and_hms_opt(8, 15, 0))
        .expect("valid timestamp")
}

fn engine(seed: u64) -> GenerationEngine {
    let reference = ReferenceData::load_bundled().expect("load bundled customers");
    GenerationEngine::new(reference, Some(seed)).with_clock(fixed_now())
}

fn config() -> PipelineConfig {
    PipelineConfig {
        sender: "Planning <planning@example.com>".to_string(),
        recipients: vec!["ops@example.com".to_string()],
        cc: Some(vec!["cc@example.com".to_string()]),
        bcc: None,
    }
}

struct FixedPdf {
    calls: Mutex<Vec<String>>,
}

#[async_trait]
impl PdfRenderer for FixedPdf {
    async fn render(&self, html: &str) -> Result<Vec<u8>> {
        self.calls.lock().expect("lock").push(html.to_string());
        Ok(FAKE_PDF.to_vec())
    }
}

#[derive(Default)]
struct RecordingTransport {
    sent: Mutex<Vec<OutgoingEmail>>,
}

#[async_trait]
impl Transport for RecordingTransport {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<String> {
        let mut sent = self.sent.lock().expect("lock");
        sent.push(email.clone());
        Ok(format!("msg-{}", sent.len()))
    }
}

struct FailingTransport;

#[async_trait]
impl Transport for FailingTransport {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn send(&self, _email: &OutgoingEmail) -> Result<String> {
        Err(DispatchError::Rejected {
            status: 422,
            body: "invalid from address".to_string(),
        })
    }
}

#[tokio::test]
async fn templates_render_every_kind() {
    let mut engine = engine(31);
    let assembler = TemplateAssembler::new();

    for kind in EmailKind::ALL {
        let content = engine.generate(Some(kind)).expect("generate");
        let request = DocumentRequest::for_content(&content).expect("request");
        let email = assembler.assemble(&request).await.expect("assemble");

        assert!(!email.subject.trim().is_empty(), "{kind} subject empty");
        assert!(!email.body_html.contains("{{"), "{kind} body unresolved");
        match kind {
            EmailKind::Order | EmailKind::Declaration => {
                let attachment = email.attachment_html.expect("attachment html");
                assert!(!attachment.contains("{{"), "{kind} attachment unresolved");
            }
            _ => assert!(email.attachment_html.is_none(), "{kind} has attachment"),
        }
    }
}

#[tokio::test]
async fn order_subject_names_client_and_loading_date() {
    let mut engine = engine(5);
    let content = engine.generate(Some(EmailKind::Order)).expect("generate");
    let GeneratedOrder { company, loading } = order_fields(&content);

    let request = DocumentRequest::for_content(&content).expect("request");
    let email = TemplateAssembler::new()
        .assemble(&request)
        .await
        .expect("assemble");
    assert_eq!(
        email.subject,
        format!("Transport order {company} - loading {loading}")
    );
}

struct GeneratedOrder {
    company: String,
    loading: String,
}

fn order_fields(content: &GeneratedContent) -> GeneratedOrder {
    match content {
        GeneratedContent::Order(order) => GeneratedOrder {
            company: order.client.company.clone(),
            loading: order.loading_date.format("%Y-%m-%d").to_string(),
        },
        other => panic!("expected an order, got {:?}", other.kind()),
    }
}

#[tokio::test]
async fn pipeline_renders_attachment_and_applies_envelope() {
    let renderer = Arc::new(FixedPdf {
        calls: Mutex::new(Vec::new()),
    });
    let transport = Arc::new(RecordingTransport::default());
    let pipeline = Pipeline::new(
        config(),
        Arc::new(TemplateAssembler::new()),
        transport.clone(),
    )
    .with_renderer(renderer.clone());

    let mut engine = engine(77);
    let outcome = pipeline
        .run(&mut engine, Some(EmailKind::Declaration))
        .await
        .expect("pipeline run");

    assert!(outcome.is_sent());
    assert_eq!(outcome.status, "Email sent successfully! ID: msg-1");
    assert_eq!(outcome.attachments, 1);
    assert!(outcome.subject.starts_with("Customs declaration GB"));

    let sent = transport.sent.lock().expect("lock");
    assert_eq!(sent.len(), 1);
    let email = &sent[0];
    assert_eq!(email.sender, "Planning <planning@example.com>");
    assert_eq!(email.to, vec!["ops@example.com".to_string()]);
    assert_eq!(email.cc, Some(vec!["cc@example.com".to_string()]));
    assert_eq!(email.bcc, None);
    assert_eq!(email.attachments, vec![encode_pdf(FAKE_PDF)]);

    let calls = renderer.calls.lock().expect("lock");
    assert_eq!(calls.len(), 1);
    assert!(calls[0].contains("size: A4;"));
    assert!(calls[0].contains("<h1>Customs declaration</h1>"));
}

#[tokio::test]
async fn pipeline_without_renderer_drops_attachments() {
    let transport = Arc::new(RecordingTransport::default());
    let pipeline = Pipeline::new(
        config(),
        Arc::new(TemplateAssembler::new()),
        transport.clone(),
    );

    let mut engine = engine(12);
    let outcome = pipeline
        .run(&mut engine, Some(EmailKind::Order))
        .await
        .expect("pipeline run");

    assert!(outcome.is_sent());
    assert_eq!(outcome.attachments, 0);
    let sent = transport.sent.lock().expect("lock");
    assert!(sent[0].attachments.is_empty());
}

#[tokio::test]
async fn scenario_emails_carry_the_formatted_message() {
    let transport = Arc::new(RecordingTransport::default());
    let pipeline = Pipeline::new(
        config(),
        Arc::new(TemplateAssembler::new()),
        transport.clone(),
    );

    let mut engine = engine(3);
    let content = engine
        .generate(Some(EmailKind::Complaint))
        .expect("generate");
    let outcome = pipeline.dispatch(&content).await.expect("dispatch");
    assert_eq!(outcome.subject, "Complaint about my delivery");

    let sent = transport.sent.lock().expect("lock");
    assert!(sent[0].body_html.contains("Regards,<br>"));
}

#[tokio::test]
async fn failed_delivery_is_reported_not_raised() {
    let email = OutgoingEmail {
        sender: "planning@example.com".to_string(),
        to: vec!["ops@example.com".to_string()],
        subject: "Hello".to_string(),
        body_html: "<p>Hello</p>".to_string(),
        cc: None,
        bcc: None,
        attachments: Vec::new(),
    };

    let status = deliver(&FailingTransport, &email).await;
    assert!(status.starts_with(ERROR_PREFIX));
    assert!(status.contains("422"));
    assert!(status.contains("invalid from address"));
}

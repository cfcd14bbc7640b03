use askama::Template;
use async_trait::async_trait;
use schemars::schema::RootSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use phantommail_core::{CustomsDeclaration, Email, EmailKind, TransportOrder};
use phantommail_generate::{GeneratedContent, Scenario};

use crate::errors::{DispatchError, Result};

/// Input of a document assembler.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentRequest {
    pub kind: EmailKind,
    /// Entity the email is written about, as JSON.
    pub entity: Value,
    /// Template of the email body.
    pub template_name: String,
    /// Template of the PDF attachment, when the email carries one.
    pub attachment_template: Option<String>,
}

impl DocumentRequest {
    /// Request for the compiled templates of `content`'s kind.
    ///
    /// Scenario entities get a `subject` field, since their templates share
    /// one layout.
    pub fn for_content(content: &GeneratedContent) -> Result<Self> {
        let kind = content.kind();
        let mut entity = content.to_json()?;
        let (template_name, attachment_template) = match kind {
            EmailKind::Order => ("order_email", Some("order_attachment")),
            EmailKind::Declaration => ("declaration_email", Some("customs_declaration")),
            _ => ("scenario_email", None),
        };
        if let (Some(scenario), Value::Object(fields)) = (content.scenario(), &mut entity) {
            fields.insert("subject".to_string(), Value::String(scenario_subject(scenario)));
        }
        Ok(Self {
            kind,
            entity,
            template_name: template_name.to_string(),
            attachment_template: attachment_template.map(str::to_string),
        })
    }
}

fn scenario_subject(scenario: &Scenario) -> String {
    match scenario {
        Scenario::Complaint(_) => "Complaint about my delivery".to_string(),
        Scenario::Question(_) => "Question about our transport".to_string(),
        Scenario::PriceRequest(request) => {
            format!("Price request {} - {}", request.origin, request.destination)
        }
        Scenario::UpdateOrder(update) => {
            format!("Order {} / {}", update.order_ref, update.tracking_ref)
        }
        Scenario::WaitingCosts(waiting) => format!(
            "Waiting costs order {} ({})",
            waiting.details.order_ref, waiting.details.tracking_ref
        ),
        Scenario::Promotional(promo) => promo.promo_title.clone(),
    }
}

/// Produces the subject, body and attachment HTML of an email.
#[async_trait]
pub trait DocumentAssembler: Send + Sync {
    /// Identifier used in logs.
    fn name(&self) -> &'static str;

    async fn assemble(&self, request: &DocumentRequest) -> Result<Email>;
}

/// JSON schema of the [`Email`] an assembler returns, for assemblers backed
/// by a structured-output model.
pub fn response_schema() -> RootSchema {
    schemars::schema_for!(Email)
}

/// Subject of a transport order email.
pub fn order_subject(order: &TransportOrder) -> String {
    format!(
        "Transport order {} - loading {}",
        order.client.company, order.loading_date
    )
}

/// Subject of a customs declaration email.
pub fn declaration_subject(declaration: &CustomsDeclaration) -> String {
    format!(
        "Customs declaration {} ({})",
        declaration.mrn,
        declaration.declaration_type.code()
    )
}

#[derive(Template)]
#[template(path = "order_email.html")]
struct OrderEmail<'a> {
    subject: &'a str,
    order: &'a TransportOrder,
}

#[derive(Template)]
#[template(path = "order_attachment.html")]
struct OrderAttachment<'a> {
    order: &'a TransportOrder,
}

#[derive(Template)]
#[template(path = "declaration_email.html")]
struct DeclarationEmail<'a> {
    subject: &'a str,
    declaration: &'a CustomsDeclaration,
}

#[derive(Template)]
#[template(path = "customs_declaration.html")]
struct CustomsDeclarationDocument<'a> {
    declaration: &'a CustomsDeclaration,
}

/// Fields of a scenario entity the scenario template reads.
#[derive(Debug, Deserialize, Template)]
#[template(path = "scenario_email.html")]
struct ScenarioEmail {
    subject: String,
    formatted_message: String,
}

/// Assembler over the HTML templates compiled into this crate.
///
/// Values are HTML-escaped by the template engine; multi-line text is
/// joined with `<br>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateAssembler;

impl TemplateAssembler {
    pub fn new() -> Self {
        Self
    }

    fn render_email(&self, request: &DocumentRequest) -> Result<Email> {
        let attachment = request.attachment_template.as_deref();
        match request.template_name.as_str() {
            "order_email" => {
                let order: TransportOrder = serde_json::from_value(request.entity.clone())?;
                let subject = order_subject(&order);
                Ok(Email {
                    body_html: OrderEmail {
                        subject: &subject,
                        order: &order,
                    }
                    .render()?,
                    attachment_html: attachment_html(
                        attachment,
                        "order_attachment",
                        OrderAttachment { order: &order },
                    )?,
                    subject,
                })
            }
            "declaration_email" => {
                let declaration: CustomsDeclaration =
                    serde_json::from_value(request.entity.clone())?;
                let subject = declaration_subject(&declaration);
                Ok(Email {
                    body_html: DeclarationEmail {
                        subject: &subject,
                        declaration: &declaration,
                    }
                    .render()?,
                    attachment_html: attachment_html(
                        attachment,
                        "customs_declaration",
                        CustomsDeclarationDocument {
                            declaration: &declaration,
                        },
                    )?,
                    subject,
                })
            }
            "scenario_email" => {
                if let Some(name) = attachment {
                    return Err(unknown_template(name));
                }
                let scenario: ScenarioEmail = serde_json::from_value(request.entity.clone())?;
                Ok(Email {
                    body_html: scenario.render()?,
                    subject: scenario.subject,
                    attachment_html: None,
                })
            }
            other => Err(unknown_template(other)),
        }
    }
}

/// Render `template` when the request asks for the attachment it provides.
fn attachment_html<T: Template>(
    requested: Option<&str>,
    provided: &str,
    template: T,
) -> Result<Option<String>> {
    match requested {
        None => Ok(None),
        Some(name) if name == provided => Ok(Some(template.render()?)),
        Some(name) => Err(unknown_template(name)),
    }
}

fn unknown_template(name: &str) -> DispatchError {
    DispatchError::Template(format!("unknown template '{name}'"))
}

#[async_trait]
impl DocumentAssembler for TemplateAssembler {
    fn name(&self) -> &'static str {
        "template"
    }

    async fn assemble(&self, request: &DocumentRequest) -> Result<Email> {
        let email = self.render_email(request)?;
        debug!(
            kind = %request.kind,
            template = %request.template_name,
            attachment = email.attachment_html.is_some(),
            "email assembled"
        );
        Ok(email)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use phantommail_core::{Address, Client, Goods};
    use serde_json::json;

    use super::*;

    fn order(company: &str) -> TransportOrder {
        let address = |name: &str| Address {
            company: name.to_string(),
            address: "1 High Street\nLS1 4AP Leeds".to_string(),
            country: "United Kingdom".to_string(),
        };
        TransportOrder {
            client: Client {
                name: company.to_string(),
                sender_name: "Jane Doe".to_string(),
                company: company.to_string(),
                vat_number: "GB123456789".to_string(),
                address: "2 Dock Road".to_string(),
                city: "Hull".to_string(),
                postal_code: "HU1 1AA".to_string(),
                country: "United Kingdom".to_string(),
                email: "jane@example.com".to_string(),
                phone: "+44 1482 000000".to_string(),
            },
            goods: Goods {
                name: "Steel coils".to_string(),
                quantity: 12,
                weight: 640,
                volume: 80,
                description: "Cold rolled <grade A>".to_string(),
            },
            pickup_address: address("Pickup Ltd"),
            delivery_address: address("Delivery BV"),
            intermediate_loading_stops: Vec::new(),
            intermediate_unloading_stops: vec![address("Crossdock GmbH")],
            loading_date: NaiveDate::from_ymd_opt(2025, 3, 6).expect("date"),
            unloading_date: NaiveDate::from_ymd_opt(2025, 3, 8).expect("date"),
        }
    }

    fn order_request(order: &TransportOrder) -> DocumentRequest {
        DocumentRequest {
            kind: EmailKind::Order,
            entity: serde_json::to_value(order).expect("order json"),
            template_name: "order_email".to_string(),
            attachment_template: Some("order_attachment".to_string()),
        }
    }

    #[tokio::test]
    async fn order_values_are_escaped_and_addresses_broken_into_lines() {
        let order = order("Smith & Sons");
        let email = TemplateAssembler::new()
            .assemble(&order_request(&order))
            .await
            .expect("assemble");

        assert_eq!(email.subject, "Transport order Smith & Sons - loading 2025-03-06");
        assert!(email
            .body_html
            .contains("<title>Transport order Smith &amp; Sons - loading 2025-03-06</title>"));

        let attachment = email.attachment_html.expect("attachment");
        assert!(attachment.contains("Cold rolled &lt;grade A&gt;"));
        assert!(attachment.contains("1 High Street<br>LS1 4AP Leeds"));
        assert!(attachment.contains("<td>Crossdock GmbH</td>"));
        assert!(attachment.contains("<p>-</p>"));
    }

    #[tokio::test]
    async fn scenario_subject_comes_from_the_entity() {
        let request = DocumentRequest {
            kind: EmailKind::Complaint,
            entity: json!({
                "subject": "Complaint about my delivery",
                "formatted_message": "Hello,\n\nThe pallet <3> arrived late.\nRegards,\nJo",
                "sender_name": "Jo",
            }),
            template_name: "scenario_email".to_string(),
            attachment_template: None,
        };
        let email = TemplateAssembler::new()
            .assemble(&request)
            .await
            .expect("assemble");

        assert_eq!(email.subject, "Complaint about my delivery");
        assert!(email
            .body_html
            .contains("<p>Hello,<br><br>The pallet &lt;3&gt; arrived late.<br>Regards,<br>Jo</p>"));
        assert!(email.attachment_html.is_none());
    }

    #[tokio::test]
    async fn unknown_templates_are_errors() {
        let order = order("Acme");
        let mut request = order_request(&order);
        request.template_name = "invoice_email".to_string();
        assert!(matches!(
            TemplateAssembler::new().assemble(&request).await,
            Err(DispatchError::Template(_))
        ));

        let mut request = order_request(&order);
        request.attachment_template = Some("customs_declaration".to_string());
        assert!(matches!(
            TemplateAssembler::new().assemble(&request).await,
            Err(DispatchError::Template(_))
        ));
    }

    #[tokio::test]
    async fn entity_of_the_wrong_shape_is_a_json_error() {
        let request = DocumentRequest {
            kind: EmailKind::Declaration,
            entity: json!({ "mrn": "GB1" }),
            template_name: "declaration_email".to_string(),
            attachment_template: None,
        };
        assert!(matches!(
            TemplateAssembler::new().assemble(&request).await,
            Err(DispatchError::Json(_))
        ));
    }

    #[test]
    fn response_schema_names_email_fields() {
        let schema = serde_json::to_value(response_schema()).expect("schema json");
        let properties = schema
            .get("properties")
            .and_then(Value::as_object)
            .expect("properties");
        assert!(properties.contains_key("subject"));
        assert!(properties.contains_key("body_html"));
        assert!(properties.contains_key("attachment_html"));
    }
}

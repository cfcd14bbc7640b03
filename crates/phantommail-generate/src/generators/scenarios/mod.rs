//! Customer-facing scenario emails.
//!
//! Every scenario resolves to a plain-text `formatted_message` written by a
//! generated sender. Customer-based scenarios pick the language from the
//! customer's country and fall back to English for unmapped countries or
//! missing phrase tables.

use std::sync::OnceLock;

use phantommail_core::{CustomerRecord, EmailKind, Language};
use rand::RngCore;
use regex::Regex;
use serde::Serialize;

use crate::faker_rs::adapter::FakeRsAdapter;
use crate::faker_rs::locales::LocaleKey;
use crate::generators::{ContentGenerator, GeneratedContent, GeneratorContext, GeneratorRegistry};
use crate::reference::locale_for;

mod complaint;
mod price_request;
mod promotional;
mod question;
mod update_order;
mod waiting_costs;

pub use complaint::{Complaint, generate_complaint};
pub use price_request::{PriceRequest, generate_price_request};
pub use promotional::{Promotional, generate_promotional_email};
pub use question::{Question, generate_question};
pub use update_order::{UpdateOrder, generate_update_order_question};
pub use waiting_costs::{WaitingCosts, WaitingCostsDetails, generate_waiting_costs_scenario};

/// What every scenario result exposes to downstream consumers.
pub trait ScenarioPayload {
    fn kind(&self) -> EmailKind;
    fn language(&self) -> Language;
    fn sender_name(&self) -> &str;
    /// Body, a blank line, then the signature.
    fn formatted_message(&self) -> &str;

    /// Country of the customer the message was written for, if any.
    fn customer_country(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "scenario", rename_all = "snake_case")]
pub enum Scenario {
    Complaint(Complaint),
    Question(Question),
    PriceRequest(PriceRequest),
    UpdateOrder(UpdateOrder),
    WaitingCosts(WaitingCosts),
    Promotional(Promotional),
}

impl Scenario {
    fn payload(&self) -> &dyn ScenarioPayload {
        match self {
            Self::Complaint(value) => value,
            Self::Question(value) => value,
            Self::PriceRequest(value) => value,
            Self::UpdateOrder(value) => value,
            Self::WaitingCosts(value) => value,
            Self::Promotional(value) => value,
        }
    }
}

impl ScenarioPayload for Scenario {
    fn kind(&self) -> EmailKind {
        self.payload().kind()
    }

    fn language(&self) -> Language {
        self.payload().language()
    }

    fn sender_name(&self) -> &str {
        self.payload().sender_name()
    }

    fn formatted_message(&self) -> &str {
        self.payload().formatted_message()
    }

    fn customer_country(&self) -> Option<&str> {
        self.payload().customer_country()
    }
}

macro_rules! scenario_generator {
    ($name:ident, $kind:expr, $variant:ident, $generate:ident) => {
        pub struct $name;

        impl ContentGenerator for $name {
            fn kind(&self) -> EmailKind {
                $kind
            }

            fn generate(
                &self,
                ctx: &GeneratorContext<'_>,
                rng: &mut dyn RngCore,
            ) -> GeneratedContent {
                GeneratedContent::Scenario(Scenario::$variant($generate(ctx, rng)))
            }
        }
    };
}

scenario_generator!(ComplaintGenerator, EmailKind::Complaint, Complaint, generate_complaint);
scenario_generator!(QuestionGenerator, EmailKind::Question, Question, generate_question);
scenario_generator!(
    PriceRequestGenerator,
    EmailKind::PriceRequest,
    PriceRequest,
    generate_price_request
);
scenario_generator!(
    UpdateOrderGenerator,
    EmailKind::UpdateOrder,
    UpdateOrder,
    generate_update_order_question
);
scenario_generator!(
    WaitingCostsGenerator,
    EmailKind::WaitingCosts,
    WaitingCosts,
    generate_waiting_costs_scenario
);
scenario_generator!(
    PromotionalGenerator,
    EmailKind::Promotional,
    Promotional,
    generate_promotional_email
);

pub(crate) fn register(registry: &mut GeneratorRegistry) {
    registry.register_generator(Box::new(ComplaintGenerator));
    registry.register_generator(Box::new(QuestionGenerator));
    registry.register_generator(Box::new(PriceRequestGenerator));
    registry.register_generator(Box::new(UpdateOrderGenerator));
    registry.register_generator(Box::new(WaitingCostsGenerator));
    registry.register_generator(Box::new(PromotionalGenerator));
}

/// The customer a scenario is written on behalf of.
pub(crate) struct Persona<'a> {
    pub customer: &'a CustomerRecord,
    pub locale: LocaleKey,
    pub language: Language,
    pub sender_name: String,
}

/// Sample a customer and name a contact person in the customer's locale.
pub(crate) fn sample_persona<'a>(
    ctx: &GeneratorContext<'a>,
    rng: &mut dyn RngCore,
) -> Persona<'a> {
    let customer = ctx.reference.sample_customer(rng);
    let (locale, language) = locale_for(&customer.country);
    let sender_name = FakeRsAdapter::name(locale, rng);
    Persona {
        customer,
        locale,
        language,
        sender_name,
    }
}

fn placeholder_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"\{([a-z_]+)\}").ok())
        .as_ref()
}

/// Substitute `{name}` placeholders from `values`. Unknown names are left in
/// place so that validation can report them.
pub(crate) fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let Some(pattern) = placeholder_pattern() else {
        return template.to_string();
    };
    pattern
        .replace_all(template, |caps: &regex::Captures<'_>| {
            let name = &caps[1];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Arrangement of the signature block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum SignatureLayout {
    /// Company address over several lines, contact lines last.
    #[default]
    Block,
    /// Office letterhead with site and website lines. German only; other
    /// languages fall back to [`SignatureLayout::Block`].
    Letterhead,
    /// Contact lines first, company details joined on one line.
    Compact,
}

/// Layout plus optional trailing lines of the block layout.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SignatureStyle {
    pub layout: SignatureLayout,
    pub vat: bool,
    pub web: bool,
}

/// Signature block appended to customer-based scenarios.
///
/// German blocks sign `i. A.` on behalf of the company and always close
/// with the VAT identification line, whatever the layout.
pub(crate) fn signature_block(
    language: Language,
    closing: &str,
    sender_name: &str,
    title: &str,
    customer: &CustomerRecord,
    style: SignatureStyle,
) -> String {
    let german = language == Language::German;
    let name_line = if german {
        format!("i. A. {sender_name}")
    } else {
        sender_name.to_string()
    };

    let block = match style.layout {
        SignatureLayout::Compact => format!(
            "{closing}\n\n\
             {name_line}\n\n\
             Telefon: {phone}\n\
             E-Mail: {email}\n\n\
             {company} | {address} | {postal_code} {city} | {country}",
            company = customer.company_name,
            address = customer.address,
            postal_code = customer.postal_code,
            city = customer.city,
            country = customer.country,
            phone = customer.phone,
            email = customer.email,
        ),
        SignatureLayout::Letterhead if german => format!(
            "{closing}\n\n\
             {name_line}\n\n\
             {title}\n\n\
             Standort {city}\n\n\
             Telefon {phone}\n\
             {email}\n\
             {web}\n\n\
             {company}\n\
             {address}  |  {postal_code} {city}",
            web = website(&customer.company_name),
            company = customer.company_name,
            address = customer.address,
            postal_code = customer.postal_code,
            city = customer.city,
            phone = customer.phone,
            email = customer.email,
        ),
        _ if german => format!(
            "{closing}\n\n\
             {name_line}\n\
             {title}\n\n\
             {company}\n\
             {address}  |  {postal_code} {city}\n\n\
             Telefon: {phone}\n\
             E-Mail: {email}",
            company = customer.company_name,
            address = customer.address,
            postal_code = customer.postal_code,
            city = customer.city,
            phone = customer.phone,
            email = customer.email,
        ),
        _ => {
            let mut block = format!(
                "{closing}\n\n\
                 {name_line}\n\
                 {title}\n\n\
                 {company}\n\
                 {address}\n\
                 {postal_code} {city}\n\
                 {country}\n\n\
                 Phone: {phone}\n\
                 Email: {email}",
                company = customer.company_name,
                address = customer.address,
                postal_code = customer.postal_code,
                city = customer.city,
                country = customer.country,
                phone = customer.phone,
                email = customer.email,
            );
            if style.vat {
                block.push_str(&format!("\nVAT: {}", customer.vat_number));
            }
            if style.web {
                block.push_str(&format!("\nWeb: {}", website(&customer.company_name)));
            }
            block
        }
    };

    if german {
        format!("{block}\n\nUSt.-Id Nr.: {}", customer.vat_number)
    } else {
        block
    }
}

/// `www.<company>.com` with spaces and dots stripped.
pub(crate) fn website(company_name: &str) -> String {
    let host: String = company_name
        .to_lowercase()
        .chars()
        .filter(|ch| *ch != ' ' && *ch != '.')
        .collect();
    format!("www.{host}.com")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(country: &str) -> CustomerRecord {
        CustomerRecord {
            company_name: "Muller Logistik GmbH".to_string(),
            address: "Hafenstrasse 12".to_string(),
            city: "Hamburg".to_string(),
            postal_code: "20457".to_string(),
            country: country.to_string(),
            vat_number: "DE123456789".to_string(),
            phone: "+49 40 1234567".to_string(),
            email: "info@muller-logistik.de".to_string(),
        }
    }

    #[test]
    fn fill_replaces_known_placeholders_only() {
        let text = fill(
            "From {origin} to {destination} at {price}",
            &[("origin", "Ghent"), ("destination", "Leeds")],
        );
        assert_eq!(text, "From Ghent to Leeds at {price}");
    }

    #[test]
    fn german_signature_signs_on_behalf() {
        let block = signature_block(
            Language::German,
            "Mit freundlichen Grüßen",
            "Anna Schmidt",
            "Leiter Logistik",
            &customer("Germany"),
            SignatureStyle::default(),
        );
        assert!(block.lines().any(|line| line == "i. A. Anna Schmidt"));
        assert_eq!(block.lines().last(), Some("USt.-Id Nr.: DE123456789"));
    }

    #[test]
    fn standard_signature_adds_requested_extras() {
        let block = signature_block(
            Language::English,
            "Kind regards",
            "Jane Doe",
            "Sales Manager",
            &customer("Senegal"),
            SignatureStyle {
                vat: true,
                web: true,
                ..SignatureStyle::default()
            },
        );
        assert!(block.contains("\nPhone: +49 40 1234567\n"));
        assert!(block.contains("\nVAT: DE123456789"));
        assert!(block.ends_with("Web: www.mullerlogistikgmbh.com"));
        assert!(!block.contains("i. A."));
    }

    #[test]
    fn german_letterhead_names_site_and_website() {
        let block = signature_block(
            Language::German,
            "Mit freundlichen Grüßen",
            "Anna Schmidt",
            "Disposition",
            &customer("Germany"),
            SignatureStyle {
                layout: SignatureLayout::Letterhead,
                ..SignatureStyle::default()
            },
        );
        let lines: Vec<&str> = block.lines().collect();
        assert!(lines.contains(&"i. A. Anna Schmidt"));
        assert!(lines.contains(&"Standort Hamburg"));
        assert!(lines.contains(&"Telefon +49 40 1234567"));
        assert!(lines.contains(&"www.mullerlogistikgmbh.com"));
        assert!(lines.contains(&"Hafenstrasse 12  |  20457 Hamburg"));
        assert_eq!(lines.last(), Some(&"USt.-Id Nr.: DE123456789"));
    }

    #[test]
    fn letterhead_outside_german_uses_the_block_layout() {
        let style = SignatureStyle {
            layout: SignatureLayout::Letterhead,
            vat: true,
            web: false,
        };
        let letterhead = signature_block(
            Language::French,
            "Cordialement",
            "Marie Dubois",
            "Responsable transport",
            &customer("France"),
            style,
        );
        let block = signature_block(
            Language::French,
            "Cordialement",
            "Marie Dubois",
            "Responsable transport",
            &customer("France"),
            SignatureStyle {
                layout: SignatureLayout::Block,
                ..style
            },
        );
        assert_eq!(letterhead, block);
        assert!(!letterhead.contains("Standort"));
    }

    #[test]
    fn compact_signature_joins_company_details() {
        let english = signature_block(
            Language::English,
            "Kind regards",
            "Jane Doe",
            "Planner",
            &customer("Netherlands"),
            SignatureStyle {
                layout: SignatureLayout::Compact,
                ..SignatureStyle::default()
            },
        );
        assert!(english.contains("\nJane Doe\n\nTelefon: +49 40 1234567\nE-Mail: info@muller-logistik.de\n"));
        assert!(english.ends_with(
            "Muller Logistik GmbH | Hafenstrasse 12 | 20457 Hamburg | Netherlands"
        ));
        assert!(!english.contains("Planner"));

        let german = signature_block(
            Language::German,
            "Mit freundlichen Grüßen",
            "Anna Schmidt",
            "Disposition",
            &customer("Germany"),
            SignatureStyle {
                layout: SignatureLayout::Compact,
                ..SignatureStyle::default()
            },
        );
        assert!(german.contains("\ni. A. Anna Schmidt\n\nTelefon:"));
        assert!(german.ends_with(
            "| 20457 Hamburg | Germany\n\nUSt.-Id Nr.: DE123456789"
        ));
    }
}

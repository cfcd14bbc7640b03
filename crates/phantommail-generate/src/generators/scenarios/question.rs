use phantommail_core::{EmailKind, Language};
use rand::RngCore;
use serde::Serialize;

use super::complaint::single_line;
use super::{ScenarioPayload, fill};
use crate::faker_rs::adapter::FakeRsAdapter;
use crate::faker_rs::locales::LocaleKey;
use crate::generators::{GeneratorContext, pick};

const LOCALE: LocaleKey = LocaleKey::EnGb;

const TEMPLATES: &[&str] = &[
    "What is the scheduled pickup time at {pickup_address}?",
    "When will the goods be delivered to {delivery_address}?",
    "Which route is planned for the transport from {pickup_city} to {delivery_city}?",
    "What are the loading stops for the order leaving from {pickup_city}?",
    "Can you confirm the transport details for the shipment from {pickup_company}?",
];

/// A short operational question about a transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub question: String,
    pub sender_name: String,
    pub formatted_message: String,
}

pub fn generate_question(_ctx: &GeneratorContext<'_>, rng: &mut dyn RngCore) -> Question {
    let template = *pick(TEMPLATES, rng);
    let pickup_address = single_line(&FakeRsAdapter::address(LOCALE, rng));
    let delivery_address = single_line(&FakeRsAdapter::address(LOCALE, rng));
    let pickup_city = FakeRsAdapter::city(LOCALE, rng);
    let delivery_city = FakeRsAdapter::city(LOCALE, rng);
    let pickup_company = FakeRsAdapter::company(LOCALE, rng);
    let sender_name = FakeRsAdapter::name(LOCALE, rng);

    let question = fill(
        template,
        &[
            ("pickup_address", pickup_address.as_str()),
            ("delivery_address", delivery_address.as_str()),
            ("pickup_city", pickup_city.as_str()),
            ("delivery_city", delivery_city.as_str()),
            ("pickup_company", pickup_company.as_str()),
        ],
    );
    let formatted_message = format!("{question}\n\nBest regards,\n{sender_name}");

    Question {
        question,
        sender_name,
        formatted_message,
    }
}

impl ScenarioPayload for Question {
    fn kind(&self) -> EmailKind {
        EmailKind::Question
    }

    fn language(&self) -> Language {
        Language::English
    }

    fn sender_name(&self) -> &str {
        &self.sender_name
    }

    fn formatted_message(&self) -> &str {
        &self.formatted_message
    }
}

use chrono::Days;
use phantommail_core::{EmailKind, Language, Localized};
use rand::{Rng, RngCore};
use serde::Serialize;

use super::{
    ScenarioPayload, SignatureLayout, SignatureStyle, fill, sample_persona, signature_block,
};
use crate::faker_rs::adapter::FakeRsAdapter;
use crate::generators::{GeneratorContext, pick};

const TITLES: Localized<&[&str]> = Localized {
    english: &[
        "Transport Manager",
        "Logistics Coordinator",
        "Procurement Manager",
    ],
    dutch: Some(&[
        "Transport Manager",
        "Logistiek Coördinator",
        "Inkoop Manager Transport",
    ]),
    german: Some(&[
        "Transport Manager",
        "Logistikkoordinator",
        "Einkaufsleiter Transport",
    ]),
    spanish: Some(&[
        "Gerente de Transporte",
        "Coordinador Logístico",
        "Jefe de Compras",
    ]),
    french: Some(&[
        "Responsable Transport",
        "Coordinateur Logistique",
        "Responsable Achats",
    ]),
};

const TEMPLATES: Localized<&[&str]> = Localized {
    english: &[
        "Could we agree on {proposed_price}€? I actually have {budget_price}€ for this destination.",
        "For the route {origin} - {destination}, I can offer maximum {budget_price}€. Is this negotiable?",
        "We have a budget of {budget_price}€ for this transport. Can you offer a better price?",
    ],
    dutch: Some(&[
        "Kunnen we akkoord gaan met {proposed_price}€? Ik heb momenteel {budget_price}€ voor deze bestemming.",
        "Voor de route {origin} - {destination} kan ik maximaal {budget_price}€ bieden. Is dit bespreekbaar?",
        "We hebben een budget van {budget_price}€ voor dit transport. Kunnen jullie een betere prijs aanbieden?",
    ]),
    german: Some(&[
        "Könnten wir uns auf {proposed_price}€ einigen? Ich habe tatsächlich {budget_price}€ für dieses Ziel.",
        "Für die Route {origin} - {destination} kann ich maximal {budget_price}€ anbieten. Ist das verhandelbar?",
        "Wir haben ein Budget von {budget_price}€ für diesen Transport. Können Sie einen besseren Preis anbieten?",
    ]),
    spanish: Some(&[
        "¿Podríamos acordar {proposed_price}€? En realidad tengo {budget_price}€ para este destino.",
        "Para la ruta {origin} - {destination}, puedo ofrecer máximo {budget_price}€. ¿Es negociable?",
        "Tenemos un presupuesto de {budget_price}€ para este transporte. ¿Pueden ofrecer un mejor precio?",
    ]),
    french: Some(&[
        "Pourrions-nous nous mettre d'accord sur {proposed_price}€? J'ai en fait {budget_price}€ pour cette destination.",
        "Pour le trajet {origin} - {destination}, je peux offrir maximum {budget_price}€. Est-ce négociable?",
        "Nous avons un budget de {budget_price}€ pour ce transport. Pouvez-vous offrir un meilleur prix?",
    ]),
};

const CLOSINGS: Localized<&[&str]> = Localized {
    english: &["Best regards", "Kind regards", "Regards"],
    dutch: Some(&["Met vriendelijke groet", "Vriendelijke groeten", "Hoogachtend"]),
    german: Some(&["Mit freundlichen Grüßen", "Freundliche Grüße", "Beste Grüße"]),
    spanish: Some(&["Saludos cordiales", "Atentamente", "Un saludo"]),
    french: Some(&["Cordialement", "Bien cordialement", "Meilleures salutations"]),
};

/// A customer negotiating the price of a transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRequest {
    pub price_message: String,
    pub sender_name: String,
    pub sender_title: String,
    pub company: String,
    pub country: String,
    pub language: Language,
    pub origin: String,
    pub destination: String,
    /// `dd/mm/YYYY`.
    pub transport_date: String,
    /// Price the carrier asked for.
    pub proposed_price: u32,
    /// Price the customer is willing to pay; always below `proposed_price`.
    pub budget_price: u32,
    pub signature: String,
    pub formatted_message: String,
}

pub fn generate_price_request(ctx: &GeneratorContext<'_>, rng: &mut dyn RngCore) -> PriceRequest {
    let persona = sample_persona(ctx, rng);
    let language = persona.language;
    let title = *pick(TITLES.get(language), rng);

    let origin = FakeRsAdapter::city(persona.locale, rng);
    let destination = FakeRsAdapter::city(persona.locale, rng);

    let base_price: u32 = rng.random_range(1500..=4000);
    let proposed_price = base_price + rng.random_range(100..=500);
    let budget_price = base_price - rng.random_range(100..=400);

    let transport_date = ctx.today() + Days::new(rng.random_range(7..=30));

    let template = *pick(TEMPLATES.get(language), rng);
    let proposed = proposed_price.to_string();
    let budget = budget_price.to_string();
    let price_message = fill(
        template,
        &[
            ("proposed_price", proposed.as_str()),
            ("budget_price", budget.as_str()),
            ("origin", origin.as_str()),
            ("destination", destination.as_str()),
        ],
    );

    let closing = *pick(CLOSINGS.get(language), rng);
    let signature = signature_block(
        language,
        closing,
        &persona.sender_name,
        title,
        persona.customer,
        SignatureStyle {
            layout: SignatureLayout::Letterhead,
            vat: true,
            web: false,
        },
    );
    let formatted_message = format!("{price_message}\n\n{signature}");

    PriceRequest {
        price_message,
        sender_name: persona.sender_name,
        sender_title: title.to_string(),
        company: persona.customer.company_name.clone(),
        country: persona.customer.country.clone(),
        language,
        origin,
        destination,
        transport_date: transport_date.format("%d/%m/%Y").to_string(),
        proposed_price,
        budget_price,
        signature,
        formatted_message,
    }
}

impl ScenarioPayload for PriceRequest {
    fn kind(&self) -> EmailKind {
        EmailKind::PriceRequest
    }

    fn language(&self) -> Language {
        self.language
    }

    fn sender_name(&self) -> &str {
        &self.sender_name
    }

    fn formatted_message(&self) -> &str {
        &self.formatted_message
    }

    fn customer_country(&self) -> Option<&str> {
        Some(&self.country)
    }
}

use phantommail_core::{EmailKind, Language, Localized};
use rand::{Rng, RngCore};
use serde::Serialize;

use super::{ScenarioPayload, SignatureLayout, SignatureStyle, sample_persona, signature_block};
use crate::generators::{GeneratorContext, pick};

const QUESTIONS: Localized<&[&str]> = Localized {
    english: &[
        "could you please send us the trailer and truck number?",
        "can you confirm the estimated arrival time?",
        "what is the current status of this transport?",
        "has the truck already departed?",
        "can you provide the driver's contact information?",
        "please confirm the exact loading/unloading times.",
    ],
    dutch: Some(&[
        "kunt u ons de trailer- en vrachtwagennummer sturen?",
        "kunt u de verwachte aankomsttijd bevestigen?",
        "wat is de huidige status van dit transport?",
        "is de vrachtwagen al vertrokken?",
        "kunt u de contactgegevens van de chauffeur verstrekken?",
        "bevestig alstublieft de exacte laad-/lostijden.",
    ]),
    german: Some(&[
        "könnten Sie uns bitte die Anhänger- und LKW-Nummer senden?",
        "können Sie die voraussichtliche Ankunftszeit bestätigen?",
        "was ist der aktuelle Status dieses Transports?",
        "ist der LKW bereits abgefahren?",
        "können Sie die Kontaktdaten des Fahrers mitteilen?",
        "bitte bestätigen Sie die genauen Lade-/Entladezeiten.",
    ]),
    spanish: Some(&[
        "¿podría enviarnos el número de remolque y camión?",
        "¿puede confirmar la hora estimada de llegada?",
        "¿cuál es el estado actual de este transporte?",
        "¿el camión ya ha salido?",
        "¿puede proporcionar la información de contacto del conductor?",
        "por favor confirme los horarios exactos de carga/descarga.",
    ]),
    french: Some(&[
        "pourriez-vous nous envoyer le numéro de remorque et de camion?",
        "pouvez-vous confirmer l'heure d'arrivée estimée?",
        "quel est le statut actuel de ce transport?",
        "le camion est-il déjà parti?",
        "pouvez-vous fournir les coordonnées du chauffeur?",
        "veuillez confirmer les heures exactes de chargement/déchargement.",
    ]),
};

const GREETINGS: Localized<&[&str]> = Localized {
    english: &["Hello", "Good morning", "Good afternoon"],
    dutch: Some(&["Hallo", "Goedemorgen", "Goedemiddag"]),
    german: Some(&["Hallo", "Guten Morgen", "Guten Tag"]),
    spanish: Some(&["Hola", "Buenos días", "Buenas tardes"]),
    french: Some(&["Bonjour"]),
};

const TITLES: Localized<&[&str]> = Localized {
    english: &[
        "Transport Coordinator",
        "Logistics Assistant",
        "Operations Assistant",
    ],
    dutch: Some(&[
        "Transport Coördinator",
        "Logistiek Assistent",
        "Operationeel Assistent",
    ]),
    german: Some(&[
        "Transportkoordinator",
        "Logistikassistent",
        "Betriebsassistent",
    ]),
    spanish: Some(&[
        "Coordinador de Transporte",
        "Asistente Logístico",
        "Asistente de Operaciones",
    ]),
    french: Some(&[
        "Coordinateur Transport",
        "Assistant Logistique",
        "Assistant Opérations",
    ]),
};

const CLOSINGS: Localized<&str> = Localized {
    english: "Kind regards",
    dutch: Some("Met vriendelijke groet"),
    german: Some("Mit freundlichen Grüßen"),
    spanish: Some("Saludos cordiales"),
    french: Some("Cordialement"),
};

/// A customer asking for an update on a running order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateOrder {
    pub greeting: String,
    pub question: String,
    pub sender_name: String,
    pub sender_title: String,
    pub company: String,
    pub country: String,
    pub language: Language,
    /// `2025xxxx/NN`.
    pub order_ref: String,
    /// `VTR` and six digits.
    pub tracking_ref: String,
    pub signature: String,
    pub formatted_message: String,
}

pub fn generate_update_order_question(
    ctx: &GeneratorContext<'_>,
    rng: &mut dyn RngCore,
) -> UpdateOrder {
    let persona = sample_persona(ctx, rng);
    let language = persona.language;
    let title = *pick(TITLES.get(language), rng);

    let order_ref = format!(
        "{}/{:02}",
        rng.random_range(20_250_000..=20_259_999),
        rng.random_range(1..=99)
    );
    let tracking_ref = format!("VTR{}", rng.random_range(100_000..=999_999));

    let greeting = *pick(GREETINGS.get(language), rng);
    let question = *pick(QUESTIONS.get(language), rng);

    // German offices sign off in the languages of the route.
    let closing = match language {
        Language::German => format!("{} | Kind regards | Z poważaniem", CLOSINGS.get(language)),
        _ => CLOSINGS.get(language).to_string(),
    };
    let signature = signature_block(
        language,
        &closing,
        &persona.sender_name,
        title,
        persona.customer,
        SignatureStyle {
            layout: SignatureLayout::Compact,
            ..SignatureStyle::default()
        },
    );
    let formatted_message = format!("{greeting},\n\n{question}\n\n{signature}");

    UpdateOrder {
        greeting: greeting.to_string(),
        question: question.to_string(),
        sender_name: persona.sender_name,
        sender_title: title.to_string(),
        company: persona.customer.company_name.clone(),
        country: persona.customer.country.clone(),
        language,
        order_ref,
        tracking_ref,
        signature,
        formatted_message,
    }
}

impl ScenarioPayload for UpdateOrder {
    fn kind(&self) -> EmailKind {
        EmailKind::UpdateOrder
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

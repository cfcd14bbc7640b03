use chrono::{Days, NaiveDate};
use phantommail_core::{EmailKind, Language, Localized};
use rand::{Rng, RngCore};
use serde::Serialize;

use super::{ScenarioPayload, SignatureStyle, fill, sample_persona, signature_block};
use crate::generators::{GeneratorContext, pick};

#[derive(Debug, Clone, Copy)]
struct PromoTheme {
    title: &'static str,
    content: &'static str,
    benefit: &'static str,
    cta: &'static str,
}

const THEMES: Localized<&[PromoTheme]> = Localized {
    english: &[
        PromoTheme {
            title: "New Express Routes Now Available!",
            content: "We're excited to announce new express delivery routes to major European cities. Get your goods delivered 30% faster!",
            benefit: "30% faster delivery times",
            cta: "Contact us to learn more about our express routes",
        },
        PromoTheme {
            title: "Special Discount on International Transport",
            content: "For a limited time, enjoy {discount}% off on all international shipments over 1000km.",
            benefit: "{discount}% discount on long-distance transport",
            cta: "Book your transport today and save",
        },
        PromoTheme {
            title: "Introducing Our Advanced Tracking System",
            content: "Track your shipments in real-time with our new GPS-enabled tracking platform. Know exactly where your goods are, 24/7.",
            benefit: "Real-time shipment tracking",
            cta: "Request a demo of our tracking system",
        },
        PromoTheme {
            title: "Fleet Expansion - More Capacity Available",
            content: "We've added 50 new trucks to our fleet! More capacity means faster booking and better availability for your transport needs.",
            benefit: "Increased transport capacity",
            cta: "Reserve your spot now",
        },
        PromoTheme {
            title: "Green Transport Initiative",
            content: "Join us in reducing carbon emissions! Our new eco-friendly fleet offers the same reliability with 40% less environmental impact.",
            benefit: "40% lower carbon emissions",
            cta: "Learn about our sustainability program",
        },
    ],
    dutch: Some(&[
        PromoTheme {
            title: "Nieuwe Express Routes Nu Beschikbaar!",
            content: "We zijn verheugd om nieuwe express leveringsroutes naar grote Europese steden aan te kondigen. Krijg uw goederen 30% sneller geleverd!",
            benefit: "30% snellere levertijden",
            cta: "Neem contact op voor meer informatie over onze express routes",
        },
        PromoTheme {
            title: "Speciale Korting op Internationaal Transport",
            content: "Voor een beperkte tijd, geniet van {discount}% korting op alle internationale zendingen boven 1000km.",
            benefit: "{discount}% korting op lange afstand transport",
            cta: "Boek vandaag uw transport en bespaar",
        },
        PromoTheme {
            title: "Introductie van Ons Geavanceerde Tracking Systeem",
            content: "Volg uw zendingen in real-time met ons nieuwe GPS-tracking platform. Weet precies waar uw goederen zijn, 24/7.",
            benefit: "Real-time zending tracking",
            cta: "Vraag een demo aan van ons tracking systeem",
        },
    ]),
    german: Some(&[
        PromoTheme {
            title: "Neue Express-Routen jetzt verfügbar!",
            content: "Wir freuen uns, neue Express-Lieferrouten zu großen europäischen Städten anzukündigen. Ihre Waren werden 30% schneller geliefert!",
            benefit: "30% schnellere Lieferzeiten",
            cta: "Kontaktieren Sie uns für mehr Informationen",
        },
        PromoTheme {
            title: "Sonderrabatt auf internationale Transporte",
            content: "Für begrenzte Zeit erhalten Sie {discount}% Rabatt auf alle internationalen Sendungen über 1000km.",
            benefit: "{discount}% Rabatt auf Ferntransporte",
            cta: "Buchen Sie heute und sparen Sie",
        },
        PromoTheme {
            title: "Grüne Transport-Initiative",
            content: "Reduzieren Sie mit uns CO2-Emissionen! Unsere neue umweltfreundliche Flotte bietet die gleiche Zuverlässigkeit mit 40% weniger Umweltbelastung.",
            benefit: "40% weniger CO2-Emissionen",
            cta: "Erfahren Sie mehr über unser Nachhaltigkeitsprogramm",
        },
    ]),
    spanish: Some(&[
        PromoTheme {
            title: "¡Nuevas Rutas Express Disponibles!",
            content: "Nos complace anunciar nuevas rutas de entrega express a las principales ciudades europeas. ¡Sus mercancías se entregan un 30% más rápido!",
            benefit: "30% tiempos de entrega más rápidos",
            cta: "Contáctenos para más información",
        },
        PromoTheme {
            title: "Descuento Especial en Transporte Internacional",
            content: "Por tiempo limitado, disfrute de un {discount}% de descuento en todos los envíos internacionales de más de 1000km.",
            benefit: "{discount}% de descuento en transporte de larga distancia",
            cta: "Reserve su transporte hoy y ahorre",
        },
    ]),
    french: Some(&[
        PromoTheme {
            title: "Nouvelles Routes Express Disponibles!",
            content: "Nous sommes ravis d'annoncer de nouvelles routes de livraison express vers les grandes villes européennes. Vos marchandises livrées 30% plus rapidement!",
            benefit: "30% de temps de livraison en moins",
            cta: "Contactez-nous pour en savoir plus",
        },
        PromoTheme {
            title: "Réduction Spéciale sur le Transport International",
            content: "Pour une durée limitée, bénéficiez de {discount}% de réduction sur tous les envois internationaux de plus de 1000km.",
            benefit: "{discount}% de réduction sur le transport longue distance",
            cta: "Réservez votre transport aujourd'hui et économisez",
        },
    ]),
};

const TITLES: Localized<&[&str]> = Localized {
    english: &[
        "Sales Manager",
        "Business Development Manager",
        "Marketing Manager",
    ],
    dutch: None,
    german: Some(&[
        "Vertriebsleiter",
        "Geschäftsentwicklungsleiter",
        "Marketing Manager",
    ]),
    spanish: Some(&[
        "Gerente de Ventas",
        "Gerente de Desarrollo de Negocios",
        "Gerente de Marketing",
    ]),
    french: Some(&[
        "Responsable Commercial",
        "Responsable Développement",
        "Responsable Marketing",
    ]),
};

const CLOSINGS: Localized<&[&str]> = Localized {
    english: &["Best regards", "Kind regards", "Sincerely"],
    dutch: Some(&["Met vriendelijke groet", "Vriendelijke groeten", "Hoogachtend"]),
    german: Some(&["Mit freundlichen Grüßen", "Freundliche Grüße", "Beste Grüße"]),
    spanish: Some(&["Saludos cordiales", "Atentamente", "Un cordial saludo"]),
    french: Some(&["Cordialement", "Bien cordialement", "Sincères salutations"]),
};

const VALIDITY: Localized<&str> = Localized {
    english: "Valid from {start} to {end}",
    dutch: Some("Geldig van {start} tot {end}"),
    german: Some("Gültig vom {start} bis {end}"),
    spanish: Some("Válido desde {start} hasta {end}"),
    french: Some("Valable du {start} au {end}"),
};

/// A transport company advertising a service or discount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Promotional {
    pub promo_title: String,
    pub promo_content: String,
    pub promo_benefit: String,
    pub promo_cta: String,
    /// Percentage drawn once per email, used wherever the theme mentions it.
    pub discount: u32,
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
    pub validity: String,
    pub sender_name: String,
    pub sender_title: String,
    pub company: String,
    pub country: String,
    pub language: Language,
    pub closing: String,
    pub signature: String,
    pub formatted_message: String,
}

pub fn generate_promotional_email(
    ctx: &GeneratorContext<'_>,
    rng: &mut dyn RngCore,
) -> Promotional {
    let persona = sample_persona(ctx, rng);
    let language = persona.language;

    let theme = *pick(THEMES.get(language), rng);
    let discount: u32 = rng.random_range(10..=30);
    let discount_text = discount.to_string();
    let values = [("discount", discount_text.as_str())];
    let promo_content = fill(theme.content, &values);
    let promo_benefit = fill(theme.benefit, &values);

    let valid_from = ctx.today();
    let valid_until = valid_from + Days::new(rng.random_range(14..=30));
    let validity = validity_text(language, valid_from, valid_until);

    let title = *pick(TITLES.get(language), rng);
    let closing = *pick(CLOSINGS.get(language), rng);
    let signature = signature_block(
        language,
        closing,
        &persona.sender_name,
        title,
        persona.customer,
        SignatureStyle {
            vat: false,
            web: true,
            ..SignatureStyle::default()
        },
    );

    let formatted_message = format!(
        "{}\n\n{promo_content}\n\n{promo_benefit}\n\n{validity}\n\n{}\n\n{signature}",
        theme.title, theme.cta
    );

    Promotional {
        promo_title: theme.title.to_string(),
        promo_content,
        promo_benefit,
        promo_cta: theme.cta.to_string(),
        discount,
        valid_from,
        valid_until,
        validity,
        sender_name: persona.sender_name,
        sender_title: title.to_string(),
        company: persona.customer.company_name.clone(),
        country: persona.customer.country.clone(),
        language,
        closing: closing.to_string(),
        signature,
        formatted_message,
    }
}

/// German dates are written `dd.mm.YYYY`, every other language `dd/mm/YYYY`.
fn validity_text(language: Language, start: NaiveDate, end: NaiveDate) -> String {
    let pattern = match language {
        Language::German => "%d.%m.%Y",
        _ => "%d/%m/%Y",
    };
    let start = start.format(pattern).to_string();
    let end = end.format(pattern).to_string();
    fill(
        VALIDITY.get(language),
        &[("start", start.as_str()), ("end", end.as_str())],
    )
}

impl ScenarioPayload for Promotional {
    fn kind(&self) -> EmailKind {
        EmailKind::Promotional
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

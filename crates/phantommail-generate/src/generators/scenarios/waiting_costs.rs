use chrono::Days;
use phantommail_core::{EmailKind, Language, Localized};
use rand::{Rng, RngCore};
use serde::Serialize;

use super::{ScenarioPayload, SignatureStyle, fill, sample_persona, signature_block};
use crate::faker_rs::adapter::FakeRsAdapter;
use crate::generators::{GeneratorContext, pick};

const REASONS: Localized<&[&str]> = Localized {
    english: &[
        "there was no forklift driver on site",
        "the warehouse was unexpectedly closed",
        "nobody was available to receive the goods",
        "the delivery address was incorrect",
        "access to the delivery point was restricted",
        "the unloading dock was occupied",
    ],
    dutch: Some(&[
        "er was geen heftruckchauffeur aanwezig",
        "het magazijn was onverwacht gesloten",
        "er was niemand aanwezig om de goederen in ontvangst te nemen",
        "het afleveradres was incorrect",
        "toegang tot het afleveradres was beperkt",
        "het losperron was bezet",
    ]),
    german: Some(&[
        "es war kein Staplerfahrer vor Ort",
        "das Lager war unerwartet geschlossen",
        "niemand war verfügbar, um die Ware entgegenzunehmen",
        "die Lieferadresse war falsch",
        "der Zugang zum Lieferort war eingeschränkt",
        "die Entladestelle war besetzt",
    ]),
    spanish: Some(&[
        "no había conductor de carretilla elevadora en el sitio",
        "el almacén estaba inesperadamente cerrado",
        "nadie estaba disponible para recibir la mercancía",
        "la dirección de entrega era incorrecta",
        "el acceso al punto de entrega estaba restringido",
        "el muelle de descarga estaba ocupado",
    ]),
    french: Some(&[
        "il n'y avait pas de cariste sur place",
        "l'entrepôt était fermé de manière inattendue",
        "personne n'était disponible pour recevoir les marchandises",
        "l'adresse de livraison était incorrecte",
        "l'accès au point de livraison était restreint",
        "le quai de déchargement était occupé",
    ]),
};

const DISPUTES: Localized<&[&str]> = Localized {
    english: &[
        "I understand that this is a difficult situation. If such cases arise, we need to be informed asap, so that we can work with {destination_company} to find a solution. You cannot send the truck away and bill us for the costs. That's not how it works.",
        "We acknowledge the inconvenience caused to your driver. However, we must dispute these charges as we were not informed of the issue when it occurred. In future, please contact us immediately so we can resolve such situations together.",
        "While we regret the delay experienced by your driver, we cannot accept these waiting charges. Our protocol requires immediate notification of delivery issues to allow us to coordinate with the delivery location.",
    ],
    dutch: Some(&[
        "Ik begrijp dat dit een moeilijke situatie is. Als dergelijke gevallen zich voordoen, moeten we zo snel mogelijk geïnformeerd worden, zodat we met {destination_company} kunnen samenwerken om een oplossing te vinden. U kunt de vrachtwagen niet wegsturen en ons de kosten in rekening brengen. Zo werkt het niet.",
        "We erkennen het ongemak voor uw chauffeur. We moeten deze kosten echter betwisten omdat we niet op de hoogte zijn gesteld toen het probleem zich voordeed. Neem in de toekomst onmiddellijk contact met ons op zodat we dergelijke situaties samen kunnen oplossen.",
        "Hoewel we de vertraging voor uw chauffeur betreuren, kunnen we deze wachtkosten niet accepteren. Ons protocol vereist onmiddellijke melding van leveringsproblemen zodat we kunnen coördineren met de leveringslocatie.",
    ]),
    german: Some(&[
        "Ich verstehe, dass dies eine schwierige Situation ist. Wenn solche Fälle auftreten, müssen wir umgehend informiert werden, damit wir mit {destination_company} eine Lösung finden können. Sie können den LKW nicht wegschicken und uns die Kosten in Rechnung stellen. So funktioniert das nicht.",
        "Wir erkennen die Unannehmlichkeiten für Ihren Fahrer an. Wir müssen diese Gebühren jedoch anfechten, da wir nicht informiert wurden, als das Problem auftrat. Bitte kontaktieren Sie uns in Zukunft sofort, damit wir solche Situationen gemeinsam lösen können.",
        "Obwohl wir die Verzögerung für Ihren Fahrer bedauern, können wir diese Wartegebühren nicht akzeptieren. Unser Protokoll erfordert eine sofortige Benachrichtigung bei Lieferproblemen, damit wir mit dem Lieferort koordinieren können.",
    ]),
    spanish: Some(&[
        "Entiendo que esta es una situación difícil. Si surgen estos casos, necesitamos ser informados lo antes posible para poder trabajar con {destination_company} y encontrar una solución. No pueden enviar el camión y cobrarnos los costos. Así no funciona.",
        "Reconocemos las molestias causadas a su conductor. Sin embargo, debemos disputar estos cargos ya que no fuimos informados del problema cuando ocurrió. En el futuro, contáctenos inmediatamente para resolver estas situaciones juntos.",
        "Aunque lamentamos el retraso experimentado por su conductor, no podemos aceptar estos cargos de espera. Nuestro protocolo requiere notificación inmediata de problemas de entrega para coordinar con el lugar de entrega.",
    ]),
    french: Some(&[
        "Je comprends que c'est une situation difficile. Si de tels cas se présentent, nous devons être informés dès que possible afin de travailler avec {destination_company} pour trouver une solution. Vous ne pouvez pas renvoyer le camion et nous facturer les frais. Ce n'est pas ainsi que cela fonctionne.",
        "Nous reconnaissons le désagrément causé à votre chauffeur. Cependant, nous devons contester ces frais car nous n'avons pas été informés du problème lorsqu'il s'est produit. À l'avenir, veuillez nous contacter immédiatement afin que nous puissions résoudre ces situations ensemble.",
        "Bien que nous regrettions le retard subi par votre chauffeur, nous ne pouvons accepter ces frais d'attente. Notre protocole exige une notification immédiate des problèmes de livraison pour nous permettre de coordonner avec le lieu de livraison.",
    ]),
};

const CLOSING_MESSAGES: Localized<&[&str]> = Localized {
    english: &[
        "If you have any problems with deliveries in the future, please let us know immediately and we will try to support.",
        "Please ensure immediate communication in future cases to avoid such situations.",
        "We appreciate your understanding and look forward to improved coordination in the future.",
    ],
    dutch: Some(&[
        "Als u in de toekomst problemen heeft met leveringen, laat het ons dan onmiddellijk weten en we zullen proberen te ondersteunen.",
        "Zorg voor onmiddellijke communicatie in toekomstige gevallen om dergelijke situaties te vermijden.",
        "We waarderen uw begrip en kijken uit naar verbeterde coördinatie in de toekomst.",
    ]),
    german: Some(&[
        "Wenn Sie in Zukunft Probleme mit Lieferungen haben, lassen Sie es uns bitte sofort wissen und wir werden versuchen zu unterstützen.",
        "Bitte stellen Sie in zukünftigen Fällen eine sofortige Kommunikation sicher, um solche Situationen zu vermeiden.",
        "Wir schätzen Ihr Verständnis und freuen uns auf eine verbesserte Koordination in der Zukunft.",
    ]),
    spanish: Some(&[
        "Si tiene algún problema con las entregas en el futuro, háganoslo saber de inmediato e intentaremos apoyar.",
        "Asegure una comunicación inmediata en casos futuros para evitar estas situaciones.",
        "Apreciamos su comprensión y esperamos una mejor coordinación en el futuro.",
    ]),
    french: Some(&[
        "Si vous avez des problèmes avec les livraisons à l'avenir, veuillez nous en informer immédiatement et nous essaierons de vous aider.",
        "Veuillez assurer une communication immédiate dans les cas futurs pour éviter de telles situations.",
        "Nous apprécions votre compréhension et attendons avec impatience une meilleure coordination à l'avenir.",
    ]),
};

const TITLES: Localized<&[&str]> = Localized {
    english: &[
        "Logistics Manager",
        "Transport Manager",
        "Supply Chain Manager",
    ],
    dutch: Some(&[
        "Logistiek Manager",
        "Transport Manager",
        "Supply Chain Manager",
    ]),
    german: Some(&["Leiter Logistik", "Verkehrsleiter", "Supply Chain Manager"]),
    spanish: Some(&[
        "Gerente de Logística",
        "Gerente de Transporte",
        "Gerente de Cadena de Suministro",
    ]),
    french: Some(&[
        "Responsable Logistique",
        "Responsable Transport",
        "Responsable Supply Chain",
    ]),
};

const FORMAL_CLOSINGS: Localized<&str> = Localized {
    english: "Regards",
    dutch: Some("Met vriendelijke groet"),
    german: Some("Mit freundlichen Grüßen"),
    spanish: Some("Saludos cordiales"),
    french: Some("Cordialement"),
};

/// The delivery a carrier billed waiting time for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaitingCostsDetails {
    pub delivery_city: String,
    pub destination_company: String,
    /// `dd/mm/YYYY`, one to seven days ago.
    pub delivery_date: String,
    pub order_ref: String,
    pub delivery_ref: String,
    pub internal_ref: String,
    pub tracking_ref: String,
    pub waiting_reason: String,
    pub waiting_hours: u32,
    pub cost_per_hour: u32,
    /// `waiting_hours * cost_per_hour`.
    pub total_cost: u32,
}

/// A customer disputing waiting costs billed by the carrier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaitingCosts {
    pub details: WaitingCostsDetails,
    pub dispute_message: String,
    pub closing_message: String,
    pub sender_name: String,
    pub sender_title: String,
    pub company: String,
    pub country: String,
    pub language: Language,
    pub signature: String,
    pub formatted_message: String,
}

pub fn generate_waiting_costs_scenario(
    ctx: &GeneratorContext<'_>,
    rng: &mut dyn RngCore,
) -> WaitingCosts {
    let persona = sample_persona(ctx, rng);
    let language = persona.language;

    let delivery_city = FakeRsAdapter::city(persona.locale, rng);
    let destination_company = FakeRsAdapter::company(persona.locale, rng);
    let delivery_date = ctx.today() - Days::new(rng.random_range(1..=7));

    let order_ref = format!(
        "{}/{:02}",
        rng.random_range(20_250_000..=20_259_999),
        rng.random_range(1..=99)
    );
    let delivery_ref = rng.random_range(50_000_000..=59_999_999).to_string();
    let internal_ref = rng.random_range(700_000..=799_999).to_string();
    let tracking_ref = format!("VTR{}", rng.random_range(100_000..=999_999));

    let waiting_hours: u32 = rng.random_range(3..=8);
    let cost_per_hour: u32 = rng.random_range(50..=75);
    let waiting_reason = *pick(REASONS.get(language), rng);
    let title = *pick(TITLES.get(language), rng);

    let dispute_message = fill(
        *pick(DISPUTES.get(language), rng),
        &[("destination_company", destination_company.as_str())],
    );
    let closing_message = *pick(CLOSING_MESSAGES.get(language), rng);

    let signature = signature_block(
        language,
        FORMAL_CLOSINGS.get(language),
        &persona.sender_name,
        title,
        persona.customer,
        SignatureStyle::default(),
    );
    let formatted_message = format!("{dispute_message}\n\n{closing_message}\n\n{signature}");

    WaitingCosts {
        details: WaitingCostsDetails {
            delivery_city,
            destination_company,
            delivery_date: delivery_date.format("%d/%m/%Y").to_string(),
            order_ref,
            delivery_ref,
            internal_ref,
            tracking_ref,
            waiting_reason: waiting_reason.to_string(),
            waiting_hours,
            cost_per_hour,
            total_cost: waiting_hours * cost_per_hour,
        },
        dispute_message,
        closing_message: closing_message.to_string(),
        sender_name: persona.sender_name,
        sender_title: title.to_string(),
        company: persona.customer.company_name.clone(),
        country: persona.customer.country.clone(),
        language,
        signature,
        formatted_message,
    }
}

impl ScenarioPayload for WaitingCosts {
    fn kind(&self) -> EmailKind {
        EmailKind::WaitingCosts
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

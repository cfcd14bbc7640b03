use chrono::{Datelike, NaiveDate};
use phantommail_core::{EmailKind, Language};
use rand::{Rng, RngCore};
use serde::Serialize;

use super::{ScenarioPayload, fill};
use crate::faker_rs::adapter::FakeRsAdapter;
use crate::faker_rs::locales::LocaleKey;
use crate::generators::{GeneratorContext, pick};

const LOCALE: LocaleKey = LocaleKey::EnGb;

const TEMPLATES: &[&str] = &[
    "I am writing to express my deep dissatisfaction with the delivery service to {delivery_address}. The package was supposed to arrive on {expected_date} but it's still not here.",
    "I want to file a formal complaint about the handling of my shipment from {pickup_address}. The delivery person was extremely rude and damaged my package.",
    "This is unacceptable! My delivery to {delivery_address} was scheduled for {expected_date} but arrived completely damaged.",
    "I am furious about the state of my package delivered to {delivery_address}. The contents were damaged and the box was crushed.",
    "Your service is terrible! My package from {pickup_address} has been delayed for days with no explanation or updates.",
];

/// An angry customer complaint about a delivery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Complaint {
    pub complaint: String,
    pub sender_name: String,
    pub pickup_address: String,
    pub delivery_address: String,
    pub expected_date: NaiveDate,
    pub formatted_message: String,
}

pub fn generate_complaint(ctx: &GeneratorContext<'_>, rng: &mut dyn RngCore) -> Complaint {
    let template = *pick(TEMPLATES, rng);
    let pickup_address = single_line(&FakeRsAdapter::address(LOCALE, rng));
    let delivery_address = single_line(&FakeRsAdapter::address(LOCALE, rng));
    let expected_date = date_this_month(ctx.today(), rng);
    let sender_name = FakeRsAdapter::name(LOCALE, rng);

    let expected = expected_date.format("%Y-%m-%d").to_string();
    let complaint = fill(
        template,
        &[
            ("pickup_address", pickup_address.as_str()),
            ("delivery_address", delivery_address.as_str()),
            ("expected_date", expected.as_str()),
        ],
    );
    let formatted_message = format!("{complaint}\n\nRegards,\n{sender_name}");

    Complaint {
        complaint,
        sender_name,
        pickup_address,
        delivery_address,
        expected_date,
        formatted_message,
    }
}

/// A day between the first of the month and `today`.
fn date_this_month(today: NaiveDate, rng: &mut dyn RngCore) -> NaiveDate {
    let day = rng.random_range(1..=today.day());
    today.with_day(day).unwrap_or(today)
}

/// Join a multi-line postal address into one comma separated line.
pub(crate) fn single_line(address: &str) -> String {
    address
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ScenarioPayload for Complaint {
    fn kind(&self) -> EmailKind {
        EmailKind::Complaint
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_joins_address_lines() {
        assert_eq!(
            single_line("12 High Street\nLeeds\nLS1 4AB"),
            "12 High Street, Leeds, LS1 4AB"
        );
    }

    #[test]
    fn expected_date_stays_in_current_month() {
        use rand::SeedableRng;
        use rand_chacha::ChaCha8Rng;

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let today = NaiveDate::from_ymd_opt(2025, 3, 18).expect("valid date");
        for _ in 0..50 {
            let date = date_this_month(today, &mut rng);
            assert_eq!(date.month(), 3);
            assert!(date <= today);
        }
    }
}

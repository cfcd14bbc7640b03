use chrono::{NaiveDate, NaiveDateTime};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use phantommail_core::{CustomerRecord, Language};
use phantommail_generate::generators::scenarios::{
    generate_price_request, generate_promotional_email, generate_update_order_question,
    generate_waiting_costs_scenario,
};
use phantommail_generate::{GeneratorContext, ReferenceData, ScenarioPayload};

fn customer(company: &str, country: &str, vat: &str) -> CustomerRecord {
    CustomerRecord {
        company_name: company.to_string(),
        address: "Industrieweg 4".to_string(),
        city: "Springfield".to_string(),
        postal_code: "12345".to_string(),
        country: country.to_string(),
        vat_number: vat.to_string(),
        phone: "+00 123 456 789".to_string(),
        email: "planning@example.com".to_string(),
    }
}

fn reference_for(country: &str) -> ReferenceData {
    ReferenceData::from_customers(vec![customer("Acme Freight Ltd.", country, "XX999999")])
        .expect("fixture table")
}

fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 12)
        .and_then(|date| date.and_hms_opt(9, 30, 0))
        .expect("valid timestamp")
}

#[test]
fn unmapped_country_writes_english_price_requests() {
    let reference = reference_for("Senegal");
    let ctx = GeneratorContext::new(&reference, fixed_now());

    for seed in 0..20 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let request = generate_price_request(&ctx, &mut rng);

        assert_eq!(request.language(), Language::English);
        assert!(!request.signature.contains("i. A."));
        assert!(request.signature.contains("\nPhone: +00 123 456 789"));
        assert!(request.signature.contains("\nEmail: planning@example.com"));
        assert!(request.signature.ends_with("VAT: XX999999"));
        assert!(request.formatted_message.ends_with(&request.signature));
    }
}

#[test]
fn price_request_keeps_budget_below_proposal() {
    let reference = reference_for("Netherlands");
    let ctx = GeneratorContext::new(&reference, fixed_now());
    let mut rng = ChaCha8Rng::seed_from_u64(77);

    for _ in 0..100 {
        let request = generate_price_request(&ctx, &mut rng);
        assert_eq!(request.language, Language::Dutch);
        assert!(request.proposed_price > request.budget_price);
        let gap = request.proposed_price - request.budget_price;
        assert!((200..=900).contains(&gap), "gap {gap}");
        assert!((1600..=4500).contains(&request.proposed_price));
        assert!((1100..=3900).contains(&request.budget_price));

        let date = NaiveDate::parse_from_str(&request.transport_date, "%d/%m/%Y")
            .expect("transport date format");
        let offset = (date - fixed_now().date()).num_days();
        assert!((7..=30).contains(&offset));
    }
}

#[test]
fn german_waiting_costs_sign_on_behalf_with_vat_line() {
    let reference = reference_for("Germany");
    let ctx = GeneratorContext::new(&reference, fixed_now());
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    for _ in 0..10 {
        let scenario = generate_waiting_costs_scenario(&ctx, &mut rng);
        let lines: Vec<&str> = scenario.formatted_message.lines().collect();

        assert_eq!(scenario.language, Language::German);
        assert!(lines.iter().any(|line| line.starts_with("USt.-Id Nr.:")));
        assert!(lines
            .iter()
            .any(|line| *line == format!("i. A. {}", scenario.sender_name)));

        let details = &scenario.details;
        assert!((3..=8).contains(&details.waiting_hours));
        assert!((50..=75).contains(&details.cost_per_hour));
        assert_eq!(details.total_cost, details.waiting_hours * details.cost_per_hour);
        assert!(details.tracking_ref.starts_with("VTR"));
    }
}

#[test]
fn german_update_order_closes_in_three_languages() {
    let reference = reference_for("Austria");
    let ctx = GeneratorContext::new(&reference, fixed_now());
    let mut rng = ChaCha8Rng::seed_from_u64(12);

    let update = generate_update_order_question(&ctx, &mut rng);
    assert!(update
        .formatted_message
        .contains("Mit freundlichen Grüßen | Kind regards | Z poważaniem"));
    assert!(update.formatted_message.starts_with(&format!("{},", update.greeting)));
    assert!(update.signature.contains(&format!(
        "i. A. {}\n\nTelefon: +00 123 456 789\nE-Mail: planning@example.com",
        update.sender_name
    )));
    assert!(update.signature.ends_with(
        "Acme Freight Ltd. | Industrieweg 4 | 12345 Springfield | Austria\n\nUSt.-Id Nr.: XX999999"
    ));

    let (number, suffix) = update.order_ref.split_once('/').expect("order ref suffix");
    assert!(number.starts_with("2025") && number.len() == 8);
    assert_eq!(suffix.len(), 2);
    assert_eq!(update.tracking_ref.len(), 9);
}

#[test]
fn promotional_discount_is_drawn_once() {
    let reference = reference_for("France");
    let ctx = GeneratorContext::new(&reference, fixed_now());
    let mut rng = ChaCha8Rng::seed_from_u64(31);
    let mut discount_themes = 0;

    for _ in 0..200 {
        let promo = generate_promotional_email(&ctx, &mut rng);
        assert!((10..=30).contains(&promo.discount));

        let marker = format!("{}%", promo.discount);
        assert_eq!(
            promo.promo_content.contains(&marker),
            promo.promo_benefit.contains(&marker)
        );
        if promo.promo_title.starts_with("Réduction") {
            discount_themes += 1;
            assert!(promo.promo_content.contains(&marker));
        }

        assert!(promo.validity.starts_with("Valable du 12/06/2025 au "));
        let span = (promo.valid_until - promo.valid_from).num_days();
        assert!((14..=30).contains(&span));
        assert!(promo.signature.ends_with("Web: www.acmefreightltd.com"));
    }
    assert!(discount_themes > 0);
}

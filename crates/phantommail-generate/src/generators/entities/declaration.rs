use chrono::Days;
use phantommail_core::{
    Currency, CustomsDeclaration, DeclarationType, EmailKind, Goods, ItemDetail, NET_MASS_RATIO,
    Party, TAX_RATES, TaxLine, TaxType, TransportInfo, round2,
};
use rand::{Rng, RngCore};
use tracing::debug;

use super::goods::generate_goods;
use crate::faker_rs::adapter::FakeRsAdapter;
use crate::faker_rs::locales::LocaleKey;
use crate::generators::{ContentGenerator, GeneratedContent, GeneratorContext, pick};

/// Declarations are lodged with UK customs.
const DECLARATION_LOCALE: LocaleKey = LocaleKey::EnGb;

/// Build a customs declaration for a single goods item.
pub fn generate_customs_declaration(
    ctx: &GeneratorContext<'_>,
    rng: &mut dyn RngCore,
) -> CustomsDeclaration {
    let goods = generate_goods(rng);
    let tax_line_count = rng.random_range(1..=3);
    let tax_lines = (0..tax_line_count).map(|_| generate_tax_line(rng)).collect();

    let mrn = format!("GB{}", FakeRsAdapter::bothify(&"#".repeat(16), rng));
    let declaration_type = *pick(&DeclarationType::ALL, rng);
    let reference_number = FakeRsAdapter::bothify("??####", rng);

    let exporter = generate_party(rng);
    let importer = generate_party(rng);
    let declarant = generate_party(rng);
    let representative = generate_party(rng);
    let buyer = generate_party(rng);
    let transport_info = generate_transport_info(rng);
    let items = vec![generate_item_detail(&goods, 1, rng)];

    let invoice_currency = *pick(&Currency::ALL, rng);
    let invoice_value = round2(rng.random_range(1000.0..=100_000.0));

    let signed_on = ctx.today() - Days::new(rng.random_range(0..=3650));
    let place_and_date = format!(
        "{}, {}",
        FakeRsAdapter::city(DECLARATION_LOCALE, rng),
        signed_on.format("%Y-%m-%d")
    );

    debug!(
        mrn = %mrn,
        declaration_type = declaration_type.code(),
        "customs declaration generated"
    );

    CustomsDeclaration {
        mrn,
        declaration_type,
        reference_number,
        forms_count: 1,
        items_count: 1,
        total_packages: goods.quantity,
        exporter,
        importer,
        declarant,
        representative,
        buyer,
        transport_info,
        items,
        invoice_currency,
        invoice_value,
        tax_lines,
        acceptance_date_time: ctx.now.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        declaration_status: "ACCEPTED".to_string(),
        place_and_date,
    }
}

fn generate_party(rng: &mut dyn RngCore) -> Party {
    Party {
        name: FakeRsAdapter::company(DECLARATION_LOCALE, rng),
        address: FakeRsAdapter::address(DECLARATION_LOCALE, rng),
        eori_number: format!("GB{}", FakeRsAdapter::bothify("#########", rng)),
    }
}

fn generate_transport_info(rng: &mut dyn RngCore) -> TransportInfo {
    TransportInfo {
        arrival_transport: license_plate(rng),
        border_transport: license_plate(rng),
        transport_mode: rng.random_range(1..=9),
        place_of_loading: FakeRsAdapter::city(DECLARATION_LOCALE, rng),
    }
}

/// Current UK registration format, e.g. `AB12 CDE`.
fn license_plate(rng: &mut dyn RngCore) -> String {
    FakeRsAdapter::bothify("??## ???", rng)
}

fn generate_item_detail(goods: &Goods, item_number: u32, rng: &mut dyn RngCore) -> ItemDetail {
    let gross_mass_kg = f64::from(goods.weight);
    ItemDetail {
        item_number,
        packages: goods.quantity,
        shipping_marks: FakeRsAdapter::bothify("??-####", rng),
        commodity_code: FakeRsAdapter::bothify("########", rng),
        description_of_goods: goods.description.clone(),
        gross_mass_kg,
        net_mass_kg: round2(gross_mass_kg * NET_MASS_RATIO),
    }
}

fn generate_tax_line(rng: &mut dyn RngCore) -> TaxLine {
    let tax_base = round2(rng.random_range(100.0..=10_000.0));
    let tax_rate = *pick(&TAX_RATES, rng);
    let total_tax_assessed = round2(tax_base * f64::from(tax_rate) / 100.0);
    TaxLine {
        tax_type: *pick(&TaxType::ALL, rng),
        tax_base,
        tax_rate,
        total_tax_assessed,
        amount_payable: total_tax_assessed,
    }
}

pub struct CustomsDeclarationGenerator;

impl ContentGenerator for CustomsDeclarationGenerator {
    fn kind(&self) -> EmailKind {
        EmailKind::Declaration
    }

    fn generate(&self, ctx: &GeneratorContext<'_>, rng: &mut dyn RngCore) -> GeneratedContent {
        GeneratedContent::Declaration(generate_customs_declaration(ctx, rng))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn plate_and_codes_follow_formats() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let plate = license_plate(&mut rng);
        assert_eq!(plate.len(), 8);
        assert_eq!(&plate[4..5], " ");

        let line = generate_tax_line(&mut rng);
        assert!(TAX_RATES.contains(&line.tax_rate));
        assert_eq!(line.amount_payable, line.total_tax_assessed);
        assert!((100.0..=10_000.0).contains(&line.tax_base));
    }
}

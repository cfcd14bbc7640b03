use chrono::Days;
use phantommail_core::{EmailKind, TransportOrder};
use rand::{Rng, RngCore};
use tracing::debug;

use super::address::{generate_address, generate_client, generate_stops};
use super::goods::generate_goods;
use crate::faker_rs::locales::LocaleKey;
use crate::generators::{ContentGenerator, GeneratedContent, GeneratorContext, pick};

/// Locales a pickup may be located in.
pub const PICKUP_LOCALES: [LocaleKey; 9] = [
    LocaleKey::DeDe,
    LocaleKey::FrFr,
    LocaleKey::EsEs,
    LocaleKey::NlBe,
    LocaleKey::PlPl,
    LocaleKey::DeAt,
    LocaleKey::DeCh,
    LocaleKey::EnGb,
    LocaleKey::PtPt,
];

/// Every delivery ends in the United Kingdom.
pub const DELIVERY_LOCALE: LocaleKey = LocaleKey::EnGb;

/// Intermediate stops at each end of a transport.
pub const MAX_INTERMEDIATE_STOPS: usize = 1;

/// Build a transport order picked up in a random European locale and
/// delivered in the UK.
pub fn generate_transport_order(
    ctx: &GeneratorContext<'_>,
    rng: &mut dyn RngCore,
) -> TransportOrder {
    let pickup_locale = *pick(&PICKUP_LOCALES, rng);
    let client = generate_client(ctx.reference, pickup_locale, rng);
    let goods = generate_goods(rng);
    let pickup_address = generate_address(pickup_locale, rng);
    let delivery_address = generate_address(DELIVERY_LOCALE, rng);
    let intermediate_loading_stops = generate_stops(pickup_locale, MAX_INTERMEDIATE_STOPS, rng);
    let intermediate_unloading_stops =
        generate_stops(DELIVERY_LOCALE, MAX_INTERMEDIATE_STOPS, rng);

    let loading_date = ctx.today() + Days::new(rng.random_range(1..=10));
    let unloading_date = loading_date + Days::new(rng.random_range(1..=5));

    debug!(
        pickup_locale = %pickup_locale,
        loading_stops = intermediate_loading_stops.len(),
        unloading_stops = intermediate_unloading_stops.len(),
        %loading_date,
        %unloading_date,
        "transport order generated"
    );

    TransportOrder {
        client,
        goods,
        pickup_address,
        delivery_address,
        intermediate_loading_stops,
        intermediate_unloading_stops,
        loading_date,
        unloading_date,
    }
}

pub struct TransportOrderGenerator;

impl ContentGenerator for TransportOrderGenerator {
    fn kind(&self) -> EmailKind {
        EmailKind::Order
    }

    fn generate(&self, ctx: &GeneratorContext<'_>, rng: &mut dyn RngCore) -> GeneratedContent {
        GeneratedContent::Order(generate_transport_order(ctx, rng))
    }
}

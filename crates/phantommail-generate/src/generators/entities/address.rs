use phantommail_core::{Address, Client};
use rand::{Rng, RngCore};

use crate::faker_rs::adapter::FakeRsAdapter;
use crate::faker_rs::locales::LocaleKey;
use crate::reference::ReferenceData;

/// Company, multi-line address and country of `locale`.
///
/// The address lines and the company are drawn independently, so a
/// company name and its street need not belong together.
pub fn generate_address(locale: LocaleKey, rng: &mut dyn RngCore) -> Address {
    Address {
        company: FakeRsAdapter::company(locale, rng),
        address: FakeRsAdapter::address(locale, rng),
        country: locale.country().to_string(),
    }
}

/// Between zero and `max` addresses in `locale`.
pub fn generate_stops(locale: LocaleKey, max: usize, rng: &mut dyn RngCore) -> Vec<Address> {
    let count = rng.random_range(0..=max);
    (0..count).map(|_| generate_address(locale, rng)).collect()
}

/// A customer from the reference table with a contact person named in
/// `locale`.
pub fn generate_client(
    reference: &ReferenceData,
    locale: LocaleKey,
    rng: &mut dyn RngCore,
) -> Client {
    let customer = reference.sample_customer(rng);
    let sender_name = FakeRsAdapter::name(locale, rng);
    Client::from_customer(customer, sender_name)
}

use std::sync::Arc;

use fake::Fake;
use fake::faker::address::raw::{BuildingNumber, CityName, PostCode, StreetName};
use fake::faker::company::raw::CompanyName;
use fake::faker::lorem::raw::{Sentence, Words};
use fake::faker::name::raw::{LastName, Name};
use fake::locales::{DE_DE, EN, FR_FR, PT_BR};
use rand::{Rng, RngCore};
use tracing::warn;

use crate::assets::{LineAsset, line_assets};
use crate::faker_rs::locales::LocaleKey;

/// Runs `$body` with `$data` bound to the `fake` locale backing `$locale`.
/// Locales without `fake` data use English and are expected to be covered
/// by bundled line assets.
macro_rules! with_faker_data {
    ($locale:expr, $data:ident => $body:expr) => {
        match $locale {
            LocaleKey::DeDe | LocaleKey::DeAt | LocaleKey::DeCh => {
                let $data = DE_DE;
                $body
            }
            LocaleKey::FrFr => {
                let $data = FR_FR;
                $body
            }
            LocaleKey::PtPt => {
                let $data = PT_BR;
                $body
            }
            LocaleKey::EnGb
            | LocaleKey::NlNl
            | LocaleKey::NlBe
            | LocaleKey::EsEs
            | LocaleKey::PlPl => {
                let $data = EN;
                $body
            }
        }
    };
}

/// Locale-aware synthetic strings built on the `fake` crate, with bundled
/// line assets for locales `fake` has no data for.
pub struct FakeRsAdapter;

impl FakeRsAdapter {
    /// Whether `locale` draws names and places from bundled assets.
    pub fn uses_assets(locale: LocaleKey) -> bool {
        matches!(
            locale,
            LocaleKey::NlNl | LocaleKey::NlBe | LocaleKey::EsEs | LocaleKey::PlPl
        )
    }

    pub fn name(locale: LocaleKey, rng: &mut dyn RngCore) -> String {
        if Self::uses_assets(locale) {
            let first = asset_lines(locale, LineAsset::FirstNames);
            let last = asset_lines(locale, LineAsset::LastNames);
            if let (Some(first), Some(last)) = (pick_line(&first, rng), pick_line(&last, rng)) {
                return format!("{first} {last}");
            }
        }
        with_faker_data!(locale, data => Name(data).fake_with_rng(rng))
    }

    pub fn last_name(locale: LocaleKey, rng: &mut dyn RngCore) -> String {
        if Self::uses_assets(locale) {
            let last = asset_lines(locale, LineAsset::LastNames);
            if let Some(last) = pick_line(&last, rng) {
                return last;
            }
        }
        with_faker_data!(locale, data => LastName(data).fake_with_rng(rng))
    }

    pub fn city(locale: LocaleKey, rng: &mut dyn RngCore) -> String {
        if Self::uses_assets(locale) {
            let cities = asset_lines(locale, LineAsset::Cities);
            if let Some(city) = pick_line(&cities, rng) {
                return city;
            }
        }
        with_faker_data!(locale, data => CityName(data).fake_with_rng(rng))
    }

    pub fn company(locale: LocaleKey, rng: &mut dyn RngCore) -> String {
        if Self::uses_assets(locale) || rng.random_bool(0.5) {
            let suffixes = locale.company_suffixes();
            let suffix = suffixes[rng.random_range(0..suffixes.len())];
            return format!("{} {suffix}", Self::last_name(locale, rng));
        }
        with_faker_data!(locale, data => CompanyName(data).fake_with_rng(rng))
    }

    /// Street line, house number placed the way the locale writes it.
    pub fn street_line(locale: LocaleKey, rng: &mut dyn RngCore) -> String {
        if Self::uses_assets(locale) {
            let streets = asset_lines(locale, LineAsset::Streets);
            if let Some(street) = pick_line(&streets, rng) {
                return format!("{street} {}", rng.random_range(1..=250));
            }
        }
        match locale {
            LocaleKey::EnGb => {
                let number: String = BuildingNumber(EN).fake_with_rng(rng);
                let street: String = StreetName(EN).fake_with_rng(rng);
                format!("{number} {street}")
            }
            _ => {
                let street: String = with_faker_data!(locale, data => StreetName(data).fake_with_rng(rng));
                format!("{street} {}", rng.random_range(1..=250))
            }
        }
    }

    pub fn postcode(locale: LocaleKey, rng: &mut dyn RngCore) -> String {
        match locale {
            LocaleKey::NlNl => Self::bothify("#### ??", rng),
            LocaleKey::NlBe | LocaleKey::DeAt | LocaleKey::DeCh => Self::bothify("####", rng),
            LocaleKey::EsEs | LocaleKey::DeDe | LocaleKey::FrFr => Self::bothify("#####", rng),
            LocaleKey::PlPl => Self::bothify("##-###", rng),
            LocaleKey::PtPt => Self::bothify("####-###", rng),
            LocaleKey::EnGb => PostCode(EN).fake_with_rng(rng),
        }
    }

    /// Two-line postal address: street line, then postcode and city.
    pub fn address(locale: LocaleKey, rng: &mut dyn RngCore) -> String {
        let street = Self::street_line(locale, rng);
        let postcode = Self::postcode(locale, rng);
        let city = Self::city(locale, rng);
        match locale {
            LocaleKey::EnGb => format!("{street}\n{city}\n{postcode}"),
            _ => format!("{street}\n{postcode} {city}"),
        }
    }

    /// English lorem words, first letter capitalised.
    pub fn title_words(min: usize, max: usize, rng: &mut dyn RngCore) -> String {
        let words: Vec<String> = Words(EN, min..max + 1).fake_with_rng(rng);
        let joined = words.join(" ");
        let mut chars = joined.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => "Goods".to_string(),
        }
    }

    /// English lorem sentence.
    pub fn sentence(min: usize, max: usize, rng: &mut dyn RngCore) -> String {
        Sentence(EN, min..max + 1).fake_with_rng(rng)
    }

    /// Replace `#` with a random digit and `?` with a random uppercase letter.
    pub fn bothify(pattern: &str, rng: &mut dyn RngCore) -> String {
        pattern
            .chars()
            .map(|ch| match ch {
                '#' => char::from(b'0' + rng.random_range(0..10u8)),
                '?' => char::from(b'A' + rng.random_range(0..26u8)),
                other => other,
            })
            .collect()
    }
}

fn asset_lines(locale: LocaleKey, asset: LineAsset) -> Arc<Vec<String>> {
    match line_assets().lines(locale, asset) {
        Ok(lines) => lines,
        Err(err) => {
            warn!(locale = %locale, asset = asset.file_name(), error = %err, "asset unavailable");
            Arc::default()
        }
    }
}

fn pick_line(lines: &[String], rng: &mut dyn RngCore) -> Option<String> {
    if lines.is_empty() {
        return None;
    }
    Some(lines[rng.random_range(0..lines.len())].clone())
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn bothify_fills_digits_and_letters() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let value = FakeRsAdapter::bothify("??-####", &mut rng);
        assert_eq!(value.len(), 7);
        assert!(value[..2].chars().all(|ch| ch.is_ascii_uppercase()));
        assert_eq!(&value[2..3], "-");
        assert!(value[3..].chars().all(|ch| ch.is_ascii_digit()));
    }

    #[test]
    fn every_locale_produces_names_and_addresses() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for locale in LocaleKey::ALL {
            assert!(!FakeRsAdapter::name(locale, &mut rng).trim().is_empty());
            assert!(!FakeRsAdapter::company(locale, &mut rng).trim().is_empty());
            assert!(FakeRsAdapter::address(locale, &mut rng).contains('\n'));
        }
    }

    #[test]
    fn dutch_names_come_from_assets() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let first_names = asset_lines(LocaleKey::NlNl, LineAsset::FirstNames);
        let name = FakeRsAdapter::name(LocaleKey::NlNl, &mut rng);
        let first = name.split(' ').next().unwrap_or_default();
        assert!(first_names.iter().any(|candidate| candidate == first));
    }
}

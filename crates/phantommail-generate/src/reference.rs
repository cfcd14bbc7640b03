use std::path::Path;

use phantommail_core::{CustomerRecord, Language};
use rand::{Rng, RngCore};
use tracing::info;

use crate::assets::assets_root;
use crate::errors::GenerationError;
use crate::faker_rs::locales::LocaleKey;

/// Locale used for any country missing from [`LOCALE_TABLE`].
pub const FALLBACK_LOCALE: (LocaleKey, Language) = (LocaleKey::EnGb, Language::English);

/// Country name to (locale, language) for customer-based scenarios.
pub const LOCALE_TABLE: &[(&str, LocaleKey, Language)] = &[
    ("Netherlands", LocaleKey::NlNl, Language::Dutch),
    ("United Kingdom", LocaleKey::EnGb, Language::English),
    ("Sweden", LocaleKey::EnGb, Language::English),
    ("Belgium", LocaleKey::NlBe, Language::Dutch),
    ("Spain", LocaleKey::EsEs, Language::Spanish),
    ("Germany", LocaleKey::DeDe, Language::German),
    ("Poland", LocaleKey::EnGb, Language::English),
    ("Italy", LocaleKey::EnGb, Language::English),
    ("France", LocaleKey::FrFr, Language::French),
    ("Austria", LocaleKey::DeAt, Language::German),
    ("Switzerland", LocaleKey::DeCh, Language::German),
    ("Portugal", LocaleKey::PtPt, Language::English),
];

/// Resolve the locale and language for a customer's country.
pub fn locale_for(country: &str) -> (LocaleKey, Language) {
    LOCALE_TABLE
        .iter()
        .find(|(name, _, _)| *name == country.trim())
        .map(|(_, locale, language)| (*locale, *language))
        .unwrap_or(FALLBACK_LOCALE)
}

/// Whether `country` has its own entry in [`LOCALE_TABLE`].
pub fn is_mapped_country(country: &str) -> bool {
    LOCALE_TABLE
        .iter()
        .any(|(name, _, _)| *name == country.trim())
}

/// Immutable reference data shared by every generator.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    customers: Vec<CustomerRecord>,
}

impl ReferenceData {
    /// Build from already loaded records. An empty table is rejected.
    pub fn from_customers(customers: Vec<CustomerRecord>) -> Result<Self, GenerationError> {
        if customers.is_empty() {
            return Err(GenerationError::EmptyCustomerTable(
                "in-memory table".to_string(),
            ));
        }
        Ok(Self { customers })
    }

    /// Load the customer table from `path`.
    pub fn load(path: &Path) -> Result<Self, GenerationError> {
        let customers = load_customers(path)?;
        if customers.is_empty() {
            return Err(GenerationError::EmptyCustomerTable(
                path.display().to_string(),
            ));
        }
        info!(path = %path.display(), customers = customers.len(), "customer table loaded");
        Ok(Self { customers })
    }

    /// Load the customer table bundled with this crate.
    pub fn load_bundled() -> Result<Self, GenerationError> {
        Self::load(&assets_root().join("customers.csv"))
    }

    pub fn customers(&self) -> &[CustomerRecord] {
        &self.customers
    }

    /// Uniform pick, with replacement.
    pub fn sample_customer(&self, rng: &mut dyn RngCore) -> &CustomerRecord {
        &self.customers[rng.random_range(0..self.customers.len())]
    }
}

/// Read every customer row from a CSV file with the fixed header
/// `company_name,address,city,postal_code,country,vat_number,phone,email`.
///
/// A missing file, a missing column or a malformed row is an error.
pub fn load_customers(path: &Path) -> Result<Vec<CustomerRecord>, GenerationError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|err| {
            GenerationError::Asset(format!(
                "failed to open customer table {}: {}",
                path.display(),
                err
            ))
        })?;

    let mut customers = Vec::new();
    for record in reader.deserialize::<CustomerRecord>() {
        customers.push(record?);
    }
    Ok(customers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmapped_country_falls_back_to_english() {
        assert_eq!(locale_for("Senegal"), (LocaleKey::EnGb, Language::English));
        assert_eq!(locale_for("Germany"), (LocaleKey::DeDe, Language::German));
        assert_eq!(locale_for("Portugal"), (LocaleKey::PtPt, Language::English));
        assert!(!is_mapped_country("Senegal"));
    }

    #[test]
    fn empty_table_is_rejected() {
        let result = ReferenceData::from_customers(Vec::new());
        assert!(matches!(result, Err(GenerationError::EmptyCustomerTable(_))));
    }

    const HEADER: &str = "company_name,address,city,postal_code,country,vat_number,phone,email";

    fn write_table(label: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "phantommail_customers_{label}_{}.csv",
            uuid::Uuid::new_v4()
        ));
        std::fs::write(&path, contents).expect("write customer table");
        path
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join(format!(
            "phantommail_no_customers_{}.csv",
            uuid::Uuid::new_v4()
        ));
        assert!(matches!(
            ReferenceData::load(&path),
            Err(GenerationError::Asset(_))
        ));
    }

    #[test]
    fn missing_column_is_an_error() {
        let path = write_table(
            "no_vat",
            "company_name,address,city,postal_code,country,phone,email\n\
             Acme Ltd,1 High Street,Leeds,LS1 4AB,United Kingdom,+44 113 000,ops@acme.co.uk\n",
        );
        assert!(load_customers(&path).is_err());
        assert!(ReferenceData::load(&path).is_err());
        std::fs::remove_file(&path).expect("cleanup");
    }

    #[test]
    fn short_row_is_an_error() {
        let path = write_table(
            "short_row",
            &format!(
                "{HEADER}\n\
                 Acme Ltd,1 High Street,Leeds,LS1 4AB,United Kingdom,GB123,+44 113 000,ops@acme.co.uk\n\
                 Broken BV,Kade 1,Rotterdam,3011 AA,Netherlands\n"
            ),
        );
        assert!(load_customers(&path).is_err());
        std::fs::remove_file(&path).expect("cleanup");
    }

    #[test]
    fn header_only_table_is_empty() {
        let path = write_table("header_only", &format!("{HEADER}\n"));
        assert!(matches!(
            ReferenceData::load(&path),
            Err(GenerationError::EmptyCustomerTable(_))
        ));
        std::fs::remove_file(&path).expect("cleanup");
    }

    #[test]
    fn bundled_table_loads() {
        let data = ReferenceData::load_bundled().expect("load bundled customers");
        assert!(data.customers().len() >= 10);
        assert!(data.customers().iter().all(|c| c.email.contains('@')));
    }
}

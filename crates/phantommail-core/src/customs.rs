use serde::{Deserialize, Serialize};

/// Customs procedure of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclarationType {
    /// Import.
    #[serde(rename = "IM")]
    Import,
    /// Export.
    #[serde(rename = "EX")]
    Export,
    /// Special fiscal territory.
    #[serde(rename = "CO")]
    SpecialFiscal,
}

impl DeclarationType {
    pub const ALL: [DeclarationType; 3] = [Self::Import, Self::Export, Self::SpecialFiscal];

    pub fn code(self) -> &'static str {
        match self {
            Self::Import => "IM",
            Self::Export => "EX",
            Self::SpecialFiscal => "CO",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "GBP")]
    Gbp,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "USD")]
    Usd,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Self::Gbp, Self::Eur, Self::Usd];

    pub fn code(self) -> &'static str {
        match self {
            Self::Gbp => "GBP",
            Self::Eur => "EUR",
            Self::Usd => "USD",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxType {
    /// A00, customs duties.
    #[serde(rename = "A00")]
    CustomsDuties,
    /// B00, value added tax.
    #[serde(rename = "B00")]
    Vat,
}

impl TaxType {
    pub const ALL: [TaxType; 2] = [Self::CustomsDuties, Self::Vat];

    pub fn code(self) -> &'static str {
        match self {
            Self::CustomsDuties => "A00",
            Self::Vat => "B00",
        }
    }
}

/// Tax rates, in percent, a tax line may carry.
pub const TAX_RATES: [u8; 5] = [0, 5, 10, 15, 20];

/// Share of the gross mass left once packaging is removed.
pub const NET_MASS_RATIO: f64 = 0.95;

/// Exporter, importer, declarant, representative or buyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub address: String,
    pub eori_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportInfo {
    pub arrival_transport: String,
    pub border_transport: String,
    /// Mode of transport code, 1 to 9.
    pub transport_mode: u8,
    pub place_of_loading: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDetail {
    pub item_number: u32,
    pub packages: u32,
    pub shipping_marks: String,
    pub commodity_code: String,
    pub description_of_goods: String,
    pub gross_mass_kg: f64,
    pub net_mass_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxLine {
    pub tax_type: TaxType,
    pub tax_base: f64,
    pub tax_rate: u8,
    pub total_tax_assessed: f64,
    pub amount_payable: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomsDeclaration {
    /// Movement reference number.
    pub mrn: String,
    pub declaration_type: DeclarationType,
    pub reference_number: String,
    pub forms_count: u32,
    pub items_count: u32,
    pub total_packages: u32,
    pub exporter: Party,
    pub importer: Party,
    pub declarant: Party,
    pub representative: Party,
    pub buyer: Party,
    pub transport_info: TransportInfo,
    pub items: Vec<ItemDetail>,
    pub invoice_currency: Currency,
    pub invoice_value: f64,
    pub tax_lines: Vec<TaxLine>,
    pub acceptance_date_time: String,
    pub declaration_status: String,
    pub place_and_date: String,
}

/// Round to two decimals, the precision of every monetary and mass field.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_serialize_as_codes() {
        let json = serde_json::to_string(&DeclarationType::SpecialFiscal).unwrap();
        assert_eq!(json, "\"CO\"");
        let json = serde_json::to_string(&TaxType::Vat).unwrap();
        assert_eq!(json, "\"B00\"");
        assert_eq!(Currency::Eur.code(), "EUR");
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(12.3456), 12.35);
        assert_eq!(round2(350.0 * NET_MASS_RATIO), 332.5);
    }
}

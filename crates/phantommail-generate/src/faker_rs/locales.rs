use std::fmt;

/// Locales content is generated for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LocaleKey {
    EnGb,
    NlNl,
    NlBe,
    EsEs,
    DeDe,
    DeAt,
    DeCh,
    FrFr,
    PlPl,
    PtPt,
}

impl LocaleKey {
    pub const ALL: [LocaleKey; 10] = [
        Self::EnGb,
        Self::NlNl,
        Self::NlBe,
        Self::EsEs,
        Self::DeDe,
        Self::DeAt,
        Self::DeCh,
        Self::FrFr,
        Self::PlPl,
        Self::PtPt,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|locale| locale.as_str() == value)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::EnGb => "en_GB",
            Self::NlNl => "nl_NL",
            Self::NlBe => "nl_BE",
            Self::EsEs => "es_ES",
            Self::DeDe => "de_DE",
            Self::DeAt => "de_AT",
            Self::DeCh => "de_CH",
            Self::FrFr => "fr_FR",
            Self::PlPl => "pl_PL",
            Self::PtPt => "pt_PT",
        }
    }

    /// Country the locale belongs to, in English.
    pub fn country(self) -> &'static str {
        match self {
            Self::EnGb => "United Kingdom",
            Self::NlNl => "Netherlands",
            Self::NlBe => "Belgium",
            Self::EsEs => "Spain",
            Self::DeDe => "Germany",
            Self::DeAt => "Austria",
            Self::DeCh => "Switzerland",
            Self::FrFr => "France",
            Self::PlPl => "Poland",
            Self::PtPt => "Portugal",
        }
    }

    pub(crate) fn company_suffixes(self) -> &'static [&'static str] {
        match self {
            Self::NlNl => &["B.V.", "N.V.", "Transport B.V.", "Logistiek B.V."],
            Self::NlBe => &["BV", "NV", "BVBA", "Logistics NV"],
            Self::EsEs => &["S.L.", "S.A.", "Transportes S.L.", "Logística S.A."],
            Self::PlPl => &["Sp. z o.o.", "S.A.", "Logistyka Sp. z o.o."],
            Self::DeDe | Self::DeAt | Self::DeCh => &["GmbH", "AG", "GmbH & Co. KG"],
            Self::FrFr => &["SARL", "SA", "SAS"],
            Self::PtPt => &["Lda.", "S.A."],
            Self::EnGb => &["Ltd", "PLC", "Group"],
        }
    }
}

impl fmt::Display for LocaleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

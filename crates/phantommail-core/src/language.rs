use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Languages the phrase tables are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    English,
    Dutch,
    German,
    Spanish,
    French,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::English,
        Language::Dutch,
        Language::German,
        Language::Spanish,
        Language::French,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Dutch => "Dutch",
            Self::German => "German",
            Self::Spanish => "Spanish",
            Self::French => "French",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|language| language.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| Error::Parse(format!("unknown language '{value}'")))
    }
}

/// A value per language with a mandatory English entry.
///
/// Languages without a dedicated entry resolve to the English one, so a
/// table can never miss a lookup.
#[derive(Debug, Clone, Copy)]
pub struct Localized<T: 'static> {
    pub english: T,
    pub dutch: Option<T>,
    pub german: Option<T>,
    pub spanish: Option<T>,
    pub french: Option<T>,
}

impl<T: Copy> Localized<T> {
    /// Entry for `language`, falling back to English.
    pub fn get(&self, language: Language) -> T {
        self.dedicated(language).unwrap_or(self.english)
    }

    /// Whether `language` has its own entry.
    pub fn has(&self, language: Language) -> bool {
        self.dedicated(language).is_some()
    }

    fn dedicated(&self, language: Language) -> Option<T> {
        match language {
            Language::English => Some(self.english),
            Language::Dutch => self.dutch,
            Language::German => self.german,
            Language::Spanish => self.spanish,
            Language::French => self.french,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREETING: Localized<&str> = Localized {
        english: "Hello",
        dutch: Some("Hallo"),
        german: None,
        spanish: None,
        french: Some("Bonjour"),
    };

    #[test]
    fn missing_entries_fall_back_to_english() {
        assert_eq!(GREETING.get(Language::Dutch), "Hallo");
        assert_eq!(GREETING.get(Language::German), "Hello");
        assert!(!GREETING.has(Language::Spanish));
        assert!(GREETING.has(Language::English));
    }

    #[test]
    fn parses_language_names_case_insensitively() {
        assert_eq!("german".parse::<Language>().ok(), Some(Language::German));
        assert!("klingon".parse::<Language>().is_err());
    }
}

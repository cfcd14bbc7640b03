use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use rand::{Rng, RngCore};
use serde::Serialize;

use phantommail_core::{CustomsDeclaration, EmailKind, Language, TransportOrder};

use crate::reference::ReferenceData;

pub mod entities;
pub mod scenarios;

pub use scenarios::{Scenario, ScenarioPayload};

/// Inputs shared by every generator call.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorContext<'a> {
    pub reference: &'a ReferenceData,
    /// Generation time; every relative date is derived from it.
    pub now: NaiveDateTime,
}

impl<'a> GeneratorContext<'a> {
    pub fn new(reference: &'a ReferenceData, now: NaiveDateTime) -> Self {
        Self { reference, now }
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }
}

/// Content produced for one email.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum GeneratedContent {
    Order(TransportOrder),
    Declaration(CustomsDeclaration),
    Scenario(Scenario),
}

impl GeneratedContent {
    pub fn kind(&self) -> EmailKind {
        match self {
            Self::Order(_) => EmailKind::Order,
            Self::Declaration(_) => EmailKind::Declaration,
            Self::Scenario(scenario) => scenario.kind(),
        }
    }

    pub fn scenario(&self) -> Option<&Scenario> {
        match self {
            Self::Scenario(scenario) => Some(scenario),
            _ => None,
        }
    }

    /// Language of the text, when the content carries text.
    pub fn language(&self) -> Option<Language> {
        self.scenario().map(ScenarioPayload::language)
    }

    pub fn sender_name(&self) -> Option<&str> {
        match self {
            Self::Order(order) => Some(order.client.sender_name.as_str()),
            Self::Declaration(_) => None,
            Self::Scenario(scenario) => Some(scenario.sender_name()),
        }
    }

    /// Plain-text message, when the content is a scenario.
    pub fn formatted_message(&self) -> Option<&str> {
        self.scenario().map(ScenarioPayload::formatted_message)
    }

    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// A generator for one email kind.
pub trait ContentGenerator: Send + Sync {
    fn kind(&self) -> EmailKind;

    fn generate(&self, ctx: &GeneratorContext<'_>, rng: &mut dyn RngCore) -> GeneratedContent;
}

/// Registry of content generators keyed by email kind.
pub struct GeneratorRegistry {
    generators: BTreeMap<EmailKind, Box<dyn ContentGenerator>>,
}

impl GeneratorRegistry {
    /// Registry with every built-in generator.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        entities::register(&mut registry);
        scenarios::register(&mut registry);
        registry
    }

    pub fn empty() -> Self {
        Self {
            generators: BTreeMap::new(),
        }
    }

    pub fn register_generator(&mut self, generator: Box<dyn ContentGenerator>) {
        self.generators.insert(generator.kind(), generator);
    }

    pub fn generator(&self, kind: EmailKind) -> Option<&dyn ContentGenerator> {
        self.generators.get(&kind).map(|generator| generator.as_ref())
    }

    /// Registered kinds, in declaration order of [`EmailKind`].
    pub fn kinds(&self) -> Vec<EmailKind> {
        self.generators.keys().copied().collect()
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Uniform pick from a non-empty static table.
pub(crate) fn pick<'t, T>(values: &'t [T], rng: &mut dyn RngCore) -> &'t T {
    &values[rng.random_range(0..values.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_every_kind() {
        let registry = GeneratorRegistry::new();
        assert_eq!(registry.kinds(), EmailKind::ALL.to_vec());
        for kind in EmailKind::ALL {
            let generator = registry.generator(kind).expect("generator registered");
            assert_eq!(generator.kind(), kind);
        }
    }
}

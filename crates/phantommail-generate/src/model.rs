use std::collections::BTreeMap;

use phantommail_core::EmailKind;
use serde::{Deserialize, Serialize};

use crate::generators::{GeneratedContent, ScenarioPayload};
use crate::reference::is_mapped_country;

/// Options for a batch run of the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Number of emails to generate.
    pub count: usize,
    /// Restrict generation to one kind; uniform over all kinds otherwise.
    pub kind: Option<EmailKind>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            count: 1,
            kind: None,
        }
    }
}

/// One generated email before assembly.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedEmail {
    pub index: usize,
    pub content: GeneratedContent,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub seed: u64,
    pub requested: u64,
    pub generated: u64,
    pub kinds: BTreeMap<String, u64>,
    pub languages: BTreeMap<String, u64>,
    /// Customer-based emails whose country had no locale mapping.
    pub english_fallbacks: u64,
}

impl GenerationReport {
    pub fn new(run_id: String, seed: u64) -> Self {
        Self {
            run_id,
            seed,
            requested: 0,
            generated: 0,
            kinds: BTreeMap::new(),
            languages: BTreeMap::new(),
            english_fallbacks: 0,
        }
    }

    pub fn record(&mut self, content: &GeneratedContent) {
        self.generated += 1;
        *self
            .kinds
            .entry(content.kind().as_str().to_string())
            .or_insert(0) += 1;

        if let Some(scenario) = content.scenario() {
            *self
                .languages
                .entry(scenario.language().as_str().to_string())
                .or_insert(0) += 1;
            if scenario
                .customer_country()
                .is_some_and(|country| !is_mapped_country(country))
            {
                self.english_fallbacks += 1;
            }
        }
    }
}

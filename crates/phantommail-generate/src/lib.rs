//! Randomized, locale-aware content generation for PhantomMail.
//!
//! This crate loads the customer reference table, generates transport
//! orders, customs declarations and customer scenario emails from an
//! explicitly seeded random source, and writes batch results as CSV.

pub mod assets;
pub mod engine;
pub mod errors;
pub mod faker_rs;
pub mod generators;
pub mod model;
pub mod output;
pub mod reference;

pub use engine::{GenerationEngine, GenerationResult};
pub use errors::GenerationError;
pub use generators::{
    ContentGenerator, GeneratedContent, GeneratorContext, GeneratorRegistry, Scenario,
    ScenarioPayload,
};
pub use model::{GenerateOptions, GeneratedEmail, GenerationReport};
pub use reference::{ReferenceData, locale_for};

use std::time::Instant;

use chrono::{Local, NaiveDateTime};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use phantommail_core::{
    EmailKind, ensure_placeholders_resolved, validate_declaration, validate_transport_order,
};

use crate::errors::GenerationError;
use crate::generators::{GeneratedContent, GeneratorContext, GeneratorRegistry, pick};
use crate::model::{GenerateOptions, GeneratedEmail, GenerationReport};
use crate::reference::ReferenceData;

/// Result of a batch run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub messages: Vec<GeneratedEmail>,
    pub report: GenerationReport,
}

/// Entry point for generating email content.
///
/// The engine owns the random source. Two engines built with the same seed,
/// reference data and clock produce identical output.
pub struct GenerationEngine {
    reference: ReferenceData,
    registry: GeneratorRegistry,
    rng: ChaCha8Rng,
    seed: u64,
    clock: Option<NaiveDateTime>,
}

impl GenerationEngine {
    /// Build an engine; without a seed one is drawn from entropy.
    pub fn new(reference: ReferenceData, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        Self {
            reference,
            registry: GeneratorRegistry::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            clock: None,
        }
    }

    /// Pin the generation time instead of reading the local clock.
    pub fn with_clock(mut self, now: NaiveDateTime) -> Self {
        self.clock = Some(now);
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }

    fn now(&self) -> NaiveDateTime {
        self.clock.unwrap_or_else(|| Local::now().naive_local())
    }

    /// Uniform pick over the registered kinds.
    pub fn choose_kind(&mut self) -> Result<EmailKind, GenerationError> {
        let kinds = self.registry.kinds();
        if kinds.is_empty() {
            return Err(GenerationError::UnknownKind(
                "no generators registered".to_string(),
            ));
        }
        Ok(*pick(&kinds, &mut self.rng))
    }

    /// Generate one email of `kind`, or of a uniformly chosen kind.
    pub fn generate(
        &mut self,
        kind: Option<EmailKind>,
    ) -> Result<GeneratedContent, GenerationError> {
        let kind = match kind {
            Some(kind) => kind,
            None => self.choose_kind()?,
        };
        let now = self.now();
        let generator = self
            .registry
            .generator(kind)
            .ok_or_else(|| GenerationError::UnknownKind(kind.to_string()))?;

        let ctx = GeneratorContext::new(&self.reference, now);
        let content = generator.generate(&ctx, &mut self.rng);
        check_content(&content, &ctx)?;

        debug!(
            kind = %kind,
            language = content.language().map(|lang| lang.as_str()).unwrap_or("-"),
            "email content generated"
        );
        Ok(content)
    }

    /// Generate `options.count` emails and a report of what was produced.
    pub fn generate_batch(
        &mut self,
        options: &GenerateOptions,
    ) -> Result<GenerationResult, GenerationError> {
        self.generate_run(uuid::Uuid::new_v4().to_string(), options)
    }

    /// Same as [`generate_batch`](Self::generate_batch), reporting under a
    /// caller-chosen run id.
    pub fn generate_run(
        &mut self,
        run_id: String,
        options: &GenerateOptions,
    ) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        let mut report = GenerationReport::new(run_id.clone(), self.seed);
        report.requested = options.count as u64;

        info!(
            run_id = %run_id,
            seed = self.seed,
            count = options.count,
            kind = options.kind.map(|kind| kind.as_str()).unwrap_or("any"),
            "generation started"
        );

        let mut messages = Vec::with_capacity(options.count);
        for index in 0..options.count {
            let content = self.generate(options.kind)?;
            report.record(&content);
            messages.push(GeneratedEmail { index, content });
        }

        info!(
            run_id = %run_id,
            generated = report.generated,
            english_fallbacks = report.english_fallbacks,
            duration_ms = start.elapsed().as_millis() as u64,
            "generation finished"
        );

        Ok(GenerationResult { messages, report })
    }
}

/// Check the invariants every generated entity must hold.
fn check_content(
    content: &GeneratedContent,
    ctx: &GeneratorContext<'_>,
) -> Result<(), GenerationError> {
    match content {
        GeneratedContent::Order(order) => validate_transport_order(order, ctx.today())?,
        GeneratedContent::Declaration(declaration) => validate_declaration(declaration)?,
        GeneratedContent::Scenario(_) => {}
    }
    if let Some(message) = content.formatted_message() {
        ensure_placeholders_resolved(message)?;
    }
    Ok(())
}

mod registry;
mod settings;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use phantommail_core::{EmailKind, redact_email, redact_recipients, redact_secret};
use phantommail_dispatch::{
    CommandPdfRenderer, DispatchError, DocumentAssembler, LogTransport, Pipeline, PipelineConfig,
    ResendTransport, TemplateAssembler, Transport, response_schema,
};
use phantommail_generate::{GenerateOptions, GenerationEngine, GenerationError, ReferenceData};
use registry::{RunContext, init_logging, start_run, write_messages, write_report};
use settings::{Settings, SettingsError, load_settings};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("{0}")]
    DeliveryFailed(String),
}

#[derive(Parser, Debug)]
#[command(name = "phantommail", version, about = "Synthetic business email generator")]
struct Cli {
    /// Configuration file (defaults to ./phantommail.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate email payloads into a run directory.
    Generate(GenerateArgs),
    /// Generate, assemble and deliver one email.
    Send(SendArgs),
    /// Print the JSON schema of an assembled email.
    Schema,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Email kind (e.g. order, price-request); random when omitted.
    #[arg(long)]
    kind: Option<EmailKind>,
    /// Number of payloads to generate.
    #[arg(long, default_value_t = 1)]
    count: usize,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// Output directory for runs.
    #[arg(long)]
    run_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SendArgs {
    /// Recipient address; repeat for several. Defaults to the configured recipients.
    #[arg(long = "to", value_name = "ADDRESS")]
    to: Vec<String>,
    #[arg(long)]
    kind: Option<EmailKind>,
    #[arg(long)]
    seed: Option<u64>,
    /// Log the email instead of calling the mail provider.
    #[arg(long, default_value_t = false)]
    dry_run: bool,
    /// Skip PDF rendering; attachments are dropped.
    #[arg(long, default_value_t = false)]
    no_pdf: bool,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(cli.config, args),
        Command::Send(args) => run_send(cli.config, args).await,
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&response_schema())?);
            Ok(())
        }
    }
}

fn load_reference(settings: &Settings) -> Result<ReferenceData, CliError> {
    let reference = match &settings.customers {
        Some(path) => ReferenceData::load(path)?,
        None => ReferenceData::load_bundled()?,
    };
    Ok(reference)
}

fn run_generate(config: Option<PathBuf>, args: GenerateArgs) -> Result<(), CliError> {
    let GenerateArgs {
        kind,
        count,
        seed,
        run_dir,
    } = args;

    if count == 0 {
        return Err(CliError::InvalidConfig(
            "--count must be at least 1".to_string(),
        ));
    }

    let settings = load_settings(config.as_deref())?;
    let reference = load_reference(&settings)?;
    let mut engine = GenerationEngine::new(reference, seed.or(settings.seed));

    let run_id = Uuid::new_v4().to_string();
    let api_key = std::env::var(&settings.resend.api_key_env).ok();
    let run_ctx = RunContext {
        run_id: run_id.clone(),
        started_at: chrono::Utc::now(),
        seed: engine.seed(),
        count,
        kind,
        run_dir: run_dir.unwrap_or_else(|| settings.run_dir.clone()),
        customers: settings.customers.clone(),
        sender: redact_email(&settings.sender),
        recipients: redact_recipients(&settings.recipients),
        api_key: redact_secret(&settings.resend.api_key_env, api_key.as_deref()),
    };

    let run_paths = start_run(&run_ctx)?;
    init_logging(Some(&run_paths.logs_path))?;

    tracing::info!(event = "run_started", run_id = %run_id, seed = run_ctx.seed);
    let timer = Instant::now();

    let result = engine.generate_run(run_id.clone(), &GenerateOptions { count, kind })?;

    write_messages(&run_paths, &result.messages)?;
    tracing::info!(event = "messages_written", path = %run_paths.messages_path.display());

    write_report(&run_paths, &result.report)?;
    tracing::info!(event = "report_written", path = %run_paths.report_path.display());

    let duration_ms = timer.elapsed().as_millis() as u64;
    tracing::info!(event = "run_finished", status = "success", duration_ms = duration_ms);

    let report = &result.report;
    println!("run {}", report.run_id);
    println!("  directory: {}", run_paths.root.display());
    println!("  seed: {}", report.seed);
    println!("  generated: {}/{}", report.generated, report.requested);
    for (kind, total) in &report.kinds {
        println!("  {kind}: {total}");
    }
    for (language, total) in &report.languages {
        println!("  language {language}: {total}");
    }
    println!("  english fallbacks: {}", report.english_fallbacks);

    Ok(())
}

async fn run_send(config: Option<PathBuf>, args: SendArgs) -> Result<(), CliError> {
    let SendArgs {
        to,
        kind,
        seed,
        dry_run,
        no_pdf,
    } = args;

    init_logging(None)?;

    let settings = load_settings(config.as_deref())?;
    let recipients = if to.is_empty() {
        settings.recipients.clone()
    } else {
        to
    };
    if recipients.is_empty() {
        return Err(CliError::InvalidConfig(
            "no recipients: pass --to or set recipients in the config".to_string(),
        ));
    }

    let transport: Arc<dyn Transport> = if dry_run {
        Arc::new(LogTransport::new())
    } else {
        Arc::new(
            ResendTransport::from_env(&settings.resend.api_key_env)?
                .with_endpoint(settings.resend.endpoint.clone()),
        )
    };

    let assembler: Arc<dyn DocumentAssembler> = Arc::new(TemplateAssembler::new());

    let pipeline_config = PipelineConfig {
        sender: settings.sender.clone(),
        recipients,
        cc: non_empty(&settings.cc),
        bcc: non_empty(&settings.bcc),
    };
    let mut pipeline = Pipeline::new(pipeline_config, assembler, transport);
    if settings.pdf.enabled && !no_pdf {
        pipeline = pipeline.with_renderer(Arc::new(CommandPdfRenderer::new(
            settings.pdf.command.clone(),
            settings.pdf.args.clone(),
        )));
    }

    let reference = load_reference(&settings)?;
    let mut engine = GenerationEngine::new(reference, seed.or(settings.seed));
    tracing::info!(seed = engine.seed(), dry_run, "send started");

    let outcome = pipeline.run(&mut engine, kind).await?;
    println!("{}: {}", outcome.kind, outcome.subject);
    println!("{}", outcome.status);

    if outcome.is_sent() {
        Ok(())
    } else {
        Err(CliError::DeliveryFailed(outcome.status))
    }
}

fn non_empty(addresses: &[String]) -> Option<Vec<String>> {
    (!addresses.is_empty()).then(|| addresses.to_vec())
}

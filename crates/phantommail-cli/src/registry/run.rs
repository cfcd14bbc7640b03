use std::fs::{OpenOptions, create_dir_all};
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Utc};
use serde::Serialize;

use phantommail_core::{EmailKind, RedactedSecret};
use phantommail_generate::output::csv::write_messages_csv;
use phantommail_generate::{GeneratedEmail, GenerationReport};

use super::{RegistryError, RegistryResult};

/// Metadata captured at run start.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub seed: u64,
    pub count: usize,
    pub kind: Option<EmailKind>,
    pub run_dir: PathBuf,
    pub customers: Option<PathBuf>,
    /// Sender address, already redacted.
    pub sender: String,
    /// Default recipients, already redacted.
    pub recipients: Vec<String>,
    pub api_key: RedactedSecret,
}

/// JSON config written to each run directory.
#[derive(Debug, Serialize)]
pub struct RunConfig {
    pub run_id: String,
    pub started_at: String,
    pub seed: u64,
    pub count: usize,
    pub kind: Option<EmailKind>,
    pub customers: Option<String>,
    pub sender: String,
    pub recipients: Vec<String>,
    pub api_key: RedactedSecret,
    pub git: GitInfo,
}

/// Git metadata for reproducibility.
#[derive(Debug, Serialize)]
pub struct GitInfo {
    pub commit: Option<String>,
    pub dirty: Option<bool>,
}

/// Paths for run artifacts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub root: PathBuf,
    pub logs_path: PathBuf,
    pub messages_path: PathBuf,
    pub report_path: PathBuf,
}

pub fn start_run(ctx: &RunContext) -> RegistryResult<RunPaths> {
    let timestamp = ctx.started_at.format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let run_root = ctx
        .run_dir
        .join(format!("{timestamp}__run_{}", ctx.run_id));

    create_dir_all(&run_root)?;

    let config_path = run_root.join("config.json");
    let logs_path = run_root.join("logs.ndjson");
    let messages_path = run_root.join("messages.csv");
    let report_path = run_root.join("report.json");

    let config = RunConfig {
        run_id: ctx.run_id.clone(),
        started_at: ctx.started_at.to_rfc3339(),
        seed: ctx.seed,
        count: ctx.count,
        kind: ctx.kind,
        customers: ctx
            .customers
            .as_ref()
            .map(|path| path.display().to_string()),
        sender: ctx.sender.clone(),
        recipients: ctx.recipients.clone(),
        api_key: ctx.api_key.clone(),
        git: collect_git_info(),
    };

    write_json(&config_path, &config)?;

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&logs_path)?;

    Ok(RunPaths {
        root: run_root,
        logs_path,
        messages_path,
        report_path,
    })
}

/// Write `messages.csv`, returning the number of bytes written.
pub fn write_messages(paths: &RunPaths, messages: &[GeneratedEmail]) -> RegistryResult<u64> {
    write_messages_csv(&paths.messages_path, messages)
        .map_err(|err| RegistryError::Csv(err.to_string()))
}

pub fn write_report(paths: &RunPaths, report: &GenerationReport) -> RegistryResult<()> {
    write_json(&paths.report_path, report)
}

pub fn collect_git_info() -> GitInfo {
    let commit = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
            } else {
                None
            }
        })
        .filter(|value| !value.is_empty());

    let dirty = Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| !output.stdout.is_empty());

    GitInfo { commit, dirty }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> RegistryResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    serde_json::to_writer_pretty(file, value).map_err(RegistryError::from)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use phantommail_core::redact_secret;
    use serde_json::Value;

    use super::*;

    fn temp_run_dir() -> PathBuf {
        let mut dir = std::env::temp_dir();
        dir.push(format!("phantommail_cli_runs_{}", uuid::Uuid::new_v4()));
        dir
    }

    #[test]
    fn start_run_lays_out_artifacts_without_secrets() {
        let started_at = DateTime::parse_from_rfc3339("2025-05-02T10:20:30Z")
            .expect("timestamp")
            .with_timezone(&Utc);
        let ctx = RunContext {
            run_id: "abc".to_string(),
            started_at,
            seed: 42,
            count: 3,
            kind: Some(EmailKind::Promotional),
            run_dir: temp_run_dir(),
            customers: None,
            sender: "p***@example.com".to_string(),
            recipients: vec!["o***@example.com".to_string()],
            api_key: redact_secret("RESEND_API_KEY", Some("re_supersecretvalue")),
        };

        let paths = start_run(&ctx).expect("start run");
        assert!(paths.root.ends_with("2025-05-02T10-20-30Z__run_abc"));
        assert!(paths.logs_path.exists());

        let raw = fs::read_to_string(paths.root.join("config.json")).expect("config json");
        assert!(!raw.contains("supersecret"));
        let config: Value = serde_json::from_str(&raw).expect("parse config");
        assert_eq!(config["seed"], 42);
        assert_eq!(config["kind"], "promotional");
        assert_eq!(config["api_key"]["redacted"], "re_***");

        fs::remove_dir_all(&ctx.run_dir).expect("cleanup");
    }
}

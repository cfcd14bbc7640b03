use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use phantommail_dispatch::transport::RESEND_ENDPOINT;

/// File read when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "phantommail.toml";
/// Environment variable overriding the configured sender.
pub const SENDER_ENV: &str = "PHANTOMMAIL_SENDER";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfSettings {
    pub enabled: bool,
    /// Program reading HTML on stdin and writing PDF on stdout.
    pub command: String,
    pub args: Vec<String>,
}

impl Default for PdfSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            command: "wkhtmltopdf".to_string(),
            args: ["--quiet", "--page-size", "A4", "-", "-"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResendSettings {
    pub endpoint: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for ResendSettings {
    fn default() -> Self {
        Self {
            endpoint: RESEND_ENDPOINT.to_string(),
            api_key_env: "RESEND_API_KEY".to_string(),
        }
    }
}

/// Contents of `phantommail.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sender: String,
    pub recipients: Vec<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    /// Customer CSV; the bundled table when unset.
    pub customers: Option<PathBuf>,
    pub run_dir: PathBuf,
    pub seed: Option<u64>,
    pub pdf: PdfSettings,
    pub resend: ResendSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sender: "PhantomMail <onboarding@resend.dev>".to_string(),
            recipients: Vec::new(),
            cc: Vec::new(),
            bcc: Vec::new(),
            customers: None,
            run_dir: PathBuf::from("runs"),
            seed: None,
            pdf: PdfSettings::default(),
            resend: ResendSettings::default(),
        }
    }
}

impl Settings {
    /// Apply environment overrides, given the value of [`SENDER_ENV`].
    pub fn with_sender_override(mut self, sender: Option<String>) -> Self {
        if let Some(sender) = sender.filter(|value| !value.trim().is_empty()) {
            self.sender = sender;
        }
        self
    }
}

/// Load settings from `path`, or from [`DEFAULT_CONFIG_PATH`] if it exists.
///
/// A missing default file yields the defaults; an explicitly named file
/// must exist.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, SettingsError> {
    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
    };

    let settings = if path.exists() || required {
        let content = std::fs::read_to_string(&path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        parse_settings(&content)?
    } else {
        Settings::default()
    };

    Ok(settings.with_sender_override(std::env::var(SENDER_ENV).ok()))
}

pub fn parse_settings(content: &str) -> Result<Settings, SettingsError> {
    Ok(toml::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let settings = parse_settings("").expect("parse");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.resend.api_key_env, "RESEND_API_KEY");
        assert!(settings.pdf.enabled);
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let settings = parse_settings(
            r#"
sender = "Ops <ops@example.com>"
recipients = ["planning@example.com"]
seed = 9

[pdf]
enabled = false

[resend]
api_key_env = "MAIL_KEY"
"#,
        )
        .expect("parse");

        assert_eq!(settings.sender, "Ops <ops@example.com>");
        assert_eq!(settings.recipients, vec!["planning@example.com".to_string()]);
        assert_eq!(settings.seed, Some(9));
        assert!(!settings.pdf.enabled);
        assert_eq!(settings.pdf.command, "wkhtmltopdf");
        assert_eq!(settings.resend.api_key_env, "MAIL_KEY");
        assert_eq!(settings.resend.endpoint, RESEND_ENDPOINT);
        assert_eq!(settings.run_dir, PathBuf::from("runs"));
    }

    #[test]
    fn sender_override_ignores_blank_values() {
        let settings = Settings::default().with_sender_override(Some("  ".to_string()));
        assert_eq!(settings.sender, Settings::default().sender);

        let settings =
            Settings::default().with_sender_override(Some("me@example.com".to_string()));
        assert_eq!(settings.sender, "me@example.com");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let path = std::env::temp_dir().join(format!(
            "phantommail_missing_{}.toml",
            uuid::Uuid::new_v4()
        ));
        assert!(matches!(
            load_settings(Some(&path)),
            Err(SettingsError::Io { .. })
        ));
    }

    #[test]
    fn unknown_value_types_are_rejected() {
        assert!(matches!(
            parse_settings("seed = \"soon\""),
            Err(SettingsError::TomlDecode(_))
        ));
    }
}

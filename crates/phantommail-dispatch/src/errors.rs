use phantommail_generate::GenerationError;
use thiserror::Error;

/// Errors raised while assembling, rendering or delivering an email.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("template error: {0}")]
    Template(String),
    #[error("render error: {0}")]
    Render(#[from] askama::Error),
    #[error("pdf error: {0}")]
    Pdf(String),
    #[error("api key missing: environment variable {0} is not set")]
    MissingApiKey(String),
    #[error("delivery rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

pub type Result<T> = std::result::Result<T, DispatchError>;

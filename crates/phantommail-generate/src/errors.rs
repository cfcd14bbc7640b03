use thiserror::Error;

/// Errors emitted while loading reference data or generating content.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("asset error: {0}")]
    Asset(String),
    #[error("unknown email kind: {0}")]
    UnknownKind(String),
    #[error("customer table {0} has no rows")]
    EmptyCustomerTable(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Core(#[from] phantommail_core::Error),
}

use thiserror::Error;

/// Core error type shared across PhantomMail crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A generated entity violates one of its invariants.
    #[error("invariant violated: {0}")]
    Invariant(String),
    /// A textual identifier could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),
    /// Catch-all error for unexpected failures.
    #[error("other error: {0}")]
    Other(String),
}

/// Convenience alias for results returned by PhantomMail crates.
pub type Result<T> = std::result::Result<T, Error>;

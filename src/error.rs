use thiserror::Error;

/// Application error types
///
/// Bad numeric input is never an error: the calculator degrades it to
/// safe defaults. These variants cover caller-level failures only.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog file could not be read or parsed
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Requested model identifier is not present in the result set
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Filesystem error while reading a catalog file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

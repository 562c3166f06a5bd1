//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// NER model error
    #[error("Model error: {0}")]
    Ner(#[from] notaria_ner::NerError),

    /// Extraction error
    #[error("Extraction error: {0}")]
    Extraction(#[from] notaria_extractor::ExtractorError),

    /// None of the configured models could be loaded
    #[error("No NER model available (tried: {0})")]
    NoModel(String),

    /// Some documents could not be processed
    #[error("{0} document(s) failed")]
    DocumentsFailed(usize),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation not permitted
    #[error("Operation not permitted: {0}")]
    NotPermitted(String),
}

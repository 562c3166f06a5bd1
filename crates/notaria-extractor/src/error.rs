//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
///
/// Structural problems in the document (missing sections, no matches) are
/// never errors; they degrade to sentinels or omitted details.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// The NER model could not be loaded or is not serving
    #[error("NER model unavailable: {0}")]
    ModelUnavailable(String),

    /// The NER model failed while processing a text
    #[error("Recognition error: {0}")]
    Recognition(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

//! Trait definitions for external interactions
//!
//! These traits define the boundary between extraction logic and the
//! statistical model. Implementations live in other crates.

/// A raw span as reported by a NER model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSpan {
    /// Model label (e.g. `PER`, `LOC`, `B-ORG`)
    pub label: String,

    /// Start byte offset into the input text
    pub start: usize,

    /// End byte offset (exclusive)
    pub end: usize,

    /// Calibrated score, when the model exposes one
    pub score: Option<f32>,
}

impl ModelSpan {
    /// Create a span without a score
    pub fn new(label: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            label: label.into(),
            start,
            end,
            score: None,
        }
    }

    /// Attach a score
    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }
}

/// Trait for named-entity recognition models
///
/// Implemented by the infrastructure layer (notaria-ner). The model is
/// loaded once by the host and shared read-only, so `predict` takes `&self`.
pub trait NerModel {
    /// Error type for model operations
    type Error;

    /// Model name for logging
    fn name(&self) -> &str;

    /// Verify the model can serve requests
    ///
    /// Called once when the recognizer is built; a failure here is fatal.
    fn ensure_ready(&self) -> Result<(), Self::Error>;

    /// Run the model once over `text` and return its spans
    fn predict(&self, text: &str) -> Result<Vec<ModelSpan>, Self::Error>;
}

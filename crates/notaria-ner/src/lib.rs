//! Notaria NER Model Layer
//!
//! Pluggable named-entity recognition models.
//!
//! # Architecture
//!
//! This crate provides implementations of the `NerModel` trait from `notaria-domain`.
//! The host application loads one model at startup and injects it into the
//! extraction pipeline; nothing here is cached globally.
//!
//! # Models
//!
//! - `MockModel`: Deterministic scripted spans for testing
//! - `GazetteerModel`: Dictionary of known surface forms per label
//! - `ServiceModel`: HTTP client for a NER inference service
//!
//! # Examples
//!
//! ```
//! use notaria_ner::MockModel;
//! use notaria_domain::{ModelSpan, NerModel};
//!
//! let model = MockModel::new(vec![ModelSpan::new("PER", 0, 4)]);
//! let spans = model.predict("Juan compra").unwrap();
//! assert_eq!(spans.len(), 1);
//! assert_eq!(model.call_count(), 1);
//! ```

#![warn(missing_docs)]

pub mod gazetteer;
pub mod service;

use notaria_domain::traits::{ModelSpan, NerModel};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use gazetteer::GazetteerModel;
pub use service::ServiceModel;

/// Errors that can occur during NER operations
#[derive(Error, Debug)]
pub enum NerError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the model
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Gazetteer could not be loaded
    #[error("Gazetteer error: {0}")]
    Gazetteer(String),

    /// Generic error
    #[error("NER error: {0}")]
    Other(String),
}

/// Mock NER model for deterministic testing
///
/// Returns pre-configured spans without running any inference. Spans can be
/// scripted per input text; anything else gets the default spans.
///
/// # Examples
///
/// ```
/// use notaria_ner::MockModel;
/// use notaria_domain::{ModelSpan, NerModel};
///
/// let mut model = MockModel::default();
/// model.add_response("Madrid", vec![ModelSpan::new("LOC", 0, 6)]);
/// assert_eq!(model.predict("Madrid").unwrap()[0].label, "LOC");
/// assert!(model.predict("otra cosa").unwrap().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct MockModel {
    default_spans: Vec<ModelSpan>,
    responses: Arc<Mutex<HashMap<String, Vec<ModelSpan>>>>,
    errors: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
    ready: bool,
}

impl MockModel {
    /// Create a new MockModel returning the same spans for every text
    pub fn new(spans: Vec<ModelSpan>) -> Self {
        Self {
            default_spans: spans,
            responses: Arc::new(Mutex::new(HashMap::new())),
            errors: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            ready: true,
        }
    }

    /// Create a model whose readiness check fails
    pub fn unavailable() -> Self {
        Self {
            ready: false,
            ..Self::default()
        }
    }

    /// Add specific spans for a given text
    pub fn add_response(&mut self, text: impl Into<String>, spans: Vec<ModelSpan>) {
        self.responses.lock().unwrap().insert(text.into(), spans);
    }

    /// Configure to return an error for a specific text
    pub fn add_error(&mut self, text: impl Into<String>) {
        self.errors.lock().unwrap().push(text.into());
    }

    /// Get the number of times predict was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }
}

impl Default for MockModel {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl NerModel for MockModel {
    type Error = NerError;

    fn name(&self) -> &str {
        "mock"
    }

    fn ensure_ready(&self) -> Result<(), Self::Error> {
        if self.ready {
            Ok(())
        } else {
            Err(NerError::ModelNotAvailable("mock".to_string()))
        }
    }

    fn predict(&self, text: &str) -> Result<Vec<ModelSpan>, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        if self.errors.lock().unwrap().iter().any(|t| t == text) {
            return Err(NerError::Other("Mock error".to_string()));
        }

        let responses = self.responses.lock().unwrap();
        if let Some(spans) = responses.get(text) {
            return Ok(spans.clone());
        }

        Ok(self.default_spans.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_model_default() {
        let model = MockModel::new(vec![ModelSpan::new("PER", 0, 4)]);
        let result = model.predict("any text");
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), vec![ModelSpan::new("PER", 0, 4)]);
    }

    #[test]
    fn test_mock_model_specific_responses() {
        let mut model = MockModel::default();
        model.add_response("hola", vec![ModelSpan::new("MISC", 0, 4)]);

        assert_eq!(model.predict("hola").unwrap().len(), 1);
        assert!(model.predict("adiós").unwrap().is_empty());
    }

    #[test]
    fn test_mock_model_call_count() {
        let model = MockModel::default();

        assert_eq!(model.call_count(), 0);

        model.predict("uno").unwrap();
        assert_eq!(model.call_count(), 1);

        model.predict("dos").unwrap();
        assert_eq!(model.call_count(), 2);

        model.reset_call_count();
        assert_eq!(model.call_count(), 0);
    }

    #[test]
    fn test_mock_model_error() {
        let mut model = MockModel::default();
        model.add_error("texto roto");

        let result = model.predict("texto roto");
        assert!(matches!(result.unwrap_err(), NerError::Other(_)));
    }

    #[test]
    fn test_mock_model_unavailable() {
        let model = MockModel::unavailable();
        assert!(matches!(
            model.ensure_ready().unwrap_err(),
            NerError::ModelNotAvailable(_)
        ));
        assert!(MockModel::default().ensure_ready().is_ok());
    }

    #[test]
    fn test_mock_model_clone() {
        let model1 = MockModel::default();
        let model2 = model1.clone();

        model1.predict("texto").unwrap();

        // Both should share the same call count due to Arc
        assert_eq!(model1.call_count(), 1);
        assert_eq!(model2.call_count(), 1);
    }
}

//! Core Extractor implementation

use crate::address::AddressCompleter;
use crate::config::ExtractorConfig;
use crate::details::extract_details;
use crate::error::ExtractorError;
use crate::parties::PartyAttributor;
use crate::recognizer::EntityRecognizer;
use crate::sections::{extract_section, Section};
use crate::types::ExtractionTrace;
use notaria_domain::traits::NerModel;
use notaria_domain::ExtractionResult;
use regex::Regex;
use std::fmt::Display;
use std::sync::{Arc, LazyLock};
use tracing::{debug, info};

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Collapse every whitespace run (newlines included) into one space
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").into_owned()
}

/// The Extractor turns the text of a sale contract into parties and details
///
/// It holds no per-document state: one instance can serve any number of
/// documents, from several threads when the model allows it.
pub struct Extractor<M: NerModel> {
    recognizer: EntityRecognizer<M>,
    completer: AddressCompleter,
    config: ExtractorConfig,
}

impl<M> Extractor<M>
where
    M: NerModel,
    M::Error: Display,
{
    /// Create a new Extractor around a loaded model
    ///
    /// Fails if the configuration is invalid or the model is not ready.
    pub fn new(model: Arc<M>, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        let recognizer = EntityRecognizer::new(model, &config)?;
        let completer = AddressCompleter::new(config.address_lookahead_chars);

        debug!("Extractor ready with model '{}'", recognizer.model_name());
        Ok(Self {
            recognizer,
            completer,
            config,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Name of the injected model
    pub fn model_name(&self) -> &str {
        self.recognizer.model_name()
    }

    /// Extract parties and contract details from raw text
    pub fn extract(&self, text: &str) -> Result<ExtractionResult, ExtractorError> {
        self.extract_with_trace(text).map(|(result, _)| result)
    }

    /// Extract and also return the intermediate sections
    pub fn extract_with_trace(
        &self,
        text: &str,
    ) -> Result<(ExtractionResult, ExtractionTrace), ExtractorError> {
        info!("Starting extraction, text length {}", text.len());

        let normalized = normalize_whitespace(text);
        let reunidos = extract_section(&normalized, Section::Reunidos);
        let exponen = extract_section(&normalized, Section::Exponen);
        let clausulas = extract_section(&normalized, Section::Clausulas);
        debug!(
            "Section lengths: REUNIDOS {}, EXPONEN {}, CLÁUSULAS {}",
            reunidos.len(),
            exponen.len(),
            clausulas.len()
        );

        let attributor = PartyAttributor::new(
            &self.recognizer,
            &self.completer,
            &self.config.party_separators,
        );
        let (parties, mode) = attributor.attribute_parties(&reunidos)?;
        let details = extract_details(&exponen, &clausulas, &normalized);

        info!(
            "Extraction complete: parties via {}, {} of 2 parties found, {} details",
            mode.describe(),
            parties.iter().filter(|p| p.has_any()).count(),
            details.len()
        );

        let trace = ExtractionTrace {
            normalized,
            reunidos,
            exponen,
            clausulas,
            mode,
        };
        Ok((ExtractionResult::new(parties, details), trace))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notaria_ner::MockModel;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a\n\n b\t c "), " a b c ");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ExtractorConfig {
            min_entity_chars: 0,
            ..Default::default()
        };
        let result = Extractor::new(Arc::new(MockModel::default()), config);
        assert!(matches!(result, Err(ExtractorError::Config(_))));
    }

    #[test]
    fn test_unavailable_model_rejected() {
        let result = Extractor::new(Arc::new(MockModel::unavailable()), ExtractorConfig::default());
        assert!(matches!(result, Err(ExtractorError::ModelUnavailable(_))));
    }

    #[test]
    fn test_long_text_is_still_extracted() {
        let extractor = Extractor::new(Arc::new(MockModel::default()), ExtractorConfig::default()).unwrap();
        let text = format!(
            "REUNIDOS Ana, DNI 11111111A. De otra parte Luis, DNI 22222222B. EXPONEN{}",
            " Anexo.".repeat(80_000)
        );

        let result = extractor.extract(&text).unwrap();
        assert_eq!(result.vendedor().national_id, "11111111A");
        assert_eq!(result.comprador().national_id, "22222222B");
    }

    #[test]
    fn test_model_name() {
        let extractor = Extractor::new(Arc::new(MockModel::default()), ExtractorConfig::default()).unwrap();
        assert_eq!(extractor.model_name(), "mock");
    }
}

//! Entity recognition on top of an injected NER model

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use notaria_domain::traits::NerModel;
use notaria_domain::{Entity, EntityCategory};
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, warn};

/// Wraps a NER model: maps labels to categories and drops noise spans
pub struct EntityRecognizer<M: NerModel> {
    model: Arc<M>,
    min_entity_chars: usize,
}

impl<M> EntityRecognizer<M>
where
    M: NerModel,
    M::Error: Display,
{
    /// Create a recognizer, verifying the model is ready
    ///
    /// An unavailable model is fatal: no extraction can run without it.
    pub fn new(model: Arc<M>, config: &ExtractorConfig) -> Result<Self, ExtractorError> {
        model
            .ensure_ready()
            .map_err(|e| ExtractorError::ModelUnavailable(format!("{}: {}", model.name(), e)))?;

        Ok(Self {
            model,
            min_entity_chars: config.min_entity_chars,
        })
    }

    /// Name of the underlying model
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Run the model once over `text` and return the filtered entities
    ///
    /// Entity offsets are byte offsets into `text`, narrowed to the trimmed
    /// surface form.
    pub fn recognize(&self, text: &str) -> Result<Vec<Entity>, ExtractorError> {
        let spans = self
            .model
            .predict(text)
            .map_err(|e| ExtractorError::Recognition(e.to_string()))?;

        let mut entities = Vec::with_capacity(spans.len());
        for span in spans {
            let valid = span.start <= span.end
                && span.end <= text.len()
                && text.is_char_boundary(span.start)
                && text.is_char_boundary(span.end);
            if !valid {
                warn!(
                    "Dropping {} span {}..{} not aligned with the text",
                    span.label, span.start, span.end
                );
                continue;
            }

            let raw = &text[span.start..span.end];
            let surface = raw.trim();
            if is_noise(surface, self.min_entity_chars) {
                continue;
            }

            let start = span.start + (raw.len() - raw.trim_start().len());
            let end = start + surface.len();
            let entity = Entity::new(
                surface,
                EntityCategory::from_model_label(&span.label),
                start,
                end,
            );
            entities.push(match span.score {
                Some(score) => entity.with_confidence(score),
                None => entity,
            });
        }

        debug!("Recognized {} entities in {} bytes", entities.len(), text.len());
        Ok(entities)
    }
}

/// Whether a trimmed surface form is too short or purely numeric
///
/// `.` and `,` are ignored when checking for digits, so "1.500" and
/// "12," are noise too.
pub(crate) fn is_noise(surface: &str, min_chars: usize) -> bool {
    if surface.chars().count() < min_chars {
        return true;
    }
    let stripped: String = surface.chars().filter(|c| *c != '.' && *c != ',').collect();
    stripped.is_empty() || stripped.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use notaria_domain::ModelSpan;
    use notaria_ner::MockModel;

    fn recognizer(model: MockModel) -> EntityRecognizer<MockModel> {
        EntityRecognizer::new(Arc::new(model), &ExtractorConfig::default()).unwrap()
    }

    #[test]
    fn test_is_noise() {
        assert!(is_noise("12", 3));
        assert!(is_noise("A.", 3));
        assert!(is_noise("1.500", 3));
        assert!(is_noise("...", 3));
        assert!(!is_noise("Ana", 3));
        assert!(!is_noise("Calle 5", 3));
    }

    #[test]
    fn test_maps_categories_and_filters_noise() {
        let text = "Juan Pérez, 12, en Madrid para ACME SL y A.";
        let span = |label: &str, surface: &str| {
            let start = text.find(surface).unwrap();
            ModelSpan::new(label, start, start + surface.len())
        };
        let model = MockModel::new(vec![
            span("PER", "Juan Pérez"),
            span("MISC", "12"),
            span("LOC", "Madrid"),
            span("ORG", "ACME SL"),
            span("PER", "A."),
        ]);
        let entities = recognizer(model).recognize(text).unwrap();

        let summary: Vec<_> = entities
            .iter()
            .map(|e| (e.text.as_str(), e.category))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Juan Pérez", EntityCategory::Nombre),
                ("Madrid", EntityCategory::Dir),
                ("ACME SL", EntityCategory::Org),
            ]
        );
    }

    #[test]
    fn test_offsets_follow_trimmed_text() {
        let text = "con  Madrid  cerca";
        let model = MockModel::new(vec![ModelSpan::new("LOC", 3, 13)]);
        let entities = recognizer(model).recognize(text).unwrap();

        assert_eq!(entities[0].text, "Madrid");
        assert_eq!(&text[entities[0].start..entities[0].end], "Madrid");
    }

    #[test]
    fn test_scores_and_default_confidence() {
        let text = "Ana Gil y Luis Sanz";
        let model = MockModel::new(vec![
            ModelSpan::new("PER", 0, 7).with_score(0.75),
            ModelSpan::new("PER", 10, 19),
        ]);
        let entities = recognizer(model).recognize(text).unwrap();
        assert_eq!(entities[0].confidence, 0.75);
        assert_eq!(entities[1].confidence, 1.0);
    }

    #[test]
    fn test_misaligned_spans_are_dropped() {
        let text = "Pérez";
        let model = MockModel::new(vec![
            ModelSpan::new("PER", 0, 2), // inside 'é'
            ModelSpan::new("PER", 0, 40),
        ]);
        assert!(recognizer(model).recognize(text).unwrap().is_empty());
    }

    #[test]
    fn test_unavailable_model_is_fatal() {
        let result = EntityRecognizer::new(
            Arc::new(MockModel::unavailable()),
            &ExtractorConfig::default(),
        );
        assert!(matches!(result, Err(ExtractorError::ModelUnavailable(_))));
    }

    #[test]
    fn test_model_failure_is_reported() {
        let mut model = MockModel::default();
        model.add_error("texto");
        let err = recognizer(model).recognize("texto").unwrap_err();
        assert!(matches!(err, ExtractorError::Recognition(_)));
    }
}

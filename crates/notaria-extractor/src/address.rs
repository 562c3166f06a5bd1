//! Address completion
//!
//! NER models usually stop a location at the street name ("Calle Mayor") and
//! leave out the house number and floor ("5, 3º B"). The completer looks a
//! short distance past the entity for that trailing part and appends it.

use notaria_domain::{Entity, EntityCategory};
use regex::Regex;
use tracing::debug;

/// Optional "número" marker between a street name and its number
const NUMBER_MARKER: &str = r"(?:(?i:número|numero|núm|num|n\.?º|n\.?°|no\.)\.?\s*)?";

/// House number, an optional range or second number, then floor/door tokens
const NUMBER_AND_SUFFIXES: &str = r"(\d+(?:\s*[-,]?\s*\d+)?(?:\s*,?\s*(?:º|ª|(?i:bis|ter|piso|planta|escalera|puerta)\b|[A-Z]\b)\s*\.?\s*\d*)*)";

/// Appends trailing house/floor/door numbers to address entities
#[derive(Debug, Clone)]
pub struct AddressCompleter {
    lookahead_chars: usize,
}

impl AddressCompleter {
    /// Create a completer searching `lookahead_chars` past each entity
    pub fn new(lookahead_chars: usize) -> Self {
        Self { lookahead_chars }
    }

    /// Complete a `DIR` entity found in `source`
    ///
    /// Other categories, and entities whose offsets do not fit `source`, are
    /// returned unchanged. The start offset and confidence never change and
    /// the end offset never moves backwards.
    pub fn complete(&self, source: &str, entity: &Entity) -> Entity {
        if entity.category != EntityCategory::Dir {
            return entity.clone();
        }

        let in_bounds = entity.start <= entity.end
            && entity.end <= source.len()
            && source.is_char_boundary(entity.start)
            && source.is_char_boundary(entity.end);
        if !in_bounds {
            return entity.clone();
        }

        let window_end = source[entity.end..]
            .char_indices()
            .nth(self.lookahead_chars)
            .map(|(offset, _)| entity.end + offset)
            .unwrap_or(source.len());
        let window = &source[entity.start..window_end];

        let pattern = format!(
            r"^(?i:{})\s*(?:,\s*)?{}{}",
            regex::escape(&entity.text),
            NUMBER_MARKER,
            NUMBER_AND_SUFFIXES
        );
        let re = match Regex::new(&pattern) {
            Ok(re) => re,
            Err(e) => {
                debug!("Skipping address completion for '{}': {}", entity.text, e);
                return entity.clone();
            }
        };

        let Some(number) = re
            .captures(window)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim_end())
        else {
            return entity.clone();
        };

        debug!("Completed address '{}' with '{}'", entity.text, number);
        Entity {
            text: format!("{} {}", entity.text, number),
            end: entity.end + number.len(),
            ..entity.clone()
        }
    }

    /// Complete every `DIR` entity in a list
    pub fn complete_all(&self, source: &str, entities: Vec<Entity>) -> Vec<Entity> {
        entities
            .into_iter()
            .map(|entity| self.complete(source, &entity))
            .collect()
    }
}

impl Default for AddressCompleter {
    fn default() -> Self {
        Self::new(50)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: completion never shrinks the span nor moves its start
        #[test]
        fn test_completion_is_monotonic(
            prefix in "[a-z ]{0,20}",
            street in "[A-Z][a-z]{2,10}",
            suffix in "[a-zA-Z0-9,º ]{0,60}",
        ) {
            let source = format!("{}Calle {}{}", prefix, street, suffix);
            let surface = format!("Calle {}", street);
            let start = prefix.len();
            let entity = Entity::new(surface.clone(), EntityCategory::Dir, start, start + surface.len());

            let completed = AddressCompleter::default().complete(&source, &entity);
            prop_assert_eq!(completed.start, entity.start);
            prop_assert!(completed.end >= entity.end);
            prop_assert!(completed.text.len() >= entity.text.len());
            prop_assert_eq!(completed.confidence, entity.confidence);
        }
    }
}

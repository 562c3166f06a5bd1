//! Seller and buyer attribution from the REUNIDOS section
//!
//! The REUNIDOS text is split into a seller half and a buyer half and each
//! half is analysed on its own. When no split is possible the whole text is
//! analysed once and roles are assigned by entity length. The two paths are
//! separate functions selected by [`SplitOutcome`].

use crate::address::AddressCompleter;
use crate::error::ExtractorError;
use crate::recognizer::EntityRecognizer;
use crate::types::{AttributionMode, SplitStrategy};
use notaria_domain::traits::NerModel;
use notaria_domain::{Entity, EntityCategory, Parties, PartyRecord, PartyRole};
use regex::Regex;
use std::fmt::Display;
use std::sync::LazyLock;
use tracing::{debug, warn};

static DNI_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[0-9]{8}[A-Z]\b").unwrap());
static PARAGRAPH_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Result of splitting the REUNIDOS text between the two parties
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitOutcome<'a> {
    /// Seller and buyer text could be told apart
    Structural {
        /// Text describing the seller
        seller: &'a str,
        /// Text describing the buyer
        buyer: &'a str,
        /// Strategy that produced the split
        strategy: SplitStrategy,
    },

    /// No split was possible; the whole text must be analysed at once
    Fallback,
}

/// Keep the text after the first "REUNIDOS" and before the next "EXPONEN"
///
/// Both markers are literal and case-sensitive.
pub fn narrow_reunidos(text: &str) -> &str {
    let after = text.split_once("REUNIDOS").map_or(text, |(_, rest)| rest);
    after.split_once("EXPONEN").map_or(after, |(head, _)| head)
}

/// Split at the character midpoint
///
/// Never splits inside a code point. Both halves are non-empty for any text
/// of two or more characters.
pub fn split_in_half(text: &str) -> (&str, &str) {
    let mid = text.chars().count() / 2;
    let at = text
        .char_indices()
        .nth(mid)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len());
    text.split_at(at)
}

/// Split narrowed REUNIDOS text into seller and buyer halves
///
/// Strategies, first success wins: each separator phrase in order, then
/// blank-line paragraphs, then a 50/50 split. A split only succeeds when
/// both halves contain non-whitespace.
pub fn split_parties<'a, S: AsRef<str>>(text: &'a str, separators: &[S]) -> SplitOutcome<'a> {
    let usable = |seller: &str, buyer: &str| !seller.trim().is_empty() && !buyer.trim().is_empty();

    for separator in separators {
        let separator = separator.as_ref();
        if let Some((seller, buyer)) = text.split_once(separator) {
            if usable(seller, buyer) {
                return SplitOutcome::Structural {
                    seller,
                    buyer,
                    strategy: SplitStrategy::Separator(separator.to_string()),
                };
            }
        }
    }

    let paragraphs: Vec<&str> = PARAGRAPH_BREAK_RE
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if paragraphs.len() >= 2 {
        return SplitOutcome::Structural {
            seller: paragraphs[0],
            buyer: paragraphs[1],
            strategy: SplitStrategy::Paragraphs,
        };
    }

    let (seller, buyer) = split_in_half(text);
    if usable(seller, buyer) {
        return SplitOutcome::Structural {
            seller,
            buyer,
            strategy: SplitStrategy::Halves,
        };
    }

    SplitOutcome::Fallback
}

/// Assigns names, DNIs and addresses to the seller and buyer
pub struct PartyAttributor<'a, M: NerModel> {
    recognizer: &'a EntityRecognizer<M>,
    completer: &'a AddressCompleter,
    separators: &'a [String],
}

impl<'a, M> PartyAttributor<'a, M>
where
    M: NerModel,
    M::Error: Display,
{
    /// Create an attributor borrowing the pipeline's components
    pub fn new(
        recognizer: &'a EntityRecognizer<M>,
        completer: &'a AddressCompleter,
        separators: &'a [String],
    ) -> Self {
        Self {
            recognizer,
            completer,
            separators,
        }
    }

    /// Attribute both parties and report which path produced them
    ///
    /// Blank input gives two "not found" records without running the model.
    pub fn attribute_parties(
        &self,
        reunidos: &str,
    ) -> Result<(Parties, AttributionMode), ExtractorError> {
        if reunidos.trim().is_empty() {
            debug!("No REUNIDOS text, parties not found");
            return Ok((Parties::not_found(), AttributionMode::Empty));
        }

        let narrowed = narrow_reunidos(reunidos);
        match split_parties(narrowed, self.separators) {
            SplitOutcome::Structural {
                seller,
                buyer,
                strategy,
            } => {
                debug!("Split parties using {:?}", strategy);
                let parties = self.attribute_structural(seller, buyer)?;
                Ok((parties, AttributionMode::Structural(strategy)))
            }
            SplitOutcome::Fallback => {
                warn!("Could not split REUNIDOS text, assigning parties by rank");
                let parties = self.attribute_ranked(narrowed)?;
                Ok((parties, AttributionMode::Fallback))
            }
        }
    }

    /// Attribute both parties
    pub fn attribute(&self, reunidos: &str) -> Result<Parties, ExtractorError> {
        self.attribute_parties(reunidos).map(|(parties, _)| parties)
    }

    fn attribute_structural(&self, seller: &str, buyer: &str) -> Result<Parties, ExtractorError> {
        Ok(Parties {
            vendedor: self.describe_party(PartyRole::Vendedor, seller)?,
            comprador: self.describe_party(PartyRole::Comprador, buyer)?,
        })
    }

    fn describe_party(&self, role: PartyRole, text: &str) -> Result<PartyRecord, ExtractorError> {
        let entities = self.entities(text)?;
        let mut record = PartyRecord::not_found(role);

        if let Some(name) = longest(&entities, EntityCategory::Nombre) {
            record.name = name.text.clone();
        }
        if let Some(address) = longest(&entities, EntityCategory::Dir) {
            record.address = address.text.clone();
        }
        if let Some(dni) = DNI_RE.find(text) {
            record.national_id = dni.as_str().to_string();
        }

        Ok(record)
    }

    fn attribute_ranked(&self, text: &str) -> Result<Parties, ExtractorError> {
        let entities = self.entities(text)?;
        let mut parties = Parties::not_found();

        if let [first, second, ..] = ranked(&entities, EntityCategory::Nombre).as_slice() {
            parties.vendedor.name = first.text.clone();
            parties.comprador.name = second.text.clone();
        }
        if let [first, second, ..] = ranked(&entities, EntityCategory::Dir).as_slice() {
            parties.vendedor.address = first.text.clone();
            parties.comprador.address = second.text.clone();
        }

        let dnis: Vec<&str> = DNI_RE.find_iter(text).map(|m| m.as_str()).collect();
        if let [first, second, ..] = dnis.as_slice() {
            parties.vendedor.national_id = first.to_string();
            parties.comprador.national_id = second.to_string();
        }

        Ok(parties)
    }

    /// Recognized entities with addresses completed against `text`
    fn entities(&self, text: &str) -> Result<Vec<Entity>, ExtractorError> {
        let entities = self.recognizer.recognize(text)?;
        Ok(self.completer.complete_all(text, entities))
    }
}

/// Longest entity of a category, in characters; the earliest wins ties
fn longest(entities: &[Entity], category: EntityCategory) -> Option<&Entity> {
    entities
        .iter()
        .filter(|e| e.category == category)
        .fold(None, |best: Option<&Entity>, e| match best {
            Some(b) if b.char_len() >= e.char_len() => Some(b),
            _ => Some(e),
        })
}

/// Entities of a category from longest to shortest, document order on ties
fn ranked(entities: &[Entity], category: EntityCategory) -> Vec<&Entity> {
    let mut matching: Vec<&Entity> = entities.iter().filter(|e| e.category == category).collect();
    matching.sort_by(|a, b| b.char_len().cmp(&a.char_len()));
    matching
}

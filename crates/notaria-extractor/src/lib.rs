//! Notaria Extractor
//!
//! Extracts parties and contract terms from Spanish notarial sale contracts.
//!
//! # Overview
//!
//! The Extractor takes the plain text of a "REUNIDOS / EXPONEN / CLÁUSULAS"
//! contract and returns the seller and buyer (name, DNI, address) together
//! with the contract date, purpose, price, payment terms and warranty.
//! Named entities come from an injected [`NerModel`](notaria_domain::NerModel);
//! everything else is locale-specific pattern matching.
//!
//! # Architecture
//!
//! ```text
//! Text → normalize → Sections ─┬→ REUNIDOS → PartyAttributor (NER + addresses) → Parties
//!                              └→ EXPONEN / CLÁUSULAS → details → ContractDetails
//!                                                   ↓
//!                                           ExtractionResult
//! ```
//!
//! # Key Features
//!
//! - **Graceful degradation**: Missing sections yield "not found" sentinels, never errors
//! - **Layered split strategies**: Separator phrase, paragraphs, then a 50/50 split
//! - **Rank-based fallback**: Isolated behind the same interface as the primary path
//! - **Address completion**: Recovers house/floor/door numbers the model drops
//!
//! # Example Usage
//!
//! ```
//! use notaria_extractor::{Extractor, ExtractorConfig};
//! use notaria_ner::GazetteerModel;
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let model = GazetteerModel::new()
//!     .with_entry("PER", "Juan Pérez García")
//!     .with_entry("PER", "María López Ruiz");
//!
//! let extractor = Extractor::new(Arc::new(model), ExtractorConfig::default())?;
//!
//! let result = extractor.extract(
//!     "REUNIDOS De una parte, Juan Pérez García, con DNI 12345678Z. \
//!      De otra parte, María López Ruiz, con DNI 87654321A. \
//!      EXPONEN Que el objeto consiste en la venta de una vivienda.",
//! )?;
//!
//! assert_eq!(result.vendedor().name, "Juan Pérez García");
//! assert_eq!(result.comprador().national_id, "87654321A");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]

mod error;
mod config;
mod types;
mod recognizer;
mod address;
mod sections;
mod parties;
mod details;
mod extractor;


pub use error::ExtractorError;
pub use config::ExtractorConfig;
pub use types::{AttributionMode, ExtractionTrace, SplitStrategy};
pub use recognizer::EntityRecognizer;
pub use address::AddressCompleter;
pub use sections::{extract_section, extract_section_named, Section};
pub use parties::{narrow_reunidos, split_in_half, split_parties, PartyAttributor, SplitOutcome};
pub use details::extract_details;
pub use extractor::{normalize_whitespace, Extractor};

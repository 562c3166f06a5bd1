//! Notaria Domain Layer
//!
//! This crate contains the domain model for extracting facts from Spanish
//! notarial sale contracts. It has ZERO external dependencies and defines the
//! value objects and trait interfaces that the other crates depend upon.
//!
//! ## Key Concepts
//!
//! - **Entity**: A typed span (person, location, organization, other) found in text
//! - **PartyRecord**: Name, national ID and address for one contract role
//! - **ContractDetails**: Sparse contract metadata (date, purpose, price, ...)
//! - **ExtractionResult**: Both parties plus the contract details
//! - **NerModel**: The boundary to the injected named-entity recognition model
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure value types only
//! - Model implementations live in `notaria-ner`
//! - Extraction logic lives in `notaria-extractor`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod details;
pub mod entity;
pub mod party;
pub mod result;
pub mod traits;

// Re-exports for convenience
pub use details::{ContractDetails, DetailKey};
pub use entity::{Entity, EntityCategory};
pub use party::{PartyRecord, PartyRole, NOT_FOUND, NOT_FOUND_ADDRESS};
pub use result::{ExtractionResult, Parties};
pub use traits::{ModelSpan, NerModel};

//! Gazetteer Model
//!
//! A dictionary-driven recognizer: every label owns a list of surface forms
//! and each occurrence in the text becomes a span. Useful when the parties of
//! a batch of contracts are already known, and as an offline stand-in for a
//! statistical model.
//!
//! # File format
//!
//! ```toml
//! [labels]
//! PER = ["Juan Pérez García", "María López Ruiz"]
//! LOC = ["Calle Mayor", "Madrid"]
//! ```

use crate::NerError;
use notaria_domain::traits::{ModelSpan, NerModel};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct GazetteerFile {
    #[serde(default)]
    labels: BTreeMap<String, Vec<String>>,
}

/// Dictionary-based NER model
#[derive(Debug, Clone, Default)]
pub struct GazetteerModel {
    /// (label, surface form), longest surface first
    entries: Vec<(String, String)>,
}

impl GazetteerModel {
    /// Create an empty gazetteer
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a surface form under a label
    pub fn with_entry(mut self, label: impl Into<String>, surface: impl Into<String>) -> Self {
        self.add_entry(label, surface);
        self
    }

    /// Add a surface form under a label
    pub fn add_entry(&mut self, label: impl Into<String>, surface: impl Into<String>) {
        let surface = surface.into();
        if surface.trim().is_empty() {
            return;
        }
        self.entries.push((label.into(), surface));
        // Stable sort keeps insertion order among equal lengths
        self.entries
            .sort_by(|a, b| b.1.chars().count().cmp(&a.1.chars().count()));
    }

    /// Number of surface forms
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the gazetteer has no surface forms
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load a gazetteer from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, NerError> {
        let file: GazetteerFile = toml::from_str(toml_str)
            .map_err(|e| NerError::Gazetteer(format!("Failed to parse TOML: {}", e)))?;

        let mut model = Self::new();
        for (label, surfaces) in file.labels {
            for surface in surfaces {
                model.add_entry(label.clone(), surface);
            }
        }
        Ok(model)
    }

    /// Load a gazetteer from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, NerError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            NerError::Gazetteer(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&contents)
    }
}

/// Whether `text[start..end]` is delimited by non-word characters
fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

impl NerModel for GazetteerModel {
    type Error = NerError;

    fn name(&self) -> &str {
        "gazetteer"
    }

    fn ensure_ready(&self) -> Result<(), Self::Error> {
        if self.is_empty() {
            return Err(NerError::ModelNotAvailable(
                "gazetteer has no entries".to_string(),
            ));
        }
        Ok(())
    }

    fn predict(&self, text: &str) -> Result<Vec<ModelSpan>, Self::Error> {
        let mut taken: Vec<(usize, usize)> = Vec::new();
        let mut spans = Vec::new();

        for (label, surface) in &self.entries {
            for (start, matched) in text.match_indices(surface.as_str()) {
                let end = start + matched.len();
                let overlaps = taken.iter().any(|&(s, e)| start < e && s < end);
                if overlaps || !is_whole_word(text, start, end) {
                    continue;
                }
                taken.push((start, end));
                spans.push(ModelSpan::new(label.clone(), start, end).with_score(1.0));
            }
        }

        spans.sort_by_key(|span| span.start);
        debug!("Gazetteer found {} spans", spans.len());
        Ok(spans)
    }
}

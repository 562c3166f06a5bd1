//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Configuration for the Extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Entities shorter than this (trimmed, in characters) are noise
    pub min_entity_chars: usize,

    /// How far past an address entity to look for its number (characters)
    pub address_lookahead_chars: usize,

    /// Phrases separating the seller paragraph from the buyer paragraph,
    /// tried in order
    pub party_separators: Vec<String>,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.min_entity_chars == 0 {
            return Err("min_entity_chars must be greater than 0".to_string());
        }
        if self.address_lookahead_chars == 0 {
            return Err("address_lookahead_chars must be greater than 0".to_string());
        }
        if self.party_separators.iter().any(|s| s.trim().is_empty()) {
            return Err("party_separators cannot contain empty phrases".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_entity_chars: 3,
            address_lookahead_chars: 50,
            party_separators: vec!["De otra parte".to_string(), "Por otra parte".to_string()],
        }
    }
}

//! Entity module - typed spans produced by the entity recognizer

use std::fmt;

/// Category assigned to a recognized entity
///
/// Model labels are folded into four categories:
/// - `PER` → Nombre
/// - `LOC` → Dir
/// - `ORG` → Org
/// - anything else → Misc
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityCategory {
    /// Person names
    Nombre,

    /// Locations and street addresses
    Dir,

    /// Organizations
    Org,

    /// Everything the model labels otherwise
    Misc,
}

impl EntityCategory {
    /// Get the category name as used in extraction output
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityCategory::Nombre => "NOMBRE",
            EntityCategory::Dir => "DIR",
            EntityCategory::Org => "ORG",
            EntityCategory::Misc => "MISC",
        }
    }

    /// Map a model label to a category
    ///
    /// Labels are compared case-insensitively and BIO prefixes
    /// (`B-`, `I-`, `E-`, `S-`, `L-`, `U-`) are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use notaria_domain::EntityCategory;
    ///
    /// assert_eq!(EntityCategory::from_model_label("PER"), EntityCategory::Nombre);
    /// assert_eq!(EntityCategory::from_model_label("B-LOC"), EntityCategory::Dir);
    /// assert_eq!(EntityCategory::from_model_label("DATE"), EntityCategory::Misc);
    /// ```
    pub fn from_model_label(label: &str) -> Self {
        let upper = label.trim().to_uppercase();
        let bare = match upper.split_once('-') {
            Some((prefix, rest)) if matches!(prefix, "B" | "I" | "E" | "S" | "L" | "U") => rest,
            _ => upper.as_str(),
        };

        match bare {
            "PER" | "PERSON" => EntityCategory::Nombre,
            "LOC" | "LOCATION" => EntityCategory::Dir,
            "ORG" | "ORGANIZATION" => EntityCategory::Org,
            _ => EntityCategory::Misc,
        }
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recognized entity
///
/// `start` and `end` are byte offsets into the text that was handed to the
/// recognizer. After address completion `text` may be longer than
/// `end - start` suggests, since the completed text joins the original span
/// and its trailing number with a single space.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Surface text (trimmed)
    pub text: String,

    /// Category of the entity
    pub category: EntityCategory,

    /// Start byte offset
    pub start: usize,

    /// End byte offset (exclusive)
    pub end: usize,

    /// Model confidence, 1.0 when the model does not provide scores
    pub confidence: f32,
}

impl Entity {
    /// Create a new entity with the degenerate confidence of 1.0
    pub fn new(text: impl Into<String>, category: EntityCategory, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            category,
            start,
            end,
            confidence: 1.0,
        }
    }

    /// Set a model-provided confidence
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    /// Length of the surface text in characters
    ///
    /// Used for "longest wins" tie-breaking; counts characters, not bytes,
    /// so accented names are not favoured.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

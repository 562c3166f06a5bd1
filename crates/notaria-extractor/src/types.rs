//! Diagnostic types describing how a document was processed

/// How the REUNIDOS text was split into seller and buyer halves
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitStrategy {
    /// Split at the first occurrence of a separator phrase
    Separator(String),

    /// First two blank-line-delimited paragraphs
    Paragraphs,

    /// Character-count midpoint
    Halves,
}

/// Which attribution path produced the parties
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributionMode {
    /// No REUNIDOS text; both parties are sentinels
    Empty,

    /// Each half was analysed on its own
    Structural(SplitStrategy),

    /// Whole-text recognition with rank-based role assignment
    Fallback,
}

impl AttributionMode {
    /// Short description for logs and diagnostics
    pub fn describe(&self) -> String {
        match self {
            AttributionMode::Empty => "empty".to_string(),
            AttributionMode::Structural(SplitStrategy::Separator(sep)) => {
                format!("separator \"{}\"", sep)
            }
            AttributionMode::Structural(SplitStrategy::Paragraphs) => "paragraphs".to_string(),
            AttributionMode::Structural(SplitStrategy::Halves) => "halves".to_string(),
            AttributionMode::Fallback => "fallback".to_string(),
        }
    }
}

/// Intermediate outputs of one extraction
#[derive(Debug, Clone)]
pub struct ExtractionTrace {
    /// Input with whitespace runs collapsed
    pub normalized: String,

    /// REUNIDOS section text (may be empty)
    pub reunidos: String,

    /// EXPONEN section text (may be empty)
    pub exponen: String,

    /// CLÁUSULAS section text (may be empty)
    pub clausulas: String,

    /// Attribution path taken
    pub mode: AttributionMode,
}

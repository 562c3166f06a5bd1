//! Section splitting by conventional notarial headers

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

/// Headers that close any section
const SECTION_END: &str = r"(?:EXPONEN|CLÁUSULAS|CLAUSULAS|FIRMAN|$)";

static REUNIDOS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?is)REUNIDOS(.*?){}", SECTION_END)).unwrap());
static EXPONEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?is)EXPONEN(.*?){}", SECTION_END)).unwrap());
static CLAUSULAS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?is)CL[ÁA]USULAS(.*?){}", SECTION_END)).unwrap());

/// A named region of a sale contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Party identification
    Reunidos,
    /// Recitals, including the object of the contract
    Exponen,
    /// Operative clauses: price, payment, warranty
    Clausulas,
}

impl Section {
    /// All sections in document order
    pub const ALL: [Section; 3] = [Section::Reunidos, Section::Exponen, Section::Clausulas];

    /// Header as written in contracts
    pub fn header(&self) -> &'static str {
        match self {
            Section::Reunidos => "REUNIDOS",
            Section::Exponen => "EXPONEN",
            Section::Clausulas => "CLÁUSULAS",
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            Section::Reunidos => &REUNIDOS_RE,
            Section::Exponen => &EXPONEN_RE,
            Section::Clausulas => &CLAUSULAS_RE,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Text between a section header and the next header (or end of text)
///
/// Header matching ignores case. The result is trimmed; a missing header
/// gives an empty string.
pub fn extract_section(text: &str, section: Section) -> String {
    capture_trimmed(section.pattern(), text)
}

/// Like [`extract_section`] for an arbitrary literal header
pub fn extract_section_named(text: &str, name: &str) -> String {
    let pattern = format!(r"(?is){}(.*?){}", regex::escape(name), SECTION_END);
    match Regex::new(&pattern) {
        Ok(re) => capture_trimmed(&re, text),
        Err(e) => {
            debug!("Invalid section header '{}': {}", name, e);
            String::new()
        }
    }
}

fn capture_trimmed(re: &Regex, text: &str) -> String {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTRACT: &str = "En Madrid, a 3 de mayo de 2023. REUNIDOS De una parte, Ana. \
        De otra parte, Luis. EXPONEN Que la venta consiste en un local. \
        CLÁUSULAS Primera. El precio será de 1000 EUR. FIRMAN Ana y Luis";

    #[test]
    fn test_extracts_each_section() {
        assert_eq!(
            extract_section(CONTRACT, Section::Reunidos),
            "De una parte, Ana. De otra parte, Luis."
        );
        assert_eq!(
            extract_section(CONTRACT, Section::Exponen),
            "Que la venta consiste en un local."
        );
        assert_eq!(
            extract_section(CONTRACT, Section::Clausulas),
            "Primera. El precio será de 1000 EUR."
        );
    }

    #[test]
    fn test_missing_section_is_empty() {
        assert_eq!(extract_section("Sin cabeceras", Section::Reunidos), "");
        assert_eq!(extract_section("REUNIDOS Ana", Section::Exponen), "");
    }

    #[test]
    fn test_last_section_runs_to_end() {
        assert_eq!(extract_section("EXPONEN  Que vende.  ", Section::Exponen), "Que vende.");
    }

    #[test]
    fn test_headers_ignore_case_and_accent() {
        let text = "reunidos Ana\nexponen Algo\nclausulas Pago";
        assert_eq!(extract_section(text, Section::Reunidos), "Ana");
        assert_eq!(extract_section(text, Section::Clausulas), "Pago");
    }

    #[test]
    fn test_spans_newlines() {
        let text = "REUNIDOS\nDe una parte, Ana.\n\nDe otra parte, Luis.\nEXPONEN x";
        assert_eq!(
            extract_section(text, Section::Reunidos),
            "De una parte, Ana.\n\nDe otra parte, Luis."
        );
    }

    #[test]
    fn test_named_section() {
        assert_eq!(extract_section_named(CONTRACT, "FIRMAN"), "Ana y Luis");
        assert_eq!(extract_section_named("ANEXO (1) planos", "ANEXO (1)"), "planos");
        assert_eq!(extract_section_named(CONTRACT, "ANEXO"), "");
    }

    #[test]
    fn test_display_uses_header() {
        assert_eq!(Section::Clausulas.to_string(), "CLÁUSULAS");
    }
}

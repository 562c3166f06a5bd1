//! Contract detail extraction
//!
//! Each detail has its own pattern and is looked up independently; a detail
//! whose pattern does not match is simply absent.

use notaria_domain::ContractDetails;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:En .+?, a|Madrid,?\s+a)\s+(\d{1,2}\s+de\s+[^\d]+\s+de\s+\d{4})").unwrap()
});
static PURPOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)consiste en\s+([^.]+)").unwrap());
static PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:precio|importe).+?(\d+(?:\.\d+)?)\s*(?:EUR|EUROS?|€)").unwrap()
});
static PAYMENT_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)serán abonados de la siguiente forma:").unwrap());
/// A full stop followed by the letter that opens the next sentence, in either case
static SENTENCE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.\s+[A-ZÁÉÍÓÚÑ]").unwrap());
static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:^|\s+)-\s*").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static WARRANTY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:garantía|garantiza).+?(\d+\s+(?:meses?|años?|días?)[^.]+)").unwrap()
});

/// Extract the optional contract details
///
/// The date is searched in the whole document, the purpose in EXPONEN and
/// the remaining details in CLÁUSULAS. Payment terms are only looked for
/// when a price was found.
pub fn extract_details(exponen: &str, clausulas: &str, full_text: &str) -> ContractDetails {
    let mut details = ContractDetails {
        date: first_group(&DATE_RE, full_text),
        purpose: first_group(&PURPOSE_RE, exponen),
        price: first_group(&PRICE_RE, clausulas).map(|amount| format!("{}€", amount)),
        payment_terms: None,
        warranty: first_group(&WARRANTY_RE, clausulas),
    };

    if details.price.is_some() {
        details.payment_terms = payment_terms(clausulas);
    }

    debug!("Found {} contract details", details.len());
    details
}

/// Trimmed text of the first capture group
fn first_group(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Payment schedule block, one bullet per line
///
/// The block runs from the introductory phrase up to the first full stop
/// followed by a new sentence. A bullet dash is not a sentence start.
/// Without such a boundary the block is not reported.
fn payment_terms(clausulas: &str) -> Option<String> {
    let start = PAYMENT_START_RE.find(clausulas)?;
    let boundary = SENTENCE_END_RE.find(&clausulas[start.end()..])?;
    let block = &clausulas[start.start()..start.end() + boundary.start()];

    let collapsed = WHITESPACE_RE.replace_all(block, " ");
    let bulleted = BULLET_RE.replace_all(&collapsed, "\n- ");
    Some(bulleted.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_from_full_text() {
        let details = extract_details("", "", "En Sevilla, a 12 de marzo de 2024, ante mí");
        assert_eq!(details.date.as_deref(), Some("12 de marzo de 2024"));

        let details = extract_details("", "", "Madrid a 1 de enero de 2020");
        assert_eq!(details.date.as_deref(), Some("1 de enero de 2020"));
    }

    #[test]
    fn test_purpose_stops_at_full_stop() {
        let details = extract_details("Que el objeto consiste en  la venta de una vivienda. Y otra", "", "");
        assert_eq!(details.purpose.as_deref(), Some("la venta de una vivienda"));
    }

    #[test]
    fn test_price_is_normalized() {
        let details = extract_details("", "El importe total asciende a 95.000 euros.", "");
        assert_eq!(details.price.as_deref(), Some("95.000€"));

        let details = extract_details("", "El precio será de 150000 EUR.", "");
        assert_eq!(details.price.as_deref(), Some("150000€"));
    }

    #[test]
    fn test_payment_terms_block() {
        let clausulas = "El precio será de 1000 EUR. Serán abonados de la siguiente forma:\n\
            - 500 EUR a la firma.\n  - 500 EUR en junio. Tercera. Otras cosas.";
        let details = extract_details("", clausulas, "");
        assert_eq!(
            details.payment_terms.as_deref(),
            Some("Serán abonados de la siguiente forma:\n- 500 EUR a la firma.\n- 500 EUR en junio")
        );
    }

    #[test]
    fn test_payment_terms_need_price() {
        let clausulas = "Serán abonados de la siguiente forma: - todo al contado. Fin.";
        let details = extract_details("", clausulas, "");
        assert!(details.price.is_none());
        assert!(details.payment_terms.is_none());
    }

    #[test]
    fn test_payment_terms_end_before_lowercase_sentence() {
        let clausulas = "Precio de 10 EUR. Serán abonados de la siguiente forma: - 10 EUR hoy. garantía";
        let details = extract_details("", clausulas, "");
        assert_eq!(details.price.as_deref(), Some("10€"));
        assert_eq!(
            details.payment_terms.as_deref(),
            Some("Serán abonados de la siguiente forma:\n- 10 EUR hoy")
        );
    }

    #[test]
    fn test_payment_terms_need_sentence_boundary() {
        let clausulas = "Precio de 10 EUR. Serán abonados de la siguiente forma: - 10 EUR hoy";
        let details = extract_details("", clausulas, "");
        assert_eq!(details.price.as_deref(), Some("10€"));
        assert!(details.payment_terms.is_none());
    }

    #[test]
    fn test_warranty() {
        let details = extract_details("", "El vendedor garantiza la obra por 6 meses desde la entrega.", "");
        assert_eq!(details.warranty.as_deref(), Some("6 meses desde la entrega"));

        let details = extract_details("", "garantía de 2 años", "");
        assert!(details.warranty.unwrap().contains("2 años"));
    }

    #[test]
    fn test_nothing_matches() {
        let details = extract_details("", "", "");
        assert!(details.is_empty());
    }
}

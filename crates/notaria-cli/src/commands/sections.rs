//! Sections command implementation.

use super::read_stdin;
use crate::cli::SectionsArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use notaria_extractor::{extract_section, normalize_whitespace, Section};
use std::fs;

/// Execute the sections command.
pub fn execute_sections(args: SectionsArgs, formatter: &Formatter) -> Result<()> {
    let text = if args.stdin {
        read_stdin()?
    } else if let Some(path) = args.file {
        fs::read_to_string(&path).map_err(|e| {
            CliError::InvalidInput(format!("Cannot read {}: {}", path.display(), e))
        })?
    } else {
        return Err(CliError::InvalidInput(
            "Must specify either a file or --stdin".to_string(),
        ));
    };

    println!("{}", formatter.format_sections(&split_sections(&text))?);
    Ok(())
}

/// Every section of a document, after whitespace normalization.
pub fn split_sections(text: &str) -> Vec<(Section, String)> {
    let normalized = normalize_whitespace(text);
    Section::ALL
        .iter()
        .map(|&section| (section, extract_section(&normalized, section)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sections() {
        let sections = split_sections("REUNIDOS\n Ana y Luis\nEXPONEN\nQue venden.");

        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0], (Section::Reunidos, "Ana y Luis".to_string()));
        assert_eq!(sections[1], (Section::Exponen, "Que venden.".to_string()));
        assert_eq!(sections[2], (Section::Clausulas, String::new()));
    }
}

//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use notaria_domain::{DetailKey, ExtractionResult, PartyRecord};
use notaria_extractor::Section;
use serde_json::{json, Map, Value};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// One processed document, ready to print.
#[derive(Debug, Clone)]
pub struct DocumentOutput {
    /// File name or `<stdin>`
    pub source: String,
    /// Extraction result
    pub result: ExtractionResult,
    /// Normalized text, when requested
    pub text: Option<String>,
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format extraction results.
    pub fn format_documents(&self, documents: &[DocumentOutput]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_documents_json(documents),
            OutputFormat::Table => Ok(self.format_documents_table(documents)),
        }
    }

    /// Format documents as a JSON array.
    fn format_documents_json(&self, documents: &[DocumentOutput]) -> Result<String> {
        let values: Vec<Value> = documents
            .iter()
            .map(|doc| {
                let mut value = result_json(&doc.result);
                if let Value::Object(map) = &mut value {
                    map.insert("source".to_string(), json!(doc.source));
                    if let Some(text) = &doc.text {
                        map.insert("text".to_string(), json!(text));
                    }
                }
                value
            })
            .collect();

        Ok(serde_json::to_string_pretty(&values)?)
    }

    /// Format documents as tables, one block per document.
    fn format_documents_table(&self, documents: &[DocumentOutput]) -> String {
        if documents.is_empty() {
            return self.colorize("No documents processed.", "yellow");
        }

        documents
            .iter()
            .map(|doc| self.format_document_table(doc))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn format_document_table(&self, doc: &DocumentOutput) -> String {
        let result = &doc.result;
        let mut lines = vec![self.colorize(&format!("== {} ==", doc.source), "cyan")];

        if let Some(date) = result.details.get(DetailKey::Fecha) {
            lines.push(format!("{}: {}", DetailKey::Fecha.label(), date));
        }

        let mut parties = Builder::default();
        parties.push_record([
            "",
            result.vendedor().role.label(),
            result.comprador().role.label(),
        ]);
        let party_rows: [(&str, fn(&PartyRecord) -> &str); 3] = [
            ("Nombre", |p| p.name.as_str()),
            ("DNI", |p| p.national_id.as_str()),
            ("Dirección", |p| p.address.as_str()),
        ];
        for (label, field) in party_rows {
            parties.push_record([label, field(result.vendedor()), field(result.comprador())]);
        }
        let mut table = parties.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        lines.push(table.to_string());

        let details: Vec<(DetailKey, &str)> = result
            .details
            .iter()
            .filter(|(key, _)| *key != DetailKey::Fecha)
            .collect();
        lines.push(self.heading("Detalles del contrato"));
        if details.is_empty() {
            lines.push(self.info("No se encontraron detalles"));
        } else {
            let mut builder = Builder::default();
            for (key, value) in details {
                builder.push_record([key.label(), value]);
            }
            let mut table = builder.build();
            table.with(Style::rounded());
            lines.push(table.to_string());
        }

        if let Some(text) = &doc.text {
            lines.push(self.heading("Texto extraído"));
            lines.push(text.clone());
        }

        lines.join("\n")
    }

    /// Format the sections of a document.
    pub fn format_sections(&self, sections: &[(Section, String)]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let map: Map<String, Value> = sections
                    .iter()
                    .map(|(section, text)| (section.header().to_string(), json!(text)))
                    .collect();
                Ok(serde_json::to_string_pretty(&map)?)
            }
            OutputFormat::Table => Ok(sections
                .iter()
                .map(|(section, text)| {
                    let body = if text.is_empty() {
                        self.colorize("(no encontrada)", "yellow")
                    } else {
                        text.clone()
                    };
                    format!("{}\n{}", self.colorize(section.header(), "cyan"), body)
                })
                .collect::<Vec<_>>()
                .join("\n\n")),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    fn heading(&self, text: &str) -> String {
        if self.color_enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

/// The extraction result as a flat JSON object.
///
/// Role keys hold `NOMBRE`, `DNI` and `DIR`; detail keys are present only
/// when the detail was found.
pub fn result_json(result: &ExtractionResult) -> Value {
    let mut map = Map::new();
    for party in result.parties.iter() {
        map.insert(
            party.role.as_str().to_string(),
            json!({
                "NOMBRE": party.name,
                "DNI": party.national_id,
                "DIR": party.address,
            }),
        );
    }
    for (key, value) in result.details.iter() {
        map.insert(key.as_str().to_string(), json!(value));
    }
    Value::Object(map)
}

//! Extract command implementation.

use super::{read_stdin, STDIN_SOURCE};
use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::{DocumentOutput, Formatter};
use crate::provision::{provision, ModelOverrides};
use notaria_domain::NerModel;
use notaria_extractor::{Extractor, ExtractorError};
use rayon::prelude::*;
use std::fmt::Display;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// A document to process.
#[derive(Debug, Clone)]
pub struct Input {
    /// File name or `<stdin>`
    pub source: String,
    /// Raw text
    pub text: String,
}

/// Execute the extract command.
pub fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let inputs = read_inputs(&args.files, args.stdin)?;

    let overrides = ModelOverrides {
        backend: args.backend.map(Into::into),
        gazetteer: args.gazetteer,
        endpoint: args.endpoint,
    };
    let model = provision(config, &overrides)?;
    let extractor = Extractor::new(Arc::new(model), config.extractor.clone())?;

    info!("Processing {} document(s)", inputs.len());
    let outcomes = extract_documents(&extractor, inputs, args.show_text);

    let mut documents = Vec::with_capacity(outcomes.len());
    let mut failures = 0;
    for (source, outcome) in outcomes {
        match outcome {
            Ok(document) => documents.push(document),
            Err(e) => {
                eprintln!("{}", formatter.error(&format!("{}: {}", source, e)));
                failures += 1;
            }
        }
    }

    if !documents.is_empty() {
        println!("{}", formatter.format_documents(&documents)?);
    }
    if failures > 0 {
        return Err(CliError::DocumentsFailed(failures));
    }
    Ok(())
}

/// Read the documents named on the command line.
pub fn read_inputs(files: &[PathBuf], stdin: bool) -> Result<Vec<Input>> {
    let mut inputs = Vec::with_capacity(files.len() + 1);

    if stdin {
        inputs.push(Input {
            source: STDIN_SOURCE.to_string(),
            text: read_stdin()?,
        });
    }

    for path in files {
        let text = fs::read_to_string(path).map_err(|e| {
            CliError::InvalidInput(format!("Cannot read {}: {}", path.display(), e))
        })?;
        inputs.push(Input {
            source: path.display().to_string(),
            text,
        });
    }

    if inputs.is_empty() {
        return Err(CliError::InvalidInput(
            "Must specify at least one file or --stdin".to_string(),
        ));
    }
    Ok(inputs)
}

/// Run the extractor over every document in parallel, keeping input order.
pub fn extract_documents<M>(
    extractor: &Extractor<M>,
    inputs: Vec<Input>,
    keep_text: bool,
) -> Vec<(String, std::result::Result<DocumentOutput, ExtractorError>)>
where
    M: NerModel + Send + Sync,
    M::Error: Display,
{
    inputs
        .into_par_iter()
        .map(|input| {
            let outcome = extractor
                .extract_with_trace(&input.text)
                .map(|(result, trace)| DocumentOutput {
                    source: input.source.clone(),
                    result,
                    text: keep_text.then_some(trace.normalized),
                });
            (input.source, outcome)
        })
        .collect()
}

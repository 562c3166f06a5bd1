//! NER model provisioning.
//!
//! The model is loaded once at startup and injected into the extractor.
//! For the service backend the configured models are tried in order of
//! preference and the first one the service can run is used.

use crate::config::{Backend, Config};
use crate::error::{CliError, Result};
use notaria_domain::{ModelSpan, NerModel};
use notaria_ner::{GazetteerModel, NerError, ServiceModel};
use std::fmt::Display;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Command-line overrides for model selection.
#[derive(Debug, Clone, Default)]
pub struct ModelOverrides {
    /// Backend to use instead of the configured one
    pub backend: Option<Backend>,
    /// Gazetteer file to use instead of the configured one
    pub gazetteer: Option<PathBuf>,
    /// Service URL to use instead of the configured one
    pub endpoint: Option<String>,
}

/// A ready-to-use NER model of either backend.
#[derive(Debug)]
pub enum ProvisionedModel {
    /// HTTP NER service
    Service(ServiceModel),
    /// Local gazetteer
    Gazetteer(GazetteerModel),
}

impl NerModel for ProvisionedModel {
    type Error = NerError;

    fn name(&self) -> &str {
        match self {
            ProvisionedModel::Service(model) => model.name(),
            ProvisionedModel::Gazetteer(model) => model.name(),
        }
    }

    fn ensure_ready(&self) -> std::result::Result<(), Self::Error> {
        match self {
            ProvisionedModel::Service(model) => model.ensure_ready(),
            ProvisionedModel::Gazetteer(model) => model.ensure_ready(),
        }
    }

    fn predict(&self, text: &str) -> std::result::Result<Vec<ModelSpan>, Self::Error> {
        match self {
            ProvisionedModel::Service(model) => model.predict(text),
            ProvisionedModel::Gazetteer(model) => model.predict(text),
        }
    }
}

/// Load the NER model described by the configuration and overrides.
pub fn provision(config: &Config, overrides: &ModelOverrides) -> Result<ProvisionedModel> {
    let gazetteer = overrides.gazetteer.as_ref().or(config.gazetteer.as_ref());
    // An explicit gazetteer file on the command line selects its backend
    let backend = overrides
        .backend
        .or_else(|| overrides.gazetteer.as_ref().map(|_| Backend::Gazetteer))
        .unwrap_or(config.backend);

    match backend {
        Backend::Gazetteer => {
            let path = gazetteer.ok_or_else(|| {
                CliError::Config("The gazetteer backend needs a gazetteer file".to_string())
            })?;
            let model = GazetteerModel::from_file(path)?;
            model.ensure_ready()?;
            info!("Loaded gazetteer {} ({} entries)", path.display(), model.len());
            Ok(ProvisionedModel::Gazetteer(model))
        }
        Backend::Service => {
            let endpoint = overrides
                .endpoint
                .clone()
                .unwrap_or_else(|| config.service.endpoint.clone());
            let timeout = Duration::from_secs(config.service.timeout_secs);

            let candidates = config
                .service
                .models
                .iter()
                .map(|name| {
                    ServiceModel::with_timeout(endpoint.as_str(), name.as_str(), timeout)
                        .map(|model| model.with_max_retries(config.service.max_retries))
                })
                .collect::<std::result::Result<Vec<_>, _>>()?;

            first_ready(candidates).map(ProvisionedModel::Service)
        }
    }
}

/// First model whose readiness check passes, warning on every downgrade.
pub fn first_ready<M>(candidates: impl IntoIterator<Item = M>) -> Result<M>
where
    M: NerModel,
    M::Error: Display,
{
    let mut tried = Vec::new();
    for model in candidates {
        match model.ensure_ready() {
            Ok(()) => {
                if !tried.is_empty() {
                    warn!("Using fallback model '{}'", model.name());
                }
                info!("NER model '{}' ready", model.name());
                return Ok(model);
            }
            Err(e) => {
                warn!("Model '{}' unavailable: {}", model.name(), e);
                tried.push(model.name().to_string());
            }
        }
    }

    if tried.is_empty() {
        return Err(CliError::Config("No NER models configured".to_string()));
    }
    Err(CliError::NoModel(tried.join(", ")))
}

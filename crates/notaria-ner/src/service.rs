//! NER Service Model
//!
//! Client for a NER inference service (for example a spaCy model served over
//! HTTP). The service is expected to expose:
//!
//! - `GET  {endpoint}/models` → `{"models": ["es_core_news_lg", ...]}`
//! - `POST {endpoint}/ner` with `{"model": ..., "text": ...}` →
//!   `{"entities": [{"label": "PER", "start": 0, "end": 17, "score": 0.98}]}`
//!
//! Offsets in the response are character offsets; they are converted to byte
//! offsets before leaving this module.
//!
//! # Examples
//!
//! ```no_run
//! use notaria_ner::ServiceModel;
//! use notaria_domain::NerModel;
//!
//! let model = ServiceModel::new("http://localhost:8085", "es_core_news_lg").unwrap();
//! model.ensure_ready().unwrap();
//! let spans = model.predict("Juan Pérez García vive en Madrid").unwrap();
//! ```

use crate::NerError;
use notaria_domain::traits::{ModelSpan, NerModel};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Default NER service endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8085";

/// Default timeout for NER requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// NER service client
#[derive(Debug)]
pub struct ServiceModel {
    endpoint: String,
    model: String,
    client: Client,
    max_retries: u32,
    /// Set once the service has confirmed the model
    ready: OnceLock<()>,
}

/// Request body for the NER endpoint
#[derive(Serialize)]
struct NerRequest<'a> {
    model: &'a str,
    text: &'a str,
}

/// Response from the NER endpoint
#[derive(Deserialize)]
struct NerResponse {
    entities: Vec<ServiceEntity>,
}

#[derive(Deserialize)]
struct ServiceEntity {
    label: String,
    start: usize,
    end: usize,
    #[serde(default)]
    score: Option<f32>,
}

/// Response from the model listing endpoint
#[derive(Deserialize)]
struct ModelsResponse {
    models: Vec<String>,
}

impl ServiceModel {
    /// Create a new service client
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Service base URL (e.g., "http://localhost:8085")
    /// - `model`: Model to request (e.g., "es_core_news_lg")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, NerError> {
        Self::with_timeout(endpoint, model, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new service client with a request timeout
    pub fn with_timeout(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NerError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NerError::Communication(format!("Failed to build client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
            ready: OnceLock::new(),
        })
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Service endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// List the models installed on the service
    pub fn available_models(&self) -> Result<Vec<String>, NerError> {
        let url = format!("{}/models", self.endpoint);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| NerError::Communication(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(NerError::Communication(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        response
            .json::<ModelsResponse>()
            .map(|r| r.models)
            .map_err(|e| NerError::InvalidResponse(format!("Failed to parse model list: {}", e)))
    }

    /// Run the NER endpoint once, with retries and exponential backoff
    fn request_entities(&self, text: &str) -> Result<Vec<ServiceEntity>, NerError> {
        let url = format!("{}/ner", self.endpoint);
        let body = NerRequest {
            model: &self.model,
            text,
        };

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.client.post(&url).json(&body).send() {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response.json::<NerResponse>().map(|r| r.entities).map_err(|e| {
                            NerError::InvalidResponse(format!("Failed to parse response: {}", e))
                        });
                    } else if status == StatusCode::NOT_FOUND {
                        return Err(NerError::ModelNotAvailable(self.model.clone()));
                    } else {
                        let error_text = response
                            .text()
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(NerError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(NerError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                warn!("NER request failed, retrying in {}s", delay.as_secs());
                thread::sleep(delay);
            }
        }

        Err(last_error
            .unwrap_or_else(|| NerError::Communication("Max retries exceeded".to_string())))
    }
}

/// Convert a character offset into a byte offset
///
/// `char_offset == number of chars` maps to `text.len()`.
fn char_to_byte(text: &str, char_offset: usize) -> Option<usize> {
    text.char_indices()
        .map(|(byte, _)| byte)
        .chain(std::iter::once(text.len()))
        .nth(char_offset)
}

impl NerModel for ServiceModel {
    type Error = NerError;

    fn name(&self) -> &str {
        &self.model
    }

    /// Checks the model list once; later calls reuse a positive answer.
    fn ensure_ready(&self) -> Result<(), Self::Error> {
        if self.ready.get().is_some() {
            return Ok(());
        }

        let models = self.available_models()?;
        if models.iter().any(|m| m == &self.model) {
            let _ = self.ready.set(());
            Ok(())
        } else {
            Err(NerError::ModelNotAvailable(self.model.clone()))
        }
    }

    fn predict(&self, text: &str) -> Result<Vec<ModelSpan>, Self::Error> {
        let entities = self.request_entities(text)?;
        debug!("NER service returned {} entities", entities.len());

        let mut spans = Vec::with_capacity(entities.len());
        for entity in entities {
            match (char_to_byte(text, entity.start), char_to_byte(text, entity.end)) {
                (Some(start), Some(end)) if start <= end => {
                    let span = ModelSpan::new(entity.label, start, end);
                    spans.push(match entity.score {
                        Some(score) => span.with_score(score),
                        None => span,
                    });
                }
                _ => warn!(
                    "Dropping entity {} with offsets {}..{} outside the text",
                    entity.label, entity.start, entity.end
                ),
            }
        }
        Ok(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_model_creation() {
        let model = ServiceModel::new("http://localhost:8085/", "es_core_news_lg").unwrap();
        assert_eq!(model.endpoint(), "http://localhost:8085");
        assert_eq!(model.name(), "es_core_news_lg");
        assert_eq!(model.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_service_model_with_max_retries() {
        let model = ServiceModel::new(DEFAULT_ENDPOINT, "es_core_news_sm")
            .unwrap()
            .with_max_retries(5);
        assert_eq!(model.max_retries, 5);

        let model = model.with_max_retries(0);
        assert_eq!(model.max_retries, 1);
    }

    #[test]
    fn test_char_to_byte() {
        let text = "Pérez, Ávila";
        assert_eq!(char_to_byte(text, 0), Some(0));
        assert_eq!(char_to_byte(text, 2), Some(3));
        assert_eq!(char_to_byte(text, 12), Some(text.len()));
        assert_eq!(char_to_byte(text, 13), None);
    }

    #[test]
    fn test_service_error_handling() {
        // Use an unroutable port to trigger an error
        let model = ServiceModel::new("http://127.0.0.1:1", "es_core_news_lg")
            .unwrap()
            .with_max_retries(1);

        match model.predict("texto") {
            Err(NerError::Communication(_)) => {} // Expected
            other => panic!("Expected Communication error, got {:?}", other.map(|s| s.len())),
        }
        assert!(model.ensure_ready().is_err());
    }

    /// Serve one `GET /models` response, then stop listening
    fn serve_model_list_once(body: &'static str) -> (String, thread::JoinHandle<()>) {
        use std::io::{Read, Write};
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        (endpoint, handle)
    }

    #[test]
    fn test_ensure_ready_queries_the_service_once() {
        let (endpoint, server) = serve_model_list_once(r#"{"models":["es_core_news_lg"]}"#);
        let model = ServiceModel::new(endpoint, "es_core_news_lg")
            .unwrap()
            .with_max_retries(1);

        assert!(model.ensure_ready().is_ok());
        server.join().unwrap();
        // The listener is gone, so a second request would fail
        assert!(model.ensure_ready().is_ok());
    }

    #[test]
    fn test_ensure_ready_missing_model() {
        let (endpoint, server) = serve_model_list_once(r#"{"models":["es_core_news_sm"]}"#);
        let model = ServiceModel::new(endpoint, "es_core_news_lg").unwrap();

        assert!(matches!(model.ensure_ready(), Err(NerError::ModelNotAvailable(_))));
        server.join().unwrap();
        assert!(model.ensure_ready().is_err());
    }

    // Integration tests (requires a running NER service)
    #[test]
    #[ignore]
    fn test_service_predict_integration() {
        let model = ServiceModel::new(DEFAULT_ENDPOINT, "es_core_news_lg").unwrap();
        if model.ensure_ready().is_ok() {
            let spans = model.predict("Juan Pérez García vive en Madrid").unwrap();
            assert!(!spans.is_empty());
        }
    }
}

//! Ollama HTTP client for local model inference.
//!
//! Talks to a locally-hosted Ollama instance over its REST API:
//! `POST /api/generate` for single-turn generation and `GET /api/tags`
//! for model discovery. Nothing here ever sees a raw identifying value:
//! callers pass in text that has already been scrubbed.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::GatewayError;

/// Preferred summarization models, in order. The first installed model
/// from this list wins.
const SUMMARY_MODELS: &[&str] = &[
    "medgemma",
    "llama3.1:8b",
    "llama3.1",
    "mistral:7b",
    "mistral",
];

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// HTTP client for a local Ollama instance.
pub struct OllamaClient {
    base_url: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl OllamaClient {
    /// Create a client pointing at `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        })
    }

    /// Client for the default local instance at `localhost:11434`.
    pub fn default_local() -> Result<Self, GatewayError> {
        Self::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS)
    }

    /// Client configured from `OLLAMA_HOST`, falling back to the default
    /// local instance.
    pub fn from_env() -> Result<Self, GatewayError> {
        match std::env::var("OLLAMA_HOST") {
            Ok(host) if !host.trim().is_empty() => Self::new(host.trim(), DEFAULT_TIMEOUT_SECS),
            _ => Self::default_local(),
        }
    }

    /// Single-turn generation. Returns the model's full response text.
    pub async fn generate(
        &self,
        model: &str,
        prompt: &str,
        system: &str,
    ) -> Result<String, GatewayError> {
        let request_id = Uuid::new_v4();
        info!(request_id = %request_id, model, "invoking local model");

        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model,
            prompt,
            system,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::ResponseParse(e.to_string()))?;

        info!(
            request_id = %request_id,
            chars = parsed.response.chars().count(),
            "local model responded"
        );

        Ok(parsed.response)
    }

    /// List the models installed in the local instance.
    pub async fn list_models(&self) -> Result<Vec<String>, GatewayError> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TagsResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::ResponseParse(e.to_string()))?;

        Ok(parsed.models.into_iter().map(|m| m.name).collect())
    }

    /// Resolve the best installed summarization model.
    pub async fn find_summary_model(&self) -> Result<String, GatewayError> {
        let available = self.list_models().await?;
        for preferred in SUMMARY_MODELS {
            if available.iter().any(|m| m.starts_with(preferred)) {
                return Ok((*preferred).to_string());
            }
        }
        Err(GatewayError::NoModelAvailable)
    }

    fn map_transport_error(&self, e: reqwest::Error) -> GatewayError {
        if e.is_connect() {
            GatewayError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            GatewayError::Timeout(self.timeout_secs)
        } else {
            GatewayError::Invocation(e.to_string())
        }
    }
}

/// Request body for `POST /api/generate`.
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
}

/// Response body from `POST /api/generate`.
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Response body from `GET /api/tags`.
#[derive(Deserialize)]
struct TagsResponse {
    models: Vec<TaggedModel>,
}

#[derive(Deserialize)]
struct TaggedModel {
    name: String,
}

//! Ollama adapter. Implements CompletionPort over the local `/api/generate` endpoint.

use crate::domain::DomainError;
use crate::ports::{CompletionPort, GenerationOptions};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

pub use crate::shared::config::DEFAULT_OLLAMA_URL;

/// Ollama completion adapter (non-streaming).
pub struct OllamaAdapter {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaAdapter {
    /// # Arguments
    /// * `base_url` - Server root (e.g. "http://localhost:11434")
    /// * `model` - Model name (e.g. "llama3.2", "mistral", "phi")
    /// * `timeout` - Request timeout
    pub fn new(base_url: String, model: String, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Model(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url,
            model,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
    top_k: u32,
}

impl From<&GenerationOptions> for OllamaOptions {
    fn from(o: &GenerationOptions) -> Self {
        Self {
            temperature: o.temperature,
            num_predict: o.max_tokens,
            top_k: o.top_k,
        }
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[async_trait::async_trait]
impl CompletionPort for OllamaAdapter {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, DomainError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: options.into(),
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "sending prompt to Ollama");

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::Model(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "Ollama returned error");
            return Err(DomainError::Model(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Model(format!("Failed to parse Ollama response: {}", e)))?;

        Ok(body.response)
    }
}

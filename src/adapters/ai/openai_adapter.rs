//! OpenAI-compatible adapter. Implements CompletionPort over chat completions.
//!
//! Works with the OpenAI API, Azure OpenAI and any compatible server.

use crate::domain::DomainError;
use crate::ports::{CompletionPort, GenerationOptions};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

pub use crate::shared::config::DEFAULT_OPENAI_URL;

/// OpenAI-compatible completion adapter.
pub struct OpenAiAdapter {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiAdapter {
    /// Create a new OpenAI adapter.
    ///
    /// # Arguments
    /// * `api_url` - API endpoint (e.g., "https://api.openai.com/v1/chat/completions")
    /// * `api_key` - API key (can be empty for local servers)
    /// * `model` - Model name (e.g., "gpt-4o-mini")
    /// * `timeout` - Request timeout
    pub fn new(
        api_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Model(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
        })
    }

    fn request(&self, prompt: &str, options: &GenerationOptions) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        }
    }
}

/// OpenAI API request structure.
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// OpenAI API response structure.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: String,
}

#[async_trait::async_trait]
impl CompletionPort for OpenAiAdapter {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, DomainError> {
        debug!(model = %self.model, prompt_len = prompt.len(), "sending prompt to chat completions");

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&self.request(prompt, options))
            .send()
            .await
            .map_err(|e| DomainError::Model(format!("HTTP request failed: {}", e)))?;

        // Check status
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "AI API returned error");
            return Err(DomainError::Model(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Model(format!("Failed to parse API response: {}", e)))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| DomainError::Model("No response choices returned".to_string()))
    }
}

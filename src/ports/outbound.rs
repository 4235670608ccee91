//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::DomainError;

/// Decoding parameters for one completion call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    /// Output cap in tokens (`num_predict` for Ollama, `max_tokens` for OpenAI-compatible APIs).
    pub max_tokens: u32,
    /// Sampling pool size. Ignored by backends that do not support it.
    pub top_k: u32,
}

impl GenerationOptions {
    /// Near-greedy decoding with a tiny output cap, for one-word sentiment answers.
    pub const SENTIMENT: GenerationOptions = GenerationOptions {
        temperature: 0.1,
        max_tokens: 5,
        top_k: 1,
    };

    /// Moderate randomness and room for a short JSON array.
    pub const THEMES: GenerationOptions = GenerationOptions {
        temperature: 0.3,
        max_tokens: 100,
        top_k: 10,
    };
}

/// Generative model gateway. One prompt in, raw text out.
#[async_trait::async_trait]
pub trait CompletionPort: Send + Sync {
    /// Model identifier (e.g. "llama3.2", "gpt-4o-mini"). Used for diagnostics.
    fn model(&self) -> &str;

    /// Run a single completion. No retries; callers decide what to do on failure.
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, DomainError>;
}

/// Prompt template store keyed by theme name.
///
/// Themes here are free-form strings: the store may carry keys outside the
/// classifier vocabulary (e.g. "stress").
pub trait PromptStorePort: Send + Sync {
    /// A writing prompt for `theme`, falling back to the default theme when absent.
    fn prompt_for_theme(&self, theme: &str) -> String;

    /// Theme keys available in the store, sorted.
    fn themes(&self) -> Vec<String>;
}

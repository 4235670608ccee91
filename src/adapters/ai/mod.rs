//! AI adapter module. Implements CompletionPort for generative classification.
//!
//! Provides Ollama and OpenAI-compatible adapters, plus a mock adapter for testing.

pub mod mock_adapter;
pub mod ollama_adapter;
pub mod openai_adapter;

pub use mock_adapter::MockCompletionAdapter;
pub use ollama_adapter::{DEFAULT_OLLAMA_URL, OllamaAdapter};
pub use openai_adapter::{DEFAULT_OPENAI_URL, OpenAiAdapter};

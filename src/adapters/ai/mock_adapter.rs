//! Mock completion adapter for testing without a model server.
//!
//! Returns scripted replies, optionally after a delay or as a failure.

use crate::domain::DomainError;
use crate::ports::{CompletionPort, GenerationOptions};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::info;

/// Canned reply for sentiment prompts when no script is set.
const DEFAULT_SENTIMENT_REPLY: &str = "neutral";
/// Canned reply for theme prompts when no script is set.
const DEFAULT_THEMES_REPLY: &str = r#"[{"theme": "reflection", "confidence": 0.7}]"#;

#[derive(Debug, Clone)]
enum Script {
    /// Answer by prompt kind with the defaults above.
    Canned,
    /// Same text for every call.
    Reply(String),
    /// Fail every call with this message.
    Fail(String),
}

/// Mock completion adapter.
///
/// Counts calls so tests can assert whether the model was consulted.
pub struct MockCompletionAdapter {
    script: Script,
    /// Simulated latency.
    delay: Duration,
    calls: AtomicUsize,
}

impl MockCompletionAdapter {
    /// Canned answers, no delay.
    pub fn new() -> Self {
        Self::with_script(Script::Canned)
    }

    /// Reply with `text` to every prompt.
    pub fn with_reply(text: impl Into<String>) -> Self {
        Self::with_script(Script::Reply(text.into()))
    }

    /// Fail every call.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_script(Script::Fail(message.into()))
    }

    fn with_script(script: Script) -> Self {
        Self {
            script,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    /// Add simulated latency to every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of `generate` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockCompletionAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CompletionPort for MockCompletionAdapter {
    fn model(&self) -> &str {
        "mock"
    }

    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        info!(
            prompt_len = prompt.len(),
            max_tokens = options.max_tokens,
            "[MOCK] Simulating completion"
        );

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match &self.script {
            Script::Canned => {
                if *options == GenerationOptions::SENTIMENT {
                    Ok(DEFAULT_SENTIMENT_REPLY.to_string())
                } else {
                    Ok(DEFAULT_THEMES_REPLY.to_string())
                }
            }
            Script::Reply(text) => Ok(text.clone()),
            Script::Fail(message) => Err(DomainError::Model(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_adapter_canned() {
        let adapter = MockCompletionAdapter::new();
        let sentiment = adapter
            .generate("Sentiment:", &GenerationOptions::SENTIMENT)
            .await
            .unwrap();
        assert_eq!(sentiment, "neutral");
        let themes = adapter
            .generate("Themes (JSON only):", &GenerationOptions::THEMES)
            .await
            .unwrap();
        assert!(themes.starts_with('['));
        assert_eq!(adapter.calls(), 2);
    }

    #[tokio::test]
    async fn test_mock_adapter_failing() {
        let adapter = MockCompletionAdapter::failing("connection refused");
        let err = adapter
            .generate("x", &GenerationOptions::SENTIMENT)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Model(_)));
        assert_eq!(adapter.calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_adapter_fixed_reply_ignores_prompt_kind() {
        let adapter = MockCompletionAdapter::with_reply("negative");
        let out = adapter
            .generate("x", &GenerationOptions::THEMES)
            .await
            .unwrap();
        assert_eq!(out, "negative");
        let out = adapter
            .generate("x", &GenerationOptions::SENTIMENT)
            .await
            .unwrap();
        assert_eq!(out, "negative");
    }
}

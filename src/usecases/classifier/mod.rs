//! Entry classifier. Sentiment label plus ranked theme predictions.
//!
//! The mode is picked once at construction; callers see the same interface
//! either way and classification always returns a value.

pub mod generative;
pub mod keyword;

pub use generative::GenerativeClassifier;
pub use keyword::{DEFAULT_PREDICTION, KeywordClassifier};

use crate::domain::{EntryClassification, Sentiment, ThemePrediction};
use crate::ports::CompletionPort;
use std::sync::Arc;
use std::time::Duration;

pub use crate::shared::config::DEFAULT_TOP_K;

/// Classification strategy.
pub enum Classifier {
    /// Fixed keyword lists, no I/O.
    Keyword(KeywordClassifier),
    /// One model call per operation, keyword fallback on any failure.
    Generative(GenerativeClassifier),
}

impl Classifier {
    pub fn keyword() -> Self {
        Classifier::Keyword(KeywordClassifier::new())
    }

    pub fn generative(completion: Arc<dyn CompletionPort>, timeout: Duration) -> Self {
        Classifier::Generative(GenerativeClassifier::new(completion, timeout))
    }

    /// "keyword" or "generative", for logs and the UI.
    pub fn mode(&self) -> &'static str {
        match self {
            Classifier::Keyword(_) => "keyword",
            Classifier::Generative(_) => "generative",
        }
    }

    pub async fn classify_sentiment(&self, text: &str) -> Sentiment {
        match self {
            Classifier::Keyword(k) => k.classify_sentiment(text),
            Classifier::Generative(g) => g.classify_sentiment(text).await,
        }
    }

    /// At most `top_k` predictions, never empty.
    pub async fn classify_themes(&self, text: &str, top_k: usize) -> Vec<ThemePrediction> {
        match self {
            Classifier::Keyword(k) => k.classify_themes(text, top_k),
            Classifier::Generative(g) => g.classify_themes(text, top_k).await,
        }
    }

    /// Themes then sentiment for one entry.
    pub async fn classify_entry(&self, text: &str, top_k: usize) -> EntryClassification {
        let themes = self.classify_themes(text, top_k).await;
        let sentiment = self.classify_sentiment(text).await;
        EntryClassification { themes, sentiment }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockCompletionAdapter;
    use crate::domain::Theme;

    #[tokio::test]
    async fn test_keyword_mode_classify_entry() {
        let c = Classifier::keyword();
        assert_eq!(c.mode(), "keyword");
        let out = c
            .classify_entry("I am so grateful and happy today", DEFAULT_TOP_K)
            .await;
        assert_eq!(out.sentiment, Sentiment::Positive);
        assert!(out.themes.iter().any(|p| p.theme == Theme::Gratitude));
    }

    #[tokio::test]
    async fn test_generative_mode_hides_failures() {
        let c = Classifier::generative(
            Arc::new(MockCompletionAdapter::failing("model not found")),
            Duration::from_secs(1),
        );
        assert_eq!(c.mode(), "generative");
        let text = "Work was hard and I feel frustrated and upset";
        let out = c.classify_entry(text, DEFAULT_TOP_K).await;
        let expected = Classifier::keyword().classify_entry(text, DEFAULT_TOP_K).await;
        assert_eq!(out, expected);
    }
}

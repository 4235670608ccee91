//! Generative-model classifier with keyword fallback.
//!
//! Each call makes at most one completion request, bounded by a timeout. Any
//! failure (transport, timeout, malformed output) is logged and answered by
//! the keyword classifier instead; callers never see an error.

use super::keyword::KeywordClassifier;
use crate::domain::{DomainError, Sentiment, Theme, ThemePrediction};
use crate::ports::{CompletionPort, GenerationOptions};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub struct GenerativeClassifier {
    completion: Arc<dyn CompletionPort>,
    timeout: Duration,
    fallback: KeywordClassifier,
}

impl GenerativeClassifier {
    /// # Arguments
    /// * `completion` - Model gateway (Ollama, OpenAI-compatible, mock)
    /// * `timeout` - Upper bound on a single completion call
    pub fn new(completion: Arc<dyn CompletionPort>, timeout: Duration) -> Self {
        Self {
            completion,
            timeout,
            fallback: KeywordClassifier::new(),
        }
    }

    pub fn model(&self) -> &str {
        self.completion.model()
    }

    pub async fn classify_sentiment(&self, text: &str) -> Sentiment {
        let outcome = self
            .complete(&sentiment_prompt(text), &GenerationOptions::SENTIMENT)
            .await
            .and_then(|raw| parse_sentiment(&raw));

        match outcome {
            Ok(sentiment) => sentiment,
            Err(e) => {
                warn!(model = %self.model(), error = %e, "sentiment completion failed, using keyword classifier");
                self.fallback.classify_sentiment(text)
            }
        }
    }

    /// Model-ranked themes, or the keyword ranking when the model output yields nothing usable.
    /// Results from the two paths are never merged.
    pub async fn classify_themes(&self, text: &str, top_k: usize) -> Vec<ThemePrediction> {
        let top_k = top_k.max(1);
        let outcome = self
            .complete(&themes_prompt(text, top_k), &GenerationOptions::THEMES)
            .await
            .and_then(|raw| parse_themes(&raw, top_k));

        match outcome {
            Ok(predictions) => predictions,
            Err(e) => {
                warn!(model = %self.model(), error = %e, "theme completion failed, using keyword classifier");
                self.fallback.classify_themes(text, top_k)
            }
        }
    }

    async fn complete(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, DomainError> {
        let raw = tokio::time::timeout(self.timeout, self.completion.generate(prompt, options))
            .await
            .map_err(|_| {
                DomainError::Model(format!("completion timed out after {:?}", self.timeout))
            })??;
        debug!(raw_len = raw.len(), "received completion");
        Ok(raw)
    }
}

fn sentiment_prompt(text: &str) -> String {
    format!(
        "Analyze the sentiment of this journal entry.\n\
         Respond with ONLY one word: positive, negative, or neutral.\n\n\
         Journal entry:\n{}\n\nSentiment:",
        text
    )
}

fn themes_prompt(text: &str, top_k: usize) -> String {
    let vocabulary = Theme::ALL
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        r#"Analyze this journal entry and identify the top {top_k} themes.
Choose ONLY from these themes: {vocabulary}

For each theme, provide a confidence score between 0 and 1.

Respond in this EXACT JSON format:
[
  {{"theme": "theme_name", "confidence": 0.85}},
  {{"theme": "theme_name", "confidence": 0.72}}
]

Journal entry:
{text}

Themes (JSON only):"#
    )
}

/// "positive" is checked before "negative"; anything else, including an empty reply, is neutral.
fn parse_sentiment(raw: &str) -> Result<Sentiment, DomainError> {
    let answer = raw.trim().to_lowercase();
    if answer.contains("positive") {
        Ok(Sentiment::Positive)
    } else if answer.contains("negative") {
        Ok(Sentiment::Negative)
    } else {
        Ok(Sentiment::Neutral)
    }
}

/// Span from the first `[` to the last `]`, tolerating prose around the array.
fn extract_json_array(raw: &str) -> Option<&str> {
    let start = raw.find('[')?;
    let end = raw.rfind(']')?;
    (start < end).then(|| &raw[start..=end])
}

/// Keep in-vocabulary elements (first occurrence of each theme), up to `top_k`.
///
/// Elements missing either field or naming an unknown theme are dropped. An element
/// with a non-string theme or an unusable confidence fails the whole response, as
/// does an empty result, so the caller falls back as a whole.
fn parse_themes(raw: &str, top_k: usize) -> Result<Vec<ThemePrediction>, DomainError> {
    let json = extract_json_array(raw)
        .ok_or_else(|| DomainError::Model("no JSON array in theme response".to_string()))?;
    let items: Vec<Value> = serde_json::from_str(json)
        .map_err(|e| DomainError::Model(format!("failed to parse theme JSON: {}", e)))?;

    let mut predictions: Vec<ThemePrediction> = Vec::new();
    for item in &items {
        let (Some(theme), Some(confidence)) = (item.get("theme"), item.get("confidence")) else {
            continue;
        };
        let name = theme
            .as_str()
            .ok_or_else(|| DomainError::Model(format!("theme is not a string: {}", theme)))?;
        let confidence = coerce_confidence(confidence).ok_or_else(|| {
            DomainError::Model(format!("unusable confidence for {}: {}", name, confidence))
        })?;
        let Some(theme) = Theme::from_loose(name) else {
            continue;
        };
        if predictions.iter().any(|p| p.theme == theme) {
            continue;
        }
        predictions.push(ThemePrediction { theme, confidence });
    }
    predictions.truncate(top_k);

    if predictions.is_empty() {
        return Err(DomainError::Model(
            "theme response had no valid predictions".to_string(),
        ));
    }
    Ok(predictions)
}

/// Numbers or numeric strings, clamped to [0, 1]. Non-finite values are rejected.
fn coerce_confidence(value: &Value) -> Option<f64> {
    let raw = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    raw.is_finite().then_some(raw.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockCompletionAdapter;

    fn classifier(mock: MockCompletionAdapter) -> (GenerativeClassifier, Arc<MockCompletionAdapter>) {
        let mock = Arc::new(mock);
        let port: Arc<dyn CompletionPort> = Arc::clone(&mock) as Arc<dyn CompletionPort>;
        (
            GenerativeClassifier::new(port, Duration::from_secs(5)),
            mock,
        )
    }

    #[test]
    fn test_parse_sentiment() {
        assert_eq!(parse_sentiment(" Positive.\n").unwrap(), Sentiment::Positive);
        assert_eq!(parse_sentiment("NEGATIVE").unwrap(), Sentiment::Negative);
        assert_eq!(parse_sentiment("mixed feelings").unwrap(), Sentiment::Neutral);
        // positive wins when both appear
        assert_eq!(
            parse_sentiment("not negative, positive").unwrap(),
            Sentiment::Positive
        );
        assert_eq!(parse_sentiment("   ").unwrap(), Sentiment::Neutral);
    }

    #[test]
    fn test_extract_json_array_with_prose() {
        let raw = "Sure! Here you go:\n[{\"theme\": \"work\", \"confidence\": 0.8}]\nHope this helps.";
        assert_eq!(
            extract_json_array(raw),
            Some("[{\"theme\": \"work\", \"confidence\": 0.8}]")
        );
        assert_eq!(extract_json_array("no array"), None);
        assert_eq!(extract_json_array("] backwards ["), None);
    }

    #[test]
    fn test_parse_themes_filters_and_normalizes() {
        let raw = r#"[
            {"theme": "Personal Growth", "confidence": 0.9},
            {"theme": "stress", "confidence": 0.8},
            {"theme": "work"},
            {"theme": "health", "confidence": "0.55"},
            {"theme": "emotions", "confidence": 1.7}
        ]"#;
        let preds = parse_themes(raw, 3).unwrap();
        assert_eq!(preds.len(), 3);
        assert_eq!(preds[0].theme, Theme::PersonalGrowth);
        assert_eq!(preds[1].theme, Theme::Health);
        assert!((preds[1].confidence - 0.55).abs() < 1e-9);
        assert_eq!(preds[2].theme, Theme::Emotions);
        assert_eq!(preds[2].confidence, 1.0);
    }

    #[test]
    fn test_parse_themes_truncates_and_dedupes() {
        let raw = r#"[{"theme":"work","confidence":0.9},{"theme":"work","confidence":0.5},
                      {"theme":"health","confidence":0.4},{"theme":"art","confidence":0.3},
                      {"theme":"gratitude","confidence":0.2}]"#;
        let preds = parse_themes(raw, 2).unwrap();
        let themes: Vec<Theme> = preds.iter().map(|p| p.theme).collect();
        assert_eq!(themes, vec![Theme::Work, Theme::Health]);
    }

    #[test]
    fn test_parse_themes_uncoercible_confidence_fails_whole_response() {
        let raw = r#"[{"theme":"work","confidence":0.8},{"theme":"health","confidence":"high"}]"#;
        assert!(parse_themes(raw, 3).is_err());
        let raw = r#"[{"theme":"work","confidence":0.8},{"theme":"health","confidence":null}]"#;
        assert!(parse_themes(raw, 3).is_err());
    }

    #[test]
    fn test_parse_themes_non_string_theme_fails_whole_response() {
        let raw = r#"[{"theme":5,"confidence":0.9},{"theme":"health","confidence":0.4}]"#;
        assert!(parse_themes(raw, 3).is_err());
    }

    #[test]
    fn test_parse_themes_bad_element_past_top_k_still_fails() {
        let raw = r#"[{"theme":"work","confidence":0.8},{"theme":"health","confidence":"high"}]"#;
        assert!(parse_themes(raw, 1).is_err());
    }

    #[tokio::test]
    async fn test_generative_themes_bad_element_falls_back_to_keywords() {
        let text = "A difficult meeting at work";
        let (c, _) = classifier(MockCompletionAdapter::with_reply(
            r#"[{"theme":"creativity","confidence":0.8},{"theme":"health","confidence":"high"}]"#,
        ));
        let preds = c.classify_themes(text, 3).await;
        assert_eq!(preds, KeywordClassifier::new().classify_themes(text, 3));
    }

    #[tokio::test]
    async fn test_generative_empty_sentiment_reply_is_neutral() {
        let (c, _) = classifier(MockCompletionAdapter::with_reply(""));
        assert_eq!(
            c.classify_sentiment("I am so grateful and happy today").await,
            Sentiment::Neutral
        );
    }

    #[test]
    fn test_parse_themes_errors_when_nothing_valid() {
        assert!(parse_themes(r#"[{"theme": "stress", "confidence": 0.8}]"#, 3).is_err());
        assert!(parse_themes("[not json]", 3).is_err());
        assert!(parse_themes("[]", 3).is_err());
    }

    #[tokio::test]
    async fn test_generative_sentiment_uses_model() {
        let (c, mock) = classifier(MockCompletionAdapter::with_reply("negative"));
        assert_eq!(
            c.classify_sentiment("I am so grateful and happy today").await,
            Sentiment::Negative
        );
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_generative_sentiment_falls_back_on_error() {
        let (c, _) = classifier(MockCompletionAdapter::failing("connection refused"));
        assert_eq!(
            c.classify_sentiment("I am so grateful and happy today").await,
            Sentiment::Positive
        );
    }

    #[tokio::test]
    async fn test_generative_themes_use_model() {
        let (c, _) = classifier(MockCompletionAdapter::with_reply(
            r#"[{"theme": "creativity", "confidence": 0.77}]"#,
        ));
        let preds = c.classify_themes("anything", 3).await;
        assert_eq!(preds.len(), 1);
        assert_eq!(preds[0].theme, Theme::Creativity);
    }

    #[tokio::test]
    async fn test_generative_themes_fall_back_wholesale() {
        let text = "I am so grateful and happy today";
        let (c, _) = classifier(MockCompletionAdapter::with_reply("I cannot classify this."));
        let preds = c.classify_themes(text, 3).await;
        assert_eq!(preds, KeywordClassifier::new().classify_themes(text, 3));
    }

    #[tokio::test]
    async fn test_generative_timeout_falls_back() {
        let mock = Arc::new(
            MockCompletionAdapter::with_reply("negative").with_delay(Duration::from_millis(500)),
        );
        let port: Arc<dyn CompletionPort> = Arc::clone(&mock) as Arc<dyn CompletionPort>;
        let c = GenerativeClassifier::new(port, Duration::from_millis(20));
        assert_eq!(
            c.classify_sentiment("I am so grateful and happy today").await,
            Sentiment::Positive
        );
        assert_eq!(mock.calls(), 1);
    }
}

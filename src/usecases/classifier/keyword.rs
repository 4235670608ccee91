//! Deterministic keyword classifier. No I/O, same output for the same text.

use crate::domain::vocabulary::{NEGATIVE_WORDS, POSITIVE_WORDS, count_matches, theme_keywords};
use crate::domain::{Sentiment, Theme, ThemePrediction};

/// Prediction returned when no theme keyword matches.
pub const DEFAULT_PREDICTION: ThemePrediction = ThemePrediction {
    theme: Theme::DailyLife,
    confidence: 0.6,
};

/// Confidence cap for keyword scoring.
const MAX_KEYWORD_CONFIDENCE: f64 = 0.9;

#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Label by distinct positive vs negative keyword counts.
    pub fn classify_sentiment(&self, text: &str) -> Sentiment {
        let lower = text.to_lowercase();
        let positive = count_matches(&lower, POSITIVE_WORDS);
        let negative = count_matches(&lower, NEGATIVE_WORDS);
        sentiment_from_counts(positive, negative)
    }

    /// Rank themes by distinct keyword hits. Never empty.
    ///
    /// Ties keep vocabulary declaration order. `top_k` of zero is treated as one.
    pub fn classify_themes(&self, text: &str, top_k: usize) -> Vec<ThemePrediction> {
        let lower = text.to_lowercase();

        let mut scored: Vec<(Theme, usize)> = Theme::ALL
            .iter()
            .map(|&theme| (theme, count_matches(&lower, theme_keywords(theme))))
            .filter(|(_, score)| *score > 0)
            .collect();
        // sort_by is stable: equal scores stay in declaration order
        scored.sort_by(|a, b| b.1.cmp(&a.1));

        let predictions: Vec<ThemePrediction> = scored
            .into_iter()
            .take(top_k.max(1))
            .map(|(theme, score)| ThemePrediction {
                theme,
                confidence: keyword_confidence(score),
            })
            .collect();

        if predictions.is_empty() {
            vec![DEFAULT_PREDICTION]
        } else {
            predictions
        }
    }
}

/// A lead of one keyword or more picks a label; equal counts are neutral.
fn sentiment_from_counts(positive: usize, negative: usize) -> Sentiment {
    if positive > negative {
        Sentiment::Positive
    } else if negative > positive {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

fn keyword_confidence(score: usize) -> f64 {
    (0.5 + 0.1 * score as f64).min(MAX_KEYWORD_CONFIDENCE)
}

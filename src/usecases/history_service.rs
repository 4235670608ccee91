//! History service. Aggregates a user's journal history into a report.
//!
//! Classifies each entry once for themes and once for sentiment, then derives
//! theme statistics, sentiment trends, patterns and a recent timeline.

use crate::domain::{DomainError, Entry, Report, Theme, ThemePrediction, ThemeStat, TimelineEntry};
use crate::usecases::classifier::{Classifier, DEFAULT_TOP_K};
use crate::usecases::trends::{find_patterns, round_to, sentiment_trends, theme_trend};
use std::sync::Arc;
use tracing::{debug, info};

/// Number of theme statistics kept in the report.
const MAX_THEME_STATS: usize = 7;
/// Number of timeline records kept in the report.
const TIMELINE_LIMIT: usize = 10;
/// Themes per timeline record.
const TIMELINE_THEMES: usize = 2;

/// One sighting of a theme, in entry order.
#[derive(Debug, Clone)]
struct ThemeObservation {
    date: String,
    confidence: f64,
}

#[derive(Debug)]
struct ThemeAccumulator {
    theme: Theme,
    count: usize,
    confidence_sum: f64,
    observations: Vec<ThemeObservation>,
}

impl ThemeAccumulator {
    fn new(theme: Theme) -> Self {
        Self {
            theme,
            count: 0,
            confidence_sum: 0.0,
            observations: Vec::new(),
        }
    }

    fn observe(&mut self, date: &str, confidence: f64) {
        self.count += 1;
        self.confidence_sum += confidence;
        self.observations.push(ThemeObservation {
            date: date.to_string(),
            confidence,
        });
    }

    fn into_stat(self, total_entries: usize) -> ThemeStat {
        let confidences: Vec<f64> = self.observations.iter().map(|o| o.confidence).collect();
        debug!(
            theme = %self.theme,
            count = self.count,
            first_seen = self.observations.first().map(|o| o.date.as_str()).unwrap_or_default(),
            last_seen = self.observations.last().map(|o| o.date.as_str()).unwrap_or_default(),
            "theme summary"
        );
        ThemeStat {
            theme: self.theme,
            count: self.count,
            percentage: round_to(self.count as f64 / total_entries as f64 * 100.0, 1),
            avg_confidence: round_to(self.confidence_sum / self.count as f64, 3),
            trend: theme_trend(&confidences),
        }
    }
}

/// Service for history aggregation. Stateless across calls.
pub struct HistoryService {
    classifier: Arc<Classifier>,
    top_k: usize,
}

impl HistoryService {
    /// Create a new history service.
    ///
    /// # Arguments
    /// * `classifier` - Shared classifier (keyword or generative)
    pub fn new(classifier: Arc<Classifier>) -> Self {
        Self {
            classifier,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Themes requested per entry.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Analyze an ordered history.
    ///
    /// Entries with empty content are skipped and do not count toward
    /// `total_entries`. Fails with [`DomainError::NoEntries`] before any
    /// classification when `entries` is empty.
    pub async fn analyze_history(&self, entries: &[Entry]) -> Result<Report, DomainError> {
        if entries.is_empty() {
            return Err(DomainError::NoEntries);
        }

        info!(
            entries = entries.len(),
            mode = self.classifier.mode(),
            "analyzing history"
        );

        // first-observed order; at most twelve themes so linear lookup is fine
        let mut accumulators: Vec<ThemeAccumulator> = Vec::new();
        let mut sentiments = Vec::with_capacity(entries.len());
        let mut timeline: Vec<TimelineEntry> = Vec::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            if entry.content.is_empty() {
                debug!(entry_index = index, "skipping entry with empty content");
                continue;
            }

            let predictions = self
                .classifier
                .classify_themes(&entry.content, self.top_k)
                .await;
            let sentiment = self.classifier.classify_sentiment(&entry.content).await;

            for prediction in &predictions {
                accumulate(&mut accumulators, prediction, &entry.timestamp);
            }

            sentiments.push(sentiment);
            timeline.push(TimelineEntry {
                date: entry.timestamp.clone(),
                top_themes: predictions
                    .iter()
                    .take(TIMELINE_THEMES)
                    .map(|p| p.theme)
                    .collect(),
                sentiment,
            });
        }

        let total_entries = timeline.len();

        let mut themes: Vec<ThemeStat> = accumulators
            .into_iter()
            .map(|acc| acc.into_stat(total_entries))
            .collect();
        // stable: equal counts keep first-observed order
        themes.sort_by(|a, b| b.count.cmp(&a.count));
        themes.truncate(MAX_THEME_STATS);

        let sentiment_trends = sentiment_trends(&sentiments);
        let patterns = find_patterns(total_entries, &timeline);

        let keep_from = timeline.len().saturating_sub(TIMELINE_LIMIT);
        timeline.drain(..keep_from);

        info!(
            total_entries,
            skipped = entries.len() - total_entries,
            themes = themes.len(),
            patterns = patterns.len(),
            "history analysis complete"
        );

        Ok(Report {
            total_entries,
            themes,
            sentiment_trends,
            patterns,
            timeline,
        })
    }
}

fn accumulate(accumulators: &mut Vec<ThemeAccumulator>, prediction: &ThemePrediction, date: &str) {
    let index = match accumulators.iter().position(|a| a.theme == prediction.theme) {
        Some(i) => i,
        None => {
            accumulators.push(ThemeAccumulator::new(prediction.theme));
            accumulators.len() - 1
        }
    };
    accumulators[index].observe(date, prediction.confidence);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PatternKind, RecentTrend, Sentiment, Trend};

    fn service() -> HistoryService {
        HistoryService::new(Arc::new(Classifier::keyword()))
    }

    fn entry(content: &str, day: u32) -> Entry {
        Entry::new(content, format!("2026-01-{:02}", day))
    }

    #[tokio::test]
    async fn test_empty_history_is_rejected() {
        let err = service().analyze_history(&[]).await.unwrap_err();
        assert!(matches!(err, DomainError::NoEntries));
        assert_eq!(err.to_string(), "No entries provided");
    }

    #[tokio::test]
    async fn test_single_entry() {
        let report = service()
            .analyze_history(&[entry("I am so grateful and happy today", 1)])
            .await
            .unwrap();
        assert_eq!(report.total_entries, 1);
        assert_eq!(report.sentiment_trends.overall.positive, 1);
        assert_eq!(report.sentiment_trends.overall.positive_percentage, 100.0);
        let themes: Vec<Theme> = report.themes.iter().map(|t| t.theme).collect();
        assert_eq!(themes, vec![Theme::Gratitude, Theme::DailyLife, Theme::Emotions]);
        assert!(report.themes.iter().all(|t| t.percentage == 100.0 && t.trend == Trend::Stable));
        assert_eq!(report.timeline.len(), 1);
        assert_eq!(report.timeline[0].top_themes, vec![Theme::Gratitude, Theme::DailyLife]);
        assert_eq!(report.timeline[0].sentiment, Sentiment::Positive);
        assert_eq!(report.timeline[0].date, "2026-01-01");
    }

    #[tokio::test]
    async fn test_empty_content_is_skipped() {
        let entries = vec![
            entry("", 1),
            entry("Went to work for a project meeting", 2),
            entry("", 3),
            entry("Morning run and good sleep", 4),
            entry("", 5),
        ];
        let report = service().analyze_history(&entries).await.unwrap();
        assert_eq!(report.total_entries, 2);
        let dates: Vec<&str> = report.timeline.iter().map(|t| t.date.as_str()).collect();
        assert_eq!(dates, vec!["2026-01-02", "2026-01-04"]);
        // percentages use processed entries as denominator
        let work = report.themes.iter().find(|t| t.theme == Theme::Work).unwrap();
        assert_eq!(work.percentage, 50.0);
    }

    #[tokio::test]
    async fn test_theme_stats_sorted_and_capped() {
        let entries = vec![
            entry("grateful", 1),
            entry("learn", 2),
            entry("friend", 3),
            entry("job", 4),
            entry("sleep", 5),
            entry("music", 6),
            entry("morning", 7),
            entry("reflect", 8),
            entry("problem", 9),
            entry("success", 10),
            entry("job and career", 11),
            entry("job again", 12),
        ];
        let report = service().analyze_history(&entries).await.unwrap();
        assert_eq!(report.themes.len(), 7);
        assert_eq!(report.themes[0].theme, Theme::Work);
        assert_eq!(report.themes[0].count, 3);
        // ties keep first-observed order
        assert_eq!(report.themes[1].theme, Theme::Gratitude);
        assert_eq!(report.themes[2].theme, Theme::PersonalGrowth);
        // work confidences: 0.6, 0.7, 0.6 -> mean 0.633
        assert_eq!(report.themes[0].avg_confidence, 0.633);
        assert_eq!(report.themes[0].percentage, 25.0);
    }

    #[tokio::test]
    async fn test_timeline_keeps_last_ten() {
        let entries: Vec<Entry> = (1..=12).map(|d| entry("a good day at work", d)).collect();
        let report = service().analyze_history(&entries).await.unwrap();
        assert_eq!(report.total_entries, 12);
        assert_eq!(report.timeline.len(), 10);
        assert_eq!(report.timeline[0].date, "2026-01-03");
        assert_eq!(report.timeline[9].date, "2026-01-12");
    }

    #[tokio::test]
    async fn test_trend_from_confidence_growth() {
        let entries = vec![
            entry("work", 1),
            entry("work", 2),
            entry("work job career project", 3),
            entry("work job career project", 4),
        ];
        let report = service().analyze_history(&entries).await.unwrap();
        let work = report.themes.iter().find(|t| t.theme == Theme::Work).unwrap();
        // 0.6, 0.6 -> 0.9, 0.9
        assert_eq!(work.trend, Trend::Increasing);
    }

    #[tokio::test]
    async fn test_patterns_and_recent_trend() {
        let entries: Vec<Entry> = (1..=30)
            .map(|d| entry("I feel happy and grateful, a great day", d))
            .collect();
        let report = service().analyze_history(&entries).await.unwrap();
        let kinds: Vec<PatternKind> = report.patterns.iter().map(|p| p.kind).collect();
        assert_eq!(kinds, vec![PatternKind::Consistency, PatternKind::RecentFocus]);
        assert_eq!(report.sentiment_trends.recent_trend, RecentTrend::MostlyPositive);
    }
}

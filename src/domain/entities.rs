//! Domain entities. Pure value types for classification and history aggregation.
//!
//! Everything here is constructed fresh per call; nothing outlives one
//! classification or one aggregation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single journal entry. `timestamp` is an opaque token carried through to the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub content: String,
    pub timestamp: String,
}

impl Entry {
    pub fn new(content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// Closed theme vocabulary. Declaration order is the tie-break order for keyword scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Gratitude,
    PersonalGrowth,
    Relationships,
    Work,
    Health,
    Creativity,
    DailyLife,
    Reflection,
    Challenges,
    Achievements,
    Emotions,
    FuturePlanning,
}

impl Theme {
    /// All themes in declaration order.
    pub const ALL: [Theme; 12] = [
        Theme::Gratitude,
        Theme::PersonalGrowth,
        Theme::Relationships,
        Theme::Work,
        Theme::Health,
        Theme::Creativity,
        Theme::DailyLife,
        Theme::Reflection,
        Theme::Challenges,
        Theme::Achievements,
        Theme::Emotions,
        Theme::FuturePlanning,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Gratitude => "gratitude",
            Theme::PersonalGrowth => "personal_growth",
            Theme::Relationships => "relationships",
            Theme::Work => "work",
            Theme::Health => "health",
            Theme::Creativity => "creativity",
            Theme::DailyLife => "daily_life",
            Theme::Reflection => "reflection",
            Theme::Challenges => "challenges",
            Theme::Achievements => "achievements",
            Theme::Emotions => "emotions",
            Theme::FuturePlanning => "future_planning",
        }
    }

    /// Lenient parse for model output: lowercases and turns spaces into underscores
    /// before matching the vocabulary. Returns `None` for anything outside it.
    pub fn from_loose(raw: &str) -> Option<Theme> {
        let normalized = raw.to_lowercase().replace(' ', "_");
        normalized.parse().ok()
    }

    /// Human-readable label ("personal_growth" -> "Personal Growth").
    pub fn title(self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown theme: {}", s))
    }
}

/// One ranked theme with a confidence in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThemePrediction {
    pub theme: Theme,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying one entry (themes + sentiment).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryClassification {
    pub themes: Vec<ThemePrediction>,
    pub sentiment: Sentiment,
}

/// Direction of a theme's average confidence between the first and second half of its observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeStat {
    pub theme: Theme,
    pub count: usize,
    /// Share of processed entries containing the theme, 0..=100, one decimal.
    pub percentage: f64,
    /// Three decimals.
    pub avg_confidence: f64,
    pub trend: Trend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecentTrend {
    MostlyPositive,
    MostlyNegative,
    Mixed,
}

/// Label counts over the whole history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentOverall {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub positive_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentTrendSummary {
    pub overall: SentimentOverall,
    pub recent_trend: RecentTrend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Consistency,
    Diversity,
    RecentFocus,
}

/// Templated observation about writing behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    #[serde(rename = "type")]
    pub kind: PatternKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub date: String,
    /// At most two themes, in the entry's ranked order.
    pub top_themes: Vec<Theme>,
    pub sentiment: Sentiment,
}

/// Summary of one history aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub total_entries: usize,
    /// Top seven themes by count.
    pub themes: Vec<ThemeStat>,
    pub sentiment_trends: SentimentTrendSummary,
    pub patterns: Vec<Pattern>,
    /// Last ten processed entries.
    pub timeline: Vec<TimelineEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    PrimaryTheme,
    Trend,
    Sentiment,
    Recent,
    Consistency,
    Diversity,
    RecentFocus,
    Milestone,
}

impl From<PatternKind> for InsightKind {
    fn from(kind: PatternKind) -> Self {
        match kind {
            PatternKind::Consistency => InsightKind::Consistency,
            PatternKind::Diversity => InsightKind::Diversity,
            PatternKind::RecentFocus => InsightKind::RecentFocus,
        }
    }
}

/// Personalized, user-facing insight derived from a [`Report`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_from_loose_normalizes_case_and_spaces() {
        assert_eq!(Theme::from_loose("Personal Growth"), Some(Theme::PersonalGrowth));
        assert_eq!(Theme::from_loose("FUTURE_PLANNING"), Some(Theme::FuturePlanning));
        assert_eq!(Theme::from_loose("stress"), None);
        assert_eq!(Theme::from_loose(""), None);
        // surrounding whitespace is not stripped
        assert_eq!(Theme::from_loose(" work"), None);
    }

    #[test]
    fn theme_serializes_snake_case() {
        let json = serde_json::to_string(&Theme::DailyLife).unwrap();
        assert_eq!(json, "\"daily_life\"");
        let back: Theme = serde_json::from_str("\"personal_growth\"").unwrap();
        assert_eq!(back, Theme::PersonalGrowth);
    }

    #[test]
    fn theme_title() {
        assert_eq!(Theme::FuturePlanning.title(), "Future Planning");
        assert_eq!(Theme::Work.title(), "Work");
    }

    #[test]
    fn pattern_serializes_kind_as_type() {
        let p = Pattern {
            kind: PatternKind::RecentFocus,
            message: "m".to_string(),
        };
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["type"], "recent_focus");
    }
}

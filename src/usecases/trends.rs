//! Statistics over a classified history: theme trends, sentiment trends, writing patterns.
//!
//! Pure functions; the history service feeds them.

use crate::domain::{
    Pattern, PatternKind, RecentTrend, Sentiment, SentimentOverall, SentimentTrendSummary, Theme,
    TimelineEntry, Trend,
};
use std::collections::HashSet;

/// Themes with fewer observations are always stable.
const TREND_MIN_OBSERVATIONS: usize = 3;
const TREND_INCREASE_FACTOR: f64 = 1.2;
const TREND_DECREASE_FACTOR: f64 = 0.8;

/// Window for the recent sentiment trend.
const RECENT_SENTIMENT_WINDOW: usize = 10;
const RECENT_POSITIVE_MIN: usize = 6;
const RECENT_NEGATIVE_MAX: usize = 3;

const CONSISTENCY_MIN_ENTRIES: usize = 30;
const DIVERSITY_MIN_THEMES: usize = 5;
/// Timeline records considered for the recent focus pattern.
const RECENT_FOCUS_WINDOW: usize = 5;

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Compare mean confidence of the second half of observations to the first half.
///
/// Halves split at `len / 2`; the second half takes the odd element. A ratio of
/// exactly 1.2 or 0.8 is stable.
pub fn theme_trend(confidences: &[f64]) -> Trend {
    if confidences.len() < TREND_MIN_OBSERVATIONS {
        return Trend::Stable;
    }
    let (first, second) = confidences.split_at(confidences.len() / 2);
    let first_mean = mean(first);
    let second_mean = mean(second);

    if second_mean > first_mean * TREND_INCREASE_FACTOR {
        Trend::Increasing
    } else if second_mean < first_mean * TREND_DECREASE_FACTOR {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}

/// Label counts over the whole history plus the trend of the last ten labels.
///
/// Recent thresholds are absolute counts, also for windows shorter than ten.
pub fn sentiment_trends(sentiments: &[Sentiment]) -> SentimentTrendSummary {
    let count = |label: Sentiment, items: &[Sentiment]| items.iter().filter(|s| **s == label).count();

    let total = sentiments.len();
    let positive = count(Sentiment::Positive, sentiments);
    let negative = count(Sentiment::Negative, sentiments);
    let neutral = total - positive - negative;
    let positive_percentage = if total == 0 {
        0.0
    } else {
        round_to(positive as f64 / total as f64 * 100.0, 1)
    };

    let recent = &sentiments[total.saturating_sub(RECENT_SENTIMENT_WINDOW)..];
    let recent_positive = count(Sentiment::Positive, recent);
    let recent_trend = if recent_positive >= RECENT_POSITIVE_MIN {
        RecentTrend::MostlyPositive
    } else if recent_positive <= RECENT_NEGATIVE_MAX {
        RecentTrend::MostlyNegative
    } else {
        RecentTrend::Mixed
    };

    SentimentTrendSummary {
        overall: SentimentOverall {
            positive,
            negative,
            neutral,
            positive_percentage,
        },
        recent_trend,
    }
}

/// Consistency, diversity and recent focus, in that order, each only when triggered.
///
/// `timeline` is the full processed timeline, not the truncated one in the report.
pub fn find_patterns(total_entries: usize, timeline: &[TimelineEntry]) -> Vec<Pattern> {
    let mut patterns = Vec::new();

    if total_entries >= CONSISTENCY_MIN_ENTRIES {
        patterns.push(Pattern {
            kind: PatternKind::Consistency,
            message: format!(
                "You've written {} entries! You're building a strong journaling habit.",
                total_entries
            ),
        });
    }

    let distinct: HashSet<Theme> = timeline
        .iter()
        .flat_map(|item| item.top_themes.iter().copied())
        .collect();
    if distinct.len() >= DIVERSITY_MIN_THEMES {
        patterns.push(Pattern {
            kind: PatternKind::Diversity,
            message: format!(
                "You explore {} different themes in your writing.",
                distinct.len()
            ),
        });
    }

    let recent = &timeline[timeline.len().saturating_sub(RECENT_FOCUS_WINDOW)..];
    if let Some(theme) = most_frequent(recent.iter().flat_map(|item| item.top_themes.iter().copied())) {
        patterns.push(Pattern {
            kind: PatternKind::RecentFocus,
            message: format!("Recently, you've been focusing on {}.", theme),
        });
    }

    patterns
}

/// Most frequent theme; ties go to the one seen first.
fn most_frequent(themes: impl Iterator<Item = Theme>) -> Option<Theme> {
    let mut counts: Vec<(Theme, usize)> = Vec::new();
    for theme in themes {
        match counts.iter_mut().find(|(t, _)| *t == theme) {
            Some((_, n)) => *n += 1,
            None => counts.push((theme, 1)),
        }
    }
    let mut best: Option<(Theme, usize)> = None;
    for (theme, n) in counts {
        if best.is_none_or(|(_, best_n)| n > best_n) {
            best = Some((theme, n));
        }
    }
    best.map(|(theme, _)| theme)
}

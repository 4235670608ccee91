//! Personalized insights. Turns a report into short, user-facing observations.

use crate::domain::{Insight, InsightKind, PatternKind, RecentTrend, Report, Theme, Trend};

const POSITIVE_OUTLOOK_MIN: f64 = 60.0;
const CHALLENGING_OUTLOOK_MAX: f64 = 40.0;
const MILESTONE_ENTRIES: usize = 50;

fn theme_blurb(theme: Theme) -> &'static str {
    match theme {
        Theme::Gratitude => "Practicing gratitude is linked to increased happiness and wellbeing.",
        Theme::Relationships => "Reflecting on relationships helps strengthen your connections.",
        Theme::PersonalGrowth => "You're actively working on becoming your best self.",
        Theme::Work => "Reflecting on your professional life helps clarify your career goals.",
        Theme::Health => "Awareness of your health is the first step to positive changes.",
        Theme::DailyLife => "Finding meaning in everyday moments enriches your life.",
        _ => "This is an important area of your life.",
    }
}

fn pattern_title(kind: PatternKind) -> &'static str {
    match kind {
        PatternKind::Consistency => "📊 Writing Consistency",
        PatternKind::Diversity => "🎨 Theme Diversity",
        PatternKind::RecentFocus => "🔍 Current Focus",
    }
}

/// Build insights in display order: primary theme, trend, sentiment, recent
/// positivity, one per pattern, milestone.
pub fn personalize(report: &Report) -> Vec<Insight> {
    let mut insights = Vec::new();

    if let Some(top) = report.themes.first() {
        insights.push(Insight {
            kind: InsightKind::PrimaryTheme,
            title: format!("Your Main Focus: {}", top.theme.title()),
            description: format!(
                "{}% of your entries explore {}. {}",
                top.percentage,
                top.theme,
                theme_blurb(top.theme)
            ),
        });

        if top.trend == Trend::Increasing {
            insights.push(Insight {
                kind: InsightKind::Trend,
                title: "📈 Growing Interest".to_string(),
                description: format!(
                    "You're writing more about {} lately. This shows growing awareness in this area.",
                    top.theme
                ),
            });
        }
    }

    if report.total_entries > 0 {
        let positive_percentage = report.sentiment_trends.overall.positive_percentage;
        if positive_percentage >= POSITIVE_OUTLOOK_MIN {
            insights.push(Insight {
                kind: InsightKind::Sentiment,
                title: "😊 Positive Outlook".to_string(),
                description: format!(
                    "{}% of your entries reflect positive emotions. Keep nurturing this mindset!",
                    positive_percentage
                ),
            });
        } else if positive_percentage < CHALLENGING_OUTLOOK_MAX {
            insights.push(Insight {
                kind: InsightKind::Sentiment,
                title: "🤗 Processing Challenges".to_string(),
                description: "Your entries show you're working through some difficulties. \
                              Journaling is a great way to process emotions."
                    .to_string(),
            });
        }

        if report.sentiment_trends.recent_trend == RecentTrend::MostlyPositive {
            insights.push(Insight {
                kind: InsightKind::Recent,
                title: "✨ Recent Positivity".to_string(),
                description: "Your recent entries show an upward trend in positive emotions."
                    .to_string(),
            });
        }
    }

    for pattern in &report.patterns {
        insights.push(Insight {
            kind: pattern.kind.into(),
            title: pattern_title(pattern.kind).to_string(),
            description: pattern.message.clone(),
        });
    }

    if report.total_entries >= MILESTONE_ENTRIES {
        insights.push(Insight {
            kind: InsightKind::Milestone,
            title: "🎉 Milestone Achieved!".to_string(),
            description: format!(
                "You've written {} entries. That's incredible dedication to self-reflection!",
                report.total_entries
            ),
        });
    }

    insights
}

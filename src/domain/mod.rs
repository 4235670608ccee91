//! Core domain layer. No external I/O dependencies.
//!
//! Entities, fixed vocabularies and business errors live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod vocabulary;

pub use entities::{
    Entry, EntryClassification, Insight, InsightKind, Pattern, PatternKind, RecentTrend, Report,
    Sentiment, SentimentOverall, SentimentTrendSummary, Theme, ThemePrediction, ThemeStat,
    TimelineEntry, Trend,
};
pub use errors::DomainError;

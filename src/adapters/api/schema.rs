//! Request/response schemas for the history analysis contract.

use crate::domain::{Entry, Pattern, Report, SentimentTrendSummary, ThemeStat, TimelineEntry};
use serde::{Deserialize, Serialize};

/// `{"entries": [...]}`. A missing `entries` field reads as empty.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HistoryRequest {
    #[serde(default)]
    pub entries: Vec<EntryPayload>,
}

/// Both fields are required.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EntryPayload {
    pub content: String,
    pub created_at: String,
}

impl From<EntryPayload> for Entry {
    fn from(p: EntryPayload) -> Self {
        Entry {
            content: p.content,
            timestamp: p.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub themes: Vec<ThemeStat>,
    pub sentiment_trends: SentimentTrendSummary,
    pub patterns: Vec<Pattern>,
    pub timeline: Vec<TimelineEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessBody {
    pub success: bool,
    pub total_entries: usize,
    pub analysis: Analysis,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailureBody {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum HistoryResponse {
    Success(SuccessBody),
    Failure(FailureBody),
}

impl HistoryResponse {
    pub fn success(report: Report) -> Self {
        HistoryResponse::Success(SuccessBody {
            success: true,
            total_entries: report.total_entries,
            analysis: Analysis {
                themes: report.themes,
                sentiment_trends: report.sentiment_trends,
                patterns: report.patterns,
                timeline: report.timeline,
            },
        })
    }

    pub fn failure(message: impl Into<String>) -> Self {
        HistoryResponse::Failure(FailureBody {
            success: false,
            error: message.into(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, HistoryResponse::Success(_))
    }

    /// The report carried by a success response.
    pub fn report(&self) -> Option<Report> {
        match self {
            HistoryResponse::Success(body) => Some(Report {
                total_entries: body.total_entries,
                themes: body.analysis.themes.clone(),
                sentiment_trends: body.analysis.sentiment_trends.clone(),
                patterns: body.analysis.patterns.clone(),
                timeline: body.analysis.timeline.clone(),
            }),
            HistoryResponse::Failure(_) => None,
        }
    }
}

/// Outcome class, mapped to an HTTP-style status code by [`ApiStatus::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiStatus {
    Ok,
    BadRequest,
    InternalError,
}

impl ApiStatus {
    pub fn code(self) -> u16 {
        match self {
            ApiStatus::Ok => 200,
            ApiStatus::BadRequest => 400,
            ApiStatus::InternalError => 500,
        }
    }
}

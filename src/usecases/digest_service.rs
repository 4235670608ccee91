//! Digest service. Analyzes a history and writes a Markdown progress digest.
//!
//! Coordinates the history service (analysis), insights, and filesystem (reports).

use crate::domain::{DomainError, Entry, Insight, Report};
use crate::usecases::history_service::HistoryService;
use crate::usecases::insights::personalize;
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tracing::info;

/// Result of one digest run.
#[derive(Debug, Clone)]
pub struct Digest {
    pub report: Report,
    pub insights: Vec<Insight>,
    pub path: PathBuf,
}

pub struct DigestService {
    history: Arc<HistoryService>,
    reports_dir: PathBuf,
}

impl DigestService {
    /// # Arguments
    /// * `history` - History aggregation service
    /// * `reports_dir` - Directory to save generated digests
    pub fn new(history: Arc<HistoryService>, reports_dir: PathBuf) -> Self {
        Self {
            history,
            reports_dir,
        }
    }

    /// Analyze `entries`, derive insights and write the digest.
    pub async fn write_digest(&self, entries: &[Entry]) -> Result<Digest, DomainError> {
        let report = self.history.analyze_history(entries).await?;
        self.write_report(report).await
    }

    /// Derive insights for an existing report and write `journal_digest_<timestamp>.md`.
    pub async fn write_report(&self, report: Report) -> Result<Digest, DomainError> {
        let insights = personalize(&report);

        fs::create_dir_all(&self.reports_dir)
            .await
            .map_err(|e| DomainError::Io(format!("Failed to create reports dir: {}", e)))?;

        let generated_at = Utc::now();
        let filename = format!(
            "journal_digest_{}.md",
            generated_at.format("%Y%m%d_%H%M%S_%3f")
        );
        let path = self.reports_dir.join(filename);

        fs::write(&path, render_markdown(&report, &insights, generated_at))
            .await
            .map_err(|e| DomainError::Io(format!("Failed to write digest: {}", e)))?;

        info!(path = %path.display(), "digest generated");

        Ok(Digest {
            report,
            insights,
            path,
        })
    }
}

/// Render a report and its insights as Markdown.
pub fn render_markdown(report: &Report, insights: &[Insight], generated_at: DateTime<Utc>) -> String {
    let mut md = String::new();

    // Header
    md.push_str("# Journal Digest\n\n");
    let _ = writeln!(
        md,
        "**Entries analyzed:** {} | **Generated:** {}\n",
        report.total_entries,
        generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    md.push_str("---\n\n");

    // Themes
    if !report.themes.is_empty() {
        md.push_str("## 🔑 Themes\n\n");
        md.push_str("| Theme | Entries | Share | Avg. confidence | Trend |\n");
        md.push_str("|---|---|---|---|---|\n");
        for stat in &report.themes {
            let _ = writeln!(
                md,
                "| {} | {} | {}% | {} | {:?} |",
                stat.theme.title(),
                stat.count,
                stat.percentage,
                stat.avg_confidence,
                stat.trend
            );
        }
        md.push('\n');
    }

    // Sentiment
    let overall = &report.sentiment_trends.overall;
    md.push_str("## 💭 Sentiment\n\n");
    let _ = writeln!(
        md,
        "- Positive: {} ({}%)\n- Negative: {}\n- Neutral: {}\n- Recent trend: {:?}\n",
        overall.positive,
        overall.positive_percentage,
        overall.negative,
        overall.neutral,
        report.sentiment_trends.recent_trend
    );

    // Insights (patterns are folded in)
    if !insights.is_empty() {
        md.push_str("## ✨ Insights\n\n");
        for insight in insights {
            let _ = writeln!(md, "- **{}**: {}", insight.title, insight.description);
        }
        md.push('\n');
    }

    // Timeline
    if !report.timeline.is_empty() {
        md.push_str("## 📅 Recent Entries\n\n");
        for item in &report.timeline {
            let themes = item
                .top_themes
                .iter()
                .map(|t| t.title())
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(md, "- {}: {} ({})", item.date, themes, item.sentiment);
        }
        md.push('\n');
    }

    // Footer
    md.push_str("---\n");
    md.push_str("*Generated by journal-insights*\n");

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::classifier::Classifier;

    fn history() -> Arc<HistoryService> {
        Arc::new(HistoryService::new(Arc::new(Classifier::keyword())))
    }

    #[tokio::test]
    async fn test_write_digest() {
        let dir = tempfile::tempdir().unwrap();
        let service = DigestService::new(history(), dir.path().join("reports"));
        let entries = vec![
            Entry::new("I am so grateful and happy today", "2026-03-01"),
            Entry::new("Work was hard, a difficult project", "2026-03-02"),
        ];

        let digest = service.write_digest(&entries).await.unwrap();
        assert_eq!(digest.report.total_entries, 2);
        assert!(!digest.insights.is_empty());

        let md = tokio::fs::read_to_string(&digest.path).await.unwrap();
        assert!(md.starts_with("# Journal Digest"));
        assert!(md.contains("| Gratitude | 1 | 50% |"));
        assert!(md.contains("- 2026-03-02:"));
    }

    #[tokio::test]
    async fn test_write_digest_rejects_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let service = DigestService::new(history(), dir.path().to_path_buf());
        let err = service.write_digest(&[]).await.unwrap_err();
        assert!(matches!(err, DomainError::NoEntries));
    }
}

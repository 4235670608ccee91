//! Implements InputPort. Inquire-based interactive menu.
//!
//! Analyze a history file, classify a single entry, suggest writing prompts.

use crate::adapters::api::{HistoryEndpoint, health};
use crate::adapters::input::load_history_request;
use crate::adapters::ui::progress::spinner;
use crate::domain::DomainError;
use crate::ports::InputPort;
use crate::usecases::{DigestService, HistoryService, PromptService};
use async_trait::async_trait;
use inquire::error::InquireError;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};
use inquire::{Select, Text};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Applies the menu colors to every subsequent inquire prompt.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("✎").with_fg(Color::LightMagenta))
        .with_highlighted_option_prefix(Styled::new("➤").with_fg(Color::LightYellow))
        .with_selected_option(Some(
            StyleSheet::new()
                .with_fg(Color::LightYellow)
                .with_attr(Attributes::BOLD),
        ))
        .with_answer(StyleSheet::new().with_fg(Color::LightMagenta));
    inquire::set_global_render_config(config);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    AnalyzeHistory,
    ClassifyEntry,
    SuggestPrompt,
    Health,
    Exit,
}

impl MenuAction {
    const ALL: [MenuAction; 5] = [
        MenuAction::AnalyzeHistory,
        MenuAction::ClassifyEntry,
        MenuAction::SuggestPrompt,
        MenuAction::Health,
        MenuAction::Exit,
    ];
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuAction::AnalyzeHistory => "📚 Analyze a journal history (JSON or CSV)",
            MenuAction::ClassifyEntry => "🔎 Classify a single entry",
            MenuAction::SuggestPrompt => "💡 Suggest a writing prompt",
            MenuAction::Health => "🩺 Service health",
            MenuAction::Exit => "🚪 Exit",
        };
        f.write_str(label)
    }
}

/// Splits "gratitude, work" into trimmed, non-empty theme names.
fn parse_theme_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Cancel (Esc) and Ctrl-C end the session; other prompt failures are errors.
fn prompt_result<T>(result: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Internal(format!("Prompt failed: {}", e))),
    }
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    endpoint: Arc<HistoryEndpoint>,
    digests: Arc<DigestService>,
    history: Arc<HistoryService>,
    prompts: Arc<PromptService>,
}

impl TuiInputPort {
    pub fn new(
        endpoint: Arc<HistoryEndpoint>,
        digests: Arc<DigestService>,
        history: Arc<HistoryService>,
        prompts: Arc<PromptService>,
    ) -> Self {
        Self {
            endpoint,
            digests,
            history,
            prompts,
        }
    }

    async fn analyze_history(&self) -> Result<(), DomainError> {
        let Some(raw_path) = prompt_result(
            Text::new("Path to entries file:")
                .with_placeholder("./data/entries.json")
                .prompt(),
        )?
        else {
            return Ok(());
        };
        let path = PathBuf::from(raw_path.trim());

        let request = match load_history_request(&path).await {
            Ok(request) => request,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not load entries");
                println!("❌ {}", e);
                return Ok(());
            }
        };

        let pb = spinner(format!("Analyzing {} entries...", request.entries.len()));
        let (status, response) = self.endpoint.handle_request(request).await;
        pb.finish_and_clear();

        let body = serde_json::to_string_pretty(&response)
            .map_err(|e| DomainError::Internal(format!("Serialize response: {}", e)))?;
        println!("HTTP {}\n{}", status.code(), body);

        if let Some(report) = response.report() {
            match self.digests.write_report(report).await {
                Ok(digest) => {
                    println!("📝 Digest saved: {}", digest.path.display());
                    for insight in &digest.insights {
                        println!("  {} {}", insight.title, insight.description);
                    }
                }
                Err(e) => {
                    warn!(error = %e, "digest not written");
                    println!("⚠️ Digest not written: {}", e);
                }
            }
        }
        Ok(())
    }

    async fn classify_entry(&self) -> Result<(), DomainError> {
        let Some(text) = prompt_result(Text::new("Entry text:").prompt())? else {
            return Ok(());
        };
        if text.trim().is_empty() {
            println!("Nothing to classify.");
            return Ok(());
        }

        let classification = self
            .history
            .classifier()
            .classify_entry(&text, self.history.top_k())
            .await;
        let body = serde_json::to_string_pretty(&classification)
            .map_err(|e| DomainError::Internal(format!("Serialize classification: {}", e)))?;
        println!("{}", body);
        Ok(())
    }

    fn suggest_prompt(&self) -> Result<(), DomainError> {
        let help = format!("Known: {}", self.prompts.themes().join(", "));
        let Some(input) = prompt_result(
            Text::new("Themes (comma-separated):")
                .with_help_message(&help)
                .prompt(),
        )?
        else {
            return Ok(());
        };

        let themes = parse_theme_list(&input);
        if themes.is_empty() {
            println!("💡 {}", self.prompts.prompt_for_theme(""));
            return Ok(());
        }
        for suggestion in self.prompts.suggest(&themes) {
            println!("💡 [{}] {}", suggestion.theme, suggestion.prompt);
        }
        Ok(())
    }

    fn show_health(&self) {
        println!("{}", health());
        println!(
            "classifier: {} | top_k: {}",
            self.history.classifier().mode(),
            self.history.top_k()
        );
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        info!(mode = self.history.classifier().mode(), "interactive session started");
        loop {
            let Some(action) =
                prompt_result(Select::new("What would you like to do?", MenuAction::ALL.to_vec()).prompt())?
            else {
                break;
            };

            match action {
                MenuAction::AnalyzeHistory => self.analyze_history().await?,
                MenuAction::ClassifyEntry => self.classify_entry().await?,
                MenuAction::SuggestPrompt => self.suggest_prompt()?,
                MenuAction::Health => self.show_health(),
                MenuAction::Exit => break,
            }
        }
        info!("interactive session ended");
        Ok(())
    }
}

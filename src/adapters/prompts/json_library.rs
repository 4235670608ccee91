//! Implements PromptStorePort using a JSON file.
//!
//! File layout: `{"theme": ["prompt", ...], ...}`. A missing or unreadable file
//! falls back to the built-in library.

use crate::ports::PromptStorePort;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::fs;
use tracing::{info, warn};

/// Theme used when the requested one is absent.
pub const DEFAULT_THEME: &str = "daily_life";
/// Last resort when even the default theme has no prompts.
pub const FALLBACK_PROMPT: &str = "What's on your mind today?";

const DEFAULT_PROMPTS: &[(&str, &[&str])] = &[
    (
        "gratitude",
        &[
            "Describe someone in your life who you really appreciate but forget to thank.",
            "What's something small that happened today that you're grateful for?",
            "Write about a moment when someone's kindness surprised you.",
        ],
    ),
    (
        "relationships",
        &[
            "Write about a time someone made something special for you.",
            "Describe a conversation that changed your perspective.",
            "Who in your life makes you feel most understood?",
        ],
    ),
    (
        "personal_growth",
        &[
            "What's a challenge you overcame recently? How did it change you?",
            "Describe a skill you'd like to develop and why it matters to you.",
            "What's one thing you learned about yourself this week?",
        ],
    ),
    (
        "stress",
        &[
            "What's been weighing on your mind lately? Write it all out.",
            "Describe a moment when you felt overwhelmed. What helped?",
            "What would make tomorrow easier for you?",
        ],
    ),
    (
        "work",
        &[
            "What's something you accomplished at work that you're proud of?",
            "Describe a work challenge and how you approached it.",
            "What energizes you most about your current projects?",
        ],
    ),
    (
        "health",
        &[
            "How has your body felt today? What is it telling you?",
            "Describe your ideal self-care routine.",
            "What's one healthy habit you'd like to build?",
        ],
    ),
    (
        "daily_life",
        &[
            "What made you smile today?",
            "Describe your perfect day from start to finish.",
            "What's something mundane that you actually enjoy?",
        ],
    ),
];

/// In-memory prompt library. Selection rotates through each theme's prompts independently.
pub struct JsonPromptLibrary {
    prompts: HashMap<String, Vec<String>>,
    /// One rotation cursor per theme key.
    cursors: HashMap<String, AtomicUsize>,
}

impl JsonPromptLibrary {
    pub fn from_map(prompts: HashMap<String, Vec<String>>) -> Self {
        let cursors = prompts
            .keys()
            .map(|theme| (theme.clone(), AtomicUsize::new(0)))
            .collect();
        Self { prompts, cursors }
    }

    /// Built-in library.
    pub fn with_defaults() -> Self {
        let prompts = DEFAULT_PROMPTS
            .iter()
            .map(|(theme, list)| {
                (
                    theme.to_string(),
                    list.iter().map(|p| p.to_string()).collect(),
                )
            })
            .collect();
        Self::from_map(prompts)
    }

    /// Load from `path`; defaults when the file is missing or not valid JSON.
    pub async fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path).await {
            Ok(s) => match serde_json::from_str::<HashMap<String, Vec<String>>>(&s) {
                Ok(prompts) => {
                    info!(path = %path.display(), themes = prompts.len(), "loaded prompt library");
                    Self::from_map(prompts)
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "invalid prompt library, using defaults");
                    Self::with_defaults()
                }
            },
            Err(_) => {
                info!(path = %path.display(), "no prompt library file, using defaults");
                Self::with_defaults()
            }
        }
    }

    fn non_empty<'a>(&'a self, theme: &'a str) -> Option<(&'a str, &'a Vec<String>)> {
        self.prompts
            .get(theme)
            .filter(|list| !list.is_empty())
            .map(|list| (theme, list))
    }
}

impl PromptStorePort for JsonPromptLibrary {
    fn prompt_for_theme(&self, theme: &str) -> String {
        match self.non_empty(theme).or_else(|| self.non_empty(DEFAULT_THEME)) {
            Some((key, list)) => {
                let turn = self
                    .cursors
                    .get(key)
                    .map_or(0, |cursor| cursor.fetch_add(1, Ordering::Relaxed));
                list[turn % list.len()].clone()
            }
            None => FALLBACK_PROMPT.to_string(),
        }
    }

    fn themes(&self) -> Vec<String> {
        let mut themes: Vec<String> = self.prompts.keys().cloned().collect();
        themes.sort();
        themes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library(pairs: &[(&str, &[&str])]) -> JsonPromptLibrary {
        JsonPromptLibrary::from_map(
            pairs
                .iter()
                .map(|(t, l)| (t.to_string(), l.iter().map(|p| p.to_string()).collect()))
                .collect(),
        )
    }

    #[test]
    fn test_prompt_for_known_theme() {
        let lib = JsonPromptLibrary::with_defaults();
        let prompt = lib.prompt_for_theme("work");
        let work: Vec<&str> = DEFAULT_PROMPTS
            .iter()
            .find(|(t, _)| *t == "work")
            .map(|(_, l)| l.to_vec())
            .unwrap();
        assert!(work.contains(&prompt.as_str()));
    }

    #[test]
    fn test_unknown_theme_falls_back_to_default_theme() {
        let lib = library(&[("daily_life", &["What made you smile today?"])]);
        assert_eq!(lib.prompt_for_theme("creativity"), "What made you smile today?");
    }

    #[test]
    fn test_no_default_theme_uses_fallback_prompt() {
        let lib = library(&[("work", &["w"]), ("daily_life", &[])]);
        assert_eq!(lib.prompt_for_theme("health"), FALLBACK_PROMPT);
    }

    #[test]
    fn test_rotation() {
        let lib = library(&[("work", &["a", "b"])]);
        assert_eq!(lib.prompt_for_theme("work"), "a");
        assert_eq!(lib.prompt_for_theme("work"), "b");
        assert_eq!(lib.prompt_for_theme("work"), "a");
    }

    #[test]
    fn test_rotation_is_per_theme() {
        let lib = library(&[("work", &["w1", "w2"]), ("health", &["h1", "h2"])]);
        assert_eq!(lib.prompt_for_theme("work"), "w1");
        assert_eq!(lib.prompt_for_theme("health"), "h1");
        assert_eq!(lib.prompt_for_theme("work"), "w2");
        assert_eq!(lib.prompt_for_theme("health"), "h2");
    }

    #[test]
    fn test_themes_sorted() {
        let lib = JsonPromptLibrary::with_defaults();
        let themes = lib.themes();
        assert_eq!(themes.len(), 7);
        assert_eq!(themes[0], "daily_life");
    }

    #[tokio::test]
    async fn test_load_file_and_fallbacks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompts.json");
        tokio::fs::write(&path, r#"{"creativity": ["Draw something."]}"#)
            .await
            .unwrap();
        let lib = JsonPromptLibrary::load(&path).await;
        assert_eq!(lib.themes(), vec!["creativity".to_string()]);
        assert_eq!(lib.prompt_for_theme("creativity"), "Draw something.");

        let missing = JsonPromptLibrary::load(dir.path().join("missing.json")).await;
        assert_eq!(missing.themes().len(), 7);

        let bad = dir.path().join("bad.json");
        tokio::fs::write(&bad, "not json").await.unwrap();
        assert_eq!(JsonPromptLibrary::load(&bad).await.themes().len(), 7);
    }
}

//! Writing prompt suggestions for a user's recent themes.

use crate::ports::PromptStorePort;
use serde::Serialize;
use std::sync::Arc;

/// Only the first themes get a suggestion.
const MAX_SUGGESTIONS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptSuggestion {
    pub theme: String,
    pub prompt: String,
}

pub struct PromptService {
    store: Arc<dyn PromptStorePort>,
}

impl PromptService {
    pub fn new(store: Arc<dyn PromptStorePort>) -> Self {
        Self { store }
    }

    /// One prompt for a single theme (store falls back to the default theme).
    pub fn prompt_for_theme(&self, theme: &str) -> String {
        self.store.prompt_for_theme(theme)
    }

    /// One suggestion for each of the first two themes.
    pub fn suggest<S: AsRef<str>>(&self, themes: &[S]) -> Vec<PromptSuggestion> {
        themes
            .iter()
            .take(MAX_SUGGESTIONS)
            .map(|theme| PromptSuggestion {
                theme: theme.as_ref().to_string(),
                prompt: self.store.prompt_for_theme(theme.as_ref()),
            })
            .collect()
    }

    pub fn themes(&self) -> Vec<String> {
        self.store.themes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::prompts::JsonPromptLibrary;

    #[test]
    fn test_suggest_takes_first_two_themes() {
        let service = PromptService::new(Arc::new(JsonPromptLibrary::with_defaults()));
        let out = service.suggest(&["work", "health", "gratitude"]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].theme, "work");
        assert_eq!(out[1].theme, "health");
        assert!(!out[0].prompt.is_empty());
    }

    #[test]
    fn test_suggest_empty() {
        let service = PromptService::new(Arc::new(JsonPromptLibrary::with_defaults()));
        let none: [&str; 0] = [];
        assert!(service.suggest(&none).is_empty());
    }
}

//! Application configuration. Classifier mode, model backend, paths.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
/// Number of themes requested per entry unless configured otherwise.
pub const DEFAULT_TOP_K: usize = 3;
/// Default bound on one completion call, in seconds.
pub const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MODEL_NAME: &str = "llama3.2";
pub const DEFAULT_PROMPT_LIBRARY_PATH: &str = "./data/prompts.json";
pub const DEFAULT_REPORTS_DIR: &str = "./reports";

/// Which completion adapter backs generative mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelBackend {
    #[default]
    Ollama,
    OpenAi,
    Mock,
}

impl ModelBackend {
    /// Lenient parse; "openai", "OpenAI" and "open_ai" are all accepted.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().replace('_', "").as_str() {
            "ollama" => Some(ModelBackend::Ollama),
            "openai" => Some(ModelBackend::OpenAi),
            "mock" => Some(ModelBackend::Mock),
            _ => None,
        }
    }

    pub fn default_url(self) -> &'static str {
        match self {
            ModelBackend::OpenAi => DEFAULT_OPENAI_URL,
            ModelBackend::Ollama | ModelBackend::Mock => DEFAULT_OLLAMA_URL,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Generative mode when true, keyword mode otherwise. Read from JOURNAL_USE_MODEL.
    #[serde(default)]
    pub use_model: Option<bool>,

    // ─────────────────────────────────────────────────────────────────────────
    // Generative Model Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// "ollama", "openai" or "mock". Read from JOURNAL_MODEL_BACKEND.
    #[serde(default)]
    pub model_backend: Option<String>,

    /// Model name. Defaults to "llama3.2". Read from JOURNAL_MODEL_NAME.
    #[serde(default)]
    pub model_name: Option<String>,

    /// Server URL. Defaults per backend. Read from JOURNAL_MODEL_URL.
    #[serde(default)]
    pub model_url: Option<String>,

    /// API key for OpenAI-compatible servers. Read from JOURNAL_MODEL_API_KEY.
    #[serde(default)]
    pub model_api_key: Option<String>,

    /// Bound on each completion call in seconds. Read from JOURNAL_MODEL_TIMEOUT_SECS.
    #[serde(default)]
    pub model_timeout_secs: Option<u64>,

    // ─────────────────────────────────────────────────────────────────────────
    // Analysis and Output
    // ─────────────────────────────────────────────────────────────────────────
    /// Themes kept per entry. Read from JOURNAL_TOP_K.
    #[serde(default)]
    pub top_k: Option<usize>,

    /// Prompt library JSON. Read from JOURNAL_PROMPT_LIBRARY_PATH or PROMPT_LIBRARY_PATH.
    #[serde(default)]
    pub prompt_library_path: Option<String>,

    /// Digest output directory. Read from JOURNAL_REPORTS_DIR.
    #[serde(default)]
    pub reports_dir: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("JOURNAL"));
        if let Ok(path) = std::env::var("JOURNAL_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // PROMPT_LIBRARY_PATH is read directly (no JOURNAL_ prefix) when the prefixed form is absent
        if cfg.prompt_library_path.is_none() {
            if let Ok(path) = std::env::var("PROMPT_LIBRARY_PATH") {
                cfg.prompt_library_path = Some(path);
            }
        }
        Ok(cfg)
    }

    /// Returns true when generative mode is requested. Defaults to false.
    pub fn use_model_or_default(&self) -> bool {
        self.use_model.unwrap_or(false)
    }

    /// Returns the configured backend. Unknown names fall back to Ollama.
    pub fn model_backend_or_default(&self) -> ModelBackend {
        self.model_backend
            .as_deref()
            .and_then(ModelBackend::parse)
            .unwrap_or_default()
    }

    /// Returns the model name. Defaults to "llama3.2".
    pub fn model_name_or_default(&self) -> String {
        self.model_name
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string())
    }

    /// Returns the model server URL, defaulting per backend.
    pub fn model_url_or_default(&self) -> String {
        self.model_url
            .clone()
            .unwrap_or_else(|| self.model_backend_or_default().default_url().to_string())
    }

    /// Returns the API key, empty when unset (local servers).
    pub fn model_api_key_or_default(&self) -> String {
        self.model_api_key.clone().unwrap_or_default()
    }

    /// Returns the completion timeout. Defaults to 30 seconds; zero is treated as unset.
    pub fn model_timeout_or_default(&self) -> Duration {
        let secs = self
            .model_timeout_secs
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_MODEL_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    /// Returns themes kept per entry. Defaults to 3; never below 1.
    pub fn top_k_or_default(&self) -> usize {
        self.top_k.unwrap_or(DEFAULT_TOP_K).max(1)
    }

    /// Returns the prompt library path. Defaults to "./data/prompts.json".
    pub fn prompt_library_path_or_default(&self) -> PathBuf {
        PathBuf::from(
            self.prompt_library_path
                .as_deref()
                .unwrap_or(DEFAULT_PROMPT_LIBRARY_PATH),
        )
    }

    /// Returns the digest directory. Defaults to "./reports".
    pub fn reports_dir_or_default(&self) -> PathBuf {
        PathBuf::from(self.reports_dir.as_deref().unwrap_or(DEFAULT_REPORTS_DIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert!(!cfg.use_model_or_default());
        assert_eq!(cfg.model_backend_or_default(), ModelBackend::Ollama);
        assert_eq!(cfg.model_name_or_default(), "llama3.2");
        assert_eq!(cfg.model_url_or_default(), DEFAULT_OLLAMA_URL);
        assert_eq!(cfg.model_timeout_or_default(), Duration::from_secs(30));
        assert_eq!(cfg.top_k_or_default(), 3);
        assert_eq!(
            cfg.prompt_library_path_or_default(),
            PathBuf::from("./data/prompts.json")
        );
        assert_eq!(cfg.reports_dir_or_default(), PathBuf::from("./reports"));
    }

    #[test]
    fn test_openai_backend_url() {
        let cfg = AppConfig {
            model_backend: Some("OpenAI".to_string()),
            ..Default::default()
        };
        assert_eq!(cfg.model_backend_or_default(), ModelBackend::OpenAi);
        assert_eq!(cfg.model_url_or_default(), DEFAULT_OPENAI_URL);
    }

    #[test]
    fn test_unknown_backend_and_zero_values() {
        let cfg = AppConfig {
            model_backend: Some("llamafile".to_string()),
            model_timeout_secs: Some(0),
            top_k: Some(0),
            ..Default::default()
        };
        assert_eq!(cfg.model_backend_or_default(), ModelBackend::Ollama);
        assert_eq!(cfg.model_timeout_or_default(), Duration::from_secs(30));
        assert_eq!(cfg.top_k_or_default(), 1);
    }
}

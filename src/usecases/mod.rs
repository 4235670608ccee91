//! Application use cases. Orchestrate domain logic via ports.

pub mod classifier;
pub mod digest_service;
pub mod history_service;
pub mod insights;
pub mod prompt_service;
pub mod trends;

pub use classifier::{Classifier, DEFAULT_TOP_K, GenerativeClassifier, KeywordClassifier};
pub use digest_service::{Digest, DigestService};
pub use history_service::HistoryService;
pub use prompt_service::{PromptService, PromptSuggestion};

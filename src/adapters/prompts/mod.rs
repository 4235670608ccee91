//! Prompt template store. Implements PromptStorePort.

pub mod json_library;

pub use json_library::{DEFAULT_THEME, FALLBACK_PROMPT, JsonPromptLibrary};

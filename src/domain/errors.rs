//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Aggregation was asked to analyze an empty history.
    #[error("No entries provided")]
    NoEntries,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Generative model call failed (transport, status, timeout or unparsable output).
    #[error("Model completion failed: {0}")]
    Model(String),

    #[error("Prompt library error: {0}")]
    Prompt(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// True for errors caused by the caller's input rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, DomainError::NoEntries | DomainError::InvalidRequest(_))
    }
}

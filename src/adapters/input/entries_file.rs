//! Entry files. Uses the `csv` crate for `;`-delimited exports, serde_json otherwise.
//!
//! CSV layout: header `created_at;content`, one entry per row.

use crate::adapters::api::{EntryPayload, HistoryRequest};
use crate::domain::DomainError;
use std::path::Path;

/// Parse CSV text into a request. Quoted fields may contain `;` and newlines.
pub fn request_from_csv(text: &str) -> Result<HistoryRequest, DomainError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .from_reader(text.as_bytes());

    let entries = rdr
        .deserialize::<EntryPayload>()
        .collect::<Result<Vec<_>, csv::Error>>()
        .map_err(|e| DomainError::InvalidRequest(format!("invalid CSV entries: {}", e)))?;

    Ok(HistoryRequest { entries })
}

/// Parse a JSON request body (`{"entries": [...]}`).
pub fn request_from_json(text: &str) -> Result<HistoryRequest, DomainError> {
    serde_json::from_str(text)
        .map_err(|e| DomainError::InvalidRequest(format!("invalid JSON request: {}", e)))
}

/// Load a history request from disk. `.csv` files use the CSV layout; anything else is JSON.
pub async fn load_history_request(path: &Path) -> Result<HistoryRequest, DomainError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| DomainError::Io(format!("read {}: {}", path.display(), e)))?;

    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        request_from_csv(&text)
    } else {
        request_from_json(&text)
    }
}

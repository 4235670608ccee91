//! History endpoint. Validates a request body, runs the aggregation, maps errors to statuses.
//!
//! Transport-agnostic: an HTTP server or the CLI hands it a JSON body.

use super::schema::{ApiStatus, HistoryRequest, HistoryResponse};
use crate::domain::{DomainError, Entry};
use crate::usecases::HistoryService;
use std::sync::Arc;
use tracing::warn;

pub struct HistoryEndpoint {
    history: Arc<HistoryService>,
}

impl HistoryEndpoint {
    pub fn new(history: Arc<HistoryService>) -> Self {
        Self { history }
    }

    /// Parse `body` as a [`HistoryRequest`] and handle it. Malformed bodies are client errors.
    pub async fn handle(&self, body: &str) -> (ApiStatus, HistoryResponse) {
        match serde_json::from_str::<HistoryRequest>(body) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => respond_error(DomainError::InvalidRequest(e.to_string())),
        }
    }

    pub async fn handle_request(&self, request: HistoryRequest) -> (ApiStatus, HistoryResponse) {
        let entries: Vec<Entry> = request.entries.into_iter().map(Entry::from).collect();
        match self.history.analyze_history(&entries).await {
            Ok(report) => (ApiStatus::Ok, HistoryResponse::success(report)),
            Err(e) => respond_error(e),
        }
    }
}

fn respond_error(e: DomainError) -> (ApiStatus, HistoryResponse) {
    let status = if e.is_client_error() {
        ApiStatus::BadRequest
    } else {
        ApiStatus::InternalError
    };
    warn!(status = status.code(), error = %e, "history request failed");
    (status, HistoryResponse::failure(e.to_string()))
}

/// Liveness payload.
pub fn health() -> serde_json::Value {
    serde_json::json!({ "status": "ok" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::Classifier;

    fn endpoint() -> HistoryEndpoint {
        HistoryEndpoint::new(Arc::new(HistoryService::new(Arc::new(Classifier::keyword()))))
    }

    #[tokio::test]
    async fn test_success_response() {
        let body = r#"{"entries":[
            {"content":"I am so grateful and happy today","created_at":"2026-02-01T08:00:00Z"},
            {"content":"","created_at":"2026-02-02T08:00:00Z"}
        ]}"#;
        let (status, response) = endpoint().handle(body).await;
        assert_eq!(status, ApiStatus::Ok);
        let v = serde_json::to_value(&response).unwrap();
        assert_eq!(v["success"], true);
        assert_eq!(v["total_entries"], 1);
        assert_eq!(v["analysis"]["themes"][0]["theme"], "gratitude");
        assert_eq!(v["analysis"]["sentiment_trends"]["overall"]["positive"], 1);
        assert_eq!(v["analysis"]["timeline"][0]["date"], "2026-02-01T08:00:00Z");
    }

    #[tokio::test]
    async fn test_empty_entries_is_bad_request() {
        let (status, response) = endpoint().handle(r#"{"entries":[]}"#).await;
        assert_eq!(status.code(), 400);
        let v = serde_json::to_value(&response).unwrap();
        assert_eq!(v["error"], "No entries provided");
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let (status, response) = endpoint().handle("not json").await;
        assert_eq!(status, ApiStatus::BadRequest);
        assert!(!response.is_success());
    }

    #[test]
    fn test_health() {
        assert_eq!(health()["status"], "ok");
    }
}

//! Request/response boundary for history analysis. Typed schemas plus a handler.

pub mod endpoint;
pub mod schema;

pub use endpoint::{HistoryEndpoint, health};
pub use schema::{ApiStatus, EntryPayload, HistoryRequest, HistoryResponse};

//! Input adapters. Load journal histories from files.

pub mod entries_file;

pub use entries_file::{load_history_request, request_from_csv, request_from_json};

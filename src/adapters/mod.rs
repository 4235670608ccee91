//! Infrastructure adapters. Implement outbound ports.
//!
//! Completion backends, request/response contract, entry files, prompt library, terminal UI.
//! Map errors to DomainError.

pub mod ai;
pub mod api;
pub mod input;
pub mod prompts;
pub mod ui;

//! journal-insights: theme/sentiment classification and history analysis for journal entries, with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;

//! Error types for rewind-search

use rewind_core::ContinuationError;
use thiserror::Error;

use crate::path::ChoicePath;

/// Main error type for search operations
#[derive(Debug, Error)]
pub enum SearchError {
    /// The suspend/resume engine failed underneath a run.
    #[error(transparent)]
    Continuation(#[from] ContinuationError),

    /// A run completed without failing or producing a result.
    #[error("Run with path {path} ended without an outcome")]
    NoOutcome { path: ChoicePath },

    /// A replayed index was out of range at a choice point.
    #[error(
        "Stale path {path}: index {index} at choice point {position} exceeds {count} alternatives"
    )]
    StalePath {
        path: ChoicePath,
        position: usize,
        index: usize,
        count: usize,
    },

    /// Replaying the same path produced a different outcome.
    #[error("Search body is not deterministic: replaying {path} changed its outcome")]
    NonDeterministicBody { path: ChoicePath },
}

/// Result type alias for search operations
pub type Result<T> = std::result::Result<T, SearchError>;

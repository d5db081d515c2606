//! Error types for rewind-core

use thiserror::Error;

use crate::scope::ScopeId;

/// Main error type for continuation operations
#[derive(Debug, Error)]
pub enum ContinuationError {
    /// A suspend call was made without a live computation for the scope,
    /// or from a thread of control that does not belong to it.
    #[error("Invalid use of {scope}: {reason}")]
    InvalidScopeUse { scope: ScopeId, reason: &'static str },

    /// The scope is already paired with another computation.
    #[error("{scope} is already bound to a computation")]
    ScopeAlreadyBound { scope: ScopeId },

    /// The host could not start an execution context.
    #[error("Failed to spawn computation thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// The execution context backing the computation vanished.
    #[error("Computation for {scope} disconnected")]
    Disconnected { scope: ScopeId },
}

/// Result type alias for continuation operations
pub type Result<T> = std::result::Result<T, ContinuationError>;

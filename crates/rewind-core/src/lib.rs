//! Rewind Core - one-shot delimited continuations
//!
//! This crate provides the suspend/resume engine the search layer is built on:
//! - [`Scope`] tokens pairing a computation with its suspend calls
//! - [`Continuation`] computations with a single-slot yielded value
//! - [`Generator`] pull-based sequences over a computation
//!
//! Each computation runs on its own stackful execution context, so a body can
//! suspend from any call depth and later resume with its locals intact.

pub mod continuation;
pub mod error;
pub mod generator;
mod host;
pub mod scope;

pub use continuation::{Continuation, ContinuationState};
pub use error::{ContinuationError, Result};
pub use generator::Generator;
pub use scope::{Scope, ScopeId};

pub use rewind_config::ContinuationConfig;

//! Rewind - one-shot continuations and replay-based nondeterministic search
//!
//! Write a search as straight-line code: pick among alternatives with
//! `choose`, reject dead ends with `require`, and let the engine replay the
//! body over every combination of choices.
//!
//! # Example
//!
//! ```rust
//! use rewind::prelude::*;
//!
//! let pairs = run_all(|ctx| {
//!     let x = ctx.choose(&[1, 2, 3]);
//!     let y = ctx.choose(&[4, 5, 6]);
//!     ctx.require(x + y == 7);
//!     vec![x, y]
//! });
//!
//! assert_eq!(pairs, vec![vec![1, 6], vec![2, 5], vec![3, 4]]);
//! ```
//!
//! The continuation engine the search is built on is available on its own:
//!
//! ```rust
//! use rewind::Generator;
//!
//! let fib = Generator::from_fn(|scope| {
//!     let (mut a, mut b) = (0u64, 1u64);
//!     loop {
//!         scope.suspend_with(a);
//!         (a, b) = (b, a + b);
//!     }
//! });
//!
//! assert_eq!(fib.take(7).collect::<Vec<_>>(), vec![0, 1, 1, 2, 3, 5, 8]);
//! ```

// Continuations
pub use rewind_core::{
    Continuation, ContinuationError, ContinuationState, Generator, Scope, ScopeId,
};

// Search
pub use rewind_search::{
    next_path, run_all, run_first, run_n, run_with_path, ChoiceCounts, ChoicePath, RunKind,
    RunOutcome, Search, SearchContext, SearchError, SearchStatistics, StaleChoice,
};

// Events
pub use rewind_search::event;

// Configuration
pub use rewind_config::{
    ConfigError, ContinuationConfig, EnvironmentMode, RewindConfig, SearchConfig,
    TerminationConfig,
};

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use super::{run_all, run_first, run_n, run_with_path, Search, SearchContext};
    pub use super::{Continuation, Generator, Scope};
    pub use super::{EnvironmentMode, RewindConfig};
}

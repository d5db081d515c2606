//! Rewind Search - nondeterministic search with replay-based backtracking
//!
//! A search body is an ordinary function that picks among alternatives with
//! [`SearchContext::choose`] and rejects dead ends with
//! [`SearchContext::require`]. The engine explores every combination of
//! choices by replaying the body from scratch, steered by a [`ChoicePath`],
//! instead of snapshotting it at each choice point.
//!
//! - [`SearchContext`] - choice points, failure and requirements
//! - [`Search`] - configured drivers, statistics and event listeners
//! - [`next_path`] - odometer arithmetic over choice paths
//!
//! # Example
//!
//! ```
//! use rewind_search::run_all;
//!
//! let evens = run_all(|ctx| {
//!     let x = ctx.choose(&[1, 2, 3, 4, 5]);
//!     ctx.require(x % 2 == 0);
//!     x
//! });
//!
//! assert_eq!(evens, vec![2, 4]);
//! ```

pub mod context;
pub mod error;
pub mod event;
pub mod path;
pub mod run;
pub mod search;
pub mod statistics;

pub use context::{SearchContext, StaleChoice};
pub use error::{Result, SearchError};
pub use event::{
    CountingEventListener, LoggingEventListener, SearchEventListener, SearchEventSupport,
};
pub use path::{next_path, ChoiceCounts, ChoicePath};
pub use run::{RunKind, RunOutcome};
pub use search::{run_all, run_first, run_n, run_with_path, Search};
pub use statistics::SearchStatistics;

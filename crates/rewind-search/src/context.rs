//! The per-run choice context handed to search bodies.

use std::ops::Range;

use rewind_core::Scope;
use tracing::{trace, warn};

use crate::path::{ChoiceCounts, ChoicePath};

/// A replayed index that did not fit its choice point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaleChoice {
    /// Zero-based position of the choice point within the run.
    pub position: usize,
    /// Index taken from the path.
    pub index: usize,
    /// Number of alternatives the choice point offered.
    pub count: usize,
}

/// What a run hands to its driver at each suspension point.
pub(crate) enum Signal<T> {
    /// A choice point was passed.
    Choice { position: usize, index: usize, count: usize },
    /// The run failed.
    Fail {
        counts: ChoiceCounts,
        stale: Option<StaleChoice>,
    },
    /// The body returned a value.
    Result { value: T, counts: ChoiceCounts },
}

/// State threaded through one run of a search body.
///
/// Holds the run's scope, the path steering the run, a cursor into that
/// path, and the alternative counts discovered so far. A fresh context is
/// created for every replay; nothing is shared between runs.
///
/// # Example
///
/// ```
/// use rewind_search::run_all;
///
/// let pairs = run_all(|ctx| {
///     let x = ctx.choose(&[1, 2, 3]);
///     let y = ctx.choose(&[4, 5, 6]);
///     ctx.require(x + y == 7);
///     (x, y)
/// });
///
/// assert_eq!(pairs, vec![(1, 6), (2, 5), (3, 4)]);
/// ```
pub struct SearchContext<T: Send + 'static> {
    scope: Scope<Signal<T>>,
    path: ChoicePath,
    cursor: usize,
    counts: ChoiceCounts,
}

impl<T: Send + 'static> SearchContext<T> {
    pub(crate) fn new(scope: Scope<Signal<T>>, path: ChoicePath) -> Self {
        Self {
            scope,
            path,
            cursor: 0,
            counts: ChoiceCounts::new(),
        }
    }

    /// Picks an index in `0..count` and returns it.
    ///
    /// The index comes from the path while it lasts and is 0 afterwards.
    /// With no alternatives, or when the path holds an index that does not
    /// fit, the run fails instead.
    pub fn choose_index(&mut self, count: usize) -> usize {
        if count == 0 {
            self.fail();
        }

        let position = self.counts.len();
        self.counts.push(count);
        let index = match self.path.get(self.cursor) {
            Some(&index) => {
                self.cursor += 1;
                index
            }
            None => 0,
        };

        if index >= count {
            warn!(
                event = "stale_path",
                path = %self.path,
                position,
                index,
                count,
            );
            self.fail_with(Some(StaleChoice {
                position,
                index,
                count,
            }));
        }

        trace!(event = "choice", position, index, count);
        self.scope.suspend_with(Signal::Choice {
            position,
            index,
            count,
        });
        index
    }

    /// Picks one of `alternatives` and returns a clone of it.
    pub fn choose<A: Clone>(&mut self, alternatives: &[A]) -> A {
        let index = self.choose_index(alternatives.len());
        alternatives[index].clone()
    }

    /// Picks one item of an ordered collection, taking ownership of it.
    pub fn choose_from<I>(&mut self, alternatives: I) -> I::Item
    where
        I: IntoIterator,
    {
        let mut items: Vec<I::Item> = alternatives.into_iter().collect();
        let index = self.choose_index(items.len());
        items.swap_remove(index)
    }

    /// Picks an integer in `range`. An empty range fails the run.
    pub fn choose_range(&mut self, range: Range<i64>) -> i64 {
        let count = usize::try_from(range.end.saturating_sub(range.start)).unwrap_or(0);
        let index = self.choose_index(count);
        range.start + index as i64
    }

    /// Picks `true` first, then `false`.
    pub fn choose_bool(&mut self) -> bool {
        self.choose_index(2) == 0
    }

    /// Fails the current run. Never returns.
    pub fn fail(&mut self) -> ! {
        self.fail_with(None)
    }

    /// Fails the current run unless `condition` holds.
    pub fn require(&mut self, condition: bool) {
        if !condition {
            self.fail();
        }
    }

    /// Number of choice points passed so far in this run.
    pub fn depth(&self) -> usize {
        self.counts.len()
    }

    /// The path steering this run.
    pub fn path(&self) -> &ChoicePath {
        &self.path
    }

    fn fail_with(&mut self, stale: Option<StaleChoice>) -> ! {
        let counts = std::mem::take(&mut self.counts);
        trace!(event = "fail", depth = counts.len());
        self.scope.suspend_with(Signal::Fail { counts, stale });
        // The driver discards a failed run instead of resuming it.
        unreachable!("failed search run was resumed")
    }

    /// Hands the body's return value to the driver.
    pub(crate) fn finish(mut self, value: T) {
        let counts = std::mem::take(&mut self.counts);
        self.scope.suspend_with(Signal::Result { value, counts });
    }
}

impl<T: Send + 'static> std::fmt::Debug for SearchContext<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchContext")
            .field("scope", &self.scope.id())
            .field("path", &self.path)
            .field("cursor", &self.cursor)
            .field("counts", &self.counts)
            .finish()
    }
}

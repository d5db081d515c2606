//! A single replay of a search body.

use std::sync::Arc;

use rewind_config::ContinuationConfig;
use rewind_core::{Continuation, Scope};
use tracing::trace;

use crate::context::{SearchContext, Signal, StaleChoice};
use crate::error::{Result, SearchError};
use crate::path::{ChoiceCounts, ChoicePath};

/// Classification of one run of a search body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome<T> {
    /// The body returned `value`.
    Success { value: T, counts: ChoiceCounts },
    /// The body failed, explicitly or through a stale path index.
    Failure {
        counts: ChoiceCounts,
        stale: Option<StaleChoice>,
    },
}

impl<T> RunOutcome<T> {
    /// Alternative counts discovered by the run, up to and including the
    /// failing choice point for a failed run.
    pub fn counts(&self) -> &ChoiceCounts {
        match self {
            RunOutcome::Success { counts, .. } | RunOutcome::Failure { counts, .. } => counts,
        }
    }

    /// Returns true if the body produced a value.
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Success { .. })
    }

    /// Returns the body's value, if any.
    pub fn into_value(self) -> Option<T> {
        match self {
            RunOutcome::Success { value, .. } => Some(value),
            RunOutcome::Failure { .. } => None,
        }
    }

    /// Returns the stale choice that failed the run, if any.
    pub fn stale(&self) -> Option<StaleChoice> {
        match self {
            RunOutcome::Failure { stale, .. } => *stale,
            RunOutcome::Success { .. } => None,
        }
    }

    /// Returns the kind of outcome without its payload.
    pub fn kind(&self) -> RunKind {
        match self {
            RunOutcome::Success { .. } => RunKind::Success,
            RunOutcome::Failure { .. } => RunKind::Failure,
        }
    }
}

/// Outcome of a run without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunKind {
    Success,
    Failure,
}

impl RunKind {
    /// Returns the kind as a string.
    pub fn as_str(self) -> &'static str {
        match self {
            RunKind::Success => "success",
            RunKind::Failure => "failure",
        }
    }
}

impl std::fmt::Display for RunKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A run outcome plus what the driver observed while producing it.
#[derive(Debug)]
pub(crate) struct RunReport<T> {
    pub(crate) outcome: RunOutcome<T>,
    pub(crate) choice_points: u64,
}

/// Replays `body` once, steered by `path`.
pub(crate) fn execute<T, F>(
    body: &Arc<F>,
    path: &ChoicePath,
    config: &ContinuationConfig,
) -> Result<RunReport<T>>
where
    T: Send + 'static,
    F: Fn(&mut SearchContext<T>) -> T + Send + Sync + 'static,
{
    let body = Arc::clone(body);
    let steering = path.clone();
    let mut continuation = Continuation::create(Scope::new(), move |scope| {
        let mut context = SearchContext::new(scope, steering);
        let value = body(&mut context);
        context.finish(value);
    })?
    .with_config(config.clone());

    let mut choice_points = 0;
    loop {
        continuation.resume()?;
        match continuation.take_yielded() {
            Some(Signal::Choice {
                position,
                index,
                count,
            }) => {
                choice_points += 1;
                trace!(event = "choice_seen", position, index, count);
            }
            Some(Signal::Fail { counts, stale }) => {
                // Dropping the suspended run unwinds and reclaims it.
                return Ok(RunReport {
                    outcome: RunOutcome::Failure { counts, stale },
                    choice_points,
                });
            }
            Some(Signal::Result { value, counts }) => {
                continuation.resume()?;
                return Ok(RunReport {
                    outcome: RunOutcome::Success { value, counts },
                    choice_points,
                });
            }
            None if continuation.is_complete() => {
                return Err(SearchError::NoOutcome { path: path.clone() });
            }
            None => {}
        }
    }
}

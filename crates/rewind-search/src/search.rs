//! Search drivers.
//!
//! A search enumerates every path through a body's choice points by
//! replaying the body from scratch, once per path. Each replay reports the
//! alternative counts it discovered; [`next_path`] turns them into the path
//! of the following replay. Values come out in path-enumeration order: the
//! rightmost choice point varies fastest, lowest indices first.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Instant;

use rewind_config::RewindConfig;
use tracing::{debug, info, warn};

use crate::context::SearchContext;
use crate::error::{Result, SearchError};
use crate::event::{SearchEventListener, SearchEventSupport};
use crate::path::{next_path, ChoicePath};
use crate::run::{self, RunOutcome, RunReport};
use crate::statistics::SearchStatistics;

/// A configured search over one body.
///
/// The body must be a pure function of the choices it receives: every
/// replay with the same path has to take the same route.
///
/// # Example
///
/// ```
/// use rewind_search::Search;
///
/// let search = Search::new(|ctx| {
///     let x = ctx.choose_range(1..6);
///     ctx.require(x % 2 == 0);
///     x
/// });
///
/// let (evens, stats) = search.run_all_with_statistics().unwrap();
/// assert_eq!(evens, vec![2, 4]);
/// assert_eq!(stats.run_count, 5);
/// assert_eq!(stats.failure_count, 3);
/// ```
pub struct Search<T, F> {
    body: Arc<F>,
    config: RewindConfig,
    events: SearchEventSupport<T>,
    _value: PhantomData<fn() -> T>,
}

impl<T, F> Search<T, F>
where
    T: Send + 'static,
    F: Fn(&mut SearchContext<T>) -> T + Send + Sync + 'static,
{
    /// Creates a search over `body` with default configuration.
    pub fn new(body: F) -> Self {
        Self {
            body: Arc::new(body),
            config: RewindConfig::default(),
            events: SearchEventSupport::new(),
            _value: PhantomData,
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: RewindConfig) -> Self {
        self.config = config;
        self
    }

    /// Registers an event listener.
    pub fn with_listener(mut self, listener: Arc<dyn SearchEventListener<T>>) -> Self {
        self.events.add_listener(listener);
        self
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &RewindConfig {
        &self.config
    }

    /// Runs the body once, steered by `path`.
    pub fn run_with_path(&self, path: &ChoicePath) -> Result<RunOutcome<T>> {
        Ok(self.replay(path)?.outcome)
    }

    /// Collects every value the body can return, in enumeration order.
    pub fn run_all(&self) -> Result<Vec<T>> {
        self.run_all_with_statistics()
            .map(|(solutions, _)| solutions)
    }

    /// Returns the first value in enumeration order, if any.
    ///
    /// Explores the whole path space like [`run_all`](Self::run_all).
    pub fn run_first(&self) -> Result<Option<T>> {
        Ok(self.run_all()?.into_iter().next())
    }

    /// Returns the first `n` values in enumeration order.
    ///
    /// Explores the whole path space like [`run_all`](Self::run_all) and
    /// keeps a prefix of the result.
    pub fn run_n(&self, n: usize) -> Result<Vec<T>> {
        let mut solutions = self.run_all()?;
        solutions.truncate(n);
        Ok(solutions)
    }

    /// Collects every value the body can return and reports how the search
    /// went.
    pub fn run_all_with_statistics(&self) -> Result<(Vec<T>, SearchStatistics)> {
        let started = Instant::now();
        let run_limit = self.config.run_count_limit();
        let time_limit = self.config.time_limit();
        let mut stats = SearchStatistics::new();
        let mut solutions = Vec::new();
        let mut path = ChoicePath::new();

        info!(
            event = "search_start",
            environment_mode = ?self.config.environment_mode,
            run_limit = ?run_limit,
        );
        self.events.fire_search_started();

        loop {
            let RunReport {
                outcome,
                choice_points,
            } = self.replay(&path)?;
            stats.record_run(&outcome, choice_points);
            debug!(
                event = "run_end",
                path = %path,
                outcome = outcome.kind().as_str(),
                depth = outcome.counts().len(),
            );
            self.events.fire_run_finished(&path, outcome.kind());

            let next = next_path(&path, outcome.counts());
            if let Some(value) = outcome.into_value() {
                self.events.fire_solution_found(&value, &path);
                solutions.push(value);
            }

            let Some(next) = next else {
                break;
            };
            path = next;

            let out_of_runs = run_limit.is_some_and(|limit| stats.run_count >= limit);
            let out_of_time = time_limit.is_some_and(|limit| started.elapsed() >= limit);
            if out_of_runs || out_of_time {
                stats.terminated_early = true;
                warn!(
                    event = "search_terminated",
                    runs = stats.run_count,
                    next_path = %path,
                );
                break;
            }
        }

        stats.duration = started.elapsed();
        info!(
            event = "search_end",
            runs = stats.run_count,
            solutions = stats.solution_count,
            failures = stats.failure_count,
            elapsed_ms = stats.duration.as_millis() as u64,
            terminated_early = stats.terminated_early,
        );
        self.events.fire_search_ended(&stats);
        Ok((solutions, stats))
    }

    /// Runs one replay and applies the configured checks to it.
    fn replay(&self, path: &ChoicePath) -> Result<RunReport<T>> {
        let report = run::execute(&self.body, path, &self.config.continuation)?;

        if let Some(stale) = report.outcome.stale() {
            if self.config.search.fail_on_stale_path {
                return Err(SearchError::StalePath {
                    path: path.clone(),
                    position: stale.position,
                    index: stale.index,
                    count: stale.count,
                });
            }
        }

        if self.config.environment_mode.is_asserted() {
            let again = run::execute(&self.body, path, &self.config.continuation)?;
            if again.outcome.kind() != report.outcome.kind()
                || again.outcome.counts() != report.outcome.counts()
            {
                return Err(SearchError::NonDeterministicBody { path: path.clone() });
            }
        }

        Ok(report)
    }
}

impl<T, F> std::fmt::Debug for Search<T, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Search")
            .field("config", &self.config)
            .field("events", &self.events)
            .finish()
    }
}

/// Runs `body` once, steered by `path`, with default configuration.
pub fn run_with_path<T, F>(body: F, path: &[usize]) -> Result<RunOutcome<T>>
where
    T: Send + 'static,
    F: Fn(&mut SearchContext<T>) -> T + Send + Sync + 'static,
{
    Search::new(body).run_with_path(&ChoicePath::from(path))
}

/// Collects every value `body` can return, in enumeration order.
///
/// # Panics
///
/// Panics if the engine cannot drive the body, for example when the host
/// refuses to start a computation. Use [`Search`] to handle such errors.
pub fn run_all<T, F>(body: F) -> Vec<T>
where
    T: Send + 'static,
    F: Fn(&mut SearchContext<T>) -> T + Send + Sync + 'static,
{
    Search::new(body)
        .run_all()
        .unwrap_or_else(|err| panic!("search failed: {err}"))
}

/// Returns the first value `body` can return, if any.
///
/// # Panics
///
/// Same conditions as [`run_all`].
pub fn run_first<T, F>(body: F) -> Option<T>
where
    T: Send + 'static,
    F: Fn(&mut SearchContext<T>) -> T + Send + Sync + 'static,
{
    Search::new(body)
        .run_first()
        .unwrap_or_else(|err| panic!("search failed: {err}"))
}

/// Returns the first `n` values `body` can return.
///
/// # Panics
///
/// Same conditions as [`run_all`].
pub fn run_n<T, F>(n: usize, body: F) -> Vec<T>
where
    T: Send + 'static,
    F: Fn(&mut SearchContext<T>) -> T + Send + Sync + 'static,
{
    Search::new(body)
        .run_n(n)
        .unwrap_or_else(|err| panic!("search failed: {err}"))
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;

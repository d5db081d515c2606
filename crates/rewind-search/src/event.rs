//! Event system for search monitoring.
//!
//! Listeners registered on a [`Search`](crate::Search) receive notifications
//! as the search replays its body.
//!
//! # Event Types
//!
//! - **Search Events**: search started, search ended
//! - **Run Events**: a replay finished, a solution was found
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use rewind_search::event::{CountingEventListener, SearchEventSupport};
//!
//! let listener = Arc::new(CountingEventListener::new());
//! let mut support = SearchEventSupport::<u32>::new();
//! support.add_listener(listener.clone());
//!
//! support.fire_search_started();
//! assert_eq!(listener.search_started_count(), 1);
//! ```

use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::info;

use crate::path::ChoicePath;
use crate::run::RunKind;
use crate::statistics::SearchStatistics;

/// Listener for search events.
///
/// Implement this trait to observe a search as it runs. Every method has
/// an empty default so listeners only override what they need.
pub trait SearchEventListener<T>: Send + Sync + Debug {
    /// Called before the first run.
    fn on_search_started(&self) {}

    /// Called after every run.
    ///
    /// # Arguments
    ///
    /// * `path` - The path that steered the run
    /// * `kind` - Whether the run produced a value
    fn on_run_finished(&self, _path: &ChoicePath, _kind: RunKind) {}

    /// Called for every value the body returns, in enumeration order.
    fn on_solution_found(&self, _solution: &T, _path: &ChoicePath) {}

    /// Called once the search is over.
    fn on_search_ended(&self, _statistics: &SearchStatistics) {}
}

/// Central event broadcaster for search events.
///
/// All listener methods are called synchronously in registration order.
pub struct SearchEventSupport<T> {
    listeners: Vec<Arc<dyn SearchEventListener<T>>>,
}

impl<T> SearchEventSupport<T> {
    /// Creates a new event support instance.
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Adds a listener.
    pub fn add_listener(&mut self, listener: Arc<dyn SearchEventListener<T>>) {
        self.listeners.push(listener);
    }

    /// Removes all listeners.
    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn fire_search_started(&self) {
        for listener in &self.listeners {
            listener.on_search_started();
        }
    }

    pub fn fire_run_finished(&self, path: &ChoicePath, kind: RunKind) {
        for listener in &self.listeners {
            listener.on_run_finished(path, kind);
        }
    }

    pub fn fire_solution_found(&self, solution: &T, path: &ChoicePath) {
        for listener in &self.listeners {
            listener.on_solution_found(solution, path);
        }
    }

    pub fn fire_search_ended(&self, statistics: &SearchStatistics) {
        for listener in &self.listeners {
            listener.on_search_ended(statistics);
        }
    }

    /// Returns the number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Returns true if there are any listeners registered.
    pub fn has_listeners(&self) -> bool {
        !self.listeners.is_empty()
    }
}

impl<T> Default for SearchEventSupport<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SearchEventSupport<T> {
    fn clone(&self) -> Self {
        Self {
            listeners: self.listeners.clone(),
        }
    }
}

impl<T> Debug for SearchEventSupport<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEventSupport")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// A listener that logs events through `tracing`.
#[derive(Debug, Clone, Default)]
pub struct LoggingEventListener {
    /// Prefix for log messages.
    prefix: String,
}

impl LoggingEventListener {
    /// Creates a new logging listener.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a logging listener with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl<T: Debug> SearchEventListener<T> for LoggingEventListener {
    fn on_search_started(&self) {
        info!("{}[Event] Search started", self.prefix);
    }

    fn on_solution_found(&self, solution: &T, path: &ChoicePath) {
        info!("{}[Event] Solution {:?} at path {}", self.prefix, solution, path);
    }

    fn on_search_ended(&self, statistics: &SearchStatistics) {
        if statistics.terminated_early {
            info!(
                "{}[Event] Search ended after {} runs (terminated early)",
                self.prefix, statistics.run_count
            );
        } else {
            info!(
                "{}[Event] Search ended after {} runs",
                self.prefix, statistics.run_count
            );
        }
    }
}

/// A counting listener that tracks event occurrences.
///
/// Useful for testing and statistics collection.
#[derive(Debug, Default)]
pub struct CountingEventListener {
    search_started_count: AtomicUsize,
    run_finished_count: AtomicUsize,
    failed_run_count: AtomicUsize,
    solution_found_count: AtomicUsize,
    search_ended_count: AtomicUsize,
}

impl CountingEventListener {
    /// Creates a new counting listener.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_started_count(&self) -> usize {
        self.search_started_count.load(Ordering::SeqCst)
    }

    pub fn run_finished_count(&self) -> usize {
        self.run_finished_count.load(Ordering::SeqCst)
    }

    pub fn failed_run_count(&self) -> usize {
        self.failed_run_count.load(Ordering::SeqCst)
    }

    pub fn solution_found_count(&self) -> usize {
        self.solution_found_count.load(Ordering::SeqCst)
    }

    pub fn search_ended_count(&self) -> usize {
        self.search_ended_count.load(Ordering::SeqCst)
    }

    /// Resets all counts to zero.
    pub fn reset(&self) {
        self.search_started_count.store(0, Ordering::SeqCst);
        self.run_finished_count.store(0, Ordering::SeqCst);
        self.failed_run_count.store(0, Ordering::SeqCst);
        self.solution_found_count.store(0, Ordering::SeqCst);
        self.search_ended_count.store(0, Ordering::SeqCst);
    }
}

impl<T> SearchEventListener<T> for CountingEventListener {
    fn on_search_started(&self) {
        self.search_started_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_run_finished(&self, _path: &ChoicePath, kind: RunKind) {
        self.run_finished_count.fetch_add(1, Ordering::SeqCst);
        if kind == RunKind::Failure {
            self.failed_run_count.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn on_solution_found(&self, _solution: &T, _path: &ChoicePath) {
        self.solution_found_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_search_ended(&self, _statistics: &SearchStatistics) {
        self.search_ended_count.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;

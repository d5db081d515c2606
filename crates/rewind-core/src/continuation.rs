//! One-shot delimited continuations.
//!
//! A [`Continuation`] wraps a body function of one argument, its [`Scope`].
//! Resuming runs the body until it suspends through that scope or returns.
//! Suspension preserves the body's full native call stack, so a body may
//! suspend from inside recursive helpers and loops without capturing any
//! state by hand.
//!
//! # Lifecycle
//!
//! ```text
//! NotStarted ──resume──▶ Running ──suspend──▶ Suspended
//!                          │  ▲                   │
//!                          │  └──────resume───────┘
//!                          └──return──▶ Completed
//! ```
//!
//! Resuming a completed continuation is a no-op. Dropping a suspended
//! continuation unwinds the body's stack and reclaims its thread.

use std::fmt;
use std::panic;
use std::thread::JoinHandle;

use crossbeam::channel;
use rewind_config::ContinuationConfig;
use tracing::{debug, trace};

use crate::error::{ContinuationError, Result};
use crate::host::{self, Event, Resume, ResumerEnds};
use crate::scope::{Scope, ScopeId};

type Body<Y> = Box<dyn FnOnce(Scope<Y>) + Send + 'static>;

/// Lifecycle state of a continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuationState {
    /// Created but never resumed.
    NotStarted,
    /// Currently executing the body.
    Running,
    /// Paused inside a suspend call.
    Suspended,
    /// The body has finished. Terminal.
    Completed,
}

impl ContinuationState {
    /// Returns the state as a string.
    pub fn as_str(self) -> &'static str {
        match self {
            ContinuationState::NotStarted => "not_started",
            ContinuationState::Running => "running",
            ContinuationState::Suspended => "suspended",
            ContinuationState::Completed => "completed",
        }
    }
}

impl fmt::Display for ContinuationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A suspendable, resumable unit of execution.
///
/// # Example
///
/// ```
/// use rewind_core::Continuation;
///
/// let mut counter = Continuation::new(|scope| {
///     for i in 0..3 {
///         scope.suspend_with(i);
///     }
/// });
///
/// assert_eq!(counter.pull_next().unwrap(), Some(0));
/// assert_eq!(counter.pull_next().unwrap(), Some(1));
/// assert_eq!(counter.pull_next().unwrap(), Some(2));
/// assert_eq!(counter.pull_next().unwrap(), None);
/// assert!(counter.is_complete());
/// ```
pub struct Continuation<Y: Send + 'static> {
    scope: Scope<Y>,
    body: Option<Body<Y>>,
    state: ContinuationState,
    yielded: Option<Y>,
    ends: ResumerEnds<Y>,
    handle: Option<JoinHandle<()>>,
    config: ContinuationConfig,
}

impl<Y: Send + 'static> Continuation<Y> {
    /// Creates a computation over `body`, bound to `scope`. Does not start it.
    ///
    /// # Errors
    ///
    /// Returns [`ContinuationError::ScopeAlreadyBound`] if `scope` already
    /// belongs to another computation.
    pub fn create<F>(scope: Scope<Y>, body: F) -> Result<Self>
    where
        F: FnOnce(Scope<Y>) + Send + 'static,
    {
        let (ends, computation_ends) = host::rendezvous();
        scope.bind(computation_ends)?;
        Ok(Self {
            scope,
            body: Some(Box::new(body)),
            state: ContinuationState::NotStarted,
            yielded: None,
            ends,
            handle: None,
            config: ContinuationConfig::default(),
        })
    }

    /// Creates a computation over `body` with a fresh scope.
    pub fn new<F>(body: F) -> Self
    where
        F: FnOnce(Scope<Y>) + Send + 'static,
    {
        let scope = Scope::new();
        let (ends, computation_ends) = host::rendezvous();
        // A fresh scope cannot already be bound.
        let _ = scope.bind(computation_ends);
        Self {
            scope,
            body: Some(Box::new(body)),
            state: ContinuationState::NotStarted,
            yielded: None,
            ends,
            handle: None,
            config: ContinuationConfig::default(),
        }
    }

    /// Sets how the backing thread is spawned. Only affects a computation
    /// that has not started yet.
    pub fn with_config(mut self, config: ContinuationConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the scope this computation was created with.
    pub fn scope(&self) -> &Scope<Y> {
        &self.scope
    }

    /// Returns the identifier of this computation's scope.
    pub fn scope_id(&self) -> ScopeId {
        self.scope.id()
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> ContinuationState {
        self.state
    }

    /// Returns true once the body has returned. Never flips back.
    pub fn is_complete(&self) -> bool {
        self.state == ContinuationState::Completed
    }

    /// Runs the body until its next suspend call or until it returns.
    ///
    /// Starts the body on first use and continues right after the last
    /// suspend call afterwards. Resuming a completed computation does
    /// nothing. The yielded-value slot is cleared first, so after this
    /// returns it holds the value of this step's suspend call, if any.
    ///
    /// # Panics
    ///
    /// A panic inside the body is re-raised here, on the resumer's thread.
    /// The computation is completed afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`ContinuationError::Spawn`] if the host cannot start the
    /// computation and [`ContinuationError::Disconnected`] if it vanished.
    pub fn resume(&mut self) -> Result<()> {
        self.yielded = None;
        match self.state {
            ContinuationState::Completed => {
                debug!(event = "resume_completed", scope = %self.scope_id());
                return Ok(());
            }
            ContinuationState::NotStarted => self.start()?,
            ContinuationState::Suspended => {
                trace!(event = "resume", scope = %self.scope_id());
                if self.ends.resumes.send(Resume::Continue).is_err() {
                    return Err(self.disconnected());
                }
            }
            // `resume` holds `&mut self` for the whole hand-off.
            ContinuationState::Running => unreachable!("continuation resumed while running"),
        }
        self.state = ContinuationState::Running;
        self.await_event()
    }

    /// Resumes and returns the value handed over by this step, if any.
    ///
    /// Returns `None` when the step ended by completion rather than by a
    /// suspend call with a value.
    pub fn pull_next(&mut self) -> Result<Option<Y>> {
        self.resume()?;
        Ok(self.take_yielded())
    }

    /// Returns the value handed over by the most recent step, if any.
    pub fn yielded(&self) -> Option<&Y> {
        self.yielded.as_ref()
    }

    /// Takes the value handed over by the most recent step, if any.
    pub fn take_yielded(&mut self) -> Option<Y> {
        self.yielded.take()
    }

    fn start(&mut self) -> Result<()> {
        let Some(body) = self.body.take() else {
            return Err(self.disconnected());
        };
        trace!(event = "spawn", scope = %self.scope_id());
        let handle = host::spawn(self.scope.clone(), body, &self.config)?;
        self.handle = Some(handle);
        Ok(())
    }

    fn await_event(&mut self) -> Result<()> {
        match self.ends.events.recv() {
            Ok(Event::Suspended(value)) => {
                self.state = ContinuationState::Suspended;
                self.yielded = value;
                Ok(())
            }
            Ok(Event::Completed) => {
                self.finish();
                Ok(())
            }
            Ok(Event::Panicked(payload)) => {
                self.finish();
                panic::resume_unwind(payload)
            }
            Err(_) => {
                self.finish();
                Err(self.disconnected())
            }
        }
    }

    fn finish(&mut self) {
        self.state = ContinuationState::Completed;
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        trace!(event = "complete", scope = %self.scope_id());
    }

    fn disconnected(&self) -> ContinuationError {
        ContinuationError::Disconnected {
            scope: self.scope_id(),
        }
    }
}

impl<Y: Send + 'static> Drop for Continuation<Y> {
    fn drop(&mut self) {
        if self.state == ContinuationState::Suspended {
            trace!(event = "cancel", scope = %self.scope_id());
            self.scope.begin_cancel();
            let _ = self.ends.resumes.send(Resume::Cancel);
        }
        // Nothing reads events past this point; a body that outlives the
        // cancel must not block on reporting.
        drop(std::mem::replace(&mut self.ends.events, channel::never()));
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl<Y: Send + 'static> fmt::Debug for Continuation<Y> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Continuation")
            .field("scope", &self.scope_id())
            .field("state", &self.state)
            .field("has_yielded", &self.yielded.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "continuation_tests.rs"]
mod tests;

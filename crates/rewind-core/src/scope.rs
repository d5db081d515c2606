//! Suspension scopes.
//!
//! A [`Scope`] pairs one computation with the suspend calls allowed inside
//! it. The body of a computation receives its scope as its only argument and
//! suspends through it; any other use is an [`InvalidScopeUse`] error.
//!
//! [`InvalidScopeUse`]: crate::ContinuationError::InvalidScopeUse

use std::fmt;
use std::panic;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::thread::{self, ThreadId};

use crossbeam::channel::{Receiver, Sender};
use tracing::trace;

use crate::error::{ContinuationError, Result};
use crate::host::{Cancelled, ComputationEnds, Event, Resume};

static NEXT_SCOPE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a scope, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u64);

impl ScopeId {
    fn next() -> Self {
        ScopeId(NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scope#{}", self.0)
    }
}

/// Computation-side state installed when a scope is bound.
struct Link<Y> {
    resumes: Receiver<Resume>,
    /// Taken by the computation thread once the body is over.
    events: Mutex<Option<Sender<Event<Y>>>>,
    owner: OnceLock<ThreadId>,
    cancelling: AtomicBool,
}

struct ScopeInner<Y> {
    id: ScopeId,
    link: OnceLock<Link<Y>>,
}

/// Opaque token identifying one suspension boundary.
///
/// Cloning a scope yields another handle to the same boundary. `Y` is the
/// type of values the computation may hand to its resumer when suspending.
///
/// # Example
///
/// ```
/// use rewind_core::{Continuation, Scope};
///
/// let scope = Scope::new();
/// let mut computation = Continuation::create(scope, |scope: Scope<&'static str>| {
///     scope.suspend_with("paused");
/// })
/// .unwrap();
///
/// assert_eq!(computation.pull_next().unwrap(), Some("paused"));
/// ```
pub struct Scope<Y> {
    inner: Arc<ScopeInner<Y>>,
}

impl<Y> Scope<Y> {
    /// Creates a fresh, unbound scope.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ScopeInner {
                id: ScopeId::next(),
                link: OnceLock::new(),
            }),
        }
    }

    /// Returns the identifier of this scope.
    pub fn id(&self) -> ScopeId {
        self.inner.id
    }

    /// Returns true once a computation has been created with this scope.
    pub fn is_bound(&self) -> bool {
        self.inner.link.get().is_some()
    }

    /// Suspends the current computation without a value.
    ///
    /// # Panics
    ///
    /// Panics with an [`InvalidScopeUse`](ContinuationError::InvalidScopeUse)
    /// diagnostic naming the scope when called outside the computation
    /// created with this scope. Misuse is a programming error, not something
    /// a search can recover from.
    pub fn suspend(&self) {
        if let Err(err) = self.try_suspend(None) {
            panic!("{err}");
        }
    }

    /// Suspends the current computation, handing `value` to the resumer.
    ///
    /// # Panics
    ///
    /// Same conditions as [`suspend`](Self::suspend).
    pub fn suspend_with(&self, value: Y) {
        if let Err(err) = self.try_suspend(Some(value)) {
            panic!("{err}");
        }
    }

    /// Suspends the current computation, reporting misuse as an error.
    ///
    /// Returns once the computation is resumed. If the computation is
    /// discarded while suspended, this call never returns: the computation's
    /// stack is unwound instead.
    pub fn try_suspend(&self, value: Option<Y>) -> Result<()> {
        let link = self
            .inner
            .link
            .get()
            .ok_or_else(|| self.invalid("scope is not bound to a computation"))?;

        match link.owner.get() {
            Some(owner) if *owner == thread::current().id() => {}
            Some(_) => {
                return Err(self.invalid("suspend called outside the computation created with it"))
            }
            None => return Err(self.invalid("computation has not started")),
        }
        if link.cancelling.load(Ordering::Acquire) {
            return Err(self.invalid("computation is being cancelled"));
        }

        let events = link
            .events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| self.invalid("computation has already finished"))?;

        trace!(event = "suspend", scope = %self.id(), with_value = value.is_some());
        if events.send(Event::Suspended(value)).is_err() {
            self.unwind();
        }
        drop(events);

        match link.resumes.recv() {
            Ok(Resume::Continue) => Ok(()),
            Ok(Resume::Cancel) | Err(_) => self.unwind(),
        }
    }

    fn invalid(&self, reason: &'static str) -> ContinuationError {
        ContinuationError::InvalidScopeUse {
            scope: self.id(),
            reason,
        }
    }

    fn unwind(&self) -> ! {
        panic::resume_unwind(Box::new(Cancelled(self.id())))
    }

    /// Installs the computation-side channel ends.
    pub(crate) fn bind(&self, ends: ComputationEnds<Y>) -> Result<()> {
        let link = Link {
            resumes: ends.resumes,
            events: Mutex::new(Some(ends.events)),
            owner: OnceLock::new(),
            cancelling: AtomicBool::new(false),
        };
        self.inner
            .link
            .set(link)
            .map_err(|_| ContinuationError::ScopeAlreadyBound { scope: self.id() })
    }

    /// Records the calling thread as the computation's thread.
    pub(crate) fn attach_current_thread(&self) {
        if let Some(link) = self.inner.link.get() {
            let _ = link.owner.set(thread::current().id());
        }
    }

    /// Takes the event sender away from further suspend calls.
    pub(crate) fn detach(&self) -> Option<Sender<Event<Y>>> {
        self.inner
            .link
            .get()
            .and_then(|link| link.events.lock().unwrap_or_else(PoisonError::into_inner).take())
    }

    /// Flags the computation as being torn down.
    pub(crate) fn begin_cancel(&self) {
        if let Some(link) = self.inner.link.get() {
            link.cancelling.store(true, Ordering::Release);
        }
    }
}

impl<Y> Default for Scope<Y> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Y> Clone for Scope<Y> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<Y> PartialEq for Scope<Y> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<Y> Eq for Scope<Y> {}

impl<Y> fmt::Debug for Scope<Y> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("id", &self.id())
            .field("bound", &self.is_bound())
            .finish()
    }
}

//! Host suspension capability.
//!
//! Every computation runs on its own OS thread. Control is handed back and
//! forth over two zero-capacity channels, so exactly one side runs at a time:
//! the resumer sends a [`Resume`] and blocks for the next [`Event`]; the
//! computation sends an [`Event`] and blocks for the next [`Resume`]. The
//! computation thread keeps its native stack across hand-offs, which is what
//! lets a body suspend at any call depth.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver, Sender};
use rewind_config::ContinuationConfig;
use tracing::trace;

use crate::scope::{Scope, ScopeId};

/// Message from the resumer to a suspended computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resume {
    /// Continue after the pending suspend call.
    Continue,
    /// Unwind the computation's stack and exit.
    Cancel,
}

/// Message from a computation to its resumer.
pub(crate) enum Event<Y> {
    /// The body called suspend, optionally with a value.
    Suspended(Option<Y>),
    /// The body returned normally.
    Completed,
    /// The body panicked; the payload is re-raised on the resumer.
    Panicked(Box<dyn Any + Send + 'static>),
}

/// Unwind payload used to tear down a cancelled computation.
pub(crate) struct Cancelled(pub(crate) ScopeId);

/// Resumer-side ends of the hand-off channels.
pub(crate) struct ResumerEnds<Y> {
    pub(crate) resumes: Sender<Resume>,
    pub(crate) events: Receiver<Event<Y>>,
}

/// Computation-side ends of the hand-off channels.
pub(crate) struct ComputationEnds<Y> {
    pub(crate) resumes: Receiver<Resume>,
    pub(crate) events: Sender<Event<Y>>,
}

/// Creates a linked pair of rendezvous channels.
pub(crate) fn rendezvous<Y>() -> (ResumerEnds<Y>, ComputationEnds<Y>) {
    let (resume_tx, resume_rx) = channel::bounded(0);
    let (event_tx, event_rx) = channel::bounded(0);
    (
        ResumerEnds {
            resumes: resume_tx,
            events: event_rx,
        },
        ComputationEnds {
            resumes: resume_rx,
            events: event_tx,
        },
    )
}

/// Starts `body` on a fresh execution context bound to `scope`.
///
/// The body starts running immediately; the caller is expected to block on
/// the event channel right after. When the body is over, the computation
/// side drops its event sender so a waiting resumer observes a disconnect
/// instead of blocking forever.
pub(crate) fn spawn<Y, F>(
    scope: Scope<Y>,
    body: F,
    config: &ContinuationConfig,
) -> std::io::Result<JoinHandle<()>>
where
    Y: Send + 'static,
    F: FnOnce(Scope<Y>) + Send + 'static,
{
    let name = config
        .thread_name
        .clone()
        .unwrap_or_else(|| format!("rewind-{}", scope.id()));
    let mut builder = thread::Builder::new().name(name);
    if let Some(stack_size) = config.stack_size {
        builder = builder.stack_size(stack_size);
    }

    builder.spawn(move || {
        let id = scope.id();
        scope.attach_current_thread();
        trace!(event = "computation_start", scope = %id);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| body(scope.clone())));
        let Some(events) = scope.detach() else {
            return;
        };

        let event = match outcome {
            Ok(()) => Event::Completed,
            Err(payload) if payload.is::<Cancelled>() => {
                trace!(event = "computation_cancelled", scope = %id);
                return;
            }
            Err(payload) => Event::Panicked(payload),
        };
        trace!(event = "computation_end", scope = %id);
        // Nobody is waiting if the resumer was dropped mid-flight.
        let _ = events.send(event);
    })
}

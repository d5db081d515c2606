//! Pull-based sequences over a continuation.

use tracing::error;

use crate::continuation::Continuation;
use crate::error::Result;
use crate::scope::Scope;

/// Forward-only, non-restartable sequence of the values a computation
/// suspends with.
///
/// A generator adds no state of its own; it delegates to the wrapped
/// [`Continuation`]. Once exhausted, a new computation must be created to
/// produce the sequence again.
///
/// # Example
///
/// ```
/// use rewind_core::Generator;
///
/// let squares = Generator::from_fn(|scope| {
///     for n in 1..=4u32 {
///         scope.suspend_with(n * n);
///     }
/// });
///
/// assert_eq!(squares.collect::<Vec<_>>(), vec![1, 4, 9, 16]);
/// ```
#[derive(Debug)]
pub struct Generator<Y: Send + 'static> {
    continuation: Continuation<Y>,
}

impl<Y: Send + 'static> Generator<Y> {
    /// Wraps an existing computation.
    pub fn new(continuation: Continuation<Y>) -> Self {
        Self { continuation }
    }

    /// Creates a generator over `body` with a fresh scope.
    pub fn from_fn<F>(body: F) -> Self
    where
        F: FnOnce(Scope<Y>) + Send + 'static,
    {
        Self::new(Continuation::new(body))
    }

    /// Resumes the computation and returns the value it suspended with.
    ///
    /// Returns `None` once the computation is complete, or when this step
    /// suspended without a value.
    pub fn next_value(&mut self) -> Result<Option<Y>> {
        if self.continuation.is_complete() {
            return Ok(None);
        }
        self.continuation.pull_next()
    }

    /// Returns true once the computation has completed.
    pub fn is_exhausted(&self) -> bool {
        self.continuation.is_complete()
    }

    /// Returns the wrapped computation.
    pub fn into_inner(self) -> Continuation<Y> {
        self.continuation
    }
}

impl<Y: Send + 'static> Iterator for Generator<Y> {
    type Item = Y;

    /// Skips steps that suspended without a value.
    fn next(&mut self) -> Option<Y> {
        while !self.is_exhausted() {
            match self.next_value() {
                Ok(Some(value)) => return Some(value),
                Ok(None) => {}
                Err(err) => {
                    error!(event = "generator_error", error = %err);
                    return None;
                }
            }
        }
        None
    }
}

impl<Y: Send + 'static> std::iter::FusedIterator for Generator<Y> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_yields_in_order() {
        let mut generator = Generator::from_fn(|scope| {
            scope.suspend_with(":first");
            scope.suspend_with(":second");
            scope.suspend_with(":third");
        });

        assert!(!generator.is_exhausted());
        assert_eq!(generator.next_value().unwrap(), Some(":first"));
        assert_eq!(generator.next_value().unwrap(), Some(":second"));
        assert_eq!(generator.next_value().unwrap(), Some(":third"));
        assert!(!generator.is_exhausted());
        assert_eq!(generator.next_value().unwrap(), None);
        assert!(generator.is_exhausted());
        assert_eq!(generator.next_value().unwrap(), None);
    }

    #[test]
    fn test_iterator_skips_valueless_steps() {
        let generator = Generator::from_fn(|scope| {
            scope.suspend_with(1);
            scope.suspend();
            scope.suspend_with(2);
        });

        assert_eq!(generator.collect::<Vec<i32>>(), vec![1, 2]);
    }

    #[test]
    fn test_infinite_generator_take() {
        let naturals = Generator::from_fn(|scope| {
            let mut n = 0u64;
            loop {
                scope.suspend_with(n);
                n += 1;
            }
        });

        let first: Vec<u64> = naturals.take(5).collect();
        assert_eq!(first, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_fused_after_exhaustion() {
        let mut generator = Generator::from_fn(|scope| scope.suspend_with('a'));

        assert_eq!(generator.next(), Some('a'));
        assert_eq!(generator.next(), None);
        assert_eq!(generator.next(), None);
        assert!(generator.into_inner().is_complete());
    }

    #[test]
    fn test_wraps_existing_continuation() {
        let scope = Scope::new();
        let continuation = Continuation::create(scope, |scope| {
            for word in ["amb", "choose", "fail"] {
                scope.suspend_with(word.len());
            }
        })
        .unwrap();

        let lengths: Vec<usize> = Generator::new(continuation).collect();
        assert_eq!(lengths, vec![3, 6, 4]);
    }
}

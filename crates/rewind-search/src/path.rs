//! Choice paths and odometer arithmetic.
//!
//! A [`ChoicePath`] steers one replay of a search body: entry `i` is the
//! index picked at the `i`-th choice point. The [`ChoiceCounts`] of a run
//! record how many alternatives each choice point it reached offered.
//! [`next_path`] turns both into the path of the following replay.

use std::fmt;
use std::ops::Deref;

use smallvec::SmallVec;

/// Inline capacity before a path or count list spills to the heap.
const INLINE_CHOICES: usize = 16;

/// Defines a newtype over an inline index sequence with slice access.
macro_rules! index_sequence {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
        pub struct $name(SmallVec<[usize; INLINE_CHOICES]>);

        impl $name {
            /// Creates an empty sequence.
            pub fn new() -> Self {
                Self(SmallVec::new())
            }

            /// Returns the entries as a slice.
            pub fn as_slice(&self) -> &[usize] {
                &self.0
            }

            /// Returns the entries as an owned vector.
            pub fn to_vec(&self) -> Vec<usize> {
                self.0.to_vec()
            }

            pub(crate) fn push(&mut self, value: usize) {
                self.0.push(value);
            }
        }

        impl Deref for $name {
            type Target = [usize];

            fn deref(&self) -> &[usize] {
                &self.0
            }
        }

        impl From<Vec<usize>> for $name {
            fn from(values: Vec<usize>) -> Self {
                Self(SmallVec::from_vec(values))
            }
        }

        impl From<&[usize]> for $name {
            fn from(values: &[usize]) -> Self {
                Self(SmallVec::from_slice(values))
            }
        }

        impl<const N: usize> From<[usize; N]> for $name {
            fn from(values: [usize; N]) -> Self {
                Self(values.into_iter().collect())
            }
        }

        impl FromIterator<usize> for $name {
            fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
                Self(iter.into_iter().collect())
            }
        }

        impl PartialEq<[usize]> for $name {
            fn eq(&self, other: &[usize]) -> bool {
                self.as_slice() == other
            }
        }

        impl PartialEq<Vec<usize>> for $name {
            fn eq(&self, other: &Vec<usize>) -> bool {
                self.as_slice() == other.as_slice()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:?}", self.as_slice())
            }
        }
    };
}

index_sequence!(
    /// Sequence of chosen indices steering one replay of a search body.
    ChoicePath
);

index_sequence!(
    /// Sequence of alternative counts discovered during one replay.
    ChoiceCounts
);

/// Computes the path of the replay after the one steered by `path`.
///
/// `path` is first padded with zeros to the length of `counts`, covering
/// choice points the run reached after the path ran out. Positions past
/// the end of `counts` are dropped: the run never reached them. The
/// rightmost position that can still advance is incremented and every
/// position to its right is reset to zero. Returns `None` once every
/// position is at its last alternative.
///
/// # Example
///
/// ```
/// use rewind_search::next_path;
///
/// assert_eq!(next_path(&[0, 1], &[2, 3]).unwrap(), vec![0, 2]);
/// assert_eq!(next_path(&[0, 2], &[2, 3]).unwrap(), vec![1, 0]);
/// assert!(next_path(&[2], &[3]).is_none());
/// ```
pub fn next_path(path: &[usize], counts: &[usize]) -> Option<ChoicePath> {
    let mut next: ChoicePath = (0..counts.len())
        .map(|i| path.get(i).copied().unwrap_or(0))
        .collect();

    let position = (0..counts.len())
        .rev()
        .find(|&i| next.0[i] < counts[i].saturating_sub(1))?;

    next.0[position] += 1;
    next.0.truncate(position + 1);
    next.0.resize(counts.len(), 0);
    Some(next)
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;

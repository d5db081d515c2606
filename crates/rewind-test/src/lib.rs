//! Shared test fixtures for rewind crates.
//!
//! This crate provides search bodies over classic puzzles together with
//! plain checking functions, so tests can both run a search and verify what
//! it returned.
//!
//! - [`nqueens`] - N-Queens placement and conflict checks
//! - [`subset_sum`] - Subsets of a multiset hitting a target sum
//! - [`coloring`] - Proper vertex colorings of small graphs
//! - [`cryptarithm`] - The `TO + GO = OUT` letter puzzle
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! rewind-test = { workspace = true }
//! ```
//!
//! Then run the fixtures you need:
//!
//! ```
//! use rewind_search::run_all;
//! use rewind_test::nqueens::{count_conflicts, nqueens_body};
//!
//! let boards = run_all(nqueens_body(4));
//! assert_eq!(boards.len(), 2);
//! assert!(boards.iter().all(|rows| count_conflicts(rows) == 0));
//! ```

pub mod coloring;
pub mod cryptarithm;
pub mod nqueens;
pub mod subset_sum;

pub use coloring::Graph;
pub use cryptarithm::Assignment;

//! Integration tests running complete searches over the shared fixtures.

use rewind::prelude::*;
use rewind::event::CountingEventListener;
use rewind_test::coloring::{coloring_body, Graph};
use rewind_test::cryptarithm::{to_go_out, Assignment};
use rewind_test::nqueens::{count_conflicts, nqueens_body, render_board};
use rewind_test::subset_sum::{count_subsets, subset_sum_body};
use std::sync::Arc;

#[test]
fn test_4_queens_has_two_solutions() {
    let boards = run_all(nqueens_body(4));

    assert_eq!(boards, vec![vec![1, 3, 0, 2], vec![2, 0, 3, 1]]);
    assert_eq!(render_board(&boards[0]), ". . Q .\nQ . . .\n. . . Q\n. Q . .\n");
}

#[test]
fn test_8_queens_has_92_solutions() {
    let boards = run_all(nqueens_body(8));

    assert_eq!(boards.len(), 92);
    assert!(boards.iter().all(|rows| count_conflicts(rows) == 0));
    // Enumeration order is lexicographic in the rows.
    assert_eq!(boards[0], vec![0, 4, 7, 5, 2, 6, 1, 3]);
    assert!(boards.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_queens_without_solutions() {
    assert!(run_first(nqueens_body(3)).is_none());
    assert_eq!(run_all(nqueens_body(1)), vec![vec![0]]);
}

#[test]
fn test_run_n_takes_prefix_of_run_all() {
    let all = run_all(nqueens_body(6));
    let some = run_n(2, nqueens_body(6));

    assert_eq!(all.len(), 4);
    assert_eq!(some, all[..2].to_vec());
}

#[test]
fn test_subset_sum_matches_brute_force() {
    let items = vec![3, 34, 4, 12, 5, 2];
    let subsets = run_all(subset_sum_body(items.clone(), 9));

    assert_eq!(subsets.len(), count_subsets(&items, 9));
    assert_eq!(subsets[0], vec![3, 4, 2]);
    assert!(subsets.iter().all(|picked| picked.iter().sum::<i64>() == 9));
}

#[test]
fn test_graph_coloring() {
    let triangle = run_all(coloring_body(Graph::complete(3), 3));
    assert_eq!(triangle.len(), 6);
    assert!(triangle.iter().all(|colors| Graph::complete(3).is_proper(colors)));

    let square = run_all(coloring_body(Graph::cycle(4), 2));
    assert_eq!(square, vec![vec![0, 1, 0, 1], vec![1, 0, 1, 0]]);

    assert!(run_all(coloring_body(Graph::complete(4), 3)).is_empty());
}

#[test]
fn test_cryptarithm_unique_solution() {
    let solutions = run_all(to_go_out);

    assert_eq!(
        solutions,
        vec![Assignment {
            t: 2,
            o: 1,
            g: 8,
            u: 0,
        }]
    );
    assert!(solutions[0].is_solution());
}

#[test]
fn test_statistics_and_listener_agree() {
    let listener = Arc::new(CountingEventListener::new());
    let search = Search::new(nqueens_body(5)).with_listener(listener.clone());

    let (boards, stats) = search.run_all_with_statistics().unwrap();

    assert_eq!(boards.len(), 10);
    assert_eq!(stats.solution_count, 10);
    assert_eq!(stats.run_count as usize, listener.run_finished_count());
    assert_eq!(stats.failure_count as usize, listener.failed_run_count());
    assert_eq!(listener.solution_found_count(), 10);
    assert_eq!(stats.max_depth, 5);
}

#[test]
fn test_run_with_path_replays_a_board() {
    let outcome = run_with_path(nqueens_body(4), &[1, 3, 0, 2]).unwrap();

    assert!(outcome.is_success());
    assert_eq!(outcome.counts().as_slice(), &[4, 4, 4, 4]);
    assert_eq!(outcome.into_value(), Some(vec![1, 3, 0, 2]));
}

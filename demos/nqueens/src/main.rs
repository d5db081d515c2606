//! N-Queens Demo
//!
//! The N-Queens problem is a classic constraint satisfaction problem where
//! N queens must be placed on an N×N chessboard such that no two queens
//! threaten each other.
//!
//! This demo enumerates every solution with rewind's replay-based search:
//! the body places one queen per column with `choose` and rejects attacked
//! squares with `require`.
//!
//! Usage: `nqueens [N]` (default 8). Reads `rewind.toml` from the working
//! directory if present.

use rewind::prelude::*;
use rewind::SearchStatistics;
use rewind_test::nqueens::nqueens_body;

/// Prints the board to stdout.
fn print_board(rows: &[usize]) {
    let n = rows.len();
    println!("{}", "-".repeat(n * 2 + 1));
    for rank in 0..n {
        print!("|");
        for &row in rows {
            print!("{}", if row == rank { "Q|" } else { " |" });
        }
        println!();
    }
    println!("{}", "-".repeat(n * 2 + 1));
}

fn print_summary(n: usize, boards: &[Vec<usize>], stats: &SearchStatistics) {
    println!("\n{}-Queens: {} solutions", n, boards.len());
    println!(
        "Replayed the body {} times ({} failed runs, {} choice points).",
        stats.run_count, stats.failure_count, stats.choice_point_count
    );
    if stats.terminated_early {
        println!("Search was terminated early; the list above may be incomplete.");
    }
}

fn main() {
    rewind::console::init();

    let n: usize = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(8);
    let config = RewindConfig::load("rewind.toml").unwrap_or_default();

    println!("Problem: {} queens on a {}x{} board", n, n, n);
    println!("Each queen owns a column; the search picks its row.\n");

    let search = Search::new(nqueens_body(n)).with_config(config);
    let (boards, stats) = match search.run_all_with_statistics() {
        Ok(result) => result,
        Err(err) => {
            eprintln!("Search failed: {err}");
            std::process::exit(1);
        }
    };

    if let Some(first) = boards.first() {
        println!("\nFirst solution {:?}:", first);
        print_board(first);
    }
    if let Some(last) = boards.last().filter(|_| boards.len() > 1) {
        println!("\nLast solution {:?}:", last);
        print_board(last);
    }

    print_summary(n, &boards, &stats);

    // Replay a single board to show path steering.
    if let Some(first) = boards.first() {
        match run_with_path(nqueens_body(n), first) {
            Ok(outcome) => println!(
                "\nReplaying path {:?} again gives {:?}.",
                first,
                outcome.into_value()
            ),
            Err(err) => eprintln!("Replay failed: {err}"),
        }
    }
}

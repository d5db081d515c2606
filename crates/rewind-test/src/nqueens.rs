//! N-Queens search fixtures.
//!
//! Places one queen per column of an N×N board such that no two queens
//! share a row or a diagonal. A board is the row of each column's queen.

use rewind_search::SearchContext;

/// Returns true if a queen in the next column at `row` is not attacked by
/// any queen already in `rows`.
pub fn is_safe(rows: &[usize], row: usize) -> bool {
    let column = rows.len();
    rows.iter().enumerate().all(|(other_column, &other_row)| {
        other_row != row && other_row.abs_diff(row) != column - other_column
    })
}

/// Places `n` queens column by column, rejecting attacked squares as soon
/// as they are picked.
pub fn place_queens(ctx: &mut SearchContext<Vec<usize>>, n: usize) -> Vec<usize> {
    let mut rows = Vec::with_capacity(n);
    for _ in 0..n {
        let row = ctx.choose_index(n);
        ctx.require(is_safe(&rows, row));
        rows.push(row);
    }
    rows
}

/// Returns a search body placing `n` queens.
pub fn nqueens_body(
    n: usize,
) -> impl Fn(&mut SearchContext<Vec<usize>>) -> Vec<usize> + Send + Sync + 'static {
    move |ctx| place_queens(ctx, n)
}

/// Counts attacking pairs of queens on a board.
pub fn count_conflicts(rows: &[usize]) -> usize {
    let mut conflicts = 0;
    for (i, &a) in rows.iter().enumerate() {
        for (j, &b) in rows.iter().enumerate().skip(i + 1) {
            if a == b || a.abs_diff(b) == j - i {
                conflicts += 1;
            }
        }
    }
    conflicts
}

/// Renders a board with `Q` for queens and `.` for empty squares, one rank
/// per line.
pub fn render_board(rows: &[usize]) -> String {
    let n = rows.len();
    let mut out = String::with_capacity(n * (2 * n + 1));
    for rank in 0..n {
        for (column, &row) in rows.iter().enumerate() {
            if column > 0 {
                out.push(' ');
            }
            out.push(if row == rank { 'Q' } else { '.' });
        }
        out.push('\n');
    }
    out
}

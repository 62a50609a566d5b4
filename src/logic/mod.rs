//! 直線幾何 (line geometry shared by win detection, move generation and scoring)

use crate::core::{Board, Mark, Move};

/// The eight compass directions in scan order. Entries `2k` and `2k + 1` are
/// opposite each other.
pub const DIRECTIONS: [(i32, i32); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

/// Horizontal, vertical, main diagonal, anti-diagonal.
pub const AXES: [((i32, i32), (i32, i32)); 4] = [
    (DIRECTIONS[0], DIRECTIONS[1]),
    (DIRECTIONS[2], DIRECTIONS[3]),
    (DIRECTIONS[4], DIRECTIONS[5]),
    (DIRECTIONS[6], DIRECTIONS[7]),
];

/// Consecutive `mark` cells starting next to `from` along `dir`, at most `limit`.
/// Stops at the edge; off-board cells never count.
pub fn run_length(board: &Board, from: Move, dir: (i32, i32), mark: Mark, limit: usize) -> usize {
    let mut count = 0;
    let mut pos = from.offset(dir, 1);
    while count < limit && board.mark(pos).ok() == Some(mark) {
        count += 1;
        pos = pos.offset(dir, 1);
    }
    count
}

/// Length of the longest straight line of `mark` through `at`, capped at `cap`.
pub fn line_through(board: &Board, at: Move, mark: Mark, cap: usize) -> usize {
    AXES.iter()
        .map(|&(fwd, back)| {
            let ahead = run_length(board, at, fwd, mark, cap);
            let behind = run_length(board, at, back, mark, cap.saturating_sub(1 + ahead));
            1 + ahead + behind
        })
        .max()
        .unwrap_or(1)
        .min(cap)
}

/// The `len` cells after `from` along `dir`, written as board characters.
///
/// Cells beyond the edge are written as `wall`. The evaluator passes the
/// opponent's mark here: an edge blocks a line exactly like an enemy stone.
pub fn direction_string(board: &Board, from: Move, dir: (i32, i32), len: usize, wall: Mark) -> String {
    (1..=len as i32)
        .map(|step| board.mark_or(from.offset(dir, step), wall).to_char())
        .collect()
}

/// Every cell within Chebyshev `radius` of `center`, clipped to the board,
/// in row-major order.
pub fn neighbourhood(board: &Board, center: Move, radius: i32) -> impl Iterator<Item = Move> + '_ {
    (center.row - radius..=center.row + radius)
        .flat_map(move |row| (center.col - radius..=center.col + radius).map(move |col| Move::new(row, col)))
        .filter(move |&mv| board.is_on_board(mv))
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// 盤面座標 (0-indexed, row-major)
///
/// Coordinates are signed so that off-board probes can be expressed directly;
/// whether a move is on a given board is decided by `Board::is_on_board`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub row: i32,
    pub col: i32,
}

impl Move {
    pub fn new(row: i32, col: i32) -> Self {
        Move { row, col }
    }

    /// The cell `steps` cells away along `(dr, dc)`.
    pub fn offset(self, (dr, dc): (i32, i32), steps: i32) -> Move {
        Move::new(self.row + dr * steps, self.col + dc * steps)
    }

    /// Chebyshev (king-move) distance.
    pub fn distance(self, other: Move) -> i32 {
        (self.row - other.row).abs().max((self.col - other.col).abs())
    }
}

impl From<(i32, i32)> for Move {
    fn from((row, col): (i32, i32)) -> Self {
        Move::new(row, col)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

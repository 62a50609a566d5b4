//! Evaluator trait for board evaluation
//!
//! Defines a common interface for different evaluation strategies.

use crate::core::{Board, Mark};

/// Trait for evaluating board positions
pub trait Evaluator: Send + Sync {
    /// Evaluate the board from `mark`'s perspective
    ///
    /// Returns:
    ///   - `f64::INFINITY` if `mark` has won
    ///   - `f64::NEG_INFINITY` if the opponent has won
    ///   - otherwise a finite heuristic value, positive when `mark` is ahead
    fn score(&self, board: &Board, mark: Mark) -> f64;

    /// Get evaluator name for debugging
    fn name(&self) -> &str;
}

/// ±∞ for a decided board, `None` while the game is open.
pub fn terminal_score(board: &Board, mark: Mark) -> Option<f64> {
    if board.is_loser(mark) {
        Some(f64::NEG_INFINITY)
    } else if board.is_winner(mark) {
        Some(f64::INFINITY)
    } else {
        None
    }
}

/// No positional knowledge: every open position is worth 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullScore;

impl Evaluator for NullScore {
    fn score(&self, board: &Board, mark: Mark) -> f64 {
        terminal_score(board, mark).unwrap_or(0.0)
    }

    fn name(&self) -> &str {
        "NullScore"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Move;

    #[test]
    fn test_null_score_open_board_is_zero() {
        let board = Board::from_moves(
            4,
            4,
            3,
            &[(Mark::O, Move::new(0, 0)), (Mark::X, Move::new(1, 1))],
        )
        .unwrap();
        assert_eq!(NullScore.score(&board, Mark::O), 0.0);
        assert_eq!(NullScore.score(&board, Mark::X), 0.0);
        assert_eq!(NullScore.score(&Board::new(3, 3, 3).unwrap(), Mark::O), 0.0);
    }

    #[test]
    fn test_null_score_terminal_boards() {
        let board = Board::from_moves(
            3,
            3,
            3,
            &[
                (Mark::X, Move::new(0, 0)),
                (Mark::O, Move::new(2, 0)),
                (Mark::X, Move::new(1, 1)),
                (Mark::O, Move::new(2, 1)),
                (Mark::X, Move::new(2, 2)),
            ],
        )
        .unwrap();
        assert_eq!(NullScore.score(&board, Mark::X), f64::INFINITY);
        assert_eq!(NullScore.score(&board, Mark::O), f64::NEG_INFINITY);
    }
}

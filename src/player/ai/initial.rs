use super::candidates::surround_moves;
use crate::core::{Board, Move};
use rand::seq::SliceRandom;
use rand::RngCore;

/// Opening book consulted before search.
pub trait InitialMovePolicy: Send + Sync {
    /// A move to play without searching, or `None` to defer to search.
    fn initial_move(&self, board: &Board, move_index: usize, rng: &mut dyn RngCore) -> Option<Move>;

    fn name(&self) -> &str;
}

/// Always searches.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInitialMove;

impl InitialMovePolicy for NoInitialMove {
    fn initial_move(&self, _board: &Board, _move_index: usize, _rng: &mut dyn RngCore) -> Option<Move> {
        None
    }

    fn name(&self) -> &str {
        "NoInitialMove"
    }
}

/// Opens on a uniformly random cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomInitial;

impl InitialMovePolicy for RandomInitial {
    fn initial_move(&self, board: &Board, move_index: usize, rng: &mut dyn RngCore) -> Option<Move> {
        if move_index != 0 {
            return None;
        }
        board.legal_moves().choose(rng).copied()
    }

    fn name(&self) -> &str {
        "RandomInitial"
    }
}

/// Opens on a random empty cell within `radius` of the centre.
#[derive(Debug, Clone, Copy, Default)]
pub struct CenterInitial {
    pub radius: i32,
}

impl CenterInitial {
    pub fn new(radius: i32) -> Self {
        Self { radius }
    }
}

impl InitialMovePolicy for CenterInitial {
    fn initial_move(&self, board: &Board, move_index: usize, rng: &mut dyn RngCore) -> Option<Move> {
        if move_index != 0 {
            return None;
        }
        let center = Move::new((board.height() / 2) as i32, (board.width() / 2) as i32);
        surround_moves(board, center, self.radius).choose(rng).copied()
    }

    fn name(&self) -> &str {
        "CenterInitial"
    }
}

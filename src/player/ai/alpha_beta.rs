use super::search::{RootResult, SearchEngine, SearchSignal, SearchTimeout};
use crate::core::Board;
use log::trace;

impl SearchEngine<'_> {
    // --- Alpha-Beta Search Root ---
    // alpha is carried across root siblings; beta stays +inf at the root.
    pub(super) fn alphabeta(&mut self, board: &Board, depth: usize) -> Result<RootResult, SearchTimeout> {
        if self.out_of_time() {
            return Err(SearchTimeout);
        }

        let mut alpha = f64::NEG_INFINITY;
        let beta = f64::INFINITY;
        let mut best = RootResult::empty();

        for mv in self.root_moves(board) {
            let Ok(next_board) = board.with_move(mv, self.mark) else {
                continue;
            };
            match self.ab_min_value(&next_board, alpha, beta, depth - 1) {
                Ok(value) => {
                    trace!("depth {} move {} -> {}", depth, mv, value);
                    best.offer(mv, value);
                    alpha = alpha.max(value);
                }
                Err(SearchSignal::WinInAMove) => {
                    return Ok(RootResult {
                        best_move: Some(mv),
                        score: f64::INFINITY,
                    });
                }
                Err(SearchSignal::Timeout) => return Err(SearchTimeout),
            }
        }
        Ok(best)
    }

    fn ab_min_value(
        &mut self,
        board: &Board,
        alpha: f64,
        mut beta: f64,
        depth: usize,
    ) -> Result<f64, SearchSignal> {
        self.nodes += 1;
        if self.out_of_time() {
            return Err(SearchSignal::Timeout);
        }

        if board.is_winner(self.mark) {
            if self.is_root_child(depth) {
                return Err(SearchSignal::WinInAMove);
            }
            return Ok(f64::INFINITY);
        }
        if depth == 0 {
            return Ok(self.leaf_value(board));
        }

        let moves = self.generator.candidates(board, self.opponent);
        if moves.is_empty() {
            return Ok(self.leaf_value(board));
        }

        let mut value = f64::INFINITY;
        for mv in moves {
            let Ok(next_board) = board.with_move(mv, self.opponent) else {
                continue;
            };
            value = value.min(self.ab_max_value(&next_board, alpha, beta, depth - 1)?);
            if value <= alpha {
                return Ok(value); // Alpha cut
            }
            beta = beta.min(value);
        }
        Ok(value)
    }

    fn ab_max_value(
        &mut self,
        board: &Board,
        mut alpha: f64,
        beta: f64,
        depth: usize,
    ) -> Result<f64, SearchSignal> {
        self.nodes += 1;
        if self.out_of_time() {
            return Err(SearchSignal::Timeout);
        }

        if board.is_loser(self.mark) {
            return Ok(f64::NEG_INFINITY);
        }
        if depth == 0 {
            return Ok(self.leaf_value(board));
        }

        let moves = self.generator.candidates(board, self.mark);
        if moves.is_empty() {
            return Ok(self.leaf_value(board));
        }

        let mut value = f64::NEG_INFINITY;
        for mv in moves {
            let Ok(next_board) = board.with_move(mv, self.mark) else {
                continue;
            };
            value = value.max(self.ab_min_value(&next_board, alpha, beta, depth - 1)?);
            if value >= beta {
                return Ok(value); // Beta cut
            }
            alpha = alpha.max(value);
        }
        Ok(value)
    }
}

use super::search::{RootResult, SearchEngine, SearchSignal, SearchTimeout};
use crate::core::Board;
use log::trace;

impl SearchEngine<'_> {
    /// Plain depth-limited minimax from the root.
    pub(super) fn minimax(&mut self, board: &Board, depth: usize) -> Result<RootResult, SearchTimeout> {
        if self.out_of_time() {
            return Err(SearchTimeout);
        }

        let mut best = RootResult::empty();
        for mv in self.root_moves(board) {
            let Ok(next_board) = board.with_move(mv, self.mark) else {
                continue;
            };
            match self.min_value(&next_board, depth - 1) {
                Ok(value) => {
                    trace!("depth {} move {} -> {}", depth, mv, value);
                    best.offer(mv, value);
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

    /// 相手番: the opponent picks the reply worst for us.
    fn min_value(&mut self, board: &Board, depth: usize) -> Result<f64, SearchSignal> {
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
            value = value.min(self.max_value(&next_board, depth - 1)?);
        }
        Ok(value)
    }

    /// 自分番
    fn max_value(&mut self, board: &Board, depth: usize) -> Result<f64, SearchSignal> {
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
            value = value.max(self.min_value(&next_board, depth - 1)?);
        }
        Ok(value)
    }
}

//! Iterative deepening driver shared by Minimax and Alpha-Beta.
//!
//! The engine polls the caller's remaining-time accessor at every node and
//! unwinds with `SearchSignal::Timeout` once it drops below the threshold.
//! The signal is caught only at the depth-iteration boundary, where the last
//! completed depth's answer is kept.

use super::candidates::CandidateMoveGenerator;
use super::evaluator::Evaluator;
use crate::core::{Board, Mark, Move};
use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Minimax,
    AlphaBeta,
}

/// Non-local exits from the value functions. Neither is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SearchSignal {
    /// Remaining time fell below the threshold.
    Timeout,
    /// A root move wins on the spot; commit to it.
    WinInAMove,
}

/// A depth iteration that ran out of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct SearchTimeout;

/// Outcome of one completed depth-limited search from the root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootResult {
    pub best_move: Option<Move>,
    pub score: f64,
}

impl RootResult {
    pub(super) fn empty() -> Self {
        RootResult {
            best_move: None,
            score: f64::NEG_INFINITY,
        }
    }

    /// Keeps the first move seen and afterwards only strict improvements.
    pub(super) fn offer(&mut self, mv: Move, score: f64) {
        if self.best_move.is_none() || score > self.score {
            self.best_move = Some(mv);
            self.score = score;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    pub best_move: Option<Move>,
    pub score: f64,
    /// Deepest fully completed iteration (0 if none).
    pub depth: usize,
    pub nodes: u64,
    pub elapsed: Duration,
    pub timed_out: bool,
}

pub struct SearchEngine<'a> {
    pub(super) algorithm: Algorithm,
    pub(super) mark: Mark,
    pub(super) opponent: Mark,
    pub(super) evaluator: &'a dyn Evaluator,
    pub(super) generator: &'a dyn CandidateMoveGenerator,
    remaining: &'a dyn Fn() -> Duration,
    threshold: Duration,
    /// Depth of the iteration in progress.
    pub(super) current_depth: usize,
    pub(super) nodes: u64,
}

impl<'a> SearchEngine<'a> {
    pub fn new(
        algorithm: Algorithm,
        mark: Mark,
        evaluator: &'a dyn Evaluator,
        generator: &'a dyn CandidateMoveGenerator,
        remaining: &'a dyn Fn() -> Duration,
        threshold: Duration,
    ) -> Self {
        Self {
            algorithm,
            mark,
            opponent: mark.opponent(),
            evaluator,
            generator,
            remaining,
            threshold,
            current_depth: 0,
            nodes: 0,
        }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub(super) fn out_of_time(&self) -> bool {
        (self.remaining)() < self.threshold
    }

    /// Candidate moves at the root, or every legal move if the generator
    /// has nothing to offer.
    pub(super) fn root_moves(&self, board: &Board) -> Vec<Move> {
        let moves = self.generator.candidates(board, self.mark);
        if moves.is_empty() {
            board.legal_moves()
        } else {
            moves
        }
    }

    /// Leaf value when the depth budget is spent or no candidates remain.
    pub(super) fn leaf_value(&self, board: &Board) -> f64 {
        self.evaluator.score(board, self.mark)
    }

    /// True when `depth` is the depth handed to the root's children.
    pub(super) fn is_root_child(&self, depth: usize) -> bool {
        depth + 1 == self.current_depth
    }

    fn search_depth(&mut self, board: &Board, depth: usize) -> Result<RootResult, SearchTimeout> {
        self.current_depth = depth;
        match self.algorithm {
            Algorithm::Minimax => self.minimax(board, depth),
            Algorithm::AlphaBeta => self.alphabeta(board, depth),
        }
    }

    /// One depth-limited search; `None` if it timed out.
    pub fn search_fixed_depth(&mut self, board: &Board, depth: usize) -> Option<RootResult> {
        self.search_depth(board, depth.max(1)).ok()
    }

    /// Searches depth 1, 2, ... until time runs out, the depth exceeds the
    /// number of empty cells (or `max_depth`), or a win is secured.
    pub fn iterative_deepening(
        &mut self,
        board: &Board,
        max_depth: Option<usize>,
        rng: &mut dyn RngCore,
    ) -> SearchReport {
        let start = Instant::now();
        self.nodes = 0;
        let limit = board.legal_move_count().min(max_depth.unwrap_or(usize::MAX));

        let mut completed: Option<(RootResult, usize)> = None;
        let mut timed_out = false;

        for depth in 1..=limit {
            let iteration = Instant::now();
            match self.search_depth(board, depth) {
                Ok(result) => {
                    debug!(
                        "depth {} done in {:.3}s: best {:?} score {} ({} nodes)",
                        depth,
                        iteration.elapsed().as_secs_f64(),
                        result.best_move,
                        result.score,
                        self.nodes
                    );
                    let won = result.score == f64::INFINITY;
                    completed = Some((result, depth));
                    if won {
                        break;
                    }
                }
                Err(SearchTimeout) => {
                    warn!("search timeout during depth {}", depth);
                    timed_out = true;
                    break;
                }
            }
        }

        let (result, depth) = completed.unwrap_or((RootResult::empty(), 0));
        let best_move = match result.best_move {
            Some(mv) => Some(mv),
            None => {
                let fallback = board.legal_moves().choose(rng).copied();
                if fallback.is_some() {
                    warn!("no search result; playing a random legal move");
                }
                fallback
            }
        };

        SearchReport {
            best_move,
            score: result.score,
            depth,
            nodes: self.nodes,
            elapsed: start.elapsed(),
            timed_out,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::ai::candidates::AllLegalMoves;
    use crate::player::ai::evaluator::NullScore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_offer_keeps_first_maximum() {
        let mut result = RootResult::empty();
        result.offer(Move::new(0, 0), f64::NEG_INFINITY);
        assert_eq!(result.best_move, Some(Move::new(0, 0)));
        result.offer(Move::new(0, 1), 2.0);
        result.offer(Move::new(0, 2), 2.0);
        assert_eq!(result.best_move, Some(Move::new(0, 1)));
        assert_eq!(result.score, 2.0);
    }

    #[test]
    fn test_timeout_before_depth_one_falls_back_to_random_legal_move() {
        let board = Board::new(4, 4, 3).unwrap().with_move(Move::new(0, 0), Mark::O).unwrap();
        let no_time = || Duration::ZERO;
        let mut engine = SearchEngine::new(
            Algorithm::AlphaBeta,
            Mark::X,
            &NullScore,
            &AllLegalMoves,
            &no_time,
            Duration::from_millis(10),
        );
        let mut rng = StdRng::seed_from_u64(3);
        let report = engine.iterative_deepening(&board, None, &mut rng);

        assert!(report.timed_out);
        assert_eq!(report.depth, 0);
        let mv = report.best_move.unwrap();
        assert!(board.is_empty_at(mv));
    }

    #[test]
    fn test_full_board_has_no_move() {
        let board = crate::core::setup_from_strings(&["OX", "XO"], 2).unwrap();
        let plenty = || Duration::from_secs(60);
        let mut engine = SearchEngine::new(
            Algorithm::Minimax,
            Mark::O,
            &NullScore,
            &AllLegalMoves,
            &plenty,
            Duration::from_millis(10),
        );
        let mut rng = StdRng::seed_from_u64(3);
        let report = engine.iterative_deepening(&board, None, &mut rng);
        assert_eq!(report.best_move, None);
        assert!(!report.timed_out);
    }

    #[test]
    fn test_depth_is_bounded_by_empty_cells() {
        let board = crate::core::setup_from_strings(&["OXO", "XOX", "X--"], 3).unwrap();
        let plenty = || Duration::from_secs(60);
        let mut engine = SearchEngine::new(
            Algorithm::Minimax,
            Mark::O,
            &NullScore,
            &AllLegalMoves,
            &plenty,
            Duration::from_millis(10),
        );
        let mut rng = StdRng::seed_from_u64(3);
        let report = engine.iterative_deepening(&board, Some(10), &mut rng);
        assert!(report.depth <= 2);
        assert!(report.best_move.is_some());
    }
}

//! 探索エージェント
//!
//! Binds an evaluator, a candidate generator and an opening policy to the
//! search engine and answers move requests through the `Agent` trait.

use super::candidates::{CandidateMoveGenerator, SurroundStar};
use super::evaluator::Evaluator;
use super::initial::{InitialMovePolicy, NoInitialMove};
use super::search::{Algorithm, SearchEngine, SearchReport};
use crate::core::{Board, Mark, Move};
use crate::player::Agent;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_THRESHOLD: Duration = Duration::from_millis(10);

pub struct SearchAgent {
    name: String,
    mark: Mark,
    algorithm: Algorithm,
    evaluator: Box<dyn Evaluator>,
    generator: Box<dyn CandidateMoveGenerator>,
    initial: Box<dyn InitialMovePolicy>,
    timeout_threshold: Duration,
    max_depth: Option<usize>,
    rng: StdRng,
    last_report: Option<SearchReport>,
}

impl SearchAgent {
    /// Searches with `consider_both` candidates and no opening book.
    pub fn new(name: &str, algorithm: Algorithm, evaluator: Box<dyn Evaluator>) -> Self {
        SearchAgent {
            name: name.to_string(),
            mark: Mark::Empty,
            algorithm,
            evaluator,
            generator: Box::new(SurroundStar::consider_both()),
            initial: Box::new(NoInitialMove),
            timeout_threshold: DEFAULT_TIMEOUT_THRESHOLD,
            max_depth: None,
            rng: StdRng::from_entropy(),
            last_report: None,
        }
    }

    pub fn with_candidates(mut self, generator: Box<dyn CandidateMoveGenerator>) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_initial(mut self, initial: Box<dyn InitialMovePolicy>) -> Self {
        self.initial = initial;
        self
    }

    pub fn with_timeout_threshold(mut self, threshold: Duration) -> Self {
        self.timeout_threshold = threshold;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Report of the most recent search, if the last move was searched.
    pub fn last_report(&self) -> Option<&SearchReport> {
        self.last_report.as_ref()
    }

    /// Runs iterative deepening for `mark` without consulting the opening
    /// policy.
    pub fn search(&mut self, board: &Board, mark: Mark, remaining: &dyn Fn() -> Duration) -> SearchReport {
        let mut engine = SearchEngine::new(
            self.algorithm,
            mark,
            self.evaluator.as_ref(),
            self.generator.as_ref(),
            remaining,
            self.timeout_threshold,
        );
        engine.iterative_deepening(board, self.max_depth, &mut self.rng)
    }

    fn acting_mark(&self, board: &Board) -> Mark {
        if self.mark.is_player() {
            self.mark
        } else {
            let mark = board.next_mark();
            warn!("{} has no mark assigned; playing as {}", self.name, mark);
            mark
        }
    }
}

impl Agent for SearchAgent {
    fn assign_mark(&mut self, mark: Mark) {
        self.mark = mark;
    }

    fn mark(&self) -> Mark {
        self.mark
    }

    fn choose_move(
        &mut self,
        board: &Board,
        remaining: &dyn Fn() -> Duration,
        move_index: usize,
    ) -> Option<Move> {
        self.last_report = None;
        if board.is_full() {
            return None;
        }

        if let Some(mv) = self.initial.initial_move(board, move_index, &mut self.rng) {
            debug!("{} opens with {} ({})", self.name, mv, self.initial.name());
            return Some(mv);
        }

        let mark = self.acting_mark(board);
        let report = self.search(board, mark, remaining);
        info!(
            "{} ({}) -> {:?} score {} depth {} nodes {} in {:.3}s{}",
            self.name,
            mark,
            report.best_move,
            report.score,
            report.depth,
            report.nodes,
            report.elapsed.as_secs_f64(),
            if report.timed_out { " (timeout)" } else { "" }
        );
        let best = report.best_move;
        self.last_report = Some(report);
        best
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::setup_from_strings;
    use crate::player::ai::candidates::AllLegalMoves;
    use crate::player::ai::evaluator::NullScore;
    use crate::player::ai::initial::CenterInitial;

    fn plenty() -> Duration {
        Duration::from_secs(60)
    }

    #[test]
    fn test_opening_policy_skips_search() {
        let mut agent = SearchAgent::new("opener", Algorithm::AlphaBeta, Box::new(NullScore))
            .with_initial(Box::new(CenterInitial::new(0)))
            .with_seed(5);
        agent.assign_mark(Mark::O);
        let board = Board::new(7, 7, 4).unwrap();
        assert_eq!(agent.choose_move(&board, &plenty, 0), Some(Move::new(3, 3)));
        assert!(agent.last_report().is_none());
    }

    #[test]
    fn test_agent_takes_immediate_win() {
        let board = setup_from_strings(&["OO--", "XX--", "----", "----"], 3).unwrap();
        let mut agent = SearchAgent::new("ab", Algorithm::AlphaBeta, Box::new(NullScore))
            .with_candidates(Box::new(AllLegalMoves))
            .with_max_depth(Some(3))
            .with_seed(1);
        agent.assign_mark(Mark::O);

        let mv = agent.choose_move(&board, &plenty, 4);
        assert_eq!(mv, Some(Move::new(0, 2)));
        let report = agent.last_report().unwrap();
        assert_eq!(report.score, f64::INFINITY);
        assert_eq!(report.depth, 1);
    }

    #[test]
    fn test_unassigned_mark_uses_side_to_move() {
        let board = Board::from_moves(
            3,
            3,
            3,
            &[
                (Mark::O, Move::new(0, 0)),
                (Mark::X, Move::new(1, 0)),
                (Mark::O, Move::new(0, 1)),
                (Mark::X, Move::new(1, 1)),
            ],
        )
        .unwrap();
        let mut agent = SearchAgent::new("anon", Algorithm::Minimax, Box::new(NullScore))
            .with_candidates(Box::new(AllLegalMoves))
            .with_seed(2);
        assert_eq!(agent.choose_move(&board, &plenty, 4), Some(Move::new(0, 2)));
        assert_eq!(agent.last_report().unwrap().score, f64::INFINITY);
    }

    #[test]
    fn test_full_board_returns_none() {
        let board = setup_from_strings(&["OX", "XO"], 2).unwrap();
        let mut agent = SearchAgent::new("full", Algorithm::AlphaBeta, Box::new(NullScore));
        agent.assign_mark(Mark::O);
        assert_eq!(agent.choose_move(&board, &plenty, 4), None);
    }
}

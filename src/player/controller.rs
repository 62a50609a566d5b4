use crate::core::{Board, Mark, Move};
use std::time::Duration;

/// プレイヤー操作のtrait
///
/// Anything that can supply a move for a board: search agents, random
/// baselines, or move sources living outside this crate.
pub trait Agent {
    fn assign_mark(&mut self, mark: Mark);

    fn mark(&self) -> Mark;

    /// A legal move for `board`, or `None` only when no legal move exists.
    /// `remaining` reports the time left for this turn; `move_index` counts
    /// the moves already made in the game.
    fn choose_move(
        &mut self,
        board: &Board,
        remaining: &dyn Fn() -> Duration,
        move_index: usize,
    ) -> Option<Move>;

    fn name(&self) -> &str;
}

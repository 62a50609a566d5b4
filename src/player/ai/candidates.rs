//! Candidate move generation
//!
//! Restricts the moves searched at each node to cells near the action.
//! The "surround + star" family looks at the cells close to a mark's last
//! stone and then extends along the eight lines through it.

use crate::core::{Board, Mark, Move};
use crate::logic::{neighbourhood, DIRECTIONS};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub trait CandidateMoveGenerator: Send + Sync {
    /// Moves worth searching for `mark`, best guesses first. Never contains
    /// an occupied cell. May be empty when no stones constrain the search.
    fn candidates(&self, board: &Board, mark: Mark) -> Vec<Move>;

    fn name(&self) -> &str;
}

/// Every empty cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllLegalMoves;

impl CandidateMoveGenerator for AllLegalMoves {
    fn candidates(&self, board: &Board, _mark: Mark) -> Vec<Move> {
        board.legal_moves()
    }

    fn name(&self) -> &str {
        "AllLegalMoves"
    }
}

/// Radii used while the board holds fewer than `until_ply` stones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadiusStage {
    pub until_ply: usize,
    pub surround: i32,
    pub star: i32,
}

pub fn default_schedule() -> Vec<RadiusStage> {
    vec![
        RadiusStage { until_ply: 4, surround: 1, star: 2 },
        RadiusStage { until_ply: 12, surround: 2, star: 3 },
        RadiusStage { until_ply: usize::MAX, surround: 2, star: 5 },
    ]
}

/// `(surround, star)` radii for a board with `ply` stones. The last stage
/// covers everything past the schedule.
pub fn radii_for(schedule: &[RadiusStage], ply: usize) -> (i32, i32) {
    schedule
        .iter()
        .find(|stage| ply < stage.until_ply)
        .or(schedule.last())
        .map_or((2, 5), |stage| (stage.surround, stage.star))
}

/// Empty cells within Chebyshev `radius` of `anchor`, nearest first, ties in
/// row-major order.
pub fn surround_moves(board: &Board, anchor: Move, radius: i32) -> Vec<Move> {
    let mut moves: Vec<Move> = neighbourhood(board, anchor, radius)
        .filter(|&mv| board.is_empty_at(mv))
        .collect();
    moves.sort_by_key(|&mv| (anchor.distance(mv), mv.row, mv.col));
    moves
}

/// Walks up to `radius` cells from `anchor` along each direction, stepping
/// over `mark`'s own stones and stopping at the opponent or the edge.
/// Empty cells not yet collected are appended.
fn star_moves(
    board: &Board,
    anchor: Move,
    mark: Mark,
    radius: i32,
    moves: &mut Vec<Move>,
    seen: &mut HashSet<Move>,
) {
    let opponent = mark.opponent();
    for &dir in DIRECTIONS.iter() {
        for step in 1..=radius {
            let pos = anchor.offset(dir, step);
            match board.mark(pos) {
                Err(_) => break,
                Ok(found) if found == opponent => break,
                Ok(Mark::Empty) => {
                    if seen.insert(pos) {
                        moves.push(pos);
                    }
                }
                Ok(_) => {}
            }
        }
    }
}

fn extend_unique(moves: &mut Vec<Move>, seen: &mut HashSet<Move>, extra: impl IntoIterator<Item = Move>) {
    for mv in extra {
        if seen.insert(mv) {
            moves.push(mv);
        }
    }
}

#[derive(Debug, Clone)]
pub struct SurroundStar {
    name: &'static str,
    consider_opponent: bool,
    include_frontier: bool,
    center_plies: usize,
    center_radius: i32,
    schedule: Vec<RadiusStage>,
}

impl SurroundStar {
    /// Only the acting mark's own last stone.
    pub fn consider_self() -> Self {
        Self {
            name: "SurroundStar(self)",
            consider_opponent: false,
            include_frontier: false,
            center_plies: 0,
            center_radius: 0,
            schedule: default_schedule(),
        }
    }

    /// Both marks' last stones.
    pub fn consider_both() -> Self {
        Self {
            name: "SurroundStar(both)",
            consider_opponent: true,
            ..Self::consider_self()
        }
    }

    /// Both last stones, the frontier, and the centre during the opening.
    pub fn advanced() -> Self {
        Self {
            name: "SurroundStar(advanced)",
            consider_opponent: true,
            include_frontier: true,
            center_plies: 2,
            center_radius: 1,
            schedule: default_schedule(),
        }
    }

    pub fn with_schedule(mut self, schedule: Vec<RadiusStage>) -> Self {
        if !schedule.is_empty() {
            self.schedule = schedule;
        }
        self
    }

    pub fn with_center(mut self, plies: usize, radius: i32) -> Self {
        self.center_plies = plies;
        self.center_radius = radius;
        self
    }

    fn collect_around(
        &self,
        board: &Board,
        mark: Mark,
        radii: (i32, i32),
        moves: &mut Vec<Move>,
        seen: &mut HashSet<Move>,
    ) {
        let Some(anchor) = board.last_move(mark) else {
            return;
        };
        extend_unique(moves, seen, surround_moves(board, anchor, radii.0));
        star_moves(board, anchor, mark, radii.1, moves, seen);
    }
}

impl CandidateMoveGenerator for SurroundStar {
    fn candidates(&self, board: &Board, mark: Mark) -> Vec<Move> {
        let radii = radii_for(&self.schedule, board.move_count());
        let mut moves = Vec::new();
        let mut seen = HashSet::new();

        self.collect_around(board, mark, radii, &mut moves, &mut seen);
        if self.consider_opponent {
            self.collect_around(board, mark.opponent(), radii, &mut moves, &mut seen);
        }
        if self.include_frontier {
            extend_unique(&mut moves, &mut seen, board.frontier_moves());
        }
        if board.move_count() < self.center_plies {
            let center = Move::new((board.height() / 2) as i32, (board.width() / 2) as i32);
            extend_unique(&mut moves, &mut seen, surround_moves(board, center, self.center_radius));
        }
        moves
    }

    fn name(&self) -> &str {
        self.name
    }
}

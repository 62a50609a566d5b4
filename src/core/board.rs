use super::r#move::Move;
use super::types::Mark;
use crate::logic::{line_through, neighbourhood};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// Radius of the maintained frontier around occupied cells.
pub const FRONTIER_RADIUS: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("illegal move {mv}: {reason}")]
    IllegalMove { mv: Move, reason: &'static str },
    #[error("coordinate {0} is outside the board")]
    IndexOutOfRange(Move),
    #[error("invalid board {width}x{height} with m = {m}")]
    InvalidDimensions { width: usize, height: usize, m: usize },
    #[error("cannot parse board: {0}")]
    Parse(String),
}

/// 盤面
///
/// A `Board` is never changed after construction: `with_move` returns a new
/// value and leaves `self` untouched. Every value owns its grid, history and
/// frontier.
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    m: usize,
    cells: Vec<Mark>,
    move_count: usize,
    /// 各プレイヤーの最終手
    last_moves: [Option<Move>; 2],
    history: Vec<(Mark, Move)>,
    frontier: BTreeSet<Move>,
}

impl Board {
    /// An empty `width` x `height` board where `m` in a row wins.
    pub fn new(width: usize, height: usize, m: usize) -> Result<Self, BoardError> {
        if width == 0 || height == 0 || m == 0 || m > width.max(height) {
            return Err(BoardError::InvalidDimensions { width, height, m });
        }
        Ok(Board {
            width,
            height,
            m,
            cells: vec![Mark::Empty; width * height],
            move_count: 0,
            last_moves: [None, None],
            history: Vec::new(),
            frontier: BTreeSet::new(),
        })
    }

    /// Replays `moves` in order on an empty board.
    pub fn from_moves(
        width: usize,
        height: usize,
        m: usize,
        moves: &[(Mark, Move)],
    ) -> Result<Self, BoardError> {
        moves
            .iter()
            .try_fold(Board::new(width, height, m)?, |board, &(mark, mv)| {
                board.with_move(mv, mark)
            })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Stones in a row needed to win.
    pub fn m(&self) -> usize {
        self.m
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn is_on_board(&self, mv: Move) -> bool {
        mv.row >= 0 && mv.col >= 0 && (mv.row as usize) < self.height && (mv.col as usize) < self.width
    }

    fn index(&self, mv: Move) -> Option<usize> {
        if self.is_on_board(mv) {
            Some(mv.row as usize * self.width + mv.col as usize)
        } else {
            None
        }
    }

    pub fn mark(&self, mv: Move) -> Result<Mark, BoardError> {
        self.index(mv)
            .map(|idx| self.cells[idx])
            .ok_or(BoardError::IndexOutOfRange(mv))
    }

    /// Like `mark`, but off-board cells read as `outside`.
    pub fn mark_or(&self, mv: Move, outside: Mark) -> Mark {
        self.index(mv).map_or(outside, |idx| self.cells[idx])
    }

    pub fn is_empty_at(&self, mv: Move) -> bool {
        self.index(mv).is_some_and(|idx| self.cells[idx] == Mark::Empty)
    }

    /// All empty cells in row-major order.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &mark)| mark == Mark::Empty)
            .map(|(idx, _)| Move::new((idx / self.width) as i32, (idx % self.width) as i32))
            .collect()
    }

    pub fn legal_move_count(&self) -> usize {
        self.cells.len() - self.move_count
    }

    pub fn is_full(&self) -> bool {
        self.legal_move_count() == 0
    }

    pub fn last_move(&self, mark: Mark) -> Option<Move> {
        mark.player_index().and_then(|i| self.last_moves[i])
    }

    /// Moves made so far, oldest first.
    pub fn history(&self) -> &[(Mark, Move)] {
        &self.history
    }

    /// The mark due to move if players alternate starting with `O`.
    pub fn next_mark(&self) -> Mark {
        match self.history.last() {
            Some(&(mark, _)) => mark.opponent(),
            None => Mark::O,
        }
    }

    /// Empty cells within `FRONTIER_RADIUS` of any stone, in row-major order.
    pub fn frontier_moves(&self) -> Vec<Move> {
        self.frontier.iter().copied().collect()
    }

    /// `m` in a row through `mark`'s most recent move.
    pub fn is_winner(&self, mark: Mark) -> bool {
        match self.last_move(mark) {
            Some(anchor) => line_through(self, anchor, mark, self.m) >= self.m,
            None => false,
        }
    }

    pub fn is_loser(&self, mark: Mark) -> bool {
        self.is_winner(mark.opponent())
    }

    /// Either player has completed a line.
    pub fn is_terminal(&self) -> bool {
        Mark::PLAYERS.iter().any(|&mark| self.is_winner(mark)) || self.is_full()
    }

    /// 移動適用: the board after `mark` plays `mv`. Turn order is not checked.
    pub fn with_move(&self, mv: Move, mark: Mark) -> Result<Board, BoardError> {
        let Some(slot) = mark.player_index() else {
            return Err(BoardError::IllegalMove { mv, reason: "no player mark given" });
        };
        let Some(idx) = self.index(mv) else {
            return Err(BoardError::IllegalMove { mv, reason: "off the board" });
        };
        if self.cells[idx] != Mark::Empty {
            return Err(BoardError::IllegalMove { mv, reason: "cell is occupied" });
        }

        let mut next = self.clone();
        next.cells[idx] = mark;
        next.move_count += 1;
        next.last_moves[slot] = Some(mv);
        next.history.push((mark, mv));

        next.frontier.remove(&mv);
        let around: Vec<Move> = neighbourhood(&next, mv, FRONTIER_RADIUS)
            .filter(|&cell| next.is_empty_at(cell))
            .collect();
        next.frontier.extend(around);

        Ok(next)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            let line: String = row.iter().map(|mark| mark.to_char()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

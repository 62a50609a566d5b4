use serde::{Deserialize, Serialize};
use std::fmt;

/// 盤上のマーク
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mark {
    #[default]
    Empty,
    O, // 先手
    X, // 後手
}

impl Mark {
    /// Both player marks, first mover first.
    pub const PLAYERS: [Mark; 2] = [Mark::O, Mark::X];

    pub fn opponent(self) -> Mark {
        match self {
            Mark::O => Mark::X,
            Mark::X => Mark::O,
            Mark::Empty => Mark::Empty,
        }
    }

    pub fn is_player(self) -> bool {
        self != Mark::Empty
    }

    pub fn to_char(self) -> char {
        match self {
            Mark::Empty => '-',
            Mark::O => 'O',
            Mark::X => 'X',
        }
    }

    pub fn from_char(c: char) -> Option<Mark> {
        match c {
            '-' | '.' => Some(Mark::Empty),
            'O' | 'o' => Some(Mark::O),
            'X' | 'x' => Some(Mark::X),
            _ => None,
        }
    }

    /// Slot in per-player arrays (`O` = 0, `X` = 1).
    pub(crate) fn player_index(self) -> Option<usize> {
        match self {
            Mark::O => Some(0),
            Mark::X => Some(1),
            Mark::Empty => None,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

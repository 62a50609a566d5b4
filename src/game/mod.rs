pub mod replay;

use crate::core::{Board, Mark, Move};
use crate::player::Agent;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

pub use replay::replay_boards;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub m: usize,
    /// 1手あたりの持ち時間
    pub time_limit_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: 12,
            height: 12,
            m: 6,
            time_limit_ms: 30_000,
        }
    }
}

impl GameConfig {
    pub fn time_limit(&self) -> Duration {
        Duration::from_millis(self.time_limit_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    /// `m` in a row.
    Line,
    /// Board filled without a line.
    Draw,
    /// The loser returned an illegal move or no move while cells remained.
    Forfeit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub width: usize,
    pub height: usize,
    pub m: usize,
    pub player_o: String,
    pub player_x: String,
    pub moves: Vec<(Mark, Move)>,
    pub winner: Option<Mark>,
    pub outcome: GameOutcome,
}

#[derive(Debug, Clone)]
pub struct GameResult {
    pub winner: Option<Mark>,
    pub outcome: GameOutcome,
    pub moves: usize,
    pub board: Board,
    pub record: GameRecord,
}

/// Plays one game, `agent_o` moving first. Each turn gets a fresh
/// `time_limit_ms` budget.
pub fn play_game(
    config: &GameConfig,
    agent_o: &mut dyn Agent,
    agent_x: &mut dyn Agent,
) -> anyhow::Result<GameResult> {
    let mut board = Board::new(config.width, config.height, config.m)?;
    agent_o.assign_mark(Mark::O);
    agent_x.assign_mark(Mark::X);
    let names = [agent_o.name().to_string(), agent_x.name().to_string()];

    let mut current = Mark::O;
    let (winner, outcome) = loop {
        if board.is_full() {
            break (None, GameOutcome::Draw);
        }

        let agent: &mut dyn Agent = match current {
            Mark::X => &mut *agent_x,
            _ => &mut *agent_o,
        };

        let deadline = Instant::now() + config.time_limit();
        let remaining = move || deadline.saturating_duration_since(Instant::now());
        let chosen = agent.choose_move(&board, &remaining, board.move_count());

        let Some(mv) = chosen else {
            error!("{} ({}) returned no move with {} cells left", agent.name(), current, board.legal_move_count());
            break (Some(current.opponent()), GameOutcome::Forfeit);
        };
        match board.with_move(mv, current) {
            Ok(next) => board = next,
            Err(e) => {
                error!("{} ({}) played an illegal move: {}", agent.name(), current, e);
                break (Some(current.opponent()), GameOutcome::Forfeit);
            }
        }

        if board.is_winner(current) {
            break (Some(current), GameOutcome::Line);
        }
        current = current.opponent();
    };

    match winner {
        Some(mark) => info!(
            "{} ({}) wins by {:?} after {} moves",
            names[if mark == Mark::O { 0 } else { 1 }],
            mark,
            outcome,
            board.move_count()
        ),
        None => info!("draw after {} moves", board.move_count()),
    }

    let [player_o, player_x] = names;
    let record = GameRecord {
        width: config.width,
        height: config.height,
        m: config.m,
        player_o,
        player_x,
        moves: board.history().to_vec(),
        winner,
        outcome,
    };

    Ok(GameResult {
        winner,
        outcome,
        moves: board.move_count(),
        board,
        record,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::RandomAI;

    /// Plays a fixed script, ignoring the board.
    struct Scripted {
        name: String,
        mark: Mark,
        moves: Vec<Option<Move>>,
    }

    impl Scripted {
        fn new(name: &str, moves: Vec<Option<Move>>) -> Self {
            Scripted {
                name: name.to_string(),
                mark: Mark::Empty,
                moves,
            }
        }
    }

    impl Agent for Scripted {
        fn assign_mark(&mut self, mark: Mark) {
            self.mark = mark;
        }

        fn mark(&self) -> Mark {
            self.mark
        }

        fn choose_move(&mut self, _board: &Board, remaining: &dyn Fn() -> Duration, _move_index: usize) -> Option<Move> {
            assert!(remaining() > Duration::ZERO);
            if self.moves.is_empty() {
                None
            } else {
                self.moves.remove(0)
            }
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    fn small() -> GameConfig {
        GameConfig {
            width: 3,
            height: 3,
            m: 3,
            time_limit_ms: 1_000,
        }
    }

    #[test]
    fn test_line_wins() {
        let mut o = Scripted::new("o", vec![Some(Move::new(0, 0)), Some(Move::new(1, 1)), Some(Move::new(2, 2))]);
        let mut x = Scripted::new("x", vec![Some(Move::new(0, 1)), Some(Move::new(0, 2))]);
        let result = play_game(&small(), &mut o, &mut x).unwrap();

        assert_eq!(o.mark(), Mark::O);
        assert_eq!(x.mark(), Mark::X);
        assert_eq!(result.winner, Some(Mark::O));
        assert_eq!(result.outcome, GameOutcome::Line);
        assert_eq!(result.moves, 5);
        assert_eq!(result.record.moves.len(), 5);
        assert_eq!(result.record.moves[1], (Mark::X, Move::new(0, 1)));
    }

    #[test]
    fn test_illegal_move_forfeits() {
        let mut o = Scripted::new("o", vec![Some(Move::new(1, 1))]);
        let mut x = Scripted::new("x", vec![Some(Move::new(1, 1))]);
        let result = play_game(&small(), &mut o, &mut x).unwrap();
        assert_eq!(result.winner, Some(Mark::O));
        assert_eq!(result.outcome, GameOutcome::Forfeit);
        assert_eq!(result.moves, 1);
    }

    #[test]
    fn test_no_move_forfeits() {
        let mut o = Scripted::new("o", vec![None]);
        let mut x = Scripted::new("x", vec![]);
        let result = play_game(&small(), &mut o, &mut x).unwrap();
        assert_eq!(result.winner, Some(Mark::X));
        assert_eq!(result.outcome, GameOutcome::Forfeit);
    }

    #[test]
    fn test_full_board_is_a_draw() {
        // O X O / O X X / X O O
        let mut o = Scripted::new(
            "o",
            [(0, 0), (0, 2), (1, 0), (2, 1), (2, 2)].iter().map(|&p| Some(Move::from(p))).collect(),
        );
        let mut x = Scripted::new(
            "x",
            [(0, 1), (1, 1), (1, 2), (2, 0)].iter().map(|&p| Some(Move::from(p))).collect(),
        );
        let result = play_game(&small(), &mut o, &mut x).unwrap();
        assert_eq!(result.winner, None);
        assert_eq!(result.outcome, GameOutcome::Draw);
        assert!(result.board.is_full());
    }

    #[test]
    fn test_random_agents_finish() {
        let config = GameConfig {
            width: 5,
            height: 5,
            m: 4,
            time_limit_ms: 1_000,
        };
        let mut o = RandomAI::new("r1").with_seed(1);
        let mut x = RandomAI::new("r2").with_seed(2);
        let result = play_game(&config, &mut o, &mut x).unwrap();
        assert_ne!(result.outcome, GameOutcome::Forfeit);
        assert_eq!(result.record.player_o, "r1");
        assert_eq!(result.moves, result.record.moves.len());
    }

    #[test]
    fn test_invalid_dimensions_are_an_error() {
        let config = GameConfig {
            width: 3,
            height: 3,
            m: 4,
            time_limit_ms: 10,
        };
        let mut o = RandomAI::new("a");
        let mut x = RandomAI::new("b");
        assert!(play_game(&config, &mut o, &mut x).is_err());
    }
}

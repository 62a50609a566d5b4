//! Search-based agent for m-in-a-row games on arbitrary rectangular boards.

pub mod core;
pub mod game;
pub mod logic;
pub mod player;
pub mod selfplay;

mod search_tests;

pub use crate::core::{Board, BoardError, Mark, Move};
pub use crate::game::{play_game, GameConfig, GameOutcome, GameRecord, GameResult};
pub use crate::player::ai::{Algorithm, AgentConfig, SearchAgent, SearchReport};
pub use crate::player::{Agent, RandomAI};

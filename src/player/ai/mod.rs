pub mod agent;
mod alpha_beta;
pub mod candidates;
pub mod config;
pub mod eval;
pub mod evaluator;
pub mod initial;
mod minimax;
pub mod random;
pub mod search;
pub mod tables;

pub use agent::SearchAgent;
pub use candidates::{AllLegalMoves, CandidateMoveGenerator, RadiusStage, SurroundStar};
pub use config::AgentConfig;
pub use eval::PatternEvaluator;
pub use evaluator::{Evaluator, NullScore};
pub use initial::{CenterInitial, InitialMovePolicy, NoInitialMove, RandomInitial};
pub use random::RandomAI;
pub use search::{Algorithm, RootResult, SearchEngine, SearchReport};
pub use tables::{ScoreTables, TableError};

pub mod board;
pub mod r#move;
pub mod setup;
pub mod types;

pub use board::{Board, BoardError, FRONTIER_RADIUS};
pub use r#move::Move;
pub use setup::{board_from_str, setup_from_strings};
pub use types::Mark;

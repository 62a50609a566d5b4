use super::GameRecord;
use crate::core::{Board, BoardError};
use std::path::Path;

/// 棋譜から各局面を再構築する
///
/// Returns the empty board followed by the position after every move.
pub fn replay_boards(record: &GameRecord) -> Result<Vec<Board>, BoardError> {
    let mut board = Board::new(record.width, record.height, record.m)?;
    let mut boards = Vec::with_capacity(record.moves.len() + 1);
    boards.push(board.clone());

    for &(mark, mv) in &record.moves {
        board = board.with_move(mv, mark)?;
        boards.push(board.clone());
    }
    Ok(boards)
}

impl GameRecord {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)?;
        let record = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(record)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer(file, self)?;
        Ok(())
    }

    /// Final position of the record.
    pub fn final_board(&self) -> Result<Board, BoardError> {
        Board::from_moves(self.width, self.height, self.m, &self.moves)
    }
}

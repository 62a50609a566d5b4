use super::board::{Board, BoardError};
use super::r#move::Move;
use super::types::Mark;

/// 文字列配列から盤面を初期化する
///
/// Each row uses `-` (or `.`) for empty cells and `O` / `X` for stones.
/// Stones are placed in row-major order, so each mark's last move is its
/// last stone in reading order. Use `Board::from_moves` when the move order
/// matters.
pub fn setup_from_strings(rows: &[&str], m: usize) -> Result<Board, BoardError> {
    let height = rows.len();
    let width = rows.first().map_or(0, |row| row.trim().chars().count());

    let mut moves = Vec::new();
    for (r, row) in rows.iter().enumerate() {
        let row = row.trim();
        if row.chars().count() != width {
            return Err(BoardError::Parse(format!(
                "row {} has {} cells, expected {}",
                r,
                row.chars().count(),
                width
            )));
        }
        for (c, ch) in row.chars().enumerate() {
            let mark = Mark::from_char(ch)
                .ok_or_else(|| BoardError::Parse(format!("unknown cell '{}' at ({}, {})", ch, r, c)))?;
            if mark.is_player() {
                moves.push((mark, Move::new(r as i32, c as i32)));
            }
        }
    }

    Board::from_moves(width, height, m, &moves)
}

/// Parses the newline-separated form produced by `Board`'s `Display`.
pub fn board_from_str(text: &str, m: usize) -> Result<Board, BoardError> {
    let rows: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    setup_from_strings(&rows, m)
}

//! # Evaluation Module
//!
//! This module implements the pattern-table evaluation of an open position.
//! It converts a given `Board` into a single score from the perspective of
//! the acting mark (positive = acting mark ahead).
//!
//! ## Scoring Strategy
//! For each mark, around that mark's most recent stone:
//! 1. **Direction strings**: the `m - 1` cells along each of the 8 directions.
//!    Cells past the edge read as the opponent's stone.
//! 2. **Pair scores**: every direction string is decoded to a canonical code
//!    through the mark's dictionary, and each of the 28 unordered pairs of
//!    (direction, code) is looked up in the shared pair table.
//! 3. **Straight lines**: the 4 lines through the stone (both opposite
//!    directions joined by the stone itself) earn a bonus from the mark's
//!    line table.
//!
//! The result is `own total - opponent total`. Decided boards score ±∞.

use super::evaluator::{terminal_score, Evaluator};
use super::tables::{Code, PairKey, ScoreTables, TableError};
use crate::core::{Board, Mark};
use crate::logic::{direction_string, DIRECTIONS};
use std::path::Path;
use std::sync::Arc;

pub struct PatternEvaluator {
    tables: Arc<ScoreTables>,
}

impl PatternEvaluator {
    pub fn new(tables: Arc<ScoreTables>) -> Self {
        Self { tables }
    }

    /// Uses the process-wide table cache.
    pub fn load(dir: &Path, m: usize) -> Result<Self, TableError> {
        Ok(Self::new(ScoreTables::load_cached(dir, m)?))
    }

    pub fn tables(&self) -> &ScoreTables {
        &self.tables
    }

    /// Pair-score sum plus line bonuses around `mark`'s last stone.
    /// A mark that has not moved yet is worth 0.
    pub fn mark_total(&self, board: &Board, mark: Mark) -> f64 {
        let Some(anchor) = board.last_move(mark) else {
            return 0.0;
        };
        let radius = board.m().saturating_sub(1);
        let wall = mark.opponent();

        let directions: Vec<String> = DIRECTIONS
            .iter()
            .map(|&dir| direction_string(board, anchor, dir, radius, wall))
            .collect();
        let codes: Vec<Option<Code>> = directions
            .iter()
            .map(|s| self.tables.code(mark, s))
            .collect();

        let mut pair_sum = 0.0;
        for i in 0..codes.len() {
            let Some(code_i) = codes[i] else { continue };
            for j in (i + 1)..codes.len() {
                if let Some(code_j) = codes[j] {
                    pair_sum += self.tables.pair_score(&PairKey::new(i, code_i, j, code_j));
                }
            }
        }

        let line_sum: f64 = (0..4)
            .map(|k| {
                let mut line: String = directions[2 * k + 1].chars().rev().collect();
                line.push(mark.to_char());
                line.push_str(&directions[2 * k]);
                self.tables.line_bonus(mark, &line)
            })
            .sum();

        pair_sum + line_sum
    }
}

impl Evaluator for PatternEvaluator {
    fn score(&self, board: &Board, mark: Mark) -> f64 {
        if let Some(decided) = terminal_score(board, mark) {
            return decided;
        }
        self.mark_total(board, mark) - self.mark_total(board, mark.opponent())
    }

    fn name(&self) -> &str {
        "PatternEvaluator"
    }
}

use crate::core::{Board, Mark, Move};
use crate::player::Agent;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::time::Duration;

pub struct RandomAI {
    pub name: String,
    mark: Mark,
    rng: StdRng,
}

impl RandomAI {
    pub fn new(name: &str) -> Self {
        RandomAI {
            name: name.to_string(),
            mark: Mark::Empty,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}

impl Agent for RandomAI {
    fn assign_mark(&mut self, mark: Mark) {
        self.mark = mark;
    }

    fn mark(&self) -> Mark {
        self.mark
    }

    fn choose_move(
        &mut self,
        board: &Board,
        _remaining: &dyn Fn() -> Duration,
        _move_index: usize,
    ) -> Option<Move> {
        board.legal_moves().choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_ai_plays_legal_moves() {
        let mut ai = RandomAI::new("random").with_seed(11);
        ai.assign_mark(Mark::X);
        let board = Board::new(3, 3, 3).unwrap().with_move(Move::new(1, 1), Mark::O).unwrap();
        let time = || Duration::from_secs(1);
        for _ in 0..10 {
            let mv = ai.choose_move(&board, &time, 1).unwrap();
            assert!(board.is_empty_at(mv));
        }
        let full = crate::core::setup_from_strings(&["OX", "XO"], 2).unwrap();
        assert_eq!(ai.choose_move(&full, &time, 4), None);
    }
}

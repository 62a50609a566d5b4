#[cfg(test)]
mod tests {
    use crate::core::{setup_from_strings, Board, Mark, Move};
    use crate::game::{play_game, GameConfig, GameOutcome};
    use crate::player::ai::{
        Algorithm, AllLegalMoves, NullScore, RootResult, SearchAgent, SearchEngine, SurroundStar,
    };
    use crate::player::{Agent, RandomAI};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::Cell;
    use std::time::Duration;

    fn plenty() -> Duration {
        Duration::from_secs(60)
    }

    fn fixed_depth(algorithm: Algorithm, board: &Board, mark: Mark, depth: usize) -> (RootResult, u64) {
        let remaining = plenty;
        let mut engine = SearchEngine::new(
            algorithm,
            mark,
            &NullScore,
            &AllLegalMoves,
            &remaining,
            Duration::from_millis(10),
        );
        let result = engine.search_fixed_depth(board, depth).unwrap();
        (result, engine.nodes())
    }

    #[test]
    fn test_alpha_beta_matches_minimax() {
        let boards = [
            setup_from_strings(&["----", "----", "----", "----"], 3).unwrap(),
            setup_from_strings(&["O---", "-X--", "----", "----"], 3).unwrap(),
            setup_from_strings(&["OO--", "-X--", "-X--", "----"], 3).unwrap(),
            setup_from_strings(&["O-X-", "-O--", "X---", "----"], 3).unwrap(),
            setup_from_strings(&["OX--", "XO--", "--X-", "---O"], 3).unwrap(),
        ];

        for board in &boards {
            for mark in Mark::PLAYERS {
                for depth in 1..=3 {
                    let (mm, mm_nodes) = fixed_depth(Algorithm::Minimax, board, mark, depth);
                    let (ab, ab_nodes) = fixed_depth(Algorithm::AlphaBeta, board, mark, depth);
                    assert_eq!(mm.score, ab.score, "{} depth {}\n{}", mark, depth, board);
                    assert_eq!(mm.best_move, ab.best_move, "{} depth {}\n{}", mark, depth, board);
                    assert!(ab_nodes <= mm_nodes);
                }
            }
        }
    }

    #[test]
    fn test_win_in_a_move_is_committed_at_depth_one() {
        // The only winning cell for O comes last in row-major order.
        let board = Board::from_moves(
            4,
            4,
            3,
            &[
                (Mark::O, Move::new(3, 0)),
                (Mark::X, Move::new(0, 0)),
                (Mark::O, Move::new(3, 1)),
                (Mark::X, Move::new(0, 3)),
            ],
        )
        .unwrap();

        for algorithm in [Algorithm::Minimax, Algorithm::AlphaBeta] {
            let remaining = plenty;
            let mut engine = SearchEngine::new(
                algorithm,
                Mark::O,
                &NullScore,
                &AllLegalMoves,
                &remaining,
                Duration::from_millis(10),
            );
            let mut rng = StdRng::seed_from_u64(0);
            let report = engine.iterative_deepening(&board, None, &mut rng);
            assert_eq!(report.best_move, Some(Move::new(3, 2)));
            assert_eq!(report.score, f64::INFINITY);
            assert_eq!(report.depth, 1);
            assert!(!report.timed_out);
        }
    }

    #[test]
    fn test_three_by_three_scenario() {
        let board = Board::from_moves(
            3,
            3,
            3,
            &[
                (Mark::O, Move::new(1, 1)),
                (Mark::X, Move::new(0, 0)),
                (Mark::O, Move::new(0, 2)),
                (Mark::X, Move::new(2, 0)),
                (Mark::O, Move::new(2, 2)),
            ],
        )
        .unwrap();
        assert!(!board.is_winner(Mark::O));
        assert!(!board.is_winner(Mark::X));
        assert_eq!(board.legal_move_count(), 4);

        let won = board.with_move(Move::new(1, 2), Mark::O).unwrap();
        assert!(won.is_winner(Mark::O));
        assert!(won.is_loser(Mark::X));

        // X to move wins on the left column.
        let mut agent = SearchAgent::new("x", Algorithm::AlphaBeta, Box::new(NullScore))
            .with_candidates(Box::new(AllLegalMoves))
            .with_seed(4);
        agent.assign_mark(Mark::X);
        assert_eq!(agent.choose_move(&board, &plenty, 5), Some(Move::new(1, 0)));
    }

    #[test]
    fn test_timeout_keeps_last_completed_depth() {
        let board = Board::new(4, 4, 3).unwrap().with_move(Move::new(1, 1), Mark::O).unwrap();
        let calls = Cell::new(0u32);
        let remaining = || {
            calls.set(calls.get() + 1);
            if calls.get() < 200 {
                Duration::from_secs(60)
            } else {
                Duration::ZERO
            }
        };
        let mut engine = SearchEngine::new(
            Algorithm::Minimax,
            Mark::X,
            &NullScore,
            &AllLegalMoves,
            &remaining,
            Duration::from_millis(10),
        );
        let mut rng = StdRng::seed_from_u64(0);
        let report = engine.iterative_deepening(&board, None, &mut rng);

        assert!(report.timed_out);
        assert_eq!(report.depth, 1);
        // Every reply scores 0 at depth 1, so the first candidate is kept.
        assert_eq!(report.best_move, Some(Move::new(0, 0)));
        assert_eq!(report.score, 0.0);
    }

    #[test]
    fn test_null_score_search_avoids_immediate_loss() {
        // X threatens (3,2); O must block even though NullScore is blind.
        let board = Board::from_moves(
            4,
            4,
            3,
            &[
                (Mark::O, Move::new(0, 0)),
                (Mark::X, Move::new(3, 0)),
                (Mark::O, Move::new(0, 3)),
                (Mark::X, Move::new(3, 1)),
            ],
        )
        .unwrap();
        let (result, _) = fixed_depth(Algorithm::AlphaBeta, &board, Mark::O, 2);
        assert_eq!(result.best_move, Some(Move::new(3, 2)));
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_perfect_tic_tac_toe_is_a_draw() {
        let config = GameConfig {
            width: 3,
            height: 3,
            m: 3,
            time_limit_ms: 60_000,
        };
        let mut o = SearchAgent::new("ab-o", Algorithm::AlphaBeta, Box::new(NullScore))
            .with_candidates(Box::new(AllLegalMoves))
            .with_seed(1);
        let mut x = SearchAgent::new("ab-x", Algorithm::AlphaBeta, Box::new(NullScore))
            .with_candidates(Box::new(AllLegalMoves))
            .with_seed(2);
        let result = play_game(&config, &mut o, &mut x).unwrap();
        assert_eq!(result.winner, None);
        assert_eq!(result.outcome, GameOutcome::Draw);
        assert_eq!(result.moves, 9);
    }

    #[test]
    fn test_search_agent_plays_out_against_random() {
        let config = GameConfig {
            width: 6,
            height: 6,
            m: 4,
            time_limit_ms: 2_000,
        };
        let mut o = SearchAgent::new("ab", Algorithm::AlphaBeta, Box::new(NullScore))
            .with_candidates(Box::new(SurroundStar::consider_both()))
            .with_max_depth(Some(2))
            .with_seed(3);
        let mut x = RandomAI::new("random").with_seed(4);
        let result = play_game(&config, &mut o, &mut x).unwrap();

        assert_ne!(result.outcome, GameOutcome::Forfeit);
        assert!(o.last_report().is_some());
        let replayed = crate::game::replay_boards(&result.record).unwrap();
        assert_eq!(replayed.len(), result.moves + 1);
    }
}

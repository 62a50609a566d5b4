use crate::core::Mark;
use crate::game::{play_game, GameConfig, GameOutcome, GameRecord};
use crate::player::ai::AgentConfig;
use anyhow::Context;
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    pub num_games: usize,
    pub game: GameConfig,
    pub agent_o: AgentConfig,
    pub agent_x: AgentConfig,
    /// Play games concurrently on the rayon pool.
    pub parallel: bool,
    /// Directory for one JSON record per game.
    pub save_records: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSummary {
    pub game_num: usize,
    pub winner: Option<Mark>,
    pub outcome: GameOutcome,
    pub moves: usize,
    pub time_ms: u128,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelfPlayStats {
    pub total_games: usize,
    pub o_wins: usize,
    pub x_wins: usize,
    pub draws: usize,
    pub forfeits: usize,
    pub avg_moves: f64,
    pub avg_time_ms: f64,
    pub games: Vec<GameSummary>,
}

impl SelfPlayStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_result(&mut self, result: GameSummary) {
        self.total_games += 1;
        match result.winner {
            Some(Mark::O) => self.o_wins += 1,
            Some(Mark::X) => self.x_wins += 1,
            _ => self.draws += 1,
        }
        if result.outcome == GameOutcome::Forfeit {
            self.forfeits += 1;
        }
        self.games.push(result);
        self.recalculate_averages();
    }

    fn recalculate_averages(&mut self) {
        if self.games.is_empty() {
            return;
        }
        let total_moves: usize = self.games.iter().map(|g| g.moves).sum();
        let total_time: u128 = self.games.iter().map(|g| g.time_ms).sum();
        self.avg_moves = total_moves as f64 / self.games.len() as f64;
        self.avg_time_ms = total_time as f64 / self.games.len() as f64;
    }

    pub fn win_rate(&self, mark: Mark) -> f64 {
        if self.total_games == 0 {
            return 0.0;
        }
        let wins = match mark {
            Mark::O => self.o_wins,
            Mark::X => self.x_wins,
            Mark::Empty => self.draws,
        };
        wins as f64 / self.total_games as f64
    }
}

/// A seeded config plays a different, reproducible game each round.
fn seeded_for_game(config: &AgentConfig, game_num: usize) -> AgentConfig {
    let mut config = config.clone();
    if let Some(seed) = config.search.seed {
        config.search.seed = Some(seed.wrapping_add(game_num as u64));
    }
    config
}

fn run_one(config: &SelfPlayConfig, game_num: usize) -> anyhow::Result<GameSummary> {
    let start_time = Instant::now();
    let m = config.game.m;
    let mut agent_o = seeded_for_game(&config.agent_o, game_num).build_agent("agent-O", m)?;
    let mut agent_x = seeded_for_game(&config.agent_x, game_num).build_agent("agent-X", m)?;

    let result = play_game(&config.game, &mut agent_o, &mut agent_x)?;
    let elapsed = start_time.elapsed();
    info!(
        "game {}/{}: {} ({} moves, {:.1}s)",
        game_num,
        config.num_games,
        match result.winner {
            Some(mark) => format!("{} wins", mark),
            None => "draw".to_string(),
        },
        result.moves,
        elapsed.as_secs_f64()
    );

    if let Some(dir) = &config.save_records {
        save_record(dir, game_num, &result.record)?;
    }

    Ok(GameSummary {
        game_num,
        winner: result.winner,
        outcome: result.outcome,
        moves: result.moves,
        time_ms: elapsed.as_millis(),
    })
}

pub fn run_selfplay(config: &SelfPlayConfig) -> anyhow::Result<SelfPlayStats> {
    let summaries: Vec<GameSummary> = if config.parallel {
        (1..=config.num_games)
            .into_par_iter()
            .map(|game_num| run_one(config, game_num))
            .collect::<anyhow::Result<Vec<_>>>()?
    } else {
        (1..=config.num_games)
            .map(|game_num| run_one(config, game_num))
            .collect::<anyhow::Result<Vec<_>>>()?
    };

    let mut stats = SelfPlayStats::new();
    for summary in summaries {
        stats.add_result(summary);
    }
    info!(
        "self-play done: O {} / X {} / draw {} over {} games (avg {:.1} moves)",
        stats.o_wins, stats.x_wins, stats.draws, stats.total_games, stats.avg_moves
    );
    Ok(stats)
}

pub fn save_record(dir: &Path, game_num: usize, record: &GameRecord) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let filename = dir.join(format!(
        "game_{:04}_{}.json",
        game_num,
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ));
    record.save(&filename)?;
    Ok(filename)
}

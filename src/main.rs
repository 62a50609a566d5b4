use clap::Parser;
use log::info;
use mnk_search::game::GameConfig;
use mnk_search::player::ai::AgentConfig;
use mnk_search::selfplay::{run_selfplay, SelfPlayConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Self-play between two search agents", long_about = None)]
struct Args {
    #[arg(long, default_value_t = 12)]
    width: usize,
    #[arg(long, default_value_t = 12)]
    height: usize,
    /// Stones in a row needed to win
    #[arg(short, long, default_value_t = 6)]
    m: usize,
    /// Per-move time budget
    #[arg(long, default_value_t = 30_000)]
    time_limit_ms: u64,
    #[arg(short, long, default_value_t = 1)]
    games: usize,
    /// Agent config for O (defaults to agent_config.json, then built-in)
    #[arg(long)]
    config_o: Option<PathBuf>,
    #[arg(long)]
    config_x: Option<PathBuf>,
    #[arg(long)]
    parallel: bool,
    /// Directory for JSON game records
    #[arg(long)]
    save_records: Option<PathBuf>,
    #[arg(long, default_value = "info")]
    log_level: log::Level,
}

fn load_agent_config(path: Option<&PathBuf>) -> anyhow::Result<AgentConfig> {
    match path {
        Some(path) => AgentConfig::load(path),
        None => Ok(AgentConfig::load_or_default()),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    simple_logger::init_with_level(args.log_level)?;

    let config = SelfPlayConfig {
        num_games: args.games,
        game: GameConfig {
            width: args.width,
            height: args.height,
            m: args.m,
            time_limit_ms: args.time_limit_ms,
        },
        agent_o: load_agent_config(args.config_o.as_ref())?,
        agent_x: load_agent_config(args.config_x.as_ref())?,
        parallel: args.parallel,
        save_records: args.save_records,
    };
    info!(
        "{}x{} board, {} in a row, {} ms per move, {} game(s)",
        config.game.width, config.game.height, config.game.m, config.game.time_limit_ms, config.num_games
    );

    let stats = run_selfplay(&config)?;

    println!("=== Self-Play Results ===");
    println!("Games: {}", stats.total_games);
    println!("O wins: {} ({:.1}%)", stats.o_wins, stats.win_rate(mnk_search::Mark::O) * 100.0);
    println!("X wins: {} ({:.1}%)", stats.x_wins, stats.win_rate(mnk_search::Mark::X) * 100.0);
    println!("Draws: {}", stats.draws);
    println!("Forfeits: {}", stats.forfeits);
    println!("Avg moves: {:.1}", stats.avg_moves);
    println!("Avg time: {:.1}s", stats.avg_time_ms / 1000.0);
    Ok(())
}

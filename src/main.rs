use std::path::PathBuf;

use clap::Parser;
use log::info;

use mcts_zero::game::GameState;
use mcts_zero::logging;
use mcts_zero::mcts::SearchConfig;
use mcts_zero::recording::CsvWriter;
use mcts_zero::selfplay;

#[derive(clap::ValueEnum, Clone, Debug, PartialEq, Eq)]
enum GameMode {
    /// One deterministic engine per side, boards printed per game
    Play,
    /// Stochastic self-play with Dirichlet noise, episodes written to CSV
    Selfplay,
}

#[derive(Parser, Debug)]
#[command(name = "mcts_zero", about = "AlphaZero-style MCTS engine demo")]
struct Cli {
    /// What to run
    #[arg(long, value_enum, default_value = "play")]
    mode: GameMode,

    /// Number of games to run
    #[arg(short = 'g', long, default_value_t = 1)]
    num_games: usize,

    /// Number of playouts per search
    #[arg(short = 's', long, default_value_t = 10_000)]
    num_iterations: u32,

    /// Wall-clock budget per search, in seconds
    #[arg(long, default_value_t = 8.0)]
    max_runtime_secs: f64,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Optional JSON search configuration, overridden by the flags above
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory for self-play episode CSVs
    #[arg(long, default_value = "records")]
    record_dir: PathBuf,
}

fn main() -> mcts_zero::Result<()> {
    let _logger = logging::setup_logging()?;
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SearchConfig::from_json_file(path)?,
        None => SearchConfig::default(),
    };
    config.max_iterations = cli.num_iterations;
    config.max_runtime_secs = cli.max_runtime_secs;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config
        .validate()
        .map_err(mcts_zero::MctsZeroError::Config)?;

    info!("running {:?} with {}", cli.mode, config.to_config_string());

    match cli.mode {
        GameMode::Play => {
            for game_index in 0..cli.num_games {
                let mut game_config = config.clone();
                if let Some(seed) = config.seed {
                    game_config.seed = Some(seed.wrapping_add(game_index as u64));
                }
                let game = selfplay::play_game(&game_config)?;
                println!("game {}:\n{}", game_index + 1, game);
                match game.winner() {
                    Some(winner) => println!("winner: {}", winner),
                    None => println!("draw"),
                }
            }
        }
        GameMode::Selfplay => {
            let writer = CsvWriter::new(&cli.record_dir)?;
            for game_index in 0..cli.num_games {
                let mut episode_config = config.clone();
                if let Some(seed) = config.seed {
                    episode_config.seed = Some(seed.wrapping_add(game_index as u64));
                }
                let episode_id = format!("selfplay-{}", game_index + 1);
                let record = selfplay::play_episode(&episode_config, &episode_id)?;
                let path = writer.write_episode(&record)?;
                info!(
                    "episode {} finished with outcome {} ({} moves) -> {}",
                    episode_id,
                    record.outcome,
                    record.moves.len(),
                    path.display()
                );
            }
            println!(
                "wrote {} episode(s) to {}",
                cli.num_games,
                cli.record_dir.display()
            );
        }
    }

    Ok(())
}

//! Bench command - Play many games and report how often the player wins

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::{
        config::BoardArgs,
        output::{format_number, format_percent, print_kv, print_section, print_subsection},
    },
    export::GamesCsvExporter,
    pipeline::{JsonlObserver, PlayConfig, PlayPipeline, PlayResult, ProgressObserver},
};

#[derive(Parser, Debug)]
#[command(about = "Play many games and report win statistics")]
pub struct BenchArgs {
    #[command(flatten)]
    pub board: BoardArgs,

    /// Number of games to play
    #[arg(long, short = 'g', default_value_t = 1000)]
    pub games: usize,

    /// Base random seed; game i uses seed + i
    #[arg(long)]
    pub seed: Option<u64>,

    /// Abort if inference needs more passes than this for one observation
    #[arg(long)]
    pub max_passes: Option<usize>,

    /// Read the session configuration from a JSON file instead of flags
    #[arg(long, conflicts_with_all = ["games", "height", "width", "mines"])]
    pub config: Option<PathBuf>,

    /// Export the result summary as JSON
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Write one CSV row per game
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Write every game, move by move, as JSON Lines
    #[arg(long)]
    pub jsonl: Option<PathBuf>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

pub fn execute(args: BenchArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => PlayConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => PlayConfig {
            num_games: args.games,
            board: args.board.into(),
            ..PlayConfig::default()
        },
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.max_passes.is_some() {
        config.max_passes = args.max_passes;
    }

    print_section("Benchmark Configuration");
    print_kv(
        "Board",
        &format!("{}x{}", config.board.height, config.board.width),
    );
    print_kv("Mines", &config.board.mines.to_string());
    print_kv("Games", &format_number(config.num_games));

    let mut pipeline = PlayPipeline::new(config);
    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.csv {
        pipeline = pipeline.with_observer(Box::new(GamesCsvExporter::new(path)?));
    }
    if let Some(path) = &args.jsonl {
        pipeline = pipeline.with_observer(Box::new(JsonlObserver::new(path)?));
    }

    let result = pipeline.run().context("benchmark aborted")?;
    print_result(&result);

    if let Some(path) = &args.export {
        result
            .save(path)
            .with_context(|| format!("failed to export results to {}", path.display()))?;
        println!("\n✓ Results exported to: {}", path.display());
    }

    Ok(())
}

fn print_result(result: &PlayResult) {
    print_section("Benchmark Results");
    print_kv("Seed", &result.seed.to_string());
    print_kv("Total games", &format_number(result.total_games));
    print_kv(
        "Wins",
        &format!(
            "{} ({})",
            format_number(result.wins),
            format_percent(result.win_rate)
        ),
    );
    print_kv(
        "Losses",
        &format!(
            "{} ({})",
            format_number(result.losses),
            format_percent(result.loss_rate)
        ),
    );
    if result.stuck > 0 {
        print_kv("Stuck", &format_number(result.stuck));
    }
    print_kv(
        "Win rate 95% CI",
        &format!(
            "[{}, {}]",
            format_percent(result.win_rate_interval.lower),
            format_percent(result.win_rate_interval.upper)
        ),
    );

    print_subsection("Moves");
    print_kv("Proven safe", &format_number(result.safe_moves));
    print_kv("Guessed", &format_number(result.random_moves));
    print_kv("Safe share", &format_percent(result.safe_move_share));
}

//! Play command - Play one traced game on a random board

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::repository_for_path,
    cli::{
        config::BoardArgs,
        output::{format_cells, print_kv, print_section},
    },
    pipeline::{PlayConfig, PlayPipeline, TraceObserver},
};

#[derive(Parser, Debug)]
#[command(about = "Play a single game and trace every move")]
pub struct PlayArgs {
    #[command(flatten)]
    pub board: BoardArgs,

    /// Random seed for mine placement and guesses
    #[arg(long)]
    pub seed: Option<u64>,

    /// Abort if inference needs more passes than this for one observation
    #[arg(long)]
    pub max_passes: Option<usize>,

    /// Save the final knowledge base (.json or .msgpack)
    #[arg(long)]
    pub save_knowledge: Option<PathBuf>,

    /// Only print the final summary
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let config = PlayConfig {
        num_games: 1,
        board: args.board.into(),
        seed: args.seed,
        max_passes: args.max_passes,
    };

    let mut pipeline = PlayPipeline::new(config);
    if !args.quiet {
        pipeline = pipeline.with_observer(Box::new(TraceObserver::stdout()));
    }
    let game = pipeline.run_single().context("game aborted")?;
    let knowledge = game.knowledge();

    print_section("Final Knowledge");
    let outcome = game
        .outcome()
        .map(|outcome| outcome.to_string())
        .unwrap_or_else(|| "unfinished".to_string());
    print_kv("Outcome", &outcome);
    print_kv("Moves made", &knowledge.moves_made().len().to_string());
    print_kv("Known mines", &format_cells(knowledge.mines()));
    print_kv("Flagged", &game.board().flagged().len().to_string());
    print_kv("Open sentences", &knowledge.knowledge().len().to_string());

    if let Some(path) = &args.save_knowledge {
        repository_for_path(path)
            .save(knowledge, path)
            .with_context(|| format!("failed to save knowledge to {}", path.display()))?;
        println!("\n✓ Knowledge saved to: {}", path.display());
    }

    Ok(())
}

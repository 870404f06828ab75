//! Minesweeper CLI - knowledge-base player for Minesweeper
//!
//! This CLI provides:
//! - Single traced games on random boards
//! - Benchmarks over many seeded boards
//! - Deduction from recorded observations

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "minesweeper")]
#[command(version, about = "Knowledge-base inference player for Minesweeper", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game and trace every deduction
    Play(minesweeper_ai::cli::commands::play::PlayArgs),

    /// Play many games and report win statistics
    Bench(minesweeper_ai::cli::commands::bench::BenchArgs),

    /// Deduce safe cells and mines from an observation file
    Solve(minesweeper_ai::cli::commands::solve::SolveArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => minesweeper_ai::cli::commands::play::execute(args),
        Commands::Bench(args) => minesweeper_ai::cli::commands::bench::execute(args),
        Commands::Solve(args) => minesweeper_ai::cli::commands::solve::execute(args),
    }
}

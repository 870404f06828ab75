//! Shared argument groups for CLI commands

use clap::Args;

use crate::minesweeper::BoardConfig;

/// Board dimensions accepted by every command that creates boards
#[derive(Args, Debug, Clone, Copy)]
pub struct BoardArgs {
    /// Board height in rows
    #[arg(long, default_value_t = 8)]
    pub height: usize,

    /// Board width in columns
    #[arg(long, default_value_t = 8)]
    pub width: usize,

    /// Number of mines on the board
    #[arg(long, short = 'm', default_value_t = 8)]
    pub mines: usize,
}

impl From<BoardArgs> for BoardConfig {
    fn from(args: BoardArgs) -> Self {
        BoardConfig::new(args.height, args.width, args.mines)
    }
}

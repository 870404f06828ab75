//! Subcommands of the `minesweeper` binary

pub mod bench;
pub mod play;
pub mod solve;

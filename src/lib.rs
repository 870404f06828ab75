//! Knowledge-base inference player for Minesweeper
//!
//! This crate provides:
//! - Exact-count [`Sentence`](minesweeper::Sentence)s over board cells
//! - A [`KnowledgeBase`](minesweeper::KnowledgeBase) that deduces safe cells
//!   and mines to a fixpoint after every observation
//! - A board oracle and game loop to play the knowledge base end to end
//! - Pipelines, observers and exports for benchmarking over many boards

pub mod adapters;
pub mod analysis;
pub mod cli;
pub mod error;
pub mod export;
pub mod minesweeper;
pub mod pipeline;
pub mod ports;
pub mod types;

pub use error::{Error, Result};
pub use minesweeper::{
    BoardConfig, Game, GameOutcome, InferenceReport, KnowledgeBase, Minesweeper, MoveKind,
    Sentence,
};
pub use types::{BoardSize, Cell};

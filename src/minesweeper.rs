//! Minesweeper knowledge-base player and board

pub mod board;
pub mod game;
pub mod knowledge;
pub mod sentence;

pub use board::{BoardConfig, Minesweeper};
pub use game::{Game, GameOutcome, GameSummary, MoveKind, Turn};
pub use knowledge::{InferenceReport, KnowledgeBase};
pub use sentence::Sentence;

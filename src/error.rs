//! Error types for the minesweeper-ai crate

use thiserror::Error;

use crate::types::{BoardSize, Cell};

/// Main error type for the minesweeper-ai crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("cell {cell} is out of bounds for a {size} board")]
    CellOutOfBounds { cell: Cell, size: BoardSize },

    #[error("invalid board size {height}x{width} (dimensions must be positive and their product fit in usize)")]
    InvalidBoardSize { height: usize, width: usize },

    #[error("cannot place {mines} mines on a board with {cells} cells")]
    TooManyMines { mines: usize, cells: usize },

    #[error("cell {cell} reports {count} nearby mines but has only {neighbors} neighbors")]
    InvalidMineCount {
        cell: Cell,
        count: usize,
        neighbors: usize,
    },

    #[error("knowledge is inconsistent: {sentence}")]
    Contradiction { sentence: String },

    #[error("cell {cell} cannot be both safe and a mine")]
    ConflictingMark { cell: Cell },

    #[error("inference did not reach a fixpoint within {limit} passes")]
    PassLimitExceeded { limit: usize },

    #[error("game already over")]
    GameOver,

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("invalid cell '{input}' (expected format: 'row,col')")]
    ParseCell { input: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },

    #[error("statistics error: {message}")]
    Statistics { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

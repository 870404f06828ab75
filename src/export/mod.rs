//! Export of played games for further analysis

mod games_csv;

pub use games_csv::{GameRow, GamesCsvExporter};

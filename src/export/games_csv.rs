//! CSV export of per-game summaries

use std::{fs::File, path::Path};

use serde::Serialize;

use crate::{
    Result,
    minesweeper::{GameOutcome, GameSummary},
    ports::Observer,
};

/// A single row of the games CSV
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRow {
    pub game: usize,
    pub outcome: String,
    /// Cell that ended the game, for lost games
    pub lost_at: Option<String>,
    pub turns: usize,
    pub safe_moves: usize,
    pub random_moves: usize,
    pub mines_flagged: usize,
    pub inference_passes: usize,
    pub sentences_inferred: usize,
}

impl GameRow {
    pub fn new(game: usize, summary: &GameSummary) -> Self {
        let lost_at = match summary.outcome {
            Some(GameOutcome::Lost { cell }) => Some(format!("{},{}", cell.row, cell.col)),
            _ => None,
        };
        Self {
            game,
            outcome: summary
                .outcome
                .map_or("unfinished", |outcome| outcome.label())
                .to_string(),
            lost_at,
            turns: summary.turns,
            safe_moves: summary.safe_moves,
            random_moves: summary.random_moves,
            mines_flagged: summary.mines_flagged,
            inference_passes: summary.inference_passes,
            sentences_inferred: summary.sentences_inferred,
        }
    }
}

/// Observer writing one CSV row per finished game
pub struct GamesCsvExporter {
    writer: csv::Writer<File>,
}

impl GamesCsvExporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            writer: csv::Writer::from_path(path)?,
        })
    }
}

impl Observer for GamesCsvExporter {
    fn on_game_end(&mut self, game_num: usize, summary: &GameSummary) -> Result<()> {
        self.writer.serialize(GameRow::new(game_num, summary))?;
        Ok(())
    }

    fn on_session_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::types::Cell;

    #[test]
    fn test_rows_are_written_with_header() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("games.csv");

        let lost = GameSummary {
            outcome: Some(GameOutcome::Lost {
                cell: Cell::new(2, 3),
            }),
            turns: 4,
            safe_moves: 2,
            random_moves: 2,
            mines_flagged: 1,
            inference_passes: 9,
            sentences_inferred: 1,
        };

        let mut exporter = GamesCsvExporter::new(&path).unwrap();
        exporter.on_game_end(0, &lost).unwrap();
        exporter.on_session_end().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next(),
            Some(
                "game,outcome,lost_at,turns,safe_moves,random_moves,mines_flagged,inference_passes,sentences_inferred"
            )
        );
        assert_eq!(lines.next(), Some("0,lost,\"2,3\",4,2,2,1,9,1"));
        assert_eq!(lines.next(), None);
    }
}

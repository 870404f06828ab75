//! Observer implementations for play sessions
//!
//! Observers collect data while games are played without coupling the play
//! loop to any output format.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    analysis::GameStats,
    minesweeper::{BoardConfig, GameOutcome, GameSummary, Turn},
    ports::Observer,
    types::Cell,
};

/// Progress bar observer - Shows session progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    wins: usize,
    losses: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            wins: 0,
            losses: 0,
        }
    }

    fn message(&self) -> String {
        format!("{} L:{}", self.wins, self.losses)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_session_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games (W:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, summary: &GameSummary) -> Result<()> {
        match summary.outcome {
            Some(GameOutcome::Won) => self.wins += 1,
            Some(GameOutcome::Lost { .. }) => self.losses += 1,
            _ => {}
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_session_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks outcome and move statistics
#[derive(Debug, Default)]
pub struct MetricsObserver {
    stats: GameStats,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }
}

impl Observer for MetricsObserver {
    fn on_game_end(&mut self, _game_num: usize, summary: &GameSummary) -> Result<()> {
        self.stats.record(summary);
        Ok(())
    }
}

/// One finished game as written by [`JsonlObserver`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_num: usize,
    pub board: BoardConfig,
    pub summary: GameSummary,
    pub turns: Vec<Turn>,
}

/// JSONL observer - Writes one JSON object per finished game
pub struct JsonlObserver {
    writer: BufWriter<File>,
    board: BoardConfig,
    turns: Vec<Turn>,
}

impl JsonlObserver {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| crate::Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
            board: BoardConfig::default(),
            turns: Vec::new(),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_game_start(&mut self, _game_num: usize, config: &BoardConfig) -> Result<()> {
        self.board = *config;
        self.turns.clear();
        Ok(())
    }

    fn on_turn(&mut self, _game_num: usize, turn: &Turn) -> Result<()> {
        self.turns.push(turn.clone());
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, summary: &GameSummary) -> Result<()> {
        let record = GameRecord {
            game_num,
            board: self.board,
            summary: summary.clone(),
            turns: std::mem::take(&mut self.turns),
        };

        serde_json::to_writer(&mut self.writer, &record)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_session_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Trace observer - Prints every move and what it proved
pub struct TraceObserver {
    out: Box<dyn Write + Send>,
}

impl TraceObserver {
    /// Trace to standard output.
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self { out }
    }
}

fn format_cells(cells: &[Cell]) -> String {
    cells
        .iter()
        .map(Cell::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl Observer for TraceObserver {
    fn on_game_start(&mut self, game_num: usize, config: &BoardConfig) -> Result<()> {
        writeln!(
            self.out,
            "game {}: {}x{} board, {} mines",
            game_num + 1,
            config.height,
            config.width,
            config.mines
        )?;
        Ok(())
    }

    fn on_turn(&mut self, _game_num: usize, turn: &Turn) -> Result<()> {
        let Some(count) = turn.count else {
            writeln!(self.out, "  {:6} {} -> mine!", turn.kind.to_string(), turn.cell)?;
            return Ok(());
        };

        write!(
            self.out,
            "  {:6} {} -> {count} ({} passes",
            turn.kind.to_string(),
            turn.cell,
            turn.report.passes
        )?;
        if !turn.report.new_safes.is_empty() {
            write!(self.out, ", safe: {}", format_cells(&turn.report.new_safes))?;
        }
        if !turn.report.new_mines.is_empty() {
            write!(self.out, ", mines: {}", format_cells(&turn.report.new_mines))?;
        }
        writeln!(self.out, ")")?;
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, summary: &GameSummary) -> Result<()> {
        let outcome = summary
            .outcome
            .map(|outcome| outcome.to_string())
            .unwrap_or_else(|| "unfinished".to_string());
        writeln!(
            self.out,
            "  {outcome} after {} moves ({} safe, {} random)",
            summary.turns, summary.safe_moves, summary.random_moves
        )?;
        Ok(())
    }

    fn on_session_end(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

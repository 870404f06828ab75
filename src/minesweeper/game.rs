//! A single game of a knowledge base against a board

use std::fmt;

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::{
    board::{BoardConfig, Minesweeper},
    knowledge::{InferenceReport, KnowledgeBase},
};
use crate::{Error, Result, types::Cell};

/// How the player chose a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    /// The cell was proven safe
    Safe,
    /// No safe cell was known, so the player guessed
    Random,
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveKind::Safe => write!(f, "safe"),
            MoveKind::Random => write!(f, "random"),
        }
    }
}

/// Outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    /// Every safe cell was revealed, or every mine was flagged
    Won,
    /// The player revealed a mine
    Lost { cell: Cell },
    /// No move was available although the game was not won
    Stuck,
}

impl GameOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            GameOutcome::Won => "won",
            GameOutcome::Lost { .. } => "lost",
            GameOutcome::Stuck => "stuck",
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Lost { cell } => write!(f, "lost at {cell}"),
            other => write!(f, "{}", other.label()),
        }
    }
}

/// One move and what it revealed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub cell: Cell,
    pub kind: MoveKind,
    /// Mines around the cell, or `None` if the cell was a mine
    pub count: Option<usize>,
    pub report: InferenceReport,
}

/// Totals for a finished (or abandoned) game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub outcome: Option<GameOutcome>,
    pub turns: usize,
    pub safe_moves: usize,
    pub random_moves: usize,
    pub mines_flagged: usize,
    pub inference_passes: usize,
    pub sentences_inferred: usize,
}

/// A knowledge base playing one board to the end.
///
/// # Examples
///
/// ```
/// use minesweeper_ai::{
///     minesweeper::{Game, GameOutcome, Minesweeper},
///     types::{BoardSize, Cell},
/// };
///
/// let board = Minesweeper::from_mines(BoardSize::new(3, 3)?, [Cell::new(2, 2)])?;
/// let mut game = Game::from_board(board, 7);
/// let outcome = game.play()?;
/// assert!(matches!(outcome, GameOutcome::Won | GameOutcome::Lost { .. }));
/// # Ok::<(), minesweeper_ai::Error>(())
/// ```
#[derive(Debug)]
pub struct Game {
    board: Minesweeper,
    ai: KnowledgeBase,
    rng: StdRng,
    turns: Vec<Turn>,
    outcome: Option<GameOutcome>,
}

impl Game {
    /// Create a game on a random board; the same seed drives mine placement
    /// and the player's guesses.
    ///
    /// # Errors
    ///
    /// Returns an error if the board configuration is invalid.
    pub fn new(config: &BoardConfig, seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let board = Minesweeper::new(config, &mut rng)?;
        Ok(Self::with_rng(board, rng))
    }

    /// Create a game on a prepared board.
    pub fn from_board(board: Minesweeper, seed: u64) -> Self {
        Self::with_rng(board, StdRng::seed_from_u64(seed))
    }

    fn with_rng(board: Minesweeper, rng: StdRng) -> Self {
        Self {
            ai: KnowledgeBase::new(board.size()),
            board,
            rng,
            turns: Vec::new(),
            outcome: None,
        }
    }

    /// Limit the inference passes per observation.
    pub fn with_max_passes(mut self, limit: usize) -> Self {
        self.ai = self.ai.with_max_passes(limit);
        self
    }

    pub fn board(&self) -> &Minesweeper {
        &self.board
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.ai
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Play one move.
    ///
    /// Returns the turn just played, or `None` if no move was available (the
    /// game is then over).
    ///
    /// # Errors
    ///
    /// - [`Error::GameOver`] if the game has already ended
    /// - any inference error raised by the knowledge base
    pub fn step(&mut self) -> Result<Option<&Turn>> {
        if self.outcome.is_some() {
            return Err(Error::GameOver);
        }

        let chosen = match self.ai.make_safe_move() {
            Some(cell) => Some((cell, MoveKind::Safe)),
            None => self
                .ai
                .make_random_move(&mut self.rng)
                .map(|cell| (cell, MoveKind::Random)),
        };
        let Some((cell, kind)) = chosen else {
            self.outcome = Some(if self.is_cleared() {
                GameOutcome::Won
            } else {
                GameOutcome::Stuck
            });
            return Ok(None);
        };

        if self.board.is_mine(cell)? {
            self.outcome = Some(GameOutcome::Lost { cell });
            self.turns.push(Turn {
                cell,
                kind,
                count: None,
                report: InferenceReport::default(),
            });
            return Ok(self.turns.last());
        }

        let count = self.board.nearby_mines(cell)?;
        let report = self.ai.add_knowledge(cell, count)?;
        for &mine in &report.new_mines {
            self.board.flag(mine)?;
        }
        self.turns.push(Turn {
            cell,
            kind,
            count: Some(count),
            report,
        });

        // a mine-free board has nothing to flag, so only clearing wins it
        if self.is_cleared() || (self.board.mine_count() > 0 && self.board.won()) {
            self.outcome = Some(GameOutcome::Won);
        }
        Ok(self.turns.last())
    }

    /// Play until the game ends.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`Game::step`].
    pub fn play(&mut self) -> Result<GameOutcome> {
        loop {
            if let Some(outcome) = self.outcome {
                return Ok(outcome);
            }
            self.step()?;
        }
    }

    /// Every safe cell has been revealed.
    fn is_cleared(&self) -> bool {
        self.ai.moves_made().len() == self.board.safe_cell_count()
    }

    pub fn summary(&self) -> GameSummary {
        let safe_moves = self
            .turns
            .iter()
            .filter(|turn| turn.kind == MoveKind::Safe)
            .count();
        GameSummary {
            outcome: self.outcome,
            turns: self.turns.len(),
            safe_moves,
            random_moves: self.turns.len() - safe_moves,
            mines_flagged: self.board.flagged().len(),
            inference_passes: self.turns.iter().map(|turn| turn.report.passes).sum(),
            sentences_inferred: self
                .turns
                .iter()
                .map(|turn| turn.report.sentences_inferred)
                .sum(),
        }
    }
}

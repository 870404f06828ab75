//! Play pipeline: many seeded games with observers attached

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    analysis::{GameStats, ProportionInterval},
    minesweeper::{BoardConfig, Game},
    ports::Observer,
};

/// Play session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    /// Number of games to play
    pub num_games: usize,

    /// Board dimensions and mine count
    pub board: BoardConfig,

    /// Base seed; game `i` uses `seed + i`. Random when unset.
    pub seed: Option<u64>,

    /// Optional limit on inference passes per observation
    pub max_passes: Option<usize>,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            num_games: 100,
            board: BoardConfig::default(),
            seed: None,
            max_passes: None,
        }
    }
}

impl PlayConfig {
    /// Check the configuration before any game is played.
    ///
    /// # Errors
    ///
    /// Returns an error if the board is invalid or no games are requested.
    pub fn validate(&self) -> Result<()> {
        if self.num_games == 0 {
            return Err(Error::InvalidConfiguration {
                message: "num_games must be at least 1".to_string(),
            });
        }
        if self.max_passes == Some(0) {
            return Err(Error::InvalidConfiguration {
                message: "max_passes must be at least 1".to_string(),
            });
        }
        self.board.validate()?;
        Ok(())
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| Error::Io {
            operation: format!("open config {path:?}"),
            source,
        })?;
        Ok(serde_json::from_reader(file)?)
    }
}

/// Result of a play session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayResult {
    pub board: BoardConfig,
    pub seed: u64,
    pub total_games: usize,
    pub wins: usize,
    pub losses: usize,
    pub stuck: usize,
    pub win_rate: f64,
    pub loss_rate: f64,
    pub safe_moves: usize,
    pub random_moves: usize,
    /// Share of moves that were proven safe rather than guessed
    pub safe_move_share: f64,
    /// 95% Clopper-Pearson interval for the win rate
    pub win_rate_interval: ProportionInterval,
}

impl PlayResult {
    fn from_stats(board: BoardConfig, seed: u64, stats: &GameStats) -> Result<Self> {
        Ok(Self {
            board,
            seed,
            total_games: stats.games,
            wins: stats.wins,
            losses: stats.losses,
            stuck: stats.stuck,
            win_rate: stats.win_rate(),
            loss_rate: stats.loss_rate(),
            safe_moves: stats.safe_moves,
            random_moves: stats.random_moves,
            safe_move_share: stats.safe_move_share(),
            win_rate_interval: stats.win_rate_interval()?,
        })
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }
}

/// Plays a series of games and reports them to observers
pub struct PlayPipeline {
    config: PlayConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl PlayPipeline {
    pub fn new(config: PlayConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &PlayConfig {
        &self.config
    }

    /// Play every configured game.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, an observer fails, or
    /// the knowledge base reports an inconsistency.
    pub fn run(&mut self) -> Result<PlayResult> {
        self.config.validate()?;
        let base_seed = self.config.seed.unwrap_or_else(rand::random);

        for observer in &mut self.observers {
            observer.on_session_start(self.config.num_games)?;
        }

        let mut stats = GameStats::default();
        for game_num in 0..self.config.num_games {
            let game = self.play_game(game_num, base_seed.wrapping_add(game_num as u64))?;
            stats.record(&game.summary());
        }

        for observer in &mut self.observers {
            observer.on_session_end()?;
        }

        PlayResult::from_stats(self.config.board, base_seed, &stats)
    }

    /// Play only the first configured game and hand it back, so the caller
    /// can inspect the final board and knowledge.
    ///
    /// # Errors
    ///
    /// Same as [`PlayPipeline::run`].
    pub fn run_single(&mut self) -> Result<Game> {
        self.config.validate()?;
        let seed = self.config.seed.unwrap_or_else(rand::random);

        for observer in &mut self.observers {
            observer.on_session_start(1)?;
        }
        let game = self.play_game(0, seed)?;
        for observer in &mut self.observers {
            observer.on_session_end()?;
        }
        Ok(game)
    }

    /// Play a single game to the end, reporting every turn.
    fn play_game(&mut self, game_num: usize, seed: u64) -> Result<Game> {
        let mut game = Game::new(&self.config.board, seed)?;
        if let Some(limit) = self.config.max_passes {
            game = game.with_max_passes(limit);
        }

        for observer in &mut self.observers {
            observer.on_game_start(game_num, &self.config.board)?;
        }

        while !game.is_over() {
            if let Some(turn) = game.step()? {
                for observer in &mut self.observers {
                    observer.on_turn(game_num, turn)?;
                }
            }
        }

        let summary = game.summary();
        for observer in &mut self.observers {
            observer.on_game_end(game_num, &summary)?;
        }

        Ok(game)
    }
}

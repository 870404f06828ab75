//! Observer port - abstraction for watching games as they are played
//!
//! Progress bars, per-turn traces, metrics and JSONL export all hook into
//! play through this trait, so the play loop never formats output itself.

use crate::{
    Result,
    minesweeper::{BoardConfig, GameSummary, Turn},
};

/// Observer trait for monitoring play
///
/// # Event Sequence
///
/// 1. `on_session_start(total_games)` - once at the beginning
/// 2. For each game:
///    - `on_game_start(game_num, config)`
///    - `on_turn(game_num, turn)` - for each move
///    - `on_game_end(game_num, summary)`
/// 3. `on_session_end()` - once at the end
///
/// # Examples
///
/// ```no_run
/// use minesweeper_ai::{minesweeper::GameSummary, ports::Observer};
///
/// struct CountingObserver {
///     games: usize,
/// }
///
/// impl Observer for CountingObserver {
///     fn on_game_end(
///         &mut self,
///         _game_num: usize,
///         _summary: &GameSummary,
///     ) -> minesweeper_ai::Result<()> {
///         self.games += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once before the first game.
    fn on_session_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a game starts.
    fn on_game_start(&mut self, _game_num: usize, _config: &BoardConfig) -> Result<()> {
        Ok(())
    }

    /// Called after every move, with what the move revealed and deduced.
    fn on_turn(&mut self, _game_num: usize, _turn: &Turn) -> Result<()> {
        Ok(())
    }

    /// Called when a game ends.
    fn on_game_end(&mut self, _game_num: usize, _summary: &GameSummary) -> Result<()> {
        Ok(())
    }

    /// Called once after the last game. Use this to flush outputs.
    fn on_session_end(&mut self) -> Result<()> {
        Ok(())
    }
}

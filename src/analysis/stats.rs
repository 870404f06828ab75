//! Statistical summaries of played games

use serde::{Deserialize, Serialize};
use statrs::distribution::{Beta, ContinuousCDF};

use crate::{
    Error, Result,
    minesweeper::{GameOutcome, GameSummary},
};

/// A two-sided confidence interval for a proportion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProportionInterval {
    pub lower: f64,
    pub upper: f64,
    pub confidence: f64,
}

/// Clopper-Pearson (exact binomial) interval for `successes` out of `trials`.
///
/// # Errors
///
/// Returns [`Error::Statistics`] if `confidence` is not in `(0, 1)` or
/// `successes > trials`.
///
/// # Examples
///
/// ```
/// use minesweeper_ai::analysis::stats::clopper_pearson;
///
/// let interval = clopper_pearson(50, 100, 0.95)?;
/// assert!(interval.lower < 0.5 && 0.5 < interval.upper);
/// assert!((interval.lower - 0.398).abs() < 0.01);
/// # Ok::<(), minesweeper_ai::Error>(())
/// ```
pub fn clopper_pearson(successes: usize, trials: usize, confidence: f64) -> Result<ProportionInterval> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(Error::Statistics {
            message: format!("confidence {confidence} must lie strictly between 0 and 1"),
        });
    }
    if successes > trials {
        return Err(Error::Statistics {
            message: format!("{successes} successes out of {trials} trials"),
        });
    }
    if trials == 0 {
        return Ok(ProportionInterval {
            lower: 0.0,
            upper: 1.0,
            confidence,
        });
    }

    let alpha = 1.0 - confidence;
    let k = successes as f64;
    let n = trials as f64;
    let beta = |a: f64, b: f64| {
        Beta::new(a, b).map_err(|e| Error::Statistics {
            message: e.to_string(),
        })
    };

    let lower = if successes == 0 {
        0.0
    } else {
        beta(k, n - k + 1.0)?.inverse_cdf(alpha / 2.0)
    };
    let upper = if successes == trials {
        1.0
    } else {
        beta(k + 1.0, n - k)?.inverse_cdf(1.0 - alpha / 2.0)
    };

    Ok(ProportionInterval {
        lower,
        upper,
        confidence,
    })
}

/// Aggregate statistics over a set of games
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub stuck: usize,
    pub safe_moves: usize,
    pub random_moves: usize,
    pub mines_flagged: usize,
    pub inference_passes: usize,
}

impl GameStats {
    /// Add one finished game.
    pub fn record(&mut self, summary: &GameSummary) {
        self.games += 1;
        match summary.outcome {
            Some(GameOutcome::Won) => self.wins += 1,
            Some(GameOutcome::Lost { .. }) => self.losses += 1,
            Some(GameOutcome::Stuck) | None => self.stuck += 1,
        }
        self.safe_moves += summary.safe_moves;
        self.random_moves += summary.random_moves;
        self.mines_flagged += summary.mines_flagged;
        self.inference_passes += summary.inference_passes;
    }

    pub fn win_rate(&self) -> f64 {
        ratio(self.wins, self.games)
    }

    pub fn loss_rate(&self) -> f64 {
        ratio(self.losses, self.games)
    }

    /// Share of all moves that were proven safe rather than guessed.
    pub fn safe_move_share(&self) -> f64 {
        ratio(self.safe_moves, self.safe_moves + self.random_moves)
    }

    /// 95% Clopper-Pearson interval for the win rate.
    pub fn win_rate_interval(&self) -> Result<ProportionInterval> {
        clopper_pearson(self.wins, self.games, 0.95)
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

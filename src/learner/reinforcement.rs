//! Multiplicative reinforcement rule
//!
//! A win scales every weight used during the game up by a fixed factor. A
//! loss scales them down, but only while they sit above the floor.

use serde::{Deserialize, Serialize};

use super::move_table::INITIAL_WEIGHT;

/// Factors applied to move weights after a game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReinforcementValues {
    /// Multiplier for every move of a won game
    pub win: f64,
    /// Multiplier for every move of a lost game
    pub loss: f64,
    /// Weights at or below this value are not decayed further
    pub floor: f64,
}

impl Default for ReinforcementValues {
    fn default() -> Self {
        ReinforcementValues {
            win: 1.1,
            loss: 0.9,
            floor: 1.0,
        }
    }
}

impl ReinforcementValues {
    /// Check that wins never lower a weight and losses never take it
    /// below the initial weight.
    ///
    /// Requires `win >= 1`, `0 < loss <= 1` and `floor >= 1`, all finite.
    pub fn validate(&self) -> crate::Result<()> {
        let finite = self.win.is_finite() && self.loss.is_finite() && self.floor.is_finite();
        let problem = if !finite {
            Some("factors must be finite")
        } else if self.win < 1.0 {
            Some("win factor must be at least 1")
        } else if self.loss <= 0.0 || self.loss > 1.0 {
            Some("loss factor must lie in (0, 1]")
        } else if self.floor < INITIAL_WEIGHT {
            Some("floor must not be below the initial weight")
        } else {
            None
        };

        match problem {
            Some(problem) => Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "reinforcement {problem} (win={}, loss={}, floor={})",
                    self.win, self.loss, self.floor
                ),
            }),
            None => Ok(()),
        }
    }
}

/// Outcome of a game from one agent's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
}

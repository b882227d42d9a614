//! Match configuration.
//!
//! A `MatchConfig` fixes everything chosen before the first roll: how many
//! seats play, whether one of them is the computer, the RNG seed, the
//! auto-skip grace period and the computer's scoring weights.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{random_seed, PlayerId};
use crate::ai::HeuristicWeights;
use crate::error::ConfigError;

/// Configuration for one match.
///
/// ## Example
///
/// ```
/// use thayam::core::{MatchConfig, PlayerId};
///
/// let config = MatchConfig::new(2).vs_computer().with_seed(7);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.active_players(), vec![PlayerId::P1, PlayerId::P3]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Seats in play (2, 3 or 4).
    pub player_count: usize,

    /// Whether `computer_seat` is played by the engine.
    pub vs_computer: bool,

    /// Seat driven by the computer player in a vs-computer match.
    pub computer_seat: PlayerId,

    /// Seed for dice and computer jitter. Same seed, same match.
    /// Drawn from OS entropy unless set.
    pub seed: u64,

    /// Delay before a turn with no playable roll is skipped.
    /// Zero skips inside the call that discovered it.
    pub turn_end_grace_ms: u64,

    /// Computer scoring weights.
    pub weights: HeuristicWeights,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            player_count: 4,
            vs_computer: false,
            computer_seat: PlayerId::P3,
            seed: random_seed(),
            turn_end_grace_ms: 1000,
            weights: HeuristicWeights::default(),
        }
    }
}

impl MatchConfig {
    /// Create a config for `player_count` seats with defaults elsewhere.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Hand `computer_seat` to the engine.
    #[must_use]
    pub fn vs_computer(mut self) -> Self {
        self.vs_computer = true;
        self
    }

    /// Set the computer seat.
    #[must_use]
    pub fn with_computer_seat(mut self, seat: PlayerId) -> Self {
        self.computer_seat = seat;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the auto-skip grace period.
    #[must_use]
    pub fn with_turn_end_grace(mut self, grace: Duration) -> Self {
        self.turn_end_grace_ms = grace.as_millis() as u64;
        self
    }

    /// Set the computer scoring weights.
    #[must_use]
    pub fn with_weights(mut self, weights: HeuristicWeights) -> Self {
        self.weights = weights;
        self
    }

    /// The auto-skip grace period.
    #[must_use]
    pub fn turn_end_grace(&self) -> Duration {
        Duration::from_millis(self.turn_end_grace_ms)
    }

    /// Seats in play, in turn order.
    ///
    /// Two players sit on opposite arms; three leave the blue arm empty.
    #[must_use]
    pub fn active_players(&self) -> Vec<PlayerId> {
        match self.player_count {
            2 => vec![PlayerId::P1, PlayerId::P3],
            3 => vec![PlayerId::P1, PlayerId::P3, PlayerId::P4],
            _ => PlayerId::ALL.to_vec(),
        }
    }

    /// Check the config is playable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=4).contains(&self.player_count) {
            return Err(ConfigError::PlayerCount(self.player_count));
        }
        if self.vs_computer && !self.active_players().contains(&self.computer_seat) {
            return Err(ConfigError::ComputerSeatInactive {
                seat: self.computer_seat,
                player_count: self.player_count,
            });
        }
        Ok(())
    }
}

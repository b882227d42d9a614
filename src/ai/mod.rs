//! Computer opponent.
//!
//! ## Overview
//!
//! - `heuristic`: pure scoring of one legal move (`score_move`)
//! - `selector`: `MoveSelector` policies built on top of the score
//! - `controller`: `ComputerPlayer`, the roll-then-move decision cycle
//!
//! The computer never looks further than the move in front of it: every
//! legal (roll, token) pair is scored on the position it produces and the
//! best one (plus a little jitter) is played.
//!
//! ## Usage
//!
//! ```
//! use thayam::core::{MatchConfig, PlayerId};
//! use thayam::turn::Match;
//!
//! // P3 is played by the engine; it moves as soon as its turn comes up.
//! let config = MatchConfig::new(2).vs_computer().with_seed(5);
//! let game = Match::start(config).unwrap();
//! assert_eq!(game.computer_seat(), Some(PlayerId::P3));
//! ```

pub mod controller;
pub mod heuristic;
pub mod selector;

pub use controller::ComputerPlayer;
pub use heuristic::{score_move, HeuristicWeights};
pub use selector::{GreedyHeuristic, MoveSelector, UniformRandom};

//! # thayam
//!
//! Rules engine for Thayam, a four-arm race-and-capture board game in the
//! Pachisi family, for 2 to 4 seats with an optional computer opponent.
//!
//! ## Design Principles
//!
//! 1. **Explicit state**: Token positions, cell occupancy and cut counters
//!    live in one `GameState`; nothing is read back from a rendered board.
//!
//! 2. **Intent, not rendering**: Moves return transit scripts and the match
//!    queues `GameEvent`s (sounds, captures, turn hand-off). The engine never
//!    waits for a renderer.
//!
//! 3. **Deterministic by seed**: Dice and computer jitter run on seeded
//!    ChaCha8 streams, so a seed replays a whole match.
//!
//! ## Modules
//!
//! - `core`: Seats, tokens, state, commands, RNG, configuration
//! - `board`: Per-seat paths, safe zones, cell occupancy
//! - `dice`: Throws, scoring and extra rolls
//! - `rules`: Move validation and execution
//! - `turn`: The `Match` session and turn state machine
//! - `ai`: Heuristic computer player
//! - `error`: Rejection and configuration errors
//!
//! ## Quick start
//!
//! ```
//! use thayam::{Match, MatchConfig, PlayerId};
//!
//! let mut game = Match::start(MatchConfig::new(4).with_seed(1)).unwrap();
//! let roll = game.request_roll(PlayerId::P1).unwrap();
//! assert!(roll.total >= 1);
//! ```

pub mod ai;
pub mod board;
pub mod core;
pub mod dice;
pub mod error;
pub mod rules;
pub mod turn;

// Re-export commonly used types
pub use crate::core::{
    Color, Command, GameRng, GameState, MatchConfig, PlayerId, PlayerMap, Position, TokenId,
    TokenSlot, TurnState,
};

pub use crate::board::{Board, CellId, Occupancy, HOME};

pub use crate::dice::{DiceRoll, DiceSource, RandomDice, ScriptedDice};

pub use crate::rules::{LegalMove, MatchOutcome, MoveResult, MoveTarget};

pub use crate::turn::{CommandOutput, GameEvent, Match, SoundCue};

pub use crate::ai::{ComputerPlayer, GreedyHeuristic, HeuristicWeights, MoveSelector};

pub use crate::error::{ConfigError, MoveRejection, Rejection};

//! Core match types: seats, tokens, state, commands, RNG, configuration.
//!
//! These are the building blocks shared by the board, the rules, the turn
//! state machine and the computer player.

pub mod action;
pub mod config;
pub mod player;
pub mod rng;
pub mod state;
pub mod token;

pub use action::{Command, MoveRecord};
pub use config::MatchConfig;
pub use player::{Color, PlayerId, PlayerMap, SEAT_COUNT};
pub use rng::{random_seed, GameRng};
pub use state::{GameState, PlayerStats, TurnState};
pub use token::{Position, TokenId, TokenSlot, BASE, TOKENS_PER_PLAYER};

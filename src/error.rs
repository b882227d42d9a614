//! Rejection and configuration errors.
//!
//! Rejections are user-input problems: the command is refused and no state
//! changes. Their `Display` text is the notice shown to the player.
//! Invariant violations are not represented here; those panic.

use thiserror::Error;

use crate::core::PlayerId;

/// Why the validator refused a (token, roll) pair.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum MoveRejection {
    #[error("token is already home")]
    TokenHome,
    #[error("must roll a 1 to enter")]
    MustRollOneToEnter,
    #[error("move overshoots the path")]
    Overshoot,
    #[error("you must cut an opponent's token to enter the inner path")]
    InnerPathLocked,
    #[error("safe zone is exclusively occupied by {owner}")]
    SafeZoneOccupied { owner: PlayerId },
}

/// Why a command was refused.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("no match in progress")]
    MatchNotStarted,
    #[error("the match is over")]
    MatchOver,
    #[error("it is {active}'s turn, not {requested}'s")]
    NotYourTurn { active: PlayerId, requested: PlayerId },
    #[error("max rolls reached or rolling is closed; move your tokens")]
    RollNotAllowed,
    #[error("a move is still in flight")]
    MoveInFlight,
    #[error("no move is in flight")]
    NoMoveInFlight,
    #[error("the turn is ending")]
    TurnEnding,
    #[error("no turn end is pending")]
    NoTurnEnding,
    #[error("select a dice roll first")]
    NoArmedRoll,
    #[error("no roll at index {index}")]
    InvalidRollIndex { index: usize },
    #[error("roll at index {index} was already used")]
    RollAlreadyUsed { index: usize },
    #[error("no unused roll to select")]
    NothingToSelect,
    #[error(transparent)]
    IllegalMove(#[from] MoveRejection),
}

/// Invalid match configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("player count must be 2, 3 or 4 (got {0})")]
    PlayerCount(usize),
    #[error("computer seat {seat} is not active with {player_count} players")]
    ComputerSeatInactive { seat: PlayerId, player_count: usize },
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

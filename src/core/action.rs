//! Commands and move records.
//!
//! A `Command` is one input from the active seat (a human click or a
//! computer decision). A `MoveRecord` is what a committed move leaves in
//! the match history, for replay and debugging.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use super::token::{Position, TokenId, TokenSlot};

/// One input to the turn state machine.
///
/// ## Example
///
/// ```
/// use thayam::core::{Command, PlayerId, TokenSlot};
///
/// let json = serde_json::to_string(&Command::Move { slot: TokenSlot::new(1) }).unwrap();
/// let back: Command = serde_json::from_str(&json).unwrap();
/// assert_eq!(back, Command::Move { slot: TokenSlot::new(1) });
/// assert_eq!(Command::Roll { player: PlayerId::P1 }.name(), "roll");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Throw the dice.
    Roll { player: PlayerId },
    /// Arm (or disarm) the roll at `index`.
    SelectRoll { index: usize },
    /// Arm the next unused roll, wrapping around.
    SelectNextRoll,
    /// Arm the previous unused roll, wrapping around.
    SelectPreviousRoll,
    /// Apply the armed roll to the token in `slot`.
    Move { slot: TokenSlot },
}

impl Command {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Command::Roll { .. } => "roll",
            Command::SelectRoll { .. } => "select_roll",
            Command::SelectNextRoll => "select_next_roll",
            Command::SelectPreviousRoll => "select_previous_roll",
            Command::Move { .. } => "move",
        }
    }
}

/// A committed move in the match history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Turn number when the move was made (starts at 1).
    pub turn: u32,
    /// Sequence number within the match.
    pub sequence: u32,
    /// The token that moved.
    pub token: TokenId,
    /// Roll total consumed.
    pub roll: u8,
    /// Position before the move.
    pub from: Position,
    /// Position after the move.
    pub to: Position,
    /// Opposing tokens sent back to base.
    pub captured: SmallVec<[TokenId; 4]>,
}

impl MoveRecord {
    /// The seat that moved.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.token.owner
    }
}

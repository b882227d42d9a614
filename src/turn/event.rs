//! Effect events for the presentation layer.
//!
//! The match never renders or plays audio. It queues `GameEvent`s that a
//! renderer drains with [`Match::drain_events`](super::Match::drain_events)
//! and acts on at its own pace. Nothing in the engine waits for them.

use serde::Serialize;

use crate::board::{CellId, Transit};
use crate::core::{PlayerId, Position, TokenId};
use crate::dice::DiceRoll;

/// Audio intents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    Start,
    Roll,
    Select,
    Move,
    Safe,
    Kill,
    Home,
}

impl SoundCue {
    /// Asset-style name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            SoundCue::Start => "start",
            SoundCue::Roll => "roll",
            SoundCue::Select => "select",
            SoundCue::Move => "move",
            SoundCue::Safe => "safe",
            SoundCue::Kill => "kill",
            SoundCue::Home => "home",
        }
    }
}

impl std::fmt::Display for SoundCue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Something the presentation layer may want to show.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// A match began (or restarted) with these seats.
    MatchStarted { players: Vec<PlayerId> },

    /// Dice thrown.
    RollResolved { player: PlayerId, roll: DiceRoll, extra_roll: bool },

    /// A roll was armed (`Some`) or disarmed (`None`).
    RollArmed { player: PlayerId, index: Option<usize> },

    /// Token travel script, destination last.
    MoveTransit { token: TokenId, from: Position, to: Position, cells: Transit },

    /// An opposing token was cut and is heading back to base.
    Capture { by: PlayerId, token: TokenId, retreat: Vec<CellId> },

    /// A token reached home.
    TokenHome { token: TokenId },

    /// No roll can be played; the turn will end after the grace period.
    NoLegalMoves { player: PlayerId, grace_ms: u64 },

    /// Turn passed to `next`.
    TurnEnded { previous: PlayerId, next: PlayerId },

    /// The match is over.
    MatchWon { winner: PlayerId },

    /// Play an audio cue.
    Sound { cue: SoundCue },

    /// User-visible notice (usually a rejected command).
    Notice { player: Option<PlayerId>, message: String },
}

impl GameEvent {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::MatchStarted { .. } => "match_started",
            GameEvent::RollResolved { .. } => "roll_resolved",
            GameEvent::RollArmed { .. } => "roll_armed",
            GameEvent::MoveTransit { .. } => "move_transit",
            GameEvent::Capture { .. } => "capture",
            GameEvent::TokenHome { .. } => "token_home",
            GameEvent::NoLegalMoves { .. } => "no_legal_moves",
            GameEvent::TurnEnded { .. } => "turn_ended",
            GameEvent::MatchWon { .. } => "match_won",
            GameEvent::Sound { .. } => "sound",
            GameEvent::Notice { .. } => "notice",
        }
    }

    /// Whether this is a sound cue.
    #[must_use]
    pub fn is_sound(&self) -> bool {
        matches!(self, GameEvent::Sound { .. })
    }
}

//! Move legality and move execution.
//!
//! The rules are split the same way a move is:
//! - `validator`: can this token use this roll, and if not, why
//! - `executor`: commit an accepted move (positions, captures, cuts, win)
//!
//! Neither side knows about turns, dice or who is allowed to act; that is
//! the turn state machine's job.

pub mod executor;
pub mod validator;

use serde::Serialize;

use crate::core::PlayerId;

pub use executor::{apply, Capture, MoveResult};
pub use validator::{has_legal_move, legal_moves, validate, LegalMove, LegalMoves, MoveTarget};

/// How a finished match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum MatchOutcome {
    /// First seat with all four tokens home.
    Winner(PlayerId),
}

impl MatchOutcome {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            MatchOutcome::Winner(p) => *p == player,
        }
    }

    /// The winning seat.
    #[must_use]
    pub fn winner(&self) -> PlayerId {
        match self {
            MatchOutcome::Winner(p) => *p,
        }
    }
}

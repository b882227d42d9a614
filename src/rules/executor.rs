//! Move execution.
//!
//! `apply` commits a move the validator has already accepted:
//! - Moves the token and reports the cells it passes through
//! - Captures every opposing token on an exposed destination cell
//! - Counts one cut per capturing landing
//! - Detects home entry and the win
//!
//! Calling it for a move the validator would refuse is a programming
//! error and panics.

use serde::Serialize;
use smallvec::SmallVec;

use crate::board::{Board, CellId, Transit};
use crate::core::{GameState, PlayerId, Position, TokenId, TokenSlot};

use super::validator::target_position;

/// An opposing token sent back to base.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Capture {
    /// The captured token.
    pub token: TokenId,
    /// Where it stood.
    pub from: Position,
    /// Its own path cells back to the entry cell, for the drag-back animation.
    pub retreat: Vec<CellId>,
}

/// Everything a committed move changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoveResult {
    pub token: TokenId,
    pub roll: u8,
    pub from: Position,
    pub to: Position,
    pub cell: CellId,
    /// Cells passed through, destination last.
    pub transit: Transit,
    pub captures: SmallVec<[Capture; 4]>,
    pub reached_home: bool,
    /// All four of the mover's tokens are home.
    pub won: bool,
}

impl MoveResult {
    /// Whether the move captured anything.
    #[must_use]
    pub fn is_capture(&self) -> bool {
        !self.captures.is_empty()
    }

    /// The seat that moved.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.token.owner
    }
}

/// Commit a validated move.
///
/// Panics if the move breaks the entry, overshoot or home rules.
pub fn apply(
    board: &Board,
    state: &mut GameState,
    player: PlayerId,
    slot: TokenSlot,
    roll: u8,
) -> MoveResult {
    let token = TokenId::new(player, slot);
    let from = state.position(token);
    let to = match target_position(board, player, from, roll) {
        Ok(to) => to,
        Err(reason) => panic!("Illegal move applied for {token} with roll {roll}: {reason}"),
    };
    assert!(
        !board.is_inner(player, to) || state.stats(player).has_cut(),
        "Inner path entered by {token} without a cut"
    );

    let Some(cell) = board.cell_at(player, to) else {
        panic!("No cell at position {to} for {player}");
    };
    let transit = board.transit(player, from, to);

    let mut captures = SmallVec::new();
    if board.is_exposed(cell) {
        let victims: SmallVec<[TokenId; 4]> = state.occupancy().opponents_at(cell, player).collect();
        for victim in victims {
            let victim_from = state.position(victim);
            captures.push(Capture {
                token: victim,
                from: victim_from,
                retreat: board.retreat(victim.owner, victim_from),
            });
            state.send_to_base(victim);
        }
        if !captures.is_empty() {
            state.record_cut(player);
        }
    }

    state.set_position(board, token, to);

    let reached_home = to == board.path_len(player);
    let won = reached_home && state.has_won(board, player);

    MoveResult {
        token,
        roll,
        from,
        to,
        cell,
        transit,
        captures,
        reached_home,
        won,
    }
}

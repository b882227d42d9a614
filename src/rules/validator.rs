//! Move legality.
//!
//! `validate` decides whether a token may use a roll. The checks run in a
//! fixed order and the first failure is the reported reason:
//!
//! 1. A token already home cannot move.
//! 2. A token in base needs exactly a `1`, which places it on position 1.
//! 3. The target may not pass home.
//! 4. The inner path (and home) stay locked until the player has cut.
//! 5. A safe zone held by another player cannot be landed on.

use serde::Serialize;
use smallvec::SmallVec;

use crate::board::{Board, CellId};
use crate::core::{GameState, PlayerId, Position, TokenId, TokenSlot, TurnState, BASE};
use crate::error::MoveRejection;

/// Where a legal move lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MoveTarget {
    /// Position before the move.
    pub from: Position,
    /// Position after the move.
    pub to: Position,
    /// Destination cell.
    pub cell: CellId,
}

impl MoveTarget {
    /// Whether the move brings a token out of base.
    #[must_use]
    pub fn is_entry(&self) -> bool {
        self.from == BASE
    }
}

/// A playable (roll, token) pair for the seat to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LegalMove {
    /// Index of the roll in the turn.
    pub roll_index: usize,
    /// Roll total.
    pub roll: u8,
    /// Token slot.
    pub slot: TokenSlot,
    /// Where it lands.
    pub target: MoveTarget,
}

/// Legal moves, usually well under the 20-pair maximum.
pub type LegalMoves = SmallVec<[LegalMove; 8]>;

/// Target position for a roll, before any gate or occupancy check.
///
/// Shared with the executor so both sides agree on the arithmetic.
pub(crate) fn target_position(
    board: &Board,
    player: PlayerId,
    from: Position,
    roll: u8,
) -> Result<Position, MoveRejection> {
    let home = board.path_len(player);
    if from == home {
        return Err(MoveRejection::TokenHome);
    }
    if from == BASE {
        return if roll == 1 {
            Ok(1)
        } else {
            Err(MoveRejection::MustRollOneToEnter)
        };
    }
    let to = from as u16 + roll as u16;
    if to > home as u16 {
        return Err(MoveRejection::Overshoot);
    }
    Ok(to as Position)
}

/// Check whether `player` may move the token in `slot` by `roll`.
///
/// ```
/// use thayam::board::Board;
/// use thayam::core::{GameState, PlayerId, TokenSlot};
/// use thayam::error::MoveRejection;
/// use thayam::rules::validate;
///
/// let board = Board::standard();
/// let state = GameState::new();
/// let slot = TokenSlot::new(0);
///
/// assert_eq!(validate(&board, &state, PlayerId::P1, slot, 1).unwrap().to, 1);
/// assert_eq!(
///     validate(&board, &state, PlayerId::P1, slot, 5),
///     Err(MoveRejection::MustRollOneToEnter)
/// );
/// ```
pub fn validate(
    board: &Board,
    state: &GameState,
    player: PlayerId,
    slot: TokenSlot,
    roll: u8,
) -> Result<MoveTarget, MoveRejection> {
    let from = state.position(TokenId::new(player, slot));
    let to = target_position(board, player, from, roll)?;

    if board.is_inner(player, to) && !state.stats(player).has_cut() {
        return Err(MoveRejection::InnerPathLocked);
    }

    // Target is within the path, so the cell exists.
    let cell = board
        .cell_at(player, to)
        .ok_or(MoveRejection::Overshoot)?;

    if board.is_safe_zone(cell) {
        if let Some(holder) = state.occupancy().opponents_at(cell, player).next() {
            return Err(MoveRejection::SafeZoneOccupied { owner: holder.owner });
        }
    }

    Ok(MoveTarget { from, to, cell })
}

/// Every legal (unused roll, token) pair for `player`, roll-major.
pub fn legal_moves(
    board: &Board,
    state: &GameState,
    turn: &TurnState,
    player: PlayerId,
) -> LegalMoves {
    let mut moves = LegalMoves::new();
    for roll_index in turn.unused_indices() {
        let roll = turn.rolls()[roll_index];
        for slot in TokenSlot::ALL {
            if let Ok(target) = validate(board, state, player, slot, roll) {
                moves.push(LegalMove {
                    roll_index,
                    roll,
                    slot,
                    target,
                });
            }
        }
    }
    moves
}

/// Whether any unused roll is playable by any of `player`'s tokens.
#[must_use]
pub fn has_legal_move(board: &Board, state: &GameState, turn: &TurnState, player: PlayerId) -> bool {
    turn.unused_indices().any(|roll_index| {
        let roll = turn.rolls()[roll_index];
        TokenSlot::ALL
            .iter()
            .any(|slot| validate(board, state, player, *slot, roll).is_ok())
    })
}

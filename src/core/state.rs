//! Match state: token positions, cut counters, the current turn.
//!
//! ## GameState
//!
//! Lives for the whole match:
//! - Token positions per seat (`0` = base, `path_len` = home)
//! - Per-seat `PlayerStats` (monotonic cut counter)
//! - Cell occupancy, kept in step with positions
//! - Move history
//!
//! ## TurnState
//!
//! Recreated at the start of every turn:
//! - Roll totals thrown this turn (at most five)
//! - Which of them have been consumed
//! - Whether another throw is allowed
//! - The armed roll, if any

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::MoveRecord;
use super::player::{PlayerId, PlayerMap};
use super::token::{Position, TokenId, BASE, TOKENS_PER_PLAYER};
use crate::board::{Board, Occupancy};
use crate::dice::MAX_ROLLS_PER_TURN;

/// Per-seat statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Capturing landings made this match. Never decreases.
    pub cuts: u32,
}

impl PlayerStats {
    /// Whether the inner path and home are unlocked.
    #[must_use]
    pub fn has_cut(&self) -> bool {
        self.cuts > 0
    }
}

/// Positions, stats and occupancy for one match.
///
/// Uses `im::Vector` for the move history so snapshots stay cheap.
#[derive(Clone, Debug, Default)]
pub struct GameState {
    positions: PlayerMap<[Position; TOKENS_PER_PLAYER]>,
    stats: PlayerMap<PlayerStats>,
    occupancy: Occupancy,
    history: Vector<MoveRecord>,
}

impl GameState {
    /// All tokens in base, no cuts, empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Positions ===

    /// Position of a token.
    #[must_use]
    pub fn position(&self, token: TokenId) -> Position {
        self.positions[token.owner][token.slot.index()]
    }

    /// Positions of a seat's four tokens, by slot.
    #[must_use]
    pub fn positions_of(&self, player: PlayerId) -> &[Position; TOKENS_PER_PLAYER] {
        &self.positions[player]
    }

    /// Put a token at `position`, keeping occupancy in step.
    ///
    /// Used by the executor and for arranging boards (puzzles, tests).
    /// Panics if `position` is past the owner's home.
    pub fn set_position(&mut self, board: &Board, token: TokenId, position: Position) {
        let home = board.path_len(token.owner);
        assert!(position <= home, "Position {position} out of range for {token} (home {home})");
        self.positions[token.owner][token.slot.index()] = position;
        match board.cell_at(token.owner, position) {
            Some(cell) => {
                self.occupancy.move_to(token, cell);
            }
            None => {
                self.occupancy.remove(token);
            }
        }
    }

    /// Send a token back to base.
    pub fn send_to_base(&mut self, token: TokenId) {
        self.positions[token.owner][token.slot.index()] = BASE;
        self.occupancy.remove(token);
    }

    /// Tokens of `player` that have left base and not reached home.
    #[must_use]
    pub fn tokens_on_board(&self, board: &Board, player: PlayerId) -> usize {
        let home = board.path_len(player);
        self.positions[player].iter().filter(|p| **p != BASE && **p != home).count()
    }

    /// Tokens of `player` that have reached home.
    #[must_use]
    pub fn finished_tokens(&self, board: &Board, player: PlayerId) -> usize {
        let home = board.path_len(player);
        self.positions[player].iter().filter(|p| **p == home).count()
    }

    /// Whether all four of a seat's tokens are home.
    #[must_use]
    pub fn has_won(&self, board: &Board, player: PlayerId) -> bool {
        self.finished_tokens(board, player) == TOKENS_PER_PLAYER
    }

    // === Stats ===

    /// A seat's statistics.
    #[must_use]
    pub fn stats(&self, player: PlayerId) -> &PlayerStats {
        &self.stats[player]
    }

    /// A seat's cut counter.
    #[must_use]
    pub fn cuts(&self, player: PlayerId) -> u32 {
        self.stats[player].cuts
    }

    /// Record one capturing landing by `player`.
    pub fn record_cut(&mut self, player: PlayerId) {
        self.stats[player].cuts += 1;
    }

    // === Occupancy ===

    /// Live cell occupancy.
    #[must_use]
    pub fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    // === History ===

    /// Committed moves, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    /// Append a committed move.
    pub fn record_move(&mut self, record: MoveRecord) {
        self.history.push_back(record);
    }
}

/// Rolls and selection for the turn in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    rolls: SmallVec<[u8; MAX_ROLLS_PER_TURN]>,
    used: SmallVec<[usize; MAX_ROLLS_PER_TURN]>,
    can_roll: bool,
    selected: Option<usize>,
}

impl Default for TurnState {
    fn default() -> Self {
        Self {
            rolls: SmallVec::new(),
            used: SmallVec::new(),
            can_roll: true,
            selected: None,
        }
    }
}

impl TurnState {
    /// Fresh turn: no rolls, rolling open.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Roll totals thrown this turn, in order.
    #[must_use]
    pub fn rolls(&self) -> &[u8] {
        &self.rolls
    }

    /// Consumed roll indices, in consumption order.
    #[must_use]
    pub fn used(&self) -> &[usize] {
        &self.used
    }

    /// Whether another throw is allowed.
    #[must_use]
    pub fn can_roll(&self) -> bool {
        self.can_roll
    }

    /// Index of the armed roll.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Total of the armed roll.
    #[must_use]
    pub fn selected_value(&self) -> Option<u8> {
        self.selected.map(|i| self.rolls[i])
    }

    /// Whether the roll at `index` has been consumed.
    #[must_use]
    pub fn is_used(&self, index: usize) -> bool {
        self.used.contains(&index)
    }

    /// Unused roll indices in throw order.
    pub fn unused_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.rolls.len()).filter(move |i| !self.is_used(*i))
    }

    /// Whether every thrown roll has been consumed.
    #[must_use]
    pub fn all_used(&self) -> bool {
        self.used.len() == self.rolls.len()
    }

    pub(crate) fn push_roll(&mut self, total: u8, grants_extra: bool) {
        assert!(self.rolls.len() < MAX_ROLLS_PER_TURN, "Roll cap exceeded");
        self.rolls.push(total);
        if self.rolls.len() == MAX_ROLLS_PER_TURN || !grants_extra {
            self.can_roll = false;
        }
    }

    pub(crate) fn set_selected(&mut self, index: Option<usize>) {
        self.selected = index;
    }

    pub(crate) fn mark_used(&mut self, index: usize) {
        assert!(index < self.rolls.len() && !self.is_used(index), "Roll {index} not available");
        self.used.push(index);
        if self.selected == Some(index) {
            self.selected = None;
        }
    }
}

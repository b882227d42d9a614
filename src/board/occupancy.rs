//! Cell occupancy: which tokens stand on which cell.
//!
//! The `Occupancy` map is the single source of truth for "who is on this
//! square". It is maintained by the move executor alongside token
//! positions and is what the validator and the computer player consult for
//! safe-zone ownership, captures, and stacking. Tokens in base are not on
//! any cell.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::topology::CellId;
use crate::core::{PlayerId, TokenId};

/// Tokens on one cell, in arrival order.
pub type Occupants = SmallVec<[TokenId; 4]>;

/// Tracks token locations by cell.
///
/// ## Usage
///
/// ```
/// use thayam::board::{CellId, Occupancy};
/// use thayam::core::{PlayerId, TokenId, TokenSlot};
///
/// let mut occupancy = Occupancy::new();
/// let cell = CellId::new("c-11-2");
/// let token = TokenId::new(PlayerId::P1, TokenSlot::new(0));
///
/// occupancy.place(token, cell);
/// assert_eq!(occupancy.occupants(cell), &[token]);
/// assert!(occupancy.has_opponent_of(cell, PlayerId::P2));
/// assert!(!occupancy.has_opponent_of(cell, PlayerId::P1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Occupancy {
    /// token -> cell
    locations: FxHashMap<TokenId, CellId>,

    /// cell -> tokens in arrival order
    cells: FxHashMap<CellId, Occupants>,
}

impl Occupancy {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a token onto a cell.
    ///
    /// Panics if the token is already on the board.
    pub fn place(&mut self, token: TokenId, cell: CellId) {
        if self.locations.contains_key(&token) {
            panic!("Token {} already on the board", token);
        }
        self.locations.insert(token, cell);
        self.cells.entry(cell).or_default().push(token);
    }

    /// Take a token off the board. Returns the cell it stood on.
    pub fn remove(&mut self, token: TokenId) -> Option<CellId> {
        let cell = self.locations.remove(&token)?;
        if let Some(occupants) = self.cells.get_mut(&cell) {
            occupants.retain(|t| *t != token);
            if occupants.is_empty() {
                self.cells.remove(&cell);
            }
        }
        Some(cell)
    }

    /// Move a token to a cell, entering the board if it was in base.
    ///
    /// Returns the previous cell, if any.
    pub fn move_to(&mut self, token: TokenId, cell: CellId) -> Option<CellId> {
        let old = self.remove(token);
        self.place(token, cell);
        old
    }

    /// Cell a token stands on; `None` for base.
    #[must_use]
    pub fn location(&self, token: TokenId) -> Option<CellId> {
        self.locations.get(&token).copied()
    }

    /// Tokens on a cell in arrival order.
    #[must_use]
    pub fn occupants(&self, cell: CellId) -> &[TokenId] {
        self.cells.get(&cell).map_or(&[][..], |o| o.as_slice())
    }

    /// Tokens on a cell not owned by `player`.
    pub fn opponents_at(&self, cell: CellId, player: PlayerId) -> impl Iterator<Item = TokenId> + '_ {
        self.occupants(cell).iter().copied().filter(move |t| !t.is_owned_by(player))
    }

    /// Whether any token not owned by `player` is on the cell.
    #[must_use]
    pub fn has_opponent_of(&self, cell: CellId, player: PlayerId) -> bool {
        self.opponents_at(cell, player).next().is_some()
    }

    /// Number of `player`'s own tokens on the cell.
    #[must_use]
    pub fn own_count(&self, cell: CellId, player: PlayerId) -> usize {
        self.occupants(cell).iter().filter(|t| t.is_owned_by(player)).count()
    }

    /// Total tokens on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether no token is on the board.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TokenSlot;

    fn token(player: PlayerId, slot: u8) -> TokenId {
        TokenId::new(player, TokenSlot::new(slot))
    }

    #[test]
    fn test_place_and_remove() {
        let mut occupancy = Occupancy::new();
        let cell = CellId::new("tab-bl");
        let a = token(PlayerId::P1, 0);
        let b = token(PlayerId::P1, 1);

        occupancy.place(a, cell);
        occupancy.place(b, cell);
        assert_eq!(occupancy.occupants(cell), &[a, b]);
        assert_eq!(occupancy.len(), 2);

        assert_eq!(occupancy.remove(a), Some(cell));
        assert_eq!(occupancy.occupants(cell), &[b]);
        assert_eq!(occupancy.remove(a), None);
    }

    #[test]
    fn test_move_to() {
        let mut occupancy = Occupancy::new();
        let from = CellId::new("c-9-1");
        let to = CellId::new("c-10-1");
        let a = token(PlayerId::P1, 0);

        assert_eq!(occupancy.move_to(a, from), None);
        assert_eq!(occupancy.move_to(a, to), Some(from));
        assert!(occupancy.occupants(from).is_empty());
        assert_eq!(occupancy.location(a), Some(to));
    }

    #[test]
    fn test_opponents_and_own_count() {
        let mut occupancy = Occupancy::new();
        let cell = CellId::new("c-11-2");
        occupancy.place(token(PlayerId::P1, 0), cell);
        occupancy.place(token(PlayerId::P2, 3), cell);
        occupancy.place(token(PlayerId::P1, 2), cell);

        let opponents: Vec<_> = occupancy.opponents_at(cell, PlayerId::P1).collect();
        assert_eq!(opponents, vec![token(PlayerId::P2, 3)]);
        assert_eq!(occupancy.own_count(cell, PlayerId::P1), 2);
        assert_eq!(occupancy.own_count(cell, PlayerId::P3), 0);
        assert!(occupancy.has_opponent_of(cell, PlayerId::P3));
    }

    #[test]
    #[should_panic(expected = "already on the board")]
    fn test_double_place_panics() {
        let mut occupancy = Occupancy::new();
        let a = token(PlayerId::P4, 0);
        occupancy.place(a, CellId::new("c-7-9"));
        occupancy.place(a, CellId::new("c-7-10"));
    }
}

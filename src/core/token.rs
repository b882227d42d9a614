//! Token identification.
//!
//! Every seat owns four tokens. A token is addressed by its owner and its
//! slot (`0..4`). Its position is a 1-based index into the owner's path:
//!
//! - `0`: in base, not yet entered
//! - `1..path_len`: on the path
//! - `path_len`: home (terminal, immovable)
//!
//! ```
//! use thayam::core::{PlayerId, TokenId, TokenSlot};
//!
//! let token = TokenId::new(PlayerId::P2, TokenSlot::new(3));
//! assert_eq!(token.to_string(), "P2#4");
//! assert_eq!(TokenSlot::try_from(4usize), Err(4));
//! ```

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Tokens per seat.
pub const TOKENS_PER_PLAYER: usize = 4;

/// Position of a token on its owner's path. `0` is base.
pub type Position = u8;

/// Base position (token not yet entered).
pub const BASE: Position = 0;

/// Token slot within a seat (`0..4`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct TokenSlot(u8);

impl TokenSlot {
    /// All slots in order.
    pub const ALL: [TokenSlot; TOKENS_PER_PLAYER] =
        [TokenSlot(0), TokenSlot(1), TokenSlot(2), TokenSlot(3)];

    /// Create a slot from a 0-based index.
    #[must_use]
    pub const fn new(slot: u8) -> Self {
        assert!((slot as usize) < TOKENS_PER_PLAYER, "Token slot out of range");
        Self(slot)
    }

    /// Get the raw slot index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<usize> for TokenSlot {
    type Error = usize;

    fn try_from(slot: usize) -> Result<Self, Self::Error> {
        if slot < TOKENS_PER_PLAYER {
            Ok(Self(slot as u8))
        } else {
            Err(slot)
        }
    }
}

impl From<TokenSlot> for usize {
    fn from(slot: TokenSlot) -> usize {
        slot.index()
    }
}

/// A specific token: owner seat plus slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId {
    /// Owning seat.
    pub owner: PlayerId,
    /// Slot within the owner's four tokens.
    pub slot: TokenSlot,
}

impl TokenId {
    /// Create a token ID.
    #[must_use]
    pub const fn new(owner: PlayerId, slot: TokenSlot) -> Self {
        Self { owner, slot }
    }

    /// Iterate over the four tokens of a seat.
    pub fn all_of(owner: PlayerId) -> impl Iterator<Item = TokenId> {
        TokenSlot::ALL.into_iter().map(move |slot| TokenId::new(owner, slot))
    }

    /// Check whether this token belongs to `player`.
    #[must_use]
    pub fn is_owned_by(self, player: PlayerId) -> bool {
        self.owner == player
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.owner, self.slot.0 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_conversion() {
        assert_eq!(TokenSlot::try_from(0usize), Ok(TokenSlot::new(0)));
        assert_eq!(TokenSlot::try_from(3usize), Ok(TokenSlot::new(3)));
        assert_eq!(TokenSlot::try_from(4usize), Err(4));
    }

    #[test]
    fn test_slot_json_is_checked() {
        assert_eq!(serde_json::to_string(&TokenSlot::new(2)).unwrap(), "2");
        assert_eq!(serde_json::from_str::<TokenSlot>("3").unwrap(), TokenSlot::new(3));
        assert!(serde_json::from_str::<TokenSlot>("9").is_err());
        assert!(serde_json::from_str::<TokenId>(r#"{"owner": 5, "slot": 0}"#).is_err());
    }

    #[test]
    #[should_panic(expected = "Token slot out of range")]
    fn test_slot_out_of_range() {
        let _ = TokenSlot::new(9);
    }

    #[test]
    fn test_all_of() {
        let tokens: Vec<_> = TokenId::all_of(PlayerId::P3).collect();
        assert_eq!(tokens.len(), TOKENS_PER_PLAYER);
        assert!(tokens.iter().all(|t| t.is_owned_by(PlayerId::P3)));
        assert_eq!(tokens[2].slot.index(), 2);
    }

    #[test]
    fn test_display() {
        let token = TokenId::new(PlayerId::P1, TokenSlot::new(0));
        assert_eq!(format!("{}", token), "P1#1");
    }

    #[test]
    fn test_serialization() {
        let token = TokenId::new(PlayerId::P4, TokenSlot::new(2));
        let json = serde_json::to_string(&token).unwrap();
        let deserialized: TokenId = serde_json::from_str(&json).unwrap();
        assert_eq!(token, deserialized);
    }
}

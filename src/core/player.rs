//! Player seats and per-seat data storage.
//!
//! ## PlayerId
//!
//! The board has exactly four seats. Each seat is bound to one arm of the
//! cross-shaped board, one colour, and one path to the centre. A match
//! activates two, three, or all four of them.
//!
//! ## PlayerMap
//!
//! Per-seat data storage backed by a fixed array for O(1) access.
//! Every seat has an entry whether or not it is active in the match.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of seats on the board.
pub const SEAT_COUNT: usize = 4;

/// Seat identifier.
///
/// Seat indices are 0-based: the first seat is index 0, displayed as `P1`.
/// Only the four board seats can be built or deserialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(u8);

impl PlayerId {
    /// Green, bottom arm.
    pub const P1: PlayerId = PlayerId(0);
    /// Blue, left arm.
    pub const P2: PlayerId = PlayerId(1);
    /// Yellow, top arm.
    pub const P3: PlayerId = PlayerId(2);
    /// Red, right arm.
    pub const P4: PlayerId = PlayerId(3);

    /// All four seats in board order.
    pub const ALL: [PlayerId; SEAT_COUNT] = [Self::P1, Self::P2, Self::P3, Self::P4];

    /// Create a seat ID from a 0-based index.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        assert!((id as usize) < SEAT_COUNT, "Seat index out of range");
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The colour bound to this seat.
    #[must_use]
    pub const fn color(self) -> Color {
        match self.0 {
            0 => Color::Green,
            1 => Color::Blue,
            2 => Color::Yellow,
            _ => Color::Red,
        }
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = u8;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        if (id as usize) < SEAT_COUNT {
            Ok(Self(id))
        } else {
            Err(id)
        }
    }
}

impl From<PlayerId> for u8 {
    fn from(player: PlayerId) -> u8 {
        player.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0 + 1)
    }
}

/// Token colour of a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Green,
    Blue,
    Yellow,
    Red,
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Red => "red",
        };
        f.write_str(name)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use thayam::core::{PlayerId, PlayerMap};
///
/// let mut cuts: PlayerMap<u32> = PlayerMap::with_value(0);
/// cuts[PlayerId::P2] += 1;
///
/// assert_eq!(cuts[PlayerId::P1], 0);
/// assert_eq!(cuts[PlayerId::P2], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; SEAT_COUNT],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    ///
    /// The factory receives the `PlayerId` for each seat.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: PlayerId::ALL.map(factory),
        }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (PlayerId, &mut T) pairs in seat order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        PlayerId::ALL.into_iter().zip(self.data.iter_mut())
    }
}

impl<T: Default> Default for PlayerMap<T> {
    fn default() -> Self {
        Self::with_default()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

//! Thayam dice.
//!
//! Each die has four faces showing `1`, `2`, `3` and a blank face worth `0`.
//! A pair is scored as the sum of both faces, except that two blanks score
//! `12`. Totals of `1`, `5`, `6` and `12` earn another roll within the
//! same turn, up to [`MAX_ROLLS_PER_TURN`].
//!
//! ## Dice sources
//!
//! A match draws its throws from a [`DiceSource`]. [`RandomDice`] is the
//! normal seeded source; [`ScriptedDice`] replays fixed throws for puzzles
//! and tests.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::GameRng;

/// Face values in the order they appear on the die.
pub const FACES: [u8; 4] = [1, 2, 3, 0];

/// Totals that grant another roll.
pub const EXTRA_ROLL_TOTALS: [u8; 4] = [1, 5, 6, 12];

/// Hard cap on rolls in one turn.
pub const MAX_ROLLS_PER_TURN: usize = 5;

/// Score for a pair of blanks.
pub const DOUBLE_BLANK_TOTAL: u8 = 12;

/// One throw of both dice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceRoll {
    pub d1: u8,
    pub d2: u8,
    pub total: u8,
}

impl DiceRoll {
    /// Score a pair of faces.
    ///
    /// ```
    /// use thayam::dice::DiceRoll;
    ///
    /// assert_eq!(DiceRoll::from_faces(1, 0).total, 1);
    /// assert_eq!(DiceRoll::from_faces(3, 3).total, 6);
    /// assert_eq!(DiceRoll::from_faces(0, 0).total, 12);
    /// ```
    #[must_use]
    pub fn from_faces(d1: u8, d2: u8) -> Self {
        debug_assert!(FACES.contains(&d1) && FACES.contains(&d2), "not a die face");
        let total = if d1 == 0 && d2 == 0 { DOUBLE_BLANK_TOTAL } else { d1 + d2 };
        Self { d1, d2, total }
    }

    /// Whether this throw earns another roll.
    #[must_use]
    pub fn grants_extra_roll(&self) -> bool {
        is_extra_roll(self.total)
    }
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}+{}={}", self.d1, self.d2, self.total)
    }
}

/// Roll one die.
pub fn roll_die(rng: &mut GameRng) -> u8 {
    FACES[rng.gen_range_usize(0..FACES.len())]
}

/// Roll both dice and score them.
pub fn roll_pair(rng: &mut GameRng) -> DiceRoll {
    let d1 = roll_die(rng);
    let d2 = roll_die(rng);
    DiceRoll::from_faces(d1, d2)
}

/// Whether a roll total earns another roll.
#[must_use]
pub fn is_extra_roll(total: u8) -> bool {
    EXTRA_ROLL_TOTALS.contains(&total)
}

/// Where a match gets its throws from.
pub trait DiceSource: std::fmt::Debug + Send {
    /// Throw both dice.
    fn roll_pair(&mut self) -> DiceRoll;
}

/// Seeded random dice.
#[derive(Clone, Debug)]
pub struct RandomDice {
    rng: GameRng,
}

impl RandomDice {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }

    /// The underlying RNG.
    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }
}

impl DiceSource for RandomDice {
    fn roll_pair(&mut self) -> DiceRoll {
        roll_pair(&mut self.rng)
    }
}

/// Replays a fixed sequence of throws.
///
/// Once the script runs out every throw is `2+1=3`, which never grants an
/// extra roll, so a drained script cannot stall a match.
///
/// ```
/// use thayam::dice::{DiceRoll, DiceSource, ScriptedDice};
///
/// let mut dice = ScriptedDice::from_faces([(1, 0), (0, 0)]);
/// assert_eq!(dice.roll_pair().total, 1);
/// assert_eq!(dice.roll_pair().total, 12);
/// assert_eq!(dice.roll_pair(), DiceRoll::from_faces(2, 1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScriptedDice {
    script: VecDeque<DiceRoll>,
}

impl ScriptedDice {
    #[must_use]
    pub fn new(rolls: impl IntoIterator<Item = DiceRoll>) -> Self {
        Self {
            script: rolls.into_iter().collect(),
        }
    }

    /// Script from `(d1, d2)` face pairs.
    #[must_use]
    pub fn from_faces(faces: impl IntoIterator<Item = (u8, u8)>) -> Self {
        Self::new(faces.into_iter().map(|(d1, d2)| DiceRoll::from_faces(d1, d2)))
    }

    /// Append a throw to the end of the script.
    pub fn push(&mut self, roll: DiceRoll) {
        self.script.push_back(roll);
    }

    /// Throws left in the script.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl DiceSource for ScriptedDice {
    fn roll_pair(&mut self) -> DiceRoll {
        self.script
            .pop_front()
            .unwrap_or_else(|| DiceRoll::from_faces(2, 1))
    }
}

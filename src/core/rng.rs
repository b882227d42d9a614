//! Seeded random number generation for dice and computer play.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical dice for the whole match
//! - **Context streams**: Independent sequences for different purposes
//!
//! A match without an explicit seed draws one from the operating system
//! (see [`random_seed`]), so unseeded matches differ. Pass a seed to replay.
//!
//! ## Usage
//!
//! ```
//! use thayam::core::GameRng;
//!
//! let rng = GameRng::new(42);
//!
//! // The computer player draws jitter from its own stream so that
//! // its decisions never shift the dice sequence.
//! let mut dice = rng.for_context("dice");
//! let mut jitter = rng.for_context("computer");
//! let a: Vec<_> = (0..8).map(|_| dice.gen_range_usize(0..1000)).collect();
//! let b: Vec<_> = (0..8).map(|_| jitter.gen_range_usize(0..1000)).collect();
//! assert_ne!(a, b);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// A fresh seed from operating-system entropy.
#[must_use]
pub fn random_seed() -> u64 {
    rand::random()
}

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Generate a float uniformly in `[0, 1)`.
    pub fn gen_unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }
}

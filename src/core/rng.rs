//! Seeded randomness for rounds.
//!
//! The engine holds one root stream and forks a branch per round. Inside a
//! round the host and the opponent draw from separate context streams, so
//! an extra opponent roll never shifts the host's next wait.
//!
//! ## Usage
//!
//! ```
//! use quick_duel::core::GameRng;
//!
//! let mut engine_rng = GameRng::new(42);
//!
//! // Every round gets a fresh branch
//! let round_rng = engine_rng.fork();
//!
//! // Separate streams for the host and the opponent
//! let mut host = round_rng.for_context("host");
//! let mut opponent = round_rng.for_context("opponent");
//! assert_ne!(host.gen_range_u64(0..=1_000_000), opponent.gen_range_u64(0..=1_000_000));
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::ops::RangeInclusive;

/// Odd constant spreading consecutive fork seeds across the seed space.
const FORK_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seeded ChaCha8 stream. Every random draw a round makes goes through one.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::seeded(seed, 0)
    }

    fn seeded(seed: u64, forks: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            forks,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Branch off a child stream. The n-th fork of a given seed is always
    /// the same stream, and differs from every other fork.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::seeded(self.seed.wrapping_add(self.forks.wrapping_mul(FORK_GAMMA)), 0)
    }

    /// Stream keyed by `context`, independent of how much this one has drawn.
    ///
    /// Keys are hashed with `FxHasher`, whose output is stable across
    /// toolchains, so seeded rounds replay identically everywhere.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::seeded(hasher.finish(), 0)
    }

    /// Uniform duration from an inclusive millisecond range.
    pub fn gen_range_u64(&mut self, range: RangeInclusive<u64>) -> u64 {
        self.inner.gen_range(range)
    }

    /// Uniform count from an inclusive range.
    pub fn gen_range_u32(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.inner.gen_range(range)
    }

    /// `true` with the given probability, which must lie in `[0, 1]`.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    /// Uniform pick from `slice`, `None` if it is empty.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }

    /// Capture the stream position.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            forks: self.forks,
        }
    }

    /// Resume a stream captured with [`GameRng::state`].
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut rng = Self::seeded(state.seed, state.forks);
        rng.inner.set_word_pos(state.word_pos);
        rng
    }
}

/// Saved stream position. Capture and restore are O(1) however many
/// values were drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// ChaCha8 word position
    pub word_pos: u128,
    /// Forks already taken from this stream
    pub forks: u64,
}

//! Engine façade tying clock, randomness, rounds, and observers together.

mod round_engine;

pub use round_engine::RoundEngine;

//! Core engine types: time, RNG, configuration, errors.
//!
//! These are the leaves every round is built on. Nothing here knows about
//! phases or verdicts.

pub mod clock;
pub mod config;
pub mod error;
pub mod rng;

pub use clock::{Clock, ManualClock, MonotonicClock, Timestamp};
pub use config::{CountRange, DurationRange, RoundConfig, DEFAULT_FEINT_MESSAGES};
pub use error::ConfigError;
pub use rng::{GameRng, GameRngState};

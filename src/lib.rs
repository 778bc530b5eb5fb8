//! # quick-duel
//!
//! Round state machine and timing engine for a feint-and-fire reaction duel.
//!
//! A host stays silent for a random while, shows a handful of false cues,
//! then raises the genuine one. The player must tap after the genuine cue
//! and before a simulated opponent shoots.
//!
//! ## Design Principles
//!
//! 1. **Time is an input**: Rounds never read a clock on their own. Every
//!    transition is a comparison of caller-supplied monotonic timestamps,
//!    so pausing the tick loop pauses the round.
//!
//! 2. **Deterministic**: All randomness comes from a seeded ChaCha8 stream
//!    held inside the round. Same seed and same timestamps, same round.
//!
//! 3. **Presentation-free**: The engine emits events; sprites, sounds and
//!    scene routing live with the caller.
//!
//! ## Modules
//!
//! - `core`: Timestamps and clocks, RNG, configuration, errors
//! - `round`: Phases, opponent model, verdicts, the round state machine
//! - `events`: Round events and the observer registry
//! - `engine`: `RoundEngine`, the façade a game loop holds on to
//!
//! ## Example
//!
//! ```
//! use quick_duel::{ManualClock, RoundConfig, RoundEngine, Phase, Verdict};
//!
//! let config = RoundConfig::default().with_feint_count(0, 0).with_wait_duration(1500, 1500);
//! let mut engine = RoundEngine::new(config, ManualClock::default(), 7).unwrap();
//!
//! engine.start_round().unwrap();
//! engine.clock_mut().advance(1500);
//! assert_eq!(engine.tick(), Some(Phase::Firing));
//!
//! engine.clock_mut().advance(120);
//! engine.on_player_tap();
//! assert_eq!(engine.verdict(), Some(Verdict::Win));
//! ```

pub mod core;
pub mod engine;
pub mod events;
pub mod round;

// Re-export commonly used types
pub use crate::core::{
    Clock, ConfigError, CountRange, DurationRange, GameRng, GameRngState, ManualClock, MonotonicClock,
    RoundConfig, Timestamp,
};

pub use crate::round::{
    OpponentModel, Outcome, OutcomeCause, Phase, RoundSnapshot, RoundState, TapRejection, TapResult,
    Verdict,
};

pub use crate::events::{EventRegistry, ObserverId, RoundEvent, RoundEvents};

pub use crate::engine::RoundEngine;

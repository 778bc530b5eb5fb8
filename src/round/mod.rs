//! Round state machine, opponent model, and verdicts.
//!
//! A round alternates between waiting and feinting a pre-sampled number of
//! times, raises the genuine cue, then races the player's tap against the
//! simulated opponent.
//!
//! ## Key Components
//!
//! - [`RoundState`]: the state machine, driven by `tick` and `on_player_tap`
//! - [`Phase`]: where the round stands
//! - [`OpponentModel`]: latency-then-coin-flip opponent
//! - [`Verdict`], [`Outcome`], [`TapResult`]: what callers read back

mod opponent;
mod phase;
mod state;
mod verdict;

pub use opponent::OpponentModel;
pub use phase::Phase;
pub use state::{RoundSnapshot, RoundState};
pub use verdict::{Outcome, OutcomeCause, TapRejection, TapResult, Verdict};

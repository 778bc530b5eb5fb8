//! Configuration errors.

use thiserror::Error;

/// Reasons a [`RoundConfig`](super::RoundConfig) is refused at round start.
///
/// Invalid tuning is never clamped into range; the round simply does not start.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// A `min..=max` range has its bounds swapped.
    #[error("{field}: minimum {min} exceeds maximum {max}")]
    InvertedRange {
        field: &'static str,
        min: u64,
        max: u64,
    },

    /// The fire window is zero, so no tap could ever land inside it.
    #[error("fire_display must be greater than zero")]
    EmptyFireWindow,

    /// Shoot probability is NaN, infinite, or outside `[0, 1]`.
    #[error("cpu_shoot_probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),

    /// Feints are possible but there is nothing to show for them.
    #[error("feint_messages is empty but up to {max_feints} feints may be issued")]
    NoFeintMessages { max_feints: u32 },

    /// A feint would read exactly like the genuine cue.
    #[error("feint message {0:?} is identical to the fire cue")]
    FeintMatchesFireCue(String),

    /// The genuine cue has no text.
    #[error("fire_cue must not be empty")]
    EmptyFireCue,
}

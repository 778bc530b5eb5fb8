//! Events emitted by a round.
//!
//! Every mutating call on a round returns the events it produced, in order.
//! Presenters react to these (swap the host sprite on `FeintShown`, play the
//! shot sound on `OpponentShot`, route to the result screen on `Resolved`)
//! instead of inspecting state inside the timing branches.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Timestamp;
use crate::round::{Outcome, Phase};

/// Something that happened during a round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEvent {
    /// A round began waiting for its first cue.
    RoundStarted {
        at: Timestamp,
        feint_target: u32,
    },

    /// The round moved from one phase to the next.
    PhaseChanged {
        from: Phase,
        to: Phase,
        at: Timestamp,
    },

    /// The host showed a false cue. `index` counts from zero.
    FeintShown {
        index: u32,
        message: String,
        at: Timestamp,
    },

    /// The genuine cue went up.
    FireCue {
        cue: String,
        at: Timestamp,
    },

    /// The opponent shot, `reaction` ms after the cue.
    OpponentShot {
        at: Timestamp,
        reaction: u64,
    },

    /// The player tapped. `accepted` is false for false starts.
    PlayerTapped {
        at: Timestamp,
        accepted: bool,
    },

    /// The round was decided.
    Resolved {
        outcome: Outcome,
    },
}

impl RoundEvent {
    /// When the event happened.
    #[must_use]
    pub fn at(&self) -> Timestamp {
        match self {
            RoundEvent::RoundStarted { at, .. }
            | RoundEvent::PhaseChanged { at, .. }
            | RoundEvent::FeintShown { at, .. }
            | RoundEvent::FireCue { at, .. }
            | RoundEvent::OpponentShot { at, .. }
            | RoundEvent::PlayerTapped { at, .. } => *at,
            RoundEvent::Resolved { outcome } => outcome.decided_at,
        }
    }
}

/// Events from a single call. Most calls produce zero to three.
pub type RoundEvents = SmallVec<[RoundEvent; 4]>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::{OutcomeCause, Verdict};

    #[test]
    fn test_event_timestamps() {
        let changed = RoundEvent::PhaseChanged {
            from: Phase::Waiting,
            to: Phase::Firing,
            at: Timestamp(2500),
        };
        assert_eq!(changed.at(), Timestamp(2500));

        let resolved = RoundEvent::Resolved {
            outcome: Outcome {
                verdict: Verdict::Win,
                cause: OutcomeCause::PlayerFirst,
                player_reaction: Some(50),
                opponent_reaction: None,
                decided_at: Timestamp(2550),
            },
        };
        assert_eq!(resolved.at(), Timestamp(2550));
    }

    #[test]
    fn test_event_serde() {
        let event = RoundEvent::FeintShown {
            index: 1,
            message: "FIVE!".to_string(),
            at: Timestamp(3000),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: RoundEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}

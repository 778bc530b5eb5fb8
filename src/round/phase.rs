//! Round phases and the transitions allowed between them.

use serde::{Deserialize, Serialize};

/// Where a round currently stands.
///
/// ```text
/// Waiting ─▶ Feinting ─▶ Waiting ─▶ … ─▶ Firing ─▶ Resolving ─▶ Done
///    │                      │
///    └───── false start ────┴──────────────────────▶ Resolving
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Host is silent; tapping now is a false start.
    #[default]
    Waiting,
    /// Host shows a false cue; tapping now is a false start.
    Feinting,
    /// Genuine cue is up; first valid tap decides the duel.
    Firing,
    /// Verdict is being computed.
    Resolving,
    /// Terminal. Further ticks and taps are no-ops.
    Done,
}

impl Phase {
    /// Is `next` a legal successor of `self`?
    #[must_use]
    pub const fn allows_transition_to(self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Phase::Waiting, Phase::Feinting)
                | (Phase::Waiting, Phase::Firing)
                | (Phase::Waiting, Phase::Resolving)
                | (Phase::Feinting, Phase::Waiting)
                | (Phase::Feinting, Phase::Resolving)
                | (Phase::Firing, Phase::Resolving)
                | (Phase::Resolving, Phase::Done)
        )
    }

    /// Would a tap in this phase be a false start?
    #[must_use]
    pub const fn is_pre_fire(self) -> bool {
        matches!(self, Phase::Waiting | Phase::Feinting)
    }

    /// Has the round been decided?
    #[must_use]
    pub const fn is_over(self) -> bool {
        matches!(self, Phase::Resolving | Phase::Done)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Waiting => "waiting",
            Phase::Feinting => "feinting",
            Phase::Firing => "firing",
            Phase::Resolving => "resolving",
            Phase::Done => "done",
        };
        f.write_str(name)
    }
}

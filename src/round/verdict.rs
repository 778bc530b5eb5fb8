//! Verdicts, outcome detail, and tap responses.

use serde::{Deserialize, Serialize};

use crate::core::Timestamp;

/// Terminal result of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Player tapped after the genuine cue and before the opponent.
    Win,
    /// Player tapped before the genuine cue.
    LoseEarly,
    /// Player was beaten by the opponent or never tapped in time.
    LoseLate,
}

impl Verdict {
    /// Did the player win?
    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, Verdict::Win)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Verdict::Win => "WIN",
            Verdict::LoseEarly => "LOSE_EARLY",
            Verdict::LoseLate => "LOSE_LATE",
        };
        f.write_str(s)
    }
}

/// Why a round ended the way it did.
///
/// Both `TimedOut` and `OpponentFaster` report [`Verdict::LoseLate`];
/// presenters use the cause to pick "too slow" versus "opponent faster".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeCause {
    /// Player tapped during the fire window ahead of the opponent.
    PlayerFirst,
    /// Player tapped while waiting or during a feint.
    FalseStart,
    /// Fire window ran out with no player tap.
    TimedOut,
    /// Opponent shot at or before the player's tap.
    OpponentFaster,
}

impl OutcomeCause {
    /// The verdict this cause maps to.
    #[must_use]
    pub const fn verdict(self) -> Verdict {
        match self {
            OutcomeCause::PlayerFirst => Verdict::Win,
            OutcomeCause::FalseStart => Verdict::LoseEarly,
            OutcomeCause::TimedOut | OutcomeCause::OpponentFaster => Verdict::LoseLate,
        }
    }

    /// Short line a presenter can show as-is.
    #[must_use]
    pub const fn headline(self) -> &'static str {
        match self {
            OutcomeCause::PlayerFirst => "You fired first!",
            OutcomeCause::FalseStart => "False start!",
            OutcomeCause::TimedOut => "Too slow...",
            OutcomeCause::OpponentFaster => "The opponent was faster...",
        }
    }
}

/// Everything known about a finished round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub verdict: Verdict,
    pub cause: OutcomeCause,
    /// Player tap relative to the fire cue, in ms.
    pub player_reaction: Option<u64>,
    /// Opponent shot relative to the fire cue, in ms.
    pub opponent_reaction: Option<u64>,
    /// When the verdict was reached.
    pub decided_at: Timestamp,
}

/// Why a tap did not count as a shot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TapRejection {
    /// Tapped before the genuine cue; the round is lost.
    Early,
    /// A shot was already recorded this round.
    Duplicate,
    /// The round had already been decided.
    RoundOver,
    /// No round has been started yet.
    NoRound,
}

impl std::fmt::Display for TapRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TapRejection::Early => "early",
            TapRejection::Duplicate => "duplicate",
            TapRejection::RoundOver => "round-over",
            TapRejection::NoRound => "no-round",
        };
        f.write_str(s)
    }
}

/// Response to a player tap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TapResult {
    /// The tap was recorded as the player's shot.
    Accepted(Verdict),
    /// The tap did not count as a shot.
    Rejected(TapRejection),
}

impl TapResult {
    /// Was the tap recorded as a shot?
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        matches!(self, TapResult::Accepted(_))
    }

    /// Verdict carried by an accepted tap.
    #[must_use]
    pub const fn verdict(self) -> Option<Verdict> {
        match self {
            TapResult::Accepted(v) => Some(v),
            TapResult::Rejected(_) => None,
        }
    }

    /// Reason carried by a rejected tap.
    #[must_use]
    pub const fn rejection(self) -> Option<TapRejection> {
        match self {
            TapResult::Accepted(_) => None,
            TapResult::Rejected(r) => Some(r),
        }
    }
}

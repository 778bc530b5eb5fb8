//! Round configuration types.
//!
//! A round is tuned entirely through [`RoundConfig`]:
//! - `CountRange`: how many feints a round may contain
//! - `DurationRange`: randomized phase budgets (waits, opponent reaction)
//! - Fixed display budgets for feint and fire cues
//!
//! The engine never hardcodes timings; hosts pass a config at round start.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Inclusive range of feint counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    /// Create a new count range.
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// A range containing only `n`.
    #[must_use]
    pub const fn exactly(n: u32) -> Self {
        Self { min: n, max: n }
    }

    fn check(self, field: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvertedRange {
                field,
                min: u64::from(self.min),
                max: u64::from(self.max),
            });
        }
        Ok(())
    }
}

/// Inclusive range of durations, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationRange {
    pub min: u64,
    pub max: u64,
}

impl DurationRange {
    /// Create a new duration range.
    #[must_use]
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// A range containing only `ms`.
    #[must_use]
    pub const fn exactly(ms: u64) -> Self {
        Self { min: ms, max: ms }
    }

    /// Does `ms` fall inside the range?
    #[must_use]
    pub const fn contains(self, ms: u64) -> bool {
        ms >= self.min && ms <= self.max
    }

    fn check(self, field: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvertedRange {
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Complete tuning for one round.
///
/// Durations are milliseconds on the caller's monotonic timeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundConfig {
    /// How many feints to issue before the genuine cue (sampled once per round).
    pub feint_count: CountRange,

    /// Budget of each waiting phase (re-sampled every wait).
    pub wait_duration: DurationRange,

    /// How long each feint stays on screen.
    pub feint_display: u64,

    /// How long the fire cue stays up before a silent player loses.
    pub fire_display: u64,

    /// Earliest and latest moment, after the fire cue, the opponent may shoot.
    pub cpu_reaction: DurationRange,

    /// Chance per tick that an eligible opponent actually shoots.
    pub cpu_shoot_probability: f64,

    /// Text shown by the genuine cue.
    pub fire_cue: String,

    /// Pool of false cues, one drawn per feint.
    pub feint_messages: Vec<String>,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            feint_count: CountRange::new(0, 5),
            wait_duration: DurationRange::new(2000, 4000),
            feint_display: 800,
            fire_display: 2000,
            cpu_reaction: DurationRange::new(300, 600),
            cpu_shoot_probability: 0.8,
            fire_cue: "FIRE!".to_string(),
            feint_messages: DEFAULT_FEINT_MESSAGES.iter().map(|m| (*m).to_string()).collect(),
        }
    }
}

/// Stock false cues: close enough to the real one to bait a twitchy thumb.
pub const DEFAULT_FEINT_MESSAGES: [&str; 8] = [
    "FIVE!", "FIRST!", "FIGHT!", "FINE!", "FIR...", "HIRE!", "TIRE!", "WIRE!",
];

impl RoundConfig {
    /// Check every tuning rule, returning the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.feint_count.check("feint_count")?;
        self.wait_duration.check("wait_duration")?;
        self.cpu_reaction.check("cpu_reaction")?;

        if self.fire_display == 0 {
            return Err(ConfigError::EmptyFireWindow);
        }

        let p = self.cpu_shoot_probability;
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::InvalidProbability(p));
        }

        if self.fire_cue.is_empty() {
            return Err(ConfigError::EmptyFireCue);
        }

        if self.feint_count.max > 0 && self.feint_messages.is_empty() {
            return Err(ConfigError::NoFeintMessages {
                max_feints: self.feint_count.max,
            });
        }

        if let Some(bad) = self.feint_messages.iter().find(|m| **m == self.fire_cue) {
            return Err(ConfigError::FeintMatchesFireCue(bad.clone()));
        }

        Ok(())
    }

    /// Set the feint count range.
    #[must_use]
    pub fn with_feint_count(mut self, min: u32, max: u32) -> Self {
        self.feint_count = CountRange::new(min, max);
        self
    }

    /// Set the wait duration range.
    #[must_use]
    pub fn with_wait_duration(mut self, min: u64, max: u64) -> Self {
        self.wait_duration = DurationRange::new(min, max);
        self
    }

    /// Set the feint display budget.
    #[must_use]
    pub fn with_feint_display(mut self, ms: u64) -> Self {
        self.feint_display = ms;
        self
    }

    /// Set the fire display budget.
    #[must_use]
    pub fn with_fire_display(mut self, ms: u64) -> Self {
        self.fire_display = ms;
        self
    }

    /// Set the opponent reaction range.
    #[must_use]
    pub fn with_cpu_reaction(mut self, min: u64, max: u64) -> Self {
        self.cpu_reaction = DurationRange::new(min, max);
        self
    }

    /// Set the per-tick opponent shoot probability.
    #[must_use]
    pub fn with_cpu_shoot_probability(mut self, p: f64) -> Self {
        self.cpu_shoot_probability = p;
        self
    }

    /// Set the genuine cue text.
    #[must_use]
    pub fn with_fire_cue(mut self, cue: impl Into<String>) -> Self {
        self.fire_cue = cue.into();
        self
    }

    /// Replace the feint message pool.
    #[must_use]
    pub fn with_feint_messages<I, S>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.feint_messages = messages.into_iter().map(Into::into).collect();
        self
    }
}

//! Monotonic time for the round engine.
//!
//! All phase budgets are compared against elapsed milliseconds between two
//! [`Timestamp`]s. The engine never reads wall-clock time directly; callers
//! either pass timestamps explicitly or hand the engine a [`Clock`].

use serde::{Deserialize, Serialize};
use std::time::Instant;

/// A point on a monotonic millisecond timeline.
///
/// The origin is arbitrary (process start, scene start, zero in tests);
/// only differences between timestamps carry meaning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Timestamp at `ms` milliseconds past the origin.
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Raw milliseconds past the origin.
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`.
    ///
    /// Saturates at zero if `earlier` is actually later, so a misbehaving
    /// clock stalls the round instead of panicking.
    #[must_use]
    pub const fn millis_since(self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// This timestamp shifted forward by `ms`.
    #[must_use]
    pub const fn plus(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Source of monotonic timestamps.
pub trait Clock {
    /// Current time.
    fn now(&self) -> Timestamp;
}

/// Clock backed by [`std::time::Instant`], with its origin at construction.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Start a clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Timestamp {
        let elapsed = self.origin.elapsed().as_millis();
        Timestamp(u64::try_from(elapsed).unwrap_or(u64::MAX))
    }
}

/// Hand-driven clock for tests, replays and frame-stepped hosts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ManualClock {
    now: Timestamp,
}

impl ManualClock {
    /// Clock parked at `start`.
    #[must_use]
    pub fn starting_at(start: Timestamp) -> Self {
        Self { now: start }
    }

    /// Move time forward by `ms`.
    pub fn advance(&mut self, ms: u64) {
        self.now = self.now.plus(ms);
    }

    /// Jump to `at`. Moving backwards is ignored.
    pub fn set(&mut self, at: Timestamp) {
        self.now = self.now.max(at);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_since() {
        let a = Timestamp::from_millis(1000);
        let b = Timestamp::from_millis(1350);
        assert_eq!(b.millis_since(a), 350);
        assert_eq!(a.millis_since(b), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Timestamp(42)), "42ms");
    }

    #[test]
    fn test_manual_clock() {
        let mut clock = ManualClock::starting_at(Timestamp(100));
        assert_eq!(clock.now(), Timestamp(100));

        clock.advance(50);
        assert_eq!(clock.now(), Timestamp(150));

        clock.set(Timestamp(120));
        assert_eq!(clock.now(), Timestamp(150));

        clock.set(Timestamp(400));
        assert_eq!(clock.now(), Timestamp(400));
    }

    #[test]
    fn test_monotonic_clock_never_goes_back() {
        let clock = MonotonicClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}

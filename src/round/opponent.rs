//! Simulated opponent reaction.
//!
//! Once the genuine cue is up, the opponent draws a single reaction latency
//! from the configured range. From that moment on it is *eligible* to shoot,
//! and each tick rolls the shoot probability independently. The effective
//! reaction time is therefore never shorter than the latency and usually a
//! little longer, and with a probability below one it may never shoot at all.

use crate::core::{DurationRange, GameRng, Timestamp};

/// Opponent state for a single round.
#[derive(Clone, Debug)]
pub struct OpponentModel {
    rng: GameRng,
    reaction: DurationRange,
    shoot_probability: f64,
    latency: Option<u64>,
    shot_at: Option<Timestamp>,
}

impl OpponentModel {
    /// Create an unarmed opponent drawing from `rng`.
    #[must_use]
    pub fn new(rng: GameRng, reaction: DurationRange, shoot_probability: f64) -> Self {
        Self {
            rng,
            reaction,
            shoot_probability,
            latency: None,
            shot_at: None,
        }
    }

    /// Sample the reaction latency. Only the first call samples.
    pub fn arm(&mut self) -> u64 {
        if let Some(latency) = self.latency {
            return latency;
        }
        let latency = self.rng.gen_range_u64(self.reaction.min..=self.reaction.max);
        self.latency = Some(latency);
        latency
    }

    /// Roll for a shot at `now`, with the cue raised at `fire_start`.
    ///
    /// Returns the shot time on the tick the opponent shoots; `None` before
    /// eligibility, on a failed roll, and on every tick after the shot.
    pub fn poll(&mut self, fire_start: Timestamp, now: Timestamp) -> Option<Timestamp> {
        if self.shot_at.is_some() {
            return None;
        }
        let latency = self.latency?;
        if now.millis_since(fire_start) < latency {
            return None;
        }
        if !self.rng.gen_bool(self.shoot_probability) {
            return None;
        }
        self.shot_at = Some(now);
        Some(now)
    }

    /// Sampled latency, once armed.
    #[must_use]
    pub fn latency(&self) -> Option<u64> {
        self.latency
    }

    /// When the opponent shot, if it has.
    #[must_use]
    pub fn shot_at(&self) -> Option<Timestamp> {
        self.shot_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(min: u64, max: u64, p: f64) -> OpponentModel {
        OpponentModel::new(GameRng::new(9), DurationRange::new(min, max), p)
    }

    #[test]
    fn test_unarmed_never_shoots() {
        let mut opp = model(0, 0, 1.0);
        assert_eq!(opp.poll(Timestamp(0), Timestamp(10_000)), None);
    }

    #[test]
    fn test_latency_sampled_once_within_range() {
        let mut opp = model(300, 600, 1.0);
        let first = opp.arm();
        assert!((300..=600).contains(&first));
        for _ in 0..10 {
            assert_eq!(opp.arm(), first);
        }
        assert_eq!(opp.latency(), Some(first));
    }

    #[test]
    fn test_shoots_at_eligibility_with_certain_roll() {
        let mut opp = model(350, 350, 1.0);
        opp.arm();
        let fire = Timestamp(1000);

        assert_eq!(opp.poll(fire, Timestamp(1349)), None);
        assert_eq!(opp.poll(fire, Timestamp(1350)), Some(Timestamp(1350)));
        assert_eq!(opp.shot_at(), Some(Timestamp(1350)));
    }

    #[test]
    fn test_shot_is_write_once() {
        let mut opp = model(0, 0, 1.0);
        opp.arm();
        assert!(opp.poll(Timestamp(0), Timestamp(5)).is_some());
        assert_eq!(opp.poll(Timestamp(0), Timestamp(50)), None);
        assert_eq!(opp.shot_at(), Some(Timestamp(5)));
    }

    #[test]
    fn test_zero_probability_never_shoots() {
        let mut opp = model(0, 0, 0.0);
        opp.arm();
        for t in 0..200 {
            assert_eq!(opp.poll(Timestamp(0), Timestamp(t * 16)), None);
        }
        assert_eq!(opp.shot_at(), None);
    }

    #[test]
    fn test_partial_probability_shoots_eventually_not_early() {
        let mut opp = model(300, 300, 0.5);
        opp.arm();
        let mut shot = None;
        for frame in 0..200u64 {
            if let Some(at) = opp.poll(Timestamp(0), Timestamp(frame * 16)) {
                shot = Some(at);
                break;
            }
        }
        let shot = shot.expect("a 50% roll over ~180 eligible frames should land");
        assert!(shot.as_millis() >= 300);
    }
}

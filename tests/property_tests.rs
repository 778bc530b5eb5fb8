//! Property tests for round invariants.
//!
//! Random configs, seeds, and frame cadences are fed through full rounds,
//! and the invariants are checked on every step.

use proptest::prelude::*;

use quick_duel::core::{GameRng, RoundConfig, Timestamp};
use quick_duel::events::RoundEvent;
use quick_duel::round::{OutcomeCause, Phase, RoundState, TapRejection, TapResult, Verdict};

fn config_strategy() -> impl Strategy<Value = RoundConfig> {
    (
        (0u32..4, 0u32..4),
        (1u64..3000, 0u64..2000),
        1u64..1000,
        1u64..3000,
        (0u64..800, 0u64..400),
        0.0f64..=1.0,
    )
        .prop_map(|((fa, fb), (wmin, wspan), feint, fire, (cmin, cspan), p)| {
            RoundConfig::default()
                .with_feint_count(fa.min(fb), fa.max(fb))
                .with_wait_duration(wmin, wmin + wspan)
                .with_feint_display(feint)
                .with_fire_display(fire)
                .with_cpu_reaction(cmin, cmin + cspan)
                .with_cpu_shoot_probability(p)
        })
}

/// Tick at `frame` cadence until `stop` holds or the round ends.
fn drive(round: &mut RoundState, frame: u64, stop: impl Fn(&RoundState) -> bool) -> Timestamp {
    let mut now = Timestamp(0);
    while !round.is_done() && !stop(round) {
        now = now.plus(frame);
        round.tick(now);
    }
    now
}

proptest! {
    /// Feints never exceed the target and match it exactly at fire time.
    #[test]
    fn test_feints_reach_target_at_fire(
        config in config_strategy(),
        seed in any::<u64>(),
        frame in 1u64..50,
    ) {
        let mut round = RoundState::start(config, GameRng::new(seed), Timestamp(0)).unwrap();
        let target = round.feint_target();
        prop_assert!(round.config().feint_count.min <= target);
        prop_assert!(target <= round.config().feint_count.max);

        let mut now = Timestamp(0);
        while round.phase() != Phase::Firing {
            prop_assert!(round.feints_so_far() <= target);
            now = now.plus(frame);
            round.tick(now);
        }
        prop_assert_eq!(round.feints_so_far(), target);
    }

    /// A zero feint range never shows a feint.
    #[test]
    fn test_zero_feint_range_never_feints(seed in any::<u64>(), frame in 1u64..50) {
        let config = RoundConfig::default()
            .with_feint_count(0, 0)
            .with_wait_duration(100, 3000);
        let mut round = RoundState::start(config, GameRng::new(seed), Timestamp(0)).unwrap();

        let mut now = Timestamp(0);
        while round.phase() != Phase::Firing {
            prop_assert_ne!(round.phase(), Phase::Feinting);
            now = now.plus(frame);
            round.tick(now);
        }
    }

    /// Any tap before the genuine cue loses early, whatever the phase.
    #[test]
    fn test_early_tap_always_loses_early(
        config in config_strategy(),
        seed in any::<u64>(),
        frames in 0u64..200,
    ) {
        let mut round = RoundState::start(config, GameRng::new(seed), Timestamp(0)).unwrap();

        let mut now = Timestamp(0);
        for _ in 0..frames {
            let next = now.plus(16);
            let mut probe = round.clone();
            probe.tick(next);
            if probe.phase() == Phase::Firing {
                break;
            }
            round = probe;
            now = next;
        }
        prop_assert!(round.phase().is_pre_fire());

        let (result, _) = round.on_player_tap(now);
        prop_assert_eq!(result, TapResult::Rejected(TapRejection::Early));
        prop_assert_eq!(round.verdict(), Some(Verdict::LoseEarly));
        prop_assert_eq!(round.phase(), Phase::Done);
    }

    /// A silent player always loses late once the window runs out.
    #[test]
    fn test_silent_player_loses_late(
        config in config_strategy(),
        seed in any::<u64>(),
        frame in 1u64..50,
    ) {
        let mut round = RoundState::start(config, GameRng::new(seed), Timestamp(0)).unwrap();
        drive(&mut round, frame, |_| false);

        prop_assert_eq!(round.verdict(), Some(Verdict::LoseLate));
        prop_assert_eq!(round.outcome().unwrap().cause, OutcomeCause::TimedOut);
    }

    /// Once done, nothing a caller does changes the round.
    #[test]
    fn test_done_is_absorbing(
        config in config_strategy(),
        seed in any::<u64>(),
        tap_offset in 0u64..3000,
        later in prop::collection::vec(0u64..100_000, 1..10),
    ) {
        let mut round = RoundState::start(config, GameRng::new(seed), Timestamp(0)).unwrap();
        let fire = drive(&mut round, 16, |r| r.phase() == Phase::Firing);
        round.on_player_tap(fire.plus(tap_offset));
        drive(&mut round, 16, |_| false);
        prop_assert!(round.is_done());

        let snapshot = round.snapshot();
        let history_len = round.history().len();
        for t in later {
            prop_assert!(round.tick(Timestamp(t)).is_empty());
            let (result, events) = round.on_player_tap(Timestamp(t));
            prop_assert_eq!(result, TapResult::Rejected(TapRejection::RoundOver));
            prop_assert!(events.is_empty());
        }
        prop_assert_eq!(round.snapshot(), snapshot);
        prop_assert_eq!(round.history().len(), history_len);
    }

    /// Every recorded transition is a legal forward step.
    #[test]
    fn test_transitions_are_legal(
        config in config_strategy(),
        seed in any::<u64>(),
        frame in 1u64..50,
    ) {
        let mut round = RoundState::start(config, GameRng::new(seed), Timestamp(0)).unwrap();
        drive(&mut round, frame, |_| false);

        let mut current = Phase::Waiting;
        for event in round.history() {
            if let RoundEvent::PhaseChanged { from, to, .. } = event {
                prop_assert_eq!(*from, current);
                prop_assert!(from.allows_transition_to(*to));
                current = *to;
            }
        }
        prop_assert_eq!(current, Phase::Done);
    }

    /// The opponent never shoots before its sampled latency.
    #[test]
    fn test_opponent_respects_latency(
        config in config_strategy(),
        seed in any::<u64>(),
        frame in 1u64..50,
    ) {
        let mut round = RoundState::start(config, GameRng::new(seed), Timestamp(0)).unwrap();
        drive(&mut round, frame, |_| false);

        if let (Some(shot), Some(fire)) = (round.opponent_shot(), round.fire_start()) {
            let latency = round.reaction_latency().unwrap();
            prop_assert!(shot.millis_since(fire) >= latency);
            prop_assert!(round.config().cpu_reaction.contains(latency));
        }
    }
}

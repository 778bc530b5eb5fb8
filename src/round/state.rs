//! The round state machine.
//!
//! ## Driving a round
//!
//! ```
//! use quick_duel::core::{GameRng, RoundConfig, Timestamp};
//! use quick_duel::round::{Phase, RoundState, TapResult, Verdict};
//!
//! let config = RoundConfig::default()
//!     .with_feint_count(0, 0)
//!     .with_wait_duration(1000, 1000)
//!     .with_cpu_reaction(400, 400);
//!
//! let mut round = RoundState::start(config, GameRng::new(7), Timestamp(0)).unwrap();
//! round.tick(Timestamp(1000));
//! assert_eq!(round.phase(), Phase::Firing);
//!
//! let (result, _events) = round.on_player_tap(Timestamp(1050));
//! assert_eq!(result, TapResult::Accepted(Verdict::Win));
//! assert_eq!(round.verdict(), Some(Verdict::Win));
//! ```
//!
//! ## Purity
//!
//! All randomness lives inside the state, so cloning a round and feeding
//! both copies the same timestamps yields identical results. The event
//! history is an `im::Vector`, which keeps those clones O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{ConfigError, GameRng, RoundConfig, Timestamp};
use crate::events::{RoundEvent, RoundEvents};

use super::opponent::OpponentModel;
use super::phase::Phase;
use super::verdict::{Outcome, OutcomeCause, TapRejection, TapResult, Verdict};

/// One round of the duel.
#[derive(Clone, Debug)]
pub struct RoundState {
    config: RoundConfig,

    phase: Phase,
    feints_so_far: u32,
    feint_target: u32,
    phase_start: Timestamp,
    phase_duration: u64,

    round_start: Timestamp,
    fire_start: Option<Timestamp>,
    current_feint: Option<String>,

    player_tap: Option<Timestamp>,
    outcome: Option<Outcome>,

    /// Host decisions: feint count, waits, feint messages.
    host_rng: GameRng,
    opponent: OpponentModel,

    history: Vector<RoundEvent>,
}

impl RoundState {
    /// Begin a round at `now`.
    ///
    /// Samples the round's feint target and the first wait. Fails without
    /// side effects if `config` is invalid.
    pub fn start(config: RoundConfig, rng: GameRng, now: Timestamp) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate() {
            log::warn!("refusing to start round: {}", err);
            return Err(err);
        }

        let mut host_rng = rng.for_context("host");
        let opponent = OpponentModel::new(
            rng.for_context("opponent"),
            config.cpu_reaction,
            config.cpu_shoot_probability,
        );

        let feint_target = host_rng.gen_range_u32(config.feint_count.min..=config.feint_count.max);
        let first_wait = host_rng.gen_range_u64(config.wait_duration.min..=config.wait_duration.max);

        log::info!(
            "round started at {} with {} feints, first wait {}ms",
            now,
            feint_target,
            first_wait
        );

        let mut history = Vector::new();
        history.push_back(RoundEvent::RoundStarted {
            at: now,
            feint_target,
        });

        Ok(Self {
            config,
            phase: Phase::Waiting,
            feints_so_far: 0,
            feint_target,
            phase_start: now,
            phase_duration: first_wait,
            round_start: now,
            fire_start: None,
            current_feint: None,
            player_tap: None,
            outcome: None,
            host_rng,
            opponent,
            history,
        })
    }

    // === Driving ===

    /// Advance on elapsed time. Call at least once per frame.
    ///
    /// Makes at most one phase transition per call. No-op once decided.
    pub fn tick(&mut self, now: Timestamp) -> RoundEvents {
        let mut events = RoundEvents::new();
        let elapsed = now.millis_since(self.phase_start);

        match self.phase {
            Phase::Waiting => {
                if elapsed >= self.phase_duration {
                    if self.feints_so_far < self.feint_target {
                        self.show_feint(now, &mut events);
                    } else {
                        self.raise_fire_cue(now, &mut events);
                    }
                }
            }
            Phase::Feinting => {
                if elapsed >= self.phase_duration {
                    self.feints_so_far += 1;
                    self.current_feint = None;
                    let wait = self.sample_wait();
                    self.enter(Phase::Waiting, now, wait, &mut events);
                }
            }
            Phase::Firing => {
                if let Some(fire_start) = self.fire_start {
                    if let Some(shot) = self.opponent.poll(fire_start, now) {
                        let reaction = shot.millis_since(fire_start);
                        log::debug!("opponent shot at {} ({}ms after the cue)", shot, reaction);
                        events.push(RoundEvent::OpponentShot { at: shot, reaction });
                    }
                }
                if elapsed >= self.phase_duration && self.player_tap.is_none() {
                    self.resolve(OutcomeCause::TimedOut, now, &mut events);
                }
            }
            Phase::Resolving | Phase::Done => {}
        }

        self.history.extend(events.iter().cloned());
        events
    }

    /// Record a player tap at `now`.
    ///
    /// A tap before the genuine cue loses the round on the spot. A tap that
    /// arrives after the fire window has run out, before the expiring tick
    /// was processed, is treated as a timeout rather than a shot.
    pub fn on_player_tap(&mut self, now: Timestamp) -> (TapResult, RoundEvents) {
        let mut events = RoundEvents::new();

        let result = match self.phase {
            Phase::Waiting | Phase::Feinting => {
                log::debug!("false start at {} during {}", now, self.phase);
                events.push(RoundEvent::PlayerTapped { at: now, accepted: false });
                self.resolve(OutcomeCause::FalseStart, now, &mut events);
                TapResult::Rejected(TapRejection::Early)
            }
            Phase::Firing if self.player_tap.is_some() => {
                log::warn!("duplicate tap at {} ignored", now);
                TapResult::Rejected(TapRejection::Duplicate)
            }
            Phase::Firing if now.millis_since(self.phase_start) >= self.phase_duration => {
                self.resolve(OutcomeCause::TimedOut, now, &mut events);
                TapResult::Rejected(TapRejection::RoundOver)
            }
            Phase::Firing => {
                self.player_tap = Some(now);
                events.push(RoundEvent::PlayerTapped { at: now, accepted: true });

                // Ties go to the opponent
                let cause = match self.opponent.shot_at() {
                    Some(shot) if shot <= now => OutcomeCause::OpponentFaster,
                    _ => OutcomeCause::PlayerFirst,
                };
                self.resolve(cause, now, &mut events);
                TapResult::Accepted(cause.verdict())
            }
            Phase::Resolving | Phase::Done => TapResult::Rejected(TapRejection::RoundOver),
        };

        self.history.extend(events.iter().cloned());
        (result, events)
    }

    // === Transitions ===

    fn enter(&mut self, to: Phase, now: Timestamp, duration: u64, events: &mut RoundEvents) {
        let from = self.phase;
        debug_assert!(
            from.allows_transition_to(to),
            "illegal round transition {} -> {}",
            from,
            to
        );
        log::debug!("round {} -> {} at {} ({}ms budget)", from, to, now, duration);

        self.phase = to;
        self.phase_start = now;
        self.phase_duration = duration;
        events.push(RoundEvent::PhaseChanged { from, to, at: now });
    }

    fn show_feint(&mut self, now: Timestamp, events: &mut RoundEvents) {
        let message = self
            .host_rng
            .choose(&self.config.feint_messages)
            .cloned()
            .unwrap_or_default();

        let display = self.config.feint_display;
        self.enter(Phase::Feinting, now, display, events);
        events.push(RoundEvent::FeintShown {
            index: self.feints_so_far,
            message: message.clone(),
            at: now,
        });
        self.current_feint = Some(message);
    }

    fn raise_fire_cue(&mut self, now: Timestamp, events: &mut RoundEvents) {
        let display = self.config.fire_display;
        self.enter(Phase::Firing, now, display, events);
        self.fire_start = Some(now);

        let latency = self.opponent.arm();
        log::debug!("fire cue at {}, opponent eligible after {}ms", now, latency);
        events.push(RoundEvent::FireCue {
            cue: self.config.fire_cue.clone(),
            at: now,
        });
    }

    fn resolve(&mut self, cause: OutcomeCause, now: Timestamp, events: &mut RoundEvents) {
        self.enter(Phase::Resolving, now, 0, events);

        let outcome = Outcome {
            verdict: cause.verdict(),
            cause,
            player_reaction: self.reaction_to(self.player_tap),
            opponent_reaction: self.reaction_to(self.opponent.shot_at()),
            decided_at: now,
        };
        log::info!(
            "round decided at {}: {} ({:?}), player {:?}ms, opponent {:?}ms",
            now,
            outcome.verdict,
            outcome.cause,
            outcome.player_reaction,
            outcome.opponent_reaction
        );

        self.current_feint = None;
        self.enter(Phase::Done, now, 0, events);
        self.outcome = Some(outcome);
        events.push(RoundEvent::Resolved { outcome });
    }

    fn sample_wait(&mut self) -> u64 {
        let range = self.config.wait_duration;
        self.host_rng.gen_range_u64(range.min..=range.max)
    }

    fn reaction_to(&self, at: Option<Timestamp>) -> Option<u64> {
        Some(at?.millis_since(self.fire_start?))
    }

    // === Queries ===

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Verdict, once the round is done.
    #[must_use]
    pub fn verdict(&self) -> Option<Verdict> {
        self.outcome.map(|o| o.verdict)
    }

    /// Full outcome, once the round is done.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Is the round over?
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Feints completed so far.
    #[must_use]
    pub fn feints_so_far(&self) -> u32 {
        self.feints_so_far
    }

    /// Feints this round issues before the genuine cue.
    #[must_use]
    pub fn feint_target(&self) -> u32 {
        self.feint_target
    }

    /// When the current phase began.
    #[must_use]
    pub fn phase_start(&self) -> Timestamp {
        self.phase_start
    }

    /// Budget of the current phase, in ms.
    #[must_use]
    pub fn phase_duration(&self) -> u64 {
        self.phase_duration
    }

    /// Time left in the current phase at `now`. Zero once decided.
    #[must_use]
    pub fn remaining(&self, now: Timestamp) -> u64 {
        if self.phase.is_over() {
            return 0;
        }
        self.phase_duration.saturating_sub(now.millis_since(self.phase_start))
    }

    /// When the round started.
    #[must_use]
    pub fn round_start(&self) -> Timestamp {
        self.round_start
    }

    /// When the genuine cue went up.
    #[must_use]
    pub fn fire_start(&self) -> Option<Timestamp> {
        self.fire_start
    }

    /// Text the host is showing right now, if any.
    #[must_use]
    pub fn cue(&self) -> Option<&str> {
        match self.phase {
            Phase::Feinting => self.current_feint.as_deref(),
            Phase::Firing => Some(self.config.fire_cue.as_str()),
            _ => None,
        }
    }

    /// When the player shot.
    #[must_use]
    pub fn player_tap(&self) -> Option<Timestamp> {
        self.player_tap
    }

    /// When the opponent shot.
    #[must_use]
    pub fn opponent_shot(&self) -> Option<Timestamp> {
        self.opponent.shot_at()
    }

    /// Opponent reaction latency, sampled when the cue goes up.
    #[must_use]
    pub fn reaction_latency(&self) -> Option<u64> {
        self.opponent.latency()
    }

    /// Configuration this round runs with.
    #[must_use]
    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// Every event emitted so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<RoundEvent> {
        &self.history
    }

    /// Serializable view for presenters and debugging.
    #[must_use]
    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            phase: self.phase,
            feints_so_far: self.feints_so_far,
            feint_target: self.feint_target,
            phase_start: self.phase_start,
            phase_duration: self.phase_duration,
            cue: self.cue().map(str::to_string),
            fire_start: self.fire_start,
            player_tap: self.player_tap,
            opponent_shot: self.opponent.shot_at(),
            outcome: self.outcome,
        }
    }
}

/// Read-only view of a round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub phase: Phase,
    pub feints_so_far: u32,
    pub feint_target: u32,
    pub phase_start: Timestamp,
    pub phase_duration: u64,
    pub cue: Option<String>,
    pub fire_start: Option<Timestamp>,
    pub player_tap: Option<Timestamp>,
    pub opponent_shot: Option<Timestamp>,
    pub outcome: Option<Outcome>,
}

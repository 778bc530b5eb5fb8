//! Engine façade owning the active round.
//!
//! Hosts construct one `RoundEngine` and pass it around explicitly; there is
//! no process-wide instance. The engine reads time from its [`Clock`], forks
//! a fresh RNG stream per round from its seed, and forwards every round
//! event to its observers.

use crate::core::{Clock, ConfigError, GameRng, MonotonicClock, RoundConfig, Timestamp};
use crate::events::{EventRegistry, ObserverId, RoundEvent};
use crate::round::{Outcome, Phase, RoundState, TapRejection, TapResult, Verdict};

/// Owns configuration, clock, randomness, observers, and at most one round.
#[derive(Debug)]
pub struct RoundEngine<C: Clock = MonotonicClock> {
    config: RoundConfig,
    clock: C,
    rng: GameRng,
    round: Option<RoundState>,
    observers: EventRegistry,
    rounds_started: u64,
}

impl RoundEngine<MonotonicClock> {
    /// Engine on the real monotonic clock.
    pub fn with_seed(config: RoundConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, MonotonicClock::new(), seed)
    }
}

impl<C: Clock> RoundEngine<C> {
    /// Create an engine. Fails if `config` is invalid.
    pub fn new(config: RoundConfig, clock: C, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            clock,
            rng: GameRng::new(seed),
            round: None,
            observers: EventRegistry::new(),
            rounds_started: 0,
        })
    }

    // === Configuration ===

    /// Configuration used for the next round.
    #[must_use]
    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// Replace the configuration for subsequent rounds.
    ///
    /// The active round keeps the config it started with.
    pub fn set_config(&mut self, config: RoundConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// The engine's clock.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Mutable access to the clock, for hand-driven clocks.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    // === Observers ===

    /// Receive every round event from now on.
    pub fn subscribe(&mut self, observer: impl FnMut(&RoundEvent) + 'static) -> ObserverId {
        self.observers.subscribe(observer)
    }

    /// Stop delivering events to `id`.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    // === Round lifecycle ===

    /// Discard any current round and start a new one now.
    pub fn start_round(&mut self) -> Result<&RoundState, ConfigError> {
        let now = self.clock.now();
        let rng = self.rng.fork();
        let round = RoundState::start(self.config.clone(), rng, now)?;

        if let Some(old) = &self.round {
            if !old.is_done() {
                log::debug!("abandoning undecided round in phase {}", old.phase());
            }
        }

        self.rounds_started += 1;
        self.observers.dispatch(round.history());
        let round = self.round.insert(round);
        Ok(&*round)
    }

    /// Replace the configuration, then start a round with it.
    pub fn start_round_with(&mut self, config: RoundConfig) -> Result<&RoundState, ConfigError> {
        self.set_config(config)?;
        self.start_round()
    }

    /// Advance the active round to the clock's current time.
    ///
    /// Returns the phase after the tick, or `None` with no round.
    pub fn tick(&mut self) -> Option<Phase> {
        let now = self.clock.now();
        self.tick_at(now)
    }

    /// Advance the active round to `now`.
    pub fn tick_at(&mut self, now: Timestamp) -> Option<Phase> {
        let round = self.round.as_mut()?;
        let events = round.tick(now);
        let phase = round.phase();
        self.observers.dispatch(&events);
        Some(phase)
    }

    /// Register a tap at the clock's current time.
    pub fn on_player_tap(&mut self) -> TapResult {
        let now = self.clock.now();
        self.tap_at(now)
    }

    /// Register a tap stamped `now` by the input layer.
    pub fn tap_at(&mut self, now: Timestamp) -> TapResult {
        let Some(round) = self.round.as_mut() else {
            return TapResult::Rejected(TapRejection::NoRound);
        };
        let (result, events) = round.on_player_tap(now);
        self.observers.dispatch(&events);
        result
    }

    // === Queries ===

    /// The active round, if any.
    #[must_use]
    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    /// Phase of the active round.
    #[must_use]
    pub fn phase(&self) -> Option<Phase> {
        self.round.as_ref().map(RoundState::phase)
    }

    /// Verdict of the active round, once decided.
    #[must_use]
    pub fn verdict(&self) -> Option<Verdict> {
        self.round.as_ref().and_then(RoundState::verdict)
    }

    /// Outcome of the active round, once decided.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.round.as_ref().and_then(RoundState::outcome)
    }

    /// Rounds started over the engine's lifetime.
    #[must_use]
    pub fn rounds_started(&self) -> u64 {
        self.rounds_started
    }
}

//! The `Sim` struct and its tick loop.

use tracing::trace;

use pursuit_agent::AgentStore;
use pursuit_behavior::Behavior;
use pursuit_core::{SimClock, SimConfig, Tick, TickContext, Vec3};
use pursuit_senses::{NoiseBus, NoiseEmitter, NoiseSubscription};
use pursuit_world::{PlayerState, WorldQuery};

use crate::{
    SensorManager, SensorSnapshot, SimError, SimObserver, SimResult, TickSummary, WantedCallbacks,
    WantedLevelSystem, WantedPhase,
};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<B, W, C>` owns the agents, the world, the noise bus and the wanted
/// level, and drives the three-step tick:
///
/// 1. **Perception**: [`SensorManager::tick`] drains the noise bus, runs
///    vision and hearing for every agent, then delivers radio broadcasts.
/// 2. **Wanted tick**: [`WantedLevelSystem::tick`] refreshes line of sight
///    and runs the current phase's tactics and transitions.
/// 3. **Star decay**: [`WantedLevelSystem::reduce_wanted`].
///
/// The player is supplied by the host every tick; the simulation never
/// moves it.  Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<B, W, C> {
    pub(crate) config:  SimConfig,
    pub(crate) clock:   SimClock,
    pub(crate) world:   W,
    pub(crate) agents:  AgentStore<B>,
    pub(crate) manager: SensorManager,
    pub(crate) wanted:  WantedLevelSystem<C>,
    pub(crate) bus:     NoiseBus,
    pub(crate) noise:   NoiseSubscription,
}

impl<B, W, C> Sim<B, W, C>
where
    B: Behavior,
    W: WorldQuery,
    C: WantedCallbacks,
{
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// `player_at` supplies the player's state for each tick.
    pub fn run<F, O>(&mut self, mut player_at: F, observer: &mut O) -> SimResult<()>
    where
        F: FnMut(TickContext) -> PlayerState,
        O: SimObserver,
    {
        while self.clock.current_tick < self.config.end_tick() {
            let player = player_at(self.clock.context());
            self.step(&player, observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<F, O>(&mut self, n: u64, mut player_at: F, observer: &mut O) -> SimResult<()>
    where
        F: FnMut(TickContext) -> PlayerState,
        O: SimObserver,
    {
        for _ in 0..n {
            let player = player_at(self.clock.context());
            self.step(&player, observer)?;
        }
        Ok(())
    }

    /// Process one tick against `player` and advance the clock.
    ///
    /// A player with a non-finite position or velocity is rejected before
    /// any state changes.
    pub fn step<O: SimObserver>(&mut self, player: &PlayerState, observer: &mut O) -> SimResult<TickSummary> {
        if !player.position.is_finite() || !player.velocity.is_finite() {
            return Err(SimError::InvalidPlayer(player.position.to_string()));
        }

        let ctx = self.clock.context();
        observer.on_tick_start(ctx.tick);

        let report = self.manager.tick(&mut self.agents, player, &self.world, &self.noise, ctx);
        self.wanted.tick(&mut self.agents, player, ctx.dt);
        self.wanted.reduce_wanted(ctx.dt);

        let summary = TickSummary {
            tick:              ctx.tick,
            time_secs:         ctx.now,
            stars:             self.wanted.stars(),
            phase:             self.wanted.phase(),
            noise_events:      report.noise_events,
            broadcasts:        report.broadcasts,
            any_line_of_sight: self.wanted.any_line_of_sight(),
        };
        trace!(
            tick = %ctx.tick,
            noise = report.noise_events,
            sightings = report.sightings,
            deliveries = report.deliveries,
            "tick processed"
        );
        observer.on_tick_end(ctx.tick, &summary);

        let interval = self.config.output_interval_ticks;
        if interval > 0 && ctx.tick.0.is_multiple_of(interval) {
            observer.on_snapshot(ctx.tick, &self.snapshots());
        }

        self.clock.advance();
        Ok(summary)
    }

    /// Current sensor state of every agent, in store order.
    pub fn snapshots(&self) -> Vec<SensorSnapshot> {
        self.agents
            .iter()
            .map(|a| SensorSnapshot {
                agent:         a.id,
                awareness:     a.sensor.awareness(),
                alert_state:   a.sensor.alert_state(),
                line_of_sight: a.sensor.has_line_of_sight(),
                last_known:    a.sensor.last_known().map(|lkp| lkp.position),
            })
            .collect()
    }

    /// Report a crime of `severity` stars witnessed at `witness_pos`.
    pub fn add_wanted_event(&mut self, severity: i32, witness_pos: Vec3) -> WantedPhase {
        self.wanted.add_wanted_event(severity, witness_pos)
    }

    /// A cloneable handle for emitting noise events from anywhere.  Events
    /// emitted before a tick are heard during that tick.
    pub fn emitter(&self) -> NoiseEmitter {
        self.bus.emitter()
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn now_secs(&self) -> f64 {
        self.clock.now_secs()
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn agents(&self) -> &AgentStore<B> {
        &self.agents
    }

    /// Mutable store access, e.g. for inserting reinforcements spawned by the
    /// callbacks.
    pub fn agents_mut(&mut self) -> &mut AgentStore<B> {
        &mut self.agents
    }

    pub fn manager(&self) -> &SensorManager {
        &self.manager
    }

    pub fn wanted(&self) -> &WantedLevelSystem<C> {
        &self.wanted
    }

    pub fn wanted_mut(&mut self) -> &mut WantedLevelSystem<C> {
        &mut self.wanted
    }

    pub fn phase(&self) -> WantedPhase {
        self.wanted.phase()
    }

    pub fn stars(&self) -> u8 {
        self.wanted.stars()
    }
}

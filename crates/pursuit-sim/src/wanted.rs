//! `WantedLevelSystem` — the global pursuit escalation state machine.
//!
//! # Two authorities
//!
//! The phase moves for two independent reasons:
//!
//! - **Events.**  [`add_wanted_event`](WantedLevelSystem::add_wanted_event)
//!   changes the star count; the phase jumps to whatever the star table
//!   says (0 NONE, 1 INVESTIGATION, 2 CHASE, 3 TACTICAL, 4+ ESCALATION).
//! - **Per-tick rules.**  [`tick`](WantedLevelSystem::tick) promotes and
//!   demotes on line-of-sight and timers without touching the table, so the
//!   phase and the star count can disagree until the next event.
//!
//! [`reduce_wanted`](WantedLevelSystem::reduce_wanted) bleeds one star per
//! uninterrupted no-line-of-sight window; reaching zero stars ends the
//! pursuit.
//!
//! Reinforcements are requested only when the phase goes *up*.

use tracing::{debug, info, warn};

use pursuit_agent::{AgentStore, AlertState};
use pursuit_behavior::{Behavior, Intent};
use pursuit_core::geo::{horizontal_direction, lateral_axis};
use pursuit_core::{AgentId, SimRng, Vec3, WantedConfig};
use pursuit_world::PlayerState;

use crate::WantedCallbacks;

/// Upper bound of the star count.
pub const MAX_STARS: u8 = 5;

// ── WantedPhase ───────────────────────────────────────────────────────────────

/// Escalation phase, ordered by severity.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WantedPhase {
    #[default]
    None,
    Investigation,
    Chase,
    Tactical,
    Escalation,
}

impl WantedPhase {
    /// The phase the star table assigns to `stars`.
    pub fn from_stars(stars: u8) -> Self {
        match stars {
            0 => WantedPhase::None,
            1 => WantedPhase::Investigation,
            2 => WantedPhase::Chase,
            3 => WantedPhase::Tactical,
            _ => WantedPhase::Escalation,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WantedPhase::None          => "none",
            WantedPhase::Investigation => "investigation",
            WantedPhase::Chase         => "chase",
            WantedPhase::Tactical      => "tactical",
            WantedPhase::Escalation    => "escalation",
        }
    }
}

impl std::fmt::Display for WantedPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── WantedLevelSystem ─────────────────────────────────────────────────────────

pub struct WantedLevelSystem<C> {
    cfg:       WantedConfig,
    callbacks: C,
    rng:       SimRng,

    phase: WantedPhase,
    stars: u8,

    /// Seconds without any agent holding line of sight, towards the next
    /// star loss.
    no_los_timer:  f32,
    /// Seconds since line of sight was last held.
    chase_timer:   f32,
    /// Seconds since the last phase transition.
    phase_elapsed: f32,
    /// Whether any agent held line of sight at the last `tick`.
    any_los:       bool,

    active_units: Vec<AgentId>,
}

impl<C: WantedCallbacks> WantedLevelSystem<C> {
    pub fn new(cfg: WantedConfig, callbacks: C, rng: SimRng) -> Self {
        Self {
            cfg,
            callbacks,
            rng,
            phase: WantedPhase::None,
            stars: 0,
            no_los_timer: 0.0,
            chase_timer: 0.0,
            phase_elapsed: 0.0,
            any_los: false,
            active_units: Vec::new(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn phase(&self) -> WantedPhase { self.phase }
    pub fn stars(&self) -> u8 { self.stars }
    pub fn no_los_timer(&self) -> f32 { self.no_los_timer }
    pub fn chase_timer(&self) -> f32 { self.chase_timer }
    pub fn phase_elapsed(&self) -> f32 { self.phase_elapsed }
    pub fn any_line_of_sight(&self) -> bool { self.any_los }

    /// Reinforcements spawned since the wanted level was last NONE.
    pub fn active_units(&self) -> &[AgentId] {
        &self.active_units
    }

    pub fn callbacks(&self) -> &C {
        &self.callbacks
    }

    pub fn callbacks_mut(&mut self) -> &mut C {
        &mut self.callbacks
    }

    // ── Event authority ───────────────────────────────────────────────────

    /// A crime was witnessed at `witness_pos`.  `severity` may be negative
    /// (e.g. a bribe).  Returns the resulting phase.
    pub fn add_wanted_event(&mut self, severity: i32, witness_pos: Vec3) -> WantedPhase {
        let before = self.stars;
        self.stars = (i32::from(self.stars) + severity).clamp(0, i32::from(MAX_STARS)) as u8;
        if self.stars != before {
            info!(from = before, to = self.stars, severity, "wanted stars changed");
        }

        let target = WantedPhase::from_stars(self.stars);
        if target != self.phase {
            self.transition(target, witness_pos);
        }
        self.phase
    }

    // ── Star decay ────────────────────────────────────────────────────────

    /// Bleed stars while nobody has eyes on the target.
    pub fn reduce_wanted(&mut self, dt: f32) {
        if self.phase == WantedPhase::None || self.any_los {
            return;
        }
        self.no_los_timer += dt;
        if self.no_los_timer < self.cfg.no_los_decay_secs {
            return;
        }

        self.no_los_timer = 0.0;
        let before = self.stars;
        self.stars = self.stars.saturating_sub(1);
        info!(from = before, to = self.stars, "wanted star lost: no line of sight");
        if self.stars == 0 {
            self.transition(WantedPhase::None, Vec3::ZERO);
        }
    }

    // ── Tick authority ────────────────────────────────────────────────────

    /// Refresh line of sight and timers, then run the current phase's
    /// tactics and promotion / demotion rules.
    pub fn tick<B: Behavior>(&mut self, agents: &mut AgentStore<B>, player: &PlayerState, dt: f32) {
        self.any_los = agents.iter().any(|a| a.sensor.has_line_of_sight());
        self.phase_elapsed += dt;
        if self.any_los {
            self.no_los_timer = 0.0;
            self.chase_timer = 0.0;
        } else {
            self.chase_timer += dt;
        }

        match self.phase {
            WantedPhase::None          => {}
            WantedPhase::Investigation => self.investigation(agents, player),
            WantedPhase::Chase         => self.chase(agents, player),
            WantedPhase::Tactical      => self.tactical(agents, player, dt),
            WantedPhase::Escalation    => self.escalation(agents, player, dt),
        }
    }

    fn investigation<B: Behavior>(&mut self, agents: &mut AgentStore<B>, player: &PlayerState) {
        for agent in agents.iter_mut() {
            if agent.sensor.alert_state() != AlertState::Idle {
                continue;
            }
            if let Some(lkp) = agent.sensor.last_known() {
                let radius = agent.sensor.config().investigate_radius;
                agent.perform(Intent::Investigate { point: lkp.position, radius });
            }
        }

        if self.any_los {
            self.transition(WantedPhase::Chase, player.position);
        } else if self.chase_timer > self.cfg.investigation_give_up_secs {
            let before = self.stars;
            self.stars = self.stars.saturating_sub(1);
            info!(from = before, to = self.stars, "investigation abandoned");
            self.transition(WantedPhase::None, player.position);
        }
    }

    /// CHASE handler.  The time-based promotion to TACTICAL needs line of
    /// sight this tick as well as 20 s in phase; without the LOS gate the
    /// 60 s fallback to INVESTIGATION could never fire.
    fn chase<B: Behavior>(&mut self, agents: &mut AgentStore<B>, player: &PlayerState) {
        let target = player.position;
        for agent in agents.iter_mut() {
            if agent.sensor.alert_state() == AlertState::Hostile {
                agent.perform(Intent::Chase { target });
                agent.perform(Intent::CallForBackup(target));
            }
        }

        let sustained = self.any_los && self.phase_elapsed > self.cfg.chase_promote_secs;
        if self.stars >= 3 || sustained {
            self.transition(WantedPhase::Tactical, target);
        } else if self.chase_timer > self.cfg.chase_give_up_secs {
            self.transition(WantedPhase::Investigation, target);
        }
    }

    fn tactical<B: Behavior>(&mut self, agents: &mut AgentStore<B>, player: &PlayerState, dt: f32) {
        let target = player.position;

        let flanker = agents
            .iter()
            .filter(|a| a.sensor.has_line_of_sight())
            .map(|a| a.id)
            .min()
            .or_else(|| agents.ids().next());

        if let Some(flanker) = flanker {
            let side = if self.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            for agent in agents.iter_mut() {
                if agent.id == flanker {
                    let lateral = lateral_axis(target - agent.position);
                    agent.perform(Intent::Flank(target + lateral * self.cfg.flank_offset * side));
                } else {
                    agent.perform(Intent::TakeCover);
                }
            }
        }

        if self.rng.gen_bool(f64::from(self.cfg.smoke_rate * dt)) && !agents.is_empty() {
            let slot = self.rng.gen_range(0..agents.len());
            if let Some(agent) = agents.as_mut_slice().get_mut(slot) {
                debug!(agent = %agent.id, "smoke thrown");
                agent.perform(Intent::ThrowSmoke(target));
            }
        }

        if self.stars >= 4 {
            self.transition(WantedPhase::Escalation, target);
        }
    }

    fn escalation<B: Behavior>(&mut self, agents: &mut AgentStore<B>, player: &PlayerState, dt: f32) {
        let target = player.position;

        if self.rng.gen_bool(f64::from(self.cfg.helicopter_rate * dt)) {
            let over = target + Vec3::Y * self.cfg.helicopter_altitude;
            debug!(?over, "helicopter requested");
            self.callbacks.spawn_helicopter(over);
        }

        if self.rng.gen_bool(f64::from(self.cfg.roadblock_rate * dt)) {
            match horizontal_direction(player.velocity) {
                Some(heading) => {
                    let at = target + heading * self.cfg.roadblock_lead;
                    debug!(?at, "roadblock requested");
                    self.callbacks.create_roadblock(at, -heading);
                }
                None => debug!("roadblock skipped: target stationary"),
            }
        }

        for agent in agents.iter_mut() {
            agent.perform(Intent::Chase { target });
        }
    }

    // ── Transitions ───────────────────────────────────────────────────────

    fn transition(&mut self, next: WantedPhase, near: Vec3) {
        let prev = self.phase;
        if prev == next {
            return;
        }
        self.phase = next;
        self.no_los_timer = 0.0;
        self.chase_timer = 0.0;
        self.phase_elapsed = 0.0;
        info!(%prev, %next, stars = self.stars, "wanted phase changed");
        self.callbacks.on_phase_change(prev, next);

        if next > prev {
            self.spawn_reinforcements(next, near);
        }
        if next == WantedPhase::None && !self.active_units.is_empty() {
            let units = std::mem::take(&mut self.active_units);
            debug!(count = units.len(), "releasing reinforcements");
            self.callbacks.release_units(&units);
        }
    }

    fn spawn_reinforcements(&mut self, phase: WantedPhase, near: Vec3) {
        let (police, swat) = match phase {
            WantedPhase::None          => (0, 0),
            WantedPhase::Investigation => (self.cfg.investigation_police, 0),
            WantedPhase::Chase         => (self.cfg.chase_police, 0),
            WantedPhase::Tactical      => (self.cfg.tactical_police, 0),
            WantedPhase::Escalation    => (0, self.cfg.escalation_swat),
        };

        for _ in 0..police {
            match self.callbacks.spawn_police_unit(near) {
                Some(id) => {
                    debug!(unit = %id, %phase, "police unit spawned");
                    self.active_units.push(id);
                }
                None => warn!(%phase, "police spawn refused"),
            }
        }
        for _ in 0..swat {
            match self.callbacks.spawn_swat_unit(near) {
                Some(id) => {
                    debug!(unit = %id, %phase, "SWAT unit spawned");
                    self.active_units.push(id);
                }
                None => warn!(%phase, "SWAT spawn refused"),
            }
        }
        if phase == WantedPhase::Escalation {
            self.callbacks.request_air_support(near);
        }
    }
}

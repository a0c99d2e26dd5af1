//! `SensorComponent` — one agent's awareness gauge and alert state machine.
//!
//! # Tick procedure
//!
//! 1. Score vision against the player.
//! 2. If seen, accrue awareness at the zone's rate scaled by the visible
//!    fraction, the crouch penalty and the light multiplier; refresh the
//!    last known position.  If unseen and not HOSTILE, decay.
//! 3. Recompute the alert state from awareness (no hysteresis).
//! 4. Dispatch intents: an alert animation on any change, then the reaction
//!    for the current state.
//!
//! Hearing and radio broadcasts mutate awareness *after* the tick through
//! [`on_noise`](SensorComponent::on_noise),
//! [`add_awareness`](SensorComponent::add_awareness) and
//! [`floor_awareness`](SensorComponent::floor_awareness).  Those leave the
//! alert state alone; the caller follows them with
//! [`refresh_alert_state`](SensorComponent::refresh_alert_state), which runs
//! steps 3 and 4 again so the state never lags the gauge across a tick
//! boundary.

use tracing::debug;

use pursuit_behavior::{Behavior, Intent};
use pursuit_core::{AgentId, AlertState, SensorConfig, TickContext, Vec3};
use pursuit_senses::{DetectionZone, NoiseEvent, VisionCone, VisionResult};
use pursuit_world::{PlayerState, WorldQuery};

/// Upper bound of the awareness gauge.
pub const MAX_AWARENESS: f32 = 100.0;

// ── LastKnownPosition ─────────────────────────────────────────────────────────

/// Where the player was last seen, heard or reported, and when.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LastKnownPosition {
    pub position: Vec3,
    /// Simulation seconds.
    pub time: f64,
}

// ── Perception ────────────────────────────────────────────────────────────────

/// Read-only inputs shared by every agent's sensor tick.
///
/// Built once per tick by the sensor manager.
pub struct Perception<'a, W: WorldQuery + ?Sized> {
    pub player:           &'a PlayerState,
    pub world:            &'a W,
    pub vision:           &'a VisionCone,
    /// Light multiplier for the player this tick.
    pub light_multiplier: f32,
    pub ctx:              TickContext,
}

impl<W: WorldQuery + ?Sized> Clone for Perception<'_, W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W: WorldQuery + ?Sized> Copy for Perception<'_, W> {}

// ── SensorComponent ───────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct SensorComponent {
    cfg:               SensorConfig,
    awareness:         f32,
    alert_state:       AlertState,
    last_known:        Option<LastKnownPosition>,
    has_line_of_sight: bool,
    /// Seconds left before a calmed-down agent gives up and returns to post.
    search_timer:      Option<f32>,
}

impl SensorComponent {
    pub fn new(cfg: SensorConfig) -> Self {
        Self {
            cfg,
            awareness:         0.0,
            alert_state:       AlertState::Idle,
            last_known:        None,
            has_line_of_sight: false,
            search_timer:      None,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn awareness(&self) -> f32 { self.awareness }

    #[inline]
    pub fn alert_state(&self) -> AlertState { self.alert_state }

    #[inline]
    pub fn last_known(&self) -> Option<LastKnownPosition> { self.last_known }

    /// Whether the player was visible at this agent's latest tick.
    #[inline]
    pub fn has_line_of_sight(&self) -> bool { self.has_line_of_sight }

    #[inline]
    pub fn search_timer(&self) -> Option<f32> { self.search_timer }

    pub fn config(&self) -> &SensorConfig { &self.cfg }

    // ── Cross-pass mutation ───────────────────────────────────────────────

    /// Add (or with a negative amount, remove) awareness, clamped to `[0, 100]`.
    pub fn add_awareness(&mut self, amount: f32) {
        self.awareness = (self.awareness + amount).clamp(0.0, MAX_AWARENESS);
    }

    /// Raise awareness to at least `min`.
    pub fn floor_awareness(&mut self, min: f32) {
        self.awareness = self.awareness.max(min).clamp(0.0, MAX_AWARENESS);
    }

    pub fn set_last_known(&mut self, position: Vec3, time: f64) {
        self.last_known = Some(LastKnownPosition { position, time });
    }

    pub fn forget_last_known(&mut self) {
        self.last_known = None;
    }

    /// Overwrite awareness and snap the alert state to match, without
    /// dispatching anything.  For scripted setups and restored saves.
    pub fn set_awareness(&mut self, awareness: f32) {
        self.awareness = awareness.clamp(0.0, MAX_AWARENESS);
        self.alert_state = AlertState::from_awareness(self.awareness, &self.cfg);
    }

    /// Apply a heard noise of the given intensity.
    ///
    /// Loud enough noises overwrite the last known position, even one seen
    /// more recently.
    pub fn on_noise(&mut self, intensity: f32, event: &NoiseEvent) {
        if intensity <= 0.0 {
            return;
        }
        self.add_awareness(intensity * event.kind.base_awareness());
        if intensity > self.cfg.hearing_lkp_intensity {
            self.set_last_known(event.position, event.timestamp);
        }
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Awareness per second for a target in `zone` at full exposure.
    pub fn zone_rate(&self, zone: DetectionZone) -> f32 {
        match zone {
            DetectionZone::Near       => self.cfg.near_rate,
            DetectionZone::Far        => self.cfg.far_rate,
            DetectionZone::Peripheral => self.cfg.peripheral_rate,
            DetectionZone::None       => 0.0,
        }
    }

    /// Run one sensor tick for the agent `me` standing at `position` and
    /// facing `look_dir`.
    pub fn tick<W, B>(
        &mut self,
        me:       AgentId,
        position: Vec3,
        look_dir: Vec3,
        p:        &Perception<'_, W>,
        behavior: &mut B,
    ) -> VisionResult
    where
        W: WorldQuery + ?Sized,
        B: Behavior + ?Sized,
    {
        let dt = p.ctx.dt;
        let vision = p.vision.check(position, look_dir, p.player.position, p.world, p.light_multiplier);

        if vision.visible {
            let crouch = if p.player.crouching { self.cfg.crouch_penalty } else { 1.0 };
            let rate = self.zone_rate(vision.zone) * vision.fraction * crouch * p.light_multiplier;
            self.add_awareness(rate * dt);
            self.set_last_known(p.player.position, p.ctx.now);
        } else if self.alert_state != AlertState::Hostile {
            self.add_awareness(-self.cfg.decay_rate * dt);
        }

        let previous = self.update_alert_state(me, behavior);
        self.react(me, previous, p.player.position, dt, behavior);

        self.has_line_of_sight = vision.visible;
        vision
    }

    /// Bring the alert state up to date after an out-of-tick awareness
    /// change.  On a change this dispatches the alert animation and the new
    /// state's reaction, exactly as a tick would.  Returns whether the state
    /// changed.
    pub fn refresh_alert_state<B>(&mut self, me: AgentId, target: Vec3, behavior: &mut B) -> bool
    where
        B: Behavior + ?Sized,
    {
        let previous = self.update_alert_state(me, behavior);
        if previous == self.alert_state {
            return false;
        }
        self.react(me, previous, target, 0.0, behavior);
        true
    }

    /// Recompute the state from awareness and animate a change.  Returns the
    /// state before the recompute.
    fn update_alert_state<B>(&mut self, me: AgentId, behavior: &mut B) -> AlertState
    where
        B: Behavior + ?Sized,
    {
        let previous = self.alert_state;
        self.alert_state = AlertState::from_awareness(self.awareness, &self.cfg);
        if self.alert_state != previous {
            debug!(agent = %me, from = %previous, to = %self.alert_state, awareness = self.awareness, "alert state changed");
            behavior.perform(me, Intent::SetAlertAnimation(self.alert_state));
        }
        previous
    }

    /// Per-state reaction.  `dt` is the time the give-up countdown runs down by.
    fn react<B>(&mut self, me: AgentId, previous: AlertState, target: Vec3, dt: f32, behavior: &mut B)
    where
        B: Behavior + ?Sized,
    {
        match self.alert_state {
            AlertState::Curious => {
                self.search_timer = None;
                if let Some(lkp) = self.last_known {
                    behavior.perform(me, Intent::MoveTo(lkp.position));
                }
            }
            AlertState::Suspect => {
                self.search_timer = None;
                if let Some(lkp) = self.last_known {
                    behavior.perform(me, Intent::Investigate {
                        point:  lkp.position,
                        radius: self.cfg.investigate_radius,
                    });
                }
            }
            AlertState::Hostile => {
                self.search_timer = None;
                behavior.perform(me, Intent::Chase { target });
            }
            AlertState::Idle => {
                // The arming tick already counts against the timeout.
                if previous != AlertState::Idle {
                    self.search_timer = Some(self.cfg.investigation_timeout);
                }
                if let Some(remaining) = self.search_timer {
                    let remaining = remaining - dt;
                    if remaining <= 0.0 {
                        debug!(agent = %me, "search abandoned");
                        self.search_timer = None;
                        self.last_known = None;
                        behavior.perform(me, Intent::Retreat);
                    } else {
                        self.search_timer = Some(remaining);
                    }
                }
            }
        }
    }
}

impl Default for SensorComponent {
    fn default() -> Self {
        Self::new(SensorConfig::default())
    }
}

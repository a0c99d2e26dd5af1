//! Noise events and the single-consumer noise bus.
//!
//! # Flow
//!
//! Gameplay code holds cloneable [`NoiseEmitter`]s and emits a
//! [`NoiseEvent`] whenever something audible happens.  The perception loop
//! owns the one [`NoiseSubscription`] and drains it once per tick, so every
//! event emitted during a frame is heard on the next perception tick, exactly
//! once.
//!
//! Dropping the subscription closes the bus: later emits return
//! [`SensesError::BusClosed`].

use std::fmt;
use std::str::FromStr;

use crossbeam_channel::{Receiver, Sender, unbounded};
use tracing::trace;

use pursuit_core::Vec3;

use crate::{SensesError, SensesResult};

// ── NoiseKind ─────────────────────────────────────────────────────────────────

/// What made the noise.  Determines how far it carries and how alarming it
/// is to whoever hears it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NoiseKind {
    Explosion,
    Gunshot,
    GlassBreak,
    Vehicle,
    SilencedGun,
    Sprint,
    Melee,
    Land,
    Walk,
    CrouchWalk,
}

impl NoiseKind {
    pub const ALL: [NoiseKind; 10] = [
        NoiseKind::Explosion,
        NoiseKind::Gunshot,
        NoiseKind::GlassBreak,
        NoiseKind::Vehicle,
        NoiseKind::SilencedGun,
        NoiseKind::Sprint,
        NoiseKind::Melee,
        NoiseKind::Land,
        NoiseKind::Walk,
        NoiseKind::CrouchWalk,
    ];

    /// Awareness added to a listener at full intensity.
    pub fn base_awareness(self) -> f32 {
        match self {
            NoiseKind::Explosion   => 80.0,
            NoiseKind::Gunshot     => 60.0,
            NoiseKind::GlassBreak  => 35.0,
            NoiseKind::Vehicle     => 30.0,
            NoiseKind::SilencedGun => 15.0,
            NoiseKind::Sprint      => 20.0,
            NoiseKind::Melee       => 25.0,
            NoiseKind::Land        => 18.0,
            NoiseKind::Walk        => 8.0,
            NoiseKind::CrouchWalk  => 2.0,
        }
    }

    /// Audible radius in metres used by [`NoiseEvent::new`].
    pub fn default_radius(self) -> f32 {
        match self {
            NoiseKind::Explosion   => 60.0,
            NoiseKind::Gunshot     => 45.0,
            NoiseKind::GlassBreak  => 20.0,
            NoiseKind::Vehicle     => 25.0,
            NoiseKind::SilencedGun => 10.0,
            NoiseKind::Sprint      => 16.0,
            NoiseKind::Melee       => 12.0,
            NoiseKind::Land        => 10.0,
            NoiseKind::Walk        => 6.0,
            NoiseKind::CrouchWalk  => 2.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NoiseKind::Explosion   => "explosion",
            NoiseKind::Gunshot     => "gunshot",
            NoiseKind::GlassBreak  => "glass_break",
            NoiseKind::Vehicle     => "vehicle",
            NoiseKind::SilencedGun => "silenced_gun",
            NoiseKind::Sprint      => "sprint",
            NoiseKind::Melee       => "melee",
            NoiseKind::Land        => "land",
            NoiseKind::Walk        => "walk",
            NoiseKind::CrouchWalk  => "crouch_walk",
        }
    }
}

impl fmt::Display for NoiseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoiseKind {
    type Err = SensesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NoiseKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SensesError::UnknownNoiseKind(s.to_owned()))
    }
}

// ── NoiseEvent ────────────────────────────────────────────────────────────────

/// One audible occurrence.  Immutable once emitted.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoiseEvent {
    pub kind:      NoiseKind,
    pub position:  Vec3,
    /// Effective audible radius, metres.
    pub radius:    f32,
    /// Simulation seconds at emission.
    pub timestamp: f64,
}

impl NoiseEvent {
    /// An event with the kind's default radius.
    pub fn new(kind: NoiseKind, position: Vec3, timestamp: f64) -> Self {
        Self { kind, position, radius: kind.default_radius(), timestamp }
    }

    /// Override the audible radius (muffled or amplified sources).
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }
}

// ── NoiseBus ──────────────────────────────────────────────────────────────────

/// Owner of the noise channel.
///
/// Events emitted before anyone subscribes are queued and delivered to the
/// eventual subscriber.
pub struct NoiseBus {
    tx: Sender<NoiseEvent>,
    rx: Option<Receiver<NoiseEvent>>,
}

impl NoiseBus {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx: Some(rx) }
    }

    /// A new sending handle.  Emitters are cheap to clone and `Send + Sync`.
    pub fn emitter(&self) -> NoiseEmitter {
        NoiseEmitter { tx: self.tx.clone() }
    }

    /// Emit through the bus's own sender.
    pub fn emit(&self, event: NoiseEvent) -> SensesResult<()> {
        send(&self.tx, event)
    }

    /// Take the single receiving end.
    pub fn subscribe(&mut self) -> SensesResult<NoiseSubscription> {
        let rx = self.rx.take().ok_or(SensesError::AlreadySubscribed)?;
        Ok(NoiseSubscription { rx })
    }

    pub fn is_subscribed(&self) -> bool {
        self.rx.is_none()
    }
}

impl Default for NoiseBus {
    fn default() -> Self {
        Self::new()
    }
}

fn send(tx: &Sender<NoiseEvent>, event: NoiseEvent) -> SensesResult<()> {
    trace!(kind = %event.kind, radius = event.radius, "noise emitted");
    tx.send(event).map_err(|_| SensesError::BusClosed)
}

/// Sending handle to a [`NoiseBus`].
#[derive(Clone)]
pub struct NoiseEmitter {
    tx: Sender<NoiseEvent>,
}

impl NoiseEmitter {
    pub fn emit(&self, event: NoiseEvent) -> SensesResult<()> {
        send(&self.tx, event)
    }
}

/// The bus's one receiving end.  Dropping it closes the bus.
pub struct NoiseSubscription {
    rx: Receiver<NoiseEvent>,
}

impl NoiseSubscription {
    /// Remove and return every queued event, oldest first.
    ///
    /// Events emitted while draining are left for the next call.
    pub fn drain(&self) -> Vec<NoiseEvent> {
        let pending = self.rx.len();
        self.rx.try_iter().take(pending).collect()
    }

    /// Number of queued events.
    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

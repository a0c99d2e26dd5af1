//! `HearingSystem` — how loudly does a listener hear a noise?
//!
//! # Model
//!
//! ```text
//! raw       = 1 − distance / radius                   (0 beyond the radius)
//! intensity = raw × mean(wall_attenuation ^ walls_i)  over `samples` paths
//! ```
//!
//! Each path runs from a jittered point near the source to a jittered point
//! near the listener.  Walls are counted by repeated raycasts: after each hit
//! the walk restarts a small step past the hit point, up to `max_walls`.
//! Jitter keeps a single thin pillar from muting a noise completely.

use std::f32::consts::TAU;

use pursuit_core::{AgentRng, HearingConfig, Vec3};
use pursuit_world::WorldQuery;

use crate::NoiseEvent;

/// Below this separation the listener is treated as standing on the source.
const COINCIDENT_EPS: f32 = 1e-4;

/// Stateless hearing scorer.
#[derive(Clone, Debug, Default)]
pub struct HearingSystem {
    cfg: HearingConfig,
}

impl HearingSystem {
    pub fn new(cfg: HearingConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &HearingConfig {
        &self.cfg
    }

    /// Intensity in `[0, 1]` of `event` at `listener_pos`.
    pub fn check<W: WorldQuery + ?Sized>(
        &self,
        listener_pos: Vec3,
        event:        &NoiseEvent,
        world:        &W,
        rng:          &mut AgentRng,
    ) -> f32 {
        if !(event.radius > 0.0) {
            return 0.0;
        }
        let distance = listener_pos.distance(event.position);
        if distance > event.radius {
            return 0.0;
        }
        let raw = 1.0 - distance / event.radius;
        if distance < COINCIDENT_EPS {
            return raw;
        }

        let axis = (listener_pos - event.position) / distance;
        let samples = self.cfg.samples.max(1);
        let total: f32 = (0..samples)
            .map(|_| {
                let from = event.position + self.jitter(axis, rng);
                let to = listener_pos + self.jitter(axis, rng);
                self.cfg.wall_attenuation.powi(self.count_walls(from, to, world) as i32)
            })
            .sum();

        (raw * (total / samples as f32)).clamp(0.0, 1.0)
    }

    /// Walls crossed on the segment `from → to`, capped at `max_walls`.
    pub fn count_walls<W: WorldQuery + ?Sized>(&self, from: Vec3, to: Vec3, world: &W) -> u32 {
        let mut remaining = from.distance(to);
        if remaining < COINCIDENT_EPS {
            return 0;
        }
        let dir = (to - from) / remaining;
        let mut origin = from;
        let mut walls = 0;

        while walls < self.cfg.max_walls {
            let Some(hit) = world.raycast(origin, dir, remaining) else { break };
            walls += 1;
            let advance = hit.distance + self.cfg.wall_step;
            if advance >= remaining {
                break;
            }
            origin += dir * advance;
            remaining -= advance;
        }
        walls
    }

    /// Random offset perpendicular to `axis`, at most `jitter` long.
    fn jitter(&self, axis: Vec3, rng: &mut AgentRng) -> Vec3 {
        let (u, v) = axis.any_orthonormal_pair();
        let theta: f32 = rng.gen_range(0.0..TAU);
        let magnitude: f32 = rng.gen_range(0.0..=self.cfg.jitter.max(0.0));
        (u * theta.cos() + v * theta.sin()) * magnitude
    }
}

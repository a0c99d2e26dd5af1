//! `VisionCone` — can an observer see the target, and how well?
//!
//! # Procedure
//!
//! 1. **Range gate.**  Beyond `far_range + range_margin` nothing is seen.
//! 2. **Zone.**  The angle between the look direction and the direction to
//!    the target picks Near / Far (inside the primary FOV, split at
//!    `near_range`), Peripheral (inside the wider peripheral FOV) or None.
//! 3. **Darkness.**  Below `darkness_epsilon` light the target is only seen
//!    up close (Near zone).
//! 4. **Occlusion.**  Five points on the target's body are probed from the
//!    observer's position; the visible fraction is `unblocked / 5`.

use pursuit_core::geo::{angle_between_deg, lateral_axis};
use pursuit_core::{Vec3, VisionConfig};
use pursuit_world::WorldQuery;

/// Body sample heights above the feet, metres.
const HEAD_HEIGHT:     f32 = 1.7;
const TORSO_HEIGHT:    f32 = 1.2;
const FEET_HEIGHT:     f32 = 0.1;
const SHOULDER_HEIGHT: f32 = 1.45;
/// Shoulder offset either side of the body centreline, metres.
const SHOULDER_HALF_WIDTH: f32 = 0.25;

/// Number of body points probed per check.
pub const BODY_SAMPLES: usize = 5;

// ── DetectionZone ─────────────────────────────────────────────────────────────

/// Which part of the visual field the target is in.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DetectionZone {
    #[default]
    None,
    Peripheral,
    Near,
    Far,
}

impl DetectionZone {
    pub fn as_str(self) -> &'static str {
        match self {
            DetectionZone::None       => "none",
            DetectionZone::Peripheral => "peripheral",
            DetectionZone::Near       => "near",
            DetectionZone::Far        => "far",
        }
    }
}

impl std::fmt::Display for DetectionZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── VisionResult ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VisionResult {
    /// `fraction > 0`.
    pub visible:  bool,
    /// Share of body samples with a clear line, in `{0, 0.2, …, 1}`.
    pub fraction: f32,
    pub distance: f32,
    pub zone:     DetectionZone,
}

impl VisionResult {
    fn unseen(distance: f32, zone: DetectionZone) -> Self {
        Self { visible: false, fraction: 0.0, distance, zone }
    }
}

// ── VisionCone ────────────────────────────────────────────────────────────────

/// Stateless vision scorer.
#[derive(Clone, Debug, Default)]
pub struct VisionCone {
    cfg: VisionConfig,
}

impl VisionCone {
    pub fn new(cfg: VisionConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &VisionConfig {
        &self.cfg
    }

    /// Zone of `target_pos` relative to an observer pose, ignoring light and
    /// occlusion.
    pub fn zone(&self, observer_pos: Vec3, look_dir: Vec3, target_pos: Vec3) -> DetectionZone {
        let to_target = target_pos - observer_pos;
        let distance = to_target.length();
        if distance > self.cfg.far_range + self.cfg.range_margin {
            return DetectionZone::None;
        }

        let angle = angle_between_deg(look_dir, to_target);
        if angle > self.cfg.peripheral_fov_degrees * 0.5 {
            DetectionZone::None
        } else if angle > self.cfg.fov_degrees * 0.5 {
            DetectionZone::Peripheral
        } else if distance <= self.cfg.near_range {
            DetectionZone::Near
        } else {
            DetectionZone::Far
        }
    }

    /// Score the target standing at `target_pos` (feet).
    pub fn check<W: WorldQuery + ?Sized>(
        &self,
        observer_pos:     Vec3,
        look_dir:         Vec3,
        target_pos:       Vec3,
        world:            &W,
        light_multiplier: f32,
    ) -> VisionResult {
        let distance = observer_pos.distance(target_pos);
        let zone = self.zone(observer_pos, look_dir, target_pos);

        if zone == DetectionZone::None {
            return VisionResult::unseen(distance, zone);
        }
        if light_multiplier < self.cfg.darkness_epsilon && zone != DetectionZone::Near {
            return VisionResult::unseen(distance, zone);
        }

        let clear = body_samples(observer_pos, target_pos)
            .into_iter()
            .filter(|&p| self.probe_clear(observer_pos, p, world))
            .count();

        let fraction = clear as f32 / BODY_SAMPLES as f32;
        VisionResult { visible: clear > 0, fraction, distance, zone }
    }

    fn probe_clear<W: WorldQuery + ?Sized>(&self, eye: Vec3, sample: Vec3, world: &W) -> bool {
        let ray = sample - eye;
        let len = ray.length();
        if len <= self.cfg.probe_tolerance {
            return true;
        }
        match world.raycast(eye, ray / len, len) {
            Some(hit) => hit.distance >= len - self.cfg.probe_tolerance,
            None => true,
        }
    }
}

/// Head, torso, feet, left shoulder, right shoulder — in probe order.
///
/// Shoulders are offset along the horizontal axis perpendicular to the
/// observer→target line, so both stay visible from the front.
pub fn body_samples(observer_pos: Vec3, target_pos: Vec3) -> [Vec3; BODY_SAMPLES] {
    let side = lateral_axis(target_pos - observer_pos) * SHOULDER_HALF_WIDTH;
    let up = |h: f32| target_pos + Vec3::Y * h;
    [
        up(HEAD_HEIGHT),
        up(TORSO_HEIGHT),
        up(FEET_HEIGHT),
        up(SHOULDER_HEIGHT) - side,
        up(SHOULDER_HEIGHT) + side,
    ]
}

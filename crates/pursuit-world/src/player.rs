//! The pursued target.

use pursuit_core::Vec3;

/// Per-tick snapshot of the player, supplied by the host.
///
/// `position` is the feet position; body sample points are offset upward
/// from it.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub position:  Vec3,
    pub velocity:  Vec3,
    /// Light exposure in `[0, 1]` as computed by the host's lighting (shadow
    /// volumes, flashlights, …).  `None` means "use the world's ambient level
    /// at `position`".
    pub light_exposure: Option<f32>,
    pub crouching: bool,
}

impl PlayerState {
    /// A standing, motionless player at `position` with world-derived exposure.
    pub fn at(position: Vec3) -> Self {
        Self { position, ..Self::default() }
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_exposure(mut self, exposure: f32) -> Self {
        self.light_exposure = Some(exposure);
        self
    }

    pub fn crouched(mut self, crouching: bool) -> Self {
        self.crouching = crouching;
        self
    }
}

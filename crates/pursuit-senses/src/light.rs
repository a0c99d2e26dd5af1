//! `LightLevelSystem` — exposure to detection-rate multiplier.

use pursuit_core::LightConfig;
use pursuit_world::{PlayerState, WorldQuery};

/// Stateless light scorer.
///
/// The multiplier scales every vision-driven awareness gain; below the
/// vision cone's darkness threshold the target cannot be seen beyond the
/// near zone at all.
#[derive(Clone, Debug, Default)]
pub struct LightLevelSystem {
    cfg: LightConfig,
}

impl LightLevelSystem {
    pub fn new(cfg: LightConfig) -> Self {
        Self { cfg }
    }

    /// The player's exposure in `[0, 1]`: the host-supplied value if any,
    /// else the world's light level at the player's feet.
    pub fn exposure<W: WorldQuery + ?Sized>(&self, player: &PlayerState, world: &W) -> f32 {
        player
            .light_exposure
            .unwrap_or_else(|| world.light_level(player.position))
            .clamp(0.0, 1.0)
    }

    /// Linear interpolation from `min_multiplier` (exposure 0) to
    /// `max_multiplier` (exposure 1).
    pub fn multiplier(&self, exposure: f32) -> f32 {
        let t = exposure.clamp(0.0, 1.0);
        self.cfg.min_multiplier + (self.cfg.max_multiplier - self.cfg.min_multiplier) * t
    }

    pub fn detection_multiplier<W: WorldQuery + ?Sized>(&self, player: &PlayerState, world: &W) -> f32 {
        self.multiplier(self.exposure(player, world))
    }
}

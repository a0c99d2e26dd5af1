//! The `WorldQuery` capability trait.
//!
//! # Pluggability
//!
//! `pursuit-senses` casts occlusion probes and reads light levels only via
//! [`WorldQuery`], so hosts can back it with a physics engine's query
//! pipeline, a navmesh raycaster, or the bundled [`BlockWorld`][crate::BlockWorld].
//!
//! A `None` from [`raycast`][WorldQuery::raycast] is a valid answer ("clear
//! line"), never an error.

use pursuit_core::Vec3;

/// What kind of surface a ray hit.  Reported for diagnostics; every surface
/// occludes and attenuates the same way.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SurfaceTag {
    #[default]
    Wall,
    Glass,
    Foliage,
    Vehicle,
    Terrain,
}

impl SurfaceTag {
    pub fn as_str(self) -> &'static str {
        match self {
            SurfaceTag::Wall    => "wall",
            SurfaceTag::Glass   => "glass",
            SurfaceTag::Foliage => "foliage",
            SurfaceTag::Vehicle => "vehicle",
            SurfaceTag::Terrain => "terrain",
        }
    }
}

impl std::fmt::Display for SurfaceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The first surface along a ray.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayHit {
    pub point:    Vec3,
    /// Distance from the ray origin to `point`.
    pub distance: f32,
    /// Outward surface normal at `point`.
    pub normal:   Vec3,
    pub tag:      SurfaceTag,
}

/// Read-only world queries consumed by the perception scorers.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`: with the `parallel` feature the
/// per-agent sensor pass queries the world from several Rayon workers.
pub trait WorldQuery: Send + Sync {
    /// First hit along `direction` (unit length) from `origin`, within
    /// `max_distance`.
    ///
    /// Surfaces whose entry point lies behind `origin` (including the one the
    /// origin is inside of) are not reported.
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;

    /// Ambient light level at `point`, in `[0, 1]`.
    fn light_level(&self, point: Vec3) -> f32;
}

impl<W: WorldQuery + ?Sized> WorldQuery for &W {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        (**self).raycast(origin, direction, max_distance)
    }

    fn light_level(&self, point: Vec3) -> f32 {
        (**self).light_level(point)
    }
}

//! `BlockWorld` — axis-aligned boxes and point lights.
//!
//! # Data layout
//!
//! Every occluder is an axis-aligned box stored in an R-tree (via `rstar`).
//! A raycast first collects the boxes whose envelope intersects the ray
//! segment's bounding box, then runs the slab test on each candidate and
//! keeps the nearest entry point.
//!
//! Light is a constant ambient level plus any number of spherical zones
//! whose contribution falls off linearly to zero at their radius.  The level
//! at a point is the brightest contribution, never a sum.

use rstar::{AABB, RTree, RTreeObject};

use pursuit_core::Vec3;

use crate::{RayHit, SurfaceTag, WorldError, WorldQuery, WorldResult};

/// Ray components smaller than this are treated as parallel to a slab.
const PARALLEL_EPS: f32 = 1e-9;

// ── R-tree wall entry ─────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct WallEntry {
    min: Vec3,
    max: Vec3,
    tag: SurfaceTag,
}

impl RTreeObject for WallEntry {
    type Envelope = AABB<[f32; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min.to_array(), self.max.to_array())
    }
}

impl WallEntry {
    /// Slab test.  Returns the entry distance and outward normal of the face
    /// the ray enters through, or `None` if the ray misses, starts inside, or
    /// enters beyond `max_distance`.
    fn intersect(&self, origin: Vec3, dir: Vec3, max_distance: f32) -> Option<(f32, Vec3)> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut normal = Vec3::ZERO;

        for axis in 0..3 {
            let o = origin[axis];
            let d = dir[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() < PARALLEL_EPS {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let t_lo = (lo - o) * inv;
            let t_hi = (hi - o) * inv;
            // Moving in +axis enters through the min face, whose normal is -axis.
            let (near, far, sign) = if t_lo <= t_hi { (t_lo, t_hi, -1.0) } else { (t_hi, t_lo, 1.0) };

            if near > t_enter {
                t_enter = near;
                normal = Vec3::ZERO;
                normal[axis] = sign;
            }
            t_exit = t_exit.min(far);
        }

        if t_enter > t_exit || t_enter < 0.0 || t_enter > max_distance {
            return None;
        }
        Some((t_enter, normal))
    }
}

// ── LightZone ─────────────────────────────────────────────────────────────────

/// A spherical light: `level` at `center`, fading linearly to 0 at `radius`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LightZone {
    pub center: Vec3,
    pub radius: f32,
    pub level:  f32,
}

impl LightZone {
    /// This zone's contribution at `point` (0 outside the radius).
    pub fn level_at(&self, point: Vec3) -> f32 {
        let d = self.center.distance(point);
        if d >= self.radius {
            0.0
        } else {
            self.level * (1.0 - d / self.radius)
        }
    }
}

// ── BlockWorld ────────────────────────────────────────────────────────────────

/// A static world of box occluders and light zones.
///
/// Do not construct directly; use [`BlockWorldBuilder`].
pub struct BlockWorld {
    walls:   RTree<WallEntry>,
    lights:  Vec<LightZone>,
    ambient: f32,
}

impl BlockWorld {
    /// No walls, no lights, ambient level 1 (broad daylight).
    pub fn open() -> Self {
        Self {
            walls:   RTree::new(),
            lights:  Vec::new(),
            ambient: 1.0,
        }
    }

    pub fn wall_count(&self) -> usize {
        self.walls.size()
    }

    pub fn ambient(&self) -> f32 {
        self.ambient
    }

    pub fn light_zones(&self) -> &[LightZone] {
        &self.lights
    }
}

impl WorldQuery for BlockWorld {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        if !(max_distance > 0.0) || direction.length_squared() < PARALLEL_EPS {
            return None;
        }
        let dir = direction.normalize();
        let end = origin + dir * max_distance;
        let query = AABB::from_corners(origin.min(end).to_array(), origin.max(end).to_array());

        self.walls
            .locate_in_envelope_intersecting(&query)
            .filter_map(|w| w.intersect(origin, dir, max_distance).map(|(t, n)| (t, n, w.tag)))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(distance, normal, tag)| RayHit {
                point: origin + dir * distance,
                distance,
                normal,
                tag,
            })
    }

    fn light_level(&self, point: Vec3) -> f32 {
        self.lights
            .iter()
            .map(|z| z.level_at(point))
            .fold(self.ambient, f32::max)
            .clamp(0.0, 1.0)
    }
}

// ── BlockWorldBuilder ─────────────────────────────────────────────────────────

/// Incrementally describe a [`BlockWorld`].
///
/// # Example
///
/// ```
/// use pursuit_core::Vec3;
/// use pursuit_world::{BlockWorldBuilder, WorldQuery};
///
/// let world = BlockWorldBuilder::new()
///     .ambient(0.1)
///     .add_wall(Vec3::new(4.0, 0.0, -5.0), Vec3::new(4.2, 3.0, 5.0))
///     .add_light(Vec3::new(0.0, 3.0, 0.0), 6.0, 1.0)
///     .build()
///     .unwrap();
///
/// let hit = world.raycast(Vec3::new(0.0, 1.0, 0.0), Vec3::X, 10.0).unwrap();
/// assert!((hit.distance - 4.0).abs() < 1e-4);
/// ```
pub struct BlockWorldBuilder {
    walls:   Vec<WallEntry>,
    lights:  Vec<LightZone>,
    ambient: f32,
}

impl BlockWorldBuilder {
    pub fn new() -> Self {
        Self {
            walls:   Vec::new(),
            lights:  Vec::new(),
            ambient: 1.0,
        }
    }

    /// Add an opaque wall spanning `min..=max`.
    pub fn add_wall(self, min: Vec3, max: Vec3) -> Self {
        self.add_surface(min, max, SurfaceTag::Wall)
    }

    /// Add a box with an explicit surface tag.
    pub fn add_surface(mut self, min: Vec3, max: Vec3, tag: SurfaceTag) -> Self {
        self.walls.push(WallEntry { min, max, tag });
        self
    }

    /// Light level everywhere no zone is brighter.  Clamped to `[0, 1]`.
    pub fn ambient(mut self, level: f32) -> Self {
        self.ambient = level.clamp(0.0, 1.0);
        self
    }

    pub fn add_light(mut self, center: Vec3, radius: f32, level: f32) -> Self {
        self.lights.push(LightZone { center, radius, level: level.clamp(0.0, 1.0) });
        self
    }

    pub fn wall_count(&self) -> usize { self.walls.len() }

    /// Validate and bulk-load the R-tree.
    pub fn build(self) -> WorldResult<BlockWorld> {
        for (index, w) in self.walls.iter().enumerate() {
            for (axis, name) in ['x', 'y', 'z'].into_iter().enumerate() {
                if w.min[axis] > w.max[axis] {
                    return Err(WorldError::DegenerateWall { index, axis: name });
                }
            }
        }
        for (index, z) in self.lights.iter().enumerate() {
            if !(z.radius > 0.0) {
                return Err(WorldError::BadLightZone { index, radius: z.radius });
            }
        }

        Ok(BlockWorld {
            walls:   RTree::bulk_load(self.walls),
            lights:  self.lights,
            ambient: self.ambient,
        })
    }
}

impl Default for BlockWorldBuilder {
    fn default() -> Self {
        Self::new()
    }
}

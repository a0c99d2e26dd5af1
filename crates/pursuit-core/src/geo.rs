//! Vector type and small geometric helpers.
//!
//! Positions and directions are `glam::Vec3` (`f32`, `Copy`).  The world is
//! Y-up: "horizontal" means the XZ plane.

pub use glam::Vec3;

/// Squared length below which a vector is treated as zero.
const DEGENERATE_LEN_SQ: f32 = 1e-8;

/// Project `v` onto the horizontal (XZ) plane.
#[inline]
pub fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Unit horizontal vector perpendicular to `forward`.
///
/// Returns `Vec3::X` when `forward` has no horizontal component (straight up
/// or zero), so callers always get a usable axis.
pub fn lateral_axis(forward: Vec3) -> Vec3 {
    let flat = horizontal(forward);
    if flat.length_squared() < DEGENERATE_LEN_SQ {
        return Vec3::X;
    }
    Vec3::Y.cross(flat).normalize()
}

/// Unit direction of the horizontal component of `v`, or `None` if `v` has
/// (almost) no horizontal extent.
pub fn horizontal_direction(v: Vec3) -> Option<Vec3> {
    let flat = horizontal(v);
    (flat.length_squared() >= DEGENERATE_LEN_SQ).then(|| flat.normalize())
}

/// Angle between two directions in degrees, in `[0, 180]`.
///
/// A zero-length input yields `0.0`: an observer standing on its target
/// is looking straight at it.
pub fn angle_between_deg(a: Vec3, b: Vec3) -> f32 {
    if a.length_squared() < DEGENERATE_LEN_SQ || b.length_squared() < DEGENERATE_LEN_SQ {
        return 0.0;
    }
    let cos = a.normalize().dot(b.normalize()).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

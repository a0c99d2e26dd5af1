//! World-subsystem error type.

use thiserror::Error;

/// Errors produced by `pursuit-world`.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("wall {index} has min corner above max corner on the {axis} axis")]
    DegenerateWall { index: usize, axis: char },

    #[error("light zone {index} has non-positive radius {radius}")]
    BadLightZone { index: usize, radius: f32 },
}

pub type WorldResult<T> = Result<T, WorldError>;

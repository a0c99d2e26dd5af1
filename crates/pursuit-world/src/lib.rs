//! `pursuit-world` — the world as seen by the perception core.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                      |
//! |------------|---------------------------------------------------------------|
//! | [`query`]  | `WorldQuery` trait, `RayHit`, `SurfaceTag`                    |
//! | [`player`] | `PlayerState` — the pursued target's per-tick pose            |
//! | [`block`]  | `BlockWorld` (AABB walls in an R-tree + light zones), builder |
//! | [`error`]  | `WorldError`, `WorldResult<T>`                                |
//!
//! Ray casting and lighting belong to the host engine.  The perception core
//! only calls them through [`WorldQuery`]; [`BlockWorld`] is a small
//! self-contained implementation for tests, demos, and headless runs.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public value types.     |

pub mod block;
pub mod error;
pub mod player;
pub mod query;

#[cfg(test)]
mod tests;

pub use block::{BlockWorld, BlockWorldBuilder, LightZone};
pub use error::{WorldError, WorldResult};
pub use player::PlayerState;
pub use query::{RayHit, SurfaceTag, WorldQuery};

//! `pursuit-core` — foundational types for the `pursuit` perception framework.
//!
//! This crate is a dependency of every other `pursuit-*` crate.  It
//! intentionally has no `pursuit-*` dependencies and minimal external ones
//! (`glam`, `rand` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                             |
//! | [`alert`]       | `AlertState` (IDLE < CURIOUS < SUSPECT < HOSTILE)     |
//! | [`geo`]         | `Vec3` (glam), horizontal / lateral helpers           |
//! | [`time`]        | `Tick`, `SimClock`, `TickContext`                     |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`config`]      | `SimConfig` and the per-subsystem tuning structs      |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types, so a   |
//! |         | `SimConfig` can be loaded from JSON.                       |

pub mod alert;
pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use alert::AlertState;
pub use config::{
    HearingConfig, LightConfig, RadioConfig, SensorConfig, SimConfig, VisionConfig, WantedConfig,
};
pub use error::{CoreError, CoreResult};
pub use geo::Vec3;
pub use ids::AgentId;
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, Tick, TickContext};

//! `pursuit-agent` — perceiving agents and their storage.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                         |
//! |-------------|------------------------------------------------------------------|
//! | [`sensor`]  | `SensorComponent` (awareness, alert state, LKP), `Perception`    |
//! | [`store`]   | `Agent<B>`, `AgentStore<B>` (id-keyed, contiguous)               |
//! | [`builder`] | `AgentStoreBuilder` (fluent construction)                        |
//! | [`error`]   | `AgentError`, `AgentResult<T>`                                   |
//!
//! `AlertState` is defined in `pursuit-core` (it is part of the intent
//! vocabulary) and re-exported here.
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for the `AgentId → slot` map.    |
//! | `serde`   | Derives `Serialize`/`Deserialize` on public value types.   |

pub mod builder;
pub mod error;
pub mod sensor;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::AgentStoreBuilder;
pub use error::{AgentError, AgentResult};
pub use pursuit_core::AlertState;
pub use sensor::{LastKnownPosition, MAX_AWARENESS, Perception, SensorComponent};
pub use store::{Agent, AgentStore};

//! `pursuit-senses` — what an agent can perceive.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                             |
//! |------------|----------------------------------------------------------------------|
//! | [`noise`]  | `NoiseKind`, `NoiseEvent`, `NoiseBus` / `NoiseEmitter` / `NoiseSubscription` |
//! | [`vision`] | `VisionCone`, `VisionResult`, `DetectionZone`                        |
//! | [`hearing`]| `HearingSystem`                                                      |
//! | [`light`]  | `LightLevelSystem`                                                   |
//! | [`error`]  | `SensesError`, `SensesResult<T>`                                     |
//!
//! The three scorers hold only their configuration.  Everything they need
//! per call (poses, the world, the agent's RNG) is passed in, so one scorer
//! instance is shared by every agent and may be called from several threads.

pub mod error;
pub mod hearing;
pub mod light;
pub mod noise;
pub mod vision;


pub use error::{SensesError, SensesResult};
pub use hearing::HearingSystem;
pub use light::LightLevelSystem;
pub use noise::{NoiseBus, NoiseEmitter, NoiseEvent, NoiseKind, NoiseSubscription};
pub use vision::{DetectionZone, VisionCone, VisionResult};

//! `pursuit-sim` — perception tick orchestrator and wanted-level escalation.
//!
//! # Tick
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Perception — drain the noise bus; per agent: vision tick then every
//!                  drained noise (parallel with the `parallel` feature).
//!   ② Radio      — HOSTILE agents with a last known position share it with
//!                  everyone in radio range (collected, then applied).
//!   ③ Wanted     — refresh line of sight; run the phase's tactics and
//!                  promotion / demotion rules.
//!   ④ Decay      — one star lost per uninterrupted no-sight window.
//! ```
//!
//! # Modules
//!
//! | Module      | Contents                                               |
//! |-------------|--------------------------------------------------------|
//! | `manager`   | `SensorManager`, `RadioIndex`, `ManagerReport`         |
//! | `wanted`    | `WantedPhase`, `WantedLevelSystem`                     |
//! | `callbacks` | `WantedCallbacks` host hooks, `NoopCallbacks`          |
//! | `observer`  | `SimObserver`, `TickSummary`, `SensorSnapshot`         |
//! | `sim`       | `Sim` and its tick loop                                |
//! | `builder`   | `SimBuilder`                                           |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the perception pass on Rayon's thread pool.       |
//! | `fx-hash`  | FxHash for the agent store's id → slot map.            |
//! | `serde`    | Serde derives on config and state types.               |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use pursuit_agent::AgentStoreBuilder;
//! use pursuit_behavior::IntentLog;
//! use pursuit_core::{AgentId, SimConfig, Vec3};
//! use pursuit_sim::{NoopCallbacks, NoopObserver, SimBuilder};
//! use pursuit_world::{BlockWorld, PlayerState};
//!
//! let config = SimConfig::default();
//! let agents = AgentStoreBuilder::new(config.seed, config.sensor)
//!     .agent(AgentId(0), Vec3::ZERO, Vec3::Z, IntentLog::new())
//!     .build()?;
//! let mut sim = SimBuilder::new(config, BlockWorld::open(), NoopCallbacks)
//!     .agents(agents)
//!     .build()?;
//! sim.run(|_| PlayerState::at(Vec3::new(0.0, 0.0, 10.0)), &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod callbacks;
pub mod error;
pub mod manager;
pub mod observer;
pub mod sim;
pub mod wanted;


pub use builder::SimBuilder;
pub use callbacks::{NoopCallbacks, WantedCallbacks};
pub use error::{SimError, SimResult};
pub use manager::{ManagerReport, RadioIndex, SensorManager};
pub use observer::{NoopObserver, SensorSnapshot, SimObserver, TickSummary};
pub use sim::Sim;
pub use wanted::{MAX_STARS, WantedLevelSystem, WantedPhase};

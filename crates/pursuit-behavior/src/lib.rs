//! `pursuit-behavior` — intent vocabulary and the behavior capability.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                         |
//! |------------|------------------------------------------------------------------|
//! | [`intent`] | `Intent` enum (`MoveTo`, `Investigate`, `Chase`, `Flank`, …)     |
//! | [`model`]  | `Behavior` trait                                                 |
//! | [`noop`]   | `NoopBehavior` (discards), `IntentLog` (records)                 |
//!
//! # Design notes
//!
//! The perception core never moves an agent.  It decides *what* an agent
//! should do and hands an [`Intent`] to that agent's [`Behavior`]; the host
//! turns it into navigation, animation or combat.  Dispatch happens from two
//! places:
//!
//! 1. **Sensor tick** (per agent, possibly parallel): alert animations and
//!    the CURIOUS / SUSPECT / HOSTILE reactions.
//! 2. **Wanted-level tick** (sequential): coordinated phase tactics such as
//!    flanking, cover and smoke.

pub mod intent;
pub mod model;
pub mod noop;


pub use intent::Intent;
pub use model::Behavior;
pub use noop::{IntentLog, NoopBehavior};

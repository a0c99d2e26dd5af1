//! Fluent builder for an initial `AgentStore`.
//!
//! # Usage
//!
//! ```rust
//! use pursuit_agent::AgentStoreBuilder;
//! use pursuit_behavior::IntentLog;
//! use pursuit_core::{AgentId, SensorConfig, Vec3};
//!
//! let store = AgentStoreBuilder::new(/*seed=*/ 42, SensorConfig::default())
//!     .agent(AgentId(10), Vec3::new(0.0, 1.7, 0.0), Vec3::Z, IntentLog::new())
//!     .agent(AgentId(11), Vec3::new(8.0, 1.7, 0.0), -Vec3::Z, IntentLog::new())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(store.len(), 2);
//! assert!(store.get(AgentId(11)).is_some());
//! ```

use pursuit_behavior::Behavior;
use pursuit_core::{AgentId, SensorConfig, Vec3};

use crate::{AgentResult, AgentStore};

struct Pending<B> {
    id:       AgentId,
    position: Vec3,
    look_dir: Vec3,
    behavior: B,
}

/// Collects the starting population, then validates it in one step.
pub struct AgentStoreBuilder<B> {
    seed:    u64,
    sensor:  SensorConfig,
    pending: Vec<Pending<B>>,
}

impl<B: Behavior> AgentStoreBuilder<B> {
    pub fn new(seed: u64, sensor: SensorConfig) -> Self {
        Self { seed, sensor, pending: Vec::new() }
    }

    pub fn agent(mut self, id: AgentId, position: Vec3, look_dir: Vec3, behavior: B) -> Self {
        self.pending.push(Pending { id, position, look_dir, behavior });
        self
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Fails with [`AgentError::DuplicateId`][crate::AgentError::DuplicateId]
    /// if two agents share an id.
    pub fn build(self) -> AgentResult<AgentStore<B>> {
        let mut store = AgentStore::new(self.seed, self.sensor);
        for p in self.pending {
            store.spawn(p.id, p.position, p.look_dir, p.behavior)?;
        }
        Ok(store)
    }
}

//! Agent storage: `Agent<B>` and the id-keyed `AgentStore<B>`.
//!
//! # Layout
//!
//! Agents live in one contiguous `Vec` in insertion order, so the sensor pass
//! can hand the whole slice to Rayon (`par_iter_mut`) without any unsafe
//! splitting.  Host-assigned ids are not dense (reinforcements arrive with
//! whatever handle the host mints), so a hash map resolves `AgentId → slot`.
//!
//! Each agent owns its sensor, its behavior and its RNG, so mutating one
//! agent never needs a borrow of another.

#[cfg(not(feature = "fx-hash"))]
use std::collections::HashMap;

#[cfg(feature = "fx-hash")]
use rustc_hash::FxHashMap as HashMap;

use pursuit_behavior::{Behavior, Intent};
use pursuit_core::{AgentId, AgentRng, SensorConfig, Vec3};

use crate::{AgentError, AgentResult, SensorComponent};

// ── Agent ─────────────────────────────────────────────────────────────────────

/// One perceiving agent.
pub struct Agent<B> {
    pub id:       AgentId,
    /// Eye position; vision probes start here.
    pub position: Vec3,
    pub look_dir: Vec3,
    pub sensor:   SensorComponent,
    pub behavior: B,
    pub rng:      AgentRng,
}

impl<B: Behavior> Agent<B> {
    pub fn new(
        id:        AgentId,
        position:  Vec3,
        look_dir:  Vec3,
        sensor:    SensorConfig,
        behavior:  B,
        seed:      u64,
    ) -> Self {
        Self {
            id,
            position,
            look_dir,
            sensor: SensorComponent::new(sensor),
            behavior,
            rng: AgentRng::new(seed, id),
        }
    }

    /// Dispatch an intent to this agent's behavior.
    #[inline]
    pub fn perform(&mut self, intent: Intent) {
        self.behavior.perform(self.id, intent);
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// All agents of a simulation, addressable by [`AgentId`].
///
/// Iteration order is insertion order and is stable across ticks except
/// after [`remove`](Self::remove), which moves the last agent into the
/// freed slot.
pub struct AgentStore<B> {
    agents: Vec<Agent<B>>,
    slots:  HashMap<AgentId, usize>,
    seed:   u64,
    sensor: SensorConfig,
}

impl<B: Behavior> AgentStore<B> {
    /// An empty store whose spawned agents get RNGs derived from `seed` and
    /// sensors tuned by `sensor`.
    pub fn new(seed: u64, sensor: SensorConfig) -> Self {
        Self {
            agents: Vec::new(),
            slots:  HashMap::default(),
            seed,
            sensor,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Create and insert an agent with the store's seed and sensor tuning.
    pub fn spawn(
        &mut self,
        id:       AgentId,
        position: Vec3,
        look_dir: Vec3,
        behavior: B,
    ) -> AgentResult<&mut Agent<B>> {
        let agent = Agent::new(id, position, look_dir, self.sensor, behavior, self.seed);
        self.insert(agent)
    }

    /// Insert a fully built agent.
    pub fn insert(&mut self, agent: Agent<B>) -> AgentResult<&mut Agent<B>> {
        if self.slots.contains_key(&agent.id) {
            return Err(AgentError::DuplicateId(agent.id));
        }
        let slot = self.agents.len();
        self.slots.insert(agent.id, slot);
        self.agents.push(agent);
        Ok(&mut self.agents[slot])
    }

    /// Remove an agent, returning it.
    pub fn remove(&mut self, id: AgentId) -> AgentResult<Agent<B>> {
        let slot = self.slots.remove(&id).ok_or(AgentError::NotFound(id))?;
        let agent = self.agents.swap_remove(slot);
        if let Some(moved) = self.agents.get(slot) {
            self.slots.insert(moved.id, slot);
        }
        Ok(agent)
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// Slot of `id` in [`as_slice`](Self::as_slice).
    #[inline]
    pub fn slot_of(&self, id: AgentId) -> Option<usize> {
        self.slots.get(&id).copied()
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent<B>> {
        self.slot_of(id).map(|s| &self.agents[s])
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent<B>> {
        self.slot_of(id).map(|s| &mut self.agents[s])
    }

    pub fn try_get(&self, id: AgentId) -> AgentResult<&Agent<B>> {
        self.get(id).ok_or(AgentError::NotFound(id))
    }

    pub fn try_get_mut(&mut self, id: AgentId) -> AgentResult<&mut Agent<B>> {
        self.get_mut(id).ok_or(AgentError::NotFound(id))
    }

    // ── Bulk access ───────────────────────────────────────────────────────

    pub fn ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agents.iter().map(|a| a.id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Agent<B>> {
        self.agents.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Agent<B>> {
        self.agents.iter_mut()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Agent<B>] {
        &self.agents
    }

    /// Mutable slice for whole-population passes.  Ids cannot be changed
    /// through it without desynchronising the slot map, so `id` must be
    /// treated as read-only.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Agent<B>] {
        &mut self.agents
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn sensor_config(&self) -> &SensorConfig {
        &self.sensor
    }
}

impl<'a, B> IntoIterator for &'a AgentStore<B> {
    type Item = &'a Agent<B>;
    type IntoIter = std::slice::Iter<'a, Agent<B>>;

    fn into_iter(self) -> Self::IntoIter {
        self.agents.iter()
    }
}

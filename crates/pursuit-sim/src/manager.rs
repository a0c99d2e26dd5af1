//! `SensorManager` — one perception tick across every agent.
//!
//! # Two passes
//!
//! ```text
//! drain noise subscription (once)
//! ① Sense      — per agent: vision tick, then every drained noise event,
//!                then an alert-state refresh (parallel with the `parallel`
//!                feature).
//! ② Broadcast  — every HOSTILE agent with a last known position radios it
//!                to every other agent within range.  All broadcasts are
//!                collected from post-① state before any is applied; each
//!                recipient's alert state is refreshed on delivery.
//! ```
//!
//! An agent's alert state therefore matches its awareness whenever the
//! manager returns.
//!
//! Pass ② never starts before pass ① has finished for every agent: with
//! Rayon the `for_each` join is the barrier.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use tracing::{debug, error};

use pursuit_agent::{Agent, AgentStore, AlertState, LastKnownPosition, Perception};
use pursuit_behavior::Behavior;
use pursuit_core::{AgentId, RadioConfig, SimConfig, TickContext, Vec3};
use pursuit_senses::{HearingSystem, LightLevelSystem, NoiseEvent, NoiseSubscription, VisionCone};
use pursuit_world::{PlayerState, WorldQuery};

// ── RadioIndex ────────────────────────────────────────────────────────────────

/// Entry stored in the radio R-tree: an agent's position with its id.
#[derive(Clone)]
struct RadioEntry {
    point: [f32; 3],
    id:    AgentId,
}

impl RTreeObject for RadioEntry {
    type Envelope = AABB<[f32; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for RadioEntry {
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        Vec3::from_array(self.point).distance_squared(Vec3::from_array(*point))
    }
}

/// Per-tick spatial index of agent positions, answering "who is within
/// radio range of this point?".
pub struct RadioIndex {
    tree: RTree<RadioEntry>,
}

impl RadioIndex {
    /// Bulk-load the current positions of every agent.
    pub fn build<B>(agents: &AgentStore<B>) -> Self
    where
        B: Behavior,
    {
        let entries = agents
            .iter()
            .map(|a| RadioEntry { point: a.position.to_array(), id: a.id })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    /// Ids of every agent within `range` of `center`, in ascending id order.
    pub fn within(&self, center: Vec3, range: f32) -> Vec<AgentId> {
        let mut ids: Vec<AgentId> = self
            .tree
            .locate_within_distance(center.to_array(), range * range)
            .map(|e| e.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

// ── ManagerReport ─────────────────────────────────────────────────────────────

/// What happened during one manager tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ManagerReport {
    /// Noise events drained this tick.
    pub noise_events: usize,
    /// Agents that broadcast their LKP.
    pub broadcasts:   usize,
    /// Broadcast deliveries applied (one per recipient per broadcast).
    pub deliveries:   usize,
    /// Agents that saw the player this tick.
    pub sightings:    usize,
}

/// One radio message collected after pass ①.
struct Broadcast {
    from:     AgentId,
    origin:   Vec3,
    lkp:      LastKnownPosition,
}

// ── SensorManager ─────────────────────────────────────────────────────────────

/// Orchestrates vision, hearing and radio for all agents.
pub struct SensorManager {
    vision:            VisionCone,
    hearing:           HearingSystem,
    light:             LightLevelSystem,
    radio:             RadioConfig,
    suspect_threshold: f32,
}

impl SensorManager {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            vision:            VisionCone::new(config.vision),
            hearing:           HearingSystem::new(config.hearing),
            light:             LightLevelSystem::new(config.light),
            radio:             config.radio,
            suspect_threshold: config.sensor.suspect_threshold,
        }
    }

    pub fn vision(&self) -> &VisionCone {
        &self.vision
    }

    pub fn hearing(&self) -> &HearingSystem {
        &self.hearing
    }

    /// Drain `noise` and run both passes.
    pub fn tick<B, W>(
        &self,
        agents: &mut AgentStore<B>,
        player: &PlayerState,
        world:  &W,
        noise:  &NoiseSubscription,
        ctx:    TickContext,
    ) -> ManagerReport
    where
        B: Behavior,
        W: WorldQuery + ?Sized,
    {
        let events = noise.drain();
        self.tick_with_events(agents, player, world, &events, ctx)
    }

    /// Run both passes against an already-drained batch of events.
    pub fn tick_with_events<B, W>(
        &self,
        agents: &mut AgentStore<B>,
        player: &PlayerState,
        world:  &W,
        events: &[NoiseEvent],
        ctx:    TickContext,
    ) -> ManagerReport
    where
        B: Behavior,
        W: WorldQuery + ?Sized,
    {
        let perception = Perception {
            player,
            world,
            vision: &self.vision,
            light_multiplier: self.light.detection_multiplier(player, world),
            ctx,
        };

        // ── Pass ①: sense ─────────────────────────────────────────────────
        self.sense_all(agents.as_mut_slice(), &perception, events);

        let sightings = agents.iter().filter(|a| a.sensor.has_line_of_sight()).count();

        // ── Pass ②: broadcast ─────────────────────────────────────────────
        let broadcasts = collect_broadcasts(agents);
        let deliveries = if broadcasts.is_empty() {
            0
        } else {
            self.apply_broadcasts(agents, &broadcasts, player.position)
        };

        ManagerReport {
            noise_events: events.len(),
            broadcasts:   broadcasts.len(),
            deliveries,
            sightings,
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn sense_all<B, W>(&self, agents: &mut [Agent<B>], p: &Perception<'_, W>, events: &[NoiseEvent])
    where
        B: Behavior,
        W: WorldQuery + ?Sized,
    {
        for agent in agents {
            sense(agent, p, &self.hearing, events);
        }
    }

    #[cfg(feature = "parallel")]
    fn sense_all<B, W>(&self, agents: &mut [Agent<B>], p: &Perception<'_, W>, events: &[NoiseEvent])
    where
        B: Behavior,
        W: WorldQuery + ?Sized,
    {
        use rayon::prelude::*;

        // Each agent owns its RNG, so the outcome does not depend on which
        // worker runs which agent.
        agents
            .par_iter_mut()
            .for_each(|agent| sense(agent, p, &self.hearing, events));
    }

    /// Deliver every broadcast.  Returns the number of deliveries.
    fn apply_broadcasts<B: Behavior>(
        &self,
        agents:     &mut AgentStore<B>,
        broadcasts: &[Broadcast],
        target:     Vec3,
    ) -> usize {
        let index = RadioIndex::build(agents);
        let mut deliveries = 0;

        for b in broadcasts {
            let recipients = index.within(b.origin, self.radio.range);
            debug!(from = %b.from, recipients = recipients.len().saturating_sub(1), "LKP broadcast");

            for id in recipients.into_iter().filter(|&id| id != b.from) {
                let Some(agent) = agents.get_mut(id) else {
                    error!(agent = %id, "radio index returned an agent missing from the store");
                    continue;
                };
                agent.sensor.floor_awareness(self.suspect_threshold);
                agent.sensor.set_last_known(b.lkp.position, b.lkp.time);
                agent.sensor.refresh_alert_state(agent.id, target, &mut agent.behavior);
                deliveries += 1;
            }
        }
        deliveries
    }
}

/// Pass ① for one agent: vision tick, then every event of the batch, then
/// an alert-state refresh for whatever the noises added.
fn sense<B, W>(agent: &mut Agent<B>, p: &Perception<'_, W>, hearing: &HearingSystem, events: &[NoiseEvent])
where
    B: Behavior,
    W: WorldQuery + ?Sized,
{
    agent.sensor.tick(agent.id, agent.position, agent.look_dir, p, &mut agent.behavior);

    for event in events {
        let intensity = hearing.check(agent.position, event, p.world, &mut agent.rng);
        agent.sensor.on_noise(intensity, event);
    }
    agent.sensor.refresh_alert_state(agent.id, p.player.position, &mut agent.behavior);
}

/// Snapshot every HOSTILE agent's LKP before anything is delivered.
fn collect_broadcasts<B: Behavior>(agents: &AgentStore<B>) -> Vec<Broadcast> {
    agents
        .iter()
        .filter(|a| a.sensor.alert_state() == AlertState::Hostile)
        .filter_map(|a| {
            a.sensor.last_known().map(|lkp| Broadcast { from: a.id, origin: a.position, lkp })
        })
        .collect()
}

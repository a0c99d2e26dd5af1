//! Fluent builder for constructing a [`Sim`].

use pursuit_agent::AgentStore;
use pursuit_behavior::Behavior;
use pursuit_core::{SimClock, SimConfig, SimRng};
use pursuit_senses::NoiseBus;
use pursuit_world::WorldQuery;

use crate::{SensorManager, Sim, SimResult, WantedCallbacks, WantedLevelSystem};

/// Seed offset of the wanted-level RNG stream.
const WANTED_STREAM: u64 = 1;

/// Fluent builder for [`Sim<B, W, C>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — tick duration, seed, subsystem tuning
/// - `W: WorldQuery` — raycasts and light levels
/// - `C: WantedCallbacks` — reinforcement hooks ([`NoopCallbacks`][crate::NoopCallbacks] if none)
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                                         |
/// |-------------------|-------------------------------------------------|
/// | `.agents(store)`  | Empty store seeded from `config.seed`           |
/// | `.noise_bus(bus)` | A fresh [`NoiseBus`]                            |
///
/// # Example
///
/// ```rust,ignore
/// let agents = AgentStoreBuilder::new(config.seed, config.sensor)
///     .agent(AgentId(0), Vec3::ZERO, Vec3::Z, IntentLog::new())
///     .build()?;
/// let mut sim = SimBuilder::new(config, world, NoopCallbacks)
///     .agents(agents)
///     .build()?;
/// sim.run(|_| PlayerState::at(Vec3::new(0.0, 0.0, 10.0)), &mut NoopObserver)?;
/// ```
pub struct SimBuilder<B, W, C> {
    config:    SimConfig,
    world:     W,
    callbacks: C,
    agents:    Option<AgentStore<B>>,
    bus:       Option<NoiseBus>,
}

impl<B, W, C> SimBuilder<B, W, C>
where
    B: Behavior,
    W: WorldQuery,
    C: WantedCallbacks,
{
    pub fn new(config: SimConfig, world: W, callbacks: C) -> Self {
        Self { config, world, callbacks, agents: None, bus: None }
    }

    /// Supply the initial agents.
    pub fn agents(mut self, agents: AgentStore<B>) -> Self {
        self.agents = Some(agents);
        self
    }

    /// Supply a noise bus whose emitters were handed out before the build.
    /// The bus must not already have a subscriber.
    pub fn noise_bus(mut self, bus: NoiseBus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Validate the config, subscribe to the noise bus, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<B, W, C>> {
        self.config.validate()?;

        let mut bus = self.bus.unwrap_or_default();
        let noise = bus.subscribe()?;

        let agents = self
            .agents
            .unwrap_or_else(|| AgentStore::new(self.config.seed, self.config.sensor));

        let wanted_rng = SimRng::new(self.config.seed).child(WANTED_STREAM);
        let wanted = WantedLevelSystem::new(self.config.wanted, self.callbacks, wanted_rng);

        Ok(Sim {
            clock:   SimClock::new(self.config.tick_duration_secs),
            manager: SensorManager::new(&self.config),
            config:  self.config,
            world:   self.world,
            agents,
            wanted,
            bus,
            noise,
        })
    }
}

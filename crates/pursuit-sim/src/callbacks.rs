//! Host hooks invoked by the wanted-level system.

use pursuit_core::{AgentId, Vec3};

use crate::WantedPhase;

/// Reinforcement and escalation requests sent back to the host.
///
/// All methods have no-op defaults so hosts override only what their game
/// supports.  Spawn methods return the new unit's id, or `None` when the
/// host refuses (spawn cap, no valid spawn point, …); refused spawns are
/// logged and skipped.
///
/// Spawned ids are remembered and handed back through
/// [`release_units`](Self::release_units) when the wanted level drops to
/// NONE.  Inserting spawned agents into the simulation's store is the
/// host's job.
pub trait WantedCallbacks {
    fn on_phase_change(&mut self, _prev: WantedPhase, _next: WantedPhase) {}

    fn spawn_police_unit(&mut self, _near: Vec3) -> Option<AgentId> {
        None
    }

    fn spawn_swat_unit(&mut self, _near: Vec3) -> Option<AgentId> {
        None
    }

    fn spawn_helicopter(&mut self, _over: Vec3) {}

    /// `facing` is the unit direction the roadblock faces (towards the
    /// oncoming target).
    fn create_roadblock(&mut self, _position: Vec3, _facing: Vec3) {}

    fn request_air_support(&mut self, _position: Vec3) {}

    /// The pursuit is over; these reinforcements may despawn.
    fn release_units(&mut self, _units: &[AgentId]) {}
}

/// [`WantedCallbacks`] that ignores every request.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopCallbacks;

impl WantedCallbacks for NoopCallbacks {}

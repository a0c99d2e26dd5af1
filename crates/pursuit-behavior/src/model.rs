//! The `Behavior` trait — the host's hook for executing intents.

use pursuit_core::AgentId;

use crate::Intent;

/// Per-agent executor of [`Intent`]s.
///
/// Each agent owns its behavior value, so implementations may keep mutable
/// per-agent state (a navigation request queue, an animation controller
/// handle, …).
///
/// # Thread safety
///
/// With the `parallel` feature of `pursuit-sim` the sensor pass runs agents
/// on several Rayon workers, each holding `&mut` to distinct agents, so
/// implementations must be `Send`.
///
/// # Example
///
/// ```rust
/// use pursuit_behavior::{Behavior, Intent};
/// use pursuit_core::AgentId;
///
/// struct CountChases(u32);
///
/// impl Behavior for CountChases {
///     fn perform(&mut self, _agent: AgentId, intent: Intent) {
///         if let Intent::Chase { .. } = intent {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait Behavior: Send {
    /// Carry out (or enqueue) `intent` for `agent`.
    fn perform(&mut self, agent: AgentId, intent: Intent);
}

impl<B: Behavior + ?Sized> Behavior for Box<B> {
    fn perform(&mut self, agent: AgentId, intent: Intent) {
        (**self).perform(agent, intent)
    }
}

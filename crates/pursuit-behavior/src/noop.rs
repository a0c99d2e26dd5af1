//! Built-in behaviors: one that ignores everything, one that records.

use pursuit_core::AgentId;

use crate::{Behavior, Intent};

/// A [`Behavior`] that discards every intent.
///
/// Useful for headless runs that only care about the perception trace.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopBehavior;

impl Behavior for NoopBehavior {
    fn perform(&mut self, _agent: AgentId, _intent: Intent) {}
}

/// A [`Behavior`] that appends every intent to a list.
///
/// The demo uses it to drive its scripted guards; tests use it to assert
/// exactly what was dispatched.
#[derive(Clone, Debug, Default)]
pub struct IntentLog {
    intents: Vec<Intent>,
}

impl IntentLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything received so far, oldest first.
    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    /// The most recent intent, if any.
    pub fn last(&self) -> Option<&Intent> {
        self.intents.last()
    }

    /// Remove and return everything received so far.
    pub fn drain(&mut self) -> Vec<Intent> {
        std::mem::take(&mut self.intents)
    }

    pub fn clear(&mut self) {
        self.intents.clear();
    }

    /// Number of recorded intents with the given [`Intent::name`].
    pub fn count(&self, name: &str) -> usize {
        self.intents.iter().filter(|i| i.name() == name).count()
    }
}

impl Behavior for IntentLog {
    fn perform(&mut self, _agent: AgentId, intent: Intent) {
        self.intents.push(intent);
    }
}

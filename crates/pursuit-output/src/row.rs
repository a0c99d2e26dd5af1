//! Plain data row types written by output backends.

use pursuit_core::{AlertState, Vec3};
use pursuit_sim::{SensorSnapshot, TickSummary, WantedPhase};

/// One agent's sensor state at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id:      u32,
    pub tick:          u64,
    pub awareness:     f32,
    pub alert_state:   AlertState,
    pub line_of_sight: bool,
    /// `None` when the agent has no last known position.
    pub last_known:    Option<Vec3>,
}

impl AgentSnapshotRow {
    pub fn from_snapshot(tick: u64, s: &SensorSnapshot) -> Self {
        Self {
            agent_id:      s.agent.0,
            tick,
            awareness:     s.awareness,
            alert_state:   s.alert_state,
            line_of_sight: s.line_of_sight,
            last_known:    s.last_known,
        }
    }
}

/// Wanted-level state after one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:         u64,
    pub time_secs:    f64,
    pub stars:        u8,
    pub phase:        WantedPhase,
    pub noise_events: u64,
    pub broadcasts:   u64,
}

impl From<&TickSummary> for TickSummaryRow {
    fn from(s: &TickSummary) -> Self {
        Self {
            tick:         s.tick.0,
            time_secs:    s.time_secs,
            stars:        s.stars,
            phase:        s.phase,
            noise_events: s.noise_events as u64,
            broadcasts:   s.broadcasts as u64,
        }
    }
}

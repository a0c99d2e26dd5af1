//! Simulation observer trait for progress reporting and data collection.

use pursuit_agent::AlertState;
use pursuit_core::{AgentId, Tick, Vec3};

use crate::WantedPhase;

/// One-line summary of a processed tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickSummary {
    pub tick:              Tick,
    /// Simulated seconds at the start of the tick.
    pub time_secs:         f64,
    pub stars:             u8,
    pub phase:             WantedPhase,
    pub noise_events:      usize,
    pub broadcasts:        usize,
    pub any_line_of_sight: bool,
}

/// Per-agent sensor state captured at snapshot intervals.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorSnapshot {
    pub agent:         AgentId,
    pub awareness:     f32,
    pub alert_state:   AlertState,
    pub line_of_sight: bool,
    pub last_known:    Option<Vec3>,
}

/// Callbacks invoked by [`Sim::step`][crate::Sim::step] and
/// [`Sim::run`][crate::Sim::run] at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — phase printer
///
/// ```rust,ignore
/// struct PhasePrinter { last: WantedPhase }
///
/// impl SimObserver for PhasePrinter {
///     fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
///         if summary.phase != self.last {
///             println!("{tick}: {} → {}", self.last, summary.phase);
///             self.last = summary.phase;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once the tick's perception and wanted-level passes are done.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks) with one entry per agent in store order.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &[SensorSnapshot]) {}

    /// Called once after the final tick of [`Sim::run`][crate::Sim::run].
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

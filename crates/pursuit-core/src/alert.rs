//! Alert level enum shared by the sensor, behavior and wanted-level crates.

use crate::SensorConfig;

/// How alarmed an agent is, derived from its awareness gauge.
///
/// Variants are ordered by severity, so `state >= AlertState::Suspect` reads
/// as "at least suspicious".
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlertState {
    #[default]
    Idle,
    Curious,
    Suspect,
    Hostile,
}

impl AlertState {
    /// Map an awareness value onto the threshold ladder.
    ///
    /// Pure function of `awareness`: no hysteresis.
    pub fn from_awareness(awareness: f32, cfg: &SensorConfig) -> Self {
        if awareness >= cfg.hostile_threshold {
            AlertState::Hostile
        } else if awareness >= cfg.suspect_threshold {
            AlertState::Suspect
        } else if awareness >= cfg.curious_threshold {
            AlertState::Curious
        } else {
            AlertState::Idle
        }
    }

    #[inline]
    pub fn is_idle(self) -> bool {
        matches!(self, AlertState::Idle)
    }

    /// Lower-case label, used for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            AlertState::Idle    => "idle",
            AlertState::Curious => "curious",
            AlertState::Suspect => "suspect",
            AlertState::Hostile => "hostile",
        }
    }
}

impl std::fmt::Display for AlertState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

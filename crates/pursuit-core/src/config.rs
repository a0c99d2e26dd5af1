//! Simulation configuration.
//!
//! One `SimConfig` carries the tuning of every subsystem.  Applications load
//! it from JSON (with the `serde` feature) or start from `SimConfig::default()`
//! and override fields; missing JSON fields fall back to the defaults below.
//! [`SimConfig::validate`] is called by the simulation builder, so a bad
//! config fails before the first tick rather than producing odd perception.

use crate::{CoreError, CoreResult, Tick};

// ── Vision ────────────────────────────────────────────────────────────────────

/// Vision cone geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct VisionConfig {
    /// Targets within this distance (inside the primary FOV) are in the near zone.
    pub near_range: f32,
    /// Nominal far range; targets beyond `far_range + range_margin` are never seen.
    pub far_range: f32,
    pub range_margin: f32,
    /// Full primary field of view, degrees.
    pub fov_degrees: f32,
    /// Full peripheral field of view, degrees.  Must be ≥ `fov_degrees`.
    pub peripheral_fov_degrees: f32,
    /// Light multipliers below this count as total darkness.
    pub darkness_epsilon: f32,
    /// A probe hit closer than `sample_distance - probe_tolerance` occludes.
    pub probe_tolerance: f32,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            near_range:             12.0,
            far_range:              40.0,
            range_margin:           10.0,
            fov_degrees:            100.0,
            peripheral_fov_degrees: 160.0,
            darkness_epsilon:       0.05,
            probe_tolerance:        0.05,
        }
    }
}

// ── Hearing ───────────────────────────────────────────────────────────────────

/// Occlusion sampling for sound propagation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct HearingConfig {
    /// Number of jittered source→listener paths per check.
    pub samples: u32,
    /// Maximum perpendicular offset of a path endpoint, metres.
    pub jitter: f32,
    /// Signal multiplier per wall crossed.
    pub wall_attenuation: f32,
    /// Walls counted per path before the walk stops.
    pub max_walls: u32,
    /// Distance stepped past a wall before casting again, metres.
    pub wall_step: f32,
}

impl Default for HearingConfig {
    fn default() -> Self {
        Self {
            samples:          4,
            jitter:           0.35,
            wall_attenuation: 0.4,
            max_walls:        3,
            wall_step:        0.05,
        }
    }
}

// ── Light ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct LightConfig {
    /// Multiplier at zero exposure (0 = cannot be seen).
    pub min_multiplier: f32,
    /// Multiplier at full exposure (> 1 accelerates detection).
    pub max_multiplier: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self { min_multiplier: 0.0, max_multiplier: 1.5 }
    }
}

// ── Sensor ────────────────────────────────────────────────────────────────────

/// Awareness accrual, decay, and alert thresholds for one agent.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct SensorConfig {
    /// Awareness per second by detection zone at full exposure.
    pub near_rate:       f32,
    pub far_rate:        f32,
    pub peripheral_rate: f32,
    /// Rate multiplier when the target is crouching.
    pub crouch_penalty:  f32,
    /// Awareness lost per second while the target is not visible.
    pub decay_rate:      f32,

    pub curious_threshold: f32,
    pub suspect_threshold: f32,
    pub hostile_threshold: f32,

    /// Radius handed to `Investigate` intents, metres.
    pub investigate_radius:    f32,
    /// Give-up countdown armed when an agent calms down to IDLE, seconds.
    pub investigation_timeout: f32,
    /// Heard noises louder than this overwrite the last known position.
    pub hearing_lkp_intensity: f32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            near_rate:             45.0,
            far_rate:              18.0,
            peripheral_rate:       8.0,
            crouch_penalty:        0.5,
            decay_rate:            12.0,
            curious_threshold:     25.0,
            suspect_threshold:     60.0,
            hostile_threshold:     100.0,
            investigate_radius:    8.0,
            investigation_timeout: 15.0,
            hearing_lkp_intensity: 0.5,
        }
    }
}

// ── Radio ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct RadioConfig {
    /// Hostile agents share their LKP with everyone within this range, metres.
    pub range: f32,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self { range: 50.0 }
    }
}

// ── Wanted level ──────────────────────────────────────────────────────────────

/// Timers, rates, and reinforcement counts of the escalation state machine.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct WantedConfig {
    /// Continuous seconds without line of sight that cost one star.
    pub no_los_decay_secs:          f32,
    /// INVESTIGATION gives up (→ NONE) after this long without line of sight.
    pub investigation_give_up_secs: f32,
    /// CHASE promotes to TACTICAL after this long in phase while sighted.
    pub chase_promote_secs:         f32,
    /// CHASE drops back to INVESTIGATION after this long without line of sight.
    pub chase_give_up_secs:         f32,

    /// Lateral distance of the TACTICAL flank point from the target, metres.
    pub flank_offset:        f32,
    /// Per-second probabilities.
    pub smoke_rate:          f32,
    pub helicopter_rate:     f32,
    pub roadblock_rate:      f32,
    /// Roadblock distance ahead of the target's travel direction, metres.
    pub roadblock_lead:      f32,
    /// Helicopter spawn height above the target, metres.
    pub helicopter_altitude: f32,

    pub investigation_police: u32,
    pub chase_police:         u32,
    pub tactical_police:      u32,
    pub escalation_swat:      u32,
}

impl Default for WantedConfig {
    fn default() -> Self {
        Self {
            no_los_decay_secs:          30.0,
            investigation_give_up_secs: 20.0,
            chase_promote_secs:         20.0,
            chase_give_up_secs:         60.0,
            flank_offset:               12.0,
            smoke_rate:                 0.02,
            helicopter_rate:            0.005,
            roadblock_rate:             0.008,
            roadblock_lead:             80.0,
            helicopter_altitude:        40.0,
            investigation_police:       2,
            chase_police:               4,
            tactical_police:            6,
            escalation_swat:            4,
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct SimConfig {
    /// Seconds per perception tick (5 Hz by default).
    pub tick_duration_secs: f32,

    /// Total ticks simulated by `Sim::run`.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Take a per-agent snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,

    pub vision:  VisionConfig,
    pub hearing: HearingConfig,
    pub light:   LightConfig,
    pub sensor:  SensorConfig,
    pub radio:   RadioConfig,
    pub wanted:  WantedConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_duration_secs:    0.2,
            total_ticks:           3_000,
            seed:                  42,
            output_interval_ticks: 5,
            vision:                VisionConfig::default(),
            hearing:               HearingConfig::default(),
            light:                 LightConfig::default(),
            sensor:                SensorConfig::default(),
            radio:                 RadioConfig::default(),
            wanted:                WantedConfig::default(),
        }
    }
}

impl SimConfig {
    /// The tick at which a full run ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Reject configurations the perception model cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        fn positive(name: &str, v: f32) -> CoreResult<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(CoreError::Config(format!("{name} must be positive, got {v}")))
            }
        }

        positive("tick_duration_secs", self.tick_duration_secs)?;

        let v = &self.vision;
        positive("vision.near_range", v.near_range)?;
        positive("vision.fov_degrees", v.fov_degrees)?;
        if v.near_range > v.far_range {
            return Err(CoreError::Config(format!(
                "vision.near_range ({}) exceeds vision.far_range ({})",
                v.near_range, v.far_range
            )));
        }
        if v.fov_degrees > v.peripheral_fov_degrees || v.peripheral_fov_degrees > 360.0 {
            return Err(CoreError::Config(format!(
                "vision FOVs must satisfy fov ≤ peripheral ≤ 360, got {} / {}",
                v.fov_degrees, v.peripheral_fov_degrees
            )));
        }

        let h = &self.hearing;
        if h.samples == 0 {
            return Err(CoreError::Config("hearing.samples must be at least 1".into()));
        }
        if !(h.wall_attenuation > 0.0 && h.wall_attenuation <= 1.0) {
            return Err(CoreError::Config(format!(
                "hearing.wall_attenuation must be in (0, 1], got {}",
                h.wall_attenuation
            )));
        }
        positive("hearing.wall_step", h.wall_step)?;

        if self.light.min_multiplier < 0.0 || self.light.max_multiplier < self.light.min_multiplier {
            return Err(CoreError::Config(format!(
                "light multipliers must satisfy 0 ≤ min ≤ max, got {} / {}",
                self.light.min_multiplier, self.light.max_multiplier
            )));
        }

        let s = &self.sensor;
        if !(0.0 < s.curious_threshold
            && s.curious_threshold < s.suspect_threshold
            && s.suspect_threshold < s.hostile_threshold
            && s.hostile_threshold <= 100.0)
        {
            return Err(CoreError::Config(format!(
                "alert thresholds must ascend within (0, 100], got {} / {} / {}",
                s.curious_threshold, s.suspect_threshold, s.hostile_threshold
            )));
        }
        positive("sensor.decay_rate", s.decay_rate)?;

        positive("radio.range", self.radio.range)?;

        let w = &self.wanted;
        positive("wanted.no_los_decay_secs", w.no_los_decay_secs)?;
        positive("wanted.chase_give_up_secs", w.chase_give_up_secs)?;
        Ok(())
    }
}

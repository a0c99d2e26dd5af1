//! Agent intents — the actions the perception layer asks an agent to carry out.

use pursuit_core::{AlertState, Vec3};

/// An action dispatched to an agent's [`Behavior`][crate::Behavior].
///
/// Intents are produced by the sensor tick (reacting to what the agent
/// perceived) and by the wanted-level system (coordinated tactics).  The
/// host decides how to execute them: navigation, animation and combat are
/// outside the perception core.
///
/// Several intents may reach the same agent in one tick (e.g. an alert
/// animation followed by `Chase`); later ones take precedence.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Intent {
    /// Walk to a point.
    MoveTo(Vec3),

    /// Turn to face a point without moving.
    LookAt(Vec3),

    /// Search the area around `point`.
    Investigate { point: Vec3, radius: f32 },

    /// Pursue the target, currently at `target`.
    Chase { target: Vec3 },

    /// Break line of sight and hold position behind cover.
    TakeCover,

    /// Move to a flanking position.
    Flank(Vec3),

    /// Radio for backup converging on a point.
    CallForBackup(Vec3),

    /// Throw a smoke grenade at a point.
    ThrowSmoke(Vec3),

    /// Give up the search and return to post.
    Retreat,

    /// Play the transition animation for a new alert level.
    SetAlertAnimation(AlertState),
}

impl Intent {
    /// Short label for logs and traces.
    pub fn name(&self) -> &'static str {
        match self {
            Intent::MoveTo(_)            => "move_to",
            Intent::LookAt(_)            => "look_at",
            Intent::Investigate { .. }   => "investigate",
            Intent::Chase { .. }         => "chase",
            Intent::TakeCover            => "take_cover",
            Intent::Flank(_)             => "flank",
            Intent::CallForBackup(_)     => "call_for_backup",
            Intent::ThrowSmoke(_)        => "throw_smoke",
            Intent::Retreat              => "retreat",
            Intent::SetAlertAnimation(_) => "set_alert_animation",
        }
    }

    /// The world point this intent is about, if any.
    pub fn point(&self) -> Option<Vec3> {
        match *self {
            Intent::MoveTo(p)
            | Intent::LookAt(p)
            | Intent::Flank(p)
            | Intent::CallForBackup(p)
            | Intent::ThrowSmoke(p) => Some(p),
            Intent::Investigate { point, .. } => Some(point),
            Intent::Chase { target } => Some(target),
            Intent::TakeCover | Intent::Retreat | Intent::SetAlertAnimation(_) => None,
        }
    }
}

//! The container yard: walls, lights, guard posts, and the intruder's route.
//!
//! A 60 × 60 m yard centred on the origin, fenced on all sides, with two
//! rows of shipping containers, a glass-fronted site office, and a single
//! floodlight over the gate.  Y is up.

use pursuit_core::Vec3;
use pursuit_world::{BlockWorld, BlockWorldBuilder, PlayerState, SurfaceTag, WorldResult};

/// Eye height of a standing guard.
pub const EYE_HEIGHT: f32 = 1.6;

/// Where the glass breaks.
pub const OFFICE_WINDOW: Vec3 = Vec3::new(14.0, 1.2, -10.0);

/// Where the gun goes off.
pub const GATE: Vec3 = Vec3::new(0.0, 0.0, 28.0);

pub fn build_yard() -> WorldResult<BlockWorld> {
    BlockWorldBuilder::new()
        // Perimeter fence.
        .add_wall(Vec3::new(-30.0, 0.0, -30.5), Vec3::new(30.0, 3.0, -30.0))
        .add_wall(Vec3::new(-30.0, 0.0, 30.0), Vec3::new(-2.0, 3.0, 30.5))
        .add_wall(Vec3::new(2.0, 0.0, 30.0), Vec3::new(30.0, 3.0, 30.5))
        .add_wall(Vec3::new(-30.5, 0.0, -30.0), Vec3::new(-30.0, 3.0, 30.0))
        .add_wall(Vec3::new(30.0, 0.0, -30.0), Vec3::new(30.5, 3.0, 30.0))
        // Container rows.
        .add_surface(Vec3::new(-20.0, 0.0, -4.0), Vec3::new(-8.0, 2.6, -1.6), SurfaceTag::Vehicle)
        .add_surface(Vec3::new(-20.0, 0.0, 6.0), Vec3::new(-8.0, 2.6, 8.4), SurfaceTag::Vehicle)
        .add_surface(Vec3::new(-4.0, 0.0, 6.0), Vec3::new(8.0, 2.6, 8.4), SurfaceTag::Vehicle)
        // Site office: solid back, glass front.
        .add_wall(Vec3::new(10.0, 0.0, -18.0), Vec3::new(20.0, 3.0, -17.6))
        .add_wall(Vec3::new(10.0, 0.0, -18.0), Vec3::new(10.4, 3.0, -10.0))
        .add_wall(Vec3::new(19.6, 0.0, -18.0), Vec3::new(20.0, 3.0, -10.0))
        .add_surface(Vec3::new(10.4, 0.0, -10.2), Vec3::new(19.6, 3.0, -10.0), SurfaceTag::Glass)
        // Hedge along the east fence.
        .add_surface(Vec3::new(24.0, 0.0, -6.0), Vec3::new(26.0, 1.8, 20.0), SurfaceTag::Foliage)
        .ambient(0.15)
        .add_light(Vec3::new(0.0, 8.0, 26.0), 14.0, 1.0)
        .add_light(Vec3::new(15.0, 4.0, -8.0), 6.0, 0.7)
        .build()
}

/// Guard posts: position (feet) and initial look direction.
pub fn guard_posts() -> [(Vec3, Vec3); 4] {
    [
        (Vec3::new(-24.0, 0.0, -24.0), Vec3::new(1.0, 0.0, 1.0).normalize()),
        (Vec3::new(24.0, 0.0, -24.0), Vec3::new(-1.0, 0.0, 1.0).normalize()),
        (Vec3::new(-24.0, 0.0, 22.0), Vec3::new(1.0, 0.0, 0.0)),
        (Vec3::new(6.0, 0.0, 24.0), Vec3::new(0.0, 0.0, -1.0)),
    ]
}

/// One leg of the intruder's route.
struct Leg {
    /// Time the leg starts, seconds.
    start: f32,
    from:  Vec3,
    to:    Vec3,
    /// Seconds to walk the leg.
    secs:  f32,
    crouching: bool,
}

static ROUTE: [Leg; 6] = [
    // Slip in along the hedge, crouched.
    Leg { start: 0.0, from: Vec3::new(28.0, 0.0, 26.0), to: Vec3::new(27.0, 0.0, -4.0), secs: 24.0, crouching: true },
    // Cross to the office.
    Leg { start: 24.0, from: Vec3::new(27.0, 0.0, -4.0), to: Vec3::new(15.0, 0.0, -9.0), secs: 6.0, crouching: true },
    // Loiter at the window (glass breaks at 30 s).
    Leg { start: 30.0, from: Vec3::new(15.0, 0.0, -9.0), to: Vec3::new(14.0, 0.0, -9.0), secs: 12.0, crouching: false },
    // Sprint for the gate through the floodlight.
    Leg { start: 42.0, from: Vec3::new(14.0, 0.0, -9.0), to: Vec3::new(0.0, 0.0, 26.0), secs: 8.0, crouching: false },
    // Double back and hide behind the western containers.
    Leg { start: 50.0, from: Vec3::new(0.0, 0.0, 26.0), to: Vec3::new(-14.0, 0.0, 2.0), secs: 10.0, crouching: false },
    // Lie low.
    Leg { start: 60.0, from: Vec3::new(-14.0, 0.0, 2.0), to: Vec3::new(-14.0, 0.0, 2.0), secs: 1.0e6, crouching: true },
];

/// The intruder's state at `t` seconds.
pub fn intruder_at(t: f32) -> PlayerState {
    let leg = ROUTE
        .iter()
        .rev()
        .find(|leg| t >= leg.start)
        .unwrap_or(&ROUTE[0]);

    let u = ((t - leg.start) / leg.secs).clamp(0.0, 1.0);
    let velocity = if u < 1.0 { (leg.to - leg.from) / leg.secs } else { Vec3::ZERO };
    PlayerState::at(leg.from.lerp(leg.to, u))
        .with_velocity(velocity)
        .crouched(leg.crouching)
}

/// Whether the intruder is moving fast enough to be heard sprinting.
pub fn is_sprinting(player: &PlayerState) -> bool {
    player.velocity.length() > 3.5
}

//! Unit tests for pursuit-world.
//!
//! All tests use hand-placed boxes so distances can be asserted exactly.

#[cfg(test)]
mod helpers {
    use pursuit_core::Vec3;
    use crate::{BlockWorld, BlockWorldBuilder};

    /// Two parallel walls crossing the +X axis:
    ///
    ///   x = 4.0 .. 4.2   (wall 0)
    ///   x = 8.0 .. 8.5   (wall 1)
    ///
    /// Both span y 0..3 and z -5..5.
    pub fn two_walls() -> BlockWorld {
        BlockWorldBuilder::new()
            .add_wall(Vec3::new(4.0, 0.0, -5.0), Vec3::new(4.2, 3.0, 5.0))
            .add_wall(Vec3::new(8.0, 0.0, -5.0), Vec3::new(8.5, 3.0, 5.0))
            .build()
            .unwrap()
    }
}

// ── Raycasts ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod raycast {
    use pursuit_core::Vec3;
    use crate::{BlockWorld, BlockWorldBuilder, SurfaceTag, WorldQuery};

    const EYE: Vec3 = Vec3::new(0.0, 1.5, 0.0);

    #[test]
    fn open_world_never_hits() {
        let world = BlockWorld::open();
        assert!(world.raycast(EYE, Vec3::X, 1_000.0).is_none());
    }

    #[test]
    fn nearest_wall_is_reported() {
        let world = super::helpers::two_walls();
        let hit = world.raycast(EYE, Vec3::X, 20.0).unwrap();
        assert!((hit.distance - 4.0).abs() < 1e-5);
        assert!((hit.point - Vec3::new(4.0, 1.5, 0.0)).length() < 1e-5);
        assert_eq!(hit.normal, -Vec3::X);
        assert_eq!(hit.tag, SurfaceTag::Wall);
    }

    #[test]
    fn hit_beyond_max_distance_is_ignored() {
        let world = super::helpers::two_walls();
        assert!(world.raycast(EYE, Vec3::X, 3.9).is_none());
    }

    #[test]
    fn reverse_direction_enters_through_max_face() {
        let world = super::helpers::two_walls();
        let hit = world.raycast(Vec3::new(12.0, 1.5, 0.0), -Vec3::X, 20.0).unwrap();
        assert!((hit.distance - 3.5).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::X);
    }

    #[test]
    fn origin_inside_wall_skips_it() {
        let world = super::helpers::two_walls();
        // Just past the first wall's entry face.
        let hit = world.raycast(Vec3::new(4.05, 1.5, 0.0), Vec3::X, 20.0).unwrap();
        assert!((hit.distance - 3.95).abs() < 1e-4);
    }

    #[test]
    fn ray_above_wall_is_clear() {
        let world = super::helpers::two_walls();
        assert!(world.raycast(Vec3::new(0.0, 3.5, 0.0), Vec3::X, 20.0).is_none());
    }

    #[test]
    fn direction_need_not_be_normalized() {
        let world = super::helpers::two_walls();
        let hit = world.raycast(EYE, Vec3::new(10.0, 0.0, 0.0), 20.0).unwrap();
        assert!((hit.distance - 4.0).abs() < 1e-5);
    }

    #[test]
    fn zero_direction_or_distance_returns_none() {
        let world = super::helpers::two_walls();
        assert!(world.raycast(EYE, Vec3::ZERO, 20.0).is_none());
        assert!(world.raycast(EYE, Vec3::X, 0.0).is_none());
    }

    #[test]
    fn diagonal_ray_reports_surface_tag() {
        let world = BlockWorldBuilder::new()
            .add_surface(Vec3::new(2.0, 0.0, 2.0), Vec3::new(3.0, 1.0, 3.0), SurfaceTag::Vehicle)
            .build()
            .unwrap();
        let hit = world.raycast(Vec3::new(0.0, 0.5, 0.0), Vec3::new(1.0, 0.0, 1.0), 10.0).unwrap();
        assert_eq!(hit.tag, SurfaceTag::Vehicle);
        assert!((hit.distance - 2.0 * 2f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn reference_impl_forwards() {
        let world = super::helpers::two_walls();
        let by_ref: &dyn WorldQuery = &world;
        assert!((&by_ref).raycast(EYE, Vec3::X, 20.0).is_some());
    }
}

// ── Light ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod light {
    use pursuit_core::Vec3;
    use crate::{BlockWorld, BlockWorldBuilder, WorldQuery};

    #[test]
    fn open_world_is_fully_lit() {
        assert_eq!(BlockWorld::open().light_level(Vec3::ZERO), 1.0);
    }

    #[test]
    fn zone_falls_off_linearly() {
        let world = BlockWorldBuilder::new()
            .ambient(0.0)
            .add_light(Vec3::ZERO, 10.0, 1.0)
            .build()
            .unwrap();
        assert!((world.light_level(Vec3::ZERO) - 1.0).abs() < 1e-6);
        assert!((world.light_level(Vec3::new(5.0, 0.0, 0.0)) - 0.5).abs() < 1e-6);
        assert_eq!(world.light_level(Vec3::new(10.0, 0.0, 0.0)), 0.0);
        assert_eq!(world.light_level(Vec3::new(30.0, 0.0, 0.0)), 0.0);
    }

    #[test]
    fn ambient_is_a_floor_and_zones_do_not_sum() {
        let world = BlockWorldBuilder::new()
            .ambient(0.2)
            .add_light(Vec3::ZERO, 4.0, 0.8)
            .add_light(Vec3::new(1.0, 0.0, 0.0), 4.0, 0.8)
            .build()
            .unwrap();
        let mid = world.light_level(Vec3::new(0.5, 0.0, 0.0));
        assert!(mid <= 0.8 + 1e-6);
        assert_eq!(world.light_level(Vec3::new(50.0, 0.0, 0.0)), 0.2);
    }
}

// ── Builder validation ────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use pursuit_core::Vec3;
    use crate::{BlockWorldBuilder, PlayerState, WorldError};

    #[test]
    fn counts_walls() {
        let b = BlockWorldBuilder::new().add_wall(Vec3::ZERO, Vec3::ONE);
        assert_eq!(b.wall_count(), 1);
        assert_eq!(b.build().unwrap().wall_count(), 1);
    }

    #[test]
    fn inverted_wall_is_rejected() {
        let err = BlockWorldBuilder::new()
            .add_wall(Vec3::ZERO, Vec3::ONE)
            .add_wall(Vec3::new(0.0, 2.0, 0.0), Vec3::new(1.0, 1.0, 1.0))
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, WorldError::DegenerateWall { index: 1, axis: 'y' }));
    }

    #[test]
    fn zero_radius_light_is_rejected() {
        let err = BlockWorldBuilder::new()
            .add_light(Vec3::ZERO, 0.0, 1.0)
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, WorldError::BadLightZone { index: 0, .. }));
    }

    #[test]
    fn player_state_helpers() {
        let p = PlayerState::at(Vec3::new(1.0, 0.0, 2.0))
            .with_velocity(Vec3::X)
            .with_exposure(0.3)
            .crouched(true);
        assert_eq!(p.position, Vec3::new(1.0, 0.0, 2.0));
        assert_eq!(p.velocity, Vec3::X);
        assert_eq!(p.light_exposure, Some(0.3));
        assert!(p.crouching);
        assert_eq!(PlayerState::at(Vec3::ZERO).light_exposure, None);
    }
}

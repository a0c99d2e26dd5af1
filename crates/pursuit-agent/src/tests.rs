//! Unit tests for pursuit-agent.

use pursuit_behavior::{Intent, IntentLog};
use pursuit_core::{AgentId, AlertState, SensorConfig, Tick, TickContext, Vec3};
use pursuit_senses::{NoiseEvent, NoiseKind, VisionCone};
use pursuit_world::{BlockWorld, PlayerState};

use crate::{Perception, SensorComponent};

// ── Helpers ───────────────────────────────────────────────────────────────────

const EYE: Vec3 = Vec3::new(0.0, 1.6, 0.0);
const DT: f32 = 0.2;

/// Player 5 m straight ahead of `EYE` (when looking along +Z).
fn player_ahead() -> PlayerState {
    PlayerState::at(Vec3::new(0.0, 0.0, 5.0))
}

/// Player behind the observer: never in view.
fn player_behind() -> PlayerState {
    PlayerState::at(Vec3::new(0.0, 0.0, -5.0))
}

/// Tick `sensor` `n` times against `player` at full light.
fn run(sensor: &mut SensorComponent, log: &mut IntentLog, player: &PlayerState, n: u64) {
    let world = BlockWorld::open();
    let vision = VisionCone::default();
    for i in 0..n {
        let p = Perception {
            player,
            world: &world,
            vision: &vision,
            light_multiplier: 1.0,
            ctx: TickContext::new(Tick(i), i as f64 * DT as f64, DT),
        };
        sensor.tick(AgentId(1), EYE, Vec3::Z, &p, log);
    }
}

// ── SensorComponent ───────────────────────────────────────────────────────────

#[cfg(test)]
mod sensor_tests {
    use super::*;

    #[test]
    fn near_sight_accrues_and_records_lkp() {
        let mut s = SensorComponent::default();
        let mut log = IntentLog::new();
        run(&mut s, &mut log, &player_ahead(), 1);
        assert!((s.awareness() - 9.0).abs() < 1e-4);
        assert!(s.has_line_of_sight());
        let lkp = s.last_known().unwrap();
        assert_eq!(lkp.position, player_ahead().position);
        assert_eq!(lkp.time, 0.0);
        assert!(log.intents().is_empty(), "still IDLE, nothing to dispatch");
    }

    #[test]
    fn crouching_halves_the_rate() {
        let mut s = SensorComponent::default();
        let mut log = IntentLog::new();
        run(&mut s, &mut log, &player_ahead().crouched(true), 1);
        assert!((s.awareness() - 4.5).abs() < 1e-4);
    }

    #[test]
    fn light_multiplier_scales_the_rate() {
        let mut s = SensorComponent::default();
        let mut log = IntentLog::new();
        let world = BlockWorld::open();
        let vision = VisionCone::default();
        let player = player_ahead();
        let p = Perception {
            player: &player,
            world: &world,
            vision: &vision,
            light_multiplier: 1.5,
            ctx: TickContext::new(Tick(0), 0.0, DT),
        };
        s.tick(AgentId(1), EYE, Vec3::Z, &p, &mut log);
        assert!((s.awareness() - 13.5).abs() < 1e-4);
    }

    #[test]
    fn becoming_curious_animates_then_moves() {
        let mut s = SensorComponent::default();
        s.set_awareness(20.0);
        let mut log = IntentLog::new();
        run(&mut s, &mut log, &player_ahead(), 1);
        assert_eq!(s.alert_state(), AlertState::Curious);
        assert_eq!(log.intents(), &[
            Intent::SetAlertAnimation(AlertState::Curious),
            Intent::MoveTo(player_ahead().position),
        ]);
    }

    #[test]
    fn suspect_investigates_lkp() {
        let mut s = SensorComponent::default();
        s.set_awareness(55.0);
        let mut log = IntentLog::new();
        run(&mut s, &mut log, &player_ahead(), 1);
        assert_eq!(s.alert_state(), AlertState::Suspect);
        assert_eq!(log.last(), Some(&Intent::Investigate {
            point: player_ahead().position,
            radius: 8.0,
        }));
    }

    #[test]
    fn hostile_chases_and_never_decays() {
        let mut s = SensorComponent::default();
        s.set_awareness(100.0);
        assert_eq!(s.alert_state(), AlertState::Hostile);
        let mut log = IntentLog::new();
        run(&mut s, &mut log, &player_behind(), 10);
        assert_eq!(s.awareness(), 100.0);
        assert!(!s.has_line_of_sight());
        assert_eq!(log.count("chase"), 10);
        assert_eq!(log.count("set_alert_animation"), 0);
        assert_eq!(log.last(), Some(&Intent::Chase { target: player_behind().position }));
    }

    #[test]
    fn unseen_awareness_decays() {
        let mut s = SensorComponent::default();
        s.set_awareness(50.0);
        let mut log = IntentLog::new();
        run(&mut s, &mut log, &player_behind(), 1);
        assert!((s.awareness() - 47.6).abs() < 1e-4);
        run(&mut s, &mut log, &player_behind(), 100);
        assert_eq!(s.awareness(), 0.0);
        assert_eq!(s.alert_state(), AlertState::Idle);
    }

    #[test]
    fn calming_down_arms_give_up_countdown() {
        let mut s = SensorComponent::default();
        s.set_awareness(26.0);
        s.set_last_known(Vec3::new(3.0, 0.0, 3.0), 0.0);
        let mut log = IntentLog::new();

        run(&mut s, &mut log, &player_behind(), 1);
        assert_eq!(s.alert_state(), AlertState::Idle);
        let left = s.search_timer().unwrap();
        assert!((left - 14.8).abs() < 1e-4, "the arming tick counts down too, got {left}");
        assert_eq!(log.intents(), &[Intent::SetAlertAnimation(AlertState::Idle)]);

        // 14.8 s since calming down: still searching.
        run(&mut s, &mut log, &player_behind(), 73);
        assert_eq!(log.count("retreat"), 0);
        assert!(s.last_known().is_some());

        // 15 s, give or take float drift: give up exactly once.
        run(&mut s, &mut log, &player_behind(), 3);
        assert_eq!(log.count("retreat"), 1);
        assert!(s.last_known().is_none());
        assert_eq!(s.search_timer(), None);
    }

    #[test]
    fn countdown_is_cancelled_when_alarmed_again() {
        let mut s = SensorComponent::default();
        s.set_awareness(26.0);
        let mut log = IntentLog::new();
        run(&mut s, &mut log, &player_behind(), 1);
        assert!(s.search_timer().is_some());
        s.add_awareness(40.0);
        run(&mut s, &mut log, &player_ahead(), 1);
        assert_eq!(s.alert_state(), AlertState::Suspect);
        assert_eq!(s.search_timer(), None);
    }

    #[test]
    fn idle_from_start_does_not_arm_countdown() {
        let mut s = SensorComponent::default();
        let mut log = IntentLog::new();
        run(&mut s, &mut log, &player_behind(), 5);
        assert_eq!(s.search_timer(), None);
        assert!(log.intents().is_empty());
    }

    #[test]
    fn quiet_noise_adds_awareness_only() {
        let mut s = SensorComponent::default();
        s.set_last_known(Vec3::X, 9.0);
        let ev = NoiseEvent::new(NoiseKind::Sprint, Vec3::Z, 10.0);
        s.on_noise(0.375, &ev);
        assert_eq!(s.awareness(), 7.5);
        assert_eq!(s.last_known().unwrap().position, Vec3::X);
        // Mutation alone leaves the state for `refresh_alert_state`.
        assert_eq!(s.alert_state(), AlertState::Idle);
    }

    #[test]
    fn loud_noise_overwrites_even_a_fresher_lkp() {
        let mut s = SensorComponent::default();
        s.set_last_known(Vec3::X, 20.0);
        let ev = NoiseEvent::new(NoiseKind::Gunshot, Vec3::Z, 10.0);
        s.on_noise(0.6, &ev);
        let lkp = s.last_known().unwrap();
        assert_eq!(lkp.position, Vec3::Z);
        assert_eq!(lkp.time, 10.0);
        assert!((s.awareness() - 36.0).abs() < 1e-4);
    }

    #[test]
    fn silent_noise_is_ignored() {
        let mut s = SensorComponent::default();
        s.on_noise(0.0, &NoiseEvent::new(NoiseKind::Explosion, Vec3::Z, 0.0));
        assert_eq!(s.awareness(), 0.0);
        assert!(s.last_known().is_none());
    }

    #[test]
    fn refresh_after_floor_investigates() {
        let mut s = SensorComponent::default();
        let mut log = IntentLog::new();
        s.floor_awareness(60.0);
        s.set_last_known(Vec3::X, 3.0);

        assert!(s.refresh_alert_state(AgentId(1), Vec3::Z, &mut log));
        assert_eq!(s.alert_state(), AlertState::Suspect);
        assert_eq!(log.intents(), &[
            Intent::SetAlertAnimation(AlertState::Suspect),
            Intent::Investigate { point: Vec3::X, radius: 8.0 },
        ]);

        assert!(!s.refresh_alert_state(AgentId(1), Vec3::Z, &mut log));
        assert_eq!(log.intents().len(), 2, "no change, nothing dispatched");
    }

    #[test]
    fn refresh_after_loud_noise_chases() {
        let mut s = SensorComponent::default();
        s.set_awareness(30.0);
        let mut log = IntentLog::new();
        s.on_noise(0.9, &NoiseEvent::new(NoiseKind::Explosion, Vec3::Z, 1.0));

        assert!(s.refresh_alert_state(AgentId(1), Vec3::Z, &mut log));
        assert_eq!(s.alert_state(), AlertState::Hostile);
        assert_eq!(log.last(), Some(&Intent::Chase { target: Vec3::Z }));

        // Hostile holds without sight, so the next tick keeps it there.
        run(&mut s, &mut log, &player_behind(), 3);
        assert_eq!(s.alert_state(), AlertState::Hostile);
        assert_eq!(s.awareness(), 100.0);
    }

    #[test]
    fn refresh_into_idle_arms_countdown() {
        let mut s = SensorComponent::default();
        s.set_awareness(30.0);
        s.add_awareness(-10.0);
        let mut log = IntentLog::new();
        assert!(s.refresh_alert_state(AgentId(1), Vec3::Z, &mut log));
        assert_eq!(s.search_timer(), Some(15.0));
    }

    #[test]
    fn floor_only_raises() {
        let mut s = SensorComponent::default();
        s.floor_awareness(60.0);
        assert_eq!(s.awareness(), 60.0);
        s.add_awareness(20.0);
        s.floor_awareness(60.0);
        assert_eq!(s.awareness(), 80.0);
    }

    #[test]
    fn clamping() {
        let mut s = SensorComponent::new(SensorConfig::default());
        s.add_awareness(500.0);
        assert_eq!(s.awareness(), 100.0);
        s.add_awareness(-500.0);
        assert_eq!(s.awareness(), 0.0);
        s.set_awareness(-3.0);
        assert_eq!(s.awareness(), 0.0);
    }
}

// ── Property tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod invariant_tests {
    use proptest::prelude::*;

    use super::*;

    #[derive(Debug, Clone)]
    enum Op {
        Add(f32),
        Floor(f32),
        Noise(f32),
        TickSeen,
        TickUnseen,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (-200.0f32..200.0).prop_map(Op::Add),
            (-50.0f32..150.0).prop_map(Op::Floor),
            (0.0f32..1.0).prop_map(Op::Noise),
            Just(Op::TickSeen),
            Just(Op::TickUnseen),
        ]
    }

    proptest! {
        #[test]
        fn awareness_stays_in_range(ops in proptest::collection::vec(op(), 1..60)) {
            let mut s = SensorComponent::default();
            let mut log = IntentLog::new();
            let ev = NoiseEvent::new(NoiseKind::Explosion, Vec3::Z, 0.0);
            for o in ops {
                match o {
                    Op::Add(x)   => s.add_awareness(x),
                    Op::Floor(x) => s.floor_awareness(x),
                    Op::Noise(i) => s.on_noise(i, &ev),
                    Op::TickSeen   => run(&mut s, &mut log, &player_ahead(), 1),
                    Op::TickUnseen => run(&mut s, &mut log, &player_behind(), 1),
                }
                prop_assert!((0.0..=100.0).contains(&s.awareness()));
            }
        }

        #[test]
        fn refreshed_state_tracks_awareness(ops in proptest::collection::vec(op(), 1..60)) {
            let mut s = SensorComponent::default();
            let mut log = IntentLog::new();
            let ev = NoiseEvent::new(NoiseKind::Explosion, Vec3::Z, 0.0);
            for o in ops {
                match o {
                    Op::Add(x)   => s.add_awareness(x),
                    Op::Floor(x) => s.floor_awareness(x),
                    Op::Noise(i) => s.on_noise(i, &ev),
                    Op::TickSeen   => run(&mut s, &mut log, &player_ahead(), 1),
                    Op::TickUnseen => run(&mut s, &mut log, &player_behind(), 1),
                }
                s.refresh_alert_state(AgentId(1), Vec3::Z, &mut log);
                prop_assert_eq!(
                    s.alert_state(),
                    AlertState::from_awareness(s.awareness(), s.config())
                );
            }
        }

        #[test]
        fn alert_state_is_a_function_of_awareness(start in 0.0f32..100.0, seen in any::<bool>()) {
            let mut s = SensorComponent::default();
            s.set_awareness(start);
            let mut log = IntentLog::new();
            let player = if seen { player_ahead() } else { player_behind() };
            run(&mut s, &mut log, &player, 1);
            prop_assert_eq!(
                s.alert_state(),
                AlertState::from_awareness(s.awareness(), s.config())
            );
        }
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod store_tests {
    use super::*;
    use crate::{AgentError, AgentStore, AgentStoreBuilder};

    fn store() -> AgentStore<IntentLog> {
        AgentStoreBuilder::new(7, SensorConfig::default())
            .agent(AgentId(10), Vec3::ZERO, Vec3::Z, IntentLog::new())
            .agent(AgentId(20), Vec3::X, Vec3::Z, IntentLog::new())
            .agent(AgentId(30), Vec3::Y, Vec3::Z, IntentLog::new())
            .build()
            .unwrap()
    }

    #[test]
    fn sparse_ids_resolve() {
        let s = store();
        assert_eq!(s.len(), 3);
        assert_eq!(s.slot_of(AgentId(20)), Some(1));
        assert_eq!(s.get(AgentId(30)).unwrap().position, Vec3::Y);
        assert!(s.get(AgentId(0)).is_none());
        assert_eq!(s.ids().collect::<Vec<_>>(), vec![AgentId(10), AgentId(20), AgentId(30)]);
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let err = AgentStoreBuilder::new(0, SensorConfig::default())
            .agent(AgentId(1), Vec3::ZERO, Vec3::Z, IntentLog::new())
            .agent(AgentId(1), Vec3::X, Vec3::Z, IntentLog::new())
            .build()
            .err();
        assert_eq!(err, Some(AgentError::DuplicateId(AgentId(1))));
    }

    #[test]
    fn remove_keeps_slot_map_consistent() {
        let mut s = store();
        let removed = s.remove(AgentId(10)).unwrap();
        assert_eq!(removed.id, AgentId(10));
        assert_eq!(s.len(), 2);
        assert_eq!(s.slot_of(AgentId(30)), Some(0));
        assert_eq!(s.get(AgentId(30)).unwrap().id, AgentId(30));
        assert_eq!(s.remove(AgentId(10)).err(), Some(AgentError::NotFound(AgentId(10))));
    }

    #[test]
    fn spawn_after_build() {
        let mut s = store();
        let a = s.spawn(AgentId(99), Vec3::ONE, Vec3::X, IntentLog::new()).unwrap();
        assert_eq!(a.sensor.awareness(), 0.0);
        assert!(s.contains(AgentId(99)));
        assert_eq!(s.try_get(AgentId(5)).err(), Some(AgentError::NotFound(AgentId(5))));
    }

    #[test]
    fn perform_reaches_the_behavior() {
        let mut s = store();
        s.try_get_mut(AgentId(20)).unwrap().perform(Intent::TakeCover);
        assert_eq!(s.get(AgentId(20)).unwrap().behavior.intents(), &[Intent::TakeCover]);
        assert!(s.get(AgentId(10)).unwrap().behavior.intents().is_empty());
    }

    #[test]
    fn agent_rngs_are_reproducible() {
        let mut a = store();
        let mut b = store();
        let x: u64 = a.get_mut(AgentId(20)).unwrap().rng.random();
        let y: u64 = b.get_mut(AgentId(20)).unwrap().rng.random();
        assert_eq!(x, y);
    }
}

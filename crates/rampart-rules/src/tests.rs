#[cfg(test)]
mod tests {
    use rampart_core::components::{Health, Invisibility, PathFollower, StatusEffects};
    use rampart_core::enums::{EnemySpecial, Resolution, TargetPriority};
    use rampart_core::types::Position;

    use crate::damage::{effective_damage, heal, take_damage};
    use crate::movement::advance_along_path;
    use crate::status::{apply_burn, apply_slow, tick_status};
    use crate::targeting::{nearest_chain_candidate, select_target, within_radius, TargetCandidate};

    const DT: f64 = 1.0 / 60.0;

    fn health(hp: f64) -> Health {
        Health { hp, max: hp }
    }

    fn candidate(key: u32, x: f64, hp: f64, waypoint_index: usize) -> TargetCandidate<u32> {
        TargetCandidate {
            key,
            position: Position::new(x, 0.0),
            hp,
            waypoint_index,
        }
    }

    // ---- Damage ----

    #[test]
    fn test_plain_hits_until_dead() {
        let mut hp = health(30.0);
        let mut res = Resolution::Alive;
        let status = StatusEffects::default();

        for expected in [20.0, 10.0] {
            let dealt = take_damage(&mut hp, &mut res, &status, 0.0, 10.0, false);
            assert_eq!(dealt, Some(10.0));
            assert_eq!(hp.hp, expected);
            assert_eq!(res, Resolution::Alive);
        }
        take_damage(&mut hp, &mut res, &status, 0.0, 10.0, false);
        assert_eq!(hp.hp, 0.0);
        assert_eq!(res, Resolution::DiedInField);

        // Resolved enemies ignore further hits.
        assert_eq!(take_damage(&mut hp, &mut res, &status, 0.0, 10.0, false), None);
    }

    #[test]
    fn test_overkill_clamps_to_zero() {
        let mut hp = health(5.0);
        let mut res = Resolution::Alive;
        take_damage(&mut hp, &mut res, &StatusEffects::default(), 0.0, 100.0, false);
        assert_eq!(hp.hp, 0.0);
    }

    #[test]
    fn test_armor_floor_and_shield() {
        assert_eq!(effective_damage(3.0, 6.0, false, false), 1.0);
        assert!((effective_damage(3.0, 6.0, false, true) - 0.7).abs() < 1e-12);
        assert_eq!(effective_damage(100.0, 6.0, true, false), 100.0);
        assert!((effective_damage(40.0, 5.0, false, true) - 24.5).abs() < 1e-12);
    }

    #[test]
    fn test_invisible_enemy_ignores_hits() {
        let mut hp = health(100.0);
        let mut res = Resolution::Alive;
        let status = StatusEffects {
            invisibility: Some(Invisibility {
                invisible: true,
                timer: 2.0,
            }),
            ..Default::default()
        };
        assert_eq!(take_damage(&mut hp, &mut res, &status, 0.0, 50.0, true), None);
        assert_eq!(hp.hp, 100.0);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut hp = Health { hp: 58.0, max: 60.0 };
        heal(&mut hp, Resolution::Alive, 5.0);
        assert_eq!(hp.hp, 60.0);

        let mut dead = Health { hp: 0.0, max: 60.0 };
        heal(&mut dead, Resolution::DiedInField, 5.0);
        assert_eq!(dead.hp, 0.0);
    }

    // ---- Status ----

    #[test]
    fn test_slow_replacement_rules() {
        let mut status = StatusEffects::default();
        assert!(apply_slow(&mut status, 0.4, 2.0));

        // Weaker and shorter than what remains: ignored.
        status.slow.remaining = 1.5;
        assert!(!apply_slow(&mut status, 0.2, 1.0));
        assert_eq!(status.slow.amount, 0.4);
        assert_eq!(status.slow.remaining, 1.5);

        // Weaker but longer: replaces.
        assert!(apply_slow(&mut status, 0.2, 3.0));
        assert_eq!(status.slow.amount, 0.2);
        assert_eq!(status.slow.remaining, 3.0);
    }

    #[test]
    fn test_slow_changes_speed_then_expires() {
        let mut hp = health(100.0);
        let mut res = Resolution::Alive;
        let mut status = StatusEffects::default();
        let mut follower = PathFollower::new(100.0);
        apply_slow(&mut status, 0.4, DT);

        tick_status(&mut hp, &mut res, &mut status, &mut follower, EnemySpecial::None, DT);
        assert!((follower.speed - 60.0).abs() < 1e-9);

        tick_status(&mut hp, &mut res, &mut status, &mut follower, EnemySpecial::None, DT);
        assert_eq!(follower.speed, 100.0);
        assert_eq!(status.slow.amount, 0.0);
    }

    #[test]
    fn test_burn_overwrites_and_kills() {
        let mut status = StatusEffects::default();
        apply_burn(&mut status, 5.0, 3.0);
        apply_burn(&mut status, 2.0, 1.0);
        assert_eq!(status.burn.dps, 2.0);
        assert_eq!(status.burn.remaining, 1.0);

        let mut hp = health(1.0);
        let mut res = Resolution::Alive;
        let mut follower = PathFollower::new(50.0);
        apply_burn(&mut status, 120.0, 3.0);
        let tick = tick_status(&mut hp, &mut res, &mut status, &mut follower, EnemySpecial::None, DT);
        assert!(tick.died);
        assert_eq!(hp.hp, 0.0);
        assert_eq!(res, Resolution::DiedInField);
    }

    #[test]
    fn test_invisibility_cycle() {
        let special = EnemySpecial::Invisible {
            interval: 8.0,
            duration: 2.0,
        };
        let mut status = StatusEffects::for_special(special);
        let mut hp = health(3000.0);
        let mut res = Resolution::Alive;
        let mut follower = PathFollower::new(35.0);
        assert!(!status.is_invisible());

        let step = 0.5;
        let mut flips = Vec::new();
        for i in 1..=40 {
            let tick = tick_status(&mut hp, &mut res, &mut status, &mut follower, special, step);
            if tick.visibility_changed {
                flips.push((i as f64 * step, status.is_invisible()));
            }
        }
        assert_eq!(flips, vec![(8.0, true), (10.0, false), (18.0, true), (20.0, false)]);
    }

    #[test]
    fn test_heal_pulse_once_per_second() {
        let special = EnemySpecial::Heal {
            amount: 5.0,
            range: 60.0,
        };
        let mut status = StatusEffects::for_special(special);
        let mut hp = health(60.0);
        let mut res = Resolution::Alive;
        let mut follower = PathFollower::new(55.0);
        let pulses = (0..10)
            .filter(|_| {
                tick_status(&mut hp, &mut res, &mut status, &mut follower, special, 0.25).heal_pulse
            })
            .count();
        assert_eq!(pulses, 2);
    }

    // ---- Movement ----

    #[test]
    fn test_path_snaps_and_finishes() {
        let waypoints = [Position::new(0.0, 0.0), Position::new(40.0, 0.0)];
        let mut pos = waypoints[0];
        let mut follower = PathFollower::new(30.0);

        assert!(!advance_along_path(&mut pos, &mut follower, &waypoints, 1.0));
        assert_eq!(follower.waypoint_index, 1);
        assert_eq!(pos, waypoints[0]);

        assert!(!advance_along_path(&mut pos, &mut follower, &waypoints, 1.0));
        assert_eq!(pos, Position::new(30.0, 0.0));

        assert!(advance_along_path(&mut pos, &mut follower, &waypoints, 1.0));
        assert_eq!(pos, waypoints[1], "overshoot snaps onto the waypoint");
    }

    // ---- Targeting ----

    #[test]
    fn test_priority_modes() {
        let origin = Position::new(0.0, 0.0);
        let list = [
            candidate(1, 50.0, 40.0, 3),
            candidate(2, 20.0, 90.0, 5),
            candidate(3, 80.0, 10.0, 4),
            candidate(4, 500.0, 999.0, 50),
        ];
        assert_eq!(select_target(TargetPriority::First, &origin, 100.0, &list), Some(2));
        assert_eq!(select_target(TargetPriority::Closest, &origin, 100.0, &list), Some(2));
        assert_eq!(select_target(TargetPriority::Strongest, &origin, 100.0, &list), Some(2));
        assert_eq!(select_target(TargetPriority::Weakest, &origin, 100.0, &list), Some(3));
        assert_eq!(select_target(TargetPriority::First, &origin, 10.0, &list), None);
    }

    #[test]
    fn test_ties_go_to_earliest() {
        let origin = Position::new(0.0, 0.0);
        let list = [candidate(7, 30.0, 50.0, 2), candidate(8, 30.0, 50.0, 2)];
        for priority in TargetPriority::ALL {
            assert_eq!(select_target(priority, &origin, 100.0, &list), Some(7));
        }
    }

    #[test]
    fn test_range_edge_is_inclusive() {
        let origin = Position::new(0.0, 0.0);
        let list = [candidate(1, 120.0, 10.0, 0)];
        assert_eq!(select_target(TargetPriority::First, &origin, 120.0, &list), Some(1));
    }

    #[test]
    fn test_chain_skips_hit_and_far() {
        let list = [
            candidate(1, 0.0, 10.0, 0),
            candidate(2, 60.0, 10.0, 0),
            candidate(3, 50.0, 10.0, 0),
            candidate(4, 200.0, 10.0, 0),
        ];
        let from = Position::new(0.0, 0.0);
        assert_eq!(nearest_chain_candidate(&from, 80.0, &[1], &list), Some(3));
        assert_eq!(nearest_chain_candidate(&from, 80.0, &[1, 3], &list), Some(2));
        assert_eq!(nearest_chain_candidate(&from, 80.0, &[1, 2, 3], &list), None);
    }

    #[test]
    fn test_within_radius_keeps_order() {
        let list = [
            candidate(3, 10.0, 1.0, 0),
            candidate(1, 50.0, 1.0, 0),
            candidate(2, 51.0, 1.0, 0),
        ];
        assert_eq!(within_radius(&Position::new(0.0, 0.0), 50.0, &list), vec![3, 1]);
    }
}

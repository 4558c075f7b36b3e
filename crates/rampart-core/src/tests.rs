#[cfg(test)]
mod tests {
    use crate::catalog::{self, sell_value, WAVES};
    use crate::commands::PlayerCommand;
    use crate::config::SimConfig;
    use crate::constants::*;
    use crate::enums::*;
    use crate::errors::CommandError;
    use crate::map::MapGrid;
    use crate::state::GameStateSnapshot;
    use crate::types::{clamp, GridCell, Position};

    // ---- Geometry ----

    #[test]
    fn test_grid_to_pixel_and_back() {
        let cell = GridCell::new(3, 7);
        let center = cell.center();
        assert_eq!(center, Position::new(140.0, 300.0));
        assert_eq!(GridCell::from_position(&center), cell);
        assert_eq!(GridCell::from_position(&Position::new(39.9, 0.0)), GridCell::new(0, 0));
    }

    #[test]
    fn test_step_towards_snaps_on_overshoot() {
        let from = Position::new(0.0, 0.0);
        let to = Position::new(10.0, 0.0);

        let (pos, arrived) = from.step_towards(&to, 4.0);
        assert!(!arrived);
        assert!((pos.x - 4.0).abs() < 1e-9);
        assert_eq!(pos.y, 0.0);

        let (pos, arrived) = from.step_towards(&to, 10.0);
        assert!(arrived, "exact step distance counts as arrival");
        assert_eq!(pos, to);
    }

    #[test]
    fn test_distance_and_angle() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        let down = Position::new(0.0, 1.0);
        assert!((a.angle_to(&down) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
        assert!(clamp(f64::NAN, 0.0, 1.0) == 0.0, "NaN frame deltas clamp to zero");
    }

    // ---- Map ----

    #[test]
    fn test_map_path_endpoints() {
        let map = MapGrid::new();
        assert_eq!(map.waypoints().len(), 59);
        assert_eq!(map.cell_kind(GridCell::new(0, 2)), Some(CellKind::Spawn));
        assert_eq!(map.cell_kind(GridCell::new(19, 11)), Some(CellKind::Base));
        assert_eq!(map.spawn_point(), GridCell::new(0, 2).center());
        assert_eq!(
            *map.waypoints().last().unwrap(),
            GridCell::new(19, 11).center()
        );
    }

    #[test]
    fn test_waypoints_are_adjacent_cells() {
        let map = MapGrid::new();
        for pair in map.waypoints().windows(2) {
            let step = pair[0].distance_to(&pair[1]);
            assert!(
                (step - CELL_SIZE).abs() < 1e-9,
                "path must be one connected cell chain"
            );
        }
    }

    #[test]
    fn test_can_build_rules() {
        let mut map = MapGrid::new();
        assert!(map.can_build(GridCell::new(0, 0)));
        assert!(!map.can_build(GridCell::new(5, 5)), "path");
        assert!(!map.can_build(GridCell::new(0, 2)), "spawn");
        assert!(!map.can_build(GridCell::new(19, 11)), "base");
        assert!(!map.can_build(GridCell::new(-1, 0)));
        assert!(!map.can_build(GridCell::new(GRID_COLS, 0)));
        assert!(!map.can_build(GridCell::new(0, GRID_ROWS)));

        let cell = GridCell::new(1, 1);
        assert!(map.occupy(cell));
        assert!(!map.can_build(cell));
        assert!(!map.occupy(cell));
        assert!(map.release(cell));
        assert!(map.can_build(cell));
    }

    #[test]
    fn test_release_never_touches_path() {
        let mut map = MapGrid::new();
        assert!(!map.release(GridCell::new(5, 5)));
        assert_eq!(map.cell_kind(GridCell::new(5, 5)), Some(CellKind::Path));
        assert!(!map.occupy(GridCell::new(19, 11)));
    }

    // ---- Catalog ----

    #[test]
    fn test_upgrade_costs_and_stats() {
        let arrow = TowerKind::Arrow.definition();
        assert_eq!(arrow.upgrade_cost(0), Some(25));
        assert_eq!(arrow.upgrade_cost(1), Some(25));
        assert_eq!(arrow.upgrade_cost(2), None);
        assert!((arrow.damage_at(2) - 18.0).abs() < 1e-9);
        assert!((arrow.range_at(1) - 132.0).abs() < 1e-9);
        assert!((arrow.fire_interval_at(2) - 0.56).abs() < 1e-9);

        let ice = TowerKind::Ice.definition();
        assert_eq!(ice.upgrade_cost(0), Some(38), "37.5 rounds half away from zero");
    }

    #[test]
    fn test_sell_value_rounding() {
        assert_eq!(sell_value(50, SELL_REFUND_RATIO), 30);
        assert_eq!(sell_value(75, SELL_REFUND_RATIO), 45);
        assert_eq!(sell_value(113, SELL_REFUND_RATIO), 68);
    }

    #[test]
    fn test_hp_scaling() {
        assert_eq!(catalog::scaled_hp(30.0, 1), 30.0);
        assert_eq!(catalog::scaled_hp(80.0, 11), 104.0);
        assert_eq!(catalog::scaled_hp(1500.0, 10), 1905.0);
    }

    #[test]
    fn test_boss_waves_end_with_single_boss() {
        assert_eq!(catalog::total_waves(), 30);
        for wave in 1..=30 {
            let groups = catalog::wave(wave).unwrap();
            let boss_entries: u32 = groups
                .iter()
                .filter(|g| g.enemy.is_boss())
                .map(|g| g.count)
                .sum();
            if matches!(wave, 10 | 20 | 30) {
                assert!(catalog::is_boss_wave(wave));
                assert_eq!(boss_entries, 1, "wave {wave}");
                assert!(groups.last().unwrap().enemy.is_boss());
            } else {
                assert!(!catalog::is_boss_wave(wave));
                assert_eq!(boss_entries, 0, "wave {wave}");
            }
        }
        assert!(catalog::wave(0).is_none());
        assert!(catalog::wave(31).is_none());
        assert_eq!(WAVES.len(), 30);
    }

    #[test]
    fn test_attack_modes() {
        let mode = |kind: TowerKind| {
            let def = kind.definition();
            def.special.attack_mode(def.projectile_speed)
        };
        assert!(matches!(
            mode(TowerKind::Arrow),
            AttackMode::Projectile {
                effect: ProjectileEffect::Plain,
                ..
            }
        ));
        assert!(matches!(
            mode(TowerKind::Cannon),
            AttackMode::Projectile {
                effect: ProjectileEffect::Splash { .. },
                ..
            }
        ));
        assert!(matches!(mode(TowerKind::Lightning), AttackMode::Chain { count: 3, .. }));
        assert!(matches!(mode(TowerKind::Flame), AttackMode::FlameBurst { .. }));

        let burn = TowerSpecial::Burn {
            dps: 5.0,
            duration: 3.0,
        };
        assert!(matches!(
            burn.attack_mode(300.0),
            AttackMode::Projectile {
                effect: ProjectileEffect::Burn { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_priority_cycle() {
        let mut p = TargetPriority::First;
        for expected in [
            TargetPriority::Closest,
            TargetPriority::Strongest,
            TargetPriority::Weakest,
            TargetPriority::First,
        ] {
            p = p.next();
            assert_eq!(p, expected);
        }
    }

    // ---- Config ----

    #[test]
    fn test_config_defaults() {
        let config = SimConfig::default();
        assert_eq!(config.starting_gold, 200);
        assert_eq!(config.starting_lives, 20);
        assert_eq!(config.wave_bonus(3), 35);
    }

    #[test]
    fn test_wave_bonus_saturates() {
        let config = SimConfig {
            wave_bonus_base: 10,
            wave_bonus_per_wave: u32::MAX,
            ..Default::default()
        };
        assert_eq!(config.wave_bonus(30), u32::MAX);
        assert_eq!(config.wave_bonus(0), 10);
    }

    #[test]
    fn test_config_partial_deserialize() {
        let config: SimConfig = serde_json::from_str(r#"{"seed": 7, "starting_gold": 500}"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.starting_gold, 500);
        assert_eq!(config.starting_lives, STARTING_LIVES);
    }

    // ---- Wire shape ----

    #[test]
    fn test_player_command_is_tagged() {
        let cmd = PlayerCommand::PlaceTower {
            kind: TowerKind::Cannon,
            cell: GridCell::new(4, 4),
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["type"], "PlaceTower");
        assert_eq!(json["kind"], "Cannon");
        let back: PlayerCommand = serde_json::from_value(json).unwrap();
        assert_eq!(back, cmd);
    }

    #[test]
    fn test_command_error_messages() {
        let err = CommandError::InsufficientFunds {
            needed: 100,
            available: 40,
        };
        assert_eq!(err.to_string(), "not enough gold: need 100, have 40");
        let err = CommandError::CellBlocked {
            cell: GridCell::new(2, 3),
        };
        assert_eq!(err.to_string(), "cell (2, 3) is not buildable");
    }

    #[test]
    fn test_default_snapshot_serializes() {
        let snap = GameStateSnapshot::default();
        let json = serde_json::to_string(&snap).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}

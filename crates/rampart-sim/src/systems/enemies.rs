//! Enemy update: status timers, heal pulses and path movement.
//!
//! Enemies update one at a time in spawn order. A heal pulse lands
//! immediately, so enemies later in the order see the healed HP.

use hecs::{Entity, World};

use rampart_core::components::{Enemy, Health, PathFollower, StatusEffects};
use rampart_core::enums::{EnemySpecial, Resolution};
use rampart_core::types::Position;
use rampart_rules::damage::heal;
use rampart_rules::movement::advance_along_path;
use rampart_rules::status::tick_status;

use super::in_spawn_order;

pub fn run(world: &mut World, waypoints: &[Position], dt: f64) {
    for entity in in_spawn_order::<Enemy>(world) {
        let pulse = match world.query_one_mut::<(
            &Enemy,
            &mut Health,
            &mut PathFollower,
            &mut StatusEffects,
            &mut Resolution,
            &mut Position,
        )>(entity)
        {
            Ok((enemy, health, follower, status, resolution, pos)) => {
                if *resolution != Resolution::Alive {
                    continue;
                }
                let tick = tick_status(health, resolution, status, follower, enemy.special, dt);
                if tick.died {
                    continue;
                }
                let pulse = match enemy.special {
                    EnemySpecial::Heal { amount, range } if tick.heal_pulse => {
                        Some((*pos, amount, range))
                    }
                    _ => None,
                };
                if advance_along_path(pos, follower, waypoints, dt) {
                    *resolution = Resolution::ReachedEnd;
                }
                pulse
            }
            Err(_) => continue,
        };

        if let Some((origin, amount, range)) = pulse {
            heal_around(world, entity, origin, amount, range);
        }
    }
}

/// Heal every other living enemy within `range` of `origin`.
fn heal_around(world: &mut World, healer: Entity, origin: Position, amount: f64, range: f64) {
    for (entity, (health, resolution, pos)) in
        world.query_mut::<(&mut Health, &Resolution, &Position)>()
    {
        if entity != healer && origin.distance_to(pos) <= range {
            heal(health, *resolution, amount);
        }
    }
}

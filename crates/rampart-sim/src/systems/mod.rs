//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for
//! read-only passes). They hold no state between ticks. Every scan that can
//! affect gameplay walks entities in `SpawnOrder`.

pub mod auras;
pub mod enemies;
pub mod projectiles;
pub mod reconcile;
pub mod snapshot;
pub mod towers;
pub mod wave_spawner;

use hecs::{Component, Entity, World};

use rampart_core::components::{Enemy, Health, PathFollower, SpawnOrder, StatusEffects};
use rampart_core::enums::Resolution;
use rampart_core::events::GameEvent;
use rampart_core::types::Position;
use rampart_rules::damage::take_damage;
use rampart_rules::targeting::TargetCandidate;

/// Entities carrying `T`, sorted by spawn order.
pub fn in_spawn_order<T: Component>(world: &World) -> Vec<Entity> {
    let mut stamped: Vec<(SpawnOrder, Entity)> = world
        .query::<(&SpawnOrder, &T)>()
        .iter()
        .map(|(entity, (order, _))| (*order, entity))
        .collect();
    stamped.sort_unstable_by_key(|(order, _)| *order);
    stamped.into_iter().map(|(_, entity)| entity).collect()
}

/// Living, visible enemies in spawn order: everything a tower may aim at.
pub fn enemy_candidates(world: &World) -> Vec<TargetCandidate<Entity>> {
    let mut stamped: Vec<(SpawnOrder, TargetCandidate<Entity>)> = world
        .query::<(
            &SpawnOrder,
            &Enemy,
            &Health,
            &PathFollower,
            &StatusEffects,
            &Resolution,
            &Position,
        )>()
        .iter()
        .filter(|(_, (_, _, _, _, status, resolution, _))| {
            **resolution == Resolution::Alive && !status.is_invisible()
        })
        .map(|(entity, (order, _, health, follower, _, _, pos))| {
            (
                *order,
                TargetCandidate {
                    key: entity,
                    position: *pos,
                    hp: health.hp,
                    waypoint_index: follower.waypoint_index,
                },
            )
        })
        .collect();
    stamped.sort_unstable_by_key(|(order, _)| *order);
    stamped.into_iter().map(|(_, candidate)| candidate).collect()
}

/// Hit an enemy and record the damage event. Returns the damage dealt, or
/// `None` if the hit had no effect (missing, resolved or invisible).
pub fn strike(
    world: &mut World,
    target: Entity,
    amount: f64,
    ignore_armor: bool,
    events: &mut Vec<GameEvent>,
) -> Option<f64> {
    let (enemy, health, resolution, status, pos) = world
        .query_one_mut::<(&Enemy, &mut Health, &mut Resolution, &StatusEffects, &Position)>(target)
        .ok()?;
    let dealt = take_damage(health, resolution, status, enemy.armor, amount, ignore_armor)?;
    events.push(GameEvent::DamageDealt {
        enemy: enemy.id,
        position: *pos,
        amount: dealt,
        armor_pierced: ignore_armor,
    });
    Some(dealt)
}

/// Position of an enemy that is still in play.
pub fn living_position(world: &World, entity: Entity) -> Option<Position> {
    let resolution = world.get::<&Resolution>(entity).ok()?;
    if *resolution != Resolution::Alive {
        return None;
    }
    world.get::<&Position>(entity).ok().map(|pos| *pos)
}

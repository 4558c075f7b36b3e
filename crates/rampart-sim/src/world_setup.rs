//! Entity spawn factories.
//!
//! Every entity gets a `SpawnOrder` stamp and a `Position`. Enemies also
//! carry their stats, path progress, status and a `Resolution`.

use hecs::{Entity, World};

use rampart_core::components::*;
use rampart_core::enums::{EnemyKind, Resolution, TowerKind};
use rampart_core::types::{EnemyId, GridCell, Position};

use crate::armament::{Projectile, Tower};

/// Monotonic counters for spawn stamps and enemy ids.
#[derive(Debug, Clone, Default)]
pub struct SpawnCounters {
    next_order: u64,
    next_enemy_id: u32,
}

impl SpawnCounters {
    fn order(&mut self) -> SpawnOrder {
        let order = SpawnOrder(self.next_order);
        self.next_order += 1;
        order
    }

    fn enemy_id(&mut self) -> EnemyId {
        let id = EnemyId(self.next_enemy_id);
        self.next_enemy_id += 1;
        id
    }
}

/// Spawn an enemy of `kind` at `at` with HP scaled for `wave`.
pub fn spawn_enemy(
    world: &mut World,
    counters: &mut SpawnCounters,
    kind: EnemyKind,
    wave: u32,
    at: Position,
) -> Entity {
    let def = kind.definition();
    let enemy = Enemy::from_kind(counters.enemy_id(), kind);
    world.spawn((
        counters.order(),
        enemy,
        Health::for_wave(kind, wave),
        PathFollower::new(def.speed),
        StatusEffects::for_special(def.special),
        Resolution::Alive,
        at,
    ))
}

/// Spawn a level-0 tower centered on `cell`.
pub fn spawn_tower(
    world: &mut World,
    counters: &mut SpawnCounters,
    kind: TowerKind,
    cell: GridCell,
) -> Entity {
    world.spawn((counters.order(), Tower::new(kind, cell), cell.center()))
}

/// Spawn a projectile at `from`.
pub fn spawn_projectile(
    world: &mut World,
    counters: &mut SpawnCounters,
    projectile: Projectile,
    from: Position,
) -> Entity {
    world.spawn((counters.order(), projectile, from))
}

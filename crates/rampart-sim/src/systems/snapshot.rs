//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::{Entity, World};

use rampart_core::catalog;
use rampart_core::components::*;
use rampart_core::config::SimConfig;
use rampart_core::enums::*;
use rampart_core::events::GameEvent;
use rampart_core::state::*;
use rampart_core::types::{EnemyId, Position, SimTime};

use super::in_spawn_order;
use super::wave_spawner::SpawnQueue;
use crate::armament::{Projectile, Tower};
use crate::session::{Economy, WaveProgress};

/// Everything outside the world that the snapshot reports.
pub struct SessionView<'a> {
    pub time: SimTime,
    pub phase: GamePhase,
    pub game_speed: GameSpeed,
    pub economy: &'a Economy,
    pub waves: &'a WaveProgress,
    pub spawn_queue: &'a SpawnQueue,
    pub config: &'a SimConfig,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    session: &SessionView<'_>,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    let enemies = build_enemies(world);
    let queued_spawns = session.spawn_queue.len() as u32;

    GameStateSnapshot {
        time: session.time,
        phase: session.phase,
        game_speed: session.game_speed,
        lives: session.economy.lives,
        gold: session.economy.gold,
        wave: build_wave(session, enemies.len() as u32, queued_spawns),
        towers: build_towers(world, session.config.sell_refund_ratio),
        projectiles: build_projectiles(world),
        shop: build_shop(session),
        enemies,
        events,
    }
}

fn build_wave(session: &SessionView<'_>, living: u32, queued_spawns: u32) -> WaveView {
    let waves = session.waves;
    WaveView {
        current: waves.current,
        total: catalog::total_waves(),
        active: waves.active,
        boss_wave: waves.active && catalog::is_boss_wave(waves.current),
        remaining_enemies: living + queued_spawns,
        queued_spawns,
        break_remaining_secs: if waves.in_break() {
            waves.break_timer.max(0.0)
        } else {
            0.0
        },
        banner_remaining_secs: waves.banner_timer.max(0.0),
    }
}

/// Living enemies in spawn order.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    in_spawn_order::<Enemy>(world)
        .into_iter()
        .filter_map(|entity| {
            let mut query = world
                .query_one::<(&Enemy, &Health, &StatusEffects, &Resolution, &Position)>(entity)
                .ok()?;
            let (enemy, health, status, resolution, pos) = query.get()?;
            if *resolution != Resolution::Alive {
                return None;
            }
            Some(EnemyView {
                id: enemy.id,
                kind: enemy.kind,
                position: *pos,
                hp: health.hp,
                max_hp: health.max,
                hp_ratio: health.ratio(),
                radius: enemy.radius,
                boss: enemy.boss,
                slowed: status.is_slowed(),
                burning: status.is_burning(),
                shielded: status.shielded,
                invisible: status.is_invisible(),
                flying: matches!(enemy.special, EnemySpecial::Flying),
            })
        })
        .collect()
}

/// Towers in placement order.
fn build_towers(world: &World, refund_ratio: f64) -> Vec<TowerView> {
    in_spawn_order::<Tower>(world)
        .into_iter()
        .filter_map(|entity| {
            let tower = world.get::<&Tower>(entity).ok()?;
            let pos = world.get::<&Position>(entity).ok()?;
            Some(TowerView {
                cell: tower.cell,
                position: *pos,
                kind: tower.kind,
                level: tower.level,
                damage: tower.damage(),
                range: tower.range(),
                fire_interval: tower.fire_interval(),
                priority: tower.priority,
                target: tower.target.and_then(|target| enemy_id(world, target)),
                invested: tower.invested,
                upgrade_cost: tower.upgrade_cost(),
                sell_value: tower.sell_value(refund_ratio),
            })
        })
        .collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    in_spawn_order::<Projectile>(world)
        .into_iter()
        .filter_map(|entity| {
            let projectile = world.get::<&Projectile>(entity).ok()?;
            let pos = world.get::<&Position>(entity).ok()?;
            Some(ProjectileView {
                position: *pos,
                effect: projectile.effect,
                source: projectile.source,
                target: enemy_id(world, projectile.target),
            })
        })
        .collect()
}

fn build_shop(session: &SessionView<'_>) -> Vec<TowerOffer> {
    let horizon = session.waves.unlock_horizon();
    TowerKind::ALL
        .iter()
        .map(|&kind| {
            let def = kind.definition();
            TowerOffer {
                kind,
                cost: def.cost,
                unlock_wave: def.unlock_wave,
                unlocked: def.unlock_wave <= horizon,
                affordable: session.economy.gold >= def.cost,
            }
        })
        .collect()
}

fn enemy_id(world: &World, entity: Entity) -> Option<EnemyId> {
    world.get::<&Enemy>(entity).ok().map(|enemy| enemy.id)
}

//! Tower system: cooldowns, targeting and attack resolution.
//!
//! Towers act in placement order. Instant attacks (chain, flame burst) land
//! immediately, so a later tower no longer sees an enemy an earlier tower
//! killed this tick.

use hecs::{Entity, World};

use rampart_core::components::StatusEffects;
use rampart_core::constants::CHAIN_DAMAGE_FACTOR;
use rampart_core::enums::{AttackMode, TowerKind};
use rampart_core::events::GameEvent;
use rampart_core::types::Position;
use rampart_rules::status::apply_burn;
use rampart_rules::targeting::{nearest_chain_candidate, select_target, within_radius};

use super::{enemy_candidates, in_spawn_order, living_position, strike};
use crate::armament::{Projectile, Tower};
use crate::world_setup::{self, SpawnCounters};

/// A tower that fires this tick.
struct Shot {
    kind: TowerKind,
    origin: Position,
    target: Entity,
    damage: f64,
    range: f64,
    mode: AttackMode,
}

pub fn run(
    world: &mut World,
    counters: &mut SpawnCounters,
    events: &mut Vec<GameEvent>,
    dt: f64,
) {
    for entity in in_spawn_order::<Tower>(world) {
        let candidates = enemy_candidates(world);
        let shot = match world.query_one_mut::<(&mut Tower, &Position)>(entity) {
            Ok((tower, pos)) => {
                tower.cooldown -= dt;
                tower.target = select_target(tower.priority, pos, tower.range(), &candidates);
                match tower.target {
                    Some(target) if tower.cooldown <= 0.0 => {
                        tower.cooldown = tower.fire_interval();
                        Some(Shot {
                            kind: tower.kind,
                            origin: *pos,
                            target,
                            damage: tower.damage(),
                            range: tower.range(),
                            mode: tower.attack_mode(),
                        })
                    }
                    _ => None,
                }
            }
            Err(_) => None,
        };

        if let Some(shot) = shot {
            fire(world, counters, events, shot);
        }
    }
}

fn fire(world: &mut World, counters: &mut SpawnCounters, events: &mut Vec<GameEvent>, shot: Shot) {
    match shot.mode {
        AttackMode::Projectile { speed, effect } => {
            let projectile = Projectile {
                damage: shot.damage,
                speed,
                effect,
                source: shot.kind,
                target: shot.target,
            };
            world_setup::spawn_projectile(world, counters, projectile, shot.origin);
        }
        AttackMode::Chain { count, range } => chain(world, events, &shot, count, range),
        AttackMode::FlameBurst { dps, duration } => {
            let caught = within_radius(&shot.origin, shot.range, &enemy_candidates(world));
            for enemy in caught {
                strike(world, enemy, shot.damage, false, events);
                if let Ok(mut status) = world.get::<&mut StatusEffects>(enemy) {
                    apply_burn(&mut status, dps, duration);
                }
            }
            events.push(GameEvent::FlameBurst {
                origin: shot.origin,
                radius: shot.range,
            });
        }
    }
}

/// Full damage to the primary target, then up to `count - 1` jumps at
/// reduced damage, each from the last enemy hit.
fn chain(world: &mut World, events: &mut Vec<GameEvent>, shot: &Shot, count: u32, range: f64) {
    let Some(mut from) = living_position(world, shot.target) else {
        return;
    };
    strike(world, shot.target, shot.damage, false, events);
    events.push(GameEvent::ChainArc {
        from: shot.origin,
        to: from,
    });

    let mut hit = vec![shot.target];
    let jump_damage = shot.damage * CHAIN_DAMAGE_FACTOR;
    for _ in 1..count {
        let candidates = enemy_candidates(world);
        let Some(next) = nearest_chain_candidate(&from, range, &hit, &candidates) else {
            break;
        };
        let Some(to) = living_position(world, next) else {
            break;
        };
        strike(world, next, jump_damage, false, events);
        events.push(GameEvent::ChainArc { from, to });
        hit.push(next);
        from = to;
    }
}

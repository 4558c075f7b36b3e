//! Projectile system: homing flight and impact resolution.

use hecs::{Entity, World};
use tracing::trace;

use rampart_core::components::{Enemy, StatusEffects};
use rampart_core::constants::SPLASH_DAMAGE_FACTOR;
use rampart_core::enums::ProjectileEffect;
use rampart_core::events::GameEvent;
use rampart_core::types::Position;
use rampart_rules::status::{apply_burn, apply_slow};
use rampart_rules::targeting::within_radius;

use super::{enemy_candidates, in_spawn_order, living_position, strike};
use crate::armament::Projectile;

/// Move every projectile toward its target and resolve impacts. Projectiles
/// whose target is gone or resolved are discarded without effect.
pub fn run(
    world: &mut World,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<GameEvent>,
    dt: f64,
) {
    despawn_buffer.clear();

    for entity in in_spawn_order::<Projectile>(world) {
        let Ok((projectile, pos)) = world.query_one_mut::<(&Projectile, &Position)>(entity) else {
            continue;
        };
        let projectile = projectile.clone();
        let pos = *pos;

        let Some(target_pos) = living_position(world, projectile.target) else {
            despawn_buffer.push(entity);
            continue;
        };
        let target_radius = world
            .get::<&Enemy>(projectile.target)
            .map(|enemy| enemy.radius)
            .unwrap_or_default();

        let travel = projectile.speed * dt;
        if pos.distance_to(&target_pos) <= travel + target_radius {
            impact(world, events, &projectile, target_pos);
            despawn_buffer.push(entity);
        } else if let Ok(mut current) = world.get::<&mut Position>(entity) {
            *current = pos.step_towards(&target_pos, travel).0;
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

fn impact(
    world: &mut World,
    events: &mut Vec<GameEvent>,
    projectile: &Projectile,
    target_pos: Position,
) {
    let target = projectile.target;
    let pierce = matches!(projectile.effect, ProjectileEffect::PierceArmor);
    let dealt = strike(world, target, projectile.damage, pierce, events);
    trace!(source = ?projectile.source, ?dealt, "projectile impact");

    match projectile.effect {
        ProjectileEffect::Splash { radius } => {
            let splash = projectile.damage * SPLASH_DAMAGE_FACTOR;
            let others: Vec<Entity> = within_radius(&target_pos, radius, &enemy_candidates(world))
                .into_iter()
                .filter(|&enemy| enemy != target)
                .collect();
            for enemy in others {
                strike(world, enemy, splash, false, events);
            }
            events.push(GameEvent::SplashRing {
                center: target_pos,
                radius,
            });
        }
        ProjectileEffect::Slow { amount, duration } => {
            if let Ok(mut status) = world.get::<&mut StatusEffects>(target) {
                apply_slow(&mut status, amount, duration);
            }
        }
        ProjectileEffect::Burn { dps, duration } => {
            if let Ok(mut status) = world.get::<&mut StatusEffects>(target) {
                apply_burn(&mut status, dps, duration);
            }
        }
        ProjectileEffect::Plain | ProjectileEffect::PierceArmor => {}
    }
}

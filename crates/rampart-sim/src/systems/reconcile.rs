//! Economy reconciliation: settles every resolved enemy exactly once and
//! removes it from the world.

use hecs::{Entity, World};
use tracing::trace;

use rampart_core::components::{Enemy, SpawnOrder};
use rampart_core::constants::{BOSS_LEAK_PENALTY, LEAK_PENALTY};
use rampart_core::enums::Resolution;
use rampart_core::events::GameEvent;

/// Gold earned and lives lost in one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settlement {
    pub gold: u32,
    pub lives_lost: i32,
}

/// Credit rewards, charge leaks and despawn every resolved enemy.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<GameEvent>,
) -> Settlement {
    despawn_buffer.clear();
    let mut settlement = Settlement::default();

    let mut resolved: Vec<(SpawnOrder, Entity, Enemy, Resolution)> = world
        .query::<(&SpawnOrder, &Enemy, &Resolution)>()
        .iter()
        .filter(|(_, (_, _, resolution))| **resolution != Resolution::Alive)
        .map(|(entity, (order, enemy, resolution))| (*order, entity, *enemy, *resolution))
        .collect();
    resolved.sort_unstable_by_key(|(order, ..)| *order);

    for (_, entity, enemy, resolution) in resolved {
        match resolution {
            Resolution::ReachedEnd => {
                let lives_lost = if enemy.boss {
                    BOSS_LEAK_PENALTY
                } else {
                    LEAK_PENALTY
                };
                settlement.lives_lost += lives_lost;
                trace!(enemy = %enemy.id, kind = ?enemy.kind, lives_lost, "enemy leaked");
                events.push(GameEvent::EnemyLeaked {
                    enemy: enemy.id,
                    lives_lost,
                });
            }
            Resolution::DiedInField => {
                settlement.gold += enemy.reward;
                trace!(enemy = %enemy.id, kind = ?enemy.kind, reward = enemy.reward, "enemy killed");
                events.push(GameEvent::EnemyKilled {
                    enemy: enemy.id,
                    reward: enemy.reward,
                });
            }
            Resolution::Alive => continue,
        }
        despawn_buffer.push(entity);
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    settlement
}

//! Shield aura pass.
//!
//! Clears every shield flag, then marks each living enemy within range of
//! another living shield bearer.

use hecs::{Entity, World};

use rampart_core::components::{Enemy, StatusEffects};
use rampart_core::enums::{EnemySpecial, Resolution};
use rampart_core::types::Position;

pub fn run(world: &mut World) {
    let bearers: Vec<(Entity, Position, f64)> = world
        .query::<(&Enemy, &Resolution, &Position)>()
        .iter()
        .filter(|(_, (_, resolution, _))| **resolution == Resolution::Alive)
        .filter_map(|(entity, (enemy, _, pos))| match enemy.special {
            EnemySpecial::Shield { range } => Some((entity, *pos, range)),
            _ => None,
        })
        .collect();

    for (entity, (status, resolution, pos)) in
        world.query_mut::<(&mut StatusEffects, &Resolution, &Position)>()
    {
        status.shielded = *resolution == Resolution::Alive
            && bearers
                .iter()
                .any(|(bearer, at, range)| *bearer != entity && pos.distance_to(at) <= *range);
    }
}

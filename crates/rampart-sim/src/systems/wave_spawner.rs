//! Wave spawning system: builds a wave's spawn queue and releases one enemy
//! whenever the spawn timer runs out.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use rampart_core::catalog::SpawnGroup;
use rampart_core::constants::{SPAWN_SHUFFLE_WINDOW, WAVE_FIRST_SPAWN_DELAY};
use rampart_core::enums::EnemyKind;
use rampart_core::types::Position;

use crate::world_setup::{self, SpawnCounters};

/// One pending spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnEntry {
    pub enemy: EnemyKind,
    /// Seconds to wait after this spawn before the next one.
    pub delay: f64,
}

/// Pending spawns of the active wave.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnQueue {
    entries: VecDeque<SpawnEntry>,
    timer: f64,
}

impl SpawnQueue {
    /// Queue for a freshly started wave.
    pub fn for_wave(groups: &[SpawnGroup], rng: &mut ChaCha8Rng) -> Self {
        Self {
            entries: build_spawn_order(groups, rng).into(),
            timer: WAVE_FIRST_SPAWN_DELAY,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &SpawnEntry> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Flatten spawn groups into spawn order.
///
/// Regular entries get a bounded local shuffle: walking from the back, each
/// entry swaps with one of the `SPAWN_SHUFFLE_WINDOW` entries before it (or
/// stays). Bosses always go last, in script order.
pub fn build_spawn_order(groups: &[SpawnGroup], rng: &mut ChaCha8Rng) -> Vec<SpawnEntry> {
    let flattened = groups.iter().flat_map(|group| {
        (0..group.count).map(move |_| SpawnEntry {
            enemy: group.enemy,
            delay: group.interval,
        })
    });
    let (mut regular, bosses): (Vec<SpawnEntry>, Vec<SpawnEntry>) =
        flattened.partition(|entry| !entry.enemy.is_boss());

    for i in (1..regular.len()).rev() {
        let back = rng.gen_range(0..=SPAWN_SHUFFLE_WINDOW) as usize;
        regular.swap(i, i.saturating_sub(back));
    }

    regular.extend(bosses);
    regular
}

/// Count down the spawn timer and release at most one enemy.
pub fn run(
    world: &mut World,
    counters: &mut SpawnCounters,
    queue: &mut SpawnQueue,
    wave: u32,
    spawn_point: Position,
    dt: f64,
) -> Option<Entity> {
    if queue.entries.is_empty() {
        return None;
    }
    queue.timer -= dt;
    if queue.timer > 0.0 {
        return None;
    }
    let entry = queue.entries.pop_front()?;
    queue.timer = entry.delay;
    Some(world_setup::spawn_enemy(
        world,
        counters,
        entry.enemy,
        wave,
        spawn_point,
    ))
}

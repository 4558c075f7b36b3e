//! Enemy components for hecs entities.
//!
//! Components are plain data structs. Combat and status rules live in
//! `rampart-rules`; systems in `rampart-sim` apply them.

use serde::{Deserialize, Serialize};

use crate::catalog::scaled_hp;
use crate::enums::{EnemyKind, EnemySpecial};
use crate::types::EnemyId;

/// Monotonic creation stamp. Every scan over entities runs in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpawnOrder(pub u64);

/// Static per-instance enemy attributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub boss: bool,
    pub armor: f64,
    pub reward: u32,
    pub radius: f64,
    pub special: EnemySpecial,
}

/// Hit points. Invariant: `0 <= hp <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub hp: f64,
    pub max: f64,
}

/// Progress along the map path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathFollower {
    /// Index of the waypoint currently walked toward.
    pub waypoint_index: usize,
    /// Effective speed this tick (pixels/second).
    pub speed: f64,
    pub base_speed: f64,
}

/// Active slow. `remaining <= 0` means expired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Slow {
    /// Fraction of speed removed (0.4 = 40% slower).
    pub amount: f64,
    pub remaining: f64,
}

/// Active burn. `remaining <= 0` means expired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Burn {
    pub dps: f64,
    pub remaining: f64,
}

/// Two-phase invisibility cycle of the invisible special.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Invisibility {
    pub invisible: bool,
    /// Seconds left in the current phase.
    pub timer: f64,
}

/// Transient status of an enemy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusEffects {
    pub slow: Slow,
    pub burn: Burn,
    /// Recomputed by the shield aura pass every tick.
    pub shielded: bool,
    pub invisibility: Option<Invisibility>,
    /// Seconds accumulated toward the next heal pulse.
    pub heal_timer: f64,
}

impl StatusEffects {
    /// Initial status for an enemy with the given special.
    /// Invisible enemies start visible with a full interval on the clock.
    pub fn for_special(special: EnemySpecial) -> Self {
        let invisibility = match special {
            EnemySpecial::Invisible { interval, .. } => Some(Invisibility {
                invisible: false,
                timer: interval,
            }),
            _ => None,
        };
        Self {
            invisibility,
            ..Default::default()
        }
    }

    pub fn is_invisible(&self) -> bool {
        self.invisibility.is_some_and(|i| i.invisible)
    }

    pub fn is_slowed(&self) -> bool {
        self.slow.remaining > 0.0
    }

    pub fn is_burning(&self) -> bool {
        self.burn.remaining > 0.0
    }
}

impl Enemy {
    /// Build the static part of an enemy from its catalog entry.
    pub fn from_kind(id: EnemyId, kind: EnemyKind) -> Self {
        let def = kind.definition();
        Self {
            id,
            kind,
            boss: def.boss,
            armor: def.armor,
            reward: def.reward,
            radius: def.radius,
            special: def.special,
        }
    }
}

impl Health {
    /// Full health for an enemy of `kind` spawned in `wave`.
    pub fn for_wave(kind: EnemyKind, wave: u32) -> Self {
        let max = scaled_hp(kind.definition().hp, wave);
        Self { hp: max, max }
    }

    pub fn ratio(&self) -> f64 {
        if self.max > 0.0 {
            self.hp / self.max
        } else {
            0.0
        }
    }
}

impl PathFollower {
    pub fn new(speed: f64) -> Self {
        Self {
            waypoint_index: 0,
            speed,
            base_speed: speed,
        }
    }
}

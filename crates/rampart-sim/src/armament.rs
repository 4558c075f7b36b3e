//! Tower and projectile components.
//!
//! Both hold weak references to enemies as `hecs::Entity` handles. A handle
//! is never trusted across ticks: systems look it up again and drop it when
//! the enemy is gone or resolved.

use rampart_core::catalog::{sell_value, TowerDefinition};
use rampart_core::constants::MAX_TOWER_LEVEL;
use rampart_core::enums::{AttackMode, ProjectileEffect, TargetPriority, TowerKind};
use rampart_core::types::GridCell;

/// A placed tower. Identity is its grid cell.
#[derive(Debug, Clone)]
pub struct Tower {
    pub kind: TowerKind,
    pub cell: GridCell,
    /// 0-indexed, at most `MAX_TOWER_LEVEL`.
    pub level: u8,
    /// Purchase price plus every upgrade paid.
    pub invested: u32,
    /// Seconds until the tower may fire again. Goes negative while idle.
    pub cooldown: f64,
    /// Enemy picked this tick.
    pub target: Option<hecs::Entity>,
    pub priority: TargetPriority,
}

impl Tower {
    pub fn new(kind: TowerKind, cell: GridCell) -> Self {
        Self {
            kind,
            cell,
            level: 0,
            invested: kind.definition().cost,
            cooldown: 0.0,
            target: None,
            priority: TargetPriority::default(),
        }
    }

    pub fn definition(&self) -> &'static TowerDefinition {
        self.kind.definition()
    }

    pub fn damage(&self) -> f64 {
        self.definition().damage_at(self.level)
    }

    pub fn range(&self) -> f64 {
        self.definition().range_at(self.level)
    }

    pub fn fire_interval(&self) -> f64 {
        self.definition().fire_interval_at(self.level)
    }

    /// Cost of the next level, `None` at max level.
    pub fn upgrade_cost(&self) -> Option<u32> {
        self.definition().upgrade_cost(self.level)
    }

    pub fn is_max_level(&self) -> bool {
        self.level >= MAX_TOWER_LEVEL
    }

    pub fn sell_value(&self, refund_ratio: f64) -> u32 {
        sell_value(self.invested, refund_ratio)
    }

    pub fn attack_mode(&self) -> AttackMode {
        let def = self.definition();
        def.special.attack_mode(def.projectile_speed)
    }

    /// Raise the level and book the cost. Returns the amount booked, or
    /// `None` at max level. Affordability is the caller's concern.
    pub fn upgrade(&mut self) -> Option<u32> {
        let cost = self.upgrade_cost()?;
        self.level += 1;
        self.invested += cost;
        Some(cost)
    }
}

/// A homing projectile in flight.
#[derive(Debug, Clone)]
pub struct Projectile {
    /// Fixed at fire time; later upgrades do not change it.
    pub damage: f64,
    /// Pixels per second.
    pub speed: f64,
    pub effect: ProjectileEffect,
    pub source: TowerKind,
    pub target: hecs::Entity,
}

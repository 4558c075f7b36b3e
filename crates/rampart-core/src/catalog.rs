//! Static balance tables: towers, upgrades, enemies and waves.

use crate::constants::MAX_TOWER_LEVEL;
use crate::enums::EnemyKind::*;
use crate::enums::{EnemyKind, EnemySpecial, TowerKind, TowerSpecial};

/// Immutable definition of a tower type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TowerDefinition {
    pub name: &'static str,
    pub cost: u32,
    pub damage: f64,
    /// Range in pixels.
    pub range: f64,
    /// Seconds between shots.
    pub fire_interval: f64,
    /// The tower can be bought once `unlock_wave <= current_wave + 1`.
    pub unlock_wave: u32,
    pub special: TowerSpecial,
    /// Pixels per second; 0 for instant attacks.
    pub projectile_speed: f64,
    pub projectile_radius: f64,
    pub color: &'static str,
    pub projectile_color: &'static str,
    pub description: &'static str,
}

/// Per-level multipliers (index = level, 0-indexed).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpgradeTable {
    /// Cost to reach a level, as a fraction of the tower's base cost.
    pub cost: [f64; 3],
    pub damage: [f64; 3],
    pub range: [f64; 3],
    /// Lower is faster.
    pub fire_interval: [f64; 3],
}

pub const UPGRADES: UpgradeTable = UpgradeTable {
    cost: [0.0, 0.5, 0.5],
    damage: [1.0, 1.4, 1.8],
    range: [1.0, 1.1, 1.2],
    fire_interval: [1.0, 0.85, 0.70],
};

/// Immutable definition of an enemy type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyDefinition {
    pub name: &'static str,
    pub hp: f64,
    /// Pixels per second.
    pub speed: f64,
    pub armor: f64,
    pub reward: u32,
    /// Body radius in pixels; projectiles hit at this distance.
    pub radius: f64,
    pub color: &'static str,
    pub special: EnemySpecial,
    pub boss: bool,
}

/// One group of identical spawns inside a wave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnGroup {
    pub enemy: EnemyKind,
    pub count: u32,
    /// Seconds to wait after spawning one of these before the next spawn.
    pub interval: f64,
}

const ARROW: TowerDefinition = TowerDefinition {
    name: "Arrow Tower",
    cost: 50,
    damage: 10.0,
    range: 120.0,
    fire_interval: 0.8,
    unlock_wave: 1,
    special: TowerSpecial::None,
    projectile_speed: 400.0,
    projectile_radius: 3.0,
    color: "#4fc3f7",
    projectile_color: "#4fc3f7",
    description: "Fast, cheap, reliable.",
};

const CANNON: TowerDefinition = TowerDefinition {
    name: "Cannon Tower",
    cost: 100,
    damage: 40.0,
    range: 100.0,
    fire_interval: 1.8,
    unlock_wave: 1,
    special: TowerSpecial::Splash { radius: 50.0 },
    projectile_speed: 250.0,
    projectile_radius: 5.0,
    color: "#ef5350",
    projectile_color: "#ef5350",
    description: "Slow but deals AoE splash.",
};

const ICE: TowerDefinition = TowerDefinition {
    name: "Ice Tower",
    cost: 75,
    damage: 5.0,
    range: 120.0,
    fire_interval: 1.2,
    unlock_wave: 5,
    special: TowerSpecial::Slow {
        amount: 0.4,
        duration: 2.0,
    },
    projectile_speed: 350.0,
    projectile_radius: 4.0,
    color: "#81d4fa",
    projectile_color: "#81d4fa",
    description: "Slows enemies by 40% for 2s.",
};

const SNIPER: TowerDefinition = TowerDefinition {
    name: "Sniper Tower",
    cost: 150,
    damage: 100.0,
    range: 250.0,
    fire_interval: 3.0,
    unlock_wave: 10,
    special: TowerSpecial::PierceArmor,
    projectile_speed: 800.0,
    projectile_radius: 3.0,
    color: "#ab47bc",
    projectile_color: "#ce93d8",
    description: "Long range, ignores armor.",
};

const LIGHTNING: TowerDefinition = TowerDefinition {
    name: "Lightning Tower",
    cost: 200,
    damage: 30.0,
    range: 130.0,
    fire_interval: 1.5,
    unlock_wave: 18,
    special: TowerSpecial::Chain {
        count: 3,
        range: 80.0,
    },
    projectile_speed: 0.0,
    projectile_radius: 0.0,
    color: "#ffd54f",
    projectile_color: "#fff176",
    description: "Chains lightning to 3 enemies.",
};

const FLAME: TowerDefinition = TowerDefinition {
    name: "Flame Tower",
    cost: 250,
    damage: 15.0,
    range: 90.0,
    fire_interval: 0.3,
    unlock_wave: 25,
    special: TowerSpecial::Burn {
        dps: 5.0,
        duration: 3.0,
    },
    projectile_speed: 0.0,
    projectile_radius: 0.0,
    color: "#ff7043",
    projectile_color: "#ff8a65",
    description: "Burns enemies over time.",
};

impl TowerDefinition {
    /// Damage per hit at a level.
    pub fn damage_at(&self, level: u8) -> f64 {
        self.damage * UPGRADES.damage[level as usize]
    }

    /// Range in pixels at a level.
    pub fn range_at(&self, level: u8) -> f64 {
        self.range * UPGRADES.range[level as usize]
    }

    /// Seconds between shots at a level.
    pub fn fire_interval_at(&self, level: u8) -> f64 {
        self.fire_interval * UPGRADES.fire_interval[level as usize]
    }

    /// Gold needed to go from `level` to `level + 1`, or `None` at max level.
    pub fn upgrade_cost(&self, level: u8) -> Option<u32> {
        if level >= MAX_TOWER_LEVEL {
            return None;
        }
        let multiplier = UPGRADES.cost[level as usize + 1];
        Some((self.cost as f64 * multiplier).round() as u32)
    }
}

/// Gold refunded when selling a tower with `invested` gold sunk into it.
pub fn sell_value(invested: u32, refund_ratio: f64) -> u32 {
    (invested as f64 * refund_ratio).round() as u32
}

impl TowerKind {
    pub fn definition(self) -> &'static TowerDefinition {
        match self {
            TowerKind::Arrow => &ARROW,
            TowerKind::Cannon => &CANNON,
            TowerKind::Ice => &ICE,
            TowerKind::Sniper => &SNIPER,
            TowerKind::Lightning => &LIGHTNING,
            TowerKind::Flame => &FLAME,
        }
    }
}

const SCOUT: EnemyDefinition = EnemyDefinition {
    name: "Scout",
    hp: 30.0,
    speed: 80.0,
    armor: 0.0,
    reward: 5,
    radius: 8.0,
    color: "#90a4ae",
    special: EnemySpecial::None,
    boss: false,
};

const SOLDIER: EnemyDefinition = EnemyDefinition {
    name: "Soldier",
    hp: 80.0,
    speed: 55.0,
    armor: 1.0,
    reward: 10,
    radius: 10.0,
    color: "#78909c",
    special: EnemySpecial::None,
    boss: false,
};

const TANK: EnemyDefinition = EnemyDefinition {
    name: "Tank",
    hp: 250.0,
    speed: 35.0,
    armor: 3.0,
    reward: 25,
    radius: 14.0,
    color: "#546e7a",
    special: EnemySpecial::None,
    boss: false,
};

const RUNNER: EnemyDefinition = EnemyDefinition {
    name: "Runner",
    hp: 40.0,
    speed: 120.0,
    armor: 0.0,
    reward: 8,
    radius: 7.0,
    color: "#a5d6a7",
    special: EnemySpecial::None,
    boss: false,
};

const HEALER: EnemyDefinition = EnemyDefinition {
    name: "Healer",
    hp: 60.0,
    speed: 55.0,
    armor: 0.0,
    reward: 15,
    radius: 10.0,
    color: "#66bb6a",
    special: EnemySpecial::Heal {
        amount: 5.0,
        range: 60.0,
    },
    boss: false,
};

const SHIELD_BEARER: EnemyDefinition = EnemyDefinition {
    name: "Shield Bearer",
    hp: 150.0,
    speed: 40.0,
    armor: 5.0,
    reward: 20,
    radius: 13.0,
    color: "#5c6bc0",
    special: EnemySpecial::Shield { range: 60.0 },
    boss: false,
};

const IRON_GOLEM: EnemyDefinition = EnemyDefinition {
    name: "Iron Golem",
    hp: 1500.0,
    speed: 25.0,
    armor: 6.0,
    reward: 100,
    radius: 20.0,
    color: "#d32f2f",
    special: EnemySpecial::None,
    boss: true,
};

const SHADOW_LORD: EnemyDefinition = EnemyDefinition {
    name: "Shadow Lord",
    hp: 3000.0,
    speed: 35.0,
    armor: 3.0,
    reward: 100,
    radius: 20.0,
    color: "#4a148c",
    special: EnemySpecial::Invisible {
        interval: 8.0,
        duration: 2.0,
    },
    boss: true,
};

const DRAGON_KING: EnemyDefinition = EnemyDefinition {
    name: "Dragon King",
    hp: 6000.0,
    speed: 30.0,
    armor: 4.0,
    reward: 100,
    radius: 22.0,
    color: "#ff6f00",
    special: EnemySpecial::Flying,
    boss: true,
};

impl EnemyKind {
    pub fn definition(self) -> &'static EnemyDefinition {
        match self {
            EnemyKind::Scout => &SCOUT,
            EnemyKind::Soldier => &SOLDIER,
            EnemyKind::Tank => &TANK,
            EnemyKind::Runner => &RUNNER,
            EnemyKind::Healer => &HEALER,
            EnemyKind::ShieldBearer => &SHIELD_BEARER,
            EnemyKind::IronGolem => &IRON_GOLEM,
            EnemyKind::ShadowLord => &SHADOW_LORD,
            EnemyKind::DragonKing => &DRAGON_KING,
        }
    }

    pub fn is_boss(self) -> bool {
        self.definition().boss
    }
}

const fn group(enemy: EnemyKind, count: u32, interval: f64) -> SpawnGroup {
    SpawnGroup {
        enemy,
        count,
        interval,
    }
}

/// Scripted waves, index 0 = wave 1.
pub const WAVES: [&[SpawnGroup]; 30] = [
    &[group(Scout, 8, 0.8)],
    &[group(Scout, 12, 0.7)],
    &[group(Scout, 6, 0.8), group(Soldier, 4, 1.2)],
    &[group(Soldier, 8, 1.0)],
    &[group(Scout, 10, 0.5), group(Soldier, 6, 1.0)],
    &[group(Soldier, 10, 0.9)],
    &[group(Soldier, 6, 1.0), group(Tank, 3, 2.0)],
    &[group(Scout, 15, 0.4), group(Tank, 4, 2.0)],
    &[group(Soldier, 10, 0.8), group(Tank, 5, 1.8)],
    &[group(Soldier, 8, 0.8), group(IronGolem, 1, 0.0)],
    &[group(Runner, 15, 0.4)],
    &[group(Runner, 10, 0.5), group(Soldier, 8, 0.9)],
    &[group(Tank, 8, 1.5), group(Runner, 8, 0.5)],
    &[group(Soldier, 8, 0.8), group(Healer, 3, 2.5)],
    &[group(Tank, 6, 1.5), group(Healer, 4, 2.0)],
    &[group(Runner, 20, 0.3), group(Soldier, 5, 1.0)],
    &[group(Tank, 8, 1.2), group(Healer, 5, 2.0)],
    &[group(Soldier, 10, 0.7), group(ShieldBearer, 3, 3.0)],
    &[
        group(Tank, 6, 1.5),
        group(ShieldBearer, 4, 2.5),
        group(Healer, 3, 2.5),
    ],
    &[group(ShieldBearer, 4, 2.0), group(ShadowLord, 1, 0.0)],
    &[group(Runner, 25, 0.25)],
    &[group(Tank, 10, 1.0), group(Healer, 5, 1.5)],
    &[group(ShieldBearer, 6, 2.0), group(Soldier, 15, 0.5)],
    &[
        group(Tank, 8, 1.2),
        group(ShieldBearer, 5, 2.0),
        group(Healer, 5, 2.0),
    ],
    &[group(Runner, 20, 0.3), group(Tank, 10, 1.0)],
    &[group(ShieldBearer, 8, 1.5), group(Healer, 6, 1.5)],
    &[group(Tank, 12, 0.8), group(Runner, 15, 0.3)],
    &[
        group(ShieldBearer, 8, 1.2),
        group(Tank, 8, 1.0),
        group(Healer, 6, 1.5),
    ],
    &[
        group(Runner, 30, 0.2),
        group(Tank, 10, 0.8),
        group(ShieldBearer, 5, 2.0),
    ],
    &[
        group(Tank, 6, 1.5),
        group(ShieldBearer, 4, 2.0),
        group(Healer, 4, 2.0),
        group(DragonKing, 1, 0.0),
    ],
];

/// Number of scripted waves.
pub fn total_waves() -> u32 {
    WAVES.len() as u32
}

/// Spawn groups of a 1-indexed wave, or `None` past the last wave.
pub fn wave(number: u32) -> Option<&'static [SpawnGroup]> {
    let index = number.checked_sub(1)? as usize;
    WAVES.get(index).copied()
}

/// Whether a 1-indexed wave contains a boss.
pub fn is_boss_wave(number: u32) -> bool {
    wave(number).is_some_and(|groups| groups.iter().any(|g| g.enemy.is_boss()))
}

/// Max HP of an enemy spawned in the given 1-indexed wave.
pub fn scaled_hp(base_hp: f64, wave: u32) -> f64 {
    let growth = crate::constants::HP_GROWTH_PER_WAVE * wave.saturating_sub(1) as f64;
    (base_hp * (1.0 + growth)).round()
}

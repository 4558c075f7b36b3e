//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Kind of a single map cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    /// Empty ground, buildable.
    #[default]
    Grass,
    /// Enemy path.
    Path,
    /// First path cell, where enemies enter.
    Spawn,
    /// Last path cell, the player's base.
    Base,
    /// Grass with a tower on it.
    Occupied,
}

/// Session phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Menu,
    Playing,
    Paused,
    Win,
    Lose,
}

impl GamePhase {
    /// Whether tower commands are accepted in this phase.
    pub fn accepts_build_commands(self) -> bool {
        matches!(self, GamePhase::Playing | GamePhase::Paused)
    }
}

/// Global speed multiplier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameSpeed {
    #[default]
    Normal,
    Fast,
}

impl GameSpeed {
    pub fn multiplier(self) -> f64 {
        match self {
            GameSpeed::Normal => 1.0,
            GameSpeed::Fast => 2.0,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            GameSpeed::Normal => GameSpeed::Fast,
            GameSpeed::Fast => GameSpeed::Normal,
        }
    }
}

/// How a tower picks among enemies in range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetPriority {
    /// Furthest along the path.
    #[default]
    First,
    /// Nearest to the tower.
    Closest,
    /// Highest current HP.
    Strongest,
    /// Lowest current HP.
    Weakest,
}

impl TargetPriority {
    pub const ALL: [TargetPriority; 4] = [
        TargetPriority::First,
        TargetPriority::Closest,
        TargetPriority::Strongest,
        TargetPriority::Weakest,
    ];

    /// Next mode in the cycle first → closest → strongest → weakest → first.
    pub fn next(self) -> Self {
        match self {
            TargetPriority::First => TargetPriority::Closest,
            TargetPriority::Closest => TargetPriority::Strongest,
            TargetPriority::Strongest => TargetPriority::Weakest,
            TargetPriority::Weakest => TargetPriority::First,
        }
    }
}

/// Buildable tower types, in shop order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerKind {
    Arrow,
    Cannon,
    Ice,
    Sniper,
    Lightning,
    Flame,
}

impl TowerKind {
    pub const ALL: [TowerKind; 6] = [
        TowerKind::Arrow,
        TowerKind::Cannon,
        TowerKind::Ice,
        TowerKind::Sniper,
        TowerKind::Lightning,
        TowerKind::Flame,
    ];
}

/// Enemy types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Scout,
    Soldier,
    Tank,
    Runner,
    Healer,
    ShieldBearer,
    IronGolem,
    ShadowLord,
    DragonKing,
}

/// A tower's special behavior with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TowerSpecial {
    None,
    /// Projectile damages everything near the impact point.
    Splash { radius: f64 },
    /// Projectile slows the struck enemy.
    Slow { amount: f64, duration: f64 },
    /// Projectile ignores armor.
    PierceArmor,
    /// Instant hit that jumps between nearby enemies.
    Chain { count: u32, range: f64 },
    /// Sets enemies on fire.
    Burn { dps: f64, duration: f64 },
}

/// Effect carried by a projectile and resolved on impact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProjectileEffect {
    Plain,
    Splash { radius: f64 },
    Slow { amount: f64, duration: f64 },
    PierceArmor,
    Burn { dps: f64, duration: f64 },
}

/// How a tower delivers its attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackMode {
    /// Fires a homing projectile.
    Projectile { speed: f64, effect: ProjectileEffect },
    /// Instant primary hit plus chain jumps.
    Chain { count: u32, range: f64 },
    /// Instant hit on everything in range, plus burn.
    FlameBurst { dps: f64, duration: f64 },
}

impl TowerSpecial {
    /// Resolve the delivery mode. Chain is always instant; burn is an instant
    /// area burst unless the tower fires real projectiles.
    pub fn attack_mode(self, projectile_speed: f64) -> AttackMode {
        let projectile = |effect| AttackMode::Projectile {
            speed: projectile_speed,
            effect,
        };
        match self {
            TowerSpecial::None => projectile(ProjectileEffect::Plain),
            TowerSpecial::Splash { radius } => projectile(ProjectileEffect::Splash { radius }),
            TowerSpecial::Slow { amount, duration } => {
                projectile(ProjectileEffect::Slow { amount, duration })
            }
            TowerSpecial::PierceArmor => projectile(ProjectileEffect::PierceArmor),
            TowerSpecial::Chain { count, range } => AttackMode::Chain { count, range },
            TowerSpecial::Burn { dps, duration } if projectile_speed <= 0.0 => {
                AttackMode::FlameBurst { dps, duration }
            }
            TowerSpecial::Burn { dps, duration } => {
                projectile(ProjectileEffect::Burn { dps, duration })
            }
        }
    }
}

/// An enemy's special behavior with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EnemySpecial {
    None,
    /// Heals other enemies in range once per second.
    Heal { amount: f64, range: f64 },
    /// Shields other enemies in range (damage taken × 0.7).
    Shield { range: f64 },
    /// Alternates visible for `interval` s and invisible for `duration` s.
    Invisible { interval: f64, duration: f64 },
    /// Cosmetic tag; no mechanical effect.
    Flying,
}

/// Terminal resolution of an enemy, consumed once by economy reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    #[default]
    Alive,
    /// HP reached zero; pays the gold reward.
    DiedInField,
    /// Walked off the last waypoint; costs lives.
    ReachedEnd,
}

//! Game state snapshot: the complete visible state handed to the shell each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{EnemyId, GridCell, Position, SimTime};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub game_speed: GameSpeed,
    pub lives: i32,
    pub gold: u32,
    pub wave: WaveView,
    pub enemies: Vec<EnemyView>,
    pub towers: Vec<TowerView>,
    pub projectiles: Vec<ProjectileView>,
    pub shop: Vec<TowerOffer>,
    pub events: Vec<GameEvent>,
}

/// Wave progress for the HUD.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveView {
    /// 1-indexed wave number; 0 before the first wave.
    pub current: u32,
    pub total: u32,
    pub active: bool,
    pub boss_wave: bool,
    /// Living enemies plus spawns still queued.
    pub remaining_enemies: u32,
    pub queued_spawns: u32,
    /// Seconds until the next wave auto-starts (only meaningful between waves).
    pub break_remaining_secs: f64,
    /// Seconds the "Wave N" banner stays visible.
    pub banner_remaining_secs: f64,
}

/// A living enemy on the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub position: Position,
    pub hp: f64,
    pub max_hp: f64,
    /// `hp / max_hp`, for health bars.
    pub hp_ratio: f64,
    pub radius: f64,
    pub boss: bool,
    pub slowed: bool,
    pub burning: bool,
    pub shielded: bool,
    pub invisible: bool,
    pub flying: bool,
}

/// A placed tower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerView {
    pub cell: GridCell,
    pub position: Position,
    pub kind: TowerKind,
    /// 0-indexed level.
    pub level: u8,
    pub damage: f64,
    pub range: f64,
    pub fire_interval: f64,
    pub priority: TargetPriority,
    /// Enemy the tower aimed at this tick.
    pub target: Option<EnemyId>,
    pub invested: u32,
    /// `None` at max level.
    pub upgrade_cost: Option<u32>,
    pub sell_value: u32,
}

/// A projectile in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Position,
    pub effect: ProjectileEffect,
    pub source: TowerKind,
    pub target: Option<EnemyId>,
}

/// Shop entry for the build menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerOffer {
    pub kind: TowerKind,
    pub cost: u32,
    pub unlock_wave: u32,
    pub unlocked: bool,
    pub affordable: bool,
}

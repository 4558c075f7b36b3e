//! Events emitted by the simulation for effects, audio and HUD feedback.
//!
//! Events are collected during a tick and handed out with the snapshot.

use serde::{Deserialize, Serialize};

use crate::enums::{GamePhase, TowerKind};
use crate::errors::CommandError;
use crate::types::{EnemyId, GridCell, Position};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Session phase changed.
    PhaseChanged { phase: GamePhase },
    /// A wave started spawning.
    WaveStarted { wave: u32, boss: bool },
    /// The last enemy of a wave is gone.
    WaveCleared { wave: u32, bonus: u32 },
    /// Gold paid for starting a wave during the break.
    EarlyStartBonus { gold: u32 },
    /// An enemy died in the field.
    EnemyKilled { enemy: EnemyId, reward: u32 },
    /// An enemy reached the base.
    EnemyLeaked { enemy: EnemyId, lives_lost: i32 },
    /// A hit landed (after armor and shield).
    DamageDealt {
        enemy: EnemyId,
        position: Position,
        amount: f64,
        armor_pierced: bool,
    },
    /// One segment of a lightning chain.
    ChainArc { from: Position, to: Position },
    /// A splash projectile detonated.
    SplashRing { center: Position, radius: f64 },
    /// A flame tower fired.
    FlameBurst { origin: Position, radius: f64 },
    TowerPlaced { kind: TowerKind, cell: GridCell },
    TowerUpgraded { cell: GridCell, level: u8 },
    TowerSold { cell: GridCell, refund: u32 },
    /// A queued command failed validation.
    CommandRejected { reason: CommandError },
}

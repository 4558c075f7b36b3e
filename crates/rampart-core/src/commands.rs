//! Player commands sent from the UI shell to the simulation.
//!
//! Commands are either executed immediately or queued and processed at the
//! next tick boundary. Towers are referenced by the grid cell they stand on.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::GridCell;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Towers ---
    /// Build a tower on a grass cell.
    PlaceTower { kind: TowerKind, cell: GridCell },
    /// Raise a tower one level.
    UpgradeTower { cell: GridCell },
    /// Remove a tower and refund part of its cost.
    SellTower { cell: GridCell },
    /// Choose how a tower picks its target.
    SetTargetPriority {
        cell: GridCell,
        priority: TargetPriority,
    },
    /// Advance a tower's target priority to the next mode.
    CycleTargetPriority { cell: GridCell },

    // --- Waves ---
    /// Start the next wave now (early start pays a bonus).
    StartNextWave,

    // --- Session control ---
    /// Set the global speed multiplier.
    SetGameSpeed { speed: GameSpeed },
    /// Flip between 1x and 2x.
    ToggleGameSpeed,
    /// Freeze or resume the simulation.
    SetPaused { paused: bool },
    /// Leave the menu (or restart after a win/loss).
    StartSession,
    /// Discard the session and return to the menu.
    ResetSession,
}

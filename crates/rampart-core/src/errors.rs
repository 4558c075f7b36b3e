//! Validation failures reported for rejected player commands.
//!
//! Every failure leaves the session untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::TowerKind;
use crate::types::GridCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CommandError {
    #[error("not enough gold: need {needed}, have {available}")]
    InsufficientFunds { needed: u32, available: u32 },
    #[error("cell {cell} is not buildable")]
    CellBlocked { cell: GridCell },
    #[error("{kind:?} unlocks at wave {unlock_wave}")]
    LockedTower { kind: TowerKind, unlock_wave: u32 },
    #[error("tower is already at max level")]
    MaxLevel,
    #[error("no tower at {cell}")]
    TowerNotFound { cell: GridCell },
    #[error("session is not in play")]
    NotPlaying,
}

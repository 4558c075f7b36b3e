//! Session configuration.
//!
//! Defaults reproduce the standard balance. Every field may be omitted when
//! deserializing.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::GameSpeed;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for the spawn shuffle. Same seed = same session.
    pub seed: u64,
    pub starting_gold: u32,
    pub starting_lives: i32,
    pub sell_refund_ratio: f64,
    pub wave_break_secs: f64,
    pub early_start_bonus: u32,
    pub wave_bonus_base: u32,
    pub wave_bonus_per_wave: u32,
    /// Initial speed multiplier.
    pub game_speed: GameSpeed,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            starting_gold: STARTING_GOLD,
            starting_lives: STARTING_LIVES,
            sell_refund_ratio: SELL_REFUND_RATIO,
            wave_break_secs: WAVE_BREAK_SECS,
            early_start_bonus: EARLY_START_BONUS,
            wave_bonus_base: WAVE_BONUS_BASE,
            wave_bonus_per_wave: WAVE_BONUS_PER_WAVE,
            game_speed: GameSpeed::Normal,
        }
    }
}

impl SimConfig {
    /// Gold paid for clearing a 1-indexed wave.
    pub fn wave_bonus(&self, wave: u32) -> u32 {
        self.wave_bonus_base
            .saturating_add(wave.saturating_mul(self.wave_bonus_per_wave))
    }
}

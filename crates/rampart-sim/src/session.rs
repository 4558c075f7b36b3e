//! Economy and wave progress owned by the engine, outside the ECS world.

use rampart_core::catalog;
use rampart_core::config::SimConfig;

/// Player resources.
#[derive(Debug, Clone, PartialEq)]
pub struct Economy {
    pub gold: u32,
    /// May dip below zero within a tick; clamped when the session is lost.
    pub lives: i32,
}

impl Economy {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            gold: config.starting_gold,
            lives: config.starting_lives,
        }
    }

    /// Deduct `amount` if affordable.
    pub fn try_spend(&mut self, amount: u32) -> bool {
        match self.gold.checked_sub(amount) {
            Some(rest) => {
                self.gold = rest;
                true
            }
            None => false,
        }
    }

    pub fn credit(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }
}

/// Where the session stands in the wave script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaveProgress {
    /// 1-indexed number of the latest started wave; 0 before the first.
    pub current: u32,
    pub active: bool,
    /// Countdown to the automatic start of the next wave.
    pub break_timer: f64,
    pub banner_timer: f64,
}

impl WaveProgress {
    pub fn has_more_waves(&self) -> bool {
        self.current < catalog::total_waves()
    }

    /// Between waves with waves left to play.
    pub fn in_break(&self) -> bool {
        !self.active && self.has_more_waves()
    }

    /// Highest wave whose towers may be bought.
    pub fn unlock_horizon(&self) -> u32 {
        self.current + 1
    }
}

//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{CELL_SIZE, GRID_COLS, GRID_ROWS};

/// 2D position on the playfield (pixels).
/// x grows to the right, y grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A cell on the build grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub col: i32,
    pub row: i32,
}

/// Stable identifier of an enemy, assigned in spawn order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of simulated (Playing) ticks.
    pub tick: u64,
    /// Elapsed simulation time in seconds, after speed scaling.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn as_vec(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn from_vec(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }

    /// Euclidean distance in pixels.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.as_vec().distance(other.as_vec())
    }

    /// Angle to another position in radians (atan2 convention, 0 = +x).
    pub fn angle_to(&self, other: &Position) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Move toward `target` by at most `max_step` pixels.
    ///
    /// Returns the new position and whether the target was reached. A step
    /// that would reach or overshoot the target snaps exactly onto it.
    pub fn step_towards(&self, target: &Position, max_step: f64) -> (Position, bool) {
        let from = self.as_vec();
        let to = target.as_vec();
        let remaining = from.distance(to);
        if remaining <= max_step {
            return (*target, true);
        }
        let dir = (to - from) / remaining;
        (Position::from_vec(from + dir * max_step), false)
    }
}

impl GridCell {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Pixel center of this cell.
    pub fn center(&self) -> Position {
        Position::new(
            self.col as f64 * CELL_SIZE + CELL_SIZE / 2.0,
            self.row as f64 * CELL_SIZE + CELL_SIZE / 2.0,
        )
    }

    /// Cell containing a pixel position.
    pub fn from_position(pos: &Position) -> Self {
        Self {
            col: (pos.x / CELL_SIZE).floor() as i32,
            row: (pos.y / CELL_SIZE).floor() as i32,
        }
    }

    pub fn in_bounds(&self) -> bool {
        (0..GRID_COLS).contains(&self.col) && (0..GRID_ROWS).contains(&self.row)
    }
}

impl std::fmt::Display for GridCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

impl std::fmt::Display for EnemyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl SimTime {
    /// Advance by one tick covering `dt` seconds of simulation time.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Clamp `value` into `[min, max]`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

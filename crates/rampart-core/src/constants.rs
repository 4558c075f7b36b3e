//! Simulation constants and tuning parameters.

/// Nominal simulation tick rate (Hz) used by fixed-step callers.
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the nominal tick rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Largest frame delta accepted by the engine (seconds).
/// Longer stalls are integrated as a single 100 ms step.
pub const MAX_FRAME_DT: f64 = 0.1;

// --- Grid ---

/// Number of grid columns.
pub const GRID_COLS: i32 = 20;

/// Number of grid rows.
pub const GRID_ROWS: i32 = 14;

/// Edge length of one grid cell in pixels.
pub const CELL_SIZE: f64 = 40.0;

// --- Player ---

/// Lives at the start of a session.
pub const STARTING_LIVES: i32 = 20;

/// Gold at the start of a session.
pub const STARTING_GOLD: u32 = 200;

// --- Economy ---

/// Fraction of invested gold returned when a tower is sold.
pub const SELL_REFUND_RATIO: f64 = 0.6;

/// Flat part of the wave-clear bonus.
pub const WAVE_BONUS_BASE: u32 = 20;

/// Per-wave part of the wave-clear bonus (`base + wave * per_wave`).
pub const WAVE_BONUS_PER_WAVE: u32 = 5;

/// Bonus for starting the next wave while the break timer is still running.
pub const EARLY_START_BONUS: u32 = 10;

/// Break between waves (seconds).
pub const WAVE_BREAK_SECS: f64 = 10.0;

/// Lives lost when a regular enemy reaches the base.
pub const LEAK_PENALTY: i32 = 1;

/// Lives lost when a boss reaches the base.
pub const BOSS_LEAK_PENALTY: i32 = 5;

// --- Waves ---

/// How long the "Wave N" banner stays up after a wave starts (seconds).
pub const WAVE_BANNER_SECS: f64 = 2.0;

/// Delay before the first spawn of a freshly started wave (seconds).
pub const WAVE_FIRST_SPAWN_DELAY: f64 = 0.5;

/// Per-wave enemy HP growth (`hp = base * (1 + growth * (wave - 1))`).
pub const HP_GROWTH_PER_WAVE: f64 = 0.03;

/// Each regular spawn entry may swap with one of this many preceding entries.
pub const SPAWN_SHUFFLE_WINDOW: u32 = 3;

// --- Combat ---

/// Damage multiplier applied to hits on shielded enemies (30% reduction).
pub const SHIELD_DAMAGE_FACTOR: f64 = 0.7;

/// Minimum damage of an armored hit.
pub const MIN_ARMORED_DAMAGE: f64 = 1.0;

/// Fraction of primary damage dealt by each chain jump.
pub const CHAIN_DAMAGE_FACTOR: f64 = 0.6;

/// Fraction of primary damage dealt to enemies caught in a splash.
pub const SPLASH_DAMAGE_FACTOR: f64 = 0.5;

/// Healers pulse once per this many seconds.
pub const HEAL_PULSE_SECS: f64 = 1.0;

/// Highest tower level (0-indexed).
pub const MAX_TOWER_LEVEL: u8 = 2;

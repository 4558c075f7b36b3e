//! Combat and status rules for RAMPART.
//!
//! Damage resolution, status effects, path stepping and target selection.
//! Pure functions over plain component data; the simulation crate owns the
//! world and decides when each rule runs.

pub mod damage;
pub mod movement;
pub mod status;
pub mod targeting;

pub use rampart_core as core;

#[cfg(test)]
mod tests;

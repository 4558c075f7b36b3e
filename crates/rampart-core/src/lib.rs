//! Core types and definitions for the RAMPART tower-defense simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, catalog tables, the map grid, components, commands, errors,
//! state snapshots, events, and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod catalog;
pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod errors;
pub mod events;
pub mod map;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;

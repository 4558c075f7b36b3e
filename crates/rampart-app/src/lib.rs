//! RAMPART application shell.
//!
//! Hosts the simulation on a real-time game loop thread, loads TOML
//! configuration, and provides the greedy autoplay driver used by the
//! `rampart` binary.

pub mod autoplay;
pub mod config;
pub mod game_loop;
pub mod state;

pub use rampart_core as core;

//! State shared between the game loop thread and its callers.

use std::sync::{Arc, Mutex};

use rampart_core::commands::PlayerCommand;
use rampart_core::state::GameStateSnapshot;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot written by the game loop after every frame.
/// `None` until the first frame has run.
pub type SharedSnapshot = Arc<Mutex<Option<GameStateSnapshot>>>;

pub fn shared_snapshot() -> SharedSnapshot {
    Arc::new(Mutex::new(None))
}

/// Clone of the latest snapshot, if any frame has run and the lock is healthy.
pub fn latest(snapshot: &SharedSnapshot) -> Option<GameStateSnapshot> {
    snapshot.lock().ok().and_then(|guard| guard.clone())
}

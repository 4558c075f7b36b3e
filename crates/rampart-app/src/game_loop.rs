//! Game loop thread: runs the simulation engine at 60Hz and publishes snapshots.
//!
//! The engine is created inside this thread so it never crosses a thread
//! boundary. Commands arrive via `mpsc` channel. The measured frame delta is
//! handed to the engine, which caps it and applies the game speed.

use std::sync::mpsc;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use rampart_core::config::SimConfig;
use rampart_core::constants::TICK_RATE;
use rampart_core::state::GameStateSnapshot;
use rampart_sim::SimulationEngine;

use crate::state::{GameLoopCommand, SharedSnapshot};

/// Nominal duration of one frame.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender; dropping it or sending `Shutdown` ends the loop.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: SharedSnapshot,
) -> std::io::Result<mpsc::Sender<GameLoopCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    std::thread::Builder::new()
        .name("rampart-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot);
        })?;

    Ok(cmd_tx)
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    info!(seed = config.seed, "game loop started");
    let mut engine = SimulationEngine::new(config);
    let mut last_frame = Instant::now();
    let mut next_tick_time = last_frame;

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!(tick = engine.time().tick, "game loop stopped");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance by the real time since the last frame
        let now = Instant::now();
        let frame_dt = now.duration_since(last_frame).as_secs_f64();
        last_frame = now;
        let snapshot = engine.advance(frame_dt);

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until the next frame
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            debug!(behind = ?(now - next_tick_time), "frame schedule reset");
            next_tick_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{latest, shared_snapshot};
    use rampart_core::commands::PlayerCommand;
    use rampart_core::enums::GamePhase;

    fn wait_for(
        shared: &SharedSnapshot,
        mut done: impl FnMut(&GameStateSnapshot) -> bool,
    ) -> GameStateSnapshot {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(snapshot) = latest(shared) {
                if done(&snapshot) {
                    return snapshot;
                }
            }
            assert!(Instant::now() < deadline, "game loop did not reach expected state");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.666ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }

    #[test]
    fn test_loop_publishes_and_applies_commands() {
        let shared = shared_snapshot();
        let tx = spawn_game_loop(SimConfig::default(), shared.clone()).unwrap();

        let menu = wait_for(&shared, |_| true);
        assert_eq!(menu.phase, GamePhase::Menu);
        assert_eq!(menu.time.tick, 0);

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartSession))
            .unwrap();
        let playing = wait_for(&shared, |s| s.phase == GamePhase::Playing && s.time.tick > 3);
        assert!(playing.time.elapsed_secs > 0.0);
        assert!(playing.wave.break_remaining_secs < 10.0);

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::SetPaused {
            paused: true,
        }))
        .unwrap();
        let paused = wait_for(&shared, |s| s.phase == GamePhase::Paused);
        std::thread::sleep(Duration::from_millis(50));
        let later = wait_for(&shared, |_| true);
        assert_eq!(later.time.tick, paused.time.tick);

        tx.send(GameLoopCommand::Shutdown).unwrap();
    }

    #[test]
    fn test_loop_exits_when_sender_dropped() {
        let shared = shared_snapshot();
        let tx = spawn_game_loop(SimConfig::default(), shared.clone()).unwrap();
        wait_for(&shared, |_| true);
        drop(tx);
        // A dead loop stops refreshing the snapshot.
        std::thread::sleep(Duration::from_millis(50));
        *shared.lock().unwrap() = None;
        std::thread::sleep(Duration::from_millis(50));
        assert!(latest(&shared).is_none());
    }
}

//! rampart: headless RAMPART runner.
//!
//! Usage:
//!   rampart [--config rampart.toml] [--seed N] [--max-ticks N]
//!   rampart --realtime SECS [--config rampart.toml] [--seed N]

use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rampart_app::autoplay::{run_autoplay, Autopilot};
use rampart_app::config::load_config;
use rampart_app::game_loop::{spawn_game_loop, TICK_DURATION};
use rampart_app::state::{latest, shared_snapshot, GameLoopCommand};
use rampart_core::config::SimConfig;
use rampart_core::enums::GamePhase;
use rampart_core::map::MapGrid;

/// Default cap on simulated frames: one hour of play at 60Hz.
const DEFAULT_MAX_TICKS: u64 = 60 * 60 * 60;

struct Options {
    config: Option<PathBuf>,
    seed: Option<u64>,
    max_ticks: u64,
    realtime_secs: Option<u64>,
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| matches!(a.as_str(), "help" | "--help" | "-h")) {
        print_usage();
        return;
    }
    let options = match parse_options(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            print_usage();
            process::exit(1);
        }
    };

    let mut config = match &options.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(err) => {
                error!(error = %err, "config load failed");
                process::exit(1);
            }
        },
        None => SimConfig::default(),
    };
    if let Some(seed) = options.seed {
        config.seed = seed;
    }

    match options.realtime_secs {
        Some(secs) => run_realtime(config, Duration::from_secs(secs)),
        None => {
            let summary = run_autoplay(config, options.max_ticks);
            match serde_json::to_string_pretty(&summary) {
                Ok(json) => println!("{json}"),
                Err(err) => {
                    error!(error = %err, "failed to encode summary");
                    process::exit(1);
                }
            }
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn print_usage() {
    eprintln!(
        "rampart: headless RAMPART runner\n\
         \n\
           --config <path>    TOML file with SimConfig overrides\n\
           --seed <N>         Spawn shuffle seed (overrides the config)\n\
           --max-ticks <N>    Stop autoplay after N frames (default: {DEFAULT_MAX_TICKS})\n\
           --realtime <secs>  Drive the real-time game loop for up to secs seconds\n"
    );
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        config: None,
        seed: None,
        max_ticks: DEFAULT_MAX_TICKS,
        realtime_secs: None,
    };
    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let mut value = || {
            iter.next()
                .ok_or_else(|| format!("Missing value for {flag}"))
        };
        match flag.as_str() {
            "--config" => options.config = Some(PathBuf::from(value()?)),
            "--seed" => options.seed = Some(parse_number(flag, value()?)?),
            "--max-ticks" => options.max_ticks = parse_number(flag, value()?)?,
            "--realtime" => options.realtime_secs = Some(parse_number(flag, value()?)?),
            other => return Err(format!("Unknown argument: {other}")),
        }
    }
    Ok(options)
}

fn parse_number(flag: &str, raw: &str) -> Result<u64, String> {
    raw.parse()
        .map_err(|_| format!("Invalid value for {flag}: {raw}"))
}

/// Play on the real-time loop, feeding autopilot commands through the channel.
fn run_realtime(config: SimConfig, limit: Duration) {
    let shared = shared_snapshot();
    let tx = match spawn_game_loop(config, shared.clone()) {
        Ok(tx) => tx,
        Err(err) => {
            error!(error = %err, "failed to spawn game loop");
            process::exit(1);
        }
    };
    let map = MapGrid::new();
    let pilot = Autopilot::new(&map);
    let started = Instant::now();
    let mut last_tick = None;

    while started.elapsed() < limit {
        std::thread::sleep(TICK_DURATION);
        let Some(snapshot) = latest(&shared) else {
            continue;
        };
        // Only act on fresh frames so a command is not sent twice.
        if last_tick == Some(snapshot.time.tick) && snapshot.phase == GamePhase::Playing {
            continue;
        }
        last_tick = Some(snapshot.time.tick);

        if matches!(snapshot.phase, GamePhase::Win | GamePhase::Lose) {
            info!(phase = ?snapshot.phase, wave = snapshot.wave.current, lives = snapshot.lives, "session over");
            break;
        }
        // Tower occupancy comes from the snapshot; the loop owns the real map.
        let mut view = map.clone();
        for tower in &snapshot.towers {
            view.occupy(tower.cell);
        }
        if let Some(command) = pilot.next_command(&snapshot, &view) {
            if tx.send(GameLoopCommand::PlayerCommand(command)).is_err() {
                break;
            }
        }
    }

    let _ = tx.send(GameLoopCommand::Shutdown);
    if let Some(snapshot) = latest(&shared) {
        info!(
            wave = snapshot.wave.current,
            lives = snapshot.lives,
            gold = snapshot.gold,
            elapsed = snapshot.time.elapsed_secs,
            "realtime run finished"
        );
    }
}

//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, the map, the economy and the
//! wave script position. It validates and applies player commands, runs all
//! systems in a fixed order, and produces `GameStateSnapshot`s. Completely
//! headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use rampart_core::catalog;
use rampart_core::commands::PlayerCommand;
use rampart_core::components::Enemy;
use rampart_core::config::SimConfig;
use rampart_core::constants::*;
use rampart_core::enums::*;
use rampart_core::errors::CommandError;
use rampart_core::events::GameEvent;
use rampart_core::map::MapGrid;
use rampart_core::state::GameStateSnapshot;
#[cfg(test)]
use rampart_core::types::Position;
use rampart_core::types::{clamp, GridCell, SimTime};

#[cfg(test)]
use crate::armament::Projectile;
use crate::armament::Tower;
use crate::session::{Economy, WaveProgress};
use crate::systems;
use crate::systems::snapshot::SessionView;
use crate::systems::wave_spawner::SpawnQueue;
use crate::world_setup::{self, SpawnCounters};

/// The simulation engine. Owns the ECS world and all session state.
pub struct SimulationEngine {
    config: SimConfig,
    world: World,
    map: MapGrid,
    time: SimTime,
    phase: GamePhase,
    game_speed: GameSpeed,
    rng: ChaCha8Rng,
    counters: SpawnCounters,
    economy: Economy,
    waves: WaveProgress,
    spawn_queue: SpawnQueue,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Create a new engine in the menu phase.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            map: MapGrid::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            game_speed: config.game_speed,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            counters: SpawnCounters::default(),
            economy: Economy::new(&config),
            waves: WaveProgress::default(),
            spawn_queue: SpawnQueue::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            config,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one nominal tick (`DT`).
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.advance(DT)
    }

    /// Advance the simulation by a measured frame delta.
    ///
    /// Queued commands are applied first. The delta is clamped to
    /// `[0, MAX_FRAME_DT]` and scaled by the game speed. Outside the Playing
    /// phase nothing is simulated.
    pub fn advance(&mut self, frame_dt: f64) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Playing {
            let dt = clamp(frame_dt, 0.0, MAX_FRAME_DT) * self.game_speed.multiplier();
            self.run_systems(dt);
            self.time.advance(dt);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.session_view(), events)
    }

    /// Current state without advancing. Pending events stay queued for the
    /// next tick.
    pub fn snapshot(&self) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(&self.world, &self.session_view(), Vec::new())
    }

    /// Validate and apply a command immediately.
    ///
    /// Rejections leave the session untouched. Wave, speed and session
    /// commands never fail; they are ignored when they do not apply.
    pub fn execute(&mut self, command: PlayerCommand) -> Result<(), CommandError> {
        match command {
            PlayerCommand::PlaceTower { kind, cell } => self.place_tower(kind, cell),
            PlayerCommand::UpgradeTower { cell } => self.upgrade_tower(cell),
            PlayerCommand::SellTower { cell } => self.sell_tower(cell),
            PlayerCommand::SetTargetPriority { cell, priority } => {
                self.with_tower(cell, |tower| tower.priority = priority)
            }
            PlayerCommand::CycleTargetPriority { cell } => {
                self.with_tower(cell, |tower| tower.priority = tower.priority.next())
            }
            PlayerCommand::StartNextWave => {
                if self.phase == GamePhase::Playing && self.waves.in_break() {
                    self.start_next_wave();
                }
                Ok(())
            }
            PlayerCommand::SetGameSpeed { speed } => {
                self.game_speed = speed;
                Ok(())
            }
            PlayerCommand::ToggleGameSpeed => {
                self.game_speed = self.game_speed.toggled();
                Ok(())
            }
            PlayerCommand::SetPaused { paused } => {
                match (self.phase, paused) {
                    (GamePhase::Playing, true) => self.set_phase(GamePhase::Paused),
                    (GamePhase::Paused, false) => self.set_phase(GamePhase::Playing),
                    _ => {}
                }
                Ok(())
            }
            PlayerCommand::StartSession => {
                match self.phase {
                    GamePhase::Menu => self.begin_play(),
                    GamePhase::Win | GamePhase::Lose => {
                        self.reset();
                        self.begin_play();
                    }
                    GamePhase::Playing | GamePhase::Paused => {}
                }
                Ok(())
            }
            PlayerCommand::ResetSession => {
                self.reset();
                Ok(())
            }
        }
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn gold(&self) -> u32 {
        self.economy.gold
    }

    pub fn lives(&self) -> i32 {
        self.economy.lives
    }

    pub fn game_speed(&self) -> GameSpeed {
        self.game_speed
    }

    pub fn waves(&self) -> &WaveProgress {
        &self.waves
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn map(&self) -> &MapGrid {
        &self.map
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Entity of the tower standing on `cell`.
    pub fn tower_at(&self, cell: GridCell) -> Option<Entity> {
        self.world
            .query::<&Tower>()
            .iter()
            .find(|(_, tower)| tower.cell == cell)
            .map(|(entity, _)| entity)
    }

    /// Spawn an enemy parked on a path waypoint (for tests).
    #[cfg(test)]
    pub fn spawn_enemy_at_waypoint(&mut self, kind: EnemyKind, index: usize) -> Entity {
        let at = self.map.waypoints()[index];
        let entity = world_setup::spawn_enemy(
            &mut self.world,
            &mut self.counters,
            kind,
            self.waves.current.max(1),
            at,
        );
        if let Ok(mut follower) = self
            .world
            .get::<&mut rampart_core::components::PathFollower>(entity)
        {
            follower.waypoint_index = index;
        }
        entity
    }

    /// Hit an enemy outside the tower pipeline (for tests).
    #[cfg(test)]
    pub fn hit_enemy(&mut self, entity: Entity, amount: f64) -> Option<f64> {
        systems::strike(&mut self.world, entity, amount, false, &mut self.events)
    }

    /// Launch a projectile outside the tower pipeline (for tests).
    #[cfg(test)]
    pub fn launch_projectile(&mut self, projectile: Projectile, from: Position) -> Entity {
        world_setup::spawn_projectile(&mut self.world, &mut self.counters, projectile, from)
    }

    /// Overwrite an enemy's status effects (for tests).
    #[cfg(test)]
    pub fn set_status(&mut self, entity: Entity, status: rampart_core::components::StatusEffects) {
        if let Ok(mut current) = self.world.get::<&mut rampart_core::components::StatusEffects>(entity) {
            *current = status;
        }
    }

    #[cfg(test)]
    pub fn set_gold(&mut self, gold: u32) {
        self.economy.gold = gold;
    }

    #[cfg(test)]
    pub fn set_lives(&mut self, lives: i32) {
        self.economy.lives = lives;
    }

    /// Jump the wave script so that `wave` is the latest started wave.
    #[cfg(test)]
    pub fn set_current_wave(&mut self, wave: u32) {
        self.waves.current = wave;
    }

    #[cfg(test)]
    pub fn spawn_queue(&self) -> &SpawnQueue {
        &self.spawn_queue
    }

    #[cfg(test)]
    pub fn clear_spawn_queue(&mut self) {
        self.spawn_queue.clear();
    }

    fn session_view(&self) -> SessionView<'_> {
        SessionView {
            time: self.time,
            phase: self.phase,
            game_speed: self.game_speed,
            economy: &self.economy,
            waves: &self.waves,
            spawn_queue: &self.spawn_queue,
            config: &self.config,
        }
    }

    /// Process all queued commands. Rejections become events.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(reason) = self.execute(command) {
                debug!(%reason, "queued command rejected");
                self.events.push(GameEvent::CommandRejected { reason });
            }
        }
    }

    fn place_tower(&mut self, kind: TowerKind, cell: GridCell) -> Result<(), CommandError> {
        self.require_build_phase()?;
        let def = kind.definition();
        if def.unlock_wave > self.waves.unlock_horizon() {
            return Err(CommandError::LockedTower {
                kind,
                unlock_wave: def.unlock_wave,
            });
        }
        if !self.map.can_build(cell) {
            return Err(CommandError::CellBlocked { cell });
        }
        if !self.economy.try_spend(def.cost) {
            return Err(CommandError::InsufficientFunds {
                needed: def.cost,
                available: self.economy.gold,
            });
        }

        self.map.occupy(cell);
        world_setup::spawn_tower(&mut self.world, &mut self.counters, kind, cell);
        debug!(?kind, %cell, gold = self.economy.gold, "tower placed");
        self.events.push(GameEvent::TowerPlaced { kind, cell });
        Ok(())
    }

    fn upgrade_tower(&mut self, cell: GridCell) -> Result<(), CommandError> {
        self.require_build_phase()?;
        let entity = self
            .tower_at(cell)
            .ok_or(CommandError::TowerNotFound { cell })?;
        let mut tower = self
            .world
            .get::<&mut Tower>(entity)
            .map_err(|_| CommandError::TowerNotFound { cell })?;

        let cost = tower.upgrade_cost().ok_or(CommandError::MaxLevel)?;
        if !self.economy.try_spend(cost) {
            return Err(CommandError::InsufficientFunds {
                needed: cost,
                available: self.economy.gold,
            });
        }
        tower.upgrade();
        let level = tower.level;
        drop(tower);

        debug!(%cell, level, gold = self.economy.gold, "tower upgraded");
        self.events.push(GameEvent::TowerUpgraded { cell, level });
        Ok(())
    }

    fn sell_tower(&mut self, cell: GridCell) -> Result<(), CommandError> {
        self.require_build_phase()?;
        let entity = self
            .tower_at(cell)
            .ok_or(CommandError::TowerNotFound { cell })?;
        let refund = self
            .world
            .get::<&Tower>(entity)
            .map(|tower| tower.sell_value(self.config.sell_refund_ratio))
            .map_err(|_| CommandError::TowerNotFound { cell })?;

        let _ = self.world.despawn(entity);
        self.map.release(cell);
        self.economy.credit(refund);
        debug!(%cell, refund, gold = self.economy.gold, "tower sold");
        self.events.push(GameEvent::TowerSold { cell, refund });
        Ok(())
    }

    fn with_tower(
        &mut self,
        cell: GridCell,
        apply: impl FnOnce(&mut Tower),
    ) -> Result<(), CommandError> {
        self.require_build_phase()?;
        let entity = self
            .tower_at(cell)
            .ok_or(CommandError::TowerNotFound { cell })?;
        let mut tower = self
            .world
            .get::<&mut Tower>(entity)
            .map_err(|_| CommandError::TowerNotFound { cell })?;
        apply(&mut *tower);
        Ok(())
    }

    fn require_build_phase(&self) -> Result<(), CommandError> {
        if self.phase.accepts_build_commands() {
            Ok(())
        } else {
            Err(CommandError::NotPlaying)
        }
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            info!(from = ?self.phase, to = ?phase, "phase changed");
            self.phase = phase;
            self.events.push(GameEvent::PhaseChanged { phase });
        }
    }

    fn begin_play(&mut self) {
        self.waves.break_timer = self.config.wave_break_secs;
        self.set_phase(GamePhase::Playing);
    }

    /// Discard the session and return to the menu.
    fn reset(&mut self) {
        self.world.clear();
        self.map = MapGrid::new();
        self.time = SimTime::default();
        self.game_speed = self.config.game_speed;
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.counters = SpawnCounters::default();
        self.economy = Economy::new(&self.config);
        self.waves = WaveProgress::default();
        self.spawn_queue = SpawnQueue::default();
        self.despawn_buffer.clear();
        self.events.clear();
        self.set_phase(GamePhase::Menu);
    }

    fn start_next_wave(&mut self) {
        if !self.waves.has_more_waves() {
            return;
        }
        if self.waves.break_timer > 0.0 {
            let gold = self.config.early_start_bonus;
            self.economy.credit(gold);
            self.events.push(GameEvent::EarlyStartBonus { gold });
        }

        self.waves.current += 1;
        self.waves.active = true;
        self.waves.banner_timer = WAVE_BANNER_SECS;
        let wave = self.waves.current;
        if let Some(groups) = catalog::wave(wave) {
            self.spawn_queue = SpawnQueue::for_wave(groups, &mut self.rng);
        }

        let boss = catalog::is_boss_wave(wave);
        info!(wave, boss, spawns = self.spawn_queue.len(), "wave started");
        self.events.push(GameEvent::WaveStarted { wave, boss });
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        // 1. Wave banner and break countdown
        if self.waves.banner_timer > 0.0 {
            self.waves.banner_timer -= dt;
        }
        if self.waves.in_break() {
            self.waves.break_timer -= dt;
            if self.waves.break_timer <= 0.0 {
                self.start_next_wave();
            }
        }
        // 2. Spawning
        if self.waves.active {
            let spawn_point = self.map.spawn_point();
            systems::wave_spawner::run(
                &mut self.world,
                &mut self.counters,
                &mut self.spawn_queue,
                self.waves.current,
                spawn_point,
                dt,
            );
        }
        // 3. Shield auras
        systems::auras::run(&mut self.world);
        // 4. Enemy status, heal pulses, movement
        systems::enemies::run(&mut self.world, self.map.waypoints(), dt);
        // 5. Settle leaks and deaths from the enemy pass
        self.reconcile();
        // 6. Towers
        systems::towers::run(&mut self.world, &mut self.counters, &mut self.events, dt);
        // 7. Projectiles
        systems::projectiles::run(&mut self.world, &mut self.despawn_buffer, &mut self.events, dt);
        // 8. Settle kills from towers and projectiles in the same tick
        self.reconcile();
        // 9. Wave completion, win and loss
        self.check_wave_complete();
        self.check_lose();
    }

    fn reconcile(&mut self) {
        let settlement =
            systems::reconcile::run(&mut self.world, &mut self.despawn_buffer, &mut self.events);
        self.economy.credit(settlement.gold);
        self.economy.lives -= settlement.lives_lost;
    }

    fn check_wave_complete(&mut self) {
        if !self.waves.active || !self.spawn_queue.is_empty() {
            return;
        }
        let enemies_left = self
            .world
            .query::<&Enemy>()
            .iter()
            .count();
        if enemies_left > 0 {
            return;
        }

        let wave = self.waves.current;
        let bonus = self.config.wave_bonus(wave);
        self.waves.active = false;
        self.economy.credit(bonus);
        info!(wave, bonus, gold = self.economy.gold, "wave cleared");
        self.events.push(GameEvent::WaveCleared { wave, bonus });

        if self.waves.has_more_waves() {
            self.waves.break_timer = self.config.wave_break_secs;
        } else {
            info!(lives = self.economy.lives, "all waves cleared");
            self.set_phase(GamePhase::Win);
        }
    }

    fn check_lose(&mut self) {
        if self.economy.lives <= 0 {
            self.economy.lives = 0;
            if self.phase != GamePhase::Lose {
                info!(wave = self.waves.current, "base overrun");
            }
            self.set_phase(GamePhase::Lose);
        }
    }
}

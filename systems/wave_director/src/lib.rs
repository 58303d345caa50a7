#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic wave direction system that schedules enemy spawns.
//!
//! The director owns the wave progression state machine: it opens waves,
//! meters out spawn commands on a fixed cadence, detects completion once the
//! field has drained, and requests the payout for the cleared wave.

use std::time::Duration;

use castle_defence_core::{Command, EnemyKind, Event, GamePhase};

const RNG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const RNG_INCREMENT: u64 = 1;

const DEFAULT_BASE_ENEMIES: u32 = 3;
const DEFAULT_SPAWN_INTERVAL: Duration = Duration::from_secs(2);
const DEFAULT_RNG_SEED: u64 = 0x51c2_a7f8_33d9_6e04;

/// Configuration parameters required to construct the wave director.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    base_enemies: u32,
    spawn_interval: Duration,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided cadence and seed.
    #[must_use]
    pub const fn new(base_enemies: u32, spawn_interval: Duration, rng_seed: u64) -> Self {
        Self {
            base_enemies,
            spawn_interval,
            rng_seed,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_enemies: DEFAULT_BASE_ENEMIES,
            spawn_interval: DEFAULT_SPAWN_INTERVAL,
            rng_seed: DEFAULT_RNG_SEED,
        }
    }
}

/// Pure system that drives wave progression while the session is playing.
#[derive(Debug)]
pub struct WaveDirector {
    base_enemies: u32,
    spawn_interval: Duration,
    rng_seed: u64,
    current_wave: u32,
    enemies_spawned: u32,
    enemies_to_spawn: u32,
    spawn_accumulator: Duration,
    wave_in_progress: bool,
    rng_state: u64,
}

impl WaveDirector {
    /// Creates a new wave director using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            base_enemies: config.base_enemies,
            spawn_interval: config.spawn_interval,
            rng_seed: config.rng_seed,
            current_wave: 1,
            enemies_spawned: 0,
            enemies_to_spawn: config.base_enemies,
            spawn_accumulator: Duration::ZERO,
            wave_in_progress: false,
            rng_state: config.rng_seed,
        }
    }

    /// Wave the director is currently running or about to open.
    #[must_use]
    pub const fn current_wave(&self) -> u32 {
        self.current_wave
    }

    /// Consumes events and the live enemy count to emit wave commands.
    ///
    /// A wave completes only after every scheduled enemy spawned, no spawn
    /// command was emitted on this call, and the field holds no live enemies.
    pub fn handle(
        &mut self,
        events: &[Event],
        phase: GamePhase,
        live_enemies: usize,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            if matches!(event, Event::GameStarted) {
                self.reset();
            }
        }

        if phase != GamePhase::Playing {
            return;
        }

        let mut accumulated = Duration::ZERO;
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                accumulated = accumulated.saturating_add(*dt);
            }
        }

        if accumulated.is_zero() {
            return;
        }

        if !self.wave_in_progress {
            self.wave_in_progress = true;
            self.enemies_spawned = 0;
            self.enemies_to_spawn = self.base_enemies + self.current_wave;
            // The first enemy of a wave walks out immediately.
            self.spawn_accumulator = self.spawn_interval;
            out.push(Command::BeginWave {
                enemies_to_spawn: self.enemies_to_spawn,
            });
        }

        self.spawn_accumulator = self.spawn_accumulator.saturating_add(accumulated);

        let mut spawned_now = 0;
        while self.spawn_accumulator >= self.spawn_interval
            && self.enemies_spawned < self.enemies_to_spawn
        {
            self.spawn_accumulator -= self.spawn_interval;
            out.push(Command::SpawnEnemy {
                kind: self.next_kind(),
            });
            self.enemies_spawned += 1;
            spawned_now += 1;
        }

        if spawned_now == 0
            && self.enemies_spawned >= self.enemies_to_spawn
            && live_enemies == 0
        {
            out.push(Command::CompleteWave);
            self.current_wave += 1;
            self.wave_in_progress = false;
        }
    }

    fn reset(&mut self) {
        self.current_wave = 1;
        self.enemies_spawned = 0;
        self.enemies_to_spawn = self.base_enemies;
        self.spawn_accumulator = Duration::ZERO;
        self.wave_in_progress = false;
        self.rng_state = self.rng_seed;
    }

    fn next_kind(&mut self) -> EnemyKind {
        let value = self.advance_rng();
        let index = (value % EnemyKind::ALL.len() as u64) as usize;
        EnemyKind::ALL[index]
    }

    fn advance_rng(&mut self) -> u64 {
        self.rng_state = self
            .rng_state
            .wrapping_mul(RNG_MULTIPLIER)
            .wrapping_add(RNG_INCREMENT);
        self.rng_state
    }
}

impl Default for WaveDirector {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

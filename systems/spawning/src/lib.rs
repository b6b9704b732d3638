#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for emitting enemy spawn commands.

mod difficulty;
mod lanes;

use std::time::Duration;

use lane_defence_core::{Command, EnemyProfile, Event, LaneIndex, Tint, WaveNumber};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub use difficulty::Difficulty;
pub use lanes::LaneLayout;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of parallel lanes.
    pub lanes: u32,
    /// Vertical distance between adjacent lanes.
    pub lane_height: f32,
    /// Horizontal position where enemies appear.
    pub spawn_edge_x: f32,
    /// Delay between regular spawns in the first wave, in seconds.
    pub base_interval_secs: f32,
    /// Reduction of the spawn delay per wave, in seconds.
    pub interval_decrease_secs: f32,
    /// Lowest spawn delay any wave may use, in seconds.
    pub minimum_interval_secs: f32,
    /// Regular enemy speed in the first wave.
    pub base_speed: f32,
    /// Speed added to regular enemies per wave.
    pub speed_increase: f32,
    /// Regular enemy health in the first wave.
    pub base_health: u32,
    /// Health added to regular enemies per wave.
    pub health_increase: u32,
    /// A boss appears on every wave divisible by this value; zero disables bosses.
    pub boss_interval: u32,
    /// Boss health.
    pub boss_health: u32,
    /// Boss speed.
    pub boss_speed: f32,
    /// Boss sprite scale.
    pub boss_scale: f32,
    /// Boss sprite tint.
    pub boss_tint: Tint,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lanes: 5,
            lane_height: 1.0,
            spawn_edge_x: 10.0,
            base_interval_secs: 5.0,
            interval_decrease_secs: 0.5,
            minimum_interval_secs: 1.0,
            base_speed: 1.0,
            speed_increase: 0.1,
            base_health: 100,
            health_increase: 20,
            boss_interval: 3,
            boss_health: 1000,
            boss_speed: 0.5,
            boss_scale: 2.5,
            boss_tint: Tint::RED,
        }
    }
}

/// Pure system that deterministically emits spawn commands while spawning is enabled.
#[derive(Debug)]
pub struct Spawning {
    config: Config,
    layout: LaneLayout,
    difficulty: Difficulty,
    spawning: bool,
    accumulator: Duration,
    boss_spawned: bool,
    boss_active: bool,
    lane_warning_logged: bool,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration and seed.
    #[must_use]
    pub fn new(config: Config, rng_seed: u64) -> Self {
        let layout = LaneLayout::new(config.lanes, config.lane_height, config.spawn_edge_x);
        let difficulty = Difficulty::for_wave(&config, WaveNumber::FIRST);
        Self {
            config,
            layout,
            difficulty,
            spawning: false,
            accumulator: Duration::ZERO,
            boss_spawned: false,
            boss_active: false,
            lane_warning_logged: false,
            rng: ChaCha8Rng::seed_from_u64(rng_seed),
        }
    }

    /// Difficulty applied to the current wave.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Lane geometry used for spawn positions.
    #[must_use]
    pub const fn layout(&self) -> LaneLayout {
        self.layout
    }

    /// Reports whether the spawn timer is running.
    #[must_use]
    pub const fn is_spawning(&self) -> bool {
        self.spawning
    }

    /// Reports whether a boss currently reserves the top lane.
    #[must_use]
    pub const fn boss_active(&self) -> bool {
        self.boss_active
    }

    /// Consumes world events to emit spawn commands.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::WaveConfigured { wave } => self.configure(*wave),
                Event::SpawningStarted { wave } => {
                    if *wave != self.difficulty.wave {
                        self.configure(*wave);
                    }
                    self.start(out);
                }
                Event::SpawningStopped => {
                    self.spawning = false;
                    self.accumulator = Duration::ZERO;
                }
                Event::EnemyDied { boss: true, .. }
                | Event::EnemyBreachedCastle { boss: true, .. } => {
                    if self.boss_active {
                        debug!("boss gone, top lane released");
                    }
                    self.boss_active = false;
                }
                Event::EnemiesCleared { .. } => self.boss_active = false,
                Event::TimeAdvanced { dt } if self.spawning => {
                    self.accumulator = self.accumulator.saturating_add(*dt);
                    for _ in 0..self.resolve_spawn_attempts() {
                        self.spawn_regular(out);
                    }
                }
                _ => {}
            }
        }
    }

    fn configure(&mut self, wave: WaveNumber) {
        self.difficulty = Difficulty::for_wave(&self.config, wave);
        self.boss_spawned = false;
        self.boss_active = false;
        self.lane_warning_logged = false;
        info!(
            wave = wave.get(),
            interval_secs = self.difficulty.spawn_interval.as_secs_f32(),
            speed = self.difficulty.enemy_speed,
            health = self.difficulty.enemy_health,
            boss_wave = self.difficulty.boss_wave,
            "difficulty configured"
        );
    }

    fn start(&mut self, out: &mut Vec<Command>) {
        self.spawning = true;
        self.accumulator = Duration::ZERO;

        if self.difficulty.boss_wave && !self.boss_spawned {
            self.boss_spawned = true;
            self.boss_active = true;
            let profile = EnemyProfile {
                health: self.config.boss_health,
                speed: self.config.boss_speed,
                boss: true,
                scale: self.config.boss_scale,
                tint: Some(self.config.boss_tint),
            };
            debug!(wave = self.difficulty.wave.get(), "boss spawned");
            out.push(Command::SpawnEnemy {
                lane: LaneIndex::TOP,
                origin: self.layout.origin(LaneIndex::TOP),
                profile,
            });
        }

        self.spawn_regular(out);
    }

    fn resolve_spawn_attempts(&mut self) -> usize {
        let interval = self.difficulty.spawn_interval;
        if interval.is_zero() {
            return 0;
        }

        let mut attempts = 0;
        while self.accumulator >= interval {
            self.accumulator -= interval;
            attempts += 1;
        }
        attempts
    }

    fn spawn_regular(&mut self, out: &mut Vec<Command>) {
        let Some(lane) = self.select_lane() else {
            if !self.lane_warning_logged {
                self.lane_warning_logged = true;
                warn!(
                    lanes = self.layout.lane_count(),
                    "no lane free for regular spawn while boss is active"
                );
            }
            return;
        };

        out.push(Command::SpawnEnemy {
            lane,
            origin: self.layout.origin(lane),
            profile: EnemyProfile {
                health: self.difficulty.enemy_health,
                speed: self.difficulty.enemy_speed,
                boss: false,
                scale: 1.0,
                tint: None,
            },
        });
    }

    fn select_lane(&mut self) -> Option<LaneIndex> {
        let first = u32::from(self.boss_active);
        let lanes = self.layout.lane_count();
        if first >= lanes {
            return None;
        }
        Some(LaneIndex::new(self.rng.gen_range(first..lanes)))
    }
}

use std::time::Duration;

use lane_defence_core::WaveNumber;

use crate::Config;

/// Spawn parameters for a single wave.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Difficulty {
    /// Wave the parameters were computed for.
    pub wave: WaveNumber,
    /// Delay between regular spawns, never below the configured minimum.
    pub spawn_interval: Duration,
    /// Speed of regular enemies.
    pub enemy_speed: f32,
    /// Health of regular enemies.
    pub enemy_health: u32,
    /// Whether the wave spawns a boss.
    pub boss_wave: bool,
}

impl Difficulty {
    /// Computes the difficulty for `wave` in closed form, so repeated advances
    /// can never drift below the spawn interval floor.
    #[must_use]
    pub fn for_wave(config: &Config, wave: WaveNumber) -> Self {
        let steps = wave.elapsed();
        let interval = (config.base_interval_secs - config.interval_decrease_secs * steps as f32)
            .max(config.minimum_interval_secs);

        Self {
            wave,
            spawn_interval: Duration::try_from_secs_f32(interval).unwrap_or(Duration::ZERO),
            enemy_speed: config.base_speed + config.speed_increase * steps as f32,
            enemy_health: config
                .base_health
                .saturating_add(config.health_increase.saturating_mul(steps)),
            boss_wave: wave.is_boss_wave(config.boss_interval),
        }
    }
}

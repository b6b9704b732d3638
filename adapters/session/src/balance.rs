//! Balance file loading and validation.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lane_defence_system_combat as combat;
use lane_defence_system_spawning as spawning;
use lane_defence_system_waves as waves;
use lane_defence_world as world;

/// Every tunable number of a session, grouped by the crate that consumes it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Balance {
    /// Seed for lane selection.
    pub seed: u64,
    /// Castle, hero, and enemy tuning.
    pub world: world::Config,
    /// Lane layout and difficulty curve.
    pub spawning: spawning::Config,
    /// Attack gating.
    pub combat: combat::Config,
    /// Kill quotas and economy.
    pub waves: waves::Config,
    /// Presentation timers.
    pub presentation: PresentationConfig,
}

impl Default for Balance {
    fn default() -> Self {
        Self {
            seed: 0x4c61_6e65_4465_6600,
            world: world::Config::default(),
            spawning: spawning::Config::default(),
            combat: combat::Config::default(),
            waves: waves::Config::default(),
            presentation: PresentationConfig::default(),
        }
    }
}

/// Presentation timers that never affect gameplay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// Minimum time between footstep cues, in seconds.
    pub step_rate_secs: f32,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            step_rate_secs: 0.05,
        }
    }
}

/// Errors raised while loading or validating a [`Balance`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The balance file could not be read.
    #[error("failed to read balance file {path}: {source}")]
    Io {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The balance file is not valid TOML or does not match the schema.
    #[error("failed to parse balance file: {0}")]
    Parse(#[from] toml::de::Error),

    /// No lanes were configured.
    #[error("at least one lane is required")]
    NoLanes,

    /// The castle would start destroyed.
    #[error("castle maximum health must be positive")]
    NoCastleHealth,

    /// Bosses would never be scheduled.
    #[error("boss interval must be positive")]
    NoBossInterval,

    /// A duration, speed, or size was zero, negative, or not finite.
    #[error("`{field}` must be positive and finite, got {value}")]
    NotPositive {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Rejected value.
        value: f32,
    },

    /// A per-wave increment was negative or not finite.
    #[error("`{field}` must be non-negative and finite, got {value}")]
    Negative {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Rejected value.
        value: f32,
    },

    /// A position was not finite.
    #[error("`{field}` must be finite, got {value}")]
    NotFinite {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Rejected value.
        value: f32,
    },

    /// A damage or health value was zero.
    #[error("`{field}` must be greater than zero")]
    Zero {
        /// Dotted path of the offending field.
        field: &'static str,
    },

    /// The spawn interval floor sits above the starting interval.
    #[error("minimum spawn interval {minimum}s exceeds base interval {base}s")]
    FloorAboveBase {
        /// Configured floor.
        minimum: f32,
        /// Configured starting interval.
        base: f32,
    },
}

impl Balance {
    /// Parses and validates a balance file's contents.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let balance: Self = toml::from_str(contents)?;
        balance.validate()?;
        Ok(balance)
    }

    /// Reads, parses, and validates the balance file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Rejects values that would leave a subsystem unable to function.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let spawning = &self.spawning;
        if spawning.lanes == 0 {
            return Err(ConfigError::NoLanes);
        }
        if self.world.castle.max_health == 0 {
            return Err(ConfigError::NoCastleHealth);
        }
        if spawning.boss_interval == 0 {
            return Err(ConfigError::NoBossInterval);
        }
        non_zero("world.hero.base_damage", self.world.hero.base_damage)?;
        non_zero("spawning.base_health", spawning.base_health)?;
        non_zero("spawning.boss_health", spawning.boss_health)?;

        positive("spawning.lane_height", spawning.lane_height)?;
        positive("spawning.base_interval_secs", spawning.base_interval_secs)?;
        positive("spawning.minimum_interval_secs", spawning.minimum_interval_secs)?;
        positive("spawning.base_speed", spawning.base_speed)?;
        positive("spawning.boss_speed", spawning.boss_speed)?;
        positive("spawning.boss_scale", spawning.boss_scale)?;
        non_negative("spawning.interval_decrease_secs", spawning.interval_decrease_secs)?;
        non_negative("spawning.speed_increase", spawning.speed_increase)?;
        finite("spawning.spawn_edge_x", spawning.spawn_edge_x)?;
        if spawning.minimum_interval_secs > spawning.base_interval_secs {
            return Err(ConfigError::FloorAboveBase {
                minimum: spawning.minimum_interval_secs,
                base: spawning.base_interval_secs,
            });
        }

        let world = &self.world;
        finite("world.castle.edge_x", world.castle.edge_x)?;
        non_negative("world.castle.flash_secs", world.castle.flash_secs)?;
        positive("world.hero.speed", world.hero.speed)?;
        positive("world.hero.attack_range", world.hero.attack_range)?;
        positive("world.enemies.hurt_cooldown_secs", world.enemies.hurt_cooldown_secs)?;
        positive("world.enemies.hurt_stagger_secs", world.enemies.hurt_stagger_secs)?;
        positive("world.enemies.death_linger_secs", world.enemies.death_linger_secs)?;
        positive("world.enemies.body_radius", world.enemies.body_radius)?;

        positive("combat.attack_interval_secs", self.combat.attack_interval_secs)?;
        positive("combat.combo_reset_secs", self.combat.combo_reset_secs)?;
        positive("presentation.step_rate_secs", self.presentation.step_rate_secs)?;
        Ok(())
    }
}

fn non_zero(field: &'static str, value: u32) -> Result<(), ConfigError> {
    if value == 0 {
        Err(ConfigError::Zero { field })
    } else {
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

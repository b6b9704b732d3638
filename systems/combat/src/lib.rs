#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that turns attack input into hero swings and enemy damage commands.

mod resolver;

use std::time::Duration;

use glam::Vec2;
use lane_defence_core::{ComboStep, Command, EnemyId, EnemyView, Event, HeroSnapshot};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use resolver::CombatResolver;

/// Attack gating parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Time that must strictly pass between swings, in seconds.
    pub attack_interval_secs: f32,
    /// Idle gap after which the combo restarts from the first swing, in seconds.
    pub combo_reset_secs: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            attack_interval_secs: 0.25,
            combo_reset_secs: 1.0,
        }
    }
}

/// Hero combat system that gates swings and resolves their targets.
#[derive(Debug)]
pub struct Combat {
    attack_interval: Duration,
    combo_reset: Duration,
    since_last_attack: Duration,
    combo: Option<ComboStep>,
    resolver: CombatResolver,
}

impl Combat {
    /// Creates a combat system using the supplied configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            attack_interval: seconds(config.attack_interval_secs),
            combo_reset: seconds(config.combo_reset_secs),
            since_last_attack: Duration::ZERO,
            combo: None,
            resolver: CombatResolver::new(),
        }
    }

    /// Combo step of the most recent swing, if any.
    #[must_use]
    pub const fn combo(&self) -> Option<ComboStep> {
        self.combo
    }

    /// Time elapsed since the most recent swing.
    #[must_use]
    pub const fn since_last_attack(&self) -> Duration {
        self.since_last_attack
    }

    /// Advances the swing timer and, when `attack_pressed` is set and a swing is
    /// permitted, emits `Command::HeroAttack` followed by `Command::DamageEnemies`
    /// for every distinct live enemy returned by `candidates`.
    ///
    /// `candidates` receives the sword hitbox centre and radius and returns one
    /// handle per overlapping collider.
    pub fn handle<F>(
        &mut self,
        events: &[Event],
        attack_pressed: bool,
        hero: &HeroSnapshot,
        enemies: &EnemyView,
        candidates: F,
        out: &mut Vec<Command>,
    ) where
        F: FnOnce(Vec2, f32) -> Vec<EnemyId>,
    {
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => {
                    self.since_last_attack = self.since_last_attack.saturating_add(*dt);
                }
                Event::HeroReset { .. } => self.combo = None,
                _ => {}
            }
        }

        if !attack_pressed || !hero.attacking_enabled {
            return;
        }

        if self.since_last_attack <= self.attack_interval {
            return;
        }

        let combo = if self.since_last_attack > self.combo_reset {
            ComboStep::First
        } else {
            self.combo.map_or(ComboStep::First, ComboStep::next)
        };
        self.combo = Some(combo);
        self.since_last_attack = Duration::ZERO;

        out.push(Command::HeroAttack { combo });

        let hits = candidates(hero.sword_hitbox, hero.attack_range);
        let targets = self.resolver.resolve(&hits, enemies);
        debug!(
            combo = combo.ordinal(),
            colliders = hits.len(),
            targets = targets.len(),
            damage = hero.damage,
            "hero swing"
        );
        if targets.is_empty() {
            return;
        }

        out.push(Command::DamageEnemies {
            targets,
            amount: hero.damage,
        });
    }
}

impl Default for Combat {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

fn seconds(value: f32) -> Duration {
    Duration::try_from_secs_f32(value).unwrap_or(Duration::ZERO)
}

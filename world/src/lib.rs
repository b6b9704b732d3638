#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Lane Defence.

mod enemies;
mod health;
mod hero;

use std::time::Duration;

use glam::Vec2;
use lane_defence_core::{Command, EnemyId, Event, WaveNumber, WELCOME_BANNER};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use enemies::{Enemy, EnemyTuning, Progress, StrikeOutcome};
use hero::Hero;

pub use health::{DamageOutcome, HealthPool};

/// Tuning parameters for the authoritative world.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Castle health and geometry.
    pub castle: CastleConfig,
    /// Hero movement and damage.
    pub hero: HeroConfig,
    /// Enemy timing, colliders, and castle damage.
    pub enemies: EnemyConfig,
}

/// Castle tuning parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CastleConfig {
    /// Maximum and starting castle health.
    pub max_health: u32,
    /// Horizontal position of the castle edge; enemies at or past it breach.
    pub edge_x: f32,
    /// Duration of the flash shown after a castle health change, in seconds.
    pub flash_secs: f32,
}

impl Default for CastleConfig {
    fn default() -> Self {
        Self {
            max_health: 100,
            edge_x: -10.0,
            flash_secs: 0.2,
        }
    }
}

/// Hero tuning parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    /// Position the hero starts at and returns to on reset.
    pub spawn: Vec2,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Damage dealt per attack before upgrades.
    pub base_damage: u32,
    /// Damage added by each upgrade.
    pub upgrade_amount: u32,
    /// Sword hitbox offset relative to the hero when facing right.
    pub sword_offset: Vec2,
    /// Radius of the sword hitbox.
    pub attack_range: f32,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            spawn: Vec2::new(-6.0, 0.0),
            speed: 4.0,
            base_damage: 50,
            upgrade_amount: 25,
            sword_offset: Vec2::new(0.8, 0.0),
            attack_range: 0.5,
        }
    }
}

/// Enemy tuning parameters shared by every enemy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Damage dealt to the castle when an enemy breaches it.
    pub castle_damage: u32,
    /// Minimum time between hurt staggers, in seconds.
    pub hurt_cooldown_secs: f32,
    /// Time movement stays suspended after a stagger, in seconds.
    pub hurt_stagger_secs: f32,
    /// Time a dead enemy lingers before removal, in seconds.
    pub death_linger_secs: f32,
    /// Radius of the body collider before scaling.
    pub body_radius: f32,
    /// Half extents of the castle trigger box before scaling.
    pub trigger_half_extents: Vec2,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            castle_damage: 20,
            hurt_cooldown_secs: 0.5,
            hurt_stagger_secs: 0.25,
            death_linger_secs: 1.0,
            body_radius: 0.4,
            trigger_half_extents: Vec2::new(0.25, 0.5),
        }
    }
}

/// Kind of flash shown on the castle after a health change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlashKind {
    /// The castle took damage.
    Damage,
    /// The castle was healed.
    Heal,
}

#[derive(Clone, Copy, Debug)]
struct CastleFlash {
    kind: FlashKind,
    until: Duration,
}

/// Represents the authoritative Lane Defence world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    castle: HealthPool,
    castle_edge_x: f32,
    castle_damage: u32,
    flash_duration: Duration,
    flash: Option<CastleFlash>,
    hero: Hero,
    enemies: Vec<Enemy>,
    tuning: EnemyTuning,
    next_enemy_id: u32,
    wave: WaveNumber,
    spawning: bool,
    elapsed: Duration,
}

impl World {
    /// Creates a world using the default tuning.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Creates a world using the provided tuning.
    #[must_use]
    pub fn with_config(config: &Config) -> Self {
        Self {
            banner: WELCOME_BANNER,
            castle: HealthPool::new(config.castle.max_health),
            castle_edge_x: config.castle.edge_x,
            castle_damage: config.enemies.castle_damage,
            flash_duration: seconds(config.castle.flash_secs),
            flash: None,
            hero: Hero::new(&config.hero),
            enemies: Vec::new(),
            tuning: EnemyTuning::from_config(&config.enemies),
            next_enemy_id: 0,
            wave: WaveNumber::FIRST,
            spawning: false,
            elapsed: Duration::ZERO,
        }
    }

    fn flash(&mut self, kind: FlashKind) {
        if self.flash_duration.is_zero() {
            return;
        }
        self.flash = Some(CastleFlash {
            kind,
            until: self.elapsed.saturating_add(self.flash_duration),
        });
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.elapsed = self.elapsed.saturating_add(dt);
        out_events.push(Event::TimeAdvanced { dt });

        if let Some(from) = self.hero.advance(dt) {
            out_events.push(Event::HeroMoved {
                from,
                to: self.hero.snapshot().position,
            });
        }

        if self
            .flash
            .is_some_and(|flash| self.elapsed >= flash.until)
        {
            self.flash = None;
        }

        let now = self.elapsed;
        let mut breached = Vec::new();
        let mut expired = Vec::new();
        for enemy in &mut self.enemies {
            match enemy.advance(dt, now, self.castle_edge_x) {
                Progress::Breached => breached.push((enemy.id, enemy.lane, enemy.boss)),
                Progress::Expired => expired.push(enemy.id),
                Progress::Recovered => out_events.push(Event::EnemyRecovered { enemy: enemy.id }),
                Progress::Moved | Progress::Idle => {}
            }
        }

        if breached.is_empty() && expired.is_empty() {
            return;
        }

        self.enemies.retain(|enemy| {
            !expired.contains(&enemy.id) && !breached.iter().any(|(id, _, _)| *id == enemy.id)
        });

        for (enemy, lane, boss) in breached {
            debug!(enemy = enemy.get(), lane = lane.get(), boss, "enemy breached castle");
            out_events.push(Event::EnemyBreachedCastle {
                enemy,
                lane,
                boss,
                damage: self.castle_damage,
            });
            self.damage_castle(self.castle_damage, out_events);
        }

        for enemy in expired {
            out_events.push(Event::EnemyRemoved { enemy });
        }
    }

    fn damage_castle(&mut self, amount: u32, out_events: &mut Vec<Event>) {
        let outcome = self.castle.apply_damage(amount);
        self.flash(FlashKind::Damage);
        out_events.push(Event::CastleHealthChanged {
            change: outcome.change,
        });
        if outcome.died {
            info!("castle destroyed");
            out_events.push(Event::CastleDestroyed);
        }
    }

    fn damage_enemies(&mut self, targets: &[EnemyId], amount: u32, out_events: &mut Vec<Event>) {
        let now = self.elapsed;
        for target in targets {
            let Some(enemy) = self.enemies.iter_mut().find(|enemy| enemy.id == *target) else {
                continue;
            };

            match enemy.strike(amount, now, &self.tuning) {
                StrikeOutcome::Ignored => {}
                StrikeOutcome::Wounded { change } => {
                    out_events.push(Event::EnemyDamaged {
                        enemy: enemy.id,
                        amount,
                        change,
                    });
                }
                StrikeOutcome::Staggered { change } => {
                    out_events.push(Event::EnemyDamaged {
                        enemy: enemy.id,
                        amount,
                        change,
                    });
                    out_events.push(Event::EnemyHurt { enemy: enemy.id });
                }
                StrikeOutcome::Killed { change } => {
                    debug!(enemy = enemy.id.get(), boss = enemy.boss, "enemy killed");
                    out_events.push(Event::EnemyDamaged {
                        enemy: enemy.id,
                        amount,
                        change,
                    });
                    out_events.push(Event::EnemyDied {
                        enemy: enemy.id,
                        lane: enemy.lane,
                        boss: enemy.boss,
                    });
                }
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => world.tick(dt, out_events),
        Command::SetHeroMovement { axis } => world.hero.set_axis(axis),
        Command::SetHeroAttacking { enabled } => {
            if world.hero.set_attacking(enabled) {
                out_events.push(Event::HeroAttackingChanged { enabled });
            }
        }
        Command::HeroAttack { combo } => {
            let hero = world.hero.snapshot();
            if hero.attacking_enabled {
                out_events.push(Event::HeroAttacked {
                    combo,
                    damage: hero.damage,
                });
            }
        }
        Command::DamageEnemies { targets, amount } => {
            if world.hero.snapshot().attacking_enabled {
                world.damage_enemies(&targets, amount, out_events);
            } else {
                debug!(targets = targets.len(), "damage dropped while attacks are disabled");
            }
        }
        Command::UpgradeHeroDamage => {
            let (level, damage) = world.hero.upgrade();
            info!(level, damage, "hero damage upgraded");
            out_events.push(Event::HeroDamageUpgraded { level, damage });
        }
        Command::ResetHero => {
            world.hero.reset();
            out_events.push(Event::HeroReset {
                damage: world.hero.damage(),
            });
        }
        Command::HealCastle { amount } => {
            if let Some(change) = world.castle.apply_heal(amount) {
                world.flash(FlashKind::Heal);
                out_events.push(Event::CastleHealthChanged { change });
            }
        }
        Command::ResetCastle => {
            let change = world.castle.restore();
            world.flash = None;
            out_events.push(Event::CastleHealthChanged { change });
        }
        Command::SpawnEnemy {
            lane,
            origin,
            profile,
        } => {
            if !world.spawning {
                debug!(lane = lane.get(), "spawn dropped while spawning is stopped");
                return;
            }

            let id = EnemyId::new(world.next_enemy_id);
            world.next_enemy_id = world.next_enemy_id.wrapping_add(1);
            world.enemies.push(Enemy::spawn(id, lane, origin, profile));
            debug!(
                enemy = id.get(),
                lane = lane.get(),
                boss = profile.boss,
                health = profile.health,
                speed = profile.speed,
                "enemy spawned"
            );
            out_events.push(Event::EnemySpawned {
                enemy: id,
                lane,
                boss: profile.boss,
            });
        }
        Command::ClearEnemies => {
            let count = world.enemies.len();
            world.enemies.clear();
            debug!(count, "enemies cleared");
            out_events.push(Event::EnemiesCleared { count });
        }
        Command::ConfigureWave { wave } => {
            world.wave = wave;
            out_events.push(Event::WaveConfigured { wave });
        }
        Command::StartSpawning => {
            if !world.spawning {
                world.spawning = true;
                out_events.push(Event::SpawningStarted { wave: world.wave });
            }
        }
        Command::StopSpawning => {
            if world.spawning {
                world.spawning = false;
                out_events.push(Event::SpawningStopped);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use glam::Vec2;
    use lane_defence_core::{CastleSnapshot, EnemyId, EnemyView, HeroSnapshot, WaveNumber};

    use super::{FlashKind, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Captures the castle's health.
    #[must_use]
    pub fn castle(world: &World) -> CastleSnapshot {
        world.castle.snapshot()
    }

    /// Reports the flash currently shown on the castle, if any.
    #[must_use]
    pub fn castle_flash(world: &World) -> Option<FlashKind> {
        world.flash.map(|flash| flash.kind)
    }

    /// Horizontal position of the castle edge.
    #[must_use]
    pub fn castle_edge_x(world: &World) -> f32 {
        world.castle_edge_x
    }

    /// Captures the hero's state.
    #[must_use]
    pub fn hero(world: &World) -> HeroSnapshot {
        world.hero.snapshot()
    }

    /// Captures a read-only view of the enemies in the world.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(world.enemies.iter().map(|enemy| enemy.snapshot()).collect())
    }

    /// Number of enemies that have not died.
    #[must_use]
    pub fn live_enemy_count(world: &World) -> usize {
        world.enemies.iter().filter(|enemy| !enemy.is_dead()).count()
    }

    /// Lists one handle per enemy collider overlapping the provided circle.
    ///
    /// An enemy whose body and trigger both overlap appears twice.
    #[must_use]
    pub fn enemy_colliders_within(world: &World, center: Vec2, radius: f32) -> Vec<EnemyId> {
        let mut hits = Vec::new();
        for enemy in &world.enemies {
            let overlaps = enemy.overlapping_colliders(center, radius, &world.tuning);
            hits.extend(std::iter::repeat(enemy.id).take(overlaps));
        }
        hits
    }

    /// Wave the world was last configured for.
    #[must_use]
    pub fn wave(world: &World) -> WaveNumber {
        world.wave
    }

    /// Reports whether the spawn gate is open.
    #[must_use]
    pub fn spawning_enabled(world: &World) -> bool {
        world.spawning
    }

    /// Total simulated time.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.elapsed
    }
}

pub(crate) fn seconds(value: f32) -> Duration {
    Duration::try_from_secs_f32(value).unwrap_or(Duration::ZERO)
}

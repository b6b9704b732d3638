#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Lane Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Lane Defence.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Updates the movement axis the hero follows during subsequent ticks.
    SetHeroMovement {
        /// Raw two-dimensional input axis; normalized by the world.
        axis: Vec2,
    },
    /// Enables or disables the hero's ability to attack.
    SetHeroAttacking {
        /// Whether attacks should be permitted.
        enabled: bool,
    },
    /// Records that the hero performed a swing of the provided combo step.
    HeroAttack {
        /// Combo variant used for the swing.
        combo: ComboStep,
    },
    /// Applies the provided damage once to each listed enemy.
    ///
    /// Ignored while hero attacks are disabled.
    DamageEnemies {
        /// Deduplicated enemies struck by the attack.
        targets: Vec<EnemyId>,
        /// Damage applied to every target.
        amount: u32,
    },
    /// Raises the hero's damage by one upgrade level.
    UpgradeHeroDamage,
    /// Restores the hero to base damage and clears upgrades.
    ResetHero,
    /// Restores the provided amount of castle health.
    HealCastle {
        /// Health to restore; zero is ignored.
        amount: u32,
    },
    /// Restores the castle to full health.
    ResetCastle,
    /// Requests that a new enemy be created at the spawn edge.
    SpawnEnemy {
        /// Lane the enemy travels along.
        lane: LaneIndex,
        /// World-space position the enemy starts at.
        origin: Vec2,
        /// Attributes applied to the enemy.
        profile: EnemyProfile,
    },
    /// Removes every enemy from the world immediately.
    ClearEnemies,
    /// Announces the wave whose difficulty spawners should adopt.
    ConfigureWave {
        /// Wave number being configured.
        wave: WaveNumber,
    },
    /// Opens the spawn gate so spawners may emit enemies.
    StartSpawning,
    /// Closes the spawn gate, cancelling pending spawns.
    StopSpawning,
}

/// Events broadcast by the world and the wave controller after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the hero changed position during a tick.
    HeroMoved {
        /// Position before the tick.
        from: Vec2,
        /// Position after the tick.
        to: Vec2,
    },
    /// Announces that the hero's attack gate changed.
    HeroAttackingChanged {
        /// Whether attacks are now permitted.
        enabled: bool,
    },
    /// Confirms that the hero swung with the provided combo step.
    HeroAttacked {
        /// Combo variant used for the swing.
        combo: ComboStep,
        /// Damage carried by the swing.
        damage: u32,
    },
    /// Confirms that the hero's damage was upgraded.
    HeroDamageUpgraded {
        /// Number of upgrades applied so far.
        level: u32,
        /// Damage dealt per attack after the upgrade.
        damage: u32,
    },
    /// Confirms that the hero returned to base damage.
    HeroReset {
        /// Damage dealt per attack after the reset.
        damage: u32,
    },
    /// Confirms that an enemy entered the world.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Lane the enemy occupies.
        lane: LaneIndex,
        /// Whether the enemy is a boss.
        boss: bool,
    },
    /// Reports damage applied to a live enemy.
    EnemyDamaged {
        /// Enemy that received damage.
        enemy: EnemyId,
        /// Damage applied.
        amount: u32,
        /// Details of the change to the enemy's health.
        change: HealthChange,
    },
    /// Announces that an enemy entered the hurt stagger.
    EnemyHurt {
        /// Enemy that was staggered.
        enemy: EnemyId,
    },
    /// Announces that an enemy recovered from the hurt stagger and resumed moving.
    EnemyRecovered {
        /// Enemy that resumed movement.
        enemy: EnemyId,
    },
    /// Announces that an enemy was killed. Fired at most once per enemy.
    EnemyDied {
        /// Enemy that died.
        enemy: EnemyId,
        /// Lane the enemy occupied.
        lane: LaneIndex,
        /// Whether the enemy was a boss.
        boss: bool,
    },
    /// Confirms that a dead enemy's remains were removed after lingering.
    EnemyRemoved {
        /// Enemy that was removed.
        enemy: EnemyId,
    },
    /// Reports that an enemy reached the castle edge and damaged the castle.
    EnemyBreachedCastle {
        /// Enemy that breached the castle.
        enemy: EnemyId,
        /// Lane the enemy occupied.
        lane: LaneIndex,
        /// Whether the enemy was a boss.
        boss: bool,
        /// Damage dealt to the castle.
        damage: u32,
    },
    /// Confirms that all enemies were removed in bulk.
    EnemiesCleared {
        /// Number of enemies removed.
        count: usize,
    },
    /// Reports a change to the castle's health.
    CastleHealthChanged {
        /// Details of the change.
        change: HealthChange,
    },
    /// Announces that the castle's health reached zero.
    CastleDestroyed,
    /// Confirms the wave number adopted for difficulty scaling.
    WaveConfigured {
        /// Configured wave number.
        wave: WaveNumber,
    },
    /// Announces that the spawn gate opened.
    SpawningStarted {
        /// Wave the spawn gate opened for.
        wave: WaveNumber,
    },
    /// Announces that the spawn gate closed.
    SpawningStopped,
    /// Announces that a wave became active.
    WaveStarted {
        /// Wave that started.
        wave: WaveNumber,
        /// Kills needed to complete the wave.
        required_kills: u32,
    },
    /// Reports a change to the kill counter.
    KillCountChanged {
        /// Wave the kills were recorded in.
        wave: WaveNumber,
        /// Kills recorded during the active wave.
        current_kills: u32,
        /// Kills required to complete the wave.
        required_kills: u32,
    },
    /// Announces that the active wave's kill quota was met.
    WaveCompleted {
        /// Wave that completed.
        wave: WaveNumber,
        /// Choices offered to the player.
        choices: ChoiceAvailability,
    },
    /// Reports that the heal choice became available or unavailable.
    HealAvailabilityChanged {
        /// Whether healing the castle is currently possible.
        can_heal: bool,
    },
    /// Confirms that a player choice was accepted by the wave controller.
    ChoiceAccepted {
        /// Choice that was accepted.
        choice: PlayerChoice,
    },
    /// Announces that the castle fell and progression halted.
    GameOver {
        /// Wave during which the castle fell.
        wave: WaveNumber,
    },
}

/// Unique identifier assigned to an enemy.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Zero-based index of a lane, counted from the top.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct LaneIndex(u32);

impl LaneIndex {
    /// The top lane, reserved for the boss while one is active.
    pub const TOP: Self = Self(0);

    /// Creates a new lane index.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying lane index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// One-based wave number.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct WaveNumber(u32);

impl WaveNumber {
    /// The opening wave.
    pub const FIRST: Self = Self(1);

    /// Creates a wave number, clamping zero up to the first wave.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        if value == 0 {
            Self::FIRST
        } else {
            Self(value)
        }
    }

    /// Retrieves the numeric wave number.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Number of waves completed before this one.
    #[must_use]
    pub const fn elapsed(&self) -> u32 {
        self.0.saturating_sub(1)
    }

    /// Returns the following wave.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Reports whether this wave lands on the provided boss cadence.
    ///
    /// A zero interval never yields a boss wave.
    #[must_use]
    pub const fn is_boss_wave(self, boss_interval: u32) -> bool {
        boss_interval != 0 && self.0 % boss_interval == 0
    }
}

/// Payload describing a single health mutation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HealthChange {
    /// Health after the change.
    pub current: u32,
    /// Health before the change.
    pub previous: u32,
    /// Health after the change expressed as a percentage of the maximum.
    pub percentage: f32,
    /// Whether the change was a heal rather than damage.
    pub is_heal: bool,
}

/// Step within the hero's three-swing combo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComboStep {
    /// Opening swing.
    First,
    /// Follow-up swing.
    Second,
    /// Finishing swing.
    Third,
}

impl ComboStep {
    /// Returns the step that follows this one, wrapping after the third.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::Third,
            Self::Third => Self::First,
        }
    }

    /// One-based position of the step within the combo.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
        }
    }
}

/// Colour tint applied to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tint {
    red: u8,
    green: u8,
    blue: u8,
}

impl Tint {
    /// Pure red, used for bosses by default.
    pub const RED: Self = Self::from_rgb(0xff, 0x00, 0x00);

    /// Creates a new tint from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the tint.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the tint.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the tint.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Attributes assigned to an enemy when it is spawned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyProfile {
    /// Maximum and starting health.
    pub health: u32,
    /// Movement speed toward the castle in world units per second.
    pub speed: f32,
    /// Whether the enemy is a boss.
    pub boss: bool,
    /// Size multiplier applied to the enemy's colliders and sprite.
    pub scale: f32,
    /// Optional tint applied to the enemy's sprite.
    pub tint: Option<Tint>,
}

/// Life-cycle state of an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyState {
    /// Moving toward the castle.
    Alive,
    /// Staggered by a hit; movement is suspended until the stagger elapses.
    Hurting,
    /// Killed; inert until its remains are removed.
    Dead,
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Lane the enemy occupies.
    pub lane: LaneIndex,
    /// Current world-space position.
    pub position: Vec2,
    /// Current life-cycle state.
    pub state: EnemyState,
    /// Whether the enemy is a boss.
    pub boss: bool,
    /// Remaining health.
    pub health: u32,
    /// Maximum health.
    pub max_health: u32,
    /// Size multiplier applied to the enemy.
    pub scale: f32,
    /// Optional tint applied to the enemy.
    pub tint: Option<Tint>,
}

impl EnemySnapshot {
    /// Reports whether the enemy can still be damaged.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.state != EnemyState::Dead
    }
}

/// Read-only snapshot describing all enemies in the world.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the snapshot for the provided enemy.
    #[must_use]
    pub fn get(&self, enemy: EnemyId) -> Option<&EnemySnapshot> {
        self.snapshots
            .binary_search_by_key(&enemy, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Reports whether the provided enemy exists and has not died.
    #[must_use]
    pub fn is_alive(&self, enemy: EnemyId) -> bool {
        self.get(enemy).is_some_and(EnemySnapshot::is_alive)
    }

    /// Number of enemies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Horizontal direction the hero is facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Facing {
    /// Facing toward increasing x.
    Right,
    /// Facing toward decreasing x.
    Left,
}

impl Facing {
    /// Sign applied to horizontal offsets for this facing.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Right => 1.0,
            Self::Left => -1.0,
        }
    }
}

/// Immutable representation of the hero used by combat and presentation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroSnapshot {
    /// Current world-space position.
    pub position: Vec2,
    /// Current facing.
    pub facing: Facing,
    /// Damage dealt per attack.
    pub damage: u32,
    /// Number of damage upgrades applied.
    pub upgrade_level: u32,
    /// Whether attacks are currently permitted.
    pub attacking_enabled: bool,
    /// Center of the sword hitbox in world space.
    pub sword_hitbox: Vec2,
    /// Radius of the sword hitbox.
    pub attack_range: f32,
}

/// Immutable representation of the castle's health.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CastleSnapshot {
    /// Remaining health.
    pub current: u32,
    /// Maximum health.
    pub maximum: u32,
}

impl CastleSnapshot {
    /// Remaining health expressed as a percentage of the maximum.
    #[must_use]
    pub fn percentage(&self) -> f32 {
        health_percentage(self.current, self.maximum)
    }

    /// Reports whether a heal would restore any health.
    #[must_use]
    pub const fn can_heal(&self) -> bool {
        self.current < self.maximum
    }

    /// Reports whether the castle has fallen.
    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.current == 0
    }

    /// Colour band the health bar should display.
    #[must_use]
    pub fn tier(&self) -> HealthTier {
        HealthTier::from_fraction(self.percentage() / 100.0)
    }

    /// Sprite stage the castle should display.
    #[must_use]
    pub fn appearance(&self) -> CastleAppearance {
        if self.current == 0 {
            CastleAppearance::Destroyed
        } else if u64::from(self.current) * 2 > u64::from(self.maximum) {
            CastleAppearance::Intact
        } else {
            CastleAppearance::Damaged
        }
    }
}

/// Computes `current / maximum * 100`, yielding zero for a zero maximum.
#[must_use]
pub fn health_percentage(current: u32, maximum: u32) -> f32 {
    if maximum == 0 {
        return 0.0;
    }
    current as f32 / maximum as f32 * 100.0
}

/// Colour band of a health bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HealthTier {
    /// Above half health.
    Healthy,
    /// Above a quarter health.
    Damaged,
    /// A quarter health or less.
    Critical,
}

impl HealthTier {
    /// Selects the tier for a fill fraction in `0.0..=1.0`.
    #[must_use]
    pub fn from_fraction(fraction: f32) -> Self {
        if fraction > 0.5 {
            Self::Healthy
        } else if fraction > 0.25 {
            Self::Damaged
        } else {
            Self::Critical
        }
    }
}

/// Sprite stage shown for the castle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CastleAppearance {
    /// More than half health remains.
    Intact,
    /// Some health remains.
    Damaged,
    /// No health remains.
    Destroyed,
}

/// Phase of the wave progression state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WavePhase {
    /// Waiting for the player to start the game.
    NotStarted,
    /// Enemies are spawning and kills are being counted.
    WaveActive,
    /// The kill quota was met; waiting for a player choice.
    WaveComplete,
    /// The castle fell; waiting for a restart.
    GameOver,
}

/// Player decisions accepted by the wave controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerChoice {
    /// Begins the first wave.
    StartGame,
    /// Upgrades hero damage and advances to the next wave.
    UpgradeDamage,
    /// Heals the castle and advances to the next wave.
    HealCastle,
    /// Advances to the next wave without any other effect.
    AdvanceWave,
    /// Restarts progression from the first wave after a game over.
    Restart,
}

/// Which between-wave choices are currently enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChoiceAvailability {
    /// Whether the damage upgrade may be chosen.
    pub upgrade: bool,
    /// Whether the castle heal may be chosen.
    pub heal: bool,
    /// Whether the plain advance may be chosen.
    pub advance: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boss_waves_follow_interval() {
        let bosses: Vec<u32> = (1..=10)
            .map(WaveNumber::new)
            .filter(|wave| wave.is_boss_wave(3))
            .map(|wave| wave.get())
            .collect();
        assert_eq!(bosses, vec![3, 6, 9]);
    }

    #[test]
    fn zero_boss_interval_never_yields_boss() {
        assert!(!WaveNumber::new(6).is_boss_wave(0));
    }

    #[test]
    fn wave_number_clamps_zero_to_first() {
        assert_eq!(WaveNumber::new(0), WaveNumber::FIRST);
        assert_eq!(WaveNumber::FIRST.elapsed(), 0);
        assert_eq!(WaveNumber::new(4).next().get(), 5);
    }

    #[test]
    fn combo_wraps_after_third_step() {
        assert_eq!(ComboStep::First.next(), ComboStep::Second);
        assert_eq!(ComboStep::Third.next(), ComboStep::First);
        assert_eq!(ComboStep::Third.ordinal(), 3);
    }

    #[test]
    fn castle_tiers_match_fill_bands() {
        let castle = |current| CastleSnapshot {
            current,
            maximum: 100,
        };
        assert_eq!(castle(100).tier(), HealthTier::Healthy);
        assert_eq!(castle(50).tier(), HealthTier::Damaged);
        assert_eq!(castle(26).tier(), HealthTier::Damaged);
        assert_eq!(castle(25).tier(), HealthTier::Critical);
        assert_eq!(castle(51).appearance(), CastleAppearance::Intact);
        assert_eq!(castle(50).appearance(), CastleAppearance::Damaged);
        assert_eq!(castle(0).appearance(), CastleAppearance::Destroyed);
    }

    #[test]
    fn heal_availability_tracks_missing_health() {
        assert!(CastleSnapshot {
            current: 40,
            maximum: 100
        }
        .can_heal());
        assert!(!CastleSnapshot {
            current: 100,
            maximum: 100
        }
        .can_heal());
    }

    #[test]
    fn enemy_view_lookup_respects_death() {
        let snapshot = |id, state| EnemySnapshot {
            id: EnemyId::new(id),
            lane: LaneIndex::TOP,
            position: Vec2::ZERO,
            state,
            boss: false,
            health: 10,
            max_health: 10,
            scale: 1.0,
            tint: None,
        };
        let view = EnemyView::from_snapshots(vec![
            snapshot(4, EnemyState::Dead),
            snapshot(1, EnemyState::Hurting),
        ]);
        assert!(view.is_alive(EnemyId::new(1)));
        assert!(!view.is_alive(EnemyId::new(4)));
        assert!(!view.is_alive(EnemyId::new(9)));
        assert_eq!(view.iter().next().map(|s| s.id), Some(EnemyId::new(1)));
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave progression state machine driving spawning, hero attacks, and the
//! between-wave economy.

use lane_defence_core::{
    CastleSnapshot, ChoiceAvailability, Command, Event, PlayerChoice, WaveNumber, WavePhase,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Kill quota and economy parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Kills required to complete the first wave.
    pub base_kills: u32,
    /// Kills added to the quota per wave.
    pub kills_increase: u32,
    /// Castle health restored by the heal choice.
    pub heal_amount: u32,
}

impl Config {
    /// `base_kills + kills_increase * (wave - 1)`.
    #[must_use]
    pub fn required_kills(&self, wave: WaveNumber) -> u32 {
        self.base_kills
            .saturating_add(self.kills_increase.saturating_mul(wave.elapsed()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_kills: 5,
            kills_increase: 5,
            heal_amount: 10,
        }
    }
}

/// Top-level controller that tracks kills and sequences waves.
#[derive(Debug)]
pub struct WaveController {
    config: Config,
    phase: WavePhase,
    wave: WaveNumber,
    current_kills: u32,
    required_kills: u32,
    can_heal: bool,
}

impl WaveController {
    /// Creates a controller waiting for the game to start.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let required_kills = config.required_kills(WaveNumber::FIRST);
        Self {
            config,
            phase: WavePhase::NotStarted,
            wave: WaveNumber::FIRST,
            current_kills: 0,
            required_kills,
            can_heal: false,
        }
    }

    /// Current phase of the progression.
    #[must_use]
    pub const fn phase(&self) -> WavePhase {
        self.phase
    }

    /// Current wave.
    #[must_use]
    pub const fn wave(&self) -> WaveNumber {
        self.wave
    }

    /// Kills recorded during the current wave.
    #[must_use]
    pub const fn current_kills(&self) -> u32 {
        self.current_kills
    }

    /// Kills required to complete the current wave.
    #[must_use]
    pub const fn required_kills(&self) -> u32 {
        self.required_kills
    }

    /// Castle health restored by the heal choice.
    #[must_use]
    pub const fn heal_amount(&self) -> u32 {
        self.config.heal_amount
    }

    /// Choices currently offered to the player.
    #[must_use]
    pub fn choices(&self, castle: CastleSnapshot) -> ChoiceAvailability {
        let offered = self.phase == WavePhase::WaveComplete;
        ChoiceAvailability {
            upgrade: offered,
            heal: offered && castle.can_heal(),
            advance: offered,
        }
    }

    /// Consumes world events and player choices, emitting world commands and
    /// wave-level notifications.
    ///
    /// `castle` must reflect every command applied before this call.
    pub fn handle(
        &mut self,
        events: &[Event],
        choices: &[PlayerChoice],
        castle: CastleSnapshot,
        out_commands: &mut Vec<Command>,
        out_events: &mut Vec<Event>,
    ) {
        if castle.can_heal() != self.can_heal {
            self.can_heal = castle.can_heal();
            out_events.push(Event::HealAvailabilityChanged {
                can_heal: self.can_heal,
            });
        }

        for event in events {
            match event {
                Event::EnemyDied { .. } => self.record_kill(castle, out_commands, out_events),
                Event::CastleDestroyed => self.game_over(out_commands, out_events),
                _ => {}
            }
        }

        for choice in choices {
            self.choose(*choice, castle, out_commands, out_events);
        }
    }

    fn record_kill(
        &mut self,
        castle: CastleSnapshot,
        out_commands: &mut Vec<Command>,
        out_events: &mut Vec<Event>,
    ) {
        if self.phase != WavePhase::WaveActive {
            return;
        }

        self.current_kills = self.current_kills.saturating_add(1);
        out_events.push(Event::KillCountChanged {
            wave: self.wave,
            current_kills: self.current_kills,
            required_kills: self.required_kills,
        });

        if self.current_kills < self.required_kills {
            return;
        }

        self.phase = WavePhase::WaveComplete;
        info!(
            wave = self.wave.get(),
            kills = self.current_kills,
            "wave complete"
        );
        out_commands.push(Command::StopSpawning);
        out_commands.push(Command::ClearEnemies);
        out_commands.push(Command::SetHeroAttacking { enabled: false });
        out_events.push(Event::WaveCompleted {
            wave: self.wave,
            choices: self.choices(castle),
        });
    }

    fn game_over(&mut self, out_commands: &mut Vec<Command>, out_events: &mut Vec<Event>) {
        if matches!(self.phase, WavePhase::GameOver | WavePhase::NotStarted) {
            return;
        }

        self.phase = WavePhase::GameOver;
        info!(wave = self.wave.get(), "game over");
        out_commands.push(Command::StopSpawning);
        out_commands.push(Command::ClearEnemies);
        out_commands.push(Command::SetHeroAttacking { enabled: false });
        out_events.push(Event::GameOver { wave: self.wave });
    }

    fn choose(
        &mut self,
        choice: PlayerChoice,
        castle: CastleSnapshot,
        out_commands: &mut Vec<Command>,
        out_events: &mut Vec<Event>,
    ) {
        let accepted = match (self.phase, choice) {
            (WavePhase::NotStarted, PlayerChoice::StartGame) => {
                out_commands.push(Command::ConfigureWave { wave: self.wave });
                self.begin_wave(out_commands, out_events);
                true
            }
            (WavePhase::WaveComplete, PlayerChoice::UpgradeDamage) => {
                out_commands.push(Command::UpgradeHeroDamage);
                self.advance(out_commands, out_events);
                true
            }
            (WavePhase::WaveComplete, PlayerChoice::HealCastle) if castle.can_heal() => {
                out_commands.push(Command::HealCastle {
                    amount: self.config.heal_amount,
                });
                self.advance(out_commands, out_events);
                true
            }
            (WavePhase::WaveComplete, PlayerChoice::AdvanceWave) => {
                self.advance(out_commands, out_events);
                true
            }
            (WavePhase::GameOver, PlayerChoice::Restart) => {
                self.wave = WaveNumber::FIRST;
                out_commands.push(Command::ClearEnemies);
                out_commands.push(Command::ResetCastle);
                out_commands.push(Command::ResetHero);
                out_commands.push(Command::ConfigureWave { wave: self.wave });
                info!("progression restarted");
                self.begin_wave(out_commands, out_events);
                true
            }
            _ => false,
        };

        if accepted {
            out_events.push(Event::ChoiceAccepted { choice });
        } else {
            debug!(?choice, phase = ?self.phase, "choice ignored");
        }
    }

    fn advance(&mut self, out_commands: &mut Vec<Command>, out_events: &mut Vec<Event>) {
        self.wave = self.wave.next();
        out_commands.push(Command::ConfigureWave { wave: self.wave });
        self.begin_wave(out_commands, out_events);
    }

    fn begin_wave(&mut self, out_commands: &mut Vec<Command>, out_events: &mut Vec<Event>) {
        self.phase = WavePhase::WaveActive;
        self.current_kills = 0;
        self.required_kills = self.config.required_kills(self.wave);
        info!(
            wave = self.wave.get(),
            required_kills = self.required_kills,
            "wave started"
        );
        out_commands.push(Command::SetHeroAttacking { enabled: true });
        out_commands.push(Command::StartSpawning);
        out_events.push(Event::WaveStarted {
            wave: self.wave,
            required_kills: self.required_kills,
        });
        out_events.push(Event::KillCountChanged {
            wave: self.wave,
            current_kills: 0,
            required_kills: self.required_kills,
        });
    }
}

impl Default for WaveController {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

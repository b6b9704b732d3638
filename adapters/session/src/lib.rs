#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wires the world and systems together and drives them one frame at a time.
//!
//! A [`Session`] owns every component explicitly; collaborators are handed in
//! at construction and no lookup happens afterwards.

mod balance;
mod cues;
mod hud;

use std::time::Duration;

use glam::Vec2;
use lane_defence_core::{Command, Event, PlayerChoice, WavePhase};
use lane_defence_system_combat::Combat;
use lane_defence_system_spawning::Spawning;
use lane_defence_system_waves::WaveController;
use lane_defence_world::{self as world, query, World};
use tracing::warn;

pub use balance::{Balance, ConfigError, PresentationConfig};
pub use cues::{AnimationTarget, AnimationTrigger, Animator, AudioPlayer, Silent, SoundEffect};
pub use hud::Hud;

const MAX_PUMP_ROUNDS: usize = 64;

/// Input sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputFrame {
    /// Continuous movement axis; normalised by the world.
    pub axis: Vec2,
    /// Attack button pressed this frame.
    pub attack_pressed: bool,
    /// Death key pressed this frame. Takes precedence over attacking.
    pub death_pressed: bool,
}

/// A running game.
#[derive(Debug)]
pub struct Session<A, N> {
    world: World,
    spawning: Spawning,
    combat: Combat,
    waves: WaveController,
    audio: A,
    animator: N,
    upgrade_amount: u32,
    step_rate: Duration,
    since_last_step: Duration,
    frame_events: Vec<Event>,
}

impl<A, N> Session<A, N>
where
    A: AudioPlayer,
    N: Animator,
{
    /// Validates `balance` and builds every component from it.
    pub fn new(balance: Balance, audio: A, animator: N) -> Result<Self, ConfigError> {
        balance.validate()?;

        let Balance {
            seed,
            world: world_config,
            spawning,
            combat,
            waves,
            presentation,
        } = balance;

        Ok(Self {
            world: World::with_config(&world_config),
            spawning: Spawning::new(spawning, seed),
            combat: Combat::new(&combat),
            waves: WaveController::new(waves),
            audio,
            animator,
            upgrade_amount: world_config.hero.upgrade_amount,
            step_rate: Duration::try_from_secs_f32(presentation.step_rate_secs)
                .unwrap_or(Duration::ZERO),
            since_last_step: Duration::ZERO,
            frame_events: Vec::new(),
        })
    }

    /// Advances the game by `dt`, applying `input` and then `choices`.
    ///
    /// Returns every event broadcast during the frame in emission order.
    pub fn step(&mut self, dt: Duration, input: &InputFrame, choices: &[PlayerChoice]) -> &[Event] {
        self.frame_events.clear();

        let mut commands = vec![
            Command::SetHeroMovement { axis: input.axis },
            Command::Tick { dt },
        ];
        let mut attack_pressed = input.attack_pressed && !input.death_pressed;
        let mut choices = choices;
        let mut rounds = 0;

        while !commands.is_empty() {
            rounds += 1;
            if rounds > MAX_PUMP_ROUNDS {
                warn!(
                    pending = commands.len(),
                    "frame did not settle; dropping pending commands"
                );
                break;
            }

            let mut events = Vec::new();
            for command in commands.drain(..) {
                world::apply(&mut self.world, command, &mut events);
            }

            // Wave commands queue first so a halt lands before any swing or spawn.
            let mut wave_events = Vec::new();
            self.waves.handle(
                &events,
                choices,
                query::castle(&self.world),
                &mut commands,
                &mut wave_events,
            );
            choices = &[];

            let hero = query::hero(&self.world);
            let enemies = query::enemy_view(&self.world);
            let world = &self.world;
            self.combat.handle(
                &events,
                attack_pressed,
                &hero,
                &enemies,
                |center, radius| query::enemy_colliders_within(world, center, radius),
                &mut commands,
            );
            attack_pressed = false;

            self.spawning.handle(&events, &mut commands);

            for event in events.iter().chain(wave_events.iter()) {
                cues::dispatch(event, &mut self.audio, &mut self.animator);
            }
            self.frame_events.extend(events);
            self.frame_events.extend(wave_events);
        }

        self.footsteps(dt, input.axis);
        if input.death_pressed {
            self.animator
                .trigger(AnimationTarget::Hero, AnimationTrigger::Death);
        }

        &self.frame_events
    }

    fn footsteps(&mut self, dt: Duration, axis: Vec2) {
        self.since_last_step = self.since_last_step.saturating_add(dt);
        if axis.normalize_or_zero() == Vec2::ZERO {
            return;
        }
        if self.since_last_step >= self.step_rate {
            self.since_last_step = Duration::ZERO;
            self.audio.play(SoundEffect::Step.name());
        }
    }

    /// Snapshot for the UI layer.
    #[must_use]
    pub fn hud(&self) -> Hud {
        let castle = query::castle(&self.world);
        Hud {
            phase: self.waves.phase(),
            wave_label: hud::wave_label(self.waves.wave().get()),
            kills_label: hud::kills_label(self.waves.current_kills(), self.waves.required_kills()),
            upgrade_label: hud::upgrade_label(self.upgrade_amount),
            heal_label: hud::heal_label(self.waves.heal_amount()),
            choices: self.waves.choices(castle),
            can_heal: castle.can_heal(),
            castle,
            castle_tier: castle.tier(),
            castle_appearance: castle.appearance(),
            castle_flash: query::castle_flash(&self.world),
            hero_damage: query::hero(&self.world).damage,
        }
    }

    /// Current phase of the wave progression.
    #[must_use]
    pub fn phase(&self) -> WavePhase {
        self.waves.phase()
    }

    /// Authoritative world, for read-only queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Wave controller, for read-only inspection.
    #[must_use]
    pub fn waves(&self) -> &WaveController {
        &self.waves
    }

    /// Spawner, for read-only inspection.
    #[must_use]
    pub fn spawning(&self) -> &Spawning {
        &self.spawning
    }

    /// Audio collaborator.
    #[must_use]
    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Animation collaborator.
    #[must_use]
    pub fn animator(&self) -> &N {
        &self.animator
    }
}

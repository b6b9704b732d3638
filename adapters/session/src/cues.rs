//! Collaborator interfaces for audio and animation and the mapping from
//! simulation events to their cues.

use lane_defence_core::{ComboStep, EnemyId, Event, PlayerChoice};

/// Plays named sound effects. Fire-and-forget.
pub trait AudioPlayer {
    /// Plays the effect registered under `effect`.
    fn play(&mut self, effect: &str);
}

/// Receives state-keyed animation triggers.
pub trait Animator {
    /// Fires `trigger` on `target`.
    fn trigger(&mut self, target: AnimationTarget, trigger: AnimationTrigger);
}

/// Sound effects emitted by a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// A wave started.
    ZombieGrowl,
    /// The hero swung the sword.
    SwordSwing,
    /// A regular enemy died.
    ZombieDeath,
    /// A boss died.
    BossDeath,
    /// The castle lost health.
    CastleDamage,
    /// The castle regained health.
    CastleHeal,
    /// The damage upgrade was chosen.
    UpgradeDamage,
    /// The heal choice was taken.
    HealCastle,
    /// The plain advance was chosen.
    AdvanceWave,
    /// The hero took a step.
    Step,
}

impl SoundEffect {
    /// Name the audio backend registers the effect under.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ZombieGrowl => "ZombieGrowl",
            Self::SwordSwing => "SwordSwing",
            Self::ZombieDeath => "ZombieDeath",
            Self::BossDeath => "BossDeath",
            Self::CastleDamage => "CastleDamage",
            Self::CastleHeal => "CastleHeal",
            Self::UpgradeDamage => "UpgradeDamage",
            Self::HealCastle => "HealCastle",
            Self::AdvanceWave => "AdvanceWave",
            Self::Step => "Step",
        }
    }
}

/// Entity an animation trigger applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationTarget {
    /// The player-controlled hero.
    Hero,
    /// A single enemy.
    Enemy(EnemyId),
}

/// Animation state requested from the animator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationTrigger {
    /// Return to the idle loop.
    Idle,
    /// Play the hurt reaction.
    Hurt,
    /// Play the death animation.
    Death,
    /// Play one of the three combo swings.
    Attack(ComboStep),
}

impl AnimationTrigger {
    /// Name of the trigger as the animator knows it.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Hurt => "Hurt",
            Self::Death => "Death",
            Self::Attack(ComboStep::First) => "Attack1",
            Self::Attack(ComboStep::Second) => "Attack2",
            Self::Attack(ComboStep::Third) => "Attack3",
        }
    }
}

/// Collaborator that ignores every cue.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl AudioPlayer for Silent {
    fn play(&mut self, _effect: &str) {}
}

impl Animator for Silent {
    fn trigger(&mut self, _target: AnimationTarget, _trigger: AnimationTrigger) {}
}

/// Forwards the cues implied by `event` to the collaborators.
pub(crate) fn dispatch<A, N>(event: &Event, audio: &mut A, animator: &mut N)
where
    A: AudioPlayer,
    N: Animator,
{
    match event {
        Event::WaveStarted { .. } => audio.play(SoundEffect::ZombieGrowl.name()),
        Event::HeroAttacked { combo, .. } => {
            animator.trigger(AnimationTarget::Hero, AnimationTrigger::Attack(*combo));
            audio.play(SoundEffect::SwordSwing.name());
        }
        Event::EnemyHurt { enemy } => {
            animator.trigger(AnimationTarget::Enemy(*enemy), AnimationTrigger::Hurt);
        }
        Event::EnemyRecovered { enemy } => {
            animator.trigger(AnimationTarget::Enemy(*enemy), AnimationTrigger::Idle);
        }
        Event::EnemyDied { enemy, boss, .. } => {
            let effect = if *boss {
                SoundEffect::BossDeath
            } else {
                SoundEffect::ZombieDeath
            };
            audio.play(effect.name());
            animator.trigger(AnimationTarget::Enemy(*enemy), AnimationTrigger::Death);
        }
        Event::CastleHealthChanged { change } => {
            let effect = if change.is_heal {
                SoundEffect::CastleHeal
            } else {
                SoundEffect::CastleDamage
            };
            audio.play(effect.name());
        }
        Event::ChoiceAccepted { choice } => {
            let effect = match choice {
                PlayerChoice::UpgradeDamage => SoundEffect::UpgradeDamage,
                PlayerChoice::HealCastle => SoundEffect::HealCastle,
                PlayerChoice::AdvanceWave => SoundEffect::AdvanceWave,
                PlayerChoice::StartGame | PlayerChoice::Restart => return,
            };
            audio.play(effect.name());
        }
        _ => {}
    }
}

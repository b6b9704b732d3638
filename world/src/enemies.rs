//! Enemy units and their life-cycle state machine.

use std::time::Duration;

use glam::Vec2;
use lane_defence_core::{
    EnemyId, EnemyProfile, EnemySnapshot, EnemyState, HealthChange, LaneIndex, Tint,
};

use crate::{health::HealthPool, EnemyConfig};

/// Timing and collider parameters resolved from [`EnemyConfig`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct EnemyTuning {
    pub(crate) hurt_cooldown: Duration,
    pub(crate) hurt_stagger: Duration,
    pub(crate) death_linger: Duration,
    pub(crate) body_radius: f32,
    pub(crate) trigger_half_extents: Vec2,
}

impl EnemyTuning {
    pub(crate) fn from_config(config: &EnemyConfig) -> Self {
        Self {
            hurt_cooldown: crate::seconds(config.hurt_cooldown_secs),
            hurt_stagger: crate::seconds(config.hurt_stagger_secs),
            death_linger: crate::seconds(config.death_linger_secs),
            body_radius: config.body_radius.max(0.0),
            trigger_half_extents: config.trigger_half_extents.max(Vec2::ZERO),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Alive,
    Hurting { recover_at: Duration },
    Dead { remove_at: Duration },
}

/// Outcome of striking an enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum StrikeOutcome {
    /// The enemy was already dead; nothing changed.
    Ignored,
    /// Damage landed while the hurt response was still cooling down.
    Wounded { change: HealthChange },
    /// Damage landed and the enemy entered the hurt stagger.
    Staggered { change: HealthChange },
    /// Damage killed the enemy.
    Killed { change: HealthChange },
}

/// Outcome of advancing an enemy by one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Progress {
    Idle,
    Moved,
    Recovered,
    Breached,
    Expired,
}

#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) lane: LaneIndex,
    pub(crate) boss: bool,
    position: Vec2,
    speed: f32,
    scale: f32,
    tint: Option<Tint>,
    health: HealthPool,
    phase: Phase,
    last_hurt: Option<Duration>,
}

impl Enemy {
    pub(crate) fn spawn(id: EnemyId, lane: LaneIndex, origin: Vec2, profile: EnemyProfile) -> Self {
        Self {
            id,
            lane,
            boss: profile.boss,
            position: origin,
            speed: profile.speed.max(0.0),
            scale: if profile.scale > 0.0 { profile.scale } else { 1.0 },
            tint: profile.tint,
            health: HealthPool::new(profile.health),
            phase: Phase::Alive,
            last_hurt: None,
        }
    }

    pub(crate) fn state(&self) -> EnemyState {
        match self.phase {
            Phase::Alive => EnemyState::Alive,
            Phase::Hurting { .. } => EnemyState::Hurting,
            Phase::Dead { .. } => EnemyState::Dead,
        }
    }

    pub(crate) fn is_dead(&self) -> bool {
        matches!(self.phase, Phase::Dead { .. })
    }

    pub(crate) fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            lane: self.lane,
            position: self.position,
            state: self.state(),
            boss: self.boss,
            health: self.health.current(),
            max_health: self.health.maximum(),
            scale: self.scale,
            tint: self.tint,
        }
    }

    /// Applies damage. Damage is never rate limited; only the stagger is.
    pub(crate) fn strike(&mut self, amount: u32, now: Duration, tuning: &EnemyTuning) -> StrikeOutcome {
        if self.is_dead() {
            return StrikeOutcome::Ignored;
        }

        let outcome = self.health.apply_damage(amount);
        let change = outcome.change;
        if outcome.died {
            self.phase = Phase::Dead {
                remove_at: now.saturating_add(tuning.death_linger),
            };
            return StrikeOutcome::Killed { change };
        }

        let cooled_down = self
            .last_hurt
            .map_or(true, |last| now >= last.saturating_add(tuning.hurt_cooldown));
        if !cooled_down {
            return StrikeOutcome::Wounded { change };
        }

        self.last_hurt = Some(now);
        self.phase = Phase::Hurting {
            recover_at: now.saturating_add(tuning.hurt_stagger),
        };
        StrikeOutcome::Staggered { change }
    }

    pub(crate) fn advance(&mut self, dt: Duration, now: Duration, castle_edge_x: f32) -> Progress {
        match self.phase {
            Phase::Alive => {
                if self.speed > 0.0 {
                    self.position.x -= self.speed * dt.as_secs_f32();
                }
                if self.position.x <= castle_edge_x {
                    Progress::Breached
                } else if self.speed > 0.0 {
                    Progress::Moved
                } else {
                    Progress::Idle
                }
            }
            Phase::Hurting { recover_at } => {
                if now >= recover_at {
                    self.phase = Phase::Alive;
                    Progress::Recovered
                } else {
                    Progress::Idle
                }
            }
            Phase::Dead { remove_at } => {
                if now >= remove_at {
                    Progress::Expired
                } else {
                    Progress::Idle
                }
            }
        }
    }

    /// Counts the colliders overlapping the provided circle.
    ///
    /// Each live enemy carries a round body collider and a box trigger used to
    /// detect the castle. Dead enemies have collision disabled.
    pub(crate) fn overlapping_colliders(&self, center: Vec2, radius: f32, tuning: &EnemyTuning) -> usize {
        if self.is_dead() {
            return 0;
        }

        let mut overlaps = 0;
        let body_radius = tuning.body_radius * self.scale;
        if self.position.distance(center) <= body_radius + radius {
            overlaps += 1;
        }

        let half_extents = tuning.trigger_half_extents * self.scale;
        let closest = center.clamp(self.position - half_extents, self.position + half_extents);
        if closest.distance(center) <= radius {
            overlaps += 1;
        }

        overlaps
    }
}

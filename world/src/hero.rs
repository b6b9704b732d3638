use std::time::Duration;

use glam::Vec2;
use lane_defence_core::{Facing, HeroSnapshot};

use crate::HeroConfig;

#[derive(Clone, Debug)]
pub(crate) struct Hero {
    spawn: Vec2,
    position: Vec2,
    axis: Vec2,
    facing: Facing,
    speed: f32,
    base_damage: u32,
    upgrade_amount: u32,
    upgrade_level: u32,
    attacking_enabled: bool,
    sword_offset: Vec2,
    attack_range: f32,
}

impl Hero {
    pub(crate) fn new(config: &HeroConfig) -> Self {
        Self {
            spawn: config.spawn,
            position: config.spawn,
            axis: Vec2::ZERO,
            facing: Facing::Right,
            speed: config.speed.max(0.0),
            base_damage: config.base_damage,
            upgrade_amount: config.upgrade_amount,
            upgrade_level: 0,
            attacking_enabled: false,
            sword_offset: config.sword_offset,
            attack_range: config.attack_range.max(0.0),
        }
    }

    /// `base + upgrade_amount * level`.
    pub(crate) fn damage(&self) -> u32 {
        self.base_damage
            .saturating_add(self.upgrade_amount.saturating_mul(self.upgrade_level))
    }

    pub(crate) fn upgrade(&mut self) -> (u32, u32) {
        self.upgrade_level = self.upgrade_level.saturating_add(1);
        (self.upgrade_level, self.damage())
    }

    pub(crate) fn reset(&mut self) {
        self.upgrade_level = 0;
        self.position = self.spawn;
        self.axis = Vec2::ZERO;
        self.facing = Facing::Right;
    }

    /// Returns whether the gate changed.
    pub(crate) fn set_attacking(&mut self, enabled: bool) -> bool {
        let changed = self.attacking_enabled != enabled;
        self.attacking_enabled = enabled;
        changed
    }

    pub(crate) fn set_axis(&mut self, axis: Vec2) {
        self.axis = axis.normalize_or_zero();
        if axis.x > 0.0 {
            self.facing = Facing::Right;
        } else if axis.x < 0.0 {
            self.facing = Facing::Left;
        }
    }

    /// Moves along the current axis, returning the previous position when it changed.
    pub(crate) fn advance(&mut self, dt: Duration) -> Option<Vec2> {
        if self.axis == Vec2::ZERO || self.speed == 0.0 {
            return None;
        }

        let from = self.position;
        self.position += self.axis * self.speed * dt.as_secs_f32();
        (self.position != from).then_some(from)
    }

    pub(crate) fn snapshot(&self) -> HeroSnapshot {
        let offset = Vec2::new(self.sword_offset.x * self.facing.sign(), self.sword_offset.y);
        HeroSnapshot {
            position: self.position,
            facing: self.facing,
            damage: self.damage(),
            upgrade_level: self.upgrade_level,
            attacking_enabled: self.attacking_enabled,
            sword_hitbox: self.position + offset,
            attack_range: self.attack_range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upgrades_scale_damage_linearly() {
        let mut hero = Hero::new(&HeroConfig {
            base_damage: 50,
            upgrade_amount: 25,
            ..HeroConfig::default()
        });
        assert_eq!(hero.damage(), 50);
        let _ = hero.upgrade();
        assert_eq!(hero.upgrade(), (2, 100));

        hero.reset();
        assert_eq!(hero.damage(), 50);
    }

    #[test]
    fn diagonal_movement_is_normalized() {
        let mut hero = Hero::new(&HeroConfig {
            spawn: Vec2::ZERO,
            speed: 4.0,
            ..HeroConfig::default()
        });
        hero.set_axis(Vec2::new(1.0, 1.0));
        let _ = hero.advance(Duration::from_secs(1));
        assert!((hero.snapshot().position.length() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn sword_hitbox_mirrors_with_facing() {
        let mut hero = Hero::new(&HeroConfig {
            spawn: Vec2::ZERO,
            sword_offset: Vec2::new(0.8, 0.1),
            ..HeroConfig::default()
        });
        assert_eq!(hero.snapshot().sword_hitbox, Vec2::new(0.8, 0.1));

        hero.set_axis(Vec2::new(-1.0, 0.0));
        assert_eq!(hero.snapshot().facing, Facing::Left);
        assert_eq!(hero.snapshot().sword_hitbox, Vec2::new(-0.8, 0.1));
    }

    #[test]
    fn attacking_gate_reports_transitions() {
        let mut hero = Hero::new(&HeroConfig::default());
        assert!(!hero.snapshot().attacking_enabled);
        assert!(hero.set_attacking(true));
        assert!(!hero.set_attacking(true));
        assert!(hero.set_attacking(false));
    }
}

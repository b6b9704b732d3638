use glam::Vec2;
use lane_defence_core::{EnemyView, HeroSnapshot, PlayerChoice, WavePhase};
use lane_defence_session::{Hud, InputFrame};

/// Vertical distance below which the hero holds its lane.
const LANE_TOLERANCE: f32 = 0.05;
/// Horizontal distance in front of the sword at which the hero starts swinging.
const SWING_REACH: f32 = 1.5;

/// Scripted player: holds position, lines up with the closest enemy, and swings.
#[derive(Debug, Default)]
pub(crate) struct Autopilot;

impl Autopilot {
    /// Input for the next frame.
    pub(crate) fn input(&self, hero: &HeroSnapshot, enemies: &EnemyView) -> InputFrame {
        let sword = hero.sword_hitbox;
        let target = enemies
            .iter()
            .filter(|enemy| enemy.is_alive() && enemy.position.x > sword.x - hero.attack_range)
            .min_by(|a, b| a.position.x.total_cmp(&b.position.x));

        let Some(target) = target else {
            return InputFrame::default();
        };

        let dy = target.position.y - hero.position.y;
        let axis = if dy.abs() < LANE_TOLERANCE {
            Vec2::ZERO
        } else {
            Vec2::new(0.0, (dy * 4.0).clamp(-1.0, 1.0))
        };

        InputFrame {
            axis,
            attack_pressed: target.position.x - sword.x < SWING_REACH,
            death_pressed: false,
        }
    }

    /// Between-wave decision: heal a badly damaged castle, otherwise upgrade.
    pub(crate) fn choose(&self, hud: &Hud) -> Option<PlayerChoice> {
        match hud.phase {
            WavePhase::NotStarted => Some(PlayerChoice::StartGame),
            WavePhase::WaveComplete if hud.choices.heal && hud.castle.percentage() < 50.0 => {
                Some(PlayerChoice::HealCastle)
            }
            WavePhase::WaveComplete => Some(PlayerChoice::UpgradeDamage),
            WavePhase::WaveActive | WavePhase::GameOver => None,
        }
    }
}

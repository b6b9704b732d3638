use lane_defence_core::{
    CastleAppearance, CastleSnapshot, ChoiceAvailability, HealthTier, WavePhase,
};
use lane_defence_world::FlashKind;

/// Everything a UI layer needs to draw panels, counters, and the castle.
#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    /// Current phase; decides which panel is visible.
    pub phase: WavePhase,
    /// `Wave {n}`.
    pub wave_label: String,
    /// `Kills: {current}/{required}`.
    pub kills_label: String,
    /// Label of the damage upgrade button.
    pub upgrade_label: String,
    /// Label of the heal button.
    pub heal_label: String,
    /// Between-wave buttons that accept clicks.
    pub choices: ChoiceAvailability,
    /// Whether a heal would restore any health, regardless of phase.
    pub can_heal: bool,
    /// Castle health.
    pub castle: CastleSnapshot,
    /// Health bar colour band.
    pub castle_tier: HealthTier,
    /// Castle sprite stage.
    pub castle_appearance: CastleAppearance,
    /// Flash currently tinting the castle.
    pub castle_flash: Option<FlashKind>,
    /// Current hero damage per swing.
    pub hero_damage: u32,
}

impl Hud {
    /// Reports whether the start panel should be shown.
    #[must_use]
    pub fn start_panel_visible(&self) -> bool {
        self.phase == WavePhase::NotStarted
    }

    /// Reports whether the between-wave panel should be shown.
    #[must_use]
    pub fn wave_panel_visible(&self) -> bool {
        self.phase == WavePhase::WaveComplete
    }

    /// Reports whether the game-over panel should be shown.
    #[must_use]
    pub fn game_over_visible(&self) -> bool {
        self.phase == WavePhase::GameOver
    }
}

pub(crate) fn wave_label(wave: u32) -> String {
    format!("Wave {wave}")
}

pub(crate) fn kills_label(current: u32, required: u32) -> String {
    format!("Kills: {current}/{required}")
}

pub(crate) fn upgrade_label(amount: u32) -> String {
    format!("Upgrade Sword DMG (+{amount})")
}

pub(crate) fn heal_label(amount: u32) -> String {
    format!("Heal Castle (+{amount} HP)")
}

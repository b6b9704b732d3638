//! Bounded health counter shared by the castle and every enemy.

use lane_defence_core::{health_percentage, CastleSnapshot, HealthChange};

/// Mutable health counter clamped to `0..=maximum`.
///
/// Every mutation reports a [`HealthChange`] which the world forwards as an
/// event, so observers never see a half-applied value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HealthPool {
    maximum: u32,
    current: u32,
}

/// Result of applying damage to a [`HealthPool`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageOutcome {
    /// Change emitted by the damage.
    pub change: HealthChange,
    /// Whether this damage moved the pool into zero.
    pub died: bool,
}

impl HealthPool {
    /// Creates a full pool. A zero maximum is raised to one.
    #[must_use]
    pub fn new(maximum: u32) -> Self {
        let maximum = maximum.max(1);
        Self {
            maximum,
            current: maximum,
        }
    }

    /// Remaining health.
    #[must_use]
    pub const fn current(&self) -> u32 {
        self.current
    }

    /// Maximum health.
    #[must_use]
    pub const fn maximum(&self) -> u32 {
        self.maximum
    }

    /// Remaining health expressed as a percentage of the maximum.
    #[must_use]
    pub fn percentage(&self) -> f32 {
        health_percentage(self.current, self.maximum)
    }

    /// Reports whether no health remains.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Reports whether the pool is below its maximum.
    #[must_use]
    pub const fn is_missing_health(&self) -> bool {
        self.current < self.maximum
    }

    /// Captures the pool as a castle snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> CastleSnapshot {
        CastleSnapshot {
            current: self.current,
            maximum: self.maximum,
        }
    }

    /// Subtracts `amount`, stopping at zero.
    ///
    /// `died` is only set on the call that moves the pool into zero; further
    /// damage to a depleted pool still reports a change but never dies again.
    pub fn apply_damage(&mut self, amount: u32) -> DamageOutcome {
        let previous = self.current;
        self.current = self.current.saturating_sub(amount);
        DamageOutcome {
            change: self.change_from(previous, false),
            died: previous > 0 && self.current == 0,
        }
    }

    /// Adds `amount`, stopping at the maximum. Zero heals are ignored.
    pub fn apply_heal(&mut self, amount: u32) -> Option<HealthChange> {
        if amount == 0 {
            return None;
        }

        let previous = self.current;
        self.current = self.current.saturating_add(amount).min(self.maximum);
        Some(self.change_from(previous, true))
    }

    /// Refills the pool to its maximum.
    pub fn restore(&mut self) -> HealthChange {
        let previous = self.current;
        self.current = self.maximum;
        self.change_from(previous, true)
    }

    fn change_from(&self, previous: u32, is_heal: bool) -> HealthChange {
        HealthChange {
            current: self.current,
            previous,
            percentage: self.percentage(),
            is_heal,
        }
    }
}

use std::collections::HashSet;

use lane_defence_core::{EnemyId, EnemyView};

/// Reduces a raw collider query to the enemies a single attack may damage.
///
/// Each enemy appears at most once in the output regardless of how many of
/// its colliders overlapped, and dead or unknown enemies are dropped. The
/// first-seen order of the query is preserved.
#[derive(Debug, Default)]
pub struct CombatResolver {
    seen: HashSet<EnemyId>,
}

impl CombatResolver {
    /// Creates a resolver with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deduplicates `candidates` and keeps live enemies only.
    pub fn resolve(&mut self, candidates: &[EnemyId], enemies: &EnemyView) -> Vec<EnemyId> {
        self.seen.clear();
        let mut targets = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if !self.seen.insert(*candidate) {
                continue;
            }
            if enemies.is_alive(*candidate) {
                targets.push(*candidate);
            }
        }
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use lane_defence_core::{EnemySnapshot, EnemyState, LaneIndex};

    fn snapshot(id: u32, state: EnemyState) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            lane: LaneIndex::new(0),
            position: Vec2::ZERO,
            state,
            boss: false,
            health: if state == EnemyState::Dead { 0 } else { 50 },
            max_health: 50,
            scale: 1.0,
            tint: None,
        }
    }

    #[test]
    fn duplicate_handles_resolve_once() {
        let view = EnemyView::from_snapshots(vec![
            snapshot(1, EnemyState::Alive),
            snapshot(2, EnemyState::Hurting),
        ]);
        let candidates = [1, 2, 1, 2, 1].map(EnemyId::new);

        let mut resolver = CombatResolver::new();
        assert_eq!(
            resolver.resolve(&candidates, &view),
            vec![EnemyId::new(1), EnemyId::new(2)]
        );
    }

    #[test]
    fn dead_and_unknown_targets_are_dropped() {
        let view = EnemyView::from_snapshots(vec![
            snapshot(3, EnemyState::Dead),
            snapshot(4, EnemyState::Alive),
        ]);
        let candidates = [3, 9, 4].map(EnemyId::new);

        let mut resolver = CombatResolver::new();
        assert_eq!(resolver.resolve(&candidates, &view), vec![EnemyId::new(4)]);
    }

    #[test]
    fn scratch_state_does_not_leak_between_attacks() {
        let view = EnemyView::from_snapshots(vec![snapshot(5, EnemyState::Alive)]);
        let candidates = [EnemyId::new(5)];

        let mut resolver = CombatResolver::new();
        assert_eq!(resolver.resolve(&candidates, &view).len(), 1);
        assert_eq!(resolver.resolve(&candidates, &view).len(), 1);
    }
}

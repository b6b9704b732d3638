use glam::Vec2;
use lane_defence_core::LaneIndex;

/// Evenly spaced horizontal lanes, vertically centred around zero.
///
/// Lane 0 is the top lane; indices grow downwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaneLayout {
    lanes: u32,
    lane_height: f32,
    spawn_edge_x: f32,
}

impl LaneLayout {
    /// Creates a layout. A zero lane count is raised to one.
    #[must_use]
    pub fn new(lanes: u32, lane_height: f32, spawn_edge_x: f32) -> Self {
        Self {
            lanes: lanes.max(1),
            lane_height,
            spawn_edge_x,
        }
    }

    /// Number of lanes; always at least one.
    #[must_use]
    pub const fn lane_count(&self) -> u32 {
        self.lanes
    }

    /// Vertical centre of the provided lane.
    #[must_use]
    pub fn lane_y(&self, lane: LaneIndex) -> f32 {
        let offset = (self.lanes - 1) as f32 * self.lane_height / 2.0;
        offset - lane.get() as f32 * self.lane_height
    }

    /// Position on the spawn edge where enemies of the provided lane appear.
    #[must_use]
    pub fn origin(&self, lane: LaneIndex) -> Vec2 {
        Vec2::new(self.spawn_edge_x, self.lane_y(lane))
    }
}

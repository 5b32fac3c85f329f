//! Lane system constants - all tunable defaults in one place
//!
//! `LaneConfig` starts from these; scenarios override them through TOML.

// Map (world units, origin at the top left corner)
pub const DEFAULT_GRID_WIDTH: f32 = 18.0;
pub const DEFAULT_GRID_HEIGHT: f32 = 32.0;

// Time
pub const TICK_SECONDS: f32 = 0.05;

// Stealth: a unit must stay unseen this long before it counts as hidden
pub const HIDE_DURATION_SECONDS: f32 = 2.0;

// Waypoints
pub const WAYPOINT_FORWARD_MARGIN: f32 = 1.0;
pub const DEFAULT_LANE_MIN_Y: f32 = 5.0;
pub const DEFAULT_LANE_MAX_Y: f32 = 25.5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_band_inside_map() {
        assert!(DEFAULT_LANE_MIN_Y > 0.0);
        assert!(DEFAULT_LANE_MAX_Y < DEFAULT_GRID_HEIGHT);
        assert!(DEFAULT_LANE_MIN_Y < DEFAULT_GRID_HEIGHT / 2.0);
        assert!(DEFAULT_LANE_MAX_Y > DEFAULT_GRID_HEIGHT / 2.0);
    }

    #[test]
    fn test_hide_duration_is_whole_ticks() {
        let ticks = HIDE_DURATION_SECONDS / TICK_SECONDS;
        assert!((ticks - ticks.round()).abs() < 1e-3);
    }
}

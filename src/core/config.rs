//! Lane configuration with documented constants
//!
//! All map and timing numbers are collected here so that a scenario can be
//! tuned from a TOML file without touching the simulation code.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{LaneError, Result};
use crate::lane::constants::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_LANE_MAX_Y, DEFAULT_LANE_MIN_Y,
    HIDE_DURATION_SECONDS, TICK_SECONDS, WAYPOINT_FORWARD_MARGIN,
};

/// Configuration for the lane simulation
///
/// Every field has a default, so a TOML file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneConfig {
    // === MAP ===
    /// Map width in world units
    pub grid_width: f32,

    /// Map height in world units
    ///
    /// The horizontal midline (`grid_height / 2`) splits the lane into the
    /// north and south halves used for target chasing.
    pub grid_height: f32,

    // === TIME ===
    /// Simulated seconds per tick
    pub tick_seconds: f32,

    // === STEALTH ===
    /// How long a stealth unit must stay unseen before it counts as hidden
    ///
    /// Converted to ticks with `tick_seconds`; at the defaults this is 40 ticks.
    pub hide_duration_seconds: f32,

    // === WAYPOINTS ===
    /// Waypoints closer than this along the forward axis are treated as behind
    pub waypoint_forward_margin: f32,

    /// Lower `y` bound of the lane proper
    ///
    /// Waypoints below it belong to the north home band.
    pub lane_min_y: f32,

    /// Upper `y` bound of the lane proper
    ///
    /// Waypoints above it belong to the south home band.
    pub lane_max_y: f32,
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            tick_seconds: TICK_SECONDS,
            hide_duration_seconds: HIDE_DURATION_SECONDS,
            waypoint_forward_margin: WAYPOINT_FORWARD_MARGIN,
            lane_min_y: DEFAULT_LANE_MIN_Y,
            lane_max_y: DEFAULT_LANE_MAX_Y,
        }
    }
}

impl LaneConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: LaneConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.grid_width <= 0.0 || self.grid_height <= 0.0 {
            return Err(LaneError::InvalidConfig(format!(
                "grid dimensions must be positive (got {} x {})",
                self.grid_width, self.grid_height
            )));
        }

        if self.tick_seconds <= 0.0 {
            return Err(LaneError::InvalidConfig(format!(
                "tick_seconds must be positive (got {})",
                self.tick_seconds
            )));
        }

        if self.hide_duration_seconds < 0.0 {
            return Err(LaneError::InvalidConfig(
                "hide_duration_seconds must not be negative".into(),
            ));
        }

        if self.lane_min_y >= self.lane_max_y {
            return Err(LaneError::InvalidConfig(format!(
                "lane_min_y ({}) should be < lane_max_y ({})",
                self.lane_min_y, self.lane_max_y
            )));
        }

        Ok(())
    }

    /// Consecutive hiding ticks required before a unit is hidden
    pub fn hidden_threshold_ticks(&self) -> u32 {
        (self.hide_duration_seconds / self.tick_seconds).round() as u32
    }

    /// The `y` coordinate separating the two lane halves
    pub fn midline_y(&self) -> f32 {
        self.grid_height / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(LaneConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_hidden_threshold_is_forty_ticks() {
        assert_eq!(LaneConfig::default().hidden_threshold_ticks(), 40);
    }

    #[test]
    fn test_midline() {
        assert_eq!(LaneConfig::default().midline_y(), 16.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = LaneConfig::from_toml_str("tick_seconds = 0.1\n").unwrap();
        assert_eq!(config.tick_seconds, 0.1);
        assert_eq!(config.grid_height, DEFAULT_GRID_HEIGHT);
        assert_eq!(config.hidden_threshold_ticks(), 20);
    }

    #[test]
    fn test_rejects_inverted_lane_band() {
        let result = LaneConfig::from_toml_str("lane_min_y = 30.0\nlane_max_y = 10.0\n");
        assert!(matches!(result, Err(LaneError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_zero_tick() {
        let config = LaneConfig {
            tick_seconds: 0.0,
            ..LaneConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let result = LaneConfig::from_toml_str("tick_seconds = \"fast\"");
        assert!(matches!(result, Err(LaneError::Toml(_))));
    }
}

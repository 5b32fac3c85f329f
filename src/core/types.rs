//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Handle to a unit in the world arena
///
/// Handles are never reused, so a handle to a removed unit simply stops
/// resolving instead of aliasing a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Index into the world's waypoint list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WaypointId(pub usize);

/// Game tick counter (simulation time unit)
pub type Tick = u64;

/// Which player owns a unit
///
/// North's base sits at small `y` and it attacks toward larger `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    North,
    South,
}

impl Side {
    pub fn is_north(&self) -> bool {
        matches!(self, Side::North)
    }

    pub fn opposing(&self) -> Side {
        match self {
            Side::North => Side::South,
            Side::South => Side::North,
        }
    }

    /// Sign of the `y` axis pointing back toward this side's base
    pub fn rear_sign(&self) -> f32 {
        match self {
            Side::North => -1.0,
            Side::South => 1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::North => "north",
            Side::South => "south",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opposing() {
        assert_eq!(Side::North.opposing(), Side::South);
        assert_eq!(Side::South.opposing(), Side::North);
        assert_eq!(Side::North.opposing().opposing(), Side::North);
    }

    #[test]
    fn test_rear_points_home() {
        // North's base is at small y, so its rear is -y
        assert!(Side::North.rear_sign() < 0.0);
        assert!(Side::South.rear_sign() > 0.0);
    }

    #[test]
    fn test_entity_id_display() {
        assert_eq!(EntityId(7).to_string(), "#7");
    }

    #[test]
    fn test_side_serde_lowercase() {
        let json = serde_json::to_string(&Side::North).unwrap();
        assert_eq!(json, "\"north\"");
        let side: Side = serde_json::from_str("\"south\"").unwrap();
        assert_eq!(side, Side::South);
    }
}

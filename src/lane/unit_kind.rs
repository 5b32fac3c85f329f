//! Unit kinds and their stat blocks
//!
//! Stats are immutable for a unit's lifetime and shared between every unit
//! spawned from the same table entry.

use std::path::Path;
use std::sync::Arc;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{LaneError, Result};

/// Kind of unit on the lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    // Mobs
    Swordsman, // Cheap melee
    Archer,    // Ranged, fragile
    Giant,     // Slow, huge; stealth units hide behind it
    Rogue,     // Stealth, spring attacks

    // Buildings
    Tower,
    Base,
}

impl UnitKind {
    pub const MOBS: [UnitKind; 4] = [
        UnitKind::Swordsman,
        UnitKind::Archer,
        UnitKind::Giant,
        UnitKind::Rogue,
    ];

    /// Is this a stationary building?
    pub fn is_building(&self) -> bool {
        matches!(self, UnitKind::Tower | UnitKind::Base)
    }

    pub fn is_mob(&self) -> bool {
        !self.is_building()
    }

    /// Can stealth units shelter behind this kind?
    pub fn is_giant(&self) -> bool {
        matches!(self, UnitKind::Giant)
    }

    /// Get default stats for this kind
    pub fn default_stats(&self) -> UnitStats {
        match self {
            UnitKind::Swordsman => UnitStats {
                name: "Swordsman".to_string(),
                kind: *self,
                hit_points: 12.0,
                damage: 2.0,
                attack_range: 0.5,
                attack_time: 1.0,
                speed: 2.0,
                spring_speed: 2.0,
                spring_range: 0.0,
                size: 1.0,
                sight_radius: 7.0,
                hide_distance: 0.0,
                attacks_buildings: true,
            },

            UnitKind::Archer => UnitStats {
                name: "Archer".to_string(),
                kind: *self,
                hit_points: 6.0,
                damage: 1.5,
                attack_range: 5.0,
                attack_time: 1.2,
                speed: 2.0,
                spring_speed: 2.0,
                spring_range: 0.0,
                size: 0.8,
                sight_radius: 8.0,
                hide_distance: 0.0,
                attacks_buildings: true,
            },

            UnitKind::Giant => UnitStats {
                name: "Giant".to_string(),
                kind: *self,
                hit_points: 40.0,
                damage: 4.0,
                attack_range: 0.5,
                attack_time: 1.5,
                speed: 1.0,
                spring_speed: 1.0,
                spring_range: 0.0,
                size: 2.0,
                sight_radius: 6.0,
                hide_distance: 0.0,
                attacks_buildings: true,
            },

            UnitKind::Rogue => UnitStats {
                name: "Rogue".to_string(),
                kind: *self,
                hit_points: 8.0,
                damage: 4.0,
                attack_range: 0.5,
                attack_time: 0.8,
                speed: 2.5,
                spring_speed: 6.0,
                spring_range: 3.0,
                size: 0.8,
                sight_radius: 7.0,
                hide_distance: 0.5,
                // Too weak to scratch a tower
                attacks_buildings: false,
            },

            UnitKind::Tower => UnitStats {
                name: "Tower".to_string(),
                kind: *self,
                hit_points: 60.0,
                damage: 2.0,
                attack_range: 6.0,
                attack_time: 1.0,
                speed: 0.0,
                spring_speed: 0.0,
                spring_range: 0.0,
                size: 2.0,
                sight_radius: 7.5,
                hide_distance: 0.0,
                attacks_buildings: false,
            },

            UnitKind::Base => UnitStats {
                name: "Base".to_string(),
                kind: *self,
                hit_points: 120.0,
                damage: 3.0,
                attack_range: 7.0,
                attack_time: 1.0,
                speed: 0.0,
                spring_speed: 0.0,
                spring_range: 0.0,
                size: 3.0,
                sight_radius: 8.0,
                hide_distance: 0.0,
                attacks_buildings: false,
            },
        }
    }
}

/// Immutable stat block for one unit type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    pub name: String,
    pub kind: UnitKind,
    pub hit_points: f32,
    pub damage: f32,
    /// Gap between bounding squares at which an attack lands
    pub attack_range: f32,
    /// Seconds between attacks
    pub attack_time: f32,
    /// World units per second
    pub speed: f32,
    /// Burst speed used while spring attacking
    pub spring_speed: f32,
    pub spring_range: f32,
    /// Side of the bounding square
    pub size: f32,
    pub sight_radius: f32,
    /// Extra gap kept behind a sheltering ally
    pub hide_distance: f32,
    #[serde(default = "default_attacks_buildings")]
    pub attacks_buildings: bool,
}

fn default_attacks_buildings() -> bool {
    true
}

impl UnitStats {
    pub fn half_size(&self) -> f32 {
        self.size / 2.0
    }
}

#[derive(Debug, Deserialize)]
struct StatFile {
    #[serde(rename = "unit", default)]
    units: Vec<UnitStats>,
}

/// Named stat blocks, shared out as `Arc`s
#[derive(Debug, Clone)]
pub struct StatTable {
    by_name: AHashMap<String, Arc<UnitStats>>,
    by_kind: AHashMap<UnitKind, Arc<UnitStats>>,
}

impl StatTable {
    /// Table holding the built-in stats of every kind
    pub fn with_defaults() -> Self {
        let mut table = Self {
            by_name: AHashMap::new(),
            by_kind: AHashMap::new(),
        };
        for kind in UnitKind::MOBS
            .iter()
            .chain([UnitKind::Tower, UnitKind::Base].iter())
        {
            table.insert(kind.default_stats());
        }
        table
    }

    /// Parse a `[[unit]]` TOML table layered over the defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: StatFile = toml::from_str(content)?;
        let mut table = Self::with_defaults();
        for stats in file.units {
            if stats.size < 0.0 || stats.speed < 0.0 || stats.sight_radius < 0.0 {
                return Err(LaneError::InvalidConfig(format!(
                    "unit '{}' has a negative size, speed or sight radius",
                    stats.name
                )));
            }
            table.insert(stats);
        }
        Ok(table)
    }

    /// Load a stat table from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Add or replace an entry; the latest entry of a kind becomes its default
    pub fn insert(&mut self, stats: UnitStats) {
        let stats = Arc::new(stats);
        self.by_kind.insert(stats.kind, Arc::clone(&stats));
        self.by_name.insert(stats.name.to_lowercase(), stats);
    }

    /// Look up stats by (case-insensitive) name
    pub fn get(&self, name: &str) -> Result<Arc<UnitStats>> {
        self.by_name
            .get(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| LaneError::UnknownUnit(name.to_string()))
    }

    /// Stats used when spawning a unit of this kind
    pub fn for_kind(&self, kind: UnitKind) -> Arc<UnitStats> {
        self.by_kind
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| Arc::new(kind.default_stats()))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl Default for StatTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buildings_are_not_mobs() {
        assert!(UnitKind::Tower.is_building());
        assert!(UnitKind::Base.is_building());
        for kind in UnitKind::MOBS {
            assert!(kind.is_mob());
        }
    }

    #[test]
    fn test_buildings_do_not_move() {
        assert_eq!(UnitKind::Tower.default_stats().speed, 0.0);
        assert_eq!(UnitKind::Base.default_stats().speed, 0.0);
    }

    #[test]
    fn test_rogue_springs_faster_than_it_walks() {
        let stats = UnitKind::Rogue.default_stats();
        assert!(stats.spring_speed > stats.speed);
        assert!(stats.spring_range > 0.0);
        assert!(!stats.attacks_buildings);
    }

    #[test]
    fn test_giant_is_biggest_mob() {
        let giant = UnitKind::Giant.default_stats();
        for kind in UnitKind::MOBS {
            assert!(kind.default_stats().size <= giant.size);
        }
    }

    #[test]
    fn test_default_table_has_every_kind() {
        let table = StatTable::with_defaults();
        assert_eq!(table.len(), 6);
        assert_eq!(table.for_kind(UnitKind::Rogue).kind, UnitKind::Rogue);
        assert_eq!(table.get("giant").unwrap().kind, UnitKind::Giant);
    }

    #[test]
    fn test_unknown_unit_name() {
        let table = StatTable::with_defaults();
        assert!(matches!(table.get("dragon"), Err(LaneError::UnknownUnit(_))));
    }

    #[test]
    fn test_toml_overrides_default() {
        let toml_str = r#"
            [[unit]]
            name = "Rogue"
            kind = "rogue"
            hit_points = 10.0
            damage = 5.0
            attack_range = 0.5
            attack_time = 0.5
            speed = 3.0
            spring_speed = 8.0
            spring_range = 2.5
            size = 0.8
            sight_radius = 6.0
            hide_distance = 0.25
        "#;
        let table = StatTable::from_toml_str(toml_str).unwrap();
        let rogue = table.for_kind(UnitKind::Rogue);
        assert_eq!(rogue.speed, 3.0);
        assert_eq!(rogue.spring_speed, 8.0);
        // Field omitted from the file falls back to its serde default
        assert!(rogue.attacks_buildings);
        assert_eq!(table.len(), 6);
    }

    #[test]
    fn test_toml_rejects_negative_size() {
        let toml_str = r#"
            [[unit]]
            name = "Ghost"
            kind = "swordsman"
            hit_points = 1.0
            damage = 1.0
            attack_range = 0.5
            attack_time = 1.0
            speed = 1.0
            spring_speed = 1.0
            spring_range = 0.0
            size = -1.0
            sight_radius = 5.0
            hide_distance = 0.0
        "#;
        assert!(StatTable::from_toml_str(toml_str).is_err());
    }
}

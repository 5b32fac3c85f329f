//! Units on the lane: buildings and mobs
//!
//! Both share the entity base (position, health, target). Mobs add the
//! navigation and stealth state driven by the movement controller.

use std::sync::Arc;

use glam::Vec2;

use crate::core::types::{EntityId, Side, WaypointId};
use crate::lane::unit_kind::{UnitKind, UnitStats};

/// Per-mob navigation and stealth state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MobState {
    /// Waypoint currently steered toward (cleared whenever a target is chased)
    pub waypoint: Option<WaypointId>,
    /// No enemy had an unobstructed view this tick
    pub hiding_now: bool,
    /// Consecutive ticks spent hiding; zero whenever not hiding
    pub ticks_since_hidden: u32,
    /// Hidden once `ticks_since_hidden` reaches this
    pub hidden_threshold: u32,
    pub following_ally: bool,
    pub bound_ally: Option<EntityId>,
    /// An enemy was within spring range this tick
    pub in_spring_range: bool,
}

impl MobState {
    pub fn new(hidden_threshold: u32) -> Self {
        Self {
            hidden_threshold,
            ..Self::default()
        }
    }

    /// Record this tick's hiding result
    pub fn record_hiding(&mut self, hiding_now: bool) {
        self.hiding_now = hiding_now;
        if hiding_now {
            self.ticks_since_hidden = self.ticks_since_hidden.saturating_add(1);
        } else {
            self.ticks_since_hidden = 0;
        }
    }

    /// Confirmed stealth: hiding for the full threshold
    pub fn is_hidden(&self) -> bool {
        self.hiding_now && self.ticks_since_hidden >= self.hidden_threshold
    }
}

/// What a unit is, beyond the shared entity base
#[derive(Debug, Clone, PartialEq)]
pub enum UnitRole {
    Building,
    Mob(MobState),
}

/// A unit in the world arena
#[derive(Debug, Clone)]
pub struct Unit {
    pub id: EntityId,
    pub stats: Arc<UnitStats>,
    pub position: Vec2,
    pub side: Side,
    pub health: f32,
    pub target: Option<EntityId>,
    /// Seconds until the next attack may land
    pub attack_cooldown: f32,
    pub role: UnitRole,
}

impl Unit {
    /// Create a building
    pub fn building(id: EntityId, stats: Arc<UnitStats>, position: Vec2, side: Side) -> Self {
        debug_assert!(stats.kind.is_building(), "building built from mob stats");
        Self::with_role(id, stats, position, side, UnitRole::Building)
    }

    /// Create a mob
    pub fn mob(
        id: EntityId,
        stats: Arc<UnitStats>,
        position: Vec2,
        side: Side,
        hidden_threshold: u32,
    ) -> Self {
        debug_assert!(stats.kind.is_mob(), "mob built from building stats");
        let state = MobState::new(hidden_threshold);
        Self::with_role(id, stats, position, side, UnitRole::Mob(state))
    }

    fn with_role(
        id: EntityId,
        stats: Arc<UnitStats>,
        position: Vec2,
        side: Side,
        role: UnitRole,
    ) -> Self {
        Self {
            id,
            health: stats.hit_points,
            stats,
            position,
            side,
            target: None,
            attack_cooldown: 0.0,
            role,
        }
    }

    pub fn kind(&self) -> UnitKind {
        self.stats.kind
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn is_mob(&self) -> bool {
        matches!(self.role, UnitRole::Mob(_))
    }

    pub fn half_size(&self) -> f32 {
        self.stats.half_size()
    }

    pub fn mob_state(&self) -> Option<&MobState> {
        match &self.role {
            UnitRole::Mob(state) => Some(state),
            UnitRole::Building => None,
        }
    }

    pub fn mob_state_mut(&mut self) -> Option<&mut MobState> {
        match &mut self.role {
            UnitRole::Mob(state) => Some(state),
            UnitRole::Building => None,
        }
    }

    /// Confirmed stealth; buildings and non-stealth mobs are never hidden
    pub fn is_hidden(&self) -> bool {
        self.mob_state().is_some_and(MobState::is_hidden)
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.health -= amount;
    }

    /// Distance between centers, squared
    pub fn distance_sq(&self, other: &Unit) -> f32 {
        self.position.distance_squared(other.position)
    }

    /// `pos` shifted toward this unit's own base
    pub fn toward_rear(&self, pos: Vec2, amount: f32) -> Vec2 {
        Vec2::new(pos.x, pos.y + self.side.rear_sign() * amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rogue(side: Side) -> Unit {
        Unit::mob(
            EntityId(1),
            Arc::new(UnitKind::Rogue.default_stats()),
            Vec2::new(5.0, 10.0),
            side,
            40,
        )
    }

    #[test]
    fn test_new_mob_starts_at_full_health() {
        let unit = rogue(Side::North);
        assert_eq!(unit.health, unit.stats.hit_points);
        assert!(!unit.is_dead());
        assert!(unit.is_mob());
        assert!(unit.target.is_none());
    }

    #[test]
    fn test_damage_kills() {
        let mut unit = rogue(Side::North);
        unit.take_damage(unit.stats.hit_points);
        assert!(unit.is_dead());
    }

    #[test]
    fn test_hiding_counter_resets() {
        let mut state = MobState::new(3);
        state.record_hiding(true);
        state.record_hiding(true);
        assert_eq!(state.ticks_since_hidden, 2);
        assert!(!state.is_hidden());

        state.record_hiding(true);
        assert!(state.is_hidden());

        state.record_hiding(false);
        assert_eq!(state.ticks_since_hidden, 0);
        assert!(!state.is_hidden());
    }

    #[test]
    fn test_building_never_hidden() {
        let tower = Unit::building(
            EntityId(2),
            Arc::new(UnitKind::Tower.default_stats()),
            Vec2::new(5.0, 5.0),
            Side::North,
        );
        assert!(!tower.is_hidden());
        assert!(tower.mob_state().is_none());
    }

    #[test]
    fn test_toward_rear_by_side() {
        let north = rogue(Side::North);
        let south = rogue(Side::South);
        let pos = Vec2::new(3.0, 10.0);
        assert_eq!(north.toward_rear(pos, 2.0), Vec2::new(3.0, 8.0));
        assert_eq!(south.toward_rear(pos, 2.0), Vec2::new(3.0, 12.0));
    }
}

//! Entity base shared by mobs and buildings: targeting and attacks
//!
//! Targets are re-picked every tick, so a target that died or walked out of
//! sight is simply replaced.

use ordered_float::OrderedFloat;

use crate::core::types::EntityId;
use crate::lane::units::Unit;
use crate::lane::world::TickContext;

/// An attack that landed this tick
#[derive(Debug, Clone, PartialEq)]
pub struct Attack {
    pub attacker: EntityId,
    pub target: EntityId,
    pub damage: f32,
}

/// Can `unit` pick `other` as a target?
fn is_valid_target(unit: &Unit, other: &Unit) -> bool {
    other.side != unit.side
        && !other.is_dead()
        && !other.is_hidden()
        && (unit.stats.attacks_buildings || other.is_mob())
}

/// Nearest valid enemy within sight radius (first one on ties)
pub fn acquire_target(unit: &Unit, ctx: &TickContext) -> Option<EntityId> {
    let sight_sq = unit.stats.sight_radius * unit.stats.sight_radius;

    ctx.units_of(unit.side.opposing())
        .filter(|other| is_valid_target(unit, other))
        .map(|other| (other, unit.distance_sq(other)))
        .filter(|(_, dist_sq)| *dist_sq <= sight_sq)
        .min_by_key(|(_, dist_sq)| OrderedFloat(*dist_sq))
        .map(|(other, _)| {
            debug_assert!(other.side != unit.side, "targeted a friendly unit");
            other.id
        })
}

/// Is the current target close enough to hit?
///
/// Range is measured between bounding squares, not centers.
pub fn target_in_range(unit: &Unit, ctx: &TickContext) -> bool {
    let Some(target) = unit.target.and_then(|id| ctx.live_unit(id)) else {
        return false;
    };

    let gap = unit.position.distance(target.position) - (unit.half_size() + target.half_size());
    gap <= unit.stats.attack_range
}

/// Generic entity tick: pick a target and attack it when possible
pub fn tick_entity(unit: &mut Unit, ctx: &TickContext) -> Option<Attack> {
    unit.attack_cooldown = (unit.attack_cooldown - ctx.elapsed).max(0.0);
    unit.target = acquire_target(unit, ctx);

    let target = unit.target?;
    if unit.attack_cooldown > 0.0 || !target_in_range(unit, ctx) {
        return None;
    }

    unit.attack_cooldown = unit.stats.attack_time;
    Some(Attack {
        attacker: unit.id,
        target,
        damage: unit.stats.damage,
    })
}

//! Mob-to-mob collision hooks
//!
//! Units currently pass through each other. The hooks stay wired into the
//! movement step so a response can be added without touching the controller.

use crate::core::types::EntityId;
use crate::lane::units::Unit;
use crate::lane::world::TickContext;

/// The unit `mob` overlaps after moving, if any. Never reports one yet.
pub fn check_collision(_mob: &Unit, _ctx: &TickContext) -> Option<EntityId> {
    None
}

/// Response to an overlap with `other`
pub fn process_collision(mob: &mut Unit, other: EntityId, elapsed: f32) {
    tracing::trace!("{} overlaps {} ({:.3}s step), no response", mob.id, other, elapsed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::LaneConfig;
    use crate::core::types::Side;
    use crate::lane::unit_kind::UnitKind;
    use crate::lane::world::LaneWorld;
    use glam::Vec2;

    #[test]
    fn test_overlapping_units_report_nothing() {
        let mut world = LaneWorld::new(LaneConfig::default());
        let a = world.spawn_kind(UnitKind::Swordsman, Vec2::new(9.0, 10.0), Side::North);
        world.spawn_kind(UnitKind::Swordsman, Vec2::new(9.0, 10.0), Side::North);

        let ctx = TickContext::new(&world, 0.05);
        assert_eq!(check_collision(ctx.unit(a).unwrap(), &ctx), None);
    }

    #[test]
    fn test_process_collision_leaves_unit_alone() {
        let mut world = LaneWorld::new(LaneConfig::default());
        let a = world.spawn_kind(UnitKind::Swordsman, Vec2::new(9.0, 10.0), Side::North);
        let b = world.spawn_kind(UnitKind::Archer, Vec2::new(9.0, 10.2), Side::North);

        let mut unit = world.unit(a).unwrap().clone();
        process_collision(&mut unit, b, 0.05);
        assert_eq!(unit.position, Vec2::new(9.0, 10.0));
        assert_eq!(unit.health, unit.stats.hit_points);
    }
}

//! Stealth evaluation for units that can hide
//!
//! A unit is hiding when no enemy that could see it has a clear line to it.
//! Only friendly buildings and friendly giants block a line of sight.

use glam::Vec2;

use crate::lane::geometry::segment_intersects_square;
use crate::lane::units::Unit;
use crate::lane::world::TickContext;

/// Enemies close enough to see `mob` if nothing is in the way
pub fn potential_observers<'a>(
    mob: &'a Unit,
    ctx: &TickContext<'a>,
) -> impl Iterator<Item = &'a Unit> + 'a {
    ctx.all_units().filter(move |other| {
        other.side != mob.side
            && !other.is_dead()
            && other.stats.sight_radius >= mob.position.distance(other.position)
    })
}

/// Does a friendly building or giant sit between `observer` and `mob`?
pub fn is_view_obstructed(observer: Vec2, mob: &Unit, ctx: &TickContext) -> bool {
    let blocks = |blocker: &Unit| {
        !blocker.is_dead()
            && segment_intersects_square(observer, mob.position, blocker.position, blocker.stats.size)
    };

    ctx.buildings(mob.side).any(blocks)
        || ctx
            .mobs(mob.side)
            .filter(|ally| ally.kind().is_giant())
            .any(blocks)
}

/// Is `mob` out of every enemy's clear view this tick?
///
/// True when there are no enemies in range at all.
pub fn is_hiding(mob: &Unit, ctx: &TickContext) -> bool {
    let mut observers = potential_observers(mob, ctx);
    !observers.any(|observer| !is_view_obstructed(observer.position, mob, ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::LaneConfig;
    use crate::core::types::Side;
    use crate::lane::unit_kind::UnitKind;
    use crate::lane::world::LaneWorld;

    fn world() -> LaneWorld {
        LaneWorld::new(LaneConfig::default())
    }

    #[test]
    fn test_alone_is_hiding() {
        let mut world = world();
        let rogue = world.spawn_kind(UnitKind::Rogue, Vec2::new(9.0, 10.0), Side::North);

        let ctx = TickContext::new(&world, 0.05);
        assert!(is_hiding(ctx.unit(rogue).unwrap(), &ctx));
    }

    #[test]
    fn test_enemy_out_of_sight_does_not_reveal() {
        let mut world = world();
        let rogue = world.spawn_kind(UnitKind::Rogue, Vec2::new(9.0, 10.0), Side::North);
        world.spawn_kind(UnitKind::Swordsman, Vec2::new(9.0, 25.0), Side::South);

        let ctx = TickContext::new(&world, 0.05);
        let mob = ctx.unit(rogue).unwrap();
        assert_eq!(potential_observers(mob, &ctx).count(), 0);
        assert!(is_hiding(mob, &ctx));
    }

    #[test]
    fn test_clear_view_reveals() {
        let mut world = world();
        let rogue = world.spawn_kind(UnitKind::Rogue, Vec2::new(9.0, 10.0), Side::North);
        world.spawn_kind(UnitKind::Swordsman, Vec2::new(9.0, 14.0), Side::South);

        let ctx = TickContext::new(&world, 0.05);
        assert!(!is_hiding(ctx.unit(rogue).unwrap(), &ctx));
    }

    #[test]
    fn test_friendly_giant_blocks_view() {
        let mut world = world();
        let rogue = world.spawn_kind(UnitKind::Rogue, Vec2::new(9.0, 10.0), Side::North);
        world.spawn_kind(UnitKind::Giant, Vec2::new(9.0, 12.0), Side::North);
        world.spawn_kind(UnitKind::Swordsman, Vec2::new(9.0, 15.0), Side::South);

        let ctx = TickContext::new(&world, 0.05);
        assert!(is_hiding(ctx.unit(rogue).unwrap(), &ctx));
    }

    #[test]
    fn test_friendly_tower_blocks_view() {
        let mut world = world();
        let rogue = world.spawn_kind(UnitKind::Rogue, Vec2::new(9.0, 6.0), Side::North);
        world.spawn_kind(UnitKind::Tower, Vec2::new(9.0, 8.0), Side::North);
        world.spawn_kind(UnitKind::Archer, Vec2::new(9.0, 12.0), Side::South);

        let ctx = TickContext::new(&world, 0.05);
        assert!(is_hiding(ctx.unit(rogue).unwrap(), &ctx));
    }

    #[test]
    fn test_friendly_swordsman_does_not_block() {
        let mut world = world();
        let rogue = world.spawn_kind(UnitKind::Rogue, Vec2::new(9.0, 10.0), Side::North);
        world.spawn_kind(UnitKind::Swordsman, Vec2::new(9.0, 12.0), Side::North);
        world.spawn_kind(UnitKind::Swordsman, Vec2::new(9.0, 15.0), Side::South);

        let ctx = TickContext::new(&world, 0.05);
        assert!(!is_hiding(ctx.unit(rogue).unwrap(), &ctx));
    }

    #[test]
    fn test_enemy_giant_does_not_block() {
        let mut world = world();
        let rogue = world.spawn_kind(UnitKind::Rogue, Vec2::new(9.0, 10.0), Side::North);
        world.spawn_kind(UnitKind::Giant, Vec2::new(9.0, 12.0), Side::South);
        world.spawn_kind(UnitKind::Swordsman, Vec2::new(9.0, 15.0), Side::South);

        let ctx = TickContext::new(&world, 0.05);
        assert!(!is_hiding(ctx.unit(rogue).unwrap(), &ctx));
    }

    #[test]
    fn test_one_unblocked_observer_is_enough() {
        let mut world = world();
        let rogue = world.spawn_kind(UnitKind::Rogue, Vec2::new(9.0, 10.0), Side::North);
        world.spawn_kind(UnitKind::Giant, Vec2::new(9.0, 12.0), Side::North);
        world.spawn_kind(UnitKind::Swordsman, Vec2::new(9.0, 15.0), Side::South);
        // Flanker looks in from the side, away from the giant
        world.spawn_kind(UnitKind::Swordsman, Vec2::new(4.0, 10.0), Side::South);

        let ctx = TickContext::new(&world, 0.05);
        assert!(!is_hiding(ctx.unit(rogue).unwrap(), &ctx));
    }

    #[test]
    fn test_dead_observer_ignored() {
        let mut world = world();
        let rogue = world.spawn_kind(UnitKind::Rogue, Vec2::new(9.0, 10.0), Side::North);
        let enemy = world.spawn_kind(UnitKind::Swordsman, Vec2::new(9.0, 14.0), Side::South);
        world.unit_mut(enemy).unwrap().health = 0.0;

        let ctx = TickContext::new(&world, 0.05);
        assert!(is_hiding(ctx.unit(rogue).unwrap(), &ctx));
    }
}

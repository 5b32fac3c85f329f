//! Waypoint selection along the lane
//!
//! Waypoints are fixed points forming an implicit path to the enemy base.
//! The choice is always the nearest surviving candidate; ties go to the
//! first one in list order.

use glam::Vec2;
use ordered_float::OrderedFloat;

use crate::core::types::{Side, WaypointId};
use crate::lane::units::Unit;
use crate::lane::world::TickContext;

fn nearest(
    from: Vec2,
    candidates: impl Iterator<Item = (WaypointId, Vec2)>,
) -> Option<WaypointId> {
    candidates
        .min_by_key(|(_, pos)| OrderedFloat(from.distance_squared(*pos)))
        .map(|(id, _)| id)
}

/// Is `waypoint` far enough ahead of `from` for a unit heading toward the enemy?
pub fn is_ahead(side: Side, from: Vec2, waypoint: Vec2, margin: f32) -> bool {
    let y_offset = waypoint.y - from.y;
    match side {
        Side::North => y_offset >= margin,
        Side::South => y_offset <= -margin,
    }
}

/// Is `waypoint` inside the lane proper (between the two home bands)?
pub fn in_lane(waypoint: Vec2, ctx: &TickContext) -> bool {
    let config = ctx.config();
    waypoint.y >= config.lane_min_y && waypoint.y <= config.lane_max_y
}

/// Is `waypoint` in this side's home band, behind its own lane edge?
pub fn in_home_band(side: Side, waypoint: Vec2, ctx: &TickContext) -> bool {
    let config = ctx.config();
    match side {
        Side::North => waypoint.y < config.lane_min_y,
        Side::South => waypoint.y > config.lane_max_y,
    }
}

/// Nearest lane waypoint ahead of the mob
pub fn pick_forward_waypoint(mob: &Unit, ctx: &TickContext) -> Option<WaypointId> {
    let margin = ctx.config().waypoint_forward_margin;
    let picked = nearest(
        mob.position,
        ctx.waypoints().filter(|(_, pos)| {
            is_ahead(mob.side, mob.position, *pos, margin) && in_lane(*pos, ctx)
        }),
    );
    tracing::trace!("{} {} picked forward waypoint {:?}", mob.stats.name, mob.id, picked);
    picked
}

/// Nearest waypoint in the mob's own home band, ignoring facing
pub fn pick_home_waypoint(mob: &Unit, ctx: &TickContext) -> Option<WaypointId> {
    let picked = nearest(
        mob.position,
        ctx.waypoints()
            .filter(|(_, pos)| in_home_band(mob.side, *pos, ctx)),
    );
    tracing::trace!("{} {} picked home waypoint {:?}", mob.stats.name, mob.id, picked);
    picked
}

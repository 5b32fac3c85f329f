//! Mob movement: per-tick destination choice and stepping
//!
//! Each tick a mob picks one destination (a target, an ally to hide behind,
//! a waypoint, or its own spot) and walks toward it at most `speed * elapsed`.
//! Overshooting a waypoint spends the leftover distance on the next one.

use glam::Vec2;

use crate::core::types::{EntityId, WaypointId};
use crate::lane::behavior::{behavior_for, MobBehavior};
use crate::lane::collision;
use crate::lane::combat::{self, Attack};
use crate::lane::units::Unit;
use crate::lane::world::TickContext;

/// Where a mob is heading this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Destination {
    /// Chasing an enemy; stops once bounding squares touch
    Target {
        id: EntityId,
        position: Vec2,
        /// Center distance at which the two units touch
        contact: f32,
    },
    /// Sheltering behind a friendly unit
    Ally { id: EntityId, position: Vec2 },
    Waypoint { id: WaypointId, position: Vec2 },
    Hold,
}

impl Destination {
    pub fn position(&self) -> Option<Vec2> {
        match self {
            Destination::Target { position, .. }
            | Destination::Ally { position, .. }
            | Destination::Waypoint { position, .. } => Some(*position),
            Destination::Hold => None,
        }
    }

    pub fn is_target(&self) -> bool {
        matches!(self, Destination::Target { .. })
    }
}

/// Are both points on the same side of the horizontal midline?
///
/// A point exactly on the midline belongs to the southern half.
pub fn same_lane_half(a: Vec2, b: Vec2, midline_y: f32) -> bool {
    (a.y < midline_y) == (b.y < midline_y)
}

/// Full mob tick: stealth bookkeeping, entity base, then movement
pub fn tick_mob(mob: &mut Unit, ctx: &TickContext) -> Option<Attack> {
    let behavior = behavior_for(mob.kind());

    let hiding_now = behavior.is_hiding(mob, ctx);
    let was_hidden = mob.is_hidden();
    if let Some(state) = mob.mob_state_mut() {
        state.record_hiding(hiding_now);
    }
    if mob.is_hidden() != was_hidden {
        tracing::debug!(
            "{} {} is now {}",
            mob.stats.name,
            mob.id,
            if was_hidden { "revealed" } else { "hidden" }
        );
    }

    let attack = combat::tick_entity(mob, ctx);

    if !combat::target_in_range(mob, ctx) {
        move_mob(mob, ctx, behavior);
    }

    attack
}

/// Pick a destination, step toward it, then run the collision hook
pub fn move_mob(mob: &mut Unit, ctx: &TickContext, behavior: &dyn MobBehavior) {
    let destination = choose_destination(mob, ctx, behavior);
    advance(mob, &destination, ctx, behavior);

    if let Some(other) = collision::check_collision(mob, ctx) {
        collision::process_collision(mob, other, ctx.elapsed);
    }
}

/// The movement decision tree
pub fn choose_destination(
    mob: &mut Unit,
    ctx: &TickContext,
    behavior: &dyn MobBehavior,
) -> Destination {
    let hidden = mob.is_hidden();
    let Some(state) = mob.mob_state_mut() else {
        debug_assert!(false, "movement asked of a building");
        return Destination::Hold;
    };
    state.in_spring_range = false;

    if hidden {
        return behavior.hidden_destination(mob, ctx);
    }

    state.following_ally = false;
    state.bound_ally = None;

    if let Some(destination) = chase_target(mob, ctx) {
        if let Some(state) = mob.mob_state_mut() {
            state.waypoint = None;
        }
        return destination;
    }

    if let Some(destination) = behavior.shelter(mob, ctx) {
        return destination;
    }

    waypoint_destination(mob, ctx, behavior)
}

/// The current target, if it is alive and on this mob's half of the lane
fn chase_target(mob: &Unit, ctx: &TickContext) -> Option<Destination> {
    let target = mob.target.and_then(|id| ctx.live_unit(id))?;
    if !same_lane_half(mob.position, target.position, ctx.config().midline_y()) {
        return None;
    }

    Some(Destination::Target {
        id: target.id,
        position: target.position,
        contact: mob.half_size() + target.half_size(),
    })
}

fn waypoint_destination(
    mob: &mut Unit,
    ctx: &TickContext,
    behavior: &dyn MobBehavior,
) -> Destination {
    let current = mob.mob_state().and_then(|state| state.waypoint);
    let waypoint = current.or_else(|| behavior.pick_waypoint(mob, ctx));
    if let Some(state) = mob.mob_state_mut() {
        state.waypoint = waypoint;
    }

    match waypoint.and_then(|id| ctx.waypoint(id).map(|position| (id, position))) {
        Some((id, position)) => Destination::Waypoint { id, position },
        None => Destination::Hold,
    }
}

/// Move the mob toward `destination` for one tick
pub fn advance(
    mob: &mut Unit,
    destination: &Destination,
    ctx: &TickContext,
    behavior: &dyn MobBehavior,
) {
    let Some(goal) = destination.position() else {
        return;
    };

    let springing = mob.mob_state().is_some_and(|state| state.in_spring_range);
    let speed = if springing {
        mob.stats.spring_speed
    } else {
        mob.stats.speed
    };
    let move_dist = speed * ctx.elapsed;

    let to_goal = goal - mob.position;
    let direction = to_goal.normalize_or_zero();
    let mut remaining = to_goal.length();

    // Stop at contact range rather than on top of the target
    if let Destination::Target { contact, .. } = destination {
        remaining = (remaining - contact).max(0.0);
    }

    if move_dist <= remaining {
        mob.position += direction * move_dist;
        return;
    }

    mob.position += direction * remaining;

    if let Destination::Waypoint { .. } = destination {
        let leftover = move_dist - remaining;
        let next = behavior.pick_waypoint(mob, ctx);
        if let Some(state) = mob.mob_state_mut() {
            state.waypoint = next;
        }

        if let Some(next_pos) = next.and_then(|id| ctx.waypoint(id)) {
            let to_next = next_pos - mob.position;
            mob.position += to_next.normalize_or_zero() * leftover.min(to_next.length());
        }
    }
}

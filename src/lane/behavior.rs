//! Per-kind mob strategies
//!
//! The movement controller only talks to a `MobBehavior`. Anything a unit
//! kind does differently (stealth, sheltering, spring attacks, where it
//! retreats to) lives in its strategy, so new kinds do not touch the
//! shared controller.

use glam::Vec2;
use ordered_float::OrderedFloat;

use crate::core::types::WaypointId;
use crate::lane::movement::Destination;
use crate::lane::unit_kind::UnitKind;
use crate::lane::units::Unit;
use crate::lane::visibility;
use crate::lane::waypoints;
use crate::lane::world::TickContext;

/// Decisions a mob kind can specialize
pub trait MobBehavior: Sync {
    fn name(&self) -> &'static str;

    /// Is the mob out of every enemy's view this tick?
    fn is_hiding(&self, _mob: &Unit, _ctx: &TickContext) -> bool {
        false
    }

    /// Next navigation waypoint when there is nothing to chase
    fn pick_waypoint(&self, mob: &Unit, ctx: &TickContext) -> Option<WaypointId> {
        waypoints::pick_forward_waypoint(mob, ctx)
    }

    /// Somewhere to take cover when no target is worth chasing
    fn shelter(&self, _mob: &mut Unit, _ctx: &TickContext) -> Option<Destination> {
        None
    }

    /// Where to go while hidden
    fn hidden_destination(&self, _mob: &mut Unit, _ctx: &TickContext) -> Destination {
        Destination::Hold
    }
}

/// Plain lane pusher: chase targets, otherwise march on the enemy base
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardBehavior;

impl MobBehavior for StandardBehavior {
    fn name(&self) -> &'static str {
        "standard"
    }
}

/// Stealth unit: hides behind giants and springs at enemies from cover
#[derive(Debug, Clone, Copy, Default)]
pub struct RogueBehavior;

impl RogueBehavior {
    /// Spot behind `ally`, on the rogue's own side of it
    pub fn shelter_point(mob: &Unit, ally: &Unit) -> Vec2 {
        mob.toward_rear(ally.position, ally.half_size() + mob.stats.hide_distance)
    }

    /// Nearest friendly giant strictly inside sight radius
    fn nearest_giant<'a>(mob: &Unit, ctx: &TickContext<'a>) -> Option<&'a Unit> {
        let sight_sq = mob.stats.sight_radius * mob.stats.sight_radius;
        ctx.mobs(mob.side)
            .filter(|ally| ally.id != mob.id && !ally.is_dead() && ally.kind().is_giant())
            .map(|ally| (ally, mob.distance_sq(ally)))
            .filter(|(_, dist_sq)| *dist_sq < sight_sq)
            .min_by_key(|(_, dist_sq)| OrderedFloat(*dist_sq))
            .map(|(ally, _)| ally)
    }

    /// Nearest live enemy mob inside spring range
    fn spring_victim<'a>(mob: &Unit, ctx: &TickContext<'a>) -> Option<&'a Unit> {
        let range_sq = mob.stats.spring_range * mob.stats.spring_range;
        ctx.mobs(mob.side.opposing())
            .filter(|enemy| !enemy.is_dead())
            .map(|enemy| {
                debug_assert!(enemy.id != mob.id, "spring check against itself");
                debug_assert!(enemy.side != mob.side);
                (enemy, mob.distance_sq(enemy))
            })
            .filter(|(_, dist_sq)| *dist_sq < range_sq)
            .min_by_key(|(_, dist_sq)| OrderedFloat(*dist_sq))
            .map(|(enemy, _)| enemy)
    }
}

impl MobBehavior for RogueBehavior {
    fn name(&self) -> &'static str {
        "rogue"
    }

    fn is_hiding(&self, mob: &Unit, ctx: &TickContext) -> bool {
        visibility::is_hiding(mob, ctx)
    }

    /// Fall back toward the friendly towers instead of rushing the enemy base
    fn pick_waypoint(&self, mob: &Unit, ctx: &TickContext) -> Option<WaypointId> {
        waypoints::pick_home_waypoint(mob, ctx)
    }

    fn shelter(&self, mob: &mut Unit, ctx: &TickContext) -> Option<Destination> {
        let giant = Self::nearest_giant(mob, ctx)?;
        let position = Self::shelter_point(mob, giant);

        mob.target = None;
        if let Some(state) = mob.mob_state_mut() {
            state.following_ally = true;
            state.bound_ally = Some(giant.id);
            state.waypoint = None;
        }

        Some(Destination::Ally {
            id: giant.id,
            position,
        })
    }

    fn hidden_destination(&self, mob: &mut Unit, ctx: &TickContext) -> Destination {
        if let Some(victim) = Self::spring_victim(mob, ctx) {
            tracing::debug!(
                "{} {} springs at {} {}",
                mob.stats.name,
                mob.id,
                victim.stats.name,
                victim.id
            );
            mob.target = Some(victim.id);
            if let Some(state) = mob.mob_state_mut() {
                state.in_spring_range = true;
                state.waypoint = None;
            }
            return Destination::Target {
                id: victim.id,
                position: victim.position,
                contact: mob.half_size() + victim.half_size(),
            };
        }

        let following = mob.mob_state().and_then(|state| {
            state.following_ally.then_some(state.bound_ally).flatten()
        });
        if let Some(ally_id) = following {
            if let Some(ally) = ctx.live_unit(ally_id) {
                return Destination::Ally {
                    id: ally.id,
                    position: Self::shelter_point(mob, ally),
                };
            }
            // Shelter is gone; wait here until revealed
            if let Some(state) = mob.mob_state_mut() {
                state.following_ally = false;
                state.bound_ally = None;
            }
        }

        Destination::Hold
    }
}

static STANDARD: StandardBehavior = StandardBehavior;
static ROGUE: RogueBehavior = RogueBehavior;

/// Strategy for a unit kind
pub fn behavior_for(kind: UnitKind) -> &'static dyn MobBehavior {
    match kind {
        UnitKind::Rogue => &ROGUE,
        _ => &STANDARD,
    }
}

//! Lane simulation - mobs and buildings fighting over a single lane
//!
//! Two players face each other across a rectangular grid. North holds the
//! top rows and pushes toward larger y, South the bottom rows pushing the
//! other way. Every tick each unit picks a target, attacks when in range,
//! and mobs walk toward a target, a sheltering ally, or the next waypoint.
//!
//! Rogues add stealth: out of every enemy's view for long enough, they
//! vanish from targeting and spring at enemies that wander close.

pub mod behavior;
pub mod collision;
pub mod combat;
pub mod constants;
pub mod geometry;
pub mod movement;
pub mod unit_kind;
pub mod units;
pub mod visibility;
pub mod waypoints;
pub mod world;

// Re-exports for convenient access
pub use behavior::{behavior_for, MobBehavior, RogueBehavior, StandardBehavior};
pub use combat::{acquire_target, target_in_range, tick_entity, Attack};
pub use constants::*;
pub use geometry::{segment_intersection, segment_intersects_square};
pub use movement::{tick_mob, Destination};
pub use unit_kind::{StatTable, UnitKind, UnitStats};
pub use units::{MobState, Unit, UnitRole};
pub use visibility::{is_hiding, is_view_obstructed};
pub use waypoints::{pick_forward_waypoint, pick_home_waypoint};
pub use world::{LaneWorld, Player, TickContext, TickReport};

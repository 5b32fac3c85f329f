//! Lane world - owns every unit and drives the simulation tick
//!
//! Units live in one arena keyed by `EntityId`. Each player keeps ordered
//! lists of handles to its mobs and buildings; those lists fix the order in
//! which units are scanned and ticked.

use ahash::AHashMap;
use glam::Vec2;
use std::sync::Arc;

use crate::core::config::LaneConfig;
use crate::core::types::{EntityId, Side, Tick, WaypointId};
use crate::lane::combat::{self, Attack};
use crate::lane::movement;
use crate::lane::unit_kind::{UnitKind, UnitStats};
use crate::lane::units::Unit;

/// One side's registries
#[derive(Debug, Clone)]
pub struct Player {
    pub side: Side,
    mobs: Vec<EntityId>,
    buildings: Vec<EntityId>,
}

impl Player {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            mobs: Vec::new(),
            buildings: Vec::new(),
        }
    }

    pub fn mobs(&self) -> &[EntityId] {
        &self.mobs
    }

    pub fn buildings(&self) -> &[EntityId] {
        &self.buildings
    }
}

/// Things that happened during one world tick
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub tick: Tick,
    pub attacks: Vec<Attack>,
    /// Units removed at the end of the tick
    pub deaths: Vec<EntityId>,
}

/// The game world containing all units and waypoints
#[derive(Debug, Clone)]
pub struct LaneWorld {
    pub config: LaneConfig,
    pub current_tick: Tick,
    units: AHashMap<EntityId, Unit>,
    north: Player,
    south: Player,
    waypoints: Vec<Vec2>,
    next_id: u64,
}

impl LaneWorld {
    pub fn new(config: LaneConfig) -> Self {
        Self {
            config,
            current_tick: 0,
            units: AHashMap::new(),
            north: Player::new(Side::North),
            south: Player::new(Side::South),
            waypoints: Vec::new(),
            next_id: 1,
        }
    }

    /// Replace the waypoint list (fixed for the rest of the game)
    pub fn with_waypoints(mut self, waypoints: Vec<Vec2>) -> Self {
        self.waypoints = waypoints;
        self
    }

    /// Spawn a unit and register it with its player
    pub fn spawn(&mut self, stats: Arc<UnitStats>, position: Vec2, side: Side) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;

        let is_building = stats.kind.is_building();
        let unit = if is_building {
            Unit::building(id, stats, position, side)
        } else {
            Unit::mob(id, stats, position, side, self.config.hidden_threshold_ticks())
        };

        let player = self.player_mut(side);
        if is_building {
            player.buildings.push(id);
        } else {
            player.mobs.push(id);
        }

        tracing::trace!("Spawned {} {} for {}", unit.stats.name, id, side.as_str());
        self.units.insert(id, unit);
        id
    }

    /// Spawn a unit with the built-in stats of its kind
    pub fn spawn_kind(&mut self, kind: UnitKind, position: Vec2, side: Side) -> EntityId {
        self.spawn(Arc::new(kind.default_stats()), position, side)
    }

    /// Look up a unit; `None` once it has been removed
    pub fn unit(&self, id: EntityId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn unit_mut(&mut self, id: EntityId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    pub fn player(&self, side: Side) -> &Player {
        match side {
            Side::North => &self.north,
            Side::South => &self.south,
        }
    }

    fn player_mut(&mut self, side: Side) -> &mut Player {
        match side {
            Side::North => &mut self.north,
            Side::South => &mut self.south,
        }
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    pub fn waypoint(&self, id: WaypointId) -> Option<Vec2> {
        self.waypoints.get(id.0).copied()
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Confirmed stealth state, as shown by the renderer
    pub fn is_hidden(&self, id: EntityId) -> bool {
        self.unit(id).is_some_and(Unit::is_hidden)
    }

    /// Live units of one side, mobs first
    pub fn live_units(&self, side: Side) -> impl Iterator<Item = &Unit> + '_ {
        let player = self.player(side);
        player
            .mobs
            .iter()
            .chain(player.buildings.iter())
            .filter_map(|id| self.units.get(id))
            .filter(|unit| !unit.is_dead())
    }

    fn has_base(&self, side: Side) -> bool {
        self.live_units(side).any(|unit| unit.kind() == UnitKind::Base)
    }

    /// The side still holding its base after the other lost theirs
    pub fn winner(&self) -> Option<Side> {
        match (self.has_base(Side::North), self.has_base(Side::South)) {
            (true, false) => Some(Side::North),
            (false, true) => Some(Side::South),
            _ => None,
        }
    }

    /// Advance the whole world by one tick
    ///
    /// Units run to completion one at a time in a fixed order, so later
    /// units see the fresh positions and damage of earlier ones. Dead units
    /// are removed once everyone has run.
    pub fn tick(&mut self, elapsed: f32) -> TickReport {
        let mut report = TickReport {
            tick: self.current_tick,
            ..TickReport::default()
        };

        let order: Vec<EntityId> = [Side::North, Side::South]
            .iter()
            .flat_map(|&side| {
                let player = self.player(side);
                player
                    .buildings
                    .iter()
                    .chain(player.mobs.iter())
                    .copied()
                    .collect::<Vec<_>>()
            })
            .collect();

        for id in order {
            let Some(current) = self.units.get(&id) else {
                continue;
            };
            if current.is_dead() {
                continue;
            }

            let mut unit = current.clone();
            let attack = {
                let ctx = TickContext::new(self, elapsed);
                tick_unit(&mut unit, &ctx)
            };
            self.units.insert(id, unit);

            if let Some(attack) = attack {
                self.apply_attack(&attack);
                report.attacks.push(attack);
            }
        }

        report.deaths = self.remove_dead();
        self.current_tick += 1;
        report
    }

    fn apply_attack(&mut self, attack: &Attack) {
        let Some(target) = self.units.get_mut(&attack.target) else {
            return;
        };
        target.take_damage(attack.damage);
        if target.is_dead() {
            tracing::debug!(
                "{} {} killed by {}",
                target.stats.name,
                target.id,
                attack.attacker
            );
        }
    }

    /// Drop dead units from the arena and both registries
    pub fn remove_dead(&mut self) -> Vec<EntityId> {
        let mut dead: Vec<EntityId> = self
            .units
            .values()
            .filter(|unit| unit.is_dead())
            .map(|unit| unit.id)
            .collect();
        dead.sort();

        for id in &dead {
            self.units.remove(id);
        }
        for player in [&mut self.north, &mut self.south] {
            player.mobs.retain(|id| !dead.contains(id));
            player.buildings.retain(|id| !dead.contains(id));
        }

        dead
    }
}

fn tick_unit(unit: &mut Unit, ctx: &TickContext) -> Option<Attack> {
    if unit.is_mob() {
        movement::tick_mob(unit, ctx)
    } else {
        combat::tick_entity(unit, ctx)
    }
}

/// Read-only view of the world handed to a unit's tick
///
/// Everything a unit may consult while deciding: registries, waypoints,
/// config and the elapsed time of this step.
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    world: &'a LaneWorld,
    pub elapsed: f32,
}

impl<'a> TickContext<'a> {
    pub fn new(world: &'a LaneWorld, elapsed: f32) -> Self {
        Self { world, elapsed }
    }

    pub fn config(&self) -> &'a LaneConfig {
        &self.world.config
    }

    pub fn unit(&self, id: EntityId) -> Option<&'a Unit> {
        self.world.unit(id)
    }

    /// Resolve a handle to a unit that still exists and is not dead
    pub fn live_unit(&self, id: EntityId) -> Option<&'a Unit> {
        self.unit(id).filter(|unit| !unit.is_dead())
    }

    /// Mobs of one side, in registry order (dead ones included)
    pub fn mobs(&self, side: Side) -> impl Iterator<Item = &'a Unit> + 'a {
        let world = self.world;
        world
            .player(side)
            .mobs
            .iter()
            .filter_map(move |id| world.unit(*id))
    }

    /// Buildings of one side, in registry order (dead ones included)
    pub fn buildings(&self, side: Side) -> impl Iterator<Item = &'a Unit> + 'a {
        let world = self.world;
        world
            .player(side)
            .buildings
            .iter()
            .filter_map(move |id| world.unit(*id))
    }

    /// Mobs then buildings of one side
    pub fn units_of(&self, side: Side) -> impl Iterator<Item = &'a Unit> + 'a {
        self.mobs(side).chain(self.buildings(side))
    }

    /// Every unit of both sides: north mobs, south mobs, then buildings
    pub fn all_units(&self) -> impl Iterator<Item = &'a Unit> + 'a {
        self.mobs(Side::North)
            .chain(self.mobs(Side::South))
            .chain(self.buildings(Side::North))
            .chain(self.buildings(Side::South))
    }

    pub fn waypoints(&self) -> impl Iterator<Item = (WaypointId, Vec2)> + 'a {
        self.world
            .waypoints
            .iter()
            .enumerate()
            .map(|(index, pos)| (WaypointId(index), *pos))
    }

    pub fn waypoint(&self, id: WaypointId) -> Option<Vec2> {
        self.world.waypoint(id)
    }
}

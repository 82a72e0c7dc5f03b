//! Squads: membership, standing order and per-tick sequencing
//!
//! Each tick a squad:
//! 1. Refreshes member snapshots, dropping anything dead or unfinished
//! 2. Flags members near an enemy
//! 3. Splits members into role buckets for the controllers
//! 4. Either sits out a regroup cooldown, starts a regroup, or lets every
//!    controller act on the standing order

pub mod cohesion;
pub mod order;
pub mod proximity;
pub mod roles;
pub mod roster;

pub use cohesion::{closest_by_ground, needs_to_regroup, rally_point, CohesionState};
pub use order::{SquadOrder, SquadOrderType};
pub use proximity::{is_near_enemy, near_enemy_flags, EnemyGrid};
pub use roles::{classify, Role, RolePartition};
pub use roster::SquadRoster;

use std::collections::BTreeSet;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::config::MicroConfig;
use crate::core::types::{UnitTag, Vec2};
use crate::micro::ControllerSet;
use crate::world::unit::Unit;
use crate::world::{Color, TickContext, WorkerPool, WorldView};

/// Radius of the regroup marker in debug overlays
const RALLY_MARKER_RADIUS: f32 = 3.0;

/// What a squad did on one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SquadTick {
    /// Controllers acted on the standing order
    Engaged,
    /// Regroup began this tick; members were sent to `rally`
    RegroupStarted { rally: Vec2 },
    /// Sitting out the cooldown; no commands issued
    Regrouping { remaining: u32 },
}

pub struct Squad {
    name: String,
    priority: u32,
    order: SquadOrder,
    members: BTreeSet<UnitTag>,
    /// Snapshots of `members` from the last refresh
    units: Vec<Unit>,
    near_enemy: AHashMap<UnitTag, bool>,
    cohesion: CohesionState,
    controllers: ControllerSet,
}

impl Squad {
    pub fn new(name: impl Into<String>, order: SquadOrder, priority: u32, config: &MicroConfig) -> Self {
        let name = name.into();
        tracing::info!("Created squad '{}' (priority {})", name, priority);
        Self {
            name,
            priority,
            order,
            members: BTreeSet::new(),
            units: Vec::new(),
            near_enemy: AHashMap::new(),
            cohesion: CohesionState::default(),
            controllers: ControllerSet::new(config.kite_with_ranged_units),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn set_priority(&mut self, priority: u32) {
        self.priority = priority;
    }

    pub fn order(&self) -> &SquadOrder {
        &self.order
    }

    /// Replace the standing order; takes effect next tick
    pub fn set_order(&mut self, order: SquadOrder) {
        self.order = order;
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn contains(&self, tag: UnitTag) -> bool {
        self.members.contains(&tag)
    }

    /// Returns false if the unit was already a member
    pub fn add_unit(&mut self, tag: UnitTag) -> bool {
        self.members.insert(tag)
    }

    pub fn remove_unit(&mut self, tag: UnitTag) -> bool {
        self.units.retain(|u| u.tag != tag);
        self.near_enemy.remove(&tag);
        self.members.remove(&tag)
    }

    pub fn members(&self) -> impl Iterator<Item = UnitTag> + '_ {
        self.members.iter().copied()
    }

    /// Member snapshots as of the last refresh
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn near_enemy(&self, tag: UnitTag) -> Option<bool> {
        self.near_enemy.get(&tag).copied()
    }

    pub fn cohesion(&self) -> CohesionState {
        self.cohesion
    }

    /// Ticks left in the current regroup, 0 when engaging
    pub fn regroup_cooldown(&self) -> u32 {
        self.cohesion.cooldown()
    }

    pub fn controllers(&self) -> &ControllerSet {
        &self.controllers
    }

    /// Mean member position
    pub fn center(&self) -> Option<Vec2> {
        if self.units.is_empty() {
            return None;
        }
        let sum = self
            .units
            .iter()
            .fold(Vec2::default(), |acc, u| acc + u.position);
        let n = self.units.len() as f32;
        Some(Vec2::new(sum.x / n, sum.y / n))
    }

    /// Member with the shortest walking distance to the order position
    pub fn unit_closest_to_order(&self, world: &dyn WorldView) -> Option<&Unit> {
        closest_by_ground(&self.units, self.order.position, world)
    }

    /// Members within the near-enemy radius of `position`
    pub fn units_near(&self, position: Vec2, config: &MicroConfig) -> usize {
        self.units
            .iter()
            .filter(|u| u.position.distance(&position) < config.near_enemy_radius)
            .count()
    }

    /// Re-resolve members against the world and rebuild per-tick state
    ///
    /// Members the world no longer reports, or that are dead or still under
    /// construction, leave the squad here.
    pub fn update_units(&mut self, world: &dyn WorldView, config: &MicroConfig) {
        let units: Vec<Unit> = self
            .members
            .iter()
            .filter_map(|&tag| world.unit(tag))
            .filter(|u| u.is_commandable())
            .cloned()
            .collect();

        if units.len() != self.members.len() {
            tracing::debug!(
                "Squad '{}' dropped {} invalid members",
                self.name,
                self.members.len() - units.len()
            );
            self.members = units.iter().map(|u| u.tag).collect();
        }

        let enemies = world.enemy_units();
        self.near_enemy = near_enemy_flags(&units, &enemies, config.near_enemy_radius);

        let partition = RolePartition::new(&units, config.role_split_range);
        self.controllers.assign(&partition, &units);
        self.units = units;
    }

    /// Run one tick of squad logic
    pub fn on_tick(&mut self, ctx: &mut TickContext) -> SquadTick {
        let world = ctx.world;
        let config = ctx.config;
        self.update_units(world, config);

        if ctx.debug.draw_near_enemy {
            self.draw_near_enemy(ctx);
        }

        if self.cohesion.is_regrouping() {
            let remaining = self.cohesion.tick_down();
            return SquadTick::Regrouping { remaining };
        }

        if needs_to_regroup(
            &self.name,
            &self.units,
            &self.near_enemy,
            self.order.position,
            config,
        ) {
            let rally = rally_point(&self.units, self.order.position, world.start_location());
            self.cohesion = CohesionState::Regrouping {
                remaining: config.regroup_cooldown_ticks,
            };
            tracing::debug!(
                "Squad '{}' regrouping at ({:.1}, {:.1}) for {} ticks",
                self.name,
                rally.x,
                rally.y,
                config.regroup_cooldown_ticks
            );
            if ctx.debug.draw_regroup_point {
                ctx.draw.draw_circle(rally, RALLY_MARKER_RADIUS, Color::MAGENTA);
            }
            self.controllers.regroup(rally, ctx);
            return SquadTick::RegroupStarted { rally };
        }

        self.controllers.execute(&self.order, &self.units, ctx);
        SquadTick::Engaged
    }

    /// Let go of every member, handing workers back to the pool
    pub fn clear(&mut self, world: &dyn WorldView, pool: &mut dyn WorkerPool) {
        for &tag in &self.members {
            let is_worker = world
                .unit(tag)
                .or_else(|| self.units.iter().find(|u| u.tag == tag))
                .map(|u| u.unit_type.is_worker)
                .unwrap_or(false);
            if is_worker {
                pool.release(tag);
            }
        }

        tracing::info!("Cleared squad '{}' ({} members)", self.name, self.members.len());
        self.members.clear();
        self.units.clear();
        self.near_enemy.clear();
        self.cohesion = CohesionState::Engaging;
        self.controllers.assign(&RolePartition::default(), &[]);
    }

    fn draw_near_enemy(&self, ctx: &mut TickContext) {
        for unit in &self.units {
            let color = if self.near_enemy(unit.tag).unwrap_or(false) {
                Color::RED
            } else {
                Color::GREEN
            };
            ctx.draw.draw_circle(unit.position, 0.5, color);
        }
    }
}

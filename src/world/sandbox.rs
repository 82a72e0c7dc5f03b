//! In-memory engine stand-in
//!
//! Holds unit snapshots, a tile visibility set and a blocked-tile set for
//! ground distance. Commands issued by squads are applied after each pass:
//! they replace the unit's order queue, and `step` then walks units toward
//! move targets and resolves attacks with a flat damage rate.

use ahash::{AHashMap, AHashSet};

use crate::core::types::{Player, Tick, TilePos, UnitTag, Vec2};
use crate::world::catalog::UnitPreset;
use crate::world::unit::{QueuedOrder, Unit, UnitType};
use crate::world::{Command, WorldView};

/// Damage dealt per tick by a unit that is in range of its attack target
pub const SANDBOX_DAMAGE_PER_TICK: f32 = 2.0;

pub struct Sandbox {
    units: Vec<Unit>,
    index: AHashMap<UnitTag, usize>,
    visible: AHashSet<TilePos>,
    all_visible: bool,
    blocked: AHashSet<TilePos>,
    start_location: Vec2,
    /// When set, visibility is recomputed from own units each step
    sight_range: Option<f32>,
    next_tag: u64,
    tick: Tick,
}

impl Sandbox {
    pub fn new(start_location: Vec2) -> Self {
        Self {
            units: Vec::new(),
            index: AHashMap::new(),
            visible: AHashSet::new(),
            all_visible: false,
            blocked: AHashSet::new(),
            start_location,
            sight_range: None,
            next_tag: 1,
            tick: 0,
        }
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    /// Spawn a preset unit and return its tag
    pub fn spawn(&mut self, preset: UnitPreset, player: Player, position: Vec2) -> UnitTag {
        self.spawn_type(preset.unit_type(), player, position)
    }

    pub fn spawn_type(&mut self, unit_type: UnitType, player: Player, position: Vec2) -> UnitTag {
        let tag = UnitTag(self.next_tag);
        self.next_tag += 1;
        self.insert(Unit::new(tag, unit_type, player, position));
        tag
    }

    /// Insert a fully built snapshot, replacing any unit with the same tag
    pub fn insert(&mut self, unit: Unit) {
        self.next_tag = self.next_tag.max(unit.tag.0 + 1);
        match self.index.get(&unit.tag) {
            Some(&idx) => self.units[idx] = unit,
            None => {
                self.index.insert(unit.tag, self.units.len());
                self.units.push(unit);
            }
        }
    }

    pub fn unit_mut(&mut self, tag: UnitTag) -> Option<&mut Unit> {
        let idx = *self.index.get(&tag)?;
        self.units.get_mut(idx)
    }

    /// Mark a unit dead; it stays visible to lookups until the next step
    pub fn kill(&mut self, tag: UnitTag) {
        if let Some(unit) = self.unit_mut(tag) {
            unit.is_alive = false;
            unit.health = 0.0;
        }
    }

    /// Forget a unit entirely, as the engine does once it is gone
    pub fn remove(&mut self, tag: UnitTag) {
        self.units.retain(|u| u.tag != tag);
        self.rebuild_index();
    }

    pub fn reveal_all(&mut self) {
        self.all_visible = true;
    }

    pub fn hide_all(&mut self) {
        self.all_visible = false;
        self.visible.clear();
    }

    pub fn reveal(&mut self, tile: TilePos) {
        self.visible.insert(tile);
    }

    pub fn set_sight_range(&mut self, range: Option<f32>) {
        self.sight_range = range;
    }

    /// Make a tile impassable for ground distance queries
    pub fn block(&mut self, tile: TilePos) {
        self.blocked.insert(tile);
    }

    /// Hand a tick's commands to the units; each replaces the order queue
    pub fn apply(&mut self, commands: &[Command]) {
        for command in commands {
            let (tag, order) = match *command {
                Command::Attack { unit, target } => (unit, QueuedOrder::Attack(target)),
                Command::Move { unit, position } => (unit, QueuedOrder::Move(position)),
            };
            if let Some(unit) = self.unit_mut(tag) {
                unit.orders = vec![order];
            }
        }
    }

    /// Advance one tick: drop dead units, move, fight, refresh vision
    pub fn step(&mut self) {
        self.units.retain(|u| u.is_alive);
        self.rebuild_index();

        let positions: AHashMap<UnitTag, Vec2> =
            self.units.iter().map(|u| (u.tag, u.position)).collect();
        let mut damage: AHashMap<UnitTag, f32> = AHashMap::new();

        for unit in &mut self.units {
            let Some(order) = unit.orders.first().copied() else {
                continue;
            };
            match order {
                QueuedOrder::Move(target) => {
                    unit.position = unit.position.step_toward(target, unit.unit_type.speed);
                    if unit.position == target {
                        unit.orders.clear();
                    }
                }
                QueuedOrder::Attack(target) => {
                    let Some(&target_pos) = positions.get(&target) else {
                        unit.orders.clear();
                        continue;
                    };
                    let range = unit.unit_type.attack_range();
                    if unit.position.distance(&target_pos) > range + 0.5 {
                        unit.position = unit.position.step_toward(target_pos, unit.unit_type.speed);
                    } else if range > 0.0 {
                        *damage.entry(target).or_insert(0.0) += SANDBOX_DAMAGE_PER_TICK;
                    }
                }
            }
        }

        for (tag, amount) in damage {
            if let Some(unit) = self.unit_mut(tag) {
                unit.health -= amount;
                if unit.health <= 0.0 {
                    unit.is_alive = false;
                }
            }
        }

        if let Some(range) = self.sight_range {
            self.update_vision(range);
        }

        self.tick += 1;
    }

    /// Recompute visible tiles from the agent's own units
    pub fn update_vision(&mut self, sight_range: f32) {
        self.visible.clear();
        let reach = sight_range.ceil() as i32;
        for unit in self.units.iter().filter(|u| u.player == Player::Own && u.is_alive) {
            let center = unit.position.tile();
            for dx in -reach..=reach {
                for dy in -reach..=reach {
                    if ((dx * dx + dy * dy) as f32) <= sight_range * sight_range {
                        self.visible.insert(TilePos::new(center.x + dx, center.y + dy));
                    }
                }
            }
        }
    }

    /// Count of living units per side
    pub fn living(&self, player: Player) -> usize {
        self.units
            .iter()
            .filter(|u| u.player == player && u.is_alive)
            .count()
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .units
            .iter()
            .enumerate()
            .map(|(idx, u)| (u.tag, idx))
            .collect();
    }
}

impl WorldView for Sandbox {
    fn units(&self) -> &[Unit] {
        &self.units
    }

    fn unit(&self, tag: UnitTag) -> Option<&Unit> {
        self.index.get(&tag).and_then(|&idx| self.units.get(idx))
    }

    fn is_visible(&self, tile: TilePos) -> bool {
        self.all_visible || self.visible.contains(&tile)
    }

    fn ground_distance(&self, from: Vec2, to: Vec2) -> Option<f32> {
        if self.blocked.contains(&from.tile()) || self.blocked.contains(&to.tile()) {
            return None;
        }
        Some(from.distance(&to))
    }

    fn start_location(&self) -> Vec2 {
        self.start_location
    }
}

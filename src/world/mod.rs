//! Engine boundary: what the squad logic reads and what it issues
//!
//! The engine owns the units. Everything here is either a read-only view
//! of the current tick or a fire-and-forget sink for commands.

pub mod catalog;
pub mod sandbox;
pub mod unit;

pub use catalog::UnitPreset;
pub use sandbox::Sandbox;
pub use unit::{Attribute, QueuedOrder, Unit, UnitType, Weapon};

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::config::{DebugConfig, MicroConfig};
use crate::core::types::{TilePos, UnitTag, Vec2};

/// Read-only world state for one tick
pub trait WorldView {
    /// Every unit the agent currently knows about, own and enemy
    fn units(&self) -> &[Unit];

    /// Look up a unit by tag; `None` if the engine no longer reports it
    fn unit(&self, tag: UnitTag) -> Option<&Unit>;

    /// Is the tile currently inside the agent's vision?
    fn is_visible(&self, tile: TilePos) -> bool;

    /// Walking distance between two points, `None` when unreachable
    fn ground_distance(&self, from: Vec2, to: Vec2) -> Option<f32>;

    /// Where the agent's main base started
    fn start_location(&self) -> Vec2;

    /// Known enemy-side units
    fn enemy_units(&self) -> Vec<&Unit> {
        self.units().iter().filter(|u| u.is_enemy()).collect()
    }
}

/// Command issued to a unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    Attack { unit: UnitTag, target: UnitTag },
    Move { unit: UnitTag, position: Vec2 },
}

impl Command {
    pub fn unit(&self) -> UnitTag {
        match self {
            Command::Attack { unit, .. } | Command::Move { unit, .. } => *unit,
        }
    }
}

/// Outgoing command queue; nothing is acknowledged
pub trait CommandSink {
    fn attack(&mut self, unit: UnitTag, target: UnitTag);
    fn move_to(&mut self, unit: UnitTag, position: Vec2);
}

/// Commands collected during a tick, handed to the engine afterwards
#[derive(Debug, Clone, Default)]
pub struct CommandLog {
    pub commands: Vec<Command>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn for_unit(&self, unit: UnitTag) -> impl Iterator<Item = &Command> + '_ {
        self.commands.iter().filter(move |c| c.unit() == unit)
    }

    pub fn drain(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }
}

impl CommandSink for CommandLog {
    fn attack(&mut self, unit: UnitTag, target: UnitTag) {
        self.commands.push(Command::Attack { unit, target });
    }

    fn move_to(&mut self, unit: UnitTag, position: Vec2) {
        self.commands.push(Command::Move { unit, position });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const MAGENTA: Color = Color::new(255, 0, 255);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
}

/// Debug visualization hooks
pub trait DebugDraw {
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color);
}

/// Drawing sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDebugDraw;

impl DebugDraw for NoDebugDraw {
    fn draw_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {}
    fn draw_line(&mut self, _from: Vec2, _to: Vec2, _color: Color) {}
}

/// Shared pool that workers return to when a squad lets go of them
pub trait WorkerPool {
    fn release(&mut self, worker: UnitTag);
}

/// Minimal worker pool tracking which workers are free for the economy
#[derive(Debug, Clone, Default)]
pub struct IdleWorkers {
    idle: BTreeSet<UnitTag>,
}

impl IdleWorkers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, worker: UnitTag) -> bool {
        self.idle.contains(&worker)
    }

    pub fn len(&self) -> usize {
        self.idle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idle.is_empty()
    }
}

impl WorkerPool for IdleWorkers {
    fn release(&mut self, worker: UnitTag) {
        tracing::debug!("Worker {} returned to pool", worker);
        self.idle.insert(worker);
    }
}

/// Everything a squad needs for one tick
///
/// The world is borrowed immutably while commands accumulate in a separate
/// sink, so the engine applies them only after the pass completes.
pub struct TickContext<'a> {
    pub world: &'a dyn WorldView,
    pub commands: &'a mut dyn CommandSink,
    pub draw: &'a mut dyn DebugDraw,
    pub config: &'a MicroConfig,
    pub debug: &'a DebugConfig,
}

impl<'a> TickContext<'a> {
    pub fn new(
        world: &'a dyn WorldView,
        commands: &'a mut dyn CommandSink,
        draw: &'a mut dyn DebugDraw,
        config: &'a MicroConfig,
        debug: &'a DebugConfig,
    ) -> Self {
        Self {
            world,
            commands,
            draw,
            config,
            debug,
        }
    }
}

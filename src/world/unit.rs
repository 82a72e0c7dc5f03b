//! Per-tick unit snapshot as delivered by the engine
//!
//! Snapshots are read-only. A squad re-resolves its tags into snapshots at the
//! start of every tick, so anything holding a `&Unit` knows the unit was alive
//! and finished when the tick began.

use serde::{Deserialize, Serialize};

use crate::core::types::{Player, UnitTag, Vec2};

/// Type attributes a weapon can deal bonus damage against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Light,
    Armored,
    Biological,
    Mechanical,
    Robotic,
    Psionic,
    Massive,
    Structure,
    Hover,
    Heroic,
    Summoned,
}

/// One weapon of a unit type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub range: f32,
    /// Attributes this weapon deals bonus damage against
    pub damage_bonus: Vec<Attribute>,
}

impl Weapon {
    pub fn new(range: f32) -> Self {
        Self {
            range,
            damage_bonus: Vec::new(),
        }
    }

    pub fn with_bonus(mut self, attribute: Attribute) -> Self {
        self.damage_bonus.push(attribute);
        self
    }
}

/// Static type data for a unit
///
/// Categories are independent flags: a type can be both a detector and a
/// structure, or a combat unit and heavy support.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitType {
    pub name: String,
    pub attributes: Vec<Attribute>,
    /// Primary weapon first
    pub weapons: Vec<Weapon>,
    pub is_combat: bool,
    pub is_worker: bool,
    pub is_building: bool,
    pub is_detector: bool,
    /// Siege-style units handled by their own controller
    pub is_heavy_support: bool,
    pub is_egg: bool,
    pub is_larva: bool,
    /// Distance-units per tick, only used by the sandbox
    pub speed: f32,
}

impl UnitType {
    /// Bare type with no categories, weapons or attributes
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            weapons: Vec::new(),
            is_combat: false,
            is_worker: false,
            is_building: false,
            is_detector: false,
            is_heavy_support: false,
            is_egg: false,
            is_larva: false,
            speed: 0.0,
        }
    }

    /// Longest weapon range, 0 for unarmed types
    pub fn attack_range(&self) -> f32 {
        self.weapons.iter().map(|w| w.range).fold(0.0, f32::max)
    }

    pub fn primary_weapon(&self) -> Option<&Weapon> {
        self.weapons.first()
    }

    pub fn has_attribute(&self, attribute: Attribute) -> bool {
        self.attributes.contains(&attribute)
    }
}

/// First entry of a unit's engine-side order queue
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum QueuedOrder {
    Move(Vec2),
    Attack(UnitTag),
}

impl QueuedOrder {
    /// Ground target of the order, if it has one
    pub fn target_pos(&self) -> Option<Vec2> {
        match self {
            QueuedOrder::Move(pos) => Some(*pos),
            QueuedOrder::Attack(_) => None,
        }
    }
}

/// Snapshot of one unit for the current tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub tag: UnitTag,
    pub unit_type: UnitType,
    pub player: Player,
    pub position: Vec2,
    pub health: f32,
    pub is_alive: bool,
    pub is_being_constructed: bool,
    /// Engine order queue, current order first
    pub orders: Vec<QueuedOrder>,
}

impl Unit {
    pub fn new(tag: UnitTag, unit_type: UnitType, player: Player, position: Vec2) -> Self {
        Self {
            tag,
            unit_type,
            player,
            position,
            health: 100.0,
            is_alive: true,
            is_being_constructed: false,
            orders: Vec::new(),
        }
    }

    pub fn distance_to(&self, other: &Unit) -> f32 {
        self.position.distance(&other.position)
    }

    /// Alive and finished; the only units a squad will command
    pub fn is_commandable(&self) -> bool {
        self.is_alive && !self.is_being_constructed
    }

    pub fn is_enemy(&self) -> bool {
        self.player == Player::Enemy
    }

    /// Target position of the first queued order, if any
    pub fn current_order_target(&self) -> Option<Vec2> {
        self.orders.first().and_then(QueuedOrder::target_pos)
    }
}

//! Standing orders handed to squads by the commander

use serde::{Deserialize, Serialize};

use crate::core::types::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SquadOrderType {
    #[default]
    Idle,
    Attack,
    Defend,
    Regroup,
    Retreat,
}

/// Directive for a whole squad; replaced wholesale, never edited in place
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SquadOrder {
    pub order_type: SquadOrderType,
    pub position: Vec2,
    pub priority: u32,
    /// Area of interest around `position`, kept for the commander's bookkeeping
    pub radius: f32,
    /// Human readable status shown in debug overlays
    pub status: String,
}

impl SquadOrder {
    pub fn new(order_type: SquadOrderType, position: Vec2, priority: u32) -> Self {
        Self {
            order_type,
            position,
            priority,
            radius: 0.0,
            status: String::new(),
        }
    }

    /// Convenience: create an attack order
    pub fn attack(position: Vec2) -> Self {
        Self::new(SquadOrderType::Attack, position, 0)
    }

    /// Convenience: create a defend order
    pub fn defend(position: Vec2) -> Self {
        Self::new(SquadOrderType::Defend, position, 0)
    }

    /// Convenience: create an idle order
    pub fn idle(position: Vec2) -> Self {
        Self::new(SquadOrderType::Idle, position, 0)
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Orders under which controllers pick targets and advance
    pub fn is_engagement(&self) -> bool {
        matches!(
            self.order_type,
            SquadOrderType::Attack | SquadOrderType::Defend
        )
    }
}

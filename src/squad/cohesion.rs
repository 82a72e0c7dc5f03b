//! Cohesion policy: when a squad stops to regroup, and where
//!
//! A squad regroups when it has strung out behind its vanguard (the member
//! nearest the order position) while nobody is fighting. Members far enough
//! back are treated as fresh reinforcements and do not count.

use ahash::AHashMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::config::MicroConfig;
use crate::core::types::{UnitTag, Vec2};
use crate::world::unit::Unit;
use crate::world::WorldView;

/// Squad-level engagement state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CohesionState {
    /// Attacking or moving under the standing order
    #[default]
    Engaging,
    /// Holding still for the remaining ticks; no early exit
    Regrouping { remaining: u32 },
}

impl CohesionState {
    pub fn is_regrouping(&self) -> bool {
        matches!(self, CohesionState::Regrouping { .. })
    }

    /// Ticks left before the squad evaluates again
    pub fn cooldown(&self) -> u32 {
        match self {
            CohesionState::Engaging => 0,
            CohesionState::Regrouping { remaining } => *remaining,
        }
    }

    /// Consume one regrouping tick; returns the ticks still remaining
    pub fn tick_down(&mut self) -> u32 {
        let remaining = self.cooldown().saturating_sub(1);
        *self = if remaining == 0 {
            CohesionState::Engaging
        } else {
            CohesionState::Regrouping { remaining }
        };
        remaining
    }
}

/// Member with the smallest straight-line distance to `target`
///
/// Ties keep the earliest member in slice order.
pub fn nearest_to(units: &[Unit], target: Vec2) -> Option<&Unit> {
    units
        .iter()
        .min_by_key(|u| OrderedFloat(u.position.distance(&target)))
}

/// Member with the shortest walking distance to `target`
///
/// Members the world reports as unreachable are skipped.
pub fn closest_by_ground<'u>(
    units: impl IntoIterator<Item = &'u Unit>,
    target: Vec2,
    world: &dyn WorldView,
) -> Option<&'u Unit> {
    units
        .into_iter()
        .filter_map(|u| world.ground_distance(u.position, target).map(|d| (u, d)))
        .min_by_key(|&(_, d)| OrderedFloat(d))
        .map(|(u, _)| u)
}

/// Decide whether the squad must stop and regroup this tick
pub fn needs_to_regroup(
    squad_name: &str,
    units: &[Unit],
    near_enemy: &AHashMap<UnitTag, bool>,
    order_position: Vec2,
    config: &MicroConfig,
) -> bool {
    // The holding squad never regroups
    if squad_name == config.holding_squad_name {
        return false;
    }

    // Someone is already fighting
    let engaged = units.iter().any(|u| {
        u.unit_type.is_combat && near_enemy.get(&u.tag).copied().unwrap_or(false)
    });
    if engaged {
        return false;
    }

    let Some(anchor) = nearest_to(units, order_position) else {
        return false;
    };

    units.iter().any(|u| {
        let gap = u.position.distance(&anchor.position);
        gap > config.regroup_min_gap && gap <= config.regroup_max_gap
    })
}

/// Where a regrouping squad gathers
///
/// Always an existing member's position (the one nearest the order
/// position), falling back to `start_location` only when there are no
/// members.
pub fn rally_point(units: &[Unit], order_position: Vec2, start_location: Vec2) -> Vec2 {
    nearest_to(units, order_position)
        .map(|u| u.position)
        .unwrap_or(start_location)
}

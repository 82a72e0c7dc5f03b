//! Role classification: which controller handles each squad member
//!
//! Type categories overlap (a siege unit is also a ranged combat unit, a
//! turret is a detector and a structure), so roles are assigned by a fixed
//! precedence and the first match wins.

use serde::{Deserialize, Serialize};

use crate::core::types::UnitTag;
use crate::world::unit::{Unit, UnitType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    HeavySupport,
    Detection,
    Ranged,
    Melee,
}

impl Role {
    /// In precedence order
    pub const ALL: [Role; 4] = [Role::HeavySupport, Role::Detection, Role::Ranged, Role::Melee];

    fn index(self) -> usize {
        self as usize
    }
}

/// Pick the role for a unit type
pub fn classify(unit_type: &UnitType, split_range: f32) -> Role {
    if unit_type.is_heavy_support {
        Role::HeavySupport
    } else if unit_type.is_detector && !unit_type.is_building {
        Role::Detection
    } else if unit_type.attack_range() >= split_range {
        Role::Ranged
    } else {
        Role::Melee
    }
}

/// Disjoint role buckets covering a squad's membership
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RolePartition {
    buckets: [Vec<UnitTag>; 4],
}

impl RolePartition {
    pub fn new(units: &[Unit], split_range: f32) -> Self {
        let mut partition = Self::default();
        for unit in units {
            let role = classify(&unit.unit_type, split_range);
            partition.buckets[role.index()].push(unit.tag);
        }
        partition
    }

    pub fn units(&self, role: Role) -> &[UnitTag] {
        &self.buckets[role.index()]
    }

    pub fn role_of(&self, tag: UnitTag) -> Option<Role> {
        Role::ALL
            .into_iter()
            .find(|role| self.buckets[role.index()].contains(&tag))
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }
}

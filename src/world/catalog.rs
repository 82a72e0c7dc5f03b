//! Built-in unit type presets
//!
//! The live engine supplies its own type data; these presets cover the
//! archetypes the sandbox and tests need (one per controller role plus the
//! worker, structure and larval categories).

use serde::{Deserialize, Serialize};

use crate::world::unit::{Attribute, UnitType, Weapon};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitPreset {
    // Short-range
    Zealot,
    Zergling,

    // Long-range
    Marine,
    Marauder,
    Stalker,
    Hydralisk,
    Hellion,

    // Heavy support
    SiegeTank,

    // Detection
    Observer,
    MissileTurret,

    // Economy
    Scv,
    Probe,
    Drone,

    // Growth forms
    Larva,
    Egg,

    // Structures
    CommandCenter,
    Pylon,
}

impl UnitPreset {
    pub const ALL: [UnitPreset; 17] = [
        UnitPreset::Zealot,
        UnitPreset::Zergling,
        UnitPreset::Marine,
        UnitPreset::Marauder,
        UnitPreset::Stalker,
        UnitPreset::Hydralisk,
        UnitPreset::Hellion,
        UnitPreset::SiegeTank,
        UnitPreset::Observer,
        UnitPreset::MissileTurret,
        UnitPreset::Scv,
        UnitPreset::Probe,
        UnitPreset::Drone,
        UnitPreset::Larva,
        UnitPreset::Egg,
        UnitPreset::CommandCenter,
        UnitPreset::Pylon,
    ];

    /// Build the type data for this preset
    pub fn unit_type(&self) -> UnitType {
        use Attribute::*;

        let mut ty = UnitType::named(format!("{:?}", self));
        match self {
            UnitPreset::Zealot => {
                ty.attributes = vec![Light, Biological];
                ty.weapons = vec![Weapon::new(0.1)];
                ty.is_combat = true;
                ty.speed = 0.2;
            }
            UnitPreset::Zergling => {
                ty.attributes = vec![Light, Biological];
                ty.weapons = vec![Weapon::new(0.1)];
                ty.is_combat = true;
                ty.speed = 0.3;
            }
            UnitPreset::Marine => {
                ty.attributes = vec![Light, Biological];
                ty.weapons = vec![Weapon::new(5.0)];
                ty.is_combat = true;
                ty.speed = 0.2;
            }
            UnitPreset::Marauder => {
                ty.attributes = vec![Armored, Biological];
                ty.weapons = vec![Weapon::new(6.0).with_bonus(Armored)];
                ty.is_combat = true;
                ty.speed = 0.2;
            }
            UnitPreset::Stalker => {
                ty.attributes = vec![Armored, Mechanical];
                ty.weapons = vec![Weapon::new(6.0).with_bonus(Armored)];
                ty.is_combat = true;
                ty.speed = 0.26;
            }
            UnitPreset::Hydralisk => {
                ty.attributes = vec![Light, Biological];
                ty.weapons = vec![Weapon::new(5.0)];
                ty.is_combat = true;
                ty.speed = 0.2;
            }
            UnitPreset::Hellion => {
                ty.attributes = vec![Light, Mechanical];
                ty.weapons = vec![Weapon::new(5.0).with_bonus(Light)];
                ty.is_combat = true;
                ty.speed = 0.33;
            }
            UnitPreset::SiegeTank => {
                ty.attributes = vec![Armored, Mechanical];
                ty.weapons = vec![Weapon::new(7.0).with_bonus(Armored)];
                ty.is_combat = true;
                ty.is_heavy_support = true;
                ty.speed = 0.18;
            }
            UnitPreset::Observer => {
                ty.attributes = vec![Light, Mechanical];
                ty.is_detector = true;
                ty.speed = 0.15;
            }
            UnitPreset::MissileTurret => {
                ty.attributes = vec![Armored, Mechanical, Structure];
                ty.weapons = vec![Weapon::new(7.0)];
                ty.is_detector = true;
                ty.is_building = true;
            }
            UnitPreset::Scv | UnitPreset::Probe => {
                ty.attributes = vec![Light, Mechanical];
                ty.weapons = vec![Weapon::new(0.1)];
                ty.is_worker = true;
                ty.speed = 0.2;
            }
            UnitPreset::Drone => {
                ty.attributes = vec![Light, Biological];
                ty.weapons = vec![Weapon::new(0.1)];
                ty.is_worker = true;
                ty.speed = 0.2;
            }
            UnitPreset::Larva => {
                ty.attributes = vec![Light, Biological];
                ty.is_larva = true;
            }
            UnitPreset::Egg => {
                ty.attributes = vec![Biological];
                ty.is_egg = true;
            }
            UnitPreset::CommandCenter => {
                ty.attributes = vec![Armored, Mechanical, Structure];
                ty.is_building = true;
            }
            UnitPreset::Pylon => {
                ty.attributes = vec![Armored, Structure];
                ty.is_building = true;
            }
        }
        ty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names_match_variant() {
        assert_eq!(UnitPreset::Marine.unit_type().name, "Marine");
        assert_eq!(UnitPreset::SiegeTank.unit_type().name, "SiegeTank");
    }

    #[test]
    fn test_marauder_has_armored_bonus() {
        let marauder = UnitPreset::Marauder.unit_type();
        let weapon = marauder.primary_weapon().expect("marauder is armed");
        assert!(weapon.damage_bonus.contains(&Attribute::Armored));
    }

    #[test]
    fn test_melee_presets_below_split_range() {
        for preset in [UnitPreset::Zealot, UnitPreset::Zergling] {
            assert!(preset.unit_type().attack_range() < 1.5);
        }
    }

    #[test]
    fn test_only_growth_forms_are_eggs_or_larvae() {
        for preset in UnitPreset::ALL {
            let ty = preset.unit_type();
            let growth = ty.is_egg || ty.is_larva;
            assert_eq!(growth, matches!(preset, UnitPreset::Egg | UnitPreset::Larva));
        }
    }
}

//! Target filtering and scoring shared by the attacking controllers
//!
//! Priority only looks at unit categories and the attacker's bonus damage.
//! Health, damage already in flight and unit counts are not considered.

use std::cmp::Reverse;

use ordered_float::OrderedFloat;

use crate::world::unit::Unit;
use crate::world::WorldView;

/// Combat unit our primary weapon has bonus damage against
pub const PRIORITY_BONUS_MATCHUP: i32 = 15;
/// Any other combat unit
pub const PRIORITY_COMBAT: i32 = 10;
/// Workers and other economic units
pub const PRIORITY_WORKER: i32 = 9;
/// Structures and everything else
pub const PRIORITY_OTHER: i32 = 1;

/// Score of one candidate for one attacker; derived fresh every tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetScore {
    pub priority: i32,
    pub distance: f32,
}

/// Can this candidate be shot at this tick?
pub fn is_viable_target(target: &Unit, world: &dyn WorldView) -> bool {
    target.is_alive
        && !target.unit_type.is_egg
        && !target.unit_type.is_larva
        && world.is_visible(target.position.tile())
}

/// Drop candidates that are dead, larval or out of sight
pub fn viable_targets<'w>(candidates: &[&'w Unit], world: &dyn WorldView) -> Vec<&'w Unit> {
    candidates
        .iter()
        .copied()
        .filter(|t| is_viable_target(t, world))
        .collect()
}

/// How much `attacker` wants to hit `target`
pub fn attack_priority(attacker: &Unit, target: &Unit) -> i32 {
    let target_type = &target.unit_type;

    if target_type.is_combat {
        let has_bonus = attacker
            .unit_type
            .primary_weapon()
            .map(|weapon| {
                weapon
                    .damage_bonus
                    .iter()
                    .any(|attr| target_type.has_attribute(*attr))
            })
            .unwrap_or(false);

        return if has_bonus {
            PRIORITY_BONUS_MATCHUP
        } else {
            PRIORITY_COMBAT
        };
    }

    if target_type.is_worker {
        return PRIORITY_WORKER;
    }

    PRIORITY_OTHER
}

pub fn score(attacker: &Unit, target: &Unit) -> TargetScore {
    TargetScore {
        priority: attack_priority(attacker, target),
        distance: attacker.distance_to(target),
    }
}

/// Best target: highest priority, then nearest, then lowest tag
///
/// The ordering is total, so the winner does not depend on the order the
/// candidates arrive in.
pub fn select_target<'w>(attacker: &Unit, targets: &[&'w Unit]) -> Option<&'w Unit> {
    targets.iter().copied().max_by_key(|target| {
        let s = score(attacker, target);
        (
            s.priority,
            Reverse(OrderedFloat(s.distance)),
            Reverse(target.tag),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Player, UnitTag, Vec2};
    use crate::world::catalog::UnitPreset;
    use crate::world::Sandbox;
    use proptest::prelude::*;

    fn unit(tag: u64, preset: UnitPreset, player: Player, x: f32, y: f32) -> Unit {
        Unit::new(UnitTag(tag), preset.unit_type(), player, Vec2::new(x, y))
    }

    #[test]
    fn test_priority_ladder() {
        let marauder = unit(1, UnitPreset::Marauder, Player::Own, 0.0, 0.0);

        let stalker = unit(2, UnitPreset::Stalker, Player::Enemy, 5.0, 0.0);
        let zealot = unit(3, UnitPreset::Zealot, Player::Enemy, 5.0, 0.0);
        let probe = unit(4, UnitPreset::Probe, Player::Enemy, 5.0, 0.0);
        let pylon = unit(5, UnitPreset::Pylon, Player::Enemy, 5.0, 0.0);

        assert_eq!(attack_priority(&marauder, &stalker), PRIORITY_BONUS_MATCHUP);
        assert_eq!(attack_priority(&marauder, &zealot), PRIORITY_COMBAT);
        assert_eq!(attack_priority(&marauder, &probe), PRIORITY_WORKER);
        assert_eq!(attack_priority(&marauder, &pylon), PRIORITY_OTHER);

        assert!(PRIORITY_BONUS_MATCHUP > PRIORITY_COMBAT);
        assert!(PRIORITY_COMBAT > PRIORITY_WORKER);
        assert!(PRIORITY_WORKER > PRIORITY_OTHER);
    }

    #[test]
    fn test_unarmed_attacker_has_no_bonus() {
        let observer = unit(1, UnitPreset::Observer, Player::Own, 0.0, 0.0);
        let stalker = unit(2, UnitPreset::Stalker, Player::Enemy, 5.0, 0.0);
        assert_eq!(attack_priority(&observer, &stalker), PRIORITY_COMBAT);
    }

    #[test]
    fn test_higher_priority_beats_distance() {
        let marauder = unit(1, UnitPreset::Marauder, Player::Own, 0.0, 0.0);
        let probe = unit(2, UnitPreset::Probe, Player::Enemy, 5.0, 0.0);
        let stalker = unit(3, UnitPreset::Stalker, Player::Enemy, 10.0, 0.0);

        let chosen = select_target(&marauder, &[&probe, &stalker]);
        assert_eq!(chosen.map(|t| t.tag), Some(UnitTag(3)));
    }

    #[test]
    fn test_equal_priority_prefers_nearest() {
        let marine = unit(1, UnitPreset::Marine, Player::Own, 0.0, 0.0);
        let far = unit(2, UnitPreset::Zealot, Player::Enemy, 9.0, 0.0);
        let near = unit(3, UnitPreset::Zealot, Player::Enemy, 4.0, 0.0);

        let chosen = select_target(&marine, &[&far, &near]);
        assert_eq!(chosen.map(|t| t.tag), Some(UnitTag(3)));
    }

    #[test]
    fn test_no_targets_selects_nothing() {
        let marine = unit(1, UnitPreset::Marine, Player::Own, 0.0, 0.0);
        assert!(select_target(&marine, &[]).is_none());
    }

    #[test]
    fn test_viability_filter() {
        let mut sandbox = Sandbox::new(Vec2::default());
        sandbox.reveal(Vec2::new(5.0, 5.0).tile());

        let visible = unit(1, UnitPreset::Zealot, Player::Enemy, 5.0, 5.0);
        let hidden = unit(2, UnitPreset::Zealot, Player::Enemy, 50.0, 50.0);
        let larva = unit(3, UnitPreset::Larva, Player::Enemy, 5.2, 5.2);
        let egg = unit(4, UnitPreset::Egg, Player::Enemy, 5.4, 5.4);
        let mut dead = unit(5, UnitPreset::Zealot, Player::Enemy, 5.6, 5.6);
        dead.is_alive = false;

        let viable = viable_targets(&[&visible, &hidden, &larva, &egg, &dead], &sandbox);
        let tags: Vec<UnitTag> = viable.iter().map(|t| t.tag).collect();
        assert_eq!(tags, vec![UnitTag(1)]);
    }

    proptest! {
        /// Property: the chosen target does not depend on candidate order
        #[test]
        fn prop_selection_is_permutation_invariant(
            specs in prop::collection::vec((0usize..UnitPreset::ALL.len(), 0u8..20, 0u8..20), 1..12),
            rotation in 0usize..12
        ) {
            let attacker = unit(0, UnitPreset::Marauder, Player::Own, 0.0, 0.0);
            let candidates: Vec<Unit> = specs
                .iter()
                .enumerate()
                .map(|(i, &(p, x, y))| {
                    unit(i as u64 + 1, UnitPreset::ALL[p], Player::Enemy, x as f32, y as f32)
                })
                .collect();

            let forward: Vec<&Unit> = candidates.iter().collect();
            let mut reversed = forward.clone();
            reversed.reverse();
            let mut rotated = forward.clone();
            let len = rotated.len();
            rotated.rotate_left(rotation % len);

            let expected = select_target(&attacker, &forward).map(|t| t.tag);
            prop_assert_eq!(select_target(&attacker, &reversed).map(|t| t.tag), expected);
            prop_assert_eq!(select_target(&attacker, &rotated).map(|t| t.tag), expected);

            // And the winner is maximal by (priority, -distance)
            let best = expected.and_then(|tag| candidates.iter().find(|c| c.tag == tag));
            if let Some(best) = best {
                let best_score = score(&attacker, best);
                for c in &candidates {
                    let s = score(&attacker, c);
                    prop_assert!(
                        s.priority < best_score.priority
                            || (s.priority == best_score.priority && s.distance >= best_score.distance)
                    );
                }
            }
        }
    }
}

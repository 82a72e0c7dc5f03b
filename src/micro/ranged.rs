//! Long-range controller
//!
//! Every unit with attack range at or above the split range. Under Attack or
//! Defend each unit shoots its best visible target; with nothing in sight it
//! closes on the order position.

use crate::micro::{engage, MicroManager};
use crate::squad::order::SquadOrder;
use crate::squad::roles::Role;
use crate::world::unit::Unit;
use crate::world::TickContext;

pub struct RangedManager {
    units: Vec<Unit>,
    /// Kiting is not modelled; ranged units take the ordinary attack path
    /// whatever this is set to.
    kite: bool,
}

impl RangedManager {
    pub fn new(kite: bool) -> Self {
        if kite {
            tracing::debug!("Kiting requested for ranged units; attacking normally");
        }
        Self {
            units: Vec::new(),
            kite,
        }
    }

    pub fn kites(&self) -> bool {
        self.kite
    }
}

impl MicroManager for RangedManager {
    fn role(&self) -> Role {
        Role::Ranged
    }

    fn units(&self) -> &[Unit] {
        &self.units
    }

    fn assign(&mut self, units: Vec<Unit>) {
        self.units = units;
    }

    fn execute(&mut self, order: &SquadOrder, _squad_units: &[Unit], ctx: &mut TickContext) {
        engage(&self.units, order, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{DebugConfig, MicroConfig};
    use crate::core::types::{Player, UnitTag, Vec2};
    use crate::squad::order::SquadOrderType;
    use crate::world::catalog::UnitPreset;
    use crate::world::unit::QueuedOrder;
    use crate::world::{Command, CommandLog, NoDebugDraw, Sandbox, WorldView};

    struct Fixture {
        sandbox: Sandbox,
        config: MicroConfig,
        debug: DebugConfig,
        log: CommandLog,
    }

    impl Fixture {
        fn new() -> Self {
            let mut sandbox = Sandbox::new(Vec2::default());
            sandbox.reveal_all();
            Self {
                sandbox,
                config: MicroConfig::default(),
                debug: DebugConfig::default(),
                log: CommandLog::new(),
            }
        }

        fn run(&mut self, manager: &mut RangedManager, order: &SquadOrder) {
            let mut draw = NoDebugDraw;
            let mut ctx = TickContext::new(
                &self.sandbox,
                &mut self.log,
                &mut draw,
                &self.config,
                &self.debug,
            );
            manager.execute(order, &[], &mut ctx);
        }

        fn own(&self, tag: UnitTag) -> Unit {
            self.sandbox.unit(tag).cloned().expect("unit spawned")
        }
    }

    #[test]
    fn test_attacks_best_target() {
        let mut f = Fixture::new();
        let marauder = f.sandbox.spawn(UnitPreset::Marauder, Player::Own, Vec2::new(0.0, 0.0));
        f.sandbox.spawn(UnitPreset::Probe, Player::Enemy, Vec2::new(5.0, 0.0));
        let stalker = f.sandbox.spawn(UnitPreset::Stalker, Player::Enemy, Vec2::new(10.0, 0.0));

        let mut manager = RangedManager::new(false);
        manager.assign(vec![f.own(marauder)]);
        f.run(&mut manager, &SquadOrder::attack(Vec2::new(40.0, 0.0)));

        assert_eq!(
            f.log.commands,
            vec![Command::Attack {
                unit: marauder,
                target: stalker
            }]
        );
    }

    #[test]
    fn test_non_engagement_orders_do_nothing() {
        let mut f = Fixture::new();
        let marine = f.sandbox.spawn(UnitPreset::Marine, Player::Own, Vec2::new(0.0, 0.0));
        f.sandbox.spawn(UnitPreset::Zealot, Player::Enemy, Vec2::new(3.0, 0.0));

        let mut manager = RangedManager::new(false);
        manager.assign(vec![f.own(marine)]);

        for kind in [
            SquadOrderType::Idle,
            SquadOrderType::Regroup,
            SquadOrderType::Retreat,
        ] {
            f.run(&mut manager, &SquadOrder::new(kind, Vec2::new(40.0, 0.0), 0));
        }
        assert!(f.log.is_empty());
    }

    #[test]
    fn test_moves_when_nothing_visible() {
        let mut f = Fixture::new();
        f.sandbox.hide_all();
        let marine = f.sandbox.spawn(UnitPreset::Marine, Player::Own, Vec2::new(0.0, 0.0));
        f.sandbox.spawn(UnitPreset::Zealot, Player::Enemy, Vec2::new(3.0, 0.0));
        let target = Vec2::new(6.0, 0.0);

        let mut manager = RangedManager::new(false);
        manager.assign(vec![f.own(marine)]);
        f.run(&mut manager, &SquadOrder::defend(target));

        assert_eq!(
            f.log.commands,
            vec![Command::Move {
                unit: marine,
                position: target
            }]
        );
    }

    #[test]
    fn test_move_suppressed_when_already_queued() {
        let mut f = Fixture::new();
        let target = Vec2::new(6.0, 0.0);
        let marine = f.sandbox.spawn(UnitPreset::Marine, Player::Own, Vec2::new(0.0, 0.0));
        if let Some(u) = f.sandbox.unit_mut(marine) {
            u.orders.push(QueuedOrder::Move(target));
        }

        let mut manager = RangedManager::new(false);
        manager.assign(vec![f.own(marine)]);
        f.run(&mut manager, &SquadOrder::attack(target));

        assert!(f.log.is_empty());
    }

    #[test]
    fn test_inside_move_threshold_stays_put() {
        let mut f = Fixture::new();
        let marine = f.sandbox.spawn(UnitPreset::Marine, Player::Own, Vec2::new(0.0, 0.0));

        let mut manager = RangedManager::new(false);
        manager.assign(vec![f.own(marine)]);
        f.run(&mut manager, &SquadOrder::attack(Vec2::new(4.0, 0.0)));

        assert!(f.log.is_empty());
    }

    #[test]
    fn test_kite_flag_does_not_change_commands() {
        let mut plain = Fixture::new();
        let mut kiting = Fixture::new();
        let mut tags = Vec::new();
        for f in [&mut plain, &mut kiting] {
            let marine = f.sandbox.spawn(UnitPreset::Marine, Player::Own, Vec2::new(0.0, 0.0));
            f.sandbox.spawn(UnitPreset::Zergling, Player::Enemy, Vec2::new(3.0, 0.0));
            tags.push(marine);
        }

        let mut a = RangedManager::new(false);
        let mut b = RangedManager::new(true);
        assert!(b.kites());
        a.assign(vec![plain.own(tags[0])]);
        b.assign(vec![kiting.own(tags[1])]);

        let order = SquadOrder::attack(Vec2::new(30.0, 0.0));
        plain.run(&mut a, &order);
        kiting.run(&mut b, &order);

        assert_eq!(plain.log.commands, kiting.log.commands);
    }
}

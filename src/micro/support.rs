//! Heavy-support controller (siege units)
//!
//! Siege units get their own bucket so they can diverge later; for now they
//! fight with the shared attack path.

use crate::micro::{engage, MicroManager};
use crate::squad::order::SquadOrder;
use crate::squad::roles::Role;
use crate::world::unit::Unit;
use crate::world::TickContext;

#[derive(Default)]
pub struct SupportManager {
    units: Vec<Unit>,
}

impl SupportManager {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MicroManager for SupportManager {
    fn role(&self) -> Role {
        Role::HeavySupport
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
    use crate::core::types::{Player, Vec2};
    use crate::squad::order::SquadOrderType;
    use crate::world::catalog::UnitPreset;
    use crate::world::{Command, CommandLog, NoDebugDraw, Sandbox, WorldView};

    fn run(sandbox: &Sandbox, manager: &mut SupportManager, order: &SquadOrder) -> CommandLog {
        let config = MicroConfig::default();
        let debug = DebugConfig::default();
        let mut log = CommandLog::new();
        let mut draw = NoDebugDraw;
        {
            let mut ctx = TickContext::new(sandbox, &mut log, &mut draw, &config, &debug);
            manager.execute(order, &[], &mut ctx);
        }
        log
    }

    #[test]
    fn test_siege_tank_attacks_visible_enemy() {
        let mut sandbox = Sandbox::new(Vec2::default());
        sandbox.reveal_all();
        let tank = sandbox.spawn(UnitPreset::SiegeTank, Player::Own, Vec2::new(0.0, 0.0));
        let stalker = sandbox.spawn(UnitPreset::Stalker, Player::Enemy, Vec2::new(8.0, 0.0));

        let mut manager = SupportManager::new();
        assert_eq!(manager.role(), Role::HeavySupport);
        manager.assign(sandbox.unit(tank).cloned().into_iter().collect());
        let log = run(&sandbox, &mut manager, &SquadOrder::attack(Vec2::new(40.0, 0.0)));

        assert_eq!(
            log.commands,
            vec![Command::Attack {
                unit: tank,
                target: stalker
            }]
        );
    }

    #[test]
    fn test_siege_tank_advances_without_targets() {
        let mut sandbox = Sandbox::new(Vec2::default());
        sandbox.reveal_all();
        let tank = sandbox.spawn(UnitPreset::SiegeTank, Player::Own, Vec2::new(0.0, 0.0));
        let goal = Vec2::new(40.0, 0.0);

        let mut manager = SupportManager::new();
        manager.assign(sandbox.unit(tank).cloned().into_iter().collect());
        let log = run(&sandbox, &mut manager, &SquadOrder::defend(goal));

        assert_eq!(
            log.commands,
            vec![Command::Move {
                unit: tank,
                position: goal
            }]
        );
    }

    #[test]
    fn test_siege_tank_holds_on_non_engagement_orders() {
        let mut sandbox = Sandbox::new(Vec2::default());
        sandbox.reveal_all();
        let tank = sandbox.spawn(UnitPreset::SiegeTank, Player::Own, Vec2::new(0.0, 0.0));
        sandbox.spawn(UnitPreset::Zealot, Player::Enemy, Vec2::new(5.0, 0.0));

        let mut manager = SupportManager::new();
        manager.assign(sandbox.unit(tank).cloned().into_iter().collect());
        for kind in [SquadOrderType::Idle, SquadOrderType::Regroup, SquadOrderType::Retreat] {
            let log = run(&sandbox, &mut manager, &SquadOrder::new(kind, Vec2::new(40.0, 0.0), 0));
            assert!(log.is_empty());
        }
    }
}

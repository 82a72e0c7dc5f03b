//! Detection controller
//!
//! Detectors do not fight. They shadow the squad member that is closest to
//! the order position by ground distance, so detection arrives with the
//! vanguard. With no reachable escort they head for the order position.

use crate::micro::{move_unless_queued, MicroManager};
use crate::squad::cohesion::closest_by_ground;
use crate::squad::order::SquadOrder;
use crate::squad::roles::Role;
use crate::world::unit::Unit;
use crate::world::TickContext;

#[derive(Default)]
pub struct DetectorManager {
    units: Vec<Unit>,
}

impl DetectorManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn owns(&self, unit: &Unit) -> bool {
        self.units.iter().any(|u| u.tag == unit.tag)
    }
}

impl MicroManager for DetectorManager {
    fn role(&self) -> Role {
        Role::Detection
    }

    fn units(&self) -> &[Unit] {
        &self.units
    }

    fn assign(&mut self, units: Vec<Unit>) {
        self.units = units;
    }

    fn execute(&mut self, order: &SquadOrder, squad_units: &[Unit], ctx: &mut TickContext) {
        if !order.is_engagement() || self.units.is_empty() {
            return;
        }

        let escorts = squad_units.iter().filter(|u| !self.owns(u));
        let destination = closest_by_ground(escorts, order.position, ctx.world)
            .map(|leader| leader.position)
            .unwrap_or(order.position);

        for unit in &self.units {
            if unit.position.distance(&destination) > ctx.config.move_threshold {
                move_unless_queued(unit, destination, ctx);
            }
        }
    }
}

//! Short-range controller; same targeting as ranged, no kiting flag

use crate::micro::{engage, MicroManager};
use crate::squad::order::SquadOrder;
use crate::squad::roles::Role;
use crate::world::unit::Unit;
use crate::world::TickContext;

#[derive(Default)]
pub struct MeleeManager {
    units: Vec<Unit>,
}

impl MeleeManager {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MicroManager for MeleeManager {
    fn role(&self) -> Role {
        Role::Melee
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

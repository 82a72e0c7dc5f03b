//! Role controllers: per-role targeting and movement inside a squad
//!
//! Architecture: one trait, one implementation per role
//! - `MicroManager` is the interface the squad drives (assign / execute / regroup)
//! - `ControllerSet` holds one controller per `Role` and fans calls out
//! - Adding a role means adding a controller; squad sequencing is untouched

pub mod detector;
pub mod melee;
pub mod ranged;
pub mod support;
pub mod targeting;

pub use detector::DetectorManager;
pub use melee::MeleeManager;
pub use ranged::RangedManager;
pub use support::SupportManager;
pub use targeting::{attack_priority, select_target, viable_targets, TargetScore};

use crate::core::types::Vec2;
use crate::squad::order::SquadOrder;
use crate::squad::roles::{Role, RolePartition};
use crate::world::unit::Unit;
use crate::world::{Color, TickContext};

/// Controller for one role within a squad
pub trait MicroManager {
    fn role(&self) -> Role;

    /// Units currently owned; replaced every tick
    fn units(&self) -> &[Unit];

    /// Take ownership of this tick's members for the role
    fn assign(&mut self, units: Vec<Unit>);

    /// Act on the standing order
    ///
    /// `squad_units` is the whole squad, for controllers that position
    /// themselves relative to other roles.
    fn execute(&mut self, order: &SquadOrder, squad_units: &[Unit], ctx: &mut TickContext);

    /// Pull every owned unit toward the rally point
    fn regroup(&mut self, point: Vec2, ctx: &mut TickContext) {
        for unit in self.units() {
            if unit.position.distance(&point) > ctx.config.move_threshold {
                move_unless_queued(unit, point, ctx);
            }
        }
    }
}

/// Issue a move unless the unit's current order already targets `position`
///
/// Returns whether a command was issued.
pub fn move_unless_queued(unit: &Unit, position: Vec2, ctx: &mut TickContext) -> bool {
    if unit.current_order_target() == Some(position) {
        tracing::trace!("{} already moving to ({}, {})", unit.tag, position.x, position.y);
        return false;
    }
    ctx.commands.move_to(unit.tag, position);
    true
}

/// Shared attack path: shoot the best visible target, else close on the order
pub fn engage(units: &[Unit], order: &SquadOrder, ctx: &mut TickContext) {
    if !order.is_engagement() || units.is_empty() {
        return;
    }

    let world = ctx.world;
    let candidates = world.enemy_units();
    let targets = viable_targets(&candidates, world);

    for unit in units {
        if let Some(target) = select_target(unit, &targets) {
            ctx.commands.attack(unit.tag, target.tag);
            if ctx.debug.draw_unit_target_info {
                ctx.draw.draw_line(unit.position, target.position, Color::RED);
            }
        } else if unit.position.distance(&order.position) > ctx.config.move_threshold {
            move_unless_queued(unit, order.position, ctx);
        }
    }
}

/// One controller per role
pub struct ControllerSet {
    controllers: Vec<Box<dyn MicroManager>>,
}

impl ControllerSet {
    pub fn new(kite_with_ranged_units: bool) -> Self {
        Self {
            controllers: vec![
                Box::new(SupportManager::new()),
                Box::new(DetectorManager::new()),
                Box::new(RangedManager::new(kite_with_ranged_units)),
                Box::new(MeleeManager::new()),
            ],
        }
    }

    /// Hand each controller the members of its role
    pub fn assign(&mut self, partition: &RolePartition, units: &[Unit]) {
        for controller in &mut self.controllers {
            let tags = partition.units(controller.role());
            let owned = units
                .iter()
                .filter(|u| tags.contains(&u.tag))
                .cloned()
                .collect();
            controller.assign(owned);
        }
    }

    pub fn execute(&mut self, order: &SquadOrder, squad_units: &[Unit], ctx: &mut TickContext) {
        for controller in &mut self.controllers {
            controller.execute(order, squad_units, ctx);
        }
    }

    pub fn regroup(&mut self, point: Vec2, ctx: &mut TickContext) {
        for controller in &mut self.controllers {
            controller.regroup(point, ctx);
        }
    }

    pub fn get(&self, role: Role) -> Option<&dyn MicroManager> {
        self.controllers
            .iter()
            .find(|c| c.role() == role)
            .map(|c| c.as_ref())
    }

    /// Units held across all controllers
    pub fn unit_count(&self) -> usize {
        self.controllers.iter().map(|c| c.units().len()).sum()
    }
}

//! All squads owned by the agent, keyed by name
//!
//! A unit belongs to at most one squad. Squads tick in descending priority
//! so higher-priority squads issue their commands first.

use std::collections::BTreeMap;

use crate::core::error::{MicroError, Result};
use crate::core::types::UnitTag;
use crate::squad::{Squad, SquadTick};
use crate::world::{TickContext, WorkerPool, WorldView};

#[derive(Default)]
pub struct SquadRoster {
    squads: BTreeMap<String, Squad>,
}

impl SquadRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.squads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.squads.is_empty()
    }

    pub fn add_squad(&mut self, squad: Squad) -> Result<()> {
        if self.squads.contains_key(squad.name()) {
            return Err(MicroError::DuplicateSquad(squad.name().to_string()));
        }
        self.squads.insert(squad.name().to_string(), squad);
        Ok(())
    }

    /// Dispose of a squad, returning its workers to the pool
    pub fn remove_squad(
        &mut self,
        name: &str,
        world: &dyn WorldView,
        pool: &mut dyn WorkerPool,
    ) -> bool {
        match self.squads.remove(name) {
            Some(mut squad) => {
                squad.clear(world, pool);
                true
            }
            None => false,
        }
    }

    pub fn squad(&self, name: &str) -> Option<&Squad> {
        self.squads.get(name)
    }

    pub fn squad_mut(&mut self, name: &str) -> Option<&mut Squad> {
        self.squads.get_mut(name)
    }

    pub fn squads(&self) -> impl Iterator<Item = &Squad> {
        self.squads.values()
    }

    /// Name of the squad currently holding `unit`
    pub fn squad_of(&self, unit: UnitTag) -> Option<&str> {
        self.squads
            .values()
            .find(|s| s.contains(unit))
            .map(|s| s.name())
    }

    /// Whether `unit` may join `name`: it is free, or only held by a
    /// lower-priority squad
    pub fn can_assign(&self, unit: UnitTag, name: &str) -> bool {
        let Some(target) = self.squads.get(name) else {
            return false;
        };
        match self.squads.values().find(|s| s.contains(unit)) {
            Some(current) => current.name() != name && current.priority() < target.priority(),
            None => true,
        }
    }

    /// Put `unit` in squad `name`, taking it out of any other squad first
    pub fn assign_unit(&mut self, unit: UnitTag, name: &str) -> bool {
        if !self.squads.contains_key(name) {
            tracing::warn!("Cannot assign {} to unknown squad '{}'", unit, name);
            return false;
        }

        for squad in self.squads.values_mut() {
            if squad.name() != name && squad.remove_unit(unit) {
                tracing::debug!("{} moved from '{}' to '{}'", unit, squad.name(), name);
            }
        }

        match self.squads.get_mut(name) {
            Some(squad) => {
                squad.add_unit(unit);
                true
            }
            None => false,
        }
    }

    /// Names in the order squads are ticked: highest priority first, then by name
    pub fn tick_order(&self) -> Vec<String> {
        let mut names: Vec<(u32, &String)> = self
            .squads
            .iter()
            .map(|(name, squad)| (squad.priority(), name))
            .collect();
        names.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        names.into_iter().map(|(_, name)| name.clone()).collect()
    }

    /// Run every squad for one tick
    pub fn on_tick(&mut self, ctx: &mut TickContext) -> Vec<(String, SquadTick)> {
        let mut results = Vec::with_capacity(self.squads.len());
        for name in self.tick_order() {
            if let Some(squad) = self.squads.get_mut(&name) {
                let outcome = squad.on_tick(ctx);
                results.push((name, outcome));
            }
        }
        results
    }

    pub fn clear_all(&mut self, world: &dyn WorldView, pool: &mut dyn WorkerPool) {
        for squad in self.squads.values_mut() {
            squad.clear(world, pool);
        }
        self.squads.clear();
    }
}

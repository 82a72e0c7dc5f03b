//! Strategy table built from the config at startup

use std::collections::BTreeMap;

use crate::core::config::BotConfig;
use crate::core::error::{MicroError, Result};
use crate::strategy::build_order::BuildOrder;
use crate::strategy::{Race, StrategyEntry, StrategySection};

#[derive(Debug, Clone, PartialEq)]
pub struct Strategy {
    pub name: String,
    pub race: Race,
    pub build_order: BuildOrder,
    /// Raw condition expressions for the strategic layer
    pub scout_condition: Vec<toml::Value>,
    pub attack_condition: Vec<toml::Value>,
}

impl Strategy {
    fn from_entry(name: &str, entry: &StrategyEntry) -> Result<Self> {
        let malformed = |reason: &str| MicroError::MalformedStrategy {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        let race_name = entry
            .race
            .as_deref()
            .ok_or_else(|| malformed("missing race"))?;
        let race = Race::from_name(race_name)
            .ok_or_else(|| malformed(&format!("unknown race '{}'", race_name)))?;
        let tokens = entry
            .opening_build_order
            .as_ref()
            .ok_or_else(|| malformed("missing opening_build_order array"))?;
        let scout_condition = entry
            .scout_condition
            .clone()
            .ok_or_else(|| malformed("missing scout_condition array"))?;
        let attack_condition = entry
            .attack_condition
            .clone()
            .ok_or_else(|| malformed("missing attack_condition array"))?;

        Ok(Self {
            name: name.to_string(),
            race,
            build_order: BuildOrder::from_tokens(name, tokens),
            scout_condition,
            attack_condition,
        })
    }
}

#[derive(Debug, Clone)]
pub struct StrategyManager {
    current: Option<String>,
    found_enemy_specific: bool,
    scout_harass_enemy: bool,
    strategies: BTreeMap<String, Strategy>,
}

impl StrategyManager {
    /// Build from a loaded config; a config without a strategy section is fatal
    pub fn from_config(config: &BotConfig, our_race: Race, enemy_name: Option<&str>) -> Result<Self> {
        let section = config
            .strategy
            .as_ref()
            .ok_or_else(|| MicroError::InvalidConfig("missing [strategy] section".into()))?;
        Self::from_section(section, our_race, enemy_name)
    }

    pub fn from_section(section: &StrategySection, our_race: Race, enemy_name: Option<&str>) -> Result<Self> {
        let mut current = section.names.for_race(our_race).map(str::to_string);
        let mut found_enemy_specific = false;

        if section.use_enemy_specific_strategy {
            let specific = enemy_name
                .and_then(|enemy| section.enemy_specific_strategy.get(enemy))
                .and_then(|names| names.for_race(our_race));
            if let Some(name) = specific {
                current = Some(name.to_string());
                found_enemy_specific = true;
            }
        }

        let strategies = section
            .strategies
            .iter()
            .map(|(name, entry)| Ok((name.clone(), Strategy::from_entry(name, entry)?)))
            .collect::<Result<BTreeMap<_, _>>>()?;

        match &current {
            Some(name) => tracing::info!(
                "Selected strategy '{}' for {}{}",
                name,
                our_race,
                if found_enemy_specific { " (enemy specific)" } else { "" }
            ),
            None => tracing::warn!("No strategy configured for {}", our_race),
        }

        Ok(Self {
            current,
            found_enemy_specific,
            scout_harass_enemy: section.scout_harass_enemy,
            strategies,
        })
    }

    pub fn strategy_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn found_enemy_specific_strategy(&self) -> bool {
        self.found_enemy_specific
    }

    pub fn scout_harass_enemy(&self) -> bool {
        self.scout_harass_enemy
    }

    pub fn get(&self, name: &str) -> Option<&Strategy> {
        self.strategies.get(name)
    }

    /// The selected strategy; an unknown or unset name is fatal for the caller
    pub fn current_strategy(&self) -> Result<&Strategy> {
        let name = self.current.as_deref().unwrap_or_default();
        self.strategies
            .get(name)
            .ok_or_else(|| MicroError::StrategyNotFound(name.to_string()))
    }

    pub fn opening_build_order(&self) -> Result<&BuildOrder> {
        Ok(&self.current_strategy()?.build_order)
    }
}

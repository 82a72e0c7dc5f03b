//! Strategy selection and opening build orders
//!
//! The `[strategy]` config section names a strategy per race, optionally
//! overridden per opponent, and defines every strategy the agent knows.
//! Scout and attack conditions are carried as raw values for the
//! strategic layer; nothing here evaluates them.

pub mod build_order;
pub mod manager;

pub use build_order::{parse_token, BuildItem, BuildOrder, TokenError};
pub use manager::{Strategy, StrategyManager};

use std::collections::BTreeMap;
use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::core::error::MicroError;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Race {
    Protoss,
    Terran,
    Zerg,
    Random,
}

impl Race {
    /// Case-insensitive lookup by name
    pub fn from_name(name: &str) -> Option<Race> {
        match name.to_ascii_lowercase().as_str() {
            "protoss" => Some(Race::Protoss),
            "terran" => Some(Race::Terran),
            "zerg" => Some(Race::Zerg),
            "random" => Some(Race::Random),
            _ => None,
        }
    }
}

impl FromStr for Race {
    type Err = MicroError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Race::from_name(name)
            .ok_or_else(|| MicroError::InvalidConfig(format!("unknown race '{}'", name)))
    }
}

/// Strategy name to use for each of our races
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceStrategyNames {
    pub protoss: Option<String>,
    pub terran: Option<String>,
    pub zerg: Option<String>,
    pub random: Option<String>,
}

impl RaceStrategyNames {
    pub fn for_race(&self, race: Race) -> Option<&str> {
        match race {
            Race::Protoss => self.protoss.as_deref(),
            Race::Terran => self.terran.as_deref(),
            Race::Zerg => self.zerg.as_deref(),
            Race::Random => self.random.as_deref(),
        }
    }
}

/// One strategy as written in config
///
/// Every field is optional at parse time so a missing one can be reported
/// against the strategy's name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyEntry {
    pub race: Option<String>,
    pub opening_build_order: Option<Vec<toml::Value>>,
    pub scout_condition: Option<Vec<toml::Value>>,
    pub attack_condition: Option<Vec<toml::Value>>,
}

/// The `[strategy]` config section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategySection {
    /// Default strategy per race
    #[serde(flatten)]
    pub names: RaceStrategyNames,

    /// Send the scout to harass enemy workers
    pub scout_harass_enemy: bool,

    /// Where per-opponent records are read from and written to
    pub read_directory: String,
    pub write_directory: String,

    /// Prefer `enemy_specific_strategy` entries for a known opponent
    pub use_enemy_specific_strategy: bool,

    /// Opponent name to per-race strategy names
    pub enemy_specific_strategy: BTreeMap<String, RaceStrategyNames>,

    /// Every strategy by name
    pub strategies: BTreeMap<String, StrategyEntry>,
}

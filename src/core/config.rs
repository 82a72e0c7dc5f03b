//! Agent configuration with documented thresholds
//!
//! Every distance and duration the squad logic depends on is collected here
//! so it can be tuned from the config file instead of recompiling.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{MicroError, Result};
use crate::strategy::StrategySection;

/// Thresholds consumed by the per-tick squad pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MicroConfig {
    // === ROLE CONTROLLERS ===
    /// Whether long-range units should kite
    ///
    /// Kiting is not modelled. The flag is read so existing config files keep
    /// loading, but ranged units always take the ordinary attack path.
    pub kite_with_ranged_units: bool,

    /// Attack range at which a unit counts as long-range (distance-units)
    ///
    /// Units with range >= this value go to the ranged controller, the rest
    /// to the melee controller.
    pub role_split_range: f32,

    /// Minimum distance from the order position before an idle unit is moved
    ///
    /// Units already inside this radius are left alone when there is
    /// nothing to shoot.
    pub move_threshold: f32,

    // === PROXIMITY ===
    /// Radius within which an enemy marks a member as "near enemy"
    ///
    /// A squad with any combat member near an enemy is considered engaged
    /// and never pauses to regroup.
    pub near_enemy_radius: f32,

    // === COHESION ===
    /// Gap from the vanguard above which a member counts as separated
    pub regroup_min_gap: f32,

    /// Gap from the vanguard above which a member is a fresh reinforcement
    ///
    /// Members farther than this are ignored by the regroup check so newly
    /// produced units walking in from base do not stall the whole squad.
    pub regroup_max_gap: f32,

    /// Ticks a squad spends regrouping before it re-evaluates
    ///
    /// There is no early exit. Long enough for stragglers to close the gap,
    /// short enough that the squad does not idle through a fight.
    pub regroup_cooldown_ticks: u32,

    /// Name of the holding squad that never regroups
    pub holding_squad_name: String,
}

impl Default for MicroConfig {
    fn default() -> Self {
        Self {
            kite_with_ranged_units: false,
            role_split_range: 1.5,
            move_threshold: 4.0,
            near_enemy_radius: 20.0,
            regroup_min_gap: 15.0,
            regroup_max_gap: 30.0,
            regroup_cooldown_ticks: 80,
            holding_squad_name: "Idle".to_string(),
        }
    }
}

impl MicroConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.near_enemy_radius <= 0.0 {
            return Err(MicroError::InvalidConfig(format!(
                "near_enemy_radius ({}) must be positive",
                self.near_enemy_radius
            )));
        }

        if self.move_threshold < 0.0 || self.role_split_range < 0.0 {
            return Err(MicroError::InvalidConfig(
                "move_threshold and role_split_range must not be negative".into(),
            ));
        }

        // The straggler band must be non-empty
        if self.regroup_min_gap >= self.regroup_max_gap {
            return Err(MicroError::InvalidConfig(format!(
                "regroup_min_gap ({}) should be < regroup_max_gap ({})",
                self.regroup_min_gap, self.regroup_max_gap
            )));
        }

        if self.regroup_cooldown_ticks == 0 {
            return Err(MicroError::InvalidConfig(
                "regroup_cooldown_ticks must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

/// Visualization switches; all drawing goes through [`crate::world::DebugDraw`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Draw a line from each ranged/melee unit to the target it was given
    pub draw_unit_target_info: bool,
    /// Draw the rally point when a squad starts regrouping
    pub draw_regroup_point: bool,
    /// Draw a circle around each member coloured by its near-enemy flag
    pub draw_near_enemy: bool,
}

/// Complete agent configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default)]
    pub micro: MicroConfig,
    #[serde(default)]
    pub debug: DebugConfig,
    /// Strategy section; the agent cannot start without one
    #[serde(default)]
    pub strategy: Option<StrategySection>,
}

impl BotConfig {
    /// Parse and validate a config from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: BotConfig = toml::from_str(contents)?;
        config.micro.validate()?;
        Ok(config)
    }
}

/// Load the agent config from a TOML file
///
/// Any failure here is fatal for the caller: the agent must not run with an
/// undefined configuration.
pub fn load_config(path: &Path) -> Result<BotConfig> {
    let contents = fs::read_to_string(path)?;
    let config = BotConfig::from_toml_str(&contents)?;
    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MicroConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.regroup_cooldown_ticks, 80);
        assert_eq!(config.near_enemy_radius, 20.0);
        assert_eq!(config.holding_squad_name, "Idle");
    }

    #[test]
    fn test_inverted_straggler_band_rejected() {
        let config = MicroConfig {
            regroup_min_gap: 30.0,
            regroup_max_gap: 15.0,
            ..MicroConfig::default()
        };
        assert!(matches!(config.validate(), Err(MicroError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_cooldown_rejected() {
        let config = MicroConfig {
            regroup_cooldown_ticks: 0,
            ..MicroConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = BotConfig::from_toml_str(
            r#"
            [micro]
            near_enemy_radius = 12.0

            [debug]
            draw_regroup_point = true
            "#,
        )
        .expect("partial config should parse");

        assert_eq!(config.micro.near_enemy_radius, 12.0);
        assert_eq!(config.micro.move_threshold, 4.0);
        assert!(config.debug.draw_regroup_point);
        assert!(!config.debug.draw_unit_target_info);
        assert!(config.strategy.is_none());
    }

    #[test]
    fn test_invalid_micro_section_is_fatal() {
        let result = BotConfig::from_toml_str(
            r#"
            [micro]
            near_enemy_radius = -1.0
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_toml_is_fatal() {
        let result = BotConfig::from_toml_str("[micro\nnear_enemy_radius = ");
        assert!(matches!(result, Err(MicroError::TomlError(_))));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = load_config(Path::new("does/not/exist.toml"));
        assert!(matches!(result, Err(MicroError::IoError(_))));
    }
}

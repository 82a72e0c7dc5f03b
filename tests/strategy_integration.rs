//! Loading the shipped agent config end to end

use std::path::PathBuf;

use squad_micro::core::{load_config, MicroConfig};
use squad_micro::strategy::{BuildItem, Race, StrategyManager};

fn shipped_config() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/bot_config.toml")
}

#[test]
fn test_shipped_config_loads() {
    let config = load_config(&shipped_config()).expect("shipped config should load");
    assert_eq!(config.micro, MicroConfig::default());
    assert!(!config.debug.draw_regroup_point);
    assert!(config.strategy.is_some());
}

#[test]
fn test_every_race_has_a_strategy() {
    let config = load_config(&shipped_config()).expect("shipped config should load");

    for (race, expected, items) in [
        (Race::Protoss, "Protoss_ZealotRush", 14),
        (Race::Terran, "Terran_MarineRush", 18),
        (Race::Zerg, "Zerg_ZerglingRush", 7),
        (Race::Random, "Terran_MarineRush", 18),
    ] {
        let manager = StrategyManager::from_config(&config, race, None).expect("strategy table");
        let strategy = manager.current_strategy().expect("current strategy");
        assert_eq!(strategy.name, expected);
        assert_eq!(strategy.build_order.len(), items, "{} build order", expected);
    }
}

#[test]
fn test_chrono_boost_in_protoss_opening() {
    let config = load_config(&shipped_config()).expect("shipped config should load");
    let manager = StrategyManager::from_config(&config, Race::Protoss, None).expect("strategy table");
    let order = manager.opening_build_order().expect("opening");

    assert!(order.items().contains(&BuildItem::ChronoBoost {
        target: "Nexus".to_string(),
        production: "Probe".to_string(),
    }));
    assert_eq!(order.items()[0], BuildItem::Make("Probe".to_string()));
}

#[test]
fn test_enemy_specific_strategy_disabled_by_default() {
    let config = load_config(&shipped_config()).expect("shipped config should load");
    let manager =
        StrategyManager::from_config(&config, Race::Protoss, Some("ExampleBot")).expect("strategy table");
    assert!(!manager.found_enemy_specific_strategy());
    assert!(manager.scout_harass_enemy());
}

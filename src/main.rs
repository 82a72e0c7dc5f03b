//! Squad Sim - headless squad runner
//!
//! Builds a seeded skirmish in the in-memory sandbox, drives the squad
//! roster against it for a number of ticks and prints a JSON summary.

use std::path::PathBuf;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use squad_micro::core::{load_config, BotConfig, Player, Result, Vec2};
use squad_micro::squad::{Squad, SquadOrder, SquadRoster, SquadTick};
use squad_micro::strategy::{Race, StrategyManager};
use squad_micro::world::{
    Command, CommandLog, IdleWorkers, NoDebugDraw, Sandbox, TickContext, UnitPreset,
};

/// Headless squad runner
#[derive(Parser, Debug)]
#[command(name = "squad_sim")]
#[command(about = "Run a seeded skirmish through the squad logic and print a JSON summary")]
struct Args {
    /// Agent config (TOML); must contain a [strategy] section
    #[arg(long, default_value = "data/bot_config.toml")]
    config: PathBuf,

    /// Our race, used to pick the strategy
    #[arg(long, default_value = "terran")]
    race: String,

    /// Opponent name for enemy-specific strategies
    #[arg(long)]
    enemy_name: Option<String>,

    /// Maximum ticks to run
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Own combat units in the main squad
    #[arg(long, default_value_t = 10)]
    army: usize,

    /// Enemy units at the target
    #[arg(long, default_value_t = 8)]
    enemies: usize,

    /// Sight range of own units; everything is visible when omitted
    #[arg(long)]
    sight_range: Option<f32>,
}

#[derive(Serialize, Default)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    strategy: String,
    opening_build_items: usize,
    attack_commands: usize,
    move_commands: usize,
    regroups: usize,
    silent_squad_ticks: usize,
    own_survivors: usize,
    enemy_survivors: usize,
    workers_released: usize,
}

const START: Vec2 = Vec2 { x: 10.0, y: 10.0 };
const TARGET: Vec2 = Vec2 { x: 90.0, y: 10.0 };

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("squad_micro=info")
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = load_config(&args.config)?;
    let race: Race = args.race.parse()?;

    let mut summary = RunSummary::default();
    let (strategy, opening_build_items) =
        select_strategy(&config, race, args.enemy_name.as_deref())?;
    summary.strategy = strategy;
    summary.opening_build_items = opening_build_items;

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    summary.seed = seed;

    let mut sandbox = Sandbox::new(START);
    match args.sight_range {
        Some(range) => {
            sandbox.set_sight_range(Some(range));
            sandbox.update_vision(range);
        }
        None => sandbox.reveal_all(),
    }

    let mut roster = build_scenario(&mut sandbox, &mut rng, &args, &config)?;
    let debug = config.debug.clone();
    let mut draw = NoDebugDraw;

    for _ in 0..args.ticks {
        if sandbox.living(Player::Enemy) == 0 || sandbox.living(Player::Own) == 0 {
            break;
        }

        let mut log = CommandLog::new();
        let outcomes = {
            let mut ctx = TickContext::new(&sandbox, &mut log, &mut draw, &config.micro, &debug);
            roster.on_tick(&mut ctx)
        };

        for (_, outcome) in &outcomes {
            match outcome {
                SquadTick::RegroupStarted { .. } => summary.regroups += 1,
                SquadTick::Regrouping { .. } => summary.silent_squad_ticks += 1,
                SquadTick::Engaged => {}
            }
        }

        let commands = log.drain();
        for command in &commands {
            match command {
                Command::Attack { .. } => summary.attack_commands += 1,
                Command::Move { .. } => summary.move_commands += 1,
            }
        }
        sandbox.apply(&commands);
        sandbox.step();
    }
    summary.ticks = sandbox.current_tick();

    let mut pool = IdleWorkers::new();
    roster.clear_all(&sandbox, &mut pool);

    summary.own_survivors = sandbox.living(Player::Own);
    summary.enemy_survivors = sandbox.living(Player::Enemy);
    summary.workers_released = pool.len();

    tracing::info!(
        "Finished after {} ticks: {} own, {} enemy left",
        summary.ticks,
        summary.own_survivors,
        summary.enemy_survivors
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Name and opening size of the strategy the run plays; the agent cannot
/// start without one
fn select_strategy(
    config: &BotConfig,
    race: Race,
    enemy_name: Option<&str>,
) -> Result<(String, usize)> {
    let manager = StrategyManager::from_config(config, race, enemy_name)?;
    let strategy = manager.current_strategy()?;
    tracing::info!("Playing {} as {}", strategy.name, race);
    Ok((strategy.name.clone(), strategy.build_order.len()))
}

/// Main army strung out along the road, a worker in the holding squad and an
/// enemy group at the target
fn build_scenario(
    sandbox: &mut Sandbox,
    rng: &mut ChaCha8Rng,
    args: &Args,
    config: &BotConfig,
) -> Result<SquadRoster> {
    const ARMY: [UnitPreset; 5] = [
        UnitPreset::Marine,
        UnitPreset::Marine,
        UnitPreset::Marauder,
        UnitPreset::Hellion,
        UnitPreset::SiegeTank,
    ];
    const ENEMY: [UnitPreset; 4] = [
        UnitPreset::Zergling,
        UnitPreset::Zergling,
        UnitPreset::Hydralisk,
        UnitPreset::Drone,
    ];

    let mut roster = SquadRoster::new();
    roster.add_squad(Squad::new(
        config.micro.holding_squad_name.clone(),
        SquadOrder::idle(START),
        0,
        &config.micro,
    ))?;
    roster.add_squad(Squad::new(
        "MainAttack",
        SquadOrder::attack(TARGET).with_radius(25.0).with_status("Attack enemy base"),
        10,
        &config.micro,
    ))?;

    let scv = sandbox.spawn(UnitPreset::Scv, Player::Own, START);
    roster.assign_unit(scv, &config.micro.holding_squad_name);

    for i in 0..args.army {
        let preset = ARMY[i % ARMY.len()];
        // Spread along the road so the column is strung out from the start
        let position = Vec2::new(
            START.x + rng.gen_range(0.0..30.0),
            START.y + rng.gen_range(-3.0..3.0),
        );
        let tag = sandbox.spawn(preset, Player::Own, position);
        roster.assign_unit(tag, "MainAttack");
    }
    let observer = sandbox.spawn(UnitPreset::Observer, Player::Own, START);
    roster.assign_unit(observer, "MainAttack");

    for i in 0..args.enemies {
        let preset = ENEMY[i % ENEMY.len()];
        let position = Vec2::new(
            TARGET.x + rng.gen_range(-5.0..5.0),
            TARGET.y + rng.gen_range(-5.0..5.0),
        );
        sandbox.spawn(preset, Player::Enemy, position);
    }

    Ok(roster)
}

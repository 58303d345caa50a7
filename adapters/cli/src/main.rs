#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives a headless Castle Defence session.
//!
//! The binary pumps the simulation at a fixed cadence, lets a seeded demo
//! policy stand in for the player, logs notable events, and prints a frame
//! report when the session ends.

mod driver;
mod present;
mod session;
mod tuning;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use castle_defence_core::{Command, Event, GamePhase};
use castle_defence_world::query;
use clap::Parser;

use crate::driver::DemoPolicy;
use crate::session::Session;
use crate::tuning::Tuning;

/// Command-line arguments for the session driver.
#[derive(Debug, Parser)]
#[command(name = "castle-defence", about = "Headless Castle Defence session driver")]
struct Args {
    /// Maximum number of simulation frames to run.
    #[arg(long, default_value_t = 3_000)]
    ticks: u32,

    /// Simulated milliseconds per frame.
    #[arg(long, default_value_t = 100)]
    tick_millis: u64,

    /// Seed for the demo player's decisions; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Path to a TOML tuning file overriding the stock parameters.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Entry point for the Castle Defence command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .try_init();

    let tuning = match &args.config {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("demo player seed {seed}");

    let mut session = Session::new(&tuning);
    println!("{}", query::welcome_banner(session.world()));

    let mut policy = DemoPolicy::new(seed);
    log_events(&session.submit(Command::StartGame));

    let dt = Duration::from_millis(args.tick_millis);
    for _ in 0..args.ticks {
        let events = session.tick_guarded(dt);
        log_events(&events);

        for command in policy.react(&events, session.world()) {
            log_events(&session.submit(command));
        }

        if query::phase(session.world()) == GamePhase::GameOver {
            break;
        }
    }

    let scene = present::compose_scene(session.world())?;
    println!("{}", present::describe(&scene));
    Ok(())
}

/// Logs the events a player would notice on the HUD.
fn log_events(events: &[Event]) {
    for event in events {
        match event {
            Event::WaveStarted {
                wave,
                enemies_to_spawn,
            } => log::info!("wave {wave} started with {enemies_to_spawn} enemies inbound"),
            Event::WaveCompleted {
                wave,
                coins,
                experience,
            } => log::info!("wave {wave} cleared for {coins} coins and {experience} xp"),
            Event::LevelReached { level } => log::info!("reached level {level}"),
            Event::RewardApplied { reward } => log::info!("tactical reward applied: {reward:?}"),
            Event::UpgradePurchased { kind, level, .. } => {
                log::info!("purchased {kind:?} upgrade, now level {level}");
            }
            Event::UpgradeRejected { kind, reason } => {
                log::warn!("{kind:?} upgrade rejected: {reason}");
            }
            Event::BonusCoinsGranted { amount, .. } => {
                log::info!("rewarded bonus granted {amount} coins");
            }
            Event::CastleStruck { damage, remaining, .. } => {
                log::debug!("castle struck for {damage}, {remaining:.1} health left");
            }
            Event::EnemyKilled { reward, .. } => log::debug!("enemy down, +{reward} coins"),
            Event::GameEnded {
                wave,
                coins,
                experience,
            } => log::info!("game over on wave {wave} with {coins} coins and {experience} xp"),
            _ => {}
        }
    }
}

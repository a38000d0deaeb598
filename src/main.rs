//! Maze Arena entry point
//!
//! Builds an arena from an optional JSON settings file, prints the maze and
//! runs a short scripted round with event logging.

use anyhow::{Context, Result};

use maze_arena::Settings;
use maze_arena::consts::SIM_DT;
use maze_arena::sim::{Arena, DriveInput, SceneEvent};

/// Scripted run length (10 seconds at 60 Hz)
const DEMO_TICKS: u64 = 600;
/// Each vehicle fires this often
const FIRE_INTERVAL_TICKS: u64 = 90;

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Maze Arena (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(&path).with_context(|| format!("failed to load settings from {path}"))?,
        None => Settings::default(),
    };
    let mut arena = Arena::new(settings).context("failed to build arena")?;

    println!("Seed {}", arena.seed());
    println!("{}", arena.maze());

    let (mut impacts, mut rollbacks, mut escapes, mut expiries) = (0, 0, 0, 0);
    for tick in 0..DEMO_TICKS {
        if tick % FIRE_INTERVAL_TICKS == 0 {
            for index in 0..arena.vehicles().len() {
                arena.fire(index);
            }
        }

        let inputs = script(tick, arena.vehicles().len());
        for event in arena.step(&inputs, SIM_DT) {
            log::debug!("tick {tick}: {event:?}");
            match event {
                SceneEvent::WallImpact { .. } => impacts += 1,
                SceneEvent::RolledBack { .. } => rollbacks += 1,
                SceneEvent::Escaped { .. } => escapes += 1,
                SceneEvent::Expired { .. } => expiries += 1,
            }
        }
    }

    log::info!(
        "{} ticks: {impacts} wall impacts, {rollbacks} rollbacks, {escapes} escapes, {expiries} expiries, {} projectiles in flight",
        arena.time_ticks(),
        arena.projectile_count()
    );
    for (index, vehicle) in arena.vehicles().iter().enumerate() {
        if let Some(position) = vehicle.position(arena.scene()) {
            println!("Vehicle {index} ended at ({:.1}, {:.1})", position.x, position.y);
        }
    }
    Ok(())
}

/// Drive forward in bursts, each vehicle turning on its own rhythm
fn script(tick: u64, vehicles: usize) -> Vec<DriveInput> {
    (0..vehicles as u64)
        .map(|index| {
            let phase = (tick + index * 37) % 120;
            DriveInput {
                forward: phase < 70,
                backward: (100..110).contains(&phase),
                left: index % 2 == 0 && (70..100).contains(&phase),
                right: index % 2 == 1 && (70..100).contains(&phase),
            }
        })
        .collect()
}

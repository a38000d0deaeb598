//! Arena state and round lifecycle
//!
//! Everything needed to replay a round lives here: the settings, the seed and
//! the RNG stream derived from it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::body::{Body, BodyKind, regular_polygon};
use super::scene::{BodyId, Scene, SceneEvent};
use super::vehicle::{DriveInput, Vehicle};
use crate::consts::*;
use crate::maze::{GridIndex, Maze, MazeBlueprint};
use crate::settings::{Settings, SettingsError};

/// Vehicles start facing up
const SPAWN_ORIENTATION: f32 = std::f32::consts::FRAC_PI_2;

/// A maze, the tanks driving in it, and every projectile in flight
#[derive(Debug)]
pub struct Arena {
    settings: Settings,
    /// Run seed for reproducibility
    seed: u64,
    rng: Pcg32,
    scene: Scene,
    maze: Maze,
    vehicles: Vec<Vehicle>,
    /// Rounds started, counting the first
    round: u32,
    /// Simulation tick counter (reset each round)
    time_ticks: u64,
}

impl Arena {
    /// Validate settings and start the first round
    pub fn new(settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut scene = Scene::new();
        let (maze, vehicles) = build_round(&settings, &mut scene, &mut rng);

        log::info!("Arena ready (seed {seed})");
        Ok(Self {
            settings,
            seed,
            rng,
            scene,
            maze,
            vehicles,
            round: 1,
            time_ticks: 0,
        })
    }

    /// Throw away the current round and generate a fresh maze
    pub fn reset(&mut self) {
        // Detach walls and adapters before the old maze goes away
        self.scene.clear();
        let (maze, vehicles) = build_round(&self.settings, &mut self.scene, &mut self.rng);
        self.maze = maze;
        self.vehicles = vehicles;
        self.round += 1;
        self.time_ticks = 0;
        log::info!("Round {} started", self.round);
    }

    /// Drive vehicles, advance the scene one tick, and report what happened.
    /// Vehicles without a matching input entry coast to a stop.
    pub fn step(&mut self, inputs: &[DriveInput], dt: f32) -> Vec<SceneEvent> {
        for (index, vehicle) in self.vehicles.iter().enumerate() {
            let input = inputs.get(index).copied().unwrap_or_default();
            vehicle.drive(&mut self.scene, &input, &self.settings.vehicle);
        }
        self.scene.tick(&self.maze, dt);
        self.time_ticks += 1;
        self.scene.drain_events()
    }

    /// Add a projectile that bounces off walls and decays
    pub fn spawn_projectile(&mut self, position: Vec2, velocity: Vec2) -> BodyId {
        let tuning = self.settings.projectile;
        let mut body = Body::new(
            BodyKind::Projectile,
            regular_polygon(tuning.radius, PROJECTILE_SIDES),
            PROJECTILE_MASS,
            position,
        );
        body.velocity = velocity;
        let id = self.scene.add_body(body);
        self.scene.register_destructive_collision(id, WALL_ELASTICITY);
        self.scene.register_decay(id, tuning.lifetime);
        id
    }

    /// Fire from a vehicle's barrel
    pub fn fire(&mut self, vehicle: usize) -> Option<BodyId> {
        let tuning = self.settings.projectile;
        let (position, heading) = self.vehicles.get(vehicle)?.muzzle(&self.scene, tuning.radius)?;
        Some(self.spawn_projectile(position, heading * tuning.speed))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Projectiles still in flight
    pub fn projectile_count(&self) -> usize {
        self.scene
            .bodies()
            .filter(|(_, body)| body.kind == BodyKind::Projectile)
            .count()
    }
}

/// Generate and register a maze, then place vehicles in distinct cells
fn build_round(settings: &Settings, scene: &mut Scene, rng: &mut Pcg32) -> (Maze, Vec<Vehicle>) {
    let grid = GridIndex::new(settings.columns, settings.rows, settings.lower_left, settings.upper_right);
    let maze = MazeBlueprint::generate(grid, settings.wall_thickness, rng).register(scene);

    let vehicles: Vec<Vehicle> = maze
        .sample_distinct(settings.vehicle_count, rng)
        .into_iter()
        .map(|center| Vehicle::spawn(scene, center, SPAWN_ORIENTATION, &settings.vehicle))
        .collect();
    log::info!("Spawned {} vehicles", vehicles.len());

    (maze, vehicles)
}

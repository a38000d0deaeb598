//! Arena settings
//!
//! Loaded from JSON on native builds; every field falls back to the defaults in
//! [`crate::consts`] when absent.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings JSON")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Tank handling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleTuning {
    /// Hull edge length (world units)
    pub size: f32,
    /// Forward speed (units per second)
    pub speed: f32,
    /// Reverse speed as a fraction of `speed`
    pub reverse_factor: f32,
    /// Radians per second
    pub turn_rate: f32,
}

impl Default for VehicleTuning {
    fn default() -> Self {
        Self {
            size: TANK_SIZE,
            speed: TANK_SPEED,
            reverse_factor: TANK_REVERSE_FACTOR,
            turn_rate: TANK_TURN_RATE,
        }
    }
}

/// Projectile ballistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub speed: f32,
    pub radius: f32,
    /// Seconds before the projectile decays
    pub lifetime: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: PROJECTILE_SPEED,
            radius: PROJECTILE_RADIUS,
            lifetime: PROJECTILE_LIFETIME,
        }
    }
}

/// Arena configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Maze ===
    pub columns: usize,
    pub rows: usize,
    pub lower_left: Vec2,
    pub upper_right: Vec2,
    pub wall_thickness: f32,
    /// Fixed seed for reproducible rounds (entropy when absent)
    pub seed: Option<u64>,

    // === Vehicles ===
    pub vehicle_count: usize,
    pub vehicle: VehicleTuning,

    // === Projectiles ===
    pub projectile: ProjectileTuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            columns: MAZE_COLUMNS,
            rows: MAZE_ROWS,
            lower_left: Vec2::ZERO,
            upper_right: Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
            wall_thickness: WALL_THICKNESS,
            seed: None,

            vehicle_count: TANK_COUNT,
            vehicle: VehicleTuning::default(),

            projectile: ProjectileTuning::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Cell edge lengths implied by the grid and world box
    pub fn cell_size(&self) -> Vec2 {
        (self.upper_right - self.lower_left) / Vec2::new(self.columns as f32, self.rows as f32)
    }

    /// Reject values the maze or the collision adapters cannot work with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let result = self.check();
        if let Err(SettingsError::Invalid(reason)) = &result {
            log::warn!("Rejected settings: {reason}");
        }
        result
    }

    fn check(&self) -> Result<(), SettingsError> {
        let invalid = |reason: String| Err(SettingsError::Invalid(reason));

        if self.columns == 0 || self.rows == 0 {
            return invalid(format!("grid must have at least one cell, got {}x{}", self.columns, self.rows));
        }
        if !(self.lower_left.cmplt(self.upper_right).all()) {
            return invalid(format!(
                "degenerate world box {:?}..{:?}",
                self.lower_left, self.upper_right
            ));
        }
        if !(self.wall_thickness > 0.0) {
            return invalid(format!("wall thickness must be positive, got {}", self.wall_thickness));
        }
        let Some(cells) = self.columns.checked_mul(self.rows) else {
            return invalid(format!("grid {}x{} is too large", self.columns, self.rows));
        };
        if self.vehicle_count > cells {
            return invalid(format!("{} vehicles do not fit in {cells} cells", self.vehicle_count));
        }
        // Collision only inspects the walls of the cell under a body's center
        let min_edge = self.cell_size().min_element();
        if !(self.vehicle.size > 0.0 && self.vehicle.size * std::f32::consts::SQRT_2 < min_edge) {
            return invalid(format!(
                "vehicle size {} does not fit a {min_edge} cell at every rotation",
                self.vehicle.size
            ));
        }
        if !(self.projectile.radius > 0.0 && 2.0 * self.projectile.radius < min_edge) {
            return invalid(format!("projectile radius {} out of range", self.projectile.radius));
        }
        // Per-tick travel must stay below the wall thickness or projectiles tunnel
        let travel = self.projectile.speed * SIM_DT;
        if !(self.projectile.speed >= 0.0 && travel < self.wall_thickness) {
            return invalid(format!(
                "projectile speed {} moves {travel} per tick through {} thick walls",
                self.projectile.speed, self.wall_thickness
            ));
        }
        if !(self.projectile.lifetime > 0.0) {
            return invalid(format!("projectile lifetime must be positive, got {}", self.projectile.lifetime));
        }
        Ok(())
    }
}

//! Maze Arena - a tile-based tank arena
//!
//! Core modules:
//! - `maze`: Grid indexing, maze topology generation, wall geometry
//! - `sim`: Bodies, collision primitives, the scene and its per-tick behaviors
//! - `settings`: Data-driven arena configuration

pub mod maze;
pub mod settings;
pub mod sim;

pub use maze::{Cell, GridIndex, Maze, MazeBlueprint, Vertex, WallSlot, maze_init};
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Arena configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Default grid and world extent
    pub const MAZE_COLUMNS: usize = 10;
    pub const MAZE_ROWS: usize = 5;
    pub const ARENA_WIDTH: f32 = 1000.0;
    pub const ARENA_HEIGHT: f32 = 500.0;

    /// Wall rectangle thickness (world units)
    pub const WALL_THICKNESS: f32 = 6.0;

    /// Tank defaults
    pub const TANK_SIZE: f32 = 50.0;
    pub const TANK_MASS: f32 = 100_000.0;
    pub const TANK_SPEED: f32 = 300.0;
    /// Reverse speed as a fraction of forward speed
    pub const TANK_REVERSE_FACTOR: f32 = 1.0 / 3.0;
    /// Turn rate in radians per second (TAU/110 per frame at 60 Hz)
    pub const TANK_TURN_RATE: f32 = std::f32::consts::TAU / 110.0 * 60.0;
    pub const TANK_COUNT: usize = 3;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 6.0;
    pub const PROJECTILE_SIDES: usize = 6;
    pub const PROJECTILE_MASS: f32 = 100.0;
    pub const PROJECTILE_SPEED: f32 = 200.0;
    /// Seconds before a projectile decays
    pub const PROJECTILE_LIFETIME: f32 = 5.0;
    /// Restitution used when a projectile bounces off a wall
    pub const WALL_ELASTICITY: f32 = 1.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

//! Rigid polygon bodies
//!
//! Shapes are stored in local space around the body position and turned into
//! world space on demand, so moving or rotating a body never accumulates drift
//! in its vertices.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::normalize_angle;

/// What a body represents in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    Wall,
    /// Visual tank outline (does not collide with the maze)
    Vehicle,
    /// Tank collision square
    Hitbox,
    Projectile,
}

/// A polygon body with kinematic state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub kind: BodyKind,
    /// Vertices relative to `position`, at orientation 0
    shape: Vec<Vec2>,
    pub position: Vec2,
    /// Radians, normalized to [-π, π)
    pub orientation: f32,
    pub velocity: Vec2,
    /// Radians per second
    pub angular_velocity: f32,
    /// `f32::INFINITY` for static obstacles
    pub mass: f32,
    removed: bool,
}

impl Body {
    pub fn new(kind: BodyKind, shape: Vec<Vec2>, mass: f32, position: Vec2) -> Self {
        assert!(shape.len() >= 3, "a body needs at least 3 vertices");
        assert!(mass > 0.0, "body mass must be positive");
        Self {
            kind,
            shape,
            position,
            orientation: 0.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            mass,
            removed: false,
        }
    }

    /// Infinite-mass body that never moves
    pub fn new_static(kind: BodyKind, shape: Vec<Vec2>, position: Vec2) -> Self {
        Self::new(kind, shape, f32::INFINITY, position)
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.mass.is_infinite()
    }

    pub fn local_shape(&self) -> &[Vec2] {
        &self.shape
    }

    /// Vertices in world space
    pub fn world_shape(&self) -> Vec<Vec2> {
        let rotation = Vec2::from_angle(self.orientation);
        self.shape
            .iter()
            .map(|&p| self.position + rotation.rotate(p))
            .collect()
    }

    /// Unit vector the body faces
    pub fn heading(&self) -> Vec2 {
        Vec2::from_angle(self.orientation)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Rotate about the body's own position
    pub fn rotate(&mut self, angle: f32) {
        self.orientation = normalize_angle(self.orientation + angle);
    }

    /// Advance by one timestep (static bodies never move)
    pub fn integrate(&mut self, dt: f32) {
        if self.is_static() {
            return;
        }
        self.translate(self.velocity * dt);
        self.rotate(self.angular_velocity * dt);
    }

    /// Apply an instantaneous impulse
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        if self.is_static() {
            return;
        }
        self.velocity += impulse / self.mass;
    }

    /// Mark for removal at the end of the current tick
    pub fn remove(&mut self) {
        self.removed = true;
    }

    #[inline]
    pub fn is_removed(&self) -> bool {
        self.removed
    }
}

/// Axis-aligned rectangle centered on the origin
pub fn rectangle(half_extents: Vec2) -> Vec<Vec2> {
    vec![
        Vec2::new(-half_extents.x, -half_extents.y),
        Vec2::new(half_extents.x, -half_extents.y),
        Vec2::new(half_extents.x, half_extents.y),
        Vec2::new(-half_extents.x, half_extents.y),
    ]
}

/// Regular polygon centered on the origin, first vertex on +x
pub fn regular_polygon(radius: f32, sides: usize) -> Vec<Vec2> {
    assert!(sides >= 3, "polygon needs at least 3 sides");
    let step = std::f32::consts::TAU / sides as f32;
    (0..sides)
        .map(|k| crate::polar_to_cartesian(radius, k as f32 * step))
        .collect()
}

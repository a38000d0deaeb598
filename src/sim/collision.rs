//! Narrow-phase collision detection and impulse response for convex polygons
//!
//! Detection is a separating-axis test over the edge normals of both shapes.
//! The reported axis is the one with the smallest overlap, oriented from the
//! first shape toward the second, which is the direction an impulse on the
//! first body has to push against.

use glam::Vec2;

use super::body::Body;

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInfo {
    /// Whether the shapes overlap
    pub collided: bool,
    /// Minimum-overlap axis (unit length, from `a` toward `b`) when collided
    pub axis: Vec2,
}

impl CollisionInfo {
    pub fn miss() -> Self {
        Self {
            collided: false,
            axis: Vec2::ZERO,
        }
    }
}

/// Project a polygon onto an axis, returning (min, max)
fn project(shape: &[Vec2], axis: Vec2) -> (f32, f32) {
    shape.iter().fold((f32::MAX, f32::MIN), |(lo, hi), p| {
        let d = p.dot(axis);
        (lo.min(d), hi.max(d))
    })
}

fn vertex_mean(shape: &[Vec2]) -> Vec2 {
    shape.iter().copied().sum::<Vec2>() / shape.len() as f32
}

/// Check two convex polygons (world space) for overlap
pub fn find_collision(a: &[Vec2], b: &[Vec2]) -> CollisionInfo {
    if a.len() < 3 || b.len() < 3 {
        return CollisionInfo::miss();
    }

    let mut best_overlap = f32::MAX;
    let mut best_axis = Vec2::ZERO;

    for shape in [a, b] {
        for (k, &p) in shape.iter().enumerate() {
            let q = shape[(k + 1) % shape.len()];
            let axis = (q - p).perp().normalize_or_zero();
            if axis == Vec2::ZERO {
                continue; // Degenerate edge
            }
            let (a_lo, a_hi) = project(a, axis);
            let (b_lo, b_hi) = project(b, axis);
            let overlap = a_hi.min(b_hi) - a_lo.max(b_lo);
            if overlap <= 0.0 {
                return CollisionInfo::miss();
            }
            if overlap < best_overlap {
                best_overlap = overlap;
                best_axis = axis;
            }
        }
    }

    if (vertex_mean(b) - vertex_mean(a)).dot(best_axis) < 0.0 {
        best_axis = -best_axis;
    }

    CollisionInfo {
        collided: true,
        axis: best_axis,
    }
}

/// Impulse magnitude for a contact between two bodies along `axis`.
///
/// `J = μ(1 + e)(u_b − u_a)` with `μ` the reduced mass; an infinite mass on one
/// side reduces `μ` to the other body's mass. Apply `+J·axis` to `a` and
/// `−J·axis` to `b`.
pub fn collision_impulse(a: &Body, b: &Body, axis: Vec2, elasticity: f32) -> f32 {
    let reduced_mass = match (a.is_static(), b.is_static()) {
        (true, true) => return 0.0,
        (true, false) => b.mass,
        (false, true) => a.mass,
        (false, false) => a.mass * b.mass / (a.mass + b.mass),
    };
    let u_a = a.velocity.dot(axis);
    let u_b = b.velocity.dot(axis);
    reduced_mass * (1.0 + elasticity) * (u_b - u_a)
}

//! Maze-aware collision behaviors
//!
//! Bodies are assumed smaller than one cell, so only the four walls bounding the
//! cell under a body's center can touch it. No broad phase is needed.

use glam::Vec2;

use super::collision::find_collision;
use super::scene::{BodyId, Scene, SceneEvent};
use crate::maze::Maze;

/// Solid walls around `center` that intersect `shape`, with their contact axes
fn touching_walls(scene: &Scene, maze: &Maze, center: Vec2, shape: &[Vec2]) -> Vec<(BodyId, Vec2)> {
    let cell = maze.vector_to_cell(center);
    maze.get_walls_around(cell)
        .iter()
        .filter_map(|slot| slot.solid().copied())
        .filter_map(|wall_id| {
            let wall = scene.body(wall_id)?;
            let info = find_collision(shape, &wall.world_shape());
            info.collided.then_some((wall_id, info.axis))
        })
        .collect()
}

/// Projectile adapter.
///
/// Leaving the maze bounds removes the body. Touching walls triggers one
/// impulse per wall on the first tick of contact; the latch is shared by all
/// four walls and only clears once no wall is touched.
#[derive(Debug, Clone)]
pub struct DestructiveCollider {
    pub body: BodyId,
    elasticity: f32,
    colliding: bool,
}

impl DestructiveCollider {
    pub fn new(body: BodyId, elasticity: f32) -> Self {
        Self {
            body,
            elasticity,
            colliding: false,
        }
    }

    pub fn is_colliding(&self) -> bool {
        self.colliding
    }

    pub fn apply(&mut self, scene: &mut Scene, maze: &Maze) {
        let Some(body) = scene.live_body(self.body) else {
            return;
        };
        let center = body.position;

        if maze.check_outside(center) {
            scene.remove_body(self.body);
            scene.push_event(SceneEvent::Escaped { body: self.body });
            return;
        }

        let hits = touching_walls(scene, maze, center, &body.world_shape());
        if hits.is_empty() {
            self.colliding = false;
            return;
        }
        if self.colliding {
            return;
        }

        self.colliding = true;
        for (wall, axis) in hits {
            scene.resolve_impact(self.body, wall, axis, self.elasticity);
            scene.push_event(SceneEvent::WallImpact { body: self.body, wall });
        }
    }
}

/// Vehicle adapter.
///
/// When the hitbox touches a wall, the previous tick's recorded motion is
/// undone on both hitbox and body. The baseline is re-recorded every tick from
/// the velocity about to be integrated.
#[derive(Debug, Clone)]
pub struct RollbackCollider {
    pub hitbox: BodyId,
    pub body: BodyId,
    last_velocity: Vec2,
    last_rotation: f32,
    last_dt: f32,
}

impl RollbackCollider {
    pub fn new(hitbox: BodyId, body: BodyId) -> Self {
        Self {
            hitbox,
            body,
            last_velocity: Vec2::ZERO,
            last_rotation: 0.0,
            last_dt: 0.0,
        }
    }

    pub fn apply(&mut self, scene: &mut Scene, maze: &Maze, dt: f32) {
        let Some(hitbox) = scene.live_body(self.hitbox) else {
            return;
        };
        let center = hitbox.position;
        let velocity = hitbox.velocity;
        let rotation = hitbox.angular_velocity * dt;

        // A hitbox pushed past the frame counts as blocked
        let blocked = maze.check_outside(center)
            || !touching_walls(scene, maze, center, &hitbox.world_shape()).is_empty();

        if blocked {
            let delta = -self.last_velocity * self.last_dt;
            for id in [self.hitbox, self.body] {
                if let Some(body) = scene.body_mut(id) {
                    body.translate(delta);
                    body.rotate(-self.last_rotation);
                }
            }
            scene.push_event(SceneEvent::RolledBack { hitbox: self.hitbox });
        }

        self.last_velocity = velocity;
        self.last_rotation = rotation;
        self.last_dt = dt;
    }
}

/// Removes a body once its lifetime runs out
#[derive(Debug, Clone)]
pub struct Decay {
    pub body: BodyId,
    remaining: f32,
}

impl Decay {
    pub fn new(body: BodyId, lifetime: f32) -> Self {
        Self {
            body,
            remaining: lifetime,
        }
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn apply(&mut self, scene: &mut Scene, dt: f32) {
        if scene.live_body(self.body).is_none() {
            return;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            scene.remove_body(self.body);
            scene.push_event(SceneEvent::Expired { body: self.body });
        }
    }
}

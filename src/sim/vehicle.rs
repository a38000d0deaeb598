//! Tanks: a visual outline and a square hitbox moving in lockstep

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyKind, rectangle};
use super::scene::{BodyId, Scene};
use crate::consts::TANK_MASS;
use crate::settings::VehicleTuning;

/// Hull outline in units of vehicle size, barrel along +x.
/// Two tracks joined by the hull, with the barrel poking out front.
const TANK_OUTLINE: [(f32, f32); 16] = [
    (0.3, 0.25),
    (0.5, 0.25),
    (0.5, 0.5),
    (-0.5, 0.5),
    (-0.5, 0.25),
    (-0.3, 0.25),
    (-0.3, -0.25),
    (-0.5, -0.25),
    (-0.5, -0.5),
    (0.5, -0.5),
    (0.5, -0.25),
    (0.3, -0.25),
    (0.3, -0.1),
    (0.8, -0.1),
    (0.8, 0.1),
    (0.3, 0.1),
];

/// Gap between the hull and a freshly fired projectile
const MUZZLE_CLEARANCE: f32 = 5.0;

/// Driver controls for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

/// A tank registered with a scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vehicle {
    /// Visual outline; never tested against walls
    pub body: BodyId,
    pub hitbox: BodyId,
    size: f32,
}

impl Vehicle {
    /// Add both bodies to the scene and bind wall rollback to them
    pub fn spawn(scene: &mut Scene, center: Vec2, orientation: f32, tuning: &VehicleTuning) -> Self {
        let size = tuning.size;
        let outline = TANK_OUTLINE
            .iter()
            .map(|&(x, y)| Vec2::new(x, y) * size)
            .collect();

        let mut body = Body::new(BodyKind::Vehicle, outline, TANK_MASS, center);
        body.orientation = orientation;
        let mut hitbox = Body::new(BodyKind::Hitbox, rectangle(Vec2::splat(size / 2.0)), TANK_MASS, center);
        hitbox.orientation = orientation;

        let body = scene.add_body(body);
        let hitbox = scene.add_body(hitbox);
        scene.register_rollback_collision(hitbox, body);

        log::debug!("Vehicle spawned at {center:?} (hitbox {hitbox:?})");
        Self { body, hitbox, size }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Set kinematic velocities from the controls; opposing keys cancel
    pub fn drive(&self, scene: &mut Scene, input: &DriveInput, tuning: &VehicleTuning) {
        let Some(heading) = scene.live_body(self.hitbox).map(Body::heading) else {
            return;
        };

        let velocity = if input.forward {
            heading * tuning.speed
        } else if input.backward {
            -heading * tuning.speed * tuning.reverse_factor
        } else {
            Vec2::ZERO
        };
        let angular_velocity = match (input.left, input.right) {
            (true, false) => tuning.turn_rate,
            (false, true) => -tuning.turn_rate,
            _ => 0.0,
        };

        for id in [self.body, self.hitbox] {
            if let Some(body) = scene.body_mut(id) {
                body.velocity = velocity;
                body.angular_velocity = angular_velocity;
            }
        }
    }

    /// Center of the hitbox
    pub fn position(&self, scene: &Scene) -> Option<Vec2> {
        scene.live_body(self.hitbox).map(|b| b.position)
    }

    /// Spawn point and direction for a projectile of the given radius
    pub fn muzzle(&self, scene: &Scene, projectile_radius: f32) -> Option<(Vec2, Vec2)> {
        let hitbox = scene.live_body(self.hitbox)?;
        let heading = hitbox.heading();
        let offset = (self.size / 2.0 + 1.0) + (projectile_radius / 2.0 + 1.0) + MUZZLE_CLEARANCE;
        Some((hitbox.position + heading * offset, heading))
    }
}

//! The scene: live bodies plus the per-tick behaviors bound to them
//!
//! Each tick runs in a fixed order:
//! 1. behaviors resolve contacts left by the previous motion step
//! 2. every live, non-static body integrates its velocity
//! 3. removed bodies are dropped along with every behavior bound to them

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::adapters::{Decay, DestructiveCollider, RollbackCollider};
use super::body::Body;
use super::collision::collision_impulse;
use crate::maze::Maze;

/// Stable handle to a scene body. Ids are never reused, even across `clear`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(u32);

impl BodyId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    /// A projectile started touching a wall and received an impulse
    WallImpact { body: BodyId, wall: BodyId },
    /// A projectile left the maze bounds and was removed
    Escaped { body: BodyId },
    /// A vehicle's last motion was undone after hitting a wall
    RolledBack { hitbox: BodyId },
    /// A body's lifetime ran out
    Expired { body: BodyId },
}

/// A per-tick behavior bound to one or more bodies
#[derive(Debug, Clone)]
pub enum Behavior {
    Destructive(DestructiveCollider),
    Rollback(RollbackCollider),
    Decay(Decay),
}

impl Behavior {
    fn apply(&mut self, scene: &mut Scene, maze: &Maze, dt: f32) {
        match self {
            Behavior::Destructive(collider) => collider.apply(scene, maze),
            Behavior::Rollback(collider) => collider.apply(scene, maze, dt),
            Behavior::Decay(decay) => decay.apply(scene, dt),
        }
    }

    /// Bodies whose removal releases this behavior
    fn bound_to(&self, id: BodyId) -> bool {
        match self {
            Behavior::Destructive(collider) => collider.body == id,
            Behavior::Rollback(collider) => collider.hitbox == id || collider.body == id,
            Behavior::Decay(decay) => decay.body == id,
        }
    }
}

/// Bodies sorted by id, behaviors in registration order
#[derive(Debug, Default)]
pub struct Scene {
    bodies: Vec<(BodyId, Body)>,
    behaviors: Vec<Behavior>,
    events: Vec<SceneEvent>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a body
    pub fn add_body(&mut self, body: Body) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        // Ids increase monotonically, so pushing keeps the list sorted
        self.bodies.push((id, body));
        id
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies
            .binary_search_by_key(&id, |(k, _)| *k)
            .ok()
            .map(|idx| &self.bodies[idx].1)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies
            .binary_search_by_key(&id, |(k, _)| *k)
            .ok()
            .map(|idx| &mut self.bodies[idx].1)
    }

    /// A body that exists and is not marked for removal
    pub fn live_body(&self, id: BodyId) -> Option<&Body> {
        self.body(id).filter(|b| !b.is_removed())
    }

    /// Mark a body for removal at the end of the tick
    pub fn remove_body(&mut self, id: BodyId) {
        if let Some(body) = self.body_mut(id) {
            body.remove();
        }
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies.iter().map(|(id, body)| (*id, body))
    }

    pub fn behavior_count(&self) -> usize {
        self.behaviors.len()
    }

    pub fn add_behavior(&mut self, behavior: Behavior) {
        self.behaviors.push(behavior);
    }

    /// Projectile/wall contact: impulse once per contact episode, removal outside the maze
    pub fn register_destructive_collision(&mut self, body: BodyId, elasticity: f32) {
        assert!(self.live_body(body).is_some(), "cannot bind collision to missing body {body:?}");
        self.add_behavior(Behavior::Destructive(DestructiveCollider::new(body, elasticity)));
    }

    /// Vehicle/wall contact: undo the last motion step of both hitbox and body
    pub fn register_rollback_collision(&mut self, hitbox: BodyId, body: BodyId) {
        assert!(self.live_body(hitbox).is_some(), "cannot bind collision to missing hitbox {hitbox:?}");
        assert!(self.live_body(body).is_some(), "cannot bind collision to missing body {body:?}");
        self.add_behavior(Behavior::Rollback(RollbackCollider::new(hitbox, body)));
    }

    /// Remove a body once `lifetime` seconds have passed
    pub fn register_decay(&mut self, body: BodyId, lifetime: f32) {
        assert!(self.live_body(body).is_some(), "cannot bind decay to missing body {body:?}");
        self.add_behavior(Behavior::Decay(Decay::new(body, lifetime)));
    }

    pub(crate) fn push_event(&mut self, event: SceneEvent) {
        log::debug!("{:?}", event);
        self.events.push(event);
    }

    /// Events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    /// Exchange an impulse between two bodies along `axis` (from `a` toward `b`)
    pub fn resolve_impact(&mut self, a: BodyId, b: BodyId, axis: Vec2, elasticity: f32) {
        let j = match (self.body(a), self.body(b)) {
            (Some(body_a), Some(body_b)) => collision_impulse(body_a, body_b, axis, elasticity),
            _ => return,
        };
        if let Some(body) = self.body_mut(a) {
            body.apply_impulse(axis * j);
        }
        if let Some(body) = self.body_mut(b) {
            body.apply_impulse(-axis * j);
        }
    }

    /// Advance one fixed timestep against the given maze
    pub fn tick(&mut self, maze: &Maze, dt: f32) {
        let mut behaviors = std::mem::take(&mut self.behaviors);
        for behavior in &mut behaviors {
            behavior.apply(self, maze, dt);
        }
        // Keep anything registered while behaviors ran
        behaviors.append(&mut self.behaviors);
        self.behaviors = behaviors;

        for (_, body) in &mut self.bodies {
            if !body.is_removed() {
                body.integrate(dt);
            }
        }

        self.prune();
    }

    /// Drop removed bodies and release their behaviors
    fn prune(&mut self) {
        let removed: Vec<BodyId> = self
            .bodies
            .iter()
            .filter(|(_, body)| body.is_removed())
            .map(|(id, _)| *id)
            .collect();
        if removed.is_empty() {
            return;
        }
        self.behaviors
            .retain(|behavior| !removed.iter().any(|&id| behavior.bound_to(id)));
        self.bodies.retain(|(_, body)| !body.is_removed());
    }

    /// Detach every body and behavior (round reset)
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.behaviors.clear();
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{GridIndex, MazeBlueprint};
    use crate::sim::body::{BodyKind, regular_polygon};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn empty_maze(scene: &mut Scene) -> Maze {
        let grid = GridIndex::new(2, 2, Vec2::ZERO, Vec2::new(200.0, 200.0));
        MazeBlueprint::generate(grid, 6.0, &mut Pcg32::seed_from_u64(1)).register(scene)
    }

    fn projectile(position: Vec2) -> Body {
        Body::new(BodyKind::Projectile, regular_polygon(6.0, 6), 100.0, position)
    }

    #[test]
    fn test_ids_are_sorted_and_unique() {
        let mut scene = Scene::new();
        let a = scene.add_body(projectile(Vec2::ZERO));
        let b = scene.add_body(projectile(Vec2::ONE));
        assert!(a < b);
        assert_eq!(scene.body(b).map(|body| body.position), Some(Vec2::ONE));
    }

    #[test]
    fn test_tick_integrates_moving_bodies() {
        let mut scene = Scene::new();
        let maze = empty_maze(&mut scene);
        let id = scene.add_body(projectile(Vec2::new(50.0, 50.0)));
        if let Some(body) = scene.body_mut(id) {
            body.velocity = Vec2::new(60.0, 0.0);
        }
        scene.tick(&maze, 0.5);
        assert_eq!(scene.body(id).map(|b| b.position), Some(Vec2::new(80.0, 50.0)));
    }

    #[test]
    fn test_removal_releases_behaviors() {
        let mut scene = Scene::new();
        let maze = empty_maze(&mut scene);
        let walls = scene.body_count();
        let id = scene.add_body(projectile(Vec2::new(50.0, 50.0)));
        scene.register_destructive_collision(id, 1.0);
        scene.register_decay(id, 10.0);
        assert_eq!(scene.behavior_count(), 2);

        scene.remove_body(id);
        scene.tick(&maze, 0.1);
        assert_eq!(scene.behavior_count(), 0);
        assert_eq!(scene.body_count(), walls);
        assert!(scene.body(id).is_none());
    }

    #[test]
    fn test_clear_keeps_ids_fresh() {
        let mut scene = Scene::new();
        let first = scene.add_body(projectile(Vec2::ZERO));
        scene.clear();
        assert!(scene.body(first).is_none());
        let second = scene.add_body(projectile(Vec2::ZERO));
        assert_ne!(first, second);
    }

    #[test]
    #[should_panic(expected = "missing body")]
    fn test_register_on_missing_body_panics() {
        let mut scene = Scene::new();
        let id = scene.add_body(projectile(Vec2::ZERO));
        scene.clear();
        scene.register_decay(id, 1.0);
    }
}

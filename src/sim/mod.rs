//! Deterministic simulation module
//!
//! Bodies, collision and the per-tick behaviors that tie them to a maze.
//! This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by body id, then behavior registration order)
//! - No rendering or platform dependencies

pub mod adapters;
pub mod body;
pub mod collision;
pub mod scene;
pub mod state;
pub mod vehicle;

pub use adapters::{Decay, DestructiveCollider, RollbackCollider};
pub use body::{Body, BodyKind, rectangle, regular_polygon};
pub use collision::{CollisionInfo, collision_impulse, find_collision};
pub use scene::{Behavior, BodyId, Scene, SceneEvent};
pub use state::Arena;
pub use vehicle::{DriveInput, Vehicle};

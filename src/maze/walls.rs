//! Wall geometry: one slot per grid edge, solid or open
//!
//! Slots keep their array position whether or not a collider exists, so the
//! walls around a cell can always be found by index arithmetic.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::{GridIndex, Vertex};
use super::topology::WallSkeleton;
use crate::sim::body::{Body, BodyKind, rectangle};

/// One addressable wall position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallSlot<T> {
    /// Passage: an inert placeholder that never collides
    Open,
    /// Static rectangular obstacle
    Solid(T),
}

impl<T> WallSlot<T> {
    pub fn is_solid(&self) -> bool {
        matches!(self, WallSlot::Solid(_))
    }

    pub fn solid(&self) -> Option<&T> {
        match self {
            WallSlot::Solid(wall) => Some(wall),
            WallSlot::Open => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> WallSlot<U> {
        match self {
            WallSlot::Solid(wall) => WallSlot::Solid(f(wall)),
            WallSlot::Open => WallSlot::Open,
        }
    }
}

/// The two fixed-size wall arrays
#[derive(Debug, Clone)]
pub struct WallSlots<T> {
    /// `rows * (columns + 1)` slots
    pub vertical: Vec<WallSlot<T>>,
    /// `columns * (rows + 1)` slots
    pub horizontal: Vec<WallSlot<T>>,
}

impl<T> WallSlots<T> {
    pub fn total(&self) -> usize {
        self.vertical.len() + self.horizontal.len()
    }

    pub fn solid_count(&self) -> usize {
        self.vertical
            .iter()
            .chain(self.horizontal.iter())
            .filter(|slot| slot.is_solid())
            .count()
    }
}

/// Build a static wall rectangle between two adjacent vertices.
///
/// The rectangle is `thickness` wide and runs past each endpoint by half the
/// thickness, so walls meeting at a corner overlap into a clean joint.
pub fn wall_body(grid: &GridIndex, v1: Vertex, v2: Vertex, thickness: f32) -> Body {
    let p1 = grid.vertex_to_vector(v1);
    let p2 = grid.vertex_to_vector(v2);
    let half = thickness / 2.0;
    let span = (p2 - p1).abs();

    let half_extents = if v1.j == v2.j {
        Vec2::new(half, span.y / 2.0 + half)
    } else {
        Vec2::new(span.x / 2.0 + half, half)
    };

    Body::new_static(BodyKind::Wall, rectangle(half_extents), (p1 + p2) / 2.0)
}

/// Materialize every slot: skeleton edges become solid walls, the rest stay open
pub fn build_wall_slots(grid: &GridIndex, skeleton: &WallSkeleton, thickness: f32) -> WallSlots<Body> {
    let slot_for = |(v1, v2): (Vertex, Vertex)| {
        if skeleton.contains(grid.vertex_to_index(v1), grid.vertex_to_index(v2)) {
            WallSlot::Solid(wall_body(grid, v1, v2, thickness))
        } else {
            WallSlot::Open
        }
    };

    let vertical = (0..grid.vertical_slot_count())
        .map(|slot| slot_for(grid.vertical_slot_vertices(slot)))
        .collect();
    let horizontal = (0..grid.horizontal_slot_count())
        .map(|slot| slot_for(grid.horizontal_slot_vertices(slot)))
        .collect();

    WallSlots { vertical, horizontal }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::topology::generate_skeleton;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn bounds(shape: &[Vec2]) -> (Vec2, Vec2) {
        let min = shape.iter().fold(Vec2::splat(f32::MAX), |acc, p| acc.min(*p));
        let max = shape.iter().fold(Vec2::splat(f32::MIN), |acc, p| acc.max(*p));
        (min, max)
    }

    #[test]
    fn test_vertical_wall_geometry() {
        let grid = GridIndex::new(2, 1, Vec2::ZERO, Vec2::new(100.0, 100.0));
        let wall = wall_body(&grid, Vertex::new(0, 1), Vertex::new(1, 1), 6.0);
        assert!(wall.is_static());
        assert_eq!(wall.position, Vec2::new(50.0, 50.0));
        let (min, max) = bounds(&wall.world_shape());
        assert!((min - Vec2::new(47.0, -3.0)).length() < 1e-4);
        assert!((max - Vec2::new(53.0, 103.0)).length() < 1e-4);
    }

    #[test]
    fn test_horizontal_wall_geometry() {
        let grid = GridIndex::new(2, 1, Vec2::ZERO, Vec2::new(100.0, 100.0));
        let wall = wall_body(&grid, Vertex::new(1, 0), Vertex::new(1, 1), 6.0);
        let (min, max) = bounds(&wall.world_shape());
        assert!((min - Vec2::new(-3.0, 97.0)).length() < 1e-4);
        assert!((max - Vec2::new(53.0, 103.0)).length() < 1e-4);
    }

    #[test]
    fn test_slot_counts_and_solidity() {
        let grid = GridIndex::new(2, 1, Vec2::ZERO, Vec2::new(100.0, 100.0));
        let skeleton = generate_skeleton(&grid, &mut Pcg32::seed_from_u64(3));
        let slots = build_wall_slots(&grid, &skeleton, 6.0);
        assert_eq!(slots.vertical.len(), 3);
        assert_eq!(slots.horizontal.len(), 4);
        assert_eq!(slots.total(), 7);
        // Border is solid; the middle vertical slot is the one passage
        assert_eq!(slots.solid_count(), 6);
        assert!(!slots.vertical[1].is_solid());
    }

    #[test]
    fn test_wall_slot_map() {
        let slot: WallSlot<u32> = WallSlot::Solid(4);
        assert_eq!(slot.map(|x| x * 2), WallSlot::Solid(8));
        assert_eq!(WallSlot::<u32>::Open.map(|x| x * 2), WallSlot::Open);
        assert_eq!(WallSlot::Solid(1).solid(), Some(&1));
    }
}

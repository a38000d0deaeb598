//! Procedural maze: grid indexing, topology and wall geometry
//!
//! Construction is a one-way hand-off. [`maze_init`] produces a [`MazeBlueprint`]
//! that owns the wall bodies; [`MazeBlueprint::register`] moves them into a
//! [`Scene`] and returns a [`Maze`] that keeps only body ids for lookup.

pub mod grid;
pub mod sampler;
pub mod topology;
pub mod walls;

use std::fmt;

use glam::Vec2;
use rand::Rng;

pub use grid::{Cell, GridIndex, Vertex, WallsAround};
pub use topology::{Edge, WallSkeleton, generate_skeleton};
pub use walls::{WallSlot, WallSlots, build_wall_slots, wall_body};

use crate::consts::WALL_THICKNESS;
use crate::sim::body::Body;
use crate::sim::scene::{BodyId, Scene};

/// Generate a maze with the default wall thickness
pub fn maze_init<R: Rng + ?Sized>(
    columns: usize,
    rows: usize,
    lower_left: Vec2,
    upper_right: Vec2,
    rng: &mut R,
) -> MazeBlueprint {
    MazeBlueprint::generate(GridIndex::new(columns, rows, lower_left, upper_right), WALL_THICKNESS, rng)
}

/// A generated maze whose wall bodies have not been handed to a scene yet
#[derive(Debug, Clone)]
pub struct MazeBlueprint {
    grid: GridIndex,
    skeleton: WallSkeleton,
    walls: WallSlots<Body>,
}

impl MazeBlueprint {
    pub fn generate<R: Rng + ?Sized>(grid: GridIndex, wall_thickness: f32, rng: &mut R) -> Self {
        let skeleton = generate_skeleton(&grid, rng);
        let walls = build_wall_slots(&grid, &skeleton, wall_thickness);
        log::info!(
            "Maze {}x{}: {} wall slots, {} solid",
            grid.columns(),
            grid.rows(),
            walls.total(),
            walls.solid_count()
        );
        Self { grid, skeleton, walls }
    }

    pub fn grid(&self) -> &GridIndex {
        &self.grid
    }

    pub fn skeleton(&self) -> &WallSkeleton {
        &self.skeleton
    }

    pub fn vertical_walls(&self) -> &[WallSlot<Body>] {
        &self.walls.vertical
    }

    pub fn horizontal_walls(&self) -> &[WallSlot<Body>] {
        &self.walls.horizontal
    }

    /// Move every solid wall into the scene as a static body
    pub fn register(self, scene: &mut Scene) -> Maze {
        let WallSlots { vertical, horizontal } = self.walls;
        let vertical_walls = vertical
            .into_iter()
            .map(|slot| slot.map(|body| scene.add_body(body)))
            .collect();
        let horizontal_walls = horizontal
            .into_iter()
            .map(|slot| slot.map(|body| scene.add_body(body)))
            .collect();
        Maze {
            grid: self.grid,
            walls: WallSlots {
                vertical: vertical_walls,
                horizontal: horizontal_walls,
            },
        }
    }
}

/// A maze registered with a scene. Immutable; wall slots refer to scene bodies by id.
#[derive(Debug, Clone)]
pub struct Maze {
    grid: GridIndex,
    walls: WallSlots<BodyId>,
}

impl Maze {
    pub fn grid(&self) -> &GridIndex {
        &self.grid
    }

    pub fn columns(&self) -> usize {
        self.grid.columns()
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn vertical_walls(&self) -> &[WallSlot<BodyId>] {
        &self.walls.vertical
    }

    pub fn horizontal_walls(&self) -> &[WallSlot<BodyId>] {
        &self.walls.horizontal
    }

    pub fn cell_to_vector(&self, cell: Cell) -> Vec2 {
        self.grid.cell_to_vector(cell)
    }

    pub fn vector_to_cell(&self, v: Vec2) -> Cell {
        self.grid.vector_to_cell(v)
    }

    pub fn cell_to_index(&self, cell: Cell) -> usize {
        self.grid.cell_to_index(cell)
    }

    pub fn index_to_cell(&self, index: usize) -> Cell {
        self.grid.index_to_cell(index)
    }

    pub fn check_outside(&self, v: Vec2) -> bool {
        self.grid.check_outside(v)
    }

    /// The 2 vertical and 2 horizontal slots bounding a cell: left, right, bottom, top
    pub fn get_walls_around(&self, cell: Cell) -> [WallSlot<BodyId>; 4] {
        let WallsAround { vertical, horizontal } = self.grid.walls_around(cell);
        [
            self.walls.vertical[vertical[0]],
            self.walls.vertical[vertical[1]],
            self.walls.horizontal[horizontal[0]],
            self.walls.horizontal[horizontal[1]],
        ]
    }

    pub fn sample_one<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        sampler::sample_one(&self.grid, rng)
    }

    pub fn sample_distinct<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<Vec2> {
        sampler::sample_distinct(&self.grid, n, rng)
    }

    fn vertical_solid(&self, i: usize, j: usize) -> bool {
        self.walls.vertical[self.grid.vertical_slot(i, j)].is_solid()
    }

    fn horizontal_solid(&self, i: usize, j: usize) -> bool {
        self.walls.horizontal[self.grid.horizontal_slot(i, j)].is_solid()
    }
}

/// ASCII plan view, top row first
impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (columns, rows) = (self.columns(), self.rows());
        for i in (0..=rows).rev() {
            for j in 0..columns {
                let edge = if self.horizontal_solid(i, j) { "---" } else { "   " };
                write!(f, "+{edge}")?;
            }
            writeln!(f, "+")?;
            if i == 0 {
                break;
            }
            for j in 0..=columns {
                let wall = if self.vertical_solid(i - 1, j) { "|" } else { " " };
                if j < columns {
                    write!(f, "{wall}   ")?;
                } else {
                    writeln!(f, "{wall}")?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn build(columns: usize, rows: usize, seed: u64) -> (Scene, Maze) {
        let mut scene = Scene::new();
        let mut rng = Pcg32::seed_from_u64(seed);
        let upper_right = Vec2::new(columns as f32 * 100.0, rows as f32 * 100.0);
        let maze = maze_init(columns, rows, Vec2::ZERO, upper_right, &mut rng).register(&mut scene);
        (scene, maze)
    }

    /// Number of cells reachable from cell 0 through open slots, and open slot count
    fn passage_graph(maze: &Maze) -> (usize, usize) {
        let grid = maze.grid();
        let mut seen = vec![false; grid.cell_count()];
        let mut stack = vec![0usize];
        seen[0] = true;
        let mut reached = 0;
        while let Some(index) = stack.pop() {
            reached += 1;
            let cell = grid.index_to_cell(index);
            let [left, right, bottom, top] = maze.get_walls_around(cell);
            let moves = [
                (left, cell.x.checked_sub(1).map(|x| Cell::new(x, cell.y))),
                (right, (cell.x + 1 < grid.columns()).then(|| Cell::new(cell.x + 1, cell.y))),
                (bottom, cell.y.checked_sub(1).map(|y| Cell::new(cell.x, y))),
                (top, (cell.y + 1 < grid.rows()).then(|| Cell::new(cell.x, cell.y + 1))),
            ];
            for (slot, neighbor) in moves {
                if let (WallSlot::Open, Some(next)) = (slot, neighbor) {
                    let next = grid.cell_to_index(next);
                    if !seen[next] {
                        seen[next] = true;
                        stack.push(next);
                    }
                }
            }
        }
        let open = maze
            .vertical_walls()
            .iter()
            .chain(maze.horizontal_walls())
            .filter(|slot| !slot.is_solid())
            .count();
        (reached, open)
    }

    #[test]
    fn test_worked_example_two_by_one() {
        let (scene, maze) = build(2, 1, 9);
        assert_eq!(maze.vertical_walls().len(), 3);
        assert_eq!(maze.horizontal_walls().len(), 4);
        assert_eq!(scene.body_count(), 6);
        assert_eq!(maze.cell_to_vector(Cell::new(0, 0)), Vec2::new(50.0, 50.0));
        assert_eq!(passage_graph(&maze), (2, 1));
    }

    #[test]
    fn test_blueprint_walls_follow_skeleton() {
        let mut rng = Pcg32::seed_from_u64(42);
        let blueprint = maze_init(5, 4, Vec2::ZERO, Vec2::new(500.0, 400.0), &mut rng);
        let skeleton = blueprint.skeleton();
        // Border frame plus one edge per interior vertex
        assert_eq!(skeleton.border_edge_count(), 2 * 5 + 2 * 4);
        assert_eq!(skeleton.len(), skeleton.border_edge_count() + 4 * 3);
        let solid = blueprint
            .vertical_walls()
            .iter()
            .chain(blueprint.horizontal_walls())
            .filter(|slot| slot.is_solid())
            .count();
        assert_eq!(solid, skeleton.len());
    }

    #[test]
    fn test_register_moves_walls_into_scene() {
        let (scene, maze) = build(10, 5, 1234);
        let solid: Vec<BodyId> = maze
            .vertical_walls()
            .iter()
            .chain(maze.horizontal_walls())
            .filter_map(|slot| slot.solid().copied())
            .collect();
        assert_eq!(solid.len(), scene.body_count());
        for id in solid {
            assert!(scene.body(id).is_some_and(|b| b.is_static()));
        }
    }

    #[test]
    fn test_border_is_solid() {
        let (_, maze) = build(6, 4, 77);
        for y in 0..4 {
            assert!(maze.get_walls_around(Cell::new(0, y))[0].is_solid());
            assert!(maze.get_walls_around(Cell::new(5, y))[1].is_solid());
        }
        for x in 0..6 {
            assert!(maze.get_walls_around(Cell::new(x, 0))[2].is_solid());
            assert!(maze.get_walls_around(Cell::new(x, 3))[3].is_solid());
        }
    }

    #[test]
    fn test_display_has_frame() {
        let (_, maze) = build(3, 2, 5);
        let plan = maze.to_string();
        let lines: Vec<&str> = plan.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "+---+---+---+");
        assert_eq!(lines[4], "+---+---+---+");
        assert!(lines[1].starts_with('|') && lines[1].ends_with('|'));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let (_, a) = build(8, 6, 2024);
        let (_, b) = build(8, 6, 2024);
        assert_eq!(a.to_string(), b.to_string());
    }

    proptest! {
        #[test]
        fn prop_perfect_maze(columns in 1usize..12, rows in 1usize..12, seed in any::<u64>()) {
            let (_, maze) = build(columns, rows, seed);
            prop_assert_eq!(maze.vertical_walls().len(), rows * (columns + 1));
            prop_assert_eq!(maze.horizontal_walls().len(), columns * (rows + 1));

            // Passages form a spanning tree over the cells
            let (reached, open) = passage_graph(&maze);
            prop_assert_eq!(reached, columns * rows);
            prop_assert_eq!(open, columns * rows - 1);

            for index in 0..columns * rows {
                let cell = maze.index_to_cell(index);
                prop_assert_eq!(maze.get_walls_around(cell).len(), 4);
                prop_assert_eq!(maze.vector_to_cell(maze.cell_to_vector(cell)), cell);
            }
        }
    }
}

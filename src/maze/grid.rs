//! Grid indexing over three coordinate spaces
//!
//! The same world rectangle `[lower_left, upper_right]` is viewed as:
//! - cell space: `columns x rows` tiles, addressed by `Cell { x, y }`
//! - vertex space: `(columns + 1) x (rows + 1)` corners, addressed by `Vertex { i, j }`
//! - world space: continuous `Vec2` positions
//!
//! Wall slots are addressed by fixed formulas. Vertical slot `(columns + 1) * i + j`
//! joins vertices `(i, j)` and `(i + 1, j)`; horizontal slot `(rows + 1) * j + i`
//! joins vertices `(i, j)` and `(i, j + 1)`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A grid tile, `0 <= x < columns`, `0 <= y < rows`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// A grid corner, `0 <= i <= rows` (row, y axis), `0 <= j <= columns` (column, x axis)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vertex {
    pub i: usize,
    pub j: usize,
}

impl Vertex {
    pub fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }
}

/// Slot indices of the four walls bounding one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallsAround {
    /// Left and right slots in the vertical wall array
    pub vertical: [usize; 2],
    /// Bottom and top slots in the horizontal wall array
    pub horizontal: [usize; 2],
}

/// Bijective mappings between cells, vertices, linear indices and world positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridIndex {
    columns: usize,
    rows: usize,
    lower_left: Vec2,
    upper_right: Vec2,
}

impl GridIndex {
    pub fn new(columns: usize, rows: usize, lower_left: Vec2, upper_right: Vec2) -> Self {
        assert!(columns >= 1 && rows >= 1, "grid must have at least one cell, got {columns}x{rows}");
        assert!(
            upper_right.x > lower_left.x && upper_right.y > lower_left.y,
            "degenerate world box {lower_left} .. {upper_right}"
        );
        Self {
            columns,
            rows,
            lower_left,
            upper_right,
        }
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn lower_left(&self) -> Vec2 {
        self.lower_left
    }

    #[inline]
    pub fn upper_right(&self) -> Vec2 {
        self.upper_right
    }

    /// Cell edge lengths `(edge_h, edge_v)`
    #[inline]
    pub fn edge_size(&self) -> Vec2 {
        let extent = self.upper_right - self.lower_left;
        Vec2::new(extent.x / self.columns as f32, extent.y / self.rows as f32)
    }

    pub fn cell_count(&self) -> usize {
        self.columns * self.rows
    }

    pub fn vertex_count(&self) -> usize {
        (self.columns + 1) * (self.rows + 1)
    }

    /// Length of the vertical wall array: `rows * (columns + 1)`
    pub fn vertical_slot_count(&self) -> usize {
        self.rows * (self.columns + 1)
    }

    /// Length of the horizontal wall array: `columns * (rows + 1)`
    pub fn horizontal_slot_count(&self) -> usize {
        self.columns * (self.rows + 1)
    }

    /// Is the point outside the (closed) world box?
    pub fn check_outside(&self, v: Vec2) -> bool {
        let inside = self.lower_left.x <= v.x
            && v.x <= self.upper_right.x
            && self.lower_left.y <= v.y
            && v.y <= self.upper_right.y;
        !inside
    }

    // === Cell space ===

    /// World-space center of a cell
    pub fn cell_to_vector(&self, cell: Cell) -> Vec2 {
        self.assert_cell(cell);
        let edge = self.edge_size();
        self.lower_left
            + Vec2::new(
                cell.x as f32 * edge.x + edge.x / 2.0,
                cell.y as f32 * edge.y + edge.y / 2.0,
            )
    }

    /// Cell containing a world position.
    ///
    /// The box is closed, so points on the upper edges belong to the last column/row.
    pub fn vector_to_cell(&self, v: Vec2) -> Cell {
        assert!(!self.check_outside(v), "position {v} lies outside the maze");
        let local = (v - self.lower_left) / self.edge_size();
        Cell {
            x: (local.x.floor() as usize).min(self.columns - 1),
            y: (local.y.floor() as usize).min(self.rows - 1),
        }
    }

    pub fn cell_to_index(&self, cell: Cell) -> usize {
        self.assert_cell(cell);
        cell.x + self.columns * cell.y
    }

    pub fn index_to_cell(&self, index: usize) -> Cell {
        assert!(
            index < self.cell_count(),
            "cell index {index} out of range (cells: {})",
            self.cell_count()
        );
        Cell {
            x: index % self.columns,
            y: index / self.columns,
        }
    }

    // === Vertex space ===

    /// World-space position of a grid corner (no half-cell offset)
    pub fn vertex_to_vector(&self, vertex: Vertex) -> Vec2 {
        self.assert_vertex(vertex);
        let edge = self.edge_size();
        self.lower_left + Vec2::new(vertex.j as f32 * edge.x, vertex.i as f32 * edge.y)
    }

    /// Grid corner at or below-left of a world position
    pub fn vector_to_vertex(&self, v: Vec2) -> Vertex {
        assert!(!self.check_outside(v), "position {v} lies outside the maze");
        let local = (v - self.lower_left) / self.edge_size();
        Vertex {
            i: local.y.floor() as usize,
            j: local.x.floor() as usize,
        }
    }

    pub fn vertex_to_index(&self, vertex: Vertex) -> usize {
        self.assert_vertex(vertex);
        vertex.j + (self.columns + 1) * vertex.i
    }

    pub fn index_to_vertex(&self, index: usize) -> Vertex {
        assert!(
            index < self.vertex_count(),
            "vertex index {index} out of range (vertices: {})",
            self.vertex_count()
        );
        Vertex {
            i: index / (self.columns + 1),
            j: index % (self.columns + 1),
        }
    }

    /// Vertices on the outer frame of the grid
    pub fn is_border(&self, vertex: Vertex) -> bool {
        vertex.i == 0 || vertex.i == self.rows || vertex.j == 0 || vertex.j == self.columns
    }

    /// Up/down/left/right neighbors of a vertex, as vertex indices (bounds-checked)
    pub fn vertex_neighbors(&self, index: usize) -> Vec<usize> {
        let Vertex { i, j } = self.index_to_vertex(index);
        let mut neighbors = Vec::with_capacity(4);
        if j > 0 {
            neighbors.push(self.vertex_to_index(Vertex::new(i, j - 1)));
        }
        if j < self.columns {
            neighbors.push(self.vertex_to_index(Vertex::new(i, j + 1)));
        }
        if i > 0 {
            neighbors.push(self.vertex_to_index(Vertex::new(i - 1, j)));
        }
        if i < self.rows {
            neighbors.push(self.vertex_to_index(Vertex::new(i + 1, j)));
        }
        neighbors
    }

    // === Wall slot addressing ===

    /// Vertical slot between vertices `(i, j)` and `(i + 1, j)`
    pub fn vertical_slot(&self, i: usize, j: usize) -> usize {
        assert!(i < self.rows && j <= self.columns, "vertical slot ({i}, {j}) out of range");
        (self.columns + 1) * i + j
    }

    /// Horizontal slot between vertices `(i, j)` and `(i, j + 1)`
    pub fn horizontal_slot(&self, i: usize, j: usize) -> usize {
        assert!(i <= self.rows && j < self.columns, "horizontal slot ({i}, {j}) out of range");
        (self.rows + 1) * j + i
    }

    /// Vertex pair (lower, upper) joined by a vertical slot
    pub fn vertical_slot_vertices(&self, slot: usize) -> (Vertex, Vertex) {
        assert!(slot < self.vertical_slot_count(), "vertical slot {slot} out of range");
        let i = slot / (self.columns + 1);
        let j = slot % (self.columns + 1);
        (Vertex::new(i, j), Vertex::new(i + 1, j))
    }

    /// Vertex pair (left, right) joined by a horizontal slot
    pub fn horizontal_slot_vertices(&self, slot: usize) -> (Vertex, Vertex) {
        assert!(slot < self.horizontal_slot_count(), "horizontal slot {slot} out of range");
        let j = slot / (self.rows + 1);
        let i = slot % (self.rows + 1);
        (Vertex::new(i, j), Vertex::new(i, j + 1))
    }

    /// The two vertical and two horizontal slots bounding a cell
    pub fn walls_around(&self, cell: Cell) -> WallsAround {
        self.assert_cell(cell);
        let vertical = (self.columns + 1) * cell.y + cell.x;
        let horizontal = (self.rows + 1) * cell.x + cell.y;
        WallsAround {
            vertical: [vertical, vertical + 1],
            horizontal: [horizontal, horizontal + 1],
        }
    }

    #[inline]
    fn assert_cell(&self, cell: Cell) {
        assert!(
            cell.x < self.columns && cell.y < self.rows,
            "cell ({}, {}) out of range for {}x{} grid",
            cell.x,
            cell.y,
            self.columns,
            self.rows
        );
    }

    #[inline]
    fn assert_vertex(&self, vertex: Vertex) {
        assert!(
            vertex.j <= self.columns && vertex.i <= self.rows,
            "vertex ({}, {}) out of range for {}x{} grid",
            vertex.i,
            vertex.j,
            self.columns,
            self.rows
        );
    }
}

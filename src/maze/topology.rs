//! Maze topology: a random spanning tree over the vertex grid
//!
//! The tree is grown with loop-erased random walks (Wilson style), seeded with the
//! border frame. Every tree edge becomes a solid wall; every other grid edge is a
//! passage. Because the walls form a tree over the corners, the passages form a
//! tree over the cells: exactly one simple path joins any two cells.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::grid::{GridIndex, Vertex};

const NOT_ON_PATH: usize = usize::MAX;

/// An unordered pair of adjacent vertices, stored as sorted vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    a: usize,
    b: usize,
}

impl Edge {
    pub fn new(u: usize, v: usize) -> Self {
        Self {
            a: u.min(v),
            b: u.max(v),
        }
    }

    /// Vertex indices (smaller first)
    pub fn endpoints(&self) -> (usize, usize) {
        (self.a, self.b)
    }
}

/// The generated edge set: border frame plus one edge per interior vertex
#[derive(Debug, Clone, Default)]
pub struct WallSkeleton {
    /// Edges in commit order
    edges: Vec<Edge>,
    lookup: HashSet<Edge>,
    border_edges: usize,
}

impl WallSkeleton {
    fn insert(&mut self, edge: Edge) {
        if self.lookup.insert(edge) {
            self.edges.push(edge);
        }
    }

    /// Unordered membership: `contains(a, b) == contains(b, a)`
    pub fn contains(&self, u: usize, v: usize) -> bool {
        self.lookup.contains(&Edge::new(u, v))
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn border_edge_count(&self) -> usize {
        self.border_edges
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

/// Generate the wall skeleton for a grid.
///
/// Border edges are committed first. Each interior vertex not yet in the tree
/// starts a walk; at every step the walk attaches to an in-tree neighbor if one
/// exists, otherwise it moves to a random neighbor, erasing any loop it closes.
/// The finished walk is committed edge by edge.
pub fn generate_skeleton<R: Rng + ?Sized>(grid: &GridIndex, rng: &mut R) -> WallSkeleton {
    let mut skeleton = WallSkeleton::default();
    let columns = grid.columns();
    let rows = grid.rows();

    for j in 0..columns {
        for i in [0, rows] {
            skeleton.insert(Edge::new(
                grid.vertex_to_index(Vertex::new(i, j)),
                grid.vertex_to_index(Vertex::new(i, j + 1)),
            ));
        }
    }
    for i in 0..rows {
        for j in [0, columns] {
            skeleton.insert(Edge::new(
                grid.vertex_to_index(Vertex::new(i, j)),
                grid.vertex_to_index(Vertex::new(i + 1, j)),
            ));
        }
    }
    skeleton.border_edges = skeleton.len();

    let vertex_count = grid.vertex_count();
    let mut in_tree: Vec<bool> = (0..vertex_count)
        .map(|idx| grid.is_border(grid.index_to_vertex(idx)))
        .collect();
    let mut path_pos = vec![NOT_ON_PATH; vertex_count];

    // Visiting a shuffled order picks each walk start uniformly from the unvisited set
    let mut starts: Vec<usize> = (0..vertex_count).filter(|&idx| !in_tree[idx]).collect();
    starts.shuffle(rng);

    let mut path: Vec<usize> = Vec::with_capacity(vertex_count);
    let mut steps = 0usize;
    let mut erased = 0usize;

    for start in starts {
        if in_tree[start] {
            continue;
        }
        path.clear();
        path.push(start);
        path_pos[start] = 0;

        loop {
            let tail = path[path.len() - 1];
            let mut neighbors = grid.vertex_neighbors(tail);
            neighbors.shuffle(rng);
            steps += 1;

            if let Some(&anchor) = neighbors.iter().find(|&&n| in_tree[n]) {
                path.push(anchor);
                break;
            }

            // Interior vertices always have four neighbors
            let next = neighbors[0];
            match path_pos[next] {
                NOT_ON_PATH => {
                    path_pos[next] = path.len();
                    path.push(next);
                }
                pos => {
                    for &dropped in &path[pos + 1..] {
                        path_pos[dropped] = NOT_ON_PATH;
                    }
                    erased += path.len() - pos - 1;
                    path.truncate(pos + 1);
                }
            }
        }

        for pair in path.windows(2) {
            skeleton.insert(Edge::new(pair[0], pair[1]));
        }
        for &v in &path {
            in_tree[v] = true;
            path_pos[v] = NOT_ON_PATH;
        }
    }

    log::debug!(
        "Skeleton {}x{}: {} edges ({} border), {} walk steps, {} erased",
        columns,
        rows,
        skeleton.len(),
        skeleton.border_edges,
        steps,
        erased
    );

    skeleton
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Minimal union-find for tree checks
    struct DisjointSet {
        parent: Vec<usize>,
    }

    impl DisjointSet {
        fn new(n: usize) -> Self {
            Self {
                parent: (0..n).collect(),
            }
        }

        fn find(&mut self, x: usize) -> usize {
            let mut root = x;
            while self.parent[root] != root {
                root = self.parent[root];
            }
            let mut x = x;
            while self.parent[x] != root {
                let next = self.parent[x];
                self.parent[x] = root;
                x = next;
            }
            root
        }

        /// Returns false if already joined
        fn union(&mut self, a: usize, b: usize) -> bool {
            let (ra, rb) = (self.find(a), self.find(b));
            if ra == rb {
                return false;
            }
            self.parent[ra] = rb;
            true
        }
    }

    fn grid(columns: usize, rows: usize) -> GridIndex {
        GridIndex::new(columns, rows, Vec2::ZERO, Vec2::new(columns as f32 * 10.0, rows as f32 * 10.0))
    }

    /// The skeleton is a tree once the border frame is contracted to one root
    fn assert_tree_over_border(grid: &GridIndex, skeleton: &WallSkeleton) {
        let n = grid.vertex_count();
        let interior = (0..n).filter(|&v| !grid.is_border(grid.index_to_vertex(v))).count();
        assert_eq!(skeleton.len(), skeleton.border_edge_count() + interior);

        let mut sets = DisjointSet::new(n);
        let border: Vec<usize> = (0..n).filter(|&v| grid.is_border(grid.index_to_vertex(v))).collect();
        for pair in border.windows(2) {
            sets.union(pair[0], pair[1]);
        }
        for edge in &skeleton.edges()[skeleton.border_edge_count()..] {
            let (a, b) = edge.endpoints();
            assert!(sets.union(a, b), "cycle through edge {a}-{b}");
        }
        let root = sets.find(0);
        for v in 0..n {
            assert_eq!(sets.find(v), root, "vertex {v} not connected to the border");
        }
    }

    #[test]
    fn test_edge_is_unordered() {
        assert_eq!(Edge::new(3, 7), Edge::new(7, 3));
        assert_eq!(Edge::new(7, 3).endpoints(), (3, 7));
    }

    #[test]
    fn test_border_only_grid() {
        // 2x1 has no interior vertex: the skeleton is exactly the frame
        let grid = grid(2, 1);
        let mut rng = Pcg32::seed_from_u64(1);
        let skeleton = generate_skeleton(&grid, &mut rng);
        assert_eq!(skeleton.border_edge_count(), 6);
        assert_eq!(skeleton.len(), 6);
        // middle vertical edge (0,1)-(1,1) is not a wall
        assert!(!skeleton.contains(1, 4));
    }

    #[test]
    fn test_single_interior_vertex_attaches_once() {
        let grid = grid(2, 2);
        let center = grid.vertex_to_index(Vertex::new(1, 1));
        for seed in 0..20 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let skeleton = generate_skeleton(&grid, &mut rng);
            let attached = grid
                .vertex_neighbors(center)
                .into_iter()
                .filter(|&n| skeleton.contains(center, n))
                .count();
            assert_eq!(attached, 1);
            assert_eq!(skeleton.len(), 9);
        }
    }

    #[test]
    fn test_same_seed_same_skeleton() {
        let grid = grid(10, 5);
        let a = generate_skeleton(&grid, &mut Pcg32::seed_from_u64(42));
        let b = generate_skeleton(&grid, &mut Pcg32::seed_from_u64(42));
        assert_eq!(a.edges(), b.edges());
    }

    #[test]
    fn test_large_grid_is_tree() {
        let grid = grid(40, 30);
        let skeleton = generate_skeleton(&grid, &mut Pcg32::seed_from_u64(7));
        assert_tree_over_border(&grid, &skeleton);
    }

    proptest! {
        #[test]
        fn prop_skeleton_is_tree(columns in 1usize..12, rows in 1usize..12, seed in any::<u64>()) {
            let grid = grid(columns, rows);
            let skeleton = generate_skeleton(&grid, &mut Pcg32::seed_from_u64(seed));
            prop_assert_eq!(skeleton.border_edge_count(), 2 * columns + 2 * rows);
            assert_tree_over_border(&grid, &skeleton);

            let distinct: HashSet<_> = skeleton.edges().iter().copied().collect();
            prop_assert_eq!(distinct.len(), skeleton.len());
            for edge in skeleton.edges() {
                let (a, b) = edge.endpoints();
                prop_assert!(grid.vertex_neighbors(a).contains(&b));
            }
        }
    }
}

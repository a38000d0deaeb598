//! Random cell-center sampling for spawn placement

use glam::Vec2;
use rand::Rng;

use super::grid::GridIndex;

/// Center of a uniformly random cell
pub fn sample_one<R: Rng + ?Sized>(grid: &GridIndex, rng: &mut R) -> Vec2 {
    let index = rng.random_range(0..grid.cell_count());
    grid.cell_to_vector(grid.index_to_cell(index))
}

/// `n` centers of pairwise distinct random cells, by rejection sampling.
///
/// Panics if `n` exceeds the number of cells (it could never finish).
pub fn sample_distinct<R: Rng + ?Sized>(grid: &GridIndex, n: usize, rng: &mut R) -> Vec<Vec2> {
    let cells = grid.cell_count();
    assert!(n <= cells, "cannot sample {n} distinct cells from a grid of {cells}");

    let mut taken = vec![false; cells];
    let mut centers = Vec::with_capacity(n);
    while centers.len() < n {
        let index = rng.random_range(0..cells);
        if taken[index] {
            continue;
        }
        taken[index] = true;
        centers.push(grid.cell_to_vector(grid.index_to_cell(index)));
    }
    centers
}

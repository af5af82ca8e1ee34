use ndarray::Array2;
use rand::Rng;
use smallvec::SmallVec;

use crate::*;

/// Randomized depth-first backtracker, turns a fully walled lattice into a perfect maze.
///
/// Backtracking starts from the first cell in row-major order. Once that component is exhausted
/// the scan moves on to the next cell that was not reached, so masks with disjoint regions end up
/// with one spanning tree per region. Returns the number of regions carved, zero for an empty
/// lattice.
pub fn carve<R: Rng>(grid: &mut Grid, rng: &mut R) -> CellCount {
    let mut visited: Array2<bool> = grid.scratch();
    let mut stack: Vec<Coord2> = Vec::new();
    let mut components = 0;

    let starts: Vec<Coord2> = grid.iter_cells().collect();
    for start in starts {
        if visited[start.to_nd_index()] {
            continue;
        }
        components += 1;

        visited[start.to_nd_index()] = true;
        stack.push(start);

        while let Some(&current) = stack.last() {
            let candidates: SmallVec<[(Direction, Coord2); 4]> = grid
                .cell_neighbors(current)
                .filter(|&(_, pos)| !visited[pos.to_nd_index()])
                .collect();

            if candidates.is_empty() {
                stack.pop();
                continue;
            }

            let (direction, next) = candidates[rng.random_range(0..candidates.len())];
            visited[next.to_nd_index()] = true;
            grid.open_wall_pair(current, direction);
            stack.push(next);
        }
    }

    if components > 1 {
        log::debug!("Shape mask splits the lattice, carved {components} separate regions");
    }
    components
}

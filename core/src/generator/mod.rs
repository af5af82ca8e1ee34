use rand::Rng;

use crate::*;
pub use backtracker::*;
pub use braid::*;
pub use random::*;

mod backtracker;
mod braid;
mod random;

pub trait MazeGenerator {
    fn generate(self, config: &MazeConfig) -> Result<Grid>;
}

/// Builds the masked lattice for `config`, carves it and braids it for imperfect mazes, drawing
/// every random choice from `rng`.
pub fn generate_with_rng<R: Rng>(config: &MazeConfig, rng: &mut R) -> Result<Grid> {
    let mut grid = Grid::new(config.size, &config.shape)?;

    let components = carve(&mut grid, rng);
    log::debug!(
        "Carved {} cells of a {}x{} {:?} lattice in {} component(s)",
        grid.cell_count(),
        config.size.0,
        config.size.1,
        config.shape,
        components
    );

    if matches!(config.kind, MazeKind::Imperfect) {
        let opened = braid(&mut grid, rng);
        log::debug!("Braided maze, opened {opened} extra wall(s)");
    }

    debug_assert!(grid.walls_are_consistent());
    Ok(grid)
}

#[cfg(test)]
pub(crate) mod test_utils {
    use std::collections::VecDeque;
    use ndarray::Array2;

    use crate::*;

    /// Number of cells reachable from `start` through open walls.
    pub fn reachable_from(grid: &Grid, start: Coord2) -> usize {
        let mut seen: Array2<bool> = grid.scratch();
        seen[start.to_nd_index()] = true;
        let mut queue = VecDeque::from([start]);
        let mut count = 0;
        while let Some(current) = queue.pop_front() {
            count += 1;
            for next in grid.open_neighbors(current) {
                if !seen[next.to_nd_index()] {
                    seen[next.to_nd_index()] = true;
                    queue.push_back(next);
                }
            }
        }
        count
    }
}

use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// A generated maze: its grid plus the solution overlay of the last successful solve.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMaze")]
pub struct Maze {
    grid: Grid,
    in_path: Array2<bool>,
    path: Vec<Coord2>,
}

/// Unchecked serialized form of [`Maze`].
#[derive(Deserialize)]
struct RawMaze {
    grid: Grid,
    in_path: Array2<bool>,
    path: Vec<Coord2>,
}

impl TryFrom<RawMaze> for Maze {
    type Error = MazeError;

    /// The overlay must have the grid's shape and mark exactly the path, which has to walk from
    /// cell to cell through open walls.
    fn try_from(RawMaze { grid, in_path, path }: RawMaze) -> Result<Self> {
        if in_path.dim() != grid.tiles().dim() {
            return Err(MazeError::InvalidSolution);
        }
        if !path.iter().all(|&coords| grid.is_cell(coords)) {
            return Err(MazeError::InvalidSolution);
        }
        let walkable = path
            .windows(2)
            .all(|step| grid.open_neighbors(step[0]).any(|next| next == step[1]));
        if !walkable {
            return Err(MazeError::InvalidSolution);
        }

        let mut expected: Array2<bool> = grid.scratch();
        for &coords in &path {
            expected[coords.to_nd_index()] = true;
        }
        if expected != in_path {
            return Err(MazeError::InvalidSolution);
        }

        Ok(Self {
            grid,
            in_path,
            path,
        })
    }
}

impl Maze {
    pub fn from_grid(grid: Grid) -> Self {
        Self {
            in_path: grid.scratch(),
            grid,
            path: Vec::new(),
        }
    }

    pub fn generate(config: &MazeConfig, seed: u64) -> Result<Self> {
        RandomMazeGenerator::new(seed)
            .generate(config)
            .map(Self::from_grid)
    }

    pub fn generate_with_rng<R: Rng>(config: &MazeConfig, rng: &mut R) -> Result<Self> {
        generate_with_rng(config, rng).map(Self::from_grid)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    /// Searches a path from `start` to `end` and marks it as the solution overlay.
    ///
    /// The overlay of any previous call is cleared first, so the result only reflects this call.
    /// Returns `Ok(false)` when the cells are not connected, which also leaves the overlay empty.
    /// Invalid endpoints fail without touching the current overlay.
    pub fn solve(&mut self, start: Coord2, end: Coord2) -> Result<bool> {
        let found = PathSolver::new(&self.grid).find_path(start, end)?;
        self.clear_solution();

        let Some(path) = found else {
            log::debug!("No path between {start:?} and {end:?}");
            return Ok(false);
        };

        for &coords in &path {
            self.in_path[coords.to_nd_index()] = true;
        }
        log::debug!(
            "Solved {start:?} -> {end:?}, path of {} cells",
            path.len()
        );
        self.path = path;
        Ok(true)
    }

    pub fn clear_solution(&mut self) {
        self.in_path.fill(false);
        self.path.clear();
    }

    /// Whether `coords` lies on the current solution, false for holes and out of bounds positions.
    pub fn in_path(&self, coords: Coord2) -> bool {
        self.in_path
            .get(coords.to_nd_index())
            .copied()
            .unwrap_or(false)
    }

    /// Current solution from start to end, empty when unsolved.
    pub fn path(&self) -> &[Coord2] {
        &self.path
    }
}

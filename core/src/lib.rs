//! Shape-masked maze generation and solving.
//!
//! A [`Grid`] is built from a [`ShapeMask`], carved into a perfect maze by a randomized
//! depth-first backtracker and optionally braided into an imperfect one. [`Maze`] owns a finished
//! grid and can be solved any number of times between two cells.

use serde::{Deserialize, Serialize};

pub use book::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use maze::*;
pub use shape::*;
pub use solver::*;
pub use tile::*;
pub use types::*;

mod book;
mod error;
mod generator;
mod grid;
mod maze;
mod shape;
mod solver;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MazeKind {
    /// Exactly one path between any two connected cells.
    Perfect,
    /// Perfect maze with extra openings, so some cells are joined by several paths.
    Imperfect,
}

impl Default for MazeKind {
    fn default() -> Self {
        Self::Perfect
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MazeConfig {
    pub size: Coord2,
    pub shape: Shape,
    pub kind: MazeKind,
}

impl MazeConfig {
    pub fn new(size: Coord2, shape: Shape, kind: MazeKind) -> Result<Self> {
        let size = grid::validate_size(size)?;
        Ok(Self { size, shape, kind })
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

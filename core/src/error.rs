use thiserror::Error;

use crate::Coord;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("Maze dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: Coord, height: Coord },
    #[error("Invalid coordinates ({x}, {y}), not a cell of the maze")]
    InvalidCoords { x: Coord, y: Coord },
    #[error("Walls are open on one side only, or open towards a hole or the border")]
    InconsistentWalls,
    #[error("Solution overlay does not match the maze")]
    InvalidSolution,
    #[error("Custom mask is empty or has rows of different lengths")]
    InvalidMask,
}

pub type Result<T> = core::result::Result<T, MazeError>;

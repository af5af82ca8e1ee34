use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::Direction;

bitflags! {
    /// Walls present around a cell, a set bit means the wall is standing.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Walls: u8 {
        const TOP = 1 << 0;
        const RIGHT = 1 << 1;
        const BOTTOM = 1 << 2;
        const LEFT = 1 << 3;
    }
}

impl Walls {
    pub const fn has_wall(self, direction: Direction) -> bool {
        self.contains(direction.wall())
    }
}

/// Lattice slot: either a maze cell or a hole cut out by the shape mask.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Hole,
    Cell(Walls),
}

impl Tile {
    /// Freshly built cell, every wall closed.
    pub const fn closed() -> Self {
        Self::Cell(Walls::all())
    }

    pub const fn is_cell(self) -> bool {
        matches!(self, Self::Cell(_))
    }

    pub const fn is_hole(self) -> bool {
        matches!(self, Self::Hole)
    }

    pub const fn walls(self) -> Option<Walls> {
        match self {
            Self::Cell(walls) => Some(walls),
            Self::Hole => None,
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::Hole
    }
}

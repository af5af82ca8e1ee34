use core::ops::Index;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Shape-masked lattice of cells, stored row-major as `height x width` tiles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Array2<Tile>", into = "Array2<Tile>")]
pub struct Grid {
    tiles: Array2<Tile>,
}

pub(crate) fn validate_size((width, height): Coord2) -> Result<Coord2> {
    if width == 0 || height == 0 {
        Err(MazeError::InvalidDimensions { width, height })
    } else {
        Ok((width, height))
    }
}

impl Grid {
    /// Allocates the lattice, every position accepted by `mask` becomes a cell with all walls
    /// closed, every other position becomes a hole.
    pub fn new<M: ShapeMask + ?Sized>(size: Coord2, mask: &M) -> Result<Self> {
        let (width, height) = validate_size(size)?;
        let tiles = Array2::from_shape_fn(
            (usize::from(height), usize::from(width)),
            |(y, x)| {
                // bounded by width/height, both of them Coord
                let (x, y) = (x as Coord, y as Coord);
                if mask.is_inside(x, y, width, height) {
                    Tile::closed()
                } else {
                    Tile::Hole
                }
            },
        );

        let grid = Self { tiles };
        if grid.cell_count() == 0 {
            log::warn!("Shape mask accepts no position on a {width}x{height} lattice");
        }
        Ok(grid)
    }

    /// Wraps an existing lattice, such as one read back from a serialized maze.
    ///
    /// Every wall pair has to agree on both sides and walls facing a hole or the border have to be
    /// closed.
    pub fn from_tiles(tiles: Array2<Tile>) -> Result<Self> {
        let (rows, cols) = tiles.dim();
        let width = Coord::try_from(cols).unwrap_or(0);
        let height = Coord::try_from(rows).unwrap_or(0);
        validate_size((width, height))?;

        let grid = Self { tiles };
        if !grid.walls_are_consistent() {
            return Err(MazeError::InconsistentWalls);
        }
        Ok(grid)
    }

    /// Lattice size as `(width, height)`.
    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.tiles.dim();
        // construction guarantees both fit in a Coord
        (cols as Coord, rows as Coord)
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn tiles(&self) -> &Array2<Tile> {
        &self.tiles
    }

    /// Per-position scratch storage with the same shape as the lattice.
    pub(crate) fn scratch<T: Clone + Default>(&self) -> Array2<T> {
        Array2::default(self.tiles.raw_dim())
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let (width, height) = self.size();
        coords.0 < width && coords.1 < height
    }

    pub fn get(&self, coords: Coord2) -> Option<Tile> {
        self.tiles.get(coords.to_nd_index()).copied()
    }

    pub fn is_cell(&self, coords: Coord2) -> bool {
        self.get(coords).is_some_and(Tile::is_cell)
    }

    pub fn walls(&self, coords: Coord2) -> Option<Walls> {
        self.get(coords).and_then(Tile::walls)
    }

    /// Checks that `coords` is in bounds and names a cell rather than a hole.
    pub fn validate_cell(&self, coords: Coord2) -> Result<Coord2> {
        if self.is_cell(coords) {
            Ok(coords)
        } else {
            let (x, y) = coords;
            Err(MazeError::InvalidCoords { x, y })
        }
    }

    /// Cells in row-major order: lowest `y` first, then lowest `x`.
    pub fn iter_cells(&self) -> impl Iterator<Item = Coord2> {
        let (width, height) = self.size();
        (0..height)
            .flat_map(move |y| (0..width).map(move |x| (x, y)))
            .filter(|&coords| self[coords].is_cell())
    }

    pub fn cell_count(&self) -> CellCount {
        let count = self.tiles.iter().filter(|tile| tile.is_cell()).count();
        CellCount::try_from(count).unwrap_or(CellCount::MAX)
    }

    /// Cells orthogonally adjacent to `coords`, walls ignored.
    pub fn cell_neighbors(&self, coords: Coord2) -> impl Iterator<Item = (Direction, Coord2)> {
        self.tiles
            .iter_neighbors(coords)
            .filter(|&(_, pos)| self[pos].is_cell())
    }

    /// Cells reachable from `coords` in one step, that is without a wall in between.
    pub fn open_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> {
        let walls = self.walls(coords).unwrap_or(Walls::all());
        self.cell_neighbors(coords)
            .filter(move |&(direction, _)| !walls.has_wall(direction))
            .map(|(_, pos)| pos)
    }

    pub fn has_wall(&self, coords: Coord2, direction: Direction) -> bool {
        self.walls(coords)
            .is_none_or(|walls| walls.has_wall(direction))
    }

    /// Removes the wall between `coords` and its neighbor towards `direction` on both sides.
    ///
    /// Returns whether anything changed. Nothing happens when either side is not a cell.
    pub fn open_wall_pair(&mut self, coords: Coord2, direction: Direction) -> bool {
        let Some(neighbor) = direction.step(coords, self.size()) else {
            return false;
        };

        match (self.get(coords), self.get(neighbor)) {
            (Some(Tile::Cell(walls)), Some(Tile::Cell(neighbor_walls))) => {
                let facing = direction.opposite().wall();
                let changed = walls.contains(direction.wall()) || neighbor_walls.contains(facing);
                self.tiles[coords.to_nd_index()] = Tile::Cell(walls - direction.wall());
                self.tiles[neighbor.to_nd_index()] = Tile::Cell(neighbor_walls - facing);
                changed
            }
            _ => false,
        }
    }

    /// Number of shared boundaries between adjacent cells that are open.
    pub fn open_wall_pairs(&self) -> CellCount {
        let count = self
            .iter_cells()
            .flat_map(|coords| {
                [Direction::Right, Direction::Bottom]
                    .into_iter()
                    .filter(move |&direction| !self.has_wall(coords, direction))
                    .filter_map(move |direction| direction.step(coords, self.size()))
            })
            .filter(|&neighbor| self.is_cell(neighbor))
            .count();
        CellCount::try_from(count).unwrap_or(CellCount::MAX)
    }

    /// Every wall pair agrees on both sides, and walls facing the border or a hole are closed.
    pub fn walls_are_consistent(&self) -> bool {
        self.iter_cells().all(|coords| {
            Direction::ALL.into_iter().all(|direction| {
                let own = self.has_wall(coords, direction);
                match direction.step(coords, self.size()) {
                    Some(neighbor) if self.is_cell(neighbor) => {
                        own == self.has_wall(neighbor, direction.opposite())
                    }
                    _ => own,
                }
            })
        })
    }
}

impl TryFrom<Array2<Tile>> for Grid {
    type Error = MazeError;

    fn try_from(tiles: Array2<Tile>) -> Result<Self> {
        Self::from_tiles(tiles)
    }
}

impl From<Grid> for Array2<Tile> {
    fn from(grid: Grid) -> Self {
        grid.tiles
    }
}

impl Index<Coord2> for Grid {
    type Output = Tile;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.tiles[coords.to_nd_index()]
    }
}

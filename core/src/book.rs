use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const fn size(self) -> Coord2 {
        match self {
            Self::Easy => (10, 10),
            Self::Medium => (15, 15),
            Self::Hard => (20, 20),
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Medium
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StartPoint {
    TopLeft,
    BottomLeft,
    Custom { x: Coord, y: Coord },
}

impl StartPoint {
    pub const fn resolve(self, (_, height): Coord2) -> Coord2 {
        match self {
            Self::TopLeft => (0, 0),
            Self::BottomLeft => (0, height.saturating_sub(1)),
            Self::Custom { x, y } => (x, y),
        }
    }
}

impl Default for StartPoint {
    fn default() -> Self {
        Self::TopLeft
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndPoint {
    BottomRight,
    TopRight,
    Custom { x: Coord, y: Coord },
}

impl EndPoint {
    pub const fn resolve(self, (width, height): Coord2) -> Coord2 {
        match self {
            Self::BottomRight => (width.saturating_sub(1), height.saturating_sub(1)),
            Self::TopRight => (width.saturating_sub(1), 0),
            Self::Custom { x, y } => (x, y),
        }
    }
}

impl Default for EndPoint {
    fn default() -> Self {
        Self::BottomRight
    }
}

/// Everything needed to generate a book of mazes. Missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BookSettings {
    pub difficulty: Difficulty,
    /// Overrides the size implied by `difficulty`.
    pub size: Option<Coord2>,
    pub shape: Shape,
    pub maze_type: MazeKind,
    pub maze_count: u16,
    pub show_solution: bool,
    pub start_point: StartPoint,
    pub end_point: EndPoint,
}

impl Default for BookSettings {
    fn default() -> Self {
        Self {
            difficulty: Default::default(),
            size: None,
            shape: Default::default(),
            maze_type: Default::default(),
            maze_count: 1,
            show_solution: false,
            start_point: Default::default(),
            end_point: Default::default(),
        }
    }
}

impl BookSettings {
    pub fn maze_size(&self) -> Coord2 {
        self.size.unwrap_or(self.difficulty.size())
    }

    pub fn maze_config(&self) -> Result<MazeConfig> {
        MazeConfig::new(self.maze_size(), self.shape.clone(), self.maze_type)
    }
}

/// Outcome of solving a maze of the book.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SolutionStatus {
    NotRequested,
    Found,
    NotFound,
    /// Start or end lies outside the maze or on a hole of its shape.
    InvalidEndpoints,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratedMaze {
    pub seed: u64,
    pub maze: Maze,
    pub start: Coord2,
    pub end: Coord2,
    pub solution: SolutionStatus,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MazeBook {
    pub seed: u64,
    pub mazes: Vec<GeneratedMaze>,
}

impl MazeBook {
    /// Generates `settings.maze_count` independent mazes, each one seeded from a stream derived
    /// from `seed`.
    pub fn generate(settings: &BookSettings, seed: u64) -> Result<Self> {
        let config = settings.maze_config()?;
        let start = settings.start_point.resolve(config.size);
        let end = settings.end_point.resolve(config.size);
        let mut seeds = SmallRng::seed_from_u64(seed);

        let mazes = (0..settings.maze_count)
            .map(|index| -> Result<GeneratedMaze> {
                let maze_seed: u64 = seeds.random();
                let mut maze = Maze::generate(&config, maze_seed)?;
                let solution = if settings.show_solution {
                    solve_page(&mut maze, start, end, index)?
                } else {
                    SolutionStatus::NotRequested
                };
                Ok(GeneratedMaze {
                    seed: maze_seed,
                    maze,
                    start,
                    end,
                    solution,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Generated a book of {} maze(s) from seed {seed}", mazes.len());
        Ok(Self { seed, mazes })
    }
}

fn solve_page(maze: &mut Maze, start: Coord2, end: Coord2, index: u16) -> Result<SolutionStatus> {
    match maze.solve(start, end) {
        Ok(true) => Ok(SolutionStatus::Found),
        Ok(false) => {
            log::warn!("Maze #{index}: {start:?} and {end:?} are not connected");
            Ok(SolutionStatus::NotFound)
        }
        Err(err @ MazeError::InvalidCoords { .. }) => {
            log::warn!("Maze #{index}: cannot solve, {err}");
            Ok(SolutionStatus::InvalidEndpoints)
        }
        Err(err) => Err(err),
    }
}

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::Verbosity;
use labyrinth_core::{
    BookSettings, Coord, Coord2, CustomMask, Difficulty, EndPoint, MazeBook, MazeKind, Shape,
    SolutionStatus, StartPoint,
};

#[derive(Parser)]
#[command(name = "labyrinth", version, about = "Generates books of shaped mazes as JSON")]
struct Cli {
    #[command(flatten)]
    verbose: Verbosity,
    /// TOML book settings, flags take precedence over the file
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,
    #[arg(short, long, value_enum)]
    difficulty: Option<DifficultyChoice>,
    /// Maze size as WIDTHxHEIGHT, overrides the difficulty
    #[arg(long, value_parser = parse_size)]
    size: Option<Coord2>,
    #[arg(long, value_enum)]
    shape: Option<ShapeChoice>,
    /// Text file drawing a custom shape, `#` inside and `.` outside
    #[arg(long, value_name = "FILE", conflicts_with = "shape")]
    mask: Option<PathBuf>,
    #[arg(short = 't', long, value_enum)]
    maze_type: Option<MazeTypeChoice>,
    /// Number of mazes in the book
    #[arg(short = 'n', long)]
    count: Option<u16>,
    /// Solve every maze and include the solution path
    #[arg(long)]
    show_solution: bool,
    /// `top-left`, `bottom-left` or X,Y
    #[arg(long, value_parser = parse_start)]
    start: Option<StartPoint>,
    /// `bottom-right`, `top-right` or X,Y
    #[arg(long, value_parser = parse_end)]
    end: Option<EndPoint>,
    /// Seed for a reproducible book, random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Write the book here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
    #[arg(long)]
    pretty: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum DifficultyChoice {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyChoice> for Difficulty {
    fn from(choice: DifficultyChoice) -> Self {
        match choice {
            DifficultyChoice::Easy => Self::Easy,
            DifficultyChoice::Medium => Self::Medium,
            DifficultyChoice::Hard => Self::Hard,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ShapeChoice {
    Square,
    Circle,
    Triangle,
    Star,
}

impl From<ShapeChoice> for Shape {
    fn from(choice: ShapeChoice) -> Self {
        match choice {
            ShapeChoice::Square => Self::Square,
            ShapeChoice::Circle => Self::Circle,
            ShapeChoice::Triangle => Self::Triangle,
            ShapeChoice::Star => Self::Star,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum MazeTypeChoice {
    Perfect,
    #[value(alias = "braided")]
    Imperfect,
}

impl From<MazeTypeChoice> for MazeKind {
    fn from(choice: MazeTypeChoice) -> Self {
        match choice {
            MazeTypeChoice::Perfect => Self::Perfect,
            MazeTypeChoice::Imperfect => Self::Imperfect,
        }
    }
}

fn parse_pair(value: &str, separator: char) -> Option<Coord2> {
    let (a, b) = value.split_once(separator)?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}

fn parse_size(value: &str) -> Result<Coord2, String> {
    match parse_pair(&value.to_ascii_lowercase(), 'x') {
        Some((width, height)) if width > 0 && height > 0 => Ok((width, height)),
        Some(_) => Err("width and height must be positive".into()),
        None => Err(format!("expected WIDTHxHEIGHT up to {}x{}", Coord::MAX, Coord::MAX)),
    }
}

fn parse_start(value: &str) -> Result<StartPoint, String> {
    match value {
        "top-left" => Ok(StartPoint::TopLeft),
        "bottom-left" => Ok(StartPoint::BottomLeft),
        _ => parse_pair(value, ',')
            .map(|(x, y)| StartPoint::Custom { x, y })
            .ok_or_else(|| format!("expected top-left, bottom-left or X,Y, got {value:?}")),
    }
}

fn parse_end(value: &str) -> Result<EndPoint, String> {
    match value {
        "bottom-right" => Ok(EndPoint::BottomRight),
        "top-right" => Ok(EndPoint::TopRight),
        _ => parse_pair(value, ',')
            .map(|(x, y)| EndPoint::Custom { x, y })
            .ok_or_else(|| format!("expected bottom-right, top-right or X,Y, got {value:?}")),
    }
}

fn read_text(path: &Path, what: &str) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {what} {}", path.display()))
}

impl Cli {
    fn book_settings(&self) -> Result<BookSettings> {
        let mut settings = match &self.settings {
            Some(path) => toml::from_str(&read_text(path, "settings")?)
                .with_context(|| format!("invalid settings in {}", path.display()))?,
            None => BookSettings::default(),
        };

        if let Some(difficulty) = self.difficulty {
            settings.difficulty = difficulty.into();
        }
        if let Some(size) = self.size {
            settings.size = Some(size);
        }
        if let Some(shape) = self.shape {
            settings.shape = shape.into();
        }
        if let Some(path) = &self.mask {
            let mask = CustomMask::parse(&read_text(path, "mask")?)
                .with_context(|| format!("invalid mask in {}", path.display()))?;
            settings.shape = Shape::Custom(mask);
        }
        if let Some(maze_type) = self.maze_type {
            settings.maze_type = maze_type.into();
        }
        if let Some(count) = self.count {
            settings.maze_count = count;
        }
        if self.show_solution {
            settings.show_solution = true;
        }
        if let Some(start) = self.start {
            settings.start_point = start;
        }
        if let Some(end) = self.end {
            settings.end_point = end;
        }

        Ok(settings)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let settings = cli.book_settings()?;
    let seed = cli.seed.unwrap_or_else(rand::random);
    log::info!(
        "Generating {} maze(s) of {:?} with seed {seed}",
        settings.maze_count,
        settings.maze_size()
    );

    let book = MazeBook::generate(&settings, seed).context("failed to generate maze book")?;
    let unsolved = book
        .mazes
        .iter()
        .filter(|page| {
            matches!(
                page.solution,
                SolutionStatus::NotFound | SolutionStatus::InvalidEndpoints
            )
        })
        .count();
    if unsolved > 0 {
        log::warn!("{unsolved} maze(s) could not be solved");
    }

    let json = if cli.pretty {
        serde_json::to_string_pretty(&book)
    } else {
        serde_json::to_string(&book)
    }
    .context("failed to serialize maze book")?;

    match &cli.output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => writeln!(io::stdout().lock(), "{json}")?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn sizes_parse_case_insensitively() {
        assert_eq!(parse_size("12x8"), Ok((12, 8)));
        assert_eq!(parse_size("12X8"), Ok((12, 8)));
        assert!(parse_size("0x8").is_err());
        assert!(parse_size("300x8").is_err());
        assert!(parse_size("12").is_err());
    }

    #[test]
    fn endpoints_accept_presets_and_coordinates() {
        assert_eq!(parse_start("bottom-left"), Ok(StartPoint::BottomLeft));
        assert_eq!(parse_start("3, 4"), Ok(StartPoint::Custom { x: 3, y: 4 }));
        assert_eq!(parse_end("top-right"), Ok(EndPoint::TopRight));
        assert_eq!(parse_end("7,1"), Ok(EndPoint::Custom { x: 7, y: 1 }));
        assert!(parse_end("middle").is_err());
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "labyrinth",
            "--difficulty",
            "easy",
            "--shape",
            "triangle",
            "--maze-type",
            "braided",
            "-n",
            "3",
            "--show-solution",
            "--end",
            "top-right",
        ]);

        let settings = cli.book_settings().unwrap();

        assert_eq!(settings.difficulty, Difficulty::Easy);
        assert_eq!(settings.shape, Shape::Triangle);
        assert_eq!(settings.maze_type, MazeKind::Imperfect);
        assert_eq!(settings.maze_count, 3);
        assert!(settings.show_solution);
        assert_eq!(settings.start_point, StartPoint::TopLeft);
        assert_eq!(settings.end_point, EndPoint::TopRight);
    }

    #[test]
    fn sample_settings_generate_a_solved_book() {
        let settings: BookSettings = toml::from_str(include_str!("../book.toml")).unwrap();

        assert_eq!(settings.maze_size(), (20, 20));
        assert_eq!(settings.shape, Shape::Circle);
        assert_eq!(settings.end_point, EndPoint::Custom { x: 10, y: 18 });

        let book = MazeBook::generate(&settings, 2024).unwrap();
        assert_eq!(book.mazes.len(), 6);
        assert!(
            book.mazes
                .iter()
                .all(|page| page.solution == SolutionStatus::Found)
        );
    }
}

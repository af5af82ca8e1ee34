use core::f64::consts::PI;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Boundary predicate deciding which lattice positions take part in the maze.
///
/// Implementations must be pure and total over `[0, width) x [0, height)`.
pub trait ShapeMask {
    fn is_inside(&self, x: Coord, y: Coord, width: Coord, height: Coord) -> bool;
}

impl<F> ShapeMask for F
where
    F: Fn(Coord, Coord, Coord, Coord) -> bool,
{
    fn is_inside(&self, x: Coord, y: Coord, width: Coord, height: Coord) -> bool {
        self(x, y, width, height)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Square,
    Circle,
    Triangle,
    Star,
    Custom(CustomMask),
}

impl Default for Shape {
    fn default() -> Self {
        Self::Square
    }
}

const STAR_SPIKES: f64 = 5.0;
const STAR_INNER_RATIO: f64 = 0.5;

impl ShapeMask for Shape {
    fn is_inside(&self, x: Coord, y: Coord, width: Coord, height: Coord) -> bool {
        let geometry = Geometry::new(x, y, width, height);
        match self {
            Self::Square => true,
            Self::Circle => geometry.distance_squared() <= geometry.radius * geometry.radius,
            Self::Triangle => {
                let normalized_x = (geometry.x - geometry.center_x) / geometry.center_x;
                let normalized_y = (geometry.y - geometry.height) / geometry.height;
                (-1.0..=0.0).contains(&normalized_y) && normalized_x.abs() <= 1.0 + normalized_y
            }
            Self::Star => {
                let lobe = (geometry.angle() * STAR_SPIKES / PI).rem_euclid(2.0);
                let limit = if lobe < 1.0 {
                    geometry.radius
                } else {
                    geometry.radius * STAR_INNER_RATIO
                };
                geometry.distance() <= limit
            }
            Self::Custom(mask) => mask.is_inside(x, y, width, height),
        }
    }
}

/// Lattice position in floating point, relative to the center of the bounding box.
struct Geometry {
    x: f64,
    y: f64,
    height: f64,
    center_x: f64,
    center_y: f64,
    radius: f64,
}

impl Geometry {
    fn new(x: Coord, y: Coord, width: Coord, height: Coord) -> Self {
        let (width, height) = (f64::from(width), f64::from(height));
        Self {
            x: f64::from(x),
            y: f64::from(y),
            height,
            center_x: width / 2.0,
            center_y: height / 2.0,
            radius: width.min(height) / 2.0,
        }
    }

    fn distance_squared(&self) -> f64 {
        let dx = self.x - self.center_x;
        let dy = self.y - self.center_y;
        dx * dx + dy * dy
    }

    fn distance(&self) -> f64 {
        (self.x - self.center_x).hypot(self.y - self.center_y)
    }

    fn angle(&self) -> f64 {
        (self.y - self.center_y).atan2(self.x - self.center_x)
    }
}

/// User supplied bitmap mask, scaled onto whatever lattice it is applied to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct CustomMask {
    bitmap: Array2<bool>,
}

impl CustomMask {
    pub fn from_bitmap(bitmap: Array2<bool>) -> Result<Self> {
        if bitmap.is_empty() {
            return Err(MazeError::InvalidMask);
        }
        Ok(Self { bitmap })
    }

    /// Parses text rows where `#`, `X`, `x`, `*` or `1` mark inside positions and `.`, `-`, `0` or
    /// a space mark outside ones. Blank lines around the picture are ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .skip_while(|line| line.trim().is_empty())
            .collect();
        let end = rows
            .iter()
            .rposition(|line| !line.trim().is_empty())
            .map_or(0, |last| last + 1);
        Self::from_rows(&rows[..end])
    }

    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        if width == 0 {
            return Err(MazeError::InvalidMask);
        }

        let mut bitmap = Array2::default((height, width));
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != width {
                return Err(MazeError::InvalidMask);
            }
            for (x, ch) in row.chars().enumerate() {
                bitmap[[y, x]] = match ch {
                    '#' | 'X' | 'x' | '*' | '1' => true,
                    '.' | '-' | '0' | ' ' => false,
                    _ => return Err(MazeError::InvalidMask),
                };
            }
        }

        Self::from_bitmap(bitmap)
    }

    /// Bitmap size as `(width, height)`.
    pub fn size(&self) -> (usize, usize) {
        let (rows, cols) = self.bitmap.dim();
        (cols, rows)
    }

    pub fn rows(&self) -> Vec<String> {
        self.bitmap
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|&inside| if inside { '#' } else { '.' }).collect())
            .collect()
    }
}

impl ShapeMask for CustomMask {
    fn is_inside(&self, x: Coord, y: Coord, width: Coord, height: Coord) -> bool {
        if x >= width || y >= height {
            return false;
        }
        let (mask_width, mask_height) = self.size();
        let mx = usize::from(x) * mask_width / usize::from(width);
        let my = usize::from(y) * mask_height / usize::from(height);
        self.bitmap[[my, mx]]
    }
}

impl TryFrom<Vec<String>> for CustomMask {
    type Error = MazeError;

    fn try_from(rows: Vec<String>) -> Result<Self> {
        Self::from_rows(&rows)
    }
}

impl From<CustomMask> for Vec<String> {
    fn from(mask: CustomMask) -> Self {
        mask.rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inside_count(shape: &Shape, width: Coord, height: Coord) -> usize {
        (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .filter(|&(x, y)| shape.is_inside(x, y, width, height))
            .count()
    }

    #[test]
    fn square_accepts_everything() {
        assert_eq!(inside_count(&Shape::Square, 7, 3), 21);
    }

    #[test]
    fn circle_excludes_corners_keeps_center() {
        let circle = Shape::Circle;
        for (x, y) in [(0, 0), (9, 0), (0, 9), (9, 9)] {
            assert!(!circle.is_inside(x, y, 10, 10), "({x}, {y}) should be a hole");
        }
        assert!(circle.is_inside(5, 5, 10, 10));
    }

    #[test]
    fn triangle_has_apex_on_top_row_and_wide_base() {
        let triangle = Shape::Triangle;
        let top_row: Vec<_> = (0..10).filter(|&x| triangle.is_inside(x, 0, 10, 10)).collect();
        assert_eq!(top_row, [5]);

        let bottom_row = (0..10).filter(|&x| triangle.is_inside(x, 9, 10, 10)).count();
        assert!(bottom_row >= 8);
    }

    #[test]
    fn star_alternates_between_long_and_short_spikes() {
        let star = Shape::Star;
        assert!(star.is_inside(10, 10, 21, 21));
        // just below the +x axis sits in a long spike
        assert!(star.is_inside(20, 11, 21, 21));
        // around 55 degrees sits between spikes, only the inner radius applies
        assert!(!star.is_inside(15, 17, 21, 21));
        assert!(star.is_inside(12, 12, 21, 21));

        let star_cells = inside_count(&star, 21, 21);
        assert!(star_cells > 0);
        assert!(star_cells < inside_count(&Shape::Circle, 21, 21));
    }

    #[test]
    fn every_shape_is_deterministic() {
        let mask = CustomMask::parse("#.\n.#").unwrap();
        for shape in [
            Shape::Square,
            Shape::Circle,
            Shape::Triangle,
            Shape::Star,
            Shape::Custom(mask),
        ] {
            for y in 0..9 {
                for x in 0..13 {
                    assert_eq!(shape.is_inside(x, y, 13, 9), shape.is_inside(x, y, 13, 9));
                }
            }
        }
    }

    #[test]
    fn custom_mask_scales_onto_larger_lattice() {
        let mask = CustomMask::parse("\n#.\n.#\n\n").unwrap();
        assert_eq!(mask.size(), (2, 2));

        assert!(mask.is_inside(0, 0, 4, 4));
        assert!(mask.is_inside(1, 1, 4, 4));
        assert!(!mask.is_inside(2, 0, 4, 4));
        assert!(!mask.is_inside(0, 3, 4, 4));
        assert!(mask.is_inside(3, 3, 4, 4));
    }

    #[test]
    fn custom_mask_rejects_ragged_or_unknown_rows() {
        assert_eq!(CustomMask::parse("##\n#"), Err(MazeError::InvalidMask));
        assert_eq!(CustomMask::parse("#?"), Err(MazeError::InvalidMask));
        assert_eq!(CustomMask::parse("\n\n"), Err(MazeError::InvalidMask));
    }

    #[test]
    fn closures_are_masks() {
        let diagonal = |x: Coord, y: Coord, _: Coord, _: Coord| x == y;
        assert!(diagonal.is_inside(2, 2, 4, 4));
        assert!(!diagonal.is_inside(1, 2, 4, 4));
    }

    #[test]
    fn custom_shape_serializes_as_rows() {
        let shape = Shape::Custom(CustomMask::parse("#.\n##").unwrap());
        let json = serde_json::to_string(&shape).unwrap();
        assert_eq!(json, r###"{"custom":["#.","##"]}"###);
        let back: Shape = serde_json::from_str(&json).unwrap();
        assert_eq!(back, shape);
    }
}

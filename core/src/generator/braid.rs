use rand::Rng;

use crate::*;

/// Lattice positions per braiding trial.
pub const CELLS_PER_BRAID_TRIAL: CellCount = 10;

/// Adds cycles to a carved maze by knocking down random walls between adjacent cells.
///
/// Runs one trial per [`CELLS_PER_BRAID_TRIAL`] lattice positions (holes included). Each trial
/// picks a random position and direction; trials landing on a hole, the border or an already
/// open wall change nothing. Returns the number of walls actually opened.
pub fn braid<R: Rng>(grid: &mut Grid, rng: &mut R) -> CellCount {
    let (width, height) = grid.size();
    let trials = mult(width, height) / CELLS_PER_BRAID_TRIAL;
    let mut opened = 0;

    for _ in 0..trials {
        let y = rng.random_range(0..height);
        let x = rng.random_range(0..width);
        if !grid.is_cell((x, y)) {
            continue;
        }

        let direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
        if grid.open_wall_pair((x, y), direction) {
            opened += 1;
        }
    }

    log::trace!("Braiding ran {trials} trial(s), {opened} opened a wall");
    opened
}

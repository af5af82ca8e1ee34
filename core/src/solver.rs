use ndarray::Array2;

use crate::*;

/// Depth-first reachability search over a finished grid, following open walls only.
///
/// Every search allocates its own visited mask and predecessor links, nothing carries over
/// between calls. The path found is *a* path, not necessarily the shortest one.
#[derive(Copy, Clone, Debug)]
pub struct PathSolver<'a> {
    grid: &'a Grid,
}

impl<'a> PathSolver<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    /// Finds a path from `start` to `end`, both inclusive and in walking order.
    ///
    /// `Ok(None)` means the two cells are not connected. Endpoints outside the grid or on holes
    /// are an error.
    pub fn find_path(&self, start: Coord2, end: Coord2) -> Result<Option<Vec<Coord2>>> {
        let start = self.grid.validate_cell(start)?;
        let end = self.grid.validate_cell(end)?;

        let mut visited: Array2<bool> = self.grid.scratch();
        let mut previous: Array2<Option<Coord2>> = self.grid.scratch();
        let mut stack = vec![start];
        visited[start.to_nd_index()] = true;

        while let Some(current) = stack.pop() {
            if current == end {
                let path = trace_back(&previous, end);
                log::trace!("Found path {start:?} -> {end:?} of {} cells", path.len());
                return Ok(Some(path));
            }

            for next in self.grid.open_neighbors(current) {
                if !visited[next.to_nd_index()] {
                    visited[next.to_nd_index()] = true;
                    previous[next.to_nd_index()] = Some(current);
                    stack.push(next);
                }
            }
        }

        log::trace!("No path {start:?} -> {end:?}");
        Ok(None)
    }
}

fn trace_back(previous: &Array2<Option<Coord2>>, end: Coord2) -> Vec<Coord2> {
    let mut path = vec![end];
    let mut current = end;
    while let Some(prev) = previous[current.to_nd_index()] {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

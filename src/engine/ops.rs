use log::trace;
use rand::Rng;

use super::line::collapse_line;
use super::state::{Direction, Grid, MoveEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Rows,
    Cols,
}

/// One row or column, read in the direction tiles travel toward.
///
/// Position 0 is the edge tiles collapse onto; reversed lines map `p` to `N-1-p`.
#[derive(Debug, Clone, Copy)]
struct LineRef {
    axis: Axis,
    index: usize,
    reversed: bool,
    size: usize,
}

impl LineRef {
    fn new(dir: Direction, index: usize, size: usize) -> Self {
        let (axis, reversed) = match dir {
            Direction::Up => (Axis::Cols, false),
            Direction::Down => (Axis::Cols, true),
            Direction::Left => (Axis::Rows, false),
            Direction::Right => (Axis::Rows, true),
        };
        LineRef { axis, index, reversed, size }
    }

    #[inline]
    fn cell(&self, pos: usize) -> (usize, usize) {
        let p = if self.reversed { self.size - 1 - pos } else { pos };
        match self.axis {
            Axis::Rows => (self.index, p),
            Axis::Cols => (p, self.index),
        }
    }

    fn read(&self, grid: &Grid, buf: &mut [u32]) {
        for (pos, slot) in buf.iter_mut().enumerate() {
            let (r, c) = self.cell(pos);
            *slot = grid.get(r, c);
        }
    }
}

/// Aggregate result of sliding every line of a grid in one direction.
#[derive(Debug, Clone, Default)]
pub(crate) struct Slide {
    pub moved: bool,
    pub events: Vec<MoveEvent>,
    pub gained: u64,
}

/// Slide/merge every line of `grid` in place. Never inserts a tile.
///
/// This is the only place lines are extracted and written back; live moves and
/// simulations both go through it.
pub(crate) fn slide(grid: &mut Grid, dir: Direction) -> Slide {
    let n = grid.size();
    let mut out = Slide { moved: false, events: Vec::with_capacity(n * n), gained: 0 };
    let mut buf = vec![0u32; n];

    for index in 0..n {
        let line = LineRef::new(dir, index, n);
        line.read(grid, &mut buf);
        let collapsed = collapse_line(&buf);

        for (pos, &val) in collapsed.line.iter().enumerate() {
            let (r, c) = line.cell(pos);
            if grid.get(r, c) != val {
                out.moved = true;
                grid.set(r, c, val);
            }
        }

        out.gained += collapsed.gained;
        out.events.extend(collapsed.events.iter().map(|ev| {
            let (from_row, from_col) = line.cell(ev.from);
            let (to_row, to_col) = line.cell(ev.to);
            MoveEvent { from_row, from_col, to_row, to_col, new_value: ev.value, merged: ev.merged }
        }));
    }

    debug_assert!(!out.moved || count_empty(grid) > 0);
    out
}

/// Slide/merge tiles in the given direction. No randomness.
pub fn shift(grid: &Grid, dir: Direction) -> Grid {
    let mut next = grid.clone();
    slide(&mut next, dir);
    next
}

/// Place a random tile in a uniformly chosen empty cell.
///
/// Returns `(row, col, value)` of the placed tile, or `None` on a full grid
/// (in which case no randomness is consumed).
pub(crate) fn insert_random_tile<R: Rng + ?Sized>(
    grid: &mut Grid,
    probability_of_two: f64,
    rng: &mut R,
) -> Option<(usize, usize, u32)> {
    let empty = count_empty(grid);
    if empty == 0 {
        return None;
    }
    let target = rng.gen_range(0..empty);
    let value = if rng.gen::<f64>() < probability_of_two { 2 } else { 4 };
    let idx = grid
        .cells()
        .iter()
        .enumerate()
        .filter(|(_, v)| **v == 0)
        .nth(target)
        .map(|(i, _)| i)?;
    let (row, col) = (idx / grid.size(), idx % grid.size());
    grid.set(row, col, value);
    trace!("spawned {} at ({}, {})", value, row, col);
    Some((row, col, value))
}

/// Count the number of empty cells.
pub fn count_empty(grid: &Grid) -> usize {
    grid.cells().iter().filter(|&&v| v == 0).count()
}

/// Highest tile value on the grid (0 if empty).
pub fn max_tile(grid: &Grid) -> u32 {
    grid.cells().iter().copied().max().unwrap_or(0)
}

/// True if the grid is full and no orthogonally adjacent pair is equal.
pub fn is_game_over(grid: &Grid) -> bool {
    let n = grid.size();
    for row in 0..n {
        for col in 0..n {
            let v = grid.get(row, col);
            if v == 0 {
                return false;
            }
            if col + 1 < n && grid.get(row, col + 1) == v {
                return false;
            }
            if row + 1 < n && grid.get(row + 1, col) == v {
                return false;
            }
        }
    }
    true
}

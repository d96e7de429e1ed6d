use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ops;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions in their canonical action order.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Position of this direction in [`Direction::ALL`] (also its external action index).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        };
        f.write_str(s)
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionError {
    #[error("action index {0} does not name a direction (expected 0..=3)")]
    OutOfRange(u8),
}

/// Decode an external action index: 0 = Up, 1 = Down, 2 = Left, 3 = Right.
impl TryFrom<u8> for Direction {
    type Error = DirectionError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Direction::ALL.get(v as usize).copied().ok_or(DirectionError::OutOfRange(v))
    }
}

impl From<Direction> for u8 {
    fn from(d: Direction) -> Self {
        d.index() as u8
    }
}

/// One tile's relocation (or merge) during a move, in board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveEvent {
    pub from_row: usize,
    pub from_col: usize,
    pub to_row: usize,
    pub to_col: usize,
    /// Value of the destination cell once this tile has landed.
    pub new_value: u32,
    pub merged: bool,
}

/// What a call to `Game::make_move` did.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoveOutcome {
    /// False when the direction changes nothing; the game is then untouched.
    pub moved: bool,
    /// Ordered by line index, then by source position along the collapse direction.
    pub events: Vec<MoveEvent>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid side length must be at least 2, got {0}")]
    TooSmall(usize),
    #[error("row {row} has {len} cells, expected {expected}")]
    NotSquare { row: usize, len: usize, expected: usize },
    #[error("cell ({row}, {col}) holds {value}, which is not a power of two")]
    NotPowerOfTwo { row: usize, col: usize, value: u32 },
    #[error("cell ({row}, {col}) holds {value}, above the largest accepted tile {max}", max = MAX_TILE)]
    TileTooLarge { row: usize, col: usize, value: u32 },
}

/// Largest tile `Grid::from_rows` accepts; a pair of them still merges within `u32`.
pub const MAX_TILE: u32 = 1 << 30;

/// Square board of tile values stored row-major; 0 marks an empty cell.
///
/// Construct through [`Grid::empty`] or [`Grid::from_rows`], which validate shape and values.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Grid {
    size: usize,
    cells: Vec<u32>,
}

impl Grid {
    /// An all-empty `size`×`size` grid.
    pub fn empty(size: usize) -> Result<Self, GridError> {
        if size < 2 {
            return Err(GridError::TooSmall(size));
        }
        Ok(Grid { size, cells: vec![0; size * size] })
    }

    /// Build a grid from explicit rows, validating shape and tile values.
    ///
    /// ```
    /// use tilemerge::engine::Grid;
    /// let g = Grid::from_rows(&[[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
    /// assert_eq!(g.get(0, 1), 2);
    /// assert_eq!(g.count_empty(), 14);
    /// ```
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self, GridError> {
        let size = rows.len();
        let mut grid = Grid::empty(size)?;
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != size {
                return Err(GridError::NotSquare { row, len: r.len(), expected: size });
            }
            for (col, &value) in r.iter().enumerate() {
                if value != 0 && !value.is_power_of_two() {
                    return Err(GridError::NotPowerOfTwo { row, col, value });
                }
                if value > MAX_TILE {
                    return Err(GridError::TileTooLarge { row, col, value });
                }
                grid.cells[row * size + col] = value;
            }
        }
        Ok(grid)
    }

    /// Side length N.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Tile value at (`row`, `col`). Panics when out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.cells[row * self.size + col]
    }

    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, value: u32) {
        self.cells[row * self.size + col] = value;
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Row-major cell values.
    #[inline]
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Copy out as nested rows.
    pub fn rows(&self) -> Vec<Vec<u32>> {
        self.cells.chunks(self.size).map(<[u32]>::to_vec).collect()
    }

    /// Slide/merge tiles in `dir` without inserting a new tile.
    #[inline]
    pub fn shift(&self, dir: Direction) -> Self {
        ops::shift(self, dir)
    }

    /// Insert a 2 (with probability `probability_of_two`) or a 4 into a uniformly
    /// chosen empty cell. Returns the grid unchanged when it is full.
    ///
    /// ```
    /// use tilemerge::engine::Grid;
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let g = Grid::empty(4).unwrap()
    ///     .with_random_tile(0.9, &mut rng)
    ///     .with_random_tile(0.9, &mut rng);
    /// assert_eq!(g.count_empty(), 14);
    /// ```
    pub fn with_random_tile<R: Rng + ?Sized>(mut self, probability_of_two: f64, rng: &mut R) -> Self {
        ops::insert_random_tile(&mut self, probability_of_two, rng);
        self
    }

    /// Number of empty cells.
    #[inline]
    pub fn count_empty(&self) -> usize {
        ops::count_empty(self)
    }

    /// Highest tile value present, 0 on an empty grid.
    #[inline]
    pub fn max_tile(&self) -> u32 {
        ops::max_tile(self)
    }

    /// Sum of all tile values.
    #[inline]
    pub fn sum(&self) -> u64 {
        self.cells.iter().map(|&v| u64::from(v)).sum()
    }

    /// True when the grid is full and no two orthogonal neighbours are equal.
    ///
    /// ```
    /// use tilemerge::engine::Grid;
    /// let g = Grid::from_rows(&[[2, 4], [4, 2]]).unwrap();
    /// assert!(g.is_game_over());
    /// ```
    #[inline]
    pub fn is_game_over(&self) -> bool {
        ops::is_game_over(self)
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid").field("size", &self.size).field("rows", &self.rows()).finish()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(self.size * 8);
        writeln!(f)?;
        for (i, row) in self.cells.chunks(self.size).enumerate() {
            if i > 0 {
                writeln!(f, "{}", rule)?;
            }
            let cells: Vec<String> = row.iter().map(|&v| format_val(v)).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

fn format_val(val: u32) -> String {
    match val {
        0 => String::from("       "),
        x => format!("{:^7}", x),
    }
}

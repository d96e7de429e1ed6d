//! Engine module: square board state, the line collapse routine, and the
//! game driver that ties moves, scoring and tile spawns together.
//!
//! - `Grid` is the N×N board with read-only helpers.
//! - `Game` owns a grid, the score and a seeded RNG; it is the only mutator.
//! - Free functions mirror the grid methods when convenient (e.g., `shift`).
//! - `line::collapse_line` is the single 1-D merge routine every direction uses.

mod game;
pub mod line;
pub(crate) mod ops;
mod state;

pub use game::Game;
pub use state::{Direction, DirectionError, Grid, GridError, MoveEvent, MoveOutcome, MAX_TILE};

pub use ops::{count_empty, is_game_over, max_tile, shift};

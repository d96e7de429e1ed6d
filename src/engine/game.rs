use log::{debug, trace};
use rand::{rngs::StdRng, SeedableRng};

use super::ops;
use super::state::{Direction, Grid, MoveOutcome};
use crate::analysis::{self, heuristic, MoveAnalysis};
use crate::config::{ConfigError, GameConfig};

/// A running game: the grid, the score and the RNG that feeds tile spawns.
///
/// The grid is only ever changed by [`Game::make_move`] and [`Game::restart`];
/// everything else reads it or works on a copy.
#[derive(Clone, Debug)]
pub struct Game {
    grid: Grid,
    score: u64,
    probability_of_two: f64,
    rng: StdRng,
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

impl Game {
    /// Start a new game: empty board, score 0, two spawned tiles.
    ///
    /// ```
    /// use tilemerge::config::GameConfig;
    /// use tilemerge::engine::Game;
    /// let game = Game::new(GameConfig::new(4, 0.9).with_seed(1)).unwrap();
    /// assert_eq!(game.grid().count_empty(), 14);
    /// assert_eq!(game.score(), 0);
    /// ```
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::empty(config.size).map_err(|_| ConfigError::Size(config.size))?;
        let mut game = Game {
            grid,
            score: 0,
            probability_of_two: config.probability_of_two,
            rng: make_rng(config.seed),
        };
        game.spawn_random_tile();
        game.spawn_random_tile();
        Ok(game)
    }

    /// Resume from an explicit board with score 0. No tiles are spawned.
    pub fn from_grid(grid: Grid, config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if grid.size() != config.size {
            return Err(ConfigError::SizeMismatch { expected: config.size, actual: grid.size() });
        }
        Ok(Game { grid, score: 0, probability_of_two: config.probability_of_two, rng: make_rng(config.seed) })
    }

    /// Begin a new game on this instance. The RNG stream carries on.
    pub fn restart(&mut self) {
        debug!("restarting game at score {}", self.score);
        self.grid.clear();
        self.score = 0;
        self.spawn_random_tile();
        self.spawn_random_tile();
    }

    /// Owned snapshot of the board.
    pub fn grid(&self) -> Grid {
        self.grid.clone()
    }

    /// Borrow the board without copying.
    pub fn board(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn probability_of_two(&self) -> f64 {
        self.probability_of_two
    }

    pub fn max_tile(&self) -> u32 {
        self.grid.max_tile()
    }

    /// True if no move can change the board. Not checked automatically.
    pub fn is_game_over(&self) -> bool {
        self.grid.is_game_over()
    }

    /// Slide the board in `dir`, add merged values to the score and, if anything
    /// changed, spawn exactly one tile.
    ///
    /// When `moved` is false the grid, the score and the RNG are untouched.
    ///
    /// ```
    /// use tilemerge::config::GameConfig;
    /// use tilemerge::engine::{Direction, Game, Grid};
    /// let grid = Grid::from_rows(&[[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
    /// let mut game = Game::from_grid(grid, GameConfig::default().with_seed(5)).unwrap();
    /// let out = game.make_move(Direction::Left);
    /// assert!(out.moved);
    /// assert_eq!(game.score(), 4);
    /// assert_eq!(game.grid().get(0, 0), 4);
    /// ```
    pub fn make_move(&mut self, dir: Direction) -> MoveOutcome {
        let mut next = self.grid.clone();
        let slide = ops::slide(&mut next, dir);
        if !slide.moved {
            debug!("{} changes nothing", dir);
            return MoveOutcome { moved: false, events: slide.events };
        }
        self.grid = next;
        self.score += slide.gained;
        trace!("{}: {} events, +{} score", dir, slide.events.len(), slide.gained);
        self.spawn_random_tile();
        MoveOutcome { moved: true, events: slide.events }
    }

    /// Dry-run `dir` against a private copy of the board.
    pub fn analyze_move(&self, dir: Direction) -> MoveAnalysis {
        analysis::analyze_move(&self.grid, dir)
    }

    /// Dry-run all four directions in parallel, in `[Up, Down, Left, Right]` order.
    pub fn analyze_all(&self) -> [MoveAnalysis; 4] {
        analysis::analyze_all(&self.grid)
    }

    /// Per-row then per-column monotonicity features (2N values).
    pub fn monotonicity(&self) -> Vec<f32> {
        heuristic::monotonicity(&self.grid)
    }

    pub fn smoothness(&self) -> f32 {
        heuristic::smoothness(&self.grid)
    }

    fn spawn_random_tile(&mut self) {
        ops::insert_random_tile(&mut self.grid, self.probability_of_two, &mut self.rng);
    }
}

//! Non-mutating lookahead: dry-run a move and summarize what it would do.
//!
//! Everything here takes the board by reference and works on a private copy,
//! so it can run at any time and from any number of threads.
//!
//! Quick start
//! ```
//! use tilemerge::analysis::{analyze_all, simulate};
//! use tilemerge::engine::{Direction, Grid};
//!
//! let g = Grid::from_rows(&[[2, 2, 4, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
//! let (after, a) = simulate(&g, Direction::Left);
//! assert!(a.feasible);
//! assert_eq!((a.merge_count, a.merge_value_sum), (1, 4));
//! assert_eq!(after.rows()[0], vec![4, 4, 0, 0]);
//!
//! // The input grid is untouched.
//! assert_eq!(g.get(0, 1), 2);
//!
//! let all = analyze_all(&g);
//! assert!(!all[Direction::Up.index()].feasible);
//! ```

use rayon::prelude::*;
use serde::Serialize;

use crate::engine::ops;
use crate::engine::{Direction, Grid};

pub mod heuristic;

/// Outcome of a hypothetical move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MoveAnalysis {
    /// Whether the move would change the board.
    pub feasible: bool,
    /// Number of merges the move would perform.
    pub merge_count: usize,
    /// Score the move would add (sum of merged values).
    pub merge_value_sum: u64,
    /// Empty cells after the slide, before any spawn.
    pub empty_cells_after: usize,
    /// Highest tile after the slide, before any spawn.
    pub max_tile_after: u32,
}

/// Slide a copy of `grid` in `dir` and return the resulting grid with its analysis.
///
/// Uses the exact routine a real move uses; no tile is spawned.
pub fn simulate(grid: &Grid, dir: Direction) -> (Grid, MoveAnalysis) {
    let mut scratch = grid.clone();
    let slide = ops::slide(&mut scratch, dir);
    let merges = slide.events.iter().filter(|ev| ev.merged);
    let (merge_count, merge_value_sum) =
        merges.fold((0usize, 0u64), |(n, sum), ev| (n + 1, sum + u64::from(ev.new_value)));
    debug_assert_eq!(merge_value_sum, slide.gained);
    let analysis = MoveAnalysis {
        feasible: slide.moved,
        merge_count,
        merge_value_sum,
        empty_cells_after: scratch.count_empty(),
        max_tile_after: scratch.max_tile(),
    };
    (scratch, analysis)
}

#[inline]
pub fn analyze_move(grid: &Grid, dir: Direction) -> MoveAnalysis {
    simulate(grid, dir).1
}

/// Analyze every direction in parallel.
///
/// Returns a fixed array in order: `[Up, Down, Left, Right]`.
pub fn analyze_all(grid: &Grid) -> [MoveAnalysis; 4] {
    let results: Vec<(usize, MoveAnalysis)> = Direction::ALL
        .par_iter()
        .map(|&dir| (dir.index(), analyze_move(grid, dir)))
        .collect();
    let mut out = [MoveAnalysis::default(); 4];
    for (i, a) in results {
        out[i] = a;
    }
    out
}

/// Pick a direction greedily from one-ply analyses.
///
/// Feasible moves only; prefers the larger score gain, then more empty cells.
/// Remaining ties go to the earlier direction in [`Direction::ALL`].
pub fn greedy_choice(analyses: &[MoveAnalysis; 4]) -> Option<Direction> {
    Direction::ALL
        .iter()
        .zip(analyses.iter())
        .filter(|(_, a)| a.feasible)
        .fold(None::<(Direction, &MoveAnalysis)>, |best, (&dir, a)| match best {
            Some((_, b)) if (b.merge_value_sum, b.empty_cells_after) >= (a.merge_value_sum, a.empty_cells_after) => best,
            _ => Some((dir, a)),
        })
        .map(|(dir, _)| dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[[u32; 4]; 4]) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn counts_only_merges() {
        let g = grid(&[[2, 2, 2, 2], [4, 0, 4, 8], [0, 0, 0, 2], [16, 8, 4, 2]]);
        let a = analyze_move(&g, Direction::Left);
        assert!(a.feasible);
        assert_eq!(a.merge_count, 3);
        assert_eq!(a.merge_value_sum, 4 + 4 + 8);
        // rows after: [4,4,0,0] [8,8,0,0] [2,0,0,0] [16,8,4,2]
        assert_eq!(a.empty_cells_after, 2 + 2 + 3);
        assert_eq!(a.max_tile_after, 16);
    }

    #[test]
    fn infeasible_direction() {
        let g = grid(&[[2, 4, 8, 16], [0; 4], [0; 4], [0; 4]]);
        let a = analyze_move(&g, Direction::Up);
        assert_eq!(
            a,
            MoveAnalysis { feasible: false, merge_count: 0, merge_value_sum: 0, empty_cells_after: 12, max_tile_after: 16 }
        );
    }

    #[test]
    fn simulate_matches_shift() {
        let g = grid(&[[2, 2, 4, 4], [8, 0, 8, 2], [2, 2, 2, 2], [0, 4, 0, 4]]);
        for dir in Direction::ALL {
            let (after, _) = simulate(&g, dir);
            assert_eq!(after, g.shift(dir));
        }
    }

    #[test]
    fn parallel_matches_sequential() {
        let g = grid(&[[2, 2, 4, 4], [8, 0, 8, 2], [2, 2, 2, 2], [0, 4, 0, 4]]);
        let all = analyze_all(&g);
        for dir in Direction::ALL {
            assert_eq!(all[dir.index()], analyze_move(&g, dir));
        }
    }

    #[test]
    fn greedy_prefers_bigger_merges() {
        // Left merges 8+8 in row 0; Up merges 2+2 in column 3.
        let g = grid(&[[8, 8, 0, 2], [0, 0, 0, 2], [0; 4], [0; 4]]);
        assert_eq!(greedy_choice(&analyze_all(&g)), Some(Direction::Left));
    }

    #[test]
    fn greedy_breaks_ties_in_action_order() {
        let g = grid(&[[0, 0, 0, 0], [0, 2, 0, 0], [0; 4], [0; 4]]);
        assert_eq!(greedy_choice(&analyze_all(&g)), Some(Direction::Up));
    }

    #[test]
    fn greedy_none_when_stuck() {
        let g = grid(&[[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert_eq!(greedy_choice(&analyze_all(&g)), None);
    }
}

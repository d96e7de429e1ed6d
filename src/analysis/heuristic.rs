use crate::engine::Grid;

const MONOTONICITY_SCALE: f32 = 10.0;

// Tile values are powers of two, so log2 is exact.
#[inline]
fn log2(v: u32) -> f32 {
    v.trailing_zeros() as f32
}

/// Monotonicity of each row (indices 0..N) and then each column (N..2N).
///
/// For every adjacent pair of non-empty cells the log2 step to the next cell is
/// accumulated as increasing or decreasing; each entry is
/// `(decreasing - increasing) / 10`, so lines that fall toward the higher index
/// score positive.
pub fn monotonicity(grid: &Grid) -> Vec<f32> {
    let n = grid.size();
    let rows = (0..n).map(|r| line_monotonicity((0..n).map(|c| grid.get(r, c))));
    let cols = (0..n).map(|c| line_monotonicity((0..n).map(|r| grid.get(r, c))));
    rows.chain(cols).collect()
}

fn line_monotonicity(line: impl Iterator<Item = u32>) -> f32 {
    let mut increasing = 0.0f32;
    let mut decreasing = 0.0f32;
    let mut prev: Option<u32> = None;
    for cur in line {
        if let Some(p) = prev {
            if p != 0 && cur != 0 {
                let diff = log2(cur) - log2(p);
                increasing += diff.max(0.0);
                decreasing += (-diff).max(0.0);
            }
        }
        prev = Some(cur);
    }
    (decreasing - increasing) / MONOTONICITY_SCALE
}

/// Negated sum of log2 gaps between each non-empty cell and its non-empty right
/// and lower neighbours, divided by `2·N²`.
pub fn smoothness(grid: &Grid) -> f32 {
    let n = grid.size();
    let mut total = 0.0f32;
    for r in 0..n {
        for c in 0..n {
            let v = grid.get(r, c);
            if v == 0 {
                continue;
            }
            let here = log2(v);
            if c + 1 < n && grid.get(r, c + 1) != 0 {
                total -= (here - log2(grid.get(r, c + 1))).abs();
            }
            if r + 1 < n && grid.get(r + 1, c) != 0 {
                total -= (here - log2(grid.get(r + 1, c))).abs();
            }
        }
    }
    total / (2 * n * n) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[[u32; 4]; 4]) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn monotonicity_signs() {
        let g = grid(&[[16, 8, 4, 2], [2, 4, 8, 16], [2, 0, 0, 4], [0; 4]]);
        let m = monotonicity(&g);
        assert_eq!(m.len(), 8);
        assert!(close(m[0], 0.3));
        assert!(close(m[1], -0.3));
        // zeros break adjacency: 2 and 4 are not neighbours
        assert!(close(m[2], 0.0));
        assert!(close(m[3], 0.0));
        // column 0: 16 -> 2 -> 2 -> 0
        assert!(close(m[4], 0.3));
        // column 3: 2 -> 16 -> 4
        assert!(close(m[7], (2.0 - 3.0) / 10.0));
    }

    #[test]
    fn mixed_line_sums_both_directions() {
        let g = grid(&[[2, 8, 4, 16], [0; 4], [0; 4], [0; 4]]);
        // steps: +2, -1, +2
        assert!(close(monotonicity(&g)[0], (1.0 - 4.0) / 10.0));
    }

    #[test]
    fn smoothness_of_uniform_board_is_zero() {
        let g = grid(&[[8; 4]; 4]);
        assert!(close(smoothness(&g), 0.0));
        assert!(close(smoothness(&Grid::empty(4).unwrap()), 0.0));
    }

    #[test]
    fn smoothness_penalizes_gaps() {
        // (0,0)=2 vs right 8: |1-3| = 2; vs below 4: |1-2| = 1
        let g = grid(&[[2, 8, 0, 0], [4, 0, 0, 0], [0; 4], [0; 4]]);
        assert!(close(smoothness(&g), -3.0 / 32.0));
    }

    #[test]
    fn other_sizes() {
        let g = Grid::from_rows(&[[2, 4, 8], [0, 0, 0], [0, 0, 0]]).unwrap();
        let m = monotonicity(&g);
        assert_eq!(m.len(), 6);
        assert!(close(m[0], -0.2));
        assert!(close(smoothness(&g), -2.0 / 18.0));
    }
}

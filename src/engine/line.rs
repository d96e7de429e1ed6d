//! One-dimensional collapse: compact a line toward index 0 and merge equal neighbours.
//!
//! Every direction on the board is reduced to this routine; see `ops::slide`.

/// Where one source tile ended up after a collapse, in line positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineEvent {
    /// Index of the non-zero source cell.
    pub from: usize,
    /// Index the tile was written to (or merged into).
    pub to: usize,
    /// Value of the destination cell right after this tile landed.
    pub value: u32,
    /// True when the tile was absorbed by the previously written cell.
    pub merged: bool,
}

/// Result of collapsing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collapse {
    /// The compacted line, same length as the input.
    pub line: Vec<u32>,
    /// One event per non-zero source cell, in ascending source order.
    pub events: Vec<LineEvent>,
    /// Sum of all merged values produced by this collapse.
    pub gained: u64,
}

impl Collapse {
    /// Number of merges that happened on this line.
    pub fn merge_count(&self) -> usize {
        self.events.iter().filter(|ev| ev.merged).count()
    }
}

/// Collapse `line` toward index 0.
///
/// A written cell accepts at most one merge per pass, so `[2, 2, 2, 0]`
/// becomes `[4, 2, 0, 0]` rather than `[8, 0, 0, 0]`.
///
/// ```
/// use tilemerge::engine::line::collapse_line;
/// let c = collapse_line(&[2, 2, 2, 2]);
/// assert_eq!(c.line, vec![4, 4, 0, 0]);
/// assert_eq!(c.gained, 8);
/// ```
pub fn collapse_line(line: &[u32]) -> Collapse {
    let mut out = vec![0u32; line.len()];
    let mut events = Vec::with_capacity(line.len());
    let mut gained = 0u64;
    let mut cursor = 0usize;
    let mut just_merged = false;

    for (from, &val) in line.iter().enumerate() {
        if val == 0 {
            continue;
        }
        // a pair whose double would not fit in u32 stays apart
        if !just_merged && cursor > 0 && out[cursor - 1] == val && val.checked_mul(2).is_some() {
            out[cursor - 1] *= 2;
            let merged = out[cursor - 1];
            gained += u64::from(merged);
            events.push(LineEvent { from, to: cursor - 1, value: merged, merged: true });
            just_merged = true;
        } else {
            out[cursor] = val;
            events.push(LineEvent { from, to: cursor, value: val, merged: false });
            cursor += 1;
            just_merged = false;
        }
    }

    Collapse { line: out, events, gained }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_collapse_basic() {
        assert_eq!(collapse_line(&[0, 0, 0, 0]).line, vec![0, 0, 0, 0]);
        assert_eq!(collapse_line(&[2, 4, 2, 4]).line, vec![2, 4, 2, 4]);
        assert_eq!(collapse_line(&[2, 2, 4, 4]).line, vec![4, 8, 0, 0]);
        assert_eq!(collapse_line(&[2, 0, 0, 2]).line, vec![4, 0, 0, 0]);
        assert_eq!(collapse_line(&[0, 0, 0, 2]).line, vec![2, 0, 0, 0]);
        assert_eq!(collapse_line(&[2, 8, 8, 4]).line, vec![2, 16, 4, 0]);
    }

    #[test]
    fn merges_at_most_once_per_cell() {
        assert_eq!(collapse_line(&[2, 2, 2, 0]).line, vec![4, 2, 0, 0]);
        assert_eq!(collapse_line(&[2, 2, 2, 2]).line, vec![4, 4, 0, 0]);
        assert_eq!(collapse_line(&[4, 2, 2, 0]).line, vec![4, 4, 0, 0]);
        assert_eq!(collapse_line(&[4, 4, 8, 0]).line, vec![8, 8, 0, 0]);
    }

    #[test]
    fn events_follow_source_order() {
        let c = collapse_line(&[2, 2, 2, 0]);
        assert_eq!(
            c.events,
            vec![
                LineEvent { from: 0, to: 0, value: 2, merged: false },
                LineEvent { from: 1, to: 0, value: 4, merged: true },
                LineEvent { from: 2, to: 1, value: 2, merged: false },
            ]
        );
        assert_eq!(c.merge_count(), 1);
        assert_eq!(c.gained, 4);
    }

    #[test]
    fn stationary_tiles_still_emit_events() {
        let c = collapse_line(&[2, 4, 0, 0]);
        assert_eq!(c.events.len(), 2);
        assert!(c.events.iter().all(|ev| ev.from == ev.to && !ev.merged));
        assert_eq!(c.gained, 0);
    }

    #[test]
    fn conserves_mass() {
        for line in [[2u32, 2, 2, 2], [0, 4, 4, 8], [16, 0, 16, 16], [2, 4, 8, 16]] {
            let c = collapse_line(&line);
            assert_eq!(line.iter().sum::<u32>(), c.line.iter().sum::<u32>());
        }
    }

    #[test]
    fn largest_tiles_do_not_overflow() {
        let c = collapse_line(&[1 << 30, 1 << 30, 0, 0]);
        assert_eq!(c.line, vec![1 << 31, 0, 0, 0]);
        assert_eq!(c.gained, 1 << 31);

        let c = collapse_line(&[1 << 31, 1 << 31, 0, 0]);
        assert_eq!(c.line, vec![1 << 31, 1 << 31, 0, 0]);
        assert_eq!(c.merge_count(), 0);
        assert_eq!(c.gained, 0);
    }

    #[test]
    fn works_for_other_lengths() {
        assert_eq!(collapse_line(&[2, 2, 2, 2, 2]).line, vec![4, 4, 2, 0, 0]);
        assert_eq!(collapse_line(&[8, 8]).line, vec![16, 0]);
    }
}

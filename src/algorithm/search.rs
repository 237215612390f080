//! Exact-cover search engine
//!
//! Algorithm X specialized for tiling: MRV column selection, forced-move
//! compression, per-type inventory limits and row banning over dense
//! bitsets. Candidate rows are shuffled with a seeded Fisher-Yates pass
//! so repeated solves produce varied layouts without affecting
//! correctness. The engine is total: dead ends return normally and
//! nothing in the hot path allocates per step except the frame-local
//! candidate list.

use crate::algorithm::bitset::DenseBitset;
use crate::algorithm::placements::PlacementTable;
use crate::io::configuration::PROGRESS_NODE_INTERVAL;
use crate::spatial::shape::TileType;
use rand::{Rng, rngs::StdRng};

/// Progress snapshot emitted every few thousand decision nodes
#[derive(Debug, Clone, Copy)]
pub struct ProgressEvent {
    /// Decision nodes visited so far
    pub nodes: u64,
    /// Layouts retained so far
    pub found: usize,
}

/// Decision returned by the solution sink for each completed layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionOutcome {
    /// Layout retained; keep searching
    Retained,
    /// Layout was a duplicate or rejected; keep searching
    Discarded,
    /// Layout retained and the cap is reached; stop the search
    Done,
}

/// Exact-cover search over a prepared placement table
///
/// Owns all mutable search state; one instance serves one solve call and
/// is discarded afterwards.
pub struct ExactCoverSearch<'a> {
    table: &'a PlacementTable,
    tiles: &'a [TileType],
    /// Covered-column mask
    covered: DenseBitset,
    covered_count: usize,
    /// Used and banned rows share one mask: a chosen row bans itself
    banned: DenseBitset,
    /// Placements drawn per tile type
    used_count: Vec<usize>,
    /// Rows chosen so far, in choice order
    solution_rows: Vec<u32>,
    /// Contiguous ban trail; frames unwind to their saved mark
    ban_trail: Vec<u32>,
    rng: StdRng,
    nodes: u64,
    found: usize,
}

impl<'a> ExactCoverSearch<'a> {
    /// Create a search over the given matrix and catalog
    pub fn new(table: &'a PlacementTable, tiles: &'a [TileType], rng: StdRng) -> Self {
        Self {
            table,
            tiles,
            covered: DenseBitset::new(table.column_count()),
            covered_count: 0,
            banned: DenseBitset::new(table.len()),
            used_count: vec![0; tiles.len()],
            solution_rows: Vec::new(),
            ban_trail: Vec::new(),
            rng,
            nodes: 0,
            found: 0,
        }
    }

    /// Decision nodes visited so far
    pub const fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Layouts retained so far
    pub const fn found(&self) -> usize {
        self.found
    }

    /// Run the search to exhaustion or until the sink reports `Done`
    ///
    /// `on_solution` receives the chosen rows of every completed layout;
    /// `progress` fires every [`PROGRESS_NODE_INTERVAL`] decision nodes
    /// with strictly increasing node counts.
    pub fn run(
        &mut self,
        progress: &mut dyn FnMut(ProgressEvent),
        on_solution: &mut dyn FnMut(&[u32]) -> SolutionOutcome,
    ) {
        self.search(progress, on_solution);
    }

    /// One search frame; returns `true` when the sink asked to stop
    fn search(
        &mut self,
        progress: &mut dyn FnMut(ProgressEvent),
        on_solution: &mut dyn FnMut(&[u32]) -> SolutionOutcome,
    ) -> bool {
        // Forced moves applied in this frame, unwound before returning.
        let mut forced: Vec<(u32, usize)> = Vec::new();

        let stop = 'frame: loop {
            if self.covered_count == self.table.column_count() {
                match on_solution(&self.solution_rows) {
                    SolutionOutcome::Retained => {
                        self.found += 1;
                        break 'frame false;
                    }
                    SolutionOutcome::Discarded => break 'frame false,
                    SolutionOutcome::Done => {
                        self.found += 1;
                        break 'frame true;
                    }
                }
            }

            self.nodes += 1;
            if self.nodes % PROGRESS_NODE_INTERVAL == 0 {
                progress(ProgressEvent {
                    nodes: self.nodes,
                    found: self.found,
                });
            }

            let Some(column) = self.select_column() else {
                // Some column has no viable row left.
                break 'frame false;
            };
            let mut candidates = self.candidate_rows(column);
            if candidates.is_empty() {
                break 'frame false;
            }

            if let [only] = candidates.as_slice() {
                let row = *only;
                let mark = self.apply(row);
                forced.push((row, mark));
                continue 'frame;
            }

            self.shuffle(&mut candidates);
            let mut stopped = false;
            for row in candidates {
                let mark = self.apply(row);
                let deeper = self.search(progress, on_solution);
                self.undo(row, mark);
                if deeper {
                    stopped = true;
                    break;
                }
            }
            break 'frame stopped;
        };

        // Unwind this frame's forced trail in reverse order.
        while let Some((row, mark)) = forced.pop() {
            self.undo(row, mark);
        }
        stop
    }

    /// MRV: the uncovered column with the fewest viable rows
    ///
    /// Returns `None` when some uncovered column has no viable row at
    /// all, which is an immediate dead end. A count of one ends the scan
    /// early since it cannot be beaten.
    fn select_column(&self) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for column in 0..self.table.column_count() {
            if self.covered.contains(column) {
                continue;
            }
            let mut live = 0;
            for &row in self.table.rows_by_col(column) {
                if !self.banned.contains(row as usize)
                    && self.has_stock(self.table.placement(row).tile)
                {
                    live += 1;
                }
            }
            if live == 0 {
                return None;
            }
            if best.map_or(true, |(_, count)| live < count) {
                best = Some((column, live));
            }
            if live == 1 {
                break;
            }
        }
        best.map(|(column, _)| column)
    }

    /// Rows that can still cover the chosen column
    fn candidate_rows(&self, column: usize) -> Vec<u32> {
        self.table
            .rows_by_col(column)
            .iter()
            .copied()
            .filter(|&row| {
                let placement = self.table.placement(row);
                !self.banned.contains(row as usize)
                    && self.has_stock(placement.tile)
                    && placement
                        .cols
                        .iter()
                        .all(|&col| !self.covered.contains(col as usize))
            })
            .collect()
    }

    fn has_stock(&self, tile: usize) -> bool {
        let limit = self.tiles.get(tile).and_then(|t| t.count);
        limit.map_or(true, |limit| {
            self.used_count.get(tile).copied().unwrap_or(0) < limit
        })
    }

    /// Choose a row: ban it and its incident neighbors, cover its columns
    ///
    /// Returns the ban-trail mark needed to undo the step. Only rows
    /// whose banned flag flips here are recorded, so backtracking
    /// restores exactly those and no others.
    fn apply(&mut self, row: u32) -> usize {
        let table = self.table;
        let placement = table.placement(row);
        let mark = self.ban_trail.len();

        self.banned.insert(row as usize);
        self.ban_trail.push(row);
        if let Some(used) = self.used_count.get_mut(placement.tile) {
            *used += 1;
        }

        for &column in &placement.cols {
            for &other in table.rows_by_col(column as usize) {
                if other != row && !self.banned.contains(other as usize) {
                    self.banned.insert(other as usize);
                    self.ban_trail.push(other);
                }
            }
        }
        for &column in &placement.cols {
            self.covered.insert(column as usize);
        }
        self.covered_count += placement.cols.len();
        self.solution_rows.push(row);
        mark
    }

    /// Invert [`Self::apply`] in reverse order
    fn undo(&mut self, row: u32, mark: usize) {
        let table = self.table;
        let placement = table.placement(row);

        self.solution_rows.pop();
        self.covered_count -= placement.cols.len();
        for &column in placement.cols.iter().rev() {
            self.covered.remove(column as usize);
        }
        if let Some(used) = self.used_count.get_mut(placement.tile) {
            *used -= 1;
        }
        while self.ban_trail.len() > mark {
            if let Some(banned_row) = self.ban_trail.pop() {
                self.banned.remove(banned_row as usize);
            }
        }
    }

    /// Cheap Fisher-Yates pass for output variety
    fn shuffle(&mut self, rows: &mut [u32]) {
        for i in (1..rows.len()).rev() {
            let j = self.rng.random_range(0..=i);
            rows.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::board::Board;
    use rand::SeedableRng;

    fn domino(count: Option<usize>) -> TileType {
        TileType {
            name: "domino".to_string(),
            base: vec![[0, 0], [1, 0]],
            allow_rotate: true,
            allow_reflect: false,
            count,
        }
    }

    fn run_to_exhaustion(board: &Board, tiles: &[TileType], seed: u64) -> Vec<Vec<u32>> {
        let table = PlacementTable::build(board, tiles).unwrap();
        let mut search = ExactCoverSearch::new(&table, tiles, StdRng::seed_from_u64(seed));
        let mut solutions = Vec::new();
        search.run(&mut |_| {}, &mut |rows| {
            solutions.push(rows.to_vec());
            SolutionOutcome::Retained
        });
        solutions
    }

    // A 2x2 board has exactly two domino tilings
    #[test]
    fn test_enumerates_all_solutions_once() {
        let board = Board::new(2, 2, &[]).unwrap();
        let mut solutions = run_to_exhaustion(&board, &[domino(None)], 3);
        assert_eq!(solutions.len(), 2);
        for rows in &mut solutions {
            rows.sort_unstable();
        }
        solutions.sort();
        solutions.dedup();
        assert_eq!(solutions.len(), 2);
    }

    // 2xN domino tilings follow the Fibonacci sequence: f(4) = 5
    #[test]
    fn test_solution_count_matches_fibonacci() {
        let board = Board::new(4, 2, &[]).unwrap();
        let solutions = run_to_exhaustion(&board, &[domino(None)], 11);
        assert_eq!(solutions.len(), 5);
    }

    // Stock limits prune solutions the unbounded search would find
    #[test]
    fn test_inventory_limits_prune() {
        let board = Board::new(2, 2, &[]).unwrap();
        let tiles = [domino(Some(1))];
        let solutions = run_to_exhaustion(&board, &tiles, 5);
        assert!(solutions.is_empty());
    }

    // Each solution partitions the free set exactly
    #[test]
    fn test_solutions_are_exact_covers() {
        let board = Board::new(4, 3, &[[1, 1]]).unwrap();
        let tiles = [domino(None)];
        let table = PlacementTable::build(&board, &tiles).unwrap();
        let mut search = ExactCoverSearch::new(&table, &tiles, StdRng::seed_from_u64(9));
        let mut checked = 0;
        search.run(&mut |_| {}, &mut |rows| {
            let mut covered = DenseBitset::new(table.column_count());
            for &row in rows {
                for &col in &table.placement(row).cols {
                    assert!(!covered.contains(col as usize), "column covered twice");
                    covered.insert(col as usize);
                }
            }
            assert_eq!(covered.count(), table.column_count());
            checked += 1;
            SolutionOutcome::Retained
        });
        assert!(checked > 0);
    }

    // The search state unwinds fully after exhaustion
    #[test]
    fn test_state_restored_after_run() {
        let board = Board::new(4, 2, &[]).unwrap();
        let tiles = [domino(None)];
        let table = PlacementTable::build(&board, &tiles).unwrap();
        let mut search = ExactCoverSearch::new(&table, &tiles, StdRng::seed_from_u64(2));
        search.run(&mut |_| {}, &mut |_| SolutionOutcome::Discarded);
        assert!(search.covered.is_empty());
        assert!(search.banned.is_empty());
        assert!(search.solution_rows.is_empty());
        assert!(search.ban_trail.is_empty());
        assert_eq!(search.covered_count, 0);
        assert!(search.used_count.iter().all(|&used| used == 0));
    }

    // Done stops the search immediately
    #[test]
    fn test_cap_stops_search() {
        let board = Board::new(6, 2, &[]).unwrap();
        let tiles = [domino(None)];
        let table = PlacementTable::build(&board, &tiles).unwrap();
        let mut search = ExactCoverSearch::new(&table, &tiles, StdRng::seed_from_u64(7));
        let mut seen = 0;
        search.run(&mut |_| {}, &mut |_| {
            seen += 1;
            SolutionOutcome::Done
        });
        assert_eq!(seen, 1);
        assert_eq!(search.found(), 1);
    }
}

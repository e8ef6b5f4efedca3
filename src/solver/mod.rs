// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The Fiduccia-Mattheyses solver: multi-pass local search with
//! speculative rollback.
//!
//! # Pass structure
//!
//! Each pass unlocks every cell, recomputes all gains, and rebuilds the
//! gain buckets. It then repeatedly pops the best candidate, moves it if
//! the balance bounds allow, locks it, and incrementally updates the gains
//! of its unlocked neighbors. Every committed move is appended to a move
//! record together with its gain at move time.
//!
//! A pass commits moves speculatively: the running total gain may dip
//! negative on the way to a better prefix. At pass end the solver rolls
//! back every move beyond the best in-bounds prefix by re-applying
//! [`PartitionState::apply_move`] to each recorded cell in forward order
//! (the move is involutive, and each move only touches its own cell and
//! incident nets, so the undo order does not matter).
//!
//! The first pass runs unconstrained; if it finishes without anomaly, its
//! best-prefix length caps the move count of every later pass. The solver
//! terminates when a pass fails to achieve a positive best gain.
//!
//! # Anomalies
//!
//! A locked cell must never remain in a bucket. If one is popped anyway,
//! the pass's selection loop aborts; moves already committed stay in the
//! record and go through the normal rollback/termination evaluation. The
//! anomaly is counted, never panicked on, and a pass that hit one does not
//! establish the move cap.

use crate::bucket::GainBuckets;
use crate::cut;
use crate::graph::{CellId, Hypergraph};
use crate::state::{Counters, PartitionState, Side, Statistics};

/// What a single pass reported back to the solve loop.
#[derive(Debug)]
struct PassOutcome {
    /// Move count of the best in-bounds prefix, if any move qualified.
    best_prefix: Option<usize>,
    /// Cumulative gain at that prefix.
    best_gain: Option<i64>,
    /// Whether a locked cell was popped from a bucket.
    anomaly: bool,
}

/// FM bipartitioning solver. Owns the graph and all solve state.
pub struct FmSolver {
    graph: Hypergraph,
    state: PartitionState,
    buckets: GainBuckets,
    gains: Vec<i32>,
    locked: Vec<bool>,
    /// Undo log for the current pass: (cell, gain at move time).
    move_record: Vec<(CellId, i32)>,
    /// Move-count cap established by the first anomaly-free pass.
    move_cap: Option<usize>,
    statistics: Statistics,
}

impl FmSolver {
    pub fn new(graph: Hypergraph) -> Self {
        let num_cells = graph.num_cells();
        let max_degree = graph.max_degree();
        let state = PartitionState::new(&graph);
        Self {
            graph,
            state,
            buckets: GainBuckets::new(num_cells, max_degree),
            gains: vec![0; num_cells],
            locked: vec![false; num_cells],
            move_record: Vec::with_capacity(num_cells),
            move_cap: None,
            statistics: Statistics::new(),
        }
    }

    /// Run passes until one fails to improve the cut.
    ///
    /// Side assignments are mutated in place and persist as the result;
    /// the final state is the best prefix of the last improving pass.
    pub fn solve(&mut self) {
        loop {
            let outcome = self.run_pass();

            if self.move_cap.is_none() && !outcome.anomaly {
                self.move_cap = outcome.best_prefix;
            }
            self.rollback(outcome.best_prefix);

            match outcome.best_gain {
                Some(gain) if gain > 0 => continue,
                _ => break,
            }
        }
    }

    /// One pass of the selection loop, up to the move cap (unbounded on
    /// the first pass).
    fn run_pass(&mut self) -> PassOutcome {
        self.statistics.increment(Counters::Passes);
        self.init_pass();
        self.move_record.clear();

        let mut deferred: Vec<CellId> = Vec::new();
        let mut moves_made = 0usize;
        let mut total_gain: i64 = 0;
        let mut best_gain: Option<i64> = None;
        let mut best_prefix: Option<usize> = None;
        let mut anomaly = false;

        while self.move_cap.map_or(true, |cap| moves_made < cap) {
            let Some(candidate) = self.select_candidate() else {
                break;
            };

            if self.locked[candidate.index()] {
                // Locked cells are removed from the buckets when moved and
                // skipped by gain adjustment; popping one means the bucket
                // linkage is corrupt. Abort the pass, keep committed moves.
                self.statistics.increment(Counters::LockedCellAnomalies);
                anomaly = true;
                break;
            }

            if !self.state.is_legal(candidate) {
                // Set aside without reinsertion; eligible again after the
                // next successful move shifts the balance.
                self.statistics.increment(Counters::CandidatesDeferred);
                deferred.push(candidate);
                continue;
            }

            moves_made += 1;
            let gain = self.gains[candidate.index()];
            self.move_record.push((candidate, gain));
            self.locked[candidate.index()] = true;

            // Gain update reads the pre-move pin counts and side.
            self.update_gains(candidate);
            self.state.apply_move(&self.graph, candidate);
            self.statistics.increment(Counters::MovesApplied);

            total_gain += i64::from(gain);
            let size0 = self.state.size(Side::ZERO);
            if best_gain.map_or(true, |best| total_gain > best)
                && size0 >= self.state.lower_bound()
                && size0 <= self.state.upper_bound()
            {
                best_gain = Some(total_gain);
                best_prefix = Some(moves_made);
            }

            // The balance just shifted; deferred cells may be legal now.
            for cell in deferred.drain(..) {
                self.buckets
                    .insert(cell, self.state.side_of(cell), self.gains[cell.index()]);
            }
        }

        PassOutcome {
            best_prefix,
            best_gain,
            anomaly,
        }
    }

    /// Unlock everything, recompute initial gains, rebuild the buckets.
    ///
    /// A cell's initial gain sums the criticality of its nets: a net it is
    /// alone on (`F == 1`) would become uncut, `+1`; a net absent from the
    /// other side (`T == 0`) would become newly cut, `-1`.
    fn init_pass(&mut self) {
        self.locked.fill(false);
        self.gains.fill(0);
        self.buckets.reset();

        let Self {
            graph,
            state,
            buckets,
            gains,
            ..
        } = self;

        for cell in graph.cell_ids() {
            let from = state.side_of(cell);
            let to = from.other();
            let mut gain = 0i32;
            for &net in graph.cell(cell).nets() {
                if state.net_count(net, from) == 1 {
                    gain += 1;
                }
                if state.net_count(net, to) == 0 {
                    gain -= 1;
                }
            }
            gains[cell.index()] = gain;
            buckets.insert(cell, from, gain);
        }
    }

    /// Pick the side to pull from and pop its best candidate.
    ///
    /// A side sitting at the lower bound forces the pull from the other
    /// side; otherwise the strictly greater cached maximum wins, with ties
    /// (and an empty structure) going to side 0.
    fn select_candidate(&mut self) -> Option<CellId> {
        let side = if self.state.size(Side::ZERO) == self.state.lower_bound() {
            Side::ONE
        } else if self.state.size(Side::ONE) == self.state.lower_bound() {
            Side::ZERO
        } else if self.buckets.peek_max(Side::ONE) > self.buckets.peek_max(Side::ZERO) {
            Side::ONE
        } else {
            Side::ZERO
        };
        self.buckets.pop_max(side)
    }

    /// Incremental gain update for the neighborhood of `moved`, using the
    /// pin counts as they stand before the move.
    ///
    /// With `F`/`T` the counts on the moving cell's side and the far side:
    /// `T == 0` promotes every unlocked cell on the net (+1); `T == 1`
    /// demotes the single unlocked cell already on the far side (-1).
    /// Then, with the counts as they will be after the move, `F == 0`
    /// demotes every unlocked cell (-1) and `F == 1` promotes the single
    /// unlocked cell left behind (+1). Locked cells keep frozen gains.
    fn update_gains(&mut self, moved: CellId) {
        let Self {
            graph,
            state,
            buckets,
            gains,
            locked,
            ..
        } = self;

        let from = state.side_of(moved);
        let to = from.other();

        let adjust = |buckets: &mut GainBuckets, gains: &mut Vec<i32>, cell: CellId, delta: i32| {
            if locked[cell.index()] {
                return;
            }
            buckets.remove(cell);
            gains[cell.index()] += delta;
            buckets.insert(cell, state.side_of(cell), gains[cell.index()]);
        };

        for &net in graph.cell(moved).nets() {
            let f = state.net_count(net, from);
            let t = state.net_count(net, to);

            if t == 0 {
                for &cell in graph.net(net).cells() {
                    adjust(buckets, gains, cell, 1);
                }
            } else if t == 1 {
                for &cell in graph.net(net).cells() {
                    if !locked[cell.index()] && state.side_of(cell) == to {
                        adjust(buckets, gains, cell, -1);
                        break;
                    }
                }
            }

            // Counts as they will stand once the move is applied. The
            // moving cell is on `from`, so f >= 1.
            let f = f - 1;
            if f == 0 {
                for &cell in graph.net(net).cells() {
                    adjust(buckets, gains, cell, -1);
                }
            } else if f == 1 {
                for &cell in graph.net(net).cells() {
                    if !locked[cell.index()] && state.side_of(cell) == from {
                        adjust(buckets, gains, cell, 1);
                        break;
                    }
                }
            }
        }
    }

    /// Re-apply every recorded move beyond the best prefix, undoing it.
    fn rollback(&mut self, best_prefix: Option<usize>) {
        let keep = best_prefix.unwrap_or(0);
        let undone = self.move_record.len() - keep;
        for i in keep..self.move_record.len() {
            let (cell, _) = self.move_record[i];
            self.state.apply_move(&self.graph, cell);
        }
        self.statistics.add(Counters::MovesRolledBack, undone as u64);
    }

    /// Final side of `cell`.
    pub fn side_of(&self, cell: CellId) -> Side {
        self.state.side_of(cell)
    }

    /// Current cell counts of side 0 and side 1.
    pub fn partition_sizes(&self) -> [usize; 2] {
        [self.state.size(Side::ZERO), self.state.size(Side::ONE)]
    }

    /// Current cut size, recomputed from scratch.
    pub fn cut_size(&mut self) -> usize {
        cut::cut_size(&self.graph, &mut self.state)
    }

    pub fn graph(&self) -> &Hypergraph {
        &self.graph
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Write one line per cell, in cell order, giving its final side.
    pub fn write_result(&self, out: &mut impl std::io::Write) -> std::io::Result<()> {
        for cell in self.graph.cell_ids() {
            writeln!(out, "{}", self.state.side_of(cell).bit())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(num_cells: usize, nets: &[Vec<u32>]) -> FmSolver {
        let graph = Hypergraph::from_net_lists(num_cells, nets).unwrap();
        let mut solver = FmSolver::new(graph);
        solver.solve();
        solver
    }

    #[test]
    fn test_chain_scenario() {
        // Nets {1,2} and {2,3}: bounds [1, 2] force a split, so the best
        // achievable cut is 1.
        let mut solver = solve(3, &[vec![0, 1], vec![1, 2]]);
        assert_eq!(solver.cut_size(), 1);
        let [s0, s1] = solver.partition_sizes();
        assert_eq!(s0 + s1, 3);
        assert!(s0 >= 1 && s0 <= 2);
    }

    #[test]
    fn test_single_net_scenario() {
        // One net over all cells: once the lower bound forces both sides
        // nonempty (N >= 3), any feasible bipartition cuts it.
        for n in 3..=6 {
            let all: Vec<u32> = (0..n as u32).collect();
            let mut solver = solve(n, &[all]);
            assert_eq!(solver.cut_size(), 1, "n = {}", n);
        }
    }

    #[test]
    fn test_disjoint_pairs_scenario() {
        // Nets {1,2} and {3,4}: bounds [1, 3] admit the natural cut of 0.
        let mut solver = solve(4, &[vec![0, 1], vec![2, 3]]);
        assert_eq!(solver.cut_size(), 0);
        let [s0, s1] = solver.partition_sizes();
        assert_eq!(s0 + s1, 4);
    }

    #[test]
    fn test_empty_graph() {
        let mut solver = solve(0, &[]);
        assert_eq!(solver.cut_size(), 0);
        assert_eq!(solver.partition_sizes(), [0, 0]);
    }

    #[test]
    fn test_single_cell() {
        let mut solver = solve(1, &[vec![0]]);
        assert_eq!(solver.cut_size(), 0);
        let [s0, s1] = solver.partition_sizes();
        assert_eq!(s0 + s1, 1);
    }

    #[test]
    fn test_isolated_cells() {
        // Disconnected graph: one net plus two isolated cells.
        let mut solver = solve(4, &[vec![0, 1]]);
        assert_eq!(solver.cut_size(), 0);
    }

    #[test]
    fn test_balance_at_termination() {
        let nets: Vec<Vec<u32>> = vec![
            vec![0, 1, 2],
            vec![2, 3],
            vec![3, 4, 5],
            vec![5, 6],
            vec![6, 7, 0],
        ];
        let mut solver = solve(8, &nets);
        let [s0, _] = solver.partition_sizes();
        assert!(s0 >= 3 && s0 <= 5); // floor(3.6), ceil(4.4)
        // The evaluator is idempotent.
        assert_eq!(solver.cut_size(), solver.cut_size());
    }

    #[test]
    fn test_deterministic() {
        let nets: Vec<Vec<u32>> = vec![vec![0, 1, 2], vec![1, 3], vec![2, 4, 5], vec![0, 5]];
        let mut a = solve(6, &nets);
        let mut b = solve(6, &nets);
        assert_eq!(a.cut_size(), b.cut_size());
        for i in 0..6 {
            assert_eq!(a.side_of(CellId::new(i)), b.side_of(CellId::new(i)));
        }
    }

    #[test]
    fn test_statistics_populated() {
        let solver = solve(4, &[vec![0, 1], vec![2, 3]]);
        let stats = solver.statistics();
        assert!(stats.get(Counters::Passes) >= 1);
        assert!(stats.get(Counters::MovesApplied) >= 1);
        assert_eq!(stats.get(Counters::LockedCellAnomalies), 0);
    }

    #[test]
    fn test_write_result() {
        let solver = solve(3, &[vec![0, 1], vec![1, 2]]);
        let mut out = Vec::new();
        solver.write_result(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in lines {
            assert!(line == "0" || line == "1");
        }
    }
}

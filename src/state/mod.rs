// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Mutable partition state: side assignments, per-side sizes, per-net pin
//! counts, and the balance bounds.
//!
//! All pin-count mutation funnels through exactly two methods:
//! [`PartitionState::apply_move`] (incremental, involutive) and
//! [`PartitionState::reset_net_counts`] (from-scratch rebuild). No other
//! component writes counts, so the invariant
//! `count[0] + count[1] == pin_count` holds for every net at all times.

pub mod statistics;

pub use statistics::{Counters, Statistics};

use crate::graph::{CellId, Hypergraph, NetId};

/// One of the two partition sides.
///
/// Newtype over a bit so a side can index the paired size/count arrays
/// without being confused with a gain or an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Side(bool);

impl Side {
    pub const ZERO: Side = Side(false);
    pub const ONE: Side = Side(true);

    /// The opposite side.
    pub fn other(self) -> Side {
        Side(!self.0)
    }

    /// Index into a `[T; 2]` keyed by side.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The side as its output bit (0 or 1).
    pub fn bit(self) -> u8 {
        self.0 as u8
    }
}

/// Current bipartition: who is where, how big each side is, and how each
/// net's pins split across the sides.
#[derive(Debug)]
pub struct PartitionState {
    sides: Vec<Side>,
    size: [usize; 2],
    lower_bound: usize,
    upper_bound: usize,
    /// Per net: pin counts on side 0 / side 1.
    net_counts: Vec<[u32; 2]>,
}

impl PartitionState {
    /// Build the starting configuration: every cell on side 0.
    ///
    /// Side 1 starts empty, which violates the balance bounds; the
    /// selection rules push early moves from side 0 to side 1 until
    /// balance is restored. This starting point is deliberate and affects
    /// solution quality, so it is kept as-is.
    pub fn new(graph: &Hypergraph) -> Self {
        let n = graph.num_cells();
        let mut state = Self {
            sides: vec![Side::ZERO; n],
            size: [n, 0],
            lower_bound: (0.45 * n as f64).floor() as usize,
            upper_bound: (0.55 * n as f64).ceil() as usize,
            net_counts: vec![[0, 0]; graph.num_nets()],
        };
        state.reset_net_counts(graph);
        state
    }

    pub fn side_of(&self, cell: CellId) -> Side {
        self.sides[cell.index()]
    }

    /// Cell count on `side`.
    pub fn size(&self, side: Side) -> usize {
        self.size[side.index()]
    }

    /// Minimum allowed size of either side: `floor(0.45 N)`.
    pub fn lower_bound(&self) -> usize {
        self.lower_bound
    }

    /// Maximum allowed size of either side: `ceil(0.55 N)`.
    pub fn upper_bound(&self) -> usize {
        self.upper_bound
    }

    /// Pin count of `net` on `side`.
    pub fn net_count(&self, net: NetId, side: Side) -> u32 {
        self.net_counts[net.index()][side.index()]
    }

    /// Whether `net` has pins on both sides.
    pub fn is_cut(&self, net: NetId) -> bool {
        let [a, b] = self.net_counts[net.index()];
        a > 0 && b > 0
    }

    /// Whether moving `cell` to the other side keeps both sides in bounds.
    pub fn is_legal(&self, cell: CellId) -> bool {
        let from = self.side_of(cell);
        let to = from.other();
        self.size[from.index()] - 1 >= self.lower_bound
            && self.size[to.index()] + 1 <= self.upper_bound
    }

    /// Flip `cell` to the other side, updating both side sizes and the pin
    /// counts of every incident net.
    ///
    /// Involutive: applying it twice to the same cell, with no other state
    /// change in between, restores the prior state exactly. Rollback
    /// exploits this by re-applying recorded moves in forward order.
    pub fn apply_move(&mut self, graph: &Hypergraph, cell: CellId) {
        let from = self.side_of(cell);
        let to = from.other();

        self.sides[cell.index()] = to;
        for &net in graph.cell(cell).nets() {
            self.net_counts[net.index()][from.index()] -= 1;
            self.net_counts[net.index()][to.index()] += 1;
        }
        self.size[from.index()] -= 1;
        self.size[to.index()] += 1;
    }

    /// Recompute every net's pin counts from scratch by scanning all cells
    /// once.
    pub fn reset_net_counts(&mut self, graph: &Hypergraph) {
        for counts in &mut self.net_counts {
            *counts = [0, 0];
        }
        for cell in graph.cell_ids() {
            let side = self.side_of(cell);
            for &net in graph.cell(cell).nets() {
                self.net_counts[net.index()][side.index()] += 1;
            }
        }
    }
}

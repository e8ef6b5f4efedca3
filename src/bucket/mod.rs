// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Gain bucket structure: O(1) max-gain selection and O(1) arbitrary
//! removal, keyed by integer gain.
//!
//! Gains are bounded by `±max_degree` (a cell can at most uncut, or newly
//! cut, each of its incident nets), so a dense array of buckets with a
//! monotonically-decreasing cached maximum beats a generic priority queue:
//! every operation is O(1), and a pass performs up to `N` pops plus several
//! gain adjustments per move.
//!
//! # Memory model
//!
//! One `GainBuckets` services both sides. Bucket membership is an
//! intrusive doubly-linked list by cell index: a `links` arena holds one
//! `prev`/`next`/`bucket` record per cell, so a cell can be detached in
//! O(1) given only its id, without knowing its gain or side. Cells are
//! referenced by [`CellId`] only; the structure owns nothing else.
//!
//! # Cached maximum
//!
//! The cached maximum per side is an explicit `Option<i32>` (`None` =
//! empty). [`GainBuckets::remove`] deliberately does not adjust it: within
//! a pass the maximum only ever needs to move downward, and [`pop_max`]
//! does that after each pop. A `remove` can therefore leave the cached
//! maximum pointing at an empty bucket; `pop_max` then yields `None`,
//! which ends the pass. Buckets are only refilled by [`reset`] at the
//! start of the next pass.
//!
//! [`pop_max`]: GainBuckets::pop_max
//! [`reset`]: GainBuckets::reset

use crate::graph::CellId;
use crate::state::Side;

/// Per-cell intrusive linkage.
#[derive(Debug, Clone, Copy, Default)]
struct CellLink {
    prev: Option<CellId>,
    next: Option<CellId>,
    /// Which bucket the cell currently sits in, or `None` if detached.
    bucket: Option<(Side, i32)>,
}

/// Dense gain buckets for both sides, over the range
/// `[-max_degree, +max_degree]`.
#[derive(Debug)]
pub struct GainBuckets {
    max_degree: i32,
    /// Per side, one head slot per gain value.
    heads: [Vec<Option<CellId>>; 2],
    /// Cached maximum occupied gain per side; `None` when believed empty.
    max_gain: [Option<i32>; 2],
    links: Vec<CellLink>,
}

impl GainBuckets {
    /// Create buckets for `num_cells` cells with gains in
    /// `[-max_degree, +max_degree]`.
    pub fn new(num_cells: usize, max_degree: usize) -> Self {
        let slots = 2 * max_degree + 1;
        Self {
            max_degree: max_degree as i32,
            heads: [vec![None; slots], vec![None; slots]],
            max_gain: [None, None],
            links: vec![CellLink::default(); num_cells],
        }
    }

    fn slot(&self, gain: i32) -> usize {
        debug_assert!(
            gain >= -self.max_degree && gain <= self.max_degree,
            "gain {} outside ±{}",
            gain,
            self.max_degree
        );
        (gain + self.max_degree) as usize
    }

    /// Empty all buckets and clear both cached maxima.
    pub fn reset(&mut self) {
        for heads in &mut self.heads {
            heads.fill(None);
        }
        self.max_gain = [None, None];
        self.links.fill(CellLink::default());
    }

    /// Place `cell` at the front of bucket `gain` on `side`. O(1).
    pub fn insert(&mut self, cell: CellId, side: Side, gain: i32) {
        debug_assert!(self.links[cell.index()].bucket.is_none());
        let slot = self.slot(gain);
        let old_head = self.heads[side.index()][slot];

        self.links[cell.index()] = CellLink {
            prev: None,
            next: old_head,
            bucket: Some((side, gain)),
        };
        if let Some(next) = old_head {
            self.links[next.index()].prev = Some(cell);
        }
        self.heads[side.index()][slot] = Some(cell);

        if self.max_gain[side.index()].map_or(true, |m| gain > m) {
            self.max_gain[side.index()] = Some(gain);
        }
    }

    /// Detach `cell` from whatever bucket holds it, via its own linkage.
    /// O(1). Does not adjust the cached maximum. No-op if detached.
    pub fn remove(&mut self, cell: CellId) {
        let link = self.links[cell.index()];
        let Some((side, gain)) = link.bucket else {
            return;
        };

        match link.prev {
            Some(prev) => self.links[prev.index()].next = link.next,
            None => {
                let slot = self.slot(gain);
                self.heads[side.index()][slot] = link.next;
            }
        }
        if let Some(next) = link.next {
            self.links[next.index()].prev = link.prev;
        }
        self.links[cell.index()] = CellLink::default();
    }

    /// Remove and return the cell at the cached maximum for `side`.
    ///
    /// Returns `None` if the side is believed empty or the cached maximum
    /// points at a bucket emptied by [`remove`](GainBuckets::remove); both
    /// signal "no candidate" to the selection loop. After a successful
    /// pop, walks the cached maximum down to the next occupied bucket (or
    /// `None`).
    pub fn pop_max(&mut self, side: Side) -> Option<CellId> {
        let max = self.max_gain[side.index()]?;
        let cell = self.heads[side.index()][self.slot(max)]?;
        self.remove(cell);

        let mut gain = max;
        loop {
            if self.heads[side.index()][self.slot(gain)].is_some() {
                self.max_gain[side.index()] = Some(gain);
                break;
            }
            if gain == -self.max_degree {
                self.max_gain[side.index()] = None;
                break;
            }
            gain -= 1;
        }
        Some(cell)
    }

    /// The cached maximum gain for `side`, or `None` when empty.
    pub fn peek_max(&self, side: Side) -> Option<i32> {
        self.max_gain[side.index()]
    }

    /// Whether `cell` currently sits in some bucket.
    pub fn contains(&self, cell: CellId) -> bool {
        self.links[cell.index()].bucket.is_some()
    }
}

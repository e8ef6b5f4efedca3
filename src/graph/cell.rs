// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Cell type: a movable unit assigned to one of two partitions.
//!
//! Cells are identified by a stable integer id and owned by the
//! [`Hypergraph`](crate::graph::Hypergraph). A cell's incident-net list is
//! fixed at construction; all mutable per-cell state (side, gain, lock)
//! lives outside the graph, keyed by [`CellId`].

use crate::graph::net::NetId;

/// A cell id in the range `0..num_cells`.
///
/// Newtype wrapper to prevent mixing cell ids with net ids or other
/// integer values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellId(u32);

impl CellId {
    /// Create a new cell id.
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the underlying value.
    pub fn value(self) -> u32 {
        self.0
    }

    /// Get the id as a usize (for array indexing).
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A movable cell and its incident nets.
#[derive(Debug, Default)]
pub struct Cell {
    nets: Vec<NetId>,
}

impl Cell {
    pub(crate) fn new() -> Self {
        Self { nets: Vec::new() }
    }

    pub(crate) fn add_net(&mut self, net: NetId) {
        self.nets.push(net);
    }

    /// The nets this cell touches, in construction order.
    pub fn nets(&self) -> &[NetId] {
        &self.nets
    }

    /// Number of incident nets (the cell's pin count).
    pub fn degree(&self) -> usize {
        self.nets.len()
    }
}

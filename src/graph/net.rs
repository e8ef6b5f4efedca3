// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Net type: a hyperedge grouping cells that should share a partition.
//!
//! A net is "cut" when it has incident cells on both sides. The per-side
//! pin counts that decide this are mutable solve state and live in
//! [`PartitionState`](crate::state::PartitionState), not here.

use crate::graph::cell::CellId;

/// A net id in the range `0..num_nets`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NetId(u32);

impl NetId {
    /// Create a new net id.
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

/// A hyperedge and its incident cells.
#[derive(Debug, Default)]
pub struct Net {
    cells: Vec<CellId>,
}

impl Net {
    pub(crate) fn new() -> Self {
        Self { cells: Vec::new() }
    }

    pub(crate) fn add_cell(&mut self, cell: CellId) {
        self.cells.push(cell);
    }

    /// The cells on this net, in construction order.
    ///
    /// The incremental gain update depends on this order being stable: the
    /// "exactly one cell on a critical side" rules adjust the first
    /// matching cell found.
    pub fn cells(&self) -> &[CellId] {
        &self.cells
    }

    /// Number of pins (incident cells).
    pub fn pin_count(&self) -> usize {
        self.cells.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_id_roundtrip() {
        let id = NetId::new(2);
        assert_eq!(id.value(), 2);
        assert_eq!(id.index(), 2);
    }

    #[test]
    fn test_net_pins() {
        let mut net = Net::new();
        net.add_cell(CellId::new(1));
        net.add_cell(CellId::new(0));
        assert_eq!(net.pin_count(), 2);
        assert_eq!(net.cells(), &[CellId::new(1), CellId::new(0)]);
    }
}

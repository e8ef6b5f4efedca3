// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The input hypergraph: cells, nets, and their pin adjacency.
//!
//! Built once from a net-list description and immutable in topology
//! thereafter. All solve-time state (sides, gains, locks, pin counts) is
//! kept elsewhere, keyed by [`CellId`]/[`NetId`], so the graph can be
//! shared read-only across the solver and the cut evaluator.

pub mod cell;
pub mod errors;
pub mod net;

pub use cell::{Cell, CellId};
pub use errors::MalformedInputError;
pub use net::{Net, NetId};

/// The static hypergraph: net/cell arenas plus the maximum cell degree.
#[derive(Debug)]
pub struct Hypergraph {
    cells: Vec<Cell>,
    nets: Vec<Net>,
    max_degree: usize,
}

impl Hypergraph {
    /// Build a hypergraph from per-net cell lists.
    ///
    /// `net_lists[n]` holds the 0-based cell indices incident to net `n`.
    /// Each cell accumulates the reverse list of nets it touches. A cell
    /// may appear on no net at all; that is a valid degenerate input.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedInputError`] if a net is empty or references a
    /// cell index `>= num_cells`.
    pub fn from_net_lists(
        num_cells: usize,
        net_lists: &[Vec<u32>],
    ) -> Result<Self, MalformedInputError> {
        let mut cells: Vec<Cell> = (0..num_cells).map(|_| Cell::new()).collect();
        let mut nets: Vec<Net> = Vec::with_capacity(net_lists.len());

        for (net_index, list) in net_lists.iter().enumerate() {
            if list.is_empty() {
                return Err(MalformedInputError::EmptyNet { net: net_index + 1 });
            }

            let net_id = NetId::new(net_index as u32);
            let mut net = Net::new();
            for &raw in list {
                if raw as usize >= num_cells {
                    return Err(MalformedInputError::CellIndexOutOfRange {
                        net: net_index + 1,
                        cell: raw as usize + 1,
                        num_cells,
                    });
                }
                let cell_id = CellId::new(raw);
                net.add_cell(cell_id);
                cells[cell_id.index()].add_net(net_id);
            }
            nets.push(net);
        }

        let max_degree = cells.iter().map(Cell::degree).max().unwrap_or(0);

        Ok(Self {
            cells,
            nets,
            max_degree,
        })
    }

    /// Total cell count `N`.
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Total net count.
    pub fn num_nets(&self) -> usize {
        self.nets.len()
    }

    /// Maximum incident-net count over all cells.
    ///
    /// Gains are bounded by `±max_degree`; the gain buckets are sized from
    /// this.
    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.index()]
    }

    pub fn net(&self, id: NetId) -> &Net {
        &self.nets[id.index()]
    }

    /// Iterate over all cell ids in id order.
    pub fn cell_ids(&self) -> impl Iterator<Item = CellId> + '_ {
        (0..self.cells.len() as u32).map(CellId::new)
    }

    /// Iterate over all net ids in id order.
    pub fn net_ids(&self) -> impl Iterator<Item = NetId> + '_ {
        (0..self.nets.len() as u32).map(NetId::new)
    }
}

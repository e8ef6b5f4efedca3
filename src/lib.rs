// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Min-cut hypergraph bipartitioning with the Fiduccia-Mattheyses
//! iterative-improvement heuristic.
//!
//! Given a hypergraph of cells connected by nets, assign each cell to one
//! of two partitions so as to minimize the number of nets spanning both
//! partitions, subject to a balance constraint on partition sizes
//! (each side within `[floor(0.45 N), ceil(0.55 N)]`).
//!
//! # Architecture
//!
//! The implementation splits immutable topology from mutable solve state:
//!
//! ## Immutable
//!
//! - [`graph::Hypergraph`] - cells, nets, and pin adjacency, built once
//!   from the input and read-only thereafter
//!
//! ## Mutable
//!
//! State the solver rewrites on every move:
//!
//! - [`state::PartitionState`] - side assignments, per-side sizes, per-net
//!   pin counts, balance bounds
//! - [`bucket::GainBuckets`] - per-side O(1) max-gain selection and O(1)
//!   arbitrary removal, rebuilt once per pass
//!
//! # Algorithm
//!
//! [`solver::FmSolver`] runs passes until one fails to improve:
//!
//! 1. Recompute all gains and rebuild the buckets
//! 2. Repeatedly pop the best movable cell, check balance legality, move
//!    and lock it, and update the gains of its unlocked neighbors
//! 3. Roll back to the best in-bounds prefix of the pass's move record
//!
//! The first pass runs unconstrained and its best-prefix length caps
//! every later pass. [`cut::cut_size`] recomputes the cut from scratch,
//! independent of any bucket state.

pub mod bucket;
pub mod cut;
pub mod graph;
pub mod io;
pub mod solver;
pub mod state;

// Re-export commonly used types
pub use graph::{CellId, Hypergraph, MalformedInputError, NetId};
pub use solver::FmSolver;
pub use state::{PartitionState, Side};

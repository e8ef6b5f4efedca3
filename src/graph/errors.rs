// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error type for malformed inputs.
//!
//! All variants are fatal and reported before any solving begins.
//! Degenerate but well-formed inputs (empty graph, single cell,
//! disconnected graph) are not errors.

use std::fmt;

/// An input that cannot be turned into a valid hypergraph.
///
/// Net and cell numbers in the variants are 1-based, as they appear in the
/// input format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedInputError {
    /// Missing or non-numeric `num_nets num_cells` header line.
    Header { line: String },

    /// A cell index token that is not a positive integer.
    Token { net: usize, token: String },

    /// A net references a cell outside the declared range.
    CellIndexOutOfRange {
        net: usize,
        cell: usize,
        num_cells: usize,
    },

    /// A net with no incident cells.
    EmptyNet { net: usize },

    /// The input ended before the declared number of nets.
    TooFewNets { expected: usize, found: usize },
}

impl fmt::Display for MalformedInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedInputError::Header { line } => {
                write!(f, "Malformed header line {:?}: expected `num_nets num_cells`", line)
            }
            MalformedInputError::Token { net, token } => {
                write!(f, "Net {}: invalid cell index token {:?}", net, token)
            }
            MalformedInputError::CellIndexOutOfRange {
                net,
                cell,
                num_cells,
            } => {
                write!(
                    f,
                    "Net {}: cell index {} out of range 1..={}",
                    net, cell, num_cells
                )
            }
            MalformedInputError::EmptyNet { net } => {
                write!(f, "Net {} has no incident cells", net)
            }
            MalformedInputError::TooFewNets { expected, found } => {
                write!(f, "Expected {} nets but input ended after {}", expected, found)
            }
        }
    }
}

impl std::error::Error for MalformedInputError {}

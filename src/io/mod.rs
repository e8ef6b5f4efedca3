// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Line-oriented input format.
//!
//! The first line holds two integers, net count and cell count. Each
//! following line describes one net, in net order, as whitespace-separated
//! 1-based cell indices. Blank lines are skipped. Lines beyond the
//! declared net count are ignored.
//!
//! Indices are converted to 0-based internally; all errors report the
//! 1-based numbers as they appear in the input.

use crate::graph::{Hypergraph, MalformedInputError};

/// Parse the textual net-list format into a [`Hypergraph`].
///
/// # Errors
///
/// Returns [`MalformedInputError`] for a bad header, a non-numeric or
/// out-of-range cell index, or an input that ends before the declared
/// number of nets. Reported before any solving begins.
pub fn parse_hypergraph(text: &str) -> Result<Hypergraph, MalformedInputError> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let header = lines.next().unwrap_or("");
    let mut header_tokens = header.split_whitespace();
    let num_nets = parse_header_token(header, header_tokens.next())?;
    let num_cells = parse_header_token(header, header_tokens.next())?;
    if header_tokens.next().is_some() {
        return Err(MalformedInputError::Header {
            line: header.to_string(),
        });
    }

    let mut net_lists: Vec<Vec<u32>> = Vec::with_capacity(num_nets);
    for line in lines.take(num_nets) {
        let net = net_lists.len() + 1;
        let mut cells = Vec::new();
        for token in line.split_whitespace() {
            let raw: usize = token
                .parse()
                .map_err(|_| MalformedInputError::Token {
                    net,
                    token: token.to_string(),
                })?;
            if raw == 0 {
                return Err(MalformedInputError::CellIndexOutOfRange {
                    net,
                    cell: 0,
                    num_cells,
                });
            }
            cells.push((raw - 1) as u32);
        }
        net_lists.push(cells);
    }

    if net_lists.len() < num_nets {
        return Err(MalformedInputError::TooFewNets {
            expected: num_nets,
            found: net_lists.len(),
        });
    }

    Hypergraph::from_net_lists(num_cells, &net_lists)
}

fn parse_header_token(
    line: &str,
    token: Option<&str>,
) -> Result<usize, MalformedInputError> {
    token
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| MalformedInputError::Header {
            line: line.to_string(),
        })
}

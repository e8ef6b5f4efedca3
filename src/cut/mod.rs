// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Cut evaluator: recomputes the cut size from the partition state alone.
//!
//! Counts are rebuilt from scratch on every call, so the result does not
//! depend on bucket state or on where a pass left the incremental
//! counters. Safe to call at any point after a solve, and idempotent
//! between moves.

use crate::graph::Hypergraph;
use crate::state::PartitionState;

/// Number of nets with incident cells on both sides.
pub fn cut_size(graph: &Hypergraph, state: &mut PartitionState) -> usize {
    state.reset_net_counts(graph);
    graph.net_ids().filter(|&net| state.is_cut(net)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::CellId;

    #[test]
    fn test_uncut_at_start() {
        let g = Hypergraph::from_net_lists(3, &[vec![0, 1], vec![1, 2]]).unwrap();
        let mut s = PartitionState::new(&g);
        assert_eq!(cut_size(&g, &mut s), 0);
    }

    #[test]
    fn test_counts_cut_nets() {
        let g = Hypergraph::from_net_lists(3, &[vec![0, 1], vec![1, 2]]).unwrap();
        let mut s = PartitionState::new(&g);
        s.apply_move(&g, CellId::new(2));
        assert_eq!(cut_size(&g, &mut s), 1);
        s.apply_move(&g, CellId::new(1));
        assert_eq!(cut_size(&g, &mut s), 1); // net {1,2} healed, net {0,1} cut
    }

    #[test]
    fn test_idempotent() {
        let g = Hypergraph::from_net_lists(4, &[vec![0, 1, 2, 3]]).unwrap();
        let mut s = PartitionState::new(&g);
        s.apply_move(&g, CellId::new(0));
        let first = cut_size(&g, &mut s);
        let second = cut_size(&g, &mut s);
        assert_eq!(first, 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_graph() {
        let g = Hypergraph::from_net_lists(0, &[]).unwrap();
        let mut s = PartitionState::new(&g);
        assert_eq!(cut_size(&g, &mut s), 0);
    }
}

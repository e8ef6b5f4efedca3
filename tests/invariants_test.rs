// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Structural invariants exercised through the public API, on hand-built
//! and pseudo-randomly generated hypergraphs.

use fm_mincut::cut::cut_size;
use fm_mincut::{CellId, FmSolver, Hypergraph, PartitionState, Side};

/// Small deterministic LCG so the generated graphs are reproducible
/// without pulling randomness into the test.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 33) % bound
    }
}

fn random_graph(num_cells: usize, num_nets: usize, seed: u64) -> Hypergraph {
    let mut rng = Lcg(seed);
    let net_lists: Vec<Vec<u32>> = (0..num_nets)
        .map(|_| {
            let pins = 2 + rng.next(3) as usize;
            let mut cells: Vec<u32> = Vec::with_capacity(pins);
            while cells.len() < pins {
                let c = rng.next(num_cells as u64) as u32;
                if !cells.contains(&c) {
                    cells.push(c);
                }
            }
            cells
        })
        .collect();
    Hypergraph::from_net_lists(num_cells, &net_lists).unwrap()
}

fn assert_counts_conserved(graph: &Hypergraph, state: &PartitionState) {
    for net in graph.net_ids() {
        let total = state.net_count(net, Side::ZERO) + state.net_count(net, Side::ONE);
        assert_eq!(total as usize, graph.net(net).pin_count());
    }
    assert_eq!(
        state.size(Side::ZERO) + state.size(Side::ONE),
        graph.num_cells()
    );
}

#[test]
fn test_counts_conserved_under_arbitrary_moves() {
    let graph = random_graph(30, 20, 1);
    let mut state = PartitionState::new(&graph);
    let mut rng = Lcg(2);

    for _ in 0..200 {
        let cell = CellId::new(rng.next(30) as u32);
        state.apply_move(&graph, cell);
        assert_counts_conserved(&graph, &state);
    }
}

#[test]
fn test_every_move_is_involutive() {
    let graph = random_graph(25, 15, 3);
    let mut state = PartitionState::new(&graph);
    // Scramble first so involution is tested away from the start state.
    for c in [3u32, 7, 11, 19] {
        state.apply_move(&graph, CellId::new(c));
    }

    for cell in graph.cell_ids() {
        let side_before = state.side_of(cell);
        let counts_before: Vec<[u32; 2]> = graph
            .cell(cell)
            .nets()
            .iter()
            .map(|&n| [state.net_count(n, Side::ZERO), state.net_count(n, Side::ONE)])
            .collect();

        state.apply_move(&graph, cell);
        state.apply_move(&graph, cell);

        assert_eq!(state.side_of(cell), side_before);
        let counts_after: Vec<[u32; 2]> = graph
            .cell(cell)
            .nets()
            .iter()
            .map(|&n| [state.net_count(n, Side::ZERO), state.net_count(n, Side::ONE)])
            .collect();
        assert_eq!(counts_before, counts_after);
    }
}

#[test]
fn test_evaluator_idempotent_and_independent_of_moves_order() {
    let graph = random_graph(20, 12, 4);
    let mut state = PartitionState::new(&graph);
    for c in [0u32, 5, 9, 14] {
        state.apply_move(&graph, CellId::new(c));
    }
    let first = cut_size(&graph, &mut state);
    let second = cut_size(&graph, &mut state);
    assert_eq!(first, second);
}

#[test]
fn test_solve_preserves_invariants_and_balance() {
    for seed in 0..5 {
        let graph = random_graph(40, 30, 100 + seed);
        let lower = (0.45 * 40.0_f64).floor() as usize;
        let upper = (0.55 * 40.0_f64).ceil() as usize;

        let mut solver = FmSolver::new(graph);
        solver.solve();

        let [s0, s1] = solver.partition_sizes();
        assert_eq!(s0 + s1, 40);
        assert!(
            s0 >= lower && s0 <= upper,
            "seed {}: side 0 size {} outside [{}, {}]",
            seed,
            s0,
            lower,
            upper
        );

        // The cut never exceeds the net count and the evaluator agrees
        // with itself after the solve.
        let cut = solver.cut_size();
        assert!(cut <= 30);
        assert_eq!(cut, solver.cut_size());
    }
}

#[test]
fn test_solver_matches_exhaustive_optimum_on_small_graphs() {
    // 5 cells is small enough to enumerate all 2^5 assignments.
    let net_lists: Vec<Vec<u32>> = vec![vec![0, 1], vec![1, 2], vec![2, 3], vec![3, 4]];
    let graph = Hypergraph::from_net_lists(5, &net_lists).unwrap();
    let lower = (0.45 * 5.0_f64).floor() as usize; // 2
    let upper = (0.55 * 5.0_f64).ceil() as usize; // 3

    let mut best = usize::MAX;
    for mask in 0u32..32 {
        let size0 = (5 - mask.count_ones()) as usize;
        if size0 < lower || size0 > upper {
            continue;
        }
        let cut = net_lists
            .iter()
            .filter(|cells| {
                let on1 = cells.iter().filter(|&&c| mask & (1 << c) != 0).count();
                on1 > 0 && on1 < cells.len()
            })
            .count();
        best = best.min(cut);
    }
    assert_eq!(best, 1); // the chain must be split somewhere

    let mut solver = FmSolver::new(graph);
    solver.solve();
    assert_eq!(solver.cut_size(), best);
}

use csr_bench::{traverse_adjacency, traverse_csr, AdjacencyGraph, CsrGraph, Diagnostics, Footprint};
use proptest::prelude::*;

proptest! {
    #[test]
    fn csr_offsets_are_well_formed(n in 1usize..300, d in 1usize..40) {
        let adj = AdjacencyGraph::generate(n, d).unwrap();
        let csr = CsrGraph::from_adjacency(&adj).unwrap();
        let ia = csr.offsets();

        prop_assert_eq!(ia.len(), n + 1);
        prop_assert_eq!(ia[0], 0);
        prop_assert_eq!(ia[n], n * d);
        prop_assert!(ia.windows(2).all(|w| w[0] <= w[1]));
        prop_assert_eq!(csr.columns().len(), n * d);
        prop_assert_eq!(csr.values().len(), n * d);
    }

    #[test]
    fn csr_rows_match_adjacency_rows(n in 1usize..200, d in 1usize..32) {
        let adj = AdjacencyGraph::generate(n, d).unwrap();
        let csr = CsrGraph::from_adjacency(&adj).unwrap();
        let (ia, ja, va) = (csr.offsets(), csr.columns(), csr.values());

        for i in 0..n {
            let row = &ja[ia[i]..ia[i + 1]];
            prop_assert_eq!(row, adj.neighbors(i));
            prop_assert!(row.windows(2).all(|w| w[0] <= w[1]));
            prop_assert!(row.iter().all(|&v| v < n));
            prop_assert_eq!(ja[ia[i]], 0);
            prop_assert_eq!(&va[ia[i]..ia[i + 1]], adj.values(i));
        }
    }

    #[test]
    fn traversals_sum_to_vertex_count(n in 1usize..500, d in 1usize..16, verbose in any::<bool>()) {
        let adj = AdjacencyGraph::generate(n, d).unwrap();
        let csr = CsrGraph::from_adjacency(&adj).unwrap();
        let mode = Diagnostics::from_verbose(verbose);
        prop_assert_eq!(traverse_adjacency(&adj, mode).sum, n);
        prop_assert_eq!(traverse_csr(&csr, mode).sum, n);
    }

    #[test]
    fn memory_ratio_matches_closed_form(n in 1usize..2_000_000, d in 1usize..256) {
        let expected = ((n + 1) + 2 * n * d) as f64 / (2 * n * d) as f64;
        let got = Footprint::analytic(n, d).ratio();
        prop_assert!((got - expected).abs() <= 1e-12 * expected);
        prop_assert!(got > 1.0);
    }
}

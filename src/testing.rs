//! Instance generators and tests that compare the solvers with each other.

use crate::graph::MultiGraph;
use rand::seq::SliceRandom;
use rand::Rng;

/// Cycle on the nodes `0..n`.
pub fn cycle_graph(n: usize) -> MultiGraph {
    MultiGraph::from_edges(n, (0..n).map(|i| (i, (i + 1) % n))).unwrap()
}

/// Complete graph on the nodes `0..n`.
pub fn complete_graph(n: usize) -> MultiGraph {
    let edges = (0..n).flat_map(|i| (i + 1..n).map(move |j| (i, j)));
    MultiGraph::from_edges(n, edges).unwrap()
}

/// Splits `k >= 1` into a random sum of positive parts.
fn split(rng: &mut impl Rng, k: usize) -> Vec<usize> {
    let mut parts = Vec::new();
    let mut rest = k;
    while rest > 0 {
        let part = rng.gen_range(1..=rest);
        parts.push(part);
        rest -= part;
    }
    parts
}

/// Random instance whose minimum feedback vertex set has exactly `k >= 1` nodes: paths, cycles
/// (one node each) and complete graphs `K_{j+2}` (`j` nodes each) in random order, chained by
/// single edges.
pub fn planted_instance(rng: &mut impl Rng, k: usize) -> MultiGraph {
    let num_paths = rng.gen_range(0..=k);
    let num_cycles = rng.gen_range(0..k);
    // (number of nodes, edges) of every piece
    let mut pieces: Vec<(usize, Vec<(usize, usize)>)> = Vec::new();
    for _ in 0..num_paths {
        let n = rng.gen_range(1..=k);
        pieces.push((n, (1..n).map(|i| (i - 1, i)).collect()));
    }
    for _ in 0..num_cycles {
        let n = rng.gen_range(3..=k + 3);
        pieces.push((n, cycle_graph(n).edges().map(|(u, v, _)| (u, v)).collect()));
    }
    for part in split(rng, k - num_cycles) {
        let n = part + 2;
        pieces.push((n, complete_graph(n).edges().map(|(u, v, _)| (u, v)).collect()));
    }
    pieces.shuffle(rng);

    let total = pieces.iter().map(|(n, _)| n).sum();
    let mut edges = Vec::new();
    let mut offset = 0;
    for (n, piece) in pieces {
        if offset > 0 {
            edges.push((offset - 1, offset));
        }
        edges.extend(piece.into_iter().map(|(u, v)| (u + offset, v + offset)));
        offset += n;
    }
    MultiGraph::from_edges(total, edges).unwrap()
}

/// Random multigraph: every pair is joined with probability `p`, and joined pairs get a parallel
/// edge with probability `p_parallel`.
pub fn random_multigraph(rng: &mut impl Rng, n: usize, p: f64, p_parallel: f64) -> MultiGraph {
    let mut graph = MultiGraph::new(n);
    for i in 0..n {
        for j in i + 1..n {
            if rng.gen_bool(p) {
                let mult = if rng.gen_bool(p_parallel) { 2 } else { 1 };
                graph.add_edge_with_multiplicity(i, j, mult).unwrap();
            }
        }
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forest::{is_forest, is_fvs};
    use crate::{fvs_disjoint, fvs_via_compression, fvs_via_ic, fvs_via_mif, max_induced_forest, ForestBound};
    use fxhash::FxHashSet;
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    type Solver = fn(&MultiGraph, usize) -> Result<Option<FxHashSet<usize>>, crate::cust_error::ProcessingError>;

    const SOLVERS: [(&str, Solver); 3] = [
        ("compression", fvs_via_compression),
        ("ic", fvs_via_ic),
        ("mif", fvs_via_mif),
    ];

    /// Size of a smallest feedback vertex set, by trying all subsets in order of size.
    fn brute_force_minimum(graph: &MultiGraph) -> usize {
        let nodes: Vec<usize> = graph.nodes().collect();
        (0..=nodes.len())
            .find(|size| {
                nodes.iter()
                    .copied()
                    .combinations(*size)
                    .any(|subset| is_fvs(graph, &subset.into_iter().collect()))
            })
            .unwrap_or(nodes.len())
    }

    fn assert_solves(graph: &MultiGraph, k: usize) {
        for (name, solver) in SOLVERS {
            let solution = solver(graph, k).unwrap();
            assert!(solution.is_some(), "{} found no solution for k = {}", name, k);
            let solution = solution.unwrap();
            assert!(solution.len() <= k, "{} returned {} nodes for k = {}", name, solution.len(), k);
            assert!(is_fvs(graph, &solution), "{} returned no feedback vertex set", name);
        }
    }

    fn assert_unsolvable(graph: &MultiGraph, k: usize) {
        for (name, solver) in SOLVERS {
            assert!(solver(graph, k).unwrap().is_none(), "{} found a solution for k = {}", name, k);
        }
    }

    #[test]
    fn five_cycle_test() {
        let graph = cycle_graph(5);
        assert_solves(&graph, 1);
        assert_unsolvable(&graph, 0);
        for (_, solver) in SOLVERS {
            assert_eq!(solver(&graph, 1).unwrap().map(|s| s.len()), Some(1));
        }
    }

    #[test]
    fn complete_five_test() {
        let graph = complete_graph(5);
        assert_solves(&graph, 3);
        assert_unsolvable(&graph, 2);
    }

    #[test]
    fn dense_five_test() {
        let edges = vec![(1, 2), (2, 3), (3, 4), (4, 5), (5, 1), (1, 3), (1, 4), (2, 4)];
        let graph = MultiGraph::from_edges(5, edges.into_iter().map(|(u, v)| (u - 1, v - 1))).unwrap();
        assert_solves(&graph, 2);
        assert_unsolvable(&graph, 1);
    }

    #[test]
    fn cycles_and_cliques_test() {
        for n in 3..12 {
            let cycle = cycle_graph(n);
            assert_solves(&cycle, 1);
            assert_unsolvable(&cycle, 0);
        }
        for n in 3..8 {
            let clique = complete_graph(n);
            assert_solves(&clique, n - 2);
            assert_unsolvable(&clique, n - 3);
        }
    }

    #[test]
    fn planted_instances_test() {
        let mut rng = Pcg64Mcg::seed_from_u64(1234);
        for k in 1..=3 {
            for _ in 0..6 {
                let graph = planted_instance(&mut rng, k);
                assert_solves(&graph, k);
                assert_unsolvable(&graph, k - 1);
            }
        }
    }

    #[test]
    fn random_agreement_test() {
        let mut rng = Pcg64Mcg::seed_from_u64(4321);
        for _ in 0..25 {
            let graph = random_multigraph(&mut rng, 9, 0.3, 0.15);
            let forest = max_induced_forest(&graph, ForestBound::Unbounded).unwrap().unwrap();
            assert!(is_forest(&graph, &forest));
            let minimum = graph.num_nodes() - forest.len();
            assert!(fvs_via_ic(&graph, minimum).unwrap().is_some());
            if minimum > 0 {
                assert!(fvs_via_ic(&graph, minimum - 1).unwrap().is_none());
            }
            // monotone in k
            for k in minimum..=minimum + 2 {
                for (_, solver) in SOLVERS {
                    assert!(solver(&graph, k).unwrap().is_some());
                }
            }
        }
    }

    #[test]
    fn brute_force_agreement_test() {
        let mut rng = Pcg64Mcg::seed_from_u64(2024);
        for round in 0..150 {
            let n = rng.gen_range(2..=10);
            let p = rng.gen_range(0.2..0.6);
            let mut graph = random_multigraph(&mut rng, n, p, 0.1);
            // A few edges of multiplicity 3.
            if round % 5 == 0 {
                let doubled: Vec<(usize, usize)> = graph.edges()
                    .filter(|(_, _, mult)| *mult == 2)
                    .map(|(u, v, _)| (u, v))
                    .collect();
                for (u, v) in doubled {
                    graph.add_edge(u, v).unwrap();
                }
            }
            let minimum = brute_force_minimum(&graph);

            let forest = max_induced_forest(&graph, ForestBound::Unbounded).unwrap().unwrap();
            assert!(is_forest(&graph, &forest));
            assert_eq!(forest.len(), n - minimum, "maximum induced forest of {:?}", graph);

            assert_solves(&graph, minimum);
            assert_solves(&graph, minimum + 1);
            if minimum > 0 {
                assert_unsolvable(&graph, minimum - 1);
            }
        }
    }

    #[test]
    fn disjoint_avoids_solution_test() {
        let mut rng = Pcg64Mcg::seed_from_u64(99);
        for _ in 0..15 {
            let graph = random_multigraph(&mut rng, 8, 0.35, 0.1);
            let n = graph.num_nodes();
            let minimum = n - max_induced_forest(&graph, ForestBound::Unbounded).unwrap().unwrap().len();
            let solution = fvs_via_ic(&graph, minimum).unwrap().unwrap();
            // The rest of the graph is a forest, so a disjoint solution exists iff the solution
            // itself induces a forest.
            let disjoint = fvs_disjoint(&graph, &solution, n).unwrap();
            assert_eq!(disjoint.is_some(), is_forest(&graph, &solution));
            if let Some(disjoint) = disjoint {
                assert!(is_fvs(&graph, &disjoint));
                assert!(disjoint.is_disjoint(&solution));
            }
        }
    }
}

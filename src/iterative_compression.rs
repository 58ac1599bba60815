//! Iterative compression for the feedback vertex set problem.
//!
//! The graph is built up node by node (in ascending order). A solution for the graph induced by the
//! nodes seen so far is kept; adding a node to the graph and to the solution may grow it to `k+1`
//! nodes, in which case it is compressed back to at most `k` nodes with the disjoint solver. If the
//! compression fails for an induced subgraph, it fails for the whole graph as well.

use crate::bounded_search::fvs_disjoint;
use crate::graph::MultiGraph;
use crate::cust_error::ProcessingError;
use fxhash::FxHashSet;
use itertools::Itertools;
use log::debug;

/// Returns a feedback vertex set of `graph` with at most `k` nodes, or `None` if none exists.
/// A graph with at most `k` nodes gets all of its nodes as the solution.
pub fn fvs_via_ic(graph: &MultiGraph, k: usize) -> Result<Option<FxHashSet<usize>>, ProcessingError> {
    let nodes: Vec<usize> = graph.nodes().collect();
    if nodes.len() <= k {
        return Ok(Some(nodes.into_iter().collect()))
    }
    let mut working: FxHashSet<usize> = nodes[..k].iter().copied().collect();
    let mut solution = working.clone();
    for &node in &nodes[k..] {
        working.insert(node);
        solution.insert(node);
        if solution.len() <= k {
            continue
        }
        let subgraph = graph.induced_subgraph(&working);
        match ic_compression(&subgraph, &solution, k)? {
            Some(compressed) => {
                debug!("compressed solution after adding node {} ({}/{} nodes)", node, working.len(), nodes.len());
                solution = compressed;
            },
            None => {
                debug!("no solution with {} nodes after adding node {}", k, node);
                return Ok(None)
            },
        }
    }
    Ok(Some(solution))
}

/// Same as `fvs_via_ic()`.
pub fn fvs_via_compression(graph: &MultiGraph, k: usize) -> Result<Option<FxHashSet<usize>>, ProcessingError> {
    fvs_via_ic(graph, k)
}

/// Compresses the feedback vertex set `solution` of `graph` with `k+1` nodes to one with at most
/// `k` nodes.
///
/// For every subset `Z` of `solution` with at most `k` nodes (smallest first) the disjoint solver
/// looks for a solution of `graph - Z` with `k - |Z|` nodes that avoids `solution - Z`. The first
/// hit together with `Z` is returned.
pub fn ic_compression(graph: &MultiGraph, solution: &FxHashSet<usize>, k: usize) -> Result<Option<FxHashSet<usize>>, ProcessingError> {
    if solution.len() > k + 1 {
        return Err(ProcessingError::InvalidParameter(format!(
            "a solution with {} nodes can not be compressed to {} nodes", solution.len(), k
        )))
    }
    let members: Vec<usize> = solution.iter().copied().sorted_unstable().collect();
    for size in 0..=k.min(members.len()) {
        for removed in members.iter().copied().combinations(size) {
            let removed: FxHashSet<usize> = removed.into_iter().collect();
            let kept: FxHashSet<usize> = solution.difference(&removed).copied().collect();
            let mut reduced = graph.clone();
            reduced.delete_nodes(&removed);
            if let Some(mut compressed) = fvs_disjoint(&reduced, &kept, k - size)? {
                compressed.extend(removed);
                if compressed.len() > k {
                    return Err(ProcessingError::InvariantViolation(format!(
                        "compression returned {} nodes for k = {}", compressed.len(), k
                    )))
                }
                return Ok(Some(compressed))
            }
        }
    }
    Ok(None)
}

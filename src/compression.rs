//! Node compression and the generalized degree used by the maximum induced forest solver.

use crate::graph::MultiGraph;
use crate::cust_error::ProcessingError;
use fxhash::{FxHashMap, FxHashSet};

/// Contracts all nodes of `set` into `rep` (which is inserted if it does not exist). Edges from
/// `set` to nodes outside of `set + rep` are moved to `rep`, multiplicities add up. Edges inside of
/// `set + rep` vanish.
pub fn contract(graph: &MultiGraph, set: &FxHashSet<usize>, rep: usize) -> Result<MultiGraph, ProcessingError> {
    let mut contracted = graph.clone();
    contracted.insert_node(rep);
    let mut moved: FxHashMap<usize, usize> = FxHashMap::default();
    for node in set.iter().filter(|node| **node != rep) {
        if let Some(neighs) = contracted.delete_node(*node) {
            for (neigh, mult) in neighs {
                if neigh != rep && !set.contains(&neigh) {
                    *moved.entry(neigh).or_insert(0) += mult;
                }
            }
        }
    }
    for (neigh, mult) in moved {
        contracted.add_edge_with_multiplicity(rep, neigh, mult)?;
    }
    Ok(contracted)
}

/// Contracts `set` into `rep` and afterwards deletes every neighbor that is joined to `rep` by
/// parallel edges: such a neighbor closes a cycle with any forest containing `set + rep`.
/// Returns the compressed graph and the deleted neighbors. `graph` is not altered.
pub fn compress(graph: &MultiGraph, set: &FxHashSet<usize>, rep: usize) -> Result<(MultiGraph, FxHashSet<usize>), ProcessingError> {
    let mut compressed = contract(graph, set, rep)?;
    let removed: FxHashSet<usize> = compressed
        .neighbors(rep)
        .map(|neighs| {
            neighs.iter()
                .filter(|(_, mult)| **mult >= 2)
                .map(|(neigh, _)| *neigh)
                .collect()
        })
        .unwrap_or_default();
    compressed.delete_nodes(&removed);
    Ok((compressed, removed))
}

/// Computes the generalized degree of `node` with respect to the forest `forest` and the active
/// node `active`: the neighbors of `node` in `forest` (other than `active`) are contracted into
/// `node`, then the edges from `node` to nodes other than `active` are counted.
///
/// Returns the count and the distinct neighbors. A neighbor joined by parallel edges is counted
/// once per edge. Neither `graph` nor `forest` is altered.
pub fn generalized_degree(graph: &MultiGraph, forest: &FxHashSet<usize>, active: usize, node: usize) -> Result<(usize, FxHashSet<usize>), ProcessingError> {
    let merged: FxHashSet<usize> = graph
        .neighbors(node)
        .map(|neighs| {
            neighs.keys()
                .filter(|neigh| **neigh != active && forest.contains(*neigh))
                .copied()
                .collect()
        })
        .unwrap_or_default();
    let contracted = contract(graph, &merged, node)?;
    let mut count = 0;
    let mut neighbors = FxHashSet::default();
    if let Some(neighs) = contracted.neighbors(node) {
        for (neigh, mult) in neighs.iter().filter(|(neigh, _)| **neigh != active) {
            count += mult;
            neighbors.insert(*neigh);
        }
    }
    Ok((count, neighbors))
}

//! Forest checks on induced subgraphs. A parallel edge counts as a cycle of length two.

use crate::graph::MultiGraph;
use fxhash::{FxHashMap, FxHashSet};

/// Disjoint set forest over node ids, with path halving.
struct UnionFind {
    parent: FxHashMap<usize, usize>,
}

impl UnionFind {

    fn new() -> Self {
        UnionFind {
            parent: FxHashMap::default(),
        }
    }

    fn find(&mut self, node: usize) -> usize {
        let mut current = node;
        loop {
            let parent = *self.parent.entry(current).or_insert(current);
            if parent == current {
                return current
            }
            let grand = *self.parent.entry(parent).or_insert(parent);
            self.parent.insert(current, grand);
            current = grand;
        }
    }

    /// Joins the sets of `a` and `b`. Returns `false` if they were already joined.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (root_a, root_b) = (self.find(a), self.find(b));
        if root_a == root_b {
            return false
        }
        self.parent.insert(root_a, root_b);
        true
    }
}

/// Checks if the subgraph induced by the nodes accepted by `member` is a forest.
fn is_forest_where<F: Fn(usize) -> bool>(graph: &MultiGraph, member: F) -> bool {
    let mut sets = UnionFind::new();
    for (src, trg, mult) in graph.edges() {
        if !member(src) || !member(trg) {
            continue
        }
        if mult > 1 || !sets.union(src, trg) {
            return false
        }
    }
    true
}

/// Checks if `graph[subset]` is a forest. Nodes of `subset` that are not in `graph` are ignored.
pub fn is_forest(graph: &MultiGraph, subset: &FxHashSet<usize>) -> bool {
    is_forest_where(graph, |node| subset.contains(&node))
}

/// Checks if `graph` minus `removed` is a forest.
pub fn is_forest_complement(graph: &MultiGraph, removed: &FxHashSet<usize>) -> bool {
    is_forest_where(graph, |node| !removed.contains(&node))
}

/// Checks if `solution` is a feedback vertex set of `graph`, i.e. if removing it leaves a forest.
pub fn is_fvs(graph: &MultiGraph, solution: &FxHashSet<usize>) -> bool {
    is_forest_complement(graph, solution)
}

use crate::graph::MultiGraph;
use crate::cust_error::ProcessingError;
use fxhash::FxHashSet;

/// An instance of the disjoint feedback vertex set problem: find at most `k` nodes outside of
/// `exempt` whose removal leaves `graph` a forest.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct DisjointInstance {
    pub graph: MultiGraph,
    /// Nodes that may not be part of the solution. `graph[exempt]` has to be a forest.
    pub exempt: FxHashSet<usize>,
    /// Remaining budget. Does not include the nodes in `solution`.
    pub k: usize,
    /// Nodes that were forced or chosen into the solution and are no longer in `graph`.
    pub solution: FxHashSet<usize>,
}

impl DisjointInstance {

    pub fn new(graph: MultiGraph, exempt: FxHashSet<usize>, k: usize) -> Self {
        DisjointInstance {
            graph,
            exempt,
            k,
            solution: FxHashSet::default(),
        }
    }

    /// Adds `node` to `self.solution`, removes it from `self.graph` and spends one unit of the
    /// budget.
    /// Returns `false` if `node` does not exist, is exempt, or the budget is exhausted.
    pub fn add_to_solution(&mut self, node: usize) -> bool {
        if self.k == 0 || self.exempt.contains(&node) {
            return false
        }
        if self.graph.delete_node(node).is_some() {
            self.solution.insert(node);
            self.k -= 1;
            return true
        }
        false
    }

    /// Removes `node` from `self.graph` (and from `self.exempt`).
    /// Returns `true` if a node was removed, returns `false` otherwise.
    pub fn delete_node(&mut self, node: usize) -> bool {
        self.exempt.remove(&node);
        self.graph.delete_node(node).is_some()
    }

    /// Removes `node` and connects its two neighbors `neighs` by a new edge.
    pub fn bypass_node(&mut self, node: usize, neighs: (usize, usize)) -> Result<(), ProcessingError> {
        if !self.delete_node(node) {
            return Err(ProcessingError::InvalidParameter("`node` was not contained in the graph.".to_owned()))
        }
        self.graph.add_edge(neighs.0, neighs.1)
    }

    /// Moves `node` into the exempt set.
    pub fn exempt_node(&mut self, node: usize) {
        self.exempt.insert(node);
    }

    /// Returns the degree of `node` in `graph` minus `exempt` (parallel edges counted), or `None`
    /// if `node` is exempt or does not exist.
    pub fn free_degree(&self, node: usize) -> Option<usize> {
        if self.exempt.contains(&node) {
            return None
        }
        self.graph.neighbors(node).map(|neighs| {
            neighs.iter()
                .filter(|(neigh, _)| !self.exempt.contains(*neigh))
                .map(|(_, mult)| mult)
                .sum()
        })
    }
}

//! Implementation of the bounded search tree algorithm for the disjoint feedback vertex set
//! problem.

use crate::fvs_instance::DisjointInstance;
use crate::graph::MultiGraph;
use crate::forest::is_forest;
use crate::cust_error::ProcessingError;
use fxhash::FxHashSet;
use log::trace;

/// Looks for a feedback vertex set of `graph` with at most `k` nodes that avoids `exempt`.
///
/// Returns `Ok(None)` if no such set exists, in particular if `graph[exempt]` is not a forest.
/// `exempt` has to be a subset of the nodes of `graph`.
///
/// The search branches on a node that has degree at most 1 in `graph - exempt`. Such a node
/// exists after the reductions whenever `graph - exempt` is a forest (as it is for every call made
/// by the iterative compression), otherwise an `InvariantViolation` may be returned.
pub fn fvs_disjoint(graph: &MultiGraph, exempt: &FxHashSet<usize>, k: usize) -> Result<Option<FxHashSet<usize>>, ProcessingError> {
    if let Some(node) = exempt.iter().find(|node| !graph.contains(**node)) {
        return Err(ProcessingError::InvalidParameter(format!("exempt node {} is not contained in the graph", node)))
    }
    DisjointInstance::new(graph.clone(), exempt.clone(), k).branch_and_reduce()
}

impl DisjointInstance {

    /// A recursive branch and reduce algorithm. In every branching step, the algorithm does the
    /// following:
    /// 1. Rejects the instance if `G[W]` is not a forest.
    /// 2. Reduces the instance by exhaustively applying the reduction rules. Rejects it if the
    ///    budget did not suffice for the forced nodes.
    /// 3. If the graph is reduced to an empty graph, the forced nodes are a solution.
    /// 4. Picks the smallest node `x` outside of `W` with degree at most 1 in `G - W` and branches:
    ///    first `x` joins the solution (on a copy of the instance), then `x` joins `W`.
    pub fn branch_and_reduce(mut self) -> Result<Option<FxHashSet<usize>>, ProcessingError> {
        if !is_forest(&self.graph, &self.exempt) {
            return Ok(None)
        }
        if !self.apply_reductions()? {
            return Ok(None)
        }
        if self.graph.is_empty() {
            return Ok(Some(self.solution))
        }
        let node = self.branching_node().ok_or_else(|| {
            ProcessingError::InvariantViolation(format!(
                "no node of degree <= 1 outside of the exempt set in a reduced graph with {} nodes",
                self.graph.num_nodes()
            ))
        })?;
        if self.k > 0 {
            let mut left = self.clone();
            left.take_branching_node(node)?;
            trace!("branch: {} into the solution, k = {}", node, left.k);
            if let Some(solution) = left.branch_and_reduce()? {
                return Ok(Some(solution))
            }
        }
        trace!("branch: {} into the exempt set", node);
        self.exempt_node(node);
        self.branch_and_reduce()
    }

    /// Puts the branching node `node` into the solution. The node has to be a non-exempt node of
    /// the graph and the budget must not be exhausted.
    fn take_branching_node(&mut self, node: usize) -> Result<(), ProcessingError> {
        if self.add_to_solution(node) {
            return Ok(())
        }
        Err(ProcessingError::InvariantViolation(format!(
            "branching node {} can not join the solution (k = {}, exempt: {})",
            node, self.k, self.exempt.contains(&node)
        )))
    }

    /// Returns the smallest node outside of `W` that has degree at most 1 in `G - W`.
    fn branching_node(&self) -> Option<usize> {
        self.graph
            .nodes()
            .find(|node| self.free_degree(*node).map_or(false, |degree| degree <= 1))
    }
}

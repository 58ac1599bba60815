//! Maximum induced forest by branching on generalized degrees, and the feedback vertex set
//! solver built on it: the complement of a maximum induced forest is a minimum feedback vertex set.
//!
//! An instance carries the graph, a set `forest` of nodes that are fixed to be in the induced
//! forest, an optional active node of `forest` the branching is anchored at, and a slack: the
//! number of nodes that may still be left out of the forest. Every call first makes `forest`
//! independent by compressing its components, then either splits a disconnected graph or branches
//! on a neighbor of the active node.

use crate::compression::{compress, generalized_degree};
use crate::forest::is_forest;
use crate::graph::MultiGraph;
use crate::cust_error::ProcessingError;
use fxhash::FxHashSet;
use log::trace;

/// Lower bound on the size of the induced forest a search has to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForestBound {
    Unbounded,
    AtLeast(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MifInstance {
    pub graph: MultiGraph,
    /// Nodes fixed to be in the forest. `graph[forest]` is a forest.
    pub forest: FxHashSet<usize>,
    pub active: Option<usize>,
    /// Number of nodes of `graph` that may still be left out of the forest.
    pub slack: usize,
}

/// Returns a maximum set of nodes inducing a forest in `graph`, or `None` if it is smaller than
/// `bound` demands.
pub fn max_induced_forest(graph: &MultiGraph, bound: ForestBound) -> Result<Option<FxHashSet<usize>>, ProcessingError> {
    let n = graph.num_nodes();
    let slack = match bound {
        ForestBound::Unbounded => n,
        ForestBound::AtLeast(target) => match n.checked_sub(target) {
            Some(slack) => slack,
            None => return Ok(None),
        },
    };
    MifInstance::new(graph.clone(), slack).solve()
}

/// Returns a feedback vertex set of `graph` with at most `k` nodes, or `None` if none exists.
pub fn fvs_via_mif(graph: &MultiGraph, k: usize) -> Result<Option<FxHashSet<usize>>, ProcessingError> {
    let target = graph.num_nodes().saturating_sub(k);
    let forest = max_induced_forest(graph, ForestBound::AtLeast(target))?;
    Ok(forest.map(|forest| graph.nodes().filter(|node| !forest.contains(node)).collect()))
}

impl MifInstance {

    pub fn new(graph: MultiGraph, slack: usize) -> Self {
        MifInstance {
            graph,
            forest: FxHashSet::default(),
            active: None,
            slack,
        }
    }

    /// Returns a maximum induced forest of `self.graph` that contains `self.forest` and leaves out
    /// at most `self.slack` nodes, or `None` if there is none.
    pub fn solve(mut self) -> Result<Option<FxHashSet<usize>>, ProcessingError> {
        if !is_forest(&self.graph, &self.forest) {
            return Err(ProcessingError::InvariantViolation("the fixed forest nodes induce a cycle".to_owned()))
        }
        let folded = match self.enforce_independence()? {
            Some(folded) => folded,
            None => return Ok(None),
        };
        Ok(self.branch()?.map(|mut forest| {
            forest.extend(folded);
            forest
        }))
    }

    /// Spends slack on `count` nodes that can not be part of the forest.
    /// Returns `false` if the slack does not suffice.
    fn drop_nodes(&mut self, count: usize) -> bool {
        match self.slack.checked_sub(count) {
            Some(slack) => {
                self.slack = slack;
                true
            },
            None => false,
        }
    }

    /// Makes `self.forest` an independent set: nodes joined to the forest by parallel edges are
    /// deleted and every component of `graph[forest]` with more than one node is compressed into a
    /// single representative (the active node if it is part of the component).
    ///
    /// Returns the nodes that were contracted away, they belong to every solution of `self`, or
    /// `None` if the deleted nodes exceed the slack.
    fn enforce_independence(&mut self) -> Result<Option<FxHashSet<usize>>, ProcessingError> {
        let mut folded = FxHashSet::default();
        loop {
            let doubled: FxHashSet<usize> = self.forest
                .iter()
                .filter_map(|node| self.graph.neighbors(*node))
                .flat_map(|neighs| neighs.iter())
                .filter(|(neigh, mult)| **mult >= 2 && !self.forest.contains(*neigh))
                .map(|(neigh, _)| *neigh)
                .collect();
            if !self.drop_nodes(doubled.len()) {
                return Ok(None)
            }
            self.graph.delete_nodes(&doubled);

            let components: Vec<FxHashSet<usize>> = self.graph
                .components_in(&self.forest)
                .into_iter()
                .filter(|component| component.len() > 1)
                .collect();
            if components.is_empty() {
                return Ok(Some(folded))
            }
            for component in components {
                let rep = match self.active {
                    Some(active) if component.contains(&active) => active,
                    _ => match component.iter().min() {
                        Some(smallest) => *smallest,
                        None => continue,
                    },
                };
                let (graph, removed) = compress(&self.graph, &component, rep)?;
                if !self.drop_nodes(removed.len()) {
                    return Ok(None)
                }
                trace!("compressed {} forest nodes into {}, dropped {} nodes", component.len(), rep, removed.len());
                self.graph = graph;
                for node in component.into_iter().filter(|node| *node != rep) {
                    self.forest.remove(&node);
                    folded.insert(node);
                }
            }
        }
    }

    /// Derives an instance on `graph`, a subgraph of `self.graph`. The slack is reduced by the
    /// number of missing nodes. Returns `None` if the slack does not suffice.
    fn derive(&self, graph: MultiGraph, forest: FxHashSet<usize>, active: Option<usize>) -> Option<MifInstance> {
        let dropped = self.graph.num_nodes().checked_sub(graph.num_nodes())?;
        let slack = self.slack.checked_sub(dropped)?;
        Some(MifInstance {
            graph,
            forest,
            active,
            slack,
        })
    }

    /// Expects `self.forest` to be independent.
    fn branch(self) -> Result<Option<FxHashSet<usize>>, ProcessingError> {
        let n = self.graph.num_nodes();
        if n == 0 {
            return Ok(Some(FxHashSet::default()))
        }
        if self.graph.disconnected() {
            return self.solve_components()
        }
        if self.forest.len() == n {
            return Ok(Some(self.forest))
        }
        if self.forest.is_empty() {
            return self.branch_on_max_degree()
        }
        let active = match self.active.filter(|active| self.forest.contains(active)) {
            Some(active) => active,
            None => match self.forest.iter().min() {
                Some(smallest) => *smallest,
                None => return Ok(None),
            },
        };

        let mut safe = None;
        let mut high = None;
        let mut two = None;
        for neigh in self.graph.sorted_neighbors(active) {
            let (degree, neighbors) = generalized_degree(&self.graph, &self.forest, active, neigh)?;
            if degree <= 1 {
                safe = Some(neigh);
                break
            } else if degree >= 3 {
                high = high.or(Some(neigh));
            } else if two.is_none() {
                two = Some((neigh, neighbors));
            }
        }

        if let Some(node) = safe {
            trace!("node {} joins the forest of {}", node, active);
            let mut forest = self.forest;
            forest.insert(node);
            return MifInstance { graph: self.graph, forest, active: Some(active), slack: self.slack }.solve()
        }
        if let Some(node) = high {
            trace!("branch on node {} with generalized degree >= 3", node);
            let mut forest = self.forest.clone();
            forest.insert(node);
            let include = self.derive(self.graph.clone(), forest, Some(active));
            let mut without = self.graph.clone();
            without.delete_node(node);
            let exclude = self.derive(without, self.forest.clone(), Some(active));
            return self.best_of(vec![include, exclude])
        }
        if let Some((node, neighbors)) = two {
            trace!("branch on node {} with generalized degree 2", node);
            let mut forest = self.forest.clone();
            forest.insert(node);
            let include = self.derive(self.graph.clone(), forest, Some(active));
            let mut without = self.graph.clone();
            without.delete_node(node);
            let mut forest = self.forest.clone();
            forest.extend(neighbors);
            // Taking both neighbors must not close a cycle.
            let exclude = if is_forest(&without, &forest) {
                self.derive(without, forest, Some(active))
            } else {
                None
            };
            return self.best_of(vec![include, exclude])
        }
        Err(ProcessingError::InvariantViolation(format!(
            "active node {} has no neighbor in a connected graph with {} nodes", active, n
        )))
    }

    /// Starts a search without fixed forest nodes: if the maximum degree is at most 1 the whole
    /// (connected) graph is a forest, otherwise the maximum degree node is either fixed in the
    /// forest or deleted.
    fn branch_on_max_degree(self) -> Result<Option<FxHashSet<usize>>, ProcessingError> {
        let node = match self.graph.max_degree_node() {
            Some(node) => node,
            None => return Ok(Some(FxHashSet::default())),
        };
        if self.graph.degree(node).unwrap_or(0) <= 1 {
            return Ok(Some(self.graph.nodes().collect()))
        }
        trace!("branch on max degree node {}", node);
        let include = self.derive(self.graph.clone(), [node].into_iter().collect(), Some(node));
        let mut without = self.graph.clone();
        without.delete_node(node);
        let exclude = self.derive(without, FxHashSet::default(), None);
        self.best_of(vec![include, exclude])
    }

    /// Solves the branches in order and returns the largest forest. Once a forest is known, later
    /// branches only search for strictly larger ones.
    fn best_of(&self, branches: Vec<Option<MifInstance>>) -> Result<Option<FxHashSet<usize>>, ProcessingError> {
        let n = self.graph.num_nodes();
        let mut best: Option<FxHashSet<usize>> = None;
        for mut branch in branches.into_iter().flatten() {
            if let Some(forest) = &best {
                let lost = n - forest.len();
                let dropped = n - branch.graph.num_nodes();
                match lost.checked_sub(dropped + 1) {
                    Some(limit) => branch.slack = branch.slack.min(limit),
                    None => continue,
                }
            }
            if let Some(forest) = branch.solve()? {
                best = Some(forest);
            }
        }
        Ok(best)
    }

    /// Solves every connected component on its own. The slack left out by a component is not
    /// available to the following ones.
    fn solve_components(self) -> Result<Option<FxHashSet<usize>>, ProcessingError> {
        let mut slack = self.slack;
        let mut forest = FxHashSet::default();
        for (component, graph) in self.graph.split_into_connected() {
            let size = component.len();
            let sub = MifInstance {
                graph,
                forest: self.forest.intersection(&component).copied().collect(),
                active: self.active.filter(|active| component.contains(active)),
                slack,
            };
            let part = match sub.solve()? {
                Some(part) => part,
                None => return Ok(None),
            };
            slack = slack.checked_sub(size - part.len()).ok_or_else(|| {
                ProcessingError::InvariantViolation("a component dropped more nodes than its slack".to_owned())
            })?;
            forest.extend(part);
        }
        Ok(Some(forest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use crate::forest::{is_forest, is_fvs};
    use crate::testing::{complete_graph, cycle_graph};

    fn forest_size(graph: &MultiGraph) -> usize {
        let forest = max_induced_forest(graph, ForestBound::Unbounded).unwrap();
        assert!(forest.is_some());
        let forest = forest.unwrap();
        assert!(is_forest(graph, &forest));
        forest.len()
    }

    #[test]
    fn cycle_graphs_test() {
        for n in 3..20 {
            let graph = cycle_graph(n);
            assert_eq!(forest_size(&graph), n - 1);
            let solution = fvs_via_mif(&graph, 1).unwrap();
            assert!(solution.is_some());
            let solution = solution.unwrap();
            assert_eq!(solution.len(), 1);
            assert!(is_fvs(&graph, &solution));
            assert!(fvs_via_mif(&graph, 0).unwrap().is_none());
        }
    }

    #[test]
    fn complete_graphs_test() {
        for n in 3..10 {
            let graph = complete_graph(n);
            assert_eq!(forest_size(&graph), 2);
            let solution = fvs_via_mif(&graph, n - 2).unwrap();
            assert!(solution.is_some());
            assert!(is_fvs(&graph, &solution.unwrap()));
            assert!(fvs_via_mif(&graph, n - 3).unwrap().is_none());
        }
    }

    #[test]
    fn dense_graph_test() {
        let gr = Cursor::new("p fvs 5 8\n1 2\n2 3\n3 4\n4 5\n5 1\n1 3\n1 4\n2 4\n");
        let graph = MultiGraph::read_gr(gr).unwrap();
        assert_eq!(forest_size(&graph), 3);
        let solution = fvs_via_mif(&graph, 2).unwrap();
        assert!(solution.is_some());
        assert!(is_fvs(&graph, &solution.unwrap()));
        assert!(fvs_via_mif(&graph, 1).unwrap().is_none());
    }

    #[test]
    fn disconnected_graph_test() {
        // Two triangles, a path and an isolated node.
        let gr = Cursor::new("p fvs 10 8\n1 2\n2 3\n3 1\n4 5\n5 6\n6 4\n7 8\n8 9\n");
        let graph = MultiGraph::read_gr(gr).unwrap();
        assert_eq!(forest_size(&graph), 8);
        assert!(fvs_via_mif(&graph, 1).unwrap().is_none());
        let solution = fvs_via_mif(&graph, 2).unwrap();
        assert_eq!(solution.map(|s| s.len()), Some(2));
    }

    #[test]
    fn fixed_nodes_in_several_components_test() {
        let graph = MultiGraph::from_edges(6, vec![(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)]).unwrap();
        let mut ins = MifInstance::new(graph.clone(), 2);
        ins.forest = [0, 3].into_iter().collect();
        let forest = ins.solve().unwrap();
        assert!(forest.is_some());
        let forest = forest.unwrap();
        assert_eq!(forest.len(), 4);
        assert!(forest.contains(&0) && forest.contains(&3));
        assert!(is_forest(&graph, &forest));

        let mut ins = MifInstance::new(graph, 1);
        ins.forest = [0, 3].into_iter().collect();
        assert_eq!(ins.solve().unwrap(), None);
    }

    #[test]
    fn parallel_edges_test() {
        let graph = MultiGraph::from_edges(4, vec![(0, 1), (0, 1), (1, 2), (2, 3), (3, 1)]).unwrap();
        assert_eq!(forest_size(&graph), 3);
        assert_eq!(fvs_via_mif(&graph, 1).unwrap(), Some([1].into_iter().collect()));
    }

    #[test]
    fn bounds_test() {
        let graph = cycle_graph(6);
        assert!(max_induced_forest(&graph, ForestBound::AtLeast(6)).unwrap().is_none());
        assert!(max_induced_forest(&graph, ForestBound::AtLeast(9)).unwrap().is_none());
        let forest = max_induced_forest(&graph, ForestBound::AtLeast(2)).unwrap();
        assert_eq!(forest.map(|f| f.len()), Some(5));
        assert_eq!(max_induced_forest(&MultiGraph::new(0), ForestBound::Unbounded).unwrap(), Some(FxHashSet::default()));
    }

    #[test]
    fn fixed_cycle_is_an_invariant_violation_test() {
        let graph = cycle_graph(3);
        let mut ins = MifInstance::new(graph, 3);
        ins.forest = [0, 1, 2].into_iter().collect();
        assert!(matches!(ins.solve(), Err(ProcessingError::InvariantViolation(_))));
    }
}

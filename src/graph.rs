//! Implementation of an undirected multigraph data structure with basic static and dynamic
//! functions. Parallel edges are stored as multiplicities, self-loops are rejected.

use crate::cust_error::{ImportError, ProcessingError};
use fxhash::{FxHashMap, FxHashSet};
use std::cmp::Reverse;
use std::io::BufRead;

/// An undirected multigraph that supports dynamic behaviour. Nodes are identified by their index
/// in the adjacency list, deleted nodes keep their slot.
#[derive(Debug, Eq, PartialEq, Clone, Default)]
pub struct MultiGraph {
    /// Maps every neighbor of a node to the multiplicity of the edge between them.
    adj_list: Vec<Option<FxHashMap<usize, usize>>>,
}

impl MultiGraph {

    /// Creates a graph with the isolated nodes `0..n`.
    pub fn new(n: usize) -> Self {
        MultiGraph {
            adj_list: vec![Some(FxHashMap::default()); n],
        }
    }

    /// Creates a graph with the nodes `0..n` and one edge for every pair in `edges`. Pairs that
    /// occur more than once become parallel edges.
    pub fn from_edges<I>(n: usize, edges: I) -> Result<Self, ProcessingError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = MultiGraph::new(n);
        for (src, trg) in edges {
            graph.add_edge(src, trg)?;
        }
        Ok(graph)
    }
}

// Static functions
impl MultiGraph {

    /// Returns an `Iterator` over all nodes that have not yet been deleted, in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = usize> + '_ {
        self.adj_list
            .iter()
            .enumerate()
            .filter_map(|(i, adj)| adj.as_ref().map(|_| i))
    }

    /// Returns the number of nodes of `self`.
    pub fn num_nodes(&self) -> usize {
        self.nodes().count()
    }

    /// Checks if `node` exists.
    pub fn contains(&self, node: usize) -> bool {
        matches!(self.adj_list.get(node), Some(Some(_)))
    }

    /// Checks if `self` is empty (holds no undeleted nodes).
    pub fn is_empty(&self) -> bool {
        self.nodes().next().is_none()
    }

    /// Returns the neighbors of `node` together with the edge multiplicities, or `None` if `node`
    /// does not exist.
    pub fn neighbors(&self, node: usize) -> Option<&FxHashMap<usize, usize>> {
        self.adj_list.get(node).and_then(|adj| adj.as_ref())
    }

    /// Returns the neighbors of `node` in ascending order.
    pub fn sorted_neighbors(&self, node: usize) -> Vec<usize> {
        let mut neighbors: Vec<usize> = self
            .neighbors(node)
            .map(|neighs| neighs.keys().copied().collect())
            .unwrap_or_default();
        neighbors.sort_unstable();
        neighbors
    }

    /// Returns the degree of `node` counting parallel edges, or `None` if `node` was deleted.
    pub fn degree(&self, node: usize) -> Option<usize> {
        self.neighbors(node).map(|neighs| neighs.values().sum())
    }

    /// Returns the number of parallel edges between `src` and `trg`.
    pub fn multiplicity(&self, src: usize, trg: usize) -> usize {
        self.neighbors(src)
            .and_then(|neighs| neighs.get(&trg))
            .copied()
            .unwrap_or(0)
    }

    /// Returns an iterator over all edges `(src, trg, multiplicity)` with `src < trg`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.adj_list
            .iter()
            .enumerate()
            .filter_map(|(i, adj)| adj.as_ref().map(|adj| (i, adj)))
            .flat_map(|(i, adj)| {
                adj.iter()
                    .filter(move |(neigh, _)| i < **neigh)
                    .map(move |(neigh, mult)| (i, *neigh, *mult))
            })
    }

    /// Returns the number of edges, parallel edges counted individually.
    pub fn num_edges(&self) -> usize {
        self.edges().map(|(_, _, mult)| mult).sum()
    }

    /// Returns the node with the highest degree. Ties go to the smallest node.
    pub fn max_degree_node(&self) -> Option<usize> {
        self.nodes()
            .max_by_key(|node| (self.degree(*node).unwrap_or(0), Reverse(*node)))
    }

    /// Returns a set of all nodes reachable by `node`, including `node`.
    pub fn reachable(&self, node: usize) -> FxHashSet<usize> {
        self.reachable_in(node, |_| true)
    }

    fn reachable_in<F: Fn(usize) -> bool>(&self, node: usize, allowed: F) -> FxHashSet<usize> {
        let mut reached = FxHashSet::default();
        let mut queue = vec![node];
        while let Some(next) = queue.pop() {
            if !reached.insert(next) {
                continue
            }
            if let Some(neighbors) = self.neighbors(next) {
                queue.extend(neighbors.keys().filter(|neigh| allowed(**neigh) && !reached.contains(*neigh)));
            }
        }
        reached
    }

    /// Checks if `self` is disconnected.
    pub fn disconnected(&self) -> bool {
        match self.nodes().next() {
            Some(first) => self.reachable(first).len() != self.num_nodes(),
            None => false,
        }
    }

    /// Returns the node sets of the connected components, ordered by their smallest node.
    pub fn connected_components(&self) -> Vec<FxHashSet<usize>> {
        let all: FxHashSet<usize> = self.nodes().collect();
        self.components_in(&all)
    }

    /// Returns the node sets of the connected components of the subgraph induced by `subset`,
    /// ordered by their smallest node. Nodes of `subset` that are not in `self` are ignored.
    pub fn components_in(&self, subset: &FxHashSet<usize>) -> Vec<FxHashSet<usize>> {
        let mut members: Vec<usize> = subset.iter().copied().filter(|node| self.contains(*node)).collect();
        members.sort_unstable();
        let mut marked = FxHashSet::default();
        let mut components = Vec::new();
        for node in members {
            if marked.contains(&node) {
                continue
            }
            let component = self.reachable_in(node, |neigh| subset.contains(&neigh));
            marked.extend(component.iter().copied());
            components.push(component);
        }
        components
    }

    /// Returns the subgraph induced by `subset`. The node ids are kept.
    pub fn induced_subgraph(&self, subset: &FxHashSet<usize>) -> Self {
        let adj_list = self.adj_list
            .iter()
            .enumerate()
            .map(|(node, adj)| {
                if !subset.contains(&node) {
                    return None
                }
                adj.as_ref().map(|neighs| {
                    neighs.iter()
                        .filter(|(neigh, _)| subset.contains(*neigh))
                        .map(|(neigh, mult)| (*neigh, *mult))
                        .collect()
                })
            })
            .collect();
        MultiGraph {
            adj_list,
        }
    }

    /// Splits `self` into its connected components, ordered by their smallest node. Every
    /// component comes with its node set.
    pub fn split_into_connected(&self) -> Vec<(FxHashSet<usize>, Self)> {
        self.connected_components()
            .into_iter()
            .map(|component| {
                let subgraph = self.induced_subgraph(&component);
                (component, subgraph)
            })
            .collect()
    }
}

// Dynamic functions
impl MultiGraph {

    /// Inserts `node` without any edges. Returns `false` if `node` already existed.
    pub fn insert_node(&mut self, node: usize) -> bool {
        if node >= self.adj_list.len() {
            self.adj_list.resize(node + 1, None);
        }
        if self.adj_list[node].is_some() {
            return false
        }
        self.adj_list[node] = Some(FxHashMap::default());
        true
    }

    /// Tries to delete `node`.
    /// Returns the old neighborhood of `node` or `None` if nothing was deleted.
    pub fn delete_node(&mut self, node: usize) -> Option<FxHashMap<usize, usize>> {
        let opt_neighbors = self.adj_list.get_mut(node).and_then(|adj| adj.take());
        if let Some(neighborhood) = opt_neighbors.as_ref() {
            for neighbor in neighborhood.keys() {
                if let Some(ref mut nn) = self.adj_list[*neighbor] {
                    nn.remove(&node);
                }
            }
        }
        opt_neighbors
    }

    /// Removes all nodes in `node_set` from the graph.
    pub fn delete_nodes(&mut self, node_set: &FxHashSet<usize>) {
        for node in node_set {
            self.delete_node(*node);
        }
    }

    /// Adds an edge between `src` and `trg`. An existing edge gains a parallel copy.
    pub fn add_edge(&mut self, src: usize, trg: usize) -> Result<(), ProcessingError> {
        self.add_edge_with_multiplicity(src, trg, 1)
    }

    /// Adds `mult` parallel edges between `src` and `trg`.
    pub fn add_edge_with_multiplicity(&mut self, src: usize, trg: usize, mult: usize) -> Result<(), ProcessingError> {
        if src == trg {
            return Err(ProcessingError::GraphError(format!("self-loop at node {}", src)))
        }
        if !self.contains(src) || !self.contains(trg) {
            return Err(ProcessingError::GraphError(format!("edge ({}, {}) has a missing endpoint", src, trg)))
        }
        if mult == 0 {
            return Ok(())
        }
        for (from, to) in [(src, trg), (trg, src)] {
            if let Some(ref mut nn) = self.adj_list[from] {
                *nn.entry(to).or_insert(0) += mult;
            }
        }
        Ok(())
    }
}

impl MultiGraph {

    /// Reads a `.gr` input and creates a `MultiGraph`.
    ///
    /// The first non-comment line is `p fvs <n> <m>`, followed by `m` lines `<src> <trg>` with
    /// 1-based node ids. Repeated lines become parallel edges. Lines starting with `c ` are comments.
    pub fn read_gr<R: BufRead>(gr: R) -> Result<Self, ImportError> {
        let mut lines = gr.lines().filter(|l| {
            if let Ok(line) = l {
                // ignore empty lines and comment lines
                !line.starts_with("c ") && !line.is_empty()
            } else {
                true
            }
        });
        // p fvs <n> <m>
        let (n, m) = {
            let line = lines.next().ok_or(ImportError::InputMalformedError)??;
            let mut s = line.split_whitespace();
            if let Some("p") = s.next() {} else { return Err(ImportError::InputMalformedError); }
            if let Some("fvs") = s.next() {} else { return Err(ImportError::InputMalformedError); }
            let n: usize = s.next().ok_or(ImportError::InputMalformedError)?.parse()?;
            let m: usize = s.next().ok_or(ImportError::InputMalformedError)?.parse()?;
            if s.next().is_some() { return Err(ImportError::InputMalformedError); }
            (n, m)
        };
        let mut graph = MultiGraph::new(n);
        let mut num_edges = 0;
        for line in lines {
            // <src> <trg>
            let line = line?;
            let mut s = line.split_whitespace();
            let src = s.next().ok_or(ImportError::InputMalformedError)?.parse::<usize>()?;
            let trg = s.next().ok_or(ImportError::InputMalformedError)?.parse::<usize>()?;
            if s.next().is_some() || src == 0 || trg == 0 {
                return Err(ImportError::InputMalformedError);
            }
            graph.add_edge(src - 1, trg - 1).map_err(|_| ImportError::InputMalformedError)?;
            num_edges += 1;
        }
        if num_edges != m { return Err(ImportError::InputMalformedError); }
        Ok(graph)
    }
}

//! This module includes the reduction rules for the disjoint feedback vertex set problem.
//! These rules are:
//! * `Pendant`-rule which removes nodes of degree at most 1, they lie on no cycle.
//! * `ForcedInclusion`-rule which adds a node `v` outside of the exempt set `W` to the solution if
//! `G[W + v]` contains a cycle.
//! * `DegreeTwo`-rule which replaces a non-exempt node of degree 2 by an edge between its two
//! neighbors, if at least one of them is not exempt. This may create parallel edges.

use crate::fvs_instance::DisjointInstance;
use crate::cust_error::ProcessingError;
use fxhash::FxHashMap;
use log::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Pendant,
    ForcedInclusion,
    DegreeTwo,
}

/// The order in which `apply_reductions()` runs the rules in every pass.
pub const RULES: &[Rule] = &[Rule::Pendant, Rule::ForcedInclusion, Rule::DegreeTwo];

impl DisjointInstance {

    /// Removes nodes of degree at most 1 until none is left.
    /// Returns true if at least one node has been removed.
    pub fn remove_pendants(&mut self) -> bool {
        let mut removed = 0;
        loop {
            let pendants: Vec<usize> = self.graph
                .nodes()
                .filter(|node| self.graph.degree(*node).unwrap_or(0) <= 1)
                .collect();
            if pendants.is_empty() {
                break
            }
            for node in pendants {
                // `node` could have been removed by now.
                if self.delete_node(node) {
                    removed += 1;
                }
            }
        }
        if removed > 0 {
            trace!("pendant rule removed {} nodes", removed);
        }
        removed > 0
    }

    /// Returns the first non-exempt node `v` such that `G[W + v]` is not a forest.
    ///
    /// As `G[W]` is a forest, such a cycle passes through `v`, so `v` has at least two edges into
    /// the same component of `G[W]`.
    pub fn find_forced_node(&self) -> Option<usize> {
        let mut labels = FxHashMap::default();
        for (label, component) in self.graph.components_in(&self.exempt).into_iter().enumerate() {
            for node in component {
                labels.insert(node, label);
            }
        }
        if labels.is_empty() {
            return None
        }
        self.graph
            .nodes()
            .filter(|node| !self.exempt.contains(node))
            .find(|node| {
                let mut hits: FxHashMap<usize, usize> = FxHashMap::default();
                self.graph.neighbors(*node).map_or(false, |neighs| {
                    neighs.iter().any(|(neigh, mult)| {
                        labels.get(neigh).map_or(false, |label| {
                            let count = hits.entry(*label).or_insert(0);
                            *count += mult;
                            *count >= 2
                        })
                    })
                })
            })
    }

    /// Returns the first non-exempt node of degree exactly 2 with two distinct neighbors, at least
    /// one of them not exempt, together with these neighbors.
    ///
    /// A node whose two edges lead to the same neighbor is skipped, bypassing it would create a
    /// self-loop.
    pub fn find_bypass_node(&self) -> Option<(usize, (usize, usize))> {
        self.graph
            .nodes()
            .filter(|node| !self.exempt.contains(node))
            .find_map(|node| {
                let neighs = self.graph.neighbors(node)?;
                if neighs.len() != 2 || neighs.values().any(|mult| *mult != 1) {
                    return None
                }
                let mut pair: Vec<usize> = neighs.keys().copied().collect();
                pair.sort_unstable();
                if pair.iter().all(|neigh| self.exempt.contains(neigh)) {
                    return None
                }
                Some((node, (pair[0], pair[1])))
            })
    }

    /// Exhaustively applies the rules in the order of `RULES`: every pass removes all pendants,
    /// then applies the forced inclusion rule at most once and the degree-2 rule at most once.
    /// Passes are repeated until no rule altered the instance.
    ///
    /// Returns `Ok(false)` if a forced node did not fit into the budget anymore.
    pub fn apply_reductions(&mut self) -> Result<bool, ProcessingError> {
        loop {
            let mut changed = false;
            for rule in RULES {
                match rule {
                    Rule::Pendant => {
                        changed |= self.remove_pendants();
                    },
                    Rule::ForcedInclusion => {
                        if let Some(node) = self.find_forced_node() {
                            if !self.add_to_solution(node) {
                                trace!("forced node {} exceeds the budget", node);
                                return Ok(false)
                            }
                            trace!("forced node {} into the solution, k = {}", node, self.k);
                            changed = true;
                        }
                    },
                    Rule::DegreeTwo => {
                        if let Some((node, neighs)) = self.find_bypass_node() {
                            self.bypass_node(node, neighs)?;
                            trace!("bypassed node {} by edge {:?}", node, neighs);
                            changed = true;
                        }
                    },
                }
            }
            if !changed {
                return Ok(true)
            }
        }
    }
}

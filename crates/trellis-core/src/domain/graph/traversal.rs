//! Graph traversals: closures, path search, subgraphs and ordering.
//!
//! Every walk here uses an explicit worklist with a visited mark, so no
//! traversal depends on the call-stack depth or recurses on cyclic input.

use std::collections::{BTreeSet, HashSet, VecDeque};

use crate::domain::{
    entities::FeatureCatalog,
    error::{DomainError, QueryKind},
    graph::{
        builder::{NodeSeed, assemble},
        model::DependencyGraph,
    },
};

/// Read-only traversal API over one graph snapshot.
#[derive(Debug, Clone, Copy)]
pub struct TraversalEngine<'g> {
    graph: &'g DependencyGraph,
}

impl<'g> TraversalEngine<'g> {
    pub fn new(graph: &'g DependencyGraph) -> Self {
        Self { graph }
    }

    /// Every feature reachable through dependency edges, excluding `id`.
    pub fn transitive_dependencies(&self, id: &str) -> Result<BTreeSet<String>, DomainError> {
        let start = self.require(id)?;
        Ok(self.closure(start, |i| self.graph.dependency_indices(i)))
    }

    /// Every feature that reaches `id` through dependency edges, excluding
    /// `id`. Walks the one-hop dependents index built with the graph.
    pub fn reverse_dependencies(&self, id: &str) -> Result<BTreeSet<String>, DomainError> {
        let start = self.require(id)?;
        Ok(self.closure(start, |i| self.graph.dependent_indices(i)))
    }

    /// First dependency path found by depth-first search, inclusive of both
    /// ends.
    ///
    /// Returns `[from]` when `from == to`, and `None` when either end is
    /// unknown or `to` is unreachable. Not guaranteed to be the shortest.
    pub fn dependency_path(&self, from: &str, to: &str) -> Option<Vec<String>> {
        let start = self.graph.index_of(from)?;
        let goal = self.graph.index_of(to)?;
        if start == goal {
            return Some(vec![from.to_string()]);
        }

        let mut visited = vec![false; self.graph.len()];
        visited[start] = true;
        let mut stack: Vec<(usize, usize)> = vec![(start, 0)];

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            let Some(&next) = self.graph.dependency_indices(node).get(frame.1) else {
                stack.pop();
                continue;
            };
            frame.1 += 1;

            if next == goal {
                let mut path: Vec<String> = stack
                    .iter()
                    .map(|&(i, _)| self.graph.node_at(i).id.clone())
                    .collect();
                path.push(to.to_string());
                return Some(path);
            }
            if !visited[next] {
                visited[next] = true;
                stack.push((next, 0));
            }
        }

        None
    }

    /// Independent copy holding the dependency closure of `ids`.
    ///
    /// Breadth-first along dependency edges; unknown ids are ignored. Only
    /// edges with both endpoints collected are kept, and levels, dependents,
    /// roots and leaves are recomputed for the copy.
    pub fn subgraph(&self, ids: &[String]) -> DependencyGraph {
        let mut collected = vec![false; self.graph.len()];
        let mut queue: VecDeque<usize> = ids
            .iter()
            .filter_map(|id| self.graph.index_of(id))
            .collect();
        for &i in &queue {
            collected[i] = true;
        }

        while let Some(current) = queue.pop_front() {
            for &dep in self.graph.dependency_indices(current) {
                if !collected[dep] {
                    collected[dep] = true;
                    queue.push_back(dep);
                }
            }
        }

        let keep = |id: &str| self.graph.index_of(id).is_some_and(|i| collected[i]);

        let seeds = self
            .graph
            .nodes()
            .iter()
            .enumerate()
            .filter(|(i, _)| collected[*i])
            .map(|(_, node)| NodeSeed {
                id: node.id.clone(),
                category: node.category,
                dependencies: node.dependencies.clone(),
            })
            .collect();
        let edges = self
            .graph
            .edges()
            .iter()
            .filter(|e| keep(&e.from) && keep(&e.to))
            .cloned()
            .collect();
        let unresolved = self
            .graph
            .unresolved()
            .iter()
            .filter(|u| keep(&u.from))
            .cloned()
            .collect();

        assemble(seeds, edges, unresolved)
    }

    fn require(&self, id: &str) -> Result<usize, DomainError> {
        self.graph
            .index_of(id)
            .ok_or_else(|| DomainError::UnknownFeature {
                id: id.to_string(),
                query: QueryKind::Graph,
            })
    }

    fn closure<F>(&self, start: usize, neighbours: F) -> BTreeSet<String>
    where
        F: Fn(usize) -> &'g [usize],
    {
        let mut visited = vec![false; self.graph.len()];
        visited[start] = true;
        let mut worklist = vec![start];
        let mut found = BTreeSet::new();

        while let Some(current) = worklist.pop() {
            for &next in neighbours(current) {
                if next != start && !visited[next] {
                    visited[next] = true;
                    found.insert(self.graph.node_at(next).id.clone());
                    worklist.push(next);
                }
            }
        }

        found
    }
}

/// Order `ids` so each feature follows its dependencies inside the set.
///
/// Depth-first post-order over the catalog's declared dependencies,
/// restricted to `ids`. A node already being visited counts as satisfied,
/// which is what makes the walk terminate on cycles. Ties keep input order.
pub fn dependency_order(catalog: &FeatureCatalog, ids: &[String]) -> Vec<String> {
    let in_set: HashSet<&str> = ids.iter().map(String::as_str).collect();
    let mut seen: HashSet<&str> = HashSet::with_capacity(ids.len());
    let mut order = Vec::with_capacity(ids.len());

    for id in ids {
        if !seen.insert(id.as_str()) {
            continue;
        }
        let mut stack: Vec<(&str, usize)> = vec![(id.as_str(), 0)];

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            let deps = catalog
                .get(node)
                .map(|f| f.dependencies())
                .unwrap_or_default();

            match deps.get(frame.1) {
                Some(dep) => {
                    frame.1 += 1;
                    if in_set.contains(dep.as_str()) && seen.insert(dep.as_str()) {
                        stack.push((dep.as_str(), 0));
                    }
                }
                None => {
                    order.push(node.to_string());
                    stack.pop();
                }
            }
        }
    }

    order
}

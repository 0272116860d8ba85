//! Builds [`DependencyGraph`] snapshots from a catalog.

use std::collections::HashMap;

use crate::domain::{
    entities::FeatureCatalog,
    graph::model::{DependencyGraph, Edge, Node, UnresolvedReference},
    value_objects::{EdgeKind, FeatureCategory},
};

/// Per-node input to [`assemble`]: everything except the derived fields.
#[derive(Debug, Clone)]
pub(crate) struct NodeSeed {
    pub id: String,
    pub category: FeatureCategory,
    pub dependencies: Vec<String>,
}

/// Builds a fresh graph from a catalog on every call.
pub struct GraphBuilder<'c> {
    catalog: &'c FeatureCatalog,
}

impl<'c> GraphBuilder<'c> {
    pub fn new(catalog: &'c FeatureCatalog) -> Self {
        Self { catalog }
    }

    /// Create one node per feature and the typed edge set.
    ///
    /// Dependency and conflict entries naming ids outside the catalog are
    /// left out of the edges and recorded as unresolved references. Conflict
    /// edges follow the declared direction only.
    pub fn build(&self) -> DependencyGraph {
        let mut seeds = Vec::with_capacity(self.catalog.len());
        let mut edges = Vec::new();
        let mut unresolved = Vec::new();

        for feature in self.catalog {
            let mut dependencies = Vec::with_capacity(feature.dependencies().len());

            for dep in feature.dependencies() {
                if self.catalog.contains(dep) {
                    edges.push(Edge {
                        from: feature.id().to_string(),
                        to: dep.clone(),
                        kind: EdgeKind::Depends,
                    });
                    dependencies.push(dep.clone());
                } else {
                    unresolved.push(UnresolvedReference {
                        from: feature.id().to_string(),
                        missing: dep.clone(),
                        kind: EdgeKind::Depends,
                    });
                }
            }

            for conflict in feature.conflicts() {
                if self.catalog.contains(conflict) {
                    edges.push(Edge {
                        from: feature.id().to_string(),
                        to: conflict.clone(),
                        kind: EdgeKind::Conflicts,
                    });
                } else {
                    unresolved.push(UnresolvedReference {
                        from: feature.id().to_string(),
                        missing: conflict.clone(),
                        kind: EdgeKind::Conflicts,
                    });
                }
            }

            seeds.push(NodeSeed {
                id: feature.id().to_string(),
                category: feature.category(),
                dependencies,
            });
        }

        assemble(seeds, edges, unresolved)
    }
}

/// Derive dependents, levels, roots and leaves for a set of seeds.
///
/// Seed dependencies must already be resolved against the seed set; entries
/// that are not are ignored for adjacency.
pub(crate) fn assemble(
    seeds: Vec<NodeSeed>,
    edges: Vec<Edge>,
    unresolved: Vec<UnresolvedReference>,
) -> DependencyGraph {
    let index: HashMap<String, usize> = seeds
        .iter()
        .enumerate()
        .map(|(i, seed)| (seed.id.clone(), i))
        .collect();

    let adjacency: Vec<Vec<usize>> = seeds
        .iter()
        .map(|seed| {
            seed.dependencies
                .iter()
                .filter_map(|dep| index.get(dep).copied())
                .collect()
        })
        .collect();

    let mut reverse: Vec<Vec<usize>> = vec![Vec::new(); seeds.len()];
    for (from, deps) in adjacency.iter().enumerate() {
        for &to in deps {
            reverse[to].push(from);
        }
    }

    let levels = assign_levels(&adjacency);

    let dependents: Vec<Vec<String>> = reverse
        .iter()
        .map(|from| from.iter().map(|&d| seeds[d].id.clone()).collect())
        .collect();

    let nodes = seeds
        .into_iter()
        .zip(dependents)
        .zip(levels)
        .map(|((seed, dependents), level)| Node {
            id: seed.id,
            category: seed.category,
            dependencies: seed.dependencies,
            dependents,
            level,
        })
        .collect();

    DependencyGraph::from_parts(nodes, edges, unresolved, index, adjacency, reverse)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Memoized depth-first level assignment with an explicit stack.
///
/// A dependency that is still in progress (a back-reference inside a cycle)
/// contributes nothing, so every node terminates with `level >= 1`.
fn assign_levels(adjacency: &[Vec<usize>]) -> Vec<u32> {
    let mut levels = vec![0u32; adjacency.len()];
    let mut marks = vec![Mark::Unvisited; adjacency.len()];

    for start in 0..adjacency.len() {
        if marks[start] != Mark::Unvisited {
            continue;
        }

        marks[start] = Mark::InProgress;
        let mut stack: Vec<(usize, usize)> = vec![(start, 0)];

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            if let Some(&dep) = adjacency[node].get(frame.1) {
                frame.1 += 1;
                if marks[dep] == Mark::Unvisited {
                    marks[dep] = Mark::InProgress;
                    stack.push((dep, 0));
                }
                continue;
            }

            let deepest = adjacency[node]
                .iter()
                .filter(|&&dep| marks[dep] == Mark::Done)
                .map(|&dep| levels[dep])
                .max()
                .unwrap_or(0);
            levels[node] = deepest + 1;
            marks[node] = Mark::Done;
            stack.pop();
        }
    }

    levels
}

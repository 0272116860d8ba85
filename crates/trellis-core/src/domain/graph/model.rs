//! Dependency graph value objects.
//!
//! A [`DependencyGraph`] is an arena: nodes live in a `Vec` in catalog order
//! and every edge is also kept as index adjacency, so traversals work on
//! `usize` marks instead of string sets.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::value_objects::{EdgeKind, FeatureCategory};

/// One feature inside a graph snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub id: String,
    pub category: FeatureCategory,
    /// Resolved dependencies, declaration order.
    pub dependencies: Vec<String>,
    /// Features that depend on this one, catalog order.
    pub dependents: Vec<String>,
    /// `1 + max(level of dependencies)`, or 1 without dependencies.
    pub level: u32,
}

/// A typed, directed edge between two catalog features.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
}

/// A declared reference to an id that is not in the catalog.
///
/// These are excluded from edge construction and kept here so callers can
/// surface them as a data-quality report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct UnresolvedReference {
    pub from: String,
    pub missing: String,
    pub kind: EdgeKind,
}

/// Immutable snapshot of the feature dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    root_nodes: Vec<String>,
    leaf_nodes: Vec<String>,
    unresolved: Vec<UnresolvedReference>,
    #[serde(skip)]
    index: HashMap<String, usize>,
    #[serde(skip)]
    adjacency: Vec<Vec<usize>>,
    #[serde(skip)]
    reverse: Vec<Vec<usize>>,
}

impl DependencyGraph {
    pub(crate) fn from_parts(
        nodes: Vec<Node>,
        edges: Vec<Edge>,
        unresolved: Vec<UnresolvedReference>,
        index: HashMap<String, usize>,
        adjacency: Vec<Vec<usize>>,
        reverse: Vec<Vec<usize>>,
    ) -> Self {
        let root_nodes = nodes
            .iter()
            .filter(|n| n.dependencies.is_empty())
            .map(|n| n.id.clone())
            .collect();
        let leaf_nodes = nodes
            .iter()
            .filter(|n| n.dependents.is_empty())
            .map(|n| n.id.clone())
            .collect();

        Self {
            nodes,
            edges,
            root_nodes,
            leaf_nodes,
            unresolved,
            index,
            adjacency,
            reverse,
        }
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Nodes in catalog order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edges_of_kind(&self, kind: EdgeKind) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.kind == kind)
    }

    /// Features with zero resolved dependencies.
    pub fn root_nodes(&self) -> &[String] {
        &self.root_nodes
    }

    /// Features nothing depends on.
    pub fn leaf_nodes(&self) -> &[String] {
        &self.leaf_nodes
    }

    pub fn unresolved(&self) -> &[UnresolvedReference] {
        &self.unresolved
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn max_level(&self) -> u32 {
        self.nodes.iter().map(|n| n.level).max().unwrap_or(0)
    }

    // ── arena access for traversals ──────────────────────────────────────────

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn node_at(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub(crate) fn dependency_indices(&self, index: usize) -> &[usize] {
        &self.adjacency[index]
    }

    pub(crate) fn dependent_indices(&self, index: usize) -> &[usize] {
        &self.reverse[index]
    }

    pub(crate) fn root_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .filter(|(_, deps)| deps.is_empty())
            .map(|(i, _)| i)
    }
}

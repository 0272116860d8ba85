//! Graph Service - graph construction and traversal over the catalog.

use std::{collections::BTreeSet, sync::Arc};

use tracing::{debug, instrument, warn};

use crate::{
    domain::{
        DependencyGraph, FeatureCatalog, GraphBuilder, TraversalEngine, dependency_order,
        summarize_graph, visualize_ascii,
    },
    error::TrellisResult,
};

/// Front for [`GraphBuilder`] and [`TraversalEngine`].
///
/// Graphs are rebuilt on every call; the catalog snapshot is the only state.
#[derive(Debug, Clone)]
pub struct GraphService {
    catalog: Arc<FeatureCatalog>,
}

impl GraphService {
    pub fn new(catalog: Arc<FeatureCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &FeatureCatalog {
        &self.catalog
    }

    /// Build the full graph, reporting dangling references.
    #[instrument(skip_all, fields(features = self.catalog.len()))]
    pub fn create_graph(&self) -> DependencyGraph {
        let graph = GraphBuilder::new(&self.catalog).build();

        for reference in graph.unresolved() {
            warn!(
                feature = %reference.from,
                missing = %reference.missing,
                kind = %reference.kind,
                "Feature references an id that is not in the catalog"
            );
        }
        debug!(
            nodes = graph.len(),
            edges = graph.edges().len(),
            max_level = graph.max_level(),
            "Graph built"
        );

        graph
    }

    /// Dependency closure of `ids` as an independent graph.
    #[instrument(skip_all, fields(roots = ?ids))]
    pub fn subgraph(&self, ids: &[String]) -> DependencyGraph {
        let graph = self.create_graph();
        let sub = TraversalEngine::new(&graph).subgraph(ids);
        debug!(nodes = sub.len(), "Subgraph extracted");
        sub
    }

    #[instrument(skip(self))]
    pub fn transitive_dependencies(&self, id: &str) -> TrellisResult<BTreeSet<String>> {
        let graph = self.create_graph();
        Ok(TraversalEngine::new(&graph).transitive_dependencies(id)?)
    }

    #[instrument(skip(self))]
    pub fn reverse_dependencies(&self, id: &str) -> TrellisResult<BTreeSet<String>> {
        let graph = self.create_graph();
        Ok(TraversalEngine::new(&graph).reverse_dependencies(id)?)
    }

    #[instrument(skip(self))]
    pub fn dependency_path(&self, from: &str, to: &str) -> Option<Vec<String>> {
        let graph = self.create_graph();
        let path = TraversalEngine::new(&graph).dependency_path(from, to);
        debug!(found = path.is_some(), "Path search finished");
        path
    }

    /// Dependency-first order of `ids`.
    pub fn dependency_order(&self, ids: &[String]) -> Vec<String> {
        dependency_order(&self.catalog, ids)
    }

    pub fn visualize_ascii(&self) -> String {
        visualize_ascii(&self.create_graph())
    }

    pub fn summarize(&self) -> String {
        summarize_graph(&self.create_graph())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, Feature, QueryKind};
    use crate::error::TrellisError;

    fn service() -> GraphService {
        let catalog = FeatureCatalog::new(vec![
            Feature::builder("a").dependency("b").build().unwrap(),
            Feature::builder("b").dependency("c").build().unwrap(),
            Feature::builder("c").dependency("ghost").build().unwrap(),
        ])
        .unwrap();
        GraphService::new(Arc::new(catalog))
    }

    #[test]
    fn chain_closure() {
        let deps = service().transitive_dependencies("a").unwrap();
        assert_eq!(deps.into_iter().collect::<Vec<_>>(), ["b", "c"]);
    }

    #[test]
    fn reverse_closure() {
        let dependents = service().reverse_dependencies("c").unwrap();
        assert_eq!(dependents.into_iter().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn unknown_id_is_a_graph_query_error() {
        let err = service().transitive_dependencies("nope").unwrap_err();
        assert_eq!(
            err,
            TrellisError::Domain(DomainError::UnknownFeature {
                id: "nope".into(),
                query: QueryKind::Graph,
            })
        );
    }

    #[test]
    fn dangling_reference_is_kept_out_of_edges() {
        let graph = service().create_graph();
        assert_eq!(graph.unresolved().len(), 1);
        assert!(!graph.contains("ghost"));
    }

    #[test]
    fn subgraph_of_middle_node() {
        let sub = service().subgraph(&["b".to_string()]);
        assert_eq!(sub.len(), 2);
        assert!(sub.contains("c"));
        assert!(!sub.contains("a"));
    }

    #[test]
    fn order_puts_dependencies_first() {
        let order = service().dependency_order(&["a".to_string(), "b".to_string()]);
        assert_eq!(order, ["b", "a"]);
    }
}

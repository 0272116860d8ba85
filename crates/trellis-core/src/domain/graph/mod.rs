//! Feature dependency graph: model, builder, traversals and renderings.

pub mod builder;
pub mod model;
pub mod render;
pub mod traversal;

pub use builder::GraphBuilder;
pub use model::{DependencyGraph, Edge, Node, UnresolvedReference};
pub use render::{summarize_graph, visualize_ascii};
pub use traversal::{TraversalEngine, dependency_order};

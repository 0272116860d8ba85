//! Core domain layer for Trellis.
//!
//! Pure analysis over a feature catalog: graph construction and traversal,
//! compatibility, impact and selection validation. Nothing in here logs,
//! caches or touches the filesystem; those concerns live in the application
//! layer and the adapters.
//!
//! ## Rules
//!
//! - **No I/O**: catalogs arrive fully loaded
//! - **No recursion**: every traversal uses an explicit worklist
//! - **Deterministic**: catalog order drives every listing
//! - **Findings are data**: rule violations are reported inside result
//!   objects; only input defects become [`DomainError`]s

pub mod compatibility;
pub mod entities;
pub mod error;
pub mod graph;
pub mod impact;
pub mod selection;
pub mod value_objects;

pub use compatibility::{CompatibilityIssue, CompatibilityResult, IssueKind, check_compatibility};
pub use entities::{Feature, FeatureBuilder, FeatureCatalog};
pub use error::{DomainError, ErrorCategory, QueryKind};
pub use graph::{
    DependencyGraph, Edge, GraphBuilder, Node, TraversalEngine, UnresolvedReference,
    dependency_order, summarize_graph, visualize_ascii,
};
pub use impact::{FeatureImpact, ImpactAnalysis, analyze_impact};
pub use selection::{
    SelectionError, SelectionErrorCode, SelectionValidation, SelectionWarning,
    SelectionWarningCode, validate_selection,
};
pub use value_objects::{CanonicalKey, EdgeKind, FeatureCategory, RiskLevel, Severity};

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    // ========================================================================
    // Value Object Tests
    // ========================================================================

    #[test]
    fn category_parses_with_aliases() {
        assert_eq!(
            FeatureCategory::from_str("framework").unwrap(),
            FeatureCategory::Framework
        );
        assert_eq!(
            FeatureCategory::from_str("LIB").unwrap(),
            FeatureCategory::Library
        );
        assert!(FeatureCategory::from_str("plugin").is_err());
    }

    #[test]
    fn canonical_key_ignores_order_and_repeats() {
        let a = CanonicalKey::new(["b", "a", "b"]);
        let b = CanonicalKey::new(["a", "b"]);
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "a,b");
        assert!(a.contains("a"));
        assert!(!a.contains("c"));
    }

    // ========================================================================
    // Cross-module Tests
    // ========================================================================

    fn web_catalog() -> FeatureCatalog {
        FeatureCatalog::new(vec![
            Feature::builder("react")
                .category(FeatureCategory::Framework)
                .removable(false)
                .build()
                .unwrap(),
            Feature::builder("router")
                .category(FeatureCategory::Library)
                .dependency("react")
                .build()
                .unwrap(),
            Feature::builder("jest")
                .category(FeatureCategory::Tool)
                .conflict("vitest")
                .build()
                .unwrap(),
            Feature::builder("vitest")
                .category(FeatureCategory::Tool)
                .build()
                .unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn analyses_agree_on_conflicts() {
        let catalog = web_catalog();
        let key = CanonicalKey::new(["jest", "vitest"]);

        let compat = check_compatibility(&catalog, &key).unwrap();
        let selection = validate_selection(&catalog, &key);

        assert!(!compat.compatible);
        assert!(selection.has_error(SelectionErrorCode::Incompatible));
    }

    #[test]
    fn removing_a_dependency_breaks_its_dependents() {
        let catalog = web_catalog();
        let analysis = analyze_impact(&catalog, &CanonicalKey::new(["react"])).unwrap();

        assert!(analysis.has_breaking_changes);
        assert_eq!(analysis.dependent_count, 1);
        assert_eq!(analysis.impacts[0].severity, RiskLevel::Critical);
    }
}

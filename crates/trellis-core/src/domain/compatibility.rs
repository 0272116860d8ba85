//! Pairwise compatibility analysis of a feature set.
//!
//! Conflicts are not assumed symmetric: both declarations of every pair are
//! tested. A pair that declares the conflict from both sides yields a single
//! issue marked `mutual`.

use std::fmt;

use serde::Serialize;

use crate::domain::{
    entities::{Feature, FeatureCatalog},
    error::{DomainError, QueryKind},
    graph::dependency_order,
    value_objects::{CanonicalKey, Severity},
};

/// What a compatibility finding is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Conflict,
    Dependency,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Conflict => "conflict",
            Self::Dependency => "dependency",
        })
    }
}

/// One finding about a pair of requested features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatibilityIssue {
    pub kind: IssueKind,
    pub severity: Severity,
    /// Declaring side first.
    pub from: String,
    pub to: String,
    /// Both features declare the relation.
    pub mutual: bool,
    pub message: String,
}

impl CompatibilityIssue {
    pub fn involves(&self, a: &str, b: &str) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

/// Outcome of a compatibility check for one canonical feature set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatibilityResult {
    /// Requested ids in canonical order.
    pub features: Vec<String>,
    pub compatible: bool,
    pub issues: Vec<CompatibilityIssue>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
    /// Dependency-first order, present only when it differs from the
    /// canonical order.
    pub suggested_order: Option<Vec<String>>,
    /// Catalog features outside the set whose dependencies all lie inside it.
    pub also_removable: Vec<String>,
}

impl CompatibilityResult {
    pub fn errors(&self) -> impl Iterator<Item = &CompatibilityIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }
}

/// Check a canonical feature set against the catalog.
///
/// Fails on the first unknown id (canonical order); no partial result.
pub fn check_compatibility(
    catalog: &FeatureCatalog,
    key: &CanonicalKey,
) -> Result<CompatibilityResult, DomainError> {
    let features = catalog.require_all(key.ids(), QueryKind::Compatibility)?;

    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    for (i, a) in features.iter().enumerate() {
        for b in &features[i + 1..] {
            if let Some(issue) = conflict_issue(a, b) {
                issues.push(issue);
            }

            let a_needs_b = a.depends_on(b.id());
            let b_needs_a = b.depends_on(a.id());
            if a_needs_b || b_needs_a {
                let (from, to) = if a_needs_b { (a, b) } else { (b, a) };
                issues.push(CompatibilityIssue {
                    kind: IssueKind::Dependency,
                    severity: Severity::Warning,
                    from: from.id().to_string(),
                    to: to.id().to_string(),
                    mutual: a_needs_b && b_needs_a,
                    message: format!("'{}' depends on '{}'", from.id(), to.id()),
                });
                warnings.push(format!(
                    "'{}' depends on '{}'; handle them together in dependency order",
                    from.id(),
                    to.id()
                ));
            }
        }
    }

    let compatible = !issues.iter().any(|i| i.severity == Severity::Error);

    let mut suggestions = Vec::new();

    let order = dependency_order(catalog, key.ids());
    let suggested_order = (order.as_slice() != key.ids()).then_some(order);
    if let Some(order) = &suggested_order {
        suggestions.push(format!(
            "Suggested order (dependencies first): {}",
            order.join(" → ")
        ));
    }

    let also_removable: Vec<String> = catalog
        .iter()
        .filter(|f| !key.contains(f.id()))
        .filter(|f| !f.dependencies().is_empty())
        .filter(|f| f.dependencies().iter().all(|d| key.contains(d)))
        .map(|f| f.id().to_string())
        .collect();
    for id in &also_removable {
        suggestions.push(format!(
            "Consider also removing '{id}': all of its dependencies are in this selection"
        ));
    }

    Ok(CompatibilityResult {
        features: key.ids().to_vec(),
        compatible,
        issues,
        warnings,
        suggestions,
        suggested_order,
        also_removable,
    })
}

/// Conflict finding for an unordered pair, checking both declarations.
pub(crate) fn conflict_issue(a: &Feature, b: &Feature) -> Option<CompatibilityIssue> {
    let (from, to, mutual) = match (a.conflicts_with(b.id()), b.conflicts_with(a.id())) {
        (true, true) => (a, b, true),
        (true, false) => (a, b, false),
        (false, true) => (b, a, false),
        (false, false) => return None,
    };

    let message = if mutual {
        format!("'{}' and '{}' conflict with each other", from.id(), to.id())
    } else {
        format!("'{}' conflicts with '{}'", from.id(), to.id())
    };

    Some(CompatibilityIssue {
        kind: IssueKind::Conflict,
        severity: Severity::Error,
        from: from.id().to_string(),
        to: to.id().to_string(),
        mutual,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(ids: &[&str]) -> CanonicalKey {
        CanonicalKey::new(ids)
    }

    fn catalog(features: Vec<Feature>) -> FeatureCatalog {
        FeatureCatalog::new(features).unwrap()
    }

    #[test]
    fn declared_conflict_is_incompatible() {
        let catalog = catalog(vec![
            Feature::builder("a").conflict("b").build().unwrap(),
            Feature::builder("b").build().unwrap(),
        ]);
        let result = check_compatibility(&catalog, &key(&["a", "b"])).unwrap();

        assert!(!result.compatible);
        assert_eq!(result.error_count(), 1);
        assert!(result.errors().any(|i| i.involves("a", "b")));
    }

    #[test]
    fn conflict_declared_on_second_feature_is_found() {
        let catalog = catalog(vec![
            Feature::builder("a").build().unwrap(),
            Feature::builder("b").conflict("a").build().unwrap(),
        ]);
        let result = check_compatibility(&catalog, &key(&["a", "b"])).unwrap();

        let issue = result.errors().next().unwrap();
        assert_eq!((issue.from.as_str(), issue.to.as_str()), ("b", "a"));
        assert!(!issue.mutual);
    }

    #[test]
    fn mutual_conflict_collapses_into_one_issue() {
        let catalog = catalog(vec![
            Feature::builder("a").conflict("b").build().unwrap(),
            Feature::builder("b").conflict("a").build().unwrap(),
        ]);
        let result = check_compatibility(&catalog, &key(&["b", "a"])).unwrap();

        assert_eq!(result.error_count(), 1);
        assert!(result.issues[0].mutual);
    }

    #[test]
    fn dependency_pair_is_a_warning_with_order_suggestion() {
        let catalog = catalog(vec![
            Feature::builder("a").dependency("b").build().unwrap(),
            Feature::builder("b").build().unwrap(),
        ]);
        let result = check_compatibility(&catalog, &key(&["a", "b"])).unwrap();

        assert!(result.compatible);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].kind, IssueKind::Dependency);
        assert_eq!(result.issues[0].severity, Severity::Warning);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(
            result.suggested_order,
            Some(vec!["b".to_string(), "a".to_string()])
        );
    }

    #[test]
    fn natural_order_is_not_suggested() {
        let catalog = catalog(vec![
            Feature::builder("a").build().unwrap(),
            Feature::builder("b").dependency("a").build().unwrap(),
        ]);
        let result = check_compatibility(&catalog, &key(&["a", "b"])).unwrap();
        assert!(result.suggested_order.is_none());
    }

    #[test]
    fn dependents_fully_inside_selection_are_suggested() {
        let catalog = catalog(vec![
            Feature::builder("db").build().unwrap(),
            Feature::builder("orm").dependency("db").build().unwrap(),
            Feature::builder("api").dependencies(["db", "http"]).build().unwrap(),
            Feature::builder("http").build().unwrap(),
            Feature::builder("docs").build().unwrap(),
        ]);
        let result = check_compatibility(&catalog, &key(&["db"])).unwrap();

        assert_eq!(result.also_removable, ["orm"]);
        assert!(result.suggestions.iter().any(|s| s.contains("'orm'")));
    }

    #[test]
    fn unknown_feature_fails_fast() {
        let catalog = catalog(vec![Feature::builder("a").build().unwrap()]);
        let err = check_compatibility(&catalog, &key(&["zeta", "a", "beta"])).unwrap_err();
        assert_eq!(
            err,
            DomainError::UnknownFeature {
                id: "beta".into(),
                query: QueryKind::Compatibility
            }
        );
    }
}

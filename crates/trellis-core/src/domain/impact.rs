//! Impact estimation for removing a feature set.
//!
//! Line counts are a relative magnitude derived from category weight and
//! dependency count, not a measurement of the generated code.

use serde::Serialize;

use crate::domain::{
    entities::{Feature, FeatureCatalog},
    error::{DomainError, QueryKind},
    value_objects::{CanonicalKey, FeatureCategory, RiskLevel},
};

/// Added to the category base for every affected dependency.
pub const LINES_PER_DEPENDENCY: u64 = 50;

/// Line total above which a large-removal warning is issued.
pub const LARGE_REMOVAL_LINES: u64 = 5_000;

/// File total above which a many-files warning is issued.
pub const MANY_FILES: usize = 20;

/// Base line estimate per category: framework > library > tool > other.
pub const fn base_lines(category: FeatureCategory) -> u64 {
    match category {
        FeatureCategory::Framework => 2_000,
        FeatureCategory::Library => 800,
        FeatureCategory::Tool => 300,
        FeatureCategory::Other => 100,
    }
}

/// Estimated impact of one requested feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureImpact {
    pub feature: String,
    pub category: FeatureCategory,
    /// Catalog features outside the request that depend on this one.
    pub dependent_features: Vec<String>,
    /// Dependencies and dev-dependencies, declaration order.
    pub affected_dependencies: Vec<String>,
    pub estimated_files: usize,
    pub estimated_lines_removed: u64,
    pub breaking_changes: bool,
    pub severity: RiskLevel,
}

/// Aggregate impact of a canonical feature set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactAnalysis {
    pub features: Vec<String>,
    pub impacts: Vec<FeatureImpact>,
    pub total_files: usize,
    pub total_lines: u64,
    pub has_breaking_changes: bool,
    /// Distinct dependents across the whole request.
    pub dependent_count: usize,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<String>,
}

impl ImpactAnalysis {
    pub fn impact(&self, id: &str) -> Option<&FeatureImpact> {
        self.impacts.iter().find(|i| i.feature == id)
    }
}

/// Analyze a canonical feature set. Fails on the first unknown id.
pub fn analyze_impact(
    catalog: &FeatureCatalog,
    key: &CanonicalKey,
) -> Result<ImpactAnalysis, DomainError> {
    let features = catalog.require_all(key.ids(), QueryKind::Impact)?;

    let impacts: Vec<FeatureImpact> = features
        .iter()
        .map(|feature| feature_impact(catalog, key, feature))
        .collect();

    let total_files = impacts.iter().map(|i| i.estimated_files).sum();
    let total_lines = impacts.iter().map(|i| i.estimated_lines_removed).sum();
    let has_breaking_changes = impacts.iter().any(|i| i.breaking_changes);

    let mut dependents: Vec<&str> = impacts
        .iter()
        .flat_map(|i| i.dependent_features.iter().map(String::as_str))
        .collect();
    dependents.sort_unstable();
    dependents.dedup();

    let risk_score = risk_score(
        total_files,
        total_lines,
        has_breaking_changes,
        dependents.len(),
    );
    let risk_level = RiskLevel::from_score(risk_score);

    let critical = risk_level == RiskLevel::Critical
        || impacts.iter().any(|i| i.severity == RiskLevel::Critical);

    let mut recommendations = Vec::new();
    if critical {
        recommendations.push(
            "Critical impact: this change removes core project functionality; review it carefully"
                .to_string(),
        );
    }
    if !dependents.is_empty() {
        recommendations.push(format!(
            "{} feature(s) depend on this selection and will break: {}",
            dependents.len(),
            dependents.join(", ")
        ));
    }
    if total_lines > LARGE_REMOVAL_LINES {
        recommendations.push(format!(
            "Large removal: about {total_lines} lines of generated code are affected"
        ));
    }
    if total_files > MANY_FILES {
        recommendations.push(format!(
            "Many files affected ({total_files}); consider removing features in smaller steps"
        ));
    }
    recommendations.push("Create a backup before applying the change".to_string());
    recommendations.push("Preview the change with a dry run first".to_string());

    Ok(ImpactAnalysis {
        features: key.ids().to_vec(),
        dependent_count: dependents.len(),
        impacts,
        total_files,
        total_lines,
        has_breaking_changes,
        risk_score,
        risk_level,
        recommendations,
    })
}

/// `10·files + lines/100 + 50·breaking + 25·dependents`.
pub fn risk_score(files: usize, lines: u64, breaking: bool, dependents: usize) -> f64 {
    10.0 * files as f64
        + lines as f64 / 100.0
        + if breaking { 50.0 } else { 0.0 }
        + 25.0 * dependents as f64
}

fn feature_impact(catalog: &FeatureCatalog, key: &CanonicalKey, feature: &Feature) -> FeatureImpact {
    let dependent_features: Vec<String> = catalog
        .iter()
        .filter(|other| !key.contains(other.id()) && other.depends_on(feature.id()))
        .map(|other| other.id().to_string())
        .collect();

    let mut affected_dependencies: Vec<String> = Vec::new();
    for dep in feature.dependencies().iter().chain(feature.dev_dependencies()) {
        if !affected_dependencies.contains(dep) {
            affected_dependencies.push(dep.clone());
        }
    }

    let estimated_lines_removed =
        base_lines(feature.category()) + LINES_PER_DEPENDENCY * affected_dependencies.len() as u64;
    let breaking_changes = !dependent_features.is_empty();

    let severity = match feature.category() {
        FeatureCategory::Framework => RiskLevel::Critical,
        FeatureCategory::Library => RiskLevel::High,
        _ if breaking_changes => RiskLevel::Medium,
        _ => RiskLevel::Low,
    };

    FeatureImpact {
        feature: feature.id().to_string(),
        category: feature.category(),
        dependent_features,
        affected_dependencies,
        estimated_files: feature.files().len(),
        estimated_lines_removed,
        breaking_changes,
        severity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(ids: &[&str]) -> CanonicalKey {
        CanonicalKey::new(ids)
    }

    #[test]
    fn severity_follows_category_then_breakage() {
        let catalog = FeatureCatalog::new(vec![
            Feature::builder("react")
                .category(FeatureCategory::Framework)
                .build()
                .unwrap(),
            Feature::builder("zod")
                .category(FeatureCategory::Library)
                .build()
                .unwrap(),
            Feature::builder("lint")
                .category(FeatureCategory::Tool)
                .build()
                .unwrap(),
            Feature::builder("fmt")
                .category(FeatureCategory::Tool)
                .build()
                .unwrap(),
            Feature::builder("ci").dependency("lint").build().unwrap(),
        ])
        .unwrap();

        let analysis = analyze_impact(&catalog, &key(&["react", "zod", "lint", "fmt"])).unwrap();

        assert_eq!(analysis.impact("react").unwrap().severity, RiskLevel::Critical);
        assert_eq!(analysis.impact("zod").unwrap().severity, RiskLevel::High);
        assert_eq!(analysis.impact("lint").unwrap().severity, RiskLevel::Medium);
        assert_eq!(analysis.impact("fmt").unwrap().severity, RiskLevel::Low);
        assert_eq!(analysis.impact("lint").unwrap().dependent_features, ["ci"]);
    }

    #[test]
    fn line_estimate_uses_category_weight_and_dependencies() {
        let catalog = FeatureCatalog::new(vec![
            Feature::builder("auth")
                .category(FeatureCategory::Library)
                .dependencies(["db", "crypto"])
                .dev_dependencies(["mock", "db"])
                .build()
                .unwrap(),
        ])
        .unwrap();

        let analysis = analyze_impact(&catalog, &key(&["auth"])).unwrap();
        let auth = analysis.impact("auth").unwrap();

        assert_eq!(auth.affected_dependencies, ["db", "crypto", "mock"]);
        assert_eq!(auth.estimated_lines_removed, 800 + 3 * LINES_PER_DEPENDENCY);
    }

    #[test]
    fn category_weights_are_ordered() {
        assert!(base_lines(FeatureCategory::Framework) > base_lines(FeatureCategory::Library));
        assert!(base_lines(FeatureCategory::Library) > base_lines(FeatureCategory::Tool));
        assert!(base_lines(FeatureCategory::Tool) > base_lines(FeatureCategory::Other));
    }

    #[test]
    fn risk_score_thresholds() {
        // one breaking feature with three dependents: 50 + 75 + lines/100
        assert_eq!(risk_score(0, 100, true, 3), 126.0);
        assert_eq!(RiskLevel::from_score(126.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(200.0), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_score(50.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(49.9), RiskLevel::Low);
    }

    #[test]
    fn recommendations_end_with_unconditional_hints() {
        let catalog = FeatureCatalog::new(vec![Feature::builder("x").build().unwrap()]).unwrap();
        let analysis = analyze_impact(&catalog, &key(&["x"])).unwrap();

        assert_eq!(analysis.risk_level, RiskLevel::Low);
        assert_eq!(analysis.recommendations.len(), 2);
        assert!(analysis.recommendations[0].contains("backup"));
        assert!(analysis.recommendations[1].contains("dry run"));
    }

    #[test]
    fn many_files_and_large_removal_warnings() {
        let features = (0..3)
            .map(|i| {
                Feature::builder(format!("fw{i}"))
                    .category(FeatureCategory::Framework)
                    .files((0..8).map(|f| format!("src/fw{i}/{f}.rs")))
                    .build()
                    .unwrap()
            })
            .collect();
        let catalog = FeatureCatalog::new(features).unwrap();
        let analysis = analyze_impact(&catalog, &key(&["fw0", "fw1", "fw2"])).unwrap();

        assert_eq!(analysis.total_files, 24);
        assert_eq!(analysis.total_lines, 6_000);
        assert_eq!(analysis.risk_level, RiskLevel::Critical);
        assert!(analysis.recommendations[0].starts_with("Critical impact"));
        assert!(analysis.recommendations.iter().any(|r| r.starts_with("Large removal")));
        assert!(analysis.recommendations.iter().any(|r| r.starts_with("Many files")));
    }

    #[test]
    fn unknown_feature_is_an_impact_error() {
        let catalog = FeatureCatalog::default();
        let err = analyze_impact(&catalog, &key(&["x"])).unwrap_err();
        assert!(matches!(
            err,
            DomainError::UnknownFeature {
                query: QueryKind::Impact,
                ..
            }
        ));
    }
}

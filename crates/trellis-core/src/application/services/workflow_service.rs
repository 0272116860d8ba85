//! Workflow Service - removal and installation checks.
//!
//! Both workflows validate the selection the same way:
//! 1. Selection rules (always; unknown ids become findings)
//! 2. Pairwise compatibility (when every id is known)
//! 3. Impact estimate (removal only, when every id is known)

use std::{fmt, sync::Arc};

use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    application::{
        ports::CatalogSource,
        services::{CompatibilityChecker, GraphService, ImpactEstimator, SelectionValidator},
    },
    domain::{
        CanonicalKey, CompatibilityResult, FeatureCatalog, ImpactAnalysis, SelectionValidation,
    },
    error::TrellisResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Workflow {
    Removal,
    Installation,
}

impl Workflow {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Removal => "removal",
            Self::Installation => "installation",
        }
    }
}

impl fmt::Display for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Combined verdict of one workflow run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowReport {
    pub workflow: Workflow,
    pub features: Vec<String>,
    /// Selection valid and, when checked, compatible.
    pub passed: bool,
    pub warnings: Vec<String>,
    pub selection: Arc<SelectionValidation>,
    pub compatibility: Option<Arc<CompatibilityResult>>,
    pub impact: Option<Arc<ImpactAnalysis>>,
}

/// Owns every analysis service over one catalog snapshot.
#[derive(Debug)]
pub struct WorkflowService {
    catalog: Arc<FeatureCatalog>,
    graph: GraphService,
    compatibility: CompatibilityChecker,
    impact: ImpactEstimator,
    selection: SelectionValidator,
}

impl WorkflowService {
    pub fn new(catalog: Arc<FeatureCatalog>) -> Self {
        Self {
            graph: GraphService::new(Arc::clone(&catalog)),
            compatibility: CompatibilityChecker::new(Arc::clone(&catalog)),
            impact: ImpactEstimator::new(Arc::clone(&catalog)),
            selection: SelectionValidator::new(Arc::clone(&catalog)),
            catalog,
        }
    }

    /// Load the catalog through a port and build the services over it.
    #[instrument(skip_all, fields(source = %source.describe()))]
    pub fn from_source(source: &dyn CatalogSource) -> TrellisResult<Self> {
        let catalog = source.load()?;
        info!(features = catalog.len(), "Catalog loaded");
        Ok(Self::new(Arc::new(catalog)))
    }

    pub fn catalog(&self) -> &FeatureCatalog {
        &self.catalog
    }

    pub fn graph(&self) -> &GraphService {
        &self.graph
    }

    pub fn compatibility(&self) -> &CompatibilityChecker {
        &self.compatibility
    }

    pub fn impact(&self) -> &ImpactEstimator {
        &self.impact
    }

    pub fn selection(&self) -> &SelectionValidator {
        &self.selection
    }

    pub fn validate_removal<I, S>(&self, ids: I) -> TrellisResult<WorkflowReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run(Workflow::Removal, &CanonicalKey::new(ids))
    }

    pub fn validate_installation<I, S>(&self, ids: I) -> TrellisResult<WorkflowReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run(Workflow::Installation, &CanonicalKey::new(ids))
    }

    #[instrument(skip_all, fields(workflow = %workflow, key = %key))]
    pub fn run(&self, workflow: Workflow, key: &CanonicalKey) -> TrellisResult<WorkflowReport> {
        let selection = self.selection.validate_key(key);

        let all_known = !key.is_empty() && key.ids().iter().all(|id| self.catalog.contains(id));

        let compatibility = if all_known {
            Some(self.compatibility.check_key(key)?)
        } else {
            None
        };

        let impact = if all_known && workflow == Workflow::Removal {
            Some(self.impact.analyze_key(key)?)
        } else {
            None
        };

        let mut warnings: Vec<String> = selection
            .warnings
            .iter()
            .map(|w| w.message.clone())
            .collect();
        if let Some(result) = &compatibility {
            warnings.extend(result.warnings.iter().cloned());
        }
        if let Some(analysis) = impact.as_ref().filter(|a| a.has_breaking_changes) {
            warnings.push(format!(
                "Removal breaks {} dependent feature(s)",
                analysis.dependent_count
            ));
        }

        let passed = selection.valid && compatibility.as_ref().is_none_or(|c| c.compatible);

        info!(passed, warnings = warnings.len(), "Workflow validated");

        Ok(WorkflowReport {
            workflow,
            features: key.ids().to_vec(),
            passed,
            warnings,
            selection,
            compatibility,
            impact,
        })
    }

    /// Clear every owned cache.
    #[instrument(skip_all)]
    pub fn clear_cache(&self) {
        self.compatibility.clear_cache();
        self.impact.clear_cache();
        self.selection.clear_cache();
        info!("Analysis caches cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::ports::MockCatalogSource,
        application::ApplicationError,
        domain::{Feature, FeatureCategory, SelectionErrorCode},
        error::TrellisError,
    };

    fn catalog() -> FeatureCatalog {
        FeatureCatalog::new(vec![
            Feature::builder("core")
                .category(FeatureCategory::Framework)
                .removable(false)
                .build()
                .unwrap(),
            Feature::builder("auth")
                .category(FeatureCategory::Library)
                .dependency("core")
                .build()
                .unwrap(),
            Feature::builder("admin").dependency("auth").build().unwrap(),
            Feature::builder("jest").conflict("vitest").build().unwrap(),
            Feature::builder("vitest").build().unwrap(),
        ])
        .unwrap()
    }

    fn service() -> WorkflowService {
        WorkflowService::new(Arc::new(catalog()))
    }

    #[test]
    fn removal_runs_all_three_analyses() {
        let report = service().validate_removal(["admin"]).unwrap();

        assert_eq!(report.workflow, Workflow::Removal);
        assert!(report.compatibility.is_some());
        assert!(report.impact.is_some());
        // admin -> auth -> core all lie outside the selection
        assert!(!report.passed);
        assert!(
            report
                .selection
                .has_error(SelectionErrorCode::ProblematicDependencyChain)
        );
    }

    #[test]
    fn installation_skips_impact() {
        let report = service().validate_installation(["vitest"]).unwrap();
        assert!(report.passed);
        assert!(report.impact.is_none());
    }

    #[test]
    fn conflicting_install_fails() {
        let report = service().validate_installation(["jest", "vitest"]).unwrap();
        assert!(!report.passed);
        assert!(!report.compatibility.as_ref().unwrap().compatible);
    }

    #[test]
    fn unknown_ids_skip_compatibility() {
        let report = service().validate_removal(["ghost"]).unwrap();
        assert!(!report.passed);
        assert!(report.compatibility.is_none());
        assert!(report.selection.has_error(SelectionErrorCode::Missing));
    }

    #[test]
    fn breaking_removal_adds_warning() {
        let report = service().validate_removal(["vitest", "jest", "auth"]).unwrap();
        assert!(report.warnings.iter().any(|w| w.starts_with("Removal breaks 1")));
    }

    #[test]
    fn clear_cache_reaches_every_service() {
        let service = service();
        let first = service.validate_removal(["vitest"]).unwrap();
        service.clear_cache();
        let second = service.validate_removal(["vitest"]).unwrap();

        assert_eq!(first, second);
        assert!(!Arc::ptr_eq(&first.selection, &second.selection));
        assert_eq!(service.compatibility().cached_queries(), 1);
        assert_eq!(service.impact().cached_queries(), 1);
    }

    #[test]
    fn from_source_uses_port() {
        let mut source = MockCatalogSource::new();
        source.expect_load().times(1).returning(|| Ok(catalog()));
        source.expect_describe().return_const("mock".to_string());

        let service = WorkflowService::from_source(&source).unwrap();
        assert_eq!(service.catalog().len(), 5);
    }

    #[test]
    fn from_source_propagates_load_failure() {
        let mut source = MockCatalogSource::new();
        source.expect_load().returning(|| {
            Err(ApplicationError::CatalogLoad {
                source_name: "missing.toml".into(),
                reason: "not found".into(),
            }
            .into())
        });
        source.expect_describe().return_const("mock".to_string());

        let err = WorkflowService::from_source(&source).unwrap_err();
        assert!(matches!(err, TrellisError::Application(_)));
    }
}

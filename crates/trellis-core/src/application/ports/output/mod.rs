//! Driven (output) ports - implemented by infrastructure.

use crate::{
    application::services::WorkflowReport,
    domain::{CompatibilityResult, FeatureCatalog, ImpactAnalysis, SelectionValidation},
    error::TrellisResult,
};

/// Port for obtaining the feature catalog.
///
/// Implemented by:
/// - `trellis_adapters::catalog_source::FileCatalogSource` (one TOML/JSON manifest)
/// - `trellis_adapters::catalog_source::DirectoryCatalogSource` (tree of `feature.toml`)
/// - `trellis_adapters::catalog_source::InMemoryCatalogSource` (built-in and tests)
#[cfg_attr(test, mockall::automock)]
pub trait CatalogSource: Send + Sync {
    /// Load and validate the full catalog.
    fn load(&self) -> TrellisResult<FeatureCatalog>;

    /// Short description of where the catalog comes from, for logs.
    fn describe(&self) -> String;
}

/// Port for rendering analysis results as text.
///
/// Presentation only: implementations never change a verdict.
pub trait ReportFormatter: Send + Sync {
    fn compatibility(&self, result: &CompatibilityResult) -> String;

    fn impact(&self, analysis: &ImpactAnalysis) -> String;

    fn selection(&self, validation: &SelectionValidation) -> String;

    fn workflow(&self, report: &WorkflowReport) -> String;
}

//! Application services - orchestrate use cases.
//!
//! Every service shares one immutable catalog snapshot. The analysis
//! services memoize results per canonical feature set until `clear_cache`.

pub mod compatibility_checker;
pub mod graph_service;
pub mod impact_estimator;
pub mod selection_validator;
pub mod workflow_service;

pub use compatibility_checker::CompatibilityChecker;
pub use graph_service::GraphService;
pub use impact_estimator::ImpactEstimator;
pub use selection_validator::SelectionValidator;
pub use workflow_service::{Workflow, WorkflowReport, WorkflowService};

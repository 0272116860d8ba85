//! Application layer for Trellis.
//!
//! This layer contains:
//! - **Services**: Use case orchestration over a shared catalog snapshot
//! - **Cache**: Per-query result caches keyed by canonical feature set
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! Analysis rules live in `crate::domain`; this layer adds caching, logging
//! and catalog acquisition around them.

pub mod cache;
pub mod error;
pub mod ports;
pub mod services;

pub use cache::QueryCache;

pub use services::{
    CompatibilityChecker, GraphService, ImpactEstimator, SelectionValidator, Workflow,
    WorkflowReport, WorkflowService,
};

pub use ports::{CatalogSource, ReportFormatter};

pub use error::ApplicationError;

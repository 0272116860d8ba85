//! Trellis Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Trellis, the
//! feature dependency graph and compatibility engine for generated projects.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           trellis-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (WorkflowService, GraphService, ...)   │
//! │   Caching, logging, orchestration       │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   (CatalogSource, ReportFormatter)      │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    trellis-adapters (Infrastructure)    │
//! │ (FileCatalogSource, TextReportFormatter)│
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (FeatureCatalog, DependencyGraph, ...)  │
//! │         No I/O, no logging              │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use trellis_core::prelude::*;
//!
//! let catalog = FeatureCatalog::new(vec![
//!     Feature::builder("core").removable(false).build().unwrap(),
//!     Feature::builder("auth").dependency("core").build().unwrap(),
//! ])
//! .unwrap();
//!
//! let service = WorkflowService::new(Arc::new(catalog));
//! let report = service.validate_removal(["auth"]).unwrap();
//! assert!(!report.passed); // auth still needs core
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CompatibilityChecker, GraphService, ImpactEstimator, SelectionValidator, Workflow,
        WorkflowReport, WorkflowService,
        ports::{CatalogSource, ReportFormatter},
    };
    pub use crate::domain::{
        CanonicalKey, CompatibilityResult, DependencyGraph, Feature, FeatureBuilder,
        FeatureCatalog, FeatureCategory, ImpactAnalysis, RiskLevel, SelectionErrorCode,
        SelectionValidation, SelectionWarningCode, Severity,
    };
    pub use crate::error::{TrellisError, TrellisResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

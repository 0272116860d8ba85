//! Application ports (traits) for external dependencies.
//!
//! Adapters in `trellis-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `CatalogSource`: Feature catalog loading
//!   - `ReportFormatter`: Human-readable rendering of analysis results
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{CatalogSource, ReportFormatter};

#[cfg(test)]
pub use output::MockCatalogSource;

//! Infrastructure adapters for Trellis.
//!
//! This crate implements the ports defined in `trellis-core::application::ports`.
//! It contains all file I/O and manifest parsing.

pub mod builtin_catalog;
pub mod catalog_source;
pub mod formatter;
pub mod manifest;

// Re-export commonly used adapters
pub use catalog_source::{DirectoryCatalogSource, FileCatalogSource, InMemoryCatalogSource};
pub use formatter::TextReportFormatter;
pub use manifest::{CatalogManifest, FeatureManifest, ManifestError, ManifestFormat};

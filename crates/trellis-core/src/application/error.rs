//! Application layer errors.
//!
//! These errors represent failures around the analysis (loading a catalog,
//! wiring adapters), not findings of the analysis itself. Input defects of a
//! query are `DomainError` from `crate::domain`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Catalog source could not be read.
    #[error("Failed to load catalog from {source_name}: {reason}")]
    CatalogLoad { source_name: String, reason: String },

    /// Catalog source was read but its contents are malformed.
    #[error("Failed to parse catalog {source_name}: {reason}")]
    CatalogParse { source_name: String, reason: String },

    /// Catalog source access failed (lock poisoned).
    #[error("Catalog source error")]
    SourceLockError,

    /// No catalog source was configured.
    #[error("Required adapter not configured: {name}")]
    AdapterNotConfigured { name: &'static str },

    /// Report could not be rendered by a formatter.
    #[error("Report formatting failed: {reason}")]
    FormattingFailed { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::CatalogLoad { source_name, .. } => vec![
                format!("Could not read: {source_name}"),
                "Check that the path exists and is readable".into(),
                "Or pass a different catalog with --catalog".into(),
            ],
            Self::CatalogParse { source_name, .. } => vec![
                format!("Fix the manifest at: {source_name}"),
                "Catalogs are TOML or JSON with a top-level `features` list".into(),
            ],
            Self::SourceLockError => vec![
                "The catalog source is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::AdapterNotConfigured { name } => vec![
                format!("Required component not configured: {name}"),
                "This is likely a configuration error".into(),
            ],
            Self::FormattingFailed { .. } => vec!["Try a different --output-format".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CatalogLoad { .. } => ErrorCategory::NotFound,
            Self::CatalogParse { .. } => ErrorCategory::Validation,
            Self::AdapterNotConfigured { .. } => ErrorCategory::Configuration,
            Self::SourceLockError | Self::FormattingFailed { .. } => ErrorCategory::Internal,
        }
    }
}

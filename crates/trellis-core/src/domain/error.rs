// ============================================================================
// domain/error.rs - FEATURE GRAPH ERROR DOMAIN
// ============================================================================

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// The query that was running when an input defect was detected.
///
/// Lets callers tell apart an unknown id raised by the compatibility checker
/// from one raised by the impact estimator or a graph lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryKind {
    Graph,
    Compatibility,
    Impact,
}

impl QueryKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Graph => "graph",
            Self::Compatibility => "compatibility",
            Self::Impact => "impact",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root domain error type.
///
/// Only input defects live here. Rule violations (conflicts, cycles,
/// unmet dependencies) are findings inside result objects, never errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Input defects (404-level equivalent)
    // ========================================================================
    #[error("unknown feature '{id}' in {query} query")]
    UnknownFeature { id: String, query: QueryKind },

    // ========================================================================
    // Catalog construction errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid feature: {0}")]
    InvalidFeature(String),

    #[error("Duplicate feature id in catalog: {id}")]
    DuplicateFeature { id: String },

    #[error("unknown feature category: {0}")]
    UnknownCategory(String),

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownFeature { id, .. } => vec![
                format!("No feature with id '{id}' exists in the catalog"),
                "Try: trellis graph --summary to list known features".into(),
            ],
            Self::DuplicateFeature { id } => vec![
                format!("Feature '{id}' is declared more than once"),
                "Each feature id must be unique across the catalog".into(),
            ],
            Self::UnknownCategory(_) => vec![
                "Valid categories: framework, library, tool, other".into(),
            ],
            Self::InvalidFeature(msg) => vec![
                "Check the feature declaration in your catalog".into(),
                format!("Details: {msg}"),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownFeature { .. } => ErrorCategory::NotFound,
            Self::InvalidFeature(_)
            | Self::DuplicateFeature { .. }
            | Self::UnknownCategory(_)
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
        }
    }

    /// The offending id for input defects.
    pub fn feature_id(&self) -> Option<&str> {
        match self {
            Self::UnknownFeature { id, .. } | Self::DuplicateFeature { id } => Some(id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}

//! Domain value objects: FeatureCategory, EdgeKind, severities, CanonicalKey.
//!
//! # Design
//!
//! These are pure value types: `Copy` where possible, equality-by-value, no
//! identity. This file defines the types, their string representations and
//! their `FromStr` parsers. Scoring rules that read them live in `impact.rs`.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

// ── FeatureCategory ──────────────────────────────────────────────────────────

/// Coarse classification of a feature, ordered by how much of a generated
/// project it usually touches.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FeatureCategory {
    Framework,
    Library,
    Tool,
    #[default]
    Other,
}

impl FeatureCategory {
    pub const ALL: [FeatureCategory; 4] = [Self::Framework, Self::Library, Self::Tool, Self::Other];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Framework => "framework",
            Self::Library => "library",
            Self::Tool => "tool",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for FeatureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "framework" | "fw" => Ok(Self::Framework),
            "library" | "lib" => Ok(Self::Library),
            "tool" | "tooling" => Ok(Self::Tool),
            "other" => Ok(Self::Other),
            other => Err(DomainError::UnknownCategory(other.to_string())),
        }
    }
}

// ── EdgeKind ─────────────────────────────────────────────────────────────────

/// Type of a directed relation between two features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// `from` requires `to` to remain present.
    Depends,
    /// `from` cannot coexist with `to`.
    Conflicts,
}

impl EdgeKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Depends => "depends",
            Self::Conflicts => "conflicts",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Severity ─────────────────────────────────────────────────────────────────

/// Severity tag on a compatibility finding. Only `Error` blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── RiskLevel ────────────────────────────────────────────────────────────────

/// Four-step scale shared by per-feature severity and aggregate risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Map an aggregate risk score onto the scale.
    pub fn from_score(score: f64) -> Self {
        if score >= 200.0 {
            Self::Critical
        } else if score >= 100.0 {
            Self::High
        } else if score >= 50.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── CanonicalKey ─────────────────────────────────────────────────────────────

/// Order-independent identity of a requested feature-id set.
///
/// Ids are sorted and deduplicated; the key string joins them with `,`.
/// Two requests naming the same ids in any order, with or without repeats,
/// produce equal keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey {
    key: String,
    ids: Vec<String>,
}

impl CanonicalKey {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids: Vec<String> = ids
            .into_iter()
            .map(|id| id.as_ref().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        Self {
            key: ids.join(","),
            ids,
        }
    }

    /// The canonical id order (sorted, unique).
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.binary_search_by(|probe| probe.as_str().cmp(id)).is_ok()
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

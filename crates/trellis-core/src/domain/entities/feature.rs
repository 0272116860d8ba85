//! The `Feature` entity and its builder.
//!
//! A `Feature` is a named, optionally removable unit of generated-project
//! code with declared dependencies and conflicts. Features are immutable once
//! built; the catalog owns them and nothing in the core mutates them.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::domain::{error::DomainError, value_objects::FeatureCategory};

/// A single optional feature of a generated project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feature {
    id: String,
    name: String,
    description: Option<String>,
    category: FeatureCategory,
    removable: bool,
    dependencies: Vec<String>,
    dev_dependencies: Vec<String>,
    conflicts: BTreeSet<String>,
    files: Vec<String>,
}

impl Feature {
    /// Start building a feature with the given id.
    pub fn builder(id: impl Into<String>) -> FeatureBuilder {
        FeatureBuilder::new(id)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub const fn category(&self) -> FeatureCategory {
        self.category
    }

    pub const fn is_removable(&self) -> bool {
        self.removable
    }

    /// Declared dependencies in declaration order. May name ids that are not
    /// in the catalog.
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn dev_dependencies(&self) -> &[String] {
        &self.dev_dependencies
    }

    pub fn conflicts(&self) -> &BTreeSet<String> {
        &self.conflicts
    }

    /// Template files owned by this feature. A size hint for impact scoring.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn depends_on(&self, id: &str) -> bool {
        self.dependencies.iter().any(|d| d == id)
    }

    pub fn conflicts_with(&self, id: &str) -> bool {
        self.conflicts.contains(id)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.category)
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Builder for [`Feature`].
///
/// Repeated dependency entries are kept once, in first-seen order.
#[derive(Debug, Clone)]
pub struct FeatureBuilder {
    id: String,
    name: Option<String>,
    description: Option<String>,
    category: FeatureCategory,
    removable: bool,
    dependencies: Vec<String>,
    dev_dependencies: Vec<String>,
    conflicts: BTreeSet<String>,
    files: Vec<String>,
}

impl FeatureBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            description: None,
            category: FeatureCategory::default(),
            removable: true,
            dependencies: Vec::new(),
            dev_dependencies: Vec::new(),
            conflicts: BTreeSet::new(),
            files: Vec::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category(mut self, category: FeatureCategory) -> Self {
        self.category = category;
        self
    }

    pub fn removable(mut self, removable: bool) -> Self {
        self.removable = removable;
        self
    }

    pub fn dependency(mut self, id: impl Into<String>) -> Self {
        push_unique(&mut self.dependencies, id.into());
        self
    }

    pub fn dependencies<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for id in ids {
            push_unique(&mut self.dependencies, id.into());
        }
        self
    }

    pub fn dev_dependency(mut self, id: impl Into<String>) -> Self {
        push_unique(&mut self.dev_dependencies, id.into());
        self
    }

    pub fn dev_dependencies<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for id in ids {
            push_unique(&mut self.dev_dependencies, id.into());
        }
        self
    }

    pub fn conflict(mut self, id: impl Into<String>) -> Self {
        self.conflicts.insert(id.into());
        self
    }

    pub fn conflicts<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conflicts.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn file(mut self, path: impl Into<String>) -> Self {
        self.files.push(path.into());
        self
    }

    pub fn files<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Validate and build.
    ///
    /// Rejects empty ids and ids containing whitespace or `,` (the canonical
    /// key separator). Self-references are kept: they are data, and the
    /// cycle detector reports them.
    pub fn build(self) -> Result<Feature, DomainError> {
        validate_id(&self.id)?;

        for reference in self
            .dependencies
            .iter()
            .chain(&self.dev_dependencies)
            .chain(&self.conflicts)
        {
            if reference.trim().is_empty() {
                return Err(DomainError::InvalidFeature(format!(
                    "feature '{}' declares an empty reference",
                    self.id
                )));
            }
        }

        Ok(Feature {
            name: self.name.unwrap_or_else(|| self.id.clone()),
            id: self.id,
            description: self.description,
            category: self.category,
            removable: self.removable,
            dependencies: self.dependencies,
            dev_dependencies: self.dev_dependencies,
            conflicts: self.conflicts,
            files: self.files,
        })
    }
}

fn push_unique(list: &mut Vec<String>, id: String) {
    if !list.contains(&id) {
        list.push(id);
    }
}

fn validate_id(id: &str) -> Result<(), DomainError> {
    if id.is_empty() {
        return Err(DomainError::MissingRequiredField { field: "id" });
    }
    if id.chars().any(|c| c.is_whitespace() || c == ',') {
        return Err(DomainError::InvalidFeature(format!(
            "feature id '{id}' must not contain whitespace or ','"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let f = Feature::builder("auth").build().unwrap();
        assert_eq!(f.id(), "auth");
        assert_eq!(f.name(), "auth");
        assert_eq!(f.category(), FeatureCategory::Other);
        assert!(f.is_removable());
        assert!(f.dependencies().is_empty());
    }

    #[test]
    fn builder_keeps_dependency_order_and_drops_repeats() {
        let f = Feature::builder("api")
            .dependencies(["db", "auth", "db"])
            .dependency("auth")
            .build()
            .unwrap();
        assert_eq!(f.dependencies(), ["db", "auth"]);
    }

    #[test]
    fn builder_rejects_empty_id() {
        assert!(matches!(
            Feature::builder("").build(),
            Err(DomainError::MissingRequiredField { field: "id" })
        ));
    }

    #[test]
    fn builder_rejects_separator_in_id() {
        assert!(Feature::builder("a,b").build().is_err());
        assert!(Feature::builder("a b").build().is_err());
    }

    #[test]
    fn builder_rejects_blank_reference() {
        assert!(Feature::builder("a").dependency(" ").build().is_err());
    }

    #[test]
    fn self_dependency_is_allowed() {
        let f = Feature::builder("loop").dependency("loop").build().unwrap();
        assert!(f.depends_on("loop"));
    }
}

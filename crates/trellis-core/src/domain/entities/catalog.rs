//! The immutable feature catalog snapshot.

use std::collections::HashMap;

use crate::domain::{
    entities::feature::Feature,
    error::{DomainError, QueryKind},
};

/// An immutable, closed snapshot of every known feature.
///
/// Features keep their supplied order; lookups go through an id index.
/// Changing the feature set means building a new catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCatalog {
    features: Vec<Feature>,
    index: HashMap<String, usize>,
}

impl FeatureCatalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(features: Vec<Feature>) -> Result<Self, DomainError> {
        let mut index = HashMap::with_capacity(features.len());
        for (position, feature) in features.iter().enumerate() {
            if index.insert(feature.id().to_string(), position).is_some() {
                return Err(DomainError::DuplicateFeature {
                    id: feature.id().to_string(),
                });
            }
        }
        Ok(Self { features, index })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Feature> {
        self.index.get(id).map(|&i| &self.features[i])
    }

    /// Position of a feature in catalog order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Look up a feature or fail with an input-defect error tagged with the
    /// running query.
    pub fn require(&self, id: &str, query: QueryKind) -> Result<&Feature, DomainError> {
        self.get(id).ok_or_else(|| DomainError::UnknownFeature {
            id: id.to_string(),
            query,
        })
    }

    /// Resolve every id or fail naming the first unknown one.
    pub fn require_all<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a String>,
        query: QueryKind,
    ) -> Result<Vec<&Feature>, DomainError> {
        ids.into_iter().map(|id| self.require(id, query)).collect()
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(Feature::id)
    }
}

impl<'a> IntoIterator for &'a FeatureCatalog {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(id: &str) -> Feature {
        Feature::builder(id).build().unwrap()
    }

    #[test]
    fn catalog_preserves_order() {
        let catalog = FeatureCatalog::new(vec![feature("b"), feature("a")]).unwrap();
        assert_eq!(catalog.ids().collect::<Vec<_>>(), ["b", "a"]);
        assert_eq!(catalog.position("a"), Some(1));
    }

    #[test]
    fn catalog_rejects_duplicates() {
        let err = FeatureCatalog::new(vec![feature("a"), feature("a")]).unwrap_err();
        assert_eq!(err, DomainError::DuplicateFeature { id: "a".into() });
    }

    #[test]
    fn require_all_names_first_missing() {
        let catalog = FeatureCatalog::new(vec![feature("a")]).unwrap();
        let ids = vec!["a".to_string(), "x".to_string(), "y".to_string()];
        let err = catalog.require_all(&ids, QueryKind::Impact).unwrap_err();
        assert_eq!(
            err,
            DomainError::UnknownFeature {
                id: "x".into(),
                query: QueryKind::Impact
            }
        );
    }
}

//! In-memory catalog source with the built-in catalog.

use std::sync::{Arc, RwLock};

use trellis_core::{
    application::{ApplicationError, ports::CatalogSource},
    domain::{Feature, FeatureCatalog},
    error::{TrellisError, TrellisResult},
};

use crate::builtin_catalog;

/// Thread-safe in-memory feature list.
///
/// `insert` replaces a feature with the same id in place, so catalog order
/// is first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogSource {
    inner: Arc<RwLock<Vec<Feature>>>,
}

impl InMemoryCatalogSource {
    /// Create a new empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source holding `features`.
    pub fn from_features(features: impl IntoIterator<Item = Feature>) -> TrellisResult<Self> {
        let source = Self::new();
        for feature in features {
            source.insert(feature)?;
        }
        Ok(source)
    }

    /// Create a source with the built-in catalog loaded.
    pub fn with_builtin() -> TrellisResult<Self> {
        Self::from_features(builtin_catalog::all_features()?)
    }

    pub fn insert(&self, feature: Feature) -> TrellisResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::SourceLockError)?;

        match inner.iter_mut().find(|f| f.id() == feature.id()) {
            Some(slot) => *slot = feature,
            None => inner.push(feature),
        }
        Ok(())
    }

    pub fn remove(&self, id: &str) -> TrellisResult<bool> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::SourceLockError)?;
        let before = inner.len();
        inner.retain(|f| f.id() != id);
        Ok(inner.len() != before)
    }

    /// Get the number of features.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    /// Check if source is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all features.
    pub fn clear(&self) -> TrellisResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::SourceLockError)?;
        inner.clear();
        Ok(())
    }
}

impl CatalogSource for InMemoryCatalogSource {
    fn load(&self) -> TrellisResult<FeatureCatalog> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::SourceLockError)?;
        FeatureCatalog::new(inner.clone()).map_err(TrellisError::Domain)
    }

    fn describe(&self) -> String {
        format!("in-memory catalog ({} features)", self.len())
    }
}

//! Selection Validator - cached accept/reject decisions.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    application::QueryCache,
    domain::{CanonicalKey, FeatureCatalog, SelectionValidation, validate_selection},
};

/// Validates a selection for removal or installation. Never fails: unknown
/// ids are reported as findings.
#[derive(Debug)]
pub struct SelectionValidator {
    catalog: Arc<FeatureCatalog>,
    cache: QueryCache<SelectionValidation>,
}

impl SelectionValidator {
    pub fn new(catalog: Arc<FeatureCatalog>) -> Self {
        Self {
            catalog,
            cache: QueryCache::new(),
        }
    }

    pub fn validate<I, S>(&self, ids: I) -> Arc<SelectionValidation>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.validate_key(&CanonicalKey::new(ids))
    }

    #[instrument(skip_all, fields(key = %key))]
    pub fn validate_key(&self, key: &CanonicalKey) -> Arc<SelectionValidation> {
        let validation = self.cache.get_or_insert_with(key, || {
            debug!("Computing selection validation");
            validate_selection(&self.catalog, key)
        });

        debug!(
            valid = validation.valid,
            errors = validation.errors.len(),
            warnings = validation.warnings.len(),
            "Selection validated"
        );
        validation
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cached_queries(&self) -> usize {
        self.cache.len()
    }
}

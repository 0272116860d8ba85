//! Compatibility Checker - cached pairwise analysis.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    application::QueryCache,
    domain::{CanonicalKey, CompatibilityResult, FeatureCatalog, check_compatibility},
    error::TrellisResult,
};

/// Checks feature sets for conflicts and ordering constraints.
#[derive(Debug)]
pub struct CompatibilityChecker {
    catalog: Arc<FeatureCatalog>,
    cache: QueryCache<CompatibilityResult>,
}

impl CompatibilityChecker {
    pub fn new(catalog: Arc<FeatureCatalog>) -> Self {
        Self {
            catalog,
            cache: QueryCache::new(),
        }
    }

    /// Check `ids` in any order; repeats are ignored.
    ///
    /// Fails with an unknown-feature error naming the first missing id in
    /// sorted order.
    pub fn check<I, S>(&self, ids: I) -> TrellisResult<Arc<CompatibilityResult>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.check_key(&CanonicalKey::new(ids))
    }

    #[instrument(skip_all, fields(key = %key))]
    pub fn check_key(&self, key: &CanonicalKey) -> TrellisResult<Arc<CompatibilityResult>> {
        let result = self.cache.get_or_try_insert_with(key, || {
            debug!("Computing compatibility");
            check_compatibility(&self.catalog, key)
        })?;

        debug!(
            compatible = result.compatible,
            issues = result.issues.len(),
            "Compatibility checked"
        );
        Ok(result)
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cached_queries(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Feature;

    fn checker() -> CompatibilityChecker {
        let catalog = FeatureCatalog::new(vec![
            Feature::builder("jest").conflict("vitest").build().unwrap(),
            Feature::builder("vitest").build().unwrap(),
            Feature::builder("eslint").build().unwrap(),
        ])
        .unwrap();
        CompatibilityChecker::new(Arc::new(catalog))
    }

    #[test]
    fn permutations_share_one_result() {
        let checker = checker();
        let a = checker.check(["jest", "vitest"]).unwrap();
        let b = checker.check(["vitest", "jest", "jest"]).unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!a.compatible);
        assert_eq!(checker.cached_queries(), 1);
    }

    #[test]
    fn clear_cache_yields_fresh_equal_result() {
        let checker = checker();
        let a = checker.check(["eslint"]).unwrap();
        checker.clear_cache();
        let b = checker.check(["eslint"]).unwrap();

        assert_eq!(a, b);
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn unknown_ids_are_not_cached() {
        let checker = checker();
        assert!(checker.check(["jest", "mocha"]).is_err());
        assert_eq!(checker.cached_queries(), 0);
    }
}

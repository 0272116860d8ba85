//! Impact Estimator - cached removal impact analysis.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    application::QueryCache,
    domain::{CanonicalKey, FeatureCatalog, ImpactAnalysis, analyze_impact},
    error::TrellisResult,
};

/// Estimates what removing a feature set would touch.
#[derive(Debug)]
pub struct ImpactEstimator {
    catalog: Arc<FeatureCatalog>,
    cache: QueryCache<ImpactAnalysis>,
}

impl ImpactEstimator {
    pub fn new(catalog: Arc<FeatureCatalog>) -> Self {
        Self {
            catalog,
            cache: QueryCache::new(),
        }
    }

    pub fn analyze<I, S>(&self, ids: I) -> TrellisResult<Arc<ImpactAnalysis>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.analyze_key(&CanonicalKey::new(ids))
    }

    #[instrument(skip_all, fields(key = %key))]
    pub fn analyze_key(&self, key: &CanonicalKey) -> TrellisResult<Arc<ImpactAnalysis>> {
        let analysis = self.cache.get_or_try_insert_with(key, || {
            debug!("Computing impact");
            analyze_impact(&self.catalog, key)
        })?;

        debug!(
            risk = %analysis.risk_level,
            score = analysis.risk_score,
            dependents = analysis.dependent_count,
            "Impact analyzed"
        );
        Ok(analysis)
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
    use crate::domain::{Feature, FeatureCategory, RiskLevel};

    #[test]
    fn repeated_analysis_is_shared_until_cleared() {
        let catalog = FeatureCatalog::new(vec![
            Feature::builder("x")
                .category(FeatureCategory::Library)
                .build()
                .unwrap(),
        ])
        .unwrap();
        let estimator = ImpactEstimator::new(Arc::new(catalog));

        let first = estimator.analyze(["x"]).unwrap();
        let second = estimator.analyze(["x"]).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.impacts[0].severity, RiskLevel::High);

        estimator.clear_cache();
        let third = estimator.analyze(["x"]).unwrap();
        assert_eq!(*first, *third);
        assert!(!Arc::ptr_eq(&first, &third));
    }
}

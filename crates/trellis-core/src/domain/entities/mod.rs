pub mod catalog;
pub mod feature;

pub use crate::domain::DomainError;
pub use catalog::FeatureCatalog;
pub use feature::{Feature, FeatureBuilder};

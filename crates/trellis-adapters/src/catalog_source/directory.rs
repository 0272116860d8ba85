//! Directory-tree catalog source.
//!
//! # Directory layout expected
//!
//! ```text
//! features/
//! ├── auth/
//! │   └── feature.toml
//! ├── testing/
//! │   ├── jest/
//! │   │   └── feature.toml
//! │   └── vitest/
//! │       └── feature.toml
//! └── docker/
//!     └── feature.toml
//! ```
//!
//! Each `feature.toml` holds one feature at top level (`id = "auth"` and so
//! on). Manifests are visited in file-name order, so the catalog order is
//! stable across platforms.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use trellis_core::{
    application::{ApplicationError, ports::CatalogSource},
    domain::{Feature, FeatureCatalog},
    error::TrellisResult,
};

use crate::manifest::{FeatureManifest, ManifestError};

/// File name recognised as a feature manifest.
pub const FEATURE_MANIFEST: &str = "feature.toml";

/// Collects one feature per `feature.toml` found under a root directory.
///
/// Manifests that fail to parse are skipped with a `WARN` log so one bad
/// file does not hide the rest of the catalog. Duplicate ids across files
/// fail the whole load.
#[derive(Debug, Clone)]
pub struct DirectoryCatalogSource {
    root: PathBuf,
}

impl DirectoryCatalogSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn load_feature(path: &Path) -> Result<Feature, String> {
        let raw = fs::read_to_string(path).map_err(|e| e.to_string())?;
        let manifest: FeatureManifest =
            toml::from_str(&raw).map_err(|e| ManifestError::from(e).to_string())?;
        manifest.into_feature().map_err(|e| e.to_string())
    }
}

impl CatalogSource for DirectoryCatalogSource {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn load(&self) -> TrellisResult<FeatureCatalog> {
        if !self.root.is_dir() {
            return Err(ApplicationError::CatalogLoad {
                source_name: self.describe(),
                reason: "not a directory".into(),
            }
            .into());
        }

        let mut features = Vec::new();

        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(|e| ApplicationError::CatalogLoad {
                source_name: self.describe(),
                reason: format!("directory walk error: {e}"),
            })?;

            if !entry.file_type().is_file() || entry.file_name() != FEATURE_MANIFEST {
                continue;
            }

            match Self::load_feature(entry.path()) {
                Ok(feature) => {
                    debug!(id = %feature.id(), path = %entry.path().display(), "Loaded feature");
                    features.push(feature);
                }
                Err(reason) => {
                    warn!(
                        path = %entry.path().display(),
                        error = %reason,
                        "Skipping feature manifest due to load error"
                    );
                }
            }
        }

        let catalog = FeatureCatalog::new(features).map_err(|e| ApplicationError::CatalogParse {
            source_name: self.describe(),
            reason: e.to_string(),
        })?;

        debug!(count = catalog.len(), "Finished loading feature directory");
        Ok(catalog)
    }

    fn describe(&self) -> String {
        format!("{}/**/{FEATURE_MANIFEST}", self.root.display())
    }
}

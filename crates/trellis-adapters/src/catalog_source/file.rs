//! Single-manifest catalog source.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument};

use trellis_core::{
    application::{ApplicationError, ports::CatalogSource},
    domain::FeatureCatalog,
    error::TrellisResult,
};

use crate::manifest::{CatalogManifest, ManifestFormat};

/// Reads the whole catalog from one TOML or JSON manifest.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for FileCatalogSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> TrellisResult<FeatureCatalog> {
        let raw = fs::read_to_string(&self.path).map_err(|e| ApplicationError::CatalogLoad {
            source_name: self.describe(),
            reason: e.to_string(),
        })?;

        let format = ManifestFormat::from_path(&self.path);
        let catalog = CatalogManifest::parse(&raw, format)
            .and_then(CatalogManifest::into_catalog)
            .map_err(|e| ApplicationError::CatalogParse {
                source_name: self.describe(),
                reason: e.to_string(),
            })?;

        debug!(features = catalog.len(), ?format, "Parsed catalog manifest");
        Ok(catalog)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

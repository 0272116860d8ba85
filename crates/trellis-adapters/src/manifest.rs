//! Catalog manifest format.
//!
//! # `catalog.toml`
//!
//! ```toml
//! [[features]]
//! id               = "auth"
//! name             = "Authentication"   # optional, defaults to id
//! description      = "Session login"    # optional
//! category         = "library"          # framework | library | tool | other
//! removable        = true               # optional, defaults to true
//! dependencies     = ["core"]
//! dev_dependencies = ["test-utils"]
//! conflicts        = ["legacy-auth"]
//! files            = ["src/auth/mod.rs"]
//! ```
//!
//! JSON with the same shape (`{"features": [...]}`) is accepted too. A
//! `feature.toml` in a directory catalog holds one feature at top level.

use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use trellis_core::domain::{DomainError, Feature, FeatureCatalog, FeatureCategory};

/// Whole-catalog manifest.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct CatalogManifest {
    #[serde(default)]
    pub features: Vec<FeatureManifest>,
}

/// One `[[features]]` entry, or the body of a `feature.toml`.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct FeatureManifest {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(default = "default_removable")]
    pub removable: bool,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub dev_dependencies: Vec<String>,
    #[serde(default)]
    pub conflicts: Vec<String>,
    #[serde(default)]
    pub files: Vec<String>,
}

fn default_removable() -> bool {
    true
}

/// Which syntax a manifest is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Toml,
    Json,
}

impl ManifestFormat {
    /// `.json` is JSON; everything else is read as TOML.
    pub fn from_path(path: &std::path::Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Failure to turn manifest text into a catalog.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("feature '{id}': {source}")]
    Feature {
        id: String,
        #[source]
        source: DomainError,
    },

    #[error(transparent)]
    Catalog(#[from] DomainError),
}

impl FeatureManifest {
    pub fn into_feature(self) -> Result<Feature, ManifestError> {
        let id = self.id.clone();
        let wrap = |source| ManifestError::Feature {
            id: id.clone(),
            source,
        };

        let mut builder = Feature::builder(self.id)
            .removable(self.removable)
            .dependencies(self.dependencies)
            .dev_dependencies(self.dev_dependencies)
            .conflicts(self.conflicts)
            .files(self.files.iter().map(|f| normalize_path(f)));

        if let Some(name) = self.name {
            builder = builder.name(name);
        }
        if let Some(description) = self.description {
            builder = builder.description(description);
        }
        if let Some(category) = &self.category {
            builder = builder.category(FeatureCategory::from_str(category).map_err(wrap)?);
        }

        builder.build().map_err(wrap)
    }
}

impl CatalogManifest {
    pub fn parse(raw: &str, format: ManifestFormat) -> Result<Self, ManifestError> {
        Ok(match format {
            ManifestFormat::Toml => toml::from_str(raw)?,
            ManifestFormat::Json => serde_json::from_str(raw)?,
        })
    }

    pub fn into_catalog(self) -> Result<FeatureCatalog, ManifestError> {
        let features = self
            .features
            .into_iter()
            .map(FeatureManifest::into_feature)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FeatureCatalog::new(features)?)
    }
}

/// Forward slashes only, no leading `./`.
pub fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    path.strip_prefix("./").unwrap_or(&path).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[features]]
id = "core"
category = "framework"
removable = false

[[features]]
id = "auth"
name = "Authentication"
category = "lib"
dependencies = ["core"]
dev_dependencies = ["test-utils"]
conflicts = ["legacy-auth"]
files = ["./src/auth/mod.rs", "src\\auth\\session.rs"]
"#;

    #[test]
    fn parses_toml_catalog() {
        let catalog = CatalogManifest::parse(SAMPLE, ManifestFormat::Toml)
            .unwrap()
            .into_catalog()
            .unwrap();

        assert_eq!(catalog.len(), 2);
        let core = catalog.get("core").unwrap();
        assert!(!core.is_removable());
        assert_eq!(core.category(), FeatureCategory::Framework);

        let auth = catalog.get("auth").unwrap();
        assert_eq!(auth.name(), "Authentication");
        assert_eq!(auth.category(), FeatureCategory::Library);
        assert!(auth.depends_on("core"));
        assert!(auth.conflicts_with("legacy-auth"));
        assert_eq!(auth.files(), ["src/auth/mod.rs", "src/auth/session.rs"]);
    }

    #[test]
    fn parses_json_with_same_shape() {
        let raw = r#"{"features": [{"id": "a", "dependencies": ["b"]}, {"id": "b"}]}"#;
        let catalog = CatalogManifest::parse(raw, ManifestFormat::Json)
            .unwrap()
            .into_catalog()
            .unwrap();
        assert!(catalog.get("a").unwrap().depends_on("b"));
        assert!(catalog.get("b").unwrap().is_removable());
    }

    #[test]
    fn unknown_category_names_the_feature() {
        let raw = "[[features]]\nid = \"x\"\ncategory = \"plugin\"\n";
        let err = CatalogManifest::parse(raw, ManifestFormat::Toml)
            .unwrap()
            .into_catalog()
            .unwrap_err();
        assert!(matches!(err, ManifestError::Feature { ref id, .. } if id == "x"));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let raw = "[[features]]\nid = \"x\"\n\n[[features]]\nid = \"x\"\n";
        let err = CatalogManifest::parse(raw, ManifestFormat::Toml)
            .unwrap()
            .into_catalog()
            .unwrap_err();
        assert!(matches!(
            err,
            ManifestError::Catalog(DomainError::DuplicateFeature { .. })
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let raw = "[[features]]\nid = \"x\"\nrequires = [\"y\"]\n";
        assert!(CatalogManifest::parse(raw, ManifestFormat::Toml).is_err());
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            ManifestFormat::from_path("catalog.JSON".as_ref()),
            ManifestFormat::Json
        );
        assert_eq!(
            ManifestFormat::from_path("catalog.toml".as_ref()),
            ManifestFormat::Toml
        );
    }
}

//! Command handlers, one module per subcommand.

pub mod check;
pub mod completions;
pub mod config;
pub mod deps;
pub mod graph;
pub mod impact;
pub mod path;
pub mod validate;

use tracing::info;

use trellis_adapters::{DirectoryCatalogSource, FileCatalogSource, InMemoryCatalogSource};
use trellis_core::{
    application::{WorkflowService, ports::CatalogSource},
    domain::{DomainError, QueryKind},
    error::TrellisError,
};

use crate::{cli::GlobalArgs, config::AppConfig, error::CliResult};

/// Pick the catalog source: `--catalog`, then `catalog.path`, then built-in.
pub fn catalog_source(global: &GlobalArgs, config: &AppConfig) -> CliResult<Box<dyn CatalogSource>> {
    let path = global
        .catalog
        .clone()
        .or_else(|| config.catalog.path.clone());

    let source: Box<dyn CatalogSource> = match path {
        Some(path) if path.is_dir() => Box::new(DirectoryCatalogSource::new(path)),
        Some(path) => Box::new(FileCatalogSource::new(path)),
        None => Box::new(InMemoryCatalogSource::with_builtin()?),
    };
    Ok(source)
}

/// Load the catalog and build the analysis services over it.
pub fn open_workflow(global: &GlobalArgs, config: &AppConfig) -> CliResult<WorkflowService> {
    let source = catalog_source(global, config)?;
    let service = WorkflowService::from_source(source.as_ref())?;
    info!(
        source = %source.describe(),
        features = service.catalog().len(),
        "Catalog ready"
    );
    Ok(service)
}

/// Fail with an unknown-feature error for the first id missing from the catalog.
pub fn require_known(service: &WorkflowService, ids: &[String], query: QueryKind) -> CliResult<()> {
    match ids.iter().find(|id| !service.catalog().contains(id)) {
        Some(id) => Err(TrellisError::from(DomainError::UnknownFeature {
            id: id.clone(),
            query,
        })
        .into()),
        None => Ok(()),
    }
}

//! Implementation of `trellis deps`.

use serde::Serialize;
use tracing::instrument;

use crate::{
    cli::{DepsArgs, GlobalArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct DepsReport<'a> {
    feature: &'a str,
    direction: &'static str,
    features: Vec<String>,
}

#[instrument(skip_all, fields(id = %args.id, reverse = args.reverse))]
pub fn execute(
    args: DepsArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let service = super::open_workflow(global, config)?;

    let (direction, features) = if args.reverse {
        ("dependents", service.graph().reverse_dependencies(&args.id)?)
    } else {
        ("dependencies", service.graph().transitive_dependencies(&args.id)?)
    };
    let features: Vec<String> = features.into_iter().collect();

    if output.is_json() {
        return output.json(&DepsReport {
            feature: &args.id,
            direction,
            features,
        });
    }

    if features.is_empty() {
        output.info(&format!("'{}' has no {direction}", args.id))?;
        return Ok(());
    }

    output.header(&format!(
        "{} transitive {direction} of '{}':",
        features.len(),
        args.id
    ))?;
    for feature in &features {
        output.print(&format!("  {feature}"))?;
    }
    Ok(())
}

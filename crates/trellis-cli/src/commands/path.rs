//! Implementation of `trellis path`.

use serde::Serialize;
use tracing::instrument;

use trellis_core::domain::QueryKind;

use crate::{
    cli::{GlobalArgs, PathArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct PathReport<'a> {
    from: &'a str,
    to: &'a str,
    path: Option<Vec<String>>,
}

#[instrument(skip_all, fields(from = %args.from, to = %args.to))]
pub fn execute(
    args: PathArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let service = super::open_workflow(global, config)?;
    super::require_known(
        &service,
        &[args.from.clone(), args.to.clone()],
        QueryKind::Graph,
    )?;

    let path = service.graph().dependency_path(&args.from, &args.to);

    if output.is_json() {
        return output.json(&PathReport {
            from: &args.from,
            to: &args.to,
            path,
        });
    }

    match path {
        Some(path) => output.print(&path.join(" → "))?,
        None => output.info(&format!(
            "'{}' does not depend on '{}'",
            args.from, args.to
        ))?,
    }
    Ok(())
}

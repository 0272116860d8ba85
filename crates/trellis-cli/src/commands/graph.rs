//! Implementation of `trellis graph`.

use tracing::instrument;

use trellis_core::domain::{QueryKind, summarize_graph, visualize_ascii};

use crate::{
    cli::{GlobalArgs, GraphArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(summary = args.summary, focus = ?args.focus))]
pub fn execute(
    args: GraphArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let service = super::open_workflow(global, config)?;

    let graph = if args.focus.is_empty() {
        service.graph().create_graph()
    } else {
        super::require_known(&service, &args.focus, QueryKind::Graph)?;
        service.graph().subgraph(&args.focus)
    };

    if output.is_json() {
        return output.json(&graph);
    }

    if args.summary {
        output.block(&summarize_graph(&graph))?;
    } else {
        output.header("Feature dependency tree (dependencies above dependents)")?;
        output.block(&visualize_ascii(&graph))?;
    }

    if !graph.unresolved().is_empty() {
        output.warning(&format!(
            "{} reference(s) point at features missing from the catalog",
            graph.unresolved().len()
        ))?;
    }
    Ok(())
}

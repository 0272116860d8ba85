//! Implementation of `trellis impact`.

use tracing::instrument;

use trellis_adapters::TextReportFormatter;
use trellis_core::{application::ports::ReportFormatter, domain::RiskLevel};

use crate::{
    cli::{GlobalArgs, ImpactArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(features = ?args.features))]
pub fn execute(
    args: ImpactArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let service = super::open_workflow(global, config)?;
    let analysis = service.impact().analyze(&args.features)?;

    if output.is_json() {
        return output.json(&*analysis);
    }

    let formatter = if args.summary {
        TextReportFormatter::summary_only()
    } else {
        TextReportFormatter::new()
    };
    output.block(&formatter.impact(&analysis))?;

    match analysis.risk_level {
        RiskLevel::Critical | RiskLevel::High => {
            output.warning(&format!("{} risk removal", analysis.risk_level))?
        }
        RiskLevel::Medium | RiskLevel::Low => {
            output.info(&format!("{} risk removal", analysis.risk_level))?
        }
    }
    Ok(())
}

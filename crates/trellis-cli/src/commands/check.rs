//! Implementation of `trellis check`.

use tracing::instrument;

use trellis_adapters::TextReportFormatter;
use trellis_core::application::ports::ReportFormatter;

use crate::{
    cli::{CheckArgs, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(features = ?args.features))]
pub fn execute(
    args: CheckArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let service = super::open_workflow(global, config)?;
    let result = service.compatibility().check(&args.features)?;

    if output.is_json() {
        output.json(&*result)?;
    } else {
        output.block(&TextReportFormatter::new().compatibility(&result))?;
        if result.compatible {
            output.success("Features are compatible")?;
        } else {
            output.error("Features are incompatible")?;
        }
    }

    if result.compatible {
        Ok(())
    } else {
        Err(CliError::Incompatible {
            features: result.features.join(", "),
            conflicts: result.error_count(),
        })
    }
}

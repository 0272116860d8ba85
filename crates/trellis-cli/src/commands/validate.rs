//! Implementation of `trellis validate`.

use tracing::instrument;

use trellis_adapters::TextReportFormatter;
use trellis_core::{
    application::{Workflow, ports::ReportFormatter},
    domain::CanonicalKey,
};

use crate::{
    cli::{GlobalArgs, ValidateArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(features = ?args.features, install = args.install))]
pub fn execute(
    args: ValidateArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let workflow = if args.install {
        Workflow::Installation
    } else {
        Workflow::Removal
    };

    let service = super::open_workflow(global, config)?;
    let report = service.run(workflow, &CanonicalKey::new(&args.features))?;

    if output.is_json() {
        output.json(&report)?;
    } else {
        output.block(&TextReportFormatter::new().workflow(&report))?;
        if report.passed {
            output.success(&format!("Selection can go ahead with the {workflow}"))?;
        } else {
            output.error(&format!("Selection blocked for {workflow}"))?;
        }
    }

    if report.passed {
        Ok(())
    } else {
        Err(CliError::SelectionRejected {
            workflow,
            features: if report.features.is_empty() {
                "an empty selection".into()
            } else {
                report.features.join(", ")
            },
        })
    }
}

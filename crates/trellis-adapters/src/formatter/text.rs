//! Plain-text report rendering.
//!
//! Output is uncoloured and line-oriented; the CLI decides on styling.

use std::fmt::Write;

use trellis_core::{
    application::{Workflow, WorkflowReport, ports::ReportFormatter},
    domain::{CompatibilityResult, ImpactAnalysis, SelectionValidation, Severity},
};

/// Renders analysis results as indented plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReportFormatter {
    /// Include per-feature impact rows.
    pub detailed: bool,
}

impl TextReportFormatter {
    pub fn new() -> Self {
        Self { detailed: true }
    }

    pub fn summary_only() -> Self {
        Self { detailed: false }
    }
}

fn bullet_list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "  {title}:");
    for item in items {
        let _ = writeln!(out, "    - {item}");
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn marker(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "✗",
        Severity::Warning => "!",
        Severity::Info => "·",
    }
}

impl ReportFormatter for TextReportFormatter {
    fn compatibility(&self, result: &CompatibilityResult) -> String {
        let mut out = String::new();
        let errors = result.error_count();
        let warnings = result.issues.len() - errors;

        let _ = writeln!(out, "Compatibility: {}", result.features.join(", "));
        let _ = writeln!(
            out,
            "  Status: {} ({}, {})",
            if result.compatible { "compatible" } else { "incompatible" },
            plural(errors, "error"),
            plural(warnings, "warning")
        );
        for issue in &result.issues {
            let mutual = if issue.mutual { " (mutual)" } else { "" };
            let _ = writeln!(
                out,
                "  {} [{}] {}{mutual}",
                marker(issue.severity),
                issue.kind,
                issue.message
            );
        }
        bullet_list(&mut out, "Warnings", &result.warnings);
        bullet_list(&mut out, "Suggestions", &result.suggestions);
        out
    }

    fn impact(&self, analysis: &ImpactAnalysis) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "Impact: {}", analysis.features.join(", "));
        let _ = writeln!(
            out,
            "  Risk: {} (score {:.1})",
            analysis.risk_level, analysis.risk_score
        );
        let _ = writeln!(
            out,
            "  Files: {}  Lines: ~{}  Breaking: {}",
            analysis.total_files,
            analysis.total_lines,
            if analysis.has_breaking_changes { "yes" } else { "no" }
        );

        if self.detailed {
            let _ = writeln!(out, "  Features:");
            for impact in &analysis.impacts {
                let _ = write!(
                    out,
                    "    - {} [{}] severity {}, {}, ~{} lines",
                    impact.feature,
                    impact.category,
                    impact.severity,
                    plural(impact.estimated_files, "file"),
                    impact.estimated_lines_removed
                );
                if !impact.dependent_features.is_empty() {
                    let _ = write!(out, ", dependents: {}", impact.dependent_features.join(", "));
                }
                out.push('\n');
            }
        }

        bullet_list(&mut out, "Recommendations", &analysis.recommendations);
        out
    }

    fn selection(&self, validation: &SelectionValidation) -> String {
        let mut out = String::new();

        let features = if validation.features.is_empty() {
            "(none)".to_string()
        } else {
            validation.features.join(", ")
        };
        let _ = writeln!(out, "Selection: {features}");
        let _ = writeln!(
            out,
            "  Status: {}",
            if validation.valid { "valid" } else { "invalid" }
        );

        if !validation.errors.is_empty() {
            let _ = writeln!(out, "  Errors:");
            for error in &validation.errors {
                let _ = writeln!(out, "    ✗ [{}] {}", error.code, error.message);
            }
        }
        if !validation.warnings.is_empty() {
            let _ = writeln!(out, "  Warnings:");
            for warning in &validation.warnings {
                let _ = writeln!(out, "    ! [{}] {}", warning.code, warning.message);
            }
        }
        bullet_list(&mut out, "Suggestions", &validation.suggestions);
        out
    }

    fn workflow(&self, report: &WorkflowReport) -> String {
        let mut out = String::new();

        let title = match report.workflow {
            Workflow::Removal => "Removal check",
            Workflow::Installation => "Installation check",
        };
        let _ = writeln!(
            out,
            "{title}: {}",
            if report.passed { "PASSED" } else { "FAILED" }
        );
        out.push('\n');
        out.push_str(&self.selection(&report.selection));

        if let Some(result) = &report.compatibility {
            out.push('\n');
            out.push_str(&self.compatibility(result));
        }
        if let Some(analysis) = &report.impact {
            out.push('\n');
            out.push_str(&self.impact(analysis));
        }
        if !report.warnings.is_empty() {
            out.push('\n');
            let _ = writeln!(out, "Warnings ({}):", report.warnings.len());
            for warning in &report.warnings {
                let _ = writeln!(out, "  - {warning}");
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use trellis_core::{
        application::WorkflowService,
        domain::{Feature, FeatureCatalog, FeatureCategory},
    };

    fn service() -> WorkflowService {
        let catalog = FeatureCatalog::new(vec![
            Feature::builder("react")
                .category(FeatureCategory::Framework)
                .files(["src/App.tsx"])
                .build()
                .unwrap(),
            Feature::builder("router")
                .category(FeatureCategory::Library)
                .dependency("react")
                .build()
                .unwrap(),
            Feature::builder("jest").conflict("vitest").build().unwrap(),
            Feature::builder("vitest").conflict("jest").build().unwrap(),
        ])
        .unwrap();
        WorkflowService::new(Arc::new(catalog))
    }

    #[test]
    fn compatibility_lists_issues_with_markers() {
        let service = service();
        let result = service.compatibility().check(["jest", "vitest"]).unwrap();
        let text = TextReportFormatter::new().compatibility(&result);

        assert!(text.starts_with("Compatibility: jest, vitest\n"));
        assert!(text.contains("Status: incompatible (1 error, 0 warnings)"));
        assert!(text.contains("✗ [conflict]"));
        assert!(text.contains("(mutual)"));
    }

    #[test]
    fn impact_rows_respect_detail_flag() {
        let service = service();
        let analysis = service.impact().analyze(["react"]).unwrap();

        let detailed = TextReportFormatter::new().impact(&analysis);
        assert!(detailed.contains(
            "- react [framework] severity critical, 1 file, ~2000 lines, dependents: router"
        ));

        let summary = TextReportFormatter::summary_only().impact(&analysis);
        assert!(!summary.contains("Features:"));
        assert!(summary.contains("Recommendations:"));
    }

    #[test]
    fn selection_shows_codes() {
        let service = service();
        let validation = service.selection().validate(["router"]);
        let text = TextReportFormatter::new().selection(&validation);

        assert!(text.contains("Status: invalid"));
        assert!(text.contains("[PROBLEMATIC_DEPENDENCY_CHAIN]"));
        assert!(text.contains("[UNMET_DEPENDENCY]"));
    }

    #[test]
    fn workflow_includes_every_section() {
        let service = service();
        let report = service.validate_removal(["router"]).unwrap();
        let text = TextReportFormatter::new().workflow(&report);

        assert!(text.starts_with("Removal check: FAILED"));
        assert!(text.contains("Selection: router"));
        assert!(text.contains("Compatibility: router"));
        assert!(text.contains("Impact: router"));
    }
}

//! Output formatting for the checker.

use clap::ValueEnum;
use relmod_lifecycle::Ownership;
use relmod_validator::ValidationReport;
use serde::Serialize;

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One line per finding: severity:code:entities:message
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    valid: bool,
    exit_code: i32,
    #[serde(flatten)]
    report: &'a ValidationReport,
}

/// Render a validation report.
pub fn format_report(report: &ValidationReport, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(report.to_string()),
        OutputFormat::Json => {
            let json = JsonReport {
                valid: report.is_valid(),
                exit_code: report.exit_code(),
                report,
            };
            serde_json::to_string_pretty(&json).map(|s| s + "\n")
        }
    }
}

/// Render derived ownership.
pub fn format_ownership(ownership: &Ownership, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(ownership.to_string()),
        OutputFormat::Json => serde_json::to_string_pretty(ownership).map(|s| s + "\n"),
    }
}

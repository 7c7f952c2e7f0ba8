//! Report generation with multiple output formats
//!
//! CDD Principle: Anti-Corruption Layer - Formatters translate domain objects to external formats
//! - ValidationReport (domain) is converted to various external representations
//! - The plain format is the `path:line: message` shape a host lint engine prints
//! - Domain logic remains pure while supporting multiple presentation needs

use crate::domain::violations::{Severity, StyleError, StyleResult, ValidationReport, Violation};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::path::Path;

/// Supported output formats for validation reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format with colors and context
    Human,
    /// JSON format for programmatic consumption
    Json,
    /// One `path:line: message` line per violation
    Plain,
    /// GitHub Actions format for workflow integration
    GitHub,
}

/// Options for customizing report output
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Whether to use colored output (for human format)
    pub use_colors: bool,
    /// Whether to show the offending source line under each violation
    pub show_context: bool,
    /// Maximum number of violations to include
    pub max_violations: Option<usize>,
    /// Minimum severity level to include
    pub min_severity: Option<Severity>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { use_colors: true, show_context: true, max_violations: None, min_severity: None }
    }
}

/// Main report formatter that dispatches to specific formatters
pub struct ReportFormatter {
    options: ReportOptions,
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new(ReportOptions::default())
    }
}

impl ReportFormatter {
    /// Create a new report formatter with options
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Format a validation report in the specified format
    pub fn format_report(
        &self,
        report: &ValidationReport,
        format: OutputFormat,
    ) -> StyleResult<String> {
        let filtered_violations = self.filter_violations(&report.violations);

        match format {
            OutputFormat::Human => Ok(self.format_human(report, &filtered_violations)),
            OutputFormat::Json => self.format_json(report, &filtered_violations),
            OutputFormat::Plain => Ok(self.format_plain(&filtered_violations)),
            OutputFormat::GitHub => Ok(self.format_github(&filtered_violations)),
        }
    }

    /// Filter violations based on report options
    fn filter_violations<'a>(&self, violations: &'a [Violation]) -> Vec<&'a Violation> {
        let mut filtered: Vec<&Violation> = violations
            .iter()
            .filter(|v| self.options.min_severity.map_or(true, |min| v.severity >= min))
            .collect();

        if let Some(max) = self.options.max_violations {
            filtered.truncate(max);
        }

        filtered
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.options.use_colors {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    /// Format report in human-readable format
    fn format_human(&self, report: &ValidationReport, violations: &[&Violation]) -> String {
        let mut output = String::new();

        if violations.is_empty() {
            output.push_str(&format!("✅ {}\n", self.paint("32", "No style violations found")));
        } else {
            let (icon, color) = if report.has_errors() { ("❌", "31") } else { ("⚠️", "33") };
            output.push_str(&format!("{} {}\n\n", icon, self.paint(color, "Style Violations Found")));

            let mut by_file: BTreeMap<&Path, Vec<&Violation>> = BTreeMap::new();
            for violation in violations {
                by_file.entry(&violation.file_path).or_default().push(violation);
            }

            for (file_path, file_violations) in by_file {
                output.push_str(&format!("📁 {}\n", file_path.display()));

                for violation in file_violations {
                    let severity_color = match violation.severity {
                        Severity::Error => "31",
                        Severity::Warning => "33",
                        Severity::Info => "36",
                    };

                    let position = violation
                        .line_number
                        .map_or_else(|| "?".to_string(), |line| line.to_string());

                    output.push_str(&format!(
                        "  {} [{}] {}\n",
                        self.paint("2", &format!("{}:{}", position, violation.rule_id)),
                        self.paint(severity_color, violation.severity.as_str()),
                        violation.message
                    ));

                    if self.options.show_context {
                        if let Some(context) = violation.context.as_deref().filter(|c| !c.trim().is_empty()) {
                            output.push_str(&format!("    {}\n", self.paint("2", &format!("│ {context}"))));
                        }
                    }

                    output.push('\n');
                }
            }
        }

        output.push_str(&self.format_summary(report));
        output
    }

    /// Format report in JSON format
    fn format_json(&self, report: &ValidationReport, violations: &[&Violation]) -> StyleResult<String> {
        let json_violations: Vec<JsonValue> = violations
            .iter()
            .map(|v| {
                serde_json::json!({
                    "rule_id": v.rule_id,
                    "severity": v.severity.as_str(),
                    "file_path": v.file_path.display().to_string(),
                    "line_number": v.line_number,
                    "message": v.message,
                    "context": v.context,
                    "detected_at": v.detected_at.to_rfc3339()
                })
            })
            .collect();

        let json_report = serde_json::json!({
            "violations": json_violations,
            "summary": {
                "total_files": report.summary.total_files,
                "violations_by_severity": {
                    "error": report.summary.violations_by_severity.error,
                    "warning": report.summary.violations_by_severity.warning,
                    "info": report.summary.violations_by_severity.info
                },
                "execution_time_ms": report.summary.execution_time_ms,
                "validated_at": report.summary.validated_at.to_rfc3339()
            },
            "config_fingerprint": report.config_fingerprint
        });

        serde_json::to_string_pretty(&json_report)
            .map_err(|e| StyleError::validation(format!("JSON serialization failed: {e}")))
    }

    /// Format report the way a host lint engine prints diagnostics
    fn format_plain(&self, violations: &[&Violation]) -> String {
        let mut output = String::new();

        for violation in violations {
            match violation.line_number {
                Some(line) => output.push_str(&format!(
                    "{}:{}: {}\n",
                    violation.file_path.display(),
                    line,
                    violation.message
                )),
                None => output.push_str(&format!(
                    "{}: {}\n",
                    violation.file_path.display(),
                    violation.message
                )),
            }
        }

        output
    }

    /// Format report for GitHub Actions
    fn format_github(&self, violations: &[&Violation]) -> String {
        let mut output = String::new();

        for violation in violations {
            let level = match violation.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
                Severity::Info => "notice",
            };

            let position_part =
                violation.line_number.map(|line| format!(",line={line}")).unwrap_or_default();

            output.push_str(&format!(
                "::{} file={}{},title={}::{}\n",
                level,
                violation.file_path.display(),
                position_part,
                violation.rule_id,
                violation.message
            ));
        }

        output
    }

    /// Format the summary section
    fn format_summary(&self, report: &ValidationReport) -> String {
        let counts = &report.summary.violations_by_severity;
        let execution_time = (report.summary.execution_time_ms as f64) / 1000.0;
        let mut summary = format!("📊 {} ", self.paint("1", "Summary:"));

        if counts.total() == 0 {
            summary.push_str(&format!(
                "{} in {} files ({:.1}s)\n",
                self.paint("32", "0 violations"),
                report.summary.total_files,
                execution_time
            ));
            return summary;
        }

        let mut parts = Vec::new();

        if counts.error > 0 {
            let text = format!("{} error{}", counts.error, if counts.error == 1 { "" } else { "s" });
            parts.push(self.paint("31", &text));
        }

        if counts.warning > 0 {
            let text =
                format!("{} warning{}", counts.warning, if counts.warning == 1 { "" } else { "s" });
            parts.push(self.paint("33", &text));
        }

        if counts.info > 0 {
            parts.push(self.paint("36", &format!("{} info", counts.info)));
        }

        summary.push_str(&format!(
            "{} in {} files ({:.1}s)\n",
            parts.join(", "),
            report.summary.total_files,
            execution_time
        ));

        summary
    }
}

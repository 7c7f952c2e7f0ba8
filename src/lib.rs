//! Style Guardian - Hungarian naming and Javadoc template checks
//!
//! Architecture: Clean Architecture - Library interface serves as the application layer
//! - The checks see host syntax nodes through narrow traits and never parse source
//! - A host embeds the checks directly or writes JSON syntax dumps for the bundled CLI
//! - Configuration, discovery and reporting wrap the checks without leaking into them

pub mod analyzer;
pub mod config;
pub mod domain;
pub mod patterns;
pub mod report;

// Re-export main types for convenient access
pub use domain::syntax::{
    Declaration, DeclarationNode, DeclarationRole, Definition, DefinitionKind, DefinitionNode,
    DiagnosticSink, DocBlock, PrimitiveKind, SourceLines, SourceUnit, TypeRef,
};
pub use domain::violations::{
    Finding, RuleId, Severity, StyleError, StyleResult, ValidationReport, ValidationSummary,
    Violation,
};

pub use config::{CheckConfig, ConfigBuilder, StyleConfig};

pub use analyzer::javadoc::JavadocTemplate;
pub use analyzer::naming::HungarianNaming;
pub use analyzer::types::{classify, TypeDescriptor, UnresolvableType};
pub use analyzer::{AnalysisOptions, Analyzer, CheckStats};

pub use report::{OutputFormat, ReportFormatter, ReportOptions};

use std::path::Path;

/// Main validator providing high-level validation operations
pub struct StyleValidator {
    analyzer: Analyzer,
    report_formatter: ReportFormatter,
}

impl StyleValidator {
    /// Create a new validator with the given configuration
    pub fn new_with_config(config: StyleConfig) -> StyleResult<Self> {
        let analyzer = Analyzer::new(config)?;
        let report_formatter = ReportFormatter::default();

        Ok(Self { analyzer, report_formatter })
    }

    /// Create a validator with default configuration
    pub fn new() -> StyleResult<Self> {
        Self::new_with_config(StyleConfig::default())
    }

    /// Create a validator loading configuration from file
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> StyleResult<Self> {
        let config = StyleConfig::load_from_file(path)?;
        Self::new_with_config(config)
    }

    /// Set custom report formatter
    pub fn with_report_formatter(mut self, formatter: ReportFormatter) -> Self {
        self.report_formatter = formatter;
        self
    }

    /// Validate one in-memory unit
    pub fn validate_unit(&self, unit: &SourceUnit) -> ValidationReport {
        let mut report = ValidationReport::new();
        for violation in self.analyzer.analyze_unit(unit) {
            report.add_violation(violation);
        }
        report.set_files_analyzed(1);
        report.set_config_fingerprint(self.analyzer.config_fingerprint());
        report.sort_violations();

        report
    }

    /// Validate a single syntax dump
    pub fn validate_file<P: AsRef<Path>>(&self, dump_path: P) -> StyleResult<ValidationReport> {
        let violations = self.analyzer.analyze_file(dump_path)?;

        let mut report = ValidationReport::new();
        for violation in violations {
            report.add_violation(violation);
        }
        report.set_files_analyzed(1);
        report.set_config_fingerprint(self.analyzer.config_fingerprint());
        report.sort_violations();

        Ok(report)
    }

    /// Validate dump files and directories of dumps
    pub fn validate_paths<P: AsRef<Path>>(
        &self,
        paths: &[P],
        options: &AnalysisOptions,
    ) -> StyleResult<ValidationReport> {
        self.analyzer.analyze_paths(paths, options)
    }

    /// Validate entire directory tree of dumps
    pub fn validate_directory<P: AsRef<Path>>(
        &self,
        root: P,
        options: &AnalysisOptions,
    ) -> StyleResult<ValidationReport> {
        self.analyzer.analyze_paths(&[root.as_ref()], options)
    }

    /// Format a validation report for output
    pub fn format_report(
        &self,
        report: &ValidationReport,
        format: OutputFormat,
    ) -> StyleResult<String> {
        self.report_formatter.format_report(report, format)
    }

    /// Get statistics about the enabled checks
    pub fn check_statistics(&self) -> CheckStats {
        self.analyzer.check_stats()
    }

    pub fn config(&self) -> &StyleConfig {
        self.analyzer.config()
    }
}

/// Convenience function to create a validator with default settings
pub fn create_validator() -> StyleResult<StyleValidator> {
    StyleValidator::new()
}

/// Convenience function to validate a directory of dumps with default settings
pub fn validate_directory<P: AsRef<Path>>(directory: P) -> StyleResult<ValidationReport> {
    let validator = StyleValidator::new()?;
    validator.validate_directory(directory, &AnalysisOptions::default())
}

/// Run both checks with default settings and return findings in discovery order
pub fn check_unit(unit: &SourceUnit) -> StyleResult<Vec<Finding>> {
    let analyzer = Analyzer::with_defaults()?;
    let mut findings = Vec::new();
    analyzer.run_unit(unit, &mut findings);
    Ok(findings)
}

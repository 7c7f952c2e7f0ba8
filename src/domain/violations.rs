//! Core domain models for style findings and validation results
//!
//! Architecture: Rich Domain Models - a check produces bare findings, the analyzer turns
//! them into violations that know their file, rule and severity
//! - Finding is the immutable (line, message) pair a single check emits
//! - ValidationReport acts as an aggregate root managing collections of violations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity levels for style violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational messages and suggestions
    Info,
    /// Warnings that should be addressed but don't block builds
    Warning,
    /// Errors that block commits and fail CI/CD builds
    Error,
}

impl Severity {
    /// Whether this severity level should cause validation to fail
    pub fn is_blocking(self) -> bool {
        matches!(self, Self::Error)
    }

    /// Convert to string for display
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Identifies which rule produced a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    /// Identifier does not carry the required Hungarian prefix
    HungarianNaming,
    /// Separator bar above a doc comment is missing or malformed
    CommentBar,
    /// Top-level class doc comment has no recognized copyright line
    Copyright,
    /// `@param` line carries no real description
    TrivialParam,
}

impl RuleId {
    /// Every rule, in the order they are listed to users
    pub const ALL: [RuleId; 4] =
        [Self::HungarianNaming, Self::CommentBar, Self::Copyright, Self::TrivialParam];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::HungarianNaming => "hungarian_naming",
            Self::CommentBar => "javadoc_comment_bar",
            Self::Copyright => "javadoc_copyright",
            Self::TrivialParam => "javadoc_trivial_param",
        }
    }

    /// Look a rule up by its identifier
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rule| rule.as_str() == id)
    }

    /// Name of the check (as configured) that owns this rule
    pub fn check_name(self) -> &'static str {
        match self {
            Self::HungarianNaming => "hungarian_naming",
            Self::CommentBar | Self::Copyright | Self::TrivialParam => "javadoc_template",
        }
    }

    /// One-line explanation used by `explain` and `rules`
    pub fn description(self) -> &'static str {
        match self {
            Self::HungarianNaming => {
                "Variables and parameters must be named [s][a]{prefix}[{name}]: 's' for static, \
                 'a' for arrays and varargs, then the prefix of the element type"
            }
            Self::CommentBar => {
                "Top-level class, interface, constructor and method doc comments must be preceded \
                 by a '//' + 78 '=' separator bar (members indented by a multiple of four spaces)"
            }
            Self::Copyright => {
                "The doc comment of the top-level class must contain a copyright line with a year \
                 or year range and an owner"
            }
            Self::TrivialParam => {
                "Constructor and method @param tags must describe the parameter, not just name it"
            }
        }
    }
}

/// A single diagnostic emitted by a check, before it is attached to a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Rule that produced this finding
    pub rule: RuleId,
    /// 1-based line the finding is reported at
    pub line: u32,
    /// Verbatim message text
    pub message: String,
}

impl Finding {
    pub fn new(rule: RuleId, line: u32, message: impl Into<String>) -> Self {
        Self { rule, line, message: message.into() }
    }
}

/// A style violation detected during analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Unique identifier for the rule that detected this violation
    pub rule_id: String,
    /// Severity level of this violation
    pub severity: Severity,
    /// File path where the violation was found
    pub file_path: PathBuf,
    /// Line number (1-indexed) where the violation occurs
    pub line_number: Option<u32>,
    /// Human-readable description of the violation
    pub message: String,
    /// Source line the violation points at
    pub context: Option<String>,
    /// When this violation was detected
    pub detected_at: DateTime<Utc>,
}

impl Violation {
    /// Create a new violation
    pub fn new(
        rule_id: impl Into<String>,
        severity: Severity,
        file_path: PathBuf,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity,
            file_path,
            line_number: None,
            message: message.into(),
            context: None,
            detected_at: Utc::now(),
        }
    }

    /// Build a violation from a check finding
    pub fn from_finding(finding: Finding, severity: Severity, file_path: PathBuf) -> Self {
        Self::new(finding.rule.as_str(), severity, file_path, finding.message)
            .with_line(finding.line)
    }

    /// Set line position
    pub fn with_line(mut self, line: u32) -> Self {
        self.line_number = Some(line);
        self
    }

    /// Add source code context
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Whether this violation is blocking (prevents commits/builds)
    pub fn is_blocking(&self) -> bool {
        self.severity.is_blocking()
    }

    /// Format violation for display
    pub fn format_display(&self) -> String {
        let location = match self.line_number {
            Some(line) => format!(":{line}"),
            None => String::new(),
        };

        format!(
            "{}{} [{}] {}",
            self.file_path.display(),
            location,
            self.severity.as_str(),
            self.message
        )
    }
}

/// Summary statistics for a validation report
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Total number of files analyzed
    pub total_files: usize,
    /// Number of violations by severity level
    pub violations_by_severity: ViolationCounts,
    /// Total execution time in milliseconds
    pub execution_time_ms: u64,
    /// Timestamp when validation was performed
    pub validated_at: DateTime<Utc>,
}

/// Count of violations by severity level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViolationCounts {
    pub error: usize,
    pub warning: usize,
    pub info: usize,
}

impl ViolationCounts {
    /// Total number of violations across all severities
    pub fn total(&self) -> usize {
        self.error + self.warning + self.info
    }

    /// Whether there are any blocking violations
    pub fn has_blocking(&self) -> bool {
        self.error > 0
    }

    /// Add a violation to the counts
    pub fn add(&mut self, severity: Severity) {
        match severity {
            Severity::Error => self.error += 1,
            Severity::Warning => self.warning += 1,
            Severity::Info => self.info += 1,
        }
    }
}

/// Complete validation report containing all violations and metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// All violations found during validation
    pub violations: Vec<Violation>,
    /// Summary statistics
    pub summary: ValidationSummary,
    /// Configuration used for this validation
    pub config_fingerprint: Option<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            violations: Vec::new(),
            summary: ValidationSummary { validated_at: Utc::now(), ..Default::default() },
            config_fingerprint: None,
        }
    }

    /// Add a violation to the report
    pub fn add_violation(&mut self, violation: Violation) {
        self.summary.violations_by_severity.add(violation.severity);
        self.violations.push(violation);
    }

    /// Whether the report contains any violations
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Whether the report contains blocking violations (errors)
    pub fn has_errors(&self) -> bool {
        self.summary.violations_by_severity.has_blocking()
    }

    /// Get violations of a specific severity
    pub fn violations_by_severity(&self, severity: Severity) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.severity == severity)
    }

    /// Get violations produced by one rule
    pub fn violations_for_rule(&self, rule: RuleId) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.rule_id == rule.as_str())
    }

    /// Set the number of files analyzed
    pub fn set_files_analyzed(&mut self, count: usize) {
        self.summary.total_files = count;
    }

    /// Set the execution time
    pub fn set_execution_time(&mut self, duration_ms: u64) {
        self.summary.execution_time_ms = duration_ms;
    }

    /// Set the configuration fingerprint
    pub fn set_config_fingerprint(&mut self, fingerprint: impl Into<String>) {
        self.config_fingerprint = Some(fingerprint.into());
    }

    /// Sort violations by file path and line number for consistent output.
    /// The sort is stable, so findings on one line keep their discovery order.
    pub fn sort_violations(&mut self) {
        self.violations.sort_by(|a, b| {
            a.file_path
                .cmp(&b.file_path)
                .then_with(|| a.line_number.unwrap_or(0).cmp(&b.line_number.unwrap_or(0)))
        });
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Error types that can occur during validation
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    /// Configuration file could not be loaded or parsed
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// File could not be read or accessed
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// A syntax dump could not be decoded
    #[error("Syntax dump error in {file}: {message}")]
    Dump { file: String, message: String },

    /// Analysis failed for a specific file
    #[error("Analysis error in {file}: {message}")]
    Analysis { file: String, message: String },

    /// Validation operation failed
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl StyleError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Create a syntax dump error
    pub fn dump(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Dump { file: file.into(), message: message.into() }
    }

    /// Create an analysis error
    pub fn analysis(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Analysis { file: file.into(), message: message.into() }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }
}

/// Result type for style-guardian operations
pub type StyleResult<T> = Result<T, StyleError>;

//! Main analysis orchestrator for Style Guardian
//!
//! CDD Principle: Domain Services - Analyzer runs the enabled checks over syntax dumps
//! - Each check sees one node at a time and never sees files or configuration
//! - Findings become violations here, with the configured severity and source context
//! - Handles directory discovery, parallel processing and per-file error recovery

pub mod javadoc;
pub mod naming;
pub mod types;

use crate::analyzer::javadoc::JavadocTemplate;
use crate::analyzer::naming::HungarianNaming;
use crate::config::StyleConfig;
use crate::domain::syntax::{DiagnosticSink, SourceLines, SourceUnit};
use crate::domain::violations::{
    Finding, RuleId, StyleError, StyleResult, ValidationReport, Violation,
};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

/// Main analyzer that orchestrates the entire validation process
pub struct Analyzer {
    /// Configuration for this analysis
    config: StyleConfig,
    naming: HungarianNaming,
    javadoc: JavadocTemplate,
}

/// Options for customizing analysis behavior
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Whether to use parallel processing
    pub parallel: bool,
    /// Maximum number of dump files to analyze
    pub max_files: Option<usize>,
    /// Whether to continue on errors or fail fast
    pub fail_fast: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self { parallel: true, max_files: None, fail_fast: false }
    }
}

impl Analyzer {
    /// Create a new analyzer with the given configuration
    pub fn new(config: StyleConfig) -> StyleResult<Self> {
        config.validate()?;

        Ok(Self { config, naming: HungarianNaming::new(), javadoc: JavadocTemplate::new() })
    }

    /// Create an analyzer with default configuration
    pub fn with_defaults() -> StyleResult<Self> {
        Self::new(StyleConfig::default())
    }

    /// Run every enabled check over one unit, reporting raw findings to `sink`
    pub fn run_unit<S: DiagnosticSink + ?Sized>(&self, unit: &SourceUnit, sink: &mut S) {
        if self.config.is_enabled(RuleId::HungarianNaming) {
            for declaration in &unit.declarations {
                self.naming.check_into(declaration, sink);
            }
        } else {
            tracing::debug!("Naming check disabled, skipping {}", unit.path.display());
        }

        if self.config.is_enabled(RuleId::CommentBar) {
            for definition in &unit.definitions {
                self.javadoc.check_into(definition, definition.doc, &unit.lines, sink);
            }
        } else {
            tracing::debug!("Javadoc check disabled, skipping {}", unit.path.display());
        }
    }

    /// Analyze one unit and return its violations in discovery order
    pub fn analyze_unit(&self, unit: &SourceUnit) -> Vec<Violation> {
        let mut findings: Vec<Finding> = Vec::new();
        self.run_unit(unit, &mut findings);

        findings.into_iter().map(|finding| self.to_violation(unit, finding)).collect()
    }

    fn to_violation(&self, unit: &SourceUnit, finding: Finding) -> Violation {
        let severity = self.config.severity_for(finding.rule);
        let context = unit.lines.line(finding.line).map(|line| line.trim_end().to_string());
        let violation = Violation::from_finding(finding, severity, unit.path.clone());

        match context {
            Some(line) => violation.with_context(line),
            None => violation,
        }
    }

    /// Load one syntax dump and analyze it
    pub fn analyze_file<P: AsRef<Path>>(&self, dump_path: P) -> StyleResult<Vec<Violation>> {
        let dump_path = dump_path.as_ref();
        let mut unit = SourceUnit::load_from_file(dump_path)?;

        // dumps without a source path report against the dump itself
        if unit.path.as_os_str().is_empty() {
            unit.path = dump_path.to_path_buf();
        }

        Ok(self.analyze_unit(&unit))
    }

    /// Find every syntax dump under `root`, sorted for stable output
    pub fn find_dumps<P: AsRef<Path>>(&self, root: P) -> StyleResult<Vec<PathBuf>> {
        let extension = self.config.input_extension();
        let suffix = format!(".{extension}");
        let mut dumps = Vec::new();

        let walker = WalkDir::new(root.as_ref())
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e));

        for entry in walker {
            let entry = entry.map_err(|e| {
                StyleError::analysis(root.as_ref().display().to_string(), e.to_string())
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let matches = entry.file_name().to_str().is_some_and(|name| name.ends_with(&suffix));
            if matches {
                dumps.push(entry.into_path());
            }
        }

        dumps.sort();
        Ok(dumps)
    }

    /// Analyze dump files and directories and return a complete validation report
    pub fn analyze_paths<P: AsRef<Path>>(
        &self,
        paths: &[P],
        options: &AnalysisOptions,
    ) -> StyleResult<ValidationReport> {
        let start_time = Instant::now();
        let mut report = ValidationReport::new();

        let mut files_to_analyze = Vec::new();

        for path in paths {
            let path = path.as_ref();

            if path.is_file() {
                files_to_analyze.push(path.to_path_buf());
            } else if path.is_dir() {
                files_to_analyze.extend(self.find_dumps(path)?);
            } else {
                tracing::warn!("Skipping {}: not a file or directory", path.display());
            }
        }

        if let Some(max_files) = options.max_files {
            files_to_analyze.truncate(max_files);
        }

        let total_files = files_to_analyze.len();

        let violations = if options.parallel && files_to_analyze.len() > 1 {
            self.analyze_files_parallel(&files_to_analyze, options)?
        } else {
            self.analyze_files_sequential(&files_to_analyze, options)?
        };

        for violation in violations {
            report.add_violation(violation);
        }

        report.set_files_analyzed(total_files);
        report.set_execution_time(start_time.elapsed().as_millis() as u64);
        report.set_config_fingerprint(self.config.fingerprint());
        report.sort_violations();

        Ok(report)
    }

    /// Analyze files sequentially
    fn analyze_files_sequential(
        &self,
        files: &[PathBuf],
        options: &AnalysisOptions,
    ) -> StyleResult<Vec<Violation>> {
        let mut all_violations = Vec::new();

        for file_path in files {
            match self.analyze_file(file_path) {
                Ok(violations) => all_violations.extend(violations),
                Err(e) => {
                    if options.fail_fast {
                        return Err(e);
                    }
                    tracing::warn!("Failed to analyze {}: {}", file_path.display(), e);
                }
            }
        }

        Ok(all_violations)
    }

    /// Analyze files in parallel; results are gathered in input order
    fn analyze_files_parallel(
        &self,
        files: &[PathBuf],
        options: &AnalysisOptions,
    ) -> StyleResult<Vec<Violation>> {
        let results: Vec<_> =
            files.par_iter().map(|file_path| (file_path, self.analyze_file(file_path))).collect();

        let mut all_violations = Vec::new();

        for (file_path, result) in results {
            match result {
                Ok(violations) => all_violations.extend(violations),
                Err(e) => {
                    if options.fail_fast {
                        return Err(e);
                    }
                    tracing::warn!("Failed to analyze {}: {}", file_path.display(), e);
                }
            }
        }

        Ok(all_violations)
    }

    /// Get configuration fingerprint
    pub fn config_fingerprint(&self) -> String {
        self.config.fingerprint()
    }

    pub fn config(&self) -> &StyleConfig {
        &self.config
    }

    /// Get statistics about the configured checks
    pub fn check_stats(&self) -> CheckStats {
        let mut stats = CheckStats::default();

        for check in [RuleId::HungarianNaming, RuleId::CommentBar] {
            if self.config.is_enabled(check) {
                stats.enabled_checks += 1;
            } else {
                stats.disabled_checks += 1;
            }
        }

        for rule in RuleId::ALL {
            if self.config.is_enabled(rule) {
                stats.enabled_rules += 1;
            } else {
                stats.disabled_rules += 1;
            }
        }

        stats
    }
}

/// Statistics about configured checks
#[derive(Debug, Default)]
pub struct CheckStats {
    pub enabled_checks: usize,
    pub disabled_checks: usize,
    pub enabled_rules: usize,
    pub disabled_rules: usize,
}

/// Build output, dependency caches and hidden directories never hold dumps worth checking
fn is_skipped_dir(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.') || SKIPPED_DIRS.contains(&name))
}

const SKIPPED_DIRS: &[&str] = &["target", "node_modules"];

impl CheckStats {
    pub fn total_rules(&self) -> usize {
        self.enabled_rules + self.disabled_rules
    }
}

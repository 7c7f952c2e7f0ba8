//! Configuration loading and management for Style Guardian
//!
//! Architecture: Anti-Corruption Layer - Configuration translates external YAML formats
//! - Raw YAML structures are converted to per-check settings
//! - The prefix table and line patterns are fixed; only enablement and severity vary
//! - Defaults live here so a missing file and an empty file behave the same

use crate::domain::violations::{RuleId, Severity, StyleError, StyleResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration versions this build understands
pub const SUPPORTED_VERSIONS: &[&str] = &["1.0"];

/// File names searched for in the working directory, in order
pub const DEFAULT_CONFIG_FILES: &[&str] =
    &["style_guardian.yaml", "style_guardian.yml", ".style_guardian.yaml"];

/// Main configuration structure for Style Guardian
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Configuration format version
    #[serde(default = "default_version")]
    pub version: String,
    /// Per-check settings
    #[serde(default)]
    pub checks: ChecksConfig,
    /// Which files count as syntax dumps
    #[serde(default)]
    pub inputs: InputConfig,
}

/// Settings for both checks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChecksConfig {
    #[serde(default)]
    pub hungarian_naming: CheckConfig,
    #[serde(default)]
    pub javadoc_template: CheckConfig,
}

/// Settings for one check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Whether this check runs
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Severity given to every finding of this check
    #[serde(default = "default_severity")]
    pub severity: Severity,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self { enabled: true, severity: default_severity() }
    }
}

/// Syntax dump discovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// File extension of dumps found while walking directories, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { extension: default_extension() }
    }
}

impl StyleConfig {
    /// Load configuration from a YAML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> StyleResult<Self> {
        let contents = fs::read_to_string(&path).map_err(|e| {
            StyleError::config(format!(
                "Failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            StyleError::config(format!(
                "Failed to parse config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from string content
    pub fn load_from_str(content: &str) -> StyleResult<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| StyleError::config(format!("Failed to parse config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// First default config file present in `dir`, if any
    pub fn find_default_file<P: AsRef<Path>>(dir: P) -> Option<PathBuf> {
        DEFAULT_CONFIG_FILES
            .iter()
            .map(|name| dir.as_ref().join(name))
            .find(|candidate| candidate.is_file())
    }

    /// Validate the configuration for consistency and correctness
    pub fn validate(&self) -> StyleResult<()> {
        if !SUPPORTED_VERSIONS.contains(&self.version.as_str()) {
            return Err(StyleError::config(format!(
                "Unsupported configuration version: {}. Supported versions: {}",
                self.version,
                SUPPORTED_VERSIONS.join(", ")
            )));
        }

        let extension = self.inputs.extension.trim_start_matches('.');
        if extension.trim().is_empty() {
            return Err(StyleError::config("Input extension must not be empty"));
        }

        Ok(())
    }

    /// Settings for the check a rule belongs to
    pub fn check_for(&self, rule: RuleId) -> &CheckConfig {
        match rule {
            RuleId::HungarianNaming => &self.checks.hungarian_naming,
            RuleId::CommentBar | RuleId::Copyright | RuleId::TrivialParam => {
                &self.checks.javadoc_template
            }
        }
    }

    pub fn is_enabled(&self, rule: RuleId) -> bool {
        self.check_for(rule).enabled
    }

    pub fn severity_for(&self, rule: RuleId) -> Severity {
        self.check_for(rule).severity
    }

    /// Dump extension without a leading dot
    pub fn input_extension(&self) -> &str {
        self.inputs.extension.trim_start_matches('.')
    }

    /// Convert to JSON for serialization
    pub fn to_json(&self) -> StyleResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| StyleError::config(format!("Failed to serialize config: {e}")))
    }

    /// Create a fingerprint of the configuration, recorded in every report
    pub fn fingerprint(&self) -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();

        self.version.hash(&mut hasher);
        for (name, check) in [
            ("hungarian_naming", &self.checks.hungarian_naming),
            ("javadoc_template", &self.checks.javadoc_template),
        ] {
            name.hash(&mut hasher);
            check.enabled.hash(&mut hasher);
            check.severity.hash(&mut hasher);
        }
        self.input_extension().hash(&mut hasher);

        format!("{:x}", hasher.finish())
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            checks: ChecksConfig::default(),
            inputs: InputConfig::default(),
        }
    }
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_true() -> bool {
    true
}

fn default_severity() -> Severity {
    Severity::Error
}

fn default_extension() -> String {
    "json".to_string()
}

/// Configuration builder for programmatic construction
pub struct ConfigBuilder {
    config: StyleConfig,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self { config: StyleConfig::default() }
    }

    /// Turn the naming check on or off
    pub fn hungarian_naming(mut self, enabled: bool) -> Self {
        self.config.checks.hungarian_naming.enabled = enabled;
        self
    }

    /// Turn the doc template check on or off
    pub fn javadoc_template(mut self, enabled: bool) -> Self {
        self.config.checks.javadoc_template.enabled = enabled;
        self
    }

    /// Set the severity of the check `rule` belongs to
    pub fn severity(mut self, rule: RuleId, severity: Severity) -> Self {
        match rule {
            RuleId::HungarianNaming => self.config.checks.hungarian_naming.severity = severity,
            _ => self.config.checks.javadoc_template.severity = severity,
        }
        self
    }

    /// Set the dump file extension
    pub fn input_extension(mut self, extension: impl Into<String>) -> Self {
        self.config.inputs.extension = extension.into();
        self
    }

    /// Build the final configuration
    pub fn build(self) -> StyleResult<StyleConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

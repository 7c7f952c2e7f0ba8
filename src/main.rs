//! Style Guardian CLI - Command-line interface for the naming and Javadoc checks
//!
//! CDD Principle: Application Layer - CLI coordinates user interactions with domain services
//! - Translates user commands to domain operations
//! - Handles external concerns like file I/O, process exit codes, and terminal output
//! - Checks run over JSON syntax dumps written by a host lint engine

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process;
use style_guardian::analyzer::types::prefix_table;
use style_guardian::{
    AnalysisOptions, OutputFormat, ReportFormatter, ReportOptions, RuleId, Severity, StyleConfig,
    StyleResult, StyleValidator,
};

/// Style Guardian - Hungarian naming and Javadoc template enforcement
#[derive(Parser)]
#[command(name = "style-guardian")]
#[command(version = "0.1.0")]
#[command(about = "Hungarian naming and Javadoc template checks over host syntax dumps")]
#[command(
    long_about = "Style Guardian checks variable and parameter names against a modified Hungarian prefix scheme and doc comments against a fixed header template. It reads JSON syntax dumps written by a host lint engine, one per source file."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check syntax dumps for style violations
    Check(CheckArgs),

    /// Validate configuration file
    ValidateConfig {
        /// Configuration file to validate
        config_file: Option<PathBuf>,
    },

    /// Explain what a specific rule does
    Explain {
        /// Rule ID to explain
        rule_id: String,
    },

    /// List available rules
    Rules {
        /// Show only enabled rules
        #[arg(long)]
        enabled_only: bool,
    },

    /// Print the fixed type prefix table
    Prefixes,
}

#[derive(Args)]
struct CheckArgs {
    /// Dump files or directories of dumps (defaults to the current directory)
    paths: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormatArg,

    /// Minimum severity level to report
    #[arg(short, long, value_enum)]
    severity: Option<SeverityArg>,

    /// Maximum number of violations to report
    #[arg(long)]
    max_violations: Option<usize>,

    /// Disable parallel processing
    #[arg(long)]
    no_parallel: bool,

    /// Fail on first unreadable dump
    #[arg(long)]
    fail_fast: bool,
}

#[derive(Copy, Clone, ValueEnum, PartialEq, Debug)]
enum OutputFormatArg {
    Human,
    Json,
    Plain,
    Github,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Plain => OutputFormat::Plain,
            OutputFormatArg::Github => OutputFormat::GitHub,
        }
    }
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum SeverityArg {
    Info,
    Warning,
    Error,
}

impl From<SeverityArg> for Severity {
    fn from(arg: SeverityArg) -> Self {
        match arg {
            SeverityArg::Info => Severity::Info,
            SeverityArg::Warning => Severity::Warning,
            SeverityArg::Error => Severity::Error,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run_command(cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn run_command(cli: Cli) -> StyleResult<i32> {
    match cli.command {
        Commands::Check(args) => run_check(cli.config, args, !cli.no_color),
        Commands::ValidateConfig { config_file } => {
            run_validate_config(config_file.or(cli.config))
        }
        Commands::Explain { rule_id } => run_explain(&rule_id),
        Commands::Rules { enabled_only } => run_list_rules(cli.config, enabled_only),
        Commands::Prefixes => run_prefixes(),
    }
}

/// Explicit config file, else the first default file in the working directory, else defaults
fn load_config(config_path: Option<PathBuf>) -> StyleResult<StyleConfig> {
    match config_path.or_else(|| StyleConfig::find_default_file(".")) {
        Some(path) => {
            tracing::debug!("Loading configuration from {}", path.display());
            StyleConfig::load_from_file(path)
        }
        None => Ok(StyleConfig::default()),
    }
}

fn run_check(config_path: Option<PathBuf>, args: CheckArgs, use_colors: bool) -> StyleResult<i32> {
    let config = load_config(config_path)?;

    let formatter = ReportFormatter::new(ReportOptions {
        use_colors,
        max_violations: args.max_violations,
        min_severity: args.severity.map(Severity::from),
        ..Default::default()
    });
    let validator = StyleValidator::new_with_config(config)?.with_report_formatter(formatter);

    let paths = if args.paths.is_empty() { vec![PathBuf::from(".")] } else { args.paths };

    let options = AnalysisOptions {
        parallel: !args.no_parallel,
        fail_fast: args.fail_fast,
        ..Default::default()
    };

    let report = validator.validate_paths(&paths, &options)?;

    let formatted = validator.format_report(&report, args.format.into())?;
    print!("{formatted}");

    if report.has_errors() {
        Ok(1)
    } else {
        Ok(0)
    }
}

fn run_validate_config(config_path: Option<PathBuf>) -> StyleResult<i32> {
    let config_path = config_path.unwrap_or_else(|| PathBuf::from("style_guardian.yaml"));

    println!("Validating configuration: {}", config_path.display());

    match StyleConfig::load_from_file(&config_path) {
        Ok(config) => {
            println!("✅ Configuration is valid");
            println!("📊 Configuration summary:");
            for rule in [RuleId::HungarianNaming, RuleId::CommentBar] {
                println!(
                    "  {}: {} ({})",
                    rule.check_name(),
                    if config.is_enabled(rule) { "enabled" } else { "disabled" },
                    config.severity_for(rule).as_str()
                );
            }
            println!("  Dump extension: .{}", config.input_extension());
            println!("  Fingerprint: {}", config.fingerprint());

            Ok(0)
        }
        Err(e) => {
            eprintln!("❌ Configuration validation failed: {e}");
            Ok(1)
        }
    }
}

fn run_explain(rule_id: &str) -> StyleResult<i32> {
    let Some(rule) = RuleId::parse(rule_id) else {
        eprintln!("❌ Rule '{rule_id}' not found");
        println!();
        println!("Available rules:");
        for rule in RuleId::ALL {
            println!("  - {}", rule.as_str());
        }
        return Ok(1);
    };

    let config = StyleConfig::default();

    println!("📖 Rule: {}", rule.as_str());
    println!("📂 Check: {}", rule.check_name());
    println!("⚠️ Default severity: {}", config.severity_for(rule).as_str());
    println!();
    println!("📝 Description:");
    println!("   {}", rule.description());

    if rule == RuleId::HungarianNaming {
        println!();
        println!("🔎 Prefixes:");
        for (type_name, prefix) in prefix_table() {
            println!("   {type_name:<14} {prefix}");
        }
    }

    Ok(0)
}

fn run_list_rules(config_path: Option<PathBuf>, enabled_only: bool) -> StyleResult<i32> {
    let config = load_config(config_path)?;

    println!("📋 Available Rules\n");

    for rule in RuleId::ALL {
        let enabled = config.is_enabled(rule);
        if enabled_only && !enabled {
            continue;
        }

        let status = if enabled { "✅" } else { "❌" };
        println!(
            "  {}🔍 {} ({}) [{}] - {}",
            status,
            rule.as_str(),
            rule.check_name(),
            config.severity_for(rule).as_str(),
            rule.description()
        );
    }

    Ok(0)
}

fn run_prefixes() -> StyleResult<i32> {
    println!("Identifiers are named [s][a]{{prefix}}[{{name}}]");
    println!("  s  static");
    println!("  a  array or varargs");
    println!();

    for (type_name, prefix) in prefix_table() {
        println!("  {type_name:<14} {prefix}");
    }

    Ok(0)
}

fn init_logging(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

//! # nswrap CLI Entry Point
//!
//! Parses arguments with clap, merges them over `nswrap.toml`, and runs the
//! directory driver.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use colored::*;
use std::path::{Path, PathBuf};

use nswrap::config::{self, HeaderMode, NswrapConfig};
use nswrap::ui;
use nswrap::walk::{self, ProcessOptions, RunReport};

#[derive(Parser)]
#[command(name = "nswrap")]
#[command(about = "Wrap C headers and sources in a C++ namespace", version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
struct Cli {
    /// Directory containing the .h/.c files to rewrite
    #[arg(required_unless_present = "completions")]
    source_dir: Option<PathBuf>,
    /// Directory the rewritten tree is written to
    #[arg(required_unless_present = "completions")]
    output_dir: Option<PathBuf>,
    /// Namespace to wrap the code in [default: clips]
    #[arg(long)]
    namespace: Option<String>,
    /// How header files are wrapped [default: guard]
    #[arg(long, value_enum)]
    header_mode: Option<HeaderMode>,
    /// Config file to use instead of ./nswrap.toml
    #[arg(long)]
    config: Option<PathBuf>,
    /// Show what would be written without touching the output directory
    #[arg(long)]
    dry_run: bool,
    /// Fail on unterminated include guards and invalid namespace names
    #[arg(long)]
    strict: bool,
    /// List every file as it is processed
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
    /// Only print errors
    #[arg(short, long)]
    quiet: bool,
    /// Print the run report as JSON
    #[arg(long)]
    json: bool,
    /// Generate shell completion scripts
    #[arg(long, value_name = "SHELL", exclusive = true)]
    completions: Option<Shell>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let bin_name = cmd.get_name().to_string();
        generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
        return Ok(());
    }

    let (Some(source_dir), Some(output_dir)) = (&cli.source_dir, &cli.output_dir) else {
        anyhow::bail!("Both <SOURCE_DIR> and <OUTPUT_DIR> are required");
    };

    let mut config = config::load_config(cli.config.as_deref())?;
    apply_overrides(&mut config, &cli);

    let quiet = cli.quiet || cli.json;
    check_namespace(&config, cli.strict, quiet)?;

    let options = ProcessOptions {
        dry_run: cli.dry_run,
        strict: cli.strict,
        verbose: cli.verbose,
        quiet,
    };
    let report = walk::process_tree(source_dir, output_dir, &config, &options)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !cli.quiet {
        print_summary(&report, output_dir);
    }
    Ok(())
}

fn apply_overrides(config: &mut NswrapConfig, cli: &Cli) {
    if let Some(namespace) = &cli.namespace {
        config.wrap.namespace = namespace.clone();
    }
    if let Some(mode) = cli.header_mode {
        config.wrap.header_mode = mode;
    }
}

fn check_namespace(config: &NswrapConfig, strict: bool, quiet: bool) -> Result<()> {
    let namespace = config.namespace();
    if namespace.is_valid_identifier() {
        return Ok(());
    }
    if strict {
        anyhow::bail!("'{}' is not a valid C++ namespace name", namespace);
    }
    if !quiet {
        println!(
            "{} '{}' is not a valid C++ namespace name; writing it anyway.",
            "!".yellow(),
            namespace
        );
    }
    Ok(())
}

fn print_summary(report: &RunReport, output_dir: &Path) {
    let verb = if report.dry_run { "Would wrap" } else { "Wrapped" };
    println!(
        "{} {} {} files in namespace {}",
        "✓".green(),
        verb,
        report.processed(),
        report.namespace.cyan()
    );

    let mut table = ui::Table::new(&["Metric", "Count"]);
    table.add_row(vec!["Headers".dimmed().to_string(), report.headers.to_string()]);
    table.add_row(vec!["Sources".dimmed().to_string(), report.sources.to_string()]);
    table.add_row(vec!["Skipped".dimmed().to_string(), report.skipped.to_string()]);
    let warnings = if report.warnings.is_empty() {
        "0".green().to_string()
    } else {
        report.warnings.len().to_string().yellow().to_string()
    };
    table.add_row(vec!["Warnings".dimmed().to_string(), warnings]);
    table.print();

    if !report.dry_run {
        println!("   Output: {}", output_dir.display().to_string().cyan());
    }
    if !report.warnings.is_empty() {
        println!(
            "   {} Re-run with {} to fail on these.",
            "💡".yellow(),
            "--strict".cyan()
        );
    }
}

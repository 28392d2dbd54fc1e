//! Directory driver: mirror a source tree into an output tree, wrapping
//! every header and source file on the way.
//!
//! Files are handled one at a time, in file-name order. Each one is read
//! fully, wrapped, and written fully before the next. Any filesystem error
//! aborts the run.

use crate::config::{FileKind, NswrapConfig};
use crate::wrap::{self, Diagnostic, Namespace, WrapStyle};
use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct PlannedFile {
    pub input: PathBuf,
    /// Path relative to the source directory, reused under the output directory.
    pub relative: PathBuf,
    pub kind: FileKind,
}

#[derive(Debug, Default)]
pub struct Plan {
    pub files: Vec<PlannedFile>,
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessOptions {
    pub dry_run: bool,
    /// Treat wrapper diagnostics as fatal.
    pub strict: bool,
    pub verbose: bool,
    pub quiet: bool,
}

#[derive(Serialize, Debug, Clone)]
pub struct FileWarning {
    pub path: PathBuf,
    pub diagnostic: Diagnostic,
}

#[derive(Serialize, Debug, Default)]
pub struct RunReport {
    pub namespace: String,
    pub headers: usize,
    pub sources: usize,
    pub skipped: usize,
    pub dry_run: bool,
    pub warnings: Vec<FileWarning>,
}

impl RunReport {
    pub fn processed(&self) -> usize {
        self.headers + self.sources
    }
}

/// Walk `source_dir` and pick out the files to wrap.
pub fn plan_files(source_dir: &Path, config: &NswrapConfig) -> Result<Plan> {
    if !source_dir.is_dir() {
        anyhow::bail!(
            "Source directory {} not found or not a directory.\n\n\
            💡 Tip: Pass the directory that holds your .h/.c files as the first argument.",
            source_dir.display()
        );
    }

    let mut plan = Plan::default();
    for entry in WalkDir::new(source_dir).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("Failed to walk {}", source_dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        let Some(kind) = config.files.classify(&name) else {
            plan.skipped += 1;
            continue;
        };

        let relative = entry
            .path()
            .strip_prefix(source_dir)
            .with_context(|| format!("{} is outside the source tree", entry.path().display()))?
            .to_path_buf();

        plan.files.push(PlannedFile {
            input: entry.path().to_path_buf(),
            relative,
            kind,
        });
    }

    Ok(plan)
}

/// Read `input`, wrap it, and write the result to `output` (unless
/// `dry_run`). Missing parent directories of `output` are created.
///
/// With `strict`, any diagnostic fails the file before anything is written.
pub fn process_file(
    input: &Path,
    output: &Path,
    style: WrapStyle,
    namespace: &Namespace,
    options: &ProcessOptions,
) -> Result<Vec<Diagnostic>> {
    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let (wrapped, diagnostics) = wrap::wrap_text(&content, style, namespace);

    if options.strict && let Some(diagnostic) = diagnostics.first() {
        anyhow::bail!(
            "{}: {}\n\n💡 Tip: Run without --strict to write the file anyway.",
            input.display(),
            diagnostic
        );
    }

    if !options.dry_run {
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(output, wrapped)
            .with_context(|| format!("Failed to write {}", output.display()))?;
    }

    Ok(diagnostics)
}

/// Wrap every planned file under `source_dir` into the mirrored location
/// under `output_dir`.
pub fn process_tree(
    source_dir: &Path,
    output_dir: &Path,
    config: &NswrapConfig,
    options: &ProcessOptions,
) -> Result<RunReport> {
    ensure_disjoint(source_dir, output_dir)?;

    let plan = plan_files(source_dir, config)?;
    let namespace = config.namespace();

    let mut report = RunReport {
        namespace: namespace.to_string(),
        skipped: plan.skipped,
        dry_run: options.dry_run,
        ..Default::default()
    };

    let pb = if options.quiet || options.verbose {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(plan.files.len() as u64)
    };
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )?
        .progress_chars("#>-"),
    );

    for file in &plan.files {
        pb.set_message(file.relative.display().to_string());

        let style = config.style_for(file.kind);
        let output = output_dir.join(&file.relative);
        let diagnostics = match process_file(&file.input, &output, style, &namespace, options) {
            Ok(diagnostics) => diagnostics,
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        };

        if options.verbose && !options.quiet {
            let label = match style {
                WrapStyle::Header => "header",
                WrapStyle::Source => "source",
            };
            println!(
                "{} {} {}",
                "✓".green(),
                file.relative.display(),
                format!("({})", label).dimmed()
            );
        }

        for diagnostic in diagnostics {
            if !options.quiet {
                pb.suspend(|| {
                    println!(
                        "{} {}: {}",
                        "!".yellow(),
                        file.relative.display(),
                        diagnostic
                    );
                });
            }
            report.warnings.push(FileWarning {
                path: file.relative.clone(),
                diagnostic,
            });
        }

        match file.kind {
            FileKind::Header => report.headers += 1,
            FileKind::Source => report.sources += 1,
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(report)
}

/// Refuse an output directory inside the source directory: the walk would
/// otherwise pick up its own output.
fn ensure_disjoint(source_dir: &Path, output_dir: &Path) -> Result<()> {
    let source = resolve(source_dir)?;
    let output = resolve(output_dir)?;

    if output.starts_with(&source) {
        anyhow::bail!(
            "Output directory {} is inside source directory {}.\n\n\
            💡 Tip: Choose an output directory outside the source tree.",
            output_dir.display(),
            source_dir.display()
        );
    }
    Ok(())
}

/// Canonicalize the longest existing prefix of `path` and append the rest.
fn resolve(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)
        .with_context(|| format!("Failed to resolve {}", path.display()))?;

    let mut existing = absolute.as_path();
    let mut rest = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                rest.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(absolute),
        }
    }

    let mut resolved = existing
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", existing.display()))?;
    for name in rest.iter().rev() {
        resolved.push(name);
    }
    Ok(resolved)
}

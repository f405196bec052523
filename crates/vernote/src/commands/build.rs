//! `vernote build` command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use vernote_annotations::AnnotationRewriter;
use vernote_config::{CliSettings, Config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover vernote.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for rewritten files (overrides config).
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Rewrite files in place instead of writing to the output directory.
    #[arg(long, conflicts_with = "out_dir")]
    in_place: bool,

    /// Enable verbose output (per-file logging).
    #[arg(short, long)]
    pub verbose: bool,
}

/// Counters for a build run.
#[derive(Debug, Default, PartialEq, Eq)]
struct BuildStats {
    rewritten: usize,
    unchanged: usize,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the source directory is
    /// missing, or a file cannot be read or written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        // Build CLI settings from args
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            out_dir: self.out_dir,
        };

        // Load config
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let source_dir = &config.docs_resolved.source_dir;
        if !source_dir.is_dir() {
            return Err(CliError::Validation(format!(
                "source directory not found: {}",
                source_dir.display()
            )));
        }

        let rewriter = AnnotationRewriter::new(config.templates_resolved.clone());

        let mut files = Vec::new();
        collect_markdown_files(source_dir, Path::new(""), &mut files)?;
        files.sort();

        if files.is_empty() {
            output.warning(&format!(
                "No markdown files found under {}",
                source_dir.display()
            ));
            return Ok(());
        }

        let out_dir = if self.in_place {
            None
        } else {
            Some(config.docs_resolved.out_dir.as_path())
        };

        let mut stats = BuildStats::default();
        for relative in &files {
            if rewrite_file(&rewriter, source_dir, relative, out_dir)? {
                stats.rewritten += 1;
            } else {
                stats.unchanged += 1;
            }
        }

        output.info(&format!(
            "Processed {} markdown files from {}",
            files.len(),
            source_dir.display()
        ));
        output.success(&format!(
            "{} rewritten, {} unchanged",
            stats.rewritten, stats.unchanged
        ));
        Ok(())
    }
}

/// Recursively collect markdown files under `dir`.
///
/// Paths are collected relative to the scan root so callers can mirror
/// the tree into an output directory.
fn collect_markdown_files(
    dir: &Path,
    prefix: &Path,
    files: &mut Vec<PathBuf>,
) -> Result<(), CliError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let relative = prefix.join(entry.file_name());
        if path.is_dir() {
            collect_markdown_files(&path, &relative, files)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            files.push(relative);
        }
    }
    Ok(())
}

/// Rewrite one markdown file in line-sequence mode.
///
/// With an output directory the result is always written there,
/// mirroring the source tree; in-place runs only touch files whose
/// content actually changed. Returns whether the content changed.
fn rewrite_file(
    rewriter: &AnnotationRewriter,
    source_dir: &Path,
    relative: &Path,
    out_dir: Option<&Path>,
) -> Result<bool, CliError> {
    let source_path = source_dir.join(relative);
    let content = fs::read_to_string(&source_path)?;

    let lines: Vec<String> = content.lines().map(ToOwned::to_owned).collect();
    let mut result = rewriter.rewrite_lines(&lines).join("\n");
    if content.ends_with('\n') {
        result.push('\n');
    }
    let changed = result != content;

    if changed {
        tracing::info!(path = %relative.display(), "Rewrote annotations");
    } else {
        tracing::debug!(path = %relative.display(), "No annotations found");
    }

    match out_dir {
        Some(out_dir) => {
            let target = out_dir.join(relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, &result)?;
        }
        None => {
            if changed {
                fs::write(&source_path, &result)?;
            }
        }
    }

    Ok(changed)
}

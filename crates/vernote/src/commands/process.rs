//! `vernote process` command implementation.

use std::io::{Read, Write};
use std::path::PathBuf;

use clap::Args;
use vernote_annotations::AnnotationRewriter;
use vernote_config::Config;

use crate::error::CliError;

/// Arguments for the process command.
#[derive(Args)]
pub(crate) struct ProcessArgs {
    /// Markdown file to process (reads stdin when omitted).
    file: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover vernote.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ProcessArgs {
    /// Execute the process command.
    ///
    /// The document is transformed in whole-text mode and printed to
    /// stdout, so the command composes with the usual shell plumbing.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the input cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        let rewriter = AnnotationRewriter::new(config.templates_resolved);

        let input = match &self.file {
            Some(path) => std::fs::read_to_string(path)?,
            None => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                buffer
            }
        };

        let rewritten = rewriter.rewrite_text(&input);
        std::io::stdout().write_all(rewritten.as_bytes())?;
        Ok(())
    }
}

//! Command-line interface.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::CliOverrides;

/// Collect pending git changes into an LLM prompt for a commit message,
/// PR title and branch name.
#[derive(Parser, Debug)]
#[command(name = "diffprompt")]
#[command(version)]
#[command(about = "Collect pending git changes into a commit-message prompt")]
pub struct Cli {
    /// Number of prompt lines to preview on stdout
    #[arg(long, value_name = "N")]
    pub lines: Option<u64>,

    /// Do not inline untracked files
    #[arg(long)]
    pub no_untracked: bool,

    /// Where to write the prompt (default: <repo root>/commit-prompt.txt)
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Untracked files larger than this are listed but not inlined
    #[arg(long = "max-new-size", value_name = "BYTES")]
    pub max_new_size: Option<u64>,

    /// Maximum stdout accepted from a single git command
    #[arg(long = "max-buffer", value_name = "BYTES")]
    pub max_buffer: Option<u64>,

    /// Inline template text (highest precedence)
    #[arg(long, value_name = "STRING")]
    pub template: Option<String>,

    /// Read the template from a file
    #[arg(long, value_name = "PATH")]
    pub template_file: Option<PathBuf>,

    /// Built-in template: default, conventional or detailed
    #[arg(long, value_name = "NAME")]
    pub template_preset: Option<String>,

    /// Exclude paths matching PATTERN (repeatable)
    #[arg(long, value_name = "PATTERN", action = ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Read exclude patterns from a file, one per line
    #[arg(long, value_name = "PATH")]
    pub exclude_file: Option<PathBuf>,

    /// Embed this pull request template instead of auto-discovering one
    #[arg(long, value_name = "PATH")]
    pub pr_template_file: Option<PathBuf>,

    /// Never embed a pull request template
    #[arg(long)]
    pub no_pr_template: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The config overrides carried by these flags.
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            lines: self.lines,
            include_untracked: self.no_untracked.then_some(false),
            out: self.out.clone(),
            max_new_file_size_bytes: self.max_new_size,
            max_buffer_bytes: self.max_buffer,
            template: self.template.clone(),
            template_file: self.template_file.clone(),
            template_preset: self.template_preset.clone(),
            exclude: self.exclude.clone(),
            exclude_file: self.exclude_file.clone(),
            pr_template_file: self.pr_template_file.clone(),
            embed_pr_template: self.no_pr_template.then_some(false),
        }
    }

    /// Default log filter for the `-v` count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

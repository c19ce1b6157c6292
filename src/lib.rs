//! diffprompt - turn pending git changes into an LLM prompt.
//!
//! # Overview
//!
//! diffprompt collects the unstaged diff, the staged diff and the contents
//! of untracked files, filters them through exclude patterns, renders the
//! result into a prompt template asking for a commit message, PR title and
//! branch name, previews the prompt and writes it to a file.
//!
//! The pipeline is `config` -> `pathspec` -> `collect` -> `template` ->
//! `output`, with `git` as the only boundary to the outside world.

pub mod cli;
pub mod collect;
pub mod config;
pub mod error;
pub mod git;
pub mod output;
pub mod pathspec;
pub mod template;

// Re-export commonly used types
pub use collect::{collect, collect_diff};
pub use config::{CliOverrides, Environment, Options, ResolveContext, resolve_config};
pub use error::{CollectError, GitError, OutputError};
pub use pathspec::{ExclusionSet, Pattern, build_exclusion_set};
pub use template::{Bindings, PrTemplate, ResolvedTemplate, TemplateSource, build_prompt, render};

//! Configuration discovery, validation and merge.
//!
//! Precedence, lowest to highest: built-in defaults, the first config
//! source found, command-line flags. Layers overwrite field by field.

pub mod env;
pub mod options;
pub mod schema;
pub mod sources;

use std::path::{Path, PathBuf};

use tracing::debug;

pub use env::Environment;
pub use options::{CliOverrides, DEFAULT_OUTPUT_FILENAME, Options};
pub use schema::UserConfig;
pub use sources::{ConfigSource, RawConfig};

/// Inputs the resolver needs from the outside world.
#[derive(Debug, Clone)]
pub struct ResolveContext {
    /// Repository root, if one was found.
    pub repo_root: Option<PathBuf>,
    pub cwd: PathBuf,
    pub env: Environment,
}

impl ResolveContext {
    /// Directory config files and the default output are looked up in.
    pub fn base(&self) -> &Path {
        self.repo_root.as_deref().unwrap_or(&self.cwd)
    }
}

/// Resolve the run configuration from all sources.
///
/// Never fails: unreadable or malformed sources and fields are skipped.
pub fn resolve_config(ctx: &ResolveContext, cli: &CliOverrides) -> Options {
    let base = ctx.base();
    let mut options = Options::defaults(base, &ctx.env);

    match sources::discover(base, &ctx.cwd, &ctx.env) {
        Some(raw) => {
            let config = UserConfig::normalize(&raw.fields, base);
            debug!("Loaded config from {}: {:?}", raw.source, config);
            options.apply_user_config(config);
        }
        None => debug!("No config file found, using defaults"),
    }

    options.apply_cli(cli, &ctx.cwd);
    options.ensure_output_path(base);
    options
}

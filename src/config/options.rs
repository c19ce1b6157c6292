//! The merged run configuration.

use std::path::{Path, PathBuf};

use super::env::Environment;
use super::schema::UserConfig;

/// Default file name of the rendered prompt.
pub const DEFAULT_OUTPUT_FILENAME: &str = "commit-prompt.txt";

pub const DEFAULT_PREVIEW_LINES: u64 = 20;

/// Untracked files larger than this are listed but not inlined.
pub const DEFAULT_MAX_NEW_FILE_SIZE_BYTES: u64 = 1_000_000;

/// Ceiling on the stdout of a single git invocation (10 MiB).
pub const DEFAULT_MAX_BUFFER_BYTES: u64 = 10 * 1024 * 1024;

/// Fully merged configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub preview_lines: u64,
    pub out: PathBuf,
    pub include_untracked: bool,
    pub max_new_file_size_bytes: u64,
    pub max_buffer_bytes: u64,
    pub template: Option<String>,
    pub template_file: Option<PathBuf>,
    pub template_preset: Option<String>,
    pub exclude: Vec<String>,
    pub exclude_file: Option<PathBuf>,
    pub pr_template_file: Option<PathBuf>,
    pub embed_pr_template: bool,
}

/// Values given on the command line. `None` means the flag was not passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub lines: Option<u64>,
    pub include_untracked: Option<bool>,
    pub out: Option<PathBuf>,
    pub max_new_file_size_bytes: Option<u64>,
    pub max_buffer_bytes: Option<u64>,
    pub template: Option<String>,
    pub template_file: Option<PathBuf>,
    pub template_preset: Option<String>,
    pub exclude: Vec<String>,
    pub exclude_file: Option<PathBuf>,
    pub pr_template_file: Option<PathBuf>,
    pub embed_pr_template: Option<bool>,
}

impl Options {
    /// Built-in defaults. `base` is where the default output file lands.
    pub fn defaults(base: &Path, env: &Environment) -> Self {
        Self {
            preview_lines: env.preview_lines().unwrap_or(DEFAULT_PREVIEW_LINES),
            out: base.join(DEFAULT_OUTPUT_FILENAME),
            include_untracked: true,
            max_new_file_size_bytes: DEFAULT_MAX_NEW_FILE_SIZE_BYTES,
            max_buffer_bytes: DEFAULT_MAX_BUFFER_BYTES,
            template: None,
            template_file: None,
            template_preset: None,
            exclude: Vec::new(),
            exclude_file: None,
            pr_template_file: None,
            embed_pr_template: true,
        }
    }

    /// Overlay a validated config file. Only fields the file set are touched.
    pub fn apply_user_config(&mut self, config: UserConfig) {
        overlay(&mut self.out, config.out);
        overlay(&mut self.preview_lines, config.lines);
        overlay(&mut self.include_untracked, config.include_untracked);
        overlay(&mut self.max_new_file_size_bytes, config.max_new_file_size_bytes);
        overlay(&mut self.max_buffer_bytes, config.max_buffer_bytes);
        overlay_some(&mut self.template, config.template);
        overlay_some(&mut self.template_file, config.template_file);
        overlay_some(&mut self.template_preset, config.template_preset);
        overlay_some(&mut self.exclude_file, config.exclude_file);
        overlay_some(&mut self.pr_template_file, config.pr_template_file);
        overlay(&mut self.embed_pr_template, config.embed_pr_template);
        if let Some(patterns) = config.exclude {
            extend_unique(&mut self.exclude, patterns);
        }
    }

    /// Overlay command-line flags. Relative paths resolve against `cwd`.
    pub fn apply_cli(&mut self, cli: &CliOverrides, cwd: &Path) {
        let path = |p: &Option<PathBuf>| p.as_deref().map(|p| join_cli_path(cwd, p));

        overlay(&mut self.out, path(&cli.out));
        overlay(&mut self.preview_lines, cli.lines);
        overlay(&mut self.include_untracked, cli.include_untracked);
        overlay(&mut self.max_new_file_size_bytes, cli.max_new_file_size_bytes);
        overlay(&mut self.max_buffer_bytes, cli.max_buffer_bytes);
        overlay_some(&mut self.template, cli.template.clone());
        overlay_some(&mut self.template_file, path(&cli.template_file));
        overlay_some(&mut self.template_preset, cli.template_preset.clone());
        overlay_some(&mut self.exclude_file, path(&cli.exclude_file));
        overlay_some(&mut self.pr_template_file, path(&cli.pr_template_file));
        overlay(&mut self.embed_pr_template, cli.embed_pr_template);
        extend_unique(&mut self.exclude, cli.exclude.iter().cloned());
    }

    /// Replace a blank output path with `<base>/commit-prompt.txt`.
    pub fn ensure_output_path(&mut self, base: &Path) {
        if self.out.to_string_lossy().trim().is_empty() {
            self.out = base.join(DEFAULT_OUTPUT_FILENAME);
        }
    }
}

/// Join a relative CLI path onto `cwd` without a UTF-8 round trip. Blank
/// paths are kept so the merge step can detect them.
fn join_cli_path(cwd: &Path, path: &Path) -> PathBuf {
    let blank = path.to_str().is_some_and(|s| s.trim().is_empty());
    if blank || path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

fn overlay<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

fn overlay_some<T>(field: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *field = value;
    }
}

fn extend_unique(patterns: &mut Vec<String>, more: impl IntoIterator<Item = String>) {
    for pattern in more {
        if !patterns.contains(&pattern) {
            patterns.push(pattern);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env::PREVIEW_LINES_ENV_VAR;

    fn defaults() -> Options {
        Options::defaults(Path::new("/repo"), &Environment::default())
    }

    #[test]
    fn test_defaults() {
        let options = defaults();
        assert_eq!(options.preview_lines, DEFAULT_PREVIEW_LINES);
        assert_eq!(options.out, PathBuf::from("/repo/commit-prompt.txt"));
        assert!(options.include_untracked);
        assert_eq!(options.max_new_file_size_bytes, 1_000_000);
        assert_eq!(options.max_buffer_bytes, 10 * 1024 * 1024);
        assert!(options.exclude.is_empty());
        assert!(options.embed_pr_template);
    }

    #[test]
    fn test_env_preview_lines_changes_default() {
        let env = Environment::from_pairs([(PREVIEW_LINES_ENV_VAR, "3")]);
        let options = Options::defaults(Path::new("/repo"), &env);
        assert_eq!(options.preview_lines, 3);
    }

    #[test]
    fn test_user_config_overrides_only_set_fields() {
        let mut options = defaults();
        options.apply_user_config(UserConfig {
            lines: Some(99),
            template_preset: Some("detailed".into()),
            ..Default::default()
        });

        assert_eq!(options.preview_lines, 99);
        assert_eq!(options.template_preset.as_deref(), Some("detailed"));
        assert_eq!(options.out, PathBuf::from("/repo/commit-prompt.txt"));
        assert!(options.include_untracked);
        assert_eq!(options.max_new_file_size_bytes, DEFAULT_MAX_NEW_FILE_SIZE_BYTES);
    }

    #[test]
    fn test_cli_overrides_user_config_per_field() {
        let mut options = defaults();
        options.apply_user_config(UserConfig {
            lines: Some(99),
            include_untracked: Some(false),
            max_buffer_bytes: Some(1),
            ..Default::default()
        });
        options.apply_cli(
            &CliOverrides {
                lines: Some(5),
                ..Default::default()
            },
            Path::new("/cwd"),
        );

        assert_eq!(options.preview_lines, 5);
        assert!(!options.include_untracked);
        assert_eq!(options.max_buffer_bytes, 1);
    }

    #[test]
    fn test_cli_paths_resolve_against_cwd() {
        let mut options = defaults();
        options.apply_cli(
            &CliOverrides {
                out: Some(PathBuf::from("out/prompt.txt")),
                template_file: Some(PathBuf::from("/abs/t.md")),
                ..Default::default()
            },
            Path::new("/cwd"),
        );

        assert_eq!(options.out, PathBuf::from("/cwd/out/prompt.txt"));
        assert_eq!(options.template_file, Some(PathBuf::from("/abs/t.md")));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_cli_path_is_preserved() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = PathBuf::from(OsStr::from_bytes(b"out/prompt-\xff.txt"));
        let mut options = defaults();
        options.apply_cli(
            &CliOverrides {
                out: Some(raw.clone()),
                ..Default::default()
            },
            Path::new("/cwd"),
        );

        assert_eq!(options.out, Path::new("/cwd").join(&raw));
        assert_eq!(options.out.as_os_str().as_bytes(), b"/cwd/out/prompt-\xff.txt");
    }

    #[test]
    fn test_blank_cli_out_falls_back_to_default() {
        let mut options = defaults();
        options.apply_cli(
            &CliOverrides {
                out: Some(PathBuf::from(" ")),
                ..Default::default()
            },
            Path::new("/cwd"),
        );
        options.ensure_output_path(Path::new("/repo"));
        assert_eq!(options.out, PathBuf::from("/repo/commit-prompt.txt"));
    }

    #[test]
    fn test_exclude_patterns_are_unioned() {
        let mut options = defaults();
        options.apply_user_config(UserConfig {
            exclude: Some(vec!["dist/".into(), "*.lock".into()]),
            ..Default::default()
        });
        options.apply_cli(
            &CliOverrides {
                exclude: vec!["*.lock".into(), "vendor".into()],
                ..Default::default()
            },
            Path::new("/cwd"),
        );

        assert_eq!(options.exclude, vec!["dist/", "*.lock", "vendor"]);
    }

    #[test]
    fn test_blank_output_path_falls_back_to_default() {
        let mut options = defaults();
        options.apply_user_config(UserConfig {
            out: Some(PathBuf::from("   ")),
            ..Default::default()
        });
        options.ensure_output_path(Path::new("/elsewhere"));
        assert_eq!(options.out, PathBuf::from("/elsewhere/commit-prompt.txt"));
    }
}

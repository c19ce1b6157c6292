//! Exclude pattern grammar.
//!
//! A pattern is one of:
//!
//! - `dir/`: directory prefix, matches `dir` and everything below it
//! - `dir*/` (a glob ending in `/`): directory glob, matches any path whose
//!   own text or one of whose leading directories matches the glob
//! - anything containing `*` or `?`: a glob anchored to the whole path,
//!   where `*` stays within one segment and `?` matches one non-`/`
//!   character. `**` crosses `/` only as a whole segment (`**/x`, `x/**`,
//!   `x/**/y`, where `**/` may also match zero directories); elsewhere it
//!   behaves like `*`
//! - anything else: plain prefix, matches the exact path or anything
//!   below it
//!
//! Every other character, `[` `]` and `\` included, is literal. Paths are
//! repository-relative with `/` separators.

use regex_lite::Regex;
use tracing::warn;

/// A compiled exclude pattern.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Stored without the trailing `/`.
    DirPrefix(String),
    /// Stored without the trailing `/`.
    DirGlob { source: String, regex: Regex },
    Glob { source: String, regex: Regex },
    Prefix(String),
}

impl Pattern {
    /// Parse a pattern. Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        // Paths are already root-relative, so a leading `/` anchors nothing.
        let raw = normalize(raw.trim()).trim_start_matches('/');
        if raw.is_empty() {
            return None;
        }

        let (body, is_dir) = match raw.strip_suffix('/') {
            Some(dir) => (dir.trim_end_matches('/'), true),
            None => (raw, false),
        };
        if body.is_empty() {
            return None;
        }

        if body.contains(['*', '?']) {
            match Regex::new(&glob_to_regex(body)) {
                Ok(regex) => {
                    let source = body.to_string();
                    return Some(if is_dir {
                        Pattern::DirGlob { source, regex }
                    } else {
                        Pattern::Glob { source, regex }
                    });
                }
                Err(e) => warn!("Treating '{}' as a plain path: {}", raw, e),
            }
        }

        Some(if is_dir {
            Pattern::DirPrefix(body.to_string())
        } else {
            Pattern::Prefix(body.to_string())
        })
    }

    /// The pattern text as written (directory patterns keep their `/`).
    pub fn as_str(&self) -> String {
        match self {
            Pattern::DirPrefix(dir) | Pattern::DirGlob { source: dir, .. } => format!("{}/", dir),
            Pattern::Glob { source, .. } => source.clone(),
            Pattern::Prefix(prefix) => prefix.clone(),
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        let path = normalize(path);
        match self {
            Pattern::DirPrefix(prefix) | Pattern::Prefix(prefix) => is_within(path, prefix),
            Pattern::DirGlob { regex, .. } => self_and_ancestors(path).any(|p| regex.is_match(p)),
            Pattern::Glob { regex, .. } => regex.is_match(path),
        }
    }

    /// Git pathspecs excluding exactly what `matches` accepts.
    pub fn to_git_pathspecs(&self) -> Vec<String> {
        match self {
            Pattern::DirPrefix(prefix) | Pattern::Prefix(prefix) => {
                vec![format!(":(exclude,literal){}", prefix)]
            }
            Pattern::DirGlob { source, .. } => {
                let glob = escape_glob_literals(source);
                vec![
                    format!(":(exclude,glob){}", glob),
                    format!(":(exclude,glob){}/**", glob),
                ]
            }
            Pattern::Glob { source, .. } => {
                vec![format!(":(exclude,glob){}", escape_glob_literals(source))]
            }
        }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Pattern::DirPrefix(a), Pattern::DirPrefix(b)) => a == b,
            (Pattern::Prefix(a), Pattern::Prefix(b)) => a == b,
            (Pattern::DirGlob { source: a, .. }, Pattern::DirGlob { source: b, .. }) => a == b,
            (Pattern::Glob { source: a, .. }, Pattern::Glob { source: b, .. }) => a == b,
            _ => false,
        }
    }
}

/// `path` equals `prefix` or is nested below it.
fn is_within(path: &str, prefix: &str) -> bool {
    if prefix.is_empty() {
        return false;
    }
    match path.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => rest.starts_with('/'),
        None => false,
    }
}

/// `a/b/c` yields `a/b/c`, `a`, `a/b`.
fn self_and_ancestors(path: &str) -> impl Iterator<Item = &str> {
    std::iter::once(path).chain(path.match_indices('/').map(move |(i, _)| &path[..i]))
}

fn normalize(path: &str) -> &str {
    let mut path = path;
    while let Some(rest) = path.strip_prefix("./") {
        path = rest;
    }
    path
}

/// Git's glob magic gives `[`, `]` and `\` a meaning our grammar doesn't.
fn escape_glob_literals(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len());
    for c in glob.chars() {
        if matches!(c, '[' | ']' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn glob_to_regex(glob: &str) -> String {
    let chars: Vec<char> = glob.chars().collect();
    let mut regex = String::from("^");
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' => {
                let start = i;
                while chars.get(i) == Some(&'*') {
                    i += 1;
                }
                let whole_segment = (start == 0 || chars[start - 1] == '/')
                    && (i == chars.len() || chars[i] == '/');

                if i - start >= 2 && whole_segment {
                    if i < chars.len() {
                        regex.push_str("(?:.*/)?");
                        i += 1;
                    } else {
                        regex.push_str(".*");
                    }
                } else {
                    regex.push_str("[^/]*");
                }
            }
            '?' => {
                regex.push_str("[^/]");
                i += 1;
            }
            c => {
                let mut buf = [0u8; 4];
                regex.push_str(&regex_lite::escape(c.encode_utf8(&mut buf)));
                i += 1;
            }
        }
    }

    regex.push('$');
    regex
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(raw: &str) -> Pattern {
        Pattern::parse(raw).expect("pattern should parse")
    }

    #[test]
    fn test_parse_kinds() {
        assert_eq!(pattern("dist/"), Pattern::DirPrefix("dist".into()));
        assert_eq!(pattern("dist"), Pattern::Prefix("dist".into()));
        assert!(matches!(pattern("*.log"), Pattern::Glob { .. }));
        assert!(matches!(pattern("a?c"), Pattern::Glob { .. }));
        assert!(matches!(pattern("dist*/"), Pattern::DirGlob { .. }));
        assert!(Pattern::parse("   ").is_none());
        assert!(Pattern::parse("/").is_none());
        assert_eq!(pattern("/dist"), Pattern::Prefix("dist".into()));
    }

    #[test]
    fn test_dir_prefix_matches_dir_and_children() {
        let p = pattern("logs/");
        assert!(p.matches("logs"));
        assert!(p.matches("logs/app.log"));
        assert!(p.matches("logs/nested/deep.log"));
        assert!(!p.matches("logs2/app.log"));
        assert!(!p.matches("src/logs/app.log"));
    }

    #[test]
    fn test_plain_prefix_matches_file_and_children() {
        let p = pattern("logs");
        assert!(p.matches("logs"));
        assert!(p.matches("logs/app.log"));
        assert!(!p.matches("logsmith.txt"));
    }

    #[test]
    fn test_dir_glob_matches_children_of_matching_dirs() {
        let p = pattern("dist*/");
        assert!(p.matches("dist1/a.txt"));
        assert!(p.matches("dist/nested/b.js"));
        assert!(p.matches("dist-old"));
        assert!(!p.matches("src/b.txt"));
        assert!(!p.matches("src/dist1/a.txt"));

        let p = pattern("packages/*/build/");
        assert!(p.matches("packages/web/build/index.js"));
        assert!(!p.matches("packages/web/src/build.rs"));
    }

    #[test]
    fn test_single_star_stays_in_segment() {
        let p = pattern("*.log");
        assert!(p.matches("debug.log"));
        assert!(!p.matches("logs/debug.log"));

        let p = pattern("src/*.rs");
        assert!(p.matches("src/main.rs"));
        assert!(!p.matches("src/bin/main.rs"));
    }

    #[test]
    fn test_double_star_crosses_segments() {
        let p = pattern("**/*.snap");
        assert!(p.matches("a.snap"));
        assert!(p.matches("tests/snapshots/a.snap"));

        let p = pattern("build/**");
        assert!(p.matches("build/x/y.o"));
        assert!(!p.matches("src/build/x"));

        let p = pattern("src/**/gen.rs");
        assert!(p.matches("src/gen.rs"));
        assert!(p.matches("src/a/b/gen.rs"));
    }

    #[test]
    fn test_double_star_inside_segment_is_single_star() {
        let p = pattern("foo**bar");
        assert!(p.matches("foo-x-bar"));
        assert!(!p.matches("foo/x/bar"));
    }

    #[test]
    fn test_question_mark_matches_one_char() {
        let p = pattern("file?.txt");
        assert!(p.matches("file1.txt"));
        assert!(!p.matches("file12.txt"));
        assert!(!p.matches("file/.txt"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let p = pattern("v1.0+(rc)*.txt");
        assert!(p.matches("v1.0+(rc)final.txt"));
        assert!(!p.matches("v1x0+(rc)final.txt"));

        let p = pattern("*[a].txt");
        assert!(p.matches("x[a].txt"));
        assert!(!p.matches("xa.txt"));
    }

    #[test]
    fn test_leading_dot_slash_is_ignored() {
        assert!(pattern("./dist").matches("dist/a.js"));
        assert!(pattern("dist").matches("./dist/a.js"));
    }

    #[test]
    fn test_git_pathspecs() {
        assert_eq!(pattern("dist/").to_git_pathspecs(), vec![":(exclude,literal)dist"]);
        assert_eq!(
            pattern("my file.txt").to_git_pathspecs(),
            vec![":(exclude,literal)my file.txt"]
        );
        assert_eq!(pattern("**/*.lock").to_git_pathspecs(), vec![":(exclude,glob)**/*.lock"]);
        assert_eq!(
            pattern("dist*/").to_git_pathspecs(),
            vec![":(exclude,glob)dist*", ":(exclude,glob)dist*/**"]
        );
    }

    #[test]
    fn test_git_pathspecs_escape_bracket_and_backslash() {
        assert_eq!(
            pattern("*[a].txt").to_git_pathspecs(),
            vec![r":(exclude,glob)*\[a\].txt"]
        );
        assert_eq!(pattern(r"a\b*").to_git_pathspecs(), vec![r":(exclude,glob)a\\b*"]);
        assert_eq!(pattern("x[1]").to_git_pathspecs(), vec![":(exclude,literal)x[1]"]);
    }

    #[test]
    fn test_as_str_round_trips_text() {
        assert_eq!(pattern("dist/").as_str(), "dist/");
        assert_eq!(pattern("dist*/").as_str(), "dist*/");
        assert_eq!(pattern("*.log").as_str(), "*.log");
    }
}

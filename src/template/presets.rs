//! Built-in prompt templates.

/// Name used when no preset is configured or the configured one is unknown.
pub const DEFAULT_PRESET: &str = "default";

pub const PRESET_NAMES: [&str; 3] = [DEFAULT_PRESET, "conventional", "detailed"];

const DEFAULT_TEMPLATE: &str = r#"You are helping write version control metadata for the pending changes below.

## Changes
```
{{diff}}
```
{{prTemplateSection}}
## Output Format
Reply with exactly these three sections and nothing else:

Commit message:
<a concise subject line in imperative mood, a blank line, then a short body explaining why>

PR title:
<a short, human-readable pull request title>

Branch:
<a lowercase, hyphen-separated branch name>
"#;

const CONVENTIONAL_TEMPLATE: &str = r#"You are generating a Git commit message following the Conventional Commits specification.

## Changes
```
{{diff}}
```
{{prTemplateSection}}
## Rules
- Subject format: `type(scope): description`
- Type: one of feat, fix, build, chore, ci, docs, style, refactor, perf, test
- Description: imperative mood, lowercase after the colon, no trailing period
- Keep the subject line at or under 50 characters
- Wrap the body at 72 characters; explain why, not what

## Output Format
Commit message:
<type(scope): description>

<body>

PR title:
<the commit subject, or a clearer variant of it>

Branch:
<type/short-description, e.g. feat/add-login>
"#;

const DETAILED_TEMPLATE: &str = r#"You are reviewing a change set in the repository at {{repoRoot}} (collected {{timestamp}}).

## Changes
```
{{diff}}
```
{{prTemplateSection}}
## Instructions
1. Summarize what the change does and which areas of the code it touches.
2. Call out anything risky: behavior changes, migrations, removed APIs.
3. Write a commit message with a subject of at most 72 characters and a
   body that explains the motivation and the previous behavior.
4. Suggest a pull request title and a branch name.

## Output Format
Summary:
<two or three sentences>

Commit message:
<subject>

<body>

PR title:
<title>

Branch:
<lowercase-hyphenated-name>
"#;

/// Look up a preset by name. Names are matched case-insensitively.
pub fn lookup(name: &str) -> Option<&'static str> {
    match name.trim().to_ascii_lowercase().as_str() {
        "default" => Some(DEFAULT_TEMPLATE),
        "conventional" => Some(CONVENTIONAL_TEMPLATE),
        "detailed" => Some(DETAILED_TEMPLATE),
        _ => None,
    }
}

/// The built-in default template.
pub fn default_template() -> &'static str {
    DEFAULT_TEMPLATE
}

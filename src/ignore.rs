//! Ignore rules for the deployment file walk.
//!
//! A rule is a shell-glob pattern matched against a file's base name only.
//! The rule set is the union of a built-in default table and the lines of
//! whichever ignore files exist at the project root (`.gitignore`,
//! `.npmignore`, `.dockerignore`). Order is irrelevant: a name is excluded
//! as soon as any rule matches it.

use crate::error::ManifestError;
use glob::{MatchOptions, Pattern};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Built-in patterns covering VCS, editor and dependency-cache artifacts.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    ".git",
    ".gitmodules",
    ".svn",
    ".npmignore",
    ".dockerignore",
    ".gitignore",
    ".*.swp",
    ".DS_Store",
    ".wafpicke-*",
    ".lock-wscript",
    "npm-debug.log",
    "config.gypi",
    "node_modules",
    "CVS",
];

pub const GITIGNORE: &str = ".gitignore";
pub const NPMIGNORE: &str = ".npmignore";
pub const DOCKERIGNORE: &str = ".dockerignore";

// `*` must be able to match a leading dot (".*.swp", "*.log" on ".x.log").
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A single compiled rule. Patterns that fail to compile are kept so the
/// rule set still reports them, but they never match.
#[derive(Debug, Clone)]
struct Rule {
    source: String,
    compiled: Option<Pattern>,
}

impl Rule {
    fn new(source: String) -> Self {
        let compiled = Pattern::new(&source).ok();
        if compiled.is_none() {
            debug!(pattern = %source, "Ignore pattern does not compile; it will never match");
        }
        Self { source, compiled }
    }

    fn matches(&self, name: &str) -> bool {
        match &self.compiled {
            Some(pattern) => pattern.matches_with(name, MATCH_OPTIONS),
            None => false,
        }
    }
}

/// The combined set of ignore rules for one walk.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    rules: Vec<Rule>,
}

impl IgnoreRules {
    /// Rules built from an explicit pattern list (no defaults implied).
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rules = Self::empty();
        rules.extend(patterns);
        rules
    }

    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// The built-in default table only.
    pub fn defaults() -> Self {
        Self::new(DEFAULT_IGNORE_PATTERNS.iter().copied())
    }

    /// Defaults plus the contents of every listed ignore file present at `root`.
    pub fn load(root: &Path, ignore_files: &[&str]) -> Result<Self, ManifestError> {
        Self::load_with_defaults(root, ignore_files, DEFAULT_IGNORE_PATTERNS)
    }

    /// Like [`IgnoreRules::load`] with a caller-supplied default table.
    pub fn load_with_defaults(
        root: &Path,
        ignore_files: &[&str],
        defaults: &[&str],
    ) -> Result<Self, ManifestError> {
        let mut rules = Self::new(defaults.iter().copied());
        for file_name in ignore_files {
            let patterns = read_ignore_file(root, file_name)?;
            debug!(
                file = %file_name,
                pattern_count = patterns.len(),
                "Loaded ignore file"
            );
            rules.extend(patterns);
        }
        Ok(rules)
    }

    pub fn extend<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules
            .extend(patterns.into_iter().map(|p| Rule::new(p.into())));
    }

    /// True if any rule matches the given base name.
    pub fn matches(&self, base_name: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(base_name))
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.source.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Read one ignore file at the root into patterns.
///
/// A missing file yields no patterns. Lines are trimmed; blank lines and
/// `#` comments are skipped and a trailing `/` is dropped, since rules only
/// ever see base names.
pub fn read_ignore_file(root: &Path, file_name: &str) -> Result<Vec<String>, ManifestError> {
    let path = root.join(file_name);
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(ManifestError::io(path, e)),
    };

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.trim_end_matches('/').to_string())
        .filter(|line| !line.is_empty())
        .collect())
}

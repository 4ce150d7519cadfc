//! Path matchers for rule filtering.
//!
//! A rule selects files either by a regular expression over the relative
//! path or by a set of file extensions. The choice is made once, when the
//! rule is built, and [`Matcher::matches`] dispatches on it.

use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;

/// File selection policy for one rule.
#[derive(Debug, Clone)]
pub enum Matcher {
    Pattern(PatternMatcher),
    Extensions(ExtensionSet),
}

impl Matcher {
    /// Compile a start-anchored, case-sensitive pattern matcher.
    pub fn pattern(expression: &str) -> Result<Self, regex::Error> {
        PatternMatcher::new(expression).map(Matcher::Pattern)
    }

    /// Build a case-insensitive extension matcher.
    pub fn extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Matcher::Extensions(ExtensionSet::new(extensions))
    }

    /// Test a walk-constructed path (host separator form).
    pub fn matches(&self, path: &Path) -> bool {
        match self {
            Matcher::Pattern(p) => p.is_match(&path.to_string_lossy()),
            Matcher::Extensions(set) => set.contains_extension_of(path),
        }
    }

    /// Human-readable form for tables and logs.
    pub fn describe(&self) -> String {
        match self {
            Matcher::Pattern(p) => p.as_str().to_string(),
            Matcher::Extensions(set) => set.iter().collect::<Vec<_>>().join(" "),
        }
    }
}

/// Regular expression matched at position 0 of the path string.
///
/// The expression is not anchored at the end: `.*\.c` also accepts
/// `main.cpp` unless the pattern ends with `$`.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    raw: String,
    anchored: Regex,
}

impl PatternMatcher {
    pub fn new(expression: &str) -> Result<Self, regex::Error> {
        // Validate the expression on its own first so error offsets refer to
        // what the user wrote.
        Regex::new(expression)?;
        let anchored = Regex::new(&format!("^(?:{})", expression))?;
        Ok(Self {
            raw: expression.to_string(),
            anchored,
        })
    }

    pub fn is_match(&self, candidate: &str) -> bool {
        self.anchored.is_match(candidate)
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// Case-folded extensions, each stored with a leading dot.
#[derive(Debug, Clone, Default)]
pub struct ExtensionSet {
    extensions: BTreeSet<String>,
}

impl ExtensionSet {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| normalize_extension(ext.as_ref()))
            .filter(|ext| ext.len() > 1)
            .collect();
        Self { extensions }
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    /// Files without an extension (including dot-files like `.gitignore`)
    /// never match.
    pub fn contains_extension_of(&self, path: &Path) -> bool {
        match extension_of(path) {
            Some(ext) => self.extensions.contains(&ext),
            None => false,
        }
    }
}

/// `"PNG"`, `".png"` and `" .Png "` all normalize to `".png"`.
pub fn normalize_extension(raw: &str) -> String {
    let trimmed = raw.trim().trim_start_matches('.');
    format!(".{}", trimmed.to_lowercase())
}

/// Final extension of the base name, case-folded, with its leading dot.
fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}

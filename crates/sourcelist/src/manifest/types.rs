//! Rule table types

use super::error::{ManifestError, Result};
use super::patterns::{ExtensionSet, Matcher};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A rule as written in the config file.
///
/// Exactly one of `pattern` or `extensions` must be set. Use
/// [`RuleSpec::compile`] to validate it into a [`Rule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Directory to scan, relative to the project root
    pub directory: String,

    /// CMake variable receiving the file list
    pub variable: String,

    /// Regular expression matched at the start of the relative path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// File extensions, e.g. `[".png", ".jpg"]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,

    /// IDE folder name for `source_group`; empty means no grouping
    #[serde(default)]
    pub group: String,
}

impl RuleSpec {
    pub fn with_pattern(directory: &str, variable: &str, pattern: &str, group: &str) -> Self {
        Self {
            directory: directory.to_string(),
            variable: variable.to_string(),
            pattern: Some(pattern.to_string()),
            extensions: None,
            group: group.to_string(),
        }
    }

    pub fn with_extensions(directory: &str, variable: &str, extensions: &[&str], group: &str) -> Self {
        Self {
            directory: directory.to_string(),
            variable: variable.to_string(),
            pattern: None,
            extensions: Some(extensions.iter().map(|e| e.to_string()).collect()),
            group: group.to_string(),
        }
    }

    /// Validate the rule and compile its matcher.
    pub fn compile(&self) -> Result<Rule> {
        validate_variable_name(&self.variable)?;

        if self.directory.trim().is_empty() {
            return Err(invalid(&self.variable, "directory must not be empty"));
        }

        let matcher = match (&self.pattern, &self.extensions) {
            (Some(pattern), None) => {
                Matcher::pattern(pattern).map_err(|source| ManifestError::Pattern {
                    variable: self.variable.clone(),
                    source,
                })?
            }
            (None, Some(extensions)) => {
                let set = ExtensionSet::new(extensions);
                if set.is_empty() {
                    return Err(invalid(&self.variable, "extension list is empty"));
                }
                Matcher::Extensions(set)
            }
            (Some(_), Some(_)) => {
                return Err(invalid(
                    &self.variable,
                    "set either `pattern` or `extensions`, not both",
                ))
            }
            (None, None) => {
                return Err(invalid(&self.variable, "missing `pattern` or `extensions`"))
            }
        };

        let group = self.group.trim();
        Ok(Rule {
            directory: PathBuf::from(&self.directory),
            variable: self.variable.clone(),
            matcher,
            group: (!group.is_empty()).then(|| group.to_string()),
        })
    }
}

/// A compiled rule, ready to scan.
#[derive(Debug, Clone)]
pub struct Rule {
    pub directory: PathBuf,
    pub variable: String,
    pub matcher: Matcher,
    pub group: Option<String>,
}

impl Rule {
    pub fn matches(&self, path: &Path) -> bool {
        self.matcher.matches(path)
    }
}

/// Files matched by one rule, in walk order, with `/` separators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleScan {
    pub variable: String,
    pub directory: String,
    pub group: Option<String>,
    pub files: Vec<String>,
}

impl RuleScan {
    pub fn is_populated(&self) -> bool {
        !self.files.is_empty()
    }

    /// Whether a `source_group` directive is written for this rule.
    pub fn emits_group(&self) -> bool {
        self.is_populated() && self.group.is_some()
    }
}

/// Compile a rule table, failing on the first bad rule.
pub fn compile_rules(specs: &[RuleSpec]) -> Result<Vec<Rule>> {
    specs.iter().map(RuleSpec::compile).collect()
}

/// CMake accepts `[A-Za-z0-9/_.+-]` in unquoted variable references.
pub(super) fn validate_variable_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(invalid(name, "variable name is empty"));
    }
    let bad = name
        .chars()
        .find(|&c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '/' | '+' | '-')));
    match bad {
        Some(c) => Err(invalid(name, &format!("invalid character '{}' in variable name", c))),
        None => Ok(()),
    }
}

fn invalid(variable: &str, reason: &str) -> ManifestError {
    ManifestError::InvalidRule {
        variable: variable.to_string(),
        reason: reason.to_string(),
    }
}

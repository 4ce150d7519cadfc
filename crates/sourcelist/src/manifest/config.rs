//! Configuration for manifest generation

use super::error::{ManifestError, Result};
use super::types::{compile_rules, validate_variable_name, Rule, RuleSpec};
use super::walker::WalkOptions;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Config file looked up in the project root when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "sourcelist.toml";

/// Main configuration: the rule table plus output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestConfig {
    /// Manifest path, relative to the project root
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Name of a trailing list referencing every populated variable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<String>,

    /// Sort directory entries by name for stable output
    #[serde(default = "default_sort")]
    pub sort: bool,

    /// Descend into symlinked directories
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Ordered rule table
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
}

fn default_output() -> PathBuf {
    PathBuf::from("cmake").join("source_files.cmake")
}

fn default_sort() -> bool {
    true
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            aggregate: Some("ALL_SOURCE_FILES".to_string()),
            sort: default_sort(),
            follow_symlinks: false,
            rules: default_rules(),
        }
    }
}

/// The stock table for a C++ project with headers, sources, build scripts
/// and runtime content.
pub fn default_rules() -> Vec<RuleSpec> {
    vec![
        RuleSpec::with_pattern("include", "HEADER_FILES", r"^.*\.h(pp)?$", ""),
        RuleSpec::with_pattern("src", "SOURCE_FILES", r"^.*\.c(pp)?$", ""),
        RuleSpec::with_pattern("cmake", "CMAKE_FILES", ".*", "CMake Files"),
        RuleSpec::with_pattern("scripts", "SCRIPT_FILES", ".*", "Script Files"),
        RuleSpec::with_pattern("content", "CONTENT_FILES", ".*", "Content Files"),
    ]
}

impl ManifestConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ManifestError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ManifestError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            sorted: self.sort,
            follow_symlinks: self.follow_symlinks,
        }
    }

    /// Validate and compile the rule table.
    ///
    /// Runs before anything is scanned or truncated, so a bad pattern never
    /// costs the previous manifest.
    pub fn compile(&self) -> Result<Vec<Rule>> {
        if let Some(aggregate) = &self.aggregate {
            if aggregate.trim().is_empty() {
                return Err(ManifestError::Config(
                    "aggregate variable name is empty".to_string(),
                ));
            }
            validate_variable_name(aggregate)?;
            if self.rules.iter().any(|r| &r.variable == aggregate) {
                return Err(ManifestError::Config(format!(
                    "aggregate '{}' collides with a rule variable",
                    aggregate
                )));
            }
        }

        let rules = compile_rules(&self.rules)?;

        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.variable.as_str()) {
                warn!(variable = %rule.variable, "Variable set by more than one rule; last block wins in CMake");
            }
        }

        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ManifestConfig::default();
        assert_eq!(config.output, PathBuf::from("cmake").join("source_files.cmake"));
        assert_eq!(config.aggregate.as_deref(), Some("ALL_SOURCE_FILES"));
        assert!(config.sort);
        let vars: Vec<_> = config.rules.iter().map(|r| r.variable.as_str()).collect();
        assert_eq!(
            vars,
            ["HEADER_FILES", "SOURCE_FILES", "CMAKE_FILES", "SCRIPT_FILES", "CONTENT_FILES"]
        );
        assert_eq!(config.compile().unwrap().len(), 5);
    }

    #[test]
    fn test_config_parsing() {
        let config = ManifestConfig::from_toml(
            r#"
            output = "build/files.cmake"

            [[rules]]
            directory = "content"
            variable = "IMAGES"
            extensions = [".png", ".JPG"]
            group = "Images"

            [[rules]]
            directory = "src"
            variable = "SOURCES"
            pattern = '^.*\.c(pp)?$'
            "#,
        )
        .unwrap();

        assert_eq!(config.output, PathBuf::from("build/files.cmake"));
        assert!(config.aggregate.is_none());
        assert!(config.sort);
        assert!(!config.follow_symlinks);
        assert_eq!(config.rules.len(), 2);
        assert_eq!(config.rules[1].group, "");

        let rules = config.compile().unwrap();
        assert_eq!(rules[0].group.as_deref(), Some("Images"));
        assert!(rules[1].group.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = ManifestConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = ManifestConfig::from_toml(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn unknown_toml_is_a_config_error() {
        let err = ManifestConfig::from_toml("rules = 5").unwrap_err();
        assert!(matches!(err, ManifestError::Config(_)));
    }

    #[test]
    fn aggregate_must_not_shadow_rule() {
        let config = ManifestConfig {
            aggregate: Some("SOURCE_FILES".to_string()),
            ..ManifestConfig::default()
        };
        assert!(config.compile().unwrap_err().to_string().contains("collides"));
    }

    #[test]
    fn aggregate_name_is_validated() {
        let config = ManifestConfig {
            aggregate: Some("ALL FILES)".to_string()),
            ..ManifestConfig::default()
        };
        let err = config.compile().unwrap_err();
        assert!(matches!(err, ManifestError::InvalidRule { .. }));
        assert!(err.to_string().contains("invalid character ' '"));

        let config = ManifestConfig {
            aggregate: Some("ALL.FILES-2".to_string()),
            ..ManifestConfig::default()
        };
        assert!(config.compile().is_ok());
    }

    #[test]
    fn save_and_load() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILE);
        let config = ManifestConfig {
            follow_symlinks: true,
            ..ManifestConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(ManifestConfig::load(&path).unwrap(), config);
    }
}

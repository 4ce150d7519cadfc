//! Manifest - Rule-Based File Discovery & CMake Emission
//!
//! Walks rule directories under a project root, selects files per rule and
//! writes them as CMake list variables.

pub mod config;
pub mod error;
pub mod generator;
pub mod patterns;
pub mod types;
pub mod walker;
pub mod writer;

pub use config::{default_rules, ManifestConfig, DEFAULT_CONFIG_FILE};
pub use error::{ManifestError, Result};
pub use generator::{GenerateReport, Generator, RuleSummary};
pub use patterns::{ExtensionSet, Matcher, PatternMatcher};
pub use types::{compile_rules, Rule, RuleScan, RuleSpec};
pub use walker::{to_manifest_path, walk, WalkOptions};
pub use writer::ManifestWriter;

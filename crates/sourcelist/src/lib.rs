//! sourcelist - CMake Source List Generator
//!
//! Scans a project tree with an ordered rule table and regenerates a CMake
//! include file listing the matched files per variable.
//!
//! # Example
//!
//! ```no_run
//! use sourcelist::{Generator, ManifestConfig};
//!
//! let config = ManifestConfig::default();
//! let generator = Generator::from_config("/path/to/project", &config)?;
//! let report = generator.generate(&config.output)?;
//! println!("{} files listed", report.total_files);
//! # Ok::<(), sourcelist::ManifestError>(())
//! ```

pub mod manifest;

pub use manifest::{
    GenerateReport, Generator, ManifestConfig, ManifestError, Matcher, Rule, RuleScan, RuleSpec,
    RuleSummary, WalkOptions,
};

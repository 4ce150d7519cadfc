//! Scan rule directories and write the manifest.

use super::config::ManifestConfig;
use super::error::{ManifestError, Result};
use super::types::{Rule, RuleScan};
use super::walker::{to_manifest_path, walk, WalkOptions};
use super::writer::ManifestWriter;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Per-rule outcome of a run
#[derive(Debug, Clone, Serialize)]
pub struct RuleSummary {
    pub variable: String,
    pub directory: String,
    pub group: Option<String>,
    pub files: usize,
    pub grouped: bool,
}

/// Result of a generate run
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    /// Where the manifest went; `None` when rendered to a caller's sink
    pub output: Option<PathBuf>,
    pub rules: Vec<RuleSummary>,
    /// Variables with at least one file, in rule order
    pub populated: Vec<String>,
    pub aggregate: Option<String>,
    pub total_files: usize,
    pub duration_ms: u64,
}

/// Manifest generator for one project root.
///
/// All rule directories and the output path resolve against `root`; the
/// process working directory is never changed.
pub struct Generator {
    root: PathBuf,
    rules: Vec<Rule>,
    aggregate: Option<String>,
    walk_options: WalkOptions,
}

impl Generator {
    pub fn new(root: impl Into<PathBuf>, rules: Vec<Rule>) -> Self {
        Self {
            root: root.into(),
            rules,
            aggregate: None,
            walk_options: WalkOptions::default(),
        }
    }

    /// Compile `config` and build a generator. Fails before any I/O on a
    /// malformed rule table.
    pub fn from_config(root: impl Into<PathBuf>, config: &ManifestConfig) -> Result<Self> {
        let rules = config.compile()?;
        Ok(Self::new(root, rules)
            .with_aggregate(config.aggregate.clone())
            .with_walk_options(config.walk_options()))
    }

    pub fn with_aggregate(mut self, aggregate: Option<String>) -> Self {
        self.aggregate = aggregate;
        self
    }

    pub fn with_walk_options(mut self, options: WalkOptions) -> Self {
        self.walk_options = options;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Walk and match one rule.
    pub fn scan_rule(&self, rule: &Rule) -> Result<RuleScan> {
        let mut files = Vec::new();
        for path in walk(&self.root, &rule.directory, self.walk_options) {
            let path = path?;
            if rule.matches(&path) {
                files.push(to_manifest_path(&path));
            }
        }
        debug!(variable = %rule.variable, matched = files.len(), "Scanned rule directory");

        Ok(RuleScan {
            variable: rule.variable.clone(),
            directory: to_manifest_path(&rule.directory),
            group: rule.group.clone(),
            files,
        })
    }

    /// Walk and match every rule without writing anything.
    pub fn scan(&self) -> Result<Vec<RuleScan>> {
        self.rules.iter().map(|rule| self.scan_rule(rule)).collect()
    }

    /// Regenerate the manifest at `output` (relative paths resolve against
    /// the project root).
    ///
    /// The file is truncated up front. If a later walk or write fails the
    /// error is returned and the file is left incomplete.
    pub fn generate(&self, output: &Path) -> Result<GenerateReport> {
        let output_path = self.root.join(output);
        let file = File::create(&output_path).map_err(|source| ManifestError::Output {
            path: output_path.clone(),
            source,
        })?;

        let mut report = self.render(BufWriter::new(file))?;
        info!(
            output = %output_path.display(),
            rules = report.rules.len(),
            files = report.total_files,
            "Wrote manifest"
        );
        report.output = Some(output_path);
        Ok(report)
    }

    /// Write the manifest to an arbitrary sink.
    pub fn render<W: Write>(&self, out: W) -> Result<GenerateReport> {
        let start = Instant::now();
        let mut writer = ManifestWriter::new(out);
        let mut summaries = Vec::with_capacity(self.rules.len());
        let mut populated = Vec::new();

        for rule in &self.rules {
            let scan = self.scan_rule(rule)?;
            writer.write_rule_block(&scan.variable, &scan.files, scan.group.as_deref())?;

            if scan.is_populated() {
                populated.push(scan.variable.clone());
            }
            summaries.push(RuleSummary {
                grouped: scan.emits_group(),
                files: scan.files.len(),
                variable: scan.variable,
                directory: scan.directory,
                group: scan.group,
            });
        }

        if let Some(aggregate) = &self.aggregate {
            writer.write_aggregate(aggregate, &populated)?;
        }
        writer.finish()?;

        Ok(GenerateReport {
            output: None,
            total_files: summaries.iter().map(|s| s.files).sum(),
            rules: summaries,
            populated,
            aggregate: self.aggregate.clone(),
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}

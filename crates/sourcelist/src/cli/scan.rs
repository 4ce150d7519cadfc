//! Scan command - show what each rule matches without writing anything.

use crate::cli::context::ProjectContext;
use crate::cli::output::{group_cell, plural, print_table};
use serde::Serialize;
use sourcelist::RuleScan;

/// Arguments for the scan command
#[derive(Debug, Default)]
pub struct ScanArgs {
    /// List every matched file under its rule
    pub files: bool,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ScanOutput<'a> {
    root: String,
    config: String,
    rules: &'a [RuleScan],
    total_files: usize,
}

/// Execute the scan command
pub fn run(ctx: &ProjectContext, args: ScanArgs) -> anyhow::Result<()> {
    let generator = ctx.generator()?;
    let scans = generator.scan()?;
    let total_files: usize = scans.iter().map(|s| s.files.len()).sum();

    if args.json {
        let output = ScanOutput {
            root: ctx.root.display().to_string(),
            config: ctx.config_label(),
            rules: &scans,
            total_files,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let rows = generator
        .rules()
        .iter()
        .zip(&scans)
        .map(|(rule, scan)| {
            vec![
                scan.variable.clone(),
                scan.directory.clone(),
                rule.matcher.describe(),
                group_cell(scan.group.as_deref()),
                scan.files.len().to_string(),
            ]
        })
        .collect();
    print_table(&["Variable", "Directory", "Match", "Group", "Files"], rows);

    if args.files {
        for scan in scans.iter().filter(|s| s.is_populated()) {
            println!();
            println!("{}:", scan.variable);
            for file in &scan.files {
                println!("  {}", file);
            }
        }
    }

    println!();
    println!("{} across {}", plural(total_files, "file"), plural(scans.len(), "rule"));
    Ok(())
}

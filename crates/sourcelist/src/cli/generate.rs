//! Generate command - regenerate the CMake source list

use crate::cli::context::ProjectContext;
use crate::cli::error::from_manifest_error;
use crate::cli::output::{group_cell, plural, print_table};
use sourcelist::GenerateReport;
use std::io::Write;
use std::path::PathBuf;

/// Arguments for the generate command
#[derive(Debug, Default)]
pub struct GenerateArgs {
    pub output: Option<PathBuf>,
    pub stdout: bool,
    pub json: bool,
}

/// Execute the generate command
pub fn run(ctx: &ProjectContext, args: GenerateArgs) -> anyhow::Result<()> {
    let generator = ctx.generator()?;

    if args.stdout {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        generator.render(&mut handle).map_err(from_manifest_error)?;
        handle.flush()?;
        return Ok(());
    }

    let output = args.output.unwrap_or_else(|| ctx.config.output.clone());
    let report = generator.generate(&output).map_err(from_manifest_error)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(ctx, &report);
    }

    Ok(())
}

fn print_report(ctx: &ProjectContext, report: &GenerateReport) {
    let rows = report
        .rules
        .iter()
        .map(|rule| {
            vec![
                rule.variable.clone(),
                rule.directory.clone(),
                group_cell(rule.group.as_deref()),
                rule.files.to_string(),
            ]
        })
        .collect();
    print_table(&["Variable", "Directory", "Group", "Files"], rows);

    let output = report
        .output
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    println!(
        "Wrote {} ({}, {} populated) from {}",
        output,
        plural(report.total_files, "file"),
        plural(report.populated.len(), "list"),
        ctx.config_label()
    );
    if let Some(aggregate) = &report.aggregate {
        println!("Aggregate list: {}", aggregate);
    }
}
